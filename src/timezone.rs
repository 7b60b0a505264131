use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
///
/// Returns `None` if `canonical_timezone` is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current date and time in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError](crate::Error::InvalidTimezoneError) if the timezone is
/// not a valid, canonical timezone name.
pub(crate) fn now_in_timezone(canonical_timezone: &str) -> Result<OffsetDateTime, crate::Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| crate::Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset))
}
