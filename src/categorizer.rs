//! Keyword based categorization of transaction descriptions.

use crate::transaction::Category;

/// Keywords and the category they indicate, checked in order.
///
/// Keywords must be lowercase single words. The first row with a keyword
/// matching a word of the text wins.
const KEYWORD_TABLE: &[(&[&str], Category)] = &[
    (
        &[
            "food",
            "restaurant",
            "grocery",
            "groceries",
            "lunch",
            "dinner",
            "supermarket",
            "cafe",
            "coffee",
            "comida",
            "restaurante",
            "supermercado",
        ],
        Category::Food,
    ),
    (
        &[
            "transport",
            "uber",
            "taxi",
            "bus",
            "train",
            "fuel",
            "petrol",
            "parking",
        ],
        Category::Transport,
    ),
    (
        &[
            "leisure", "cinema", "movie", "concert", "netflix", "game", "lazer",
        ],
        Category::Leisure,
    ),
    (
        &[
            "health", "pharmacy", "doctor", "dentist", "hospital", "gym", "saude", "saúde",
        ],
        Category::Health,
    ),
    (
        &[
            "bill",
            "bills",
            "rent",
            "electricity",
            "water",
            "internet",
            "phone",
            "insurance",
            "aluguel",
            "contas",
        ],
        Category::Bills,
    ),
];

/// Whether `word` is `keyword` or its plural, e.g. "restaurants" or "buses".
fn matches_keyword(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some(suffix) => matches!(suffix, "" | "s" | "es"),
        None => false,
    }
}

/// Find the first category whose keywords appear as words in `text`, ignoring case.
///
/// Words are runs of letters and digits, so "bus" matches "Bus ticket" but not
/// "Business lunch".
pub fn find_category(text: &str) -> Option<Category> {
    let text = text.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    KEYWORD_TABLE
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|keyword| words.iter().any(|word| matches_keyword(word, keyword)))
        })
        .map(|(_, category)| *category)
}

/// Assign a category to a transaction description.
///
/// Descriptions that do not match any keyword are categorized as [Category::Other].
pub fn categorize(description: &str) -> Category {
    find_category(description).unwrap_or_default()
}
