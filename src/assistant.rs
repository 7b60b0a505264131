//! A keyword driven assistant that answers simple questions about spending.
//!
//! Questions are matched against an ordered table of intents. The first
//! intent whose predicate accepts the question produces the answer, and
//! unrecognised questions get a hint showing what can be asked.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::compute_balance,
    categorizer::find_category,
    extract::AppJson,
    stores::TransactionQuery,
    transaction::{Transaction, TransactionState, TransactionType},
};

/// The answer given to questions the assistant does not understand.
pub const FALLBACK_ANSWER: &str = "Ask something like 'How much did I spend on food?'";

struct Intent {
    applies: fn(&str) -> bool,
    respond: fn(&str, &[Transaction]) -> String,
}

const INTENTS: &[Intent] = &[
    Intent {
        applies: |question| asks_about_spending(question) && find_category(question).is_some(),
        respond: spending_in_category,
    },
    Intent {
        applies: asks_about_spending,
        respond: |_, transactions| {
            format!(
                "You spent {:.2} in total.",
                compute_balance(transactions).total_expense
            )
        },
    },
    Intent {
        applies: |question| question.contains("balance") || question.contains("saldo"),
        respond: |_, transactions| {
            format!(
                "Your current balance is {:.2}.",
                compute_balance(transactions).balance
            )
        },
    },
];

fn asks_about_spending(question: &str) -> bool {
    ["spend", "spent", "gastei", "gasto"]
        .iter()
        .any(|keyword| question.contains(keyword))
}

fn spending_in_category(question: &str, transactions: &[Transaction]) -> String {
    let Some(category) = find_category(question) else {
        return FALLBACK_ANSWER.to_owned();
    };

    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.category == category
                && transaction.transaction_type == TransactionType::Expense
        })
        .cloned()
        .collect();

    format!(
        "You spent {:.2} on {category}.",
        compute_balance(&matching).total_expense
    )
}

/// Answer `question` using the figures from `transactions`.
///
/// Matching ignores case. Questions that match no intent get [FALLBACK_ANSWER].
pub fn answer(question: &str, transactions: &[Transaction]) -> String {
    let question = question.to_lowercase();

    INTENTS
        .iter()
        .find(|intent| (intent.applies)(&question))
        .map_or_else(
            || FALLBACK_ANSWER.to_owned(),
            |intent| (intent.respond)(&question, transactions),
        )
}

/// The request body for the assistant.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// The question to answer.
    pub question: String,
}

/// The response body from the assistant.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssistantResponse {
    /// The assistant's answer.
    pub answer: String,
}

/// A route handler for asking the assistant a question about all stored transactions.
pub async fn assistant_endpoint(
    State(state): State<TransactionState>,
    AppJson(request): AppJson<AssistantRequest>,
) -> Response {
    let transactions = match state.transaction_store.list(&TransactionQuery::default()) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("Could not fetch transactions for the assistant: {error}");
            return error.into_response();
        }
    };

    let answer = answer(&request.question, &transactions);
    tracing::debug!("Answered {:?} with {:?}", request.question, answer);

    Json(AssistantResponse { answer }).into_response()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        endpoints,
        test_utils::get_test_server,
        transaction::{Transaction, TransactionType},
    };

    use super::{AssistantResponse, FALLBACK_ANSWER, answer};

    fn create_test_transaction(
        id: i64,
        description: &str,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction::build(
            description,
            amount,
            transaction_type,
            datetime!(2025-10-05 12:00 UTC),
        )
        .unwrap()
        .finalize(id)
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(1, "Salary", dec!(5000.00), TransactionType::Income),
            create_test_transaction(2, "Supermarket", dec!(300.00), TransactionType::Expense),
            create_test_transaction(3, "Restaurante", dec!(50.00), TransactionType::Expense),
            create_test_transaction(4, "Uber", dec!(23.40), TransactionType::Expense),
        ]
    }

    #[test]
    fn answers_spending_in_category() {
        let transactions = sample_transactions();

        assert_eq!(
            answer("How much did I spend on food?", &transactions),
            "You spent 350.00 on food."
        );
        assert_eq!(
            answer("Quanto gastei com comida?", &transactions),
            "You spent 350.00 on food."
        );
    }

    #[test]
    fn category_intent_ignores_income() {
        let mut transactions = sample_transactions();
        transactions.push(create_test_transaction(
            5,
            "Restaurant refund",
            dec!(20.00),
            TransactionType::Income,
        ));

        assert_eq!(
            answer("how much have I spent at restaurants", &transactions),
            "You spent 350.00 on food."
        );
    }

    #[test]
    fn answers_total_spending_without_category() {
        assert_eq!(
            answer("How much did I spend this month?", &sample_transactions()),
            "You spent 373.40 in total."
        );
    }

    #[test]
    fn answers_balance() {
        assert_eq!(
            answer("What is my BALANCE?", &sample_transactions()),
            "Your current balance is 4626.60."
        );
    }

    #[test]
    fn unknown_question_gets_hint() {
        assert_eq!(answer("Will it rain tomorrow?", &sample_transactions()), FALLBACK_ANSWER);
        assert_eq!(answer("", &[]), FALLBACK_ANSWER);
    }

    #[test]
    fn answers_with_no_transactions() {
        assert_eq!(
            answer("How much did I spend on transport?", &[]),
            "You spent 0.00 on transport."
        );
    }

    #[tokio::test]
    async fn endpoint_answers_from_stored_transactions() {
        let server = get_test_server();
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "Comida no restaurante",
                "amount": "350.00",
                "type": "expense",
            }))
            .await
            .assert_status_success();

        let response = server
            .post(endpoints::ASSISTANT)
            .json(&json!({ "question": "Quanto gastei com comida?" }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<AssistantResponse>(),
            AssistantResponse {
                answer: "You spent 350.00 on food.".to_owned()
            }
        );
    }
}
