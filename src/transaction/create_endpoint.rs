//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_store,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder, TransactionType},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store for managing transactions.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// An amount as sent by a client, either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A string holding a number, e.g. `"12.5"`.
    Text(String),
}

impl AmountInput {
    /// Convert to a finite number.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the text is not a number or the value is not finite.
    pub fn to_amount(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(text.clone()))?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(Error::InvalidAmount(amount.to_string()))
        }
    }
}

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that missing fields can be reported with
/// a single validation error instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The value of the transaction.
    pub amount: Option<AmountInput>,
    /// The category, defaults to "Other".
    pub category: Option<String>,
}

impl TransactionForm {
    /// Validate the form and turn it into a [TransactionBuilder].
    ///
    /// # Errors
    /// Returns:
    /// - [Error::MissingFields] if the type, description or amount is missing or empty,
    /// - [Error::InvalidTransactionType] if the type is not "income" or "expense",
    /// - [Error::InvalidAmount] if the amount is not a finite number.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let (Some(kind), Some(description), Some(amount)) = (self.kind, self.description, self.amount)
        else {
            return Err(Error::MissingFields);
        };

        if kind.is_empty() || description.trim().is_empty() {
            return Err(Error::MissingFields);
        }

        let kind: TransactionType = kind.parse()?;
        let amount = amount.to_amount()?;

        Ok(Transaction::build(kind, &description, amount).category(self.category))
    }
}

/// A route handler for creating a new transaction, responds with the created transaction.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(form) = payload.map_err(|rejection| {
        tracing::debug!("rejected transaction body: {rejection}");
        Error::InvalidRequestBody(rejection.body_text())
    })?;

    let transaction = form.validate()?.finalize();

    let mut store = lock_store(&state.store)?;
    store.append(transaction.clone());
    tracing::debug!("created {} transaction {}", transaction.kind, transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};

    use crate::{
        Error,
        stores::{MemoryStorage, TransactionStore},
        transaction::{
            DEFAULT_CATEGORY, TransactionType,
            create_endpoint::{AmountInput, CreateTransactionState, TransactionForm},
            create_transaction_endpoint,
        },
    };

    fn get_test_state() -> (CreateTransactionState, MemoryStorage) {
        let storage = MemoryStorage::new();
        let state = CreateTransactionState {
            store: Arc::new(Mutex::new(TransactionStore::load(storage.clone()))),
        };

        (state, storage)
    }

    fn salary_form() -> TransactionForm {
        TransactionForm {
            kind: Some("income".to_owned()),
            description: Some("Salary".to_owned()),
            amount: Some(AmountInput::Number(1000.0)),
            category: None,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, storage) = get_test_state();

        let (status, Json(transaction)) =
            create_transaction_endpoint(State(state.clone()), Ok(Json(salary_form())))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(transaction.kind, TransactionType::Income);
        assert_eq!(transaction.description, "Salary");
        assert_eq!(transaction.amount, 1000.0);
        assert_eq!(transaction.category, DEFAULT_CATEGORY);
        assert_eq!(storage.saved(), vec![transaction]);
    }

    #[tokio::test]
    async fn invalid_form_adds_nothing() {
        let (state, storage) = get_test_state();
        let form = TransactionForm {
            description: None,
            ..salary_form()
        };

        let result = create_transaction_endpoint(State(state.clone()), Ok(Json(form))).await;

        assert_eq!(result.err(), Some(Error::MissingFields));
        assert!(state.store.lock().unwrap().transactions().is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let forms = [
            TransactionForm {
                kind: None,
                ..salary_form()
            },
            TransactionForm {
                description: None,
                ..salary_form()
            },
            TransactionForm {
                amount: None,
                ..salary_form()
            },
            TransactionForm {
                kind: Some(String::new()),
                ..salary_form()
            },
            TransactionForm {
                description: Some("   ".to_owned()),
                ..salary_form()
            },
        ];

        for form in forms {
            assert_eq!(form.validate(), Err(Error::MissingFields));
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let form = TransactionForm {
            kind: Some("transfer".to_owned()),
            ..salary_form()
        };

        assert_eq!(
            form.validate(),
            Err(Error::InvalidTransactionType("transfer".to_owned()))
        );
    }

    #[test]
    fn numeric_strings_are_coerced() {
        assert_eq!(AmountInput::Text(" 12.50 ".to_owned()).to_amount(), Ok(12.5));
        assert_eq!(AmountInput::Text("-3".to_owned()).to_amount(), Ok(-3.0));
        assert_eq!(AmountInput::Number(7.0).to_amount(), Ok(7.0));
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        assert_eq!(
            AmountInput::Text("lots".to_owned()).to_amount(),
            Err(Error::InvalidAmount("lots".to_owned()))
        );
        assert!(AmountInput::Text(String::new()).to_amount().is_err());
        assert!(AmountInput::Text("NaN".to_owned()).to_amount().is_err());
        assert!(AmountInput::Text("inf".to_owned()).to_amount().is_err());
    }

    #[test]
    fn negative_amounts_are_allowed() {
        let form = TransactionForm {
            amount: Some(AmountInput::Number(-25.0)),
            ..salary_form()
        };

        assert_eq!(form.validate().unwrap().amount, -25.0);
    }
}
