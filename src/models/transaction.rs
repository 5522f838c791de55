//! This file defines the `Transaction` type, a record of money coming in or
//! going out, and the types needed to create one.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseID, UserId},
};

/// The maximum number of characters in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Whether a transaction records money coming in or going out.
///
/// These are the only two valid values; amounts themselves are unsigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The string form used to persist and display the transaction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount of money spent or earned on a calendar date, labelled with one
/// of the owning user's categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) id: DatabaseID,
    pub(crate) date: Date,
    pub(crate) amount: Decimal,
    pub(crate) description: Option<String>,
    pub(crate) kind: TransactionType,
    pub(crate) category_id: DatabaseID,
    pub(crate) user_id: UserId,
    pub(crate) version: i64,
}

impl Transaction {
    /// Create a builder for a transaction.
    ///
    /// The amount is normalized to two decimal places.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if `amount` is less than 0.01 after
    /// normalization.
    pub fn build(
        amount: Decimal,
        date: Date,
        kind: TransactionType,
        category_id: DatabaseID,
    ) -> Result<TransactionBuilder, Error> {
        TransactionBuilder::new(amount, date, kind, category_id)
    }

    /// The id of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// A user-provided note on the transaction, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the transaction is income or an expense.
    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    /// The category the transaction is labelled with.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The id of the user that owns the transaction.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The optimistic concurrency version of the row as it was read.
    ///
    /// Pass this back when updating so a conflicting edit is detected
    /// instead of silently overwritten.
    pub fn version(&self) -> i64 {
        self.version
    }
}

/// Holds the validated fields of a transaction that has not been persisted
/// yet. Used both to create transactions and to describe the new state of an
/// existing transaction when updating it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: Decimal,
    pub(crate) date: Date,
    pub(crate) description: Option<String>,
    pub(crate) kind: TransactionType,
    pub(crate) category_id: DatabaseID,
}

impl TransactionBuilder {
    /// Create a new transaction builder.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if `amount` is less than 0.01 after
    /// normalization to two decimal places.
    pub fn new(
        amount: Decimal,
        date: Date,
        kind: TransactionType,
        category_id: DatabaseID,
    ) -> Result<Self, Error> {
        let amount = amount.round_dp(2);

        if amount < Decimal::new(1, 2) {
            return Err(Error::NonPositiveAmount(amount));
        }

        Ok(Self {
            amount,
            date,
            description: None,
            kind,
            category_id,
        })
    }

    /// Set the description for the transaction. An empty string clears the
    /// description.
    ///
    /// # Errors
    /// Returns [Error::DescriptionTooLong] if `description` is longer than
    /// [MAX_DESCRIPTION_LENGTH] characters.
    pub fn description(mut self, description: &str) -> Result<Self, Error> {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(Error::DescriptionTooLong);
        }

        self.description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };

        Ok(self)
    }
}
