//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionType, UserId},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction for `user_id` in the store.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if the builder's category ID does not
    /// refer to an existing category.
    fn create(
        &self,
        user_id: &UserId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error>;

    /// Retrieve a transaction owned by `user_id` from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist or belongs
    /// to another user.
    fn get(&self, user_id: &UserId, transaction_id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve the user's transactions matching `query`, ordered by date
    /// descending (newest first).
    fn get_query(
        &self,
        user_id: &UserId,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error>;

    /// Replace the fields of an existing transaction with the builder's
    /// values.
    ///
    /// `expected_version` must be the version of the row as the caller read
    /// it. The update only applies if the row still has that version.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist (any
    /// more) or belongs to another user, or [Error::ConcurrentModification]
    /// if the row was modified since it was read.
    fn update(
        &self,
        user_id: &UserId,
        transaction_id: DatabaseID,
        builder: TransactionBuilder,
        expected_version: i64,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist or belongs
    /// to another user.
    fn delete(&self, user_id: &UserId, transaction_id: DatabaseID) -> Result<(), Error>;

    /// Sum the amounts of the user's transactions of the given type with
    /// dates in `date_range` (inclusive on both ends).
    ///
    /// Returns zero when no transactions match. The sum is exact decimal
    /// arithmetic, normalized to two decimal places.
    fn sum(
        &self,
        user_id: &UserId,
        kind: TransactionType,
        date_range: RangeInclusive<Date>,
    ) -> Result<Decimal, Error>;

    /// Every expense amount for the user paired with its resolved category
    /// name, `None` when the category reference no longer resolves.
    ///
    /// This feeds the top spending category ranking and is deliberately not
    /// filtered by date.
    fn expense_totals_by_category(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(Option<String>, Decimal)>, Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query]. All filters are optional and combine with
/// AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Include only transactions of this type.
    pub kind: Option<TransactionType>,
    /// Include only transactions labelled with this category.
    pub category_id: Option<DatabaseID>,
    /// Include transactions within `date_range` (inclusive on both ends).
    pub date_range: Option<RangeInclusive<Date>>,
}
