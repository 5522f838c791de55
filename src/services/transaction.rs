//! Business rules for recording and editing transactions.

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, UserId},
    stores::{CategoryStore, TransactionQuery, TransactionStore},
};

/// Records, edits and deletes transactions on behalf of a user.
///
/// The category store is consulted on every create and update so that a
/// transaction can only ever be labelled with a category owned by the same
/// user.
#[derive(Debug, Clone)]
pub struct TransactionService<C, T> {
    category_store: C,
    transaction_store: T,
}

impl<C, T> TransactionService<C, T>
where
    C: CategoryStore,
    T: TransactionStore,
{
    /// Create a new transaction service using the given stores.
    pub fn new(category_store: C, transaction_store: T) -> Self {
        Self {
            category_store,
            transaction_store,
        }
    }

    /// Record a new transaction for `user_id`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if the builder's category is not a
    /// category owned by `user_id`.
    pub fn create(
        &self,
        user_id: &UserId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        self.ensure_category_owned(user_id, builder.category_id)?;

        self.transaction_store.create(user_id, builder)
    }

    /// Get the transaction with `transaction_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist or belongs
    /// to another user.
    pub fn get(
        &self,
        user_id: &UserId,
        transaction_id: DatabaseID,
    ) -> Result<Transaction, Error> {
        self.transaction_store.get(user_id, transaction_id)
    }

    /// The user's transactions matching `query`, ordered by date descending.
    pub fn list(
        &self,
        user_id: &UserId,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        self.transaction_store.get_query(user_id, query)
    }

    /// Replace the fields of an existing transaction with the builder's
    /// values.
    ///
    /// `expected_version` must be the [version](Transaction::version) of the
    /// row as the caller read it, so a conflicting edit from e.g. another
    /// browser tab is detected instead of silently overwritten.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist (any more)
    /// or belongs to another user, [Error::ConcurrentModification] if the row
    /// was modified since it was read, or [Error::InvalidCategory] if the new
    /// category is not a category owned by `user_id`.
    pub fn update(
        &self,
        user_id: &UserId,
        transaction_id: DatabaseID,
        builder: TransactionBuilder,
        expected_version: i64,
    ) -> Result<Transaction, Error> {
        self.ensure_category_owned(user_id, builder.category_id)?;

        self.transaction_store
            .update(user_id, transaction_id, builder, expected_version)
    }

    /// Delete the transaction with `transaction_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist or belongs
    /// to another user.
    pub fn delete(&self, user_id: &UserId, transaction_id: DatabaseID) -> Result<(), Error> {
        self.transaction_store.delete(user_id, transaction_id)
    }

    /// Check that `category_id` refers to a category owned by `user_id`.
    ///
    /// A category that exists but belongs to another user is reported the
    /// same as one that does not exist at all.
    fn ensure_category_owned(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
    ) -> Result<(), Error> {
        self.category_store
            .get(user_id, category_id)
            .map_err(|error| match error {
                Error::NotFound => Error::InvalidCategory(Some(category_id)),
                error => error,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod transaction_service_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Date, Month};

    use crate::{
        Error,
        models::{Category, Transaction, TransactionType, UserId},
        stores::{TransactionQuery, sqlite::{SQLAppState, create_app_state}},
    };

    fn get_app_state() -> SQLAppState {
        let connection = Connection::open_in_memory().unwrap();

        create_app_state(connection).unwrap()
    }

    fn test_user() -> UserId {
        UserId::new("alice")
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    fn create_category(state: &SQLAppState, name: &str, user_id: &UserId) -> Category {
        state.category_service().create(user_id, name).unwrap()
    }

    #[test]
    fn create_transaction_succeeds() {
        let state = get_app_state();
        let category = create_category(&state, "Food", &test_user());
        let builder = Transaction::build(
            Decimal::new(1250, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap();

        let transaction = state
            .transaction_service()
            .create(&test_user(), builder)
            .unwrap();

        assert_eq!(transaction.amount(), Decimal::new(1250, 2));
        assert_eq!(transaction.category_id(), category.id());
    }

    #[test]
    fn create_fails_on_other_users_category() {
        let state = get_app_state();
        let other_category = create_category(&state, "Food", &UserId::new("bob"));
        let builder = Transaction::build(
            Decimal::new(1250, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            other_category.id(),
        )
        .unwrap();

        let result = state.transaction_service().create(&test_user(), builder);

        assert_eq!(
            result,
            Err(Error::InvalidCategory(Some(other_category.id())))
        );
    }

    #[test]
    fn update_fails_on_other_users_category() {
        let state = get_app_state();
        let service = state.transaction_service();
        let category = create_category(&state, "Food", &test_user());
        let other_category = create_category(&state, "Food", &UserId::new("bob"));
        let transaction = service
            .create(
                &test_user(),
                Transaction::build(
                    Decimal::new(1250, 2),
                    date(2024, 6, 15),
                    TransactionType::Expense,
                    category.id(),
                )
                .unwrap(),
            )
            .unwrap();

        let result = service.update(
            &test_user(),
            transaction.id(),
            Transaction::build(
                Decimal::new(1250, 2),
                date(2024, 6, 15),
                TransactionType::Expense,
                other_category.id(),
            )
            .unwrap(),
            transaction.version(),
        );

        assert_eq!(
            result,
            Err(Error::InvalidCategory(Some(other_category.id())))
        );
    }

    #[test]
    fn update_deleted_transaction_returns_not_found() {
        let state = get_app_state();
        let service = state.transaction_service();
        let category = create_category(&state, "Food", &test_user());
        let transaction = service
            .create(
                &test_user(),
                Transaction::build(
                    Decimal::new(1250, 2),
                    date(2024, 6, 15),
                    TransactionType::Expense,
                    category.id(),
                )
                .unwrap(),
            )
            .unwrap();
        service.delete(&test_user(), transaction.id()).unwrap();

        let result = service.update(
            &test_user(),
            transaction.id(),
            Transaction::build(
                Decimal::new(2000, 2),
                date(2024, 6, 16),
                TransactionType::Expense,
                category.id(),
            )
            .unwrap(),
            transaction.version(),
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_returns_not_found() {
        let state = get_app_state();

        let result = state.transaction_service().delete(&test_user(), 999);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn list_does_not_return_other_users_transactions() {
        let state = get_app_state();
        let service = state.transaction_service();
        let other_user = UserId::new("bob");
        let category = create_category(&state, "Food", &test_user());
        let other_category = create_category(&state, "Food", &other_user);
        let own = service
            .create(
                &test_user(),
                Transaction::build(
                    Decimal::new(1250, 2),
                    date(2024, 6, 15),
                    TransactionType::Expense,
                    category.id(),
                )
                .unwrap(),
            )
            .unwrap();
        service
            .create(
                &other_user,
                Transaction::build(
                    Decimal::new(9999, 2),
                    date(2024, 6, 15),
                    TransactionType::Expense,
                    other_category.id(),
                )
                .unwrap(),
            )
            .unwrap();

        let transactions = service
            .list(&test_user(), TransactionQuery::default())
            .unwrap();

        assert_eq!(transactions, vec![own]);
    }
}
