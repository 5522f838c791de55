//! Implements a SQLite backed transaction store.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use rusqlite::{
    Connection, Row, params_from_iter,
    types::{Type, Value},
};
use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionType, UserId},
    stores::{TransactionStore, transaction::TransactionQuery},
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction references a
/// [Category](crate::models::Category), the category table must be set up in
/// the database.
///
/// Amounts are persisted as decimal strings and summed in Rust so that
/// monetary arithmetic stays exact.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if the builder's category ID does not refer
    ///   to an existing category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(
        &self,
        user_id: &UserId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        let result = connection
            .prepare(
                "INSERT INTO \"transaction\" (date, amount, description, kind, category_id, user_id, version)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)
                 RETURNING id, date, amount, description, kind, category_id, user_id, version",
            )?
            .query_row(
                (
                    builder.date,
                    builder.amount.to_string(),
                    &builder.description,
                    builder.kind.as_str(),
                    builder.category_id,
                    user_id.as_str(),
                ),
                Self::map_row,
            );

        result.map_err(|error| match error {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            // The caller tried to add a transaction for a non-existent category.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory(Some(builder.category_id))
            }
            error => error.into(),
        })
    }

    /// Retrieve the transaction with `transaction_id` owned by `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the transaction does not exist or belongs to
    ///   another user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, user_id: &UserId, transaction_id: DatabaseID) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, date, amount, description, kind, category_id, user_id, version
                 FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            )?
            .query_row((transaction_id, user_id.as_str()), Self::map_row)
            .map_err(|error| error.into())
    }

    /// Query for the user's transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_query(
        &self,
        user_id: &UserId,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, date, amount, description, kind, category_id, user_id, version FROM \"transaction\""
                .to_string(),
        ];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Text(user_id.as_str().to_string())];

        if let Some(kind) = query.kind {
            where_clause_parts.push(format!("kind = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(kind.as_str().to_string()));
        }

        if let Some(category_id) = query.category_id {
            where_clause_parts.push(format!("category_id = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Integer(category_id));
        }

        if let Some(date_range) = query.date_range {
            where_clause_parts.push(format!(
                "date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        query_string_parts.push("ORDER BY date DESC, id DESC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Replace the fields of an existing transaction with the builder's
    /// values, guarded by the version the caller read.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the transaction does not exist (any more) or
    ///   belongs to another user,
    /// - [Error::ConcurrentModification] if the row's version no longer
    ///   matches `expected_version`,
    /// - [Error::InvalidCategory] if the new category ID does not refer to an
    ///   existing category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &self,
        user_id: &UserId,
        transaction_id: DatabaseID,
        builder: TransactionBuilder,
        expected_version: i64,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        let result = connection
            .prepare(
                "UPDATE \"transaction\"
                 SET date = ?1, amount = ?2, description = ?3, kind = ?4, category_id = ?5, version = version + 1
                 WHERE id = ?6 AND user_id = ?7 AND version = ?8
                 RETURNING id, date, amount, description, kind, category_id, user_id, version",
            )?
            .query_row(
                (
                    builder.date,
                    builder.amount.to_string(),
                    &builder.description,
                    builder.kind.as_str(),
                    builder.category_id,
                    transaction_id,
                    user_id.as_str(),
                    expected_version,
                ),
                Self::map_row,
            );

        match result {
            Ok(transaction) => Ok(transaction),
            // The guarded update matched no row: the transaction is either
            // gone or was modified since the caller read it. Re-check under
            // the same user so a deleted row reports NotFound.
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                let still_exists: bool = connection.query_row(
                    "SELECT EXISTS (SELECT 1 FROM \"transaction\" WHERE id = ?1 AND user_id = ?2)",
                    (transaction_id, user_id.as_str()),
                    |row| row.get(0),
                )?;

                if still_exists {
                    Err(Error::ConcurrentModification)
                } else {
                    Err(Error::NotFound)
                }
            }
            Err(rusqlite::Error::SqliteFailure(sql_error, Some(_)))
                if sql_error.extended_code == 787 =>
            {
                Err(Error::InvalidCategory(Some(builder.category_id)))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Delete the transaction with `transaction_id` owned by `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the transaction does not exist or belongs to
    ///   another user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, user_id: &UserId, transaction_id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (transaction_id, user_id.as_str()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Sum the amounts of the user's transactions of the given type with
    /// dates in `date_range`.
    ///
    /// The amounts are fetched and folded in Rust: SQLite cannot aggregate
    /// decimal strings exactly.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn sum(
        &self,
        user_id: &UserId,
        kind: TransactionType,
        date_range: RangeInclusive<Date>,
    ) -> Result<Decimal, Error> {
        let connection = self.connection.lock().unwrap();

        let mut statement = connection.prepare(
            "SELECT amount FROM \"transaction\"
             WHERE user_id = ?1 AND kind = ?2 AND date BETWEEN ?3 AND ?4",
        )?;
        let amounts = statement.query_map(
            (
                user_id.as_str(),
                kind.as_str(),
                date_range.start(),
                date_range.end(),
            ),
            |row| parse_decimal(row, 0),
        )?;

        let mut total = Decimal::ZERO;

        for amount in amounts {
            total += amount?;
        }

        total.rescale(2);

        Ok(total)
    }

    /// Every expense amount for the user paired with its resolved category
    /// name.
    ///
    /// The category is resolved with a LEFT JOIN scoped to the same user, so
    /// a reference that does not resolve yields `None` instead of dropping
    /// the row.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn expense_totals_by_category(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(Option<String>, Decimal)>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT c.name, t.amount FROM \"transaction\" t
                 LEFT JOIN category c ON c.id = t.category_id AND c.user_id = t.user_id
                 WHERE t.user_id = ?1 AND t.kind = ?2",
            )?
            .query_map(
                (user_id.as_str(), TransactionType::Expense.as_str()),
                |row| {
                    let name: Option<String> = row.get(0)?;
                    let amount = parse_decimal(row, 1)?;

                    Ok((name, amount))
                },
            )?
            .map(|maybe_row| maybe_row.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                amount TEXT NOT NULL,
                description TEXT,
                kind TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
            );

            CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            date: row.get(offset + 1)?,
            amount: parse_decimal(row, offset + 2)?,
            description: row.get(offset + 3)?,
            kind: parse_transaction_type(row, offset + 4)?,
            category_id: row.get(offset + 5)?,
            user_id: UserId::new(row.get::<_, String>(offset + 6)?),
            version: row.get(offset + 7)?,
        })
    }
}

fn parse_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    text.parse().map_err(|error: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

fn parse_transaction_type(row: &Row, index: usize) -> Result<TransactionType, rusqlite::Error> {
    let text: String = row.get(index)?;

    match text.as_str() {
        "Income" => Ok(TransactionType::Income),
        "Expense" => Ok(TransactionType::Expense),
        _ => Err(rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("unrecognized transaction type {text:?}").into(),
        )),
    }
}

#[cfg(test)]
mod transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Date, Month};

    use crate::{
        Error,
        db::initialize,
        models::{Category, CategoryName, Transaction, TransactionType, UserId},
        stores::{CategoryStore, sqlite::SQLiteCategoryStore, transaction::TransactionQuery},
    };

    use super::{SQLiteTransactionStore, TransactionStore};

    fn get_test_stores() -> (SQLiteCategoryStore, SQLiteTransactionStore) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteCategoryStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection),
        )
    }

    fn test_user() -> UserId {
        UserId::new("alice")
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    fn create_category(store: &SQLiteCategoryStore, name: &str, user_id: &UserId) -> Category {
        store
            .create(CategoryName::new_unchecked(name), user_id)
            .unwrap()
    }

    fn create_transaction(
        store: &SQLiteTransactionStore,
        user_id: &UserId,
        amount: Decimal,
        on: Date,
        kind: TransactionType,
        category_id: i64,
    ) -> Transaction {
        let builder = Transaction::build(amount, on, kind, category_id).unwrap();

        store.create(user_id, builder).unwrap()
    }

    #[test]
    fn create_transaction_succeeds() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let builder = Transaction::build(
            Decimal::new(1999, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap()
        .description("groceries")
        .unwrap();

        let transaction = store.create(&test_user(), builder).unwrap();

        assert!(transaction.id() > 0);
        assert_eq!(transaction.amount(), Decimal::new(1999, 2));
        assert_eq!(transaction.date(), date(2024, 6, 15));
        assert_eq!(transaction.description(), Some("groceries"));
        assert_eq!(transaction.kind(), TransactionType::Expense);
        assert_eq!(transaction.category_id(), category.id());
        assert_eq!(transaction.user_id(), &test_user());
        assert_eq!(transaction.version(), 0);
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let (_, store) = get_test_stores();
        let builder = Transaction::build(
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            999,
        )
        .unwrap();

        let transaction = store.create(&test_user(), builder);

        assert_eq!(transaction, Err(Error::InvalidCategory(Some(999))));
    }

    #[test]
    fn amount_round_trips_exactly() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let created = create_transaction(
            &store,
            &test_user(),
            Decimal::new(10, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );

        let fetched = store.get(&test_user(), created.id()).unwrap();

        assert_eq!(fetched.amount(), Decimal::new(10, 2));
    }

    #[test]
    fn get_transaction_of_other_user_returns_not_found() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );

        let result = store.get(&UserId::new("bob"), transaction.id());

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_query_filters_by_kind() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Salary", &test_user());
        let income = create_transaction(
            &store,
            &test_user(),
            Decimal::new(100000, 2),
            date(2024, 6, 1),
            TransactionType::Income,
            category.id(),
        );
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(4000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );

        let transactions = store
            .get_query(
                &test_user(),
                TransactionQuery {
                    kind: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(transactions, vec![income]);
    }

    #[test]
    fn get_query_filters_by_category() {
        let (category_store, store) = get_test_stores();
        let food = create_category(&category_store, "Food", &test_user());
        let bills = create_category(&category_store, "Bills", &test_user());
        let food_transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            food.id(),
        );
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(2000, 2),
            date(2024, 6, 16),
            TransactionType::Expense,
            bills.id(),
        );

        let transactions = store
            .get_query(
                &test_user(),
                TransactionQuery {
                    category_id: Some(food.id()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(transactions, vec![food_transaction]);
    }

    #[test]
    fn get_query_date_range_includes_both_endpoints() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());

        for day in [1, 10, 20, 30] {
            create_transaction(
                &store,
                &test_user(),
                Decimal::new(1000, 2),
                date(2024, 6, day),
                TransactionType::Expense,
                category.id(),
            );
        }

        let transactions = store
            .get_query(
                &test_user(),
                TransactionQuery {
                    date_range: Some(date(2024, 6, 10)..=date(2024, 6, 20)),
                    ..Default::default()
                },
            )
            .unwrap();

        let days: Vec<u8> = transactions
            .iter()
            .map(|transaction| transaction.date().day())
            .collect();
        assert_eq!(days, vec![20, 10]);
    }

    #[test]
    fn get_query_orders_by_date_descending() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());

        for day in [15, 1, 30] {
            create_transaction(
                &store,
                &test_user(),
                Decimal::new(1000, 2),
                date(2024, 6, day),
                TransactionType::Expense,
                category.id(),
            );
        }

        let transactions = store
            .get_query(&test_user(), TransactionQuery::default())
            .unwrap();

        let days: Vec<u8> = transactions
            .iter()
            .map(|transaction| transaction.date().day())
            .collect();
        assert_eq!(days, vec![30, 15, 1]);
    }

    #[test]
    fn get_query_only_returns_own_transactions() {
        let (category_store, store) = get_test_stores();
        let other_user = UserId::new("bob");
        let category = create_category(&category_store, "Food", &test_user());
        let other_category = create_category(&category_store, "Food", &other_user);
        let own = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        create_transaction(
            &store,
            &other_user,
            Decimal::new(2000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            other_category.id(),
        );

        let transactions = store
            .get_query(&test_user(), TransactionQuery::default())
            .unwrap();

        assert_eq!(transactions, vec![own]);
    }

    #[test]
    fn update_transaction_succeeds_and_bumps_version() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        let builder = Transaction::build(
            Decimal::new(2500, 2),
            date(2024, 6, 16),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap();

        let updated = store
            .update(
                &test_user(),
                transaction.id(),
                builder,
                transaction.version(),
            )
            .unwrap();

        assert_eq!(updated.amount(), Decimal::new(2500, 2));
        assert_eq!(updated.date(), date(2024, 6, 16));
        assert_eq!(updated.version(), transaction.version() + 1);
        assert_eq!(store.get(&test_user(), transaction.id()), Ok(updated));
    }

    #[test]
    fn update_with_stale_version_returns_concurrent_modification() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        let builder = Transaction::build(
            Decimal::new(2500, 2),
            date(2024, 6, 16),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap();
        store
            .update(
                &test_user(),
                transaction.id(),
                builder.clone(),
                transaction.version(),
            )
            .unwrap();

        // Replays the version that was already consumed above.
        let result = store.update(
            &test_user(),
            transaction.id(),
            builder,
            transaction.version(),
        );

        assert_eq!(result, Err(Error::ConcurrentModification));
    }

    #[test]
    fn update_deleted_transaction_returns_not_found() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        store.delete(&test_user(), transaction.id()).unwrap();
        let builder = Transaction::build(
            Decimal::new(2500, 2),
            date(2024, 6, 16),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap();

        let result = store.update(
            &test_user(),
            transaction.id(),
            builder,
            transaction.version(),
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_transaction_of_other_user_returns_not_found() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        let builder = Transaction::build(
            Decimal::new(2500, 2),
            date(2024, 6, 16),
            TransactionType::Expense,
            category.id(),
        )
        .unwrap();

        let result = store.update(
            &UserId::new("bob"),
            transaction.id(),
            builder,
            transaction.version(),
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_transaction_succeeds() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );

        store.delete(&test_user(), transaction.id()).unwrap();

        assert_eq!(
            store.get(&test_user(), transaction.id()),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_transaction_returns_not_found() {
        let (_, store) = get_test_stores();

        assert_eq!(store.delete(&test_user(), 999), Err(Error::NotFound));
    }

    #[test]
    fn delete_transaction_of_other_user_returns_not_found() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        let transaction = create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );

        let result = store.delete(&UserId::new("bob"), transaction.id());

        assert_eq!(result, Err(Error::NotFound));
        assert!(store.get(&test_user(), transaction.id()).is_ok());
    }

    #[test]
    fn sum_includes_only_matching_type_and_window() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(10000, 2),
            date(2024, 6, 1),
            TransactionType::Income,
            category.id(),
        );
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(4000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            category.id(),
        );
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(500, 2),
            date(2024, 7, 1),
            TransactionType::Expense,
            category.id(),
        );

        let expense_total = store
            .sum(
                &test_user(),
                TransactionType::Expense,
                date(2024, 6, 1)..=date(2024, 6, 30),
            )
            .unwrap();

        assert_eq!(expense_total, Decimal::new(4000, 2));
    }

    #[test]
    fn sum_returns_zero_for_empty_window() {
        let (_, store) = get_test_stores();

        let total = store
            .sum(
                &test_user(),
                TransactionType::Income,
                date(2024, 6, 1)..=date(2024, 6, 30),
            )
            .unwrap();

        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn sum_is_exact_over_many_small_amounts() {
        let (category_store, store) = get_test_stores();
        let category = create_category(&category_store, "Food", &test_user());

        for day in 1..=10 {
            create_transaction(
                &store,
                &test_user(),
                Decimal::new(10, 2),
                date(2024, 6, day),
                TransactionType::Expense,
                category.id(),
            );
        }

        let total = store
            .sum(
                &test_user(),
                TransactionType::Expense,
                date(2024, 6, 1)..=date(2024, 6, 30),
            )
            .unwrap();

        assert_eq!(total, Decimal::new(100, 2));
    }

    #[test]
    fn expense_totals_by_category_resolves_names() {
        let (category_store, store) = get_test_stores();
        let food = create_category(&category_store, "Food", &test_user());
        let salary = create_category(&category_store, "Salary", &test_user());
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            food.id(),
        );
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(100000, 2),
            date(2024, 6, 1),
            TransactionType::Income,
            salary.id(),
        );

        let rows = store.expense_totals_by_category(&test_user()).unwrap();

        assert_eq!(
            rows,
            vec![(Some("Food".to_string()), Decimal::new(1000, 2))]
        );
    }

    #[test]
    fn expense_totals_does_not_resolve_other_users_category() {
        let (category_store, store) = get_test_stores();
        let other_category = create_category(&category_store, "Food", &UserId::new("bob"));
        // The store does not check category ownership; the services do. A
        // row that slips through must still aggregate, with no name.
        create_transaction(
            &store,
            &test_user(),
            Decimal::new(1000, 2),
            date(2024, 6, 15),
            TransactionType::Expense,
            other_category.id(),
        );

        let rows = store.expense_totals_by_category(&test_user()).unwrap();

        assert_eq!(rows, vec![(None, Decimal::new(1000, 2))]);
    }
}
