//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, UserId},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategoryName] if the user already has a
    /// category named `name`, or [Error::SqlError] if there is some other
    /// SQL error.
    fn create(&self, name: CategoryName, user_id: &UserId) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        let result = connection.execute(
            "INSERT INTO category (name, user_id) VALUES (?1, ?2);",
            (name.as_ref(), user_id.as_str()),
        );

        match result {
            Ok(_) => {
                let id = connection.last_insert_rowid();

                Ok(Category::new(id, name, user_id.clone()))
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            Err(rusqlite::Error::SqliteFailure(sql_error, Some(_)))
                if sql_error.extended_code == 2067 =>
            {
                Err(Error::DuplicateCategoryName(name.as_ref().to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Retrieve the category with `category_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, or [Error::SqlError] if there is an SQL error.
    fn get(&self, user_id: &UserId, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, user_id FROM category WHERE id = ?1 AND user_id = ?2;")?
            .query_row((category_id, user_id.as_str()), Self::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve the user's categories, ordered by name ascending.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if there is an SQL error.
    fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, user_id FROM category WHERE user_id = ?1 ORDER BY name ASC;")?
            .query_map([user_id.as_str()], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Rename the category with `category_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, or [Error::DuplicateCategoryName] if the user already
    /// has a category with the new name.
    fn rename(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
        name: CategoryName,
    ) -> Result<Category, Error> {
        let result = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1 WHERE id = ?2 AND user_id = ?3",
            (name.as_ref(), category_id, user_id.as_str()),
        );

        match result {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => Ok(Category::new(category_id, name, user_id.clone())),
            Err(rusqlite::Error::SqliteFailure(sql_error, Some(_)))
                if sql_error.extended_code == 2067 =>
            {
                Err(Error::DuplicateCategoryName(name.as_ref().to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Delete the category with `category_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, or [Error::CategoryInUse] if any transaction still
    /// references it: the foreign key is restricted, so the referencing
    /// transactions must be reassigned or removed first.
    fn delete(&self, user_id: &UserId, category_id: DatabaseID) -> Result<(), Error> {
        let result = self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            (category_id, user_id.as_str()),
        );

        match result {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => Ok(()),
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            Err(rusqlite::Error::SqliteFailure(sql_error, Some(_)))
                if sql_error.extended_code == 787 =>
            {
                Err(Error::CategoryInUse)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Whether any of the user's transactions reference the category.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if there is an SQL error.
    fn has_transactions(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
    ) -> Result<bool, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM \"transaction\" WHERE category_id = ?1 AND user_id = ?2)",
                (category_id, user_id.as_str()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                user_id TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_category_user_name ON category(user_id, name);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let user_id = UserId::new(row.get::<_, String>(offset + 2)?);

        Ok(Category::new(id, name, user_id))
    }
}
