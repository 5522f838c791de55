//! Defines the app level error type.

use rust_decimal::Decimal;

use crate::models::DatabaseID;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A string longer than the maximum length was used to create a category
    /// name.
    #[error("category name cannot be longer than 100 characters")]
    CategoryNameTooLong,

    /// The specified category name already exists for the acting user.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// A zero or negative amount was used to create a transaction.
    ///
    /// Amounts are unsigned quantities of money, at least one cent; whether
    /// money came in or went out is recorded by the transaction type.
    #[error("{0} is not a valid transaction amount, amounts must be at least 0.01")]
    NonPositiveAmount(Decimal),

    /// A description longer than the maximum length was used to create a
    /// transaction.
    #[error("transaction description cannot be longer than 500 characters")]
    DescriptionTooLong,

    /// The category ID used to create or edit a transaction did not match a
    /// category owned by the acting user.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<DatabaseID>),

    /// The requested resource was not found.
    ///
    /// This error is also returned for rows owned by another user, so a
    /// caller cannot distinguish "does not exist" from "not yours".
    #[error("the requested resource could not be found")]
    NotFound,

    /// An update targeted a row that was modified after it was read.
    ///
    /// Callers should re-read the row and retry with fresh data. Rows that
    /// were deleted rather than modified surface as [Error::NotFound].
    #[error("the record was changed by another operation, reload and try again")]
    ConcurrentModification,

    /// Tried to delete a category that is still referenced by one or more
    /// transactions. The referencing transactions must be reassigned or
    /// removed first.
    #[error("the category is still in use by existing transactions")]
    CategoryInUse,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
