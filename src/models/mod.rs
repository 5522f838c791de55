//! This module defines the domain data types.

mod category;
mod transaction;
mod user;

pub use category::{Category, CategoryName, MAX_CATEGORY_NAME_LENGTH};
pub use transaction::{
    MAX_DESCRIPTION_LENGTH, Transaction, TransactionBuilder, TransactionType,
};
pub use user::UserId;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
