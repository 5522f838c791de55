//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Every read and write takes the acting user's ID as a mandatory parameter:
//! the stores are the boundary where per-user data isolation is enforced, so
//! querying or mutating by entity ID alone is not expressible.

mod category;
mod transaction;

pub mod sqlite;

pub use category::CategoryStore;
pub use transaction::{TransactionQuery, TransactionStore};
