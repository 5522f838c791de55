//! The service layer: validation and business rules on top of the
//! [stores](crate::stores). This is the interface the presentation layer is
//! expected to call.

mod category;
mod seed;
mod transaction;

pub use category::{CategoryDeletion, CategoryService};
pub use seed::{
    DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, seed_default_categories,
};
pub use transaction::TransactionService;
