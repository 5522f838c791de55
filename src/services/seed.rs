//! Idempotent provisioning of the default categories for a newly onboarded
//! user.

use std::collections::HashSet;

use crate::{
    Error,
    models::{CategoryName, UserId},
    stores::CategoryStore,
};

/// The categories every user starts with for income.
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investment", "Other Income"];

/// The categories every user starts with for expenses.
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Travel",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other Expense",
];

/// Create the default categories for `user_id`, skipping any name (exact,
/// case-sensitive match) the user already has.
///
/// Safe to call on every login: calling it again creates nothing and returns
/// zero. Returns the number of categories created.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn seed_default_categories<C>(store: &C, user_id: &UserId) -> Result<u32, Error>
where
    C: CategoryStore,
{
    let existing: HashSet<String> = store
        .get_by_user(user_id)?
        .into_iter()
        .map(|category| category.name().as_ref().to_string())
        .collect();

    let mut created = 0;

    for name in DEFAULT_INCOME_CATEGORIES
        .iter()
        .chain(DEFAULT_EXPENSE_CATEGORIES)
    {
        if existing.contains(*name) {
            continue;
        }

        match store.create(CategoryName::new_unchecked(name), user_id) {
            Ok(_) => created += 1,
            // A concurrent call (e.g. two logins racing) created the category
            // between the read above and this insert.
            Err(Error::DuplicateCategoryName(_)) => {}
            Err(error) => return Err(error),
        }
    }

    if created > 0 {
        tracing::info!("created {created} default categories for user {user_id}");
    }

    Ok(created)
}
