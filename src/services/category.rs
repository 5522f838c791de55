//! Business rules for creating, renaming and deleting categories.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, UserId},
    stores::CategoryStore,
};

/// A category paired with whether any transaction still references it.
///
/// Returned by [CategoryService::deletion_status] so the presentation layer
/// can warn the user before it confirms a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDeletion {
    /// The category the user asked to delete.
    pub category: Category,
    /// Whether any of the user's transactions reference the category. If
    /// true, the delete will fail until the transactions are reassigned or
    /// removed.
    pub has_transactions: bool,
}

/// Creates, renames and deletes categories on behalf of a user.
#[derive(Debug, Clone)]
pub struct CategoryService<C> {
    store: C,
}

impl<C> CategoryService<C>
where
    C: CategoryStore,
{
    /// Create a new category service using `store`.
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// Create a category named `name` for `user_id`.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] or [Error::CategoryNameTooLong] if
    /// the name is invalid, or [Error::DuplicateCategoryName] if the user
    /// already has a category with this name.
    pub fn create(&self, user_id: &UserId, name: &str) -> Result<Category, Error> {
        let name = CategoryName::new(name)?;

        self.store.create(name, user_id)
    }

    /// Get the category with `category_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user.
    pub fn get(&self, user_id: &UserId, category_id: DatabaseID) -> Result<Category, Error> {
        self.store.get(user_id, category_id)
    }

    /// All of the user's categories, ordered by name ascending.
    pub fn list(&self, user_id: &UserId) -> Result<Vec<Category>, Error> {
        self.store.get_by_user(user_id)
    }

    /// Rename the category with `category_id` to `new_name`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, the name validation errors of [CategoryService::create],
    /// or [Error::DuplicateCategoryName] if the new name is taken.
    pub fn rename(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
        new_name: &str,
    ) -> Result<Category, Error> {
        let name = CategoryName::new(new_name)?;

        self.store.rename(user_id, category_id, name)
    }

    /// The category with `category_id` along with whether deleting it would
    /// be blocked by referencing transactions.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user.
    pub fn deletion_status(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
    ) -> Result<CategoryDeletion, Error> {
        let category = self.store.get(user_id, category_id)?;
        let has_transactions = self.store.has_transactions(user_id, category_id)?;

        Ok(CategoryDeletion {
            category,
            has_transactions,
        })
    }

    /// Delete the category with `category_id` owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, or [Error::CategoryInUse] if any transaction still
    /// references it.
    pub fn delete(&self, user_id: &UserId, category_id: DatabaseID) -> Result<(), Error> {
        self.store.delete(user_id, category_id)
    }
}
