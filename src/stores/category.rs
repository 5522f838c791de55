//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, UserId},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Create a new category for `user_id` and add it to the store.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategoryName] if the user already has a
    /// category with this name.
    fn create(&self, name: CategoryName, user_id: &UserId) -> Result<Category, Error>;

    /// Get a category owned by `user_id` by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user.
    fn get(&self, user_id: &UserId, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories owned by `user_id`, ordered by name ascending.
    fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, Error>;

    /// Rename a category owned by `user_id`.
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
    ) -> Result<Category, Error>;

    /// Delete a category owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or belongs to
    /// another user, or [Error::CategoryInUse] if any transaction still
    /// references it.
    fn delete(&self, user_id: &UserId, category_id: DatabaseID) -> Result<(), Error>;

    /// Whether any of the user's transactions reference the category.
    fn has_transactions(
        &self,
        user_id: &UserId,
        category_id: DatabaseID,
    ) -> Result<bool, Error>;
}
