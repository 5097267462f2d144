use super::user_models::{NewUser, User, UserUpdate};
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Returns every user ordered by id.
    fn list_users(&self) -> Result<Vec<User>>;

    /// Returns Ok(None) if the user does not exist.
    fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Returns a user whose username or email equals the given ones, if any.
    fn find_user_by_username_or_email(&self, username: &str, email: &str)
        -> Result<Option<User>>;

    fn create_user(&self, user: NewUser) -> Result<User>;

    /// Returns Ok(None) if the user does not exist.
    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>>;

    /// Returns false if the user did not exist.
    fn delete_user(&self, id: i64) -> Result<bool>;
}
