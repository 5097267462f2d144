pub mod auth;
mod sqlite_user_store;
mod user_manager;
pub mod user_models;
mod user_store;

pub use sqlite_user_store::SqliteUserStore;
pub use user_manager::{UserError, UserManager};
pub use user_models::{NewUser, User, UserInput, UserRole, UserUpdate};
pub use user_store::UserStore;
