use super::auth;
use super::user_models::{NewUser, User, UserInput, UserRole, UserUpdate, MIN_PASSWORD_LENGTH};
use super::user_store::UserStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),

    #[error("Username or email already exists")]
    AlreadyExists,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn parse_role(role: &str) -> Result<UserRole, UserError> {
    role.parse::<UserRole>()
        .map_err(|_| UserError::Validation(format!("Unknown role {}", role)))
}

/// Validates user writes, hashes passwords and enforces username/email
/// uniqueness on top of a `UserStore`.
#[derive(Clone)]
pub struct UserManager {
    user_store: Arc<dyn UserStore>,
}

impl UserManager {
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        Self { user_store }
    }

    pub fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.user_store.list_users()?)
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>, UserError> {
        Ok(self.user_store.get_user(id)?)
    }

    pub fn create_user(&self, input: &UserInput) -> Result<User, UserError> {
        let (Some(username), Some(email), Some(password)) =
            (input.username(), input.email(), input.password())
        else {
            return Err(UserError::Validation("Missing required fields".to_string()));
        };
        validate_password(password)?;
        let role = input.role().map(parse_role).transpose()?.unwrap_or_default();

        if self
            .user_store
            .find_user_by_username_or_email(username, email)?
            .is_some()
        {
            return Err(UserError::AlreadyExists);
        }

        let new_user = NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: auth::hash_password(password)?,
            role,
            first_name: input.first_name().map(str::to_owned),
            last_name: input.last_name().map(str::to_owned),
        };
        match self.user_store.create_user(new_user) {
            Ok(user) => {
                info!("Created user {} with id {}", user.username, user.id);
                Ok(user)
            }
            // Lost a race with a concurrent create of the same username or email.
            Err(err) if is_constraint_violation(&err) => {
                warn!("Create user {} hit a uniqueness constraint", username);
                Err(UserError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns Ok(None) if the user does not exist.
    pub fn update_user(&self, id: i64, input: &UserInput) -> Result<Option<User>, UserError> {
        if !input.has_update_fields() {
            return Err(UserError::Validation(
                "No fields provided for update".to_string(),
            ));
        }
        if let Some(password) = input.password() {
            validate_password(password)?;
        }

        let update = UserUpdate {
            password_hash: input.password().map(auth::hash_password).transpose()?,
            role: input.role().map(parse_role).transpose()?,
            first_name: input.first_name().map(str::to_owned),
            last_name: input.last_name().map(str::to_owned),
        };
        Ok(self.user_store.update_user(id, &update)?)
    }

    /// Returns false if the user did not exist.
    pub fn delete_user(&self, id: i64) -> Result<bool, UserError> {
        let deleted = self.user_store.delete_user(id)?;
        if deleted {
            info!("Deleted user {}", id);
        }
        Ok(deleted)
    }
}
