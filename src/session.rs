use std::path::Path;

use crate::db::get_connection;
use crate::error::{ExpenseError, Result};
use crate::models::User;
use crate::users::find_user;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticated(User),
}

/// Authentication context handed to every gated operation.
///
/// A session starts anonymous and moves to authenticated on the first
/// successful login. There is no way back.
#[derive(Debug, Clone)]
pub struct Session {
    state: AuthState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: AuthState::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Anonymous => None,
        }
    }

    /// Fails with `AuthRequired` unless the session is authenticated.
    pub fn require(&self) -> Result<&User> {
        self.user().ok_or(ExpenseError::AuthRequired)
    }

    /// Validate credentials against the store. On failure the state is unchanged.
    pub fn login(&mut self, db_path: &Path, username: &str, password: &str) -> Result<&User> {
        let conn = get_connection(db_path)?;
        match find_user(&conn, username, password)? {
            Some(user) => {
                tracing::info!(username = %user.username, id = user.id, "login succeeded");
                self.state = AuthState::Authenticated(user);
                self.require()
            }
            None => {
                tracing::warn!(%username, "login failed");
                Err(ExpenseError::InvalidCredentials)
            }
        }
    }
}
