use std::path::Path;

use zeroize::Zeroize;

use crate::error::{ExpenseError, Result};
use crate::session::Session;

pub const PASSWORD_ENV: &str = "EXPENSETRACK_PASSWORD";

/// Password from the environment, or a hidden prompt.
pub fn read_password(prompt: &str) -> Result<String> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(pw);
    }
    rpassword::prompt_password(prompt)
        .map_err(|e| ExpenseError::Other(format!("Failed to read password: {e}")))
}

/// Prompt twice and require both entries to match.
pub fn read_new_password() -> Result<String> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(pw);
    }
    let mut first = read_password("Password: ")?;
    let mut second = read_password("Confirm password: ")?;
    let matched = first == second;
    second.zeroize();
    if !matched {
        first.zeroize();
        return Err(ExpenseError::InvalidInput("Passwords do not match".into()));
    }
    Ok(first)
}

/// Build the session for a one-shot command. Without a username the
/// session stays anonymous and gated commands refuse to run.
pub fn authenticate(db_path: &Path, user: Option<&str>) -> Result<Session> {
    let mut session = Session::new();
    let Some(username) = user else {
        return Ok(session);
    };
    let mut password = read_password(&format!("Password for {username}: "))?;
    let result = session.login(db_path, username, &password).map(|_| ());
    password.zeroize();
    result?;
    Ok(session)
}
