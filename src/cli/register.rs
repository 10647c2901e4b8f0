use std::path::Path;

use colored::Colorize;
use zeroize::Zeroize;

use super::auth::read_new_password;
use crate::error::Result;
use crate::users;

pub fn run(db_path: &Path, username: &str) -> Result<()> {
    let mut password = read_new_password()?;
    let result = users::register(db_path, username, &password);
    password.zeroize();
    let user = result?;
    println!("{} {}", "User registered successfully:".green(), user.username);
    Ok(())
}
