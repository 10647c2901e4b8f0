use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::Result;
use crate::session::Session;
use crate::settings::shellexpand_path;
use crate::tracker;

pub fn run(session: &Session, db_path: &Path, output: &str) -> Result<()> {
    let out = PathBuf::from(shellexpand_path(output));
    let count = tracker::export_csv(session, db_path, &out)?;
    println!("{} {count} expenses to {}", "Exported".green(), out.display());
    Ok(())
}
