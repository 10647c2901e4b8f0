mod browser;
mod chart;
mod cli;
mod db;
mod error;
mod export;
mod expenses;
mod fmt;
mod logging;
mod models;
mod password;
mod reports;
mod session;
mod settings;
mod tracker;
mod tui;
mod users;

use clap::Parser;

use cli::{auth::authenticate, Cli, Commands};
use error::Result;
use settings::{read_settings, resolve_data_dir, warn_unreadable};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let (settings, settings_problem) = read_settings();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &settings);
    let db_path = db::db_path(&data_dir);
    let user = cli.user.as_deref();

    match cli.command {
        None => logging::init_file(&settings.log_level, &data_dir),
        Some(_) => logging::init_stderr(&settings.log_level),
    }
    if let Some(e) = settings_problem {
        warn_unreadable(&e);
    }

    let Some(command) = cli.command else {
        return cli::app::run(&data_dir);
    };

    match command {
        Commands::Init { path } => cli::init::run(path.or(cli.data_dir)),
        Commands::Status => cli::status::run(&data_dir),
        Commands::Register { username } => {
            db::ensure_schema(&db_path)?;
            cli::register::run(&db_path, &username)
        }
        Commands::Add {
            date,
            category,
            description,
            amount,
        } => {
            db::ensure_schema(&db_path)?;
            let session = authenticate(&db_path, user)?;
            cli::add::run(&session, &db_path, date, category, description, amount)
        }
        Commands::List => {
            db::ensure_schema(&db_path)?;
            let session = authenticate(&db_path, user)?;
            cli::list::run(&session, &db_path)
        }
        Commands::Plot => {
            db::ensure_schema(&db_path)?;
            let session = authenticate(&db_path, user)?;
            cli::plot::run(&session, &db_path)
        }
        Commands::Export { output } => {
            db::ensure_schema(&db_path)?;
            let session = authenticate(&db_path, user)?;
            cli::export::run(&session, &db_path, &output)
        }
    }
}
