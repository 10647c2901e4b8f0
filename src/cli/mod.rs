pub mod add;
pub mod app;
pub mod auth;
pub mod chart_view;
pub mod expense_form;
pub mod export;
pub mod init;
pub mod list;
pub mod login;
pub mod plot;
pub mod register;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "expensetrack",
    version,
    about = "Track expenses by category. Run without a command for the interactive app."
)]
pub struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long = "data-dir", global = true, env = "EXPENSETRACK_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Account to authenticate as (password from EXPENSETRACK_PASSWORD or a prompt)
    #[arg(long, short = 'u', global = true, env = "EXPENSETRACK_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory, save it to settings and create the database.
    Init {
        /// Path for expense data (default: ~/Documents/expensetrack)
        path: Option<String>,
    },
    /// Register a new account.
    Register {
        /// Username to register
        username: String,
    },
    /// Record an expense.
    Add {
        /// Date of the expense: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Category, e.g. Food, Transport, Shopping, Medicine, Other
        #[arg(long, short = 'c', default_value = "")]
        category: String,
        /// Free-text description
        #[arg(long, short = 'd', default_value = "")]
        description: String,
        /// Amount spent
        #[arg(long, short = 'a', allow_hyphen_values = true)]
        amount: String,
    },
    /// Show all expenses.
    List,
    /// Show the share of spending per category.
    Plot,
    /// Export all expenses to CSV.
    Export {
        /// Output file
        #[arg(long, short = 'o')]
        output: String,
    },
    /// Show the current database and summary statistics.
    Status,
}
