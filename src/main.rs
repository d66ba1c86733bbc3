//! Command line interface for the spendwatch analytics engine.

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use serde::Serialize;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use spendwatch::{
    Error,
    models::{Transaction, UserID},
    stores::sqlite::create_tracker,
};

/// Personal-finance analytics over an append-only expense ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "spendwatch.db")]
    db_path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new user profile.
    Register {
        /// The user's display name.
        #[arg(long)]
        name: String,
        /// Where budget alerts are delivered.
        #[arg(long)]
        email: String,
    },
    /// Log an expense, updating the streak and running the alert check.
    AddExpense {
        /// The ID of the user logging the expense.
        #[arg(long)]
        user: i64,
        /// The amount spent.
        #[arg(long)]
        amount: f64,
        /// The category label.
        #[arg(long, default_value = "Uncategorized")]
        category: String,
        /// The expense date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,
    },
    /// Set or replace the user's monthly budget.
    SetBudget {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
        /// The monthly budget ceiling.
        #[arg(long)]
        amount: f64,
    },
    /// Show the user's current logging streak.
    Streak {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
    },
    /// Show the user's spend measured against their budget.
    Status {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
    },
    /// Show weekly and monthly totals plus the streak.
    Summary {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
        /// The reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,
    },
    /// Show all-time spend per category.
    Categories {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
    },
    /// List the user's expenses, newest first.
    History {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
    },
    /// Fit a linear trend over the user's spending history.
    Trend {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
    },
    /// Project this month's total spend from the daily average so far.
    PredictMonth {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
        /// The reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,
    },
    /// Project month-end totals per spending category.
    PredictCategories {
        /// The ID of the user.
        #[arg(long)]
        user: i64,
        /// The reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,
    },
}

fn main() -> Result<(), Error> {
    setup_logging();

    let args = Args::parse();

    let connection = Connection::open(&args.db_path)
        .unwrap_or_else(|error| panic!("Could not open database {}: {error}", args.db_path));
    let mut tracker = create_tracker(connection)?;

    match args.command {
        Command::Register { name, email } => {
            let user = tracker.register_user(&name, &email)?;
            print_json(&user);
        }
        Command::AddExpense {
            user,
            amount,
            category,
            date,
        } => {
            let builder = Transaction::build(UserID::new(user), amount, date.unwrap_or_else(today))
                .category(&category);
            let recorded = tracker.record_expense(builder)?;
            print_json(&recorded);
        }
        Command::SetBudget { user, amount } => {
            let budget = tracker.set_budget(UserID::new(user), amount)?;
            print_json(&budget);
        }
        Command::Streak { user } => {
            let streak = tracker.current_streak(UserID::new(user))?;
            println!("{streak}");
        }
        Command::Status { user } => {
            let status = tracker.budget_status(UserID::new(user))?;
            print_json(&status);
        }
        Command::Summary { user, date } => {
            let summary = tracker.summary(UserID::new(user), date.unwrap_or_else(today))?;
            print_json(&summary);
        }
        Command::Categories { user } => {
            let totals = tracker.category_summary(UserID::new(user))?;
            print_json(&totals);
        }
        Command::History { user } => {
            let history = tracker.expense_history(UserID::new(user))?;
            print_json(&history);
        }
        Command::Trend { user } => {
            let trend = tracker.spending_trend(UserID::new(user))?;
            print_json(&trend);
        }
        Command::PredictMonth { user, date } => {
            let projection =
                tracker.month_projection(UserID::new(user), date.unwrap_or_else(today))?;
            print_json(&projection);
        }
        Command::PredictCategories { user, date } => {
            let forecast =
                tracker.category_projections(UserID::new(user), date.unwrap_or_else(today))?;
            print_json(&forecast);
        }
    }

    Ok(())
}

/// Today's date in the local timezone, falling back to UTC when the local
/// offset cannot be determined.
fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn parse_date_arg(raw: &str) -> Result<Date, String> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("expected a YYYY-MM-DD date, got {raw:?}: {error}"))
}

fn print_json<V: Serialize>(value: &V) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("report types always serialize")
    );
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().pretty().with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            ),
        )
        .init();
}
