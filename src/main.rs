use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use obra::core::analytics::ExpenseFilter;
use obra::core::log::init_logging;
use obra::core::model::Category;
use obra::core::parser::numeric::parse_date;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Key of the project to show
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Project password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Fetch the sheets again instead of using a cached copy
    #[arg(short, long, global = true)]
    refresh: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ExpenseArgs {
    /// Only expenses in this category (e.g. "hard", "soft", "terreno")
    #[arg(long)]
    category: Option<String>,

    /// Only expenses with this subcategory
    #[arg(long)]
    subcategory: Option<String>,

    /// Earliest expense date
    #[arg(long, value_parser = parse_date_arg)]
    from: Option<NaiveDate>,

    /// Latest expense date
    #[arg(long, value_parser = parse_date_arg)]
    to: Option<NaiveDate>,

    /// Text to look for in description, category and subcategory
    #[arg(short, long)]
    search: Option<String>,

    /// Maximum number of rows to show
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display project summary
    Summary,
    /// Display budget against actual spend
    Budget,
    /// Display project and capital indicators
    Indicators,
    /// Display house inventory
    Houses,
    /// Display projected sales
    Sales,
    /// Display the expense ledger
    Expenses(ExpenseArgs),
    /// Print the loaded project as JSON
    Export,
}

impl From<Commands> for obra::AppCommand {
    fn from(cmd: Commands) -> obra::AppCommand {
        match cmd {
            Commands::Summary => obra::AppCommand::Summary,
            Commands::Budget => obra::AppCommand::Budget,
            Commands::Indicators => obra::AppCommand::Indicators,
            Commands::Houses => obra::AppCommand::Houses,
            Commands::Sales => obra::AppCommand::Sales,
            Commands::Expenses(args) => obra::AppCommand::Expenses {
                filter: ExpenseFilter {
                    category: args.category.as_deref().map(Category::from),
                    subcategory: args.subcategory,
                    from: args.from,
                    to: args.to,
                    search: args.search,
                },
                limit: args.limit,
            },
            Commands::Export => obra::AppCommand::Export,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("unrecognized date: {value}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = obra::RunOptions {
        config_path: cli.config_path,
        project: cli.project,
        password: cli.password,
        refresh: cli.refresh,
    };

    let result = match cli.command {
        Some(Commands::Setup) => match options.config_path.as_deref() {
            Some(path) => obra::cli::setup::setup_at_path(path),
            None => obra::cli::setup::setup(),
        },
        Some(cmd) => obra::run_command(cmd.into(), &options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
