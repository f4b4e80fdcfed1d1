mod cmd;
mod output;
mod root;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::{
    account::AccountSubcommand, config::ConfigSubcommand, contact::ContactSubcommand,
    opportunity::OpportunitySubcommand, outreach::OutreachSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cadence",
    about = "Business-day outreach cadence tracker: accounts, contacts, and today's to-do list",
    version,
    propagate_version = true
)]
struct Cli {
    /// CRM root (default: auto-detect from .cadence/ or .git/)
    #[arg(long, global = true, env = "CADENCE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Treat this date (YYYY-MM-DD) as today instead of reading the clock
    #[arg(
        long,
        global = true,
        env = "CADENCE_TODAY",
        value_name = "DATE",
        value_parser = cmd::parse_date
    )]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a CRM store in the current directory
    Init {
        /// Sender name used in outreach prompts
        #[arg(long)]
        owner: Option<String>,
    },

    /// Manage accounts
    Account {
        #[command(subcommand)]
        subcommand: AccountSubcommand,
    },

    /// Manage opportunities
    Opportunity {
        #[command(subcommand)]
        subcommand: OpportunitySubcommand,
    },

    /// Manage contacts
    Contact {
        #[command(subcommand)]
        subcommand: ContactSubcommand,
    },

    /// Log, list, and delete outreach events
    Outreach {
        #[command(subcommand)]
        subcommand: OutreachSubcommand,
    },

    /// Show the to-do list: contacts due today and on the next business day
    Today,

    /// Show the due status of a single contact
    Due { contact: String },

    /// Show dashboard metrics
    Dashboard {
        /// Business days in the activity series (default: config value)
        #[arg(long)]
        window: Option<u32>,
    },

    /// Render an LLM prompt for an outreach email to a contact
    Prompt {
        contact: String,
        /// Tone of the email (default: config value)
        #[arg(long)]
        tone: Option<String>,
        /// Goal of the email (default: config value)
        #[arg(long)]
        goal: Option<String>,
    },

    /// Inspect and modify configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(root = %root.display(), %today, "resolved context");

    let result = match cli.command {
        Commands::Init { owner } => cmd::init::run(&root, owner.as_deref()),
        Commands::Account { subcommand } => cmd::account::run(&root, subcommand, cli.json),
        Commands::Opportunity { subcommand } => {
            cmd::opportunity::run(&root, subcommand, cli.json)
        }
        Commands::Contact { subcommand } => cmd::contact::run(&root, subcommand, today, cli.json),
        Commands::Outreach { subcommand } => {
            cmd::outreach::run(&root, subcommand, today, cli.json)
        }
        Commands::Today => cmd::today::run(&root, today, cli.json),
        Commands::Due { contact } => cmd::today::due(&root, &contact, today, cli.json),
        Commands::Dashboard { window } => cmd::dashboard::run(&root, window, today, cli.json),
        Commands::Prompt {
            contact,
            tone,
            goal,
        } => cmd::prompt::run(
            &root,
            &contact,
            tone.as_deref(),
            goal.as_deref(),
            today,
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
