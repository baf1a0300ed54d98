use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use dues_cli::cli::{
    handle_audit_command, handle_due_command, handle_export_command, handle_member_command,
    handle_payment_command, handle_report_command,
};
use dues_cli::config::{paths::DuesPaths, settings::Settings};
use dues_cli::logging::init_cli_logger;
use dues_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "dues",
    version,
    about = "Track membership dues from the command line",
    long_about = "dues keeps a roster of members, records their dues payments, \
                  works out who is due soon or overdue, and reports expected \
                  versus collected income."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Member management commands
    #[command(subcommand)]
    Member(dues_cli::cli::MemberCommands),

    /// Payment management commands
    #[command(subcommand, alias = "pay")]
    Payment(dues_cli::cli::PaymentCommands),

    /// Due status and reminders
    #[command(subcommand)]
    Due(dues_cli::cli::DueCommands),

    /// Reports
    #[command(subcommand)]
    Report(dues_cli::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(dues_cli::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Days before a due date at which members count as due soon
    #[arg(long)]
    reminder_window: Option<u32>,
    /// Currency symbol for displayed amounts
    #[arg(long)]
    currency: Option<String>,
    /// strftime format for displayed dates
    #[arg(long)]
    date_format: Option<String>,
    /// Reminder message template
    #[arg(long)]
    template: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    // Initialize paths and settings
    let paths = DuesPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    tracing::debug!(base_dir = %paths.base_dir().display(), "storage loaded");

    match cli.command {
        Some(Commands::Member(cmd)) => handle_member_command(&storage, &settings, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::Due(cmd)) => handle_due_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing dues-cli at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'dues member add <NAME> --amount <AMOUNT>' to add your first member.");
        }
        Some(Commands::Config(args)) => {
            let changed = args.reminder_window.is_some()
                || args.currency.is_some()
                || args.date_format.is_some()
                || args.template.is_some();

            if let Some(days) = args.reminder_window {
                settings.reminder_window_days = days;
            }
            if let Some(currency) = args.currency {
                settings.currency_symbol = currency;
            }
            if let Some(format) = args.date_format {
                settings.date_format = format;
            }
            if let Some(template) = args.template {
                settings.reminder_template = template;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("dues-cli Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", if storage.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Reminder window:   {} days", settings.reminder_window_days);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Reminder template: {}", settings.reminder_template);
        }
        None => {
            println!("dues - membership dues tracker");
            println!();
            println!("Run 'dues --help' for usage information.");
        }
    }

    Ok(())
}
