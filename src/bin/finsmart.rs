//! Terminal front-end for the FinSmart dashboard.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use finsmart_rs::client::FinSmartBlockingClient;
use finsmart_rs::dashboard::{BlockingDashboard, ChartView, DashboardView, RefreshOutcome};
use finsmart_rs::export::EXPORT_FILE_NAME;
use finsmart_rs::filter::TransactionFilter;
use finsmart_rs::forms::{BudgetForm, RawTextForm, SubmitOutcome, TransactionForm};
use finsmart_rs::i18n::messages;
use finsmart_rs::models::{
    Currency, DisplaySettings, EntryKind, Language, NaiveDate, SettingsPatch, Transaction,
    budget_categories,
};
use finsmart_rs::projections::{
    BudgetProgress, BudgetStatus, Insight, InsightKind, ProfileStats, StatCards, format_money,
};
use finsmart_rs::storage::FileSettingsStore;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Environment variable overriding the API base URL.
const API_URL_ENV: &str = "FINSMART_API_URL";

/// Concrete dashboard used by the CLI.
type Dash = BlockingDashboard<FinSmartBlockingClient, FileSettingsStore>;

/// FinSmart CLI: browse and edit your personal finance data.
#[derive(Debug, Parser)]
#[command(name = "finsmart", version, about)]
struct Cli {
    /// API base URL (default: $FINSMART_API_URL or the local backend).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Override the settings directory (default: platform config dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Refresh and show stat cards, recent activity, chart, insights,
    /// budgets and profile.
    Dashboard,
    /// List transactions, optionally filtered.
    Transactions(TransactionArgs),
    /// Add a transaction manually.
    Add(AddArgs),
    /// Let the backend parse and categorize a pasted SMS or e-mail.
    Parse {
        /// Raw transaction text.
        text: String,
    },
    /// Show budget usage.
    Budgets,
    /// Set a monthly budget limit.
    SetBudget {
        /// Expense category.
        #[arg(long)]
        category: String,
        /// Monthly limit.
        #[arg(long)]
        limit: String,
    },
    /// Show profile aggregates.
    Profile,
    /// Show display settings.
    Settings,
    /// Change display settings.
    SetSettings(SettingsArgs),
    /// Erase stored settings and reload.
    ClearCache,
    /// Export all transactions as CSV.
    Export {
        /// Output file (default: finsmart_transactions.csv).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Arguments for the `transactions` subcommand.
#[derive(Debug, Args)]
struct TransactionArgs {
    /// Only `income` or `expense` transactions.
    #[arg(long)]
    kind: Option<EntryKind>,
    /// Start date (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Category name (case-insensitive).
    #[arg(long)]
    category: Option<String>,
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// `expense` or `income`.
    #[arg(long, default_value = "expense")]
    kind: EntryKind,
    /// Amount.
    #[arg(long)]
    amount: String,
    /// Category.
    #[arg(long, default_value = "")]
    category: String,
    /// Description.
    #[arg(long, default_value = "")]
    description: String,
    /// Date (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

/// Arguments for the `set-settings` subcommand.
#[derive(Debug, Args)]
struct SettingsArgs {
    /// Base currency (INR, USD, EUR, GBP).
    #[arg(long)]
    currency: Option<Currency>,
    /// Interface language (en, hi).
    #[arg(long)]
    language: Option<Language>,
    /// Show budget alerts.
    #[arg(long)]
    notifications: Option<bool>,
    /// Dark colour scheme.
    #[arg(long)]
    dark_mode: Option<bool>,
    /// First month of the financial year.
    #[arg(long)]
    financial_year_start: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        Self {
            currency: args.currency,
            language: args.language,
            notifications: args.notifications,
            dark_mode: args.dark_mode,
            financial_year_start: args.financial_year_start,
        }
    }
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Resolves the API base URL: flag, then environment, then the default.
fn resolve_api_url(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(API_URL_ENV).ok().filter(|url| !url.is_empty()))
}

/// Creates the settings store, using `data_dir` if provided or the
/// platform config directory otherwise.
fn create_store(data_dir: Option<PathBuf>) -> finsmart_rs::error::Result<FileSettingsStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileSettingsStore::default_dir()?,
    };
    FileSettingsStore::new(dir)
}

/// Builds the dashboard from CLI options.
fn create_dashboard(cli: &Cli) -> finsmart_rs::error::Result<Dash> {
    let store = create_store(cli.data_dir.clone())?;
    let mut client = FinSmartBlockingClient::builder();
    if let Some(url) = resolve_api_url(cli.api_url.clone()) {
        client = client.base_url(url);
    }
    BlockingDashboard::builder()
        .gateway(client.build()?)
        .settings_store(store)
        .build()
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let dashboard = match create_dashboard(&cli) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to start: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let code = dispatch(&dashboard, cli.command)?;
    print_notifications(&dashboard)?;
    Ok(code)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(dash: &Dash, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Dashboard => cmd_dashboard(dash),
        Command::Transactions(args) => cmd_transactions(dash, &args),
        Command::Add(args) => cmd_add(dash, args),
        Command::Parse { text } => cmd_parse(dash, text),
        Command::Budgets => cmd_budgets(dash),
        Command::SetBudget { category, limit } => cmd_set_budget(dash, category, limit),
        Command::Profile => cmd_profile(dash),
        Command::Settings => cmd_settings(dash),
        Command::SetSettings(args) => cmd_set_settings(dash, args),
        Command::ClearCache => cmd_clear_cache(dash),
        Command::Export { output } => cmd_export(dash, output),
    }
}

/// Refreshes the cache behind a spinner. Returns the view if the refresh
/// committed; failures are reported through notifications.
fn refresh(dash: &Dash) -> Option<DashboardView> {
    let spinner = make_spinner("Loading data from FinSmart...");
    let outcome = dash.refresh_all();
    spinner.finish_and_clear();
    match outcome {
        RefreshOutcome::Rendered(view) => Some(*view),
        RefreshOutcome::Failed(_) | RefreshOutcome::Superseded { .. } => None,
    }
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard(dash: &Dash) -> io::Result<ExitCode> {
    let Some(view) = refresh(dash) else {
        return Ok(ExitCode::FAILURE);
    };
    print_stat_cards(&view.stats, view.currency)?;
    print_transactions_table("Recent Transactions", &view.recent, view.currency, view.language)?;
    print_chart(&view.chart, view.currency, view.language)?;
    print_insights(&view.insights)?;
    print_budgets_table(&view.budgets, view.currency, view.language)?;
    print_profile(&view.profile, view.currency)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `transactions` subcommand.
fn cmd_transactions(dash: &Dash, args: &TransactionArgs) -> io::Result<ExitCode> {
    let Some(view) = refresh(dash) else {
        return Ok(ExitCode::FAILURE);
    };
    let mut filter = TransactionFilter::new();
    if let Some(kind) = args.kind {
        filter = filter.kind(kind.transaction_kind());
    }
    if let Some(from) = args.from {
        filter = filter.date_from(from);
    }
    if let Some(to) = args.to {
        filter = filter.date_to(to);
    }
    if let Some(category) = args.category.as_deref() {
        filter = filter.category(category);
    }
    let txs = dash.filter_transactions(&filter);
    print_transactions_table("Transactions", &txs, view.currency, view.language)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `add` subcommand.
fn cmd_add(dash: &Dash, args: AddArgs) -> io::Result<ExitCode> {
    let today = chrono::Local::now().date_naive();
    let mut form = TransactionForm {
        kind: args.kind,
        amount: args.amount,
        category: args.category,
        description: args.description,
        date: args.date.unwrap_or(today),
    };
    if !form.category.is_empty() && !args.kind.categories().contains(&form.category.as_str()) {
        writeln!(
            io::stderr().lock(),
            "{} {} is not a known {} category",
            "warning:".yellow().bold(),
            form.category.bold(),
            match args.kind {
                EntryKind::Expense => "expense",
                EntryKind::Income => "income",
            }
        )?;
    }
    let spinner = make_spinner("Saving transaction...");
    let outcome = dash.submit_transaction(&mut form);
    spinner.finish_and_clear();
    report_submit(&outcome, "amount is not a number")
}

/// Executes the `parse` subcommand.
fn cmd_parse(dash: &Dash, text: String) -> io::Result<ExitCode> {
    let mut form = RawTextForm::new(text);
    let spinner = make_spinner("Parsing transaction text...");
    let outcome = dash.submit_raw_text(&mut form);
    spinner.finish_and_clear();
    report_submit(&outcome, "nothing to parse")
}

/// Executes the `budgets` subcommand.
fn cmd_budgets(dash: &Dash) -> io::Result<ExitCode> {
    let Some(view) = refresh(dash) else {
        return Ok(ExitCode::FAILURE);
    };
    print_budgets_table(&view.budgets, view.currency, view.language)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `set-budget` subcommand.
fn cmd_set_budget(dash: &Dash, category: String, limit: String) -> io::Result<ExitCode> {
    if !budget_categories().any(|known| known == category) {
        let known: Vec<&str> = budget_categories().collect();
        writeln!(
            io::stderr().lock(),
            "{} budgets can be set for: {}",
            "hint:".cyan(),
            known.join(", ")
        )?;
    }
    let mut form = BudgetForm::new(category, limit);
    let spinner = make_spinner("Saving budget...");
    let outcome = dash.submit_budget(&mut form);
    spinner.finish_and_clear();
    report_submit(&outcome, "category is empty or limit is not a positive number")
}

/// Executes the `profile` subcommand.
fn cmd_profile(dash: &Dash) -> io::Result<ExitCode> {
    let Some(view) = refresh(dash) else {
        return Ok(ExitCode::FAILURE);
    };
    print_profile(&view.profile, view.currency)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `settings` subcommand.
fn cmd_settings(dash: &Dash) -> io::Result<ExitCode> {
    print_settings(&dash.settings_form())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `set-settings` subcommand.
fn cmd_set_settings(dash: &Dash, args: SettingsArgs) -> io::Result<ExitCode> {
    let patch = SettingsPatch::from(args);
    if patch.is_empty() {
        writeln!(
            io::stderr().lock(),
            "{} set-settings requires at least one option",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }
    match dash.save_settings(patch) {
        Ok(_outcome) => {
            print_settings(&dash.settings())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to save settings: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `clear-cache` subcommand.
fn cmd_clear_cache(dash: &Dash) -> io::Result<ExitCode> {
    match dash.clear_cache() {
        Ok(_outcome) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to clear cache: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `export` subcommand.
fn cmd_export(dash: &Dash, output: Option<PathBuf>) -> io::Result<ExitCode> {
    if refresh(dash).is_none() {
        return Ok(ExitCode::FAILURE);
    }
    let csv = match dash.export_csv() {
        Ok(Some(csv)) => csv,
        Ok(None) => return Ok(ExitCode::SUCCESS),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} export failed: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let path = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    fs::write(&path, csv)?;
    writeln!(
        io::stdout().lock(),
        "{} {}",
        "Wrote".green().bold(),
        path.display()
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Maps a submit outcome to an exit code, explaining skipped input.
fn report_submit<T>(outcome: &SubmitOutcome<T>, skipped_reason: &str) -> io::Result<ExitCode> {
    match *outcome {
        SubmitOutcome::Accepted(_) => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Skipped => {
            writeln!(
                io::stderr().lock(),
                "{} nothing sent: {skipped_reason}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Declined => {
            writeln!(
                io::stderr().lock(),
                "{} the server did not confirm the change",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::InFlight => Ok(ExitCode::FAILURE),
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints every notification issued during the command.
fn print_notifications(dash: &Dash) -> io::Result<()> {
    for note in dash.notifications().drain() {
        if note.is_error {
            writeln!(io::stderr().lock(), "{} {}", "!".red().bold(), note.message.red())?;
        } else {
            writeln!(io::stdout().lock(), "{} {}", "\u{2022}".cyan(), note.message.dimmed())?;
        }
    }
    Ok(())
}

/// Prints the four stat cards.
fn print_stat_cards(stats: &StatCards, currency: Currency) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Net Balance").fg(Color::Cyan),
        Cell::new("Total Income").fg(Color::Cyan),
        Cell::new("Total Expense").fg(Color::Cyan),
        Cell::new("Savings Rate").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![
        Cell::new(format_money(stats.net_balance, currency)),
        Cell::new(format_money(stats.total_income, currency)).fg(Color::Green),
        Cell::new(format_money(stats.total_expense, currency)).fg(Color::Red),
        Cell::new(format!("{:.1}%", stats.savings_rate)),
    ]);
    writeln!(out, "{}", "Overview".green().bold())?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints transactions in a table.
fn print_transactions_table(
    title: &str,
    txs: &[Transaction],
    currency: Currency,
    language: Language,
) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", messages(language).no_transactions.dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
    ]);

    for tx in txs {
        let amount_cell = if tx.is_expense() {
            Cell::new(format!("-{}", format_money(tx.amount, currency))).fg(Color::Red)
        } else {
            Cell::new(format!("+{}", format_money(tx.amount, currency))).fg(Color::Green)
        };
        _ = table.add_row(vec![
            Cell::new(tx.id),
            Cell::new(tx.date),
            Cell::new(tx.display_text()),
            Cell::new(tx.category_or_default()),
            amount_cell,
        ]);
    }

    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format!("({})", txs.len()).dimmed()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints the expense distribution as a table of shares.
#[allow(clippy::ref_patterns, reason = "borrowing totals out of the chart state")]
fn print_chart(chart: &ChartView, currency: Currency, language: Language) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", messages(language).expense_distribution.green().bold())?;
    let totals = match *chart {
        ChartView::Ready(ref totals) => totals,
        ChartView::Empty => {
            writeln!(out, "{}", "No expenses recorded yet.".dimmed())?;
            return Ok(());
        }
        ChartView::Unavailable => {
            writeln!(out, "{}", "Chart data unavailable.".yellow())?;
            return Ok(());
        }
    };
    let total: f64 = totals.amounts.iter().sum();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for (label, amount) in totals.labels.iter().zip(&totals.amounts) {
        let share = if total > 0.0_f64 { amount / total * 100.0_f64 } else { 0.0_f64 };
        _ = table.add_row(vec![
            Cell::new(label),
            Cell::new(format_money(*amount, currency)),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints insight cards.
fn print_insights(insights: &[Insight]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for insight in insights {
        let title = match insight.kind {
            InsightKind::Warning => insight.title.yellow().bold().to_string(),
            InsightKind::Success => insight.title.green().bold().to_string(),
            InsightKind::Info => insight.title.cyan().bold().to_string(),
        };
        writeln!(out, "{title}: {}", insight.message)?;
    }
    Ok(())
}

/// Prints budget rows with usage.
fn print_budgets_table(
    rows: &[BudgetProgress],
    currency: Currency,
    language: Language,
) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if rows.is_empty() {
        writeln!(out, "{}", messages(language).no_budgets.dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Spent").fg(Color::Cyan),
        Cell::new("Limit").fg(Color::Cyan),
        Cell::new("Used").fg(Color::Cyan),
    ]);
    for row in rows {
        let color = match row.status {
            BudgetStatus::Danger => Color::Red,
            BudgetStatus::Warning => Color::Yellow,
            BudgetStatus::Success => Color::Green,
        };
        _ = table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(format_money(row.spent, currency)),
            Cell::new(format_money(row.limit, currency)),
            Cell::new(format!("{:.0}%", row.percentage)).fg(color),
        ]);
    }
    writeln!(
        out,
        "{} {}",
        "Budgets".green().bold(),
        format!("({})", rows.len()).dimmed()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints profile aggregates.
fn print_profile(profile: &ProfileStats, currency: Currency) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Profile".green().bold())?;
    writeln!(out, "  {} {}", "Transactions:".bold(), profile.total_count)?;
    writeln!(
        out,
        "  {} {}",
        "Highest expense:".bold(),
        format_money(profile.highest_expense, currency)
    )?;
    writeln!(
        out,
        "  {} {}",
        "Average monthly spend:".bold(),
        format_money(profile.average_monthly_spend, currency)
    )?;
    Ok(())
}

/// Prints display settings.
fn print_settings(settings: &DisplaySettings) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Settings".green().bold())?;
    writeln!(
        out,
        "  {} {} ({})",
        "Currency:".bold(),
        settings.currency.code(),
        settings.currency.symbol()
    )?;
    writeln!(out, "  {} {}", "Language:".bold(), settings.language.code())?;
    writeln!(out, "  {} {}", "Notifications:".bold(), settings.notifications)?;
    writeln!(out, "  {} {}", "Dark mode:".bold(), settings.dark_mode)?;
    writeln!(
        out,
        "  {} {}",
        "Financial year start:".bold(),
        settings.financial_year_start
    )?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    run().unwrap_or(ExitCode::FAILURE)
}
