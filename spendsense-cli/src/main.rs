use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spendsense_budget::{
    LimitMap, compare, confidence_score, distribute_unassigned, month_progress,
    predict_next_month, predict_remaining_month, rebalance, saving_tips_for,
};
use spendsense_core::{Category, refine_all};
use spendsense_ingest::{parse_csv_file, parse_messages_with};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Once;

mod config;

#[derive(Parser, Debug)]
#[command(name = "spendsense", version, about = "Bank message parsing and budget forecasting")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse pasted SMS / statement text into transactions (JSON on stdout)
    Parse {
        /// Text file to read (defaults to stdin)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Opaque user id stamped on every record
        #[arg(long, default_value = "local")]
        user: String,

        /// Source tag (defaults to the configured parser source)
        #[arg(long)]
        source: Option<String>,
    },

    /// Import a bank CSV export (JSON on stdout)
    ImportCsv {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Project this month's spend against a budget
    Predict {
        #[arg(long)]
        spent: f64,

        #[arg(long)]
        budget: f64,

        /// Days elapsed (defaults to today's day of month)
        #[arg(long)]
        day: Option<u32>,

        /// Days in the month (defaults to the current month's length)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Forecast next month from past monthly totals (oldest first)
    Forecast {
        #[arg(long, value_delimiter = ',')]
        history: Vec<f64>,

        #[arg(long)]
        budget: f64,

        /// Monthly savings target
        #[arg(long, default_value_t = 0.0)]
        target: f64,
    },

    /// Even-split the rest of the budget after editing one category
    Rebalance {
        #[arg(long)]
        total: f64,

        /// Current limits, e.g. Food=4000,Rent=3000
        #[arg(long)]
        limits: String,

        /// Category the user edited
        #[arg(long)]
        lock: Category,

        #[arg(long)]
        value: f64,
    },

    /// Share a remainder across categories in proportion to past spend
    Distribute {
        #[arg(long)]
        remaining: f64,

        /// Historical spend per unassigned category, e.g. Food=3000,Travel=0
        #[arg(long)]
        spend: String,
    },

    /// Month-over-month category insights and savings tips
    Insights {
        #[arg(long)]
        current: String,

        #[arg(long)]
        previous: String,

        /// Optional limits to generate savings tips against
        #[arg(long)]
        limits: Option<String>,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.spendsense/config.toml with defaults if missing
    Init,
    /// Print the effective config
    Show,
}

static TRACING_INIT: Once = Once::new();

fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.log_filter);
    tracing::debug!(command = ?cli.command, "starting");

    match cli.command {
        Command::Parse { file, user, source } => {
            let text = read_input(file)?;
            let opts = cfg.parse_options(source)?;
            let txns = refine_all(&parse_messages_with(&text, &user, &opts));
            tracing::info!(count = txns.len(), "parsed transactions");
            print_json(&txns)?;
        }

        Command::ImportCsv { csv, user } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let opts = cfg.parse_options(None)?;
            let txns = refine_all(&parse_csv_file(&csv, &user, &opts)?);
            tracing::info!(count = txns.len(), path = %csv.display(), "imported CSV");
            print_json(&txns)?;
        }

        Command::Predict {
            spent,
            budget,
            day,
            days,
        } => {
            let (today, month_len) = month_progress(cfg.now()?.date());
            let forecast = predict_remaining_month(spent, budget, day.unwrap_or(today), days.unwrap_or(month_len));
            print_json(&forecast)?;
        }

        Command::Forecast {
            history,
            budget,
            target,
        } => {
            let start = history.len().saturating_sub(cfg.budget.history_months);
            let window = &history[start..];
            let forecast = predict_next_month(window, budget, target);
            print_json(&serde_json::json!({
                "forecast": forecast,
                "confidence": confidence_score(window.len()),
            }))?;
        }

        Command::Rebalance {
            total,
            limits,
            lock,
            value,
        } => {
            let current = parse_pairs(&limits)?;
            print_json(&rebalance(total, &current, lock, value))?;
        }

        Command::Distribute { remaining, spend } => {
            let spend = parse_pairs(&spend)?;
            let unassigned: Vec<Category> = spend.keys().copied().collect();
            print_json(&distribute_unassigned(remaining, &unassigned, &spend))?;
        }

        Command::Insights {
            current,
            previous,
            limits,
        } => {
            let current = parse_pairs(&current)?;
            let previous = parse_pairs(&previous)?;
            let tips = match limits {
                Some(l) => saving_tips_for(&current, &parse_pairs(&l)?, cfg.budget.caution_ratio),
                None => Vec::new(),
            };
            print_json(&serde_json::json!({
                "insights": compare(&current, &previous),
                "tips": tips,
            }))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(p) => std::fs::read_to_string(&p).with_context(|| format!("read {}", p.display())),
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("read stdin")?;
            Ok(s)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("serialize output")?);
    Ok(())
}

/// Parse `Food=4000,Rent=3000` into a limit map.
fn parse_pairs(s: &str) -> Result<LimitMap> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (name, amount) = pair
                .split_once('=')
                .with_context(|| format!("expected Category=amount, got {pair:?}"))?;
            let category: Category = name.parse()?;
            let amount: f64 = amount
                .trim()
                .parse()
                .with_context(|| format!("invalid amount in {pair:?}"))?;
            Ok((category, amount))
        })
        .collect()
}
