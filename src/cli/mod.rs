use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{AppError, LedgerService, NewTransaction};
use crate::domain::{format_cents, KindFilter, TransactionKind};
use crate::game::{GuessingGame, Outcome, ScoreLog};

/// Fintrack - CSV-backed personal finance tracker
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Track income, expenses and investments in a plain CSV file")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, default_value = "transactions.csv")]
    pub file: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new transaction
    Add {
        /// Description of the transaction
        description: String,

        /// Amount (e.g. "50.00", "50" or "50,00")
        amount: String,

        /// Kind: income, expense, investment
        #[arg(short, long, default_value = "expense")]
        kind: String,

        /// Date (dd/mm/yyyy, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: String,
    },

    /// List transactions, most recent first
    List {
        /// Filter by kind: income, expense, investment (omit for all)
        #[arg(short, long)]
        kind: Option<String>,

        /// Case-insensitive search over descriptions
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show per-kind totals and the balance
    Totals,

    /// Show monthly and annual profit reports
    Report,

    /// Show category suggestions for a kind
    Categories {
        /// Kind: income, expense, investment
        kind: String,
    },

    /// Export the ledger to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Number-guessing game
    #[command(subcommand)]
    Game(GameCommands),
}

#[derive(Subcommand)]
pub enum GameCommands {
    /// Play a round: guess a number in the given range
    Play {
        /// Lower bound of the range (inclusive)
        start: i64,

        /// Upper bound of the range (inclusive)
        end: i64,

        /// Score log file
        #[arg(long, default_value = "scores.txt")]
        scores: String,
    },

    /// Show the score history
    Scores {
        /// Score log file
        #[arg(long, default_value = "scores.txt")]
        scores: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add {
                description,
                amount,
                kind,
                date,
                category,
            } => {
                let mut service = open_ledger(&self.file)?;
                let kind = parse_kind(&kind)?;
                let input = NewTransaction {
                    description,
                    amount,
                    date: date.unwrap_or_default(),
                    kind,
                    category,
                };
                match service.add(input) {
                    Ok(tx) => println!(
                        "Added {}: {} {} on {} ({})",
                        tx.kind,
                        format_cents(tx.amount_cents),
                        tx.description,
                        tx.date,
                        tx.id
                    ),
                    Err(AppError::Storage(err)) => {
                        eprintln!("Warning: transaction recorded in memory but not saved: {err}");
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::Delete { id } => {
                let mut service = open_ledger(&self.file)?;
                let id = Uuid::parse_str(&id)
                    .context("Invalid transaction ID format (expected UUID)")?;
                match service.delete(id) {
                    Ok(true) => println!("Deleted transaction {}", id),
                    Ok(false) => println!("No transaction with id {}", id),
                    Err(AppError::Storage(err)) => {
                        eprintln!("Warning: deletion kept in memory but not saved: {err}");
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::List { kind, search } => {
                let service = open_ledger(&self.file)?;
                let filter = match kind.as_deref() {
                    None | Some("all") => KindFilter::All,
                    Some(value) => KindFilter::Only(parse_kind(value)?),
                };
                run_list_command(&service, filter, &search);
            }

            Commands::Totals => {
                let service = open_ledger(&self.file)?;
                let totals = service.totals();
                println!("Income:      {:>12}", format_cents(totals.income));
                println!("Expenses:    {:>12}", format_cents(totals.expenses));
                println!("Investments: {:>12}", format_cents(totals.investments));
                println!("Balance:     {:>12}", format_cents(totals.balance));
            }

            Commands::Report => {
                let service = open_ledger(&self.file)?;
                run_report_command(&service);
            }

            Commands::Categories { kind } => {
                let kind = parse_kind(&kind)?;
                for category in kind.suggested_categories() {
                    println!("{}", category);
                }
            }

            Commands::Export { output, format } => {
                let service = open_ledger(&self.file)?;
                run_export_command(&service, output.as_deref(), &format)?;
            }

            Commands::Game(game_cmd) => match game_cmd {
                GameCommands::Play { start, end, scores } => {
                    run_game_play(start, end, &scores)?;
                }
                GameCommands::Scores { scores } => {
                    let log = ScoreLog::new(&scores);
                    let entries = log.entries()?;
                    if entries.is_empty() {
                        println!("No scores recorded yet.");
                    } else {
                        for entry in entries {
                            println!("{}", entry);
                        }
                    }
                }
            },
        }

        Ok(())
    }
}

fn open_ledger(path: &str) -> Result<LedgerService> {
    let service = LedgerService::open(path)
        .with_context(|| format!("Failed to open ledger file: {}", path))?;
    for error in service.load_errors() {
        eprintln!("Warning: skipped row {}: {}", error.line, error.message);
    }
    Ok(service)
}

fn parse_kind(value: &str) -> Result<TransactionKind> {
    value.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid kind '{}'. Valid kinds: income, expense, investment. Error: {}",
            value,
            e
        )
    })
}

fn run_list_command(service: &LedgerService, filter: KindFilter, search: &str) {
    let transactions = service.filter(filter, search);
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<12} {:>12} {:<12} {:<14} {:<24} {}",
        "DATE", "AMOUNT", "KIND", "CATEGORY", "DESCRIPTION", "ID"
    );
    println!("{}", "-".repeat(110));
    for tx in transactions {
        println!(
            "{:<12} {:>12} {:<12} {:<14} {:<24} {}",
            tx.date,
            format_cents(tx.amount_cents),
            tx.kind,
            tx.category,
            tx.description,
            tx.id
        );
    }
}

fn run_report_command(service: &LedgerService) {
    let profit = service.profit_by_period();

    println!("MONTHLY PROFIT");
    if profit.monthly.is_empty() {
        println!("  (no dated transactions)");
    } else {
        let mut months: Vec<(String, i64)> = profit.monthly.into_iter().collect();
        months.sort_by_key(|(key, _)| std::cmp::Reverse(month_sort_key(key)));
        for (month, cents) in months {
            println!("  {:<10} {:>12}", month, format_cents(cents));
        }
    }

    println!();
    println!("ANNUAL PROFIT");
    if profit.yearly.is_empty() {
        println!("  (no dated transactions)");
    } else {
        let mut years: Vec<(String, i64)> = profit.yearly.into_iter().collect();
        years.sort_by(|(a, _), (b, _)| b.cmp(a));
        for (year, cents) in years {
            println!("  {:<10} {:>12}", year, format_cents(cents));
        }
    }
}

/// Chronological sort key for "mm/yyyy" map keys.
fn month_sort_key(key: &str) -> (i32, u32) {
    match key.split_once('/') {
        Some((month, year)) => (
            year.parse().unwrap_or(0),
            month.parse().unwrap_or(0),
        ),
        None => (0, 0),
    }
}

fn run_export_command(service: &LedgerService, output: Option<&str>, format: &str) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_transactions_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} transactions", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if output.is_some() {
                eprintln!("Exported {} transactions", snapshot.transactions.len());
            }
        }
        other => {
            anyhow::bail!("Unknown export format '{}'. Valid formats: csv, json", other);
        }
    }

    Ok(())
}

fn run_game_play(start: i64, end: i64, scores_path: &str) -> Result<()> {
    let mut game = GuessingGame::new(start, end)?;
    println!("Guess the number between {} and {}.", start, end);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: abandon the round without recording a score
            println!();
            return Ok(());
        }

        let Ok(value) = line.trim().parse::<i64>() else {
            println!("Enter a whole number.");
            continue;
        };

        match game.guess(value) {
            Outcome::TooLow => println!("Try a higher number."),
            Outcome::TooHigh => println!("Try a lower number."),
            Outcome::Correct => {
                println!("Correct! Solved in {} attempts.", game.attempts());
                let log = ScoreLog::new(scores_path);
                if let Err(err) = log.append(start, end, game.attempts()) {
                    eprintln!("Warning: could not record score: {err}");
                }
                return Ok(());
            }
        }
    }
}
