use std::fmt::{self, Display};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inquire::{Confirm, Select};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use spesa::chart;
use spesa::config::SpesaConfig;
use spesa::errors::SpesaError;
use spesa::expenses::Expense;
use spesa::format::{format_amount, format_percent};
use spesa::receipt::recognize_in_background;
use spesa::store::ExpenseStore;
use spesa::tui::{open_widget, overview::MonthOverview};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense
    Add {
        /// Receipt image whose text seeds the description
        #[arg(short, long)]
        receipt: Option<PathBuf>,
    },
    /// List all recorded expenses
    List,
    /// Edit a recorded expense
    Edit,
    /// Delete a recorded expense
    Delete {
        /// Delete by list position instead of picking interactively
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Show the per-category chart
    Chart {
        /// Print totals for all expenses instead of the monthly view
        #[arg(short, long)]
        plain: bool,
    },
    /// Delete all recorded expenses
    Clear,
}

struct ExpenseChoice {
    id: Uuid,
    line: String,
}

impl Display for ExpenseChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

fn select_expense(store: &ExpenseStore, prompt: &str) -> Result<Uuid, SpesaError> {
    let choices: Vec<ExpenseChoice> = store
        .expenses()
        .iter()
        .map(|expense| ExpenseChoice {
            id: expense.id,
            line: expense.to_string(),
        })
        .collect();
    let choice = Select::new(prompt, choices).prompt()?;
    Ok(choice.id)
}

fn main() -> Result<(), SpesaError> {
    let args = Args::parse();
    let default_filter = if args.debug { "spesa=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = SpesaConfig::load()?;
    let mut store = ExpenseStore::open(config.data_file());

    match args.command {
        Command::Add { receipt } => {
            let recognition = receipt.as_deref().map(recognize_in_background);
            let image_uri = receipt.map(|path| path.display().to_string());
            let expense = Expense::prompt_new(&config, image_uri, recognition)?;
            println!("{expense}");
            store.add(expense)?;
        }
        Command::List => {
            if store.is_empty() {
                println!("No expenses recorded yet");
            }
            for expense in store.expenses() {
                println!("{expense}");
            }
        }
        Command::Edit => {
            if store.is_empty() {
                println!("No expenses recorded yet");
                return Ok(());
            }
            let id = select_expense(&store, "Edit which expense?")?;
            let Some(existing) = store.get(&id).cloned() else {
                return Err(SpesaError::InvalidArgument("No such expense".into()));
            };
            let edited = existing.prompt_edit(&config)?;
            store.update(&id, edited)?;
        }
        Command::Delete { index } => {
            if let Some(index) = index {
                // out of bounds is a silent no-op
                store.delete_at(index)?;
            } else {
                if store.is_empty() {
                    println!("No expenses recorded yet");
                    return Ok(());
                }
                let id = select_expense(&store, "Delete which expense?")?;
                if Confirm::new("Delete this expense?")
                    .with_default(false)
                    .prompt()?
                {
                    store.remove(&id)?;
                }
            }
        }
        Command::Chart { plain } => {
            if plain {
                let totals = chart::aggregate(store.expenses());
                let sectors = chart::layout(&totals);
                if sectors.is_empty() {
                    println!("No expenses to chart");
                } else {
                    for sector in &sectors {
                        let amount = totals.get(&sector.label).copied().unwrap_or_default();
                        println!(
                            "{:<13} {:>12} {:>6}",
                            sector.label,
                            format_amount(config.currency, amount),
                            format_percent(sector.sweep_angle),
                        );
                    }
                }
            } else {
                let overview = MonthOverview::new(store.expenses().to_vec(), config.currency);
                open_widget(overview)?;
            }
        }
        Command::Clear => {
            if Confirm::new("Delete all recorded expenses?")
                .with_default(false)
                .prompt()?
            {
                store.clear()?;
                println!("All expenses deleted");
            }
        }
    }

    Ok(())
}
