use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use library_inventory::{
    AddOutcome, BookRecord, Borrower, Catalog, CatalogError, Isbn, Quantity,
    adapters::json_file::JsonFileStore, config::Settings,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "Track library books and the copies lent out")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog data file (defaults to $LIBRARY_DATA_FILE, then books.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add copies of a book, merging with an existing ISBN
    Add {
        #[arg(long)]
        title: String,
        /// Repeat for multiple authors
        #[arg(long = "author", required = true)]
        authors: Vec<String>,
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        year: i32,
        #[arg(long, value_parser = parse_price)]
        price: f64,
        #[arg(long)]
        quantity: u32,
    },
    /// Remove the first book whose title or ISBN contains TERM
    Remove { term: String },
    /// Show the first book whose title or ISBN contains TERM
    Search { term: String },
    /// Show all books with an author containing NAME
    Author { name: String },
    /// Lend one copy of a book
    Lend { isbn: String, borrower: String },
    /// Return the oldest loan of a book held by BORROWER
    Return { isbn: String, borrower: String },
    /// Show all books
    List,
    /// Show outstanding loans
    Loans,
}

fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if !price.is_finite() || price < 0.0 {
        return Err("price must be a non-negative number".to_string());
    }
    Ok(price)
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("library_inventory={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = Settings::resolve(cli.data_file);
    tracing::debug!(data_file = %settings.data_file.display(), "using catalog file");

    let store = Arc::new(JsonFileStore::new(&settings.data_file));
    let mut catalog = Catalog::open(store).with_context(|| {
        format!(
            "failed to open catalog at {}",
            settings.data_file.display()
        )
    })?;

    let removing = matches!(cli.command, Command::Remove { .. });
    match run(&mut catalog, cli.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err @ (CatalogError::CorruptState(_) | CatalogError::StoreUnavailable(_))) => {
            Err(err).context("catalog change may not have been saved")
        }
        Err(err) => {
            println!("{}", user_message(&err, removing));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(catalog: &mut Catalog, command: Command) -> Result<(), CatalogError> {
    match command {
        Command::Add {
            title,
            authors,
            isbn,
            year,
            price,
            quantity,
        } => {
            let record = BookRecord {
                isbn: Isbn::new(isbn),
                title,
                authors,
                publishing_year: year,
                price,
                quantity: Quantity::new(quantity),
            };
            match catalog.add_book(record)? {
                AddOutcome::Inserted => println!("Book added."),
                AddOutcome::Merged { quantity_on_hand } => {
                    println!("Book already in catalog, quantity is now {quantity_on_hand}.");
                }
            }
        }
        Command::Remove { term } => {
            let removed = catalog.remove_book(&term)?;
            println!("Book '{}' removed.", removed.title);
        }
        Command::Search { term } => {
            println!("{}", catalog.search_books(&term)?);
        }
        Command::Author { name } => {
            let books = catalog.search_books_by_author(&name);
            if books.is_empty() {
                println!("No books found.");
            }
            for book in books {
                println!("{book}");
            }
        }
        Command::Lend { isbn, borrower } => {
            let lent = catalog.lend_book(&Isbn::new(isbn), Borrower::new(borrower))?;
            println!("Book '{}' lent to {}.", lent.title, lent.borrower);
        }
        Command::Return { isbn, borrower } => {
            let returned = catalog.return_book(&Isbn::new(isbn), &Borrower::new(borrower))?;
            match returned.title {
                Some(title) => println!("Book '{title}' returned by {}.", returned.borrower),
                None => println!(
                    "Book {} returned by {} (no longer in the catalog).",
                    returned.isbn, returned.borrower
                ),
            }
        }
        Command::List => {
            for book in catalog.list_all() {
                println!("{book}");
            }
        }
        Command::Loans => {
            for (isbn, entries) in catalog.loan_groups() {
                for entry in entries {
                    println!("{isbn}: {} ({} copies)", entry.borrower, entry.copies);
                }
            }
        }
    }
    Ok(())
}

fn user_message(err: &CatalogError, removing: bool) -> String {
    match err {
        CatalogError::NotFound(_) if removing => "This book isn't available to remove.".to_string(),
        CatalogError::NotFound(_) => "No books found.".to_string(),
        CatalogError::InsufficientStock => "Not enough books available to lend.".to_string(),
        CatalogError::NotLent => "This book wasn't lent.".to_string(),
        other => other.to_string(),
    }
}
