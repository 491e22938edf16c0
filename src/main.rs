use anyhow::Result;
use bookpost::{authors, book};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookpost")]
#[command(about = "Register books and manage authors in a remote library")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new book, creating any unknown authors along the way
    AddBook(book::AddBookArgs),
    /// Look up authors by partial name
    SearchAuthors(authors::SearchArgs),
    /// Create a new author record
    AddAuthor(authors::AddArgs),
    /// Edit an existing author record
    EditAuthor(authors::EditArgs),
    /// Merge duplicate author records into one canonical survivor
    MergeAuthors(authors::MergeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    match cli.command {
        Commands::AddBook(args) => book::run(args),
        Commands::SearchAuthors(args) => authors::run_search(args),
        Commands::AddAuthor(args) => authors::run_add(args),
        Commands::EditAuthor(args) => authors::run_edit(args),
        Commands::MergeAuthors(args) => authors::run_merge(args),
    }
}
