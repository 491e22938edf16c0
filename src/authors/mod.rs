use anyhow::{anyhow, bail, Result};
use clap::Args;
use tracing::error;

mod merge;
mod parser;
pub use merge::select_merge_candidate;
pub use parser::{has_full_name, looks_like_author, parse_author_pairs};

use crate::api::LibraryClient;
use crate::Author;

#[derive(Args)]
pub struct SearchArgs {
    /// Partial name to match against the author directory
    pub filter: String,

    /// Library API base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub middle_name: Option<String>,

    /// Library API base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Id of the author to edit
    pub id: i64,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub middle_name: Option<String>,

    /// Library API base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Name filter used to look the duplicate set up
    pub filter: String,

    /// Ids of the records believed to be the same person
    #[arg(long = "id", required = true, num_args = 1..)]
    pub ids: Vec<i64>,

    /// Override the surviving record's first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Override the surviving record's last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Override the surviving record's middle name
    #[arg(long)]
    pub middle_name: Option<String>,

    /// Library API base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,
}

pub fn run_search(args: SearchArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(search_async(args))
}

pub async fn search_async(args: SearchArgs) -> Result<()> {
    let client = LibraryClient::new(args.base_url.clone(), args.timeout)?;

    // Lookup failures degrade to an empty candidate list, same as the
    // autocomplete dropdown staying empty.
    let authors = match client.search_authors(&args.filter).await {
        Ok(authors) => authors,
        Err(e) => {
            error!("author lookup failed: {e:#}");
            Vec::new()
        }
    };

    if authors.is_empty() {
        println!("No authors matched '{}'", args.filter);
        return Ok(());
    }

    for author in &authors {
        println!(
            "{:>6}  {} {}{}",
            author.id.map(|id| id.to_string()).unwrap_or_default(),
            author.first_name,
            author.last_name,
            match author.is_confirmed {
                Some(true) => "",
                _ => "  (unconfirmed)",
            }
        );
    }

    Ok(())
}

pub fn run_add(args: AddArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(add_async(args))
}

pub async fn add_async(args: AddArgs) -> Result<()> {
    let client = LibraryClient::new(args.base_url.clone(), args.timeout)?;

    let author = Author {
        id: None,
        first_name: args.first_name,
        middle_name: args.middle_name,
        last_name: args.last_name,
        is_confirmed: Some(true),
    };

    match client.create_author(&author).await {
        Ok(created) => {
            println!(
                "New author was created successfully (id {})",
                created.id.unwrap_or_default()
            );
            Ok(())
        }
        Err(e) => {
            error!("author creation failed: {e:#}");
            eprintln!("Something went wrong");
            Err(anyhow!("author creation failed"))
        }
    }
}

pub fn run_edit(args: EditArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(edit_async(args))
}

pub async fn edit_async(args: EditArgs) -> Result<()> {
    let client = LibraryClient::new(args.base_url.clone(), args.timeout)?;

    // Editing a record confirms it.
    let author = Author {
        id: Some(args.id),
        first_name: args.first_name,
        middle_name: args.middle_name,
        last_name: args.last_name,
        is_confirmed: Some(true),
    };

    match client.update_author(&author).await {
        Ok(_) => {
            println!("Author was edited successfully");
            Ok(())
        }
        Err(e) => {
            error!("author update failed: {e:#}");
            eprintln!("Something went wrong");
            Err(anyhow!("author update failed"))
        }
    }
}

pub fn run_merge(args: MergeArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(merge_async(args))
}

pub async fn merge_async(args: MergeArgs) -> Result<()> {
    let client = LibraryClient::new(args.base_url.clone(), args.timeout)?;

    let candidates: Vec<Author> = client
        .search_authors(&args.filter)
        .await?
        .into_iter()
        .filter(|a| a.id.map(|id| args.ids.contains(&id)).unwrap_or(false))
        .collect();

    if candidates.len() < 2 {
        bail!(
            "found {} of the {} requested authors; need at least two to merge",
            candidates.len(),
            args.ids.len()
        );
    }

    let mut canonical = select_merge_candidate(&candidates)
        .ok_or_else(|| anyhow!("no merge candidate could be selected"))?;

    if let Some(first_name) = args.first_name {
        canonical.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        canonical.last_name = last_name;
    }
    if let Some(middle_name) = args.middle_name {
        canonical.middle_name = Some(middle_name);
    }
    canonical.is_confirmed = Some(true);

    let merged_ids: Vec<i64> = candidates.iter().filter_map(|a| a.id).collect();

    match client.merge_authors(&canonical, &merged_ids).await {
        Ok(survivor) => {
            println!(
                "Authors were merged successfully into {} {} (id {})",
                survivor.first_name,
                survivor.last_name,
                survivor.id.unwrap_or_default()
            );
            Ok(())
        }
        Err(e) => {
            error!("author merge failed: {e:#}");
            eprintln!("Something went wrong");
            Err(anyhow!("author merge failed"))
        }
    }
}
