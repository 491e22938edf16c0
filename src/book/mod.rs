use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, warn};

mod form;
mod payload;
pub use form::{BookForm, ValidationError};
pub use payload::flatten_fields;

use crate::api::LibraryClient;

#[derive(Args)]
pub struct AddBookArgs {
    /// Book title
    #[arg(long)]
    pub title: String,

    /// Genre id; repeat for multiple genres
    #[arg(long = "genre")]
    pub genres: Vec<i64>,

    #[arg(long, default_value = "")]
    pub publisher: String,

    /// Free-text notice shown on the book's page
    #[arg(long, default_value = "")]
    pub notice: String,

    #[arg(long, default_value = "0")]
    pub rating: u32,

    /// Free-text author names, e.g. "Jane Doe; Mark Twain"
    #[arg(long)]
    pub authors: Option<String>,

    /// Pick an already-known author by name via the directory; repeatable
    #[arg(long = "select-author")]
    pub select_authors: Vec<String>,

    /// Cover image file
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Register the book with no authors at all
    #[arg(long)]
    pub without_author: bool,

    /// Library API base URL
    #[arg(short = 'u', long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,
}

pub fn run(args: AddBookArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

pub async fn run_async(args: AddBookArgs) -> Result<()> {
    let client = LibraryClient::new(args.base_url.clone(), args.timeout)?;

    // Reference data failures are logged and degrade: a missing user id
    // blocks validation later, a missing genre list yields empty names.
    let user_id = match client.current_user_id().await {
        Ok(id) => Some(id),
        Err(e) => {
            error!("fetching user id failed: {e:#}");
            None
        }
    };
    let genres = match client.genres().await {
        Ok(genres) => genres,
        Err(e) => {
            error!("genre lookup failed: {e:#}");
            Vec::new()
        }
    };

    let mut form = BookForm::new(user_id, genres);
    form.title = args.title;
    form.publisher = args.publisher;
    form.notice = args.notice;
    form.rating = args.rating;
    form.selected_genre_ids = args.genres;
    form.image = args.image;

    for name in &args.select_authors {
        let matches = match client.search_authors(name).await {
            Ok(matches) => matches,
            Err(e) => {
                error!("author lookup failed: {e:#}");
                Vec::new()
            }
        };
        let wanted = parse_author_pairs_first(name);
        match matches
            .into_iter()
            .find(|a| wanted.as_ref().map(|w| a.same_name(w)).unwrap_or(false))
        {
            Some(found) => form.select_author(found),
            None => warn!("no confirmed author matched '{}'", name),
        }
    }

    if let Some(text) = &args.authors {
        form.author_input_changed(text);
    }

    if args.without_author {
        form.set_without_author(true);
    }

    match form.submit(&client).await {
        Ok(book) => {
            println!("Book is registered successfully: book/{}", book.id);
            Ok(())
        }
        Err(e) => {
            // Validation failures carry their own message and never reach
            // the network; everything else gets the generic notification.
            if let Some(validation) = e.downcast_ref::<ValidationError>() {
                eprintln!("{validation}");
                return Err(e);
            }
            error!("book registration failed: {e:#}");
            eprintln!("Something went wrong");
            Err(anyhow!("book registration failed"))
        }
    }
}

fn parse_author_pairs_first(name: &str) -> Option<crate::Author> {
    crate::authors::parse_author_pairs(name).into_iter().next()
}
