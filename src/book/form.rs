use crate::api::LibraryClient;
use crate::authors::{has_full_name, looks_like_author, parse_author_pairs};
use crate::book::payload::flatten_fields;
use crate::{Author, Book, BookPost, Genre};
use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// First failing check wins; later checks are not evaluated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("you must be signed in to register a book")]
    NotSignedIn,
    #[error("add at least one author or register the book without one")]
    NoAuthors,
    #[error("a title is required")]
    MissingTitle,
    #[error("select at least one genre")]
    NoGenres,
    #[error("an author needs both a first and a last name")]
    IncompleteAuthorName,
}

/// In-memory state of one book registration session, from first input to
/// submit. All mutation happens on the caller's event flow; nothing here is
/// shared or touched concurrently.
pub struct BookForm {
    pub title: String,
    pub publisher: String,
    pub notice: String,
    pub rating: u32,
    pub selected_genre_ids: Vec<i64>,
    pub image: Option<PathBuf>,
    genres: Vec<Genre>,
    user_id: Option<i64>,
    author_input: String,
    pending_authors: Vec<Author>,
    without_author: bool,
}

impl BookForm {
    /// `genres` is the reference list fetched once per session; a failed
    /// fetch simply passes an empty list.
    pub fn new(user_id: Option<i64>, genres: Vec<Genre>) -> Self {
        Self {
            title: String::new(),
            publisher: String::new(),
            notice: String::new(),
            rating: 0,
            selected_genre_ids: Vec::new(),
            image: None,
            genres,
            user_id,
            author_input: String::new(),
            pending_authors: Vec::new(),
            without_author: false,
        }
    }

    pub fn author_input(&self) -> &str {
        &self.author_input
    }

    pub fn pending_authors(&self) -> &[Author] {
        &self.pending_authors
    }

    pub fn without_author(&self) -> bool {
        self.without_author
    }

    /// Mirror of the input field's change handler: once the text looks like
    /// a complete name pair it is consumed into the pending list and the
    /// field is cleared; otherwise the text stays put.
    pub fn author_input_changed(&mut self, input: &str) {
        self.author_input = input.to_string();
        if looks_like_author(&self.author_input) {
            self.consume_author_input();
        }
    }

    /// An autocomplete pick. Added only when no pending entry already
    /// matches case-insensitively on first+last name. The parser performs
    /// no such check, so free-text guesses can still pile up duplicates.
    pub fn select_author(&mut self, author: Author) {
        self.author_input.clear();
        let duplicate = self
            .pending_authors
            .iter()
            .any(|existing| existing.same_name(&author));
        if !duplicate {
            self.pending_authors.push(author);
        }
    }

    pub fn remove_author(&mut self, index: usize) {
        if index < self.pending_authors.len() {
            self.pending_authors.remove(index);
        }
    }

    /// The "register without author" opt-out. Toggling it in either
    /// direction discards the accumulated authors and the typed text.
    pub fn set_without_author(&mut self, without_author: bool) {
        self.without_author = without_author;
        self.pending_authors.clear();
        self.author_input.clear();
    }

    /// Ordered gate; only the first failing condition is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.is_none() {
            return Err(ValidationError::NotSignedIn);
        }
        if self.author_input.trim().is_empty()
            && self.pending_authors.is_empty()
            && !self.without_author
        {
            return Err(ValidationError::NoAuthors);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.selected_genre_ids.is_empty() {
            return Err(ValidationError::NoGenres);
        }
        if !self.without_author
            && !self.author_input.trim().is_empty()
            && !has_full_name(&self.author_input)
        {
            return Err(ValidationError::IncompleteAuthorName);
        }
        Ok(())
    }

    /// Assemble and dispatch the creation request.
    ///
    /// Unconfirmed authors are created one at a time, each awaited before
    /// the next, so the final list keeps discovery order. A failed create
    /// aborts the whole submit; authors created before the failure stay
    /// behind on the server with no rollback. The pending list is reset
    /// after the book request is dispatched, whatever its outcome.
    pub async fn submit(&mut self, client: &LibraryClient) -> Result<Book> {
        self.validate()?;

        let selected_genres: Vec<Genre> = self
            .selected_genre_ids
            .iter()
            .map(|&id| Genre {
                id,
                name: self.genre_name(id),
            })
            .collect();

        // Text typed but never auto-consumed gets one final parse.
        if !self.author_input.trim().is_empty() {
            self.consume_author_input();
        }

        let mut book_authors: Vec<Author> = self
            .pending_authors
            .iter()
            .filter(|a| a.is_confirmed == Some(true))
            .cloned()
            .collect();
        let new_authors: Vec<Author> = self
            .pending_authors
            .iter()
            .filter(|a| a.is_confirmed == Some(false))
            .cloned()
            .collect();

        for author in &new_authors {
            let created = client
                .create_author(author)
                .await
                .context("failed to create author")?;
            book_authors.push(created);
        }

        if self.without_author {
            book_authors.clear();
        }

        let book = BookPost {
            name: self.title.clone(),
            authors: book_authors,
            genres: selected_genres,
            publisher: Some(self.publisher.clone()),
            notice: Some(self.notice.clone()),
            rating: self.rating,
            user_id: self.user_id.unwrap_or(0),
        };

        let fields = flatten_fields(&book);
        debug!("submitting book with {} fields", fields.len());

        let image = match &self.image {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read image {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                Some((file_name, bytes))
            }
            None => None,
        };

        let result = client.create_book(fields, image).await;
        self.reset_after_submit();
        result.context("failed to register book")
    }

    fn genre_name(&self, id: i64) -> String {
        self.genres
            .iter()
            .find(|genre| genre.id == id)
            .map(|genre| genre.name.clone())
            .unwrap_or_default()
    }

    fn consume_author_input(&mut self) {
        let parsed = parse_author_pairs(&self.author_input);
        self.pending_authors.extend(parsed);
        self.author_input.clear();
    }

    fn reset_after_submit(&mut self) {
        self.pending_authors.clear();
        self.author_input.clear();
    }
}
