use serde::{Deserialize, Serialize};

pub mod api;
pub mod authors;
pub mod book;

/// An author record as the library backend knows it. `id` is absent until
/// the record has been persisted; `is_confirmed` is tri-state: `Some(true)`
/// for a record the backend vouches for, `Some(false)` for a free-text
/// guess awaiting creation, `None` when nothing is known either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confirmed: Option<bool>,
}

impl Author {
    /// A pending free-text guess, not yet known to the backend.
    pub fn unconfirmed(first_name: &str, last_name: &str) -> Self {
        Self {
            id: None,
            first_name: first_name.to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            is_confirmed: Some(false),
        }
    }

    /// Case-insensitive match on first+last name, ignoring id and flag.
    pub fn same_name(&self, other: &Author) -> bool {
        self.first_name.eq_ignore_ascii_case(&other.first_name)
            && self.last_name.eq_ignore_ascii_case(&other.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A persisted book as returned by the backend after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// The book draft assembled at submit time. Exists only between form entry
/// and the create request; the image file travels as a separate part.
#[derive(Debug, Clone)]
pub struct BookPost {
    pub name: String,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub publisher: Option<String>,
    pub notice: Option<String>,
    pub rating: u32,
    pub user_id: i64,
}
