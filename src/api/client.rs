use crate::{Author, Book, Genre};
use anyhow::{anyhow, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use urlencoding::encode;

/// Thin wrapper over the library backend's REST surface. Every call is a
/// single attempt; a failed request is terminal for that user action.
pub struct LibraryClient {
    client: Client,
    base_url: String,
}

impl LibraryClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Id of the signed-in user, from the authentication provider.
    pub async fn current_user_id(&self) -> Result<i64> {
        let url = format!("{}/user/id", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    /// Full genre reference list, fetched once per form session.
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let url = format!("{}/genre", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    /// Autocomplete lookup by partial name.
    pub async fn search_authors(&self, filter: &str) -> Result<Vec<Author>> {
        let url = format!("{}/author?filter={}", self.base_url, encode(filter));
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    /// Persist a free-text author guess; the response carries its new id.
    pub async fn create_author(&self, author: &Author) -> Result<Author> {
        let url = format!("{}/author", self.base_url);
        let response = self.client.post(&url).json(author).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    pub async fn update_author(&self, author: &Author) -> Result<Author> {
        let id = author
            .id
            .ok_or_else(|| anyhow!("cannot update an author without an id"))?;
        let url = format!("{}/author/{}", self.base_url, id);
        let response = self.client.put(&url).json(author).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    /// Fold the given author ids into one canonical record.
    pub async fn merge_authors(&self, canonical: &Author, ids: &[i64]) -> Result<Author> {
        let url = format!("{}/author/merge", self.base_url);
        let body = json!({ "author": canonical, "authorIds": ids });
        let response = self.client.put(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }

    /// Create a book from flattened multipart fields plus an optional image.
    pub async fn create_book(
        &self,
        fields: Vec<(String, String)>,
        image: Option<(String, Vec<u8>)>,
    ) -> Result<Book> {
        let url = format!("{}/book", self.base_url);

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some((file_name, bytes)) = image {
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status));
        }
        Ok(response.json().await?)
    }
}
