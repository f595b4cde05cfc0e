use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::json;

use super::{AnimalStore, StoreError, TABLE};
use crate::models::animal::{Animal, AnimalChanges};

/// Record store reached through a hosted PostgREST endpoint (Supabase).
pub struct SupabaseStore {
    base_url: String,
    key: String,
    client: Client,
}

/// Error body PostgREST returns on failure.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, key: &str) -> Self {
        Self::with_client(base_url, key, Client::new())
    }

    pub fn with_client(base_url: &str, key: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client,
        }
    }

    /// Table URL with an `id=eq.<id>` filter plus any extra query pairs.
    fn table_url(&self, id: Option<&str>, extra: &[(&str, &str)]) -> Result<Url, StoreError> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(extra.len() + 1);
        if let Some(id) = id {
            params.push(("id", format!("eq.{id}")));
        }
        params.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));

        Url::parse_with_params(&format!("{}/rest/v1/{TABLE}", self.base_url), &params)
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn rows(response: Response) -> Result<Vec<Animal>, StoreError> {
        let response = check(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AnimalStore for SupabaseStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>, StoreError> {
        let url = self.table_url(Some(id), &[("select", "*")])?;
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::rows(response).await?.into_iter().next())
    }

    async fn touch_last_scanned(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let url = self.table_url(Some(id), &[])?;
        let response = self
            .authorized(self.client.patch(url))
            .header("Prefer", "return=minimal")
            .json(&json!({ "last_scanned": at }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        changes: &AnimalChanges,
    ) -> Result<Option<Animal>, StoreError> {
        let url = self.table_url(Some(id), &[("select", "*")])?;
        let response = self
            .authorized(self.client.patch(url))
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;
        Ok(Self::rows(response).await?.into_iter().next())
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let url = self.table_url(Some(id), &[("select", "id")])?;
        let response = self
            .authorized(self.client.delete(url))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = check(response).await?;
        let removed: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(removed.len() as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let url = self.table_url(None, &[("select", "id"), ("limit", "1")])?;
        let response = self.authorized(self.client.get(url)).send().await?;
        check(response).await?;
        Ok(())
    }
}
