//! PostgREST table client, as exposed by Supabase under `/rest/v1`.

use std::time::Duration;

use meiri_core::MeiriError;
use meiri_core::sync::{Filter, RemoteTable, Row};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::error::{RemoteError, Result, check_status};

/// Blocking client for the tables of one PostgREST endpoint.
#[derive(Clone)]
pub struct PostgrestTable {
    client: Client,
    rest_url: String,
}

impl PostgrestTable {
    /// Builds a client for the project at `project_url`
    /// (e.g. `https://xyz.supabase.co`), authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidConfig` for a non-http(s) URL or an
    /// unusable key.
    pub fn new(project_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let project_url = project_url.trim().trim_end_matches('/');
        if !(project_url.starts_with("http://") || project_url.starts_with("https://")) {
            return Err(RemoteError::InvalidConfig(format!(
                "table endpoint must be an http(s) URL, got {project_url:?}"
            )));
        }
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RemoteError::InvalidConfig("missing table API key".into()));
        }

        let invalid_key = |_| RemoteError::InvalidConfig("table API key is not a valid header".into());
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid_key)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            rest_url: format!("{project_url}/rest/v1"),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn delete_rows(&self, table: &str, filter: &Filter) -> Result<()> {
        let resp = self
            .client
            .delete(self.table_url(table))
            .query(&[filter_param(filter)])
            .send()?;
        check_status(resp)?;
        Ok(())
    }

    fn insert_row(&self, table: &str, row: &Row) -> Result<()> {
        let resp = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()?;
        check_status(resp)?;
        Ok(())
    }

    fn select_rows(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>> {
        let mut query = vec![("select".to_string(), "*".to_string()), filter_param(filter)];
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        let resp = self.client.get(self.table_url(table)).query(&query).send()?;
        Ok(check_status(resp)?.json()?)
    }
}

/// Renders a filter as a PostgREST query pair: `id=neq.0`.
fn filter_param(filter: &Filter) -> (String, String) {
    let value = match &filter.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (filter.column.clone(), format!("{}.{value}", filter.op))
}

impl RemoteTable for PostgrestTable {
    fn delete(&self, table: &str, filter: &Filter) -> meiri_core::Result<()> {
        debug!(table, column = %filter.column, "delete");
        self.delete_rows(table, filter)
            .map_err(|e| MeiriError::table(table, e))
    }

    fn insert(&self, table: &str, row: &Row) -> meiri_core::Result<()> {
        self.insert_row(table, row)
            .map_err(|e| MeiriError::table(table, e))
    }

    fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> meiri_core::Result<Vec<Row>> {
        self.select_rows(table, filter, limit)
            .map_err(|e| MeiriError::table(table, e))
    }
}
