//! `reqwest`-backed transport for the native CLI.

use crate::error::{DashboardError, Result};
use crate::transport::Transport;
use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::network(base_url, e))?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(path: &str, response: Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::network(path, e))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(DashboardError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get(&self, path: &str) -> Result<String> {
        debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| DashboardError::network(path, e))?;
        Self::read_body(path, response).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String> {
        debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| DashboardError::network(path, e))?;
        Self::read_body(path, response).await
    }

    async fn post_file(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        debug!("POST {} ({} bytes from {})", path, bytes.len(), file_name);
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| DashboardError::network(path, e))?;
        Self::read_body(path, response).await
    }
}
