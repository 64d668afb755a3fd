// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::Deserialize;

use super::classify_transport;
use crate::domain::{Store, StoreClient, StoreStatus, UpstreamError};

/// Reqwest-backed adapter for the upstream store service.
pub struct HttpStoreClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct StorePayload {
    id: i64,
    name: String,
    status: StoreStatus,
}

impl HttpStoreClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    async fn store_by_id(&self, id: i64) -> Result<Store, UpstreamError> {
        let url = format!("{}/store/{}", self.base_url.trim_end_matches('/'), id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Server(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Other(format!("HTTP {}: {}", status, body)));
        }

        let payload: StorePayload = response
            .json()
            .await
            .map_err(|e| UpstreamError::Other(format!("failed to parse store payload: {}", e)))?;

        Ok(Store {
            id: payload.id,
            name: payload.name,
            status: payload.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[tokio::test]
    async fn parses_store_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/store/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"name":"Main Street","status":"open"}"#)
            .create_async()
            .await;

        let client = HttpStoreClient::new(reqwest::Client::new(), server.url());
        let store = client.store_by_id(1).await.unwrap();

        assert_eq!(store.id, 1);
        assert_eq!(store.name, "Main Street");
        assert_eq!(store.status, StoreStatus::Open);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/store/9")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpStoreClient::new(reqwest::Client::new(), server.url());
        let err = client.store_by_id(9).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn maps_5xx_to_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/store/1")
            .with_status(500)
            .create_async()
            .await;

        let client = HttpStoreClient::new(reqwest::Client::new(), server.url());
        let err = client.store_by_id(1).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ServerError);
    }
}
