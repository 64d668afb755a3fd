// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::Deserialize;

use super::classify_transport;
use crate::domain::{Pet, PetClient, PetStatus, UpstreamError};

/// Reqwest-backed adapter for the upstream pet service.
pub struct HttpPetClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PetPayload {
    id: i64,
    name: String,
    status: PetStatus,
}

impl HttpPetClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PetClient for HttpPetClient {
    async fn pet_by_id(&self, id: i64) -> Result<Pet, UpstreamError> {
        let url = format!("{}/pet/{}", self.base_url.trim_end_matches('/'), id);

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

        let payload: PetPayload = response
            .json()
            .await
            .map_err(|e| UpstreamError::Other(format!("failed to parse pet payload: {}", e)))?;

        Ok(Pet {
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
    async fn parses_pet_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pet/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"name":"Doggo","status":"available"}"#)
            .create_async()
            .await;

        let client = HttpPetClient::new(reqwest::Client::new(), server.url());
        let pet = client.pet_by_id(1).await.unwrap();

        assert_eq!(pet.id, 1);
        assert_eq!(pet.name, "Doggo");
        assert_eq!(pet.status, PetStatus::Available);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/pet/404")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpPetClient::new(reqwest::Client::new(), server.url());
        let err = client.pet_by_id(404).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn maps_5xx_to_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/pet/1")
            .with_status(503)
            .with_body("upstream overloaded")
            .create_async()
            .await;

        let client = HttpPetClient::new(reqwest::Client::new(), server.url());
        let err = client.pet_by_id(1).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ServerError);
    }

    #[tokio::test]
    async fn malformed_payload_is_other() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/pet/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpPetClient::new(reqwest::Client::new(), server.url());
        let err = client.pet_by_id(1).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
