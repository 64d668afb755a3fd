// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Reqwest adapters for the two upstream service ports.

pub mod pet_client;
pub mod store_client;

pub use pet_client::HttpPetClient;
pub use store_client::HttpStoreClient;

use crate::domain::UpstreamError;

/// Classify a transport-level reqwest failure. HTTP statuses are
/// classified by the adapters once a response arrives.
pub(crate) fn classify_transport(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Other(e.to_string())
    }
}
