// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Upstream Client Ports (Anti-Corruption Layer)
//
// Domain interfaces for the two upstream services, one per leg of the
// aggregate. Implementations live in infrastructure/http/.

use async_trait::async_trait;

use super::pet::Pet;
use super::store::Store;

/// Classification assigned to a failed upstream attempt.
///
/// Assigned once when the attempt fails and never reclassified later;
/// the per-leg retry filters decide eligibility from this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream answered that the entity does not exist. Terminal on
    /// both legs, never retried, always surfaced to the caller.
    NotFound,
    /// Upstream answered with a 5xx.
    ServerError,
    /// No response before the attempt deadline.
    Timeout,
    /// Any other technical or connectivity failure.
    Other,
}

/// Errors surfaced by the upstream client ports.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("entity not found upstream")]
    NotFound,

    #[error("upstream server error: {0}")]
    Server(String),

    #[error("no response within the attempt deadline")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Other(String),
}

impl UpstreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpstreamError::NotFound => ErrorKind::NotFound,
            UpstreamError::Server(_) => ErrorKind::ServerError,
            UpstreamError::Timeout => ErrorKind::Timeout,
            UpstreamError::Other(_) => ErrorKind::Other,
        }
    }
}

/// Port for the upstream pet service.
#[async_trait]
pub trait PetClient: Send + Sync {
    /// Fetch one pet by id. One logical network call per invocation.
    async fn pet_by_id(&self, id: i64) -> Result<Pet, UpstreamError>;
}

/// Port for the upstream store service.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetch one store by id. One logical network call per invocation.
    async fn store_by_id(&self, id: i64) -> Result<Store, UpstreamError>;
}
