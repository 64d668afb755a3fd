// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Resilient Aggregation Pipeline
//
// Runs the pet and store legs concurrently, bounds every upstream
// attempt with a fixed deadline, retries with a fixed delay under a
// per-leg error filter, and composes exactly one outcome: the real
// composite, the sentinel composite, or a terminal not-found error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::{
    AggregateError, AggregatedInfo, ErrorKind, PetClient, StoreClient, UpstreamError,
};
use crate::infrastructure::metrics::FallbackCounter;

/// Deadline applied to every individual upstream attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(3);

/// Total attempts per leg, first call included.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed wait between consecutive attempts on the same leg.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

const PET_LABEL: &str = "Pet";
const STORE_LABEL: &str = "Store";

/// Which classified errors a leg is allowed to retry.
///
/// Not-found is handled before the filter is consulted and is never
/// retried on either leg.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    retry_on: fn(ErrorKind) -> bool,
}

impl RetryPolicy {
    /// Pet-leg policy: only server errors and timeouts are retried.
    pub fn server_errors_and_timeouts() -> Self {
        Self {
            retry_on: |kind| matches!(kind, ErrorKind::ServerError | ErrorKind::Timeout),
        }
    }

    /// Store-leg policy: every technical error is retried.
    pub fn any_technical_error() -> Self {
        Self { retry_on: |_| true }
    }

    fn allows(&self, kind: ErrorKind) -> bool {
        (self.retry_on)(kind)
    }
}

/// How one leg resolved when it did not produce an entity.
#[derive(Debug)]
enum LegFailure {
    /// Surfaced to the caller as-is; aborts the whole aggregate.
    NotFound { label: &'static str, id: i64 },
    /// Terminal after retries; absorbed into the sentinel composite.
    Technical {
        label: &'static str,
        id: i64,
        error: UpstreamError,
    },
}

/// Run one resilient leg to completion.
///
/// `fetch` must produce a fresh future per call: every retry is a new
/// upstream invocation observing current upstream state, never a
/// replay of an earlier in-flight call.
async fn run_leg<T, F, Fut>(
    label: &'static str,
    id: i64,
    policy: RetryPolicy,
    fetch: F,
) -> Result<T, LegFailure>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let mut last_error = None;

    for attempt in 1..=MAX_ATTEMPTS {
        if attempt > 1 {
            tokio::time::sleep(RETRY_DELAY).await;
        }

        let outcome = match tokio::time::timeout(ATTEMPT_TIMEOUT, fetch()).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };

        match outcome {
            Ok(entity) => {
                if attempt > 1 {
                    info!(leg = label, id, attempt, "leg recovered after retry");
                }
                return Ok(entity);
            }
            Err(UpstreamError::NotFound) => {
                info!(leg = label, id, "entity not found upstream");
                return Err(LegFailure::NotFound { label, id });
            }
            Err(e) => {
                warn!(
                    leg = label,
                    id,
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    error = %e,
                    "leg attempt failed"
                );
                let kind = e.kind();
                last_error = Some(e);
                if !policy.allows(kind) {
                    break;
                }
            }
        }
    }

    let error =
        last_error.unwrap_or_else(|| UpstreamError::Other("leg produced no outcome".into()));
    Err(LegFailure::Technical { label, id, error })
}

/// Joins the two upstream legs into one composite response.
pub struct AggregationService {
    pets: Arc<dyn PetClient>,
    stores: Arc<dyn StoreClient>,
    fallbacks: Arc<FallbackCounter>,
}

impl AggregationService {
    pub fn new(
        pets: Arc<dyn PetClient>,
        stores: Arc<dyn StoreClient>,
        fallbacks: Arc<FallbackCounter>,
    ) -> Self {
        Self {
            pets,
            stores,
            fallbacks,
        }
    }

    /// Aggregate one pet and one store into a single response.
    ///
    /// Both legs run concurrently, so overall latency is bounded by
    /// the slower leg. A not-found on either leg aborts the whole
    /// call and surfaces as [`AggregateError::NotFound`], even when
    /// the sibling leg succeeded. Any other terminal failure yields
    /// the sentinel composite, discarding the sibling's value, and
    /// bumps the fallback counter exactly once for the call.
    pub async fn aggregate(
        &self,
        pet_id: i64,
        store_id: i64,
    ) -> Result<AggregatedInfo, AggregateError> {
        let pet_leg = run_leg(
            PET_LABEL,
            pet_id,
            RetryPolicy::server_errors_and_timeouts(),
            || self.pets.pet_by_id(pet_id),
        );
        let store_leg = run_leg(
            STORE_LABEL,
            store_id,
            RetryPolicy::any_technical_error(),
            || self.stores.store_by_id(store_id),
        );

        let (pet, store) = tokio::join!(pet_leg, store_leg);

        match (pet, store) {
            (Ok(pet), Ok(store)) => Ok(AggregatedInfo::from_entities(&pet, &store)),
            (Err(LegFailure::NotFound { label, id }), _)
            | (_, Err(LegFailure::NotFound { label, id })) => {
                Err(AggregateError::NotFound { label, id })
            }
            (pet, store) => {
                for failure in [pet.err(), store.err()].into_iter().flatten() {
                    if let LegFailure::Technical { label, id, error } = failure {
                        error!(leg = label, id, error = %error, "final technical error after retries");
                    }
                }
                self.fallbacks.increment();
                Ok(AggregatedInfo::fallback())
            }
        }
    }
}
