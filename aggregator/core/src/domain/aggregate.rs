// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::Serialize;

use super::pet::Pet;
use super::store::Store;

/// Sentinel substituted for both name slots when the aggregate
/// resolves via fallback.
pub const FALLBACK_NAME: &str = "Unknown (Service Unavailable)";

/// Sentinel substituted for both status slots when the aggregate
/// resolves via fallback.
pub const FALLBACK_STATUS: &str = "N/A";

/// Composite response assembled from both upstream legs.
///
/// Real values and sentinel values are indistinguishable in shape:
/// both serialize to the same four fields and both are served as 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedInfo {
    pub pet_name: String,
    pub pet_status: String,
    pub store_name: String,
    pub store_status: String,
}

impl AggregatedInfo {
    pub fn from_entities(pet: &Pet, store: &Store) -> Self {
        Self {
            pet_name: pet.name.clone(),
            pet_status: pet.status.as_str().to_string(),
            store_name: store.name.clone(),
            store_status: store.status.as_str().to_string(),
        }
    }

    /// Sentinel-filled composite. Fallback is all-or-nothing: both
    /// legs' fields are substituted, never one side alone.
    pub fn fallback() -> Self {
        Self {
            pet_name: FALLBACK_NAME.to_string(),
            pet_status: FALLBACK_STATUS.to_string(),
            store_name: FALLBACK_NAME.to_string(),
            store_status: FALLBACK_STATUS.to_string(),
        }
    }
}

/// Terminal domain error for an aggregate call. Mapped to a 404 by
/// the HTTP layer; everything else is absorbed into the fallback
/// composite before it reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("{label} with ID {id} not found")]
    NotFound { label: &'static str, id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::PetStatus;
    use crate::domain::store::StoreStatus;

    #[test]
    fn composes_wire_values_from_entities() {
        let pet = Pet {
            id: 1,
            name: "Doggo".to_string(),
            status: PetStatus::Available,
        };
        let store = Store {
            id: 1,
            name: "Main Street".to_string(),
            status: StoreStatus::Open,
        };

        let info = AggregatedInfo::from_entities(&pet, &store);
        assert_eq!(info.pet_name, "Doggo");
        assert_eq!(info.pet_status, "available");
        assert_eq!(info.store_name, "Main Street");
        assert_eq!(info.store_status, "open");
    }

    #[test]
    fn fallback_fills_every_slot() {
        let info = AggregatedInfo::fallback();
        assert_eq!(info.pet_name, FALLBACK_NAME);
        assert_eq!(info.pet_status, FALLBACK_STATUS);
        assert_eq!(info.store_name, FALLBACK_NAME);
        assert_eq!(info.store_status, FALLBACK_STATUS);
    }

    #[test]
    fn not_found_message_names_label_and_id() {
        let err = AggregateError::NotFound {
            label: "Pet",
            id: 404,
        };
        assert_eq!(err.to_string(), "Pet with ID 404 not found");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let value = serde_json::to_value(AggregatedInfo::fallback()).unwrap();
        assert!(value.get("petName").is_some());
        assert!(value.get("petStatus").is_some());
        assert!(value.get("storeName").is_some());
        assert!(value.get("storeStatus").is_some());
    }
}
