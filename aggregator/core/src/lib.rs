// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Pet/store aggregator core.
//!
//! Backend-for-frontend that fetches a pet and a store from two
//! independent upstream services and composes them into one response.
//!
//! # Architecture
//!
//! - **domain** — entities, upstream client ports, error taxonomy
//! - **application** — resilient legs (timeout, fixed-delay retry,
//!   error classification) and the join/fallback composition
//! - **infrastructure** — reqwest adapters and the fallback counter
//! - **presentation** — axum HTTP surface

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
