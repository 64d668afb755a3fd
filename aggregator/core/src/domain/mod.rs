// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod aggregate;
pub mod pet;
pub mod store;
pub mod upstream;

pub use aggregate::*;
pub use pet::*;
pub use store::*;
pub use upstream::*;
