// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod features;

pub use features::{FeatureGateError, FeatureGates, PARTIAL_RESPONSE};
