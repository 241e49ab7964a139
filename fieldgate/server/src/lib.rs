// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! FIELDGATE Server Integration
//!
//! Transport-side glue for partial-response filtering: extracting field
//! masks from inbound gRPC metadata, a response-stage hook that applies
//! the mask to a unary handler's response, and an axum middleware that
//! gives REST clients the same semantics through a `fields` query
//! parameter.
//!
//! # Architecture
//!
//! - **Layer:** Presentation Layer
//! - **Purpose:** Implements the system-boundary adapters around fieldgate-core

pub mod gateway;
pub mod interceptor;
pub mod metadata;

pub use interceptor::{MaybeMaskable, ResponseFilter};
pub use metadata::{fields_header_values, mask_from_metadata, FIELDS_METADATA_KEY};
