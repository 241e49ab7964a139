// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Metadata Mask Adapter
//!
//! Bridges inbound gRPC request metadata to the core mask builder. Every
//! occurrence of the `fields` metadata key is pooled; splitting, trimming
//! and normalization happen in `fieldgate-core` so they stay testable
//! without a transport in the loop.

use fieldgate_core::Mask;
use tonic::metadata::MetadataMap;

/// Metadata key carrying comma-separated dotted field paths.
///
/// The REST gateway copies the `fields` query parameter into this same key
/// (see [`crate::gateway`]), so both ingress paths share one adapter.
pub const FIELDS_METADATA_KEY: &str = "fields";

/// All `fields` header values present on the request, in order.
///
/// Values that are not valid ASCII are skipped; the metadata layer should
/// never have let them through, and a missing path list must not fail the
/// call.
pub fn fields_header_values(metadata: &MetadataMap) -> Vec<String> {
    metadata
        .get_all(FIELDS_METADATA_KEY)
        .iter()
        .filter_map(|value| value.to_str().ok().map(str::to_owned))
        .collect()
}

/// Build the request's field mask from its metadata.
///
/// Returns the empty pass-through mask when no `fields` key is present.
pub fn mask_from_metadata(metadata: &MetadataMap) -> Mask {
    Mask::from_header_values(fields_header_values(metadata))
}
