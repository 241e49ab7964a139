// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Message Mask Filter
//!
//! Applies a [`Mask`] to a structured message **in place**, recursing
//! through nested messages, repeated fields and keyed maps, and delegating
//! opaque byte payloads that decode as JSON to
//! [`crate::application::json_filter`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Implements in-place mask application over the reflective view
//!
//! Filtering is total: no error ever escapes to the caller. Schema
//! mismatches and undecodable payloads are logged and the affected field is
//! left untouched, so a partially filtered response is always preferable to
//! a failed one.

use anyhow::Context;
use serde_json::Value;

use crate::application::json_filter;
use crate::domain::{FieldValueMut, Mask, MaskableMessage, MessageList, MessageMap};

/// Filter `message` down to the fields selected by `mask`.
///
/// An empty top-level mask means "no mask was supplied": the message is
/// returned untouched. This is deliberately a separate early return from
/// the leaf handling inside the recursion, where an empty sub-mask means
/// "include this subtree in full".
pub fn apply(mask: &Mask, message: &mut dyn MaskableMessage) {
    if mask.is_empty() {
        return;
    }
    apply_selector(mask, message);
}

/// Recursive body. `mask` is non-empty here by construction.
fn apply_selector(mask: &Mask, message: &mut dyn MaskableMessage) {
    for name in message.field_names() {
        let Some(sub) = mask.child(&name) else {
            message.clear_field(&name);
            continue;
        };
        if sub.is_empty() {
            // Terminal leaf: keep the field's value exactly as is, even if
            // it is itself composite.
            continue;
        }
        match message.field_mut(&name) {
            Some(FieldValueMut::Message(nested)) => apply_selector(sub, nested),
            Some(FieldValueMut::List(list)) => {
                // The same sub-mask applies uniformly to every element.
                for index in 0..list.len() {
                    if let Some(element) = list.element_mut(index) {
                        apply_selector(sub, element);
                    }
                }
            }
            Some(FieldValueMut::Map(map)) => filter_map_entries(sub, map),
            Some(FieldValueMut::Opaque(payload)) => {
                if let Err(error) = filter_opaque_payload(sub, payload) {
                    tracing::debug!(field = %name, %error, "leaving opaque payload unfiltered");
                }
            }
            Some(FieldValueMut::Scalar) => {
                // Caller/schema mismatch: a selector cannot decompose a
                // scalar. Non-fatal, the value stays as is.
                tracing::warn!(field = %name,
                    "field mask selects sub-fields of a scalar field");
            }
            None => {}
        }
    }
}

/// Map entries are masked by stringified map key, not by field name.
fn filter_map_entries(mask: &Mask, map: &mut dyn MessageMap) {
    for key in map.keys() {
        match mask.child(&key) {
            None => map.remove_entry(&key),
            Some(entry_mask) if entry_mask.is_empty() => {
                // Key present as a leaf: keep the whole entry.
            }
            Some(entry_mask) => {
                if let Some(entry) = map.entry_mut(&key) {
                    apply_selector(entry_mask, entry);
                }
            }
        }
    }
}

/// Parse an opaque payload as JSON, project it through the mask, and write
/// the re-encoded result back. A payload that is not valid JSON is left
/// untouched.
fn filter_opaque_payload(mask: &Mask, payload: &mut Vec<u8>) -> anyhow::Result<()> {
    let Ok(document) = serde_json::from_slice::<Value>(payload) else {
        return Ok(());
    };
    let filtered = json_filter::project(mask, &document);
    *payload = serde_json::to_vec(&filtered).context("re-encoding filtered payload")?;
    Ok(())
}
