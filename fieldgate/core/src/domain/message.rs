// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Reflective Message View
//!
//! Capability traits through which the filtering engine sees a structured
//! response message: field enumeration, mutable per-field access by kind,
//! and field clearing. The engine depends only on these traits, never on a
//! concrete schema system, so it can be exercised against hand-built
//! in-memory fixtures as well as generated protobuf types.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the seam between the engine and message schemas

use std::collections::{BTreeMap, HashMap};

/// Mutable view of a single message field, tagged by kind.
///
/// `Scalar` carries no handle: the engine never rewrites scalar values, it
/// only keeps or clears them. Adding a new composite kind here requires
/// exactly one new match arm in
/// [`crate::application::message_filter::apply`].
pub enum FieldValueMut<'a> {
    /// Leaf value with no further structure.
    Scalar,
    /// Nested structured message.
    Message(&'a mut dyn MaskableMessage),
    /// Ordered sequence of messages.
    List(&'a mut dyn MessageList),
    /// Keyed collection of messages.
    Map(&'a mut dyn MessageMap),
    /// Raw byte payload that may, by convention, hold a UTF-8 JSON document
    /// unrelated to the enclosing message's own schema.
    Opaque(&'a mut Vec<u8>),
}

/// A structured message the engine can filter in place.
pub trait MaskableMessage {
    /// Names of the fields currently present on the message.
    fn field_names(&self) -> Vec<String>;

    /// Mutable view of the named field, or `None` when absent.
    fn field_mut(&mut self, name: &str) -> Option<FieldValueMut<'_>>;

    /// Remove the named field from the message.
    fn clear_field(&mut self, name: &str);
}

/// Ordered sequence of messages (a repeated field).
pub trait MessageList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn MaskableMessage>;
}

/// Keyed collection of messages (a map field). Keys are the stringified map
/// keys, not field names.
pub trait MessageMap {
    fn keys(&self) -> Vec<String>;

    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn MaskableMessage>;

    fn remove_entry(&mut self, key: &str);
}

impl<M: MaskableMessage> MessageList for Vec<M> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn MaskableMessage> {
        self.get_mut(index)
            .map(|element| element as &mut dyn MaskableMessage)
    }
}

impl<M: MaskableMessage> MessageMap for HashMap<String, M> {
    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn MaskableMessage> {
        self.get_mut(key)
            .map(|entry| entry as &mut dyn MaskableMessage)
    }

    fn remove_entry(&mut self, key: &str) {
        self.remove(key);
    }
}

impl<M: MaskableMessage> MessageMap for BTreeMap<String, M> {
    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn MaskableMessage> {
        self.get_mut(key)
            .map(|entry| entry as &mut dyn MaskableMessage)
    }

    fn remove_entry(&mut self, key: &str) {
        self.remove(key);
    }
}
