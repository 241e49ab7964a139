// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides mod functionality for the system.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements mod

pub mod mask;
pub mod message;

pub use mask::{normalize_paths, Mask, PATH_SEPARATOR};
pub use message::{FieldValueMut, MaskableMessage, MessageList, MessageMap};
