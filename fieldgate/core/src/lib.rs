// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! FIELDGATE Core
//!
//! Partial-response filtering engine: builds a field mask from dotted path
//! lists and applies it to structured response messages and embedded JSON
//! payloads.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Implements the mask data model and the filtering services

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
