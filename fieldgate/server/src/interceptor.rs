// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Response Filter Hook
//!
//! The single choke-point through which unary responses pass on their way
//! back to the transport layer. When the `partial-response` gate is on and
//! the request carried a `fields` path list, the response message is
//! filtered in place before serialization; in every other case the
//! handler's result is returned byte-for-byte unchanged.
//!
//! Filtering can never fail the RPC. The core filter is total by design,
//! and every skip condition here degrades to "return the response as the
//! handler produced it".

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tonic::{Request, Response, Status};

use fieldgate_core::application::message_filter;
use fieldgate_core::infrastructure::{FeatureGates, PARTIAL_RESPONSE};
use fieldgate_core::{Mask, MaskableMessage};

use crate::metadata::fields_header_values;

/// Recognition trait for response types.
///
/// The hook is generic over the response, so types that cannot be filtered
/// (streams, raw byte responses, third-party messages without a reflective
/// view) implement this with the default body and pass through untouched.
pub trait MaybeMaskable {
    /// The message's maskable view, if it has one.
    fn as_maskable(&mut self) -> Option<&mut dyn MaskableMessage> {
        None
    }
}

/// Response-stage wrapper around a unary request handler.
///
/// Holds an explicit shared handle to the `partial-response` gate rather
/// than consulting any global state, so independent instances (and tests)
/// can carry independent flags. The flag is read once per request with
/// relaxed ordering; a toggle racing an in-flight request may be observed
/// either way.
pub struct ResponseFilter {
    enabled: Arc<AtomicBool>,
}

impl ResponseFilter {
    /// Build a hook from a shared gate handle.
    pub fn new(enabled: Arc<AtomicBool>) -> Self {
        Self { enabled }
    }

    /// Build a hook wired to the `partial-response` gate of `gates`.
    ///
    /// A registry without that gate produces a hook that is permanently
    /// disabled rather than an error.
    pub fn from_gates(gates: &FeatureGates) -> Self {
        let enabled = gates
            .handle(PARTIAL_RESPONSE)
            .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
        Self { enabled }
    }

    /// Invoke `handler` and filter its response.
    ///
    /// The response is returned unchanged when any of the following holds:
    /// the handler errored, the gate is off, the request carried no
    /// `fields` metadata, the response exposes no maskable view, or the
    /// built mask is empty.
    pub async fn run<ReqT, RespT, H, Fut>(
        &self,
        request: Request<ReqT>,
        handler: H,
    ) -> Result<Response<RespT>, Status>
    where
        RespT: MaybeMaskable,
        H: FnOnce(Request<ReqT>) -> Fut,
        Fut: Future<Output = Result<Response<RespT>, Status>>,
    {
        // Captured before the handler consumes the request.
        let header_values = fields_header_values(request.metadata());

        let mut response = handler(request).await?;

        if !self.enabled.load(Ordering::Relaxed) || header_values.is_empty() {
            return Ok(response);
        }
        let Some(message) = response.get_mut().as_maskable() else {
            return Ok(response);
        };
        let mask = Mask::from_header_values(&header_values);
        if mask.is_empty() {
            return Ok(response);
        }
        message_filter::apply(&mask, message);
        tracing::debug!(mask = %mask, "applied partial-response mask");
        Ok(response)
    }
}
