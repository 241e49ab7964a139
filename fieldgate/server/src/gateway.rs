// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! REST Gateway Bridge
//!
//! REST clients ask for partial responses with a `fields` URL query
//! parameter. This middleware copies that parameter verbatim into the
//! `fields` request header before the request reaches the gRPC translation
//! layer, so the gateway needs no filtering logic of its own and both
//! ingress paths share [`crate::metadata::mask_from_metadata`].

use axum::extract::{Query, Request};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;

use crate::metadata::FIELDS_METADATA_KEY;

/// URL query parameter naming the requested field paths.
pub const FIELDS_QUERY_PARAM: &str = "fields";

#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    fields: Option<String>,
}

/// Axum middleware: propagate `?fields=` into the `fields` header.
///
/// An existing `fields` header is overwritten; the query parameter is the
/// REST surface of record. A parameter value that cannot be represented as
/// a header value is dropped, never an error, matching the hook's
/// never-fail-the-call posture.
pub async fn propagate_fields_param(
    Query(query): Query<FieldsQuery>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(fields) = query.fields {
        match HeaderValue::from_str(&fields) {
            Ok(value) => {
                request.headers_mut().insert(FIELDS_METADATA_KEY, value);
            }
            Err(error) => {
                tracing::debug!(%error, "dropping fields query parameter that is not a valid header value");
            }
        }
    }
    next.run(request).await
}
