// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! JSON Mask Projection
//!
//! Applies a [`Mask`] to an already-parsed JSON value. Unlike the in-place
//! message filter, JSON inputs are read-only: the mask is walked and a new,
//! smaller object is projected out of the original document, mirroring the
//! path extractor's traversal rather than the clear-by-absence rule.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Implements mask projection over `serde_json::Value`

use serde_json::{Map, Value};

use crate::domain::Mask;

/// Project `root` through `mask`, producing a new JSON object.
///
/// The output mirrors the mask's shape: selector nodes become nested
/// objects, and each terminal leaf is resolved by descending the original
/// document from its root along the leaf's full dotted path. A lookup that
/// falls off the document yields `null`, so the output object's key set
/// always equals the mask's key set at every level.
///
/// This function is only reached once a caller has established a non-empty
/// selector; an empty mask here naturally projects an empty object, it does
/// not mean "pass everything through".
pub fn project(mask: &Mask, root: &Value) -> Value {
    let mut path = Vec::new();
    project_at(mask, root, &mut path)
}

fn project_at(mask: &Mask, root: &Value, path: &mut Vec<String>) -> Value {
    let mut out = Map::new();
    for (name, child) in mask.iter() {
        path.push(name.to_owned());
        let projected = if child.is_empty() {
            lookup(root, path).cloned().unwrap_or(Value::Null)
        } else {
            project_at(child, root, path)
        };
        out.insert(name.to_owned(), projected);
        path.pop();
    }
    Value::Object(out)
}

/// Descend through nested objects along `path`, starting at the document
/// root.
fn lookup<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mask;
    use serde_json::json;

    #[test]
    fn leaf_keeps_whole_subtree() {
        let document = json!({"a": {"b": {"c": "v", "d": 7}}, "e": true});
        let mask = Mask::from_paths(["a.b"]);
        let projected = project(&mask, &document);
        assert_eq!(projected, json!({"a": {"b": {"c": "v", "d": 7}}}));
    }

    #[test]
    fn selector_projects_named_sub_fields_only() {
        let document = json!({"a": {"b": {"c": "v"}, "x": 1}, "e": true});
        let mask = Mask::from_paths(["a.b.c"]);
        let projected = project(&mask, &document);
        assert_eq!(projected, json!({"a": {"b": {"c": "v"}}}));
    }

    #[test]
    fn missing_lookup_projects_null() {
        let document = json!({"a": {"b": 1}});
        let mask = Mask::from_paths(["a.z", "q"]);
        let projected = project(&mask, &document);
        assert_eq!(projected, json!({"a": {"z": null}, "q": null}));
    }

    #[test]
    fn output_key_set_matches_mask_key_set() {
        let document = json!({"present": 1});
        let mask = Mask::from_paths(["present", "absent.deep", "other"]);
        let projected = project(&mask, &document);
        let object = projected.as_object().unwrap();
        let mut keys: Vec<&String> = object.keys().collect();
        keys.sort();
        assert_eq!(keys, ["absent", "other", "present"]);
    }

    #[test]
    fn total_on_non_object_documents() {
        // Descending into a non-object just misses; nothing panics.
        let mask = Mask::from_paths(["a.b"]);
        for document in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let projected = project(&mask, &document);
            assert_eq!(projected, json!({"a": {"b": null}}));
        }
    }
}
