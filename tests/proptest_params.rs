//! Property-based tests using proptest
//!
//! These tests verify parameter validation, path encoding, page decoding and
//! cursor pagination using randomized inputs.

use affinity::resource::{get_operation, validate, CursorPager, Page};
use futures::StreamExt;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Generate page layouts: item counts per page, at least one page
fn arb_page_layout() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..20, 1..8)
}

proptest! {
    /// Any integer ID is accepted and lands in the path verbatim
    #[test]
    fn integer_ids_render_into_path(id in any::<i64>()) {
        let def = get_operation("get_person").unwrap();
        let normalized = validate("get_person", def, &args(json!({"person_id": id}))).unwrap();
        prop_assert_eq!(normalized.render_path(&def.path), format!("/persons/{}", id));
    }

    /// Integer parameters never coerce strings
    #[test]
    fn string_ids_are_rejected(id in "[0-9a-z]{1,12}") {
        let def = get_operation("get_organization").unwrap();
        let err = validate("get_organization", def, &args(json!({"organization_id": id}))).unwrap_err();
        prop_assert!(err.has_field("organization_id"));
    }

    /// Booleans become lowercase query strings
    #[test]
    fn booleans_render_lowercase(flag in any::<bool>()) {
        let def = get_operation("get_person").unwrap();
        let normalized = validate(
            "get_person",
            def,
            &args(json!({"person_id": 1, "with_opportunities": flag})),
        )
        .unwrap();
        let expected = if flag { "true" } else { "false" };
        prop_assert_eq!(normalized.query_value("with_opportunities"), Some(expected));
    }

    /// Keys the operation does not declare are always reported
    #[test]
    fn unknown_keys_are_rejected(key in "x_[a-z]{1,10}") {
        let def = get_operation("list_persons").unwrap();
        let mut unknown = Map::new();
        unknown.insert(key.clone(), json!(1));
        let err = validate("list_persons", def, &unknown).unwrap_err();
        prop_assert!(err.has_field(&key));
    }

    /// Path segments are encoded so they cannot add path components
    #[test]
    fn path_segments_round_trip(id in "[ -~]{1,30}") {
        let def = get_operation("get_webhook").unwrap();
        let normalized = validate(
            "get_webhook",
            def,
            &args(json!({"webhook_subscription_id": id.clone()})),
        )
        .unwrap();

        let path = normalized.render_path(&def.path);
        let segment = path.strip_prefix("/webhook/").unwrap();
        prop_assert!(!segment.contains('/'));
        prop_assert!(!segment.contains('?'));
        prop_assert_eq!(urlencoding::decode(segment).unwrap().into_owned(), id);
    }

    /// Decoding keeps every item and only non-empty cursors
    #[test]
    fn page_decoding(ids in prop::collection::vec(any::<i64>(), 0..50), token in proptest::option::of("[a-zA-Z0-9]{0,16}")) {
        let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        let page = Page::from_response(
            json!({"persons": items.clone(), "next_page_token": token.clone()}),
            "persons",
        )
        .unwrap();

        prop_assert_eq!(page.items, items);
        prop_assert_eq!(page.next_page_token, token.filter(|t| !t.is_empty()));
    }

    /// The pager yields every item in order with one fetch per page
    #[test]
    fn pager_concatenates_pages(layout in arb_page_layout()) {
        let mut pages = Vec::new();
        let mut next = 0u32;
        for (i, count) in layout.iter().enumerate() {
            let items: Vec<u32> = (next..next + *count as u32).collect();
            next += *count as u32;
            let cursor = (i + 1 < layout.len()).then(|| format!("cursor-{}", i + 1));
            pages.push(Page::new(items, cursor));
        }

        let pages = Arc::new(pages);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fetch_pages = pages.clone();
        let fetch_calls = calls.clone();

        let pager = CursorPager::new(move |cursor: Option<String>| {
            let pages = fetch_pages.clone();
            let calls = fetch_calls.clone();
            async move {
                let index = {
                    let mut calls = calls.lock().unwrap();
                    calls.push(cursor);
                    calls.len() - 1
                };
                let page = pages.get(index).cloned();
                page.ok_or_else(|| "fetched past the last page".to_string())
            }
        });

        let items: Vec<Result<u32, String>> = tokio_test::block_on(pager.collect());
        let expected: Vec<Result<u32, String>> = (0..next).map(Ok).collect();
        prop_assert_eq!(items, expected);

        let calls = calls.lock().unwrap();
        prop_assert_eq!(calls.len(), layout.len());
        prop_assert_eq!(calls[0].as_deref(), None);
        for (i, cursor) in calls.iter().enumerate().skip(1) {
            prop_assert_eq!(cursor.clone(), Some(format!("cursor-{}", i)));
        }
    }
}
