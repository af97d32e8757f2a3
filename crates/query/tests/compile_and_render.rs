use query::{
    alias_switch_body, build_bulk_body, ordered_map, parse_filter, BulkOperation,
    BulkOperationType, Compiled, Error, Expr, ExprFlavour, OrderedMap, Pagination, SearchRequest,
};
use serde_json::json;

// === Helpers ===
fn compile_str(expr: &Expr, flavour: ExprFlavour) -> String {
    expr.compile(flavour)
        .expect("compile failed")
        .to_json_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn search_engine_node_shapes() {
    assert_eq!(
        compile_str(&Expr::equals("a", 1234), ExprFlavour::SearchEngine),
        r#"{"term":{"a":1234}}"#
    );
    assert_eq!(
        compile_str(
            &Expr::interval("a", Some(10), false, Some(15), false),
            ExprFlavour::SearchEngine
        ),
        r#"{"range":{"a":{"gt":10,"lt":15}}}"#
    );
    assert_eq!(
        compile_str(&Expr::wildcard("field", "Ad Ba"), ExprFlavour::SearchEngine),
        concat!(
            r#"[{"wildcard":{"field":{"value":"*Ad*","case_insensitive":true}}},"#,
            r#"{"wildcard":{"field":{"value":"*Ba*","case_insensitive":true}}}]"#
        )
    );
    assert_eq!(
        compile_str(
            &Expr::terms("activity", ["activity1", "activity2"]),
            ExprFlavour::SearchEngine
        ),
        r#"{"terms":{"activity":["activity1","activity2"]}}"#
    );
}

#[test]
fn and_merges_for_doc_store_and_flattens_for_search_engine() {
    let merged = Expr::and([Expr::equals("a", 1234), Expr::equals("b", 5678)]);
    assert_eq!(
        compile_str(&merged, ExprFlavour::DocStore),
        r#"{"a":1234,"b":5678}"#
    );

    let flat = Expr::and([Expr::equals("a", 1234), Expr::text_match("b", "5678")]);
    assert_eq!(
        compile_str(&flat, ExprFlavour::SearchEngine),
        r#"[{"term":{"a":1234}},{"match":{"b":"5678"}}]"#
    );
}

#[test]
fn unsupported_nodes_report_node_and_flavour() {
    let err = Expr::text_match("b", "x")
        .compile(ExprFlavour::DocStore)
        .unwrap_err();
    match err {
        Error::UnsupportedOperation { node, flavour } => {
            assert_eq!(node, "Match");
            assert_eq!(flavour, ExprFlavour::DocStore);
        }
        other => panic!("expected UnsupportedOperation, got {:?}", other),
    }
}

#[test]
fn compile_is_idempotent() {
    let e = Expr::and([
        Expr::equals("a", 1),
        Expr::wildcard("n", "x y"),
        Expr::interval("t", Some(1.5), true, None, false),
    ]);
    let first = e.compile(ExprFlavour::SearchEngine).unwrap();
    let second = e.compile(ExprFlavour::SearchEngine).unwrap();
    assert_eq!(first, second);
    assert!(matches!(first, Compiled::Seq(ref s) if s.len() == 4));
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn mixed_scalars_render_in_insertion_order() {
    let m: OrderedMap = ordered_map! {
        "a" => 1234,
        "b" => 12.34,
        "c" => true,
        "d" => "abcdefgh",
    };
    assert_eq!(
        m.to_json_string(),
        r#"{"a":1234,"b":1.234e+01,"c":true,"d":"abcdefgh"}"#
    );

    let parsed: serde_json::Value = serde_json::from_slice(&m.render()).unwrap();
    assert_eq!(parsed, json!({ "a": 1234, "b": 12.34, "c": true, "d": "abcdefgh" }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter → search body
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parsed_filter_becomes_search_body() {
    let filter = parse_filter(&json!({
        "kind": "post",
        "views": { "$gte": 10, "$lt": 100 },
        "title": { "$wildcard": "rust cms" }
    }))
    .unwrap();

    assert_eq!(filter.idents(), vec!["kind", "views", "title"]);

    let body = SearchRequest::new(filter)
        .sort("-views")
        .paginate(Pagination { from: 0, size: 20 })
        .render()
        .unwrap();

    assert_eq!(
        String::from_utf8(body).unwrap(),
        concat!(
            r#"{"query":{"bool":{"must":["#,
            r#"{"term":{"kind":"post"}},"#,
            r#"{"range":{"views":{"gte":10,"lt":100}}},"#,
            r#"{"wildcard":{"title":{"value":"*rust*","case_insensitive":true}}},"#,
            r#"{"wildcard":{"title":{"value":"*cms*","case_insensitive":true}}}"#,
            r#"]}},"sort":[{"views":{"order":"desc"}}],"from":0,"size":20}"#
        )
    );
}

#[test]
fn doc_store_and_stops_at_first_unsupported_child() {
    let filter = parse_filter(&json!({ "a": 1, "b": { "$gt": 2 } })).unwrap();
    assert_eq!(
        compile_str(&filter, ExprFlavour::DocStore),
        r#"{"a":1,"b":{"$gt":2}}"#
    );

    let nested = Expr::and([Expr::equals("a", 1), Expr::wildcard("b", "x")]);
    let err = nested.compile(ExprFlavour::DocStore).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation { node: "Wildcard", .. }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bulk_and_alias_bodies() {
    let ops = [
        BulkOperation::new(
            BulkOperationType::Index,
            "orders-v3",
            "o-1",
            Some(json!({ "total": 10 })),
        ),
        BulkOperation::new(BulkOperationType::Delete, "orders-v3", "o-2", None),
    ];
    let mut buf = Vec::new();
    build_bulk_body(&ops, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        concat!(
            "{\"index\":{\"_id\":\"o-1\",\"_index\":\"orders-v3\"}}\n",
            "{\"total\":10}\n",
            "{\"delete\":{\"_id\":\"o-2\",\"_index\":\"orders-v3\"}}\n",
        )
    );

    let parsed: serde_json::Value =
        serde_json::from_slice(&alias_switch_body("orders", "orders-v3", "orders-v2").render())
            .unwrap();
    assert_eq!(
        parsed,
        json!({ "actions": [
            { "add": { "index": "orders-v3", "alias": "orders" } },
            { "remove": { "index": "orders-v2", "alias": "orders" } }
        ] })
    );
}
