use chartcore::{
    ActionError, Chart, ChartError, ChartView, CrawlTrace, Edge, Guard, Node, NodeKind, Value,
};

fn constant(name: &str, value: i64) -> Node {
    Node::from_fn(name, move |_| Ok(Value::from(value)))
}

#[test]
fn add_node_rejects_duplicate_name() {
    let mut chart = Chart::new("dupes");
    chart.add_node(constant("a", 1)).unwrap();

    let err = chart.add_node(constant("a", 2)).unwrap_err();
    assert!(matches!(err, ChartError::DuplicateName(name) if name == "a"));

    // The rejected node did not replace the original.
    assert_eq!(chart.len(), 1);
}

#[test]
fn node_names_are_case_sensitive() {
    let mut chart = Chart::new("case");
    chart.add_node(constant("a", 1)).unwrap();
    chart.add_node(constant("A", 2)).unwrap();
    assert_eq!(chart.len(), 2);
}

#[test]
fn add_edge_rejects_unknown_target() {
    let mut chart = Chart::new("dangling");
    chart.add_node(constant("a", 1)).unwrap();

    let err = chart.add_edge(Edge::always("a", "z")).unwrap_err();
    assert!(matches!(err, ChartError::UnknownNode(name) if name == "z"));
    assert!(chart.outgoing("a").unwrap().is_empty());
}

#[test]
fn add_edge_rejects_unknown_source() {
    let mut chart = Chart::new("dangling");
    chart.add_node(constant("a", 1)).unwrap();

    let err = chart.add_edge(Edge::always("z", "a")).unwrap_err();
    assert!(matches!(err, ChartError::UnknownNode(name) if name == "z"));
}

#[test]
fn get_node_unknown_name() {
    let chart = Chart::new("empty");
    let err = chart.get_node("missing").unwrap_err();
    assert!(matches!(err, ChartError::UnknownNode(name) if name == "missing"));
}

#[test]
fn outgoing_preserves_registration_order() {
    let mut chart = Chart::new("order");
    for name in ["a", "b", "c", "d"] {
        chart.add_node(constant(name, 0)).unwrap();
    }
    chart.add_edge(Edge::when_equals("a", "c", 1i64)).unwrap();
    chart.add_edge(Edge::when_equals("a", "b", 2i64)).unwrap();
    chart.add_edge(Edge::always("a", "d")).unwrap();

    let targets: Vec<_> = chart
        .outgoing("a")
        .unwrap()
        .iter()
        .map(|e| e.target())
        .collect();
    assert_eq!(targets, vec!["c", "b", "d"]);
}

#[test]
fn nodes_iterate_in_insertion_order() {
    let mut chart = Chart::new("order");
    for name in ["z", "m", "a"] {
        chart.add_node(constant(name, 0)).unwrap();
    }
    let names: Vec<_> = chart.nodes().map(|n| n.name()).collect();
    assert_eq!(names, vec!["z", "m", "a"]);
}

#[test]
fn find_start_requires_exactly_one_start_node() {
    let mut chart = Chart::new("starts");
    chart.add_node(constant("a", 1)).unwrap();
    assert!(matches!(chart.find_start(), Err(ChartError::NoStart)));

    chart
        .add_node(Node::passthrough("s1").with_kind(NodeKind::Start))
        .unwrap();
    assert_eq!(chart.find_start().unwrap().name(), "s1");

    chart
        .add_node(Node::passthrough("s2").with_kind(NodeKind::Start))
        .unwrap();
    assert!(matches!(
        chart.find_start(),
        Err(ChartError::MultipleStarts(2))
    ));
}

#[test]
fn default_guard_matches_any_value() {
    let guard = Guard::Default;
    assert!(guard.matches(&Value::Null));
    assert!(guard.matches(&Value::from(false)));
    assert!(guard.matches(&Value::from(-42.0)));
    assert!(guard.matches(&Value::from("anything")));
    assert!(guard.is_default());
}

#[test]
fn equals_guard_matches_structurally() {
    let guard = Guard::Equals(Value::from(true));
    assert!(guard.matches(&Value::Bool(true)));
    assert!(!guard.matches(&Value::Bool(false)));
    assert!(!guard.matches(&Value::from(1.0)));
    assert!(!guard.is_default());
}

#[test]
fn predicate_guard_sees_the_result() {
    let edge = Edge::when("a", "b", |v| v.as_f64().is_some_and(|n| n > 0.0));
    assert!(edge.guard().matches(&Value::from(0.5)));
    assert!(!edge.guard().matches(&Value::from(-0.5)));
    assert!(!edge.guard().matches(&Value::from("not a number")));
}

#[test]
fn when_equals_labels_the_edge() {
    let edge = Edge::when_equals("a", "b", true);
    assert_eq!(edge.label(), Some("Bool(true)"));

    let edge = Edge::always("a", "b").with_label("fallback");
    assert_eq!(edge.label(), Some("fallback"));
}

#[tokio::test]
async fn node_runs_standalone_without_a_chart() {
    let node = Node::from_fn("double", |input| {
        let n = input
            .as_f64()
            .ok_or_else(|| ActionError::msg("expected a number"))?;
        Ok(Value::from(n * 2.0))
    });

    // Never registered anywhere; repeated runs with the same input agree.
    let first = node.run(Value::from(21.0)).await.unwrap();
    let second = node.run(Value::from(21.0)).await.unwrap();
    assert_eq!(first, Value::from(42.0));
    assert_eq!(first, second);

    let err = node.run(Value::Null).await.unwrap_err();
    assert!(matches!(err, ActionError::Failed(_)));
}

#[tokio::test]
async fn passthrough_returns_its_input() {
    let node = Node::passthrough("start");
    let out = node.run(Value::from("payload")).await.unwrap();
    assert_eq!(out, Value::from("payload"));
}

#[test]
fn trace_records_visits_edges_and_last_results() {
    let mut trace = CrawlTrace::new();
    trace.record_visit("a", &Value::from(1.0));
    trace.record_edge("a", "b");
    trace.record_visit("b", &Value::from(2.0));
    trace.record_edge("b", "a");
    trace.record_visit("a", &Value::from(3.0));

    assert_eq!(trace.visited_nodes(), &["a", "b", "a"]);
    assert_eq!(
        trace.visited_edges(),
        &[
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string())
        ]
    );
    // Last write wins for a revisited node.
    assert_eq!(trace.result_of("a"), Some(&Value::from(3.0)));
    assert!(trace.has_visited("b"));
    assert!(!trace.has_visited("c"));
    assert!(trace.has_crawled_edge("b", "a"));
    assert!(!trace.has_crawled_edge("a", "c"));
    assert_eq!(trace.steps(), 3);
}

#[test]
fn trace_serializes_to_json() {
    let mut trace = CrawlTrace::new();
    trace.record_visit("a", &Value::from(1.0));
    trace.finish();

    let json = serde_json::to_string(&trace).unwrap();
    let back: CrawlTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(back.visited_nodes(), trace.visited_nodes());
    assert_eq!(back.result_of("a"), trace.result_of("a"));
    assert_eq!(back.crawl_id, trace.crawl_id);
}

#[test]
fn view_marks_visited_nodes_and_edges() {
    let mut chart = Chart::new("view");
    chart
        .add_node(Node::passthrough("start").with_kind(NodeKind::Start))
        .unwrap();
    chart.add_node(constant("work", 1).with_label("do the work")).unwrap();
    chart
        .add_node(Node::passthrough("done").with_kind(NodeKind::Success))
        .unwrap();
    chart
        .add_node(Node::passthrough("skipped").with_kind(NodeKind::Failure))
        .unwrap();
    chart.add_edge(Edge::always("start", "work")).unwrap();
    chart.add_edge(Edge::always("work", "done")).unwrap();
    chart.add_edge(Edge::always("work", "skipped")).unwrap();

    let mut trace = CrawlTrace::new();
    trace.record_visit("start", &Value::Null);
    trace.record_edge("start", "work");
    trace.record_visit("work", &Value::from(1.0));
    trace.record_edge("work", "done");
    trace.record_visit("done", &Value::from(1.0));

    let view = ChartView::new(&chart, Some(&trace));
    assert_eq!(view.name, "view");
    assert_eq!(view.nodes.len(), 4);
    assert_eq!(view.edges.len(), 3);

    let start = &view.nodes[0];
    assert!(start.visited);
    assert_eq!(start.shape, "ellipse");
    assert_eq!(start.color.as_deref(), Some("blue"));

    let work = &view.nodes[1];
    assert_eq!(work.shape, "box");
    assert_eq!(work.label.as_deref(), Some("do the work"));

    let done = &view.nodes[2];
    assert_eq!(done.color.as_deref(), Some("green"));

    let skipped = &view.nodes[3];
    assert!(!skipped.visited);
    assert_eq!(skipped.color, None);

    assert!(view.edges.iter().any(|e| e.target == "done" && e.visited));
    assert!(view.edges.iter().any(|e| e.target == "skipped" && !e.visited));

    // Without a trace nothing is highlighted.
    let bare = ChartView::new(&chart, None);
    assert!(bare.nodes.iter().all(|n| !n.visited && n.color.is_none()));
}

#[test]
fn visited_outcomes_lists_reached_end_nodes() {
    let mut chart = Chart::new("outcomes");
    chart
        .add_node(Node::passthrough("ok").with_kind(NodeKind::Success))
        .unwrap();
    chart
        .add_node(Node::passthrough("bad").with_kind(NodeKind::Failure))
        .unwrap();
    chart.add_node(constant("step", 1)).unwrap();

    let mut trace = CrawlTrace::new();
    trace.record_visit("step", &Value::from(1.0));
    trace.record_visit("ok", &Value::from(1.0));

    let outcomes = chart.visited_outcomes(&trace);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].name(), "ok");
}

#[test]
fn value_accessors() {
    assert_eq!(Value::from("hi").as_str(), Some("hi"));
    assert_eq!(Value::from(2i64).as_f64(), Some(2.0));
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert!(Value::Null.is_null());
    assert_eq!(Value::from(true).as_str(), None);

    let json = serde_json::json!({"k": 1});
    assert_eq!(Value::from(json.clone()).as_json(), Some(&json));
}
