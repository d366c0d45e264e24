//! Tests for the graph model: nodes, connections and their invariants.
mod common;
use common::*;
use kumitate::prelude::*;
use serde_json::json;

#[test]
fn test_add_node_copies_template() {
    let mut graph = Graph::new();
    let template = http_template();
    let id = graph.add_node(&template, Point::new(40.0, 60.0));

    let node = graph.node(&id).expect("node was just added");
    assert_eq!(node.step_type, "http.request");
    assert_eq!(node.display_name, template.display_name);
    assert_eq!(node.position, Point::new(40.0, 60.0));
    assert_eq!(node.size, Size::new(180.0, 72.0));
    assert_eq!(node.input_port_count, 1);
    assert_eq!(node.output_port_count, 1);
    assert_eq!(node.config, template.default_config);
}

#[test]
fn test_node_config_is_not_shared_with_template() {
    let mut graph = Graph::new();
    let template = http_template();
    let first = graph.add_node(&template, Point::ORIGIN);
    let second = graph.add_node(&template, Point::ORIGIN);

    let mut config = StepConfig::new();
    config.insert("url".to_string(), json!("https://changed.example"));
    assert!(graph.set_node_config(&first, config));

    assert_eq!(
        graph.node(&second).map(|n| &n.config),
        Some(&template.default_config)
    );
    assert_eq!(template.default_config["url"], json!("https://example.com"));
}

#[test]
fn test_negative_positions_are_clamped() {
    let mut graph = Graph::new();
    let id = graph.add_node(&http_template(), Point::new(-25.0, 10.0));
    assert_eq!(graph.node(&id).map(|n| n.position), Some(Point::new(0.0, 10.0)));

    assert!(graph.move_node(&id, Point::new(15.5, -3.0)));
    assert_eq!(graph.node(&id).map(|n| n.position), Some(Point::new(15.5, 0.0)));
}

#[test]
fn test_node_ids_are_never_reused() {
    let mut graph = Graph::new();
    let first = graph.add_node(&http_template(), Point::ORIGIN);
    graph.remove_node(&first);
    let second = graph.add_node(&http_template(), Point::ORIGIN);
    assert_ne!(first, second);

    graph.clear();
    let third = graph.add_node(&http_template(), Point::ORIGIN);
    assert_ne!(third, first);
    assert_ne!(third, second);
}

#[test]
fn test_add_connection_is_idempotent() {
    let (mut graph, start, http) = start_to_http_graph();
    assert_eq!(graph.connection_count(), 1);

    let again = graph.add_connection(&start, 0, &http, 0);
    assert!(again.is_some());
    assert_eq!(graph.connection_count(), 1);
    assert_eq!(again.as_ref(), graph.connections().next().map(|c| &c.id));
}

#[test]
fn test_connection_id_is_deterministic() {
    let (graph, start, http) = start_to_http_graph();
    let conn = graph.connections().next().expect("one connection");
    assert_eq!(conn.id, ConnectionId::derive(&start, 0, &http, 0));
    assert_eq!(conn.source_node_id, start);
    assert_eq!(conn.target_node_id, http);
}

#[test]
fn test_self_loop_is_rejected() {
    let mut graph = Graph::new();
    let id = graph.add_node(&transform_template(), Point::ORIGIN);
    assert_eq!(graph.add_connection(&id, 0, &id, 1), None);
    assert_eq!(graph.connection_count(), 0);
}

#[test]
fn test_out_of_range_ports_are_rejected() {
    let mut graph = Graph::new();
    let start = graph.add_node(&start_template(), Point::ORIGIN);
    let http = graph.add_node(&http_template(), Point::new(300.0, 0.0));

    assert_eq!(graph.add_connection(&start, 1, &http, 0), None);
    assert_eq!(graph.add_connection(&start, 0, &http, 1), None);
    // The start node has no inputs.
    assert_eq!(graph.add_connection(&http, 0, &start, 0), None);
    assert_eq!(graph.connection_count(), 0);
}

#[test]
fn test_connection_to_unknown_node_is_rejected() {
    let mut graph = Graph::new();
    let http = graph.add_node(&http_template(), Point::ORIGIN);
    let ghost = NodeId::new("node-99");
    assert_eq!(graph.add_connection(&http, 0, &ghost, 0), None);
    assert_eq!(graph.add_connection(&ghost, 0, &http, 0), None);
}

#[test]
fn test_remove_node_cascades_connections() {
    let mut graph = Graph::new();
    let start = graph.add_node(&start_template(), Point::ORIGIN);
    let a = graph.add_node(&transform_template(), Point::new(300.0, 0.0));
    let b = graph.add_node(&http_template(), Point::new(600.0, 0.0));
    graph.add_connection(&start, 0, &a, 0);
    graph.add_connection(&a, 0, &b, 0);
    graph.add_connection(&a, 1, &b, 0);
    assert_eq!(graph.connection_count(), 3);

    let removed = graph.remove_node(&a).expect("node exists");
    assert_eq!(removed.id, a);
    assert_eq!(graph.connection_count(), 0);
    assert!(graph.connections().all(|c| !c.touches(&a)));
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn test_remove_missing_node_is_noop() {
    let (mut graph, _, _) = start_to_http_graph();
    assert!(graph.remove_node(&NodeId::new("node-42")).is_none());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.connection_count(), 1);
}

#[test]
fn test_connection_can_be_recreated_after_removal() {
    let (mut graph, start, http) = start_to_http_graph();
    let id = ConnectionId::derive(&start, 0, &http, 0);
    assert!(graph.remove_connection(&id).is_some());
    assert_eq!(graph.connection_count(), 0);

    assert_eq!(graph.add_connection(&start, 0, &http, 0), Some(id));
    assert_eq!(graph.connection_count(), 1);
}

#[test]
fn test_connections_of_lists_both_directions() {
    let mut graph = Graph::new();
    let start = graph.add_node(&start_template(), Point::ORIGIN);
    let mid = graph.add_node(&transform_template(), Point::new(300.0, 0.0));
    let end = graph.add_node(&end_template(), Point::new(600.0, 0.0));
    graph.add_connection(&start, 0, &mid, 1);
    graph.add_connection(&mid, 1, &end, 0);

    assert_eq!(graph.connections_of(&mid).count(), 2);
    assert_eq!(graph.connections_of(&start).count(), 1);
}

#[test]
fn test_nodes_keep_insertion_order_after_removal() {
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = (0..4)
        .map(|i| graph.add_node(&http_template(), Point::new(i as f64 * 200.0, 0.0)))
        .collect();
    graph.remove_node(&ids[1]);

    let order: Vec<&NodeId> = graph.nodes().map(|n| &n.id).collect();
    assert_eq!(order, vec![&ids[0], &ids[2], &ids[3]]);
}

#[test]
fn test_bounding_box_covers_all_nodes() {
    let (graph, _, _) = start_to_http_graph();
    let bounds = graph.bounding_box().expect("graph has nodes");
    assert_eq!(bounds.min, Point::new(100.0, 200.0));
    assert_eq!(bounds.max, Point::new(480.0, 322.0));
    assert!(Graph::new().bounding_box().is_none());
}

#[test]
fn test_snapshot_is_detached_from_graph() {
    let (mut graph, start, _) = start_to_http_graph();
    let snapshot = graph.snapshot();
    graph.move_node(&start, Point::new(999.0, 999.0));
    graph.clear();

    assert_eq!(snapshot.nodes.len(), 2);
    assert_eq!(snapshot.nodes[0].position, Point::new(100.0, 200.0));
    assert_eq!(snapshot.connections.len(), 1);
}

#[test]
fn test_from_snapshot_keeps_ids_and_continues_sequence() {
    let (graph, start, http) = start_to_http_graph();
    let mut restored = Graph::from_snapshot(graph.snapshot(), "Ping API");

    assert_eq!(restored.job_name(), "Ping API");
    assert!(restored.contains_node(&start));
    assert!(restored.contains_node(&http));
    assert_eq!(restored.connection_count(), 1);

    let fresh = restored.add_node(&http_template(), Point::ORIGIN);
    assert_ne!(fresh, start);
    assert_ne!(fresh, http);
}

#[test]
fn test_from_snapshot_drops_dangling_connections() {
    let (graph, _, http) = start_to_http_graph();
    let mut snapshot = graph.snapshot();
    snapshot.nodes.retain(|n| n.id != http);

    let restored = Graph::from_snapshot(snapshot, "partial");
    assert_eq!(restored.node_count(), 1);
    assert_eq!(restored.connection_count(), 0);
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let (graph, _, _) = start_to_http_graph();
    let value = serde_json::to_value(graph.snapshot()).expect("snapshot serializes");

    let conn = &value["connections"][0];
    assert_eq!(conn["sourceNodeId"], json!("node-1"));
    assert_eq!(conn["targetPort"], json!(0));
    assert_eq!(value["nodes"][1]["stepType"], json!("http.request"));
}
