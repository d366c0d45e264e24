//! Property tests for graph, viewport and compiler invariants.
mod common;
use common::*;
use kumitate::config::{MAX_SCALE, MIN_SCALE};
use kumitate::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddNode { x: f64, y: f64 },
    RemoveNode(usize),
    Connect { from: usize, out: u32, to: usize, input: u32 },
    Disconnect(usize),
    Move { node: usize, x: f64, y: f64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-200.0..2000.0f64, -200.0..2000.0f64).prop_map(|(x, y)| Op::AddNode { x, y }),
        (0usize..16).prop_map(Op::RemoveNode),
        (0usize..16, 0u32..3, 0usize..16, 0u32..3).prop_map(|(from, out, to, input)| {
            Op::Connect {
                from,
                out,
                to,
                input,
            }
        }),
        (0usize..16).prop_map(Op::Disconnect),
        (0usize..16, -500.0..3000.0f64, -500.0..3000.0f64)
            .prop_map(|(node, x, y)| Op::Move { node, x, y }),
    ]
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}

fn apply(graph: &mut Graph, op: &Op) {
    let ids: Vec<NodeId> = graph.nodes().map(|n| n.id.clone()).collect();
    match *op {
        Op::AddNode { x, y } => {
            graph.add_node(&transform_template(), Point::new(x, y));
        }
        Op::RemoveNode(i) => {
            if let Some(id) = pick(&ids, i) {
                graph.remove_node(&id);
            }
        }
        Op::Connect {
            from,
            out,
            to,
            input,
        } => {
            if let (Some(a), Some(b)) = (pick(&ids, from), pick(&ids, to)) {
                graph.add_connection(&a, out, &b, input);
            }
        }
        Op::Disconnect(i) => {
            let conns: Vec<ConnectionId> = graph.connections().map(|c| c.id.clone()).collect();
            if let Some(id) = pick(&conns, i) {
                graph.remove_connection(&id);
            }
        }
        Op::Move { node, x, y } => {
            if let Some(id) = pick(&ids, node) {
                graph.move_node(&id, Point::new(x, y));
            }
        }
    }
}

proptest! {
    #[test]
    fn graph_invariants_hold_after_any_edit_sequence(ops in proptest::collection::vec(op(), 0..60)) {
        let mut graph = Graph::new();
        for op in &ops {
            apply(&mut graph, op);
        }

        for node in graph.nodes() {
            prop_assert!(node.position.x >= 0.0 && node.position.y >= 0.0);
        }
        let mut seen = std::collections::HashSet::new();
        for conn in graph.connections() {
            prop_assert!(conn.source_node_id != conn.target_node_id);
            let source = graph.node(&conn.source_node_id);
            let target = graph.node(&conn.target_node_id);
            prop_assert!(source.is_some() && target.is_some());
            prop_assert!(source.is_some_and(|n| conn.source_port < n.output_port_count));
            prop_assert!(target.is_some_and(|n| conn.target_port < n.input_port_count));
            prop_assert!(seen.insert((
                conn.source_node_id.clone(),
                conn.source_port,
                conn.target_node_id.clone(),
                conn.target_port,
            )));
        }
    }

    #[test]
    fn zoom_keeps_point_under_pivot(
        factors in proptest::collection::vec(0.2..5.0f64, 1..20),
        px in 0.0..1920.0f64,
        py in 0.0..1080.0f64,
        tx in -500.0..500.0f64,
        ty in -500.0..500.0f64,
    ) {
        let mut vp = Viewport::new();
        vp.pan(tx, ty);
        let pivot = Point::new(px, py);
        let anchor = vp.to_virtual(pivot);
        for factor in factors {
            vp.zoom_by(factor, pivot);
            prop_assert!(vp.scale() >= MIN_SCALE && vp.scale() <= MAX_SCALE);
            let back = vp.to_screen(anchor);
            prop_assert!((back.x - pivot.x).abs() < 1e-6);
            prop_assert!((back.y - pivot.y).abs() < 1e-6);
        }
    }

    #[test]
    fn screen_virtual_round_trip(
        x in -5000.0..5000.0f64,
        y in -5000.0..5000.0f64,
        scale in 0.1..3.0f64,
        tx in -500.0..500.0f64,
        ty in -500.0..500.0f64,
    ) {
        let mut vp = Viewport::new();
        vp.set_transform(ViewportTransform { translate_x: tx, translate_y: ty, scale });
        let p = Point::new(x, y);
        let back = vp.to_virtual(vp.to_screen(p));
        prop_assert!((back.x - x).abs() < 1e-6);
        prop_assert!((back.y - y).abs() < 1e-6);
    }

    #[test]
    fn compile_is_deterministic_and_drops_markers(
        positions in proptest::collection::vec((0.0..1000.0f64, 0.0..1000.0f64), 1..12),
        with_start in any::<bool>(),
    ) {
        let mut graph = Graph::new();
        if with_start {
            graph.add_node(&start_template(), Point::ORIGIN);
        }
        for (x, y) in &positions {
            graph.add_node(&http_template(), Point::new(*x, *y));
        }
        graph.set_job_name("Property job");

        let compile = |g: &Graph| {
            Compiler::builder(g.snapshot(), g.job_name())
                .with_templates(&sample_templates())
                .build()
                .compile()
        };
        let first = compile(&graph).expect("graph is valid");
        let second = compile(&graph).expect("graph is valid");

        prop_assert_eq!(first.to_json().ok(), second.to_json().ok());
        prop_assert_eq!(first.definition.steps.len(), positions.len());
        prop_assert_eq!(first.definition.flow.nodes.len(), graph.node_count());
    }
}
