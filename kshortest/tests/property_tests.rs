//! Randomised invariants over small multigraphs, walked directed and undirected.

mod common;

use std::collections::HashSet;

use kshortest::algorithms::{all_simple_paths, DijkstraOracle, EffectiveDistance, OracleQuery, ShortestPathOracle};
use kshortest::cost::path_cost;
use kshortest::prelude::*;
use proptest::prelude::*;
use crate::common::is_clean;

#[derive(Debug, Clone)]
struct Fixture {
    vertices: usize,
    edges: Vec<(usize, usize, u8)>,
}

fn fixture() -> impl Strategy<Value = Fixture> {
    (2usize..7).prop_flat_map(|vertices| {
        proptest::collection::vec((0..vertices, 0..vertices, 1u8..10), 0..18)
            .prop_map(move |edges| Fixture { vertices, edges })
    })
}

fn vertex(i: usize) -> NodeId {
    NodeId::from(format!("v{}", i))
}

fn build(fixture: &Fixture) -> MemoryGraph {
    let graph = MemoryGraph::new();
    for i in 0..fixture.vertices {
        graph.add_vertex(vertex(i));
    }
    for &(from, to, weight) in &fixture.edges {
        if from != to {
            graph
                .add_weighted_edge(vertex(from), vertex(to), "weight", f64::from(weight))
                .unwrap();
        }
    }
    graph
}

/// Cheapest parallel edge per hop, summed. An undirected walk may use an
/// edge against its orientation.
fn min_edge_cost(fixture: &Fixture, path: &[NodeId], undirected: bool) -> f64 {
    path.windows(2)
        .map(|pair| {
            fixture
                .edges
                .iter()
                .filter(|(from, to, _)| {
                    let (from, to) = (vertex(*from), vertex(*to));
                    (from == pair[0] && to == pair[1]) || (undirected && from == pair[1] && to == pair[0])
                })
                .map(|(_, _, weight)| f64::from(*weight))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

fn parallel_count(fixture: &Fixture, from: &NodeId, to: &NodeId) -> usize {
    fixture
        .edges
        .iter()
        .filter(|(f, t, _)| f != t && vertex(*f) == *from && vertex(*t) == *to)
        .count()
}

fn selector(undirected: bool) -> EdgeSelector<MemoryGraph> {
    if undirected {
        EdgeSelector::Both
    } else {
        EdgeSelector::Direction(Direction::Outgoing)
    }
}

fn engine<'g>(graph: &'g MemoryGraph, fixture: &Fixture, kind: OracleKind, include_edges: bool) -> YenAlgorithm<'g, MemoryGraph> {
    engine_with(graph, fixture, selector(false), kind, include_edges)
}

fn engine_with<'g>(
    graph: &'g MemoryGraph,
    fixture: &Fixture,
    edges: EdgeSelector<MemoryGraph>,
    kind: OracleKind,
    include_edges: bool,
) -> YenAlgorithm<'g, MemoryGraph> {
    YenAlgorithm::build(graph, vertex(0), vertex(fixture.vertices - 1))
        .computer(kind)
        .edges(edges)
        .distance("weight")
        .include_edges(include_edges)
        .create()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_enumeration_invariants(fixture in fixture()) {
        let graph = build(&fixture);
        let source = vertex(0);
        let target = vertex(fixture.vertices - 1);

        for undirected in [false, true] {
            let yen = engine_with(&graph, &fixture, selector(undirected), OracleKind::Dijkstra, false);
            let paths = yen.list(usize::MAX).unwrap();

            for pair in paths.windows(2) {
                prop_assert!(pair[1].1 >= pair[0].1, "costs not monotone: {} then {}", pair[0].1, pair[1].1);
            }
            for (path, _) in &paths {
                prop_assert!(path.is_simple());
                prop_assert_eq!(path.source(), Some(&source));
                prop_assert_eq!(path.target(), Some(&target));
            }
            let distinct: HashSet<&Path<NodeId, EdgeId>> = paths.iter().map(|(p, _)| p).collect();
            prop_assert_eq!(distinct.len(), paths.len());
            prop_assert!(is_clean(&graph, yen.disable_edge_key()));

            let reference = all_simple_paths(&graph, &source, &target, &selector(undirected), None).unwrap();
            prop_assert_eq!(paths.len(), reference.len(), "undirected: {}", undirected);

            let mut expected: Vec<f64> = reference.iter().map(|p| min_edge_cost(&fixture, p, undirected)).collect();
            expected.sort_by(|a, b| a.total_cmp(b));
            let actual: Vec<f64> = paths.iter().map(|(_, c)| *c).collect();
            prop_assert_eq!(actual, expected, "undirected: {}", undirected);
        }
    }

    #[test]
    fn test_first_path_matches_oracle(fixture in fixture()) {
        let graph = build(&fixture);
        let source = vertex(0);
        let target = vertex(fixture.vertices - 1);
        let yen = engine(&graph, &fixture, OracleKind::Dijkstra, false);

        let distance = Distance::from("weight");
        let selector = EdgeSelector::Direction(Direction::Outgoing);
        let query = OracleQuery {
            source: &source,
            target: &target,
            weights: EffectiveDistance::plain(&distance),
            edges: &selector,
            max_distance: None,
            include_edges: false,
            cancel: None,
        };
        let direct = DijkstraOracle.shortest_path(&graph, &query).unwrap();
        let first = yen.list(1).unwrap().into_iter().next();

        match (direct, first) {
            (None, None) => {}
            (Some(path), Some((accepted, cost))) => {
                let direct_cost = path_cost(&graph, &path, &distance, &selector).unwrap();
                prop_assert_eq!(accepted, path);
                prop_assert_eq!(cost, direct_cost);
            }
            (direct, first) => prop_assert!(false, "oracle {:?} vs engine {:?}", direct, first),
        }
    }

    #[test]
    fn test_embedded_edges_enumerate_every_edge_path(fixture in fixture()) {
        let graph = build(&fixture);
        let source = vertex(0);
        let target = vertex(fixture.vertices - 1);
        let yen = engine(&graph, &fixture, OracleKind::Dijkstra, true);
        let paths = yen.list(usize::MAX).unwrap();

        let selector = EdgeSelector::Direction(Direction::Outgoing);
        let expected: usize = all_simple_paths(&graph, &source, &target, &selector, None)
            .unwrap()
            .iter()
            .map(|p| p.windows(2).map(|w| parallel_count(&fixture, &w[0], &w[1])).product::<usize>())
            .sum();
        prop_assert_eq!(paths.len(), expected);

        for pair in paths.windows(2) {
            prop_assert!(pair[1].1 >= pair[0].1);
        }
        let distinct: HashSet<&Path<NodeId, EdgeId>> = paths.iter().map(|(p, _)| p).collect();
        prop_assert_eq!(distinct.len(), paths.len());
        prop_assert!(is_clean(&graph, yen.disable_edge_key()));
    }

    #[test]
    fn test_oracles_agree(fixture in fixture()) {
        let graph = build(&fixture);
        let dijkstra: Vec<f64> = engine(&graph, &fixture, OracleKind::Dijkstra, false)
            .list(usize::MAX)
            .unwrap()
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        let spfa: Vec<f64> = engine(&graph, &fixture, OracleKind::Spfa, false)
            .list(usize::MAX)
            .unwrap()
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        prop_assert_eq!(dijkstra, spfa);
    }
}
