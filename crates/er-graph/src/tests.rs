//! Unit tests for er-graph.
//!
//! Graph tests use `&'static str` vertices; tracker and loader tests use
//! `ResourceId`.

#[cfg(test)]
mod helpers {
    use crate::WeightedGraph;

    /// ```text
    /// A ─1─ B ─2─ C ─1─ D
    /// └──────────5──────┘
    /// ```
    /// Shortest A→D is A-B-C-D at 4, beating the direct edge at 5.
    pub fn corridor() -> WeightedGraph<&'static str> {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 2.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("A", "D", 5.0);
        g
    }

    /// Hub `E` joined to five spokes.
    pub fn star() -> WeightedGraph<&'static str> {
        let mut g = WeightedGraph::new();
        for spoke in ["A", "B", "C", "D", "F"] {
            g.add_unit_edge("E", spoke);
        }
        g
    }
}

// ── Construction & lookup ─────────────────────────────────────────────────────

#[cfg(test)]
mod structure {
    use crate::{VertexIdx, WeightedGraph};

    #[test]
    fn empty_graph() {
        let g: WeightedGraph<&str> = WeightedGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 0);
        assert!(g.find_bottlenecks().is_empty());
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut g = WeightedGraph::new();
        let a = g.add_vertex("A");
        let b = g.add_vertex("B");
        assert_eq!(g.add_vertex("A"), a);
        assert_eq!((a, b), (VertexIdx(0), VertexIdx(1)));
        assert_eq!(g.vertices(), &["A", "B"]);
    }

    #[test]
    fn add_edge_creates_endpoints() {
        let mut g = WeightedGraph::new();
        g.add_edge("room-1", "room-2", 3.0);
        assert!(g.contains_vertex("room-1"));
        assert!(g.contains_vertex("room-2"));
        let n: Vec<_> = g.neighbors("room-1").collect();
        assert_eq!(n, vec![(&"room-2", 3.0)]);
    }

    #[test]
    fn multi_edges_count_toward_degree() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "B", 2.0);
        assert_eq!(g.degree_of("A"), 2);
        assert_eq!(g.degree_of("B"), 2);
        assert_eq!(g.edge_entry_count(), 4);
    }

    #[test]
    fn self_loop_counts_twice() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "A", 1.0);
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.degree_of("A"), 2);
    }

    #[test]
    fn absent_vertex_queries_are_empty() {
        let g = super::helpers::corridor();
        assert_eq!(g.neighbors("X").count(), 0);
        assert_eq!(g.degree_of("X"), 0);
        assert!(g.breadth_first_search("X", None).is_empty());
        assert!(g.depth_first_search("X", None).is_empty());
        assert!(g.shortest_path("X", "A").is_empty());
        assert!(g.shortest_path("A", "X").is_empty());
        assert!(g.index_of("X").is_none());
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traversal {
    use crate::WeightedGraph;

    #[test]
    fn bfs_reports_depths() {
        let g = super::helpers::corridor();
        let visits = g.breadth_first_search("A", None);
        assert_eq!(visits, vec![("A", 0), ("B", 1), ("D", 1), ("C", 2)]);
    }

    #[test]
    fn bfs_respects_depth_limit() {
        let mut g = WeightedGraph::new();
        g.add_unit_edge("A", "B");
        g.add_unit_edge("B", "C");
        assert_eq!(g.breadth_first_search("A", Some(1)), vec![("A", 0), ("B", 1)]);
        assert_eq!(g.breadth_first_search("A", Some(0)), vec![("A", 0)]);
    }

    #[test]
    fn bfs_star_visits_spokes_in_append_order() {
        let g = super::helpers::star();
        let order: Vec<_> = g.breadth_first_search("E", None).into_iter().map(|(v, _)| v).collect();
        assert_eq!(order, vec!["E", "A", "B", "C", "D", "F"]);
    }

    #[test]
    fn dfs_trace_includes_dead_ends() {
        // A-B, A-C, B-E, C-D: from A to D the walk enters B and E first.
        let mut g = WeightedGraph::new();
        g.add_unit_edge("A", "B");
        g.add_unit_edge("A", "C");
        g.add_unit_edge("B", "E");
        g.add_unit_edge("C", "D");
        assert_eq!(g.depth_first_search("A", Some("D")), vec!["A", "B", "E", "C", "D"]);
    }

    #[test]
    fn dfs_stops_at_end() {
        let g = super::helpers::corridor();
        assert_eq!(g.depth_first_search("A", Some("B")), vec!["A", "B"]);
        assert_eq!(g.depth_first_search("A", Some("A")), vec!["A"]);
    }

    #[test]
    fn dfs_without_end_visits_component() {
        let mut g = super::helpers::corridor();
        g.add_vertex("island");
        let trace = g.depth_first_search("A", None);
        assert_eq!(trace, vec!["A", "B", "C", "D"]);
        // An end outside the graph behaves like no end at all.
        assert_eq!(g.depth_first_search("A", Some("nowhere")), trace);
    }
}

// ── Shortest path & routing ───────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use crate::{DijkstraRouter, Router, WeightedGraph};

    #[test]
    fn prefers_cheaper_multi_hop_path() {
        let g = super::helpers::corridor();
        assert_eq!(g.shortest_path("A", "D"), vec!["A", "B", "C", "D"]);
        assert_eq!(g.shortest_path("D", "A"), vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn same_vertex_is_single_element_path() {
        let g = super::helpers::corridor();
        assert_eq!(g.shortest_path("A", "A"), vec!["A"]);
    }

    #[test]
    fn disconnected_is_empty() {
        let mut g = WeightedGraph::new();
        g.add_unit_edge("A", "B");
        g.add_unit_edge("C", "D");
        assert!(g.shortest_path("A", "D").is_empty());
        let (a, d) = (g.index_of("A").unwrap(), g.index_of("D").unwrap());
        assert!(DijkstraRouter.route(&g, a, d).is_none());
    }

    #[test]
    fn route_reports_weight_and_hops() {
        let g = super::helpers::corridor();
        let (a, d) = (g.index_of("A").unwrap(), g.index_of("D").unwrap());
        let route = DijkstraRouter.route(&g, a, d).unwrap();
        assert_eq!(route.total_weight, 4.0);
        assert_eq!(route.hop_count(), 3);
        assert!(!route.is_trivial());

        let trivial = DijkstraRouter.route(&g, a, a).unwrap();
        assert!(trivial.is_trivial());
        assert_eq!(trivial.total_weight, 0.0);
    }

    #[test]
    fn equal_cost_ties_follow_insertion_order() {
        // Two 2-hop routes A→D; B was inserted before C.
        let mut g = WeightedGraph::new();
        g.add_unit_edge("A", "B");
        g.add_unit_edge("B", "D");
        g.add_unit_edge("A", "C");
        g.add_unit_edge("C", "D");
        for _ in 0..5 {
            assert_eq!(g.shortest_path("A", "D"), vec!["A", "B", "D"]);
        }
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 0.0);
        g.add_edge("B", "C", 0.0);
        g.add_edge("A", "C", 1.0);
        assert_eq!(g.shortest_path("A", "C"), vec!["A", "B", "C"]);
    }
}

// ── Bottlenecks ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod bottlenecks {
    #[test]
    fn hub_ranks_first() {
        let g = super::helpers::star();
        let ranked = g.find_bottlenecks();
        assert_eq!(ranked[0], ("E", 5));
        assert_eq!(ranked.len(), 6);
        assert!(ranked[1..].iter().all(|&(_, d)| d == 1));
    }

    #[test]
    fn equal_degrees_keep_insertion_order() {
        let g = super::helpers::star();
        let spokes: Vec<_> = g.find_bottlenecks()[1..].iter().map(|&(v, _)| v).collect();
        assert_eq!(spokes, vec!["A", "B", "C", "D", "F"]);
    }

    #[test]
    fn isolated_vertices_have_zero_degree() {
        let mut g = super::helpers::corridor();
        g.add_vertex("Z");
        assert_eq!(g.find_bottlenecks().last(), Some(&("Z", 0)));
    }
}

// ── ResourceTracker ───────────────────────────────────────────────────────────

#[cfg(test)]
mod resources {
    use er_core::{PatientId, ResourceConfig, ResourceId};

    use crate::{EquipmentStatus, ResourceError, ResourceKind, ResourceState, ResourceTracker, RoomStatus};

    fn tracker() -> ResourceTracker {
        let mut t = ResourceTracker::new(ResourceConfig { max_patients_per_provider: 2 });
        t.register("room-1", ResourceKind::Room);
        t.register("room-2", ResourceKind::Room);
        t.register("monitor-1", ResourceKind::Equipment);
        t.register("dr-ito", ResourceKind::Provider);
        t.register("rn-kaye", ResourceKind::Staff);
        t
    }

    fn room_status(t: &ResourceTracker, id: &str) -> RoomStatus {
        match &t.resource(id).unwrap().state {
            ResourceState::Room { status, .. } => *status,
            other => panic!("not a room: {other:?}"),
        }
    }

    #[test]
    fn room_lifecycle() {
        let mut t = tracker();
        let p = PatientId::from("P000001");

        t.assign_room("room-1", &p).unwrap();
        assert_eq!(room_status(&t, "room-1"), RoomStatus::Occupied);
        assert_eq!(t.available(ResourceKind::Room), vec![ResourceId::from("room-2")]);
        assert!(t.graph().contains_vertex("P000001"));
        assert_eq!(t.graph().degree_of("room-1"), 1);

        let err = t.assign_room("room-1", &PatientId::from("P000002")).unwrap_err();
        assert!(matches!(err, ResourceError::Unavailable(ref id) if id.as_str() == "room-1"));

        // Occupied rooms cannot be marked ready.
        assert!(t.mark_room_ready("room-1").is_err());

        t.release_room("room-1").unwrap();
        assert_eq!(room_status(&t, "room-1"), RoomStatus::Cleaning);
        assert!(!t.available(ResourceKind::Room).contains(&ResourceId::from("room-1")));

        t.mark_room_ready("room-1").unwrap();
        assert_eq!(room_status(&t, "room-1"), RoomStatus::Available);
        assert_eq!(t.available(ResourceKind::Room).len(), 2);
    }

    #[test]
    fn unknown_and_wrong_kind() {
        let mut t = tracker();
        let p = PatientId::from("P1");
        assert!(matches!(t.assign_room("room-9", &p), Err(ResourceError::NotFound(_))));
        let err = t.assign_room("dr-ito", &p).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::WrongKind { expected: ResourceKind::Room, actual: ResourceKind::Provider, .. }
        ));
        assert_eq!(err.to_string(), "resource dr-ito is a provider, expected a room");
    }

    #[test]
    fn every_operation_rejects_the_wrong_kind_without_changing_state() {
        let mut t = tracker();
        let p = PatientId::from("P1");
        let kind_of = |r: Result<_, ResourceError>| match r {
            Err(ResourceError::WrongKind { expected, actual, .. }) => Some((expected, actual)),
            _ => None,
        };

        assert_eq!(
            kind_of(t.release_room("monitor-1")),
            Some((ResourceKind::Room, ResourceKind::Equipment))
        );
        assert_eq!(
            kind_of(t.mark_room_ready("rn-kaye")),
            Some((ResourceKind::Room, ResourceKind::Staff))
        );
        assert_eq!(
            kind_of(t.assign_equipment("room-1", "room-2")),
            Some((ResourceKind::Equipment, ResourceKind::Room))
        );
        assert_eq!(
            kind_of(t.return_equipment("dr-ito")),
            Some((ResourceKind::Equipment, ResourceKind::Provider))
        );
        assert_eq!(
            kind_of(t.assign_provider("room-1", &p)),
            Some((ResourceKind::Provider, ResourceKind::Room))
        );
        assert_eq!(
            kind_of(t.release_provider("monitor-1", &p).map(|_| ())),
            Some((ResourceKind::Provider, ResourceKind::Equipment))
        );

        assert_eq!(room_status(&t, "room-1"), RoomStatus::Available);
        assert_eq!(t.graph().degree_of("room-1"), 0);
        assert_eq!(t.available(ResourceKind::Equipment), vec![ResourceId::from("monitor-1")]);
    }

    #[test]
    fn provider_capacity() {
        let mut t = tracker();
        let (p1, p2, p3) = (PatientId::from("P1"), PatientId::from("P2"), PatientId::from("P3"));

        t.assign_provider("dr-ito", &p1).unwrap();
        assert_eq!(t.available(ResourceKind::Provider).len(), 1);
        t.assign_provider("dr-ito", &p2).unwrap();
        assert!(t.available(ResourceKind::Provider).is_empty());
        assert!(matches!(t.assign_provider("dr-ito", &p3), Err(ResourceError::Unavailable(_))));

        assert!(t.release_provider("dr-ito", &p1).unwrap());
        assert!(!t.release_provider("dr-ito", &p1).unwrap());
        t.assign_provider("dr-ito", &p3).unwrap();

        match &t.resource("dr-ito").unwrap().state {
            ResourceState::Provider { patients, available } => {
                assert_eq!(patients, &vec![p2, p3]);
                assert!(!available);
            }
            other => panic!("not a provider: {other:?}"),
        }
    }

    #[test]
    fn equipment_follows_location() {
        let mut t = tracker();
        t.assign_equipment("monitor-1", "room-2").unwrap();
        assert!(t.available(ResourceKind::Equipment).is_empty());
        assert!(t.assign_equipment("monitor-1", "room-1").is_err());
        assert_eq!(t.graph().degree_of("monitor-1"), 1);

        t.return_equipment("monitor-1").unwrap();
        match &t.resource("monitor-1").unwrap().state {
            ResourceState::Equipment { status, location } => {
                assert_eq!(*status, EquipmentStatus::Available);
                assert_eq!(location.as_ref().map(ResourceId::as_str), Some("room-2"));
            }
            other => panic!("not equipment: {other:?}"),
        }
    }

    #[test]
    fn staff_path_through_corridors() {
        let mut t = tracker();
        t.register("hall", ResourceKind::Staff);
        t.connect("rn-kaye", "hall", 1.0);
        t.connect("hall", "room-2", 2.0);
        t.connect("rn-kaye", "room-2", 10.0);
        let path: Vec<_> = t
            .optimize_staff_path("rn-kaye", "room-2")
            .into_iter()
            .map(ResourceId::into_inner)
            .collect();
        assert_eq!(path, vec!["rn-kaye", "hall", "room-2"]);
        assert!(t.optimize_staff_path("rn-kaye", "room-1").is_empty());
    }

    #[test]
    fn summary_and_bottlenecks() {
        let mut t = tracker();
        t.assign_provider("dr-ito", &PatientId::from("P1")).unwrap();
        t.assign_provider("dr-ito", &PatientId::from("P2")).unwrap();
        t.assign_room("room-1", &PatientId::from("P1")).unwrap();

        let summary = t.summary();
        assert_eq!(summary.rooms, 2);
        assert_eq!(summary.equipment, 1);
        assert_eq!(summary.providers, 1);
        assert_eq!(summary.staff, 1);
        // Five resources plus two patient vertices.
        assert_eq!(summary.total_resources, 7);
        assert_eq!(summary.bottlenecks[0], (ResourceId::from("dr-ito"), 2));
        assert_eq!(summary.bottlenecks, t.bottlenecks());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use crate::{load_edges_csv, load_edges_reader, GraphError};

    #[test]
    fn reads_edges_with_default_weight() {
        let csv = "from_vertex,to_vertex,weight\n\
                   nurse-station,room-1,2.5\n\
                   nurse-station,room-2,4\n\
                   room-1,room-2,\n";
        let g = load_edges_reader(Cursor::new(csv)).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.vertices()[0].as_str(), "nurse-station");
        let n: Vec<_> = g.neighbors("room-1").map(|(v, w)| (v.as_str(), w)).collect();
        assert_eq!(n, vec![("nurse-station", 2.5), ("room-2", 1.0)]);
        // 2.5 + 1 beats the direct 4.
        assert_eq!(g.shortest_path("nurse-station", "room-2").len(), 3);
    }

    #[test]
    fn weight_column_is_optional() {
        let csv = "from_vertex,to_vertex\nA,B\n";
        let g = load_edges_reader(Cursor::new(csv)).unwrap();
        assert_eq!(g.neighbors("A").next().map(|(_, w)| w), Some(1.0));
    }

    #[test]
    fn rejects_negative_weight() {
        let csv = "from_vertex,to_vertex,weight\nA,B,1\nB,C,-2\n";
        let err = load_edges_reader(Cursor::new(csv)).unwrap_err();
        match err {
            GraphError::Parse(msg) => assert!(msg.starts_with("row 3:"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_row() {
        let csv = "from_vertex,to_vertex,weight\nA,B,heavy\n";
        assert!(matches!(load_edges_reader(Cursor::new(csv)), Err(GraphError::Parse(_))));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "from_vertex,to_vertex,weight").unwrap();
        writeln!(file, "triage,room-1,3").unwrap();
        file.flush().unwrap();
        let g = load_edges_csv(file.path()).unwrap();
        assert_eq!(g.degree_of("triage"), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_edges_csv(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
