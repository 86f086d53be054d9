/// Generates the shared behavioural suite for a representation.
/// Every graph type must behave identically through the [`Graph`](crate::ops::Graph) interface.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ty, ($($suite:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{
                edge::*, error::GraphError, label::Label, node::*, observer::*, ops::*, repr::*,
                testing::test_graph_ops,
            };
            use fxhash::FxHashSet;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            fn with_nodes(n: usize) -> ($graph, Vec<NodeId>) {
                let mut graph = <$graph>::default();
                let ids = (0..n)
                    .map(|i| graph.add_node(Node::new(i)).unwrap())
                    .collect();
                (graph, ids)
            }

            $(
                test_graph_ops!($graph: $suite);
            )*
        }
    };
    ($graph:ty: Basics) => {
        #[test]
        fn basics() {
            let (mut graph, ids) = with_nodes(4);
            assert_eq!(graph.number_of_nodes(), 4);
            assert_eq!(graph.number_of_edges(), 0);

            graph.add_edge(ids[0], ids[1], Label::from("a")).unwrap();
            graph.add_edge(ids[0], ids[1], Label::from("b")).unwrap();
            graph.add_edge(ids[1], ids[0], Label::from("a")).unwrap();
            graph.add_edge(ids[2], ids[2], Label::default()).unwrap();
            graph.add_edge_at(3, 0, Label::from(7)).unwrap();
            assert_eq!(graph.number_of_edges(), 5);

            match graph.add_edge(ids[0], ids[1], Label::from("a")) {
                Err(GraphError::DuplicateEdge { edge }) => {
                    assert_eq!(edge.key(), EdgeKey::new(ids[0], ids[1], "a"))
                }
                other => panic!("expected a duplicate edge, got {other:?}"),
            }
            assert_eq!(graph.number_of_edges(), 5);

            assert!(graph.edge_exists(ids[0], ids[1], &Label::from("b")));
            assert!(!graph.edge_exists(ids[1], ids[0], &Label::from("b")));
            assert!(graph.has_edge_between(ids[3], ids[0]));
            assert!(!graph.has_edge_between(ids[0], ids[3]));

            assert_eq!(graph.outgoing_edges(ids[0]).unwrap().len(), 2);
            assert_eq!(graph.incoming_edges(ids[0]).unwrap().len(), 2);
            assert_eq!(graph.incoming_edges(ids[2]).unwrap().len(), 1);
            assert_eq!(graph.neighbours(ids[0]).unwrap(), vec![ids[1]]);
            assert_eq!(graph.neighbours(ids[2]).unwrap(), vec![ids[2]]);

            let removed = graph.remove_edge(&EdgeKey::new(ids[0], ids[1], "b")).unwrap();
            assert_eq!(removed.label, Label::from("b"));
            assert!(matches!(
                graph.remove_edge(&EdgeKey::new(ids[0], ids[1], "b")),
                Err(GraphError::EdgeNotFound { .. })
            ));

            let stranger = NodeId::fresh();
            assert!(matches!(
                graph.add_edge(ids[0], stranger, Label::default()),
                Err(GraphError::NodeNotFound { .. })
            ));
            assert!(matches!(
                graph.remove_node_at(17),
                Err(GraphError::NodeIndexOutOfRange { index: 17, len: 4 })
            ));

            graph.remove_node(ids[0]).unwrap();
            assert_eq!(graph.number_of_nodes(), 3);
            assert_eq!(graph.number_of_edges(), 1);
            assert_eq!(graph.node_to_index(ids[3]), Some(2));

            graph.remove_edges();
            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(graph.number_of_nodes(), 3);

            graph.remove_nodes();
            assert!(graph.is_empty());
        }
    };
    ($graph:ty: NodeIdentity) => {
        #[test]
        fn node_identity() {
            let (mut graph, ids) = with_nodes(2);
            let copy = graph.node(ids[0]).unwrap().clone();
            assert!(matches!(
                graph.add_node(copy),
                Err(GraphError::DuplicateNode { .. })
            ));

            graph.set_node_label(ids[1], Label::from("renamed")).unwrap();
            graph.set_node_coords(ids[1], Point::new(3, 4)).unwrap();
            let node = graph.node(ids[1]).unwrap();
            assert_eq!(node.label, Label::from("renamed"));
            assert_eq!(node.coords, Point::new(3, 4));
            assert_eq!(graph.node_ids(), ids);
        }
    };
    ($graph:ty: ChangeLog) => {
        #[test]
        fn change_log() {
            let (mut graph, ids) = with_nodes(3);
            graph.add_edge(ids[0], ids[1], Label::default()).unwrap();
            graph.add_edge(ids[1], ids[2], Label::default()).unwrap();

            let changes = graph.drain_changes();
            assert_eq!(changes.added_nodes, ids);
            assert_eq!(changes.added_edges.len(), 2);
            assert!(graph.drain_changes().is_empty());

            graph.remove_node(ids[1]).unwrap();
            let changes = graph.drain_changes();
            assert_eq!(changes.removed_nodes, vec![ids[1]]);
            let removed: FxHashSet<EdgeKey> = changes.removed_edges.into_iter().collect();
            assert_eq!(
                removed,
                [
                    EdgeKey::new(ids[0], ids[1], ""),
                    EdgeKey::new(ids[1], ids[2], "")
                ]
                .into_iter()
                .collect()
            );
        }
    };
    ($graph:ty: Observers) => {
        #[test]
        fn observers() {
            use std::rc::Rc;

            let (mut graph, ids) = with_nodes(3);
            graph.add_edge(ids[0], ids[1], Label::from("x")).unwrap();
            let key = EdgeKey::new(ids[0], ids[1], "x");

            let node_recorder = Rc::new(EventRecorder::default());
            let edge_recorder = Rc::new(EventRecorder::default());
            let node_observer: Rc<dyn GraphObserver> = node_recorder.clone();
            let edge_observer: Rc<dyn GraphObserver> = edge_recorder.clone();
            graph.subscribe_node(ids[1], Rc::downgrade(&node_observer)).unwrap();
            graph.subscribe_edge(&key, Rc::downgrade(&edge_observer)).unwrap();

            assert!(graph.subscribe_edge(&EdgeKey::new(ids[1], ids[0], "x"), Rc::downgrade(&edge_observer)).is_err());

            graph.set_edge_color(&key, crate::color::Rgb::ORANGE).unwrap();
            assert_eq!(edge_recorder.take(), vec![GraphEvent::EdgeChanged(key.clone())]);
            assert_eq!(graph.edge(&key).unwrap().color, crate::color::Rgb::ORANGE);

            graph.remove_node(ids[1]).unwrap();
            assert_eq!(edge_recorder.take(), vec![GraphEvent::EdgeRemoving(key.clone())]);
            assert_eq!(node_recorder.take(), vec![GraphEvent::NodeRemoving(ids[1])]);

            // registrations are gone with their entities
            let again = graph.add_node(Node::new("again")).unwrap();
            graph.add_edge(ids[0], again, Label::from("x")).unwrap();
            assert!(node_recorder.take().is_empty());
            assert!(edge_recorder.take().is_empty());
        }
    };
    ($graph:ty: Recreate) => {
        #[test]
        fn recreate() {
            let (mut source, ids) = with_nodes(3);
            source.set_name("source".to_string());
            source.add_edge(ids[0], ids[1], Label::from(4)).unwrap();
            source.add_edge(ids[2], ids[2], Label::default()).unwrap();
            source.set_node_color(ids[2], crate::color::Rgb::RED).unwrap();

            let mut list = ListGraph::new();
            list.recreate_from(&source).unwrap();
            let mut copy = <$graph>::default();
            copy.recreate_from(&list).unwrap();

            assert_eq!(copy.name(), "source");
            assert_eq!(copy.node_ids(), ids);
            assert_eq!(copy.integer_matrix(), source.integer_matrix());
            assert_eq!(copy.node(ids[2]).unwrap().color, crate::color::Rgb::RED);
            assert!(copy.edge_exists(ids[0], ids[1], &Label::from(4)));

            let mut matrix = IntegerMatrix::with_nodes(2);
            matrix.add_edge(0, 1).unwrap();
            matrix.add_edge(0, 1).unwrap();
            matrix.add_edge(1, 1).unwrap();
            copy.recreate_from_matrix(&matrix).unwrap();
            assert_eq!(copy.number_of_nodes(), 2);
            assert_eq!(copy.number_of_edges(), 3);
            assert_eq!(copy.integer_matrix(), matrix);
            assert!(copy.node_ids().iter().all(|id| !ids.contains(id)));
        }
    };
    ($graph:ty: RandomOperations) => {
        /// Applies a random sequence of mutations and compares against a multiplicity model
        #[test]
        fn random_operations_match_model() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);
            let labels = [Label::default(), Label::from("a"), Label::from("b")];

            for _ in 0..20 {
                let mut graph = <$graph>::default();
                let mut ids: Vec<NodeId> = Vec::new();
                let mut keys: FxHashSet<EdgeKey> = FxHashSet::default();
                let mut model = IntegerMatrix::new();

                for step in 0..300 {
                    match rng.random_range(0..10) {
                        0..2 => {
                            ids.push(graph.add_node(Node::new(step)).unwrap());
                            model.add_node(step);
                        }
                        2 if !ids.is_empty() => {
                            let index = rng.random_range(0..ids.len());
                            let id = ids.remove(index);
                            graph.remove_node(id).unwrap();
                            model.remove_node(index).unwrap();
                            keys.retain(|k| k.source != id && k.target != id);
                        }
                        3..7 if !ids.is_empty() => {
                            let (s, t) = (rng.random_range(0..ids.len()), rng.random_range(0..ids.len()));
                            let label = labels[rng.random_range(0..labels.len())].clone();
                            let key = EdgeKey::new(ids[s], ids[t], label.clone());
                            let result = graph.add_edge(ids[s], ids[t], label);
                            if keys.insert(key) {
                                result.unwrap();
                                model.add_edge(s, t).unwrap();
                            } else {
                                assert!(matches!(result, Err(GraphError::DuplicateEdge { .. })));
                            }
                        }
                        7..10 if !keys.is_empty() => {
                            let key = keys.iter().nth(rng.random_range(0..keys.len())).unwrap().clone();
                            keys.remove(&key);
                            graph.remove_edge(&key).unwrap();
                            let s = ids.iter().position(|&id| id == key.source).unwrap();
                            let t = ids.iter().position(|&id| id == key.target).unwrap();
                            assert!(model.remove_edge(s, t).unwrap());
                        }
                        _ => {}
                    }

                    assert_eq!(graph.number_of_nodes(), ids.len());
                    assert_eq!(graph.number_of_edges(), keys.len());
                    assert_eq!(graph.integer_matrix(), model);
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
