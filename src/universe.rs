// Copyright 2025 Cowboy AI, LLC.

//! Named shape graphs
//!
//! The small graphs every predicate and operation is stated over. Element
//! names are positional: nodes are numbered, and an edge from `i` to `j` is
//! called `ij` (with a disambiguating digit where two edges share their
//! endpoints). The shapes are built once and shared.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::graph::Graph;
use crate::identifiers::Name;
use crate::triple::Triple;

fn shape(name: &str, elements: Vec<Triple>) -> Arc<Graph> {
    Arc::new(Graph::from_trusted(Name::identifier(name), elements))
}

fn nodes(names: &[&str]) -> Vec<Triple> {
    names.iter().map(|n| Triple::node(*n)).collect()
}

fn with(mut elements: Vec<Triple>, more: &[&Triple]) -> Vec<Triple> {
    elements.extend(more.iter().map(|t| Triple::clone(t)));
    elements
}

/// Name of the universe all shapes live in
pub static UNIVERSE: Lazy<Name> = Lazy::new(|| Name::identifier("UNIVERSE"));

/// The graph without elements
pub static EMPTY: Lazy<Arc<Graph>> = Lazy::new(|| shape("EMPTY", Vec::new()));

/// The node of [`ONE_NODE`]
pub static ONE_NODE_THE_NODE: Lazy<Name> = Lazy::new(|| Name::identifier("0"));

/// A single node `0`
pub static ONE_NODE: Lazy<Arc<Graph>> = Lazy::new(|| shape("NODE", nodes(&["0"])));

/// Two unconnected nodes `0` and `1`
pub static PAIR: Lazy<Arc<Graph>> = Lazy::new(|| shape("PAIR", nodes(&["0", "1"])));

/// The edge of [`LOOP`]
pub static LOOP_THE_LOOP: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "00", "0"));

/// `0 -00-> 0`
pub static LOOP: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("LOOP", with(nodes(&["0"]), &[&*LOOP_THE_LOOP])));

/// Source node of [`ARROW`]
pub static ARROW_SRC_NAME: Lazy<Name> = Lazy::new(|| Name::identifier("0"));
/// Edge label of [`ARROW`]
pub static ARROW_LBL_NAME: Lazy<Name> = Lazy::new(|| Name::identifier("01"));
/// Target node of [`ARROW`]
pub static ARROW_TRG_NAME: Lazy<Name> = Lazy::new(|| Name::identifier("1"));

/// The edge of [`ARROW`]
pub static ARROW_THE_ARROW: Lazy<Triple> = Lazy::new(|| {
    Triple::new(
        Name::clone(&ARROW_SRC_NAME),
        Name::clone(&ARROW_LBL_NAME),
        Name::clone(&ARROW_TRG_NAME),
    )
});

/// `0 -01-> 1`, the walking arrow
pub static ARROW: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("2", with(nodes(&["0", "1"]), &[&*ARROW_THE_ARROW])));

/// Left edge of [`CELL`]
pub static CELL_LHS: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "010", "1"));
/// Right edge of [`CELL`]
pub static CELL_RHS: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "011", "1"));

/// Two parallel edges `0 -010-> 1` and `0 -011-> 1`
pub static CELL: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("CELL", with(nodes(&["0", "1"]), &[&*CELL_LHS, &*CELL_RHS])));

/// Forward edge of [`CYCLE`]
pub static CYCLE_FWD: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "01", "1"));
/// Backward edge of [`CYCLE`]
pub static CYCLE_BWD: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "10", "0"));

/// `0 -01-> 1 -10-> 0`
pub static CYCLE: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("CYCLE", with(nodes(&["0", "1"]), &[&*CYCLE_FWD, &*CYCLE_BWD])));

/// First edge of [`CHAIN`]
pub static CHAIN_FST: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "01", "1"));
/// Second edge of [`CHAIN`]
pub static CHAIN_SND: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "12", "2"));

/// `0 -01-> 1 -12-> 2`
pub static CHAIN: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "CHAIN",
        with(nodes(&["0", "1", "2"]), &[&*CHAIN_FST, &*CHAIN_SND]),
    )
});

/// Hypotenuse of [`TRIANGLE`]
pub static TRIANGLE_HYP: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "02", "2"));

/// [`CHAIN`] closed by `0 -02-> 2`
pub static TRIANGLE: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "TRIANGLE",
        with(
            nodes(&["0", "1", "2"]),
            &[&*CHAIN_FST, &*CHAIN_SND, &*TRIANGLE_HYP],
        ),
    )
});

/// Left leg of [`SPAN`]
pub static SPAN_LEFT_LEG: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "01", "1"));
/// Right leg of [`SPAN`]
pub static SPAN_RIGHT_LEG: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "02", "2"));

/// `1 <-01- 0 -02-> 2`
pub static SPAN: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "SPAN",
        with(nodes(&["0", "1", "2"]), &[&*SPAN_LEFT_LEG, &*SPAN_RIGHT_LEG]),
    )
});

/// Left leg of [`COSPAN`]
pub static COSPAN_LEFT_LEG: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "10", "0"));
/// Right leg of [`COSPAN`]
pub static COSPAN_RIGHT_LEG: Lazy<Triple> = Lazy::new(|| Triple::edge("2", "20", "0"));

/// `1 -10-> 0 <-20- 2`
pub static COSPAN: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "COSPAN",
        with(
            nodes(&["0", "1", "2"]),
            &[&*COSPAN_LEFT_LEG, &*COSPAN_RIGHT_LEG],
        ),
    )
});

/// The edge closing [`INCIDENCE_TRIANGLE`]
pub static INCIDENCE_TRIANGLE_HYP: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "12", "2"));

/// [`COSPAN`] plus `1 -12-> 2`
pub static INCIDENCE_TRIANGLE: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "INCIDENCE_TRIANGLE",
        with(
            nodes(&["0", "1", "2"]),
            &[&*COSPAN_LEFT_LEG, &*COSPAN_RIGHT_LEG, &*INCIDENCE_TRIANGLE_HYP],
        ),
    )
});

/// A commuting-square shape `0 -> 1 -> 3` and `0 -> 2 -> 3`
pub static SQUARE: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "SQUARE",
        with(
            nodes(&["0", "1", "2", "3"]),
            &[
                &Triple::edge("0", "01", "1"),
                &Triple::edge("0", "02", "2"),
                &Triple::edge("1", "13", "3"),
                &Triple::edge("2", "23", "3"),
            ],
        ),
    )
});

/// Mediator of [`EQUALIZER_DIAGRAM`]
pub static EQUALIZER_MEDIATOR: Lazy<Triple> = Lazy::new(|| Triple::edge("2", "20", "0"));

/// [`CELL`] plus the equalizing object `2 -20-> 0`
pub static EQUALIZER_DIAGRAM: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "EQUALIZER_DIAGRAM",
        with(
            nodes(&["0", "1", "2"]),
            &[&*CELL_LHS, &*CELL_RHS, &*EQUALIZER_MEDIATOR],
        ),
    )
});

/// Mediator of [`COEQUALIZER_DIAGRAM`]
pub static COEQUALIZER_MEDIATOR: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "12", "2"));

/// [`CELL`] plus the coequalizing object `1 -12-> 2`
pub static COEQUALIZER_DIAGRAM: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "COEQUALIZER_DIAGRAM",
        with(
            nodes(&["0", "1", "2"]),
            &[&*CELL_LHS, &*CELL_RHS, &*COEQUALIZER_MEDIATOR],
        ),
    )
});

/// Left comparator leg of [`PRODUCT_MEDIATOR_DIAGRAM`]
pub static PRODUCT_COMPARATOR_LEFT: Lazy<Triple> = Lazy::new(|| Triple::edge("3", "31", "1"));
/// Right comparator leg of [`PRODUCT_MEDIATOR_DIAGRAM`]
pub static PRODUCT_COMPARATOR_RIGHT: Lazy<Triple> = Lazy::new(|| Triple::edge("3", "32", "2"));
/// Mediator of [`PRODUCT_MEDIATOR_DIAGRAM`]
pub static PRODUCT_MEDIATOR: Lazy<Triple> = Lazy::new(|| Triple::edge("3", "30", "0"));

/// [`SPAN`] with a comparator span from `3` and its mediator `3 -30-> 0`
pub static PRODUCT_MEDIATOR_DIAGRAM: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "PRODUCT_MEDIATOR_DIAGRAM",
        with(
            nodes(&["0", "1", "2", "3"]),
            &[
                &*SPAN_LEFT_LEG,
                &*SPAN_RIGHT_LEG,
                &*PRODUCT_COMPARATOR_LEFT,
                &*PRODUCT_COMPARATOR_RIGHT,
                &*PRODUCT_MEDIATOR,
            ],
        ),
    )
});

/// Left comparator leg of [`COPRODUCT_MEDIATOR_DIAGRAM`]
pub static COPRODUCT_COMPARATOR_LEFT: Lazy<Triple> = Lazy::new(|| Triple::edge("1", "13", "3"));
/// Right comparator leg of [`COPRODUCT_MEDIATOR_DIAGRAM`]
pub static COPRODUCT_COMPARATOR_RIGHT: Lazy<Triple> = Lazy::new(|| Triple::edge("2", "23", "3"));
/// Mediator of [`COPRODUCT_MEDIATOR_DIAGRAM`]
pub static COPRODUCT_MEDIATOR: Lazy<Triple> = Lazy::new(|| Triple::edge("0", "03", "3"));

/// [`COSPAN`] with a comparator cospan into `3` and its mediator `0 -03-> 3`
pub static COPRODUCT_MEDIATOR_DIAGRAM: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "COPRODUCT_MEDIATOR_DIAGRAM",
        with(
            nodes(&["0", "1", "2", "3"]),
            &[
                &*COSPAN_LEFT_LEG,
                &*COSPAN_RIGHT_LEG,
                &*COPRODUCT_COMPARATOR_LEFT,
                &*COPRODUCT_COMPARATOR_RIGHT,
                &*COPRODUCT_MEDIATOR,
            ],
        ),
    )
});

/// Every shape, in declaration order
pub fn all() -> Vec<Arc<Graph>> {
    vec![
        Arc::clone(&EMPTY),
        Arc::clone(&ONE_NODE),
        Arc::clone(&PAIR),
        Arc::clone(&LOOP),
        Arc::clone(&ARROW),
        Arc::clone(&CELL),
        Arc::clone(&CYCLE),
        Arc::clone(&CHAIN),
        Arc::clone(&TRIANGLE),
        Arc::clone(&SPAN),
        Arc::clone(&COSPAN),
        Arc::clone(&INCIDENCE_TRIANGLE),
        Arc::clone(&SQUARE),
        Arc::clone(&EQUALIZER_DIAGRAM),
        Arc::clone(&COEQUALIZER_DIAGRAM),
        Arc::clone(&PRODUCT_MEDIATOR_DIAGRAM),
        Arc::clone(&COPRODUCT_MEDIATOR_DIAGRAM),
    ]
}

/// Look a shape up by its graph name
pub fn by_name(name: &Name) -> Option<Arc<Graph>> {
    all().into_iter().find(|g| g.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&EMPTY, 0, 0 ; "empty")]
    #[test_case(&ONE_NODE, 1, 0 ; "one node")]
    #[test_case(&PAIR, 2, 0 ; "pair")]
    #[test_case(&LOOP, 1, 1 ; "loop")]
    #[test_case(&ARROW, 2, 1 ; "arrow")]
    #[test_case(&CELL, 2, 2 ; "cell")]
    #[test_case(&CYCLE, 2, 2 ; "cycle")]
    #[test_case(&CHAIN, 3, 2 ; "chain")]
    #[test_case(&TRIANGLE, 3, 3 ; "triangle")]
    #[test_case(&SPAN, 3, 2 ; "span")]
    #[test_case(&COSPAN, 3, 2 ; "cospan")]
    #[test_case(&INCIDENCE_TRIANGLE, 3, 3 ; "incidence triangle")]
    #[test_case(&SQUARE, 4, 4 ; "square")]
    #[test_case(&EQUALIZER_DIAGRAM, 3, 3 ; "equalizer")]
    #[test_case(&COEQUALIZER_DIAGRAM, 3, 3 ; "coequalizer")]
    #[test_case(&PRODUCT_MEDIATOR_DIAGRAM, 4, 5 ; "product mediator")]
    #[test_case(&COPRODUCT_MEDIATOR_DIAGRAM, 4, 5 ; "coproduct mediator")]
    fn test_shape_sizes(shape: &Lazy<Arc<Graph>>, nodes: usize, edges: usize) {
        assert_eq!(shape.nodes().count(), nodes);
        assert_eq!(shape.edges().count(), edges);
        assert!(Graph::dangling_edges(shape.elements()).is_empty());
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(by_name(&Name::identifier("2")), Some(Arc::clone(&ARROW)));
        assert!(by_name(&Name::identifier("NOPE")).is_none());
        let mut names: Vec<_> = all().iter().map(|g| g.name().clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_shapes_share_positional_names() {
        assert!(CHAIN.is_subgraph_of(&TRIANGLE));
        assert!(CELL.is_subgraph_of(&EQUALIZER_DIAGRAM));
        assert!(SPAN.is_subgraph_of(&PRODUCT_MEDIATOR_DIAGRAM));
        assert!(COSPAN.is_subgraph_of(&INCIDENCE_TRIANGLE));
    }
}
