use proptest::prelude::*;
use sapling_core::branching::BranchingOptions;
use sapling_core::branching::ValueSelection;
use sapling_core::branching::VariableSelection;
use sapling_core::constraints;
use sapling_core::constraints::Constraint;
use sapling_core::search::DepthFirstSearch;
use sapling_core::search::SearchOptions;
use sapling_core::search::SearchStatus;
use sapling_core::variables::DomainId;
use sapling_core::variables::TransformableVariable;
use sapling_core::State;

const NUM_QUEENS: i32 = 6;

fn create_queens() -> (State, Vec<DomainId>) {
    let mut state = State::default();
    let queens: Vec<DomainId> = (0..NUM_QUEENS)
        .map(|_| state.new_bounded_integer(0, NUM_QUEENS - 1))
        .collect();

    for offset in [0, 1, -1] {
        let diagonal = queens
            .iter()
            .zip(0..)
            .map(|(queen, index)| queen.offset(offset * index))
            .collect::<Vec<_>>();
        constraints::all_different(diagonal)
            .post(&mut state)
            .expect("feasible");
    }

    (state, queens)
}

#[derive(Debug, PartialEq, Eq)]
struct Exploration {
    solutions: Vec<Vec<i32>>,
    nodes: u64,
    failures: u64,
}

fn explore(branching: BranchingOptions, options: SearchOptions) -> Exploration {
    let (state, queens) = create_queens();
    let mut search = DepthFirstSearch::new(state, branching.create_brancher(&queens), options)
        .expect("valid options")
        .with_random(branching.create_random());

    let solutions = search.by_ref().map(|solution| solution.values()).collect();
    assert_eq!(SearchStatus::Exhausted, search.status());

    let statistics = search.statistics();
    Exploration {
        solutions,
        nodes: statistics.nodes,
        failures: statistics.failures,
    }
}

fn value_selection() -> impl Strategy<Value = ValueSelection> {
    prop_oneof![
        Just(ValueSelection::InDomainMin),
        Just(ValueSelection::InDomainMax),
        Just(ValueSelection::InDomainSplit),
        Just(ValueSelection::InDomainRandom),
    ]
}

fn variable_selection() -> impl Strategy<Value = VariableSelection> {
    prop_oneof![
        Just(VariableSelection::InputOrder),
        Just(VariableSelection::FirstFail),
        Just(VariableSelection::AntiFirstFail),
        Just(VariableSelection::MostConstrained),
    ]
}

#[test]
fn six_queens_has_four_solutions() {
    let exploration = explore(BranchingOptions::default(), SearchOptions::default());

    assert_eq!(4, exploration.solutions.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recomputation_explores_the_same_tree_as_copying(
        copying_distance in 1u32..10,
        adaptive_distance in 1u32..10,
        variable_selection in variable_selection(),
        value_selection in value_selection(),
        seed in any::<u64>(),
    ) {
        let branching = BranchingOptions {
            variable_selection,
            value_selection,
            seed,
        };

        let copying = explore(
            branching,
            SearchOptions {
                copying_distance: 1,
                ..Default::default()
            },
        );
        let recomputing = explore(
            branching,
            SearchOptions {
                copying_distance,
                adaptive_distance,
                ..Default::default()
            },
        );

        prop_assert_eq!(copying, recomputing);
    }
}
