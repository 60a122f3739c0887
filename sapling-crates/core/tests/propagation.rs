use sapling_core::constraints;
use sapling_core::constraints::Constraint;
use sapling_core::predicate;
use sapling_core::variables::DomainId;
use sapling_core::variables::TransformableVariable;
use sapling_core::AgendaOrder;
use sapling_core::ConstraintOperationError;
use sapling_core::State;
use sapling_core::StateStatus;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn domain_values(state: &State) -> Vec<Vec<i32>> {
    state
        .domains()
        .map(|domain| {
            (state.lower_bound(domain)..=state.upper_bound(domain))
                .filter(|&value| state.contains(domain, value))
                .collect()
        })
        .collect()
}

/// A model with several interacting propagators over six variables.
fn create_model(order: AgendaOrder) -> (State, Vec<DomainId>) {
    let mut state = State::default();
    state.set_agenda_order(order);

    let xs: Vec<DomainId> = (0..6).map(|_| state.new_bounded_integer(0, 5)).collect();

    constraints::all_different(xs[0..4].to_vec())
        .post(&mut state)
        .expect("feasible");
    constraints::equals(xs[4], xs[0].offset(1))
        .post(&mut state)
        .expect("feasible");
    constraints::less_than_or_equals(vec![xs[0], xs[1], xs[5]], 6)
        .post(&mut state)
        .expect("feasible");
    constraints::negative_table(
        vec![xs[2], xs[3]],
        vec![vec![0, 1], vec![1, 0], vec![2, 3]],
    )
    .post(&mut state)
    .expect("feasible");
    constraints::not_equals(xs[5], xs[4])
        .post(&mut state)
        .expect("feasible");

    (state, xs)
}

#[test]
fn equality_prunes_bounds_and_is_subsumed_once_fixed() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 9);
    let y = state.new_bounded_integer(0, 9);

    constraints::equals(x, y.offset(1))
        .post(&mut state)
        .expect("feasible");

    assert_eq!((1, 9), (state.lower_bound(x), state.upper_bound(x)));
    assert_eq!((0, 8), (state.lower_bound(y), state.upper_bound(y)));
    assert_eq!(1, state.num_propagators());

    let _ = state.post(predicate!(y == 5)).expect("5 is in the domain of y");
    assert_eq!(StateStatus::Stable, state.stabilize());

    assert_eq!(Some(6), state.fixed_value(x));
    assert_eq!(0, state.num_propagators());
    assert!(state.audit_subscriptions().is_ok());
}

#[test]
fn not_equals_over_equal_fixed_values_fails() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 3);
    let y = state.new_bounded_integer(0, 3);

    constraints::not_equals(x, y)
        .post(&mut state)
        .expect("feasible");

    let _ = state.post(predicate!(x == 3)).expect("in domain");
    let _ = state.post(predicate!(y == 3)).expect("in domain");

    assert_eq!(StateStatus::Failed, state.stabilize());
    assert!(state.is_failed());

    // Failure is sticky.
    assert_eq!(StateStatus::Failed, state.stabilize());
    assert!(state.post(predicate!(x >= 0)).is_err());
    assert_eq!(
        Err(ConstraintOperationError::InfeasibleState),
        constraints::equals(x, y).post(&mut state)
    );
}

#[test]
fn posting_an_infeasible_constraint_is_reported() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 3);
    let y = state.new_bounded_integer(5, 8);

    assert_eq!(
        Err(ConstraintOperationError::InfeasiblePropagator),
        constraints::equals(x, y).post(&mut state)
    );
    assert!(state.is_failed());
}

#[test]
fn stabilize_is_idempotent() {
    init_logging();

    let (mut state, xs) = create_model(AgendaOrder::Fifo);
    let _ = state.post(predicate!(xs[0] == 1)).expect("in domain");
    assert_eq!(StateStatus::Stable, state.stabilize());

    let domains = domain_values(&state);
    let propagations = state.propagation_count();

    assert_eq!(StateStatus::Stable, state.stabilize());
    assert!(state.is_stable());
    assert_eq!(domains, domain_values(&state));
    assert_eq!(propagations, state.propagation_count());
}

#[test]
fn fixpoint_does_not_depend_on_agenda_order() {
    init_logging();

    let decisions = [
        vec![],
        vec![(0, 1)],
        vec![(0, 2), (2, 3)],
        vec![(1, 0), (2, 4), (5, 2)],
    ];

    for decision in decisions {
        let (mut fifo, xs) = create_model(AgendaOrder::Fifo);
        let (mut lifo, _) = create_model(AgendaOrder::Lifo);

        for &(index, value) in &decision {
            let _ = fifo.post(predicate!(xs[index] == value));
            let _ = lifo.post(predicate!(xs[index] == value));
        }

        let fifo_status = fifo.stabilize();
        let lifo_status = lifo.stabilize();

        assert_eq!(fifo_status, lifo_status, "decisions {decision:?}");
        if fifo_status == StateStatus::Stable {
            assert_eq!(
                domain_values(&fifo),
                domain_values(&lifo),
                "decisions {decision:?}"
            );
        }
    }
}

#[test]
fn clones_behave_like_the_original() {
    init_logging();

    let (state, xs) = create_model(AgendaOrder::Fifo);

    for share in [true, false] {
        let mut original = state.clone_state(share);
        let mut clone = original.clone_state(share);
        assert_eq!(domain_values(&original), domain_values(&clone));

        let _ = original.post(predicate!(xs[2] == 2));
        let _ = clone.post(predicate!(xs[2] == 2));

        assert_eq!(original.stabilize(), clone.stabilize());
        assert_eq!(domain_values(&original), domain_values(&clone));
        assert_eq!(original.num_propagators(), clone.num_propagators());
    }
}

#[test]
fn changes_to_a_clone_do_not_affect_the_original() {
    init_logging();

    let (state, xs) = create_model(AgendaOrder::Fifo);
    let before = domain_values(&state);

    let mut clone = state.clone_state(true);
    let _ = clone.post(predicate!(xs[0] == 0));
    let _ = clone.post(predicate!(xs[1] == 0));

    assert_eq!(StateStatus::Failed, clone.stabilize());
    assert!(!state.is_failed());
    assert_eq!(before, domain_values(&state));
}

#[test]
fn failures_are_shared_between_clones() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 3);
    let y = state.new_bounded_integer(0, 3);
    constraints::not_equals(x, y)
        .post(&mut state)
        .expect("feasible");

    let mut clone = state.clone_state(true);
    let _ = clone.post(predicate!(x == 1));
    let _ = clone.post(predicate!(y == 1));
    assert_eq!(StateStatus::Failed, clone.stabilize());

    assert_eq!(2, state.accumulated_failure_count(x));
    assert_eq!(
        state.accumulated_failure_count(x),
        clone.accumulated_failure_count(x)
    );
}

#[test]
fn subscriptions_match_watch_lists() {
    init_logging();

    let (mut state, xs) = create_model(AgendaOrder::Fifo);
    assert!(state.audit_subscriptions().is_ok());

    let _ = state.post(predicate!(xs[0] == 3));
    let _ = state.post(predicate!(xs[2] == 4));
    assert_eq!(StateStatus::Stable, state.stabilize());
    assert!(state.audit_subscriptions().is_ok());

    let clone = state.clone_state(false);
    assert!(clone.audit_subscriptions().is_ok());
}

#[test]
#[should_panic(expected = "does not belong to the store")]
fn constraints_over_variables_of_another_store_are_rejected() {
    init_logging();

    let mut state = State::default();
    let a = state.new_bounded_integer(0, 9);
    let _ = state.new_bounded_integer(5, 9);

    let mut other = State::default();
    let _ = other.new_bounded_integer(0, 1);
    let foreign = other.new_bounded_integer(0, 1);

    let _ = constraints::equals(a, foreign).post(&mut state);
}

#[test]
#[should_panic(expected = "does not belong to the store")]
fn predicates_over_variables_of_another_store_are_rejected() {
    init_logging();

    let mut state = State::default();
    let _ = state.new_bounded_integer(0, 9);

    let mut other = State::default();
    let foreign = other.new_bounded_integer(0, 9);

    let _ = state.post(predicate!(foreign >= 3));
}

#[test]
fn clones_accept_the_variables_of_their_original() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 9);
    let y = state.new_bounded_integer(0, 9);
    assert_eq!(StateStatus::Stable, state.stabilize());

    let mut clone = state.clone_state(true);
    constraints::less_than_or_equals(vec![x, y], 4)
        .post(&mut clone)
        .expect("feasible");

    assert_eq!(4, clone.upper_bound(x));
    assert_eq!(9, state.upper_bound(x));
    assert_eq!(clone.domains().collect::<Vec<_>>(), vec![x, y]);
}

#[test]
fn clones_can_be_explored_on_other_threads() {
    init_logging();

    let mut state = State::default();
    let x = state.new_bounded_integer(0, 3);
    let y = state.new_bounded_integer(0, 3);
    constraints::not_equals(x, y)
        .post(&mut state)
        .expect("feasible");

    let mut clone = state.clone_state(true);
    let status = std::thread::spawn(move || {
        let _ = clone.post(predicate!(x == 2));
        let _ = clone.post(predicate!(y == 2));
        clone.stabilize()
    })
    .join()
    .expect("the thread does not panic");

    assert_eq!(StateStatus::Failed, status);
    assert_eq!(2, state.accumulated_failure_count(x));
}
