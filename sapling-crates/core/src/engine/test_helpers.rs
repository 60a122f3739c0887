//! Helpers for the tests of propagators.
use crate::engine::State;
use crate::engine::StateStatus;
use crate::variables::IntegerVariable;

impl State {
    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var.clone());
        let actual_ub = self.upper_bound(var.clone());

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}] of {var:?}"
        );
    }

    pub(crate) fn assert_stable(&mut self) {
        assert_eq!(StateStatus::Stable, self.stabilize(), "the state failed");
    }
}
