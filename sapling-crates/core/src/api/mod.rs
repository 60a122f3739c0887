pub mod predicates {
    //! Contains structures which represent certain [predicates](https://en.wikipedia.org/wiki/Predicate_(mathematical_logic)).
    //!
    //! The solver only utilizes the following types of predicates:
    //! - **Predicates over integers** - These [`Predicate`]s specify atomic constraints of the form
    //!   `[x >= v]`, `[x <= v]`, `[x == v]`, and `[x != v]`.
    //!
    //! Predicates are the only way in which the domains of a [`crate::State`] change, both for
    //! the propagators and for the alternatives of a [`crate::branching::Choice`].
    pub use crate::engine::predicates::predicate::Predicate;
    pub use crate::engine::predicates::predicate_constructor::PredicateConstructor;
}

pub mod variables {
    //! Contains the variables which can be created in a [`crate::State`] and the views which can
    //! be derived from them.
    //!
    //! A [`DomainId`] refers to a domain of the store. Through [`TransformableVariable`] it can be
    //! turned into an [`AffineView`] of the form `scale * x + offset`, which can be passed to any
    //! propagator in place of the variable itself.
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::TransformableVariable;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the search engines should stop
    //! even if no definitive conclusions have been made.
    //!
    //! See [`TerminationCondition`] for the available conditions.
    pub use crate::engine::termination::*;
}
