/// Builds affine views `scale * x + offset` over a variable.
///
/// A view has no domain of its own: reading it maps the bounds of the underlying domain, and a
/// predicate over it is turned into a predicate over that domain. `x.scaled(-1).offset(3)`
/// therefore behaves as `3 - x` for every propagator, brancher and objective.
pub trait TransformableVariable<View> {
    /// The view `scale * self`.
    ///
    /// Only multiples of `scale` are in the domain of the view: for `dom(x) = {1, 2}` the domain
    /// of `x.scaled(2)` is `{2, 4}`.
    fn scaled(&self, scale: i32) -> View;

    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> View;

    /// The view `-self`, which swaps the lower and the upper bound.
    fn negated(&self) -> View {
        self.scaled(-1)
    }
}
