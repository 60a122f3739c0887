//! Contains the variables and views propagators operate on.
mod affine_view;
mod domain_id;
mod integer_variable;
mod transformable_variable;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub(crate) use domain_id::StoreId;
pub use integer_variable::IntegerVariable;
pub use transformable_variable::TransformableVariable;
