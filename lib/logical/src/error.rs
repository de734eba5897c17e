/// A result of compiling a [Group](crate::Group).
pub type GroupCompileResult<T> = Result<T, GroupCompileError>;

/// An error raised while assembling a [GroupExpression](crate::GroupExpression).
///
/// Both variants are violated preconditions. The compiler only joins and conjoins non-empty sets,
/// so these errors only surface when the helpers are called directly with empty input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GroupCompileError {
    /// A join tree was requested for zero patterns.
    #[error("Can't build a join of zero patterns.")]
    EmptyJoin,
    /// A conjunction was requested for zero conditions.
    #[error("Can't build a conjunction of zero conditions.")]
    EmptyConjunction,
}
