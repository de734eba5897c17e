use crate::error::{GroupCompileError, GroupCompileResult};
use crate::expr::{Condition, GroupExpression};
use crate::group::Group;
use std::hash::Hash;
use tracing::{debug, trace};

/// Compiles `group` into a single [GroupExpression].
///
/// Returns [None] if neither the group nor any of its descendants contribute a pattern or a
/// filter.
///
/// # Panics
///
/// Panics if an internal invariant of the compiler is violated. This never happens for a group
/// that was assembled through the public API of [Group].
#[allow(clippy::panic, reason = "A failure is a bug in the compiler, not in the input")]
pub fn compile<P, C>(group: &Group<P, C>) -> Option<GroupExpression<P, C>>
where
    P: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    match try_compile(group) {
        Ok(expression) => expression,
        Err(error) => panic!(
            "Could not compile group with {} patterns, {} filters, and {} children: {error}",
            group.patterns().len(),
            group.filters().len(),
            group.children().len()
        ),
    }
}

/// Compiles `group` into a single [GroupExpression]. See [compile].
pub fn try_compile<P, C>(group: &Group<P, C>) -> GroupCompileResult<Option<GroupExpression<P, C>>>
where
    P: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    debug!(
        patterns = group.patterns().len(),
        filters = group.filters().len(),
        children = group.children().len(),
        "Compiling group"
    );
    let result = compile_inner(group, true)?;
    debug!(empty = result.is_none(), "Compiled group");
    Ok(result)
}

/// Compiles `group`.
///
/// If `apply_filters` is false, the filters of a group with own patterns are not applied. The
/// caller is then responsible for using them as a join condition.
fn compile_inner<P, C>(
    group: &Group<P, C>,
    apply_filters: bool,
) -> GroupCompileResult<Option<GroupExpression<P, C>>>
where
    P: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    let has_patterns = !group.patterns().is_empty();
    let filter_only = !has_patterns && !group.filters().is_empty();

    let mut result = if has_patterns {
        let base = inner_join_tree(group.patterns())?;
        Some(if apply_filters {
            apply_filter_chain(base, group.filters())
        } else {
            base
        })
    } else if filter_only && group.children().is_empty() {
        Some(filter_empty_source(group)?)
    } else {
        None
    };

    for child in group.children() {
        result = match result {
            None => {
                let Some(expression) = compile_inner(child, true)? else {
                    trace!("Skipping empty child group");
                    continue;
                };

                if filter_only {
                    trace!("Applying filters of the parent group to its first child");
                    Some(GroupExpression::filter(expression, conjoin(group.filters())?))
                } else {
                    Some(expression)
                }
            }
            Some(lhs) => Some(fold_child(lhs, child)?),
        };
    }

    // Only reachable for a filter-only group whose children are all empty.
    if result.is_none() && filter_only {
        result = Some(filter_empty_source(group)?);
    }

    Ok(result)
}

/// Folds `child` into the already compiled `lhs`.
///
/// An optional child with filters becomes a left join whose condition is the conjunction of the
/// child's filters. In all other cases the child is compiled with its filters applied.
fn fold_child<P, C>(
    lhs: GroupExpression<P, C>,
    child: &Group<P, C>,
) -> GroupCompileResult<GroupExpression<P, C>>
where
    P: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    if child.is_optional() && !child.filters().is_empty() {
        trace!("Folding optional child group with a join condition");
        let condition = conjoin(child.filters())?;
        let Some(rhs) = compile_inner(child, false)? else {
            return Ok(lhs);
        };
        return Ok(GroupExpression::left_join(lhs, rhs, Some(condition)));
    }

    let Some(rhs) = compile_inner(child, true)? else {
        trace!("Skipping empty child group");
        return Ok(lhs);
    };

    trace!(optional = child.is_optional(), "Folding child group");
    Ok(if child.is_optional() {
        GroupExpression::left_join(lhs, rhs, None)
    } else {
        GroupExpression::join(lhs, rhs)
    })
}

/// Builds a left-deep tree of inner joins over `patterns` in iteration order.
///
/// A single pattern is returned as a leaf without a join.
pub fn inner_join_tree<'a, P, C>(
    patterns: impl IntoIterator<Item = &'a P>,
) -> GroupCompileResult<GroupExpression<P, C>>
where
    P: Clone + 'a,
{
    let mut patterns = patterns.into_iter();
    let first = patterns.next().ok_or(GroupCompileError::EmptyJoin)?;
    Ok(patterns.fold(GroupExpression::Pattern(first.clone()), |lhs, pattern| {
        GroupExpression::join(lhs, GroupExpression::Pattern(pattern.clone()))
    }))
}

/// Combines `conditions` into a single [Condition].
///
/// Each condition becomes the left operand of a conjunction with the conjunction of all conditions
/// before it, i.e., `[c1, c2, c3]` results in `c3 && (c2 && c1)`.
pub fn conjoin<'a, C>(conditions: impl IntoIterator<Item = &'a C>) -> GroupCompileResult<Condition<C>>
where
    C: Clone + 'a,
{
    let mut conditions = conditions.into_iter();
    let first = conditions
        .next()
        .ok_or(GroupCompileError::EmptyConjunction)?;
    Ok(conditions.fold(first.clone().into(), |rhs, condition| {
        Condition::and(condition.clone().into(), rhs)
    }))
}

/// Wraps `base` in one filter per condition. Later conditions wrap earlier ones.
fn apply_filter_chain<'a, P, C>(
    base: GroupExpression<P, C>,
    conditions: impl IntoIterator<Item = &'a C>,
) -> GroupExpression<P, C>
where
    C: Clone + 'a,
{
    conditions.into_iter().fold(base, |inner, condition| {
        GroupExpression::filter(inner, condition.clone().into())
    })
}

/// A filter without anything to filter. It is kept as a filter over the empty pattern source so
/// that the parent can fold it like any other expression.
fn filter_empty_source<P, C>(group: &Group<P, C>) -> GroupCompileResult<GroupExpression<P, C>>
where
    P: Eq + Hash,
    C: Clone + Eq + Hash,
{
    Ok(GroupExpression::filter(
        GroupExpression::Empty,
        conjoin(group.filters())?,
    ))
}
