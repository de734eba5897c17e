use crate::compiler;
use crate::error::GroupCompileResult;
use crate::expr::GroupExpression;
use indexmap::IndexSet;
use rdf_builder_model::{PatternVariables, Variable};
use std::hash::Hash;

/// A group of query patterns, filters, and nested groups.
///
/// Patterns and filters are values. Inserting an equal value twice keeps the first insertion and
/// its position. Children are kept in insertion order without de-duplication as their order
/// decides the shape of the compiled join tree.
///
/// # Example
///
/// ```
/// use rdf_builder_logical::{Condition, Group, GroupExpression};
///
/// let group = Group::new()
///     .with_child(Group::new().with_pattern("?s :name ?name"))
///     .with_child(
///         Group::optional()
///             .with_pattern("?s :age ?age")
///             .with_filter("?age > 18"),
///     );
///
/// assert_eq!(
///     group.compile(),
///     Some(GroupExpression::left_join(
///         GroupExpression::Pattern("?s :name ?name"),
///         GroupExpression::Pattern("?s :age ?age"),
///         Some(Condition::Atom("?age > 18")),
///     ))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Group<P, C> {
    /// Whether this group is folded into its parent with a left-outer join.
    optional: bool,
    patterns: IndexSet<P>,
    children: Vec<Group<P, C>>,
    filters: IndexSet<C>,
}

impl<P: Eq + Hash, C: Eq + Hash> Group<P, C> {
    /// Creates a new required group.
    pub fn new() -> Self {
        Self::with_optional(false)
    }

    /// Creates a new optional group.
    pub fn optional() -> Self {
        Self::with_optional(true)
    }

    fn with_optional(optional: bool) -> Self {
        Self {
            optional,
            patterns: IndexSet::new(),
            children: Vec::new(),
            filters: IndexSet::new(),
        }
    }

    /// Whether this group is folded into its parent with a left-outer join.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Adds `pattern` to this group. Does nothing if an equal pattern is already present.
    pub fn add_pattern(&mut self, pattern: P) {
        self.patterns.insert(pattern);
    }

    /// Adds all `patterns` to this group with the same semantics as [Self::add_pattern].
    pub fn add_patterns(&mut self, patterns: impl IntoIterator<Item = P>) {
        self.patterns.extend(patterns);
    }

    /// Appends `child` to the children of this group.
    pub fn add_child(&mut self, child: Group<P, C>) {
        self.children.push(child);
    }

    /// Removes the first child that is equal to `child`. Returns whether a child was removed.
    pub fn remove_child(&mut self, child: &Group<P, C>) -> bool {
        match self.children.iter().position(|c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Adds `filter` to this group. Does nothing if an equal filter is already present.
    pub fn add_filter(&mut self, filter: C) {
        self.filters.insert(filter);
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: P) -> Self {
        self.add_pattern(pattern);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Group<P, C>) -> Self {
        self.add_child(child);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: C) -> Self {
        self.add_filter(filter);
        self
    }

    /// Returns true if this group has no patterns, no filters, and no children.
    ///
    /// Note that a group whose children are all empty is not empty itself, even though it
    /// compiles to no expression.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.filters.is_empty() && self.children.is_empty()
    }

    /// Returns the number of patterns in this group and all of its descendants.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
            + self
                .children
                .iter()
                .map(Self::pattern_count)
                .sum::<usize>()
    }

    /// The patterns of this group in insertion order. Patterns of children are not included.
    pub fn patterns(&self) -> &IndexSet<P> {
        &self.patterns
    }

    /// The children of this group in insertion order.
    pub fn children(&self) -> &[Group<P, C>] {
        &self.children
    }

    /// The filters of this group in insertion order.
    pub fn filters(&self) -> &IndexSet<C> {
        &self.filters
    }

    /// Compiles this group into a [GroupExpression]. See [crate::compile].
    ///
    /// # Panics
    ///
    /// Panics if an internal invariant of the compiler is violated.
    pub fn compile(&self) -> Option<GroupExpression<P, C>>
    where
        P: Clone,
        C: Clone,
    {
        compiler::compile(self)
    }

    /// Compiles this group into a [GroupExpression]. See [crate::try_compile].
    pub fn try_compile(&self) -> GroupCompileResult<Option<GroupExpression<P, C>>>
    where
        P: Clone,
        C: Clone,
    {
        compiler::try_compile(self)
    }
}

impl<P: Eq + Hash + PatternVariables, C: Eq + Hash> Group<P, C> {
    /// Returns the distinct variables bound by the patterns of this group in order of their first
    /// occurrence. Variables of children are not included.
    pub fn bound_variables(&self) -> Vec<&Variable> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.variables())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<P: Eq + Hash, C: Eq + Hash> Default for Group<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Eq + Hash, C: Eq + Hash> PartialEq for Group<P, C> {
    fn eq(&self, other: &Self) -> bool {
        self.optional == other.optional
            && self.patterns == other.patterns
            && self.children == other.children
            && self.filters == other.filters
    }
}

impl<P: Eq + Hash, C: Eq + Hash> Eq for Group<P, C> {}
