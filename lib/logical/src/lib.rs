mod compiler;
mod error;
pub mod expr;
mod group;
pub mod lowering;

pub use compiler::{compile, conjoin, inner_join_tree, try_compile};
pub use error::{GroupCompileError, GroupCompileResult};
pub use expr::{Condition, GroupExpression};
pub use group::Group;

use rdf_builder_model::{QueryCondition, QueryPattern};

/// A [Group] over RDF triple patterns and SPARQL filter expressions.
pub type QueryGroup = Group<QueryPattern, QueryCondition>;

/// A compiled [QueryGroup].
pub type QueryGroupExpression = GroupExpression<QueryPattern, QueryCondition>;
