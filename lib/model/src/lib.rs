mod pattern;

pub use pattern::PatternVariables;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Variable,
    VariableNameParseError, VariableRef,
};

// Re-export the SPARQL algebra that compiled groups are lowered into.
pub use spargebra::algebra::{Expression, GraphPattern};
pub use spargebra::term::{GroundTerm, NamedNodePattern, TermPattern, TriplePattern};

/// The pattern leaf used by RDF query groups.
pub type QueryPattern = TriplePattern;

/// The filter condition used by RDF query groups.
pub type QueryCondition = Expression;
