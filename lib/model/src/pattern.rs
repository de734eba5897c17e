use oxrdf::Variable;
use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};

/// Reports the variables that a pattern leaf binds when it is matched.
pub trait PatternVariables {
    /// Returns the bound variables in position order. Each variable is reported once.
    fn variables(&self) -> Vec<&Variable>;
}

impl PatternVariables for TriplePattern {
    fn variables(&self) -> Vec<&Variable> {
        let subject = term_pattern_variable(&self.subject);
        let predicate = match &self.predicate {
            NamedNodePattern::Variable(variable) => Some(variable),
            NamedNodePattern::NamedNode(_) => None,
        };
        let object = term_pattern_variable(&self.object);

        let mut result: Vec<&Variable> = Vec::with_capacity(3);
        for variable in [subject, predicate, object].into_iter().flatten() {
            if !result.contains(&variable) {
                result.push(variable);
            }
        }
        result
    }
}

fn term_pattern_variable(pattern: &TermPattern) -> Option<&Variable> {
    match pattern {
        TermPattern::Variable(variable) => Some(variable),
        _ => None,
    }
}
