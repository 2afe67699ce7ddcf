//! Built-in suite strategies.

pub mod concept;

pub use concept::{ConceptCase, ConceptSuite};

use crate::suite::SuiteRegistry;

pub fn register_builtin(registry: &mut SuiteRegistry) {
    registry.register(concept::KIND, concept::ConceptSuite::from_declaration);
}
