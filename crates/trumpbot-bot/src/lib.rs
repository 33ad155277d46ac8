pub mod engine;
pub mod policy;

pub use engine::{Branch, Decision, DecisionEngine, DecisionError};
pub use policy::{Policy, PolicyContext, PolicyKind, RandomPolicy, SimplePolicy};
