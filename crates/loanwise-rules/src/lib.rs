//! LoanWise Rules
//!
//! Ordered threshold rules that turn a negative verdict into a list of
//! human-readable reasons.
//!
//! Rules are data and can be loaded from YAML:
//! - A condition over named applicant fields (`less_than`, `greater_than`,
//!   `equals`, `all`)
//! - An optional reason; a rule without one matches silently
//!
//! The order of the rules is the order the reasons are shown in. It is not a
//! priority ranking.

pub mod condition;
pub mod explainer;
pub mod rule;

pub use condition::Condition;
pub use explainer::{Explainer, RuleMatch};
pub use rule::{Rule, RuleSet};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::condition::Condition;
    pub use crate::explainer::Explainer;
    pub use crate::rule::{Rule, RuleSet};
}
