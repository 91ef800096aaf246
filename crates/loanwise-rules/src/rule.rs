//! Rule set and rule definitions

use loanwise_core::{Error, Field, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Condition;

/// An ordered list of reason rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule set name
    pub name: String,

    /// Version of the rule set
    #[serde(default)]
    pub version: String,

    /// Rules, in presentation order
    pub rules: Vec<Rule>,
}

/// A single reason rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier
    pub name: String,

    /// Condition under which the rule matches
    pub condition: Condition,

    /// Text shown when the rule matches. A rule without a reason is
    /// evaluated but contributes nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Rule {
    pub fn new(name: impl Into<String>, condition: Condition, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition,
            reason: Some(reason.into()),
            enabled: true,
        }
    }

    /// A rule that matches without producing a reason
    pub fn silent(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            condition,
            reason: None,
            enabled: true,
        }
    }
}

impl RuleSet {
    /// Load a rule set from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let set: RuleSet = serde_yaml::from_str(yaml)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a rule set from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::rules(format!("failed to read rule set {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Reject sets with duplicate rule names
    pub fn validate(&self) -> Result<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(Error::rules(format!("duplicate rule name '{}'", rule.name)));
            }
        }
        Ok(())
    }

    /// The built-in rejection heuristics.
    ///
    /// Thresholds are presentation heuristics and are not derived from the
    /// model.
    pub fn default_reasons() -> Self {
        Self {
            name: "default".to_string(),
            version: "1".to_string(),
            rules: vec![
                Rule::new(
                    "low-income",
                    Condition::less_than(Field::Income, 50.0),
                    "Monthly income might be below the typical threshold for loan approval.",
                ),
                Rule::new(
                    "low-credit-activity",
                    Condition::less_than(Field::CcAvg, 1.0),
                    "Average monthly credit card spend might be too low, indicating limited credit activity.",
                ),
                Rule::new(
                    "undergraduate-education",
                    Condition::equals(Field::Education, 1.0),
                    "Applicants with an undergraduate education sometimes face higher scrutiny.",
                ),
                Rule::new(
                    "no-securities-account",
                    Condition::equals(Field::SecuritiesAccount, 0.0),
                    "Lack of a securities account could be a factor.",
                ),
                Rule::new(
                    "no-cd-account",
                    Condition::equals(Field::CdAccount, 0.0),
                    "Absence of a Certificate of Deposit (CD) account might affect eligibility.",
                ),
                Rule::new(
                    "no-online-banking",
                    Condition::equals(Field::Online, 0.0),
                    "Not using online banking services could be a minor concern.",
                ),
                Rule::new(
                    "no-credit-card",
                    Condition::equals(Field::CreditCard, 0.0),
                    "Lack of a credit card might indicate limited credit history.",
                ),
                Rule::new(
                    "limited-experience",
                    Condition::less_than(Field::Experience, 5.0),
                    "Insufficient work experience could be a contributing factor.",
                ),
                // Matches but never explains a rejection; kept pending a product decision.
                Rule::silent(
                    "high-income-no-mortgage",
                    Condition::all([
                        Condition::equals(Field::Mortgage, 0.0),
                        Condition::greater_than(Field::Income, 100.0),
                    ]),
                ),
                Rule::new(
                    "high-mortgage-burden",
                    Condition::all([
                        Condition::greater_than(Field::Mortgage, 500.0),
                        Condition::less_than(Field::Income, 100.0),
                    ]),
                    "High mortgage burden relative to income could be a concern.",
                ),
            ],
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_reasons()
    }
}
