//! Rule evaluation for negative verdicts

use loanwise_core::{ApplicantRecord, Result};
use std::path::Path;
use tracing::debug;

use crate::RuleSet;

/// Evaluates a rule set against a record, in order
#[derive(Debug, Clone)]
pub struct Explainer {
    rules: RuleSet,
}

/// One rule that matched a record
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a> {
    pub rule_name: &'a str,
    pub reason: Option<&'a str>,
}

impl Explainer {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Load the rule set from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(RuleSet::from_file(path)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Every enabled rule that matches, in rule order
    pub fn matches<'a>(&'a self, record: &ApplicantRecord) -> Vec<RuleMatch<'a>> {
        self.rules
            .rules
            .iter()
            .filter(|rule| rule.enabled && rule.condition.matches(record))
            .map(|rule| RuleMatch {
                rule_name: &rule.name,
                reason: rule.reason.as_deref(),
            })
            .collect()
    }

    /// Reasons for matched rules, in rule order
    pub fn explain(&self, record: &ApplicantRecord) -> Vec<String> {
        let mut reasons = Vec::new();
        for m in self.matches(record) {
            match m.reason {
                Some(reason) => reasons.push(reason.to_string()),
                None => debug!(rule = m.rule_name, "Rule matched without a reason"),
            }
        }
        reasons
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(RuleSet::default_reasons())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanwise_core::{Education, Flag};

    const INCOME: &str = "Monthly income might be below the typical threshold for loan approval.";
    const CREDIT: &str =
        "Average monthly credit card spend might be too low, indicating limited credit activity.";
    const CD: &str = "Absence of a Certificate of Deposit (CD) account might affect eligibility.";
    const MORTGAGE: &str = "High mortgage burden relative to income could be a concern.";

    /// A record that triggers none of the default rules
    fn clean() -> ApplicantRecord {
        ApplicantRecord {
            age: 35,
            experience: 10,
            income: 50,
            family: 2,
            cc_avg: 2.0,
            education: Education::Graduate,
            mortgage: 0,
            securities_account: Flag::Yes,
            cd_account: Flag::Yes,
            online: Flag::Yes,
            credit_card: Flag::Yes,
        }
    }

    #[test]
    fn test_clean_record_has_no_reasons() {
        assert!(Explainer::default().explain(&clean()).is_empty());
    }

    #[test]
    fn test_every_default_reason() {
        let record = ApplicantRecord {
            income: 40,
            cc_avg: 0.5,
            education: Education::Undergraduate,
            securities_account: Flag::No,
            cd_account: Flag::No,
            online: Flag::No,
            credit_card: Flag::No,
            experience: 2,
            mortgage: 600,
            ..clean()
        };
        let reasons = Explainer::default().explain(&record);
        assert_eq!(reasons.len(), 9);
        assert_eq!(reasons[0], INCOME);
        assert_eq!(reasons[8], MORTGAGE);
    }

    #[test]
    fn test_order_is_rule_order() {
        let record = ApplicantRecord {
            income: 40,
            cd_account: Flag::No,
            ..clean()
        };
        assert_eq!(Explainer::default().explain(&record), vec![INCOME, CD]);
    }

    #[test]
    fn test_boundaries() {
        let explainer = Explainer::default();

        let income = |income| explainer.explain(&ApplicantRecord { income, ..clean() });
        assert!(income(50).is_empty());
        assert_eq!(income(49), vec![INCOME]);

        let spend = |cc_avg| explainer.explain(&ApplicantRecord { cc_avg, ..clean() });
        assert!(spend(1.0).is_empty());
        assert_eq!(spend(0.99), vec![CREDIT]);

        let burden = |mortgage| {
            explainer.explain(&ApplicantRecord {
                mortgage,
                income: 99,
                ..clean()
            })
        };
        assert!(burden(500).is_empty());
        assert_eq!(burden(501), vec![MORTGAGE]);
    }

    #[test]
    fn test_silent_rule_matches_without_reason() {
        let explainer = Explainer::default();
        let record = ApplicantRecord {
            mortgage: 0,
            income: 150,
            ..clean()
        };

        let matches = explainer.matches(&record);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "high-income-no-mortgage");
        assert_eq!(matches[0].reason, None);
        assert!(explainer.explain(&record).is_empty());
    }

    #[test]
    fn test_disabled_rule_skipped() {
        let mut rules = RuleSet::default_reasons();
        rules.rules[0].enabled = false;
        let record = ApplicantRecord {
            income: 10,
            ..clean()
        };
        assert!(Explainer::new(rules).explain(&record).is_empty());
    }
}
