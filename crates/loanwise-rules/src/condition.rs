//! Rule conditions over applicant fields

use loanwise_core::{ApplicantRecord, Field};
use serde::{Deserialize, Serialize};

/// Condition under which a rule matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `field < value`
    LessThan {
        field: Field,
        value: f64,
    },

    /// `field > value`
    GreaterThan {
        field: Field,
        value: f64,
    },

    /// `field == value`
    Equals {
        field: Field,
        value: f64,
    },

    /// Every sub-condition holds
    All {
        conditions: Vec<Condition>,
    },
}

impl Condition {
    pub fn less_than(field: Field, value: f64) -> Self {
        Self::LessThan { field, value }
    }

    pub fn greater_than(field: Field, value: f64) -> Self {
        Self::GreaterThan { field, value }
    }

    pub fn equals(field: Field, value: f64) -> Self {
        Self::Equals { field, value }
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All {
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Evaluate against a record
    pub fn matches(&self, record: &ApplicantRecord) -> bool {
        match self {
            Self::LessThan { field, value } => record.value(*field) < *value,
            Self::GreaterThan { field, value } => record.value(*field) > *value,
            Self::Equals { field, value } => record.value(*field) == *value,
            Self::All { conditions } => conditions.iter().all(|c| c.matches(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_comparisons() {
        let at_50 = ApplicantRecord {
            income: 50,
            ..ApplicantRecord::default()
        };
        let at_49 = ApplicantRecord {
            income: 49,
            ..ApplicantRecord::default()
        };
        let rule = Condition::less_than(Field::Income, 50.0);
        assert!(!rule.matches(&at_50));
        assert!(rule.matches(&at_49));

        let above = Condition::greater_than(Field::Income, 50.0);
        assert!(!above.matches(&at_50));
    }

    #[test]
    fn test_all() {
        let record = ApplicantRecord {
            mortgage: 0,
            income: 120,
            ..ApplicantRecord::default()
        };
        let both = Condition::all([
            Condition::equals(Field::Mortgage, 0.0),
            Condition::greater_than(Field::Income, 100.0),
        ]);
        assert!(both.matches(&record));

        let one = Condition::all([
            Condition::equals(Field::Mortgage, 0.0),
            Condition::greater_than(Field::Income, 200.0),
        ]);
        assert!(!one.matches(&record));
    }

    #[test]
    fn test_condition_deserialization() {
        let json = r#"{"type": "less_than", "field": "CCAvg", "value": 1.0}"#;
        let condition: Condition = serde_json::from_str(json).unwrap();

        match condition {
            Condition::LessThan { field, value } => {
                assert_eq!(field, Field::CcAvg);
                assert_eq!(value, 1.0);
            }
            _ => panic!("Wrong condition type"),
        }
    }
}
