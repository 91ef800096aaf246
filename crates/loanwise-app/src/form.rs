//! Form collector: control descriptors and submitted-value parsing
//!
//! [`form_fields`] describes every control once. The HTML page, the
//! `/api/schema` endpoint and [`collect`] all read from it.

use loanwise_core::{ApplicantRecord, Education, Field, Flag};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Which of the two page columns a control sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Left,
    Right,
}

/// One option of a selection control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: u8,
    pub label: &'static str,
}

/// Kind of input control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    /// Numeric input bounded to the field range
    Number {
        min: f64,
        max: f64,
        /// Spinner increment; any in-range value may still be typed
        step: f64,
        default: f64,
        integer: bool,
    },
    /// Drop-down selection mapped to an ordinal
    Select { options: Vec<Choice>, default: u8 },
    /// Yes/No radio pair stored as 1/0
    YesNo { default: u8 },
}

/// A labeled control bound to one record field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub field: Field,
    /// Form parameter name
    pub name: &'static str,
    pub label: &'static str,
    pub column: Column,
    pub control: Control,
}

impl FormField {
    fn number(
        field: Field,
        name: &'static str,
        label: &'static str,
        step: f64,
        integer: bool,
    ) -> Self {
        let range = field.range();
        Self {
            field,
            name,
            label,
            column: Column::Left,
            control: Control::Number {
                min: range.min,
                max: range.max,
                step,
                default: ApplicantRecord::default().value(field),
                integer,
            },
        }
    }

    fn yes_no(field: Field, name: &'static str, label: &'static str) -> Self {
        Self {
            field,
            name,
            label,
            column: Column::Right,
            control: Control::YesNo {
                default: ApplicantRecord::default().value(field) as u8,
            },
        }
    }

    fn in_column(mut self, column: Column) -> Self {
        self.column = column;
        self
    }
}

/// Every control on the form, in presentation order
pub fn form_fields() -> &'static [FormField] {
    static FIELDS: OnceLock<Vec<FormField>> = OnceLock::new();
    FIELDS.get_or_init(|| {
        vec![
            FormField::number(Field::Age, "age", "Age (years)", 1.0, true),
            FormField::number(Field::Experience, "experience", "Experience (years)", 1.0, true),
            FormField::number(
                Field::Income,
                "income",
                "Monthly Income (in thousands ₹)",
                5.0,
                true,
            ),
            FormField::number(Field::Family, "family", "Family Size (1 to 4)", 1.0, true),
            FormField::number(
                Field::CcAvg,
                "cc_avg",
                "Avg Credit Card Spend per month (in thousands ₹)",
                0.5,
                false,
            ),
            FormField {
                field: Field::Education,
                name: "education",
                label: "Education Level",
                column: Column::Right,
                control: Control::Select {
                    options: Education::ALL
                        .iter()
                        .map(|e| Choice {
                            value: e.ordinal(),
                            label: e.label(),
                        })
                        .collect(),
                    default: ApplicantRecord::default().education.ordinal(),
                },
            },
            FormField::number(
                Field::Mortgage,
                "mortgage",
                "Mortgage (in thousands ₹)",
                10.0,
                true,
            )
            .in_column(Column::Right),
            FormField::yes_no(
                Field::SecuritiesAccount,
                "securities_account",
                "Do you have a Securities Account?",
            ),
            FormField::yes_no(
                Field::CdAccount,
                "cd_account",
                "Do you have a Certificate of Deposit (CD) Account?",
            ),
            FormField::yes_no(Field::Online, "online", "Do you use Online Banking?"),
            FormField::yes_no(Field::CreditCard, "credit_card", "Do you have a Credit Card?"),
        ]
    })
}

/// Read one control's value from submitted parameters.
///
/// Missing or unparseable values fall back to the control default; numbers
/// are pulled into the control's bounds, as the widget itself would.
fn read(spec: &FormField, params: &HashMap<String, String>) -> f64 {
    let raw = params.get(spec.name).map(|v| v.trim());

    match &spec.control {
        Control::Number {
            min,
            max,
            default,
            integer,
            ..
        } => {
            let value = raw
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(*default);
            let value = if *integer { value.round() } else { value };
            value.clamp(*min, *max)
        }
        Control::Select { options, default } => {
            let value = raw
                .and_then(|v| v.parse::<u8>().ok())
                .filter(|v| options.iter().any(|o| o.value == *v))
                .unwrap_or(*default);
            f64::from(value)
        }
        Control::YesNo { default } => {
            let flag = raw
                .and_then(Flag::parse)
                .map(|f| f.as_u8())
                .unwrap_or(*default);
            f64::from(flag)
        }
    }
}

/// Build an applicant record from submitted form parameters
pub fn collect(params: &HashMap<String, String>) -> ApplicantRecord {
    let values: HashMap<Field, f64> = form_fields()
        .iter()
        .map(|spec| (spec.field, read(spec, params)))
        .collect();
    let value = |field: Field| values.get(&field).copied().unwrap_or_default();
    let flag = |field: Field| Flag::from(value(field) >= 1.0);

    ApplicantRecord {
        age: value(Field::Age) as u32,
        experience: value(Field::Experience) as u32,
        income: value(Field::Income) as u32,
        family: value(Field::Family) as u32,
        cc_avg: value(Field::CcAvg),
        education: Education::from_ordinal(value(Field::Education) as u8).unwrap_or_default(),
        mortgage: value(Field::Mortgage) as u32,
        securities_account: flag(Field::SecuritiesAccount),
        cd_account: flag(Field::CdAccount),
        online: flag(Field::Online),
        credit_card: flag(Field::CreditCard),
    }
}

/// Form parameters that reproduce a record, for re-rendering the form
pub fn params_of(record: &ApplicantRecord) -> HashMap<String, String> {
    form_fields()
        .iter()
        .map(|spec| {
            let value = record.value(spec.field);
            let text = match spec.control {
                Control::Number { integer: false, .. } => format!("{}", value),
                _ => format!("{}", value as i64),
            };
            (spec.name.to_string(), text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_one_control_per_field() {
        let fields = form_fields();
        assert_eq!(fields.len(), Field::ALL.len());
        for (spec, field) in fields.iter().zip(Field::ALL) {
            assert_eq!(spec.field, field);
        }
    }

    #[test]
    fn test_empty_submission_is_default_record() {
        assert_eq!(collect(&HashMap::new()), ApplicantRecord::default());
    }

    #[test]
    fn test_collect_maps_choices() {
        let record = collect(&params(&[
            ("age", "42"),
            ("income", "120"),
            ("cc_avg", "3.5"),
            ("education", "3"),
            ("securities_account", "1"),
            ("cd_account", "yes"),
            ("online", "0"),
            ("credit_card", "No"),
        ]));
        assert_eq!(record.age, 42);
        assert_eq!(record.income, 120);
        assert_eq!(record.cc_avg, 3.5);
        assert_eq!(record.education, Education::Advanced);
        assert_eq!(record.securities_account, Flag::Yes);
        assert_eq!(record.cd_account, Flag::Yes);
        assert_eq!(record.online, Flag::No);
        assert_eq!(record.credit_card, Flag::No);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let record = collect(&params(&[
            ("age", "7"),
            ("family", "12"),
            ("income", "-20"),
            ("cc_avg", "250.0"),
            ("mortgage", "99999"),
        ]));
        assert_eq!(record.age, 18);
        assert_eq!(record.family, 4);
        assert_eq!(record.income, 0);
        assert_eq!(record.cc_avg, 100.0);
        assert_eq!(record.mortgage, 1000);
        assert!(record.is_within_bounds());
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let record = collect(&params(&[
            ("age", "thirty"),
            ("cc_avg", "NaN"),
            ("education", "9"),
            ("online", "perhaps"),
        ]));
        let default = ApplicantRecord::default();
        assert_eq!(record.age, default.age);
        assert_eq!(record.cc_avg, default.cc_avg);
        assert_eq!(record.education, default.education);
        assert_eq!(record.online, default.online);
    }

    #[test]
    fn test_params_round_trip() {
        let record = ApplicantRecord {
            age: 51,
            cc_avg: 0.5,
            education: Education::Graduate,
            cd_account: Flag::Yes,
            ..ApplicantRecord::default()
        };
        assert_eq!(collect(&params_of(&record)), record);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_submission_yields_record_within_bounds(
                values in proptest::collection::vec(".{0,8}", 11),
                numbers in proptest::collection::vec(-1.0e6f64..1.0e6, 11),
                as_number in any::<bool>(),
            ) {
                let params: HashMap<String, String> = form_fields()
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| {
                        let raw = if as_number {
                            numbers[i].to_string()
                        } else {
                            values[i].clone()
                        };
                        (spec.name.to_string(), raw)
                    })
                    .collect();
                prop_assert!(collect(&params).is_within_bounds());
            }
        }
    }
}
