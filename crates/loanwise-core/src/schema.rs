//! Feature schema shared by the form, the model, and the rules
//!
//! The model artifact names its columns; [`FeatureLayout`] binds those names
//! to [`Field`]s once at load time and then flattens every
//! [`ApplicantRecord`] into a [`FeatureRow`] in the model's own order. This is
//! the only place where the record and the training-time schema meet.

use crate::record::ApplicantRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the record-to-row mapping below.
///
/// Bump when a column is added, removed or renamed.
pub const SCHEMA_VERSION: u32 = 1;

/// One named applicant attribute, in the order the form presents them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Experience")]
    Experience,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Family")]
    Family,
    #[serde(rename = "CCAvg")]
    CcAvg,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Mortgage")]
    Mortgage,
    #[serde(rename = "Securities Account")]
    SecuritiesAccount,
    #[serde(rename = "CD Account")]
    CdAccount,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "CreditCard")]
    CreditCard,
}

impl Field {
    /// Every field, in presentation order
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Experience,
        Field::Income,
        Field::Family,
        Field::CcAvg,
        Field::Education,
        Field::Mortgage,
        Field::SecuritiesAccount,
        Field::CdAccount,
        Field::Online,
        Field::CreditCard,
    ];

    /// Column name used when the model was trained
    pub fn column(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Experience => "Experience",
            Self::Income => "Income",
            Self::Family => "Family",
            Self::CcAvg => "CCAvg",
            Self::Education => "Education",
            Self::Mortgage => "Mortgage",
            Self::SecuritiesAccount => "Securities Account",
            Self::CdAccount => "CD Account",
            Self::Online => "Online",
            Self::CreditCard => "CreditCard",
        }
    }

    /// Look a field up by its training-time column name
    pub fn from_column(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }

    /// Inclusive value domain of this field
    pub fn range(&self) -> FieldRange {
        match self {
            Self::Age => FieldRange::new(18.0, 100.0),
            Self::Experience => FieldRange::new(0.0, 60.0),
            Self::Income => FieldRange::new(0.0, 500.0),
            Self::Family => FieldRange::new(1.0, 4.0),
            Self::CcAvg => FieldRange::new(0.0, 100.0),
            Self::Education => FieldRange::new(1.0, 3.0),
            Self::Mortgage => FieldRange::new(0.0, 1000.0),
            Self::SecuritiesAccount | Self::CdAccount | Self::Online | Self::CreditCard => {
                FieldRange::new(0.0, 1.0)
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Inclusive numeric bounds of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether a value lies within the bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Binding of a model's column order to record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLayout {
    fields: Vec<Field>,
}

impl FeatureLayout {
    /// Layout in presentation order, for models that bind by position
    pub fn canonical() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
        }
    }

    /// Bind a model's declared column names.
    ///
    /// The names must be a permutation of the schema columns: unknown,
    /// duplicated or missing names are rejected.
    pub fn bind<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut fields = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let field = Field::from_column(name)
                .ok_or_else(|| Error::config(format!("unknown feature column '{}'", name)))?;

            if fields.contains(&field) {
                return Err(Error::config(format!("duplicate feature column '{}'", name)));
            }
            fields.push(field);
        }

        let missing: Vec<&str> = Field::ALL
            .iter()
            .filter(|f| !fields.contains(f))
            .map(|f| f.column())
            .collect();
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing feature columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { fields })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in model order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Flatten a record into the model's column order
    pub fn row(&self, record: &ApplicantRecord) -> FeatureRow {
        FeatureRow {
            values: self.fields.iter().map(|f| record.value(*f)).collect(),
        }
    }
}

/// A single flat input row, ordered as the model expects
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<f64>,
}

impl FeatureRow {
    /// Build a row directly from values already in model order
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a column, or an error naming the offending index
    pub fn get(&self, index: usize) -> Result<f64> {
        self.values.get(index).copied().ok_or_else(|| {
            Error::prediction(format!(
                "feature index {} out of range for a row of {} columns",
                index,
                self.values.len()
            ))
        })
    }
}
