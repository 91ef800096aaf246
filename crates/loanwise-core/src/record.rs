//! The applicant record collected by the form

use crate::schema::Field;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest education level, as the ordinal the model was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Education {
    #[default]
    Undergraduate = 1,
    Graduate = 2,
    Advanced = 3,
}

impl Education {
    pub const ALL: [Education; 3] = [
        Education::Undergraduate,
        Education::Graduate,
        Education::Advanced,
    ];

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Label shown in the selection control
    pub fn label(&self) -> &'static str {
        match self {
            Self::Undergraduate => "1: Undergraduate",
            Self::Graduate => "2: Graduate",
            Self::Advanced => "3: Advanced/Professional",
        }
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Undergraduate),
            2 => Some(Self::Graduate),
            3 => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Education {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or_else(|| format!("education must be 1, 2 or 3 (got {})", value))
    }
}

impl From<Education> for u8 {
    fn from(value: Education) -> Self {
        value.ordinal()
    }
}

/// A Yes/No answer, stored as 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Flag {
    #[default]
    No = 0,
    Yes = 1,
}

impl Flag {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    /// Parse "yes"/"no", "1"/"0" or "true"/"false", ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "y" | "true" => Some(Self::Yes),
            "0" | "no" | "n" | "false" => Some(Self::No),
            _ => None,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl TryFrom<u8> for Flag {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::No),
            1 => Ok(Self::Yes),
            other => Err(format!("flag must be 0 or 1 (got {})", other)),
        }
    }
}

impl From<Flag> for u8 {
    fn from(value: Flag) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One applicant's attributes, built fresh for every prediction.
///
/// Monetary amounts are in thousands.
/// Fields left out of a serialized record take their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantRecord {
    pub age: u32,
    pub experience: u32,
    pub income: u32,
    pub family: u32,
    #[serde(alias = "ccavg", alias = "CCAvg")]
    pub cc_avg: f64,
    pub education: Education,
    pub mortgage: u32,
    pub securities_account: Flag,
    pub cd_account: Flag,
    pub online: Flag,
    pub credit_card: Flag,
}

impl Default for ApplicantRecord {
    fn default() -> Self {
        Self {
            age: 35,
            experience: 10,
            income: 50,
            family: 2,
            cc_avg: 2.0,
            education: Education::Undergraduate,
            mortgage: 0,
            securities_account: Flag::No,
            cd_account: Flag::No,
            online: Flag::No,
            credit_card: Flag::No,
        }
    }
}

impl ApplicantRecord {
    /// Numeric value of a field, as fed to the model
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => f64::from(self.age),
            Field::Experience => f64::from(self.experience),
            Field::Income => f64::from(self.income),
            Field::Family => f64::from(self.family),
            Field::CcAvg => self.cc_avg,
            Field::Education => f64::from(self.education.ordinal()),
            Field::Mortgage => f64::from(self.mortgage),
            Field::SecuritiesAccount => f64::from(self.securities_account.as_u8()),
            Field::CdAccount => f64::from(self.cd_account.as_u8()),
            Field::Online => f64::from(self.online.as_u8()),
            Field::CreditCard => f64::from(self.credit_card.as_u8()),
        }
    }

    /// Copy of this record with every numeric field pulled into its range
    pub fn clamped(&self) -> Self {
        let clamp_int = |field: Field, value: u32| -> u32 {
            let range = field.range();
            (f64::from(value)).clamp(range.min, range.max) as u32
        };
        let cc_range = Field::CcAvg.range();
        let cc_avg = if self.cc_avg.is_finite() {
            self.cc_avg.clamp(cc_range.min, cc_range.max)
        } else {
            cc_range.min
        };

        Self {
            age: clamp_int(Field::Age, self.age),
            experience: clamp_int(Field::Experience, self.experience),
            income: clamp_int(Field::Income, self.income),
            family: clamp_int(Field::Family, self.family),
            cc_avg,
            mortgage: clamp_int(Field::Mortgage, self.mortgage),
            ..*self
        }
    }

    /// Check whether every field already lies within its range
    pub fn is_within_bounds(&self) -> bool {
        Field::ALL
            .iter()
            .all(|f| f.range().contains(self.value(*f)))
    }
}
