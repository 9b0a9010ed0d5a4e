use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::scalar::optional_string;
use super::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 3] = [LoanStatus::Pending, LoanStatus::Approved, LoanStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoanStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("`{}` is not a valid enum value for path `status`.", s))
    }
}

/// A stored loan document as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "_id")]
    pub id: String,
    pub borrower: String,
    pub amount: f64,
    pub status: LoanStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Raw `loans` row; status is kept as text until it is parsed back into the enum.
#[derive(Debug, Clone, FromRow)]
pub struct LoanRow {
    pub id: String,
    pub borrower: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<LoanRow> for Loan {
    type Error = String;

    fn try_from(row: LoanRow) -> Result<Self, Self::Error> {
        Ok(Loan {
            id: row.id,
            borrower: row.borrower,
            amount: row.amount,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Amount as it arrives on the wire. Form inputs send numbers as strings,
/// which are cast the same way the store casts them. Any other JSON value
/// is kept so it can be reported as a failed cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Number(f64),
    Text(String),
    Invalid(serde_json::Value),
}

impl AmountValue {
    /// `Ok(None)` means the value is blank and counts as missing.
    fn cast(&self) -> Result<Option<f64>, String> {
        let cast_error = |value: String, kind: &str| {
            format!(
                "Cast to Number failed for value {} (type {}) at path \"amount\"",
                value, kind
            )
        };

        match self {
            AmountValue::Number(n) if n.is_finite() => Ok(Some(*n)),
            AmountValue::Number(n) => Err(cast_error(n.to_string(), "number")),
            AmountValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Some(n)),
                    _ => Err(cast_error(format!("{:?}", text), "string")),
                }
            }
            AmountValue::Invalid(value) => {
                let kind = match value {
                    serde_json::Value::Bool(_) => "boolean",
                    serde_json::Value::Array(_) => "Array",
                    serde_json::Value::Object(_) => "Object",
                    _ => "unknown",
                };
                Err(cast_error(value.to_string(), kind))
            }
        }
    }
}

impl From<f64> for AmountValue {
    fn from(value: f64) -> Self {
        AmountValue::Number(value)
    }
}

/// Loan fields as submitted to `POST /loans` or `PUT /loans/{id}`.
///
/// Every field is optional on the wire; which ones are required depends on
/// whether the document is being created or updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub borrower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountValue>,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

/// A fully validated loan ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub borrower: String,
    pub amount: f64,
    pub status: LoanStatus,
}

/// Validated replacements for an existing loan. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanChanges {
    pub borrower: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<LoanStatus>,
}

impl LoanInput {
    pub fn validate_for_create(&self) -> Result<NewLoan, ValidationError> {
        let mut errors = ValidationError::new("Loan");

        let borrower = match self.borrower.as_deref() {
            Some(b) if !b.is_empty() => Some(b.to_string()),
            _ => {
                errors.required("borrower");
                None
            }
        };

        let amount = match self.amount.as_ref().map(AmountValue::cast) {
            Some(Ok(Some(n))) => Some(n),
            Some(Err(msg)) => {
                errors.push("amount", msg);
                None
            }
            Some(Ok(None)) | None => {
                errors.required("amount");
                None
            }
        };

        let status = self.parse_status(&mut errors).unwrap_or_default();

        match (borrower, amount) {
            (Some(borrower), Some(amount)) if errors.is_empty() => Ok(NewLoan {
                borrower,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }

    pub fn validate_for_update(&self) -> Result<LoanChanges, ValidationError> {
        let mut errors = ValidationError::new("Loan");

        let borrower = match self.borrower.as_deref() {
            Some("") => {
                errors.required("borrower");
                None
            }
            other => other.map(str::to_string),
        };

        let amount = match self.amount.as_ref().map(AmountValue::cast) {
            Some(Ok(Some(n))) => Some(n),
            Some(Ok(None)) => {
                errors.required("amount");
                None
            }
            Some(Err(msg)) => {
                errors.push("amount", msg);
                None
            }
            None => None,
        };

        let status = self.parse_status(&mut errors);

        if errors.is_empty() {
            Ok(LoanChanges {
                borrower,
                amount,
                status,
            })
        } else {
            Err(errors)
        }
    }

    fn parse_status(&self, errors: &mut ValidationError) -> Option<LoanStatus> {
        match self.status.as_deref()?.parse() {
            Ok(status) => Some(status),
            Err(msg) => {
                errors.push("status", msg);
                None
            }
        }
    }
}
