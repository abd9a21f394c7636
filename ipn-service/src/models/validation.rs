use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use thiserror::Error;

/// A recognized field that breaks the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    #[error("invalid value {value:?} for `{field}` (expected one of: {})", .expected.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        expected: Vec<&'static str>,
    },
}

impl Violation {
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingRequiredField { field } => field,
            Violation::InvalidEnumValue { field, .. } => field,
        }
    }
}

/// Every violation found in one message, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("message failed validation with {} violation(s)", .0.len())]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.0.iter().filter(move |v| v.field() == field)
    }
}

/// Soft expectation that did not hold. Never rejects a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    UnrecognizedTransactionType { value: String },
    UndocumentedReasonCode { value: String },
    PendingReasonMissing,
    PendingReasonUnexpected { payment_status: Option<String> },
    ReasonCodeMissing { payment_status: String },
    ReasonCodeUnexpected { payment_status: Option<String> },
    BillingFieldOutsideRecurring { field: String, txn_type: String },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnrecognizedTransactionType { value } => {
                write!(f, "unrecognized txn_type {:?}", value)
            }
            Notice::UndocumentedReasonCode { value } => {
                write!(f, "undocumented reason_code {:?}", value)
            }
            Notice::PendingReasonMissing => {
                write!(f, "payment_status is Pending but pending_reason is absent")
            }
            Notice::PendingReasonUnexpected { payment_status } => write!(
                f,
                "pending_reason present with payment_status {}",
                payment_status.as_deref().unwrap_or("<absent>")
            ),
            Notice::ReasonCodeMissing { payment_status } => {
                write!(f, "payment_status is {} but reason_code is absent", payment_status)
            }
            Notice::ReasonCodeUnexpected { payment_status } => write!(
                f,
                "reason_code present with payment_status {}",
                payment_status.as_deref().unwrap_or("<absent>")
            ),
            Notice::BillingFieldOutsideRecurring { field, txn_type } => {
                write!(f, "{} present on non-recurring txn_type {}", field, txn_type)
            }
        }
    }
}
