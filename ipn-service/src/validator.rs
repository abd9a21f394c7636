use crate::{
    models::{
        message::{IpnMessage, RawMessage},
        status::{PaymentStatus, ReasonCode},
        transaction::TransactionType,
        validation::{Notice, Violation, Violations},
    },
    schema::{self, FieldGroup},
};

/// Checks a decoded message against the schema.
///
/// Missing required fields are reported in schema order, then out-of-set
/// values in field-name order. Unknown and indexed fields are never
/// rejected. Conditional-presence rules only produce notices.
pub fn validate(raw: RawMessage) -> Result<IpnMessage, Violations> {
    let violations = check(&raw);
    if !violations.is_empty() {
        return Err(Violations(violations));
    }

    let notices = expectations(&raw);
    Ok(IpnMessage::from_checked(raw, notices))
}

fn check(raw: &RawMessage) -> Vec<Violation> {
    let mut violations: Vec<Violation> = schema::required_fields()
        .filter(|spec| !raw.contains(spec.name))
        .map(|spec| Violation::MissingRequiredField {
            field: spec.name.to_string(),
        })
        .collect();

    for (name, value) in raw.iter() {
        let values = schema::classify(name).values();
        if !values.admits(value) {
            violations.push(Violation::InvalidEnumValue {
                field: name.to_string(),
                value: value.to_string(),
                expected: values.documented_values().to_vec(),
            });
        }
    }

    violations
}

fn expectations(raw: &RawMessage) -> Vec<Notice> {
    let mut notices = Vec::new();

    let txn_type = raw.get("txn_type").map(TransactionType::from_literal);
    if let Some(TransactionType::Other(value)) = &txn_type {
        notices.push(Notice::UnrecognizedTransactionType {
            value: value.clone(),
        });
    }

    let status_text = raw.get("payment_status");
    let status = status_text.and_then(PaymentStatus::from_literal);

    let pending_reason = raw.contains("pending_reason");
    match (status.is_some_and(|s| s.expects_pending_reason()), pending_reason) {
        (true, false) => notices.push(Notice::PendingReasonMissing),
        (false, true) => notices.push(Notice::PendingReasonUnexpected {
            payment_status: status_text.map(str::to_string),
        }),
        _ => {}
    }

    let reason_code = raw.get("reason_code");
    match (status.filter(|s| s.expects_reason_code()), reason_code) {
        (Some(status), None) => notices.push(Notice::ReasonCodeMissing {
            payment_status: status.as_str().to_string(),
        }),
        (None, Some(_)) => notices.push(Notice::ReasonCodeUnexpected {
            payment_status: status_text.map(str::to_string),
        }),
        _ => {}
    }
    if let Some(ReasonCode::Other(value)) = reason_code.map(ReasonCode::from_literal) {
        notices.push(Notice::UndocumentedReasonCode { value });
    }

    if let Some(txn_type) = txn_type.filter(|t| !t.is_recurring()) {
        for spec in schema::fields_in(FieldGroup::BillingAgreement) {
            if spec.name.starts_with("mp_") && raw.contains(spec.name) {
                notices.push(Notice::BillingFieldOutsideRecurring {
                    field: spec.name.to_string(),
                    txn_type: txn_type.as_str().to_string(),
                });
            }
        }
    }

    notices
}
