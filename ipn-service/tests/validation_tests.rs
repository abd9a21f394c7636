use anyhow::{Result, anyhow};
use ipn_service::{
    models::{
        status::{
            AddressStatus, AgreementStatus, FraudFilter, PaymentStatus, PendingReason,
            ProtectionEligibility, ReasonCode,
        },
        transaction::TransactionType,
        validation::{Notice, Violation},
    },
    schema,
    validator::validate,
};

use crate::fixtures::{
    REQUIRED_METADATA, create_raw_message, create_raw_message_without, web_accept_payment,
};

/// Test: A completed web_accept payment validates with no violations
#[test]
fn test_web_accept_payment_is_accepted() -> Result<()> {
    let message = validate(web_accept_payment())?;

    assert_eq!(message.payment_status(), Some(PaymentStatus::Completed));
    assert_eq!(message.txn_type(), &TransactionType::WebAccept);
    assert_eq!(message.notification().business, "merchant@example.com");
    assert_eq!(message.payment().mc_gross.as_deref(), Some("10.00"));
    assert_eq!(message.payment().mc_currency.as_deref(), Some("USD"));
    assert_eq!(message.buyer().address_status, Some(AddressStatus::Confirmed));
    assert_eq!(
        message.payment().protection_eligibility,
        Some(ProtectionEligibility::Eligible)
    );
    assert!(message.notices().is_empty(), "got {:?}", message.notices());
    assert!(message.extensions().is_empty());
    assert!(!message.is_test());
    assert!(!message.is_resend());

    Ok(())
}

/// Test: Each missing required field yields exactly one violation naming it
#[test]
fn test_each_missing_required_field_is_reported_once() -> Result<()> {
    for spec in schema::required_fields() {
        let violations = validate(create_raw_message_without(spec.name))
            .err()
            .ok_or_else(|| anyhow!("{} should be required", spec.name))?;

        assert_eq!(violations.len(), 1, "violations for {}: {:?}", spec.name, violations);
        assert_eq!(
            violations.0[0],
            Violation::MissingRequiredField {
                field: spec.name.to_string()
            }
        );
    }

    Ok(())
}

/// Test: The required set matches the documented metadata fields
#[test]
fn test_required_fields_match_fixture() {
    let required: Vec<&str> = schema::required_fields().map(|spec| spec.name).collect();
    let expected: Vec<&str> = REQUIRED_METADATA.iter().map(|(name, _)| *name).collect();

    assert_eq!(required.len(), expected.len());
    for name in expected {
        assert!(required.contains(&name), "{} should be required", name);
    }
}

/// Test: An empty message reports every required field in schema order
#[test]
fn test_empty_message_reports_all_required_fields() {
    let violations = validate(Default::default()).unwrap_err();
    let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
    let expected: Vec<&str> = schema::required_fields().map(|spec| spec.name).collect();

    assert_eq!(fields, expected);
}

/// Test: Out-of-set values on closed enum fields are rejected
#[test]
fn test_invalid_enum_values_are_rejected() {
    let cases = [
        ("address_status", "pending"),
        ("payment_status", "completed"),
        ("payment_type", "wire"),
        ("payer_status", "VERIFIED"),
        ("pending_reason", "bored"),
        ("protection_eligibility", "Partially"),
        ("mp_status", "X"),
        ("mp_pay_type", "instant"),
        ("test_ipn", "0"),
        ("resend", "yes"),
        ("fraud_management_pending_filters_1", "18"),
    ];

    for (field, value) in cases {
        let violations = validate(create_raw_message(&[(field, value)])).unwrap_err();

        assert_eq!(violations.len(), 1, "{}={} -> {:?}", field, value, violations);
        match &violations.0[0] {
            Violation::InvalidEnumValue {
                field: reported,
                value: reported_value,
                expected,
            } => {
                assert_eq!(reported, field);
                assert_eq!(reported_value, value);
                assert!(!expected.is_empty());
            }
            other => panic!("unexpected violation {:?}", other),
        }
    }
}

/// Test: address_status=pending yields a single violation on that field
#[test]
fn test_address_status_pending_is_rejected() {
    let violations = validate(create_raw_message(&[("address_status", "pending")])).unwrap_err();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations.for_field("address_status").count(), 1);
    assert_eq!(
        violations.0[0].to_string(),
        "invalid value \"pending\" for `address_status` (expected one of: confirmed, unconfirmed)"
    );
}

/// Test: Missing and invalid fields are reported together
#[test]
fn test_missing_and_invalid_fields_are_combined() {
    let mut raw = create_raw_message_without("txn_id")
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>();
    raw.push(("payer_status".to_string(), "maybe".to_string()));

    let violations = validate(raw.into_iter().collect()).unwrap_err();

    assert_eq!(violations.len(), 2);
    assert!(matches!(
        &violations.0[0],
        Violation::MissingRequiredField { field } if field == "txn_id"
    ));
    assert!(matches!(
        &violations.0[1],
        Violation::InvalidEnumValue { field, .. } if field == "payer_status"
    ));
}

/// Test: reason_code accepts undocumented codes and notes them
#[test]
fn test_reason_code_accepts_undocumented_values() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("payment_status", "Reversed"),
        ("reason_code", "chargeback"),
    ]))?;
    assert_eq!(message.payment().reason_code, Some(ReasonCode::Chargeback));
    assert!(message.notices().is_empty());

    let message = validate(create_raw_message(&[
        ("payment_status", "Reversed"),
        ("reason_code", "non_receipt"),
    ]))?;
    assert_eq!(
        message.payment().reason_code,
        Some(ReasonCode::Other("non_receipt".to_string()))
    );
    assert_eq!(
        message.notices(),
        &[Notice::UndocumentedReasonCode {
            value: "non_receipt".to_string()
        }]
    );

    Ok(())
}

/// Test: Unrecognized transaction types are kept, not rejected
#[test]
fn test_unknown_txn_type_is_accepted() -> Result<()> {
    let message = validate(create_raw_message(&[("txn_type", "crypto_payment")]))?;

    assert_eq!(
        message.txn_type(),
        &TransactionType::Other("crypto_payment".to_string())
    );
    assert!(!message.txn_type().is_documented());
    assert_eq!(
        message.notices(),
        &[Notice::UnrecognizedTransactionType {
            value: "crypto_payment".to_string()
        }]
    );

    Ok(())
}

/// Test: Every documented transaction type validates
#[test]
fn test_all_documented_txn_types_are_accepted() -> Result<()> {
    for txn_type in TransactionType::VALUES {
        let message = validate(create_raw_message(&[("txn_type", *txn_type)]))?;
        assert!(message.txn_type().is_documented());
        assert_eq!(message.txn_type().as_str(), *txn_type);
    }

    Ok(())
}

/// Test: Recurring transactions may omit billing agreement fields
#[test]
fn test_subscription_payment_without_mp_status_is_accepted() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("txn_type", "subscr_payment"),
        ("payment_status", "Completed"),
    ]))?;

    assert!(message.txn_type().is_recurring());
    assert!(message.billing().is_empty());
    assert!(message.notices().is_empty());

    Ok(())
}

/// Test: Billing agreement fields are typed on recurring transactions
#[test]
fn test_billing_agreement_fields_are_exposed() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("txn_type", "merch_pmt"),
        ("mp_id", "B-5XY12345AB678901C"),
        ("mp_status", "I"),
        ("mp_pay_type", "ECHECK"),
        ("mp_desc", "Monthly plan"),
    ]))?;

    let billing = message.billing();
    assert_eq!(billing.mp_id.as_deref(), Some("B-5XY12345AB678901C"));
    assert_eq!(billing.mp_status, Some(AgreementStatus::Inactive));
    assert_eq!(billing.mp_desc.as_deref(), Some("Monthly plan"));
    assert!(message.notices().is_empty());

    Ok(())
}

/// Test: mp_* fields on a one-off payment only produce a notice
#[test]
fn test_billing_field_on_web_accept_is_a_notice() -> Result<()> {
    let message = validate(create_raw_message(&[("mp_id", "B-1")]))?;

    assert_eq!(
        message.notices(),
        &[Notice::BillingFieldOutsideRecurring {
            field: "mp_id".to_string(),
            txn_type: "web_accept".to_string()
        }]
    );

    Ok(())
}

/// Test: Pending payments without pending_reason are accepted with a notice
#[test]
fn test_pending_reason_expectations() -> Result<()> {
    let message = validate(create_raw_message(&[("payment_status", "Pending")]))?;
    assert_eq!(message.notices(), &[Notice::PendingReasonMissing]);

    let message = validate(create_raw_message(&[
        ("payment_status", "Pending"),
        ("pending_reason", "echeck"),
    ]))?;
    assert_eq!(message.payment().pending_reason, Some(PendingReason::Echeck));
    assert!(message.notices().is_empty());

    let message = validate(create_raw_message(&[
        ("payment_status", "Completed"),
        ("pending_reason", "echeck"),
    ]))?;
    assert_eq!(
        message.notices(),
        &[Notice::PendingReasonUnexpected {
            payment_status: Some("Completed".to_string())
        }]
    );

    Ok(())
}

/// Test: reason_code presence is checked against the reversal statuses
#[test]
fn test_reason_code_expectations() -> Result<()> {
    let message = validate(create_raw_message(&[("payment_status", "Refunded")]))?;
    assert_eq!(
        message.notices(),
        &[Notice::ReasonCodeMissing {
            payment_status: "Refunded".to_string()
        }]
    );

    let message = validate(create_raw_message(&[("reason_code", "refund")]))?;
    assert_eq!(
        message.notices(),
        &[Notice::ReasonCodeUnexpected {
            payment_status: None
        }]
    );

    Ok(())
}

/// Test: Indexed cart fields are preserved and grouped into line items
#[test]
fn test_cart_line_items() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("txn_type", "cart"),
        ("num_cart_items", "2"),
        ("item_name1", "Widget"),
        ("item_number1", "W-1"),
        ("quantity1", "2"),
        ("mc_gross_1", "20.00"),
        ("option_name1", "Color"),
        ("option_selection1", "Blue"),
        ("item_name3", "Gadget"),
        ("quantity3", "1"),
        ("mc_shipping3", "4.50"),
        ("tax3", "0.80"),
    ]))?;

    assert_eq!(message.extensions().len(), 10);
    assert_eq!(
        message.extensions().get("option_selection1").map(String::as_str),
        Some("Blue")
    );

    let items = message.line_items();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].index, 1);
    assert_eq!(items[0].item_name.as_deref(), Some("Widget"));
    assert_eq!(items[0].item_number.as_deref(), Some("W-1"));
    assert_eq!(items[0].quantity.as_deref(), Some("2"));
    assert_eq!(items[0].mc_gross.as_deref(), Some("20.00"));
    assert_eq!(items[0].option_name.as_deref(), Some("Color"));
    assert_eq!(items[0].option_selection.as_deref(), Some("Blue"));

    assert_eq!(items[1].index, 3);
    assert_eq!(items[1].item_name.as_deref(), Some("Gadget"));
    assert_eq!(items[1].mc_shipping.as_deref(), Some("4.50"));
    assert_eq!(items[1].tax.as_deref(), Some("0.80"));
    assert!(items[1].item_number.is_none());

    Ok(())
}

/// Test: Unknown fields never fail validation and land in extensions
#[test]
fn test_unknown_fields_are_preserved() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("brand_new_field", "surprise"),
        ("item_name0", "zero index"),
        ("payment_fee", "0.59"),
    ]))?;

    assert_eq!(message.extensions().len(), 3);
    assert_eq!(
        message.extensions().get("brand_new_field").map(String::as_str),
        Some("surprise")
    );
    assert_eq!(message.get("item_name0"), Some("zero index"));
    assert!(message.line_items().is_empty());

    Ok(())
}

/// Test: Fraud filters are typed and ordered by index
#[test]
fn test_fraud_filters() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("payment_status", "Pending"),
        ("pending_reason", "paymentreview"),
        ("fraud_management_pending_filters_10", "17"),
        ("fraud_management_pending_filters_2", "1"),
    ]))?;

    assert_eq!(
        message.fraud_filters(),
        vec![
            (2, FraudFilter::AvsNoMatch),
            (10, FraudFilter::PayPalFraudModel)
        ]
    );
    assert!(message.line_items().is_empty());

    Ok(())
}

/// Test: Indices past 32 bits still belong to their family
#[test]
fn test_large_indices() -> Result<()> {
    let violations = validate(create_raw_message(&[(
        "fraud_management_pending_filters_99999999999",
        "99",
    )]))
    .unwrap_err();

    assert_eq!(violations.len(), 1);
    assert!(matches!(
        &violations.0[0],
        Violation::InvalidEnumValue { field, value, .. }
            if field == "fraud_management_pending_filters_99999999999" && value == "99"
    ));

    let message = validate(create_raw_message(&[
        ("item_name99999999999", "Far away"),
        ("fraud_management_pending_filters_4294967296", "17"),
    ]))?;

    let items = message.line_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].index, 99_999_999_999);
    assert_eq!(items[0].item_name.as_deref(), Some("Far away"));
    assert_eq!(
        message.fraud_filters(),
        vec![(4_294_967_296, FraudFilter::PayPalFraudModel)]
    );

    Ok(())
}

/// Test: Flags and timestamps are narrowed on the record
#[test]
fn test_flags_and_payment_date() -> Result<()> {
    let message = validate(create_raw_message(&[
        ("test_ipn", "1"),
        ("resend", "true"),
        ("payment_date", "08:30:06 Apr 19, 2017 PDT"),
        ("parent_txn_id", "9UX47123AB4567890"),
    ]))?;

    assert!(message.is_test());
    assert!(message.is_resend());
    assert_eq!(
        message.notification().parent_txn_id.as_deref(),
        Some("9UX47123AB4567890")
    );

    let paid_at = message
        .payment()
        .payment_date_utc()
        .ok_or_else(|| anyhow!("payment_date should parse"))?;
    assert_eq!(paid_at.to_rfc3339(), "2017-04-19T15:30:06+00:00");

    Ok(())
}

/// Test: Validating the same input twice gives identical results
#[test]
fn test_validation_is_deterministic() -> Result<()> {
    let raw = create_raw_message(&[
        ("txn_type", "unheard_of"),
        ("reason_code", "mystery"),
        ("item_name7", "Thing"),
        ("mp_id", "B-1"),
    ]);

    let first = validate(raw.clone())?;
    let second = validate(raw)?;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?
    );

    Ok(())
}
