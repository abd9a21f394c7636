//! Field-domain table for IPN messages.
//!
//! Fixed names are looked up first. Names that miss the table but carry a
//! positive numeric suffix after a known prefix belong to an indexed family
//! (`item_name3`, `fraud_management_pending_filters_2`). Everything else is
//! unknown and accepted as free text.

use serde::Serialize;

use crate::models::{
    status::{
        AddressStatus, AgreementPayType, AgreementStatus, FraudFilter, PayerStatus, PaymentStatus,
        PaymentType, PendingReason, ProtectionEligibility, RESEND_VALUES, ReasonCode,
        TEST_IPN_VALUES,
    },
    transaction::TransactionType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Notification,
    Buyer,
    Payment,
    BillingAgreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    FreeText,
    /// Only the listed literals are accepted.
    Enum(&'static [&'static str]),
    /// The listed literals are documented, anything else is still accepted.
    OpenEnum(&'static [&'static str]),
}

impl ValueDomain {
    pub fn admits(&self, value: &str) -> bool {
        match *self {
            ValueDomain::Enum(values) => values.iter().any(|allowed| *allowed == value),
            ValueDomain::FreeText | ValueDomain::OpenEnum(_) => true,
        }
    }

    pub fn documented_values(&self) -> &'static [&'static str] {
        match *self {
            ValueDomain::FreeText => &[],
            ValueDomain::Enum(values) | ValueDomain::OpenEnum(values) => values,
        }
    }
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub group: FieldGroup,
    pub presence: Presence,
    pub values: ValueDomain,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// A family of fields sharing a prefix and differing by a 1-based index.
#[derive(Debug)]
pub struct IndexedField {
    pub prefix: &'static str,
    pub group: FieldGroup,
    pub values: ValueDomain,
}

#[derive(Debug, Clone, Copy)]
pub enum Domain {
    Known(&'static FieldSpec),
    OpenExtension {
        family: &'static IndexedField,
        index: u64,
    },
    Unknown,
}

impl Domain {
    pub fn values(&self) -> ValueDomain {
        match self {
            Domain::Known(spec) => spec.values,
            Domain::OpenExtension { family, .. } => family.values,
            Domain::Unknown => ValueDomain::FreeText,
        }
    }
}

const fn field(
    name: &'static str,
    group: FieldGroup,
    presence: Presence,
    values: ValueDomain,
) -> FieldSpec {
    FieldSpec {
        name,
        group,
        presence,
        values,
    }
}

const fn indexed(prefix: &'static str, values: ValueDomain) -> IndexedField {
    IndexedField {
        prefix,
        group: FieldGroup::Payment,
        values,
    }
}

use FieldGroup::{BillingAgreement, Buyer, Notification, Payment};
use Presence::{Optional, Required};
use ValueDomain::{Enum, FreeText, OpenEnum};

pub static FIELDS: &[FieldSpec] = &[
    // Notification metadata
    field("business", Notification, Required, FreeText),
    field("charset", Notification, Required, FreeText),
    field("custom", Notification, Required, FreeText),
    field("ipn_track_id", Notification, Required, FreeText),
    field("notify_version", Notification, Required, FreeText),
    field("parent_txn_id", Notification, Optional, FreeText),
    field("receipt_id", Notification, Required, FreeText),
    field("receiver_email", Notification, Required, FreeText),
    field("receiver_id", Notification, Required, FreeText),
    field("test_ipn", Notification, Optional, Enum(TEST_IPN_VALUES)),
    field("verify_sign", Notification, Required, FreeText),
    field("txn_type", Notification, Required, OpenEnum(TransactionType::VALUES)),
    field("resend", Notification, Optional, Enum(RESEND_VALUES)),
    field("residence_country", Notification, Required, FreeText),
    field("txn_id", Notification, Required, FreeText),
    field("cmd", Notification, Required, FreeText),
    // Buyer
    field("address_country", Buyer, Optional, FreeText),
    field("address_city", Buyer, Optional, FreeText),
    field("address_name", Buyer, Optional, FreeText),
    field("address_state", Buyer, Optional, FreeText),
    field("address_street", Buyer, Optional, FreeText),
    field("address_zip", Buyer, Optional, FreeText),
    field("contact_phone", Buyer, Optional, FreeText),
    field("first_name", Buyer, Optional, FreeText),
    field("last_name", Buyer, Optional, FreeText),
    field("payer_email", Buyer, Optional, FreeText),
    field("payer_id", Buyer, Optional, FreeText),
    field("payer_business_name", Buyer, Optional, FreeText),
    field("address_country_code", Buyer, Optional, FreeText),
    field("address_status", Buyer, Optional, Enum(AddressStatus::VALUES)),
    // Payment
    field("auth_amount", Payment, Optional, FreeText),
    field("auth_exp", Payment, Optional, FreeText),
    field("auth_status", Payment, Optional, FreeText),
    field("discount", Payment, Optional, FreeText),
    field("invoice", Payment, Optional, FreeText),
    field("mc_currency", Payment, Optional, FreeText),
    field("mc_fee", Payment, Optional, FreeText),
    field("mc_gross", Payment, Optional, FreeText),
    field("mc_handling", Payment, Optional, FreeText),
    field("mc_shipping", Payment, Optional, FreeText),
    field("memo", Payment, Optional, FreeText),
    field("exchange_rate", Payment, Optional, FreeText),
    field("payment_date", Payment, Optional, FreeText),
    field("settle_amount", Payment, Optional, FreeText),
    field("quantity", Payment, Optional, FreeText),
    field("shipping", Payment, Optional, FreeText),
    field("tax", Payment, Optional, FreeText),
    field("num_cart_items", Payment, Optional, FreeText),
    field("settle_currency", Payment, Optional, FreeText),
    field("shipping_method", Payment, Optional, FreeText),
    field("remaining_settle", Payment, Optional, FreeText),
    field("item_name", Payment, Optional, FreeText),
    field("item_number", Payment, Optional, FreeText),
    field("payment_type", Payment, Optional, Enum(PaymentType::VALUES)),
    field("payer_status", Payment, Optional, Enum(PayerStatus::VALUES)),
    field("echeck_time_processed", Payment, Optional, FreeText),
    field(
        "protection_eligibility",
        Payment,
        Optional,
        Enum(ProtectionEligibility::VALUES),
    ),
    field("payment_status", Payment, Optional, Enum(PaymentStatus::VALUES)),
    field("pending_reason", Payment, Optional, Enum(PendingReason::VALUES)),
    field("reason_code", Payment, Optional, OpenEnum(ReasonCode::VALUES)),
    // Billing agreement
    field("mp_currency", BillingAgreement, Optional, FreeText),
    field("mp_custom", BillingAgreement, Optional, FreeText),
    field("mp_cycle_start", BillingAgreement, Optional, FreeText),
    field("mp_desc", BillingAgreement, Optional, FreeText),
    field("mp_id", BillingAgreement, Optional, FreeText),
    field("mp_notification", BillingAgreement, Optional, FreeText),
    field("shipping_discount", BillingAgreement, Optional, FreeText),
    field("transaction_subject", BillingAgreement, Optional, FreeText),
    field("mp_status", BillingAgreement, Optional, Enum(AgreementStatus::VALUES)),
    field("mp_pay_type", BillingAgreement, Optional, Enum(AgreementPayType::VALUES)),
];

pub static INDEXED_FIELDS: &[IndexedField] = &[
    indexed("item_name", FreeText),
    indexed("item_number", FreeText),
    indexed("quantity", FreeText),
    indexed("option_name", FreeText),
    indexed("option_selection", FreeText),
    indexed("mc_shipping", FreeText),
    indexed("mc_handling", FreeText),
    indexed("mc_gross_", FreeText),
    indexed("shipping", FreeText),
    indexed("tax", FreeText),
    indexed("fraud_management_pending_filters_", Enum(FraudFilter::VALUES)),
];

pub fn classify(name: &str) -> Domain {
    if let Some(spec) = FIELDS.iter().find(|spec| spec.name == name) {
        return Domain::Known(spec);
    }

    INDEXED_FIELDS
        .iter()
        .find_map(|family| {
            name.strip_prefix(family.prefix)
                .and_then(parse_index)
                .map(|index| Domain::OpenExtension { family, index })
        })
        .unwrap_or(Domain::Unknown)
}

pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

pub fn required_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|spec| spec.is_required())
}

pub fn fields_in(group: FieldGroup) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |spec| spec.group == group)
}

/// Positive decimal index with no sign and no leading zero. Suffixes past
/// `u64::MAX` are not indices.
fn parse_index(suffix: &str) -> Option<u64> {
    if suffix.is_empty()
        || suffix.starts_with('0')
        || !suffix.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    suffix.parse().ok()
}
