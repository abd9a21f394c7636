use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        status::{
            AddressStatus, AgreementPayType, AgreementStatus, FraudFilter, PayerStatus,
            PaymentStatus, PaymentType, PendingReason, ProtectionEligibility, ReasonCode,
        },
        transaction::TransactionType,
        validation::Notice,
    },
    schema::{self, Domain},
};

/// Decoded IPN payload before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMessage(BTreeMap<String, String>);

impl RawMessage {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Later duplicates of a key replace earlier ones.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawMessage {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for RawMessage {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationInfo {
    pub business: String,
    pub charset: String,
    pub custom: String,
    pub ipn_track_id: String,
    pub notify_version: String,
    pub parent_txn_id: Option<String>,
    pub receipt_id: String,
    pub receiver_email: String,
    pub receiver_id: String,
    pub test_ipn: bool,
    pub verify_sign: String,
    pub txn_type: TransactionType,
    pub resend: Option<bool>,
    pub residence_country: String,
    pub txn_id: String,
    pub cmd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuyerInfo {
    pub address_country: Option<String>,
    pub address_city: Option<String>,
    pub address_name: Option<String>,
    pub address_state: Option<String>,
    pub address_street: Option<String>,
    pub address_zip: Option<String>,
    pub contact_phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub payer_email: Option<String>,
    pub payer_id: Option<String>,
    pub payer_business_name: Option<String>,
    pub address_country_code: Option<String>,
    pub address_status: Option<AddressStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentInfo {
    pub auth_amount: Option<String>,
    pub auth_exp: Option<String>,
    pub auth_status: Option<String>,
    pub discount: Option<String>,
    pub invoice: Option<String>,
    pub mc_currency: Option<String>,
    pub mc_fee: Option<String>,
    pub mc_gross: Option<String>,
    pub mc_handling: Option<String>,
    pub mc_shipping: Option<String>,
    pub memo: Option<String>,
    pub exchange_rate: Option<String>,
    pub payment_date: Option<String>,
    pub settle_amount: Option<String>,
    pub quantity: Option<String>,
    pub shipping: Option<String>,
    pub tax: Option<String>,
    pub num_cart_items: Option<String>,
    pub settle_currency: Option<String>,
    pub shipping_method: Option<String>,
    pub remaining_settle: Option<String>,
    pub item_name: Option<String>,
    pub item_number: Option<String>,
    pub payment_type: Option<PaymentType>,
    pub payer_status: Option<PayerStatus>,
    pub echeck_time_processed: Option<String>,
    pub protection_eligibility: Option<ProtectionEligibility>,
    pub payment_status: Option<PaymentStatus>,
    pub pending_reason: Option<PendingReason>,
    pub reason_code: Option<ReasonCode>,
}

impl PaymentInfo {
    pub fn payment_date_utc(&self) -> Option<DateTime<Utc>> {
        self.payment_date.as_deref().and_then(parse_paypal_time)
    }

    pub fn echeck_time_processed_utc(&self) -> Option<DateTime<Utc>> {
        self.echeck_time_processed
            .as_deref()
            .and_then(parse_paypal_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillingAgreementInfo {
    pub mp_currency: Option<String>,
    pub mp_custom: Option<String>,
    pub mp_cycle_start: Option<String>,
    pub mp_desc: Option<String>,
    pub mp_id: Option<String>,
    pub mp_notification: Option<String>,
    pub shipping_discount: Option<String>,
    pub transaction_subject: Option<String>,
    pub mp_status: Option<AgreementStatus>,
    pub mp_pay_type: Option<AgreementPayType>,
}

impl BillingAgreementInfo {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One cart line assembled from the indexed fields sharing a suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub index: u64,
    pub item_name: Option<String>,
    pub item_number: Option<String>,
    pub quantity: Option<String>,
    pub option_name: Option<String>,
    pub option_selection: Option<String>,
    pub mc_gross: Option<String>,
    pub mc_shipping: Option<String>,
    pub mc_handling: Option<String>,
    pub shipping: Option<String>,
    pub tax: Option<String>,
}

/// A message that passed validation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpnMessage {
    notification: NotificationInfo,
    buyer: BuyerInfo,
    payment: PaymentInfo,
    billing: BillingAgreementInfo,
    extensions: BTreeMap<String, String>,
    notices: Vec<Notice>,
    #[serde(skip)]
    raw: RawMessage,
}

impl IpnMessage {
    /// Builds the typed record. The caller has already checked `raw`
    /// against the schema; values outside a closed set come out as `None`.
    pub(crate) fn from_checked(raw: RawMessage, notices: Vec<Notice>) -> Self {
        let text = |name: &str| raw.get(name).map(str::to_string);
        let required = |name: &str| raw.get(name).unwrap_or_default().to_string();

        let notification = NotificationInfo {
            business: required("business"),
            charset: required("charset"),
            custom: required("custom"),
            ipn_track_id: required("ipn_track_id"),
            notify_version: required("notify_version"),
            parent_txn_id: text("parent_txn_id"),
            receipt_id: required("receipt_id"),
            receiver_email: required("receiver_email"),
            receiver_id: required("receiver_id"),
            test_ipn: raw.get("test_ipn") == Some("1"),
            verify_sign: required("verify_sign"),
            txn_type: TransactionType::from_literal(raw.get("txn_type").unwrap_or_default()),
            resend: raw.get("resend").map(|v| v == "true"),
            residence_country: required("residence_country"),
            txn_id: required("txn_id"),
            cmd: required("cmd"),
        };

        let buyer = BuyerInfo {
            address_country: text("address_country"),
            address_city: text("address_city"),
            address_name: text("address_name"),
            address_state: text("address_state"),
            address_street: text("address_street"),
            address_zip: text("address_zip"),
            contact_phone: text("contact_phone"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            payer_email: text("payer_email"),
            payer_id: text("payer_id"),
            payer_business_name: text("payer_business_name"),
            address_country_code: text("address_country_code"),
            address_status: raw.get("address_status").and_then(AddressStatus::from_literal),
        };

        let payment = PaymentInfo {
            auth_amount: text("auth_amount"),
            auth_exp: text("auth_exp"),
            auth_status: text("auth_status"),
            discount: text("discount"),
            invoice: text("invoice"),
            mc_currency: text("mc_currency"),
            mc_fee: text("mc_fee"),
            mc_gross: text("mc_gross"),
            mc_handling: text("mc_handling"),
            mc_shipping: text("mc_shipping"),
            memo: text("memo"),
            exchange_rate: text("exchange_rate"),
            payment_date: text("payment_date"),
            settle_amount: text("settle_amount"),
            quantity: text("quantity"),
            shipping: text("shipping"),
            tax: text("tax"),
            num_cart_items: text("num_cart_items"),
            settle_currency: text("settle_currency"),
            shipping_method: text("shipping_method"),
            remaining_settle: text("remaining_settle"),
            item_name: text("item_name"),
            item_number: text("item_number"),
            payment_type: raw.get("payment_type").and_then(PaymentType::from_literal),
            payer_status: raw.get("payer_status").and_then(PayerStatus::from_literal),
            echeck_time_processed: text("echeck_time_processed"),
            protection_eligibility: raw
                .get("protection_eligibility")
                .and_then(ProtectionEligibility::from_literal),
            payment_status: raw.get("payment_status").and_then(PaymentStatus::from_literal),
            pending_reason: raw.get("pending_reason").and_then(PendingReason::from_literal),
            reason_code: raw.get("reason_code").map(ReasonCode::from_literal),
        };

        let billing = BillingAgreementInfo {
            mp_currency: text("mp_currency"),
            mp_custom: text("mp_custom"),
            mp_cycle_start: text("mp_cycle_start"),
            mp_desc: text("mp_desc"),
            mp_id: text("mp_id"),
            mp_notification: text("mp_notification"),
            shipping_discount: text("shipping_discount"),
            transaction_subject: text("transaction_subject"),
            mp_status: raw.get("mp_status").and_then(AgreementStatus::from_literal),
            mp_pay_type: raw.get("mp_pay_type").and_then(AgreementPayType::from_literal),
        };

        let extensions = raw
            .iter()
            .filter(|(name, _)| !matches!(schema::classify(name), Domain::Known(_)))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            notification,
            buyer,
            payment,
            billing,
            extensions,
            notices,
            raw,
        }
    }

    pub fn notification(&self) -> &NotificationInfo {
        &self.notification
    }

    pub fn buyer(&self) -> &BuyerInfo {
        &self.buyer
    }

    pub fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    pub fn billing(&self) -> &BillingAgreementInfo {
        &self.billing
    }

    /// Indexed and unrecognized fields, verbatim.
    pub fn extensions(&self) -> &BTreeMap<String, String> {
        &self.extensions
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Raw value of any field in the original payload.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.raw.get(name)
    }

    pub fn txn_type(&self) -> &TransactionType {
        &self.notification.txn_type
    }

    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.payment.payment_status
    }

    pub fn is_test(&self) -> bool {
        self.notification.test_ipn
    }

    pub fn is_resend(&self) -> bool {
        self.notification.resend.unwrap_or(false)
    }

    /// Cart lines ordered by index. Indices need not be contiguous.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items: BTreeMap<u64, LineItem> = BTreeMap::new();

        for (name, value) in &self.extensions {
            let Domain::OpenExtension { family, index } = schema::classify(name) else {
                continue;
            };

            let slot: fn(&mut LineItem) -> &mut Option<String> = match family.prefix {
                "item_name" => |item| &mut item.item_name,
                "item_number" => |item| &mut item.item_number,
                "quantity" => |item| &mut item.quantity,
                "option_name" => |item| &mut item.option_name,
                "option_selection" => |item| &mut item.option_selection,
                "mc_gross_" => |item| &mut item.mc_gross,
                "mc_shipping" => |item| &mut item.mc_shipping,
                "mc_handling" => |item| &mut item.mc_handling,
                "shipping" => |item| &mut item.shipping,
                "tax" => |item| &mut item.tax,
                // Not a cart line (fraud filters)
                _ => continue,
            };

            let item = items.entry(index).or_insert_with(|| LineItem {
                index,
                ..LineItem::default()
            });
            *slot(item) = Some(value.clone());
        }

        items.into_values().collect()
    }

    /// Fraud Management Filters that matched, ordered by index.
    pub fn fraud_filters(&self) -> Vec<(u64, FraudFilter)> {
        self.extensions
            .iter()
            .filter_map(|(name, value)| match schema::classify(name) {
                Domain::OpenExtension { family, index }
                    if family.prefix == "fraud_management_pending_filters_" =>
                {
                    FraudFilter::from_literal(value).map(|filter| (index, filter))
                }
                _ => None,
            })
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect()
    }
}

/// Parses PayPal's `HH:MM:SS Mmm DD, YYYY ZONE` timestamps.
pub fn parse_paypal_time(value: &str) -> Option<DateTime<Utc>> {
    let (local, zone) = value.trim().rsplit_once(' ')?;
    let offset_hours = match zone {
        "UTC" | "GMT" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => return None,
    };

    let naive = NaiveDateTime::parse_from_str(local, "%H:%M:%S %b %d, %Y").ok()?;
    let offset = FixedOffset::east_opt(offset_hours * 3600)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
