use std::collections::BTreeMap;

use ipn_service::models::message::RawMessage;

pub const REQUIRED_METADATA: &[(&str, &str)] = &[
    ("business", "merchant@example.com"),
    ("charset", "windows-1252"),
    ("custom", "order-1001"),
    ("ipn_track_id", "a1b2c3d4e5f6"),
    ("notify_version", "3.9"),
    ("receipt_id", "1234-5678-9012-3456"),
    ("receiver_email", "merchant@example.com"),
    ("receiver_id", "S8XGHLYDW9T3S"),
    ("verify_sign", "AtkOfCXbDm2hu0ZELryHFjY-Vb7PAUvS6nMXgysbElEn9v-1XcmSoGtf"),
    ("txn_type", "web_accept"),
    ("residence_country", "US"),
    ("txn_id", "61E67681CH3238416"),
    ("cmd", "_notify-validate"),
];

pub fn fields(overrides: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = REQUIRED_METADATA
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for (k, v) in overrides {
        map.insert(k.to_string(), v.to_string());
    }

    map
}

pub fn create_raw_message(overrides: &[(&str, &str)]) -> RawMessage {
    RawMessage::from(fields(overrides))
}

pub fn create_raw_message_without(field: &str) -> RawMessage {
    let mut map = fields(&[]);
    map.remove(field);
    RawMessage::from(map)
}

pub fn web_accept_payment() -> RawMessage {
    create_raw_message(&[
        ("payment_status", "Completed"),
        ("mc_gross", "10.00"),
        ("mc_currency", "USD"),
        ("mc_fee", "0.59"),
        ("payment_type", "instant"),
        ("payer_status", "verified"),
        ("payer_email", "buyer@example.com"),
        ("first_name", "Jane"),
        ("last_name", "Doe"),
        ("address_status", "confirmed"),
        ("protection_eligibility", "Eligible"),
        ("payment_date", "08:30:06 Apr 19, 2017 PDT"),
        ("item_name", "Widget"),
        ("item_number", "W-1"),
        ("quantity", "1"),
    ])
}
