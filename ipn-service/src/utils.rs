use anyhow::{Error, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, LogFormat},
    models::{
        message::{IpnMessage, RawMessage},
        validation::Violations,
    },
    validator::validate,
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Accepted { message: IpnMessage },
    Rejected { violations: Violations },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    if result.is_err() {
        debug!("Tracing subscriber already installed");
    }
}

/// Decodes a flat JSON object of string values and validates it.
///
/// A malformed payload is an error; a message that breaks the schema is
/// an `Outcome::Rejected`.
pub fn process_payload(payload: &str, config: &Config) -> Result<Outcome, Error> {
    let raw = serde_json::from_str::<RawMessage>(payload)
        .map_err(|e| anyhow!("Payload is not a flat object of string values: {}", e))?;

    debug!(field_count = raw.len(), "Decoded notification payload");

    let txn_id = raw.get("txn_id").unwrap_or("<missing>").to_string();

    match validate(raw) {
        Ok(message) => {
            info!(
                txn_id = %txn_id,
                txn_type = %message.txn_type(),
                payment_status = message.payment_status().map(|s| s.as_str()).unwrap_or("<absent>"),
                test_ipn = message.is_test(),
                extension_count = message.extensions().len(),
                "Notification accepted"
            );

            if config.log_notices {
                for notice in message.notices() {
                    warn!(txn_id = %txn_id, notice = %notice, "Notification deviates from documented field rules");
                }
            }

            Ok(Outcome::Accepted { message })
        }
        Err(violations) => {
            for violation in violations.iter() {
                warn!(txn_id = %txn_id, field = violation.field(), error = %violation, "Schema violation");
            }

            info!(
                txn_id = %txn_id,
                violation_count = violations.len(),
                "Notification rejected"
            );

            Ok(Outcome::Rejected { violations })
        }
    }
}
