use std::{env, fs, io::Read};

use anyhow::{Context, Error, Result, bail};
use ipn_service::{
    config::Config,
    utils::{init_tracing, process_payload},
};

fn main() -> Result<(), Error> {
    let config = Config::load()?;
    init_tracing(&config);

    let payload = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read payload from {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };

    let outcome = process_payload(&payload, &config)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.is_accepted() && config.fail_on_violations {
        bail!("Notification failed schema validation");
    }

    Ok(())
}
