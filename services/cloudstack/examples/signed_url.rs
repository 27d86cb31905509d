//! Print a signed CloudStack API url.
//!
//! ```shell
//! CLOUDSTACK_HOST=10.0.0.1 CLOUDSTACK_API_KEY=key CLOUDSTACK_SECRET_KEY=secret \
//!     cargo run --example signed_url -- listZones
//! ```

use anyhow::Result;
use csgen_cloudstack::Configuration;
use csgen_core::{Context, OsEnv};

fn main() -> Result<()> {
    let logger = env_logger::Builder::from_default_env().build();
    let ctx = Context::new().with_env(OsEnv).with_logger(logger);

    let config = Configuration::from_env(ctx)?;

    let command = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "listCapabilities".to_string());
    let query = config.sign_query([("command", command.as_str()), ("response", "json")])?;

    println!("{}?{}", config.api_address(), query);

    let event = config.event_for_api(command.as_str());
    if !event.is_empty() {
        println!("emits event: {event}");
    }
    Ok(())
}
