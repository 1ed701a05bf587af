//! WhatsApp Inbox Web - Main Entry Point
//!
//! Initialises logging from the build configuration and mounts the Dioxus app.

use anyhow::Context;
use whatsapp_inbox_web::app::App;
use whatsapp_inbox_web::config::AppConfig;
use whatsapp_inbox_web::shared::errors::AppError;

fn main() -> anyhow::Result<()> {
    let (_, config_errors) = AppConfig::from_build_env();
    let config = AppConfig::current();

    dioxus::logger::init(config.log_level).context("failed to initialise the logger")?;

    for error in config_errors.into_iter().map(AppError::from) {
        tracing::error!(error = %error, "Invalid build configuration value, using its default");
    }

    tracing::info!(
        api_base_url = %config.api_base_url,
        realtime_url = %config.realtime_url,
        business_wa_id = %config.business_wa_id,
        "Starting WhatsApp inbox"
    );

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"[WASM] WhatsApp Inbox - WASM initialized!".into());

    dioxus::launch(App);
    Ok(())
}
