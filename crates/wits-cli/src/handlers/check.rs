//! `wits check`: validate configuration and test the API connection.

use std::sync::Arc;

use wits_core::{Settings, validate_settings};
use wits_openai::{ChatResponder, OpenAiClient, OpenAiConfig};

use crate::error::CliError;

pub async fn execute(settings: &Settings) -> Result<(), CliError> {
    validate_settings(settings)?;
    println!("Settings: OK (chat model {}, speech model {})", settings.chat_model, settings.tts_model);

    let config = OpenAiConfig::from_env()?.with_settings(settings);
    println!("API key: found");
    println!("Base URL: {}", config.base_url());

    let client = Arc::new(OpenAiClient::new(config)?);
    ChatResponder::new(client).ping().await?;
    println!("Connection test: OK");
    Ok(())
}
