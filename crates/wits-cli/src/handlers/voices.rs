//! `wits voices`: list voices and models.

use std::io::Write;

use wits_core::Settings;

use crate::error::CliError;

pub fn execute<W: Write>(settings: &Settings, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "Voices:")?;
    for voice in &settings.available_voices {
        let marker = if *voice == settings.default_voice { " (default)" } else { "" };
        writeln!(out, "  {voice}{marker}")?;
    }

    writeln!(out)?;
    writeln!(out, "Models:")?;
    for model in &settings.available_models {
        let marker = if *model == settings.chat_model { " (default)" } else { "" };
        writeln!(out, "  {model}{marker}")?;
    }
    Ok(())
}
