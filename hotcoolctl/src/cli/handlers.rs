//! Command execution handlers

use anyhow::{anyhow, Result};
use hotcool_core::StaticConfig;
use hotcool_entity::{find_number, setup_numbers, NumberEntity};
use std::path::Path;

use crate::format::{
    format_commands, format_config, format_entities, format_status, format_success, EntityView,
    StatusView,
};
use crate::session::Session;

use super::commands::*;

/// Handle status command
pub fn handle_status(session: &Session, format: &OutputFormat) -> Result<()> {
    let view = StatusView::from_device(session.device());
    println!("{}", format_status(&view, &format.into())?);
    Ok(())
}

/// Handle oscillation commands
pub fn handle_oscillation(
    session: &Session,
    command: OscillationCommands,
    format: &OutputFormat,
) -> Result<()> {
    let oscillation = session.device().require_oscillation()?;

    let sent = match command {
        OscillationCommands::Enable { mode } => oscillation.enable_oscillation(mode)?,
        OscillationCommands::Disable => oscillation.disable_oscillation()?,
        OscillationCommands::Target { degrees } => oscillation.set_oscillation_target(degrees)?,
        OscillationCommands::Angles { low, high } => {
            oscillation.set_oscillation_angles(low, high)?
        }
    };

    println!("{}", format_commands(&[sent], &format.into())?);
    Ok(())
}

/// Handle heat commands
pub fn handle_heat(session: &Session, command: HeatCommands, format: &OutputFormat) -> Result<()> {
    let heating = session.device().require_heating()?;

    let sent = match command {
        HeatCommands::On => heating.enable_heat_mode()?,
        HeatCommands::Off => heating.disable_heat_mode()?,
        HeatCommands::Target { kelvin } => heating.set_heat_target(kelvin)?,
    };

    println!("{}", format_commands(&[sent], &format.into())?);
    Ok(())
}

/// Handle entities command
pub async fn handle_entities(session: &Session, format: &OutputFormat) -> Result<()> {
    let entities = setup_numbers(session.device());

    let mut views = Vec::with_capacity(entities.len());
    for entity in &entities {
        views.push(EntityView::from_entity(entity.as_ref()).await);
    }

    println!("{}", format_entities(&views, &format.into())?);
    Ok(())
}

/// Handle number commands
pub async fn handle_number(
    session: &Session,
    command: NumberCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        NumberCommands::Set { unique_id, value } => {
            let entities = setup_numbers(session.device());
            let entity = find_number(&entities, &unique_id)
                .ok_or_else(|| anyhow!("No number entity with id '{}'", unique_id))?;

            let metadata = entity.metadata();
            if !(metadata.min..=metadata.max).contains(&value) {
                return Err(anyhow!(
                    "Value {} is outside {}..{} for {}",
                    value,
                    metadata.min,
                    metadata.max,
                    unique_id
                ));
            }

            entity.set_native_value(value).await?;

            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        format_commands(&session.sent_commands(), &format.into())?
                    );
                }
                OutputFormat::Table => {
                    println!(
                        "{}",
                        format_success(&format!("Set {} to {}", entity.name(), value))
                    );
                    println!(
                        "{}",
                        format_commands(&session.sent_commands(), &format.into())?
                    );
                }
            }
        }
    }

    Ok(())
}

/// Handle config commands
pub fn handle_config(
    command: ConfigCommands,
    config: &StaticConfig,
    config_path: &Path,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("{}", format_config(config, &format.into())?);
        }
        ConfigCommands::Path => match format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({ "config_path": config_path.display().to_string() })
                );
            }
            OutputFormat::Table => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
