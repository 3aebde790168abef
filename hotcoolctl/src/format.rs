//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use hotcool_core::{ConfigurationCommand, StaticConfig};
use hotcool_device::HotCoolDevice;
use hotcool_entity::{NumberEntity, NumberMetadata};
use serde::Serialize;

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Derived device state, as shown by `status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub serial: String,
    pub name: String,
    pub capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oscillation: Option<OscillationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<HeatingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OscillationView {
    pub oscillating: bool,
    pub angle_low: Option<i32>,
    pub angle_high: Option<i32>,
    pub target: i32,
    /// Mode name, or the error that prevented decoding it
    pub mode: std::result::Result<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatingView {
    pub heat_mode_on: bool,
    pub heating: bool,
    pub heat_target_kelvin: Option<f64>,
}

impl StatusView {
    pub fn from_device(device: &HotCoolDevice) -> Self {
        let oscillation = device.oscillation().map(|osc| OscillationView {
            oscillating: osc.is_oscillating(),
            angle_low: osc.angle_low().ok(),
            angle_high: osc.angle_high().ok(),
            target: osc.oscillation_target(),
            mode: osc
                .oscillation_mode()
                .map(|mode| mode.to_string())
                .map_err(|e| e.to_string()),
        });

        let heating = device.heating().map(|heat| HeatingView {
            heat_mode_on: heat.is_heat_mode_on(),
            heating: heat.is_heating(),
            heat_target_kelvin: heat.heat_target().ok(),
        });

        Self {
            serial: device.serial().to_string(),
            name: device.name().to_string(),
            capabilities: device.capabilities().iter().map(|c| c.to_string()).collect(),
            oscillation,
            heating,
        }
    }
}

/// Number entity with its current value, as shown by `entities`
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub unique_id: String,
    pub name: String,
    pub value: Option<f64>,
    pub metadata: NumberMetadata,
}

impl EntityView {
    pub async fn from_entity(entity: &dyn NumberEntity) -> Self {
        Self {
            unique_id: entity.unique_id(),
            name: entity.name(),
            value: entity.native_value().await.ok(),
            metadata: entity.metadata().clone(),
        }
    }
}

fn on_off(on: bool) -> ColoredString {
    if on {
        "on".green()
    } else {
        "off".dimmed()
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format device status
pub fn format_status(status: &StatusView, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&format!("{} ({})", status.name.bold(), status.serial.cyan()));
            output.push('\n');
            output.push_str(&format!("Capabilities: {}", status.capabilities.join(", ")));

            if let Some(osc) = &status.oscillation {
                output.push_str(&format!("\n{}", "Oscillation".bold()));
                output.push_str(&format!("\n  State:  {}", on_off(osc.oscillating)));
                output.push_str(&format!(
                    "\n  Angles: {}..{}",
                    or_dash(osc.angle_low),
                    or_dash(osc.angle_high)
                ));
                output.push_str(&format!("\n  Target: {}°", osc.target.to_string().yellow()));
                let mode = match &osc.mode {
                    Ok(mode) => mode.cyan(),
                    Err(e) => e.red(),
                };
                output.push_str(&format!("\n  Mode:   {}", mode));
            }

            if let Some(heat) = &status.heating {
                output.push_str(&format!("\n{}", "Heating".bold()));
                output.push_str(&format!("\n  Heat mode: {}", on_off(heat.heat_mode_on)));
                output.push_str(&format!("\n  Heating:   {}", on_off(heat.heating)));
                output.push_str(&format!(
                    "\n  Target:    {}",
                    heat.heat_target_kelvin
                        .map(|k| format!("{:.1} K", k))
                        .unwrap_or_else(|| "-".to_string())
                ));
            }

            Ok(output)
        }
    }
}

/// Format commands issued to the device
pub fn format_commands(commands: &[ConfigurationCommand], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(commands)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct FieldRow {
                #[tabled(rename = "#")]
                index: usize,
                #[tabled(rename = "Field")]
                field: String,
                #[tabled(rename = "Value")]
                value: String,
            }

            if commands.is_empty() {
                return Ok("No commands sent".dimmed().to_string());
            }

            let rows: Vec<FieldRow> = commands
                .iter()
                .enumerate()
                .flat_map(|(index, command)| {
                    command.iter().map(move |(field, value)| FieldRow {
                        index: index + 1,
                        field: field.to_string(),
                        value: value.cyan().to_string(),
                    })
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Commands sent:".bold(), table))
        }
    }
}

/// Format number entities
pub fn format_entities(entities: &[EntityView], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entities)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct EntityRow {
                #[tabled(rename = "Unique ID")]
                unique_id: String,
                #[tabled(rename = "Name")]
                name: String,
                #[tabled(rename = "Value")]
                value: String,
                #[tabled(rename = "Range")]
                range: String,
            }

            if entities.is_empty() {
                return Ok("No number entities for this device".dimmed().to_string());
            }

            let rows: Vec<EntityRow> = entities
                .iter()
                .map(|entity| EntityRow {
                    unique_id: entity.unique_id.clone(),
                    name: entity.name.clone(),
                    value: format!("{}{}", or_dash(entity.value), entity.metadata.unit)
                        .yellow()
                        .to_string(),
                    range: format!(
                        "{}..{} step {}",
                        entity.metadata.min, entity.metadata.max, entity.metadata.step
                    ),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Number entities:".bold(), table))
        }
    }
}

/// Format the loaded configuration
pub fn format_config(config: &StaticConfig, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Table => Ok(config.to_toml()?),
    }
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotcool_core::{Capability, DeviceStatus};
    use hotcool_device::{RecordingSink, SnapshotClient};
    use std::sync::Arc;

    fn device(status: DeviceStatus) -> HotCoolDevice {
        HotCoolDevice::new(
            "AB1",
            "Lounge",
            [Capability::Heating, Capability::Oscillating]
                .into_iter()
                .collect(),
            Arc::new(SnapshotClient::new(status)),
            Arc::new(RecordingSink::new()),
        )
    }

    #[test]
    fn test_format_success() {
        let message = format_success("Operation completed");
        assert!(message.contains("✓"));
        assert!(message.contains("Operation completed"));
    }

    #[test]
    fn test_status_view_json() {
        let view = StatusView::from_device(&device(
            DeviceStatus::new()
                .with_field("oson", "ON")
                .with_field("ancp", "CUST")
                .with_field("osal", "0135")
                .with_field("osau", "0225")
                .with_field("hmod", "HEAT")
                .with_field("hmax", "2950"),
        ));

        let json: serde_json::Value =
            serde_json::from_str(&format_status(&view, &OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["oscillation"]["target"], 180);
        assert_eq!(json["oscillation"]["mode"]["Ok"], "90");
        assert_eq!(json["heating"]["heat_mode_on"], true);
        assert_eq!(json["heating"]["heat_target_kelvin"], 295.0);
    }

    #[test]
    fn test_status_view_reports_decode_error() {
        let view = StatusView::from_device(&device(
            DeviceStatus::new()
                .with_field("oson", "ON")
                .with_field("ancp", "0270")
                .with_field("osal", "0100")
                .with_field("osau", "0200"),
        ));

        let osc = view.oscillation.as_ref().unwrap();
        assert!(osc.mode.as_ref().unwrap_err().contains("0270"));

        let table = format_status(&view, &OutputFormat::Table).unwrap();
        assert!(table.contains("Lounge"));
        assert!(table.contains("0270"));
    }

    #[test]
    fn test_format_commands() {
        let commands = vec![ConfigurationCommand::new().oscillation(false).angles(90, 90)];

        let json = format_commands(&commands, &OutputFormat::Json).unwrap();
        assert!(json.contains("\"osal\": \"0090\""));

        let table = format_commands(&commands, &OutputFormat::Table).unwrap();
        assert!(table.contains("oson"));
        assert!(table.contains("osau"));

        let empty = format_commands(&[], &OutputFormat::Table).unwrap();
        assert!(empty.contains("No commands sent"));
    }

    #[test]
    fn test_format_config_json() {
        let config = StaticConfig::from_toml(
            r#"
            data_dir = "/tmp/hotcool"

            [[devices]]
            serial = "AB1"
            name = "Lounge"
            product_type = "527"
        "#,
        )
        .unwrap();

        let json = format_config(&config, &OutputFormat::Json).unwrap();
        assert!(json.contains("Lounge"));
        assert!(json.contains("/tmp/hotcool"));
    }
}
