//! Oscillation Controller - symbolic modes over raw angle fields
//!
//! The device reports oscillation as four fields:
//! - `oson`: `ON` / `OFF`
//! - `osal` / `osau`: low and high sweep bounds, 4-digit degrees
//! - `ancp`: a preset token (`0045`, `0090`, ...) or `CUST` for explicit bounds
//!
//! Every read takes a fresh snapshot from the client; nothing is cached.

use hotcool_core::{
    AngleBounds, ConfigurationCommand, DeviceStatus, HotCoolError, OscillationMode, Result,
    DEFAULT_OSCILLATION_TARGET, MAX_ANGLE, MIN_ANGLE,
};
use std::sync::Arc;

use crate::client::{dispatch, DeviceClient};
use crate::observe::{DiagnosticEvent, DiagnosticSink};

const FIELD_OSCILLATION: &str = "oson";
const FIELD_ANGLE_LOW: &str = "osal";
const FIELD_ANGLE_HIGH: &str = "osau";
const FIELD_MODE: &str = "ancp";

/// Largest value a 4-digit angle field can carry
const MAX_FIELD_ANGLE: i32 = 9999;

/// Sweep window of `2 * half_width` degrees around `center`, kept inside
/// `MIN_ANGLE..=MAX_ANGLE` by moving the whole window.
///
/// - center 180, half-width 22 → 158..202
/// - center 10, half-width 175 → 5..355
pub fn sweep_window(center: i32, half_width: i32) -> AngleBounds {
    let low = center - half_width;
    let high = center + half_width;

    let shift = if low < MIN_ANGLE {
        MIN_ANGLE - low
    } else if high > MAX_ANGLE {
        MAX_ANGLE - high
    } else {
        0
    };

    AngleBounds {
        low: low + shift,
        high: high + shift,
    }
}

fn parse_angle(status: &DeviceStatus, field: &'static str) -> Result<i32> {
    let raw = status.field(field);
    raw.and_then(|value| value.parse::<i32>().ok())
        .filter(|angle| (0..=MAX_FIELD_ANGLE).contains(angle))
        .ok_or_else(|| HotCoolError::Parse {
            field,
            value: raw.map(str::to_string),
        })
}

/// Oscillation control for one device
pub struct OscillationController {
    client: Arc<dyn DeviceClient>,
    sink: Arc<dyn DiagnosticSink>,
}

impl OscillationController {
    pub fn new(client: Arc<dyn DeviceClient>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { client, sink }
    }

    /// Whether the device reports oscillation as on
    pub fn is_oscillating(&self) -> bool {
        Self::oscillating_in(&self.client.status())
    }

    /// Reported low sweep bound
    pub fn angle_low(&self) -> Result<i32> {
        parse_angle(&self.client.status(), FIELD_ANGLE_LOW)
    }

    /// Reported high sweep bound
    pub fn angle_high(&self) -> Result<i32> {
        parse_angle(&self.client.status(), FIELD_ANGLE_HIGH)
    }

    /// Reported sweep bounds, taken from a single snapshot
    pub fn angle_bounds(&self) -> Result<AngleBounds> {
        Self::bounds_in(&self.client.status())
    }

    /// Midpoint of the reported bounds
    ///
    /// Falls back to [`DEFAULT_OSCILLATION_TARGET`] when either bound is not
    /// numeric; some firmware reports placeholders there. Never fails.
    pub fn oscillation_target(&self) -> i32 {
        self.target_in(&self.client.status())
    }

    /// Symbolic oscillation mode derived from the current snapshot
    ///
    /// # Errors
    ///
    /// - `Parse` when `ancp` is `CUST` and a bound is not numeric
    /// - `Decode` when `ancp` holds an unknown token
    pub fn oscillation_mode(&self) -> Result<OscillationMode> {
        let status = self.client.status();

        if !Self::oscillating_in(&status) {
            return Ok(OscillationMode::Off);
        }

        let token = status.field(FIELD_MODE).unwrap_or_default();
        if token == OscillationMode::Custom.token() {
            let bounds = Self::bounds_in(&status)?;
            return Ok(OscillationMode::from_width(bounds.width()));
        }

        OscillationMode::from_token(token).map_err(|e| {
            self.sink.record(DiagnosticEvent::UnknownModeToken {
                token: token.to_string(),
            });
            e
        })
    }

    /// Turn oscillation on with a preset sweep centred on the current target
    ///
    /// `None` selects the 45° preset. `Off` disables oscillation. `Custom`
    /// re-sends the currently reported bounds, or a zero-width sweep at the
    /// target when they cannot be read.
    pub fn enable_oscillation(
        &self,
        mode: Option<OscillationMode>,
    ) -> Result<ConfigurationCommand> {
        let mode = mode.unwrap_or(OscillationMode::Degree45);
        let status = self.client.status();

        let bounds = match mode.half_width() {
            Some(half_width) => sweep_window(self.target_in(&status), half_width),
            None if mode == OscillationMode::Off => return self.disable_oscillation(),
            None => Self::bounds_in(&status)
                .unwrap_or_else(|_| AngleBounds::point(self.target_in(&status))),
        };

        self.send(Self::sweep_command(bounds))
    }

    /// Turn oscillation off, collapsing the sweep onto its former centre
    pub fn disable_oscillation(&self) -> Result<ConfigurationCommand> {
        let target = self.oscillation_target();
        self.send(
            ConfigurationCommand::new()
                .oscillation(false)
                .angles(target, target),
        )
    }

    /// Point the device at `target` with a zero-width sweep
    ///
    /// Always switches oscillation and fan power on; the previous width is
    /// not kept.
    pub fn set_oscillation_target(&self, target: i32) -> Result<ConfigurationCommand> {
        self.send(Self::sweep_command(AngleBounds::point(target)))
    }

    /// Oscillate between explicit bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless `MIN_ANGLE <= low <= high <= MAX_ANGLE`.
    pub fn set_oscillation_angles(&self, low: i32, high: i32) -> Result<ConfigurationCommand> {
        let bounds = AngleBounds::new(low, high)?;
        self.send(Self::sweep_command(bounds))
    }

    fn oscillating_in(status: &DeviceStatus) -> bool {
        status.field(FIELD_OSCILLATION) == Some("ON")
    }

    fn bounds_in(status: &DeviceStatus) -> Result<AngleBounds> {
        Ok(AngleBounds {
            low: parse_angle(status, FIELD_ANGLE_LOW)?,
            high: parse_angle(status, FIELD_ANGLE_HIGH)?,
        })
    }

    fn target_in(&self, status: &DeviceStatus) -> i32 {
        match Self::bounds_in(status) {
            Ok(bounds) => bounds.midpoint(),
            Err(HotCoolError::Parse { field, value }) => {
                self.sink.record(DiagnosticEvent::TargetFallback {
                    field,
                    value,
                    fallback: DEFAULT_OSCILLATION_TARGET,
                });
                DEFAULT_OSCILLATION_TARGET
            }
            Err(_) => DEFAULT_OSCILLATION_TARGET,
        }
    }

    fn sweep_command(bounds: AngleBounds) -> ConfigurationCommand {
        ConfigurationCommand::new()
            .oscillation(true)
            .fan_power(true)
            .oscillation_mode(OscillationMode::Custom)
            .angles(bounds.low, bounds.high)
    }

    fn send(&self, command: ConfigurationCommand) -> Result<ConfigurationCommand> {
        dispatch(self.client.as_ref(), self.sink.as_ref(), command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SnapshotClient;
    use crate::observe::RecordingSink;
    use std::sync::Mutex;

    /// Client whose every send fails, recording the attempts
    struct FailingClient {
        status: DeviceStatus,
        attempts: Mutex<Vec<ConfigurationCommand>>,
    }

    impl FailingClient {
        fn new(status: DeviceStatus) -> Self {
            Self {
                status,
                attempts: Mutex::new(Vec::new()),
            }
        }
    }

    impl DeviceClient for FailingClient {
        fn status(&self) -> DeviceStatus {
            self.status.clone()
        }

        fn set_configuration(&self, command: &ConfigurationCommand) -> Result<()> {
            self.attempts.lock().unwrap().push(command.clone());
            Err(HotCoolError::Transport("device unreachable".to_string()))
        }
    }

    fn status(oson: &str, osal: &str, osau: &str, ancp: &str) -> DeviceStatus {
        DeviceStatus::new()
            .with_field("oson", oson)
            .with_field("osal", osal)
            .with_field("osau", osau)
            .with_field("ancp", ancp)
    }

    fn controller(
        status: DeviceStatus,
    ) -> (OscillationController, Arc<SnapshotClient>, Arc<RecordingSink>) {
        let client = Arc::new(SnapshotClient::new(status));
        let sink = Arc::new(RecordingSink::new());
        let controller = OscillationController::new(client.clone(), sink.clone());
        (controller, client, sink)
    }

    #[test]
    fn test_sweep_window_inside_limits() {
        assert_eq!(sweep_window(180, 22), AngleBounds { low: 158, high: 202 });
        assert_eq!(sweep_window(180, 175), AngleBounds { low: 5, high: 355 });
    }

    #[test]
    fn test_sweep_window_shifts_up() {
        assert_eq!(sweep_window(10, 175), AngleBounds { low: 5, high: 355 });
        assert_eq!(sweep_window(20, 45), AngleBounds { low: 5, high: 95 });
    }

    #[test]
    fn test_sweep_window_shifts_down() {
        assert_eq!(sweep_window(350, 22), AngleBounds { low: 311, high: 355 });
        assert_eq!(sweep_window(300, 90), AngleBounds { low: 175, high: 355 });
    }

    #[test]
    fn test_is_oscillating() {
        let (c, _, _) = controller(status("ON", "0100", "0200", "CUST"));
        assert!(c.is_oscillating());

        let (c, _, _) = controller(status("OFF", "0100", "0200", "CUST"));
        assert!(!c.is_oscillating());

        let (c, _, _) = controller(DeviceStatus::new());
        assert!(!c.is_oscillating());
    }

    #[test]
    fn test_angles_parse() {
        let (c, _, _) = controller(status("ON", "0158", "0202", "CUST"));
        assert_eq!(c.angle_low().unwrap(), 158);
        assert_eq!(c.angle_high().unwrap(), 202);
        assert_eq!(c.angle_bounds().unwrap(), AngleBounds { low: 158, high: 202 });
    }

    #[test]
    fn test_angle_parse_error() {
        let (c, _, _) = controller(status("ON", "OFF", "0202", "CUST"));
        let err = c.angle_low().unwrap_err();
        assert!(matches!(
            err,
            HotCoolError::Parse { field: "osal", value: Some(ref v) } if v == "OFF"
        ));

        let (c, _, _) = controller(DeviceStatus::new());
        assert!(matches!(
            c.angle_high().unwrap_err(),
            HotCoolError::Parse {
                field: "osau",
                value: None
            }
        ));
    }

    #[test]
    fn test_out_of_range_angles_are_parse_errors() {
        let (c, _, sink) = controller(status("ON", "2000000000", "2000000000", "CUST"));
        assert!(matches!(
            c.angle_low().unwrap_err(),
            HotCoolError::Parse { field: "osal", .. }
        ));
        assert_eq!(c.oscillation_target(), 180);
        assert_eq!(sink.events().len(), 1);

        let (c, _, _) = controller(status("ON", "-2000000000", "2000000000", "CUST"));
        assert!(matches!(
            c.oscillation_mode().unwrap_err(),
            HotCoolError::Parse { field: "osal", .. }
        ));
        assert_eq!(c.oscillation_target(), 180);

        let (c, _, _) = controller(status("ON", "0000", "9999", "CUST"));
        assert_eq!(c.oscillation_target(), 4999);
    }

    #[test]
    fn test_target_is_midpoint() {
        let (c, _, sink) = controller(status("ON", "0158", "0202", "CUST"));
        assert_eq!(c.oscillation_target(), 180);

        let (c, _, _) = controller(status("ON", "0005", "0010", "CUST"));
        assert_eq!(c.oscillation_target(), 7);

        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_target_falls_back_on_bad_angles() {
        let (c, _, sink) = controller(status("ON", "XXXX", "0202", "CUST"));
        assert_eq!(c.oscillation_target(), 180);

        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::TargetFallback {
                field: "osal",
                value: Some("XXXX".to_string()),
                fallback: 180,
            }]
        );
    }

    #[test]
    fn test_mode_off_ignores_angles() {
        let (c, _, _) = controller(status("OFF", "garbage", "", "????"));
        assert_eq!(c.oscillation_mode().unwrap(), OscillationMode::Off);
    }

    #[test]
    fn test_mode_custom_classified_by_width() {
        let cases = [
            ("0158", "0202", OscillationMode::Degree45),
            ("0100", "0146", OscillationMode::Degree90),
            ("0135", "0225", OscillationMode::Degree90),
            ("0090", "0270", OscillationMode::Degree180),
            ("0089", "0270", OscillationMode::Degree350),
            ("0005", "0355", OscillationMode::Degree350),
            ("0180", "0180", OscillationMode::Degree45),
        ];

        for (low, high, expected) in cases {
            let (c, _, _) = controller(status("ON", low, high, "CUST"));
            assert_eq!(c.oscillation_mode().unwrap(), expected, "{}..{}", low, high);
        }
    }

    #[test]
    fn test_mode_custom_with_bad_angles_is_parse_error() {
        let (c, _, _) = controller(status("ON", "0100", "NONE", "CUST"));
        assert!(matches!(
            c.oscillation_mode(),
            Err(HotCoolError::Parse { field: "osau", .. })
        ));
    }

    #[test]
    fn test_mode_preset_token() {
        let (c, _, _) = controller(status("ON", "0100", "0200", "0090"));
        assert_eq!(c.oscillation_mode().unwrap(), OscillationMode::Degree90);

        let (c, _, _) = controller(status("ON", "0100", "0200", "0350"));
        assert_eq!(c.oscillation_mode().unwrap(), OscillationMode::Degree350);
    }

    #[test]
    fn test_mode_unknown_token_is_decode_error() {
        let (c, _, sink) = controller(status("ON", "0100", "0200", "0270"));
        assert!(matches!(
            c.oscillation_mode(),
            Err(HotCoolError::Decode(ref token)) if token == "0270"
        ));
        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::UnknownModeToken {
                token: "0270".to_string()
            }]
        );
    }

    #[test]
    fn test_enable_45_from_center() {
        let (c, client, _) = controller(status("OFF", "0180", "0180", "CUST"));
        c.enable_oscillation(Some(OscillationMode::Degree45))
            .unwrap();

        let command = client.last_command().unwrap();
        assert_eq!(command.get("oson"), Some("ON"));
        assert_eq!(command.get("fpwr"), Some("ON"));
        assert_eq!(command.get("ancp"), Some("CUST"));
        assert_eq!(command.get("osal"), Some("0158"));
        assert_eq!(command.get("osau"), Some("0202"));
    }

    #[test]
    fn test_enable_defaults_to_45() {
        let (c, _, _) = controller(status("OFF", "0100", "0100", "CUST"));
        let command = c.enable_oscillation(None).unwrap();
        assert_eq!(command.get("osal"), Some("0078"));
        assert_eq!(command.get("osau"), Some("0122"));
    }

    #[test]
    fn test_enable_350_near_low_edge_shifts_window() {
        let (c, _, _) = controller(status("OFF", "0010", "0010", "CUST"));
        let command = c
            .enable_oscillation(Some(OscillationMode::Degree350))
            .unwrap();
        assert_eq!(command.get("osal"), Some("0005"));
        assert_eq!(command.get("osau"), Some("0355"));
    }

    #[test]
    fn test_enable_180_near_high_edge_shifts_window() {
        let (c, _, _) = controller(status("ON", "0330", "0350", "CUST"));
        let command = c
            .enable_oscillation(Some(OscillationMode::Degree180))
            .unwrap();
        assert_eq!(command.get("osal"), Some("0175"));
        assert_eq!(command.get("osau"), Some("0355"));
    }

    #[test]
    fn test_enable_with_unreadable_angles_uses_default_center() {
        let (c, _, _) = controller(status("OFF", "", "", "CUST"));
        let command = c
            .enable_oscillation(Some(OscillationMode::Degree90))
            .unwrap();
        assert_eq!(command.get("osal"), Some("0135"));
        assert_eq!(command.get("osau"), Some("0225"));
    }

    #[test]
    fn test_enable_off_disables() {
        let (c, client, _) = controller(status("ON", "0100", "0200", "CUST"));
        c.enable_oscillation(Some(OscillationMode::Off)).unwrap();

        let commands = client.sent_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].get("oson"), Some("OFF"));
        assert_eq!(commands[0].get("osal"), Some("0150"));
        assert_eq!(commands[0].get("osau"), Some("0150"));
    }

    #[test]
    fn test_enable_custom_resends_current_bounds() {
        let (c, _, _) = controller(status("OFF", "0040", "0300", "CUST"));
        let command = c
            .enable_oscillation(Some(OscillationMode::Custom))
            .unwrap();
        assert_eq!(command.get("oson"), Some("ON"));
        assert_eq!(command.get("ancp"), Some("CUST"));
        assert_eq!(command.get("osal"), Some("0040"));
        assert_eq!(command.get("osau"), Some("0300"));

        let (c, _, _) = controller(status("OFF", "bad", "0300", "CUST"));
        let command = c
            .enable_oscillation(Some(OscillationMode::Custom))
            .unwrap();
        assert_eq!(command.get("osal"), Some("0180"));
        assert_eq!(command.get("osau"), Some("0180"));
    }

    #[test]
    fn test_disable_collapses_to_target() {
        let (c, client, _) = controller(status("ON", "0158", "0202", "CUST"));
        c.disable_oscillation().unwrap();

        let command = client.last_command().unwrap();
        assert_eq!(command.get("oson"), Some("OFF"));
        assert_eq!(command.get("osal"), Some("0180"));
        assert_eq!(command.get("osau"), Some("0180"));
        assert_eq!(command.get("ancp"), None);
        assert_eq!(command.get("fpwr"), None);
    }

    #[test]
    fn test_set_target_regardless_of_mode() {
        for ancp in ["CUST", "0045", "0350"] {
            let (c, client, _) = controller(status("OFF", "0005", "0355", ancp));
            c.set_oscillation_target(200).unwrap();

            let command = client.last_command().unwrap();
            assert_eq!(command.get("osal"), Some("0200"));
            assert_eq!(command.get("osau"), Some("0200"));
            assert_eq!(command.get("ancp"), Some("CUST"));
            assert_eq!(command.get("oson"), Some("ON"));
            assert_eq!(command.get("fpwr"), Some("ON"));
        }
    }

    #[test]
    fn test_set_angles_validates() {
        let (c, client, _) = controller(DeviceStatus::new());
        let command = c.set_oscillation_angles(40, 300).unwrap();
        assert_eq!(command.get("osal"), Some("0040"));
        assert_eq!(command.get("osau"), Some("0300"));

        assert!(matches!(
            c.set_oscillation_angles(0, 300),
            Err(HotCoolError::InvalidInput(_))
        ));
        assert!(c.set_oscillation_angles(300, 40).is_err());
        assert_eq!(client.sent_commands().len(), 1);
    }

    #[test]
    fn test_each_write_sends_one_command() {
        let (c, client, sink) = controller(status("ON", "0100", "0200", "CUST"));
        c.enable_oscillation(None).unwrap();
        c.disable_oscillation().unwrap();
        c.set_oscillation_target(90).unwrap();

        assert_eq!(client.sent_commands().len(), 3);
        let sent = sink
            .events()
            .into_iter()
            .filter(|e| matches!(e, DiagnosticEvent::CommandSent { .. }))
            .count();
        assert_eq!(sent, 3);
    }

    #[test]
    fn test_transport_error_propagates() {
        let client = Arc::new(FailingClient::new(status("ON", "0100", "0200", "CUST")));
        let sink = Arc::new(RecordingSink::new());
        let c = OscillationController::new(client.clone(), sink.clone());

        let err = c.set_oscillation_target(90).unwrap_err();
        assert!(matches!(err, HotCoolError::Transport(ref msg) if msg == "device unreachable"));

        let err = c.enable_oscillation(Some(OscillationMode::Degree90)).unwrap_err();
        assert!(matches!(err, HotCoolError::Transport(_)));

        let attempts = client.attempts.lock().unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].get("osal"), Some("0090"));
        assert!(!sink
            .events()
            .iter()
            .any(|e| matches!(e, DiagnosticEvent::CommandSent { .. })));
    }
}
