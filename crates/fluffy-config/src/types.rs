use fluffy_vdisplay::{DisplayResult, VirtualDisplayConfig};
use serde::{Deserialize, Serialize};

/// Density assumed when a display entry leaves `ppi` out.
pub const DEFAULT_PPI: i32 = 96;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host subsystem settings.
    pub host: HostConfig,
    /// Virtual displays created at startup.
    pub displays: Vec<DisplaySpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HostConfig::default(),
            displays: DisplaySpec::preset("1080p").into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Most virtual displays the host will accept at once.
    pub max_displays: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { max_displays: 8 }
    }
}

/// One virtual display as written in the config file.
///
/// Values are kept unvalidated here; [`DisplaySpec::to_config`] applies the
/// same checks as the registry entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySpec {
    #[serde(default)]
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_ppi")]
    pub ppi: i32,
    #[serde(default)]
    pub hi_dpi: bool,
    /// Clockwise degrees: 0, 90, 180 or 270.
    #[serde(default)]
    pub rotation: i32,
}

fn default_ppi() -> i32 {
    DEFAULT_PPI
}

/// name, width, height, ppi, hi_dpi
const PRESETS: &[(&str, i32, i32, i32, bool)] = &[
    ("5K", 5120, 2880, 218, true),
    ("4K", 3840, 2160, 163, true),
    ("1440p", 2560, 1440, 109, false),
    ("1080p", 1920, 1080, 102, false),
    ("720p", 1280, 720, 96, false),
    ("iPad Pro 12.9", 2732, 2048, 264, true),
    ("iPad", 2048, 1536, 264, true),
];

impl DisplaySpec {
    /// Validate into a registry config.
    pub fn to_config(&self) -> DisplayResult<VirtualDisplayConfig> {
        VirtualDisplayConfig::new(
            self.width,
            self.height,
            self.ppi,
            self.hi_dpi,
            self.name.as_str(),
            self.rotation,
        )
    }

    /// Common virtual display modes.
    pub fn presets() -> Vec<DisplaySpec> {
        PRESETS
            .iter()
            .map(|&(name, width, height, ppi, hi_dpi)| DisplaySpec {
                name: name.to_owned(),
                width,
                height,
                ppi,
                hi_dpi,
                rotation: 0,
            })
            .collect()
    }

    /// Look up a preset by name, ignoring case.
    pub fn preset(name: &str) -> Option<DisplaySpec> {
        Self::presets()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluffy_vdisplay::{DisplayError, Rotation};

    #[test]
    fn parses_partial_entries() {
        let config: AppConfig = toml::from_str(
            r#"
            [host]
            max_displays = 2

            [[displays]]
            name = "Sidecar"
            width = 2048
            height = 1536
            hi_dpi = true
            rotation = 270

            [[displays]]
            width = 1280
            height = 720
            "#,
        )
        .unwrap();

        assert_eq!(config.host.max_displays, 2);
        assert_eq!(config.displays.len(), 2);

        let sidecar = config.displays[0].to_config().unwrap();
        assert_eq!(sidecar.rotation(), Rotation::Deg270);
        assert_eq!(sidecar.ppi(), DEFAULT_PPI as u32);
        assert_eq!(sidecar.effective_resolution().logical.width, 1024);

        let plain = &config.displays[1];
        assert_eq!(plain.name, "");
        assert!(!plain.hi_dpi);
        assert_eq!(plain.rotation, 0);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.host.max_displays, 8);
    }

    #[test]
    fn invalid_entry_fails_validation_not_parsing() {
        let config: AppConfig = toml::from_str(
            r#"
            [[displays]]
            width = 1920
            height = 1080
            rotation = 45
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.displays[0].to_config(),
            Err(DisplayError::InvalidParameter(_))
        ));
    }

    #[test]
    fn preset_lookup_ignores_case() {
        let preset = DisplaySpec::preset("4k").unwrap();
        assert_eq!((preset.width, preset.height), (3840, 2160));
        assert!(preset.hi_dpi);
        assert!(DisplaySpec::preset("8K").is_none());
    }

    #[test]
    fn every_preset_is_valid() {
        for preset in DisplaySpec::presets() {
            assert!(preset.to_config().is_ok(), "{}", preset.name);
        }
    }
}
