//! Environment-driven runtime configuration, per §6 "Environment/config surface".
//!
//! Every value has a documented default and is read once at [`CompositorConfig::from_env`] time;
//! nothing here is re-read per frame. Logging itself is initialized by the embedding binary (see
//! [`crate::init_debug`]); this module only owns the knobs that affect composition behavior.

use std::env;

/// Default ring size for a non-static swapchain (§4.2: "3 is the typical default").
pub const DEFAULT_SWAPCHAIN_IMAGE_COUNT: u32 = 3;

/// Clamp applied to `VIEWPORT_SCALE_PERCENTAGE`.
pub const MAX_VIEWPORT_SCALE_PERCENTAGE: u32 = 200;

/// Parsed runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Multiplies the device's recommended per-view pixel dimensions. Clamped to
    /// `[1, 200]`. Read from `VIEWPORT_SCALE_PERCENTAGE`, default `100`.
    pub viewport_scale_percentage: u32,

    /// Enables a desktop mirror view of one or both eyes. Read from `WINDOW_PEEK`
    /// (`"both"|"left"|"right"|""`), default disabled.
    pub window_peek: WindowPeek,

    /// Selects the single-dispatch compute composition path over rasterization. Read from
    /// `COMPOSITOR_COMPUTE`, default `false`.
    pub compute_composition: bool,

    /// Terminates the server process when the last client session disconnects. Read from
    /// `EXIT_ON_DISCONNECT`, default `false`.
    pub exit_on_disconnect: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            viewport_scale_percentage: 100,
            window_peek: WindowPeek::Disabled,
            compute_composition: false,
            exit_on_disconnect: false,
        }
    }
}

impl CompositorConfig {
    /// Reads configuration from the process environment, falling back to documented defaults
    /// for any variable that is unset or fails to parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("VIEWPORT_SCALE_PERCENTAGE") {
            match parse_viewport_scale_percentage(&raw) {
                Some(value) => config.viewport_scale_percentage = value,
                None => warn!("VIEWPORT_SCALE_PERCENTAGE={raw:?} is not an integer, ignoring"),
            }
        }

        if let Ok(raw) = env::var("WINDOW_PEEK") {
            config.window_peek = WindowPeek::parse(&raw);
        }

        if let Ok(raw) = env::var("COMPOSITOR_COMPUTE") {
            config.compute_composition = parse_bool(&raw);
        }

        if let Ok(raw) = env::var("EXIT_ON_DISCONNECT") {
            config.exit_on_disconnect = parse_bool(&raw);
        }

        debug!("runtime config: {config:?}");

        config
    }

    /// The per-view pixel scale as a multiplier, e.g. `1.5` for `150`.
    pub fn viewport_scale(&self) -> f32 {
        self.viewport_scale_percentage as f32 / 100.0
    }
}

/// Which eye(s), if any, to mirror to a desktop peek window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WindowPeek {
    #[default]
    Disabled,
    Both,
    Left,
    Right,
}

impl WindowPeek {
    fn parse(raw: &str) -> Self {
        match raw {
            "both" => Self::Both,
            "left" => Self::Left,
            "right" => Self::Right,
            "" => Self::Disabled,
            other => {
                warn!("WINDOW_PEEK={other:?} not recognized, disabling peek window");
                Self::Disabled
            }
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "TRUE" | "True" | "yes" | "on")
}

fn parse_viewport_scale_percentage(raw: &str) -> Option<u32> {
    raw.parse::<u32>()
        .ok()
        .map(|value| value.clamp(1, MAX_VIEWPORT_SCALE_PERCENTAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let config = CompositorConfig::default();
        assert_eq!(config.viewport_scale_percentage, 100);
        assert_eq!(config.window_peek, WindowPeek::Disabled);
        assert!(!config.compute_composition);
        assert!(!config.exit_on_disconnect);
    }

    #[test]
    fn viewport_scale_percentage_clamps_above_200() {
        assert_eq!(
            parse_viewport_scale_percentage("500"),
            Some(MAX_VIEWPORT_SCALE_PERCENTAGE)
        );
        assert_eq!(parse_viewport_scale_percentage("0"), Some(1));
        assert_eq!(parse_viewport_scale_percentage("not a number"), None);
    }

    #[test]
    fn window_peek_parses_known_values() {
        assert_eq!(WindowPeek::parse("both"), WindowPeek::Both);
        assert_eq!(WindowPeek::parse("left"), WindowPeek::Left);
        assert_eq!(WindowPeek::parse("right"), WindowPeek::Right);
        assert_eq!(WindowPeek::parse(""), WindowPeek::Disabled);
        assert_eq!(WindowPeek::parse("bogus"), WindowPeek::Disabled);
    }

    #[test]
    fn viewport_scale_converts_to_multiplier() {
        let config = CompositorConfig {
            viewport_scale_percentage: 150,
            ..Default::default()
        };
        assert_eq!(config.viewport_scale(), 1.5);
    }
}
