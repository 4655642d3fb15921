use std::fmt::Display;
use std::str::FromStr;

use crate::cli::Cli;
use crate::simulation::{patterns, EdgeWrap};

/// Grid dimensions (100x100 = 10K cells)
pub const GRID_ROWS: usize = 100;
pub const GRID_COLS: usize = 100;

/// Window surface, fixed and non-resizable
pub const WINDOW_WIDTH: u32 = 500;
pub const WINDOW_HEIGHT: u32 = 500;
pub const WINDOW_TITLE: &str = "Conway's Game Of Life";

/// Generations per second
pub const DEFAULT_FPS: u32 = 10;

/// Probability that a cell starts alive when seeding randomly
pub const DEFAULT_THRESHOLD: f32 = 0.15;

pub const DEFAULT_PATTERN: &str = patterns::RANDOM_PATTERN;

/// Background and live-cell colours
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
pub const CELL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Run configuration, resolved once from the command line
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub fps: u32,
    pub threshold: f32,
    pub pattern: String,
    pub edge_wrap: EdgeWrap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            threshold: DEFAULT_THRESHOLD,
            pattern: DEFAULT_PATTERN.to_owned(),
            edge_wrap: EdgeWrap::default(),
        }
    }
}

impl Config {
    /// Resolve parsed flags, falling back to defaults on bad or missing values.
    ///
    /// Problems are reported as warnings and never abort.
    pub fn from_cli(cli: Cli) -> Self {
        let defaults = Self::default();

        let fps = resolve("--fps", cli.fps, defaults.fps, |raw| {
            u32::from_str(raw).ok().filter(|fps| *fps > 0)
        });

        let threshold = resolve("--threshold", cli.threshold, defaults.threshold, |raw| {
            f32::from_str(raw)
                .ok()
                .filter(|t| (0.0..=1.0).contains(t))
        });

        let pattern = resolve("--pattern", cli.pattern, defaults.pattern, |raw| {
            patterns::names()
                .any(|name| name == raw)
                .then(|| raw.to_owned())
        });

        let edge_wrap = if cli.legacy_wrap {
            EdgeWrap::LegacyOffByOne
        } else {
            EdgeWrap::Toroidal
        };

        Self {
            fps,
            threshold,
            pattern,
            edge_wrap,
        }
    }
}

/// Resolve one optional flag value against its default.
///
/// `None` means the flag was not given, `Some(None)` means it was given
/// without a value.
fn resolve<T: Display>(
    flag: &str,
    raw: Option<Option<String>>,
    default: T,
    parse: impl FnOnce(&str) -> Option<T>,
) -> T {
    match raw {
        None => default,
        Some(None) => {
            log::warn!("Missing value for {} (using default {})", flag, default);
            default
        }
        Some(Some(value)) => match parse(&value) {
            Some(parsed) => parsed,
            None => {
                log::warn!(
                    "Invalid {} value {:?} (using default {})",
                    flag,
                    value,
                    default
                );
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str]) -> Config {
        let argv = std::iter::once("gl-life").chain(args.iter().copied());
        Config::from_cli(Cli::parse_lenient_from(argv))
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.fps, 10);
        assert_eq!(config.threshold, 0.15);
        assert_eq!(config.pattern, "random");
        assert_eq!(config.edge_wrap, EdgeWrap::Toroidal);
    }

    #[test]
    fn test_long_and_short_flags_out_of_order() {
        let config = config_from(&["-p", "glider", "--threshold", "0.4", "-f", "30"]);
        assert_eq!(config.fps, 30);
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.pattern, "glider");

        let config = config_from(&["--pattern", "pulsar", "--fps", "5", "-t", "1"]);
        assert_eq!(config.fps, 5);
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.pattern, "pulsar");
    }

    #[test]
    fn test_invalid_fps_keeps_default() {
        assert_eq!(config_from(&["--fps", "0"]).fps, DEFAULT_FPS);
        assert_eq!(config_from(&["--fps", "-3"]).fps, DEFAULT_FPS);
        assert_eq!(config_from(&["--fps", "fast"]).fps, DEFAULT_FPS);
    }

    #[test]
    fn test_invalid_threshold_keeps_default() {
        assert_eq!(config_from(&["-t", "1.5"]).threshold, DEFAULT_THRESHOLD);
        assert_eq!(config_from(&["-t", "-0.1"]).threshold, DEFAULT_THRESHOLD);
        assert_eq!(config_from(&["-t", "half"]).threshold, DEFAULT_THRESHOLD);
        assert_eq!(config_from(&["-t", "0"]).threshold, 0.0);
    }

    #[test]
    fn test_unknown_pattern_keeps_default() {
        assert_eq!(config_from(&["-p", "gosper"]).pattern, DEFAULT_PATTERN);
        assert_eq!(config_from(&["-p", "lightweightspaceship"]).pattern, "lightweightspaceship");
    }

    #[test]
    fn test_missing_value_keeps_default() {
        let config = config_from(&["--threshold", "0.3", "--fps"]);
        assert_eq!(config.fps, DEFAULT_FPS);
        assert_eq!(config.threshold, 0.3);

        assert_eq!(config_from(&["-p"]).pattern, DEFAULT_PATTERN);
    }

    #[test]
    fn test_legacy_wrap_flag() {
        assert_eq!(
            config_from(&["--legacy-wrap"]).edge_wrap,
            EdgeWrap::LegacyOffByOne
        );
    }

    #[test]
    fn test_repeated_flag_last_value_wins() {
        assert_eq!(config_from(&["-f", "20", "-f", "30"]).fps, 30);
        assert_eq!(config_from(&["-p", "glider", "--pattern", "pulsar"]).pattern, "pulsar");
    }

    #[test]
    fn test_unknown_arguments_do_not_hide_later_flags() {
        assert_eq!(config_from(&["--speed", "-p", "glider"]).pattern, "glider");
        assert_eq!(config_from(&["foo", "-f", "20"]).fps, 20);

        let config = config_from(&["-t", "0.3", "extra", "-f", "5"]);
        assert_eq!(config.threshold, 0.3);
        assert_eq!(config.fps, 5);

        // Still validated after an unknown token
        assert_eq!(config_from(&["--speed", "-f", "0"]).fps, DEFAULT_FPS);
    }
}
