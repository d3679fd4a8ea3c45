#![forbid(unsafe_code)]

//! Command-line argument parsing for the glint demo.
//!
//! Parses args by hand to keep the binary lean. Environment variables with
//! the `GLINT_*` prefix supply defaults; explicit flags override them.

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
glint demo: beams text reveal with a typewriter status line

USAGE:
    glint-demo [OPTIONS]

OPTIONS:
    --text-file=PATH     Reveal the contents of PATH instead of the built-in banner
    --fps=N              Ticks per second (default: 20)
    --seed=N             Fixed random seed for a reproducible animation
    --hold-frames=N      Ticks to hold the finished text (default: 120)
    --exit-after-ms=N    Quit after N milliseconds, 0 disables (default: 0)
    --log-file=PATH      Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    GLINT_TEXT_FILE       Override --text-file
    GLINT_FPS             Override --fps
    GLINT_SEED            Override --seed
    GLINT_HOLD_FRAMES     Override --hold-frames
    GLINT_EXIT_AFTER_MS   Override --exit-after-ms
    GLINT_LOG_FILE        Override --log-file
    GLINT_LOG             Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// File whose contents are revealed; the built-in banner if unset.
    pub text_file: Option<PathBuf>,
    /// Ticks per second, at least 1.
    pub fps: u32,
    /// Fixed seed; OS entropy if unset.
    pub seed: Option<u64>,
    /// Hold length override.
    pub hold_frames: Option<u32>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Tracing output file; no logging if unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            text_file: None,
            fps: 20,
            seed: None,
            hold_frames: None,
            exit_after_ms: 0,
            log_file: None,
        }
    }
}

/// Outcome of parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Run the demo with these options.
    Run(Opts),
    /// `--help` was given.
    Help,
    /// `--version` was given.
    Version,
}

fn parse_value<T: FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid --{flag} value: {val}"))
}

fn parse_fps(val: &str) -> Result<u32, String> {
    match parse_value("fps", val)? {
        0 => Err(format!("Invalid --fps value: {val} (must be at least 1)")),
        n => Ok(n),
    }
}

impl Opts {
    /// Parse process arguments and environment variables.
    ///
    /// Prints and exits on `--help`, `--version` and invalid input.
    pub fn parse() -> Self {
        match Self::parse_from(|key| env::var(key).ok(), env::args().skip(1)) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("glint-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from an explicit environment lookup and argument list.
    ///
    /// Unparseable environment values are ignored; unparseable flags are
    /// errors.
    pub fn parse_from<E, I>(env: E, args: I) -> Result<Parsed, String>
    where
        E: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        // Environment first
        if let Some(val) = env("GLINT_TEXT_FILE") {
            opts.text_file = Some(val.into());
        }
        if let Some(n) = env("GLINT_FPS").and_then(|v| parse_fps(&v).ok()) {
            opts.fps = n;
        }
        if let Some(n) = env("GLINT_SEED").and_then(|v| v.parse().ok()) {
            opts.seed = Some(n);
        }
        if let Some(n) = env("GLINT_HOLD_FRAMES").and_then(|v| v.parse().ok()) {
            opts.hold_frames = Some(n);
        }
        if let Some(n) = env("GLINT_EXIT_AFTER_MS").and_then(|v| v.parse().ok()) {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("GLINT_LOG_FILE") {
            opts.log_file = Some(val.into());
        }

        // Flags override env vars
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--text-file=") {
                        opts.text_file = Some(val.into());
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_fps(val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_value("seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--hold-frames=") {
                        opts.hold_frames = Some(parse_value("hold-frames", val)?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_value("exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(val.into());
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }

    /// Interval between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Auto-exit deadline, if enabled.
    #[must_use]
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}
