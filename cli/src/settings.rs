//! Flag and config-file resolution.

use anyhow::{Context, Result, bail};
use fx_config::{FxConfig, OutputFormat};
use fx_types::WindowSpec;

/// Window flags as given on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, clap::Args)]
pub struct WindowArgs {
    /// Window width in key units
    #[arg(long)]
    pub size: Option<f64>,
    /// Distance between consecutive window starts (defaults to --size)
    #[arg(long)]
    pub step: Option<f64>,
    /// Start of the first window (defaults to the first value)
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<f64>,
    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub spec: WindowSpec<f64>,
    pub format: OutputFormat,
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        bail!("--{name} must be a finite number, got {value}")
    }
}

impl Settings {
    /// Flags win over the config file; `step` defaults to `size`.
    pub fn resolve(args: WindowArgs, config: Option<&FxConfig>) -> Result<Self> {
        let window = config.map(FxConfig::window).unwrap_or_default();

        let Some(size) = args.size.or(window.size) else {
            bail!("no window size: pass --size or set [window] size in the config file");
        };
        let size = finite("size", size)?;
        let step = finite("step", args.step.or(window.step).unwrap_or(size))?;

        let mut spec = WindowSpec::sliding(size, step).context("invalid window settings")?;
        if let Some(start) = args.start.or(window.start) {
            spec = spec.starting_at(finite("start", start)?);
        }

        let format = args
            .format
            .or_else(|| config.and_then(FxConfig::format))
            .unwrap_or_default();

        tracing::debug!(size, step, start = ?spec.start(), %format, "Settings resolved");
        Ok(Self { spec, format })
    }
}
