//! RulerPlus - On-Screen Ruler Overlay
//!
//! A transparent, borderless window that draws inch, centimeter or pixel
//! markers over the desktop, scaled by the system DPI. Click to cycle units.

mod config;
mod platform;
mod ruler;
mod surface;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{Config, ConfigResult, TomlSettings};
use platform::{PlatformError, SystemDpi};
use ruler::{
    compute_scale, DpiProvider, DrawStyle, FixedDpi, MemorySettings, RulerController, UnitKind,
    MAX_DPI,
};
use surface::{RecordingSurface, Size, SvgSurface};

/// RulerPlus - On-screen ruler overlay
#[derive(Parser)]
#[command(name = "rulerplus")]
#[command(author = "RulerPlus Contributors")]
#[command(version)]
#[command(about = "Measure anything on screen in inches, centimeters or pixels", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the ruler overlay (default)
    Run,

    /// Render one frame off-screen
    Render {
        /// Surface width in pixels
        #[arg(long)]
        width: u32,

        /// Surface height in pixels
        #[arg(long)]
        height: u32,

        /// Dots per inch (defaults to the system value)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DPI as i64))]
        dpi: Option<u32>,

        /// Unit: in, cm or px (defaults to the saved unit)
        #[arg(short, long)]
        unit: Option<UnitKind>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show system information
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Frame report plus the list of draw commands
    Json,
    /// Standalone SVG preview
    Svg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let loaded = TomlSettings::open(config_path.clone());
    let file_verbose = loaded
        .as_ref()
        .map(|s| s.config().general.verbose)
        .unwrap_or(false);

    // Initialize logging
    let filter = if cli.verbose || file_verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let settings = settings_or_detached(config_path, loaded);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            run_ruler(settings)?;
        }
        Commands::Render {
            width,
            height,
            dpi,
            unit,
            format,
            output,
        } => {
            let unit = unit.unwrap_or_else(|| settings.config().ruler.unit());
            let dpi = dpi.unwrap_or_else(|| SystemDpi.dpi());
            let document = render_document(width, height, dpi, unit, format)?;

            if let Some(path) = output {
                write_output(&path, &document)?;
                println!("Frame written to: {}", path.display());
            } else {
                print!("{}", document);
            }
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config()?;
                if let Some(path) = output {
                    write_output(&path, &sample)?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(settings.config())?);
            }
        }
        Commands::Info => {
            print_system_info(&settings);
        }
    }

    Ok(())
}

/// Open the overlay window
fn run_ruler(settings: TomlSettings) -> anyhow::Result<()> {
    let controller = RulerController::new(settings, SystemDpi, DrawStyle::default());

    tracing::info!(
        "Starting RulerPlus {} in {} at {} dpi",
        env!("CARGO_PKG_VERSION"),
        controller.unit(),
        SystemDpi.dpi()
    );
    tracing::debug!(
        "Settings file: {}",
        controller.settings().path().display()
    );
    if controller.settings().is_detached() {
        tracing::warn!("Unit changes will not be saved this session");
    }

    match platform::run_overlay(controller) {
        Ok(()) => Ok(()),
        Err(e @ PlatformError::NotSupported(_)) => {
            anyhow::bail!("{}. Use `rulerplus render` to preview the ruler off-screen.", e)
        }
        #[cfg(target_os = "windows")]
        Err(e) => Err(e.into()),
    }
}

/// Fall back to defaults when the config file is unreadable, without ever
/// writing over it
fn settings_or_detached(path: PathBuf, loaded: ConfigResult<TomlSettings>) -> TomlSettings {
    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                "Using default configuration, {} will not be modified: {}",
                path.display(),
                e
            );
            TomlSettings::detached(path, Config::default())
        }
    }
}

/// Render a single frame as JSON or SVG
fn render_document(
    width: u32,
    height: u32,
    dpi: u32,
    unit: UnitKind,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let size = Size::new(i32::try_from(width)?, i32::try_from(height)?);
    let controller = RulerController::new(
        MemorySettings::new(unit.index()),
        FixedDpi(dpi),
        DrawStyle::default(),
    );

    let document = match format {
        OutputFormat::Json => {
            let mut surface = RecordingSurface::new(size);
            let report = controller.on_paint_requested(&mut surface);
            let value = serde_json::json!({
                "size": size,
                "dpi": dpi,
                "report": report,
                "commands": surface.commands(),
            });
            serde_json::to_string_pretty(&value)? + "\n"
        }
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new(size, controller.style());
            controller.on_paint_requested(&mut surface);
            surface.finish()
        }
    };

    Ok(document)
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Print system information
fn print_system_info(settings: &TomlSettings) {
    let dpi = SystemDpi.dpi();
    let unit = settings.config().ruler.unit();

    println!("RulerPlus System Information");
    println!("============================\n");

    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Platform: {}", platform::platform_name());
    println!("System DPI: {}", dpi);
    println!("Config: {}", settings.path().display());
    println!("Saved unit: {}", unit);

    println!("\nScale at {} dpi:", dpi);
    for unit in UnitKind::ALL {
        let scale = compute_scale(dpi, unit);
        println!(
            "  {}: {} px per tick, label step {}",
            unit, scale.pixels_per_unit, scale.multiplier
        );
    }

    #[cfg(not(target_os = "windows"))]
    {
        println!("\nThe overlay window requires Windows.");
        println!("Use `rulerplus render --width W --height H --format svg` to preview.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["rulerplus", "info"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = Cli::try_parse_from(["rulerplus", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_render_arguments() {
        let cli = Cli::try_parse_from([
            "rulerplus", "render", "--width", "1000", "--height", "800", "--dpi", "96", "-u",
            "cm", "-f", "svg",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Render {
                width,
                height,
                dpi,
                unit,
                format,
                output,
            }) => {
                assert_eq!((width, height), (1000, 800));
                assert_eq!(dpi, Some(96));
                assert_eq!(unit, Some(UnitKind::Centimeters));
                assert_eq!(format, OutputFormat::Svg);
                assert!(output.is_none());
            }
            _ => panic!("Expected render command"),
        }
    }

    #[test]
    fn test_render_rejects_zero_dpi_and_bad_unit() {
        assert!(Cli::try_parse_from([
            "rulerplus", "render", "--width", "10", "--height", "10", "--dpi", "0"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "rulerplus", "render", "--width", "10", "--height", "10", "--unit", "mm"
        ])
        .is_err());
    }

    #[test]
    fn test_render_dpi_upper_bound() {
        let parse = |dpi: &str| {
            Cli::try_parse_from([
                "rulerplus", "render", "--width", "10", "--height", "10", "--dpi", dpi,
            ])
        };

        assert!(parse(&MAX_DPI.to_string()).is_ok());
        assert!(parse(&(MAX_DPI + 1).to_string()).is_err());
        assert!(parse("3000000000").is_err());
    }

    #[test]
    fn test_render_at_max_dpi() {
        for unit in UnitKind::ALL {
            let document = render_document(1000, 800, MAX_DPI, unit, OutputFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&document).unwrap();
            assert_eq!(value["dpi"], MAX_DPI);
        }

        let document = render_document(1000, 800, MAX_DPI, UnitKind::Inches, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["report"]["vertical_ticks"], 1);
        assert_eq!(value["report"]["horizontal_ticks"], 1);
    }

    #[test]
    fn test_corrupt_config_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ruler\ncurrent_measurement = 2\n").unwrap();

        let settings = settings_or_detached(path.clone(), TomlSettings::open(path.clone()));
        assert!(settings.is_detached());
        assert_eq!(settings.config(), &Config::default());

        let mut controller = RulerController::new(settings, FixedDpi(96), DrawStyle::default());
        let signals = controller.on_surface_clicked();
        // Only the repaint request, no persist failure
        assert_eq!(signals.len(), 1);
        assert_eq!(controller.settings().config().ruler.unit(), UnitKind::Centimeters);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[ruler\ncurrent_measurement = 2\n");
    }

    #[test]
    fn test_render_json_document() {
        let document = render_document(1000, 800, 96, UnitKind::Inches, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();

        assert_eq!(value["report"]["unit"], "inches");
        assert_eq!(value["report"]["vertical_ticks"], 9);
        assert_eq!(value["report"]["horizontal_ticks"], 11);
        assert_eq!(value["report"]["diagonal_length"], 12.75);
        assert_eq!(value["commands"][0]["brush"], "transparency");
    }

    #[test]
    fn test_render_svg_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/ruler.svg");

        let document = render_document(1000, 800, 96, UnitKind::Pixels, OutputFormat::Svg).unwrap();
        write_output(&path, &document).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains(">px</text>"));
        assert!(written.contains(">700</text>"));
    }
}
