#![deny(unsafe_code)]
//! CLI binary for headless particle field renders.
//!
//! Subcommands:
//! - `render`: advance a field N frames, write the last frame as PNG
//! - `info`: point count, connection distance and config for a surface size
//! - `list`: print available palettes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use particle_field_core::frame::connection_distance;
use particle_field_core::point::point_count;
use particle_field_core::{FieldConfig, Palette, Rgba, Scene};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Advance a particle field for N frames and write the last frame as PNG.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1600)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 1000)]
        height: u32,

        /// Number of frames to advance.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Point palette (violet, ocean, ember, mono). Overrides --params.
        #[arg(short, long)]
        palette: Option<String>,

        /// Background color the frame is composited over.
        #[arg(long, default_value = "#0f0a1e")]
        background: String,

        /// Config overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Read the whole scene from a JSON file instead of the flags above.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Show point count, connection distance and effective config for a surface.
    Info {
        #[arg(short = 'W', long, default_value_t = 1600)]
        width: u32,

        #[arg(short = 'H', long, default_value_t = 1000)]
        height: u32,

        /// Config overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available palettes.
    List,
}

fn parse_params(params: &str) -> Result<Value, CliError> {
    serde_json::from_str(params).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

/// Distance tests per frame for `points` points: n(n-1)/2.
fn pair_checks(points: usize) -> u128 {
    points as u128 * points.saturating_sub(1) as u128 / 2
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "params": FieldConfig::schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Info {
            width,
            height,
            params,
        } => {
            let config = FieldConfig::from_json(&parse_params(&params)?)?;
            let points = point_count(width, height, config.density);
            let distance = connection_distance(width, height, config.connection_divisor);
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "points": points,
                    "connection_distance": distance,
                    "config": config.to_json(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("surface:             {width}x{height}");
                println!("points:              {points}");
                println!("connection distance: {distance}");
                println!("pair checks/frame:   {}", pair_checks(points));
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            palette,
            background,
            params,
            scene,
            output,
        } => {
            let background =
                Rgba::parse(&background).map_err(|e| CliError::Input(e.to_string()))?;

            let scene = match scene {
                Some(path) => load_scene(&path)?,
                None => {
                    let mut params = parse_params(&params)?;
                    if let Some(name) = palette {
                        match params.as_object_mut() {
                            Some(map) => {
                                map.insert("palette".into(), Value::String(name));
                            }
                            None => {
                                return Err(CliError::Input(
                                    "--params must be a JSON object".into(),
                                ))
                            }
                        }
                    }
                    Scene {
                        width,
                        height,
                        seed,
                        frames,
                        params,
                    }
                }
            };
            log::debug!("rendering scene {scene:?}");

            let (surface, stats) = particle_field_raster::render_scene(&scene)?;
            particle_field_raster::snapshot::write_png(&surface, background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "scene": scene,
                    "stats": stats,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({} frames, seed {}, {} points, {} links) -> {}",
                    scene.width,
                    scene.height,
                    scene.frames,
                    scene.seed,
                    stats.points,
                    stats.connections,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
