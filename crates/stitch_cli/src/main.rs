//! Stitch CLI
//!
//! Drive the wallet configurator headlessly: replay scripted sessions,
//! inspect model files and print the default settings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use stitch_3d::loader::LoaderRegistry;
use stitch_3d::SceneGraph;
use stitch_configurator::demo::wallet_scene;
use stitch_configurator::prelude::*;
use stitch_configurator::ConfigSummary;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::ScriptStep;

#[derive(Parser)]
#[command(name = "stitch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stitch wallet configurator CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted session and report the final state
    Simulate {
        /// Model file (.gltf/.glb); the built-in wallet fixture is used if omitted
        #[arg(short, long)]
        asset: Option<PathBuf>,

        /// Settings file (TOML)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Events separated by ';', with 'wait N' to render N frames
        #[arg(short, long, default_value = "")]
        events: String,

        /// Frames to render after the script
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Seconds per frame
        #[arg(short, long, default_value = "0.016666668")]
        delta: f32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the nodes, part bindings and framing of a model file
    Inspect {
        /// Model file (.gltf/.glb)
        asset: PathBuf,

        /// Settings file (TOML)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Print the default settings as TOML
    Settings {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            asset,
            settings,
            events,
            frames,
            delta,
            json,
        } => cmd_simulate(asset.as_deref(), settings.as_deref(), &events, frames, delta, json),

        Commands::Inspect { asset, settings } => cmd_inspect(&asset, settings.as_deref()),

        Commands::Settings { output } => cmd_settings(output.as_deref()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<ConfiguratorSettings> {
    match path {
        Some(path) => ConfiguratorSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(ConfiguratorSettings::default()),
    }
}

#[derive(Serialize)]
struct PoseReport {
    position: [f32; 3],
    orientation: [f32; 4],
    spin_angle: f32,
}

#[derive(Serialize)]
struct PartReport {
    part: PartId,
    enabled: bool,
    /// None when the asset has no node for the part
    visible: Option<bool>,
}

#[derive(Serialize)]
struct SimulationReport {
    asset: String,
    frames_drawn: u64,
    frames_skipped: u64,
    pose: PoseReport,
    parts: Vec<PartReport>,
    config: ConfigSummary,
}

fn cmd_simulate(
    asset: Option<&Path>,
    settings_path: Option<&Path>,
    events: &str,
    frames: u32,
    delta: f32,
    json: bool,
) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let steps = script::parse(events)?;

    let mut session = Configurator::new(&settings);
    match asset {
        Some(path) => {
            let mut registry = LoaderRegistry::new().with_cache_size(settings.asset.cache_capacity);
            session.on_asset_loaded(registry.load(path));
        }
        None => {
            info!("No asset given, using the built-in wallet fixture");
            session.attach_asset(&wallet_scene());
        }
    }

    let mut skipped = 0u64;
    let mut run = |session: &mut Configurator, count: u32| {
        for _ in 0..count {
            if session.frame(delta) == FrameOutcome::Skipped {
                skipped += 1;
            }
        }
    };

    for step in steps {
        match step {
            ScriptStep::Event(event) => {
                if let Err(err) = session.handle(event) {
                    warn!("Ignoring rejected event: {}", err);
                }
            }
            ScriptStep::Wait(count) => {
                debug!("Rendering {} frames", count);
                run(&mut session, count);
            }
        }
    }
    run(&mut session, frames);

    let report = build_report(&session, skipped);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(session: &Configurator, skipped: u64) -> SimulationReport {
    let driver = session.driver();
    let pose = driver.pose();
    let asset = match driver.asset_state() {
        AssetState::Pending => "pending".to_string(),
        AssetState::Ready => driver
            .graph()
            .map(|g| g.name().to_string())
            .unwrap_or_default(),
        AssetState::Failed(reason) => format!("failed: {reason}"),
    };

    SimulationReport {
        asset,
        frames_drawn: driver.frames_drawn(),
        frames_skipped: skipped,
        pose: PoseReport {
            position: [pose.position.x, pose.position.y, pose.position.z],
            orientation: [
                pose.orientation.x,
                pose.orientation.y,
                pose.orientation.z,
                pose.orientation.w,
            ],
            spin_angle: driver.animator().spin_angle(),
        },
        parts: PartId::ALL
            .into_iter()
            .map(|part| PartReport {
                part,
                enabled: session.config().enabled_parts().is_enabled(part),
                visible: driver.part_visible(part),
            })
            .collect(),
        config: session.config().summary(),
    }
}

fn print_report(report: &SimulationReport) {
    println!("Asset:   {}", report.asset);
    println!(
        "Frames:  {} drawn, {} skipped",
        report.frames_drawn, report.frames_skipped
    );
    println!("View:    {}", report.config.view);
    println!(
        "Pose:    position [{:.4}, {:.4}, {:.4}]  orientation [{:.4}, {:.4}, {:.4}, {:.4}]",
        report.pose.position[0],
        report.pose.position[1],
        report.pose.position[2],
        report.pose.orientation[0],
        report.pose.orientation[1],
        report.pose.orientation[2],
        report.pose.orientation[3],
    );
    println!("Spin:    {:.4} rad", report.pose.spin_angle);
    println!();
    println!("Parts:");
    for part in &report.parts {
        let visible = match part.visible {
            Some(true) => "visible",
            Some(false) => "hidden",
            None => "unbound",
        };
        println!(
            "  {:<14} {:<8} {}",
            part.part.to_string(),
            if part.enabled { "on" } else { "off" },
            visible
        );
    }
    println!();
    let config = &report.config;
    println!("Wizard:  step {}{}", config.step, if config.complete { " (complete)" } else { "" });
    println!(
        "  gender:    {}",
        config.gender.map(Gender::as_str).unwrap_or("-")
    );
    println!("  base:      {}", config.base_model.as_deref().unwrap_or("-"));
    println!("  parts:     {}", config.part_count);
    println!(
        "  stitching: {}",
        config.stitching.map(Stitching::as_str).unwrap_or("-")
    );
}

fn cmd_inspect(asset: &Path, settings_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let mut registry = LoaderRegistry::new();
    let scene = registry
        .load(asset)
        .with_context(|| format!("Failed to load {}", asset.display()))?;

    println!("{} ({} nodes)", scene.name(), scene.len());
    print_tree(&scene);

    let mut driver = FrameDriver::new(&settings);
    driver.attach_asset(&scene);

    println!();
    println!("Parts:");
    for part in PartId::ALL {
        let status = if driver.bindings().and_then(|b| b.node(part)).is_some() {
            "bound"
        } else {
            "missing"
        };
        println!("  {:<14} {}", part.to_string(), status);
    }

    println!();
    match driver.normalization() {
        Some(norm) => {
            let b = norm.source_bounds;
            println!(
                "Bounds:  min [{:.4}, {:.4}, {:.4}]  max [{:.4}, {:.4}, {:.4}]",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            );
            println!("Scale:   {:.6}", norm.scale);
            println!(
                "Offset:  [{:.4}, {:.4}, {:.4}]",
                norm.offset.x, norm.offset.y, norm.offset.z
            );
        }
        None => println!("Bounds:  no geometry"),
    }

    Ok(())
}

fn print_tree(scene: &SceneGraph) {
    for id in scene.traverse() {
        let Some(node) = scene.get(id) else {
            continue;
        };
        let indent = "  ".repeat(scene.depth(id) + 1);
        let name = node.name.as_deref().unwrap_or("<unnamed>");
        let mesh = if node.bounds.is_some() { " [mesh]" } else { "" };
        println!("{indent}{name}{mesh}");
    }
}

fn cmd_settings(output: Option<&Path>) -> Result<()> {
    let text = ConfiguratorSettings::default().to_toml_string()?;
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Settings written to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
