use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stargaze_galaxy::{GalaxyParameters, PointFieldGenerator, SeededSource};
use stargaze_render::{DebugTextRenderer, GalaxyLayer, RenderContext, Renderer};
use stargaze_scenes::{HauntedScene, HouseLayout, ModelViewer, SandboxObject};
use stargaze_tools::{ControlValue, DebugPanel, GalaxyPanel, PointFieldInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stargaze-cli", about = "Headless driver for stargaze scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a galaxy point field and summarize it
    Galaxy {
        /// Parameter file (.json, .yaml or .yml)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// RNG seed; omit for a fresh galaxy every run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Override the point count
        #[arg(short, long)]
        count: Option<u32>,
        /// Write the generated buffers as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the full frame listing
        #[arg(long)]
        frame: bool,
    },
    /// Run the haunted house headless for a number of frames
    Haunt {
        #[arg(short, long, default_value = "120")]
        frames: u32,
        #[arg(long, default_value = "60")]
        fps: f32,
        /// Seed for grave placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Run the model viewer and switch fox animations
    Models {
        /// Clip index to switch to after the first frame
        #[arg(short, long, default_value = "0")]
        clip: usize,
        #[arg(short, long, default_value = "60")]
        frames: u32,
        #[arg(long, default_value = "60")]
        fps: f32,
    },
    /// Replay a scripted debug-panel session against the galaxy and sandbox cube
    Panel {
        #[arg(short, long, default_value = "7")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stargaze-cli v{}", env!("CARGO_PKG_VERSION"));
            let params = GalaxyParameters::default();
            println!(
                "galaxy: default count={} branches={} radius={}",
                params.count, params.branches, params.radius
            );
            let ctx = RenderContext::default();
            let viewport = ctx.viewport();
            println!(
                "render: viewport={}x{} fov={}",
                viewport.width, viewport.height, ctx.camera.fov_degrees
            );
            println!(
                "scenes: graves={} models={}",
                HouseLayout::default().grave_count,
                ModelViewer::default().models.len()
            );
            println!(
                "tools: galaxy panel controls={}",
                GalaxyPanel::new(params).panel().controls().len()
            );
        }
        Commands::Galaxy {
            params,
            seed,
            count,
            out,
            frame,
        } => {
            let mut params = match params {
                Some(path) => GalaxyParameters::load(&path)?,
                None => GalaxyParameters::default(),
            };
            if let Some(count) = count {
                params.count = count;
            }
            let mut generator = match seed {
                Some(seed) => PointFieldGenerator::seeded(seed),
                None => PointFieldGenerator::from_entropy(),
            };

            tracing::debug!(?seed, count = params.count, "generating galaxy");
            let field = generator.generate(&params)?;
            println!("{}", PointFieldInspector::summary(&field));

            if frame {
                let mut ctx = RenderContext::default();
                let mut layer = GalaxyLayer::new();
                layer.replace(&mut ctx, &field, &params)?;
                print!("{}", DebugTextRenderer::new().render(&ctx));
            }

            if let Some(path) = out {
                let file = std::fs::File::create(&path)?;
                serde_json::to_writer(file, &field)?;
                println!("Wrote {} points to {}", field.len(), path.display());
            }
        }
        Commands::Haunt { frames, fps, seed } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let mut ctx = RenderContext::default();
            let mut scene = HauntedScene::new(HouseLayout::default(), &mut SeededSource::new(seed));
            scene.populate(&mut ctx);

            for i in 0..frames {
                let elapsed = i as f32 / fps;
                scene.update(elapsed, ctx.camera.position);
                scene.sync(&mut ctx);
            }
            let elapsed = frames.saturating_sub(1) as f32 / fps;
            println!("Haunted house after {frames} frames ({elapsed:.2}s)");
            for (i, ghost) in scene.ghosts().iter().enumerate() {
                let p = ghost.position;
                println!("  ghost-{} at ({:.2}, {:.2}, {:.2})", i + 1, p.x, p.y, p.z);
            }
            print!("{}", DebugTextRenderer::new().render(&ctx));
        }
        Commands::Models { clip, frames, fps } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let mut ctx = RenderContext::default();
            let mut viewer = ModelViewer::default();
            viewer.populate(&mut ctx);

            viewer.frame(0.0);
            if let Err(err) = viewer.mixer.play(clip) {
                println!("Animation switch failed: {err}");
            }
            for i in 1..=frames {
                viewer.frame(i as f32 / fps);
            }
            match (viewer.mixer.active_clip(), viewer.mixer.time()) {
                (Some(active), Some(time)) => println!(
                    "Fox playing {:?} at {:.3}s of {:.3}s",
                    active.name, time, active.duration
                ),
                _ => println!("Fox animation stopped"),
            }
            print!("{}", DebugTextRenderer::new().render(&ctx));
        }
        Commands::Panel { seed } => {
            let mut ctx = RenderContext::default();
            let mut generator = PointFieldGenerator::seeded(seed);
            let mut layer = GalaxyLayer::new();
            let mut panel = GalaxyPanel::new(GalaxyParameters::default());
            layer.regenerate(&mut ctx, &mut generator, panel.parameters())?;

            // A user scrubbing sliders: several drags, one release each.
            let session: [(&str, &[ControlValue]); 3] = [
                (
                    "branches",
                    &[ControlValue::Number(4.0), ControlValue::Number(5.0)],
                ),
                (
                    "spin",
                    &[ControlValue::Number(-1.0), ControlValue::Number(-2.5)],
                ),
                ("branches", &[ControlValue::Number(5.0)]),
            ];
            for (name, drags) in session {
                for value in drags {
                    panel.drag(name, *value)?;
                }
                match panel.commit(name)? {
                    Some(params) => {
                        layer.regenerate(&mut ctx, &mut generator, &params)?;
                        println!("{name}: committed, regenerated");
                    }
                    None => println!("{name}: unchanged, no regeneration"),
                }
            }
            println!(
                "Galaxy regenerations={} disposed={} live drawables={}",
                layer.regenerations(),
                ctx.drawables().disposed_count(),
                ctx.drawables().len()
            );

            let mut sandbox = SandboxObject::new();
            let mut controls = DebugPanel::new()
                .number("elevation", sandbox.elevation(), -2.0, 2.0, 0.01)
                .toggle("visible", sandbox.visible)
                .toggle("wireframe", sandbox.wireframe)
                .color("color", sandbox.color);
            let edits = [
                ("visible", ControlValue::Toggle(true)),
                ("elevation", ControlValue::Number(1.234)),
                ("wireframe", ControlValue::Toggle(true)),
                ("color", ControlValue::Color("#ffffff".parse()?)),
            ];
            for (name, value) in edits {
                let Some(change) = controls.set(name, value)? else {
                    continue;
                };
                match change.value {
                    ControlValue::Number(v) => sandbox.set_elevation(v),
                    ControlValue::Toggle(v) if name == "visible" => sandbox.visible = v,
                    ControlValue::Toggle(v) => sandbox.wireframe = v,
                    ControlValue::Color(c) => sandbox.color = c,
                }
                sandbox.sync(&mut ctx);
                println!("{}: {} -> {}", change.name, change.previous, change.value);
            }
            print!("{}", DebugTextRenderer::new().render(&ctx));
        }
    }

    Ok(())
}
