mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voxelwalk_input::{Action, InputRouter, Key};
use voxelwalk_kernel::HeightMap;
use voxelwalk_render::{DebugTextRasterizer, FrameStats, RecordingRasterizer};
use voxelwalk_scene::{Clock, FixedStepClock, Scene, SceneConfig};
use voxelwalk_tools::{FpsCounter, SceneInspector};

#[derive(Parser)]
#[command(name = "voxelwalk", about = "Headless voxel world explorer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print a generated height map as ASCII
    Map {
        /// Seed for the random cover pass
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Run a headless session with scripted input
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Seed for level generation (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Scene config as JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Held keys per frame, e.g. "w*30,space,w+d*10,rmb,light:0:5:0"
        #[arg(long, default_value = "")]
        script: String,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Directory holding sky.jpg, wall.jpg and ground.jpg
        #[arg(long)]
        textures: Option<PathBuf>,
        /// OBJ model to display
        #[arg(long)]
        mesh: Option<PathBuf>,
        /// Dump the draw commands of the final frame
        #[arg(long)]
        dump_frame: bool,
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
            println!("voxelwalk v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", voxelwalk_common::crate_info());
            println!("kernel: {}", voxelwalk_kernel::crate_info());
            println!("camera: {}", voxelwalk_camera::crate_info());
            println!("input: {}", voxelwalk_input::crate_info());
            println!("assets: {}", voxelwalk_assets::crate_info());
            println!("render: {}", voxelwalk_render::crate_info());
            println!("scene: {}", voxelwalk_scene::crate_info());
            println!("tools: {}", voxelwalk_tools::crate_info());
        }
        Commands::Map { seed } => {
            let mut rng = fastrand::Rng::with_seed(seed);
            let map = HeightMap::generate(&mut rng);
            println!(
                "seed={seed} columns={} blocks={}",
                map.column_count(),
                map.block_count()
            );
            print!("{}", map.to_ascii());
        }
        Commands::Run {
            frames,
            seed,
            config,
            script,
            fps,
            textures,
            mesh,
            dump_frame,
        } => {
            let mut scene_config = match config {
                Some(path) => SceneConfig::from_json_file(&path)?,
                None => SceneConfig::default(),
            };
            if seed.is_some() {
                scene_config.seed = seed;
            }
            let script = script::parse_script(&script)?;

            let mut scene = Scene::new(&scene_config);
            if let Some(dir) = textures {
                scene.assets_mut().load_textures_from_dir(dir);
            }
            if let Some(path) = mesh {
                scene.assets_mut().load_mesh_file(path);
            }

            let mut router = InputRouter::new(scene.camera().mouse_sensitivity());
            let mut clock = FixedStepClock::at_fps(fps);
            let mut counter = FpsCounter::default();
            let mut recorder = RecordingRasterizer::new();
            let mut stats = FrameStats::default();
            let mut held: Vec<Key> = Vec::new();

            for frame in 0..frames {
                let empty = script::FrameInput::default();
                let input = script.get(frame as usize).unwrap_or(&empty);
                script::feed(&mut router, &held, input);
                held.clone_from(&input.held);

                let now = clock.elapsed_seconds();
                let mut actions = router.frame_actions();
                actions.extend(input.light.map(Action::PlaceLight));
                scene.tick(actions, now);
                for event in scene.drain_events() {
                    tracing::debug!(frame = scene.frame(), ?event, "scene event");
                }
                stats = scene.render(&mut recorder);
                counter.frame(now);
            }
            tracing::info!(frames = scene.frame(), won = scene.has_won(), "session finished");

            println!("{}", SceneInspector::summary(&scene));
            println!(
                "frames={} seed={} fps={:.1}",
                scene.frame(),
                scene.seed(),
                counter.fps()
            );
            println!(
                "columns={} culled={} cubes={} items={} model={} commands={}",
                stats.columns_drawn,
                stats.columns_culled,
                stats.cubes_drawn,
                stats.items_drawn,
                stats.model_drawn,
                stats.commands
            );

            if dump_frame {
                let mut text = DebugTextRasterizer::new();
                scene.render(&mut text);
                print!("{}", text.output());
            }
        }
    }

    Ok(())
}
