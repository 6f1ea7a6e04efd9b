use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spritestage_game::{Game, SceneConfig, Store};
use spritestage_input::{Action, InputEvent, KeyCode};
use spritestage_render::{DebugTextRenderer, Renderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spritestage-cli", about = "Headless driver for spritestage sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Key table file (YAML, or JSON with a .json extension), replacing the config's
    #[arg(short, long, global = true)]
    bindings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the active key table
    Bindings,
    /// Run a session headlessly against scripted input
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Milliseconds between frames
        #[arg(long, default_value = "16")]
        frame_ms: f64,
        /// Input script, e.g. "down:37@0,up:37@500,up:83@600,resize:1024x768@700"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Print the debug render every N frames (0 prints only the last frame)
        #[arg(long, default_value = "0")]
        every: u64,
    },
}

/// Input events counted over a simulated session.
#[derive(Debug, Clone, Copy, Default)]
struct SessionStats {
    key_downs: u32,
    key_ups: u32,
    resizes: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(path) = &cli.bindings {
        config
            .load_bindings(path)
            .with_context(|| format!("loading key bindings {}", path.display()))?;
    }

    match cli.command {
        Commands::Info => {
            println!("spritestage-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", spritestage_render::crate_info());
            println!("input: {}", spritestage_input::crate_info());
            println!(
                "player sheet: {} ({}x{}, {} tiles)",
                config.player.sheet.image,
                config.player.sheet.tiles_x,
                config.player.sheet.tiles_y,
                config.player.sheet.num_tiles
            );
            println!(
                "camera: scope={} range={} height={}",
                config.camera.scope_factor,
                config.camera.range(),
                config.camera.height
            );
        }
        Commands::Bindings => {
            let bindings = config.bindings();
            for action in Action::ALL {
                let keys: Vec<String> = bindings
                    .keys_for(action)
                    .iter()
                    .map(|k| k.0.to_string())
                    .collect();
                let keys = if keys.is_empty() {
                    "(unbound)".to_string()
                } else {
                    keys.join(", ")
                };
                println!("{:<13} {keys}", action.as_str());
            }
        }
        Commands::Simulate {
            frames,
            frame_ms,
            keys,
            every,
        } => {
            if !(frame_ms.is_finite() && frame_ms > 0.0) {
                bail!("--frame-ms must be positive, got {frame_ms}");
            }
            let mut script = parse_script(&keys)?;
            script.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut game = Game::new(config)?;
            let mut store = Store::new(SessionStats::default());
            store.on("key-down", |s: &SessionStats, _: &InputEvent| SessionStats {
                key_downs: s.key_downs + 1,
                ..*s
            });
            store.on("key-up", |s: &SessionStats, _: &InputEvent| SessionStats {
                key_ups: s.key_ups + 1,
                ..*s
            });
            store.on("resize", |s: &SessionStats, _: &InputEvent| SessionStats {
                resizes: s.resizes + 1,
                ..*s
            });

            let renderer = DebugTextRenderer::new();
            let mut pending = script.into_iter().peekable();
            for frame in 1..=frames {
                let t = frame as f64 * frame_ms;
                while let Some((at, event)) = pending.next_if(|(at, _)| *at <= t) {
                    tracing::debug!(?event, at, frame, "input");
                    store.dispatch(event_kind(&event), &event);
                    game.handle_event(event);
                }
                game.frame(t);

                if every > 0 && frame % every == 0 {
                    print!("{}", renderer.render(&game.view()));
                }
            }
            if every == 0 || frames % every != 0 {
                print!("{}", renderer.render(&game.view()));
            }

            let stats = store.state();
            let orbit = game.orbit_controller();
            println!(
                "Input: {} down, {} up, {} resize ({} dispatched)",
                stats.key_downs,
                stats.key_ups,
                stats.resizes,
                store.dispatched()
            );
            println!(
                "Orbit: angle={:.4} target={:.4} state={:?}",
                orbit.angle(),
                orbit.target_angle(),
                orbit.state()
            );
            println!(
                "Player: tile={} paused={}",
                game.player().animated_texture().current_tile(),
                game.player().animated_texture().is_paused()
            );
        }
    }

    Ok(())
}

fn event_kind(event: &InputEvent) -> &'static str {
    match event {
        InputEvent::KeyDown { .. } => "key-down",
        InputEvent::KeyUp { .. } => "key-up",
        InputEvent::Resize { .. } => "resize",
        InputEvent::VisibilityChange { .. } => "visibility-change",
    }
}

/// Parse a comma-separated input script into timestamped events.
///
/// Entries are `down:<code>@<ms>`, `up:<code>@<ms>`, `resize:<w>x<h>@<ms>`
/// and `show@<ms>` / `hide@<ms>`.
fn parse_script(script: &str) -> Result<Vec<(f64, InputEvent)>> {
    let mut events = Vec::new();
    for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (body, at) = entry
            .rsplit_once('@')
            .with_context(|| format!("missing @<ms> in {entry:?}"))?;
        let at: f64 = at
            .parse()
            .with_context(|| format!("bad timestamp in {entry:?}"))?;

        let event = match body.split_once(':') {
            Some(("down", code)) => InputEvent::KeyDown {
                key: parse_key(code, entry)?,
            },
            Some(("up", code)) => InputEvent::KeyUp {
                key: parse_key(code, entry)?,
            },
            Some(("resize", size)) => {
                let (w, h) = size
                    .split_once('x')
                    .with_context(|| format!("expected <w>x<h> in {entry:?}"))?;
                InputEvent::Resize {
                    width: w.parse().with_context(|| format!("bad width in {entry:?}"))?,
                    height: h.parse().with_context(|| format!("bad height in {entry:?}"))?,
                }
            }
            None if body == "show" => InputEvent::VisibilityChange { visible: true },
            None if body == "hide" => InputEvent::VisibilityChange { visible: false },
            _ => bail!("unknown input entry {entry:?}"),
        };
        events.push((at, event));
    }
    Ok(events)
}

fn parse_key(code: &str, entry: &str) -> Result<KeyCode> {
    let code = code
        .parse()
        .with_context(|| format!("bad key code in {entry:?}"))?;
    Ok(KeyCode(code))
}
