use std::time::Duration;

use anyhow::Context;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use achtung::config::GameConfig;
use achtung::game::control::{HeadingSource, PressedKeys, Wanderer};
use achtung::game::performance::{FrameMonitor, FrameStatus};
use achtung::game::render;
use achtung::game::round::Round;

/// Spreads one round seed over the bots
const BOT_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Achtung v{}", env!("CARGO_PKG_VERSION"));

    let mut config = GameConfig::load_or_default();
    config.validate().context("invalid game configuration")?;
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);
    info!(
        "Configuration loaded: arena {}x{}, radius={}, fps={}, seed={}",
        config.arena.width, config.arena.height, config.snake.radius, config.frame_rate, seed
    );

    let bots: [Box<dyn HeadingSource>; 3] = [1u64, 2, 3].map(|i| {
        Box::new(Wanderer::new(seed ^ i.wrapping_mul(BOT_SEED_STRIDE))) as Box<dyn HeadingSource>
    });
    let mut round = Round::standard(config, bots)?;

    let frame_rate = round.config().frame_rate;
    let mut ticker = interval(Duration::from_nanos(1_000_000_000 / frame_rate as u64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut monitor = FrameMonitor::new(frame_rate);
    let mut last_status = FrameStatus::Healthy;
    let keys = PressedKeys::new();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                monitor.frame_start();
                let report = round.step(&keys);
                let commands = render::draw_commands(&round);
                monitor.frame_end();

                if !report.deaths.is_empty() {
                    info!(frame = report.frame, alive = report.alive, draws = commands.len(), "frame had deaths");
                }

                let status = monitor.status();
                if status != last_status {
                    if status != FrameStatus::Healthy {
                        warn!(
                            status = ?status,
                            average = ?monitor.average(),
                            budget = ?monitor.budget(),
                            "frame budget pressure"
                        );
                    } else {
                        info!("frame budget recovered");
                    }
                    last_status = status;
                }

                if round.is_over() {
                    break;
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let result = round.result();
    info!(
        frames = result.frames,
        winner = ?result.winner,
        worst_frame = ?monitor.worst(),
        "round over"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
