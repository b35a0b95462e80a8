//! cellgate CLI: run the Life engine and draw every snapshot it
//! publishes.

use std::error::Error;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use cellgate::engine::{Activation, EngineConfig, PacketTrigger, SnapshotSink};
use cellgate::render::{render_ansi, render_plain};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cellgate")]
#[command(version)]
#[command(about = "Conway's Game of Life on a torus, published one snapshot per tick")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "64")]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value = "64")]
    height: u32,

    /// Random picks used to seed the grid
    #[arg(long, default_value = "400")]
    seed_count: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value = "2000")]
    interval_ms: u64,

    /// Stop after this many snapshots (runs forever if omitted)
    #[arg(short, long)]
    generations: Option<u64>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Bound of the snapshot channel
    #[arg(long, default_value = "4")]
    channel_capacity: usize,

    /// Draw with '#' and '.' instead of ANSI escapes
    #[arg(long)]
    plain: bool,

    /// Start on the first TCP connection from this source port
    /// (0 starts immediately; 65137 is the classic trigger)
    #[arg(long, default_value = "0")]
    port: u16,

    /// Address that accepts trigger connections when --port is set
    #[arg(long, default_value = "127.0.0.1:7171")]
    listen: SocketAddr,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.width,
            height: self.height,
            seed_count: self.seed_count,
            tick_interval: Duration::from_millis(self.interval_ms),
            channel_capacity: self.channel_capacity,
            rng_seed: self.seed,
            ..EngineConfig::default()
        }
    }
}

/// Accept connections until one arrives from the trigger port.
fn wait_for_trigger<S: SnapshotSink + 'static>(
    activation: &Activation<S>,
    listen: SocketAddr,
) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(listen)?;
    log::info!(
        "waiting on {listen} for a connection from port {}",
        activation.trigger().source_port()
    );
    for stream in listener.incoming() {
        let peer = match stream.and_then(|s| s.peer_addr()) {
            Ok(peer) => peer,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };
        if activation.observe_source_port(peer.port())? {
            return Ok(());
        }
        log::debug!("ignored connection from {peer}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.engine_config();
    let (tx, rx) = config.snapshot_channel();
    let activation = Activation::new(config, tx)?;
    let activation = if cli.port == 0 {
        activation.try_activate()?;
        activation
    } else {
        let activation = activation.with_trigger(PacketTrigger::new(cli.port));
        wait_for_trigger(&activation, cli.listen)?;
        activation
    };

    let mut stdout = io::stdout().lock();
    let mut received = 0u64;
    while cli.generations.is_none_or(|limit| received < limit) {
        let Ok(snapshot) = rx.recv() else {
            break;
        };
        let frame = if cli.plain {
            render_plain(&snapshot)
        } else {
            render_ansi(&snapshot)
        };
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;
        received += 1;
    }

    if let Some(world) = activation.shutdown() {
        let stats = world.publish_stats();
        log::info!(
            "stopped at generation {}: {} snapshots published, {} dropped",
            world.generation(),
            stats.published,
            stats.dropped()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn port_defaults_to_immediate_start() {
        let cli = Cli::try_parse_from(["cellgate"]).unwrap();
        assert_eq!(cli.port, 0);
        assert_eq!(cli.listen, "127.0.0.1:7171".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn trigger_port_connection_starts_the_engine() {
        let cli = Cli::try_parse_from([
            "cellgate",
            "--width",
            "8",
            "--height",
            "8",
            "--seed",
            "3",
            "--port",
            "65137",
            "--listen",
            "127.0.0.1:0",
        ])
        .unwrap();
        assert_eq!(cli.port, 65137);
        let config = cli.engine_config();
        assert_eq!(config.rng_seed, Some(3));
        let (tx, rx) = config.snapshot_channel();
        let activation = Activation::new(config, tx)
            .unwrap()
            .with_trigger(PacketTrigger::new(cli.port));
        assert!(!activation.observe_source_port(80).unwrap());
        assert!(activation.observe_source_port(cli.port).unwrap());
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.width(), 8);
        activation.shutdown();
    }
}
