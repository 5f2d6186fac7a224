//! Cadence simulator - drive the playback controller from the command line

use anyhow::Context;
use cadence_loudness::{ReplayGainConfig, ReplayGainMode, ReplayGainTags};
use cadence_playback::{Collaborators, ControllerConfig, DEFAULT_CONFIG_FILE};
use cadence_server_client::{CadenceServerClient, ServerCollaborators, ServerConfig};
use cadence_sim::{load_tracks, LogAnalytics, LogNotifier, Simulation, SimulationOptions};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-sim")]
#[command(about = "Simulate playback through the Cadence controller", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a queue file and print the transcript
    Play {
        /// JSON file with an array of tracks
        queue: PathBuf,
        /// Seconds between progress ticks
        #[arg(long, default_value_t = 1.0)]
        tick: f64,
        /// Seconds to play live streams before moving on
        #[arg(long, default_value_t = 30.0)]
        live: f64,
        /// Queue position to start at
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Pause and resume every track at this position
        #[arg(long)]
        pause_at: Option<f64>,
        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Compute a ReplayGain multiplier
    Gain {
        /// Gain in dB
        #[arg(long, allow_hyphen_values = true)]
        gain: Option<f64>,
        /// Linear peak
        #[arg(long)]
        peak: Option<f64>,
        /// Pre-amp in dB
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pre_amp: f64,
    },
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
struct ServerArgs {
    /// Server base URL; without it network calls are dropped
    #[arg(long, env = "CADENCE_SIM_SERVER")]
    server: Option<String>,
    /// Server user
    #[arg(long, env = "CADENCE_SIM_USER", default_value = "")]
    user: String,
    /// Subsonic token
    #[arg(long, env = "CADENCE_SIM_TOKEN")]
    token: Option<String>,
    /// Salt the token was made with
    #[arg(long, env = "CADENCE_SIM_SALT")]
    salt: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_sim=info,cadence_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Play {
            queue,
            tick,
            live,
            start,
            pause_at,
            json,
            server,
        } => {
            let options = SimulationOptions {
                tick_seconds: tick,
                live_seconds: live,
                start_index: start,
                pause_at,
            };
            play(config, &queue, options, server, json)?;
        }
        Commands::Gain {
            gain,
            peak,
            pre_amp,
        } => {
            let replay_gain = ReplayGainConfig::new(ReplayGainMode::Track, pre_amp);
            replay_gain.validate()?;
            let tags = ReplayGainTags {
                track_gain: gain,
                track_peak: peak,
                ..Default::default()
            };
            println!("{:.6}", replay_gain.multiplier(&tags));
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ControllerConfig> {
    let config = match path {
        Some(path) => ControllerConfig::load_from(path),
        None => ControllerConfig::load(),
    }
    .with_context(|| {
        format!(
            "loading {}",
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
        )
    })?;
    config.validate()?;
    Ok(config)
}

fn play(
    config: ControllerConfig,
    queue: &PathBuf,
    options: SimulationOptions,
    server: ServerArgs,
    json: bool,
) -> anyhow::Result<()> {
    let tracks = load_tracks(queue)?;

    // The controller is synchronous; network calls run on this runtime
    let runtime = tokio::runtime::Runtime::new()?;

    let mut collaborators = Collaborators::disconnected()
        .with_notifier(Arc::new(LogNotifier::default()))
        .with_analytics(Arc::new(LogAnalytics));

    let remote = match server.server {
        Some(url) => {
            let mut server_config = ServerConfig::new(url, server.user);
            if let (Some(token), Some(salt)) = (server.token, server.salt) {
                server_config = server_config.with_token(token, salt);
            }
            let client = CadenceServerClient::new(server_config)?;
            let remote = Arc::new(ServerCollaborators::new(client, runtime.handle().clone()));
            collaborators = collaborators
                .with_scrobbler(remote.clone())
                .with_keep_alive(remote.clone())
                .with_primer(remote.clone());
            Some(remote)
        }
        None => None,
    };

    let mut simulation = Simulation::new(config, collaborators, options)?;
    let transcript = simulation.run(tracks);

    if let Some(remote) = remote {
        runtime.block_on(remote.drain(Duration::from_secs(10)));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else {
        for step in &transcript.steps {
            println!(
                "{:>8.1}s  {:<10} {:<9} gain={:.3} {:?}",
                step.at,
                step.track_id,
                format!("{:?}", step.kind),
                step.gain,
                step.commands
            );
        }
    }

    Ok(())
}
