//! CLI for topicsub
//!
//! Subcommands:
//! - `status`: show the locally recorded state of every topic
//! - `subscribe` / `unsubscribe`: change one topic through the broker
//! - `bootstrap`: subscribe every topic that was never initialized

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use topicsub::config::{Settings, load_config, load_config_from};
use topicsub::transport::WsBrokerClient;
use topicsub::utils::logging;
use topicsub::{Error, SledStore, SubscriptionStore, Topic, TopicCoordinator};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "topicsub", about = "Manage push topic subscriptions")]
struct Cli {
    /// Configuration file to load (without extension); defaults to `config/default`
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the recorded state of every topic
    Status {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Subscribe to a topic, e.g. TOPIC_ONE
    Subscribe { topic: String },
    /// Unsubscribe from a topic
    Unsubscribe { topic: String },
    /// Subscribe every topic that has no recorded state yet
    Bootstrap,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match cli.config.as_deref() {
        Some(name) => load_config_from(name),
        None => load_config(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    logging::init(&settings.log.level);

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, settings: &Settings) -> Result<(), Error> {
    let sled = SledStore::open(&settings.store.path)?;
    let client_id = match settings.broker.client_id.clone() {
        Some(id) => id,
        None => sled.client_id()?,
    };
    let broker = WsBrokerClient::from_settings(&settings.broker, client_id);
    let store = SubscriptionStore::new(sled);
    let coordinator = TopicCoordinator::new(broker, store);

    match command {
        Command::Status { json } => {
            let status = coordinator.status();
            if json {
                // TopicStatus only holds strings and bools
                let out = serde_json::to_string_pretty(&status).unwrap_or_default();
                println!("{out}");
            } else {
                println!("{:<12} {:<14} {:<12} SUBSCRIBED", "TOPIC", "CHANNEL", "INITIALIZED");
                for s in status {
                    println!(
                        "{:<12} {:<14} {:<12} {}",
                        s.topic, s.channel, s.initialized, s.subscribed
                    );
                }
            }
        }
        Command::Subscribe { topic } => {
            let topic: Topic = topic.parse()?;
            coordinator.subscribe(topic).await?;
            println!("{topic}: subscribed");
        }
        Command::Unsubscribe { topic } => {
            let topic: Topic = topic.parse()?;
            coordinator.unsubscribe(topic).await?;
            println!("{topic}: unsubscribed");
        }
        Command::Bootstrap => {
            let outcomes = coordinator.bootstrap().await;
            if outcomes.is_empty() {
                info!("all topics already initialized");
            }

            let mut failed = None;
            for (topic, outcome) in outcomes {
                match outcome {
                    Ok(_) => println!("{topic}: subscribed"),
                    Err(e) => {
                        println!("{topic}: failed: {e}");
                        failed = Some(e);
                    }
                }
            }
            if let Some(e) = failed {
                return Err(e.into());
            }
        }
    }

    Ok(())
}
