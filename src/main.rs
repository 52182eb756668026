mod common;
mod config;
mod error;
mod network;
mod server;
mod storage;
mod ui;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use config::AppConfig;
use error::AppError;
use network::{Endpoints, GraphQLClient};
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "graphql_chat",
    version,
    about = "Tiny chat over a GraphQL subscription feed"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Without a mode, server and window run in the same process.
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run only the GraphQL server (no window)
    Serve,
    /// Run only the chat window against a running server
    Client,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    match cli.mode {
        Some(Mode::Serve) => server::bind(&app_config).await?.serve().await?,
        Some(Mode::Client) => run_window(app_config)?,
        None => {
            let server = server::bind(&app_config).await?;
            tokio::spawn(async move {
                if let Err(err) = server.serve().await {
                    log::error!("GraphQL server terminated: {err}");
                }
            });
            run_window(app_config)?;
        }
    }

    Ok(())
}

fn run_window(app_config: AppConfig) -> Result<(), AppError> {
    // UI -> network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let endpoints = Endpoints {
        graphql_url: app_config.graphql_url(),
        subscriptions_url: app_config.subscriptions_url(),
    };
    tokio::spawn(async move {
        let client = GraphQLClient::new(endpoints, event_tx, cmd_rx);
        if let Err(err) = client.run().await {
            log::error!("Message feed terminated: {err}");
        }
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let default_user = app_config.default_user;

    eframe::run_native(
        "GraphQL Chat",
        options,
        Box::new(move |_cc| {
            let event_receiver = event_rx
                .take()
                .ok_or("ChatApp should only be initialized once")?;

            log::info!("Chat window started as {default_user}");
            Ok(Box::new(ChatApp::new(
                default_user.clone(),
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )?;

    Ok(())
}
