use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use panel_bridge::{PanelController, ReqwestTransport};
use panel_core::CLOSE_EVENT;
use panel_logging::{panel_debug, panel_info, panel_warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use super::config::{self, PanelConfig};
use super::surface::TerminalSurface;
use super::{input, logging, render};

#[derive(Debug, Parser)]
#[command(
    name = "panel_app",
    about = "Terminal front-end for the overlay settings panel. Reads host messages and UI events as JSON lines on stdin."
)]
struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = "panel.ron")]
    config: PathBuf,
    /// Overrides the host resource name.
    #[arg(long)]
    resource: Option<String>,
    /// Overrides the host base URL.
    #[arg(long)]
    host_url: Option<String>,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = config::load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => PanelConfig::default(),
    };
    logging::initialize(config.log_destination, &config.log_level);
    if let Err(err) = loaded {
        panel_warn!("{}; using defaults", err);
    }

    if let Some(resource) = cli.resource {
        config.resource_name = resource;
    }
    if let Some(host_url) = cli.host_url {
        config.host_base_url = host_url;
    }

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: PanelConfig) -> anyhow::Result<()> {
    let transport =
        ReqwestTransport::new(config.transport_settings()).context("building host transport")?;
    let close_endpoint = transport
        .endpoint(CLOSE_EVENT)
        .context("resolving host endpoint")?;
    panel_info!("Panel ready; close callback at {}", close_endpoint);

    let controller = PanelController::new(Arc::new(transport), Arc::new(TerminalSurface));
    let sender = controller.sender();
    let shutdown = CancellationToken::new();
    let controller_task = tokio::spawn(controller.run(shutdown.clone(), |view| {
        for line in render::render(view) {
            println!("{line}");
        }
    }));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match input::parse_line(&line) {
            Some(msg) => {
                if !sender.send(msg) {
                    break;
                }
            }
            None => panel_debug!("Ignoring input line {:?}", line),
        }
    }

    panel_info!("Input closed; shutting down");
    shutdown.cancel();
    controller_task.await.context("controller task")?;
    Ok(())
}
