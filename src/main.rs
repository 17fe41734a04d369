mod api;
mod app;
mod config;
mod error;
mod poller;
mod script;
mod templates;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use canvas::Editor;
use canvas::geom::Rect;
use canvas::view::HeadlessSurface;
use clap::{Parser, Subcommand};

use crate::api::{HttpRenderService, RenderService, TaskId};
use crate::app::App;
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::templates::TemplateCatalog;

#[derive(Parser, Debug)]
#[command(name = "memeboard", about = "Caption templates with positioned text and render them remotely")]
struct Cli {
    /// Rendering service base URL.
    #[arg(long, env = "MEMEBOARD_API_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List templates, one per line.
    Templates {
        #[arg(long, help = "Case-insensitive name filter")]
        search: Option<String>,
    },
    /// Query a render job once and print the status JSON.
    Status { task_id: String },
    /// Replay an editor script against a headless editor.
    Run {
        #[arg(long, default_value = "-", help = "Script path, or - for stdin")]
        input: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_base_url(cli.base_url);
    let service = Arc::new(HttpRenderService::new(&config)?);
    tracing::debug!(base_url = %service.base_url(), "rendering service configured");

    match cli.command {
        Command::Templates { search } => run_templates(service.as_ref(), search.as_deref()).await,
        Command::Status { task_id } => run_status(service.as_ref(), TaskId::from(task_id.as_str())).await,
        Command::Run { input } => run_script_file(service, &config, &input).await,
    }
}

async fn run_templates(service: &dyn RenderService, search: Option<&str>) -> Result<(), AppError> {
    let mut catalog = TemplateCatalog::load(service).await;
    if catalog.is_unreachable() {
        eprintln!("no templates available: is the backend running?");
        return Ok(());
    }
    let shown = match search {
        Some(query) => catalog.filter(query),
        None => {
            while catalog.has_more() {
                catalog.next_batch();
            }
            catalog.revealed().iter().collect()
        }
    };
    if shown.is_empty() {
        eprintln!("no templates found");
    }
    for template in shown {
        println!("{}\t{}\t{}", template.id, template.name, template.url);
    }
    Ok(())
}

async fn run_status(service: &dyn RenderService, task_id: TaskId) -> Result<(), AppError> {
    let status = service.job_status(&task_id).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn run_script_file(service: Arc<HttpRenderService>, config: &ClientConfig, input: &str) -> Result<(), AppError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };

    let surface = HeadlessSurface::new(Rect::default());
    let mut app = App::new(Editor::new(Box::new(surface.clone())), service, config.poll_interval);
    if let Some(template) = app.load_templates().await {
        eprintln!("selected template {} ({})", template.id, template.name);
    } else if app.catalog().is_unreachable() {
        eprintln!("no templates available: is the backend running?");
    }

    let mut stdout = io::stdout().lock();
    script::run_script(&mut app, &surface, reader, &mut stdout).await
}
