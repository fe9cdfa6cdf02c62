mod cli;
mod client;
mod config;
mod errors;
mod lexicon;
mod matching;
mod models;
mod resume;
mod routes;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::client::AnalyzerClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Analyze {
            resume,
            job,
            max_k,
            keywords,
            base_url,
        } => {
            let base_url = base_url.unwrap_or_else(|| config.analyzer_base_url.clone());
            analyze(&resume, &job, max_k, &keywords, &base_url).await
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting resume-match API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        default_max_k = config.default_max_k,
        max_k_limit = config.max_k_limit,
        skills_weight = config.skills_weight,
        text_weight = config.text_weight,
        "Analysis settings"
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let state = AppState::new(config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a browser frontend exists

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn analyze(
    resume: &Path,
    job: &Path,
    max_k: Option<usize>,
    keywords: &[String],
    base_url: &str,
) -> Result<()> {
    let resume_bytes = tokio::fs::read(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_text = tokio::fs::read_to_string(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;
    let file_name = resume
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume.pdf");

    let client = AnalyzerClient::new(base_url)?;
    client
        .health()
        .await
        .with_context(|| format!("Analyzer at {base_url} is not reachable"))?;

    let analysis = client
        .analyze(resume_bytes, file_name, &job_text, max_k, keywords)
        .await
        .with_context(|| format!("Analysis request to {base_url} failed"))?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
