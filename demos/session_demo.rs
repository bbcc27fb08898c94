//! End-to-end demo against a locally running session server
//!
//! ```sh
//! cargo run --example session_demo -- /path/to/project
//! ```
//!
//! Walks the one-shot API (info, start, inspect, output, list) and then runs
//! a streaming session, printing output lines as they arrive.

use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;

use claudia_client::{ClaudiaClient, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claudia_client=info".into()),
        )
        .init();

    let project_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| ".".to_string());

    let client = ClaudiaClient::new(ClientConfig::from_env())?;

    println!("{}", "Server info:".bold());
    let info = client.get_server_info().await.context("server not reachable")?;
    println!(
        "  service: {}  version: {}",
        info.service.as_deref().unwrap_or("?"),
        info.version.as_deref().unwrap_or("?")
    );

    println!("{} {}", "Starting session in".bold(), project_path);
    let session_id = client
        .start_session(&project_path, "Summarize this project in one paragraph", None)
        .await?;
    println!("  started: {}", session_id.green());

    // Give the server a moment before polling
    tokio::time::sleep(Duration::from_secs(2)).await;

    let session = client.get_session(&session_id).await?;
    println!("  status: {}", session.status);

    let output = client
        .get_session_output(&session_id, Some(10), Some("json"))
        .await?;
    for line in output.lines() {
        println!("  {} {}", ">".dimmed(), line);
    }

    println!("{}", "All sessions:".bold());
    for session in client.list_sessions(false).await? {
        let preview: String = session.prompt.chars().take(50).collect();
        println!("  {} ({}) - {}", session.id, session.status, preview);
    }

    println!("{}", "Streaming session:".bold());
    let outcome = client
        .start_streaming_session(
            &project_path,
            "List the files in this project",
            None,
            |id, line| println!("  {} {}", format!("[{}]", id).cyan(), line),
        )
        .await?;
    match outcome.session_id {
        Some(id) => println!(
            "  finished: {} ({}, exit code {:?})",
            id.green(),
            outcome.state.status,
            outcome.state.exit_code
        ),
        None => println!("  channel closed before the session was acknowledged"),
    }

    Ok(())
}
