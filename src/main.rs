use anyhow::{Context, Result, bail};
use feedtext::{ContentPipeline, categorize, config::Config};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: feedtext <url> [title words...]");
    };
    let title = args.collect::<Vec<_>>().join(" ");

    // Load configuration
    let config = Config::from_env()?;
    let pipeline =
        ContentPipeline::from_config(&config).context("Failed to build HTTP clients")?;

    let outcome = pipeline.fetch_content(&url).await;
    let category = categorize(&title);

    let report = json!({
        "url": url,
        "stage": outcome.stage,
        "available": outcome.available,
        "category": category,
        "content": outcome.content,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
