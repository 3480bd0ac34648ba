//! Model management example: list installed models, inspect one, and pull
//! with streamed progress.
//!
//! Usage: cargo run --example model_management -- [model-to-pull]

use futures::StreamExt;
use ollama_client::OllamaClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = OllamaClient::new()?;

    let models = client.list_models().await?;
    println!("Installed models:");
    for model in &models {
        println!("  {}  ({} MB)", model.name, model.size / 1_000_000);
    }

    if let Some(first) = models.first() {
        let info = client.show_model(&first.name).await?;
        if let Some(template) = info.template {
            println!("\nTemplate for {}:\n{}", first.name, template);
        }
    }

    if let Some(name) = std::env::args().nth(1) {
        println!("\nPulling {name}...");
        let mut progress = client.pull_model_stream(&name).await?;
        while let Some(event) = progress.next().await {
            let update = event?;
            match (update.completed, update.total) {
                (Some(completed), Some(total)) if total > 0 => {
                    println!("  {} {}%", update.status, completed * 100 / total);
                }
                _ => println!("  {}", update.status),
            }
        }
        println!("Done.");
    }

    Ok(())
}
