//! Basic usage example.
//!
//! Requires a local Ollama server (default http://localhost:11434) with the
//! `llama2` model pulled.
//!
//! Usage: cargo run --example basic_usage

use ollama_client::{ChatRequest, Message, ModelOptions, OllamaClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = OllamaClient::new()?;

    if !client.is_reachable().await {
        eprintln!("No inference server answering at {}", client.config().base_url);
        return Ok(());
    }
    println!("Server version: {}", client.version().await?.version);

    let messages = vec![
        Message::system("You are a helpful assistant."),
        Message::user("Explain connection pooling in one sentence."),
    ];

    let response = client
        .chat(
            ChatRequest::new(messages)
                .model("llama2")
                .options(ModelOptions::new().temperature(0.7)),
        )
        .await?;

    println!("Response:\n{}", response.content());
    if let Some(eval_count) = response.eval_count {
        println!("\nTokens evaluated: {eval_count}");
    }

    Ok(())
}
