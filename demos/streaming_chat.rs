//! Streamed generation example: print tokens as they arrive.
//!
//! Usage: cargo run --example streaming_chat

use std::io::Write;

use futures::StreamExt;
use ollama_client::{GenerateRequest, OllamaClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = OllamaClient::new()?;

    let mut stream = client
        .generate_stream(GenerateRequest::new("Write a haiku about local inference.").model("llama2"))
        .await?;

    while let Some(event) = stream.next().await {
        let chunk = event?;
        print!("{}", chunk.response);
        std::io::stdout().flush()?;
        if chunk.done {
            println!();
            if let Some(eval_count) = chunk.eval_count {
                println!("({eval_count} tokens)");
            }
        }
    }

    Ok(())
}
