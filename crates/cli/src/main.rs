//! # predict-chat
//!
//! Terminal chat client for the prediction engine. Reads one line of input at
//! a time, posts it to the chat endpoint, and renders the reply with a
//! per-character typing effect. The read-eval loop serializes submits, so at
//! most one request is ever in flight.

mod transcript;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use transcript::{reply_text, Transcript, SERVER_ERROR, THINKING};

/// Milliseconds between characters of the typing effect.
const TYPE_INTERVAL_MS: u64 = 18;

#[derive(Parser)]
#[command(name = "predict-chat")]
#[command(about = "Chat with the prediction engine", long_about = None)]
struct Cli {
    /// Chat endpoint URL
    #[arg(
        long,
        env = "PREDICT_CHAT_URL",
        default_value = "http://localhost:8080/api/chat/predict"
    )]
    url: String,

    /// Print replies immediately instead of with the typing effect
    #[arg(long)]
    instant: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to create HTTP client")?;

    let mut conversation = Transcript::new();

    println!("predict-chat v{} - {}", env!("CARGO_PKG_VERSION"), cli.url);
    println!("Type a question and press Enter (Ctrl-D to quit).\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        // Whitespace-only input: no entry, no request.
        let Some(text) = Transcript::prepare(&line) else {
            continue;
        };

        conversation.push_exchange(text);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.set_message(THINKING);
        spinner.enable_steady_tick(Duration::from_millis(80));

        let reply = fetch_reply(&client, &cli.url, text).await;

        spinner.finish_and_clear();
        conversation.resolve(&reply);

        render_reply(&reply, cli.instant).await?;
    }

    Ok(())
}

/// Exactly one request per submit. Transport failures and non-2xx statuses
/// both collapse to the literal error reply, so the loop keeps serving.
async fn fetch_reply(client: &reqwest::Client, url: &str, prompt: &str) -> String {
    let response = match client.post(url).json(&json!({ "prompt": prompt })).send().await {
        Ok(response) => response,
        Err(_) => return SERVER_ERROR.to_string(),
    };

    if !response.status().is_success() {
        return SERVER_ERROR.to_string();
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) => reply_text(&body),
        Err(_) => SERVER_ERROR.to_string(),
    }
}

/// Reveal the reply one character at a time, like the dashboard widget did.
async fn render_reply(reply: &str, instant: bool) -> Result<()> {
    if instant {
        println!("{}\n", reply);
        return Ok(());
    }

    for ch in reply.chars() {
        print!("{}", ch);
        io::stdout().flush()?;
        tokio::time::sleep(Duration::from_millis(TYPE_INTERVAL_MS)).await;
    }
    println!("\n");
    Ok(())
}
