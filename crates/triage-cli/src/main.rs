use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use triage_core::TriageEngine;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Rule-based symptom triage assistant")]
struct Cli {
    /// Knowledge base JSON file
    #[arg(
        long,
        global = true,
        env = "TRIAGE_KNOWLEDGE_BASE",
        default_value = "data/knowledge_base.json"
    )]
    knowledge_base: PathBuf,

    /// TOML file overriding the built-in tables
    #[arg(long, global = true, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat over stdin
    Chat {
        /// Name used in greetings
        #[arg(long, default_value = "there")]
        username: String,
    },
    /// Answer a single message
    Ask {
        message: String,
        /// Name used in greetings
        #[arg(long, default_value = "there")]
        username: String,
    },
    /// Print the structured diagnosis as JSON
    Assess { message: String },
    /// Summarize the loaded knowledge base
    Inspect,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries replies
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = TriageEngine::from_paths(&cli.knowledge_base, cli.config.as_deref())
        .with_context(|| {
            format!(
                "Failed to start triage engine with knowledge base {}",
                cli.knowledge_base.display()
            )
        })?;

    match cli.command {
        Commands::Chat { username } => chat(&engine, &username)?,
        Commands::Ask { message, username } => {
            println!("{}", engine.handle_message(&message, &username));
        }
        Commands::Assess { message } => match engine.assess(&message) {
            Some(diagnosis) => {
                let mut json =
                    serde_json::to_value(&diagnosis).context("Failed to serialize diagnosis")?;
                if let Some(fields) = json.as_object_mut() {
                    fields.insert(
                        "needs_escalation".into(),
                        diagnosis.needs_escalation().into(),
                    );
                }
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            None => println!("No recognized symptoms."),
        },
        Commands::Inspect => inspect(&engine),
    }

    Ok(())
}

fn chat(engine: &TriageEngine, username: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Describe your symptoms. Type \"quit\" to exit.");
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = engine.respond(message, username);
        tracing::debug!(turn_id = %reply.turn_id, route = ?reply.route, "Replied");
        println!("{}\n", reply.text);
    }

    Ok(())
}

fn inspect(engine: &TriageEngine) {
    let kb = engine.knowledge_base();
    println!("Records:     {}", kb.len());
    println!("Fingerprint: {}", kb.fingerprint());
    println!("Symptoms:    {}", engine.matcher().extractor().vocabulary_size());

    let duplicates = kb.duplicate_names();
    if !duplicates.is_empty() {
        println!("Near-duplicate disease names:");
        for (first, second) in duplicates {
            println!("  {} / {}", first, second);
        }
    }
}
