//! equipHelper CLI: terminal client for the equipment maintenance assistant

use clap::{Parser, Subcommand};
use equiphelper_engine::{
    catalog, export_transcript, Config, PdfRenderer, QueryDispatcher, Transcript, TranscriptStore,
    DOCUMENT_FILE_NAME,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Maintenance assistant for firefighting equipment
#[derive(Parser)]
#[command(name = "equiphelper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the Q&A endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Override the data directory holding the saved conversation
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Ask a single question and print the answer
    Ask {
        /// The question to send
        question: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the saved conversation as a PDF
    Export {
        /// Output path (defaults to equipHelper_Chat_History.pdf)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List equipment categories and their suggested questions
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear the saved conversation
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::load_or_default();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint_url = endpoint;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            // The TUI owns the terminal; logging stays uninitialized so
            // the alternate screen is not interleaved with log lines.
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Error: failed to create runtime: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = rt.block_on(equiphelper_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Ask { question, json }) => {
            init_logging();
            cmd_ask(&config, &question, json)
        }
        Some(Commands::Export { output }) => {
            init_logging();
            cmd_export(&config, output)
        }
        Some(Commands::Categories { json }) => cmd_categories(json),
        Some(Commands::Clear) => {
            init_logging();
            cmd_clear(&config)
        }
    }
}

/// Stderr logging for headless subcommands, honoring `RUST_LOG`.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn open_transcript(config: &Config) -> Result<(TranscriptStore, Transcript), String> {
    let store = TranscriptStore::new(config.resolve_data_dir())
        .map_err(|e| format!("failed to open conversation store: {e}"))?;
    let transcript = match store.load().map_err(|e| format!("failed to load history: {e}"))? {
        Some(messages) => Transcript::resumed(messages),
        None => Transcript::first_visit(),
    };
    Ok((store, transcript))
}

fn cmd_ask(config: &Config, question: &str, json: bool) -> ExitCode {
    let (store, mut transcript) = match open_transcript(config) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(ticket) = transcript.begin_submission(question) else {
        eprintln!("Error: question is empty");
        return ExitCode::FAILURE;
    };

    let dispatcher =
        match QueryDispatcher::new(config.endpoint_url.clone(), config.request_timeout_seconds) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let reply = rt.block_on(dispatcher.ask(question));

    transcript.complete_submission(ticket, reply.clone());
    if let Err(e) = store.persist(transcript.messages()) {
        eprintln!("Warning: could not save history: {e}");
    }

    if json {
        let out = serde_json::json!({ "question": question, "answer": reply });
        println!("{out}");
    } else {
        println!("{reply}");
    }
    ExitCode::SUCCESS
}

fn cmd_export(config: &Config, output: Option<PathBuf>) -> ExitCode {
    let (_store, transcript) = match open_transcript(config) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let path = output.unwrap_or_else(|| PathBuf::from(DOCUMENT_FILE_NAME));
    let mut renderer = PdfRenderer::new();
    match export_transcript(&mut renderer, transcript.messages(), &path) {
        Ok(()) => {
            println!("Saved {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: export failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_categories(json: bool) -> ExitCode {
    if json {
        let entries: Vec<serde_json::Value> = catalog::categories()
            .map(|name| {
                serde_json::json!({
                    "category": name,
                    "questions": catalog::questions_for(name),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for name in catalog::categories() {
            println!("{name}");
            for question in catalog::questions_for(name) {
                println!("  - {question}");
            }
        }
    }
    ExitCode::SUCCESS
}

fn cmd_clear(config: &Config) -> ExitCode {
    let store = match TranscriptStore::new(config.resolve_data_dir()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    match store.clear() {
        Ok(()) => {
            println!("Conversation history cleared");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
