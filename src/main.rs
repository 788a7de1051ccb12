use clap::{Parser, Subcommand};
use khqr_gen::application::service::{GenerateRequest, KhqrService};
use khqr_gen::config::{ServerConfig, init_logging};
use khqr_gen::domain::checksum::compute_checksum;
use khqr_gen::domain::payload::verify_payload;
use khqr_gen::domain::ports::{ClockBox, PayloadCacheBox};
use khqr_gen::infrastructure::clock::SystemClock;
use khqr_gen::infrastructure::in_memory::InMemoryPayloadCache;
use khqr_gen::interfaces::csv::payload_writer::PayloadWriter;
use khqr_gen::interfaces::csv::request_reader::RequestReader;
use khqr_gen::interfaces::http;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about = "KHQR payment payload generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(long, env = "KHQR_BIND", default_value_t = ServerConfig::default().bind)]
        bind: SocketAddr,
    },
    /// Generate one payload and print it as JSON
    Generate {
        /// Transaction amount in USD
        #[arg(long)]
        amount: String,
        /// Merchant identity (ID1..ID6, case-insensitive)
        #[arg(long)]
        id: Option<String>,
    },
    /// Generate payloads for every `id,amount` row of a CSV file
    Batch {
        /// Input requests CSV file
        input: PathBuf,
    },
    /// Print the checksum of TEXT
    Checksum { text: String },
    /// Check that a payload's trailing checksum matches its content
    Verify { payload: String },
}

fn new_service() -> KhqrService {
    let cache: PayloadCacheBox = Box::new(InMemoryPayloadCache::new());
    let clock: ClockBox = Box::new(SystemClock);
    KhqrService::new(cache, clock)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => {
            let config = ServerConfig::new(bind);
            http::serve(&config, Arc::new(new_service()))
                .await
                .into_diagnostic()?;
        }
        Command::Generate { amount, id } => {
            let service = new_service();
            let generated = service
                .generate(GenerateRequest::new(amount, id.as_deref()))
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&generated).into_diagnostic()?);
        }
        Command::Batch { input } => {
            let service = new_service();
            let file = File::open(input).into_diagnostic()?;
            let reader = RequestReader::new(file);

            let stdout = io::stdout();
            let mut writer = PayloadWriter::new(stdout.lock());
            for request in reader.requests() {
                match request {
                    Ok(request) => match service.generate(request).await {
                        Ok(generated) => writer.write(&generated).into_diagnostic()?,
                        Err(e) => warn!("Error generating payload: {}", e),
                    },
                    Err(e) => warn!("Error reading payment request: {}", e),
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Checksum { text } => {
            println!("{}", compute_checksum(&text));
        }
        Command::Verify { payload } => {
            verify_payload(payload.trim()).into_diagnostic()?;
            println!("valid");
        }
    }

    Ok(())
}
