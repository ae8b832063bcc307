use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use submit_relay::submitter::{prepare, submit};

#[derive(Parser)]
#[command(name = "submit-cli")]
#[command(about = "Submit a file to the relay the way the browser form does", long_about = None)]
struct Cli {
    /// Relay endpoint.
    #[arg(short, long, default_value = "http://localhost:8080/api/submit")]
    url: String,

    #[arg(short, long)]
    employee_id: String,

    #[arg(short, long)]
    request_number: String,

    /// Filename reported to the upstream ("Default" when omitted).
    #[arg(short, long)]
    filename: Option<String>,

    /// File to upload.
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let bytes = tokio::fs::read(&cli.file).await?;
    let request = match prepare(
        &cli.employee_id,
        &cli.request_number,
        cli.filename.as_deref(),
        &bytes,
    ) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let client = reqwest::Client::new();
    let outcome = match submit(&client, &cli.url, &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", serde_json::to_string_pretty(&outcome.body)?);
    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Error: relay returned status {}", outcome.status);
        Ok(ExitCode::FAILURE)
    }
}
