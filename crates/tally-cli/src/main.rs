use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tally-cli")]
#[command(about = "CLI client for the tally ledger node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:8080)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a transaction to the pending pool
    Submit {
        /// Transaction text
        data: String,
    },
    /// Mine all pending transactions into a new block
    Mine,
    /// Print the full chain
    Chain,
    /// Print the pending transaction pool
    Pending,
    /// Search sealed transactions by substring
    Search {
        /// Query text (case-insensitive)
        query: String,
    },
    /// Verify chain integrity
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let node = cli.node;

    let res = match cli.cmd {
        Command::Submit { data } => {
            client
                .post(format!("{node}/add-transaction"))
                .json(&json!({ "data": data }))
                .send()
                .await?
        }
        Command::Mine => client.post(format!("{node}/mine")).send().await?,
        Command::Chain => client.get(format!("{node}/chain")).send().await?,
        Command::Pending => client.get(format!("{node}/pending")).send().await?,
        Command::Search { query } => {
            client
                .get(format!("{node}/search"))
                .query(&[("q", query)])
                .send()
                .await?
        }
        Command::Validate => client.get(format!("{node}/validate")).send().await?,
    };

    let status = res.status();
    let body = res.text().await?;
    println!("status: {}", status);
    println!("{body}");
    Ok(())
}
