use std::env;

use ethernity_explorer::{BlockscoutClient, ExplorerConfig};
use ethernity_reputation::ReputationEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Uso: {} <ENDERECO>", args[0]);
        std::process::exit(1);
    }

    let client = BlockscoutClient::new(ExplorerConfig::from_env()?)?;
    let data = client.fetch_wallet_data(&args[1]).await?;
    if !data.failed_sources.is_empty() {
        eprintln!("Fontes indisponíveis: {}", data.failed_sources.join(", "));
    }

    let as_of = data.analysis_timestamp;
    let result = ReputationEngine::shared().compute_at(&data.into_input(), as_of);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
