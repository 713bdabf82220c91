use std::process;

use crosschain_estimator::error::ReportDisplayExt;
use crosschain_estimator::networks::{normalize_network, to_price_api_network};
use crosschain_estimator::prices::token_price::pricing::TokenPriceClient;
use crosschain_models::log::init_tracing;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("token_price error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    dotenv::dotenv().ok();
    init_tracing(false);

    let mut args = std::env::args().skip(1);
    let (Some(network), Some(address)) = (args.next(), args.next()) else {
        return Err("usage: token_price <network> <address>".to_string());
    };

    let client = TokenPriceClient::from_env()
        .map_err(|e| format!("{} {}", e.current_context(), e.format()))?;

    let canonical = normalize_network(&network);
    println!("network:           {canonical}");
    println!("price api network: {}", to_price_api_network(&canonical));

    let quote = client
        .get_token_price_quote(&address, &canonical)
        .await
        .map_err(|e| format!("{} {}", e.current_context(), e.format()))?;

    let output = serde_json::to_string_pretty(&quote).map_err(|e| e.to_string())?;
    println!("{output}");

    Ok(())
}
