use anyhow::Context;

use wallet_approver::api::CrossmintClient;
use wallet_approver::config::Config;
use wallet_approver::{log_info, orchestrator};

fn main() -> anyhow::Result<()> {
    if std::env::var("LOG_LEVEL").is_ok_and(|v| v.eq_ignore_ascii_case("debug")) {
        wallet_approver::utils::logging::enable_debug();
    }

    log_info!("main", "starting smart-wallet approval flow");

    let config = Config::from_env().context("loading configuration")?;
    let client = CrossmintClient::new(&config.base_url, &config.api_key, &config.network)
        .context("building wallet API client")?;

    let outcome = orchestrator::run(&client, &config.flow_config())?;

    println!();
    println!("{}", "=".repeat(60));
    println!("RUN SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Status:          {}", outcome.final_status);
    println!("Transaction:     {}", outcome.transaction_id);
    if let Some(hash) = &outcome.on_chain_hash {
        println!("On-chain hash:   {}", hash);
    }
    println!("Smart wallet:    {}", outcome.wallet_address);
    println!("External signer: {}", outcome.signer_address);
    println!("Network:         {}", config.network);
    println!("Amount:          {} USDXM to {}", config.amount, config.recipient);
    println!("{}", "=".repeat(60));

    Ok(())
}
