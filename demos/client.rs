//! Example Cardlink client.
//!
//! Prints the merchant balance and, if a bill id is given, the bill status.
//!
//! Run with:
//! ```bash
//! cargo run --example client --features tracing
//! ```
//!
//! Environment variables (a `.env` file is also read):
//! - CARDLINK_TOKEN: Your API token
//! - CARDLINK_BASE_URL: Optional gateway root override
//! - BILL_ID: Optional bill to look up

use cardlink_rs::{CardlinkClient, CardlinkError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let client = CardlinkClient::from_env()?;

    println!("Cardlink example client");
    println!("   Gateway: {}", client.base_url());
    println!();

    for balance in client.get_balance().await? {
        println!(
            "{}: available {:.2}, locked {:.2}, hold {:.2}",
            balance.currency, balance.balance_available, balance.balance_locked, balance.balance_hold
        );
    }

    if let Ok(bill_id) = std::env::var("BILL_ID") {
        match client.get_bill_status(&bill_id).await {
            Ok(status) => println!(
                "\nBill {}: {} {:.2} {} ({}, created {})",
                status.id,
                status.status,
                status.amount,
                status.currency_in,
                if status.active { "active" } else { "inactive" },
                status.created_at
            ),
            Err(CardlinkError::Gateway(err)) => println!("\nGateway refused: {} ({})", err, err.code()),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
