//! # cardlink-rs
//!
//! An async Rust client for the [Cardlink](https://cardlink.link) payment gateway API.
//!
//! The gateway lets a merchant backend issue payment links ("bills"), follow the payments
//! made against them, and withdraw the collected balance through payouts. This crate wraps
//! every endpoint in a typed method on [`CardlinkClient`].
//!
//! ## Features
//!
//! - **Bills**: create, toggle, look up status, list payments, search by date range
//! - **Payments**: look up status, search by date range
//! - **Payouts**: personal and regular payouts, status, search
//! - **Balance**: per-currency merchant balance
//! - **Typed errors**: every documented gateway error code maps to a [`GatewayError`] variant
//! - **Logging**: enable the `tracing` feature for request and failure events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardlink_rs::{CardlinkClient, CreateBillRequest, Currency};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CardlinkClient::new("YOUR_API_TOKEN")?;
//!
//! let request = CreateBillRequest::new(100.0, "YOUR_SHOP_ID")
//!     .with_order_id("order-1")
//!     .with_currency_in(Currency::Rub);
//!
//! let bill = client.create_bill(&request).await?;
//! println!("Pay here: {}", bill.link_page_url);
//!
//! let status = client.get_bill_status(&bill.bill_id).await?;
//! println!("Bill {} is {}", status.id, status.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`Result`]. Gateway-reported failures arrive as
//! [`CardlinkError::Gateway`]; codes unknown to this version of the crate arrive as
//! [`CardlinkError::UnknownGateway`] with the raw code. Network failures and non-JSON bodies
//! are [`CardlinkError::HttpError`] and [`CardlinkError::JsonError`].
//!
//! ```rust,no_run
//! use cardlink_rs::{CardlinkClient, CardlinkError, GatewayError};
//!
//! # async fn example(client: CardlinkClient) {
//! match client.get_bill_status("missing").await {
//!     Err(CardlinkError::Gateway(GatewayError::BillNotFound)) => println!("no such bill"),
//!     Err(e) => eprintln!("request failed: {}", e),
//!     Ok(status) => println!("{:?}", status),
//! }
//! # }
//! ```
//!
//! ## References
//!
//! - [Cardlink API reference](https://cardlink.link/en/reference/api)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod enums;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use client::CardlinkClient;
pub use enums::{AccountType, BillType, Currency, Status};
pub use errors::{CardlinkError, GatewayError, Result};
pub use types::{
    Balance, Bill, BillCreate, BillStatus, BillToggleActivity, CreateBillRequest, Payment,
    PaymentStatus, Payout, PayoutStatus, PersonalPayoutRequest, RegularPayoutRequest,
    DEFAULT_BASE_URL,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(DEFAULT_BASE_URL, "https://cardlink.link/api/v1/");
    }

    #[test]
    fn test_module_accessibility() {
        // Ensure all modules are accessible
        let _ = client::CardlinkClient::new("token").unwrap();
        let _ = types::CreateBillRequest::new(1.0, "shop");
        let _ = enums::Status::from_name("NEW");
        let _ = errors::GatewayError::from_code("Unauthenticated");
        let _ = utils::parse_datetime("2024-01-01 00:00:00");
    }
}
