//! Error types for the cardlink-rs library.
//!
//! Two layers live here:
//!
//! - [`GatewayError`]: the business errors the gateway reports through its
//!   `errors` mapping or `message` field, one variant per documented code.
//! - [`CardlinkError`]: everything a client call can fail with, wrapping
//!   transport failures, gateway errors and decoding problems.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Main error type for Cardlink client operations.
#[derive(Error, Debug)]
pub enum CardlinkError {
    /// Error during HTTP request/response handling
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not valid JSON, or a request could not be serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The gateway rejected the request with a documented error code
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The gateway rejected the request with a code this library does not know
    #[error("Gateway error: {0}")]
    UnknownGateway(String),

    /// A successful response did not match the expected model
    #[error("Failed to decode {context} response: {source}")]
    Decode {
        /// Endpoint path whose response failed to decode
        context: &'static str,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A failure response carried no usable error code
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

impl CardlinkError {
    /// Returns `true` for network failures and undecodable bodies, as opposed
    /// to errors the gateway reported on purpose.
    pub fn is_transport(&self) -> bool {
        matches!(self, CardlinkError::HttpError(_) | CardlinkError::JsonError(_))
    }

    /// Returns the documented gateway error, if this is one.
    pub fn gateway_error(&self) -> Option<GatewayError> {
        match self {
            CardlinkError::Gateway(err) => Some(*err),
            _ => None,
        }
    }
}

/// Result type alias for Cardlink operations.
pub type Result<T> = std::result::Result<T, CardlinkError>;

macro_rules! gateway_errors {
    ($( $(#[$doc:meta])* $variant:ident => ($code:literal, $message:literal), )+) => {
        /// Business error reported by the gateway.
        ///
        /// Each variant corresponds to one documented error code and carries a
        /// fixed human-readable message.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GatewayError {
            $( $(#[$doc])* $variant, )+
        }

        impl GatewayError {
            /// Every known gateway error, in documentation order.
            pub const ALL: &'static [GatewayError] = &[ $( GatewayError::$variant, )+ ];

            /// The wire code the gateway uses for this error.
            pub fn code(&self) -> &'static str {
                match self {
                    $( GatewayError::$variant => $code, )+
                }
            }

            /// The fixed human-readable message for this error.
            pub fn message(&self) -> &'static str {
                match self {
                    $( GatewayError::$variant => $message, )+
                }
            }
        }
    };
}

gateway_errors! {
    /// Invalid API token
    Unauthenticated => ("Unauthenticated", "Invalid API Token"),
    /// Merchant is unknown
    MerchantNotFound => ("api:error.merchant_not_found", "Merchant is not found in the System"),
    /// Amount is invalid
    InvalidAmount => ("api:error.invalid_amount", "Invalid amount"),
    /// Merchant is blocked
    MerchantBanned => ("api:error.merchant_banned", "Merchant is blocked"),
    /// Shop is unknown
    ShopNotFound => ("api:error.shop_not_found", "Shop is not found in the System"),
    /// Shop is deactivated
    ShopNotEnabled => ("api:error.shop_not_enabled", "Merchant is deactivated"),
    /// Merchant has no access to the shop
    AccessDenied => ("api:error.access_denied", "Merchant doesn't have access to the shop"),
    /// Payouts unavailable in the requested currency
    NoPayout => ("api:error.no_payout", "Can't payout in the given currency"),
    /// Internal gateway error
    GeneralError => ("api:error.general_error", "Internal error"),
    /// Bill is unknown
    BillNotFound => ("api:error.bill_not_found", "Bill doesn't exist"),
    /// Subscription is inactive
    MerchantSubscriptionInactive => ("api:error.merchant_subscription_inactive", "Subscription is not active"),
    /// Merchant has no subscription
    MerchantSubscriptionNotFound => ("api:error.merchant_subscription_not_found", "Merchant doesn't have a subscription"),
    /// A NORMAL bill was already paid
    BillIsFinished => ("api:error.bill_is_finished", "Bill is paid in case of NORMAL bill"),
    /// Too many payments requested at once
    TooManyPayments => ("api:error.too_many_payments", "You are trying to get too many payments in one request."),
    /// Too many bills requested at once
    TooManyBills => ("api:error.too_many_bills", "You are trying to request too many bills at once."),
    /// Payout account is unknown
    PayoutAccountNotFound => ("api:error.payout_account_not_found", "Payout account is not found"),
    /// Payout account is blocked
    PayoutAccountBanned => ("api:error.payout_account_banned", "Payout account is blocked"),
    /// Daily payout limit reached
    DailyPayoutLimitExceeded => ("api:error.daily_payout_limit_exceeded", "Exceeded daily limit"),
    /// Monthly payout limit reached
    MonthlyPayoutLimitExceeded => ("api:error.monthly_payout_limit_exceeded", "Exceeded monthly limit"),
    /// Balance too low for the payout
    BalanceNotEnough => ("api:error.balance_not_enough", "Not enough balance for payout"),
    /// Destination account unavailable
    DirectionNotAvailable => ("api:error.direction_not_available", "Account is unavailable for payout"),
    /// Merchant is not verified
    MerchantNotVerified => ("api:error.merchant_not_verified", "Merchant doesn't have Verified status"),
    /// Payout is unknown
    PayoutNotFound => ("api:error.payout_not_found", "Payout is not found"),
    /// Too many payouts requested at once
    TooManyPayouts => ("api:error.too_many_payouts", "You are trying to request to many payouts. Maximum payouts for one request is 1000"),
}

static REGISTRY: LazyLock<HashMap<&'static str, GatewayError>> = LazyLock::new(|| {
    GatewayError::ALL
        .iter()
        .map(|err| (err.code(), *err))
        .collect()
});

impl GatewayError {
    /// Looks up the error for a gateway code.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardlink_rs::errors::GatewayError;
    ///
    /// assert_eq!(
    ///     GatewayError::from_code("api:error.bill_not_found"),
    ///     Some(GatewayError::BillNotFound)
    /// );
    /// assert_eq!(GatewayError::from_code("api:error.brand_new"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<GatewayError> {
        REGISTRY.get(code).copied()
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GatewayError {}

/// Maps a raw gateway code to the crate error, keeping unknown codes intact.
pub(crate) fn error_for_code(code: &str) -> CardlinkError {
    match GatewayError::from_code(code) {
        Some(err) => CardlinkError::Gateway(err),
        None => CardlinkError::UnknownGateway(code.to_string()),
    }
}
