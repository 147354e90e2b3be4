//! Client for the Cardlink gateway API.
//!
//! [`CardlinkClient`] holds the API token and base URL and exposes one async
//! method per gateway endpoint. Every method performs exactly one HTTP round
//! trip: no retries, caching or pagination.

use crate::errors::{error_for_code, CardlinkError, Result};
use crate::types::{
    Balance, BalanceList, Bill, BillCreate, BillStatus, BillToggleActivity, CreateBillRequest,
    DataList, IdParams, NoParams, Payment, PaymentStatus, Payout, PayoutStatus,
    PersonalPayoutRequest, RegularPayoutRequest, SearchParams, ToggleActivityParams,
    DEFAULT_BASE_URL,
};
use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "CARDLINK_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "CARDLINK_BASE_URL";

/// Async client for the Cardlink gateway.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CardlinkClient {
    token: String,
    base_url: String,
    auth_header: String,
    http_client: Client,
}

impl CardlinkClient {
    /// Creates a client for the default gateway.
    ///
    /// Fails if `token` is empty. No network call is made.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardlink_rs::client::CardlinkClient;
    ///
    /// let client = CardlinkClient::new("my-api-token").unwrap();
    /// assert_eq!(client.base_url(), "https://cardlink.link/api/v1/");
    ///
    /// assert!(CardlinkClient::new("").is_err());
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CardlinkError::ConfigError("API token must not be empty".to_string()));
        }

        Ok(Self {
            auth_header: format!("Bearer {}", token),
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: Client::new(),
        })
    }

    /// Creates a client from `CARDLINK_TOKEN` and, if set, `CARDLINK_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| CardlinkError::ConfigError(format!("{} is not set", TOKEN_ENV)))?;
        let client = Self::new(token)?;

        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => client.with_base_url(base_url),
            _ => Ok(client),
        }
    }

    /// Points the client at a different gateway root.
    ///
    /// A trailing `/` is added when missing so endpoint paths append cleanly.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardlink_rs::client::CardlinkClient;
    ///
    /// let client = CardlinkClient::new("token")
    ///     .unwrap()
    ///     .with_base_url("http://localhost:8080/api/v1")
    ///     .unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080/api/v1/");
    /// ```
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        let parsed = Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(CardlinkError::ConfigError(format!(
                "base URL `{}` cannot be used as a base",
                base_url
            )));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Sets a custom HTTP client, e.g. one with timeouts or a proxy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// The API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The gateway root every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a bill and returns its payment links.
    pub async fn create_bill(&self, request: &CreateBillRequest) -> Result<BillCreate> {
        self.post_json("bill/create", request).await
    }

    /// Activates or deactivates a bill.
    pub async fn toggle_bill_activity(&self, id: &str, active: bool) -> Result<BillToggleActivity> {
        self.post_json("bill/toggle_activity", &ToggleActivityParams { id, active })
            .await
    }

    /// Lists the payments made against a bill.
    pub async fn get_bill_payments(&self, id: &str) -> Result<Vec<Payment>> {
        let list: DataList<Payment> = self.get_json("bill/payments", &IdParams { id }).await?;
        Ok(list.data)
    }

    /// Searches the bills of a shop, optionally within a date range.
    pub async fn search_bill(
        &self,
        shop_id: &str,
        start_date: Option<NaiveDate>,
        finish_date: Option<NaiveDate>,
    ) -> Result<Vec<Bill>> {
        let params = SearchParams {
            shop_id: Some(shop_id),
            start_date,
            finish_date,
        };
        let list: DataList<Bill> = self.get_json("bill/search", &params).await?;
        Ok(list.data)
    }

    /// Fetches a bill and its status.
    pub async fn get_bill_status(&self, id: &str) -> Result<BillStatus> {
        self.get_json("bill/status", &IdParams { id }).await
    }

    /// Searches the payments of a shop, optionally within a date range.
    pub async fn search_payment(
        &self,
        shop_id: &str,
        start_date: Option<NaiveDate>,
        finish_date: Option<NaiveDate>,
    ) -> Result<Vec<Payment>> {
        let params = SearchParams {
            shop_id: Some(shop_id),
            start_date,
            finish_date,
        };
        let list: DataList<Payment> = self.get_json("payment/search", &params).await?;
        Ok(list.data)
    }

    /// Fetches a payment and its status.
    pub async fn get_payment_status(&self, id: &str) -> Result<PaymentStatus> {
        self.get_json("payment/status", &IdParams { id }).await
    }

    /// Returns the merchant balance per currency.
    pub async fn get_balance(&self) -> Result<Vec<Balance>> {
        let list: BalanceList = self.get_json("merchant/balance", &NoParams {}).await?;
        Ok(list.balances)
    }

    /// Pays out to an account registered in the merchant dashboard.
    pub async fn create_personal_payout(&self, request: &PersonalPayoutRequest) -> Result<Vec<Payout>> {
        let list: DataList<Payout> = self.post_json("payout/personal/create", request).await?;
        Ok(list.data)
    }

    /// Pays out to an arbitrary account, e.g. a bank card.
    pub async fn create_regular_payout(&self, request: &RegularPayoutRequest) -> Result<Vec<Payout>> {
        let list: DataList<Payout> = self.post_json("payout/regular/create", request).await?;
        Ok(list.data)
    }

    /// Searches payouts, optionally within a date range.
    pub async fn search_payout(
        &self,
        start_date: Option<NaiveDate>,
        finish_date: Option<NaiveDate>,
    ) -> Result<Vec<Payout>> {
        let params = SearchParams {
            shop_id: None,
            start_date,
            finish_date,
        };
        let list: DataList<Payout> = self.get_json("payout/search", &params).await?;
        Ok(list.data)
    }

    /// Fetches a payout and its status.
    pub async fn get_payout_status(&self, id: &str) -> Result<PayoutStatus> {
        self.get_json("payout/status", &IdParams { id }).await
    }

    /// Sends a GET request with a JSON body and returns the successful response.
    pub async fn do_get<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value> {
        self.execute(Method::GET, path, params).await
    }

    /// Sends a POST request with a JSON body and returns the successful response.
    pub async fn do_post<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value> {
        self.execute(Method::POST, path, params).await
    }

    async fn get_json<P, T>(&self, path: &'static str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.do_get(path, params).await?;
        decode(path, value)
    }

    async fn post_json<P, T>(&self, path: &'static str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.do_post(path, params).await?;
        decode(path, value)
    }

    async fn execute<P: Serialize + ?Sized>(&self, method: Method, path: &str, params: &P) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        #[cfg(feature = "tracing")]
        tracing::debug!(%method, path, "sending gateway request");

        // The gateway reads parameters from the JSON body, GET included.
        let response = self
            .http_client
            .request(method, &url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(params)
            .send()
            .await?;

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)?;

        check_success(json)
    }
}

impl fmt::Debug for CardlinkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardlinkClient")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Returns the response if it reports success, otherwise the mapped error.
fn check_success(json: Value) -> Result<Value> {
    if json.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(json);
    }

    let code = error_code(&json).ok_or_else(|| {
        CardlinkError::InvalidResponse(format!("failure response without an error code: {}", json))
    })?;

    #[cfg(feature = "tracing")]
    tracing::warn!(code, "gateway reported an error");

    Err(error_for_code(code))
}

/// First code of the first `errors` entry in wire order, else the top-level
/// `message`.
fn error_code(json: &Value) -> Option<&str> {
    json.get("errors")
        .and_then(Value::as_object)
        .and_then(|errors| errors.values().next())
        .and_then(|codes| match codes {
            Value::Array(codes) => codes.first(),
            other => Some(other),
        })
        .and_then(Value::as_str)
        .or_else(|| json.get("message").and_then(Value::as_str))
}

fn decode<T: DeserializeOwned>(context: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| CardlinkError::Decode { context, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GatewayError;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = CardlinkClient::new("secret").unwrap();
        assert_eq!(client.token(), "secret");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.auth_header, "Bearer secret");
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = CardlinkClient::new("   ").unwrap_err();
        assert!(matches!(err, CardlinkError::ConfigError(_)));
    }

    #[test]
    fn test_base_url_builder() {
        let client = CardlinkClient::new("secret")
            .unwrap()
            .with_base_url("https://sandbox.example.com/api/v1/")
            .unwrap();
        assert_eq!(client.base_url(), "https://sandbox.example.com/api/v1/");

        let err = CardlinkClient::new("secret")
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, CardlinkError::UrlParseError(_)));

        let err = CardlinkClient::new("secret")
            .unwrap()
            .with_base_url("mailto:billing@example.com")
            .unwrap_err();
        assert!(matches!(err, CardlinkError::ConfigError(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = CardlinkClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_check_success_passes_through() {
        let json = json!({"success": true, "balances": []});
        assert_eq!(check_success(json.clone()).unwrap(), json);
    }

    #[test]
    fn test_message_error() {
        let err = check_success(json!({"success": false, "message": "api:error.bill_not_found"}))
            .unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::BillNotFound));
    }

    #[test]
    fn test_errors_mapping_takes_first_code() {
        let err = check_success(json!({
            "success": false,
            "errors": {
                "shop_id": ["api:error.shop_not_found", "api:error.access_denied"]
            }
        }))
        .unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::ShopNotFound));
    }

    #[test]
    fn test_errors_mapping_follows_wire_order() {
        let err = check_success(json!({
            "success": false,
            "errors": {
                "shop_id": ["api:error.shop_not_found"],
                "amount": ["api:error.invalid_amount"]
            }
        }))
        .unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::ShopNotFound));

        let body = r#"{"success":false,"errors":{"order_id":["api:error.too_many_bills"],"amount":["api:error.invalid_amount"],"custom":["api:error.general_error"]}}"#;
        let err = check_success(serde_json::from_str(body).unwrap()).unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::TooManyBills));
    }

    #[test]
    fn test_empty_errors_falls_back_to_message() {
        let err = check_success(json!({
            "success": false,
            "errors": {},
            "message": "api:error.merchant_banned"
        }))
        .unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::MerchantBanned));
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let err = check_success(json!({
            "success": false,
            "errors": {"amount": ["validation.min.numeric"]}
        }))
        .unwrap_err();
        assert!(matches!(err, CardlinkError::UnknownGateway(ref code) if code == "validation.min.numeric"));
    }

    #[test]
    fn test_missing_success_is_a_failure() {
        let err = check_success(json!({"message": "Unauthenticated"})).unwrap_err();
        assert_eq!(err.gateway_error(), Some(GatewayError::Unauthenticated));
    }

    #[test]
    fn test_failure_without_code() {
        let err = check_success(json!({"success": false})).unwrap_err();
        assert!(matches!(err, CardlinkError::InvalidResponse(_)));

        let err = check_success(json!({"success": false, "errors": {}})).unwrap_err();
        assert!(matches!(err, CardlinkError::InvalidResponse(_)));
    }

    #[test]
    fn test_decode_names_context() {
        let err = decode::<BillStatus>("bill/status", json!({"success": true})).unwrap_err();
        match err {
            CardlinkError::Decode { context, .. } => assert_eq!(context, "bill/status"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
