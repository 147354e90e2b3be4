//! Core type definitions for the Cardlink API.
//!
//! Response models are immutable records decoded from the gateway's JSON.
//! Request types describe endpoint parameters; optional fields are skipped
//! entirely when unset rather than sent as `null`.

use crate::enums::{AccountType, BillType, Currency, Status};
use crate::utils::{amount, bool_as_int, flag, gateway_date, gateway_datetime};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Default root of the gateway API.
pub const DEFAULT_BASE_URL: &str = "https://cardlink.link/api/v1/";

/// A payment link issued by the merchant.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Bill {
    /// Unique bill id
    pub id: String,

    /// Bill status
    pub status: Status,

    /// Whether the bill still accepts payments
    #[serde(deserialize_with = "flag")]
    pub active: bool,

    /// Bill amount
    #[serde(deserialize_with = "amount")]
    pub amount: f64,

    /// `NORMAL` accepts one payment, `MULTI` accepts any number
    #[serde(rename = "type")]
    pub bill_type: BillType,

    /// Currency the customer pays in
    pub currency_in: Currency,

    /// Creation time
    #[serde(with = "gateway_datetime")]
    pub created_at: NaiveDateTime,
}

/// Result of `bill/create`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BillCreate {
    /// Request status flag
    pub success: bool,

    /// Link to the page with a QR code
    pub link_url: String,

    /// Link to the payment page
    pub link_page_url: String,

    /// Unique id of the new bill
    pub bill_id: String,
}

/// Result of `bill/status`.
///
/// Derefs to [`Bill`] for the bill fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BillStatus {
    /// Request status flag
    pub success: bool,

    /// The bill
    #[serde(flatten)]
    pub bill: Bill,
}

/// Result of `bill/toggle_activity`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BillToggleActivity {
    /// Request status flag
    pub success: bool,

    /// The bill after the change
    #[serde(flatten)]
    pub bill: Bill,
}

impl Deref for BillStatus {
    type Target = Bill;

    fn deref(&self) -> &Bill {
        &self.bill
    }
}

impl Deref for BillToggleActivity {
    type Target = Bill;

    fn deref(&self) -> &Bill {
        &self.bill
    }
}

/// One transfer made against a bill.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Payment {
    /// Unique payment id
    pub id: String,

    /// Bill the payment belongs to
    pub bill_id: String,

    /// Payment status
    pub status: Status,

    /// Total payment amount
    #[serde(deserialize_with = "amount")]
    pub amount: f64,

    /// Commission charged
    #[serde(deserialize_with = "amount")]
    pub commission: f64,

    /// Payment currency
    pub currency_in: Currency,

    /// Amount credited to the merchant account
    #[serde(deserialize_with = "amount")]
    pub account_amount: f64,

    /// Currency of the merchant account
    pub account_currency_code: Currency,

    /// Payer's masked card
    pub from_card: String,

    /// Creation time
    #[serde(with = "gateway_datetime")]
    pub created_at: NaiveDateTime,

    /// Failure code for unsuccessful payments
    #[serde(default)]
    pub error_code: Option<String>,

    /// Failure description for unsuccessful payments
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Result of `payment/status`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentStatus {
    /// Unique payment id
    pub id: String,

    /// Bill the payment belongs to
    pub bill_id: String,

    /// Payment status
    pub status: Status,

    /// Total payment amount
    #[serde(deserialize_with = "amount")]
    pub amount: f64,

    /// Commission charged
    #[serde(deserialize_with = "amount")]
    pub commission: f64,

    /// Payment currency
    pub currency_in: Currency,

    /// Amount credited to the merchant account
    #[serde(deserialize_with = "amount")]
    pub account_amount: f64,

    /// Currency of the merchant account
    pub account_currency_code: Currency,

    /// Payer's masked card
    pub from_card: String,

    /// Creation time
    #[serde(with = "gateway_datetime")]
    pub created_at: NaiveDateTime,

    /// Request status flag
    pub success: bool,
}

/// A withdrawal of merchant balance to an external account.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Payout {
    /// Unique payout id
    pub id: String,

    /// Payout status
    pub status: Status,

    /// Payout amount
    #[serde(deserialize_with = "amount")]
    pub amount: f64,

    /// Fees
    #[serde(deserialize_with = "amount")]
    pub commission: f64,

    /// Account the money is sent to
    pub account_identifier: String,

    /// Payout currency
    pub currency: Currency,

    /// Creation time
    #[serde(with = "gateway_datetime")]
    pub created_at: NaiveDateTime,
}

/// Result of `payout/status`.
///
/// Derefs to [`Payout`] for the payout fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PayoutStatus {
    /// Request status flag
    pub success: bool,

    /// The payout
    #[serde(flatten)]
    pub payout: Payout,
}

impl Deref for PayoutStatus {
    type Target = Payout;

    fn deref(&self) -> &Payout {
        &self.payout
    }
}

/// Merchant balance in one currency.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Balance {
    /// Balance currency
    pub currency: Currency,

    /// Available for payout
    #[serde(deserialize_with = "amount")]
    pub balance_available: f64,

    /// Locked by pending payouts
    #[serde(deserialize_with = "amount")]
    pub balance_locked: f64,

    /// On hold
    #[serde(deserialize_with = "amount")]
    pub balance_hold: f64,
}

/// Parameters for `bill/create`.
///
/// # Examples
///
/// ```
/// use cardlink_rs::enums::{BillType, Currency};
/// use cardlink_rs::types::CreateBillRequest;
///
/// let request = CreateBillRequest::new(150.0, "shop-1")
///     .with_order_id("order-42")
///     .with_type(BillType::Multi)
///     .with_currency_in(Currency::Eur);
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["type"], "MULTI");
/// assert!(body.get("description").is_none());
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateBillRequest {
    /// Payment amount
    pub amount: f64,

    /// Unique shop id
    pub shop_id: String,

    /// Merchant order id, echoed in the postback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Description of the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Purpose shown on the payment form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form value echoed in the postback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,

    /// Bill type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bill_type: Option<BillType>,

    /// Currency shown to the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_in: Option<Currency>,
}

impl CreateBillRequest {
    /// Creates a request with the required fields only.
    pub fn new(amount: f64, shop_id: impl Into<String>) -> Self {
        Self {
            amount,
            shop_id: shop_id.into(),
            order_id: None,
            description: None,
            name: None,
            custom: None,
            bill_type: None,
            currency_in: None,
        }
    }

    /// Sets the merchant order id.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Sets the payment description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the purpose shown on the payment form.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the custom postback value.
    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    /// Sets the bill type.
    pub fn with_type(mut self, bill_type: BillType) -> Self {
        self.bill_type = Some(bill_type);
        self
    }

    /// Sets the currency shown to the customer.
    pub fn with_currency_in(mut self, currency: Currency) -> Self {
        self.currency_in = Some(currency);
        self
    }
}

/// Parameters for `payout/regular/create`.
///
/// `card_holder` only matters for [`AccountType::CreditCard`] but is always
/// sent.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RegularPayoutRequest {
    /// Payout amount
    pub amount: f64,

    /// Payout currency
    pub currency: Currency,

    /// Destination account kind
    pub account_type: AccountType,

    /// Destination account number
    pub account_identifier: String,

    /// Card holder name
    pub card_holder: String,
}

impl RegularPayoutRequest {
    /// Creates a card payout request.
    pub fn credit_card(
        amount: f64,
        currency: Currency,
        card_number: impl Into<String>,
        card_holder: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            account_type: AccountType::CreditCard,
            account_identifier: card_number.into(),
            card_holder: card_holder.into(),
        }
    }
}

/// Parameters for `payout/personal/create`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PersonalPayoutRequest {
    /// Payout amount
    pub amount: f64,

    /// Id of a payout account registered in the merchant dashboard
    pub payout_account_id: String,
}

impl PersonalPayoutRequest {
    /// Creates a payout to a registered account.
    pub fn new(amount: f64, payout_account_id: impl Into<String>) -> Self {
        Self {
            amount,
            payout_account_id: payout_account_id.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct IdParams<'a> {
    pub id: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct ToggleActivityParams<'a> {
    pub id: &'a str,
    #[serde(serialize_with = "bool_as_int")]
    pub active: bool,
}

#[derive(Serialize, Debug, Default)]
pub(crate) struct SearchParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<&'a str>,
    #[serde(with = "gateway_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "gateway_date", skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<NaiveDate>,
}

#[derive(Serialize, Debug)]
pub(crate) struct NoParams {}

/// `{"data": [...]}` envelope used by list endpoints.
#[derive(Deserialize, Debug)]
pub(crate) struct DataList<T> {
    pub data: Vec<T>,
}

/// `{"balances": [...]}` envelope used by `merchant/balance`.
#[derive(Deserialize, Debug)]
pub(crate) struct BalanceList {
    pub balances: Vec<Balance>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bill_json() -> serde_json::Value {
        json!({
            "success": true,
            "id": "b1",
            "status": "SUCCESS",
            "active": true,
            "amount": 10.5,
            "type": "NORMAL",
            "currency_in": "USD",
            "created_at": "2024-01-01 12:00:00"
        })
    }

    #[test]
    fn test_bill_status_deserialization() {
        let status: BillStatus = serde_json::from_value(bill_json()).unwrap();

        assert!(status.success);
        assert_eq!(status.id, "b1");
        assert_eq!(status.status, Status::Success);
        assert_eq!(status.bill_type, BillType::Normal);
        assert_eq!(status.currency_in, Currency::Usd);
        assert_eq!(status.amount, 10.5);
        assert_eq!(status.created_at.to_string(), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_unknown_enum_is_rejected() {
        let mut value = bill_json();
        value["status"] = json!("TELEPORTED");

        let err = serde_json::from_value::<BillStatus>(value).unwrap_err();
        assert!(err.to_string().contains("unknown status `TELEPORTED`"));
    }

    #[test]
    fn test_payment_error_fields_are_optional() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "p1",
            "bill_id": "b1",
            "status": "FAIL",
            "amount": "100.00",
            "commission": "4.00",
            "currency_in": "RUB",
            "account_amount": "96.00",
            "account_currency_code": "RUB",
            "from_card": "220000******0000",
            "created_at": "2024-06-30 23:59:59",
            "error_message": "Card declined"
        }))
        .unwrap();

        assert_eq!(payment.status, Status::Fail);
        assert_eq!(payment.account_amount, 96.0);
        assert_eq!(payment.error_code, None);
        assert_eq!(payment.error_message.as_deref(), Some("Card declined"));
    }

    #[test]
    fn test_create_bill_request_skips_unset_fields() {
        let request = CreateBillRequest::new(99.9, "shop-7");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": 99.9, "shop_id": "shop-7"})
        );

        let request = request
            .with_description("Coffee")
            .with_name("Order #1")
            .with_custom("ref-1")
            .with_currency_in(Currency::Rub);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": 99.9,
                "shop_id": "shop-7",
                "description": "Coffee",
                "name": "Order #1",
                "custom": "ref-1",
                "currency_in": "RUB"
            })
        );
    }

    #[test]
    fn test_regular_payout_request() {
        let request = RegularPayoutRequest::credit_card(500.0, Currency::Rub, "4111111111111111", "IVAN IVANOV");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": 500.0,
                "currency": "RUB",
                "account_type": "CREDIT_CARD",
                "account_identifier": "4111111111111111",
                "card_holder": "IVAN IVANOV"
            })
        );
    }

    #[test]
    fn test_personal_payout_request() {
        let request = PersonalPayoutRequest::new(1000.0, "acc-1");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": 1000.0, "payout_account_id": "acc-1"})
        );
    }

    #[test]
    fn test_search_params_skip_absent_dates() {
        let params = SearchParams {
            shop_id: Some("shop-1"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            finish_date: None,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"shop_id": "shop-1", "start_date": "2024-01-01"})
        );
        assert_eq!(serde_json::to_value(SearchParams::default()).unwrap(), json!({}));
    }
}
