//! Payment gateway return
//!
//! After paying, the gateway sends the user back with the transaction
//! outcome in `vnp_*` query parameters. The signature is checked by the
//! backend; the client only reads the parameters for display and forwards
//! the raw query.

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use storefront::money::{PriceError, price_from_decimal};
use url::form_urlencoded;

/// Code the gateway uses for a successful response and transaction.
const SUCCESS_CODE: &str = "00";

const PAY_DATE_FORMAT: &str = "%Y%m%d%H%M%S";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Parameters of a gateway return. Missing parameters are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayReturn {
    pub amount: String,
    pub bank_code: String,
    pub bank_tran_no: String,
    pub card_type: String,
    pub order_info: String,
    pub pay_date: String,
    pub response_code: String,
    pub tmn_code: String,
    pub transaction_no: String,
    pub transaction_status: String,
    pub txn_ref: String,
    pub secure_hash: String,
    query: String,
}

impl GatewayReturn {
    /// Read the parameters out of a return query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut parsed = Self {
            query: query.to_string(),
            ..Self::default()
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let field = match &*key {
                "vnp_Amount" => &mut parsed.amount,
                "vnp_BankCode" => &mut parsed.bank_code,
                "vnp_BankTranNo" => &mut parsed.bank_tran_no,
                "vnp_CardType" => &mut parsed.card_type,
                "vnp_OrderInfo" => &mut parsed.order_info,
                "vnp_PayDate" => &mut parsed.pay_date,
                "vnp_ResponseCode" => &mut parsed.response_code,
                "vnp_TmnCode" => &mut parsed.tmn_code,
                "vnp_TransactionNo" => &mut parsed.transaction_no,
                "vnp_TransactionStatus" => &mut parsed.transaction_status,
                "vnp_TxnRef" => &mut parsed.txn_ref,
                "vnp_SecureHash" => &mut parsed.secure_hash,
                _ => continue,
            };

            if field.is_empty() {
                *field = value.into_owned();
            }
        }

        parsed
    }

    /// The query exactly as received, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Both the response code and the transaction status report success.
    pub fn is_success(&self) -> bool {
        self.response_code == SUCCESS_CODE && self.transaction_status == SUCCESS_CODE
    }

    /// Amount paid. The gateway reports dong multiplied by 100.
    ///
    /// Returns `None` when the amount is missing or malformed.
    pub fn amount(&self) -> Option<Result<Money<'static, Currency>, PriceError>> {
        let hundredths: i64 = self.amount.trim().parse().ok()?;
        let amount = Decimal::new(hundredths, 2);

        Some(price_from_decimal(amount, iso::VND))
    }

    /// Payment time, when present and well formed.
    pub fn paid_at(&self) -> Option<DateTime> {
        let raw = self.pay_date.as_str();

        if raw.len() != 14 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        DateTime::strptime(PAY_DATE_FORMAT, raw).ok()
    }

    /// Payment time as `dd/MM/yyyy HH:mm:ss`, or `N/A`.
    pub fn display_pay_date(&self) -> String {
        self.paid_at().map_or_else(
            || "N/A".to_string(),
            |paid_at| paid_at.strftime(DISPLAY_DATE_FORMAT).to_string(),
        )
    }

    /// Order description, with any remaining form encoding removed.
    pub fn display_order_info(&self) -> String {
        decode_form_value(&self.order_info)
    }

    /// Bank name for the bank code.
    pub fn bank_name(&self) -> &str {
        bank_name(&self.bank_code)
    }

    /// Description of the response code.
    pub fn response_message(&self) -> &'static str {
        response_message(&self.response_code)
    }
}

/// Bank name for a gateway bank code, or the code itself when unknown.
pub fn bank_name(code: &str) -> &str {
    match code {
        "NCB" => "National Citizen Bank",
        "VCB" => "Vietcombank",
        "VTB" => "VietinBank",
        "BIDV" => "BIDV",
        "TPB" => "TPBank",
        "MB" => "MB Bank",
        "TCB" => "Techcombank",
        "ACB" => "ACB",
        "SHB" => "SHB",
        "EXB" => "Eximbank",
        _ => code,
    }
}

/// Description of a gateway response code.
pub fn response_message(code: &str) -> &'static str {
    match code {
        "00" => "Transaction successful",
        "07" => "Amount debited, but the transaction is suspected of fraud",
        "09" => "Card or account is not registered for internet banking",
        "10" => "Card or account details were entered incorrectly more than 3 times",
        "11" => "Payment window expired, please try again",
        "12" => "Card or account is locked",
        "13" => "Incorrect one-time password",
        "24" => "Transaction cancelled by the customer",
        "51" => "Insufficient balance",
        "65" => "Daily transaction limit exceeded",
        "75" => "Paying bank is under maintenance",
        "79" => "Payment password entered incorrectly too many times",
        "99" => "Other error",
        _ => "Unknown error",
    }
}

/// Decode one form-encoded value: `+` is a space, `%XX` a byte.
fn decode_form_value(raw: &str) -> String {
    // Separators are escaped so the whole value reads back as a single key.
    let escaped = raw.replace('&', "%26").replace('=', "%3D");

    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(value, _)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const RETURN_QUERY: &str = "?vnp_Amount=15000000&vnp_BankCode=NCB&vnp_BankTranNo=VNP14422574\
        &vnp_CardType=ATM&vnp_OrderInfo=Thanh+toan+don+hang%3A5f2c&vnp_PayDate=20240315143005\
        &vnp_ResponseCode=00&vnp_TmnCode=DEMO0001&vnp_TransactionNo=14422574\
        &vnp_TransactionStatus=00&vnp_TxnRef=5f2c&vnp_SecureHash=9a8b7c";

    #[test]
    fn parses_every_gateway_parameter() {
        let parsed = GatewayReturn::parse(RETURN_QUERY);

        assert_eq!(parsed.bank_code, "NCB");
        assert_eq!(parsed.txn_ref, "5f2c");
        assert_eq!(parsed.secure_hash, "9a8b7c");
        assert_eq!(parsed.order_info, "Thanh toan don hang:5f2c");
        assert!(parsed.is_success());
    }

    #[test]
    fn raw_query_is_kept_for_forwarding() {
        let parsed = GatewayReturn::parse(RETURN_QUERY);

        assert!(parsed.query().starts_with("vnp_Amount=15000000&"));
        assert!(parsed.query().contains("Thanh+toan+don+hang%3A5f2c"));
    }

    #[test]
    fn missing_parameters_are_empty() {
        let parsed = GatewayReturn::parse("vnp_ResponseCode=24");

        assert_eq!(parsed.amount, "");
        assert_eq!(parsed.response_message(), "Transaction cancelled by the customer");
        assert!(!parsed.is_success());
    }

    #[test]
    fn success_needs_both_codes() {
        let parsed = GatewayReturn::parse("vnp_ResponseCode=00&vnp_TransactionStatus=02");

        assert!(!parsed.is_success());
    }

    #[test]
    fn amount_is_reported_in_hundredths() -> TestResult {
        let parsed = GatewayReturn::parse(RETURN_QUERY);

        let amount = parsed.amount().transpose()?;

        assert_eq!(amount, Some(Money::from_minor(150_000, iso::VND)));

        Ok(())
    }

    #[test]
    fn pay_date_is_reformatted() {
        let parsed = GatewayReturn::parse(RETURN_QUERY);

        assert_eq!(parsed.display_pay_date(), "15/03/2024 14:30:05");
    }

    #[test]
    fn malformed_pay_date_is_not_available() {
        let parsed = GatewayReturn::parse("vnp_PayDate=2024031514");

        assert_eq!(parsed.display_pay_date(), "N/A");
    }

    #[test]
    fn order_info_is_decoded_again_for_display() {
        let parsed = GatewayReturn::parse("vnp_OrderInfo=Don%2Bhang%253A42");

        assert_eq!(parsed.order_info, "Don+hang%3A42");
        assert_eq!(parsed.display_order_info(), "Don hang:42");
    }

    #[test]
    fn multibyte_order_info_is_decoded() {
        let parsed = GatewayReturn::parse("vnp_OrderInfo=Thanh+to%C3%A1n+%C4%91%C6%A1n+h%C3%A0ng");

        assert_eq!(parsed.order_info, "Thanh toán đơn hàng");
    }

    #[test]
    fn separators_survive_the_display_decode() {
        let parsed = GatewayReturn::parse("vnp_OrderInfo=Ao%2526Quan%253D2");

        assert_eq!(parsed.order_info, "Ao%26Quan%3D2");
        assert_eq!(parsed.display_order_info(), "Ao&Quan=2");
    }

    #[test]
    fn unknown_bank_falls_back_to_code() {
        assert_eq!(bank_name("VCB"), "Vietcombank");
        assert_eq!(bank_name("XYZ"), "XYZ");
    }
}
