use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an ISO evaluation date, defaulting to today. The system clock is
/// consulted here at the boundary so the core stays deterministic.
fn evaluation_date(iso: Option<String>) -> NapiResult<NaiveDate> {
    match iso {
        Some(s) => s.parse::<NaiveDate>().map_err(to_napi_error),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_settlement(input_json: String) -> NapiResult<String> {
    let input: fintrack_core::settlement::SettlementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fintrack_core::settlement::compute_settlement(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn valuate_investment(
    input_json: String,
    evaluation_date_iso: Option<String>,
) -> NapiResult<String> {
    let input: fintrack_core::investment::InvestmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let as_of = evaluation_date(evaluation_date_iso)?;
    let output = fintrack_core::investment::valuate_investment(&input, as_of)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn valuate_portfolio(
    input_json: String,
    evaluation_date_iso: Option<String>,
) -> NapiResult<String> {
    let input: fintrack_core::investment::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let as_of = evaluation_date(evaluation_date_iso)?;
    let output = fintrack_core::investment::valuate_portfolio(&input, as_of)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings vault
// ---------------------------------------------------------------------------

#[napi]
pub fn fund_vault_item(input_json: String) -> NapiResult<String> {
    let input: fintrack_core::vault::VaultFundingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrack_core::vault::fund_vault_item(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
