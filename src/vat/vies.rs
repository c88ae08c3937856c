//! EU VIES REST client for VAT-number validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classification::VatValidation;
use super::format::{VatFormatError, VatNumber, parse_vat_number};

const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Result of a VIES lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViesResult {
    /// Whether the number is currently registered.
    pub valid: bool,
    /// VAT prefix the lookup was made for ("EL" for Greece).
    pub country_code: String,
    /// Number without prefix.
    pub vat_number: String,
    pub request_date: Option<NaiveDate>,
    /// Registered trader name, when the member state discloses it.
    pub name: Option<String>,
    /// Registered trader address, when the member state discloses it.
    pub address: Option<String>,
}

impl From<&ViesResult> for VatValidation {
    fn from(r: &ViesResult) -> Self {
        Self {
            valid: r.valid,
            country_code: Some(r.country_code.clone()),
        }
    }
}

/// VIES lookup failure. None of these means "invalid number"; callers should
/// treat the buyer as unverified.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViesError {
    /// The number failed the local format check; VIES was not contacted.
    #[error(transparent)]
    Format(#[from] VatFormatError),
    #[error("VIES network error: {0}")]
    Network(String),
    /// VIES answered with an error (e.g. member state service unavailable).
    #[error("VIES API error: {0}")]
    Api(String),
    #[error("VIES parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

/// VIES returns "---" for undisclosed fields.
fn disclosed(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "---")
}

fn parse_request_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

fn interpret(number: &VatNumber, body: &str) -> Result<ViesResult, ViesError> {
    let resp: ViesApiResponse =
        serde_json::from_str(body).map_err(|e| ViesError::Parse(e.to_string()))?;

    if let Some(err) = resp.error_wrappers.as_ref().and_then(|w| w.first()) {
        let msg = err
            .message
            .clone()
            .or_else(|| err.error.clone())
            .unwrap_or_else(|| "unknown error".into());
        return Err(ViesError::Api(msg));
    }

    Ok(ViesResult {
        valid: resp.valid.unwrap_or(false),
        country_code: number.prefix().to_string(),
        vat_number: number.number().to_string(),
        request_date: resp.request_date.as_deref().and_then(parse_request_date),
        name: disclosed(resp.name),
        address: disclosed(resp.address),
    })
}

/// Check a full VAT number (with prefix, e.g. "ATU12345678") against VIES.
///
/// The number is format-checked first; malformed input never reaches the
/// network. Requires network access.
///
/// # Errors
///
/// [`ViesError::Format`] for malformed input, [`ViesError::Network`] on
/// connection problems, [`ViesError::Api`] if VIES reports an error,
/// [`ViesError::Parse`] on an unexpected response body.
pub async fn check_vies(vat_number: &str) -> Result<ViesResult, ViesError> {
    let number = parse_vat_number(vat_number)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| ViesError::Network(e.to_string()))?;

    let req = ViesRequest {
        country_code: number.prefix(),
        vat_number: number.number(),
    };

    let resp = client
        .post(VIES_URL)
        .json(&req)
        .send()
        .await
        .map_err(|e| ViesError::Network(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ViesError::Network(e.to_string()))?;

    if !status.is_success() {
        tracing::warn!(%status, vat_number = %number, "VIES lookup failed");
        return Err(ViesError::Api(format!("HTTP {status}: {body}")));
    }

    let result = interpret(&number, &body)?;
    tracing::debug!(vat_number = %number, valid = result.valid, "VIES lookup");
    Ok(result)
}
