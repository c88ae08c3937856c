//! VAT identification number parsing and per-member-state format checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::country_for_vat_prefix;

/// Error returned when a VAT identifier is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatFormatError {
    /// The input as given.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl fmt::Display for VatFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VAT number '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for VatFormatError {}

/// A syntactically valid EU VAT identification number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VatNumber {
    prefix: String,
    number: String,
}

impl VatNumber {
    /// Two-letter VAT prefix ("EL" for Greece, "XI" for Northern Ireland).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The part after the prefix.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// ISO 3166-1 country of the prefix ("EL" → "GR").
    pub fn country_code(&self) -> &str {
        country_for_vat_prefix(&self.prefix)
    }
}

impl fmt::Display for VatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn alnum(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Whether `number` matches the national format behind `prefix`.
/// `None` for an unknown prefix.
fn national_format_ok(prefix: &str, number: &str) -> Option<bool> {
    let len = number.len();
    let ok = match prefix {
        "AT" => len == 9 && number.starts_with('U') && digits(&number[1..]),
        "BE" => len == 10 && digits(number),
        "BG" => (len == 9 || len == 10) && digits(number),
        "CY" => len == 9 && digits(&number[..8]) && number.as_bytes()[8].is_ascii_alphabetic(),
        "CZ" => (8..=10).contains(&len) && digits(number),
        "DE" => len == 9 && digits(number) && !number.starts_with('0'),
        "DK" | "FI" | "HU" | "LU" | "MT" | "SI" => len == 8 && digits(number),
        "EE" | "EL" | "PT" | "XI" => len == 9 && digits(number),
        "ES" => len == 9 && alnum(number),
        "FR" => len == 11 && alnum(&number[..2]) && digits(&number[2..]),
        "HR" | "IT" | "LV" => len == 11 && digits(number),
        "IE" => (len == 8 || len == 9) && alnum(number),
        "LT" => (len == 9 || len == 12) && digits(number),
        "NL" => {
            len == 12
                && digits(&number[..9])
                && number.as_bytes()[9] == b'B'
                && digits(&number[10..])
        }
        "PL" | "SK" => len == 10 && digits(number),
        "RO" => (2..=10).contains(&len) && digits(number),
        "SE" => len == 12 && digits(number),
        _ => return None,
    };
    Some(ok)
}

/// Parse a VAT identification number, format check only (no network call).
///
/// Spaces, dots and dashes are stripped and letters uppercased, so
/// `"si 1234-5678"` parses as `SI12345678`. The input must carry the
/// two-letter prefix.
///
/// ```
/// use tarif::vat::parse_vat_number;
///
/// let n = parse_vat_number("EL 123456789").unwrap();
/// assert_eq!(n.prefix(), "EL");
/// assert_eq!(n.country_code(), "GR");
/// assert!(parse_vat_number("DE012345678").is_err());
/// ```
pub fn parse_vat_number(input: &str) -> Result<VatNumber, VatFormatError> {
    let reject = |reason: String| VatFormatError {
        value: input.to_string(),
        reason,
    };

    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !cleaned.is_ascii() {
        return Err(reject("contains non-ASCII characters".into()));
    }
    if cleaned.len() < 4 {
        return Err(reject("too short, must be at least 4 characters".into()));
    }

    let (prefix, number) = cleaned.split_at(2);
    if !prefix.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(reject(format!("'{prefix}' is not a country prefix")));
    }

    match national_format_ok(prefix, number) {
        Some(true) => Ok(VatNumber {
            prefix: prefix.to_string(),
            number: number.to_string(),
        }),
        Some(false) => Err(reject(format!("invalid format for {prefix}"))),
        None => Err(reject(format!("unknown VAT prefix '{prefix}'"))),
    }
}
