//! Input normalization.
//!
//! Turns whatever the user typed into a [`LoanRequest`] the engine can price.
//! Parsing is lenient the way a live form has to be: leading numeric prefixes
//! are accepted (`"12.5%"` reads as `12.5`), grouping separators are ignored,
//! and anything unparseable or non-positive becomes `0`. Values above the
//! configured [`InputBounds`] are clamped to the bound.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::LoanRequest;
use crate::loan_type::LoanProduct;

/// Upper limits applied to normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub max_principal: Decimal,
    pub max_rate_percent: Decimal,
    pub max_tenure_months: u32,
}

impl Default for InputBounds {
    fn default() -> Self {
        InputBounds {
            max_principal: dec!(10_000_000_000),
            max_rate_percent: dec!(100),
            max_tenure_months: 1200,
        }
    }
}

/// Unit the tenure field is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    Months,
    #[default]
    Years,
}

impl TenureUnit {
    /// Converts a tenure in this unit to months, saturating on overflow.
    pub fn to_months(self, value: u32) -> u32 {
        match self {
            TenureUnit::Months => value,
            TenureUnit::Years => value.saturating_mul(12),
        }
    }
}

impl FromStr for TenureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "mo" | "month" | "months" => Ok(TenureUnit::Months),
            "y" | "yr" | "year" | "years" => Ok(TenureUnit::Years),
            other => Err(format!("unknown tenure unit '{other}' (expected months or years)")),
        }
    }
}

impl fmt::Display for TenureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenureUnit::Months => write!(f, "months"),
            TenureUnit::Years => write!(f, "years"),
        }
    }
}

/// Raw loan form state, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanInput {
    pub principal: String,
    /// Empty means "use the product's default rate" (home loan when unset).
    pub annual_rate_percent: String,
    pub tenure: String,
    pub tenure_unit: TenureUnit,
    pub product: Option<LoanProduct>,
}

impl RawLoanInput {
    pub fn new(principal: &str, annual_rate_percent: &str, tenure: &str, unit: TenureUnit) -> Self {
        RawLoanInput {
            principal: principal.to_string(),
            annual_rate_percent: annual_rate_percent.to_string(),
            tenure: tenure.to_string(),
            tenure_unit: unit,
            product: None,
        }
    }

    pub fn with_product(mut self, product: LoanProduct) -> Self {
        self.product = Some(product);
        self
    }
}

/// Reads a non-negative decimal amount, lenient like a form field.
///
/// Returns `0` for empty, unparseable or negative text. Numbers too large for
/// a `Decimal` saturate to `Decimal::MAX`, the bounds clamp them afterwards.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = strip_grouping(raw);
    let Some(number) = leading_decimal(&cleaned) else {
        return Decimal::ZERO;
    };
    if number.starts_with('-') {
        return Decimal::ZERO;
    }
    let number = number.trim_start_matches('+');
    let parsed = if number.starts_with('.') {
        Decimal::from_str(&format!("0{number}"))
    } else {
        Decimal::from_str(number)
    };
    match parsed {
        Ok(value) if value > Decimal::ZERO => value,
        Ok(_) => Decimal::ZERO,
        // A well-formed number Decimal cannot hold: too large, let the bounds clamp it.
        Err(_) if overflows_decimal(number) => Decimal::MAX,
        Err(_) => Decimal::ZERO,
    }
}

/// Reads a non-negative whole count; fractional parts are truncated.
///
/// Counts too large for `u32` saturate, the bounds clamp them afterwards.
pub fn parse_count(raw: &str) -> u32 {
    let cleaned = strip_grouping(raw);
    let Some(number) = leading_decimal(&cleaned) else {
        return 0;
    };
    if number.starts_with('-') {
        return 0;
    }
    let whole = number
        .trim_start_matches('+')
        .split('.')
        .next()
        .unwrap_or_default();
    if whole.is_empty() {
        return 0;
    }
    whole.parse::<u64>().map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Builds an engine request from raw form input.
pub fn normalize(raw: &RawLoanInput, bounds: &InputBounds) -> LoanRequest {
    let principal = clamp_decimal("principal", parse_amount(&raw.principal), bounds.max_principal);

    let annual_rate_percent = if raw.annual_rate_percent.trim().is_empty() {
        raw.product.unwrap_or_default().default_rate_percent()
    } else {
        parse_amount(&raw.annual_rate_percent)
    };
    let annual_rate_percent =
        clamp_decimal("annual_rate_percent", annual_rate_percent, bounds.max_rate_percent);

    let tenure_months = raw.tenure_unit.to_months(parse_count(&raw.tenure));
    let tenure_months = if tenure_months > bounds.max_tenure_months {
        debug!(value = tenure_months, bound = bounds.max_tenure_months, "clamped tenure");
        bounds.max_tenure_months
    } else {
        tenure_months
    };

    if principal.is_zero() || tenure_months == 0 {
        debug!(?raw, "loan input incomplete");
    }

    LoanRequest {
        principal,
        annual_rate_percent,
        tenure_months,
    }
}

fn clamp_decimal(field: &str, value: Decimal, bound: Decimal) -> Decimal {
    if value > bound {
        debug!(field, %value, %bound, "clamped input");
        bound
    } else {
        value
    }
}

/// Whether the integer part of `number` has more digits than a `Decimal` holds.
fn overflows_decimal(number: &str) -> bool {
    let whole = number.split('.').next().unwrap_or_default();
    whole.trim_start_matches('0').len() > 28
}

fn strip_grouping(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect()
}

/// The longest prefix of `s` shaped like `[+-]digits[.digits]`.
fn leading_decimal(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_point = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    Some(s[..end].trim_end_matches('.'))
}
