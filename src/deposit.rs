//! Fixed deposit maturity quotes.
//!
//! Deposits earn simple interest at a rate tiered by tenure:
//! `interest = principal * rate * (months / 12) / 100`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::amortization::round_money;
use crate::normalize::{InputBounds, parse_amount, parse_count};

/// Minimum tenure (months) and annual rate (percent) of each tier, longest first.
const RATE_TIERS: [(u32, Decimal); 7] = [
    (120, dec!(7.75)),
    (60, dec!(7.5)),
    (36, dec!(7.25)),
    (24, dec!(7.0)),
    (12, dec!(6.75)),
    (6, dec!(5.5)),
    (0, dec!(4.5)),
];

/// Extra annual rate, in percent, paid to senior citizens.
pub const SENIOR_CITIZEN_BONUS: Decimal = dec!(0.5);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDepositInput {
    pub principal: String,
    pub tenure_months: String,
    pub senior_citizen: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub principal: Decimal,
    pub tenure_months: u32,
    pub annual_rate_percent: Decimal,
    pub interest_earned: Decimal,
    pub maturity_amount: Decimal,
}

/// The annual rate offered for a deposit of `tenure_months`.
pub fn deposit_rate_percent(tenure_months: u32, senior_citizen: bool) -> Decimal {
    let base = RATE_TIERS
        .iter()
        .find(|(min_months, _)| tenure_months >= *min_months)
        .map_or(Decimal::ZERO, |(_, rate)| *rate);
    if senior_citizen {
        base + SENIOR_CITIZEN_BONUS
    } else {
        base
    }
}

/// Quotes the maturity of a fixed deposit.
///
/// A non-positive principal or zero tenure yields the zero quote.
pub fn quote_deposit(
    principal: Decimal,
    tenure_months: u32,
    senior_citizen: bool,
    precision: u32,
) -> DepositQuote {
    if principal <= Decimal::ZERO || tenure_months == 0 {
        return DepositQuote::default();
    }

    let annual_rate_percent = deposit_rate_percent(tenure_months, senior_citizen);
    let years = Decimal::from(tenure_months) / dec!(12);
    let Some(interest) = principal
        .checked_mul(annual_rate_percent)
        .and_then(|v| v.checked_mul(years))
        .map(|v| v / dec!(100))
    else {
        return DepositQuote::default();
    };
    let Some(maturity) = principal.checked_add(interest) else {
        return DepositQuote::default();
    };

    let maturity_amount = round_money(maturity, precision);
    trace!(%principal, tenure_months, %maturity_amount, "quoted deposit");

    DepositQuote {
        principal,
        tenure_months,
        annual_rate_percent,
        interest_earned: maturity_amount - principal,
        maturity_amount,
    }
}

/// Normalizes raw deposit form input and quotes it.
pub fn quote_raw_deposit(
    raw: &RawDepositInput,
    bounds: &InputBounds,
    precision: u32,
) -> DepositQuote {
    let principal = parse_amount(&raw.principal).min(bounds.max_principal);
    let tenure_months = parse_count(&raw.tenure_months).min(bounds.max_tenure_months);
    quote_deposit(principal, tenure_months, raw.senior_citizen, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(3, dec!(4.5))]
    #[case(5, dec!(4.5))]
    #[case(6, dec!(5.5))]
    #[case(12, dec!(6.75))]
    #[case(24, dec!(7.0))]
    #[case(36, dec!(7.25))]
    #[case(59, dec!(7.25))]
    #[case(60, dec!(7.5))]
    #[case(119, dec!(7.5))]
    #[case(120, dec!(7.75))]
    #[case(240, dec!(7.75))]
    fn test_rate_tiers(#[case] months: u32, #[case] rate: Decimal) {
        assert_eq!(deposit_rate_percent(months, false), rate);
    }

    #[test]
    fn test_senior_citizen_bonus() {
        assert_eq!(deposit_rate_percent(12, true), dec!(7.25));
    }

    #[test]
    fn test_one_year_deposit() {
        let quote = quote_deposit(dec!(100000), 12, false, 0);
        assert_eq!(
            quote,
            DepositQuote {
                principal: dec!(100000),
                tenure_months: 12,
                annual_rate_percent: dec!(6.75),
                interest_earned: dec!(6750),
                maturity_amount: dec!(106750),
            }
        );
    }

    #[test]
    fn test_short_deposit_rounds_maturity() {
        // 12345 * 4.5% * 0.25 = 138.88125
        let quote = quote_deposit(dec!(12345), 3, false, 0);
        assert_eq!(quote.maturity_amount, dec!(12484));
        assert_eq!(quote.interest_earned, dec!(139));
    }

    #[rstest]
    #[case(dec!(0), 12)]
    #[case(dec!(-100), 12)]
    #[case(dec!(5000), 0)]
    fn test_degenerate_deposit(#[case] principal: Decimal, #[case] months: u32) {
        assert_eq!(quote_deposit(principal, months, true, 0), DepositQuote::default());
    }

    #[test]
    fn test_raw_deposit_input() {
        let raw = RawDepositInput {
            principal: "2,00,000".to_string(),
            tenure_months: "60".to_string(),
            senior_citizen: true,
        };
        let quote = quote_raw_deposit(&raw, &InputBounds::default(), 0);
        assert_eq!(quote.annual_rate_percent, dec!(8.0));
        assert_eq!(quote.maturity_amount, dec!(280000));
    }
}
