//! Loan products offered by the calculator and their default rates.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanProduct {
    #[default]
    Home,
    Personal,
    Car,
    Education,
    Business,
}

impl LoanProduct {
    pub const ALL: [LoanProduct; 5] = [
        LoanProduct::Home,
        LoanProduct::Personal,
        LoanProduct::Car,
        LoanProduct::Education,
        LoanProduct::Business,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LoanProduct::Home => "Home Loan",
            LoanProduct::Personal => "Personal Loan",
            LoanProduct::Car => "Car Loan",
            LoanProduct::Education => "Education Loan",
            LoanProduct::Business => "Business Loan",
        }
    }

    /// Advertised annual rate, in percent.
    pub fn default_rate_percent(self) -> Decimal {
        match self {
            LoanProduct::Home => dec!(8.5),
            LoanProduct::Personal => dec!(11.5),
            LoanProduct::Car => dec!(9.5),
            LoanProduct::Education => dec!(10.5),
            LoanProduct::Business => dec!(12.0),
        }
    }

    fn key(self) -> &'static str {
        match self {
            LoanProduct::Home => "home",
            LoanProduct::Personal => "personal",
            LoanProduct::Car => "car",
            LoanProduct::Education => "education",
            LoanProduct::Business => "business",
        }
    }
}

impl FromStr for LoanProduct {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LoanProduct::ALL
            .into_iter()
            .find(|product| product.key() == wanted)
            .ok_or_else(|| format!("unknown loan product '{wanted}'"))
    }
}

impl fmt::Display for LoanProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("home", LoanProduct::Home, dec!(8.5))]
    #[case("Personal", LoanProduct::Personal, dec!(11.5))]
    #[case(" car ", LoanProduct::Car, dec!(9.5))]
    #[case("education", LoanProduct::Education, dec!(10.5))]
    #[case("BUSINESS", LoanProduct::Business, dec!(12))]
    fn test_parse_and_default_rate(
        #[case] raw: &str,
        #[case] product: LoanProduct,
        #[case] rate: Decimal,
    ) {
        let parsed: LoanProduct = raw.parse().unwrap();
        assert_eq!(parsed, product);
        assert_eq!(parsed.default_rate_percent(), rate);
    }

    #[test]
    fn test_unknown_product() {
        assert!("yacht".parse::<LoanProduct>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for product in LoanProduct::ALL {
            assert_eq!(product.to_string().parse::<LoanProduct>().unwrap(), product);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&LoanProduct::Education).unwrap();
        assert_eq!(json, "\"education\"");
    }
}
