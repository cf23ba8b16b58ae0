//! The configured calculator front end: raw form input in, display-ready figures out.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{LoanRequest, LoanResult, compute_with_precision};
use crate::config::CalculatorConfig;
use crate::deposit::{DepositQuote, RawDepositInput, quote_raw_deposit};
use crate::format::format_currency;
use crate::normalize::{RawLoanInput, normalize};
use crate::schedule::{AmortizationSchedule, build_schedule};

/// A normalized request together with its priced result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub request: LoanRequest,
    pub result: LoanResult,
}

#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    config: CalculatorConfig,
}

impl LoanCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        LoanCalculator { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn request(&self, raw: &RawLoanInput) -> LoanRequest {
        normalize(raw, &self.config.bounds)
    }

    pub fn quote(&self, raw: &RawLoanInput) -> LoanQuote {
        let request = self.request(raw);
        LoanQuote {
            request,
            result: compute_with_precision(&request, self.config.precision),
        }
    }

    pub fn schedule(&self, raw: &RawLoanInput) -> AmortizationSchedule {
        build_schedule(&self.request(raw), self.config.precision)
    }

    pub fn deposit(&self, raw: &RawDepositInput) -> DepositQuote {
        quote_raw_deposit(raw, &self.config.bounds, self.config.precision)
    }

    /// Formats an amount with the configured symbol and precision.
    pub fn format(&self, amount: Decimal) -> String {
        format_currency(amount, &self.config.currency_symbol, self.config.precision)
    }
}
