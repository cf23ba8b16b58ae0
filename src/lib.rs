//! `emi_calculator` is a Rust library for pricing fixed-rate loans.
//!
//! It computes the equated monthly installment (EMI) of a loan with the
//! standard annuity formula and derives the total payable and total interest
//! from it. Around that engine it provides:
//! - **Input normalization**: lenient parsing of raw form text, tenure in
//!   months or years, clamping to configured bounds.
//! - **Amortization schedules**: the month-by-month split of each installment
//!   into interest and principal, with yearly roll-ups.
//! - **Loan products** with advertised default rates, **fixed deposit** maturity
//!   quotes, and Indian-grouped **currency formatting**.
//!
//! Nothing here fails on bad loan input: incomplete or invalid values price
//! to the all-zero [`LoanResult`], which is the "nothing entered yet" state.
//!
//! ## Usage
//!
//! ```rust
//! use emi_calculator::{LoanCalculator, RawLoanInput, TenureUnit};
//! use rust_decimal_macros::dec;
//!
//! let calculator = LoanCalculator::default();
//! let raw = RawLoanInput::new("500000", "8.5", "5", TenureUnit::Years);
//! let quote = calculator.quote(&raw);
//!
//! assert_eq!(quote.result.monthly_installment, dec!(10258));
//! println!("Monthly EMI:    {}", calculator.format(quote.result.monthly_installment));
//! println!("Total Interest: {}", calculator.format(quote.result.total_interest));
//! println!("Total Payable:  {}", calculator.format(quote.result.total_payable));
//! ```

pub mod amortization;
pub mod calculator;
pub mod config;
pub mod deposit;
pub mod error;
pub mod format;
pub mod loan_type;
pub mod normalize;
pub mod schedule;

pub use amortization::{
    LoanRequest, LoanResult, compute_amortization, compute_with_precision, exact_installment,
};
pub use calculator::{LoanCalculator, LoanQuote};
pub use config::CalculatorConfig;
pub use deposit::{DepositQuote, RawDepositInput, quote_deposit};
pub use error::{CalculatorError, CalculatorResult};
pub use format::format_currency;
pub use loan_type::LoanProduct;
pub use normalize::{InputBounds, RawLoanInput, TenureUnit, normalize};
pub use schedule::{AmortizationSchedule, ScheduleRow, YearSummary, build_schedule};
