//! Fixed-rate amortization engine.
//!
//! Computes the equated monthly installment (EMI) of a loan with the standard
//! annuity formula `PMT = P * [r(1 + r)^n] / [(1 + r)^n - 1]` and derives the
//! total payable and total interest from it. Everything here is a pure
//! function of its arguments: invalid or incomplete input degrades to the
//! all-zero [`LoanResult`] instead of failing.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Display precision used by [`compute_amortization`]: whole currency units.
pub const DEFAULT_PRECISION: u32 = 0;

/// A single loan to be priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// The borrowed amount.
    pub principal: Decimal,
    /// The nominal annual interest rate as a percentage (e.g., 8.5 for 8.5%).
    pub annual_rate_percent: Decimal,
    /// The number of monthly installments.
    pub tenure_months: u32,
}

/// The derived repayment figures for a [`LoanRequest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    /// The fixed monthly installment, rounded to the display precision.
    pub monthly_installment: Decimal,
    /// `total_payable - principal`, never negative; always zero at a zero rate.
    pub total_interest: Decimal,
    /// `monthly_installment * tenure_months`.
    pub total_payable: Decimal,
}

impl LoanRequest {
    pub fn new(principal: Decimal, annual_rate_percent: Decimal, tenure_months: u32) -> Self {
        LoanRequest {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Whether the request describes a loan that can be priced at all.
    pub fn is_computable(&self) -> bool {
        self.principal > Decimal::ZERO && self.tenure_months > 0
    }

    /// The monthly decimal rate. Negative annual rates count as zero.
    pub fn monthly_rate(&self) -> Decimal {
        monthly_rate(self.annual_rate_percent.max(Decimal::ZERO))
    }
}

impl LoanResult {
    /// The "nothing entered yet" result.
    pub const ZERO: LoanResult = LoanResult {
        monthly_installment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        total_payable: Decimal::ZERO,
    };

    /// True for the degenerate result produced by incomplete input.
    ///
    /// A valid loan whose installment rounds to zero at the display precision
    /// (say `100 @ 1% x 360` in whole units) is empty by this test too; use
    /// [`LoanRequest::is_computable`] to tell the two apart.
    pub fn is_empty(&self) -> bool {
        self.monthly_installment.is_zero()
    }
}

/// Converts a nominal annual percentage to a monthly decimal rate.
///
/// 8.5 (% per year) becomes `8.5 / 12 / 100 = 0.0070833...` per month.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// Rounds a money amount half away from zero to `precision` decimal places.
pub fn round_money(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the unrounded monthly installment.
///
/// Returns `None` when the request is not computable or when the arithmetic
/// leaves the range of `Decimal`.
pub fn exact_installment(request: &LoanRequest) -> Option<Decimal> {
    if !request.is_computable() {
        return None;
    }

    let months = Decimal::from(request.tenure_months);
    let rate = request.monthly_rate();
    if rate.is_zero() {
        return request.principal.checked_div(months);
    }

    match (Decimal::ONE + rate).checked_powu(u64::from(request.tenure_months)) {
        Some(growth) => {
            let excess = growth - Decimal::ONE;
            // Rate below Decimal resolution: compounding is invisible.
            if excess.is_zero() {
                return request.principal.checked_div(months);
            }
            let annuity_factor = growth.checked_div(excess)?;
            request.principal.checked_mul(rate)?.checked_mul(annuity_factor)
        }
        // (1 + r)^n beyond Decimal range; the annuity factor has converged to 1.
        None => request.principal.checked_mul(rate),
    }
}

/// Prices a loan at whole-currency-unit precision.
///
/// This is the engine's main entry point. A non-positive principal or a zero
/// tenure yields [`LoanResult::ZERO`]; a zero rate divides the principal
/// evenly across the installments.
///
/// # Examples
///
/// ```
/// use emi_calculator::compute_amortization;
/// use rust_decimal_macros::dec;
///
/// let result = compute_amortization(dec!(500000), dec!(8.5), 60);
/// assert_eq!(result.monthly_installment, dec!(10258));
/// assert_eq!(result.total_payable, dec!(615480));
/// assert_eq!(result.total_interest, dec!(115480));
/// ```
pub fn compute_amortization(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> LoanResult {
    let request = LoanRequest::new(principal, annual_rate_percent, tenure_months);
    compute_with_precision(&request, DEFAULT_PRECISION)
}

/// Prices a loan, rounding the installment once to `precision` decimal places.
///
/// The totals are derived from the rounded installment, so
/// `total_payable == monthly_installment * tenure_months` holds exactly. A
/// zero-rate loan always reports zero interest, even when rounding leaves the
/// payable a few units above or below the principal; otherwise interest is
/// clamped at zero.
pub fn compute_with_precision(request: &LoanRequest, precision: u32) -> LoanResult {
    let Some(installment) = exact_installment(request) else {
        if request.is_computable() {
            warn!(?request, "installment overflowed, reporting an empty result");
        }
        return LoanResult::ZERO;
    };

    let monthly_installment = round_money(installment, precision);
    let Some(total_payable) = monthly_installment.checked_mul(Decimal::from(request.tenure_months))
    else {
        warn!(?request, "total payable overflowed, reporting an empty result");
        return LoanResult::ZERO;
    };
    // Zero-rate loans carry no interest; any rounding residue stays in the payable.
    let total_interest = if request.monthly_rate().is_zero() {
        Decimal::ZERO
    } else {
        (total_payable - request.principal).max(Decimal::ZERO)
    };

    trace!(
        principal = %request.principal,
        rate = %request.annual_rate_percent,
        months = request.tenure_months,
        installment = %monthly_installment,
        "priced loan"
    );

    LoanResult {
        monthly_installment,
        total_interest,
        total_payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(500000), dec!(8.5), 60, dec!(10258), dec!(615480), dec!(115480))]
    #[case(dec!(12000), dec!(12), 12, dec!(1066), dec!(12792), dec!(792))]
    #[case(dec!(100000), dec!(10), 12, dec!(8792), dec!(105504), dec!(5504))]
    #[case(dec!(1000000), dec!(9.5), 84, dec!(16344), dec!(1372896), dec!(372896))]
    #[case(dec!(500000), dec!(8.5), 360, dec!(3845), dec!(1384200), dec!(884200))]
    #[case(dec!(2500000), dec!(8.5), 240, dec!(21696), dec!(5207040), dec!(2707040))]
    fn test_known_installments(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
        #[case] installment: Decimal,
        #[case] payable: Decimal,
        #[case] interest: Decimal,
    ) {
        let result = compute_amortization(principal, rate, months);
        assert_eq!(
            result,
            LoanResult {
                monthly_installment: installment,
                total_interest: interest,
                total_payable: payable,
            }
        );
    }

    #[test]
    fn test_two_decimal_precision() {
        let request = LoanRequest::new(dec!(500000), dec!(8.5), 60);
        let result = compute_with_precision(&request, 2);
        assert_eq!(result.monthly_installment, dec!(10258.27));
        assert_eq!(result.total_payable, dec!(615496.20));
        assert_eq!(result.total_interest, dec!(115496.20));
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = compute_amortization(dec!(120000), dec!(0), 12);
        assert_eq!(result.monthly_installment, dec!(10000));
        assert_eq!(result.total_payable, dec!(120000));
        assert_eq!(result.total_interest, dec!(0));
    }

    #[test]
    fn test_zero_rate_with_remainder() {
        let request = LoanRequest::new(dec!(100000), dec!(0), 12);
        assert_eq!(exact_installment(&request), Some(dec!(100000) / dec!(12)));

        let whole = compute_with_precision(&request, 0);
        assert_eq!(whole.monthly_installment, dec!(8333));
        assert_eq!(whole.total_payable, dec!(99996));
        assert_eq!(whole.total_interest, dec!(0));

        let cents = compute_with_precision(&request, 2);
        assert_eq!(cents.monthly_installment, dec!(8333.33));
        assert_eq!(cents.total_interest, dec!(0));
    }

    #[rstest]
    #[case(dec!(250000), 24, dec!(10417), dec!(250008))]
    #[case(dec!(100000), 12, dec!(8333), dec!(99996))]
    #[case(dec!(120000), 12, dec!(10000), dec!(120000))]
    fn test_zero_rate_never_reports_interest(
        #[case] principal: Decimal,
        #[case] months: u32,
        #[case] installment: Decimal,
        #[case] payable: Decimal,
    ) {
        let result = compute_amortization(principal, dec!(0), months);
        assert_eq!(result.monthly_installment, installment);
        assert_eq!(result.total_payable, payable);
        assert_eq!(result.total_interest, dec!(0));
    }

    #[test]
    fn test_tiny_loan_rounds_to_empty_but_stays_computable() {
        let request = LoanRequest::new(dec!(100), dec!(1), 360);
        let result = compute_with_precision(&request, 0);
        assert!(result.is_empty());
        assert!(request.is_computable());
        assert!(!compute_with_precision(&request, 2).is_empty());
    }

    #[rstest]
    #[case(dec!(0), dec!(8.5), 60)]
    #[case(dec!(-500000), dec!(8.5), 60)]
    #[case(dec!(500000), dec!(8.5), 0)]
    #[case(dec!(0), dec!(0), 0)]
    fn test_degenerate_input_is_zero(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
    ) {
        let result = compute_amortization(principal, rate, months);
        assert_eq!(result, LoanResult::ZERO);
        assert!(result.is_empty());
    }

    #[test]
    fn test_negative_rate_treated_as_zero() {
        let result = compute_amortization(dec!(120000), dec!(-3), 12);
        assert_eq!(result.monthly_installment, dec!(10000));
    }

    #[test]
    fn test_higher_rate_never_lowers_installment() {
        let mut previous = Decimal::ZERO;
        for step in 0..=60 {
            let rate = Decimal::from(step) * dec!(0.5);
            let request = LoanRequest::new(dec!(750000), rate, 120);
            let installment = exact_installment(&request).unwrap();
            assert!(installment >= previous, "rate {rate} lowered the installment");
            previous = installment;
        }
    }

    #[rstest]
    #[case(dec!(8.5), 60)]
    #[case(dec!(0), 24)]
    #[case(dec!(12), 360)]
    fn test_installment_linear_in_principal(#[case] rate: Decimal, #[case] months: u32) {
        let single = exact_installment(&LoanRequest::new(dec!(250000), rate, months)).unwrap();
        let triple = exact_installment(&LoanRequest::new(dec!(750000), rate, months)).unwrap();
        assert!((triple - single * dec!(3)).abs() < dec!(0.000000001));

        let small = compute_amortization(dec!(250000), rate, months);
        let large = compute_amortization(dec!(750000), rate, months);
        assert!(large.monthly_installment > small.monthly_installment);
        assert!(large.total_payable > small.total_payable);
        assert!(large.total_interest >= small.total_interest);
    }

    #[rstest]
    #[case(dec!(500000), dec!(8.5), 60)]
    #[case(dec!(345678), dec!(13.25), 47)]
    #[case(dec!(10000), dec!(1), 1)]
    #[case(dec!(10000000), dec!(20), 360)]
    fn test_totals_follow_rounded_installment(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
    ) {
        let result = compute_amortization(principal, rate, months);
        assert_eq!(result.total_payable, result.monthly_installment * Decimal::from(months));
        assert_eq!(result.total_interest, result.total_payable - principal);
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let first = compute_amortization(dec!(987654.32), dec!(7.77), 180);
        let second = compute_amortization(dec!(987654.32), dec!(7.77), 180);
        assert_eq!(first, second);
        assert_eq!(
            first.monthly_installment.serialize(),
            second.monthly_installment.serialize()
        );
    }

    #[test]
    fn test_growth_overflow_converges_to_interest_only() {
        // (1 + 10)^1200 does not fit in a Decimal.
        let request = LoanRequest::new(dec!(1000), dec!(12000), 1200);
        assert_eq!(exact_installment(&request), Some(dec!(10000)));
    }

    #[test]
    fn test_overflow_degrades_to_zero() {
        let result = compute_amortization(Decimal::MAX, dec!(50), 12);
        assert_eq!(result, LoanResult::ZERO);
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), dec!(0));
    }
}
