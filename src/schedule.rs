//! Month-by-month amortization schedules.
//!
//! Each installment is split into the interest accrued on the opening balance
//! and the principal it retires. Balances run on the unrounded installment so
//! no rounding error accumulates; the final month absorbs whatever residue is
//! left so the loan closes at exactly zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::amortization::{LoanRequest, exact_installment, round_money};

/// Longest schedule that will be materialized, in months.
pub const MAX_SCHEDULE_MONTHS: u32 = 12_000;

/// The payment details for a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    pub opening_balance: Decimal,
    pub installment: Decimal,
    /// The portion of the installment that covers interest.
    pub interest: Decimal,
    /// The portion of the installment that reduces the balance.
    pub principal: Decimal,
    pub closing_balance: Decimal,
}

/// Totals for one 12-month block of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    /// 1-based loan year.
    pub year: u32,
    pub principal_paid: Decimal,
    pub interest_paid: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// The regular installment, rounded to display precision.
    pub installment: Decimal,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rolls the monthly rows up into loan years. A trailing partial year is
    /// reported on its own.
    pub fn yearly_totals(&self) -> Vec<YearSummary> {
        self.rows
            .chunks(12)
            .zip(1u32..)
            .map(|(block, year)| YearSummary {
                year,
                principal_paid: block.iter().map(|row| row.principal).sum(),
                interest_paid: block.iter().map(|row| row.interest).sum(),
                closing_balance: block
                    .last()
                    .map_or(Decimal::ZERO, |row| row.closing_balance),
            })
            .collect()
    }
}

/// Builds the full repayment schedule of a loan.
///
/// Requests the engine cannot price, and tenures beyond
/// [`MAX_SCHEDULE_MONTHS`], produce an empty schedule.
pub fn build_schedule(request: &LoanRequest, precision: u32) -> AmortizationSchedule {
    if request.tenure_months > MAX_SCHEDULE_MONTHS {
        warn!(months = request.tenure_months, "tenure too long for a schedule");
        return AmortizationSchedule::default();
    }
    let Some(installment) = exact_installment(request) else {
        return AmortizationSchedule::default();
    };
    match build_rows(request, installment, precision) {
        Some(schedule) => schedule,
        None => {
            warn!(?request, "schedule overflowed, reporting an empty schedule");
            AmortizationSchedule::default()
        }
    }
}

fn build_rows(
    request: &LoanRequest,
    installment: Decimal,
    precision: u32,
) -> Option<AmortizationSchedule> {
    let monthly_rate = request.monthly_rate();
    let months = request.tenure_months;

    let mut balance = request.principal;
    let mut total_paid = Decimal::ZERO;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance.checked_mul(monthly_rate)?;
        let (payment, principal) = if month == months {
            (balance.checked_add(interest)?, balance)
        } else {
            (installment, installment - interest)
        };

        let opening_balance = balance;
        balance -= principal;
        total_paid = total_paid.checked_add(payment)?;

        rows.push(ScheduleRow {
            month,
            opening_balance: round_money(opening_balance, precision),
            installment: round_money(payment, precision),
            interest: round_money(interest, precision),
            principal: round_money(principal, precision),
            closing_balance: round_money(balance.max(Decimal::ZERO), precision),
        });
    }

    let total_paid = round_money(total_paid, precision);
    Some(AmortizationSchedule {
        installment: round_money(installment, precision),
        total_interest: (total_paid - request.principal).max(Decimal::ZERO),
        total_paid,
        rows,
    })
}
