use clap::Args;
use serde_json::{Value, json};

use emi_calculator::{LoanCalculator, LoanProduct, RawDepositInput, RawLoanInput, TenureUnit};

#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub amount: String,
    /// Annual interest rate in percent (defaults to the product's rate)
    #[arg(long)]
    pub rate: Option<String>,
    /// Loan tenure, in --unit
    #[arg(long)]
    pub tenure: String,
    /// Tenure unit: months or years
    #[arg(long, default_value = "years")]
    pub unit: TenureUnit,
    /// Loan product: home, personal, car, education or business (default: home)
    #[arg(long)]
    pub product: Option<LoanProduct>,
    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,
    /// Include yearly principal and interest totals
    #[arg(long)]
    pub yearly: bool,
}

#[derive(Args)]
pub struct DepositArgs {
    /// Deposit amount
    #[arg(long)]
    pub amount: String,
    /// Deposit tenure in months
    #[arg(long)]
    pub months: String,
    /// Apply the senior citizen rate bonus
    #[arg(long)]
    pub senior: bool,
}

pub fn run_loan(calculator: &LoanCalculator, args: LoanArgs) -> anyhow::Result<Value> {
    let raw = RawLoanInput {
        principal: args.amount,
        annual_rate_percent: args.rate.unwrap_or_default(),
        tenure: args.tenure,
        tenure_unit: args.unit,
        product: args.product,
    };
    let quote = calculator.quote(&raw);

    let mut value = json!({
        "request": quote.request,
        "result": quote.result,
        "display": {
            "monthly_installment": calculator.format(quote.result.monthly_installment),
            "total_interest": calculator.format(quote.result.total_interest),
            "total_payable": calculator.format(quote.result.total_payable),
        },
    });
    if let Some(product) = args.product {
        value["product"] = json!(product.display_name());
    }

    if args.schedule || args.yearly {
        let schedule = calculator.schedule(&raw);
        if args.schedule {
            value["schedule"] = serde_json::to_value(&schedule.rows)?;
        }
        if args.yearly {
            value["yearly"] = serde_json::to_value(schedule.yearly_totals())?;
        }
    }
    Ok(value)
}

pub fn run_deposit(calculator: &LoanCalculator, args: DepositArgs) -> anyhow::Result<Value> {
    let raw = RawDepositInput {
        principal: args.amount,
        tenure_months: args.months,
        senior_citizen: args.senior,
    };
    let quote = calculator.deposit(&raw);
    Ok(json!({
        "result": quote,
        "display": {
            "maturity_amount": calculator.format(quote.maturity_amount),
            "interest_earned": calculator.format(quote.interest_earned),
        },
    }))
}

pub fn run_products() -> anyhow::Result<Value> {
    let products: Vec<Value> = LoanProduct::ALL
        .into_iter()
        .map(|product| {
            json!({
                "product": product.to_string(),
                "name": product.display_name(),
                "annual_rate_percent": product.default_rate_percent(),
            })
        })
        .collect();
    Ok(Value::Array(products))
}
