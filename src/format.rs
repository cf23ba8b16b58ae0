//! Currency display.
//!
//! Amounts are grouped the Indian way: the last three integer digits, then
//! pairs (`12,34,567`).

use rust_decimal::Decimal;

use crate::amortization::round_money;

/// Formats `amount` with `symbol`, rounded to `precision` decimal places.
///
/// ```
/// use emi_calculator::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(500000), "¥", 0), "¥5,00,000");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str, precision: u32) -> String {
    let rounded = round_money(amount, precision);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.*}", precision as usize, rounded.abs());
    let (whole, fraction) = match plain.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut out = format!("{sign}{symbol}{}", group_indian(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
