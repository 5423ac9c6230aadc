use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a price as a plain or scientific decimal literal.
pub fn parse_price(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)).ok()
}

/// Render a price with exactly `dp` fractional digits. Text that is not a
/// number comes back untouched.
pub fn format_price(s: &str, dp: u32) -> String {
    match parse_price(s) {
        Some(px) => format!("{:.*}", dp as usize, px.round_dp(dp)),
        None => s.to_string(),
    }
}
