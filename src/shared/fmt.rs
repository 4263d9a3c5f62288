//! Price label formatting for chart axes.
//!
//! Prices span many orders of magnitude (a meme token at `0.00000412`, BTC at
//! `67,000`), so the number of decimals is picked from the magnitude instead
//! of being fixed.

/// Decimal places for a price: none from 100 up, two from 1 up, and enough
/// below 1 to keep two significant digits (at most 8).
pub fn price_decimals(value: f64) -> usize {
    let abs = value.abs();

    if abs >= 100.0 {
        return 0;
    }
    if abs >= 1.0 || abs == 0.0 {
        return 2;
    }

    let exponent = abs.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format a price with auto-detected decimal places.
pub fn format_price(value: f64) -> String {
    format_price_with_decimals(value, price_decimals(value))
}

/// Format a price with explicit decimal places.
pub fn format_price_with_decimals(value: f64, decimals: usize) -> String {
    group_thousands(&format!("{:.1$}", value, decimals))
}

/// Trims trailing fractional zeros and inserts `,` between thousands.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding reads as noise on an axis
    let sign = if grouped.chars().all(|c| c == '0') && fraction.is_empty() {
        ""
    } else {
        sign
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
