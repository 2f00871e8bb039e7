//! Display formatting for calculator results
//!
//! Currency is shown in Indian Rupees with lakh/crore digit grouping
//! (`₹12,34,567.89`); plain numbers use thousands grouping (`1,234.5678`).

const RUPEE: &str = "₹";

/// Format an amount as Indian Rupees with two decimals
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}{}", RUPEE, non_finite(value));
    }

    let (negative, integer, fraction) = split_fixed(value, 2);
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{}", sign, RUPEE, group_indian(&integer), fraction)
}

/// Format a number with thousands separators and exactly `decimals` fraction digits
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let (negative, integer, fraction) = split_fixed(value, decimals);
    let sign = if negative { "-" } else { "" };
    if decimals == 0 {
        format!("{}{}", sign, group_thousands(&integer))
    } else {
        format!("{}{}.{}", sign, group_thousands(&integer), fraction)
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

/// Round to `decimals` places and split into sign, integer digits and fraction digits.
/// A value that rounds to zero is never reported as negative.
fn split_fixed(value: f64, decimals: usize) -> (bool, String, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed, String::new()),
    };
    let is_zero = integer.bytes().chain(fraction.bytes()).all(|b| b == b'0');
    (value < 0.0 && !is_zero, integer, fraction)
}

fn group_thousands(digits: &str) -> String {
    group_from_right(digits, 3, 3)
}

/// Last three digits, then groups of two: 1234567 -> 12,34,567
fn group_indian(digits: &str) -> String {
    group_from_right(digits, 3, 2)
}

fn group_from_right(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut remaining = head;
    while remaining.len() > rest {
        let (h, t) = remaining.split_at(remaining.len() - rest);
        groups.push(t);
        remaining = h;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(",")
}
