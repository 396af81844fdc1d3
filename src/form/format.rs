use std::fmt::Write as _;

use crate::core::ChartPoint;

/// Renders `value` as `"{symbol} 12,345.68"`. An empty symbol drops the prefix.
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{symbol} {value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);
    let sign = if value < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };

    if symbol.is_empty() {
        format!("{sign}{grouped}.{fraction}")
    } else {
        format!("{sign}{symbol} {grouped}.{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn headline(final_value: f64, symbol: &str) -> String {
    format!(
        "Your investment could be worth {}",
        format_currency(final_value, symbol)
    )
}

pub fn render_table(points: &[ChartPoint], final_value: f64, symbol: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>18}  {:>18}  {:>18}",
        "Year", "Contributions", "Growth", "Total value"
    );
    for point in points {
        let _ = writeln!(
            out,
            "{:>4}  {:>18}  {:>18}  {:>18}",
            point.year,
            format_currency(point.contributions_to_date, symbol),
            format_currency(point.growth, symbol),
            format_currency(point.total_value, symbol),
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", headline(final_value, symbol));
    out
}
