//! Number and duration formatting for the result panel.

/// Shown in place of a value that cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Thousands-grouping and decimal separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group: char,
    pub decimal: char,
}

impl NumberLocale {
    /// `1,234,567.89`
    pub const ENGLISH: Self = Self {
        group: ',',
        decimal: '.',
    };
    /// `1.234.567,89`
    pub const GERMAN: Self = Self {
        group: '.',
        decimal: ',',
    };

    /// Pick a separator style from a BCP-47 tag such as `navigator.language`.
    pub fn from_language_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "de" | "da" | "el" | "es" | "id" | "it" | "nl" | "pt" | "tr" => Self::GERMAN,
            _ => Self::ENGLISH,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Insert `sep` between every group of three digits, counting from the right.
fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Round to `decimals` places and render with exactly that many fractional
/// digits and a grouped integer part.
///
/// A tiny epsilon is added before rounding so values like `1.005` that are
/// stored just below the half step still round up.
pub fn format_decimal(n: f64, decimals: usize, locale: NumberLocale) -> String {
    if !n.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = ((n + f64::EPSILON) * factor).round() / factor;
    let rounded = if scaled.is_finite() { scaled } else { n };

    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.group));
    if let Some(frac) = frac_part {
        out.push(locale.decimal);
        out.push_str(frac);
    }
    out
}

/// Round to the nearest integer and render with grouping.
pub fn format_integer(n: f64, locale: NumberLocale) -> String {
    if !n.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    let rounded = n.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits, locale.group);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Break a fractional hour count into `"1d 2h 3m 4s"`.
///
/// Leading zero units are dropped, but once a larger unit appears every
/// smaller one follows. Seconds are always present. Works in `f64` so totals
/// past the integer range still show their magnitude.
pub fn hours_to_dhms(total_hours: f64) -> String {
    if !total_hours.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    // `+ 0.0` turns a negative zero into a plain zero.
    let total_seconds = (total_hours * SECS_PER_HOUR).floor().max(0.0) + 0.0;
    let days = (total_seconds / SECS_PER_DAY).floor();
    let hours = ((total_seconds % SECS_PER_DAY) / SECS_PER_HOUR).floor();
    let minutes = ((total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE).floor();
    let seconds = (total_seconds % SECS_PER_MINUTE).floor();

    let mut parts = Vec::with_capacity(4);
    if days > 0.0 {
        parts.push(format!("{:.0}d", days));
    }
    if hours > 0.0 || days > 0.0 {
        parts.push(format!("{:.0}h", hours));
    }
    if minutes > 0.0 || hours > 0.0 || days > 0.0 {
        parts.push(format!("{:.0}m", minutes));
    }
    parts.push(format!("{:.0}s", seconds));
    parts.join(" ")
}

/// Whole hours of speedups needed (rounded up). `None` if not computable.
///
/// Stays a float: render it with `{:.0}`.
pub fn speedup_hours(total_hours: f64) -> Option<f64> {
    if !total_hours.is_finite() {
        return None;
    }
    Some(total_hours.ceil().max(0.0) + 0.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_decimal_has_exact_fraction_digits(n in 0.0f64..1e12, d in 0usize..8) {
            let s = format_decimal(n, d, NumberLocale::ENGLISH);
            match s.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), d),
                None => prop_assert_eq!(d, 0),
            }
        }

        #[test]
        fn prop_integer_grouping_strips_to_plain(int_val in 0u64..1_000_000_000_000) {
            let s = format_integer(int_val as f64, NumberLocale::GERMAN);
            let stripped: String = s.chars().filter(|c| *c != '.').collect();
            prop_assert_eq!(stripped, int_val.to_string());
        }

        #[test]
        fn prop_integer_groups_are_three_wide(int_val in 0u64..1_000_000_000_000) {
            let s = format_integer(int_val as f64, NumberLocale::ENGLISH);
            let groups: Vec<&str> = s.split(',').collect();
            prop_assert!(groups[0].len() <= 3 && !groups[0].is_empty());
            for g in &groups[1..] {
                prop_assert_eq!(g.len(), 3);
            }
        }

        #[test]
        fn prop_dhms_always_ends_in_seconds(h in -1e3f64..1e6) {
            let s = hours_to_dhms(h);
            prop_assert!(s.ends_with('s'), "got: {}", s);
        }

        #[test]
        fn prop_dhms_reassembles_to_total(secs in 0u64..10_000_000) {
            let s = hours_to_dhms(secs as f64 / 3600.0 + 1e-9);
            let mut total = 0u64;
            for part in s.split(' ') {
                let (num, unit) = part.split_at(part.len() - 1);
                let n: u64 = num.parse().unwrap();
                total += match unit {
                    "d" => n * SECS_PER_DAY as u64,
                    "h" => n * SECS_PER_HOUR as u64,
                    "m" => n * SECS_PER_MINUTE as u64,
                    _ => n,
                };
            }
            prop_assert_eq!(total, secs);
        }
    }
}
