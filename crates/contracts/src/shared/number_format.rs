//! Форматирование чисел для подписей графиков и таблиц
//!
//! Compact form (`1.5M`, `1.5 млн`) goes on axes and bars; the full form with
//! thousand separators is kept for tooltips and exact values.

use super::i18n::Locale;

/// Magnitude bucket of a compact label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactUnit {
    Thousand,
    Million,
    Billion,
    Trillion,
}

impl CompactUnit {
    /// Picks the largest unit not exceeding `abs`.
    pub fn for_magnitude(abs: f64) -> Option<Self> {
        if abs >= 1e12 {
            Some(CompactUnit::Trillion)
        } else if abs >= 1e9 {
            Some(CompactUnit::Billion)
        } else if abs >= 1e6 {
            Some(CompactUnit::Million)
        } else if abs >= 1e3 {
            Some(CompactUnit::Thousand)
        } else {
            None
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            CompactUnit::Thousand => Some(CompactUnit::Million),
            CompactUnit::Million => Some(CompactUnit::Billion),
            CompactUnit::Billion => Some(CompactUnit::Trillion),
            CompactUnit::Trillion => None,
        }
    }

    pub fn divisor(&self) -> f64 {
        match self {
            CompactUnit::Thousand => 1e3,
            CompactUnit::Million => 1e6,
            CompactUnit::Billion => 1e9,
            CompactUnit::Trillion => 1e12,
        }
    }

    pub fn suffix(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, CompactUnit::Thousand) => "K",
            (Locale::En, CompactUnit::Million) => "M",
            (Locale::En, CompactUnit::Billion) => "B",
            (Locale::En, CompactUnit::Trillion) => "T",
            (Locale::Ru, CompactUnit::Thousand) => " тыс.",
            (Locale::Ru, CompactUnit::Million) => " млн",
            (Locale::Ru, CompactUnit::Billion) => " млрд",
            (Locale::Ru, CompactUnit::Trillion) => " трлн",
            (Locale::Uz, CompactUnit::Thousand) => " ming",
            (Locale::Uz, CompactUnit::Million) => " mln",
            (Locale::Uz, CompactUnit::Billion) => " mlrd",
            (Locale::Uz, CompactUnit::Trillion) => " trln",
        }
    }
}

/// Short label for a large figure: `1 500 000` → `1.5M` / `1.5 млн` / `1.5 mln`.
///
/// ```
/// use contracts::shared::i18n::Locale;
/// use contracts::shared::number_format::compact_number;
/// assert_eq!(compact_number(1_500_000.0, Locale::En), "1.5M");
/// assert_eq!(compact_number(2_000.0, Locale::Ru), "2 тыс.");
/// ```
pub fn compact_number(value: f64, locale: Locale) -> String {
    let whole = value.round();
    let Some(mut unit) = CompactUnit::for_magnitude(whole.abs()) else {
        // -0.4 rounds to -0
        return format!("{:.0}", if whole == 0.0 { 0.0 } else { whole });
    };

    let mut scaled = round1(value / unit.divisor());
    // 999 960 rounds to "1000K"; show it as "1M"
    while scaled.abs() >= 1000.0 {
        let Some(next) = unit.next() else { break };
        unit = next;
        scaled = round1(value / unit.divisor());
    }

    format!("{}{}", trim_decimal(scaled), unit.suffix(locale))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{:.1}", value);
    match s.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством знаков после запятой
///
/// ```
/// use contracts::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals.min(3) as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: 2 знака после запятой и разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// `33.33%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_number_units() {
        assert_eq!(compact_number(950.0, Locale::En), "950");
        assert_eq!(compact_number(1_000.0, Locale::En), "1K");
        assert_eq!(compact_number(12_345.0, Locale::En), "12.3K");
        assert_eq!(compact_number(1_500_000.0, Locale::En), "1.5M");
        assert_eq!(compact_number(7_250_000_000.0, Locale::En), "7.3B");
        assert_eq!(compact_number(3e12, Locale::En), "3T");
    }

    #[test]
    fn test_compact_number_locales() {
        assert_eq!(compact_number(1_500_000.0, Locale::Ru), "1.5 млн");
        assert_eq!(compact_number(2_000_000_000.0, Locale::Ru), "2 млрд");
        assert_eq!(compact_number(45_000.0, Locale::Uz), "45 ming");
        assert_eq!(compact_number(4e12, Locale::Uz), "4 trln");
    }

    #[test]
    fn test_compact_number_sign_and_rollover() {
        assert_eq!(compact_number(-2_500.0, Locale::En), "-2.5K");
        assert_eq!(compact_number(999_960.0, Locale::En), "1M");
    }

    #[test]
    fn test_compact_number_rounds_before_picking_unit() {
        assert_eq!(compact_number(999.4, Locale::En), "999");
        assert_eq!(compact_number(999.6, Locale::En), "1K");
        assert_eq!(compact_number(-999.6, Locale::Ru), "-1 тыс.");
        assert_eq!(compact_number(999_999_950.0, Locale::En), "1B");
    }

    #[test]
    fn test_compact_number_has_no_negative_zero() {
        assert_eq!(compact_number(-0.4, Locale::En), "0");
        assert_eq!(compact_number(-0.0, Locale::En), "0");
        assert_eq!(compact_number(-0.6, Locale::En), "-1");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.89), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
        assert_eq!(format_money(-123.0), "-123.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1 234.567");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1 234 567");
        assert_eq!(format_number_int(-1234.0), "-1 234");
        assert_eq!(format_number_int(-100.0), "-100");
    }
}
