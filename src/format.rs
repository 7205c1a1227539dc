//! 숫자/통화 표시 형식. 계산 결과를 화면에 찍는 모든 곳이 이 모듈을 거친다.

use serde::{Deserialize, Serialize};

/// 값이 없거나 표시할 수 없을 때 쓰는 자리표시자.
pub const PLACEHOLDER: &str = "—";

/// 천 단위 구분 기호와 소수점 기호 조합.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    /// 1,234.5
    #[default]
    EnUs,
    /// 1.234,5
    DeDe,
}

impl NumberLocale {
    /// 로케일 문자열(ex: "de-DE", "de_DE.UTF-8", "en-US")에서 형식을 고른다.
    /// 알 수 없는 값은 en-US로 처리한다.
    pub fn from_locale_str(loc: &str) -> Self {
        let lang = loc
            .split(['.', '_', '-'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "de" => NumberLocale::DeDe,
            _ => NumberLocale::EnUs,
        }
    }

    /// 설정값("auto" 포함)을 해석한다. auto면 시스템 로케일을 따른다.
    pub fn resolve(setting: &str) -> Self {
        let s = setting.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            sys_locale::get_locale()
                .map(|loc| Self::from_locale_str(&loc))
                .unwrap_or_default()
        } else {
            Self::from_locale_str(s)
        }
    }

    fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => ',',
            NumberLocale::DeDe => '.',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => '.',
            NumberLocale::DeDe => ',',
        }
    }
}

/// 최대 소수 3자리, 뒤쪽 0 제거, 천 단위 구분 기호를 넣어 표시한다.
pub fn format_grouped(value: f64, locale: NumberLocale) -> String {
    format_digits(value, 0, 3, locale)
}

/// 소수 자릿수를 고정해 천 단위 구분 기호와 함께 표시한다. 값이 없으면 `—`.
pub fn format_fixed(value: Option<f64>, decimals: usize, locale: NumberLocale) -> String {
    match value {
        Some(v) => format_digits(v, decimals, decimals, locale),
        None => PLACEHOLDER.to_string(),
    }
}

/// 정수로 반올림해 천 단위 구분 기호와 함께 표시한다.
pub fn format_int(value: Option<f64>, locale: NumberLocale) -> String {
    format_fixed(value, 0, locale)
}

fn format_digits(value: f64, min_frac: usize, max_frac: usize, locale: NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".into() } else { "-∞".into() };
    }
    let fixed = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');

    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, locale.group_separator()));
    if !frac.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str, sep: char) -> String {
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

/// 통화 금액을 Cr(1e7)/L(1e5)/K(1e3) 단위로 줄여 표시한다.
pub fn format_currency(value: Option<f64>, symbol: &str) -> String {
    let Some(n) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    if n >= 1e7 {
        format!("{symbol}{:.2} Cr", n / 1e7)
    } else if n >= 1e5 {
        format!("{symbol}{:.2} L", n / 1e5)
    } else if n >= 1e3 {
        format!("{symbol}{:.1} K", n / 1e3)
    } else {
        format!("{symbol}{n:.2}")
    }
}

/// 회수기간 표시. 무한대는 "never", NaN은 `—`.
pub fn format_payback(years: f64) -> String {
    if years.is_nan() {
        PLACEHOLDER.to_string()
    } else if years.is_infinite() {
        "never".to_string()
    } else {
        format!("{years:.2} yrs")
    }
}

/// ROI(%) 표시. 유한하지 않으면 `—`.
pub fn format_roi(percent: f64) -> String {
    if percent.is_finite() {
        format!("{percent:.1}%")
    } else {
        PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_field_bounds_like_browser() {
        assert_eq!(format_grouped(500_000.0, NumberLocale::EnUs), "500,000");
        assert_eq!(format_grouped(100_000_000.0, NumberLocale::EnUs), "100,000,000");
        assert_eq!(format_grouped(0.01, NumberLocale::EnUs), "0.01");
        assert_eq!(format_grouped(8760.0, NumberLocale::EnUs), "8,760");
        assert_eq!(format_grouped(50.0, NumberLocale::EnUs), "50");
        assert_eq!(format_grouped(1234.5678, NumberLocale::EnUs), "1,234.568");
    }

    #[test]
    fn german_separators() {
        assert_eq!(format_grouped(1234.5, NumberLocale::DeDe), "1.234,5");
        assert_eq!(format_fixed(Some(1_000_000.0), 2, NumberLocale::DeDe), "1.000.000,00");
    }

    #[test]
    fn negative_and_zero() {
        assert_eq!(format_grouped(-1500.0, NumberLocale::EnUs), "-1,500");
        assert_eq!(format_grouped(-0.0001, NumberLocale::EnUs), "0");
    }

    #[test]
    fn currency_scales() {
        assert_eq!(format_currency(Some(16_000_000.0), "₹"), "₹1.60 Cr");
        assert_eq!(format_currency(Some(250_000.0), "₹"), "₹2.50 L");
        assert_eq!(format_currency(Some(4_560.0), "₹"), "₹4.6 K");
        assert_eq!(format_currency(Some(12.0), "$"), "$12.00");
        assert_eq!(format_currency(None, "₹"), PLACEHOLDER);
        assert_eq!(format_currency(Some(f64::INFINITY), "₹"), PLACEHOLDER);
    }

    #[test]
    fn degenerate_metrics_render_distinctly() {
        assert_eq!(format_payback(f64::INFINITY), "never");
        assert_eq!(format_payback(f64::NAN), PLACEHOLDER);
        assert_eq!(format_payback(1.5), "1.50 yrs");
        assert_eq!(format_roi(7900.0), "7900.0%");
        assert_eq!(format_roi(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn locale_strings() {
        assert_eq!(NumberLocale::from_locale_str("de_DE.UTF-8"), NumberLocale::DeDe);
        assert_eq!(NumberLocale::from_locale_str("ko-KR"), NumberLocale::EnUs);
        assert_eq!(NumberLocale::resolve("de-DE"), NumberLocale::DeDe);
    }
}
