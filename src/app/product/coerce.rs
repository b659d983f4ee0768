//! 宽松的字段类型转换
//!
//! 请求中的字段可能是 JSON 数字、字符串或布尔值，表单请求中则全部是字符串。
//! 这里的解析只读取开头合法的部分：`"9.99kg"` 得到 `9.99`，`"5 pcs"` 得到 `5`，
//! 完全无法解析时价格为 NaN、库存为 `None`。

use serde::Deserialize;

/// 请求中的单个字段值
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// 真值判断：`false`、`0`、NaN 和空字符串为假
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Flag(flag) => *flag,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// 转为字符串，数字和布尔值取其文本形式
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Flag(flag) => flag.to_string(),
            FieldValue::Number(n) => number_to_text(*n),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// 转为浮点数，无法解析时为 NaN
    pub fn to_float(&self) -> f64 {
        match self {
            FieldValue::Flag(_) => f64::NAN,
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => parse_float(s),
        }
    }

    /// 转为整数，数字先转为文本再取整数前缀（`5.7` 得到 5，`1e21` 得到 1）
    pub fn to_int(&self) -> Option<i64> {
        match self {
            FieldValue::Flag(_) => None,
            FieldValue::Number(n) => parse_int(&number_to_text(*n)),
            FieldValue::Text(s) => parse_int(s),
        }
    }
}

/// 解析字符串开头的浮点数
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // 指数部分后面至少要有一位数字
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// 解析字符串开头的整数，支持 `0x` 前缀的十六进制
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let len = digits
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }

    let value = i64::from_str_radix(&digits[..len], radix).ok()?;
    Some(if negative { -value } else { value })
}

/// 数字的文本形式
///
/// 绝对值不小于 1e21 或小于 1e-6 时使用指数形式，正指数带 `+` 号（`1e+21`）。
pub fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("9.99"), 9.99);
        assert_eq!(parse_float("  9.99kg"), 9.99);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("7."), 7.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int("5"), Some(5));
        assert_eq!(parse_int(" 42 items"), Some(42));
        assert_eq!(parse_int("3abc"), Some(3));
        assert_eq!(parse_int("7.9"), Some(7));
        assert_eq!(parse_int("-12"), Some(-12));
        assert_eq!(parse_int("0x1A"), Some(26));
        assert_eq!(parse_int("search"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_field_value_truthiness() {
        assert!(FieldValue::Text("3".into()).is_truthy());
        assert!(FieldValue::Text("0".into()).is_truthy());
        assert!(!FieldValue::Text(String::new()).is_truthy());
        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(!FieldValue::Number(f64::NAN).is_truthy());
        assert!(FieldValue::Number(-1.0).is_truthy());
        assert!(!FieldValue::Flag(false).is_truthy());
        assert!(FieldValue::Flag(true).is_truthy());
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::Text("9.99".into()).to_float(), 9.99);
        assert_eq!(FieldValue::Number(4.5).to_float(), 4.5);
        assert!(FieldValue::Flag(true).to_float().is_nan());

        assert_eq!(FieldValue::Text("5".into()).to_int(), Some(5));
        assert_eq!(FieldValue::Number(5.7).to_int(), Some(5));
        assert_eq!(FieldValue::Text("many".into()).to_int(), None);
        assert_eq!(FieldValue::Flag(true).to_int(), None);

        assert_eq!(FieldValue::Number(5.0).to_text(), "5");
        assert_eq!(FieldValue::Number(1e21).to_text(), "1e+21");
        assert_eq!(FieldValue::Flag(false).to_text(), "false");
    }

    #[test]
    fn test_number_to_text() {
        assert_eq!(number_to_text(42.0), "42");
        assert_eq!(number_to_text(-0.0), "0");
        assert_eq!(number_to_text(9.99), "9.99");
        assert_eq!(number_to_text(0.000001), "0.000001");
        assert_eq!(number_to_text(1e21), "1e+21");
        assert_eq!(number_to_text(-2.5e22), "-2.5e+22");
        assert_eq!(number_to_text(1.5e-7), "1.5e-7");
        assert_eq!(number_to_text(f64::NAN), "NaN");
        assert_eq!(number_to_text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_large_and_tiny_numbers_to_int() {
        assert_eq!(FieldValue::Number(1e21).to_int(), Some(1));
        assert_eq!(FieldValue::Number(1.5e-7).to_int(), Some(1));
        assert_eq!(FieldValue::Number(-3.9).to_int(), Some(-3));
        assert_eq!(FieldValue::Number(f64::INFINITY).to_int(), None);
        assert_eq!(FieldValue::Number(f64::NAN).to_int(), None);
    }

    #[test]
    fn test_field_value_deserialize() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 12, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Flag(true),
                FieldValue::Number(12.0),
                FieldValue::Number(1.5),
                FieldValue::Text("x".into()),
            ]
        );
    }
}
