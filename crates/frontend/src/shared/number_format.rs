//! Утилиты форматирования чисел и сумм

/// Currency shown next to every money value.
pub const CURRENCY: &str = "TZS";

/// Форматирует число с разделителем тысяч (запятая) и указанным количеством знаков после точки
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Запятая каждые 3 цифры с конца целой части
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: 2 знака и разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// "TZS 1,234.56"
pub fn format_tzs(value: f64) -> String {
    format!("{} {}", CURRENCY, format_money(value))
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: i64) -> String {
    format_number_with_decimals(value as f64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_money(999.999), "1,000.00");
    }

    #[test]
    fn test_format_tzs() {
        assert_eq!(format_tzs(1500.0), "TZS 1,500.00");
        assert_eq!(format_tzs(-20.0), "TZS -20.00");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(0), "0");
        assert_eq!(format_number_int(123), "123");
        assert_eq!(format_number_int(1234567), "1,234,567");
        assert_eq!(format_number_int(-1000), "-1,000");
    }
}
