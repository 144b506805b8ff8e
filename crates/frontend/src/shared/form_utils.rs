//! Required-field checks for the CRUD forms. Everything else is validated
//! by the server.

pub fn require_text(label: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn require_f64(label: &str, value: &str) -> Result<f64, String> {
    let text = require_text(label, value)?;
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{} must be a number", label))
}

/// Blank means "not set".
pub fn optional_f64(label: &str, value: &str) -> Result<Option<f64>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    require_f64(label, value).map(Some)
}

pub fn require_i64(label: &str, value: &str) -> Result<i64, String> {
    let text = require_text(label, value)?;
    text.parse::<i64>()
        .map_err(|_| format!("{} must be a whole number", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Name", "  Rice ").unwrap(), "Rice");
        assert_eq!(require_text("Name", "   ").unwrap_err(), "Name is required");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(require_f64("Price", "12.5").unwrap(), 12.5);
        assert_eq!(require_f64("Price", "").unwrap_err(), "Price is required");
        assert!(require_f64("Price", "abc").is_err());
        assert!(require_f64("Price", "NaN").is_err());
        assert_eq!(require_i64("Quantity", "7").unwrap(), 7);
        assert!(require_i64("Quantity", "7.5").is_err());
    }

    #[test]
    fn test_optional_f64() {
        assert_eq!(optional_f64("Selling price", " ").unwrap(), None);
        assert_eq!(optional_f64("Selling price", "3").unwrap(), Some(3.0));
        assert!(optional_f64("Selling price", "x").is_err());
    }
}
