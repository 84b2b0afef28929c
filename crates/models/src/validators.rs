//! Input validation helpers shared across document models.

use crate::errors::ModelError;

/// Email check: one `@`, no whitespace, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Turkish phone numbers: 90 + 10 digits, 0 + 10 digits, or a bare
/// 10-digit mobile starting with 5. Separators and a leading `+` are
/// stripped before checking.
pub fn is_valid_turkish_phone(phone: &str) -> bool {
    let clean: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '+' | '-'))
        .collect();
    if clean.is_empty() || !clean.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if clean.starts_with("90") {
        clean.len() == 12
    } else if clean.starts_with('0') {
        clean.len() == 11
    } else if clean.starts_with('5') {
        clean.len() == 10
    } else {
        false
    }
}

/// Turkish tax numbers are exactly 10 digits.
pub fn is_valid_tax_number(tax_number: &str) -> bool {
    tax_number.len() == 10 && tax_number.bytes().all(|b| b.is_ascii_digit())
}

/// At least 8 characters with one lowercase, one uppercase and one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_positive_number(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Optional text fields treat the empty string as absent.
pub fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Collects missing required fields so the error can name all of them at once.
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self { missing: Vec::new() }
    }

    /// Marks `name` missing when the value is absent or empty; returns the
    /// value otherwise.
    pub fn check<'a>(&mut self, name: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        match value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.missing.push(name);
                None
            }
        }
    }

    /// Marks `name` missing when a non-string field is absent.
    pub fn check_present<T: Copy>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    pub fn finish(self) -> Result<(), ModelError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(format!(
                "{} alanları zorunludur",
                self.missing.join(", ")
            )))
        }
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_dotted_domains_only() {
        assert!(is_valid_email("depo@ornek.com"));
        assert!(is_valid_email("a.b@ornek.com.tr"));
        assert!(!is_valid_email("depo@ornek"));
        assert!(!is_valid_email("depo ornek@x.com"));
        assert!(!is_valid_email("@ornek.com"));
        assert!(!is_valid_email("depo@.com"));
    }

    #[test]
    fn phone_accepts_known_turkish_shapes() {
        assert!(is_valid_turkish_phone("05551234567"));
        assert!(is_valid_turkish_phone("5551234567"));
        assert!(is_valid_turkish_phone("+90 555 123 45 67"));
        assert!(is_valid_turkish_phone("0 (555) 123-45-67"));
        assert!(!is_valid_turkish_phone("1234567"));
        assert!(!is_valid_turkish_phone("055512345"));
        assert!(!is_valid_turkish_phone("555 123 45 6a"));
    }

    #[test]
    fn tax_number_is_ten_digits() {
        assert!(is_valid_tax_number("1234567890"));
        assert!(!is_valid_tax_number("123456789"));
        assert!(!is_valid_tax_number("12345678901"));
        assert!(!is_valid_tax_number("12345678x0"));
    }

    #[test]
    fn password_strength_rules() {
        assert!(is_strong_password("Passw0rd"));
        assert!(!is_strong_password("short1A"));
        assert!(!is_strong_password("alllowercase1"));
        assert!(!is_strong_password("ALLUPPERCASE1"));
        assert!(!is_strong_password("NoDigitsHere"));
    }

    #[test]
    fn required_fields_lists_all_missing_names() {
        let mut req = RequiredFields::new();
        req.check("firma_ad", None);
        req.check("firma_telefon", Some(""));
        req.check("firma_vergi_no", Some("1234567890"));
        let err = req.finish().unwrap_err();
        assert_eq!(err.to_string(), "firma_ad, firma_telefon alanları zorunludur");
    }
}
