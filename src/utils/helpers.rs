//! Helper functions and utilities
//! 
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;

/// Number of digits in a CPF (individual taxpayer id)
pub const CPF_LEN: usize = 11;

/// Number of digits in a CNPJ (company taxpayer id)
pub const CNPJ_LEN: usize = 14;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Strip punctuation from a document number ("123.456.789-09" -> "12345678909")
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a CPF, returning `None` unless exactly 11 digits remain
pub fn normalize_cpf(cpf: &str) -> Option<String> {
    normalize_document(cpf, CPF_LEN)
}

/// Normalize a CNPJ, returning `None` unless exactly 14 digits remain
pub fn normalize_cnpj(cnpj: &str) -> Option<String> {
    normalize_document(cnpj, CNPJ_LEN)
}

fn normalize_document(text: &str, expected_len: usize) -> Option<String> {
    // Reject letters outright rather than silently dropping them
    if text.chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    let digits = digits_only(text);
    (digits.len() == expected_len).then_some(digits)
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Widest phone accepted by the `participants.phone` column
pub const MAX_PHONE_LEN: usize = 20;

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() <= MAX_PHONE_LEN
        && phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
        && digits_only(phone).len() >= 10
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether a required text field is blank
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Calculate pagination offset
pub fn calculate_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(0))
}

/// Clamp requested paging to sane bounds
pub fn clamp_paging(page: Option<i64>, page_size: Option<i64>, default_size: i64, max_size: i64) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(default_size).clamp(1, max_size);
    (page, page_size)
}

/// Format an amount in cents as a decimal string ("123456" -> "1234.56")
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cpf() {
        assert_eq!(normalize_cpf("123.456.789-09").as_deref(), Some("12345678909"));
        assert_eq!(normalize_cpf("12345678909").as_deref(), Some("12345678909"));
        assert_eq!(normalize_cpf("1234567890"), None);
        assert_eq!(normalize_cpf("1234567890a"), None);
    }

    #[test]
    fn test_normalize_cnpj() {
        assert_eq!(normalize_cnpj("12.345.678/0001-90").as_deref(), Some("12345678000190"));
        assert_eq!(normalize_cnpj("123"), None);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+55 (11) 98765-4321"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
        assert!(is_valid_phone("+55 (011) 98765-4321"));
        assert!(!is_valid_phone("+55 (011) 98765-43210"));
    }

    #[test]
    fn test_paging() {
        assert_eq!(clamp_paging(None, None, 10, 100), (1, 10));
        assert_eq!(clamp_paging(Some(0), Some(500), 10, 100), (1, 100));
        assert_eq!(calculate_offset(3, 10), 20);
        assert_eq!(calculate_offset(0, 10), 0);
        assert_eq!(calculate_offset(i64::MAX, 10), i64::MAX);
        assert_eq!(calculate_offset(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(clamp_paging(Some(i64::MAX), Some(i64::MAX), 10, 100), (i64::MAX, 100));
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(123456), "1234.56");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-250), "-2.50");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Ana   Maria  Silva "), "Ana Maria Silva");
    }
}
