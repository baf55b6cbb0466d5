use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const PASSWORD_MIN_LEN: usize = 8;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Password must be at least 8 characters long");
    }
    Ok(())
}

/// 非空白字符串
pub fn validate_required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(message);
    }
    Ok(())
}

// 分值为正整数
pub fn validate_points(points: Option<i32>) -> Result<(), &'static str> {
    match points {
        Some(p) if p <= 0 => Err("Points must be a positive integer"),
        _ => Ok(()),
    }
}

pub fn validate_grade(grade: i32) -> Result<(), &'static str> {
    if grade < 0 {
        return Err("Grade must be a non-negative integer");
    }
    Ok(())
}

/// 重排列表：非空且 ID 均为正整数
pub fn validate_module_ids(ids: &[i64]) -> Result<(), &'static str> {
    if ids.is_empty() {
        return Err("module_ids_in_order must not be empty");
    }
    if ids.iter().any(|&id| id <= 0) {
        return Err("module_ids_in_order must contain positive integers");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@demo.com").is_ok());
        assert!(validate_email("first.last+tag@school.edu").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("Student123!").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("Week 1", "Title is required").is_ok());
        assert_eq!(
            validate_required("   ", "Title is required"),
            Err("Title is required")
        );
    }

    #[test]
    fn test_points_and_grade() {
        assert!(validate_points(None).is_ok());
        assert!(validate_points(Some(10)).is_ok());
        assert!(validate_points(Some(0)).is_err());
        assert!(validate_points(Some(-5)).is_err());

        assert!(validate_grade(0).is_ok());
        assert!(validate_grade(9).is_ok());
        assert!(validate_grade(-1).is_err());
    }

    #[test]
    fn test_module_ids() {
        assert!(validate_module_ids(&[3, 1, 2]).is_ok());
        assert!(validate_module_ids(&[]).is_err());
        assert!(validate_module_ids(&[1, 0]).is_err());
        assert!(validate_module_ids(&[-4]).is_err());
    }
}
