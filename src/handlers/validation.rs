// handlers/validation.rs - Request field checks
//
// Mirrors the table constraints so bad input is a 400 with a field name
// instead of a constraint violation from Postgres.

use crate::error::ApiError;

pub const MAX_USER_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_GENRE_NAME_LEN: usize = 100;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// More than three characters, at most 100
pub fn validate_user_name(user_name: &str) -> Result<(), ApiError> {
    let len = user_name.chars().count();
    if len <= 3 {
        return Err(ApiError::invalid_field("user_name", "must be longer than 3 characters"));
    }
    if len > MAX_USER_NAME_LEN {
        return Err(ApiError::invalid_field("user_name", "must be at most 100 characters"));
    }
    Ok(())
}

/// Same shape as `LIKE '%_@_%.__%'`: something, '@', something, '.', two or more
/// characters
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ApiError::invalid_field("email", "must be at most 100 characters"));
    }

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain
                .char_indices()
                .filter(|(_, c)| *c == '.')
                .any(|(i, _)| i > 0 && domain[i + 1..].chars().count() >= 2)
    });

    if valid {
        Ok(())
    } else {
        Err(ApiError::invalid_field("email", "invalid email format"))
    }
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::invalid_field("password", "cannot be empty"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::invalid_field("title", "cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::invalid_field("title", "must be at most 200 characters"));
    }
    Ok(())
}

pub fn validate_duration(duration: Option<i32>) -> Result<(), ApiError> {
    match duration {
        Some(minutes) if minutes < 0 => Err(ApiError::invalid_field("duration", "cannot be negative")),
        _ => Ok(()),
    }
}

pub fn validate_genre_name(genre_name: &str) -> Result<(), ApiError> {
    if genre_name.trim().is_empty() {
        return Err(ApiError::invalid_field("genre_name", "cannot be empty"));
    }
    if genre_name.chars().count() > MAX_GENRE_NAME_LEN {
        return Err(ApiError::invalid_field("genre_name", "must be at most 100 characters"));
    }
    Ok(())
}

pub fn validate_score(score: f64) -> Result<(), ApiError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ApiError::invalid_field("score", "must be between 1.0 and 5.0"));
    }
    Ok(())
}

pub fn validate_review_text(review_text: &str) -> Result<(), ApiError> {
    if review_text.trim().is_empty() {
        return Err(ApiError::invalid_field("review_text", "cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_must_exceed_three_chars() {
        assert!(validate_user_name("bob").is_err());
        assert!(validate_user_name("bobby").is_ok());
        assert!(validate_user_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn email_shape_matches_table_check() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("someone@mail.example.org").is_ok());

        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@.co").is_err());
        assert!(validate_email("a@b.c").is_err());
        assert!(validate_email("a@bco").is_err());
    }

    #[test]
    fn score_range_is_inclusive() {
        assert!(validate_score(1.0).is_ok());
        assert!(validate_score(5.0).is_ok());
        assert!(validate_score(3.5).is_ok());
        assert!(validate_score(0.9).is_err());
        assert!(validate_score(5.1).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }

    #[test]
    fn failures_name_the_field() {
        let err = validate_password("").unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["password"], "cannot be empty");
    }

    #[test]
    fn negative_duration_rejected() {
        assert!(validate_duration(Some(-1)).is_err());
        assert!(validate_duration(Some(0)).is_ok());
        assert!(validate_duration(None).is_ok());
    }
}
