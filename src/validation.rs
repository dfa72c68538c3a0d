//! Pregen identifier validation
//!
//! Normalizes identifiers before they are used as store keys so that
//! `@Alice` and `alice` reserve the same Twitter wallet.

use crate::types::IdentifierType;

pub const MAX_IDENTIFIER_LEN: usize = 255;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Identifier is empty")]
    Empty,

    #[error("Identifier exceeds 255 characters")]
    TooLong,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone number: {0} (expected E.164, e.g. +15555550100)")]
    InvalidPhone(String),

    #[error("Invalid {kind} handle: {handle}")]
    InvalidHandle { kind: IdentifierType, handle: String },

    #[error("Invalid custom id: {0}")]
    InvalidCustomId(String),
}

/// Validate and normalize a pregen identifier
///
/// # Returns
///
/// The canonical form used as the wallet store key
pub fn normalize_identifier(
    raw: &str,
    identifier_type: IdentifierType,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong);
    }

    match identifier_type {
        IdentifierType::Email => normalize_email(trimmed),
        IdentifierType::Phone => normalize_phone(trimmed),
        IdentifierType::Twitter => normalize_handle(trimmed, identifier_type, 1, 15, false),
        IdentifierType::Telegram => normalize_handle(trimmed, identifier_type, 5, 32, false),
        IdentifierType::Discord => normalize_handle(trimmed, identifier_type, 2, 32, true),
        IdentifierType::CustomId => {
            if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
                Err(ValidationError::InvalidCustomId(trimmed.to_string()))
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let lower = email.to_lowercase();
    let invalid = || ValidationError::InvalidEmail(email.to_string());

    let (local, domain) = lower.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || lower.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(lower)
}

fn normalize_phone(phone: &str) -> Result<String, ValidationError> {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let digits = compact
        .strip_prefix('+')
        .ok_or_else(|| ValidationError::InvalidPhone(phone.to_string()))?;

    let valid = (7..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');

    if valid {
        Ok(compact)
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}

fn normalize_handle(
    handle: &str,
    kind: IdentifierType,
    min_len: usize,
    max_len: usize,
    allow_dot: bool,
) -> Result<String, ValidationError> {
    let stripped = handle.strip_prefix('@').unwrap_or(handle).to_lowercase();

    let valid = (min_len..=max_len).contains(&stripped.len())
        && stripped
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || (allow_dot && c == '.'));

    if valid {
        Ok(stripped)
    } else {
        Err(ValidationError::InvalidHandle {
            kind,
            handle: handle.to_string(),
        })
    }
}
