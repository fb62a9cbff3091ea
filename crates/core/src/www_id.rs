//! Public event identifiers ("www ids").
//!
//! Guests reach an event through a short code such as `TK91513` embedded in
//! every public URL: two uppercase ASCII letters followed by five digits.

use rand::Rng;

use crate::error::CoreError;

pub const LETTER_COUNT: usize = 2;
pub const DIGIT_COUNT: usize = 5;
pub const WWW_ID_LEN: usize = LETTER_COUNT + DIGIT_COUNT;

/// Attempts the repository makes before giving up on a unique id.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Generate a random public identifier.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let mut id = String::with_capacity(WWW_ID_LEN);
    for _ in 0..LETTER_COUNT {
        id.push(char::from(rng.random_range(b'A'..=b'Z')));
    }
    for _ in 0..DIGIT_COUNT {
        id.push(char::from(rng.random_range(b'0'..=b'9')));
    }
    id
}

/// Uppercase and trim user-typed input.
pub fn normalize(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

pub fn is_valid(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == WWW_ID_LEN
        && bytes[..LETTER_COUNT].iter().all(u8::is_ascii_uppercase)
        && bytes[LETTER_COUNT..].iter().all(u8::is_ascii_digit)
}

/// Normalize and validate, returning the canonical form.
pub fn parse(input: &str) -> Result<String, CoreError> {
    let id = normalize(input);
    if !is_valid(&id) {
        return Err(CoreError::Validation(format!(
            "'{input}' is not a valid event code"
        )));
    }
    Ok(id)
}
