//! Bearer-token secret generation and plaintext formatting.
//!
//! Plaintext tokens look like `"<token_id>|<secret>"`. Clients must treat the
//! whole string as opaque.

use base64::Engine as _;

use crate::error::AppError;

/// Number of random bytes in a secret before base64 encoding.
const SECRET_LENGTH_BYTES: usize = 32;

/// Separator between the token ID and the secret.
pub const TOKEN_SEPARATOR: char = '|';

/// Generates a cryptographically secure random secret.
///
/// Encoded as URL-safe base64 without padding, producing 43 characters that
/// never contain [`TOKEN_SEPARATOR`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_secret() -> Result<String, AppError> {
    let mut buffer = [0u8; SECRET_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        tracing::error!(error = %e, "System RNG failure");
        AppError::internal("Failed to generate token")
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Builds the plaintext handed to the client.
pub fn format_plain_text(token_id: i64, secret: &str) -> String {
    format!("{token_id}{TOKEN_SEPARATOR}{secret}")
}

/// Splits a presented token into its optional ID prefix and the secret.
///
/// A token without a separator is treated as a bare secret. Returns `None`
/// when the prefix is not a number.
pub fn split_plain_text(presented: &str) -> Option<(Option<i64>, &str)> {
    match presented.split_once(TOKEN_SEPARATOR) {
        Some((id, secret)) => id.parse::<i64>().ok().map(|id| (Some(id), secret)),
        None => Some((None, presented)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_secret_length_and_alphabet() {
        let secret = generate_secret().unwrap();

        assert_eq!(secret.len(), 43);
        assert!(
            secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert!(!secret.contains(TOKEN_SEPARATOR));
    }

    #[test]
    fn test_generate_secret_unique() {
        let secrets: HashSet<_> = (0..500).map(|_| generate_secret().unwrap()).collect();
        assert_eq!(secrets.len(), 500);
    }

    #[test]
    fn test_format_and_split() {
        let plain = format_plain_text(42, "abc");
        assert_eq!(plain, "42|abc");
        assert_eq!(split_plain_text(&plain), Some((Some(42), "abc")));
    }

    #[test]
    fn test_split_bare_secret() {
        assert_eq!(split_plain_text("abcdef"), Some((None, "abcdef")));
    }

    #[test]
    fn test_split_rejects_non_numeric_prefix() {
        assert!(split_plain_text("x|abcdef").is_none());
        assert!(split_plain_text("|abcdef").is_none());
    }
}
