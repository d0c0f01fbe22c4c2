// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava webhook subscription handshake.

use crate::error::AppError;
use subtle::ConstantTimeEq;

/// Validate a subscription request and return the challenge to echo.
///
/// Missing parameters are treated as a mismatch, as is an empty configured
/// secret.
pub fn validate_subscription(
    mode: Option<&str>,
    verify_token: Option<&str>,
    challenge: Option<&str>,
    secret: &str,
) -> Result<String, AppError> {
    let (Some(mode), Some(verify_token), Some(challenge)) = (mode, verify_token, challenge) else {
        return Err(AppError::ValidationFailure);
    };

    let token_matches =
        !secret.is_empty() && bool::from(verify_token.as_bytes().ct_eq(secret.as_bytes()));

    if mode == "subscribe" && token_matches {
        Ok(challenge.to_string())
    } else {
        Err(AppError::ValidationFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handshake_echoes_challenge() {
        for challenge in ["15f7d1a91c1f40f8a748fd134752feb3", "", "with spaces & symbols"] {
            let result =
                validate_subscription(Some("subscribe"), Some("s3cret"), Some(challenge), "s3cret");
            assert_eq!(result.unwrap(), challenge);
        }
    }

    #[test]
    fn test_wrong_token_rejected() {
        let result = validate_subscription(Some("subscribe"), Some("nope"), Some("c"), "s3cret");
        assert!(matches!(result, Err(AppError::ValidationFailure)));
    }

    #[test]
    fn test_wrong_mode_rejected() {
        let result = validate_subscription(Some("unsubscribe"), Some("s3cret"), Some("c"), "s3cret");
        assert!(matches!(result, Err(AppError::ValidationFailure)));
    }

    #[test]
    fn test_missing_params_rejected() {
        assert!(validate_subscription(None, Some("s3cret"), Some("c"), "s3cret").is_err());
        assert!(validate_subscription(Some("subscribe"), None, Some("c"), "s3cret").is_err());
        assert!(validate_subscription(Some("subscribe"), Some("s3cret"), None, "s3cret").is_err());
    }

    #[test]
    fn test_empty_secret_never_validates() {
        assert!(validate_subscription(Some("subscribe"), Some(""), Some("c"), "").is_err());
    }
}
