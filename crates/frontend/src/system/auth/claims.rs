//! Unverified reading of JWT claims.
//!
//! The payload is only used for display hints (username, admin links).
//! Signature checks and authorization stay on the server.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use contracts::system::auth::TokenClaims;

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| log::debug!("token payload is not base64url: {}", e))
        .ok()?;
    serde_json::from_slice(&bytes)
        .map_err(|e| log::debug!("token payload is not JSON claims: {}", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(json: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(json)
        )
    }

    #[test]
    fn test_decodes_admin_claims() {
        let token =
            token_with_payload(r#"{"user_id":1,"username":"boss","is_admin":true,"exp":1700000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.username.as_deref(), Some("boss"));
        assert!(claims.is_admin);
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let claims = decode_claims(&token_with_payload(r#"{"user_id":5}"#)).unwrap();
        assert!(!claims.is_admin);
        assert!(claims.username.is_none());
    }

    #[test]
    fn test_garbage_token() {
        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("a.%%%.c").is_none());
    }
}
