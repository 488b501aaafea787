use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Authenticated caller context, built once by the JWT middleware and passed
/// explicitly to every operation that needs it.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub role: String,
    /// The alumni number this account is linked to, or the user id rendered
    /// as a string when no alumni link exists. Always non-empty for a token
    /// we issued ourselves.
    pub identity_key: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        let identity_key = match claims.number {
            Some(number) if !number.is_empty() => number,
            _ => claims.sub.to_string(),
        };
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            identity_key,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("authentication context is incomplete")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
}

/// Decide whether `principal` may mutate employment records owned by
/// `target_owner_key`. Pure decision function; rules are evaluated in order
/// and the first match wins:
///
/// 1. missing role or identity key -> Unauthenticated
/// 2. admin -> allowed, unconditionally
/// 3. user  -> allowed iff the identity key equals the owner key exactly
/// 4. any other role -> Forbidden
pub fn authorize(principal: &Principal, target_owner_key: &str) -> Result<(), AccessError> {
    if principal.role.is_empty() || principal.identity_key.is_empty() {
        return Err(AccessError::Unauthenticated);
    }

    match principal.role.as_str() {
        ROLE_ADMIN => Ok(()),
        ROLE_USER => {
            if principal.identity_key == target_owner_key {
                Ok(())
            } else {
                Err(AccessError::Forbidden(
                    "Access denied: you may only modify your own records".to_string(),
                ))
            }
        }
        other => Err(AccessError::Forbidden(format!(
            "Access denied: role '{}' is not recognized",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: &str, identity_key: &str) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            role: role.to_string(),
            identity_key: identity_key.to_string(),
        }
    }

    #[test]
    fn admin_is_allowed_for_any_owner() {
        let p = principal(ROLE_ADMIN, "9999");
        assert!(authorize(&p, "1001").is_ok());
        assert!(authorize(&p, "2002").is_ok());
        assert!(authorize(&p, "").is_ok());
    }

    #[test]
    fn user_is_allowed_only_for_own_key() {
        let p = principal(ROLE_USER, "1001");
        assert!(authorize(&p, "1001").is_ok());
        assert_eq!(
            authorize(&p, "2002"),
            Err(AccessError::Forbidden(
                "Access denied: you may only modify your own records".to_string()
            ))
        );
    }

    #[test]
    fn user_match_is_case_sensitive() {
        let p = principal(ROLE_USER, "A100");
        assert!(authorize(&p, "A100").is_ok());
        assert!(matches!(
            authorize(&p, "a100"),
            Err(AccessError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_role_or_identity_is_unauthenticated() {
        assert_eq!(
            authorize(&principal("", "1001"), "1001"),
            Err(AccessError::Unauthenticated)
        );
        assert_eq!(
            authorize(&principal(ROLE_USER, ""), "1001"),
            Err(AccessError::Unauthenticated)
        );
        // Applies even to admin: the identity check comes first
        assert_eq!(
            authorize(&principal(ROLE_ADMIN, ""), "1001"),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn unknown_role_is_forbidden() {
        let p = principal("superuser", "1001");
        assert!(matches!(authorize(&p, "1001"), Err(AccessError::Forbidden(_))));
    }

    #[test]
    fn principal_from_claims_falls_back_to_user_id() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id,
            username: "admin".to_string(),
            role: ROLE_ADMIN.to_string(),
            number: None,
            exp: 0,
            iat: 0,
        };
        let p = Principal::from(claims);
        assert_eq!(p.identity_key, id.to_string());

        let claims = Claims {
            sub: id,
            username: "alum".to_string(),
            role: ROLE_USER.to_string(),
            number: Some("1001".to_string()),
            exp: 0,
            iat: 0,
        };
        assert_eq!(Principal::from(claims).identity_key, "1001");
    }
}
