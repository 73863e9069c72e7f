//! JWT Extractor
//!
//! Custom extractor for automatically validating JWT tokens

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{Claims, JwtService};
use crate::core::AppState;
use crate::db::models::Role;
use crate::security_log;

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 用户名
    pub username: String,
    /// 角色
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims.role.parse::<Role>()?;
        Ok(Self {
            id: claims.sub,
            username: claims.username,
            role,
        })
    }
}

impl CurrentUser {
    /// 是否管理员
    ///
    /// 管理员角色拥有所有权限
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 角色是否在允许列表中 (管理员始终放行)
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.is_admin() || allowed.contains(&self.role)
    }
}

/// JWT Auth Extractor
///
/// Use this extractor in protected handlers to automatically validate JWT
/// and extract CurrentUser
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        // Validate token
        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::try_from(claims)
                    .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

                // Store in extensions for potential reuse
                parts.extensions.insert(user.clone());

                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "u1".to_string(),
            username: "alice".to_string(),
            role: role.to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: "mesa".to_string(),
            aud: "mesa-clients".to_string(),
        }
    }

    #[test]
    fn test_current_user_from_claims() {
        let user = CurrentUser::try_from(claims("waiter")).unwrap();
        assert_eq!(user.role, Role::Waiter);
        assert!(!user.is_admin());
        assert!(user.has_role(&[Role::Waiter]));
        assert!(!user.has_role(&[Role::Kitchen]));
    }

    #[test]
    fn test_admin_passes_every_gate() {
        let user = CurrentUser::try_from(claims("admin")).unwrap();
        assert!(user.has_role(&[Role::Waiter]));
        assert!(user.has_role(&[Role::Kitchen]));
        assert!(user.has_role(crate::auth::ADMIN_ONLY));
    }

    #[test]
    fn test_admin_only_gate_excludes_staff_roles() {
        let waiter = CurrentUser::try_from(claims("waiter")).unwrap();
        let kitchen = CurrentUser::try_from(claims("kitchen")).unwrap();
        assert!(!waiter.has_role(crate::auth::ADMIN_ONLY));
        assert!(!kitchen.has_role(crate::auth::ADMIN_ONLY));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(CurrentUser::try_from(claims("intern")).is_err());
    }
}
