//! 认证模块
//!
//! JWT 令牌签发与验证、Argon2 密码散列、认证/角色中间件。

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{ADMIN_ONLY, require_auth, require_role};
pub use password::{hash_password, verify_password};
