//! 密码散列
//!
//! Argon2id 散列与校验。散列失败向上传播，校验失败一律视为密码不匹配。

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::utils::error::AppError;

/// 散列明文密码
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))
}

/// 校验明文密码与存储的散列
///
/// 损坏或非 Argon2 格式的散列不报错，按不匹配处理。
pub fn verify_password(stored_hash: &str, plaintext: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
