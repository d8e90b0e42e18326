//! Password hashing. bcrypt is CPU-bound, so both operations run on the
//! blocking pool.

use taskflow_common::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with bcrypt at the default cost.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

    match result {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();
        assert_ne!(hash, "correct horse");
        assert!(
            verify_password("correct horse".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !verify_password("battery staple".to_string(), hash)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        assert!(
            !verify_password("anything".to_string(), "not-a-bcrypt-hash".to_string())
                .await
                .unwrap()
        );
    }
}
