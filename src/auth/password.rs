//! bcrypt runs on the blocking pool so a slow hash never stalls the executor.

use crate::core::errors::ClinicError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, ClinicError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ClinicError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| ClinicError::Internal(format!("Password hashing error: {}", e)))
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, ClinicError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| ClinicError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| ClinicError::Internal(format!("Password verification error: {}", e)))
}
