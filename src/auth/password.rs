use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Argon2id with the work factor taken from config. The parameters are
/// embedded in the PHC string, so verification does not need them again.
pub fn hash_password(
    password: &str,
    memory_kib: u32,
    time_cost: u32,
) -> Result<String, AppError> {
    let params = Params::new(memory_kib, time_cost, 1, None).map_err(|e| {
        tracing::error!(error = %e, "Invalid argon2 parameters");
        AppError::internal()
    })?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::internal()
        })
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        // small work factor to keep the test fast
        let hashed = hash_password("secret1", 8, 1).unwrap();
        assert!(verify_password("secret1", &hashed));
        assert!(!verify_password("secret2", &hashed));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
    }
}
