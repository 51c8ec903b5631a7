//! Access key helpers (generate/hash/verify keys for service users).
//!
//! Keys are provisioned out-of-band: the raw key is handed to the user once,
//! only the argon2 hash and a lookup prefix are stored on the `users` row.

use postroom_core::AppError;

/// Prefix carried by every issued access key.
pub const ACCESS_KEY_PREFIX: &str = "pr_live_";

/// Generate a secure access key
#[allow(dead_code)] // Used by provisioning tooling and test helpers
pub fn generate_access_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..20).map(|_| rng.random()).collect();
    let random_part = hex::encode(random_bytes);

    // Format: pr_live_<40 hex chars>
    format!("{}{}", ACCESS_KEY_PREFIX, random_part)
}

/// Hash an access key for storage
#[allow(dead_code)] // Used by provisioning tooling and test helpers
pub fn hash_access_key(key: &str) -> Result<String, AppError> {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2,
    };

    use rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash access key: {}", e)))
}

/// Verify an access key against a stored hash.
pub fn verify_access_key(key: &str, hash: &str) -> Result<bool, AppError> {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(key.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Extract the key prefix (first 16 chars) for identification.
pub fn extract_key_prefix(key: &str) -> String {
    if key.len() > 16 {
        key[..16].to_string()
    } else {
        key.to_string()
    }
}
