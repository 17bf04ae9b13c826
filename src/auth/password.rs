use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Constant-time verification via the argon2 primitive. A stored hash that
/// fails to parse verifies false rather than panicking.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_correct_password() {
        let hash = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("admin123").unwrap();
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn verify_rejects_garbage_stored_hash() {
        assert!(!verify_password("admin123", "not-a-phc-hash"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("admin123").unwrap();
        let b = hash_password("admin123").unwrap();
        assert_ne!(a, b);
    }
}
