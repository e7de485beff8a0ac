use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Stand-in hash checked when the account does not exist, so a login for
    /// an unknown email costs the same argon2 work as a wrong password.
    static ref DECOY_HASH: Option<String> =
        hash_sync(b"decoy password for unknown accounts").ok();
}

fn hash_sync(plain: &[u8]) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!("password hashing failed: {e}")
        })
}

fn matches_sync(plain: &[u8], stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow::anyhow!("malformed password hash: {e}")
    })?;
    Ok(Argon2::default().verify_password(plain, &parsed).is_ok())
}

/// Hashes with a fresh salt. Runs on the blocking pool.
pub async fn hash_password(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_sync(plain.as_bytes())).await?
}

/// Checks `plain` against a stored PHC string. Runs on the blocking pool.
pub async fn verify_password(plain: String, stored: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || matches_sync(plain.as_bytes(), &stored)).await?
}

/// Spends one verification against the decoy hash. Always `false`.
pub async fn verify_decoy(plain: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        if let Some(decoy) = DECOY_HASH.as_deref() {
            matches_sync(plain.as_bytes(), decoy)?;
        }
        Ok(false)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_hash_accepts_only_its_password() {
        let stored = hash_password("pw123456".into()).await.expect("hash");
        assert!(stored.starts_with("$argon2"));
        assert!(verify_password("pw123456".into(), stored.clone())
            .await
            .expect("verify"));
        assert!(!verify_password("pw1234567".into(), stored).await.expect("verify"));
    }

    #[tokio::test]
    async fn each_hash_gets_its_own_salt() {
        let a = hash_password("hunter22".into()).await.expect("hash");
        let b = hash_password("hunter22".into()).await.expect("hash");
        assert_ne!(a, b);
        assert!(!a.contains("hunter22"));
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("anything".into(), "plaintext?".into())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn decoy_never_matches() {
        assert!(DECOY_HASH.is_some());
        for guess in ["", "decoy password for unknown accounts", "analytical"] {
            assert!(!verify_decoy(guess.into()).await.expect("decoy"));
        }
    }
}
