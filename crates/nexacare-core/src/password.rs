//! Password hashing for account credentials.
//!
//! Passwords are stored as salted PBKDF2-SHA256 digests in a
//! self-describing `pbkdf2-sha256$<iterations>$<salt>$<digest>` string,
//! never as plaintext. Verification is constant-time.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
pub const SALT_LENGTH: usize = 16;
pub const DIGEST_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    encode(password, &salt, PBKDF2_ITERATIONS)
}

/// Verify a password against a stored hash string. Returns false for
/// malformed hashes rather than erroring; a corrupted credential row is
/// a failed login, not a crash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (scheme, iterations, salt_hex, digest_hex) = match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some(s), Some(i), Some(salt), Some(digest), None) => (s, i, salt, digest),
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }
    let iterations: u32 = match iterations.parse() {
        Ok(n) => n,
        Err(_) => return false,
    };
    let salt = match hex::decode(salt_hex) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let expected = match hex::decode(digest_hex) {
        Ok(d) => d,
        Err(_) => return false,
    };

    let mut digest = [0u8; DIGEST_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut digest);
    digest.ct_eq(&expected).into()
}

fn encode(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut digest = [0u8; DIGEST_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut digest);
    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(digest)
    )
}

fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
