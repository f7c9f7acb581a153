//! Random password generation for admin-created member accounts.

use rand::Rng;

/// Default length of generated member passwords.
pub const GENERATED_PASSWORD_LEN: usize = 16;

const CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+[]{}|;:,.<>?";

/// Generate a random password of the given length from the mixed charset.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_password(GENERATED_PASSWORD_LEN).len(), 16);
        assert_eq!(generate_password(32).len(), 32);
    }

    #[test]
    fn draws_from_the_charset() {
        let password = generate_password(64);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn consecutive_passwords_differ() {
        assert_ne!(generate_password(16), generate_password(16));
    }
}
