//! Signing identity — an ORCID-style identifier plus an Ed25519 key pair.
//!
//! The profile is fully synchronous and has no storage dependency: the host
//! is responsible for persisting the seed and passing it back on restart.
//! Absence of a profile is representable (`Option<Profile>` in the
//! configuration) and is checked at sign time, not here.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// The identity a nanopublication is signed with.
///
/// The stable public identity is the ORCID-style URI; the key pair backs
/// the cryptographic signature. Ed25519 signatures are deterministic, so a
/// fixed profile and fixed content always produce the same signature — and
/// therefore the same final identifier.
#[derive(Clone)]
pub struct Profile {
    orcid_id: String,
    name: Option<String>,
    signing_key: SigningKey,
}

impl Profile {
    /// Create a profile with a freshly generated key pair.
    pub fn generate(orcid_id: impl Into<String>) -> Self {
        Self {
            orcid_id: orcid_id.into(),
            name: None,
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Restore a profile from a previously saved 32-byte seed.
    pub fn from_seed(orcid_id: impl Into<String>, seed: &[u8; 32]) -> Self {
        Self {
            orcid_id: orcid_id.into(),
            name: None,
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Attach a human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The identity URI publications are attributed to.
    pub fn orcid_id(&self) -> &str {
        &self.orcid_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The raw 32-byte seed. **Keep this secret.** Pass it to
    /// [`from_seed`](Self::from_seed) to restore the same identity.
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// The public key as base64, the form embedded in signature records.
    pub fn public_key(&self) -> String {
        BASE64.encode(self.signing_key.verifying_key().to_bytes())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a payload, returning the raw 64-byte Ed25519 signature.
    pub fn sign(&self, payload: &[u8]) -> [u8; 64] {
        self.signing_key.sign(payload).to_bytes()
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("orcid_id", &self.orcid_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [7u8; 32];

    #[test]
    fn from_seed_is_stable() {
        let a = Profile::from_seed("https://orcid.org/0000-0000-0000-0000", &SEED);
        let b = Profile::from_seed("https://orcid.org/0000-0000-0000-0000", &SEED);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn signing_is_deterministic() {
        let p = Profile::from_seed("https://orcid.org/0000-0000-0000-0000", &SEED);
        assert_eq!(p.sign(b"payload"), p.sign(b"payload"));
    }

    #[test]
    fn generated_profiles_differ() {
        let a = Profile::generate("https://orcid.org/0000-0000-0000-0001");
        let b = Profile::generate("https://orcid.org/0000-0000-0000-0001");
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn debug_does_not_leak_the_key() {
        let p = Profile::from_seed("https://orcid.org/0000-0000-0000-0000", &SEED)
            .with_name("Test User");
        let rendered = format!("{p:?}");
        assert!(rendered.contains("orcid.org"));
        assert!(!rendered.contains("SigningKey"));
    }
}
