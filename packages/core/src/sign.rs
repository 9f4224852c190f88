//! Signing engine — validation, two-phase canonicalization, signature, and
//! identifier finalization.
//!
//! [`sign`] drives the `unsigned → signed` transition: guard checks, a
//! first canonicalization of the document *without* a signature record, the
//! Ed25519 signature over those bytes, a second canonicalization with the
//! record included, and the rewrite of every placeholder reference to the
//! final identifier. The rewritten store is validated before anything is
//! committed, so a failing pipeline leaves the document untouched.
//!
//! [`verify_signature`] is the inverse check: it reconstructs the signed
//! byte sequence from a finalized document and verifies the embedded
//! signature against the embedded public key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

use crate::namespaces::{
    FINAL_URI_PREFIX, MAX_STATEMENTS, NPX_HAS_ALGORITHM, NPX_HAS_PUBLIC_KEY, NPX_HAS_SIGNATURE,
    NPX_HAS_SIGNATURE_TARGET,
};
use crate::nanopub::{validate_parts, Nanopub, ValidationError};
use crate::rdf::{Literal, Quad, QuadStore, Term};
use crate::trusty::{canonical_string, make_trusty, replace_in_store};

/// Name of the signature algorithm recorded in the document.
pub const SIGNATURE_ALGORITHM: &str = "Ed25519";

/// Errors returned by [`sign`].
#[derive(Debug, Error)]
pub enum SignError {
    /// The document already carries a final identifier; signing is a
    /// terminal, one-time transition.
    #[error("nanopublication is already signed as {0}")]
    AlreadySigned(String),

    /// The document exceeds the statement ceiling.
    #[error("nanopublication contains {count} statements, more than the {limit} allowed")]
    TooLarge { count: usize, limit: usize },

    /// No signing identity is configured.
    #[error("no profile available, cannot sign the nanopublication")]
    MissingProfile,

    /// The document violates a structural invariant, before or after
    /// finalization.
    #[error("nanopublication is not well-formed: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors returned by [`verify_signature`].
#[derive(Debug, Error, PartialEq)]
pub enum VerifyError {
    #[error("nanopublication is not signed")]
    NotSigned,

    #[error("no signature record found under {0}")]
    MissingRecord(String),

    #[error("signature record decoding failed: {0}")]
    DecodingFailed(String),

    #[error("signature verification failed")]
    VerificationFailed,
}

/// Sign a nanopublication in place and return its final identifier.
///
/// # Errors
///
/// - [`SignError::AlreadySigned`] — the document already has an identifier.
/// - [`SignError::TooLarge`] — statement count exceeds the ceiling.
/// - [`SignError::MissingProfile`] — the configuration holds no profile.
/// - [`SignError::Invalid`] — a structural invariant fails, either on the
///   document as given or on the finalized candidate. In every error case
///   the document keeps its pre-sign state and no identifier is assigned.
pub fn sign(np: &mut Nanopub) -> Result<String, SignError> {
    if let Some(uri) = &np.source_uri {
        return Err(SignError::AlreadySigned(uri.clone()));
    }
    let count = np.store.len();
    if count > MAX_STATEMENTS {
        return Err(SignError::TooLarge {
            count,
            limit: MAX_STATEMENTS,
        });
    }
    let profile = np.conf.profile.clone().ok_or(SignError::MissingProfile)?;
    np.is_valid()?;

    // Phase one: the canonical bytes of the document without any signature
    // record. This is what the signature covers.
    let payload = canonical_string(&np.store, &np.base, None);
    let signature = profile.sign(payload.as_bytes());

    // The signature record, under the placeholder namespace alongside the
    // rest of the document.
    let sig = Term::uri(format!("{}sig", np.base));
    let pubinfo = np.pubinfo_graph();
    let doc = Term::uri(np.base.clone());
    let mut candidate = np.store.clone();
    candidate.insert(Quad::new(
        pubinfo.clone(),
        sig.clone(),
        Term::uri(NPX_HAS_PUBLIC_KEY),
        Term::Literal(Literal::plain(profile.public_key())),
    ));
    candidate.insert(Quad::new(
        pubinfo.clone(),
        sig.clone(),
        Term::uri(NPX_HAS_ALGORITHM),
        Term::Literal(Literal::plain(SIGNATURE_ALGORITHM)),
    ));
    candidate.insert(Quad::new(
        pubinfo.clone(),
        sig.clone(),
        Term::uri(NPX_HAS_SIGNATURE_TARGET),
        doc,
    ));
    candidate.insert(Quad::new(
        pubinfo,
        sig,
        Term::uri(NPX_HAS_SIGNATURE),
        Term::Literal(Literal::plain(BASE64.encode(signature))),
    ));

    // Phase two: hash again with the record included, so the identifier
    // covers the signature itself, then rewrite every placeholder
    // reference to its final form.
    let artifact = make_trusty(&candidate, &np.base, None);
    let finalized = replace_in_store(&candidate, &np.base, &artifact);

    let source_uri = format!("{FINAL_URI_PREFIX}{artifact}");
    let final_base = format!("{source_uri}#");

    // All-or-nothing: only a candidate that still validates is committed.
    validate_parts(&finalized, &final_base, &source_uri)?;

    np.store = finalized;
    np.base = final_base;
    np.source_uri = Some(source_uri.clone());
    np.concept_uri = match np.introduces_concept() {
        Ok(Some(Term::Uri(u))) => Some(u.clone()),
        _ => None,
    };
    Ok(source_uri)
}

/// Verify the signature embedded in a finalized nanopublication.
///
/// Reconstructs the byte sequence the signature covers — the canonical form
/// of every statement outside the signature record, with the embedded
/// digest stripped — and checks it against the record's public key.
///
/// # Errors
///
/// - [`VerifyError::NotSigned`] — the document has no final identifier.
/// - [`VerifyError::MissingRecord`] — no public-key or signature statement
///   under `<source>#sig`.
/// - [`VerifyError::DecodingFailed`] — key or signature bytes are malformed.
/// - [`VerifyError::VerificationFailed`] — the signature does not match.
pub fn verify_signature(np: &Nanopub) -> Result<(), VerifyError> {
    let source = np.source_uri().ok_or(VerifyError::NotSigned)?;
    let artifact = source.rsplit('/').next().unwrap_or(source).to_string();
    let sig_subject = Term::uri(format!("{source}#sig"));

    let record_value = |predicate: &str| {
        np.store
            .iter()
            .find(|q| q.subject == sig_subject && q.predicate.as_uri() == Some(predicate))
            .and_then(|q| q.object.as_literal())
            .map(|l| l.lexical.clone())
    };
    let public_key = record_value(NPX_HAS_PUBLIC_KEY)
        .ok_or_else(|| VerifyError::MissingRecord(format!("{source}#sig")))?;
    let signature = record_value(NPX_HAS_SIGNATURE)
        .ok_or_else(|| VerifyError::MissingRecord(format!("{source}#sig")))?;

    let key_bytes: [u8; 32] = BASE64
        .decode(&public_key)
        .map_err(|e| VerifyError::DecodingFailed(format!("public key base64: {e}")))?
        .try_into()
        .map_err(|_| VerifyError::DecodingFailed("public key must be 32 bytes".into()))?;
    let verifying_key = VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| VerifyError::DecodingFailed(format!("invalid Ed25519 key: {e}")))?;

    let sig_bytes: [u8; 64] = BASE64
        .decode(&signature)
        .map_err(|e| VerifyError::DecodingFailed(format!("signature base64: {e}")))?
        .try_into()
        .map_err(|_| VerifyError::DecodingFailed("signature must be 64 bytes".into()))?;
    let signature = Signature::from_bytes(&sig_bytes);

    // The signed payload: everything except the signature record.
    let stripped: QuadStore = np
        .store
        .iter()
        .filter(|q| q.subject != sig_subject)
        .cloned()
        .collect();
    let payload = canonical_string(&stripped, &np.base, Some(&artifact));

    verifying_key
        .verify(payload.as_bytes(), &signature)
        .map_err(|_| VerifyError::VerificationFailed)
}

// --- tests -------------------------------------------------------------------
