//! Core library of the nanoweft protocol implementation.
//!
//! A nanopublication packages a unit of knowledge (an assertion) together
//! with its provenance and publication metadata into an immutable,
//! content-addressed, cryptographically signed document. This crate
//! provides the document model, the canonicalization-and-hashing algorithm
//! that derives the content-addressed identifier, and the signing engine.
//! The companion crate `nanoweft-client` exchanges finalized documents with
//! the mirror network.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rdf`] | RDF value types and the in-memory [`QuadStore`] |
//! | [`namespaces`] | Vocabulary constants and protocol limits |
//! | [`profile`] | Signing identity: [`Profile`] |
//! | [`conf`] | Construction-time configuration: [`NanopubConf`] |
//! | [`nanopub`] | The four-graph document model: [`Nanopub`] plus validation |
//! | [`trusty`] | Canonicalization and content hashing |
//! | [`sign`] | Signing pipeline and signature verification |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use nanoweft::{sign, Nanopub, NanopubConf, Profile, Term, Triple};
//!
//! let conf = NanopubConf {
//!     profile: Some(Profile::generate("https://orcid.org/0000-0000-0000-0000")),
//!     attribute_assertion_to_profile: true,
//!     attribute_publication_to_profile: true,
//!     ..Default::default()
//! };
//!
//! let assertion = vec![Triple::new(
//!     Term::uri("http://example.org/water"),
//!     Term::uri("http://example.org/boils-at"),
//!     Term::literal("100°C at sea level"),
//! )];
//!
//! let mut np = Nanopub::new(conf, assertion, vec![], vec![], None)?;
//! let uri = sign(&mut np)?;   // e.g. http://purl.org/np/RA…
//! ```

pub mod conf;
pub mod namespaces;
pub mod nanopub;
pub mod profile;
pub mod rdf;
pub mod sign;
pub mod trusty;

pub use conf::NanopubConf;
pub use nanopub::{ConfigError, Nanopub, ValidationError};
pub use profile::Profile;
pub use rdf::{Literal, LiteralKind, Quad, QuadStore, Term, Triple};
pub use sign::{sign, verify_signature, SignError, VerifyError};
