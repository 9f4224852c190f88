//! Vocabulary constants shared across the document model, canonicalizer,
//! and signing engine.

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// The nanopublication schema class.
pub const NP_NANOPUBLICATION: &str = "http://www.nanopub.org/nschema#Nanopublication";
pub const NP_HAS_ASSERTION: &str = "http://www.nanopub.org/nschema#hasAssertion";
pub const NP_HAS_PROVENANCE: &str = "http://www.nanopub.org/nschema#hasProvenance";
pub const NP_HAS_PUBLICATION_INFO: &str = "http://www.nanopub.org/nschema#hasPublicationInfo";

/// Nanopublication extension vocabulary (`npx:`).
pub const NPX_INTRODUCES: &str = "http://purl.org/nanopub/x/introduces";
pub const NPX_HAS_PUBLIC_KEY: &str = "http://purl.org/nanopub/x/hasPublicKey";
pub const NPX_HAS_ALGORITHM: &str = "http://purl.org/nanopub/x/hasAlgorithm";
pub const NPX_HAS_SIGNATURE_TARGET: &str = "http://purl.org/nanopub/x/hasSignatureTarget";
pub const NPX_HAS_SIGNATURE: &str = "http://purl.org/nanopub/x/hasSignature";
pub const NPX_SUPERSEDES: &str = "http://purl.org/nanopub/x/supersedes";
pub const NPX_RETRACTS: &str = "http://purl.org/nanopub/x/retracts";

/// Provenance vocabulary (`prov:`).
pub const PROV_WAS_ATTRIBUTED_TO: &str = "http://www.w3.org/ns/prov#wasAttributedTo";
pub const PROV_WAS_DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";
pub const PROV_GENERATED_AT_TIME: &str = "http://www.w3.org/ns/prov#generatedAtTime";
pub const PROV_HAD_PRIMARY_SOURCE: &str = "http://www.w3.org/ns/prov#hadPrimarySource";

pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Human claims vocabulary, used by simple claim assertions.
pub const HYCL_CLAIMS: &str = "http://purl.org/petapico/o/hycl#claims";

/// Domain under which placeholder namespaces are minted while a document is
/// under construction. References below this prefix are rebased onto
/// [`FINAL_URI_PREFIX`] during canonicalization.
pub const TEMP_PREFIX: &str = "http://purl.org/nanopub/temp/";

/// Base of every finalized identifier.
pub const FINAL_URI_PREFIX: &str = "http://purl.org/np/";

/// Ceiling on the total statement count of one nanopublication.
pub const MAX_STATEMENTS: usize = 1200;
