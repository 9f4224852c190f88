//! Construction-time configuration for a [`Nanopub`](crate::Nanopub).

use crate::profile::Profile;

/// Declarative settings applied while a nanopublication is assembled.
///
/// All flags default to off, so `NanopubConf::default()` configures a
/// document whose provenance and pubinfo content comes entirely from the
/// caller. Attribution can name an explicit identity *or* delegate to the
/// profile — supplying both is a configuration error caught at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct NanopubConf {
    /// The signing identity. Required for signing and for any
    /// attribute-to-profile flag.
    pub profile: Option<Profile>,

    /// Attribute the assertion to the profile's identity URI.
    /// Mutually exclusive with `assertion_attributed_to`.
    pub attribute_assertion_to_profile: bool,

    /// Attribute the assertion to this explicit identity URI.
    pub assertion_attributed_to: Option<String>,

    /// Attribute the publication to an identity: the profile's, or
    /// `publication_attributed_to` when set.
    pub attribute_publication_to_profile: bool,

    /// Identity URI the publication is attributed to. Only consulted when
    /// `attribute_publication_to_profile` is on.
    pub publication_attributed_to: Option<String>,

    /// Stamp the assertion's generation time into the provenance graph.
    pub add_prov_generated_time: bool,

    /// Stamp the document's generation time into the pubinfo graph.
    pub add_pubinfo_generated_time: bool,

    /// URIs of prior documents this assertion was derived from.
    pub derived_from: Vec<String>,
}
