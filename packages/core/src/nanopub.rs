//! The four-graph nanopublication document model.
//!
//! A [`Nanopub`] holds the `head`, `assertion`, `provenance`, and `pubinfo`
//! graphs of one document in a single [`QuadStore`], together with the
//! per-document placeholder namespace every reference is minted under until
//! signing rewrites it to the content-derived identifier.
//!
//! Construction applies the [`NanopubConf`] (attribution, derived-from,
//! generation timestamps) and fails fast on conflicting arguments;
//! [`Nanopub::is_valid`] re-checks the structural invariants on demand with
//! one distinguishable error per invariant.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::conf::NanopubConf;
use crate::namespaces::{
    MAX_STATEMENTS, NPX_HAS_PUBLIC_KEY, NPX_INTRODUCES, NPX_RETRACTS, NPX_SUPERSEDES,
    NP_HAS_ASSERTION, NP_HAS_PROVENANCE, NP_HAS_PUBLICATION_INFO, NP_NANOPUBLICATION,
    PROV_GENERATED_AT_TIME, PROV_WAS_ATTRIBUTED_TO, PROV_WAS_DERIVED_FROM, RDF_TYPE,
    TEMP_PREFIX, XSD_DATE_TIME,
};
use crate::rdf::{Literal, Quad, QuadStore, Term, Triple};

/// Errors raised immediately at construction for malformed or
/// mutually-exclusive arguments. Never deferred to validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(
        "assertion_attributed_to and attribute_assertion_to_profile are mutually \
         exclusive; set one or the other"
    )]
    ConflictingAttribution,

    #[error(
        "the provenance graph already contains a prov:wasAttributedTo statement, \
         so no assertion attribution may be configured"
    )]
    ProvenanceAlreadyAttributed,

    #[error(
        "the provenance graph already contains a prov:wasDerivedFrom statement, \
         so derived_from may not be configured"
    )]
    ProvenanceAlreadyDerived,

    #[error(
        "the pubinfo graph already contains an npx:introduces statement, \
         so introduces_concept may not be passed"
    )]
    ConceptAlreadyIntroduced,

    #[error(
        "the pubinfo graph must not contain prov:wasAttributedTo; configure \
         publication_attributed_to instead"
    )]
    PubinfoAttributionReserved,

    #[error("attribution to the profile was requested but no profile is configured")]
    MissingProfile,

    #[error("an introduced concept must be a blank node, got {0}")]
    ConceptNotBlank(String),
}

/// Structural invariant violations reported by [`Nanopub::is_valid`].
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("expected exactly 4 graphs (head, assertion, provenance, pubinfo), found {0}")]
    GraphCount(usize),

    #[error(
        "the head graph must hold exactly the nanopublication type declaration \
         and the three links to its content graphs"
    )]
    IncompleteHead,

    #[error("the provenance graph must contain at least one statement")]
    EmptyProvenance,

    #[error("the pubinfo graph must contain at least one statement")]
    EmptyPubinfo,

    #[error("a nanopublication may introduce at most one concept, found {0}")]
    MultipleConcepts(usize),

    #[error("nanopublication contains {count} statements, more than the {limit} allowed")]
    TooManyStatements { count: usize, limit: usize },
}

/// One nanopublication: four named graphs, a base namespace, and its
/// lifecycle state.
///
/// Until signed, every document-scoped reference lives under a placeholder
/// namespace unique to this instance. Signing (see [`crate::sign`])
/// rewrites the placeholder to the final content-derived identifier and
/// sets `source_uri`, after which the document is immutable by contract.
#[derive(Debug, Clone)]
pub struct Nanopub {
    pub(crate) store: QuadStore,
    /// Base namespace of document-scoped references, with its trailing
    /// separator. A placeholder under [`TEMP_PREFIX`] until signed.
    pub(crate) base: String,
    pub(crate) conf: NanopubConf,
    pub(crate) source_uri: Option<String>,
    pub(crate) concept_uri: Option<String>,
    pub(crate) published: Option<String>,
}

impl Nanopub {
    /// Assemble a nanopublication from caller content and a configuration.
    ///
    /// Seeds the head graph, copies the three content graphs, maps the
    /// `introduces_concept` blank node into the placeholder namespace, and
    /// applies the configured attribution, derived-from, and timestamp
    /// statements.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any conflicting or malformed argument;
    /// see the variants for the exact conditions.
    pub fn new(
        conf: NanopubConf,
        assertion: Vec<Triple>,
        provenance: Vec<Triple>,
        pubinfo: Vec<Triple>,
        introduces_concept: Option<Term>,
    ) -> Result<Self, ConfigError> {
        let concept_label = match &introduces_concept {
            Some(Term::Blank(label)) => Some(label.clone()),
            Some(other) => return Err(ConfigError::ConceptNotBlank(other.to_string())),
            None => None,
        };

        check_conf_against_content(&conf, &provenance, &pubinfo, concept_label.is_some())?;

        if (conf.attribute_assertion_to_profile || conf.attribute_publication_to_profile)
            && conf.profile.is_none()
        {
            return Err(ConfigError::MissingProfile);
        }

        let base = format!("{TEMP_PREFIX}{}#", Uuid::now_v7().simple());
        let mut np = Self {
            store: QuadStore::new(),
            base,
            conf,
            source_uri: None,
            concept_uri: None,
            published: None,
        };

        np.seed_head();
        for t in assertion {
            let t = match &concept_label {
                Some(label) => np.map_concept_blank(t, label),
                None => t,
            };
            np.add_assertion(t);
        }
        for t in provenance {
            np.add_provenance(t);
        }
        for t in pubinfo {
            np.add_pubinfo(t);
        }

        if let Some(label) = &concept_label {
            np.store.insert(Quad::new(
                np.pubinfo_graph(),
                np.doc_term(),
                Term::uri(NPX_INTRODUCES),
                Term::uri(format!("{}{}", np.base, label)),
            ));
        }

        np.apply_conf();
        Ok(np)
    }

    /// A nanopublication retracting a previously published one: the
    /// assertion states that the profile's identity retracts `uri`.
    ///
    /// Requires a profile; assertion and publication are attributed to it.
    pub fn retraction_of(uri: &str, conf: NanopubConf) -> Result<Self, ConfigError> {
        let orcid = match &conf.profile {
            Some(p) => p.orcid_id().to_string(),
            None => return Err(ConfigError::MissingProfile),
        };
        let mut conf = conf;
        conf.assertion_attributed_to = None;
        conf.attribute_assertion_to_profile = true;
        conf.attribute_publication_to_profile = true;

        let assertion = vec![Triple::new(
            Term::uri(orcid),
            Term::uri(NPX_RETRACTS),
            Term::uri(uri),
        )];
        Self::new(conf, assertion, vec![], vec![], None)
    }

    /// A nanopublication superseding a previously published one: carries
    /// the replacement content plus an `npx:supersedes` link in pubinfo.
    pub fn update_of(
        uri: &str,
        conf: NanopubConf,
        assertion: Vec<Triple>,
        provenance: Vec<Triple>,
        pubinfo: Vec<Triple>,
    ) -> Result<Self, ConfigError> {
        let mut np = Self::new(conf, assertion, provenance, pubinfo, None)?;
        np.store.insert(Quad::new(
            np.pubinfo_graph(),
            np.doc_term(),
            Term::uri(NPX_SUPERSEDES),
            Term::uri(uri),
        ));
        Ok(np)
    }

    // -- graph handles ------------------------------------------------------

    pub(crate) fn head_graph(&self) -> Term {
        Term::uri(format!("{}Head", self.base))
    }

    pub(crate) fn assertion_graph(&self) -> Term {
        Term::uri(format!("{}assertion", self.base))
    }

    pub(crate) fn provenance_graph(&self) -> Term {
        Term::uri(format!("{}provenance", self.base))
    }

    pub(crate) fn pubinfo_graph(&self) -> Term {
        Term::uri(format!("{}pubinfo", self.base))
    }

    /// The document's own reference: the final identifier once signed, the
    /// placeholder namespace before that.
    pub fn uri(&self) -> &str {
        self.source_uri.as_deref().unwrap_or(&self.base)
    }

    fn doc_term(&self) -> Term {
        Term::uri(self.uri())
    }

    // -- construction helpers ----------------------------------------------

    fn seed_head(&mut self) {
        let head = self.head_graph();
        let doc = self.doc_term();
        self.store.insert(Quad::new(
            head.clone(),
            doc.clone(),
            Term::uri(RDF_TYPE),
            Term::uri(NP_NANOPUBLICATION),
        ));
        self.store.insert(Quad::new(
            head.clone(),
            doc.clone(),
            Term::uri(NP_HAS_ASSERTION),
            self.assertion_graph(),
        ));
        self.store.insert(Quad::new(
            head.clone(),
            doc.clone(),
            Term::uri(NP_HAS_PROVENANCE),
            self.provenance_graph(),
        ));
        self.store.insert(Quad::new(
            head,
            doc,
            Term::uri(NP_HAS_PUBLICATION_INFO),
            self.pubinfo_graph(),
        ));
    }

    /// Replace the introduced-concept blank node with its placeholder
    /// reference, so the assertion and the `npx:introduces` statement end
    /// up naming the same final `…#<label>` concept.
    fn map_concept_blank(&self, t: Triple, label: &str) -> Triple {
        let map = |term: Term| match &term {
            Term::Blank(l) if l == label => Term::uri(format!("{}{}", self.base, label)),
            _ => term,
        };
        Triple::new(map(t.subject), map(t.predicate), map(t.object))
    }

    fn apply_conf(&mut self) {
        let assertion_attributed_to = if self.conf.attribute_assertion_to_profile {
            self.conf
                .profile
                .as_ref()
                .map(|p| p.orcid_id().to_string())
        } else {
            self.conf.assertion_attributed_to.clone()
        };
        if let Some(who) = assertion_attributed_to {
            self.store.insert(Quad::new(
                self.provenance_graph(),
                self.assertion_graph(),
                Term::uri(PROV_WAS_ATTRIBUTED_TO),
                Term::uri(who),
            ));
        }

        if self.conf.attribute_publication_to_profile {
            let who = self
                .conf
                .publication_attributed_to
                .clone()
                .or_else(|| self.conf.profile.as_ref().map(|p| p.orcid_id().to_string()));
            if let Some(who) = who {
                self.store.insert(Quad::new(
                    self.pubinfo_graph(),
                    self.doc_term(),
                    Term::uri(PROV_WAS_ATTRIBUTED_TO),
                    Term::uri(who),
                ));
            }
        }

        for derived in self.conf.derived_from.clone() {
            self.store.insert(Quad::new(
                self.provenance_graph(),
                self.assertion_graph(),
                Term::uri(PROV_WAS_DERIVED_FROM),
                Term::uri(derived),
            ));
        }

        if self.conf.add_prov_generated_time || self.conf.add_pubinfo_generated_time {
            let now = Term::Literal(Literal::typed(Utc::now().to_rfc3339(), XSD_DATE_TIME));
            if self.conf.add_prov_generated_time {
                self.store.insert(Quad::new(
                    self.provenance_graph(),
                    self.assertion_graph(),
                    Term::uri(PROV_GENERATED_AT_TIME),
                    now.clone(),
                ));
            }
            if self.conf.add_pubinfo_generated_time {
                self.store.insert(Quad::new(
                    self.pubinfo_graph(),
                    self.doc_term(),
                    Term::uri(PROV_GENERATED_AT_TIME),
                    now,
                ));
            }
        }
    }

    // -- content access -----------------------------------------------------

    /// Add a statement to the assertion graph. Construction-phase only;
    /// signed documents are immutable by contract.
    pub fn add_assertion(&mut self, t: Triple) {
        let g = self.assertion_graph();
        self.store.insert(Quad::new(g, t.subject, t.predicate, t.object));
    }

    /// Add a statement to the provenance graph.
    pub fn add_provenance(&mut self, t: Triple) {
        let g = self.provenance_graph();
        self.store.insert(Quad::new(g, t.subject, t.predicate, t.object));
    }

    /// Add a statement to the pubinfo graph.
    pub fn add_pubinfo(&mut self, t: Triple) {
        let g = self.pubinfo_graph();
        self.store.insert(Quad::new(g, t.subject, t.predicate, t.object));
    }

    pub fn head(&self) -> impl Iterator<Item = &Quad> {
        self.store.graph_owned_iter(self.head_graph())
    }

    pub fn assertion(&self) -> impl Iterator<Item = &Quad> {
        self.store.graph_owned_iter(self.assertion_graph())
    }

    pub fn provenance(&self) -> impl Iterator<Item = &Quad> {
        self.store.graph_owned_iter(self.provenance_graph())
    }

    pub fn pubinfo(&self) -> impl Iterator<Item = &Quad> {
        self.store.graph_owned_iter(self.pubinfo_graph())
    }

    /// The underlying quad store.
    pub fn store(&self) -> &QuadStore {
        &self.store
    }

    /// Mutable access to the underlying store — an escape hatch for callers
    /// assembling content outside the construction API. The structural
    /// invariants are re-checked by [`is_valid`](Self::is_valid) and at
    /// sign time.
    pub fn store_mut(&mut self) -> &mut QuadStore {
        &mut self.store
    }

    /// The base namespace document-scoped references currently live under.
    pub fn namespace(&self) -> &str {
        &self.base
    }

    pub fn conf(&self) -> &NanopubConf {
        &self.conf
    }

    /// The final identifier, once signed.
    pub fn source_uri(&self) -> Option<&str> {
        self.source_uri.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.source_uri.is_some()
    }

    /// The finalized URI of the introduced concept, set by signing.
    pub fn concept_uri(&self) -> Option<&str> {
        self.concept_uri.as_deref()
    }

    /// The endpoint that accepted this document, once published.
    pub fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }

    /// Record the endpoint that accepted this document. One-way.
    pub fn mark_published(&mut self, server: impl Into<String>) {
        if self.published.is_none() {
            self.published = Some(server.into());
        }
    }

    /// The concept this document introduces, if any.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MultipleConcepts`] if pubinfo holds more than one
    /// `npx:introduces` statement.
    pub fn introduces_concept(&self) -> Result<Option<&Term>, ValidationError> {
        let pubinfo = self.pubinfo_graph();
        let concepts: Vec<&Term> = self
            .store
            .graph(&pubinfo)
            .filter(|q| q.predicate.as_uri() == Some(NPX_INTRODUCES))
            .map(|q| &q.object)
            .collect();
        match concepts.len() {
            0 => Ok(None),
            1 => Ok(Some(concepts[0])),
            n => Err(ValidationError::MultipleConcepts(n)),
        }
    }

    /// The public key embedded in the signature record, once signed.
    pub fn signed_with_public_key(&self) -> Option<String> {
        let source = self.source_uri.as_deref()?;
        let sig = Term::uri(format!("{source}#sig"));
        self.store
            .iter()
            .find(|q| q.subject == sig && q.predicate.as_uri() == Some(NPX_HAS_PUBLIC_KEY))
            .and_then(|q| q.object.as_literal())
            .map(|l| l.lexical.clone())
    }

    /// Serialize the document as N-Quads.
    pub fn serialize_nquads(&self) -> String {
        self.store.serialize_nquads()
    }

    // -- validation ---------------------------------------------------------

    /// Check the structural invariants, returning the first violation.
    pub fn is_valid(&self) -> Result<(), ValidationError> {
        validate_parts(&self.store, &self.base, self.uri())
    }
}

/// Structural validation over raw parts, shared between [`Nanopub::is_valid`]
/// and the signing engine's pre-commit check of the finalized candidate.
pub(crate) fn validate_parts(
    store: &QuadStore,
    base: &str,
    doc_uri: &str,
) -> Result<(), ValidationError> {
    let head = Term::uri(format!("{base}Head"));
    let assertion = Term::uri(format!("{base}assertion"));
    let provenance = Term::uri(format!("{base}provenance"));
    let pubinfo = Term::uri(format!("{base}pubinfo"));

    // Statements may only live in the four named sub-graphs. An empty
    // sub-graph is reported by its own variant below, not as a count error.
    let graphs = store.graphs();
    let known = [&head, &assertion, &provenance, &pubinfo];
    if graphs.iter().any(|g| !known.contains(g)) {
        return Err(ValidationError::GraphCount(graphs.len()));
    }

    let doc = Term::uri(doc_uri);
    let expected = [
        (RDF_TYPE, Term::uri(NP_NANOPUBLICATION)),
        (NP_HAS_ASSERTION, assertion.clone()),
        (NP_HAS_PROVENANCE, provenance.clone()),
        (NP_HAS_PUBLICATION_INFO, pubinfo.clone()),
    ];
    let head_quads: Vec<&Quad> = store.graph(&head).collect();
    let head_complete = head_quads.len() == expected.len()
        && expected.iter().all(|(predicate, object)| {
            head_quads.iter().any(|q| {
                q.subject == doc && q.predicate.as_uri() == Some(*predicate) && &q.object == object
            })
        });
    if !head_complete {
        return Err(ValidationError::IncompleteHead);
    }

    if store.graph_len(&provenance) == 0 {
        return Err(ValidationError::EmptyProvenance);
    }
    if store.graph_len(&pubinfo) == 0 {
        return Err(ValidationError::EmptyPubinfo);
    }

    let concepts = store
        .graph(&pubinfo)
        .filter(|q| q.predicate.as_uri() == Some(NPX_INTRODUCES))
        .count();
    if concepts > 1 {
        return Err(ValidationError::MultipleConcepts(concepts));
    }

    if store.len() > MAX_STATEMENTS {
        return Err(ValidationError::TooManyStatements {
            count: store.len(),
            limit: MAX_STATEMENTS,
        });
    }

    Ok(())
}

/// Reject configurations that conflict with statements already present in
/// the caller-supplied content.
fn check_conf_against_content(
    conf: &NanopubConf,
    provenance: &[Triple],
    pubinfo: &[Triple],
    introduces_concept: bool,
) -> Result<(), ConfigError> {
    if conf.assertion_attributed_to.is_some() && conf.attribute_assertion_to_profile {
        return Err(ConfigError::ConflictingAttribution);
    }

    let prov_has = |p: &str| {
        provenance
            .iter()
            .any(|t| t.predicate.as_uri() == Some(p))
    };
    let pubinfo_has = |p: &str| pubinfo.iter().any(|t| t.predicate.as_uri() == Some(p));

    let wants_assertion_attribution =
        conf.assertion_attributed_to.is_some() || conf.attribute_assertion_to_profile;
    if wants_assertion_attribution && prov_has(PROV_WAS_ATTRIBUTED_TO) {
        return Err(ConfigError::ProvenanceAlreadyAttributed);
    }
    if !conf.derived_from.is_empty() && prov_has(PROV_WAS_DERIVED_FROM) {
        return Err(ConfigError::ProvenanceAlreadyDerived);
    }
    if introduces_concept && pubinfo_has(NPX_INTRODUCES) {
        return Err(ConfigError::ConceptAlreadyIntroduced);
    }
    if pubinfo_has(PROV_WAS_ATTRIBUTED_TO) {
        return Err(ConfigError::PubinfoAttributionReserved);
    }

    Ok(())
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::HYCL_CLAIMS;
    use crate::profile::Profile;

    const SEED: [u8; 32] = [42u8; 32];

    fn test_profile() -> Profile {
        Profile::from_seed("https://orcid.org/0000-0000-0000-0000", &SEED)
    }

    fn claim() -> Vec<Triple> {
        vec![Triple::new(
            Term::uri("http://test"),
            Term::uri(HYCL_CLAIMS),
            Term::literal("This is a test claim"),
        )]
    }

    fn full_conf() -> NanopubConf {
        NanopubConf {
            profile: Some(test_profile()),
            attribute_assertion_to_profile: true,
            attribute_publication_to_profile: true,
            ..Default::default()
        }
    }

    #[test]
    fn construction_seeds_the_head() {
        let np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        assert_eq!(np.head().count(), 4);
        assert_eq!(np.assertion().count(), 1);
        assert!(np.is_valid().is_ok());
        assert!(!np.is_signed());
    }

    #[test]
    fn placeholder_namespace_is_per_document() {
        let a = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        let b = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        assert_ne!(a.namespace(), b.namespace());
        assert!(a.namespace().starts_with(TEMP_PREFIX));
    }

    #[test]
    fn conflicting_attribution_rejected() {
        let conf = NanopubConf {
            profile: Some(test_profile()),
            attribute_assertion_to_profile: true,
            assertion_attributed_to: Some("https://orcid.org/0000-0000-0000-0001".into()),
            ..Default::default()
        };
        assert_eq!(
            Nanopub::new(conf, claim(), vec![], vec![], None).unwrap_err(),
            ConfigError::ConflictingAttribution
        );
    }

    #[test]
    fn attribution_conflicts_with_existing_provenance() {
        let provenance = vec![Triple::new(
            Term::uri("http://x"),
            Term::uri(PROV_WAS_ATTRIBUTED_TO),
            Term::uri("http://someone"),
        )];
        let err = Nanopub::new(full_conf(), claim(), provenance, vec![], None).unwrap_err();
        assert_eq!(err, ConfigError::ProvenanceAlreadyAttributed);
    }

    #[test]
    fn derived_from_conflicts_with_existing_provenance() {
        let conf = NanopubConf {
            profile: Some(test_profile()),
            attribute_publication_to_profile: true,
            derived_from: vec!["http://example.org/derived".into()],
            ..Default::default()
        };
        let provenance = vec![Triple::new(
            Term::uri("http://x"),
            Term::uri(PROV_WAS_DERIVED_FROM),
            Term::uri("http://other"),
        )];
        let err = Nanopub::new(conf, claim(), provenance, vec![], None).unwrap_err();
        assert_eq!(err, ConfigError::ProvenanceAlreadyDerived);
    }

    #[test]
    fn pubinfo_attribution_is_reserved() {
        let pubinfo = vec![Triple::new(
            Term::uri("http://x"),
            Term::uri(PROV_WAS_ATTRIBUTED_TO),
            Term::uri("http://someone"),
        )];
        let err = Nanopub::new(full_conf(), claim(), vec![], pubinfo, None).unwrap_err();
        assert_eq!(err, ConfigError::PubinfoAttributionReserved);
    }

    #[test]
    fn introduced_concept_must_be_blank() {
        let err = Nanopub::new(
            full_conf(),
            claim(),
            vec![],
            vec![],
            Some(Term::uri("http://example.org/concept")),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConceptNotBlank(_)));
    }

    #[test]
    fn attribute_to_profile_requires_profile() {
        let conf = NanopubConf {
            attribute_publication_to_profile: true,
            ..Default::default()
        };
        assert_eq!(
            Nanopub::new(conf, claim(), vec![], vec![], None).unwrap_err(),
            ConfigError::MissingProfile
        );
    }

    #[test]
    fn introduced_concept_unifies_assertion_and_pubinfo() {
        let assertion = vec![Triple::new(
            Term::blank("concept"),
            Term::uri(HYCL_CLAIMS),
            Term::literal("a new idea"),
        )];
        let np = Nanopub::new(
            full_conf(),
            assertion,
            vec![],
            vec![],
            Some(Term::blank("concept")),
        )
        .unwrap();

        let expected = Term::uri(format!("{}concept", np.namespace()));
        assert_eq!(np.introduces_concept().unwrap(), Some(&expected));
        assert!(np.assertion().any(|q| q.subject == expected));
    }

    #[test]
    fn derived_from_adds_statements() {
        let conf = NanopubConf {
            profile: Some(test_profile()),
            attribute_assertion_to_profile: true,
            attribute_publication_to_profile: true,
            derived_from: vec![
                "http://example.org/derived1".into(),
                "http://example.org/derived2".into(),
            ],
            ..Default::default()
        };
        let np = Nanopub::new(conf, claim(), vec![], vec![], None).unwrap();
        let derived: Vec<_> = np
            .provenance()
            .filter(|q| q.predicate.as_uri() == Some(PROV_WAS_DERIVED_FROM))
            .collect();
        assert_eq!(derived.len(), 2);
    }

    #[test]
    fn generated_time_statements() {
        let conf = NanopubConf {
            profile: Some(test_profile()),
            attribute_assertion_to_profile: true,
            attribute_publication_to_profile: true,
            add_prov_generated_time: true,
            add_pubinfo_generated_time: true,
            ..Default::default()
        };
        let np = Nanopub::new(conf, claim(), vec![], vec![], None).unwrap();
        assert!(np
            .provenance()
            .any(|q| q.predicate.as_uri() == Some(PROV_GENERATED_AT_TIME)));
        assert!(np
            .pubinfo()
            .any(|q| q.predicate.as_uri() == Some(PROV_GENERATED_AT_TIME)));
    }

    #[test]
    fn five_graphs_invalid() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        np.store_mut().insert(Quad::new(
            Term::uri("http://example.org/extra-graph"),
            Term::uri("http://s"),
            Term::uri("http://p"),
            Term::literal("o"),
        ));
        assert_eq!(np.is_valid(), Err(ValidationError::GraphCount(5)));
    }

    #[test]
    fn empty_provenance_invalid() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        let g = np.provenance_graph();
        np.store_mut().remove_graph(&g);
        assert_eq!(np.is_valid(), Err(ValidationError::EmptyProvenance));
    }

    #[test]
    fn empty_pubinfo_invalid() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        let g = np.pubinfo_graph();
        np.store_mut().remove_graph(&g);
        assert_eq!(np.is_valid(), Err(ValidationError::EmptyPubinfo));
    }

    #[test]
    fn multiple_concepts_invalid() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        let pubinfo = np.pubinfo_graph();
        let doc = np.doc_term();
        np.store_mut().insert(Quad::new(
            pubinfo.clone(),
            doc.clone(),
            Term::uri(NPX_INTRODUCES),
            Term::uri("http://c1"),
        ));
        np.store_mut().insert(Quad::new(
            pubinfo,
            doc,
            Term::uri(NPX_INTRODUCES),
            Term::uri("http://c2"),
        ));
        assert_eq!(np.is_valid(), Err(ValidationError::MultipleConcepts(2)));
        assert!(np.introduces_concept().is_err());
    }

    #[test]
    fn damaged_head_invalid() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        let head = np.head_graph();
        let type_quad = np
            .store()
            .graph(&head)
            .find(|q| q.predicate.as_uri() == Some(RDF_TYPE))
            .cloned()
            .unwrap();
        np.store_mut().remove(&type_quad);
        // Keep the graph alive so the count check passes.
        np.store_mut().insert(Quad::new(
            head,
            Term::uri("http://s"),
            Term::uri("http://p"),
            Term::literal("o"),
        ));
        assert_eq!(np.is_valid(), Err(ValidationError::IncompleteHead));
    }

    #[test]
    fn statement_ceiling_enforced() {
        let mut np = Nanopub::new(full_conf(), claim(), vec![], vec![], None).unwrap();
        for i in 0..MAX_STATEMENTS {
            np.add_assertion(Triple::new(
                Term::uri(format!("http://test/{i}")),
                Term::uri(HYCL_CLAIMS),
                Term::literal("filler"),
            ));
        }
        assert!(matches!(
            np.is_valid(),
            Err(ValidationError::TooManyStatements { .. })
        ));
    }

    #[test]
    fn retraction_builder() {
        let conf = NanopubConf {
            profile: Some(test_profile()),
            ..Default::default()
        };
        let np = Nanopub::retraction_of("http://purl.org/np/RAtarget", conf).unwrap();
        assert!(np.is_valid().is_ok());
        assert!(np
            .assertion()
            .any(|q| q.predicate.as_uri() == Some(NPX_RETRACTS)));
    }

    #[test]
    fn retraction_requires_profile() {
        let err =
            Nanopub::retraction_of("http://purl.org/np/RAtarget", NanopubConf::default())
                .unwrap_err();
        assert_eq!(err, ConfigError::MissingProfile);
    }

    #[test]
    fn update_builder_adds_supersedes() {
        let np = Nanopub::update_of(
            "http://purl.org/np/RAold",
            full_conf(),
            claim(),
            vec![],
            vec![],
        )
        .unwrap();
        let superseded: Vec<_> = np
            .pubinfo()
            .filter(|q| q.predicate.as_uri() == Some(NPX_SUPERSEDES))
            .collect();
        assert_eq!(superseded.len(), 1);
        assert_eq!(
            superseded[0].object,
            Term::uri("http://purl.org/np/RAold")
        );
    }
}
