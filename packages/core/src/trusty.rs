//! Content-addressing: canonicalization and hashing of a quad store.
//!
//! Derives the digest-based identifier of a nanopublication. The statements
//! are rewritten so the result is independent of blank-node labels and of
//! the (not yet known) final identifier, serialized into a single sorted
//! byte sequence, and hashed with SHA-256. The digest text is base64url
//! without padding, prefixed with the [`TRUSTY_MODULE`] type marker —
//! giving the familiar 45-character `RA…` artifact code.
//!
//! The same rewrite rules run in two roles: with a single-space placeholder
//! in the digest position while hashing, and with the real digest when
//! [`replace_in_store`] finalizes the document. Re-running the hash on a
//! finalized store (passing its embedded digest as `prev_digest`)
//! reproduces the same artifact.

use std::collections::HashMap;
use std::sync::LazyLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::namespaces::{FINAL_URI_PREFIX, TEMP_PREFIX, XSD_STRING};
use crate::rdf::{LiteralKind, Quad, QuadStore, Term};

/// Type marker of the trusty-URI module for RDF graph content.
pub const TRUSTY_MODULE: &str = "RA";

/// Length of a full artifact code: marker plus 43 base64url characters.
pub const ARTIFACT_LEN: usize = 45;

/// Suffixes minted for blank nodes: `_<n>` with a 1-based counter.
static BNODE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_[1-9][0-9]*$").expect("invalid blank-suffix regex"));

static ARTIFACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RA[A-Za-z0-9_-]{43}$").expect("invalid artifact regex"));

/// Whether `s` has the shape of a finalized artifact code.
pub fn is_artifact(s: &str) -> bool {
    ARTIFACT_RE.is_match(s)
}

/// First-seen-order numbering of blank nodes, scoped to one pass over a
/// document. Never shared across documents.
#[derive(Debug, Default)]
struct BlankNodeMap {
    numbers: HashMap<String, usize>,
}

impl BlankNodeMap {
    fn number(&mut self, label: &str) -> usize {
        let next = self.numbers.len() + 1;
        *self.numbers.entry(label.to_string()).or_insert(next)
    }
}

/// The prefix in-namespace references are rebased onto: the base namespace
/// with its final path segment removed, or the production prefix when the
/// base is a placeholder namespace.
fn rebase_prefix(base: &str) -> String {
    if base.starts_with(TEMP_PREFIX) {
        return FINAL_URI_PREFIX.to_string();
    }
    match base.rfind('/') {
        Some(idx) => base[..=idx].to_string(),
        None => base.to_string(),
    }
}

/// The base namespace without its trailing `#` or `/` separator — the form
/// a finalized document uses as its own subject.
fn base_without_separator(base: &str) -> &str {
    base.strip_suffix('#')
        .or_else(|| base.strip_suffix('/'))
        .unwrap_or(base)
}

/// Rewrite a reference that falls inside the base namespace, placing `slot`
/// (a single space while hashing, the digest when finalizing) in the digest
/// position. Returns `None` for references outside the namespace.
fn rewrite_uri(uri: &str, base: &str, slot: &str) -> Option<String> {
    let prefix = rebase_prefix(base);
    let suffix = if uri == base {
        None
    } else {
        uri.strip_prefix(base)
    };
    match suffix {
        None if uri == base_without_separator(base) => Some(format!("{prefix}{slot}")),
        None if uri != base => None,
        None | Some("") => Some(format!("{prefix}{slot}")),
        Some(s) => {
            // While hashing, a user suffix that starts with `_` but is not a
            // minted blank-node suffix gets an extra `_`, so it can never
            // collide with the `#_<n>` scheme below.
            let s = if slot == " " && s.starts_with('_') && !BNODE_SUFFIX_RE.is_match(s) {
                format!("_{s}")
            } else {
                s.to_string()
            };
            Some(format!("{prefix}{slot}#{s}"))
        }
    }
}

/// Normalize one term: in-namespace references are rebased with `slot` in
/// the digest position, blank nodes are numbered in first-seen order, and
/// references outside the namespace lose any occurrence of `prev_digest`.
/// Literals pass through untouched.
fn transform(
    term: &Term,
    base: &str,
    slot: &str,
    prev_digest: Option<&str>,
    bnodes: &mut BlankNodeMap,
) -> Term {
    match term {
        Term::Uri(u) => match rewrite_uri(u, base, slot) {
            Some(rewritten) => Term::Uri(rewritten),
            None => match prev_digest {
                Some(prev) if u.contains(prev) => Term::Uri(u.replace(prev, " ")),
                _ => term.clone(),
            },
        },
        Term::Blank(label) => {
            let n = bnodes.number(label);
            Term::Uri(format!("{}{}#_{}", rebase_prefix(base), slot, n))
        }
        Term::Literal(_) => term.clone(),
    }
}

/// Serialize one normalized term for hashing. Literals carry their language
/// tag (`@tag`, lowercased) or datatype (`^uri`, plain literals as
/// `xsd:string`); every value ends with a newline.
fn value_to_string(term: &Term) -> String {
    match term {
        Term::Uri(u) => format!("{u}\n"),
        Term::Blank(label) => format!("{label}\n"),
        Term::Literal(lit) => match &lit.kind {
            LiteralKind::Lang(tag) => {
                format!("@{} {}\n", tag.to_lowercase(), escape(&lit.lexical))
            }
            LiteralKind::Typed(dt) => format!("^{} {}\n", dt, escape(&lit.lexical)),
            LiteralKind::Plain => format!("^{} {}\n", XSD_STRING, escape(&lit.lexical)),
        },
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

/// The canonical byte sequence of a store: every quad normalized against
/// `base_ns`, serialized, and sorted byte-for-byte by graph, subject,
/// predicate, then object.
///
/// `prev_digest` is the artifact already embedded in a finalized store,
/// replaced by a single space so the output never depends on a previously
/// computed digest.
pub fn canonical_string(store: &QuadStore, base_ns: &str, prev_digest: Option<&str>) -> String {
    let mut bnodes = BlankNodeMap::default();
    let mut rows: Vec<[String; 4]> = store
        .iter()
        .map(|q| {
            let graph = if q.graph.is_uri() {
                value_to_string(&transform(&q.graph, base_ns, " ", prev_digest, &mut bnodes))
            } else {
                // A graph reference that is no real sub-graph marker
                // serializes as an empty slot.
                "\n".to_string()
            };
            [
                graph,
                value_to_string(&transform(&q.subject, base_ns, " ", prev_digest, &mut bnodes)),
                value_to_string(&transform(&q.predicate, base_ns, " ", prev_digest, &mut bnodes)),
                value_to_string(&transform(&q.object, base_ns, " ", prev_digest, &mut bnodes)),
            ]
        })
        .collect();
    rows.sort();

    let mut out = String::new();
    for row in &rows {
        for value in row {
            out.push_str(value);
        }
    }
    out
}

/// Hash the canonical byte sequence of a store into an artifact code.
pub fn make_trusty(store: &QuadStore, base_ns: &str, prev_digest: Option<&str>) -> String {
    let canonical = canonical_string(store, base_ns, prev_digest);
    let digest = Sha256::digest(canonical.as_bytes());
    format!("{TRUSTY_MODULE}{}", URL_SAFE_NO_PAD.encode(digest))
}

/// Rewrite every in-namespace reference of a store to its final form,
/// with the real digest in the digest position. Blank nodes become
/// `…#_<n>` references, numbered exactly as [`canonical_string`] numbered
/// them.
pub fn replace_in_store(store: &QuadStore, base_ns: &str, digest: &str) -> QuadStore {
    let mut bnodes = BlankNodeMap::default();
    store
        .iter()
        .map(|q| {
            Quad::new(
                transform(&q.graph, base_ns, digest, None, &mut bnodes),
                transform(&q.subject, base_ns, digest, None, &mut bnodes),
                transform(&q.predicate, base_ns, digest, None, &mut bnodes),
                transform(&q.object, base_ns, digest, None, &mut bnodes),
            )
        })
        .collect()
}

// --- tests -------------------------------------------------------------------
