//! Publish client for the nanoweft mirror network.
//!
//! This crate implements the submitter side of the publication protocol: a
//! finalized nanopublication is POSTed to an ordered list of mirror
//! endpoints. A transient server failure moves on to the next endpoint, a
//! success short-circuits the list, and exhausting the list surfaces the
//! last error. An unsigned document is signed first — publishing implies
//! signing.
//!
//! # Design
//!
//! [`PublishClient`] owns an HTTP client and the endpoint list. One
//! instance can be shared across publish calls; the endpoint list is
//! read-only configuration. Independent, already-signed documents may be
//! published in parallel.
//!
//! The client never de-duplicates: publishing the same document twice is
//! the gateway's concern.

use nanoweft::sign::{sign, SignError};
use nanoweft::Nanopub;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Media type nanopublications are exchanged as.
pub const NQUADS_MEDIA_TYPE: &str = "application/n-quads";

/// Production mirror endpoints, in priority order.
pub const PRODUCTION_SERVERS: &[&str] = &[
    "http://server.nanopubs.lod.labs.vu.nl/",
    "http://server.np.dumontierlab.com/",
];

/// Endpoint of the test network. Documents published here are throwaway.
pub const TEST_SERVER: &str = "http://test-server.nanopubs.lod.labs.vu.nl/";

// ---------------------------------------------------------------------------
// PublishError
// ---------------------------------------------------------------------------

/// Errors that can occur while publishing or fetching a nanopublication.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Auto-signing the document failed.
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),

    /// The HTTP request could not be built or sent.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A server answered with a non-success status outside the transient
    /// failover class.
    #[error("server {server} rejected the request with status {status}: {body}")]
    Rejected {
        server: String,
        status: u16,
        body: String,
    },

    /// Every configured endpoint failed transiently.
    #[error("all {attempted} servers failed; last error from {server}: {reason}")]
    AllServersFailed {
        attempted: usize,
        server: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// PublishReceipt
// ---------------------------------------------------------------------------

/// The outcome of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// The final identifier of the published document.
    pub uri: String,
    /// The finalized URI of the introduced concept, if the document
    /// declared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_uri: Option<String>,
    /// The endpoint that accepted the document.
    pub server: String,
}

// ---------------------------------------------------------------------------
// PublishClient
// ---------------------------------------------------------------------------

/// Submits finalized nanopublications to the mirror network.
pub struct PublishClient {
    client: Client,
    servers: Vec<String>,
}

impl PublishClient {
    /// A client against the production mirror list.
    pub fn new() -> Self {
        Self::with_servers(PRODUCTION_SERVERS.iter().map(|s| s.to_string()).collect())
    }

    /// A client against the test network.
    pub fn test_server() -> Self {
        Self::with_servers(vec![TEST_SERVER.to_string()])
    }

    /// A client against an explicit, priority-ordered endpoint list.
    pub fn with_servers(servers: Vec<String>) -> Self {
        Self {
            client: Client::new(),
            servers,
        }
    }

    /// The configured endpoint list, in priority order.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Publish a nanopublication, signing it first if necessary.
    ///
    /// Endpoints are tried in order. A 2xx response wins and is recorded on
    /// the document; a 5xx response or a transport failure moves on to the
    /// next endpoint; a 4xx response is a permanent rejection and fails
    /// immediately.
    ///
    /// # Errors
    ///
    /// - [`PublishError::Sign`] — the document was unsigned and signing
    ///   failed; nothing was transmitted.
    /// - [`PublishError::Rejected`] — a server refused the document
    ///   permanently.
    /// - [`PublishError::AllServersFailed`] — every endpoint failed
    ///   transiently; carries the last failure.
    pub async fn publish(&self, np: &mut Nanopub) -> Result<PublishReceipt, PublishError> {
        let uri = match np.source_uri() {
            Some(u) => u.to_string(),
            None => sign(np)?,
        };
        let body = np.serialize_nquads();

        let mut last_failure: Option<(String, String)> = None;
        for server in &self.servers {
            info!("publishing {uri} to {server}");
            match self
                .client
                .post(server)
                .header(CONTENT_TYPE, NQUADS_MEDIA_TYPE)
                .body(body.clone())
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        np.mark_published(server.clone());
                        info!("published {uri} via {server}");
                        return Ok(PublishReceipt {
                            uri,
                            concept_uri: np.concept_uri().map(str::to_string),
                            server: server.clone(),
                        });
                    }
                    if status.is_server_error() {
                        warn!("server {server} returned {status}, trying the next endpoint");
                        last_failure = Some((server.clone(), format!("status {status}")));
                        continue;
                    }
                    let body = response.text().await.unwrap_or_default();
                    return Err(PublishError::Rejected {
                        server: server.clone(),
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    warn!("request to {server} failed: {e}");
                    last_failure = Some((server.clone(), e.to_string()));
                }
            }
        }

        let (server, reason) = last_failure
            .unwrap_or_else(|| ("(none)".to_string(), "no servers configured".to_string()));
        Err(PublishError::AllServersFailed {
            attempted: self.servers.len(),
            server,
            reason,
        })
    }

    /// Fetch a published nanopublication as N-Quads text.
    ///
    /// Parsing the body back into a document is left to the caller's RDF
    /// tooling.
    pub async fn fetch(&self, uri: &str) -> Result<String, PublishError> {
        let response = self
            .client
            .get(uri)
            .header(ACCEPT, NQUADS_MEDIA_TYPE)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Rejected {
                server: uri.to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.text().await?)
    }
}

impl Default for PublishClient {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
