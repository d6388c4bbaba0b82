use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use sbom_model::Coordinate;
use sbom_util::errors::{SbomError, SbomResult};

use crate::raw_graph::RawGraph;
use crate::version;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BASE_URL: &str = "https://api.deps.dev/v3/systems";

/// Fetches the transitive dependency graph of one package from a remote
/// metadata service. Implementations MUST NOT raise on an unknown package
/// or a transient network failure — both degrade to `None` so the
/// GraphBuilder can materialize a leaf node and continue.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn fetch_graph(&self, coordinate: &Coordinate) -> Option<RawGraph>;
}

/// A [`MetadataClient`] backed by deps.dev.
///
/// Built on a single shared `reqwest::Client` handed to every fetch rather
/// than constructing one per request.
pub struct DepsDevClient {
    http: Client,
    base_url: String,
}

impl DepsDevClient {
    pub fn new() -> SbomResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Construct a client against a non-default base URL — used by tests
    /// (wired to a `wiremock` server) and by callers pointed at a
    /// self-hosted deps.dev mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> SbomResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sbom-engine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SbomError::Network {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl MetadataClient for DepsDevClient {
    async fn fetch_graph(&self, coordinate: &Coordinate) -> Option<RawGraph> {
        let translation = version::translate(&coordinate.version);
        let encoded_name = utf8_percent_encode(&coordinate.name, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}/{}/packages/{}/versions/{}:dependencies",
            self.base_url, coordinate.system, encoded_name, translation.query_version
        );

        tracing::debug!(
            url = %url,
            system = %coordinate.system,
            name = %coordinate.name,
            query_version = %translation.query_version,
            "fetching dependency graph"
        );

        let response = match self.http.get(&url).header("Accept", "application/json").send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::info!(url = %url, error = %e, "metadata fetch failed, treating as unknown package");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::info!(url = %url, status = %response.status(), "non-200 from metadata service, treating as unknown package");
            return None;
        }

        match response.json::<RawGraph>().await {
            Ok(graph) => {
                tracing::debug!(url = %url, nodes = graph.nodes.len(), edges = graph.edges.len(), "fetched dependency graph");
                Some(graph)
            }
            Err(e) => {
                tracing::info!(url = %url, error = %e, "malformed metadata response, treating as unknown package");
                None
            }
        }
    }
}
