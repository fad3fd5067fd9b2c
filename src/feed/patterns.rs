//! Feed URL pattern catalog.
//!
//! The publishing pipeline receives feed URLs from build manifests and channel
//! configuration and needs to know which of the known feed shapes it is looking
//! at before it can pick an upload strategy. This module holds the recognizers
//! for those shapes and a [`FeedPatterns::classify`] entry point that tries them
//! in priority order.
//!
//! Ordering matters: the darc-specific proxy pattern and the static proxy
//! pattern overlap on the same host family, and a URL matching both must
//! classify as [`FeedKind::AzureStorageProxy`]. The static variant is only a
//! fallback for non-conforming base feed names.

use super::kind::{FeedKind, ProxyFeedType};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Every feed URL the pipeline publishes to ends with this suffix.
pub const EXPECTED_FEED_URL_SUFFIX: &str = "index.json";

/// Matches proxy-backed feeds like
/// `https://dotnet-feed-internal.azurewebsites.net/container/dotnet-core-internal/sig/abc123def/se/2020-02-02/darc-int-dotnet-arcade-services-babababababe-08/index.json`
pub const AZURE_STORAGE_PROXY_FEED_PATTERN: &str = r"^(?P<feedURL>https://[a-z-]+\.azurewebsites\.net/container/(?P<container>[^/]+)/sig/\w+/se/[0-9]{4}-[0-9]{2}-[0-9]{2}/(?P<baseFeedName>darc-(?P<type>int|pub)-(?P<repository>.+?)-(?P<sha>[A-Fa-f0-9]{7,40})-?(?P<subversion>\d*)/))index\.json$";

/// Fallback for proxy-backed feeds whose base feed name is not a darc name.
pub const AZURE_STORAGE_PROXY_FEED_STATIC_PATTERN: &str = r"^(?P<feedURL>https://[a-z-]+\.azurewebsites\.net/container/(?P<container>[^/]+)/sig/\w+/se/[0-9]{4}-[0-9]{2}-[0-9]{2}/(?P<baseFeedName>[^/]+/))index\.json$";

/// Matches blob container feeds like
/// `https://dotnetfeed.blob.core.windows.net/dotnet-core/index.json`
pub const AZURE_STORAGE_STATIC_BLOB_FEED_PATTERN: &str =
    r"^https://[a-z-]+\.blob\.core\.windows\.net/[^/]+/index\.json$";

/// Matches Azure DevOps NuGet feeds like
/// `https://pkgs.dev.azure.com/dnceng/public/_packaging/public-feed-name/nuget/v3/index.json`
/// or `https://pkgs.dev.azure.com/dnceng/_packaging/internal-feed-name/nuget/v3/index.json`
pub const AZDO_NUGET_FEED_PATTERN: &str = r"^https://pkgs\.dev\.azure\.com/(?P<account>[a-zA-Z0-9]+)/(?P<visibility>[a-zA-Z0-9-]+/)?_packaging/(?P<feed>.+)/nuget/v3/index\.json$";

/// A classified feed URL together with its extracted components.
///
/// Which fields are present depends on the shape; the empty string stands in
/// for absent optional components (`subversion`, `visibility`) so consumers
/// see exactly the substrings the URL carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FeedMatch {
    #[serde(rename = "azure-storage-proxy")]
    AzureStorageProxy {
        /// Everything before the `index.json` suffix, trailing slash included
        feed_url: String,
        container: String,
        /// The darc segment of the path, trailing slash included
        base_feed_name: String,
        feed_type: ProxyFeedType,
        repository: String,
        sha: String,
        /// Trailing numeric disambiguator of the darc name; empty when absent
        subversion: String,
    },

    #[serde(rename = "azure-storage-proxy-static")]
    AzureStorageProxyStatic {
        feed_url: String,
        container: String,
        base_feed_name: String,
    },

    #[serde(rename = "azure-storage-static-blob")]
    AzureStorageStaticBlob,

    #[serde(rename = "azdo-nuget")]
    AzDoNuGet {
        account: String,
        /// Project segment with its trailing slash, e.g. `public/`; empty for
        /// organization-scoped feeds
        visibility: String,
        feed: String,
    },
}

impl FeedMatch {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedMatch::AzureStorageProxy { .. } => FeedKind::AzureStorageProxy,
            FeedMatch::AzureStorageProxyStatic { .. } => FeedKind::AzureStorageProxyStatic,
            FeedMatch::AzureStorageStaticBlob => FeedKind::AzureStorageStaticBlob,
            FeedMatch::AzDoNuGet { .. } => FeedKind::AzDoNuGet,
        }
    }
}

/// The ordered catalog of compiled feed URL recognizers.
pub struct FeedPatterns {
    patterns: Vec<(FeedKind, Regex)>,
}

impl FeedPatterns {
    /// Builds the catalog with the built-in patterns in priority order.
    pub fn with_defaults() -> Self {
        let patterns = [
            (FeedKind::AzureStorageProxy, AZURE_STORAGE_PROXY_FEED_PATTERN),
            (
                FeedKind::AzureStorageProxyStatic,
                AZURE_STORAGE_PROXY_FEED_STATIC_PATTERN,
            ),
            (
                FeedKind::AzureStorageStaticBlob,
                AZURE_STORAGE_STATIC_BLOB_FEED_PATTERN,
            ),
            (FeedKind::AzDoNuGet, AZDO_NUGET_FEED_PATTERN),
        ]
        .into_iter()
        .map(|(kind, pattern)| {
            let regex = Regex::new(pattern).expect("built-in feed pattern compiles");
            (kind, regex)
        })
        .collect();

        Self { patterns }
    }

    /// Classifies a feed URL against the known shapes.
    ///
    /// Patterns are tried in declaration order and the first hit wins, so a
    /// darc-named proxy URL classifies as [`FeedKind::AzureStorageProxy`] even
    /// though the static proxy pattern would also accept it. Unrecognized
    /// input yields `None`; this never panics.
    pub fn classify(&self, url: &str) -> Option<FeedMatch> {
        for (kind, regex) in &self.patterns {
            if let Some(caps) = regex.captures(url) {
                if let Some(matched) = extract(*kind, &caps) {
                    debug!(kind = matched.kind().name(), url, "classified feed URL");
                    return Some(matched);
                }
            }
        }

        trace!(url, "feed URL did not match any known pattern");
        None
    }
}

impl Default for FeedPatterns {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn extract(kind: FeedKind, caps: &Captures) -> Option<FeedMatch> {
    match kind {
        FeedKind::AzureStorageProxy => Some(FeedMatch::AzureStorageProxy {
            feed_url: group(caps, "feedURL")?,
            container: group(caps, "container")?,
            base_feed_name: group(caps, "baseFeedName")?,
            feed_type: ProxyFeedType::parse(caps.name("type")?.as_str())?,
            repository: group(caps, "repository")?,
            sha: group(caps, "sha")?,
            subversion: optional_group(caps, "subversion"),
        }),
        FeedKind::AzureStorageProxyStatic => Some(FeedMatch::AzureStorageProxyStatic {
            feed_url: group(caps, "feedURL")?,
            container: group(caps, "container")?,
            base_feed_name: group(caps, "baseFeedName")?,
        }),
        FeedKind::AzureStorageStaticBlob => Some(FeedMatch::AzureStorageStaticBlob),
        FeedKind::AzDoNuGet => Some(FeedMatch::AzDoNuGet {
            account: group(caps, "account")?,
            visibility: optional_group(caps, "visibility"),
            feed: group(caps, "feed")?,
        }),
    }
}

fn group(caps: &Captures, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn optional_group(caps: &Captures, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
