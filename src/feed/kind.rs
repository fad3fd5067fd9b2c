//! Identifiers for the known feed URL shapes.

use serde::{Deserialize, Serialize};

/// The feed URL shapes the publishing pipeline knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    /// Proxy-backed Azure Storage feed with a `darc-{int|pub}-{repo}-{sha}` base feed name
    #[serde(rename = "azure-storage-proxy")]
    AzureStorageProxy,

    /// Proxy-backed Azure Storage feed with an arbitrary base feed name
    #[serde(rename = "azure-storage-proxy-static")]
    AzureStorageProxyStatic,

    /// Plain Azure Storage blob container feed
    #[serde(rename = "azure-storage-static-blob")]
    AzureStorageStaticBlob,

    /// Azure DevOps NuGet feed under pkgs.dev.azure.com
    #[serde(rename = "azdo-nuget")]
    AzDoNuGet,
}

impl FeedKind {
    pub fn name(&self) -> &'static str {
        match self {
            FeedKind::AzureStorageProxy => "azure-storage-proxy",
            FeedKind::AzureStorageProxyStatic => "azure-storage-proxy-static",
            FeedKind::AzureStorageStaticBlob => "azure-storage-static-blob",
            FeedKind::AzDoNuGet => "azdo-nuget",
        }
    }

    pub fn all_variants() -> &'static [FeedKind] {
        &[
            FeedKind::AzureStorageProxy,
            FeedKind::AzureStorageProxyStatic,
            FeedKind::AzureStorageStaticBlob,
            FeedKind::AzDoNuGet,
        ]
    }
}

/// Whether a proxy-backed feed serves internal or public packages.
///
/// Wire form is the `int`/`pub` token embedded in darc base feed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyFeedType {
    #[serde(rename = "int")]
    Internal,
    #[serde(rename = "pub")]
    Public,
}

impl ProxyFeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyFeedType::Internal => "int",
            ProxyFeedType::Public => "pub",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "int" => Some(ProxyFeedType::Internal),
            "pub" => Some(ProxyFeedType::Public),
            _ => None,
        }
    }
}
