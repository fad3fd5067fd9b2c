//! Feed URL shapes and the pattern catalog that recognizes them.

pub mod kind;
pub mod patterns;

pub use kind::{FeedKind, ProxyFeedType};
pub use patterns::{
    FeedMatch, FeedPatterns, AZDO_NUGET_FEED_PATTERN, AZURE_STORAGE_PROXY_FEED_PATTERN,
    AZURE_STORAGE_PROXY_FEED_STATIC_PATTERN, AZURE_STORAGE_STATIC_BLOB_FEED_PATTERN,
    EXPECTED_FEED_URL_SUFFIX,
};
