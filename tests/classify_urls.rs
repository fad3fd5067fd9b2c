//! End-to-end checks of feed URL classification
//!
//! These tests run the pattern catalog against representative feed URLs,
//! including every concrete feed the channel directory references.

use feedmap::{ChannelRegistry, FeedKind, FeedMatch, FeedPatterns, ProxyFeedType};
use yare::parameterized;

#[parameterized(
    proxy_internal = {
        "https://dotnet-feed-internal.azurewebsites.net/container/dotnet-core-internal/sig/abc123def/se/2020-02-02/darc-int-dotnet-arcade-services-babababababe-08/index.json",
        Some(FeedKind::AzureStorageProxy),
    },
    proxy_public = {
        "https://dotnet-feed.azurewebsites.net/container/dotnet-core/sig/w0rd/se/2020-03-15/darc-pub-dotnet-runtime-4f3a21b/index.json",
        Some(FeedKind::AzureStorageProxy),
    },
    proxy_static = {
        "https://dotnet-feed-internal.azurewebsites.net/container/dotnet-core-internal/sig/abc123def/se/2020-02-02/my-custom-feed/index.json",
        Some(FeedKind::AzureStorageProxyStatic),
    },
    static_blob = {
        "https://dotnetfeed.blob.core.windows.net/dotnet-core/index.json",
        Some(FeedKind::AzureStorageStaticBlob),
    },
    azdo_with_project = {
        "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet5/nuget/v3/index.json",
        Some(FeedKind::AzDoNuGet),
    },
    azdo_org_scoped = {
        "https://pkgs.dev.azure.com/dnceng/_packaging/internal-feed-name/nuget/v3/index.json",
        Some(FeedKind::AzDoNuGet),
    },
    unrelated_host = { "https://example.com/nothing", None },
    wrong_suffix = {
        "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet5/nuget/v3/feed.json",
        None,
    },
    not_a_url = { "definitely not a feed", None },
    empty = { "", None },
)]
fn classify_kind(url: &str, expected: Option<FeedKind>) {
    let patterns = FeedPatterns::with_defaults();
    assert_eq!(patterns.classify(url).map(|m| m.kind()), expected);
}

#[test]
fn proxy_captures_are_structured() {
    let patterns = FeedPatterns::with_defaults();
    let url = "https://dotnet-feed-internal.azurewebsites.net/container/dotnet-core-internal/sig/abc123def/se/2020-02-02/darc-int-dotnet-arcade-services-babababababe-08/index.json";

    match patterns.classify(url) {
        Some(FeedMatch::AzureStorageProxy {
            feed_url,
            container,
            base_feed_name,
            feed_type,
            repository,
            sha,
            subversion,
        }) => {
            assert!(feed_url.starts_with("https://"));
            assert!(url.starts_with(&feed_url));
            assert_eq!(container, "dotnet-core-internal");
            assert_eq!(base_feed_name, "darc-int-dotnet-arcade-services-babababababe-08/");
            assert_eq!(feed_type, ProxyFeedType::Internal);
            assert_eq!(repository, "dotnet-arcade-services");
            assert_eq!(sha, "babababababe");
            assert_eq!(subversion, "08");
        }
        other => panic!("expected proxy match, got {:?}", other),
    }
}

#[test]
fn proxy_sha_is_hex_and_bounded() {
    let patterns = FeedPatterns::with_defaults();
    let url = "https://dotnet-feed.azurewebsites.net/container/dotnet-core/sig/w0rd/se/2020-03-15/darc-pub-dotnet-runtime-4f3a21b/index.json";

    match patterns.classify(url) {
        Some(FeedMatch::AzureStorageProxy {
            sha, subversion, ..
        }) => {
            assert!(sha.len() >= 7 && sha.len() <= 40);
            assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(subversion.is_empty() || subversion.chars().all(|c| c.is_ascii_digit()));
        }
        other => panic!("expected proxy match, got {:?}", other),
    }
}

#[test]
fn darc_names_always_classify_as_proxy_not_static() {
    // Both proxy patterns accept a darc-named URL; priority order decides.
    let patterns = FeedPatterns::with_defaults();
    let urls = [
        "https://dotnet-feed-internal.azurewebsites.net/container/c/sig/s/se/2020-02-02/darc-int-arcade-abcdef012/index.json",
        "https://dotnet-feed.azurewebsites.net/container/c/sig/s/se/2021-12-31/darc-pub-sdk-0123456789abcdef-1/index.json",
    ];

    for url in urls {
        let matched = patterns.classify(url).expect("darc URL classifies");
        assert_eq!(matched.kind(), FeedKind::AzureStorageProxy, "url: {}", url);
    }
}

#[test]
fn every_configured_feed_classifies() {
    // Each feed URL in the channel directory must be recognizable, and the
    // Azure DevOps ones must carry the dnceng account.
    let registry = ChannelRegistry::with_defaults();
    let patterns = FeedPatterns::with_defaults();

    for channel in registry.all() {
        for url in [
            &channel.shipping_feed,
            &channel.transport_feed,
            &channel.symbols_feed,
            &channel.checksums_feed,
            &channel.installers_feed,
        ] {
            let matched = patterns
                .classify(url)
                .unwrap_or_else(|| panic!("unclassifiable feed URL: {}", url));

            match matched {
                FeedMatch::AzDoNuGet {
                    account,
                    visibility,
                    ..
                } => {
                    assert_eq!(account, "dnceng");
                    assert!(visibility == "public/" || visibility == "internal/");
                }
                FeedMatch::AzureStorageStaticBlob => {
                    // checksums/installers blob endpoints
                    assert!(url.contains(".blob.core.windows.net/"));
                }
                other => panic!("unexpected shape for {}: {:?}", url, other),
            }
        }
    }
}

#[test]
fn azdo_visibility_keeps_trailing_slash() {
    let patterns = FeedPatterns::with_defaults();

    match patterns
        .classify("https://pkgs.dev.azure.com/dnceng/internal/_packaging/dotnet-tools/nuget/v3/index.json")
    {
        Some(FeedMatch::AzDoNuGet { visibility, feed, .. }) => {
            assert_eq!(visibility, "internal/");
            assert_eq!(feed, "dotnet-tools");
        }
        other => panic!("expected AzDo match, got {:?}", other),
    }
}
