//! Channel descriptor types.

use serde::{Deserialize, Serialize};

/// Which generation of the publishing infrastructure a channel is wired for.
///
/// Every channel currently seeded in the registry is [`All`], but the field is
/// first-class so callers that select by infra version keep composing.
///
/// [`All`]: PublishingInfraVersion::All
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishingInfraVersion {
    Legacy,
    Next,
    All,
}

/// The feeds a publish targets for one release channel, plus its display name
/// and public alias path segment.
///
/// Records are immutable once constructed; the registry hands out shared
/// references. `transport_feed` may equal `shipping_feed` for channels that do
/// not split shipping and transport packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChannelConfig {
    /// Primary lookup key, unique within the registry
    pub id: u32,

    pub publishing_infra_version: PublishingInfraVersion,

    /// Display name, e.g. ".NET 5 Dev"
    pub name: String,

    /// aka.ms alias path segment; empty means no public alias is published
    pub aka_ms_channel_name: String,

    pub shipping_feed: String,
    pub transport_feed: String,
    pub symbols_feed: String,
    pub checksums_feed: String,
    pub installers_feed: String,
}

impl TargetChannelConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        publishing_infra_version: PublishingInfraVersion,
        name: impl Into<String>,
        aka_ms_channel_name: impl Into<String>,
        shipping_feed: impl Into<String>,
        transport_feed: impl Into<String>,
        symbols_feed: impl Into<String>,
        checksums_feed: impl Into<String>,
        installers_feed: impl Into<String>,
    ) -> Self {
        Self {
            id,
            publishing_infra_version,
            name: name.into(),
            aka_ms_channel_name: aka_ms_channel_name.into(),
            shipping_feed: shipping_feed.into(),
            transport_feed: transport_feed.into(),
            symbols_feed: symbols_feed.into(),
            checksums_feed: checksums_feed.into(),
            installers_feed: installers_feed.into(),
        }
    }

    /// True when this channel is valid under the given infra version selector.
    ///
    /// `All` on either side matches everything.
    pub fn supports(&self, infra: PublishingInfraVersion) -> bool {
        self.publishing_infra_version == PublishingInfraVersion::All
            || infra == PublishingInfraVersion::All
            || self.publishing_infra_version == infra
    }

    /// True when an aka.ms alias is published for this channel.
    pub fn has_public_alias(&self) -> bool {
        !self.aka_ms_channel_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TargetChannelConfig {
        TargetChannelConfig::new(
            42,
            PublishingInfraVersion::All,
            "Sample Channel",
            "sample/dev",
            "https://pkgs.dev.azure.com/dnceng/public/_packaging/sample/nuget/v3/index.json",
            "https://pkgs.dev.azure.com/dnceng/public/_packaging/sample-transport/nuget/v3/index.json",
            "https://pkgs.dev.azure.com/dnceng/public/_packaging/sample-symbols/nuget/v3/index.json",
            "https://dotnetclichecksums.blob.core.windows.net/dotnet/index.json",
            "https://dotnetcli.blob.core.windows.net/dotnet/index.json",
        )
    }

    #[test]
    fn test_new_assigns_fields() {
        let config = sample();
        assert_eq!(config.id, 42);
        assert_eq!(config.name, "Sample Channel");
        assert_eq!(config.aka_ms_channel_name, "sample/dev");
        assert!(config.shipping_feed.ends_with("sample/nuget/v3/index.json"));
    }

    #[test]
    fn test_supports_all_matches_every_selector() {
        let config = sample();
        assert!(config.supports(PublishingInfraVersion::Legacy));
        assert!(config.supports(PublishingInfraVersion::Next));
        assert!(config.supports(PublishingInfraVersion::All));
    }

    #[test]
    fn test_supports_exact_selector() {
        let mut config = sample();
        config.publishing_infra_version = PublishingInfraVersion::Next;

        assert!(config.supports(PublishingInfraVersion::Next));
        assert!(config.supports(PublishingInfraVersion::All));
        assert!(!config.supports(PublishingInfraVersion::Legacy));
    }

    #[test]
    fn test_public_alias() {
        let mut config = sample();
        assert!(config.has_public_alias());

        config.aka_ms_channel_name = String::new();
        assert!(!config.has_public_alias());
    }

    #[test]
    fn test_infra_version_serialization() {
        assert_eq!(
            serde_json::to_string(&PublishingInfraVersion::All).unwrap(),
            "\"all\""
        );
        let parsed: PublishingInfraVersion = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(parsed, PublishingInfraVersion::Legacy);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = sample();
        let json = serde_json::to_string(&config).unwrap();
        let back: TargetChannelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
