//! Channel directory: channel id → the feeds a publish targets.
//!
//! The registry is seeded from compiled-in literals at construction and never
//! mutated afterwards, so it is safe to share across threads without locking.

use super::config::{PublishingInfraVersion, TargetChannelConfig};
use crate::feed::EXPECTED_FEED_URL_SUFFIX;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::trace;

const FEED_FOR_CHECKSUMS: &str =
    "https://dotnetclichecksums.blob.core.windows.net/dotnet/index.json";
const FEED_FOR_INSTALLERS: &str = "https://dotnetcli.blob.core.windows.net/dotnet/index.json";

const FEED_INTERNAL_FOR_CHECKSUMS: &str =
    "https://dotnetclichecksumsmsrc.blob.core.windows.net/dotnet/index.json";
const FEED_INTERNAL_FOR_INSTALLERS: &str =
    "https://dotnetclimsrc.blob.core.windows.net/dotnet/index.json";

const FEED_GENERAL_TESTING: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/general-testing/nuget/v3/index.json";
const FEED_GENERAL_TESTING_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/general-testing-symbols/nuget/v3/index.json";

const FEED_DOTNET_EXPERIMENTAL: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet-experimental/nuget/v3/index.json";
const FEED_DOTNET_EXPERIMENTAL_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet-experimental-symbols/nuget/v3/index.json";

const FEED_DOTNET_ENG_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet-eng/nuget/v3/index.json";
const FEED_DOTNET_ENG_TRANSPORT: &str = FEED_DOTNET_ENG_SHIPPING;
const FEED_DOTNET_ENG_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet-eng-symbols/nuget/v3/index.json";

const FEED_DOTNET_TOOLS_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/internal/_packaging/dotnet-tools/nuget/v3/index.json";
const FEED_DOTNET_TOOLS_TRANSPORT: &str = FEED_DOTNET_TOOLS_SHIPPING;
const FEED_DOTNET_TOOLS_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/internal/_packaging/dotnet-tools-symbols/nuget/v3/index.json";

const FEED_DOTNET_TOOLS_INTERNAL_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/internal/_packaging/dotnet-tools-internal/nuget/v3/index.json";
const FEED_DOTNET_TOOLS_INTERNAL_TRANSPORT: &str = FEED_DOTNET_TOOLS_INTERNAL_SHIPPING;
const FEED_DOTNET_TOOLS_INTERNAL_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/internal/_packaging/dotnet-tools-internal-symbols/nuget/v3/index.json";

const FEED_DOTNET31_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1/nuget/v3/index.json";
const FEED_DOTNET31_TRANSPORT: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1-transport/nuget/v3/index.json";
const FEED_DOTNET31_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1-symbols/nuget/v3/index.json";

// The 3.1-internal feeds live under the public dnceng project, unlike the
// dotnet-tools-internal feeds.
const FEED_DOTNET31_INTERNAL_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1-internal/nuget/v3/index.json";
const FEED_DOTNET31_INTERNAL_TRANSPORT: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1-internal-transport/nuget/v3/index.json";
const FEED_DOTNET31_INTERNAL_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet3.1-internal-symbols/nuget/v3/index.json";

const FEED_DOTNET5_SHIPPING: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet5/nuget/v3/index.json";
const FEED_DOTNET5_TRANSPORT: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet5-transport/nuget/v3/index.json";
const FEED_DOTNET5_SYMBOLS: &str =
    "https://pkgs.dev.azure.com/dnceng/public/_packaging/dotnet5-symbols/nuget/v3/index.json";

/// Integrity violations reported by [`ChannelRegistry::validate`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate channel id {0}")]
    DuplicateChannelId(u32),

    #[error("channel '{name}': id must be a positive integer")]
    InvalidChannelId { name: String },

    #[error("channel {id}: {field} must not be empty")]
    EmptyField { id: u32, field: &'static str },

    #[error("channel {id}: {field} is not an https URL ending with 'index.json': {url}")]
    InvalidFeedUrl {
        id: u32,
        field: &'static str,
        url: String,
    },
}

/// Immutable directory of every release channel the pipeline can publish to.
pub struct ChannelRegistry {
    channels: Vec<TargetChannelConfig>,
    by_id: HashMap<u32, usize>,
}

impl ChannelRegistry {
    /// Builds the registry with the built-in channel table.
    pub fn with_defaults() -> Self {
        Self::from_channels(default_channels())
    }

    /// Builds a registry from an explicit channel table.
    ///
    /// On duplicate ids the first occurrence wins for [`lookup`]; run
    /// [`validate`] to surface the duplicate.
    ///
    /// [`lookup`]: ChannelRegistry::lookup
    /// [`validate`]: ChannelRegistry::validate
    pub fn from_channels(channels: Vec<TargetChannelConfig>) -> Self {
        let mut by_id = HashMap::with_capacity(channels.len());
        for (index, channel) in channels.iter().enumerate() {
            by_id.entry(channel.id).or_insert(index);
        }

        Self { channels, by_id }
    }

    /// Looks up a channel by id. Unknown ids yield `None`.
    pub fn lookup(&self, id: u32) -> Option<&TargetChannelConfig> {
        let found = self.by_id.get(&id).map(|&index| &self.channels[index]);
        if found.is_none() {
            trace!(id, "channel id not present in the registry");
        }
        found
    }

    /// Every channel in declaration order.
    ///
    /// The order is stable within a process; consumers must not depend on it
    /// beyond that.
    pub fn all(&self) -> &[TargetChannelConfig] {
        &self.channels
    }

    /// Channels valid under the given infra version selector.
    pub fn supporting(
        &self,
        infra: PublishingInfraVersion,
    ) -> impl Iterator<Item = &TargetChannelConfig> {
        self.channels
            .iter()
            .filter(move |channel| channel.supports(infra))
    }

    /// Checks the registry invariants: positive unique ids, non-empty names,
    /// and https feed URLs ending with `index.json`.
    ///
    /// The built-in table always passes; this exists for pipelines that splice
    /// in private channel tables and want to fail fast at startup.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::with_capacity(self.channels.len());

        for channel in &self.channels {
            if channel.id == 0 {
                return Err(RegistryError::InvalidChannelId {
                    name: channel.name.clone(),
                });
            }
            if !seen.insert(channel.id) {
                return Err(RegistryError::DuplicateChannelId(channel.id));
            }
            if channel.name.is_empty() {
                return Err(RegistryError::EmptyField {
                    id: channel.id,
                    field: "name",
                });
            }

            let feeds = [
                ("shipping_feed", &channel.shipping_feed),
                ("transport_feed", &channel.transport_feed),
                ("symbols_feed", &channel.symbols_feed),
                ("checksums_feed", &channel.checksums_feed),
                ("installers_feed", &channel.installers_feed),
            ];
            for (field, url) in feeds {
                if url.is_empty() {
                    return Err(RegistryError::EmptyField {
                        id: channel.id,
                        field,
                    });
                }
                if !url.starts_with("https://") || !url.ends_with(EXPECTED_FEED_URL_SUFFIX) {
                    return Err(RegistryError::InvalidFeedUrl {
                        id: channel.id,
                        field,
                        url: url.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_channels() -> Vec<TargetChannelConfig> {
    vec![
        TargetChannelConfig::new(
            131,
            PublishingInfraVersion::All,
            ".NET 5 Dev",
            "net5/dev",
            FEED_DOTNET5_SHIPPING,
            FEED_DOTNET5_TRANSPORT,
            FEED_DOTNET5_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            739,
            PublishingInfraVersion::All,
            ".NET 5 Preview 3",
            "net5/preview3",
            FEED_DOTNET5_SHIPPING,
            FEED_DOTNET5_TRANSPORT,
            FEED_DOTNET5_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            856,
            PublishingInfraVersion::All,
            ".NET 5 Preview 4",
            "net5/preview4",
            FEED_DOTNET5_SHIPPING,
            FEED_DOTNET5_TRANSPORT,
            FEED_DOTNET5_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            857,
            PublishingInfraVersion::All,
            ".NET 5 Preview 5",
            "net5/preview5",
            FEED_DOTNET5_SHIPPING,
            FEED_DOTNET5_TRANSPORT,
            FEED_DOTNET5_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            2,
            PublishingInfraVersion::All,
            ".NET Eng - Latest",
            "eng/daily",
            FEED_DOTNET_ENG_SHIPPING,
            FEED_DOTNET_ENG_TRANSPORT,
            FEED_DOTNET_ENG_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            9,
            PublishingInfraVersion::All,
            ".NET Eng - Validation",
            "eng/validation",
            FEED_DOTNET_ENG_SHIPPING,
            FEED_DOTNET_ENG_TRANSPORT,
            FEED_DOTNET_ENG_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            529,
            PublishingInfraVersion::All,
            "General Testing",
            "generaltesting",
            FEED_GENERAL_TESTING,
            FEED_GENERAL_TESTING,
            FEED_GENERAL_TESTING_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            548,
            PublishingInfraVersion::All,
            ".NET Core Tooling Dev",
            "",
            FEED_DOTNET_TOOLS_SHIPPING,
            FEED_DOTNET_TOOLS_TRANSPORT,
            FEED_DOTNET_TOOLS_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            549,
            PublishingInfraVersion::All,
            ".NET Core Tooling Release",
            "",
            FEED_DOTNET_TOOLS_SHIPPING,
            FEED_DOTNET_TOOLS_TRANSPORT,
            FEED_DOTNET_TOOLS_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            551,
            PublishingInfraVersion::All,
            ".NET Internal Tooling",
            "",
            FEED_DOTNET_TOOLS_INTERNAL_SHIPPING,
            FEED_DOTNET_TOOLS_INTERNAL_TRANSPORT,
            FEED_DOTNET_TOOLS_INTERNAL_SYMBOLS,
            FEED_INTERNAL_FOR_CHECKSUMS,
            FEED_INTERNAL_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            562,
            PublishingInfraVersion::All,
            ".NET Core Experimental",
            "",
            FEED_DOTNET_EXPERIMENTAL,
            FEED_DOTNET_EXPERIMENTAL,
            FEED_DOTNET_EXPERIMENTAL_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            678,
            PublishingInfraVersion::All,
            ".NET Eng Services - Int",
            "",
            FEED_DOTNET_ENG_SHIPPING,
            FEED_DOTNET_ENG_TRANSPORT,
            FEED_DOTNET_ENG_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            679,
            PublishingInfraVersion::All,
            ".NET Eng Services - Prod",
            "",
            FEED_DOTNET_ENG_SHIPPING,
            FEED_DOTNET_ENG_TRANSPORT,
            FEED_DOTNET_ENG_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            921,
            PublishingInfraVersion::All,
            ".NET Core SDK 3.1.4xx",
            "",
            FEED_DOTNET31_SHIPPING,
            FEED_DOTNET31_TRANSPORT,
            FEED_DOTNET31_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            922,
            PublishingInfraVersion::All,
            ".NET Core SDK 3.1.4xx Internal",
            "",
            FEED_DOTNET31_INTERNAL_SHIPPING,
            FEED_DOTNET31_INTERNAL_TRANSPORT,
            FEED_DOTNET31_INTERNAL_SYMBOLS,
            FEED_INTERNAL_FOR_CHECKSUMS,
            FEED_INTERNAL_FOR_INSTALLERS,
        ),
        TargetChannelConfig::new(
            759,
            PublishingInfraVersion::All,
            ".NET Core SDK 3.1.3xx",
            "",
            FEED_DOTNET31_SHIPPING,
            FEED_DOTNET31_TRANSPORT,
            FEED_DOTNET31_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
        // Unlike channel 922, this internal channel publishes its checksums
        // and installers to the public endpoints. Carried over verbatim from
        // the upstream table; flagged with the maintainers.
        TargetChannelConfig::new(
            760,
            PublishingInfraVersion::All,
            ".NET Core SDK 3.1.3xx Internal",
            "",
            FEED_DOTNET31_INTERNAL_SHIPPING,
            FEED_DOTNET31_INTERNAL_TRANSPORT,
            FEED_DOTNET31_INTERNAL_SYMBOLS,
            FEED_FOR_CHECKSUMS,
            FEED_FOR_INSTALLERS,
        ),
    ]
}
