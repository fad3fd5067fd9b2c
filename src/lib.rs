//! feedmap - static channel and feed registry for the package publishing pipeline
//!
//! This library answers the two configuration questions the publishing engine
//! asks at runtime: which feeds does a release channel publish to, and which
//! known shape does an arbitrary feed URL have?
//!
//! # Core Concepts
//!
//! - **Channel directory**: a fixed mapping from channel id to a
//!   [`TargetChannelConfig`] bundling the shipping, transport, symbols,
//!   checksums, and installers feeds plus the channel's aka.ms alias segment
//! - **Feed pattern catalog**: ordered URL recognizers that classify a feed
//!   URL into one of the known [`FeedKind`]s with its structured components
//!
//! Both registries are built once from compiled-in literals and never mutated,
//! so shared references are safe for unsynchronized concurrent reads. Misses
//! are ordinary `None` returns; nothing here performs I/O or panics on
//! malformed input.
//!
//! # Example Usage
//!
//! ```
//! use feedmap::{ChannelRegistry, FeedMatch, FeedPatterns};
//!
//! let channels = ChannelRegistry::with_defaults();
//! let channel = channels.lookup(131).expect("known channel");
//! assert_eq!(channel.aka_ms_channel_name, "net5/dev");
//!
//! let patterns = FeedPatterns::with_defaults();
//! match patterns.classify(&channel.shipping_feed) {
//!     Some(FeedMatch::AzDoNuGet { account, feed, .. }) => {
//!         assert_eq!(account, "dnceng");
//!         assert_eq!(feed, "dotnet5");
//!     }
//!     other => panic!("unexpected classification: {:?}", other),
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`channel`]: channel descriptors and the id-keyed directory
//! - [`feed`]: feed URL shapes and the pattern catalog
//! - [`util`]: logging setup for host pipelines

// Public modules
pub mod channel;
pub mod feed;
pub mod util;

// Re-export key types for convenient access
pub use channel::{ChannelRegistry, PublishingInfraVersion, RegistryError, TargetChannelConfig};
pub use feed::{FeedKind, FeedMatch, FeedPatterns, ProxyFeedType, EXPECTED_FEED_URL_SUFFIX};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
