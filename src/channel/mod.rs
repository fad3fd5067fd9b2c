//! Release channel directory.
//!
//! A channel groups builds that publish to the same set of feeds. The
//! directory maps a channel id to a [`TargetChannelConfig`] bundling the five
//! feed URLs a publish must target plus the channel's display name and aka.ms
//! alias segment.

pub mod config;
pub mod registry;

pub use config::{PublishingInfraVersion, TargetChannelConfig};
pub use registry::{ChannelRegistry, RegistryError};
