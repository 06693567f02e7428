//! Charter Core - version resolution and config decoding for chart generation
//!
//! This crate holds the pure logic of charter:
//! - `CascadePatterns`: tiered matching of tag refs to versions
//! - `resolve_versions`: one latest version per release track
//! - `Config`: the per-version configuration document with its interpolation pass
//! - `ContainerPort` extraction from config fields or build-file text
//!
//! Nothing here touches the network; callers hand in already-fetched ref
//! names and byte streams.

pub mod cascade;
pub mod config;
pub mod error;
pub mod ports;
pub mod resolve;
pub mod version;

pub use cascade::{CascadePatterns, CascadeTier};
pub use config::Config;
pub use error::{CoreError, Result};
pub use ports::{ContainerPort, Protocol, declared_ports, exposed_ports, parse_port};
pub use resolve::resolve_versions;
pub use version::{Version, VersionList, VersionMap};
