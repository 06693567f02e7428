//! Charter Remote - the network collaborators of the chart pipeline
//!
//! Everything with a socket lives here: listing an image's tag refs and
//! fetching raw per-tag files. The `Image` type wires those fetches into the
//! pure resolution and decoding logic from `charter-core`.

pub mod client;
pub mod error;
pub mod image;

pub use client::RemoteClient;
pub use error::{RemoteError, Result};
pub use image::Image;
