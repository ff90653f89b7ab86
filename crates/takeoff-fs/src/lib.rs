//! Filesystem access for takeoff
//!
//! Every read and write the installer performs goes through a [`ProjectStore`],
//! addressed by paths relative to the project root. [`DiskStore`] is the real
//! implementation; [`MemoryStore`] keeps everything in memory for tests.

pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{DiskStore, MemoryStore, ProjectStore};
