//! Installer core for take-off modules
//!
//! A take-off module is a dependency whose name ends with `-take-off` and
//! whose own manifest carries a descriptor under `extra.rocket-launcher`.
//! [`ModuleInstaller`] registers each module's service provider in the
//! project's bootstrap file, merges the libraries it asks for into the
//! project manifest, runs or reports its finishing command, and optionally
//! removes the module again.
//!
//! All file access goes through a [`ProjectStore`](takeoff_fs::ProjectStore),
//! command execution through a [`CommandRunner`] and user output through a
//! [`Reporter`], so the whole flow runs against in-memory doubles in tests.

pub mod cleanup;
pub mod command;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod merge;
pub mod reporter;

pub use cleanup::{CleanupSummary, clean_module};
pub use command::{CommandOutcome, CommandRunner, ShellRunner, handle_command};
pub use config::InstallerConfig;
pub use descriptor::{Library, ModuleDescriptor};
pub use discovery::{Candidate, ModuleStatus, discover, scan};
pub use error::{Error, Result};
pub use installer::{InstallReport, InstallStage, ModuleInstaller, ModuleReport, SkipReason};
pub use manifest::ProjectManifest;
pub use merge::{MergeSummary, merge_libraries};
pub use reporter::Reporter;
