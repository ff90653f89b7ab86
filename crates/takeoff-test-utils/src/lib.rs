//! Shared test utilities for the takeoff workspace.
//!
//! This crate provides fixtures used across crate test suites. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for a project on disk
//! - [`doubles`]: recording [`Reporter`](takeoff_core::Reporter) and
//!   [`CommandRunner`](takeoff_core::CommandRunner) implementations

pub mod doubles;
pub mod project;

pub use doubles::{RecordingReporter, RecordingRunner};
pub use project::{BOOTSTRAP, TestProject};
