//! Provider registration patching for takeoff.
//!
//! The bootstrap file of a project is generated PHP that hands a list of
//! service providers to an initialization call:
//!
//! ```text
//! AppBuilder::init(__DIR__ . '/../', [
//!     \Foo\Provider::class,
//! ]);
//! ```
//!
//! This crate edits that list as plain text. [`scanner`] locates the call and
//! its arguments without parsing PHP; [`writer`] splices entries in and out.
//! Nothing here performs I/O: every function takes the current text and
//! returns the new text, if any.

pub mod scanner;
pub mod writer;

pub use scanner::{CallSpan, find_call};
pub use writer::{PatchOutcome, is_registered, provider_reference, register, unregister};
