//! Wire-format messages for the cluster quota subsystem.
//!
//! These messages are hand-maintained prost definitions rather than the
//! output of a protoc build step, so that the crate builds without a
//! compiler toolchain dependency. They must stay wire-compatible with the
//! records persisted by the master, so field tags are append-only: never
//! renumber or re-use a tag.

// The message structs below follow the prost derive conventions, which do
// not match all of the workspace lint rules.
#![expect(missing_copy_implementations)]

pub mod v1;

// Re-export prost for users of the wire types.
pub use prost;
pub use prost::{DecodeError, EncodeError};
