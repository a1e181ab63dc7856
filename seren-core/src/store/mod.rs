//! Storage layer for seren
//!
//! Persistence is an opaque key→string blob store backed by SQLite. The
//! in-memory stores are authoritative for the process lifetime: blobs are
//! read once at startup and rewritten (best-effort) after every change.

pub mod blob;
pub mod entries;
pub mod profile;

pub use blob::BlobStore;
pub use entries::{EntryPatch, EntryStore, ENTRIES_KEY};
pub use profile::{ProfileStore, PROFILE_KEY};
