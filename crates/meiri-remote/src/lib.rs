//! # Meiri Remote
//!
//! Blocking HTTP implementations of the `meiri-core` collaborator traits:
//! [`YouTubeCatalog`] lists a channel through the YouTube Data API v3 and
//! [`PostgrestTable`] reaches Supabase tables through PostgREST.

pub mod error;
pub mod postgrest;
pub mod youtube;

pub use error::RemoteError;
pub use postgrest::PostgrestTable;
pub use youtube::YouTubeCatalog;
