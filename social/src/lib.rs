//! social-graph: a directory of profiles connected by mutual friendships.
//!
//! Wraps social-graph-core: each profile is a vertex keyed by its
//! `ProfileId`, each friendship an unweighted edge. The graph is the only
//! record of who is friends with whom; friend lists are read back from it.

mod config;
mod directory;
mod error;
mod profile;

pub use config::DirectoryConfig;
pub use directory::SocialDirectory;
pub use error::DirectoryError;
pub use profile::{Profile, ProfileId, ProfileView};
