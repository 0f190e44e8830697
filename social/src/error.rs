use thiserror::Error;

use crate::profile::ProfileId;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("profile {0} not found")]
    ProfileNotFound(ProfileId),

    #[error("directory is full: max_profiles={limit}")]
    CapacityExceeded { limit: usize },

    #[error("invalid directory config: {0}")]
    Config(#[from] serde_json::Error),
}
