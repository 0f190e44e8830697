use serde::Deserialize;

use crate::error::DirectoryError;

/// Directory settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Maximum number of profiles. 0 = unlimited.
    pub max_profiles: usize,
    /// Maximum number of friend suggestions returned. 0 = unlimited.
    pub suggestion_limit: usize,
}

impl DirectoryConfig {
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn allows_another_profile(&self, current: usize) -> bool {
        self.max_profiles == 0 || current < self.max_profiles
    }
}
