use std::fmt;

/// Directory-issued profile identity. Used as the vertex label in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(u64);

impl ProfileId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user of the directory. Friendships are not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    name: String,
    status: String,
}

impl Profile {
    pub(crate) fn new(id: ProfileId, name: String, status: String) -> Self {
        Self { id, name, status }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store the full name as `"first last"`.
    pub fn set_name(&mut self, first: &str, last: &str) {
        self.name = format!("{} {}", first, last);
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// A profile paired with its friend count, for display.
#[derive(Debug, Clone, Copy)]
pub struct ProfileView<'a> {
    pub profile: &'a Profile,
    pub friend_count: usize,
}

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\n\tStatus: {}\n\tNumber of friend profiles: {}",
            self.profile.name, self.profile.status, self.friend_count
        )
    }
}
