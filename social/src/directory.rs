use std::collections::{HashMap, HashSet};

use social_graph_core::{
    bfs_neighborhood, breadth_first_traversal, degree_centrality, shortest_path, Graph,
    INFINITE_COST,
};
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::profile::{Profile, ProfileId, ProfileView};

/// Profiles and the friendship graph between them.
///
/// Profile IDs come from a counter owned by this instance, starting at 1.
/// IDs are never reused, even after a profile is removed.
#[derive(Debug, Clone)]
pub struct SocialDirectory {
    graph: Graph<ProfileId>,
    profiles: HashMap<ProfileId, Profile>,
    next_id: u64,
    config: DirectoryConfig,
}

impl SocialDirectory {
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            graph: Graph::new(),
            profiles: HashMap::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    // --- profiles ---

    pub fn add_user(
        &mut self,
        name: impl Into<String>,
        status: impl Into<String>,
    ) -> Result<ProfileId, DirectoryError> {
        if !self.config.allows_another_profile(self.profiles.len()) {
            return Err(DirectoryError::CapacityExceeded {
                limit: self.config.max_profiles,
            });
        }

        let id = ProfileId::new(self.next_id);
        self.next_id += 1;

        self.graph.add_vertex(id);
        let profile = Profile::new(id, name.into(), status.into());
        info!(id = %id, name = %profile.name(), "profile added");
        self.profiles.insert(id, profile);
        Ok(id)
    }

    /// Remove a profile and all of its friendships.
    pub fn remove_user(&mut self, id: ProfileId) -> Option<Profile> {
        self.graph.remove_vertex(&id)?;
        let removed = self.profiles.remove(&id);
        info!(id = %id, "profile removed");
        removed
    }

    pub fn exists(&self, id: ProfileId) -> bool {
        self.graph.contains_vertex(&id)
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    pub fn profile_mut(&mut self, id: ProfileId) -> Option<&mut Profile> {
        self.profiles.get_mut(&id)
    }

    pub fn view(&self, id: ProfileId) -> Option<ProfileView<'_>> {
        self.profiles.get(&id).map(|profile| ProfileView {
            profile,
            friend_count: self.graph.degree(&id),
        })
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    // --- friendships ---

    pub fn create_friendship(&mut self, a: ProfileId, b: ProfileId) -> bool {
        let created = self.graph.add_edge(&a, &b);
        if created {
            debug!(a = %a, b = %b, "friendship created");
        }
        created
    }

    pub fn remove_friendship(&mut self, a: ProfileId, b: ProfileId) -> bool {
        let removed = self.graph.remove_edge(&a, &b);
        if removed {
            debug!(a = %a, b = %b, "friendship removed");
        }
        removed
    }

    pub fn has_friendship(&self, a: ProfileId, b: ProfileId) -> bool {
        self.graph.has_edge(&a, &b)
    }

    /// Friends of `id` in the order the friendships were created.
    pub fn friends(&self, id: ProfileId) -> Vec<ProfileId> {
        self.graph.neighbors(&id).copied().collect()
    }

    pub fn friendship_count(&self) -> usize {
        self.graph.edge_count()
    }

    // --- display ---

    /// Profile block followed by a `Friends:` list, one tab-indented name
    /// per line.
    pub fn render_profile(&self, id: ProfileId) -> Option<String> {
        let view = self.view(id)?;
        let mut out = format!("{}\nFriends:\n", view);
        for friend in self.graph.neighbors(&id) {
            if let Some(p) = self.profiles.get(friend) {
                out.push('\t');
                out.push_str(p.name());
                out.push('\n');
            }
        }
        Some(out)
    }

    /// Render every profile reachable from `start`, in breadth-first order,
    /// separated by blank lines.
    pub fn render_traversal(&mut self, start: ProfileId) -> Result<String, DirectoryError> {
        let order = self.traverse(start)?;
        let mut out = String::new();
        for id in order {
            if let Some(block) = self.render_profile(id) {
                out.push_str(&block);
                out.push('\n');
            }
        }
        Ok(out)
    }

    // --- queries ---

    /// Profiles reachable from `start` in breadth-first order.
    pub fn traverse(&mut self, start: ProfileId) -> Result<Vec<ProfileId>, DirectoryError> {
        breadth_first_traversal(&mut self.graph, &start)
            .map_err(|_| DirectoryError::ProfileNotFound(start))
    }

    /// Friends of friends who are neither `id` nor already friends with it,
    /// each listed once in discovery order.
    ///
    /// None if the profile is unknown or has no friends.
    pub fn friend_suggestion(&self, id: ProfileId) -> Option<Vec<ProfileId>> {
        if !self.exists(id) {
            return None;
        }
        let friends = self.friends(id);
        if friends.is_empty() {
            return None;
        }

        let friend_set: HashSet<ProfileId> = friends.iter().copied().collect();
        let mut seen: HashSet<ProfileId> = HashSet::new();
        let mut suggestions = Vec::new();

        for friend in &friends {
            for &candidate in self.graph.neighbors(friend) {
                if candidate != id && !friend_set.contains(&candidate) && seen.insert(candidate) {
                    suggestions.push(candidate);
                }
            }
        }

        let limit = self.config.suggestion_limit;
        if limit > 0 && suggestions.len() > limit {
            suggestions.truncate(limit);
        }
        Some(suggestions)
    }

    /// Number of friendship hops between two profiles. None if either is
    /// unknown or they are not connected.
    pub fn friendship_distance(&mut self, a: ProfileId, b: ProfileId) -> Option<u32> {
        self.shortest_chain(a, b).map(|(hops, _)| hops)
    }

    /// Profiles on a shortest friendship chain from `a` to `b`, both included.
    pub fn connection_path(&mut self, a: ProfileId, b: ProfileId) -> Option<Vec<ProfileId>> {
        self.shortest_chain(a, b).map(|(_, path)| path)
    }

    fn shortest_chain(&mut self, a: ProfileId, b: ProfileId) -> Option<(u32, Vec<ProfileId>)> {
        let mut path = Vec::new();
        let hops = shortest_path(&mut self.graph, &a, &b, &mut path);
        if hops == INFINITE_COST {
            return None;
        }
        debug!(a = %a, b = %b, hops, "connection path found");
        Some((hops, path))
    }

    /// Everyone within `max_hops` friendship hops of `id`, with their
    /// distance, closest first.
    pub fn profiles_within(&self, id: ProfileId, max_hops: u32) -> Vec<(ProfileId, u32)> {
        let mut found: Vec<(ProfileId, u32)> = bfs_neighborhood(&self.graph, &id, max_hops)
            .neighbors
            .into_iter()
            .map(|n| (n.label, n.distance))
            .collect();
        found.sort_by_key(|&(pid, distance)| (distance, pid));
        found
    }

    /// Profiles with the most friends, best first. `top_n` of 0 returns all.
    pub fn most_connected(&self, top_n: usize) -> Vec<(ProfileId, usize)> {
        degree_centrality(&self.graph, top_n)
            .into_iter()
            .map(|d| (d.label, d.degree as usize))
            .collect()
    }
}

impl Default for SocialDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Network {
        dir: SocialDirectory,
        malcom: ProfileId,
        fannie: ProfileId,
        brown: ProfileId,
        lewis: ProfileId,
    }

    /// malcom–fannie, fannie–brown, lewis–fannie, brown–lewis
    fn make_network() -> Network {
        let mut dir = SocialDirectory::new();
        let malcom = dir.add_user("Malcom X", "My name is Malcom.").unwrap();
        let fannie = dir.add_user("Fannie-lou Hamer", "My name is Fannie.").unwrap();
        let brown = dir.add_user("John Brown", "My name is John Brown!").unwrap();
        let lewis = dir.add_user("John Lewis", "My name is also John.").unwrap();

        assert!(dir.create_friendship(malcom, fannie));
        assert!(dir.create_friendship(fannie, brown));
        assert!(dir.create_friendship(lewis, fannie));
        assert!(dir.create_friendship(brown, lewis));

        Network {
            dir,
            malcom,
            fannie,
            brown,
            lewis,
        }
    }

    #[test]
    fn test_ids_are_per_instance_and_sequential() {
        let mut a = SocialDirectory::new();
        let mut b = SocialDirectory::new();
        assert_eq!(a.add_user("x", "").unwrap().get(), 1);
        assert_eq!(a.add_user("y", "").unwrap().get(), 2);
        assert_eq!(b.add_user("z", "").unwrap().get(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut dir = SocialDirectory::new();
        let first = dir.add_user("x", "").unwrap();
        dir.remove_user(first);
        let second = dir.add_user("y", "").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_capacity_limit() {
        let mut dir = SocialDirectory::with_config(DirectoryConfig {
            max_profiles: 1,
            ..Default::default()
        });
        dir.add_user("only", "").unwrap();
        let err = dir.add_user("extra", "").unwrap_err();
        assert!(matches!(err, DirectoryError::CapacityExceeded { limit: 1 }));
        assert_eq!(dir.profile_count(), 1);
    }

    #[test]
    fn test_friendships() {
        let mut n = make_network();
        assert_eq!(n.dir.friendship_count(), 4);
        assert!(n.dir.has_friendship(n.fannie, n.brown));
        assert!(n.dir.has_friendship(n.brown, n.fannie));
        assert!(!n.dir.has_friendship(n.malcom, n.lewis));

        // Duplicate and self friendships are rejected
        assert!(!n.dir.create_friendship(n.brown, n.fannie));
        assert!(!n.dir.create_friendship(n.malcom, n.malcom));

        assert!(n.dir.remove_friendship(n.brown, n.fannie));
        assert!(!n.dir.has_friendship(n.fannie, n.brown));
        assert!(!n.dir.remove_friendship(n.brown, n.fannie));
        assert_eq!(n.dir.friendship_count(), 3);
    }

    #[test]
    fn test_friends_follow_graph() {
        let mut n = make_network();
        assert_eq!(n.dir.friends(n.fannie), vec![n.malcom, n.brown, n.lewis]);

        n.dir.remove_user(n.brown);
        assert_eq!(n.dir.friends(n.fannie), vec![n.malcom, n.lewis]);
        assert_eq!(n.dir.friends(n.lewis), vec![n.fannie]);
        assert!(n.dir.friends(n.brown).is_empty());
    }

    #[test]
    fn test_exists_and_remove() {
        let mut n = make_network();
        assert!(n.dir.exists(n.brown));
        let removed = n.dir.remove_user(n.brown).unwrap();
        assert_eq!(removed.name(), "John Brown");
        assert!(!n.dir.exists(n.brown));
        assert!(n.dir.profile(n.brown).is_none());
        assert!(n.dir.remove_user(n.brown).is_none());
        assert_eq!(n.dir.friendship_count(), 2);
    }

    #[test]
    fn test_traverse() {
        let mut n = make_network();
        let order = n.dir.traverse(n.malcom).unwrap();
        assert_eq!(order, vec![n.malcom, n.fannie, n.brown, n.lewis]);

        let ghost = ProfileId::new(999);
        let err = n.dir.traverse(ghost).unwrap_err();
        assert!(matches!(err, DirectoryError::ProfileNotFound(id) if id == ghost));
    }

    #[test]
    fn test_render_profile() {
        let mut n = make_network();
        n.dir.profile_mut(n.fannie).unwrap().set_name("Fannie", "Smith");
        n.dir.profile_mut(n.fannie).unwrap().set_status("Now Mrs. Smith!");

        assert_eq!(
            n.dir.render_profile(n.malcom).unwrap(),
            "Name: Malcom X\n\tStatus: My name is Malcom.\n\tNumber of friend profiles: 1\n\
             Friends:\n\tFannie Smith\n"
        );
        assert_eq!(
            n.dir.render_profile(n.fannie).unwrap(),
            "Name: Fannie Smith\n\tStatus: Now Mrs. Smith!\n\tNumber of friend profiles: 3\n\
             Friends:\n\tMalcom X\n\tJohn Brown\n\tJohn Lewis\n"
        );
        assert!(n.dir.render_profile(ProfileId::new(999)).is_none());
    }

    #[test]
    fn test_render_traversal() {
        let mut n = make_network();
        let lonely = n.dir.add_user("Nameless 1", "").unwrap();
        let out = n.dir.render_traversal(lonely).unwrap();
        assert_eq!(
            out,
            "Name: Nameless 1\n\tStatus: \n\tNumber of friend profiles: 0\nFriends:\n\n"
        );

        let out = n.dir.render_traversal(n.malcom).unwrap();
        assert_eq!(out.matches("Friends:").count(), 4);
        assert!(out.starts_with("Name: Malcom X"));
    }

    #[test]
    fn test_friend_suggestion() {
        let mut n = make_network();
        let f1 = n.dir.add_user("Nameless 1", "").unwrap();
        let f2 = n.dir.add_user("Nameless 2", "").unwrap();

        // No friends yet
        assert_eq!(n.dir.friend_suggestion(f1), None);

        n.dir.create_friendship(f1, f2);
        n.dir.create_friendship(f2, n.lewis);

        assert_eq!(n.dir.friend_suggestion(f2), Some(vec![n.fannie, n.brown]));
        assert_eq!(n.dir.friend_suggestion(n.brown), Some(vec![n.malcom, f2]));
        assert_eq!(n.dir.friend_suggestion(n.lewis), Some(vec![n.malcom, f1]));
        assert_eq!(n.dir.friend_suggestion(ProfileId::new(999)), None);
    }

    #[test]
    fn test_friend_suggestion_empty_when_all_known() {
        let mut dir = SocialDirectory::new();
        let a = dir.add_user("a", "").unwrap();
        let b = dir.add_user("b", "").unwrap();
        dir.create_friendship(a, b);
        assert_eq!(dir.friend_suggestion(a), Some(vec![]));
    }

    #[test]
    fn test_friend_suggestion_limit() {
        let mut dir = SocialDirectory::with_config(DirectoryConfig {
            suggestion_limit: 2,
            ..Default::default()
        });
        let me = dir.add_user("me", "").unwrap();
        let hub = dir.add_user("hub", "").unwrap();
        dir.create_friendship(me, hub);
        for i in 0..5 {
            let other = dir.add_user(format!("other {}", i), "").unwrap();
            dir.create_friendship(hub, other);
        }
        assert_eq!(dir.friend_suggestion(me).unwrap().len(), 2);
    }

    #[test]
    fn test_friendship_distance() {
        let mut n = make_network();
        let f1 = n.dir.add_user("Nameless 1", "").unwrap();
        let f2 = n.dir.add_user("Nameless 2", "").unwrap();
        n.dir.create_friendship(f1, f2);
        n.dir.create_friendship(f2, n.lewis);

        assert_eq!(n.dir.friendship_distance(n.fannie, n.brown), Some(1));
        assert_eq!(n.dir.friendship_distance(n.fannie, f1), Some(3));
        assert_eq!(n.dir.friendship_distance(n.fannie, n.lewis), Some(1));
        assert_eq!(n.dir.friendship_distance(n.malcom, f2), Some(3));
        assert_eq!(n.dir.friendship_distance(n.malcom, n.malcom), Some(0));

        n.dir.remove_user(f2);
        n.dir.remove_friendship(n.fannie, n.brown);
        assert_eq!(n.dir.friendship_distance(n.malcom, f1), None);
        assert_eq!(n.dir.friendship_distance(n.malcom, f2), None);
        assert_eq!(n.dir.friendship_distance(n.fannie, n.brown), Some(2));
    }

    #[test]
    fn test_distance_agrees_with_path() {
        let mut n = make_network();
        let lonely = n.dir.add_user("Nameless 1", "").unwrap();
        for (a, b) in [(n.malcom, n.lewis), (n.brown, n.brown), (n.malcom, lonely)] {
            let distance = n.dir.friendship_distance(a, b);
            let path = n.dir.connection_path(a, b);
            assert_eq!(distance, path.map(|p| p.len() as u32 - 1));
        }
        assert_eq!(n.dir.friendship_distance(n.malcom, n.lewis), Some(2));
    }

    #[test]
    fn test_render_profile_lists_every_friend() {
        let mut n = make_network();
        let out = n.dir.render_profile(n.fannie).unwrap();
        let friends: Vec<&str> = out
            .split("Friends:\n")
            .nth(1)
            .unwrap()
            .lines()
            .collect();
        assert_eq!(friends, vec!["\tMalcom X", "\tJohn Brown", "\tJohn Lewis"]);
        n.dir.remove_user(n.brown);
        assert!(!n.dir.render_profile(n.fannie).unwrap().contains("John Brown"));
    }

    #[test]
    fn test_connection_path() {
        let mut n = make_network();
        assert_eq!(
            n.dir.connection_path(n.malcom, n.lewis),
            Some(vec![n.malcom, n.fannie, n.lewis])
        );
        assert_eq!(n.dir.connection_path(n.malcom, ProfileId::new(999)), None);
    }

    #[test]
    fn test_profiles_within() {
        let n = make_network();
        let near = n.dir.profiles_within(n.malcom, 1);
        assert_eq!(near, vec![(n.fannie, 1)]);

        let all = n.dir.profiles_within(n.malcom, 5);
        assert_eq!(all, vec![(n.fannie, 1), (n.brown, 2), (n.lewis, 2)]);
    }

    #[test]
    fn test_most_connected() {
        let n = make_network();
        let top = n.dir.most_connected(1);
        assert_eq!(top, vec![(n.fannie, 3)]);
        assert_eq!(n.dir.most_connected(0).len(), 4);
    }
}
