use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};

/// Members of one metadata type, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemberSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl MemberSet {
    fn insert(&mut self, member: &str) -> bool {
        if self.seen.contains(member) {
            return false;
        }
        self.seen.insert(member.to_string());
        self.order.push(member.to_string());
        true
    }
}

/// Mapping from metadata type to its changed members.
///
/// Types keep the order in which they were first touched and members keep
/// the order of their first insertion. Duplicate inserts are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    types: Vec<String>,
    members: HashMap<String, MemberSet>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a member, returning `false` if it was already present
    pub fn insert(&mut self, type_name: &str, member_id: &str) -> bool {
        if !self.members.contains_key(type_name) {
            self.types.push(type_name.to_string());
        }
        self.members
            .entry(type_name.to_string())
            .or_default()
            .insert(member_id)
    }

    pub fn contains(&self, type_name: &str, member_id: &str) -> bool {
        self.members
            .get(type_name)
            .is_some_and(|set| set.seen.contains(member_id))
    }

    pub fn members(&self, type_name: &str) -> Option<&[String]> {
        self.members.get(type_name).map(|set| set.order.as_slice())
    }

    /// Iterate `(type, members)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.types.iter().map(move |type_name| {
            let members = self
                .members
                .get(type_name)
                .map(|set| set.order.as_slice())
                .unwrap_or_default();
            (type_name.as_str(), members)
        })
    }

    pub fn type_names(&self) -> &[String] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.values().map(|set| set.order.len()).sum()
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.types.len()))?;
        for (type_name, members) in self.iter() {
            map.serialize_entry(type_name, members)?;
        }
        map.end()
    }
}
