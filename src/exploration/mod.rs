//! Exploration area assignments
//!
//! Exploration areas borrow roster members for a while. Incidents that need
//! to look at (or release) those members go through `AreaAssignments`; the
//! game plugs in its own implementation, `AreaRegistry` is the in-memory one.

use crate::core::types::MemberId;
use ahash::AHashMap;

pub trait AreaAssignments {
    /// Members currently assigned to `area`, in assignment order
    fn assigned(&self, area: &str) -> Vec<MemberId>;

    /// Returns false if the member was already assigned there
    fn assign(&mut self, area: &str, member: MemberId) -> bool;

    /// Returns false if the member was not assigned there
    fn unassign(&mut self, area: &str, member: MemberId) -> bool;

    /// Unassign everyone from `area`. Returns who was freed.
    fn release(&mut self, area: &str) -> Vec<MemberId> {
        let members = self.assigned(area);
        for member in &members {
            self.unassign(area, *member);
        }
        members
    }
}

#[derive(Debug, Clone, Default)]
pub struct AreaRegistry {
    areas: AHashMap<String, Vec<MemberId>>,
}

impl AreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Area a member is assigned to, if any
    pub fn area_of(&self, member: MemberId) -> Option<&str> {
        self.areas
            .iter()
            .find(|(_, members)| members.contains(&member))
            .map(|(area, _)| area.as_str())
    }
}

impl AreaAssignments for AreaRegistry {
    fn assigned(&self, area: &str) -> Vec<MemberId> {
        self.areas.get(area).cloned().unwrap_or_default()
    }

    fn assign(&mut self, area: &str, member: MemberId) -> bool {
        let members = self.areas.entry(area.to_string()).or_default();
        if members.contains(&member) {
            return false;
        }
        members.push(member);
        true
    }

    fn unassign(&mut self, area: &str, member: MemberId) -> bool {
        let Some(members) = self.areas.get_mut(area) else {
            return false;
        };
        let before = members.len();
        members.retain(|m| *m != member);
        members.len() != before
    }
}
