use meshroom_core::PeerId;
use meshroom_core::utils::PLACEHOLDER_NAME;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub peer_id: PeerId,
    /// `None` until the peer's first `name` message.
    pub display_name: Option<String>,
}

/// Known remote peers and their display names.
///
/// A `name` message may arrive before the join observation for the same
/// peer; both insertion paths converge on the same entry.
#[derive(Debug, Default)]
pub struct Roster {
    entries: HashMap<PeerId, RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_peer_join(&mut self, peer_id: &PeerId) {
        self.entries
            .entry(peer_id.clone())
            .or_insert_with(|| RosterEntry {
                peer_id: peer_id.clone(),
                display_name: None,
            });
    }

    pub fn apply_name_message(&mut self, peer_id: &PeerId, name: &str) {
        self.entries
            .entry(peer_id.clone())
            .and_modify(|entry| entry.display_name = Some(name.to_owned()))
            .or_insert_with(|| RosterEntry {
                peer_id: peer_id.clone(),
                display_name: Some(name.to_owned()),
            });
    }

    pub fn remove(&mut self, peer_id: &PeerId) -> Option<RosterEntry> {
        self.entries.remove(peer_id)
    }

    /// The announced name, if one has arrived.
    pub fn name_of(&self, peer_id: &PeerId) -> Option<&str> {
        self.entries
            .get(peer_id)
            .and_then(|entry| entry.display_name.as_deref())
    }

    /// The announced name, or the placeholder shown until it arrives.
    pub fn label_for(&self, peer_id: &PeerId) -> &str {
        self.name_of(peer_id).unwrap_or(PLACEHOLDER_NAME)
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<&RosterEntry> {
        self.entries.get(peer_id)
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.entries.contains_key(peer_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
