//! Mutual-exclusion registry for toggleable overlays.
//!
//! Menus, search overlays, and similar toggles are grouped by a string
//! key; at most one member of a group is open at a time. Opening a member
//! reports the previously open one so its owner can run a close
//! transition. The registry tracks identity only; all animation stays
//! with the owning controllers.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use vitrine_core::logging::targets;

/// Identifies one registered group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupMemberId(u64);

#[derive(Debug, Default)]
struct GroupState {
    members: Vec<GroupMemberId>,
    open: Option<GroupMemberId>,
}

/// Tracks which member of each toggle group is open.
#[derive(Debug, Default)]
pub struct ToggleGroupRegistry {
    groups: Mutex<HashMap<String, GroupState>>,
    next_id: AtomicU64,
}

static REGISTRY: OnceLock<ToggleGroupRegistry> = OnceLock::new();

impl ToggleGroupRegistry {
    /// A fresh, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ToggleGroupRegistry {
        REGISTRY.get_or_init(ToggleGroupRegistry::new)
    }

    /// Register a member in `group`, creating the group if needed.
    pub fn register(&self, group: &str) -> GroupMemberId {
        let id = GroupMemberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut groups = self.groups.lock();
        groups.entry(group.to_owned()).or_default().members.push(id);
        id
    }

    /// Mark `member` open, closing whichever member was open before.
    ///
    /// Returns the previously open member (if any, and if different) so
    /// its owner can animate closed. Unregistered members are ignored.
    pub fn open(&self, group: &str, member: GroupMemberId) -> Option<GroupMemberId> {
        let mut groups = self.groups.lock();
        let state = groups.get_mut(group)?;
        if !state.members.contains(&member) {
            return None;
        }
        let previous = state.open.filter(|&prev| prev != member);
        state.open = Some(member);
        if let Some(prev) = previous {
            tracing::debug!(target: targets::GROUP, group, ?prev, "displacing open group member");
        }
        previous
    }

    /// Mark `member` closed. No-op unless it is the open member.
    pub fn close(&self, group: &str, member: GroupMemberId) {
        let mut groups = self.groups.lock();
        if let Some(state) = groups.get_mut(group) {
            if state.open == Some(member) {
                state.open = None;
            }
        }
    }

    /// The open member of `group`, if any.
    pub fn open_member(&self, group: &str) -> Option<GroupMemberId> {
        self.groups.lock().get(group)?.open
    }

    /// Whether `member` is the open member of `group`.
    pub fn is_open(&self, group: &str, member: GroupMemberId) -> bool {
        self.open_member(group) == Some(member)
    }

    /// Remove `member` from `group`, closing it if it was open. Empty
    /// groups are dropped.
    pub fn unregister(&self, group: &str, member: GroupMemberId) {
        let mut groups = self.groups.lock();
        if let Some(state) = groups.get_mut(group) {
            state.members.retain(|&m| m != member);
            if state.open == Some(member) {
                state.open = None;
            }
            if state.members.is_empty() {
                groups.remove(group);
            }
        }
    }

    /// Number of members registered in `group`.
    pub fn member_count(&self, group: &str) -> usize {
        self.groups.lock().get(group).map_or(0, |s| s.members.len())
    }
}

static_assertions::assert_impl_all!(ToggleGroupRegistry: Send, Sync);
