use std::collections::HashMap;

use shared::domain::GroupName;

/// Which service groups have their detail table open. Collapsed unless toggled.
#[derive(Debug, Clone, Default)]
pub struct ExpansionManager {
    expanded: HashMap<GroupName, bool>,
}

impl ExpansionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, group: &GroupName) -> bool {
        self.expanded.get(group).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, group: &GroupName) -> bool {
        let slot = self.expanded.entry(group.clone()).or_insert(false);
        *slot = !*slot;
        *slot
    }
}
