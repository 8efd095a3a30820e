use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Specialist role counts keyed by role name.
///
/// Absent roles read as 0 and zero counts are never stored, so iteration only
/// visits roles that actually hold someone. Ordered by name so every pass over
/// the roles is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCounter {
    counts: BTreeMap<String, u32>,
}

impl RoleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: &str) -> u32 {
        self.counts.get(role).copied().unwrap_or(0)
    }

    /// Insert-or-increment. Negative amounts decrement, saturating at 0.
    pub fn add(&mut self, role: &str, amount: i32) {
        let next = self.get(role).saturating_add_signed(amount);
        self.set(role, next);
    }

    pub fn set(&mut self, role: &str, count: u32) {
        if count == 0 {
            self.counts.remove(role);
        } else {
            self.counts.insert(role.to_string(), count);
        }
    }

    /// Add every count in `other` to this counter.
    pub fn add_all(&mut self, other: &RoleCounter) {
        for (role, count) in other.iter() {
            let next = self.get(role).saturating_add(count);
            self.set(role, next);
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(role, &count)| (role.as_str(), count))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for RoleCounter {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut counter = RoleCounter::new();
        for (role, count) in iter {
            let role = role.into();
            let next = counter.get(&role).saturating_add(count);
            counter.set(&role, next);
        }
        counter
    }
}
