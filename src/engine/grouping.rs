//! Grouping of a side's instances into stacks.

use crate::domain::{IdentityKey, ItemInstance};
use serde::Serialize;
use std::collections::HashMap;

/// One stack in the grouped view. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedEntry {
    /// First-seen instance of the stack.
    pub item: ItemInstance,
    pub count: usize,
}

impl GroupedEntry {
    pub fn identity(&self) -> IdentityKey {
        self.item.identity()
    }
}

/// Group instances by identity in a single pass.
///
/// Output follows first-seen order.
pub fn group_items(instances: &[ItemInstance]) -> Vec<GroupedEntry> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::with_capacity(instances.len());
    let mut groups: Vec<GroupedEntry> = Vec::new();

    for instance in instances {
        match index.get(&instance.identity()) {
            Some(&pos) => groups[pos].count += 1,
            None => {
                index.insert(instance.identity(), groups.len());
                groups.push(GroupedEntry {
                    item: instance.clone(),
                    count: 1,
                });
            }
        }
    }

    groups
}

/// Number of instances on a side sharing `identity`.
pub fn count_of(instances: &[ItemInstance], identity: &IdentityKey) -> usize {
    instances
        .iter()
        .filter(|i| i.id == identity.base_id && i.sub_name == identity.variant)
        .count()
}
