//! Bundle group integrity: create together, remove together.
//!
//! A partially-removed bundle is an invalid state, so group membership is a
//! first-class foreign key and the host order store must support removal by
//! group as one atomic operation - not an event-based cascade that can be
//! bypassed.

use size_grid_core::GroupId;

/// Contract the host order/cart store implements so grouped line items can
/// be removed atomically.
pub trait GroupedLineStore {
    /// The group carried by a stored line, if any.
    fn group_of(&self, line_key: &str) -> Option<GroupId>;

    /// Remove a single stored line.
    fn remove_line(&mut self, line_key: &str);

    /// Remove every stored line carrying `group_id`, atomically.
    fn remove_by_group(&mut self, group_id: GroupId);
}

/// Remove a line item, cascading to every sibling in its group.
///
/// This is the removal entry point the host must route all line deletions
/// through: ungrouped lines are removed alone, grouped lines take their
/// whole group with them.
pub fn remove_with_siblings<S: GroupedLineStore + ?Sized>(store: &mut S, line_key: &str) {
    match store.group_of(line_key) {
        Some(group_id) => store.remove_by_group(group_id),
        None => store.remove_line(line_key),
    }
}
