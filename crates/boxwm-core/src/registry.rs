//! Lookup tables from window handles to managed windows and groups.
//!
//! The registry is the only owner of [`ManagedWindow`] and [`WindowGroup`]
//! values. It also maintains the two-sided links between them: a window's
//! owner lists it among its transients, and a window's group lists it as
//! a member. Removing a window scrubs every link that names it.

use std::collections::HashMap;

use boxwm_common::WindowHandle;
use tracing::debug;

use crate::group::WindowGroup;
use crate::window::{ManagedWindow, Owner};

#[derive(Debug, Default)]
pub struct Registry {
    windows: HashMap<WindowHandle, ManagedWindow>,
    groups: HashMap<WindowHandle, WindowGroup>,
    /// Management order.
    order: Vec<WindowHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, window: WindowHandle) -> bool {
        self.windows.contains_key(&window)
    }

    pub fn get(&self, window: WindowHandle) -> Option<&ManagedWindow> {
        self.windows.get(&window)
    }

    pub fn get_mut(&mut self, window: WindowHandle) -> Option<&mut ManagedWindow> {
        self.windows.get_mut(&window)
    }

    /// Handles in the order the windows were managed.
    pub fn handles(&self) -> &[WindowHandle] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedWindow> {
        self.order.iter().filter_map(|h| self.windows.get(h))
    }

    pub fn group(&self, group: WindowHandle) -> Option<&WindowGroup> {
        self.groups.get(&group)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn insert(&mut self, window: ManagedWindow) {
        let handle = window.handle;
        if self.windows.insert(handle, window).is_none() {
            self.order.push(handle);
        }
    }

    /// Remove a window and scrub every reference to it: its own owner
    /// link, its transients' owner links and its group membership.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<ManagedWindow> {
        if !self.windows.contains_key(&handle) {
            return None;
        }

        self.unlink_transient(handle);
        let orphans = self
            .windows
            .get(&handle)
            .map(|w| w.transients.clone())
            .unwrap_or_default();
        for orphan in orphans {
            if let Some(child) = self.windows.get_mut(&orphan) {
                child.owner = Owner::None;
            }
        }
        self.leave_group(handle);

        self.order.retain(|w| *w != handle);
        let mut window = self.windows.remove(&handle)?;
        window.transients.clear();
        Some(window)
    }

    /// Remove every window, in reverse management order.
    pub fn drain(&mut self) -> Vec<ManagedWindow> {
        let handles: Vec<_> = self.order.iter().rev().copied().collect();
        handles.into_iter().filter_map(|h| self.remove(h)).collect()
    }

    // -- Transient links --

    /// Whether making `owner` the owner of `child` would close a loop.
    pub fn would_cycle(&self, child: WindowHandle, owner: WindowHandle) -> bool {
        let mut current = Some(owner);
        let mut steps = 0;
        while let Some(h) = current {
            if h == child {
                return true;
            }
            steps += 1;
            if steps > self.windows.len() {
                return true;
            }
            current = self.windows.get(&h).and_then(|w| w.owner.window());
        }
        false
    }

    /// Record `child` as transient for `owner`. Refuses unknown windows and
    /// links that would create a cycle; returns whether the link was made.
    pub fn link_transient(&mut self, child: WindowHandle, owner: WindowHandle) -> bool {
        if !self.windows.contains_key(&child) || !self.windows.contains_key(&owner) {
            return false;
        }
        if self.would_cycle(child, owner) {
            debug!(window = %child, owner = %owner, "refusing cyclic transient link");
            return false;
        }

        self.unlink_transient(child);
        if let Some(w) = self.windows.get_mut(&child) {
            w.owner = Owner::Window(owner);
        }
        if let Some(o) = self.windows.get_mut(&owner) {
            if !o.transients.contains(&child) {
                o.transients.push(child);
            }
        }
        true
    }

    /// Clear `child`'s owner, removing it from the owner's transient list.
    pub fn unlink_transient(&mut self, child: WindowHandle) {
        let Some(w) = self.windows.get_mut(&child) else {
            return;
        };
        let previous = std::mem::take(&mut w.owner);
        if let Owner::Window(owner) = previous {
            if let Some(o) = self.windows.get_mut(&owner) {
                o.transients.retain(|t| *t != child);
            }
        }
    }

    /// Mark `child` as modal to the whole screen.
    pub fn set_modal_root(&mut self, child: WindowHandle) {
        self.unlink_transient(child);
        if let Some(w) = self.windows.get_mut(&child) {
            w.owner = Owner::ModalRoot;
        }
    }

    /// The top-most window reached by following owner links.
    pub fn top_ancestor(&self, window: WindowHandle) -> WindowHandle {
        let mut current = window;
        for _ in 0..=self.windows.len() {
            match self.windows.get(&current).and_then(|w| w.owner.window()) {
                Some(owner) => current = owner,
                None => break,
            }
        }
        current
    }

    /// All transients of `window`, transitively, in pre-order: each
    /// transient is followed by its own transients before its next sibling.
    pub fn transient_preorder(&self, window: WindowHandle) -> Vec<WindowHandle> {
        let mut out = Vec::new();
        self.collect_transients(window, &mut out);
        out
    }

    fn collect_transients(&self, window: WindowHandle, out: &mut Vec<WindowHandle>) {
        let Some(w) = self.windows.get(&window) else {
            return;
        };
        for t in &w.transients {
            if out.contains(t) {
                continue;
            }
            out.push(*t);
            self.collect_transients(*t, out);
        }
    }

    /// First modal transient of `window` that is on a workspace and not
    /// iconic. Transients on their way out never capture the focus.
    pub fn modal_transient(&self, window: WindowHandle) -> Option<WindowHandle> {
        let w = self.windows.get(&window)?;
        w.transients.iter().copied().find(|t| {
            self.windows
                .get(t)
                .is_some_and(|t| t.flags.modal && !t.flags.iconic && t.workspace.is_some())
        })
    }

    // -- Groups --

    /// Put `window` in `group`, creating the group on first use.
    pub fn join_group(&mut self, window: WindowHandle, group: WindowHandle) {
        if !self.windows.contains_key(&window) {
            return;
        }
        if self.windows.get(&window).and_then(|w| w.group) == Some(group) {
            return;
        }
        self.leave_group(window);
        self.groups
            .entry(group)
            .or_insert_with(|| WindowGroup::new(group))
            .add(window);
        if let Some(w) = self.windows.get_mut(&window) {
            w.group = Some(group);
        }
    }

    /// Take `window` out of its group; empty groups are dropped.
    pub fn leave_group(&mut self, window: WindowHandle) {
        let Some(group) = self.windows.get_mut(&window).and_then(|w| w.group.take()) else {
            return;
        };
        if let Some(g) = self.groups.get_mut(&group) {
            g.remove(window);
            if g.is_empty() {
                self.groups.remove(&group);
            }
        }
    }

    /// The group member that should stand in for the group leader when a
    /// window names the leader as its owner.
    ///
    /// Preference order: a member on the focused window's ownership chain,
    /// then the non-transient member focused most recently, then the
    /// earliest member. `exclude` is never chosen, nor is any member that
    /// would create an ownership cycle with it.
    pub fn group_representative(
        &self,
        group: WindowHandle,
        exclude: WindowHandle,
        focused: Option<WindowHandle>,
    ) -> Option<WindowHandle> {
        let members = self.groups.get(&group)?.members();
        let eligible = |h: &WindowHandle| *h != exclude && !self.would_cycle(exclude, *h);

        if let Some(focused) = focused {
            let mut current = Some(focused);
            let mut steps = 0;
            while let Some(h) = current {
                if members.contains(&h) && eligible(&h) {
                    return Some(h);
                }
                steps += 1;
                if steps > self.windows.len() {
                    break;
                }
                current = self.windows.get(&h).and_then(|w| w.owner.window());
            }
        }

        let recent = members
            .iter()
            .filter(|h| eligible(*h))
            .filter_map(|h| self.windows.get(h))
            .filter(|w| !w.is_transient() && w.focus_serial > 0)
            .max_by_key(|w| w.focus_serial)
            .map(|w| w.handle);
        if recent.is_some() {
            return recent;
        }

        members.iter().copied().find(|h| eligible(h))
    }
}

#[cfg(test)]
mod tests {
    use boxwm_common::Rect;

    use super::*;
    use crate::hints::SizeHints;

    fn w(id: u64) -> WindowHandle {
        WindowHandle(id)
    }

    fn registry(ids: &[u64]) -> Registry {
        let mut registry = Registry::new();
        for id in ids {
            registry.insert(ManagedWindow::new(
                w(*id),
                Rect::new(0, 0, 10, 10),
                SizeHints::from_normal(None, Rect::new(0, 0, 100, 100)),
            ));
        }
        registry
    }

    fn assert_links_consistent(registry: &Registry) {
        for window in registry.iter() {
            if let Owner::Window(owner) = window.owner() {
                let owner = registry.get(owner).expect("owner is managed");
                assert!(owner.transients().contains(&window.handle()));
            }
            for t in window.transients() {
                assert_eq!(
                    registry.get(*t).map(|t| t.owner()),
                    Some(Owner::Window(window.handle()))
                );
            }
        }
    }

    #[test]
    fn link_and_unlink_are_two_sided() {
        let mut r = registry(&[1, 2, 3]);
        assert!(r.link_transient(w(2), w(1)));
        assert!(r.link_transient(w(3), w(1)));
        assert_eq!(r.get(w(1)).unwrap().transients(), &[w(2), w(3)]);
        assert_links_consistent(&r);

        r.unlink_transient(w(2));
        assert_eq!(r.get(w(1)).unwrap().transients(), &[w(3)]);
        assert_eq!(r.get(w(2)).unwrap().owner(), Owner::None);
        assert_links_consistent(&r);
    }

    #[test]
    fn relinking_moves_between_owners() {
        let mut r = registry(&[1, 2, 3]);
        r.link_transient(w(3), w(1));
        r.link_transient(w(3), w(2));
        assert!(r.get(w(1)).unwrap().transients().is_empty());
        assert_eq!(r.get(w(2)).unwrap().transients(), &[w(3)]);
        assert_links_consistent(&r);
    }

    #[test]
    fn cycles_are_refused() {
        let mut r = registry(&[1, 2, 3]);
        assert!(r.link_transient(w(1), w(2)));
        assert!(r.link_transient(w(2), w(3)));
        assert!(r.would_cycle(w(3), w(1)));
        assert!(!r.link_transient(w(3), w(1)));
        assert!(!r.link_transient(w(1), w(1)));
        assert_eq!(r.get(w(3)).unwrap().owner(), Owner::None);
        assert_links_consistent(&r);
    }

    #[test]
    fn remove_scrubs_transients_and_owner() {
        let mut r = registry(&[1, 2, 3, 4]);
        r.link_transient(w(2), w(1));
        r.link_transient(w(3), w(2));
        r.link_transient(w(4), w(2));

        let removed = r.remove(w(2)).unwrap();
        assert!(removed.transients().is_empty());
        assert!(r.get(w(1)).unwrap().transients().is_empty());
        assert_eq!(r.get(w(3)).unwrap().owner(), Owner::None);
        assert_eq!(r.get(w(4)).unwrap().owner(), Owner::None);
        assert_eq!(r.handles(), &[w(1), w(3), w(4)]);
        assert_links_consistent(&r);
    }

    #[test]
    fn ancestors_and_preorder() {
        let mut r = registry(&[1, 2, 3, 4, 5]);
        r.link_transient(w(2), w(1));
        r.link_transient(w(4), w(2));
        r.link_transient(w(3), w(1));
        r.link_transient(w(5), w(4));

        assert_eq!(r.top_ancestor(w(5)), w(1));
        assert_eq!(r.top_ancestor(w(1)), w(1));
        assert_eq!(r.transient_preorder(w(1)), vec![w(2), w(4), w(5), w(3)]);
    }

    #[test]
    fn modal_root_has_no_owner_window() {
        let mut r = registry(&[1, 2]);
        r.link_transient(w(2), w(1));
        r.set_modal_root(w(2));
        assert_eq!(r.get(w(2)).unwrap().owner(), Owner::ModalRoot);
        assert!(r.get(w(1)).unwrap().transients().is_empty());
    }

    #[test]
    fn groups_are_created_lazily_and_dropped_when_empty() {
        let mut r = registry(&[1, 2]);
        let leader = w(100);
        r.join_group(w(1), leader);
        r.join_group(w(2), leader);
        assert_eq!(r.group(leader).unwrap().members(), &[w(1), w(2)]);

        r.remove(w(1));
        assert_eq!(r.group(leader).unwrap().members(), &[w(2)]);
        r.leave_group(w(2));
        assert!(r.group(leader).is_none());
        assert_eq!(r.group_count(), 0);
    }

    #[test]
    fn representative_prefers_focus_chain_then_recency() {
        let mut r = registry(&[1, 2, 3, 9]);
        let leader = w(100);
        for id in [1, 2, 3, 9] {
            r.join_group(w(id), leader);
        }

        // Nothing focused yet: earliest member other than the asker.
        assert_eq!(r.group_representative(leader, w(9), None), Some(w(1)));

        r.get_mut(w(3)).unwrap().focus_serial = 5;
        r.get_mut(w(2)).unwrap().focus_serial = 2;
        assert_eq!(r.group_representative(leader, w(9), None), Some(w(3)));

        assert_eq!(r.group_representative(leader, w(9), Some(w(2))), Some(w(2)));
        assert_eq!(r.group_representative(leader, w(9), Some(w(9))), Some(w(3)));
    }

    #[test]
    fn representative_never_creates_cycle() {
        let mut r = registry(&[1, 2]);
        let leader = w(100);
        r.join_group(w(1), leader);
        r.join_group(w(2), leader);
        r.link_transient(w(1), w(2));
        assert_eq!(r.group_representative(leader, w(2), None), None);
    }

    #[test]
    fn drain_empties_everything() {
        let mut r = registry(&[1, 2, 3]);
        r.link_transient(w(3), w(1));
        r.join_group(w(2), w(50));
        let drained: Vec<_> = r.drain().iter().map(|w| w.handle()).collect();
        assert_eq!(drained, vec![w(3), w(2), w(1)]);
        assert!(r.is_empty());
        assert_eq!(r.group_count(), 0);
    }
}
