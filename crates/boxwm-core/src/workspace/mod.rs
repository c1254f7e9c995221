//! Workspaces: window membership and front-to-back stacking.
//!
//! A workspace keeps two lists over the same windows. `windows` is in
//! insertion order and defines each window's number; `stacking` is
//! front-to-back visual order. Operations here only touch the lists;
//! the manager keeps window state and the display in step.

pub mod placement;

use boxwm_common::WindowHandle;

pub use placement::{cascade_place, clamp_to_area, smart_place, CASCADE_STEP};

#[derive(Debug, Clone)]
pub struct Workspace {
    id: u32,
    name: String,
    windows: Vec<WindowHandle>,
    stacking: Vec<WindowHandle>,
    last_focus: Option<WindowHandle>,
    cascade: (i32, i32),
}

impl Workspace {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            windows: Vec::new(),
            stacking: Vec::new(),
            last_focus: None,
            cascade: (CASCADE_STEP, CASCADE_STEP),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Members in window-number order.
    pub fn windows(&self) -> &[WindowHandle] {
        &self.windows
    }

    /// Members front to back.
    pub fn stacking(&self) -> &[WindowHandle] {
        &self.stacking
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, window: WindowHandle) -> bool {
        self.windows.contains(&window)
    }

    pub fn last_focus(&self) -> Option<WindowHandle> {
        self.last_focus
    }

    pub fn set_last_focus(&mut self, window: Option<WindowHandle>) {
        self.last_focus = window;
    }

    pub fn top(&self) -> Option<WindowHandle> {
        self.stacking.first().copied()
    }

    pub(crate) fn cascade_mut(&mut self) -> &mut (i32, i32) {
        &mut self.cascade
    }

    /// Append to the window list and put the window in front.
    /// Returns the new window number.
    pub fn add(&mut self, window: WindowHandle) -> usize {
        if let Some(index) = self.index_of(window) {
            return index;
        }
        self.windows.push(window);
        self.stacking.insert(0, window);
        self.windows.len() - 1
    }

    /// Drop a window from both lists. Returns its former number; the
    /// windows after it each move down by one.
    pub fn remove(&mut self, window: WindowHandle) -> Option<usize> {
        let index = self.index_of(window)?;
        self.windows.remove(index);
        self.stacking.retain(|w| *w != window);
        if self.last_focus == Some(window) {
            self.last_focus = None;
        }
        Some(index)
    }

    pub fn index_of(&self, window: WindowHandle) -> Option<usize> {
        self.windows.iter().position(|w| *w == window)
    }

    /// Move a member to the front of the stacking list.
    pub fn raise_in_stack(&mut self, window: WindowHandle) -> bool {
        let Some(pos) = self.stacking.iter().position(|w| *w == window) else {
            return false;
        };
        let w = self.stacking.remove(pos);
        self.stacking.insert(0, w);
        true
    }

    /// Move a member to the back of the stacking list.
    pub fn lower_in_stack(&mut self, window: WindowHandle) -> bool {
        let Some(pos) = self.stacking.iter().position(|w| *w == window) else {
            return false;
        };
        let w = self.stacking.remove(pos);
        self.stacking.push(w);
        true
    }

    /// Members in window-number order, starting after `from` and wrapping.
    pub fn cycle_from(&self, from: WindowHandle, forward: bool) -> Vec<WindowHandle> {
        let Some(start) = self.index_of(from) else {
            return Vec::new();
        };
        let n = self.windows.len();
        (1..n)
            .map(|step| {
                let index = if forward {
                    (start + step) % n
                } else {
                    (start + n - step) % n
                };
                self.windows[index]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(id: u64) -> WindowHandle {
        WindowHandle(id)
    }

    fn same_members(ws: &Workspace) -> bool {
        let mut a = ws.windows().to_vec();
        let mut b = ws.stacking().to_vec();
        a.sort();
        b.sort();
        a == b
    }

    #[test]
    fn add_appends_and_goes_to_front() {
        let mut ws = Workspace::new(0, "one");
        assert_eq!(ws.add(w(1)), 0);
        assert_eq!(ws.add(w(2)), 1);
        assert_eq!(ws.add(w(3)), 2);
        assert_eq!(ws.windows(), &[w(1), w(2), w(3)]);
        assert_eq!(ws.stacking(), &[w(3), w(2), w(1)]);
        assert_eq!(ws.top(), Some(w(3)));
        assert!(same_members(&ws));
    }

    #[test]
    fn adding_twice_is_a_no_op() {
        let mut ws = Workspace::new(0, "one");
        ws.add(w(1));
        ws.add(w(2));
        assert_eq!(ws.add(w(1)), 0);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.stacking().len(), 2);
    }

    #[test]
    fn remove_keeps_numbers_dense() {
        let mut ws = Workspace::new(0, "one");
        for id in 1..=4 {
            ws.add(w(id));
        }
        assert_eq!(ws.remove(w(2)), Some(1));
        assert_eq!(ws.windows(), &[w(1), w(3), w(4)]);
        for (number, window) in ws.windows().iter().enumerate() {
            assert_eq!(ws.index_of(*window), Some(number));
        }
        assert!(same_members(&ws));
        assert_eq!(ws.remove(w(2)), None);
    }

    #[test]
    fn remove_forgets_last_focus() {
        let mut ws = Workspace::new(0, "one");
        ws.add(w(1));
        ws.set_last_focus(Some(w(1)));
        ws.remove(w(1));
        assert_eq!(ws.last_focus(), None);
    }

    #[test]
    fn raise_and_lower_in_stack() {
        let mut ws = Workspace::new(0, "one");
        for id in 1..=3 {
            ws.add(w(id));
        }
        assert!(ws.raise_in_stack(w(1)));
        assert_eq!(ws.stacking(), &[w(1), w(3), w(2)]);
        assert!(ws.lower_in_stack(w(3)));
        assert_eq!(ws.stacking(), &[w(1), w(2), w(3)]);
        assert!(!ws.raise_in_stack(w(9)));
        assert_eq!(ws.windows(), &[w(1), w(2), w(3)]);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut ws = Workspace::new(0, "one");
        for id in 1..=4 {
            ws.add(w(id));
        }
        assert_eq!(ws.cycle_from(w(3), true), vec![w(4), w(1), w(2)]);
        assert_eq!(ws.cycle_from(w(2), false), vec![w(1), w(4), w(3)]);
        assert!(ws.cycle_from(w(9), true).is_empty());
    }
}
