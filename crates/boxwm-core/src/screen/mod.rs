//! Screen state: workspaces, the icon list, struts and the usable area.
//!
//! The manager drives focus and stacking; this type only owns the
//! collections and the area arithmetic.

use boxwm_common::{Rect, WindowHandle};
use boxwm_config::schema::ScreenConfig;
use tracing::debug;

use crate::geometry::{usable_area, Strut};
use crate::workspace::Workspace;

#[derive(Debug)]
pub struct Screen {
    rect: Rect,
    workspaces: Vec<Workspace>,
    current: u32,
    icons: Vec<WindowHandle>,
    struts: Vec<(u64, Strut)>,
    usable: Rect,
    config: ScreenConfig,
}

impl Screen {
    /// A screen with the configured number of workspaces (at least one).
    pub fn new(rect: Rect, config: ScreenConfig) -> Self {
        let count = config.workspaces.max(1);
        let workspaces = (0..count)
            .map(|id| Workspace::new(id, config.workspace_name(id)))
            .collect();
        Self {
            rect,
            workspaces,
            current: 0,
            icons: Vec::new(),
            struts: Vec::new(),
            usable: rect,
            config,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ScreenConfig {
        &mut self.config
    }

    // -- Workspaces --

    pub fn workspace_count(&self) -> u32 {
        self.workspaces.len() as u32
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace(&self, id: u32) -> Option<&Workspace> {
        self.workspaces.get(id as usize)
    }

    pub fn workspace_mut(&mut self, id: u32) -> Option<&mut Workspace> {
        self.workspaces.get_mut(id as usize)
    }

    pub fn current_id(&self) -> u32 {
        self.current
    }

    pub fn current_workspace(&self) -> &Workspace {
        &self.workspaces[self.current as usize]
    }

    pub fn current_workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspaces[self.current as usize]
    }

    /// Returns false for an unknown id.
    pub(crate) fn set_current(&mut self, id: u32) -> bool {
        if id >= self.workspace_count() {
            return false;
        }
        self.current = id;
        true
    }

    /// Append a workspace and return its id.
    pub fn add_workspace(&mut self) -> u32 {
        let id = self.workspace_count();
        self.workspaces
            .push(Workspace::new(id, self.config.workspace_name(id)));
        debug!(workspace = id, "added workspace");
        id
    }

    /// Remove the last workspace. The screen always keeps one, and the
    /// current workspace must be switched away from first.
    pub(crate) fn pop_workspace(&mut self) -> Option<Workspace> {
        if self.workspaces.len() <= 1 || self.current + 1 == self.workspace_count() {
            return None;
        }
        self.workspaces.pop()
    }

    // -- Icons --

    pub fn icons(&self) -> &[WindowHandle] {
        &self.icons
    }

    /// Returns the icon number.
    pub fn add_icon(&mut self, window: WindowHandle) -> usize {
        if let Some(index) = self.icons.iter().position(|w| *w == window) {
            return index;
        }
        self.icons.push(window);
        self.icons.len() - 1
    }

    pub fn remove_icon(&mut self, window: WindowHandle) -> Option<usize> {
        let index = self.icons.iter().position(|w| *w == window)?;
        self.icons.remove(index);
        Some(index)
    }

    // -- Struts and area --

    pub fn struts(&self) -> &[(u64, Strut)] {
        &self.struts
    }

    /// Register (or replace) a strut.
    pub fn add_strut(&mut self, id: u64, strut: Strut) {
        match self.struts.iter_mut().find(|(sid, _)| *sid == id) {
            Some(entry) => entry.1 = strut,
            None => self.struts.push((id, strut)),
        }
    }

    pub fn remove_strut(&mut self, id: u64) -> bool {
        let before = self.struts.len();
        self.struts.retain(|(sid, _)| *sid != id);
        self.struts.len() != before
    }

    /// Recompute the usable area from the struts. Returns true when it
    /// changed.
    pub fn update_usable_area(&mut self) -> bool {
        let area = usable_area(self.rect, self.struts.iter().map(|(_, s)| s));
        if area == self.usable {
            return false;
        }
        debug!(?area, "usable area changed");
        self.usable = area;
        true
    }

    pub fn usable_area(&self) -> Rect {
        self.usable
    }

    /// Area used for maximizing: the whole screen with `full_max`,
    /// otherwise the usable area.
    pub fn available_area(&self) -> Rect {
        if self.config.full_max {
            self.rect
        } else {
            self.usable
        }
    }
}
