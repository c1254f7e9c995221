//! Struts and the usable area.

use boxwm_common::{WindowHandle, WmEvent};

use super::WindowManager;
use crate::geometry::Strut;
use crate::platform::WindowSystem;

impl<D: WindowSystem> WindowManager<D> {
    /// Register (or replace) the strut with `id`.
    pub fn add_strut(&mut self, id: u64, strut: Strut) {
        self.screen.add_strut(id, strut);
        self.update_available_area();
    }

    pub fn remove_strut(&mut self, id: u64) -> bool {
        if !self.screen.remove_strut(id) {
            return false;
        }
        self.update_available_area();
        true
    }

    /// Recompute the usable area. When it actually changed, observers are
    /// told and every maximized window is refitted.
    pub fn update_available_area(&mut self) -> bool {
        if !self.screen.update_usable_area() {
            return false;
        }
        self.publish(WmEvent::UsableAreaChanged(self.screen.usable_area()));

        let maximized: Vec<WindowHandle> = self
            .registry
            .iter()
            .filter(|w| w.maximize_mode().is_maximized() && !w.is_iconic())
            .map(|w| w.handle())
            .collect();
        for window in maximized {
            self.remaximize(window);
        }
        true
    }
}
