//! Scoped server grab.

use std::ops::{Deref, DerefMut};

use super::WindowManager;
use crate::platform::WindowSystem;

/// Holds the server grabbed until dropped, on every exit path.
///
/// Derefs to the manager so a whole manage or unmanage sequence can run
/// through the guard.
pub struct ServerGrab<'a, D: WindowSystem> {
    wm: &'a mut WindowManager<D>,
}

impl<'a, D: WindowSystem> ServerGrab<'a, D> {
    fn new(wm: &'a mut WindowManager<D>) -> Self {
        wm.display.grab_server();
        Self { wm }
    }
}

impl<D: WindowSystem> Deref for ServerGrab<'_, D> {
    type Target = WindowManager<D>;

    fn deref(&self) -> &Self::Target {
        self.wm
    }
}

impl<D: WindowSystem> DerefMut for ServerGrab<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.wm
    }
}

impl<D: WindowSystem> Drop for ServerGrab<'_, D> {
    fn drop(&mut self) {
        self.wm.display.ungrab_server();
    }
}

impl<D: WindowSystem> WindowManager<D> {
    pub fn grab(&mut self) -> ServerGrab<'_, D> {
        ServerGrab::new(self)
    }
}
