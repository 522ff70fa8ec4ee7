//! Ownership of the shell's open windows.
//!
//! The application holds every live window handle in a [`WindowRegistry`];
//! closing a window removes its entry. Nothing else keeps a "current window"
//! reference around, so a closed window can't be reached by stale code.

use std::collections::BTreeMap;

/// Opaque identifier handed out by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowKey(u64);

impl std::fmt::Display for WindowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Owns window handles of type `H` (e.g. a tao window plus its webview).
#[derive(Debug)]
pub struct WindowRegistry<H> {
    next: u64,
    windows: BTreeMap<WindowKey, H>,
}

impl<H> Default for WindowRegistry<H> {
    fn default() -> Self {
        Self {
            next: 1,
            windows: BTreeMap::new(),
        }
    }
}

impl<H> WindowRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `handle` and returns its key. Keys are never reused.
    pub fn insert(&mut self, handle: H) -> WindowKey {
        let key = WindowKey(self.next);
        self.next += 1;
        self.windows.insert(key, handle);
        tracing::debug!("{key} registered ({} open)", self.windows.len());
        key
    }

    pub fn get(&self, key: WindowKey) -> Option<&H> {
        self.windows.get(&key)
    }

    pub fn get_mut(&mut self, key: WindowKey) -> Option<&mut H> {
        self.windows.get_mut(&key)
    }

    /// Removes and returns the handle; dropping it releases the window.
    pub fn remove(&mut self, key: WindowKey) -> Option<H> {
        let removed = self.windows.remove(&key);
        if removed.is_some() {
            tracing::debug!("{key} closed ({} open)", self.windows.len());
        }
        removed
    }

    /// First key whose handle satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&H) -> bool) -> Option<WindowKey> {
        self.windows
            .iter()
            .find_map(|(key, handle)| pred(handle).then_some(*key))
    }

    pub fn keys(&self) -> impl Iterator<Item = WindowKey> + '_ {
        self.windows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// What to do when the last window goes away, and on re-activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitPolicy {
    /// Exit when no windows remain (Linux, Windows).
    QuitWhenLastClosed,
    /// Stay running without windows; reopen the main window on activation (macOS).
    StayResident,
}

impl QuitPolicy {
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            QuitPolicy::StayResident
        } else {
            QuitPolicy::QuitWhenLastClosed
        }
    }

    pub fn should_quit<H>(self, registry: &WindowRegistry<H>) -> bool {
        registry.is_empty() && self == QuitPolicy::QuitWhenLastClosed
    }

    /// On activation (dock click), recreate the main window if none is open.
    pub fn should_recreate_on_activate<H>(self, registry: &WindowRegistry<H>) -> bool {
        registry.is_empty() && self == QuitPolicy::StayResident
    }
}
