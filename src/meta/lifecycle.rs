//! Page lifecycle hook: deferred one-shot rendering.
//!
//! The registry never writes to the page output sink directly; it registers
//! a callback here during `load`, and the host environment fires the hook
//! exactly once when page output is finalized. Tests can skip the hook and
//! call `render_all` directly.

use super::registry::ContainerRegistry;
use anyhow::Result;
use std::io::Write;

/// Callback invoked when the page finishes rendering.
pub type FinalizeFn = Box<dyn FnOnce(&ContainerRegistry, &mut dyn Write) -> Result<()>>;

/// One-shot deferred invocation point, one per page render.
#[derive(Default)]
pub struct PageLifecycle {
    callbacks: Vec<FinalizeFn>,
    fired: bool,
}

impl PageLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run when the page is finalized.
    pub fn on_page_finalize(&mut self, callback: FinalizeFn) {
        self.callbacks.push(callback);
    }

    /// Fire all registered callbacks, exactly once.
    ///
    /// Subsequent calls are inert no-ops.
    pub fn page_finished(
        &mut self,
        registry: &ContainerRegistry,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.fired {
            return Ok(());
        }
        self.fired = true;
        for callback in self.callbacks.drain(..) {
            callback(registry, out)?;
        }
        Ok(())
    }

    /// Whether any callbacks are waiting to fire.
    pub fn has_pending(&self) -> bool {
        !self.fired && !self.callbacks.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_registered_callback_once() {
        let registry = ContainerRegistry::new();
        let mut lifecycle = PageLifecycle::new();
        lifecycle.on_page_finalize(Box::new(|_, out| {
            out.write_all(b"fired")?;
            Ok(())
        }));
        assert!(lifecycle.has_pending());

        let mut first = Vec::new();
        lifecycle.page_finished(&registry, &mut first).unwrap();
        assert_eq!(first, b"fired");

        // Second invocation is inert
        let mut second = Vec::new();
        lifecycle.page_finished(&registry, &mut second).unwrap();
        assert!(second.is_empty());
        assert!(!lifecycle.has_pending());
    }

    #[test]
    fn test_no_callbacks_is_harmless() {
        let registry = ContainerRegistry::new();
        let mut lifecycle = PageLifecycle::new();
        let mut out = Vec::new();
        lifecycle.page_finished(&registry, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
