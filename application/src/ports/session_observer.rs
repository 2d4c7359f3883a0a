//! Session observer port
//!
//! Defines the callbacks a UI layer receives while the session works.

use lyricsmith_domain::{GenerationMode, StyleDescriptor};

/// Callback for progress updates during a songwriting session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status line, web UI, etc.)
pub trait SessionObserver: Send + Sync {
    /// Called when a generation request is about to be sent
    fn on_action_start(&self, _mode: GenerationMode) {}

    /// Called when a generation request has resolved
    fn on_action_complete(&self, _mode: GenerationMode, _success: bool) {}

    /// Called when a background style derivation is applied
    fn on_style_updated(&self, _style: &StyleDescriptor) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoSessionObserver;

impl SessionObserver for NoSessionObserver {}
