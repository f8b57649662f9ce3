//! The ordered plugin pipeline.
//!
//! Plugins register once, at setup time, for a single phase. The pipeline
//! preserves registration order within each phase and computes the active
//! OnMatch subset for a route: a default-enabled plugin runs unless the
//! route disables it by name, a default-disabled plugin runs only if the
//! route enables it by name.

use crate::route::RouteOptions;
use gantry_core::{PluginPhase, ServicePlugin};
use std::sync::Arc;

/// Registration-time plugin options.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    default_enabled: bool,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            default_enabled: true,
        }
    }
}

impl PluginOptions {
    /// Register the plugin as disabled by default; only routes naming it in
    /// `enable_plugins` run it.
    pub fn default_disabled() -> Self {
        Self {
            default_enabled: false,
        }
    }
}

/// One registered plugin with its phase and default-enabled flag.
pub struct PluginEntry {
    plugin: Arc<dyn ServicePlugin>,
    phase: PluginPhase,
    default_enabled: bool,
}

impl PluginEntry {
    /// The plugin's unique name.
    pub fn name(&self) -> &str {
        self.plugin.name()
    }

    /// The phase this entry runs at.
    pub fn phase(&self) -> PluginPhase {
        self.phase
    }

    /// Whether the plugin runs on routes that don't mention it.
    pub fn default_enabled(&self) -> bool {
        self.default_enabled
    }

    /// The plugin itself.
    pub fn plugin(&self) -> &dyn ServicePlugin {
        self.plugin.as_ref()
    }
}

/// Ordered collection of registered plugins.
#[derive(Default)]
pub struct PluginPipeline {
    entries: Vec<PluginEntry>,
}

impl PluginPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin at a phase.
    pub fn register(
        &mut self,
        plugin: impl ServicePlugin,
        phase: PluginPhase,
        options: PluginOptions,
    ) {
        self.entries.push(PluginEntry {
            plugin: Arc::new(plugin),
            phase,
            default_enabled: options.default_enabled,
        });
    }

    /// Iterate the entries of one phase, in registration order.
    pub fn phase(&self, phase: PluginPhase) -> impl Iterator<Item = &PluginEntry> {
        self.entries.iter().filter(move |entry| entry.phase == phase)
    }

    /// Iterate the OnMatch entries active for a route, in registration
    /// order.
    pub fn active_on_match<'a>(
        &'a self,
        options: &'a RouteOptions,
    ) -> impl Iterator<Item = &'a PluginEntry> {
        self.entries.iter().filter(move |entry| {
            entry.phase == PluginPhase::OnMatch
                && if entry.default_enabled {
                    !options.disables(entry.name())
                } else {
                    options.enables(entry.name())
                }
        })
    }

    /// Total number of registered plugins across all phases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
