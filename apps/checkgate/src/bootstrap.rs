//! Plugin bootstrap: load plugins, sync their config, resolve checkers.
//!
//! The run is a single sequential pass:
//! 1. populate plugins from the source (errors propagate);
//! 2. stop with `BootOutcome::NoPluginsFound` when nothing loaded;
//! 3. register supported file extensions;
//! 4. outside standalone mode, sync every plugin with a live authority;
//! 5. per plugin in load order: notify, then resolve its checkers in order.
//!
//! The process exit code is decided by the caller, never here.

use crate::authority::ConfigAuthority;
use crate::error::BootError;
use crate::extensions::ExtensionRegistry;
use crate::models::Plugin;
use crate::notify::Notifier;
use crate::overrides::OverrideTable;
use crate::plugin_source::PluginSource;
use crate::resolver::{resolve_plugin, ActivationMap};
use log::{debug, info, warn};

/// Result of a completed bootstrap.
#[derive(Debug)]
pub struct BootReport {
    pub plugins: Vec<Plugin>,
    pub extensions: ExtensionRegistry,
    pub activation: ActivationMap,
    /// Whether checker config was synced from the authority.
    pub synced: bool,
    pub override_mode: bool,
}

/// Terminal outcome of a bootstrap run.
#[derive(Debug)]
pub enum BootOutcome {
    Ready(BootReport),
    NoPluginsFound,
}

/// Wires the collaborators of one run.
pub struct Bootstrap<'a> {
    source: &'a dyn PluginSource,
    authority: Option<&'a dyn ConfigAuthority>,
    notifier: &'a mut dyn Notifier,
    overrides: &'a OverrideTable,
    standalone: bool,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        source: &'a dyn PluginSource,
        notifier: &'a mut dyn Notifier,
        overrides: &'a OverrideTable,
    ) -> Self {
        Self {
            source,
            authority: None,
            notifier,
            overrides,
            standalone: true,
        }
    }

    /// Use `authority` for config sync and leave standalone mode.
    pub fn with_authority(mut self, authority: &'a dyn ConfigAuthority) -> Self {
        self.authority = Some(authority);
        self.standalone = false;
        self
    }

    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn run(self) -> Result<BootOutcome, BootError> {
        let mut plugins: Vec<Plugin> = Vec::new();
        self.source.init(&mut plugins)?;

        if plugins.is_empty() {
            warn!("event=bootstrap status=no_plugins");
            self.notifier.on_no_plugins_found();
            return Ok(BootOutcome::NoPluginsFound);
        }

        let extensions = ExtensionRegistry::from_plugins(&plugins);
        debug!(
            "event=extensions_registered count={}",
            extensions.extensions().count()
        );

        let mut synced = false;
        if !self.standalone {
            if let Some(authority) = self.authority.filter(|a| a.is_alive()) {
                for plugin in plugins.iter_mut() {
                    authority
                        .sync_config(plugin)
                        .map_err(|source| BootError::Sync {
                            plugin: plugin.tool_name().to_string(),
                            source,
                        })?;
                }
                synced = true;
                info!("event=config_sync status=ok plugins={}", plugins.len());
            } else {
                info!("event=config_sync status=skipped reason=authority_unavailable");
            }
        }

        let mut activation = ActivationMap::new();
        for plugin in &plugins {
            self.notifier.on_plugin_loaded(&plugin.description);
            let changed = resolve_plugin(plugin, self.overrides, &mut activation);
            info!(
                "event=plugin_loaded tool={} language={} checkers={} overridden={}",
                plugin.tool_name(),
                plugin.language(),
                plugin.checkers.len(),
                changed
            );
        }

        Ok(BootOutcome::Ready(BootReport {
            plugins,
            extensions,
            activation,
            synced,
            override_mode: self.overrides.is_active(),
        }))
    }
}
