//! User-facing bootstrap notifications.

use crate::models::PluginDescription;
use owo_colors::OwoColorize;

/// One-way notifications emitted by the bootstrap.
pub trait Notifier {
    fn on_no_plugins_found(&mut self);
    fn on_plugin_loaded(&mut self, description: &PluginDescription);
}

fn use_colors(enabled: bool) -> bool {
    enabled && std::env::var_os("NO_COLOR").is_none()
}

/// `error:` prefix, red when colors are on.
pub fn error_prefix(color: bool) -> String {
    if use_colors(color) {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// `loaded:` prefix, green when colors are on.
pub fn loaded_prefix(color: bool) -> String {
    if use_colors(color) {
        "loaded:".green().bold().to_string()
    } else {
        "loaded:".to_string()
    }
}

/// Prints notifications to stderr.
pub struct ConsoleNotifier {
    color: bool,
    quiet: bool,
}

impl ConsoleNotifier {
    /// `quiet` suppresses the per-plugin lines (used for JSON output).
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn on_no_plugins_found(&mut self) {
        eprintln!(
            "{} There are no plugins to load. Check the plugin manifests (--plugins or `plugins` in checkgate.toml).",
            error_prefix(self.color)
        );
    }

    fn on_plugin_loaded(&mut self, description: &PluginDescription) {
        if self.quiet {
            return;
        }
        eprintln!(
            "{} {} {} ({})",
            loaded_prefix(self.color),
            description.name,
            description.version,
            description.language
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A notification captured by `RecordingNotifier`.
pub enum Event {
    NoPluginsFound,
    PluginLoaded(String),
}

#[derive(Debug, Default)]
/// Keeps notifications in memory, in emission order.
pub struct RecordingNotifier {
    pub events: Vec<Event>,
}

impl Notifier for RecordingNotifier {
    fn on_no_plugins_found(&mut self) {
        self.events.push(Event::NoPluginsFound);
    }

    fn on_plugin_loaded(&mut self, description: &PluginDescription) {
        self.events.push(Event::PluginLoaded(description.name.clone()));
    }
}
