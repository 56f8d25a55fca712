//! Registration metadata for editor toolbars and menus.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub show_toolbar_button: bool,
    /// Relative to the plugin's install directory.
    pub icon_file_name: &'static str,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "Add Suffix or Prefix to Nets of Selected Components",
    category: "Modify",
    description: "Add a suffix or prefix to nets associated with selected components in the PCB layout",
    show_toolbar_button: true,
    icon_file_name: "Net_Suffix.png",
};
