//! Options shared by the library and its front ends.

use serde::{Deserialize, Serialize};

use crate::transform::AffixMode;

/// Name prefix the editor gives to nets of pads that are not connected to anything.
pub const UNCONNECTED_MARKER: &str = "unconnected";

/// Options for one rename run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptions {
    /// Mode preselected in the decoration prompt.
    pub default_mode: AffixMode,
    /// Nets whose name starts with this (ignoring case) are never offered.
    pub unconnected_marker: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            default_mode: AffixMode::Suffix,
            unconnected_marker: UNCONNECTED_MARKER.to_string(),
        }
    }
}

impl RenameOptions {
    /// True when `name` denotes an unconnected pad net.
    pub fn is_unconnected(&self, name: &str) -> bool {
        let marker = self.unconnected_marker.as_str();
        name.len() >= marker.len()
            && name.is_char_boundary(marker.len())
            && name[..marker.len()].eq_ignore_ascii_case(marker)
    }
}
