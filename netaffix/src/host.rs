//! Capabilities borrowed from the editor that owns the board.
//!
//! Footprints, pads and nets belong to the host. The action only holds net
//! handles for the duration of one invocation and never caches them.

use std::fmt;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Net {0} does not exist on the board")]
    UnknownNet(String),
    #[error("Cannot rename net {net}: {reason}")]
    Rejected { net: String, reason: String },
}

/// Severity framing of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Default dialog title for this severity.
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// A placed part.
pub trait Footprint {
    type NetRef: Clone;

    fn reference(&self) -> &str;

    fn is_selected(&self) -> bool;

    /// The net of each pad, in pad order; `None` for pads without a net.
    fn pads(&self) -> Vec<Option<Self::NetRef>>;
}

/// The open board document.
pub trait Board {
    /// Host-managed net identity.
    type NetRef: Clone + fmt::Debug;
    type Footprint: Footprint<NetRef = Self::NetRef>;

    fn footprints(&self) -> &[Self::Footprint];

    fn net_name(&self, net: &Self::NetRef) -> Option<&str>;

    fn set_net_name(&mut self, net: &Self::NetRef, name: &str) -> Result<(), HostError>;

    fn selected_footprints(&self) -> Vec<&Self::Footprint> {
        self.footprints().iter().filter(|fp| fp.is_selected()).collect()
    }
}

/// The editor application around the board.
pub trait Host {
    type Board: Board;

    /// The board currently open in the editor, if any.
    fn board(&mut self) -> Option<&mut Self::Board>;

    fn refresh_view(&mut self);

    /// Show a modal message and wait for the user to dismiss it.
    fn notify(&mut self, severity: Severity, title: &str, message: &str);
}
