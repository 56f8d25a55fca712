//! NetAffix - add or replace a suffix/prefix on the nets of selected footprints
//!
//! The library models the editor as a small set of host traits (open board,
//! footprints, pads, net names) and runs a single linear action over them:
//! collect the nets of the selected footprints, let the user pick some,
//! ask for a decoration, and rename.
//!
//! # Quick Start
//!
//! ```no_run
//! use netaffix::{AffixMode, Decoration, FileHost, RenameAction, SilentNotifier};
//! use std::path::Path;
//!
//! let mut host = FileHost::open(Path::new("board.kicad_pcb"), SilentNotifier).unwrap();
//! host.pcb_mut().unwrap().select(&["U1", "R3"]);
//!
//! let mut all = |names: &[String]| -> Vec<String> { names.to_vec() };
//! let mut ask = || Some(Decoration::new("CH2", AffixMode::Suffix));
//! let report = RenameAction::default().run(&mut host, &mut all, &mut ask).unwrap();
//! println!("{}", report.message());
//! host.save(None).unwrap();
//! ```
//!
//! # Decoration rules
//!
//! - **Suffix**: a trailing `_<digits>` is replaced, anything else is kept
//! - **Prefix**: a leading `<alphanumeric>_` is replaced, anything else is kept

pub mod action;
pub mod collector;
pub mod config;
pub mod core;
pub mod host;
pub mod kicad;
pub mod plugin;
pub mod prompt;
pub mod transform;

#[cfg(test)]
mod testing;

// Re-export main types
pub use action::{ActionError, NetRename, RenameAction, RenameReport};
pub use collector::{collect_nets, NetNameIndex};
pub use config::{RenameOptions, UNCONNECTED_MARKER};
pub use crate::core::{NetAffixCore, NetAffixError, NetListing};
pub use host::{Board, Footprint, Host, HostError, Severity};
pub use kicad::{FileHost, NetCode, Notifier, PcbBoard, SilentNotifier};
pub use plugin::{PluginInfo, PLUGIN_INFO};
pub use prompt::{Decoration, DecorationPrompt, NetChecklist, SelectionPrompt};
pub use transform::{compose, redecorate, strip, AffixMode};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AffixMode, Board, Decoration, DecorationPrompt, FileHost, Host, NetAffixError,
        RenameAction, RenameOptions, RenameReport, SelectionPrompt, Severity,
    };
}
