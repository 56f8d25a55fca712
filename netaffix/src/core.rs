//! Entry points shared by the CLI and other front ends.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::collector::collect_nets;
use crate::config::RenameOptions;
use crate::host::{Board, Footprint};
use crate::kicad::pcb::{PcbBoard, PcbParseError};

#[derive(Debug, thiserror::Error)]
pub enum NetAffixError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PcbParseError> for NetAffixError {
    fn from(e: PcbParseError) -> Self {
        match e {
            PcbParseError::Io(io) => NetAffixError::Io(io),
            other => NetAffixError::Parse(other.to_string()),
        }
    }
}

/// Nets reachable from a set of footprints, without renaming anything.
#[derive(Debug, Clone, Serialize)]
pub struct NetListing {
    pub file: PathBuf,
    pub selected: Vec<String>,
    /// Requested references with no matching footprint.
    pub missing: Vec<String>,
    pub nets: Vec<String>,
}

pub struct NetAffixCore;

impl NetAffixCore {
    /// Load a board and select the footprints named in `references`.
    pub fn open_board<S: AsRef<str>>(
        path: &Path,
        references: &[S],
    ) -> Result<(PcbBoard, Vec<String>), NetAffixError> {
        let mut board = PcbBoard::open(path)?;
        let missing = board.select(references);
        for reference in &missing {
            tracing::warn!("No footprint with reference {} in {}", reference, path.display());
        }
        Ok((board, missing))
    }

    /// List the nets the rename action would offer for `references`.
    pub fn list_nets<S: AsRef<str>>(
        path: &Path,
        references: &[S],
        options: &RenameOptions,
    ) -> Result<NetListing, NetAffixError> {
        let (board, missing) = Self::open_board(path, references)?;
        let selected = board.selected_footprints();
        let names = selected.iter().map(|fp| fp.reference().to_string()).collect();
        let nets = collect_nets(&board, selected, options);
        Ok(NetListing {
            file: path.to_path_buf(),
            selected: names,
            missing,
            nets: nets.into_keys().collect(),
        })
    }
}
