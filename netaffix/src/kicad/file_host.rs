//! A [`Host`] backed by a board file instead of a running editor.

use std::path::{Path, PathBuf};

use crate::host::{Board, Host, Severity};
use crate::kicad::pcb::{PcbBoard, PcbParseError};

/// Where user-facing messages go.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, title: &str, message: &str);
}

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _severity: Severity, _title: &str, _message: &str) {}
}

impl<F> Notifier for F
where
    F: FnMut(Severity, &str, &str),
{
    fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        self(severity, title, message)
    }
}

pub struct FileHost<N = SilentNotifier> {
    path: Option<PathBuf>,
    board: Option<PcbBoard>,
    notifier: N,
    dirty: bool,
}

impl<N: Notifier> FileHost<N> {
    pub fn new(board: Option<PcbBoard>, notifier: N) -> Self {
        Self {
            path: None,
            board,
            notifier,
            dirty: false,
        }
    }

    /// Open `path` as the current board.
    pub fn open(path: &Path, notifier: N) -> Result<Self, PcbParseError> {
        let board = PcbBoard::open(path)?;
        tracing::info!(
            "Loaded PCB file: {} ({} footprints, {} nets)",
            path.display(),
            board.footprints().len(),
            board.nets().len()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::new(Some(board), notifier)
        })
    }

    pub fn pcb(&self) -> Option<&PcbBoard> {
        self.board.as_ref()
    }

    pub fn pcb_mut(&mut self) -> Option<&mut PcbBoard> {
        self.board.as_mut()
    }

    /// True once a rename has been committed and the view refreshed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the board to `path`, or back to the file it came from.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, std::io::Error> {
        let target = path
            .or(self.path.as_deref())
            .map(Path::to_path_buf)
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no output path for board"))?;
        let board = self
            .board
            .as_ref()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no board open"))?;
        board.save(&target)?;
        self.dirty = false;
        tracing::info!("Saved PCB file: {}", target.display());
        Ok(target)
    }
}

impl<N: Notifier> Host for FileHost<N> {
    type Board = PcbBoard;

    fn board(&mut self) -> Option<&mut PcbBoard> {
        self.board.as_mut()
    }

    fn refresh_view(&mut self) {
        self.dirty = true;
        tracing::debug!("Board marked for write-back");
    }

    fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        self.notifier.notify(severity, title, message);
    }
}
