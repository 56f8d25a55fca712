//! KiCad board files as a host for the rename action.

pub mod file_host;
pub mod pcb;
pub mod sexp;

pub use file_host::{FileHost, Notifier, SilentNotifier};
pub use pcb::{NetCode, PcbBoard, PcbFootprint, PcbPad, PcbParseError};
pub use sexp::{ParseError, SExp, SExpParser};
