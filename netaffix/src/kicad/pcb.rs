//! KiCad board (`.kicad_pcb`) as a renameable net model.
//!
//! Supports the numbered-net layout written by KiCad 6 through 9:
//! - nets are declared at the top level as `(net <code> "<name>")`
//! - pads refer to them with the same `(net <code> "<name>")` form
//! - zones carry `(net <code>)` plus a separate `(net_name "<name>")`
//! - KiCad 5 net classes list members with `(add_net "<name>")`
//!
//! The parsed tree is kept so renames can be written back in place. Net
//! class entries are bound to their net code when the file is loaded, since
//! a later rename may hand their old name to a different net.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::host::{Board, Footprint, HostError};
use crate::kicad::sexp::{ParseError, SExp, SExpParser};

#[derive(Debug, Error)]
pub enum PcbParseError {
    #[error("S-expression parse error: {0}")]
    SExpParse(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid PCB format: {0}")]
    InvalidFormat(String),
}

/// Net number as written in the board file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetCode(pub u32);

impl fmt::Display for NetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcbPad {
    pub net: Option<NetCode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcbFootprint {
    pub reference: String,
    pub value: String,
    pub pads: Vec<PcbPad>,
    pub selected: bool,
}

impl Footprint for PcbFootprint {
    type NetRef = NetCode;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn pads(&self) -> Vec<Option<NetCode>> {
        self.pads.iter().map(|pad| pad.net).collect()
    }
}

#[derive(Debug, Clone)]
pub struct PcbBoard {
    tree: SExp,
    nets: BTreeMap<NetCode, String>,
    footprints: Vec<PcbFootprint>,
    /// Tree positions of `(add_net ...)` entries per net.
    class_members: BTreeMap<NetCode, Vec<Vec<usize>>>,
}

impl PcbBoard {
    pub fn open(path: &Path) -> Result<Self, PcbParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> Result<Self, PcbParseError> {
        let tree = SExpParser::new(content).parse()?;

        match tree.tag() {
            Some("kicad_pcb") => {}
            Some(other) => {
                return Err(PcbParseError::InvalidFormat(format!(
                    "Expected kicad_pcb, found {}",
                    other
                )))
            }
            None => {
                return Err(PcbParseError::InvalidFormat(
                    "Expected kicad_pcb root".to_string(),
                ))
            }
        }

        let mut nets = BTreeMap::new();
        for item in tree.children("net") {
            let (code, name) = Self::parse_net(item)?;
            nets.insert(code, name);
        }

        let footprints = tree
            .children("footprint")
            .chain(tree.children("module"))
            .map(Self::parse_footprint)
            .collect();

        let mut class_members: BTreeMap<NetCode, Vec<Vec<usize>>> = BTreeMap::new();
        let mut paths = Vec::new();
        tree.find_paths("add_net", &mut Vec::new(), &mut paths);
        for path in paths {
            let name = tree.at_path(&path).and_then(|entry| entry.atom_at(1));
            let code = name.and_then(|name| {
                nets.iter()
                    .find(|(_, n)| n.as_str() == name)
                    .map(|(code, _)| *code)
            });
            match code {
                Some(code) => class_members.entry(code).or_default().push(path),
                None => tracing::debug!("Net class lists unknown net {:?}", name),
            }
        }

        Ok(Self {
            tree,
            nets,
            footprints,
            class_members,
        })
    }

    fn parse_net(sexp: &SExp) -> Result<(NetCode, String), PcbParseError> {
        let code = sexp
            .atom_at(1)
            .and_then(|s| s.parse().ok())
            .map(NetCode)
            .ok_or_else(|| PcbParseError::InvalidFormat(format!("Net requires a numeric id: {}", sexp)))?;
        let name = sexp
            .atom_at(2)
            .ok_or_else(|| PcbParseError::InvalidFormat(format!("Net requires a name: {}", sexp)))?;
        Ok((code, name.to_string()))
    }

    fn parse_footprint(sexp: &SExp) -> PcbFootprint {
        let mut reference = String::new();
        let mut value = String::new();

        for prop in sexp.children("property") {
            match (prop.atom_at(1), prop.atom_at(2)) {
                (Some("Reference"), Some(v)) => reference = v.to_string(),
                (Some("Value"), Some(v)) => value = v.to_string(),
                _ => {}
            }
        }

        // Older files keep reference/value in fp_text
        for text in sexp.children("fp_text") {
            match (text.atom_at(1), text.atom_at(2)) {
                (Some("reference"), Some(v)) if reference.is_empty() => reference = v.to_string(),
                (Some("value"), Some(v)) if value.is_empty() => value = v.to_string(),
                _ => {}
            }
        }

        let pads = sexp
            .children("pad")
            .map(|pad| PcbPad {
                net: pad
                    .child("net")
                    .and_then(|net| net.atom_at(1))
                    .and_then(|code| code.parse().ok())
                    .map(NetCode),
            })
            .collect();

        PcbFootprint {
            reference,
            value,
            pads,
            selected: false,
        }
    }

    pub fn nets(&self) -> &BTreeMap<NetCode, String> {
        &self.nets
    }

    pub fn net_by_name(&self, name: &str) -> Option<NetCode> {
        self.nets
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(code, _)| *code)
    }

    pub fn footprint(&self, reference: &str) -> Option<&PcbFootprint> {
        self.footprints.iter().find(|fp| fp.reference == reference)
    }

    /// Mark the footprints named in `references` as selected, clearing all others.
    ///
    /// Returns the references that matched no footprint.
    pub fn select<S: AsRef<str>>(&mut self, references: &[S]) -> Vec<String> {
        for fp in &mut self.footprints {
            fp.selected = references.iter().any(|r| r.as_ref() == fp.reference);
        }
        references
            .iter()
            .map(AsRef::as_ref)
            .filter(|r| self.footprint(r).is_none())
            .map(str::to_string)
            .collect()
    }

    pub fn to_kicad_string(&self) -> String {
        self.tree.to_pretty_string()
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.to_kicad_string())
    }

    fn rename_in_tree(sexp: &mut SExp, code: NetCode, new: &str) {
        let code_str = code.0.to_string();

        match sexp.tag() {
            Some("net") if sexp.atom_at(1) == Some(code_str.as_str()) => {
                if sexp.atom_at(2).is_some() {
                    sexp.set_at(2, SExp::str(new));
                }
                return;
            }
            Some("zone") => {
                let bound = sexp.child("net").and_then(|n| n.atom_at(1)) == Some(code_str.as_str());
                if bound {
                    if let Some(items) = sexp.as_list_mut() {
                        for item in items.iter_mut().filter(|i| i.tag() == Some("net_name")) {
                            item.set_at(1, SExp::str(new));
                        }
                    }
                }
            }
            _ => {}
        }

        if let Some(items) = sexp.as_list_mut() {
            for item in items.iter_mut().filter(|i| matches!(i, SExp::List(_))) {
                Self::rename_in_tree(item, code, new);
            }
        }
    }
}

impl Board for PcbBoard {
    type NetRef = NetCode;
    type Footprint = PcbFootprint;

    fn footprints(&self) -> &[PcbFootprint] {
        &self.footprints
    }

    fn net_name(&self, net: &NetCode) -> Option<&str> {
        self.nets.get(net).map(String::as_str)
    }

    fn set_net_name(&mut self, net: &NetCode, name: &str) -> Result<(), HostError> {
        if name.is_empty() {
            return Err(HostError::Rejected {
                net: net.to_string(),
                reason: "net name cannot be empty".to_string(),
            });
        }
        let old = self
            .nets
            .get(net)
            .cloned()
            .ok_or_else(|| HostError::UnknownNet(net.to_string()))?;

        Self::rename_in_tree(&mut self.tree, *net, name);
        for path in self.class_members.get(net).into_iter().flatten() {
            if let Some(entry) = self.tree.at_path_mut(path) {
                entry.set_at(1, SExp::str(name));
            }
        }
        self.nets.insert(*net, name.to_string());
        tracing::debug!("Net {} renamed in board tree: {} -> {}", net, old, name);
        Ok(())
    }
}
