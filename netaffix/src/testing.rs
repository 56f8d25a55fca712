//! In-memory host used by unit tests.

use crate::host::{Board, Footprint, Host, HostError, Severity};

#[derive(Debug, Clone)]
pub struct FakeFootprint {
    reference: String,
    selected: bool,
    pads: Vec<Option<usize>>,
}

impl FakeFootprint {
    pub fn new(reference: &str, selected: bool, pads: &[Option<usize>]) -> Self {
        Self {
            reference: reference.to_string(),
            selected,
            pads: pads.to_vec(),
        }
    }
}

impl Footprint for FakeFootprint {
    type NetRef = usize;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn pads(&self) -> Vec<Option<usize>> {
        self.pads.clone()
    }
}

/// Nets are identified by their index in `nets`.
#[derive(Debug, Default)]
pub struct FakeBoard {
    nets: Vec<String>,
    footprints: Vec<FakeFootprint>,
    pub writes: usize,
    /// Net name whose rename the board refuses.
    pub reject: Option<String>,
}

impl FakeBoard {
    pub fn new(nets: &[&str], footprints: Vec<FakeFootprint>) -> Self {
        Self {
            nets: nets.iter().map(|s| s.to_string()).collect(),
            footprints,
            ..Default::default()
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.nets.iter().map(String::as_str).collect()
    }
}

impl Board for FakeBoard {
    type NetRef = usize;
    type Footprint = FakeFootprint;

    fn footprints(&self) -> &[FakeFootprint] {
        &self.footprints
    }

    fn net_name(&self, net: &usize) -> Option<&str> {
        self.nets.get(*net).map(String::as_str)
    }

    fn set_net_name(&mut self, net: &usize, name: &str) -> Result<(), HostError> {
        let current = self
            .nets
            .get_mut(*net)
            .ok_or_else(|| HostError::UnknownNet(net.to_string()))?;
        if self.reject.as_deref() == Some(current.as_str()) {
            return Err(HostError::Rejected {
                net: current.clone(),
                reason: "locked".to_string(),
            });
        }
        *current = name.to_string();
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub board: Option<FakeBoard>,
    pub refreshes: usize,
    pub messages: Vec<(Severity, String, String)>,
}

impl FakeHost {
    pub fn with_board(board: FakeBoard) -> Self {
        Self {
            board: Some(board),
            ..Default::default()
        }
    }
}

impl Host for FakeHost {
    type Board = FakeBoard;

    fn board(&mut self) -> Option<&mut FakeBoard> {
        self.board.as_mut()
    }

    fn refresh_view(&mut self) {
        self.refreshes += 1;
    }

    fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        self.messages
            .push((severity, title.to_string(), message.to_string()));
    }
}
