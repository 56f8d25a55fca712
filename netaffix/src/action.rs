//! The rename action: collect, ask, rename, report.

use serde::Serialize;

use crate::collector::collect_nets;
use crate::config::RenameOptions;
use crate::host::{Board, Footprint, Host, HostError, Severity};
use crate::prompt::{Decoration, DecorationPrompt, SelectionPrompt};
use crate::transform;

/// Why an invocation stopped.
///
/// Every variant except `Host` is a guard that fires before any net is touched.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("No PCB layout is open. Please open a PCB layout.")]
    NoBoardOpen,
    #[error("No components are selected. Please select components on the PCB and try again.")]
    NoSelection,
    #[error("No nets found for the selected components.")]
    NoNetsFound,
    #[error("No nets selected. Exiting...")]
    NoNetsChosen,
    #[error("No suffix or prefix entered. Exiting...")]
    NoDecorationEntered,
    #[error(transparent)]
    Host(#[from] HostError),
}

impl ActionError {
    pub fn severity(&self) -> Severity {
        match self {
            ActionError::NoBoardOpen | ActionError::Host(_) => Severity::Error,
            ActionError::NoSelection | ActionError::NoNetsFound => Severity::Warning,
            ActionError::NoNetsChosen | ActionError::NoDecorationEntered => Severity::Info,
        }
    }

    /// True when the board was left untouched.
    pub fn is_guard(&self) -> bool {
        !matches!(self, ActionError::Host(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetRename {
    pub from: String,
    pub to: String,
}

/// Outcome of a completed invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    /// Names picked in the selection prompt, before renaming.
    pub chosen: Vec<String>,
    pub renamed: Vec<NetRename>,
    pub decoration: Decoration,
}

impl RenameReport {
    pub fn message(&self) -> String {
        format!("Updated nets: {}", self.chosen.join(", "))
    }
}

/// Orchestrates one user-triggered rename.
#[derive(Debug, Clone, Default)]
pub struct RenameAction {
    options: RenameOptions,
}

impl RenameAction {
    pub fn new(options: RenameOptions) -> Self {
        Self { options }
    }

    /// Run the action and surface its outcome through [`Host::notify`].
    pub fn run<H, S, D>(
        &self,
        host: &mut H,
        selection: &mut S,
        decoration: &mut D,
    ) -> Result<RenameReport, ActionError>
    where
        H: Host,
        S: SelectionPrompt + ?Sized,
        D: DecorationPrompt + ?Sized,
    {
        let result = self.execute(host, selection, decoration);
        match &result {
            Ok(report) => host.notify(Severity::Info, "Success", &report.message()),
            Err(e) => {
                let severity = e.severity();
                host.notify(severity, severity.title(), &e.to_string());
            }
        }
        result
    }

    /// Run the action without reporting; guard failures come back as errors.
    pub fn execute<H, S, D>(
        &self,
        host: &mut H,
        selection: &mut S,
        decoration: &mut D,
    ) -> Result<RenameReport, ActionError>
    where
        H: Host,
        S: SelectionPrompt + ?Sized,
        D: DecorationPrompt + ?Sized,
    {
        let board = host.board().ok_or(ActionError::NoBoardOpen)?;

        let selected = board.selected_footprints();
        tracing::info!("Selected components found: {}", selected.len());
        if selected.is_empty() {
            return Err(ActionError::NoSelection);
        }
        tracing::debug!(
            "Selected references: {:?}",
            selected.iter().map(|fp| fp.reference()).collect::<Vec<_>>()
        );

        let nets = collect_nets(&*board, selected, &self.options);
        if nets.is_empty() {
            return Err(ActionError::NoNetsFound);
        }

        let names: Vec<String> = nets.keys().cloned().collect();
        let chosen = selection.choose(&names);
        if chosen.is_empty() {
            return Err(ActionError::NoNetsChosen);
        }

        let decoration = match decoration.ask() {
            Some(d) => Decoration::new(&d.text, d.mode),
            None => return Err(ActionError::NoDecorationEntered),
        };
        if decoration.is_empty() {
            return Err(ActionError::NoDecorationEntered);
        }

        let mut renamed = Vec::with_capacity(chosen.len());
        for name in &chosen {
            let Some(net) = nets.get(name) else {
                tracing::warn!("Net {} was not offered for selection, skipping", name);
                continue;
            };
            let current = board
                .net_name(net)
                .ok_or_else(|| HostError::UnknownNet(name.clone()))?
                .to_string();
            let new_name = transform::redecorate(&current, &decoration.text, decoration.mode);
            tracing::info!("Updating net: {} -> {}", current, new_name);
            board.set_net_name(net, &new_name)?;
            renamed.push(NetRename {
                from: current,
                to: new_name,
            });
        }

        host.refresh_view();

        Ok(RenameReport {
            chosen,
            renamed,
            decoration,
        })
    }
}
