//! Gather the nets touched by a set of footprints.

use std::collections::BTreeMap;

use crate::config::RenameOptions;
use crate::host::{Board, Footprint};

/// Net name → host handle, rebuilt for every invocation.
///
/// Keys iterate in ascending order, which is the order the selection prompt shows.
pub type NetNameIndex<N> = BTreeMap<String, N>;

/// Walk the pads of `footprints` and index their nets by name.
///
/// Pads without a net, nets with an empty name and unconnected-marker nets
/// are skipped. When two handles share a name the later one wins.
pub fn collect_nets<'a, B, I>(
    board: &B,
    footprints: I,
    options: &RenameOptions,
) -> NetNameIndex<B::NetRef>
where
    B: Board,
    B::Footprint: 'a,
    I: IntoIterator<Item = &'a B::Footprint>,
{
    let mut index = NetNameIndex::new();
    for footprint in footprints {
        for net in footprint.pads().into_iter().flatten() {
            let Some(name) = board.net_name(&net) else {
                continue;
            };
            if name.is_empty() || options.is_unconnected(name) {
                continue;
            }
            index.insert(name.to_string(), net);
        }
    }
    tracing::debug!("Collected {} nets: {:?}", index.len(), index.keys().collect::<Vec<_>>());
    index
}
