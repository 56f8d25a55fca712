//! Add a suffix to every net touched by the given footprints.
//!
//! Usage: cargo run --example rename_board -- board.kicad_pcb CH2 U1 R3

use netaffix::prelude::*;
use netaffix::SilentNotifier;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("usage: rename_board <FILE> <SUFFIX> <REF>...");
        std::process::exit(2);
    }

    let path = Path::new(&args[0]);
    let suffix = args[1].clone();
    let references = &args[2..];

    let mut host = match FileHost::open(path, SilentNotifier) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(board) = host.pcb_mut() {
        for missing in board.select(references) {
            eprintln!("warning: no footprint {}", missing);
        }
    }

    let mut all = |names: &[String]| -> Vec<String> { names.to_vec() };
    let mut ask = move || Some(Decoration::new(&suffix, AffixMode::Suffix));

    match RenameAction::default().execute(&mut host, &mut all, &mut ask) {
        Ok(report) => {
            for rename in &report.renamed {
                println!("{} -> {}", rename.from, rename.to);
            }
            if let Err(e) = host.save(None) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}: {}", e.severity(), e);
            std::process::exit(1);
        }
    }
}
