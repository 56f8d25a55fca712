//! End-to-end rename tests against a board file

use netaffix::prelude::*;
use netaffix::{ActionError, NetChecklist, PcbBoard, SilentNotifier};
use std::path::{Path, PathBuf};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn open_with_selection(references: &[&str]) -> FileHost {
    let mut host = FileHost::open(&fixture_path("sensor_board.kicad_pcb"), SilentNotifier)
        .expect("Fixture should load");
    host.pcb_mut().unwrap().select(references);
    host
}

fn ask(text: &'static str, mode: AffixMode) -> impl FnMut() -> Option<Decoration> {
    move || Some(Decoration::new(text, mode))
}

fn net_names(board: &PcbBoard) -> Vec<String> {
    board.nets().values().cloned().collect()
}

#[test]
fn test_prefix_replaces_existing_prefix() {
    let mut host = open_with_selection(&["U1"]);
    let mut pick_i2c = |names: &[String]| -> Vec<String> {
        let mut list = NetChecklist::new(names);
        for i in 0..list.len() {
            if list.names()[i].starts_with("I2C") {
                list.toggle(i);
            }
        }
        list.checked()
    };

    let report = RenameAction::default()
        .run(&mut host, &mut pick_i2c, &mut ask("SENS", AffixMode::Prefix))
        .expect("Rename should succeed");

    assert_eq!(report.chosen, vec!["I2C_SCL", "I2C_SDA"]);
    assert_eq!(report.message(), "Updated nets: I2C_SCL, I2C_SDA");

    let board = host.pcb().unwrap();
    assert_eq!(
        net_names(board),
        vec!["", "GND", "+3V3", "SENS_SDA", "SENS_SCL", "INT_1", "unconnected-(U1-NC-Pad6)", "LED_K"]
    );
}

#[test]
fn test_select_all_suffix() {
    let mut host = open_with_selection(&["U1", "D1"]);
    let mut everything = |names: &[String]| -> Vec<String> {
        let mut list = NetChecklist::new(names);
        list.set_all(true);
        list.checked()
    };

    let report = RenameAction::default()
        .run(&mut host, &mut everything, &mut ask("2", AffixMode::Suffix))
        .unwrap();

    assert_eq!(report.renamed.len(), 6);
    let board = host.pcb().unwrap();
    assert_eq!(board.net_by_name("INT_2").map(|c| c.0), Some(5));
    assert_eq!(board.net_by_name("GND_2").map(|c| c.0), Some(1));
    assert_eq!(board.net_by_name("LED_K_2").map(|c| c.0), Some(7));
    assert_eq!(board.net_by_name("unconnected-(U1-NC-Pad6)").map(|c| c.0), Some(6));
}

#[test]
fn test_written_board_keeps_zone_binding() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("renamed.kicad_pcb");

    let mut host = open_with_selection(&["D1"]);
    let mut gnd = |_: &[String]| -> Vec<String> { vec!["GND".to_string()] };
    RenameAction::default()
        .run(&mut host, &mut gnd, &mut ask("ISO", AffixMode::Suffix))
        .unwrap();
    host.save(Some(Path::new(&out))).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("(net_name \"GND_ISO\")"));
    assert!(text.contains("(net 1 \"GND_ISO\")"));
    assert!(!text.contains("\"GND\""));
    assert!(text.contains("(uuid \"0c4f3e62-5555-4a2b-9c1e-7f1f2d6b0a05\")"));

    let reloaded = PcbBoard::open(&out).unwrap();
    assert_eq!(reloaded.footprints().len(), 3);
}

#[test]
fn test_cancel_leaves_file_untouched() {
    let mut host = open_with_selection(&["U1"]);
    let mut all = |names: &[String]| -> Vec<String> { names.to_vec() };
    let mut cancel = || -> Option<Decoration> { None };

    let err = RenameAction::default()
        .run(&mut host, &mut all, &mut cancel)
        .unwrap_err();

    assert!(matches!(err, ActionError::NoDecorationEntered));
    assert!(!host.is_dirty());
    let original = PcbBoard::open(&fixture_path("sensor_board.kicad_pcb")).unwrap();
    assert_eq!(net_names(host.pcb().unwrap()), net_names(&original));
}

#[test]
fn test_unknown_reference_means_no_selection() {
    let mut host = open_with_selection(&["X99"]);
    let mut all = |names: &[String]| -> Vec<String> { names.to_vec() };
    let err = RenameAction::default()
        .run(&mut host, &mut all, &mut ask("A", AffixMode::Suffix))
        .unwrap_err();
    assert!(matches!(err, ActionError::NoSelection));
    assert_eq!(err.severity(), Severity::Warning);
}
