//! Line-oriented stand-ins for the editor's dialogs.
//!
//! Prompts are written to the output stream (stderr in the binary) so stdout
//! stays clean for reports.

use std::io::{self, BufRead, Write};

use netaffix::{AffixMode, Decoration, DecorationPrompt, NetChecklist, SelectionPrompt};

/// Source of trimmed input lines; `None` on EOF or read failure.
pub trait LineSource {
    fn next_line(&mut self) -> Option<String>;
}

/// Process stdin, shared by both prompts through the global stdin buffer.
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

pub struct TerminalSelection<R, W> {
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> TerminalSelection<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn draw(&mut self, list: &NetChecklist) -> std::io::Result<()> {
        writeln!(self.output, "Select the nets to add a suffix or prefix:")?;
        for (i, name) in list.names().iter().enumerate() {
            let mark = if list.is_checked(i) { 'x' } else { ' ' };
            writeln!(self.output, "  [{}] {:>3}. {}", mark, i + 1, name)?;
        }
        let all = if list.all_selected() { 'x' } else { ' ' };
        writeln!(self.output, "  [{}]   a. Select All Nets", all)?;
        write!(
            self.output,
            "Toggle by number (e.g. \"1 3\"), 'a' for all, Enter = OK, 'q' = Cancel: "
        )?;
        self.output.flush()
    }
}

impl<R: LineSource, W: Write> SelectionPrompt for TerminalSelection<R, W> {
    fn choose(&mut self, names: &[String]) -> Vec<String> {
        let mut list = NetChecklist::new(names);
        loop {
            if self.draw(&list).is_err() {
                return Vec::new();
            }
            let Some(line) = self.input.next_line() else {
                return Vec::new();
            };
            match line.to_ascii_lowercase().as_str() {
                "" => return list.checked(),
                "q" | "quit" | "cancel" => return Vec::new(),
                "a" | "all" => list.toggle_all(),
                entries => {
                    for entry in entries.split(|c: char| c == ',' || c.is_whitespace()) {
                        if entry.is_empty() {
                            continue;
                        }
                        let toggled = entry
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .map(|index| list.toggle(index))
                            .unwrap_or(false);
                        if !toggled {
                            let _ = writeln!(self.output, "Unknown entry: {}", entry);
                        }
                    }
                }
            }
        }
    }
}

pub struct TerminalDecoration<R, W> {
    input: R,
    output: W,
    default_mode: AffixMode,
}

impl<R: LineSource, W: Write> TerminalDecoration<R, W> {
    pub fn new(input: R, output: W, default_mode: AffixMode) -> Self {
        Self {
            input,
            output,
            default_mode,
        }
    }

    fn ask_mode(&mut self) -> Option<AffixMode> {
        loop {
            let default = self.default_mode;
            write!(
                self.output,
                "Add as [s]uffix or [p]refix (default {}): ",
                default
            )
            .ok()?;
            self.output.flush().ok()?;

            let line = self.input.next_line()?;
            if line.is_empty() {
                return Some(default);
            }
            match line.parse::<AffixMode>() {
                Ok(mode) => return Some(mode),
                Err(e) => {
                    let _ = writeln!(self.output, "{}", e);
                }
            }
        }
    }
}

impl<R: LineSource, W: Write> DecorationPrompt for TerminalDecoration<R, W> {
    fn ask(&mut self) -> Option<Decoration> {
        writeln!(self.output, "Enter suffix or prefix and choose the mode:").ok()?;
        write!(self.output, "Suffix/Prefix: ").ok()?;
        self.output.flush().ok()?;

        let text = self.input.next_line()?;
        let mode = self.ask_mode()?;
        Some(Decoration::new(&text, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn choose(script: &str, offered: &[&str]) -> (Vec<String>, String) {
        let mut output = Vec::new();
        let chosen = TerminalSelection::new(Cursor::new(script.as_bytes()), &mut output)
            .choose(&names(offered));
        (chosen, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_toggle_by_number() {
        let (chosen, shown) = choose("3, 1\n\n", &["VCC", "GND", "CLK"]);
        assert_eq!(chosen, names(&["CLK", "VCC"]));
        assert!(shown.contains("  [ ]   1. CLK"));
        assert!(shown.contains("  [x]   3. VCC"));
    }

    #[test]
    fn test_select_all_then_untoggle() {
        let (chosen, _) = choose("a\n2\n\n", &["A", "B", "C"]);
        assert_eq!(chosen, names(&["A", "C"]));
    }

    #[test]
    fn test_cancel_and_eof() {
        assert!(choose("1\nq\n", &["A"]).0.is_empty());
        assert!(choose("1\n", &["A"]).0.is_empty());
    }

    #[test]
    fn test_bad_entries_are_reported() {
        let (chosen, shown) = choose("9 x 1\n\n", &["A"]);
        assert_eq!(chosen, names(&["A"]));
        assert!(shown.contains("Unknown entry: 9"));
        assert!(shown.contains("Unknown entry: x"));
    }

    fn ask(script: &str, default_mode: AffixMode) -> Option<Decoration> {
        let mut output = Vec::new();
        TerminalDecoration::new(Cursor::new(script.as_bytes()), &mut output, default_mode).ask()
    }

    #[test]
    fn test_decoration_default_mode() {
        assert_eq!(
            ask("  NEW  \n\n", AffixMode::Suffix),
            Some(Decoration::new("NEW", AffixMode::Suffix))
        );
        assert_eq!(
            ask("NEW\n\n", AffixMode::Prefix),
            Some(Decoration::new("NEW", AffixMode::Prefix))
        );
    }

    #[test]
    fn test_decoration_mode_retry() {
        assert_eq!(
            ask("CH2\nsideways\np\n", AffixMode::Suffix),
            Some(Decoration::new("CH2", AffixMode::Prefix))
        );
    }

    #[test]
    fn test_decoration_eof_cancels() {
        assert_eq!(ask("", AffixMode::Suffix), None);
        assert_eq!(ask("NEW\n", AffixMode::Suffix), None);
    }

    #[test]
    fn test_blank_text_is_returned_empty() {
        let decoration = ask("   \ns\n", AffixMode::Suffix).unwrap();
        assert!(decoration.is_empty());
    }
}
