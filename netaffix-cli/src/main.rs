//! NetAffix CLI - add a suffix or prefix to the nets of selected KiCad footprints.

mod prompts;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use netaffix::{
    ActionError, AffixMode, FileHost, NetAffixCore, RenameAction, RenameOptions, RenameReport,
    Severity, PLUGIN_INFO,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use prompts::{StdinLines, TerminalDecoration, TerminalSelection};

#[derive(Parser)]
#[command(name = "netaffix")]
#[command(about = "Add a suffix or prefix to the nets of selected KiCad footprints", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively rename nets connected to the selected footprints
    Rename {
        /// Path to .kicad_pcb file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Footprint references to select (repeat or comma-separate)
        #[arg(short, long = "select", value_name = "REF", value_delimiter = ',')]
        select: Vec<String>,

        /// Write the renamed board here instead of overwriting FILE
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Do not write the board back
        #[arg(long)]
        dry_run: bool,

        /// Preselect prefix mode in the decoration prompt
        #[arg(long)]
        prefix_default: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List the nets that would be offered for the selected footprints
    Nets {
        /// Path to .kicad_pcb file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Footprint references to select (repeat or comma-separate)
        #[arg(short, long = "select", value_name = "REF", value_delimiter = ',')]
        select: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the plugin registration metadata
    About,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Rename {
            file,
            select,
            output,
            dry_run,
            prefix_default,
            format,
        } => {
            let options = RenameOptions {
                default_mode: if prefix_default {
                    AffixMode::Prefix
                } else {
                    AffixMode::Suffix
                },
                ..RenameOptions::default()
            };
            handle_rename(&file, &select, output.as_deref(), dry_run, options, format)
        }
        Commands::Nets {
            file,
            select,
            format,
        } => handle_nets(&file, &select, format),
        Commands::About => {
            handle_about();
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn check_extension(file: &Path) -> bool {
    if file.extension().and_then(|s| s.to_str()) == Some("kicad_pcb") {
        true
    } else {
        eprintln!("Error: File must be a .kicad_pcb board");
        false
    }
}

fn print_message(severity: Severity, title: &str, message: &str) {
    tracing::debug!("Showing {} message", severity);
    eprintln!("{}: {}", title, message);
}

fn handle_rename(
    file: &Path,
    select: &[String],
    output: Option<&Path>,
    dry_run: bool,
    options: RenameOptions,
    format: OutputFormat,
) -> i32 {
    if !check_extension(file) {
        return 1;
    }

    let mut host = match FileHost::open(file, print_message) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(board) = host.pcb_mut() {
        for missing in board.select(select) {
            tracing::warn!("No footprint with reference {} in {}", missing, file.display());
        }
    }

    let mut selection = TerminalSelection::new(StdinLines, io::stderr());
    let mut decoration = TerminalDecoration::new(StdinLines, io::stderr(), options.default_mode);
    let action = RenameAction::new(options);

    let report = match action.run(&mut host, &mut selection, &mut decoration) {
        Ok(report) => report,
        Err(e) => return exit_code_for(&e),
    };

    let saved = if dry_run || !host.is_dirty() {
        None
    } else {
        match host.save(output) {
            Ok(path) => Some(path),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    };

    output_report(file, &report, saved.as_deref(), format);
    0
}

/// User cancellations exit cleanly; anything that prevented a rename does not.
fn exit_code_for(error: &ActionError) -> i32 {
    match error.severity() {
        Severity::Info => 0,
        Severity::Warning | Severity::Error => 1,
    }
}

fn output_report(file: &Path, report: &RenameReport, saved: Option<&Path>, format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            println!("\nFile: {}", file.display());
            println!("{}", "─".repeat(60));
            for rename in &report.renamed {
                println!("  {} -> {}", rename.from, rename.to);
            }
            match saved {
                Some(path) => println!("\n  Saved to: {}", path.display()),
                None => println!("\n  Dry run, board not written"),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "chosen": report.chosen,
                "decoration": report.decoration,
                "renamed": report.renamed,
                "saved_to": saved.map(|p| p.display().to_string()),
            });
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }
}

fn handle_nets(file: &Path, select: &[String], format: OutputFormat) -> i32 {
    if !check_extension(file) {
        return 1;
    }

    let listing = match NetAffixCore::list_nets(file, select, &RenameOptions::default()) {
        Ok(listing) => listing,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match format {
        OutputFormat::Human => {
            println!("\nFile: {}", listing.file.display());
            println!("{}", "─".repeat(60));
            if listing.selected.is_empty() {
                println!("  No components selected");
            } else {
                println!("  Selected: {}", listing.selected.join(", "));
            }
            if !listing.missing.is_empty() {
                println!("  Not found: {}", listing.missing.join(", "));
            }
            if listing.nets.is_empty() {
                println!("  No nets found");
            }
            for net in &listing.nets {
                println!("    - {}", net);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&listing) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
    }
    0
}

fn handle_about() {
    println!("{}", PLUGIN_INFO.name);
    println!("  Category:    {}", PLUGIN_INFO.category);
    println!("  Description: {}", PLUGIN_INFO.description);
    println!("  Toolbar:     {}", if PLUGIN_INFO.show_toolbar_button { "yes" } else { "no" });
    println!("  Icon:        {}", PLUGIN_INFO.icon_file_name);
}
