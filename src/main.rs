use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tpsel::cli::commands::{self, ExportOptions, ListTarget};
use tpsel::emit::ExportFormat;
use tpsel::export::settings::{GroupBy, PrintDesign, TestOrder, parse_field_list};
use tpsel::logging::{LogConfig, LogFormat, init_logging};
use tpsel::selection::NodeRef;

#[derive(Parser)]
#[command(name = "tpsel", about = "Select test plans, suites and cases, then export them", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line style: pretty, compact
    #[arg(long, default_value = "pretty", global = true)]
    log_format: LogFormat,

    /// Never color log output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the selected nodes as a document
    Export {
        /// Forest file (.json, .yaml or .yml)
        forest: PathBuf,

        /// Toggle a node, as KIND:ID (repeatable, applied in order)
        #[arg(short, long = "toggle")]
        toggles: Vec<NodeRef>,

        /// Export settings file (YAML or JSON)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Print design: detailed, compact, summary, custom
        #[arg(long)]
        design: Option<PrintDesign>,

        /// Case order: original, alphabetical, priority, status
        #[arg(long)]
        order: Option<TestOrder>,

        /// Grouping: none, suite, priority, status
        #[arg(long)]
        group_by: Option<GroupBy>,

        /// Drop cases that have never been executed
        #[arg(long)]
        exclude_unexecuted: bool,

        /// Comma-separated case fields to include (implies the custom design)
        #[arg(long)]
        fields: Option<String>,

        /// Output format: json, yaml, markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write the export into this directory instead of stdout
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show how many nodes the toggles select
    Summary {
        /// Forest file (.json, .yaml or .yml)
        forest: PathBuf,

        /// Toggle a node, as KIND:ID (repeatable, applied in order)
        #[arg(short, long = "toggle")]
        toggles: Vec<NodeRef>,
    },

    /// List plans, suites or cases, or the whole tree with selection markers
    List {
        /// What to list: plans, suites, cases, tree
        what: ListTarget,

        /// Forest file (.json, .yaml or .yml)
        forest: PathBuf,

        /// Toggle a node, as KIND:ID (repeatable, applied in order)
        #[arg(short, long = "toggle")]
        toggles: Vec<NodeRef>,
    },
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    if cli.no_color {
        log_config = log_config.with_ansi(false);
    }
    init_logging(&log_config);

    match cli.command {
        Commands::Export {
            forest,
            toggles,
            settings,
            design,
            order,
            group_by,
            exclude_unexecuted,
            fields,
            format,
            output_dir,
        } => {
            let fields = match fields.as_deref().map(parse_field_list).transpose() {
                Ok(fields) => fields,
                Err(e) => fail(e),
            };
            let options = ExportOptions {
                forest,
                toggles,
                settings,
                design,
                order,
                group_by,
                exclude_unexecuted,
                fields,
                format,
                output_dir,
            };
            match commands::run_export(&options) {
                Ok(report) => {
                    if let Some(rendered) = report.rendered {
                        print!("{rendered}");
                        if !rendered.ends_with('\n') {
                            println!();
                        }
                    }
                    eprintln!("{}", report.message);
                }
                Err(e) => fail(e),
            }
        }
        Commands::Summary { forest, toggles } => match commands::run_summary(&forest, &toggles) {
            Ok(result) => print!("{result}"),
            Err(e) => fail(e),
        },
        Commands::List {
            what,
            forest,
            toggles,
        } => match commands::run_list(what, &forest, &toggles) {
            Ok(result) => print!("{result}"),
            Err(e) => fail(e),
        },
    }
}
