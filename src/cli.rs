use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsa")]
#[command(
    version,
    about = "Design System Auditor - Audit component, font, and color usage in design files",
    long_about = "Design System Auditor (DSA)\n\nModes:\n- analyze: extract component/font/color usage from one or more frames.\n- summary: aggregate usage across frames into one audit report.\n- export: emit an LVGL stylesheet (colors + typography) for firmware handoff.\n- history: list previously analyzed frames from a history file.\n\nSources are figma.com URLs (FIGMA_TOKEN required) or local REST-export .json files.\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for batch size and the large-frame advisory threshold; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract per-frame component, font, and color usage
    Analyze {
        #[arg(long, help = "Design source (figma.com URL or local .json export)")]
        source: String,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Frame node ids to analyze (comma-separated); defaults to the URL's node-id or all top-level frames"
        )]
        nodes: Option<Vec<String>>,

        #[arg(long, value_name = "N", help = "Nodes processed between progress reports")]
        batch_size: Option<usize>,

        #[arg(
            long,
            value_name = "PATH",
            help = "JSON file tracking previously analyzed frames; updated after each run"
        )]
        history: Option<PathBuf>,

        #[arg(
            long,
            value_name = "DIR",
            help = "Download one PNG snapshot per analyzed frame into this directory (Figma sources only)"
        )]
        snapshot_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Aggregate usage across frames into one summary
    Summary {
        #[arg(long, help = "Design source (figma.com URL or local .json export)")]
        source: String,

        #[arg(long, value_delimiter = ',', help = "Frame node ids to include (comma-separated)")]
        nodes: Option<Vec<String>>,

        #[arg(long, value_name = "N", help = "Nodes processed between progress reports")]
        batch_size: Option<usize>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// List previously analyzed frames from a history file
    History {
        #[arg(
            long,
            value_name = "PATH",
            help = "JSON history file written by analyze --history"
        )]
        history: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Emit the LVGL stylesheet (colors + typography)
    Export {
        #[arg(long, help = "Design source (figma.com URL or local .json export)")]
        source: String,

        #[arg(long, value_delimiter = ',', help = "Frame node ids to include (comma-separated)")]
        nodes: Option<Vec<String>>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
