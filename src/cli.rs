use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "chapterdocs",
    version,
    about = "Convert extracted book chapters into static-site markdown"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Transform(TransformArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "chapters.json")]
    pub manifest: PathBuf,

    #[arg(long)]
    pub inventory_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    #[arg(long, default_value = "chapters.json")]
    pub manifest: PathBuf,

    #[arg(long = "chapter")]
    pub chapters: Vec<u32>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    #[arg(long, value_enum, default_value_t = EarlyReleaseMode::SkipBoilerplate)]
    pub early_release: EarlyReleaseMode,

    #[arg(long, default_value_t = 100)]
    pub early_release_min_chars: usize,

    #[arg(long, default_value_t = 0.90)]
    pub footer_threshold: f64,

    #[arg(long, default_value_t = 3)]
    pub toc_depth: u8,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum EarlyReleaseMode {
    LongLine,
    Marker,
    SkipBoilerplate,
}

impl EarlyReleaseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LongLine => "long-line",
            Self::Marker => "marker",
            Self::SkipBoilerplate => "skip-boilerplate",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "chapters.json")]
    pub manifest: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}
