use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterManifest {
    pub manifest_version: u32,
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    pub chapters: Vec<ChapterSpec>,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("raw")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSpec {
    pub number: u32,
    pub input: PathBuf,
    pub output: PathBuf,
    pub sidebar_position: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl ChapterSpec {
    pub fn heading(&self) -> String {
        format!("Chapter {}. {}", self.number, self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub number: u32,
    pub input_path: String,
    pub exists: bool,
    pub sha256: Option<String>,
    pub line_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub manifest_path: String,
    pub raw_dir: String,
    pub chapter_count: usize,
    pub present_count: usize,
    pub chapters: Vec<InventoryEntry>,
    pub unconfigured_inputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptionsRecord {
    pub early_release: String,
    pub early_release_min_chars: usize,
    pub footer_threshold: f64,
    pub toc_depth: u8,
    pub dry_run: bool,
    pub keep_going: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterStats {
    pub input_lines: usize,
    pub output_lines: usize,
    pub skip_markers_removed: usize,
    pub early_release_lines_removed: usize,
    pub early_release_unterminated: bool,
    pub footer_start_line: Option<usize>,
    pub footer_lines_removed: usize,
    pub reference_markers_removed: usize,
    pub headings_numbered: usize,
    pub toc_entries: usize,
    pub toc_placement: String,
    pub epigraph_detected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterOutcome {
    pub number: u32,
    pub input_path: String,
    pub output_path: String,
    pub source_sha256: Option<String>,
    pub status: String,
    pub error: Option<String>,
    pub stats: Option<ChapterStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRunReport {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub completed_at: String,
    pub command: String,
    pub manifest_path: String,
    pub options: TransformOptionsRecord,
    pub chapters: Vec<ChapterOutcome>,
    pub warnings: Vec<String>,
}
