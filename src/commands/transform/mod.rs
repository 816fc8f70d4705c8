use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::cli::{EarlyReleaseMode, TransformArgs};
use crate::manifest::ChapterCatalog;
use crate::model::{
    ChapterOutcome, ChapterSpec, ChapterStats, TransformOptionsRecord, TransformRunReport,
};
use crate::util::{now_utc_string, sha256_str, utc_compact_string, write_json_pretty, write_text_file};

mod assemble;
mod epigraph;
mod numbering;
mod run;
mod strip;
mod toc;
mod types_and_patterns;

pub use run::run;

use assemble::*;
use epigraph::*;
use numbering::*;
use strip::*;
use toc::*;
use types_and_patterns::*;
