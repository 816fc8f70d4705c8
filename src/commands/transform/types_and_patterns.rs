use super::*;

pub(super) const SKIP_TO_CONTENT_MARKER: &str = "Skip to Content";
pub(super) const EARLY_RELEASE_MARKER: &str = "A Note for Early Release Readers";
pub(super) const TOC_HEADING: &str = "## Table of Contents";
pub(super) const TOC_TITLE: &str = "Table of Contents";
pub(super) const CHAPTER_TITLE_PREFIX: &str = "# Chapter";

pub(super) const EARLY_RELEASE_BOILERPLATE_PREFIXES: [&str; 4] = [
    "A Note for Early Release",
    "With Early Release",
    "This will be the",
    "If you",
];
pub(super) const EARLY_RELEASE_CONTENT_MARKERS: [&str; 3] = ["# Chapter", "In Chapter", "In this"];
pub(super) const FOOTER_SECTION_TITLES: [&str; 3] = ["Footnotes", "References", "Settings"];
pub(super) const TOC_EXCLUDED_TITLES: [&str; 4] =
    ["Table of Contents", "Summary", "Footnotes", "References"];

pub(super) const DEFAULT_FOOTER_THRESHOLD: f64 = 0.90;
pub(super) const DEFAULT_EARLY_RELEASE_MIN_CHARS: usize = 100;
pub(super) const DEFAULT_TOC_DEPTH: u8 = 3;
pub(super) const MAX_BLANK_RUN: usize = 2;
pub(super) const EPIGRAPH_MAX_LINES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EarlyReleaseTermination {
    LongLine { min_chars: usize },
    ContentMarker,
    SkipBoilerplate,
}

impl EarlyReleaseTermination {
    pub(super) fn from_mode(mode: EarlyReleaseMode, min_chars: usize) -> Self {
        match mode {
            EarlyReleaseMode::LongLine => Self::LongLine { min_chars },
            EarlyReleaseMode::Marker => Self::ContentMarker,
            EarlyReleaseMode::SkipBoilerplate => Self::SkipBoilerplate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TransformOptions {
    pub(super) early_release: EarlyReleaseTermination,
    pub(super) footer_threshold: f64,
    pub(super) toc_depth: u8,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            early_release: EarlyReleaseTermination::SkipBoilerplate,
            footer_threshold: DEFAULT_FOOTER_THRESHOLD,
            toc_depth: DEFAULT_TOC_DEPTH,
        }
    }
}

impl TransformOptions {
    pub(super) fn from_args(args: &TransformArgs) -> Result<Self> {
        if !(args.footer_threshold > 0.0 && args.footer_threshold < 1.0) {
            bail!(
                "--footer-threshold must be between 0 and 1 (exclusive), got {}",
                args.footer_threshold
            );
        }
        if !(2..=4).contains(&args.toc_depth) {
            bail!("--toc-depth must be 2, 3 or 4, got {}", args.toc_depth);
        }
        if args.early_release_min_chars == 0 {
            bail!("--early-release-min-chars must be positive");
        }

        Ok(Self {
            early_release: EarlyReleaseTermination::from_mode(
                args.early_release,
                args.early_release_min_chars,
            ),
            footer_threshold: args.footer_threshold,
            toc_depth: args.toc_depth,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HeadingLevel {
    Section,
    Subsection,
    Subsubsection,
}

impl HeadingLevel {
    pub(super) fn from_marker(marker: &str) -> Option<Self> {
        match marker.len() {
            2 => Some(Self::Section),
            3 => Some(Self::Subsection),
            4 => Some(Self::Subsubsection),
            _ => None,
        }
    }

    pub(super) fn depth(self) -> u8 {
        match self {
            Self::Section => 2,
            Self::Subsection => 3,
            Self::Subsubsection => 4,
        }
    }

    pub(super) fn marker(self) -> &'static str {
        match self {
            Self::Section => "##",
            Self::Subsection => "###",
            Self::Subsubsection => "####",
        }
    }

    pub(super) fn toc_prefix(self) -> &'static str {
        match self {
            Self::Section => "",
            Self::Subsection => "   - ",
            Self::Subsubsection => "      - ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HeadingMatch {
    pub(super) level: HeadingLevel,
    pub(super) title: String,
    pub(super) label: String,
    pub(super) anchor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TocPlacement {
    ExistingHeading,
    InsertedAfterTitle,
    Skipped,
}

impl TocPlacement {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::ExistingHeading => "existing_heading",
            Self::InsertedAfterTitle => "inserted_after_title",
            Self::Skipped => "skipped",
        }
    }
}

pub(super) struct TransformPatterns {
    pub(super) chapter_title: Regex,
    pub(super) heading: Regex,
    pub(super) section_prefix: Regex,
    pub(super) subsection_prefix: Regex,
    pub(super) subsubsection_prefix: Regex,
    pub(super) footer_keyword: Regex,
    pub(super) reference_marker: Regex,
    pub(super) numbered_item: Regex,
}

impl TransformPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            chapter_title: Regex::new(r"^(?:#\s+)?Chapter\s+\d+")
                .context("failed to compile chapter title regex")?,
            heading: Regex::new(r"^(#{2,4})\s+([^#\s].*?)\s*$")
                .context("failed to compile heading regex")?,
            section_prefix: Regex::new(r"^\d+\.\s*")
                .context("failed to compile section prefix regex")?,
            subsection_prefix: Regex::new(r"^\d+\.\d+\.\s*")
                .context("failed to compile subsection prefix regex")?,
            subsubsection_prefix: Regex::new(r"^\d+\.\d+\.\d+\.\s*")
                .context("failed to compile subsubsection prefix regex")?,
            footer_keyword: Regex::new(
                r"(?i)\b(?:table of contents|previous chapter|next chapter|search)\b",
            )
            .context("failed to compile footer keyword regex")?,
            reference_marker: Regex::new(r"\s*\[\d+(?:,\s*\d+)*\]")
                .context("failed to compile reference marker regex")?,
            numbered_item: Regex::new(r"^\d+\.").context("failed to compile numbered item regex")?,
        })
    }

    pub(super) fn title_prefix(&self, level: HeadingLevel) -> &Regex {
        match level {
            HeadingLevel::Section => &self.section_prefix,
            HeadingLevel::Subsection => &self.subsection_prefix,
            HeadingLevel::Subsubsection => &self.subsubsection_prefix,
        }
    }
}

pub(super) fn is_markdown_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|character| *character == '#').count();
    hashes > 0
        && line[hashes..]
            .chars()
            .next()
            .map(char::is_whitespace)
            .unwrap_or(false)
}

pub(super) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
