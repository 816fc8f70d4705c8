use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct StripStats {
    pub(super) skip_markers_removed: usize,
    pub(super) early_release_lines_removed: usize,
    pub(super) early_release_unterminated: bool,
    pub(super) footer_start_line: Option<usize>,
    pub(super) footer_lines_removed: usize,
    pub(super) reference_markers_removed: usize,
}

#[derive(Debug, Default)]
pub(super) struct StrippedLines {
    pub(super) lines: Vec<String>,
    pub(super) stats: StripStats,
    pub(super) warnings: Vec<String>,
}

pub(super) fn strip_boilerplate(
    lines: &[String],
    options: &TransformOptions,
    patterns: &TransformPatterns,
) -> StrippedLines {
    let total = lines.len();
    let mut stripped = StrippedLines {
        lines: Vec::with_capacity(total),
        ..StrippedLines::default()
    };
    let mut in_early_release = false;
    let mut in_footer = false;

    for (index, line) in lines.iter().enumerate() {
        if in_footer {
            stripped.stats.footer_lines_removed += 1;
            continue;
        }

        if is_skip_to_content(line) {
            stripped.stats.skip_markers_removed += 1;
            continue;
        }

        if is_early_release_start(line) {
            in_early_release = true;
            stripped.stats.early_release_lines_removed += 1;
            continue;
        }

        if in_early_release {
            if ends_early_release(line, options.early_release) {
                in_early_release = false;
            } else {
                stripped.stats.early_release_lines_removed += 1;
                continue;
            }
        }

        if in_footer_window(index, total, options.footer_threshold)
            && is_footer_marker(line, &patterns.footer_keyword)
        {
            in_footer = true;
            stripped.stats.footer_start_line = Some(index + 1);
            stripped.stats.footer_lines_removed += 1;
            continue;
        }

        let (cleaned, removed) = strip_reference_markers(line, &patterns.reference_marker);
        stripped.stats.reference_markers_removed += removed;
        stripped.lines.push(cleaned);
    }

    if in_early_release {
        stripped.stats.early_release_unterminated = true;
        stripped.warnings.push(format!(
            "early-release note never terminated; {} trailing lines were suppressed",
            stripped.stats.early_release_lines_removed
        ));
    }

    stripped
}

pub(super) fn is_skip_to_content(line: &str) -> bool {
    line.contains(SKIP_TO_CONTENT_MARKER)
}

pub(super) fn is_early_release_start(line: &str) -> bool {
    line.contains(EARLY_RELEASE_MARKER)
}

pub(super) fn ends_early_release(line: &str, policy: EarlyReleaseTermination) -> bool {
    // A section heading is never part of the note, whatever the policy.
    if is_markdown_heading(line) {
        return true;
    }

    match policy {
        EarlyReleaseTermination::LongLine { min_chars } => {
            line.trim().chars().count() > min_chars
        }
        EarlyReleaseTermination::ContentMarker => starts_with_content_marker(line),
        EarlyReleaseTermination::SkipBoilerplate => {
            !is_blank(line) && !is_early_release_boilerplate(line)
        }
    }
}

fn starts_with_content_marker(line: &str) -> bool {
    EARLY_RELEASE_CONTENT_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker))
}

pub(super) fn is_early_release_boilerplate(line: &str) -> bool {
    let trimmed = line.trim_start();
    EARLY_RELEASE_BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        || trimmed.to_ascii_lowercase().contains("github.com")
}

pub(super) fn in_footer_window(index: usize, total: usize, threshold: f64) -> bool {
    (index as f64) > (total as f64) * threshold
}

pub(super) fn is_footer_marker(line: &str, footer_keyword: &Regex) -> bool {
    let trimmed = line.trim();
    if trimmed == TOC_HEADING {
        return false;
    }

    FOOTER_SECTION_TITLES.contains(&trimmed) || footer_keyword.is_match(trimmed)
}

pub(super) fn strip_reference_markers(line: &str, reference_marker: &Regex) -> (String, usize) {
    let mut cleaned = String::with_capacity(line.len());
    let mut cursor = 0usize;
    let mut removed = 0usize;

    for found in reference_marker.find_iter(line) {
        // `[1](url)` is link syntax, not a citation.
        if line[found.end()..].starts_with('(') {
            continue;
        }

        cleaned.push_str(&line[cursor..found.start()]);
        cursor = found.end();
        removed += 1;
    }

    cleaned.push_str(&line[cursor..]);
    (cleaned, removed)
}

pub(super) fn collapse_blank_runs(lines: Vec<String>, max_run: usize) -> Vec<String> {
    let mut collapsed = Vec::with_capacity(lines.len());
    let mut run = 0usize;

    for line in lines {
        if is_blank(&line) {
            run += 1;
            if run > max_run {
                continue;
            }
            collapsed.push(String::new());
            continue;
        }

        run = 0;
        collapsed.push(line);
    }

    let start = collapsed
        .iter()
        .position(|line| !is_blank(line))
        .unwrap_or(collapsed.len());
    let end = collapsed
        .iter()
        .rposition(|line| !is_blank(line))
        .map(|index| index + 1)
        .unwrap_or(start);

    collapsed.drain(start..end).collect()
}
