use super::*;

pub(super) fn build_toc(headings: &[HeadingMatch], depth: u8) -> Vec<HeadingMatch> {
    headings
        .iter()
        .filter(|heading| heading.level.depth() <= depth)
        .filter(|heading| !TOC_EXCLUDED_TITLES.contains(&heading.title.as_str()))
        .cloned()
        .collect()
}

pub(super) fn render_toc(entries: &[HeadingMatch]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}{}. [{}](#{})",
                entry.level.toc_prefix(),
                entry.label,
                entry.title,
                entry.anchor
            )
        })
        .collect()
}

pub(super) fn heading_anchor(label: &str, title: &str) -> String {
    let digits = label
        .chars()
        .filter(|character| character.is_ascii_digit())
        .collect::<String>();
    format!("{}-{}", digits, slugify_title(title))
}

pub(super) fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|character| !matches!(character, '?' | '\'' | ','))
        .filter(|character| character.is_alphanumeric() || *character == '_' || *character == '-')
        .collect()
}

/// `title_slot` is where the assembled document left room for a contents
/// block under the title; without it the blank-line search below is used.
pub(super) fn insert_toc(
    lines: Vec<String>,
    toc: &[String],
    title_slot: Option<usize>,
    patterns: &TransformPatterns,
) -> (Vec<String>, TocPlacement) {
    if let Some(heading_index) = lines.iter().position(|line| line.trim() == TOC_HEADING) {
        return (
            replace_existing_toc(lines, heading_index, toc, patterns),
            TocPlacement::ExistingHeading,
        );
    }

    if toc.is_empty() {
        return (lines, TocPlacement::Skipped);
    }

    let Some(insert_at) = title_slot
        .filter(|slot| *slot <= lines.len())
        .or_else(|| find_toc_insertion_point(&lines))
    else {
        return (lines, TocPlacement::Skipped);
    };

    let mut inserted = Vec::with_capacity(lines.len() + toc.len() + 3);
    let mut remaining = lines.into_iter();
    inserted.extend(remaining.by_ref().take(insert_at));
    inserted.push(TOC_HEADING.to_string());
    inserted.push(String::new());
    inserted.extend(toc.iter().cloned());
    inserted.push(String::new());
    inserted.extend(remaining);

    (inserted, TocPlacement::InsertedAfterTitle)
}

fn replace_existing_toc(
    lines: Vec<String>,
    heading_index: usize,
    toc: &[String],
    patterns: &TransformPatterns,
) -> Vec<String> {
    let mut resume_at = heading_index + 1;
    while resume_at < lines.len() && is_stale_toc_line(&lines[resume_at], &patterns.numbered_item)
    {
        resume_at += 1;
    }

    let mut replaced = Vec::with_capacity(lines.len() + toc.len() + 2);
    replaced.extend(lines[..=heading_index].iter().cloned());
    replaced.push(String::new());
    if !toc.is_empty() {
        replaced.extend(toc.iter().cloned());
        replaced.push(String::new());
    }
    replaced.extend(lines[resume_at..].iter().cloned());
    replaced
}

fn is_stale_toc_line(line: &str, numbered_item: &Regex) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('-') || numbered_item.is_match(trimmed)
}

/// The first blank line at least two lines past the `# Chapter` title, which
/// skips a one-line epigraph and its attribution.
pub(super) fn find_toc_insertion_point(lines: &[String]) -> Option<usize> {
    let title_index = lines
        .iter()
        .position(|line| line.starts_with(CHAPTER_TITLE_PREFIX))?;

    lines
        .iter()
        .enumerate()
        .skip(title_index + 3)
        .find(|(_, line)| is_blank(line))
        .map(|(index, _)| index + 1)
}
