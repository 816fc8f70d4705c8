use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Epigraph {
    pub(super) quote: Vec<String>,
    pub(super) author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ChapterOpening {
    pub(super) title: String,
    pub(super) epigraph: Option<Epigraph>,
    pub(super) consumed: Vec<usize>,
}

/// Finds the raw chapter title line and the quote/attribution lines that
/// follow it. The title must be the first non-blank line after any
/// skip-to-content marker. The epigraph ends at the early-release note or the
/// first heading; without either only the first two lines are trusted.
pub(super) fn detect_chapter_opening(
    lines: &[String],
    patterns: &TransformPatterns,
) -> Option<ChapterOpening> {
    let title_index = lines
        .iter()
        .position(|line| !is_blank(line) && !is_skip_to_content(line))
        .filter(|index| patterns.chapter_title.is_match(lines[*index].trim()))?;
    let title = lines[title_index]
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string();

    let region_start = title_index + 1;
    let boundary = lines[region_start..]
        .iter()
        .position(|line| is_early_release_start(line) || is_markdown_heading(line))
        .map(|offset| region_start + offset);
    let region_end = boundary.unwrap_or(lines.len());

    let mut candidates = (region_start..region_end)
        .filter(|index| !is_blank(&lines[*index]) && !is_skip_to_content(&lines[*index]))
        .collect::<Vec<usize>>();
    if boundary.is_none() || candidates.len() > EPIGRAPH_MAX_LINES {
        candidates.truncate(2);
    }

    let epigraph = match candidates.split_last() {
        None => None,
        Some((last, [])) => Some(Epigraph {
            quote: vec![lines[*last].trim().to_string()],
            author: None,
        }),
        Some((last, rest)) => Some(Epigraph {
            quote: rest
                .iter()
                .map(|index| lines[*index].trim().to_string())
                .collect(),
            author: Some(lines[*last].trim().to_string()),
        }),
    };

    let mut consumed = Vec::with_capacity(candidates.len() + 1);
    consumed.push(title_index);
    consumed.extend(candidates);

    Some(ChapterOpening {
        title,
        epigraph,
        consumed,
    })
}

pub(super) fn remove_consumed_lines(lines: Vec<String>, consumed: &[usize]) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            if consumed.contains(&index) {
                None
            } else {
                Some(line)
            }
        })
        .collect()
}

pub(super) fn render_epigraph(epigraph: &Epigraph) -> Vec<String> {
    let mut rendered = Vec::new();
    for (index, line) in epigraph.quote.iter().enumerate() {
        if index > 0 {
            rendered.push(">".to_string());
        }
        rendered.push(format!("> {line}"));
    }

    if let Some(author) = &epigraph.author {
        rendered.push(">".to_string());
        rendered.push(format!("> _{author}_"));
    }

    rendered
}
