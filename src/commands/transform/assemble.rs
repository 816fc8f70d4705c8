use super::*;

#[derive(Debug)]
pub(super) struct RenderedChapter {
    pub(super) text: String,
    pub(super) stats: ChapterStats,
    pub(super) warnings: Vec<String>,
}

pub(super) fn transform_document(
    raw: &str,
    chapter: &ChapterSpec,
    options: &TransformOptions,
    patterns: &TransformPatterns,
) -> RenderedChapter {
    let raw_lines = raw.lines().map(ToOwned::to_owned).collect::<Vec<String>>();
    let input_lines = raw_lines.len();
    let heading = chapter.heading();

    let opening = detect_chapter_opening(&raw_lines, patterns);
    let epigraph = opening.as_ref().and_then(|opening| opening.epigraph.clone());
    let body_source = match &opening {
        Some(opening) => {
            if opening.title != heading {
                debug!(
                    chapter = chapter.number,
                    detected = %opening.title,
                    configured = %heading,
                    "raw chapter title differs from configured title"
                );
            }
            remove_consumed_lines(raw_lines, &opening.consumed)
        }
        None => {
            debug!(chapter = chapter.number, "no chapter title line found in raw input");
            raw_lines
        }
    };

    let stripped = strip_boilerplate(&body_source, options, patterns);
    let mut warnings = stripped.warnings;
    let body = collapse_blank_runs(stripped.lines, MAX_BLANK_RUN);

    let document = assemble_document(&heading, epigraph.as_ref(), body);
    let numbered = number_headings(&document.lines, patterns);
    let entries = build_toc(&numbered.headings, options.toc_depth);
    let toc = render_toc(&entries);
    let (lines, placement) = insert_toc(numbered.lines, &toc, document.toc_slot, patterns);
    if placement == TocPlacement::Skipped && !toc.is_empty() {
        warnings.push("no insertion point found for the table of contents".to_string());
    }

    let mut text = render_front_matter(chapter);
    text.push_str(&append_navigation(&lines.join("\n"), chapter));

    let stats = ChapterStats {
        input_lines,
        output_lines: text.lines().count(),
        skip_markers_removed: stripped.stats.skip_markers_removed,
        early_release_lines_removed: stripped.stats.early_release_lines_removed,
        early_release_unterminated: stripped.stats.early_release_unterminated,
        footer_start_line: stripped.stats.footer_start_line,
        footer_lines_removed: stripped.stats.footer_lines_removed,
        reference_markers_removed: stripped.stats.reference_markers_removed,
        headings_numbered: numbered.headings.len(),
        toc_entries: entries.len(),
        toc_placement: placement.as_str().to_string(),
        epigraph_detected: epigraph.is_some(),
    };

    RenderedChapter {
        text,
        stats,
        warnings,
    }
}

#[derive(Debug)]
pub(super) struct AssembledDocument {
    pub(super) lines: Vec<String>,
    pub(super) toc_slot: Option<usize>,
}

/// Title, epigraph and body as one line sequence. Without an epigraph the
/// contents block belongs directly under the title, so its index is returned
/// as `toc_slot` instead of relying on the blank-line search, which would
/// land after the first paragraph. Numbering keeps line positions, so the
/// slot stays valid until the contents block is spliced in.
pub(super) fn assemble_document(
    heading: &str,
    epigraph: Option<&Epigraph>,
    body: Vec<String>,
) -> AssembledDocument {
    let mut lines = Vec::with_capacity(body.len() + 8);
    lines.push(format!("# {heading}"));
    lines.push(String::new());

    let mut toc_slot = None;
    match epigraph {
        Some(epigraph) => {
            lines.extend(render_epigraph(epigraph));
            lines.push(String::new());
        }
        None if !body.iter().any(|line| line.trim() == TOC_HEADING) => {
            toc_slot = Some(lines.len());
        }
        None => {}
    }

    lines.extend(body);
    AssembledDocument { lines, toc_slot }
}

pub(super) fn render_front_matter(chapter: &ChapterSpec) -> String {
    format!(
        "---\nsidebar_position: {}\ntitle: {}\ndescription: {}\n---\n\n",
        chapter.sidebar_position,
        yaml_quote(&chapter.heading()),
        yaml_quote(&chapter.description)
    )
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

pub(super) fn render_navigation(chapter: &ChapterSpec) -> Option<String> {
    let links = [("Previous", &chapter.prev), ("Next", &chapter.next)]
        .into_iter()
        .filter_map(|(label, link)| {
            link.as_deref()
                .map(str::trim)
                .filter(|link| !link.is_empty())
                .map(|link| format!("**{label}:** {link}"))
        })
        .collect::<Vec<String>>();

    if links.is_empty() {
        None
    } else {
        Some(links.join(" | "))
    }
}

pub(super) fn append_navigation(body: &str, chapter: &ChapterSpec) -> String {
    let mut text = body.trim_end().to_string();
    if let Some(navigation) = render_navigation(chapter) {
        text.push_str("\n\n---\n\n");
        text.push_str(&navigation);
    }
    text.push('\n');
    text
}
