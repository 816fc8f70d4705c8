use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct SectionCounters {
    pub(super) h2: u32,
    pub(super) h3: u32,
    pub(super) h4: u32,
}

impl SectionCounters {
    pub(super) fn advance(&mut self, level: HeadingLevel) -> String {
        match level {
            HeadingLevel::Section => {
                self.h2 += 1;
                self.h3 = 0;
                self.h4 = 0;
                self.h2.to_string()
            }
            HeadingLevel::Subsection => {
                self.h3 += 1;
                self.h4 = 0;
                format!("{}.{}", self.h2, self.h3)
            }
            HeadingLevel::Subsubsection => {
                self.h4 += 1;
                format!("{}.{}.{}", self.h2, self.h3, self.h4)
            }
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct NumberedLines {
    pub(super) lines: Vec<String>,
    pub(super) headings: Vec<HeadingMatch>,
}

pub(super) fn number_headings(lines: &[String], patterns: &TransformPatterns) -> NumberedLines {
    let mut counters = SectionCounters::default();
    let mut numbered = NumberedLines {
        lines: Vec::with_capacity(lines.len()),
        headings: Vec::new(),
    };

    for line in lines {
        if line.starts_with(CHAPTER_TITLE_PREFIX) {
            numbered.lines.push(line.clone());
            continue;
        }

        let Some((level, raw_title)) = parse_heading(line, &patterns.heading) else {
            numbered.lines.push(line.clone());
            continue;
        };

        if level == HeadingLevel::Section && raw_title == TOC_TITLE {
            numbered.lines.push(line.clone());
            continue;
        }

        let title = strip_existing_label(raw_title, patterns.title_prefix(level));
        let label = counters.advance(level);
        numbered
            .lines
            .push(format!("{} {}. {}", level.marker(), label, title));
        numbered.headings.push(HeadingMatch {
            level,
            anchor: heading_anchor(&label, &title),
            title,
            label,
        });
    }

    numbered
}

pub(super) fn parse_heading<'a>(line: &'a str, heading: &Regex) -> Option<(HeadingLevel, &'a str)> {
    let captures = heading.captures(line)?;
    let level = HeadingLevel::from_marker(captures.get(1)?.as_str())?;
    let title = captures.get(2)?.as_str();
    Some((level, title))
}

fn strip_existing_label(title: &str, prefix: &Regex) -> String {
    let stripped = prefix.replace(title, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        title.trim().to_string()
    } else {
        stripped.to_string()
    }
}
