use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::manifest::ChapterCatalog;
use crate::model::{ChapterInventoryManifest, TransformRunReport};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let catalog = ChapterCatalog::load(&args.manifest)?;
    let report_path = args
        .report_path
        .unwrap_or_else(|| catalog.default_report_path());
    let inventory_path = catalog.default_inventory_path();

    info!(
        manifest = %catalog.manifest_path.display(),
        chapters = catalog.chapters.len(),
        "status requested"
    );

    if report_path.exists() {
        let report: TransformRunReport = read_json(&report_path)?;

        info!(
            run_id = %report.run_id,
            status = %report.status,
            started_at = %report.started_at,
            completed_at = %report.completed_at,
            command = %report.command,
            early_release = %report.options.early_release,
            footer_threshold = report.options.footer_threshold,
            toc_depth = report.options.toc_depth,
            chapters = report.chapters.len(),
            warnings = report.warnings.len(),
            "loaded transform run report"
        );

        for outcome in &report.chapters {
            match (&outcome.error, &outcome.stats) {
                (Some(error), _) => warn!(
                    chapter = outcome.number,
                    status = %outcome.status,
                    error = %error,
                    "chapter failed in last run"
                ),
                (None, Some(stats)) => info!(
                    chapter = outcome.number,
                    status = %outcome.status,
                    output = %outcome.output_path,
                    headings = stats.headings_numbered,
                    toc_entries = stats.toc_entries,
                    toc_placement = %stats.toc_placement,
                    footer_lines_removed = stats.footer_lines_removed,
                    reference_markers_removed = stats.reference_markers_removed,
                    early_release_unterminated = stats.early_release_unterminated,
                    "chapter outcome"
                ),
                (None, None) => info!(
                    chapter = outcome.number,
                    status = %outcome.status,
                    "chapter outcome"
                ),
            }
        }
    } else {
        warn!(path = %report_path.display(), "transform run report missing");
    }

    if inventory_path.exists() {
        let inventory: ChapterInventoryManifest = read_json(&inventory_path)?;

        info!(
            generated_at = %inventory.generated_at,
            chapter_count = inventory.chapter_count,
            present_count = inventory.present_count,
            unconfigured = inventory.unconfigured_inputs.len(),
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    for chapter in &catalog.chapters {
        let output_path = catalog.output_path(chapter);
        if !output_path.exists() {
            warn!(
                chapter = chapter.number,
                path = %output_path.display(),
                "chapter output missing"
            );
        }
    }

    Ok(())
}
