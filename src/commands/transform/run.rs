use super::*;

pub fn run(args: TransformArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let options = TransformOptions::from_args(&args)?;
    let catalog = ChapterCatalog::load(&args.manifest)?;
    let chapters = catalog.select(&args.chapters)?;
    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| catalog.default_report_path());
    let patterns = TransformPatterns::new()?;

    info!(
        manifest = %catalog.manifest_path.display(),
        run_id = %run_id,
        chapters = chapters.len(),
        early_release = args.early_release.as_str(),
        footer_threshold = options.footer_threshold,
        toc_depth = options.toc_depth,
        dry_run = args.dry_run,
        "starting transform"
    );

    let mut outcomes = Vec::with_capacity(chapters.len());
    let mut warnings = Vec::<String>::new();
    let mut failure = None;

    for chapter in &chapters {
        let input_path = catalog.input_path(chapter);
        let output_path = catalog.output_path(chapter);

        match transform_chapter(
            chapter,
            &input_path,
            &output_path,
            &options,
            &patterns,
            args.dry_run,
        ) {
            Ok((outcome, chapter_warnings)) => {
                warnings.extend(
                    chapter_warnings
                        .into_iter()
                        .map(|warning| format!("chapter {}: {}", chapter.number, warning)),
                );
                outcomes.push(outcome);
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(chapter = chapter.number, error = %message, "chapter failed");
                outcomes.push(ChapterOutcome {
                    number: chapter.number,
                    input_path: input_path.display().to_string(),
                    output_path: output_path.display().to_string(),
                    source_sha256: None,
                    status: "failed".to_string(),
                    error: Some(message),
                    stats: None,
                });

                if !args.keep_going {
                    failure = Some(err.context(format!("chapter {} failed", chapter.number)));
                    break;
                }
            }
        }
    }

    let failed_count = outcomes
        .iter()
        .filter(|outcome| outcome.status == "failed")
        .count();
    let status = if failed_count == 0 {
        "completed"
    } else if failed_count == outcomes.len() {
        "failed"
    } else {
        "partial"
    };

    if args.dry_run {
        info!(
            chapters = outcomes.len(),
            failed = failed_count,
            "transform dry-run complete"
        );
    } else {
        let report = TransformRunReport {
            manifest_version: 1,
            run_id,
            status: status.to_string(),
            started_at,
            completed_at: now_utc_string(),
            command: render_transform_command(&args),
            manifest_path: catalog.manifest_path.display().to_string(),
            options: options_record(&args, &options),
            chapters: outcomes,
            warnings,
        };
        write_json_pretty(&report_path, &report)?;
        info!(path = %report_path.display(), status = status, "wrote transform run report");
    }

    if let Some(err) = failure {
        return Err(err);
    }
    if failed_count > 0 {
        bail!("{} of {} chapters failed", failed_count, chapters.len());
    }

    info!(chapters = chapters.len(), "transform completed");
    Ok(())
}

fn transform_chapter(
    chapter: &ChapterSpec,
    input_path: &Path,
    output_path: &Path,
    options: &TransformOptions,
    patterns: &TransformPatterns,
    dry_run: bool,
) -> Result<(ChapterOutcome, Vec<String>)> {
    let raw = fs::read_to_string(input_path).with_context(|| {
        format!(
            "failed to read input for chapter {}: {}",
            chapter.number,
            input_path.display()
        )
    })?;
    let source_sha256 = sha256_str(&raw);

    let rendered = transform_document(&raw, chapter, options, patterns);
    for warning in &rendered.warnings {
        warn!(chapter = chapter.number, warning = %warning, "chapter transform warning");
    }

    let status = if dry_run {
        info!(
            chapter = chapter.number,
            path = %output_path.display(),
            toc_entries = rendered.stats.toc_entries,
            "dry-run: chapter not written"
        );
        "dry_run"
    } else {
        write_text_file(output_path, &rendered.text)?;
        info!(
            chapter = chapter.number,
            path = %output_path.display(),
            headings = rendered.stats.headings_numbered,
            toc_entries = rendered.stats.toc_entries,
            "wrote chapter"
        );
        "written"
    };

    Ok((
        ChapterOutcome {
            number: chapter.number,
            input_path: input_path.display().to_string(),
            output_path: output_path.display().to_string(),
            source_sha256: Some(source_sha256),
            status: status.to_string(),
            error: None,
            stats: Some(rendered.stats),
        },
        rendered.warnings,
    ))
}

fn options_record(args: &TransformArgs, options: &TransformOptions) -> TransformOptionsRecord {
    TransformOptionsRecord {
        early_release: args.early_release.as_str().to_string(),
        early_release_min_chars: args.early_release_min_chars,
        footer_threshold: options.footer_threshold,
        toc_depth: options.toc_depth,
        dry_run: args.dry_run,
        keep_going: args.keep_going,
    }
}

pub(super) fn render_transform_command(args: &TransformArgs) -> String {
    let mut command = vec![
        "chapterdocs".to_string(),
        "transform".to_string(),
        "--manifest".to_string(),
        args.manifest.display().to_string(),
    ];

    for number in &args.chapters {
        command.push("--chapter".to_string());
        command.push(number.to_string());
    }
    if let Some(path) = &args.report_path {
        command.push("--report-path".to_string());
        command.push(path.display().to_string());
    }
    if args.dry_run {
        command.push("--dry-run".to_string());
    }
    if args.keep_going {
        command.push("--keep-going".to_string());
    }
    if args.early_release != EarlyReleaseMode::SkipBoilerplate {
        command.push("--early-release".to_string());
        command.push(args.early_release.as_str().to_string());
    }
    if args.early_release_min_chars != DEFAULT_EARLY_RELEASE_MIN_CHARS {
        command.push("--early-release-min-chars".to_string());
        command.push(args.early_release_min_chars.to_string());
    }
    if args.footer_threshold != DEFAULT_FOOTER_THRESHOLD {
        command.push("--footer-threshold".to_string());
        command.push(args.footer_threshold.to_string());
    }
    if args.toc_depth != DEFAULT_TOC_DEPTH {
        command.push("--toc-depth".to_string());
        command.push(args.toc_depth.to_string());
    }

    command.join(" ")
}
