use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::manifest::ChapterCatalog;
use crate::model::{ChapterInventoryManifest, InventoryEntry};
use crate::util::{now_utc_string, sha256_str, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let catalog = ChapterCatalog::load(&args.manifest)?;
    let manifest = build_inventory(&catalog)?;

    if args.dry_run {
        info!(
            chapter_count = manifest.chapter_count,
            present_count = manifest.present_count,
            source = %manifest.raw_dir,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let inventory_path = args
        .inventory_path
        .unwrap_or_else(|| catalog.default_inventory_path());

    write_json_pretty(&inventory_path, &manifest)?;
    info!(path = %inventory_path.display(), "wrote inventory manifest");
    info!(
        chapter_count = manifest.chapter_count,
        present_count = manifest.present_count,
        "inventory completed"
    );

    Ok(())
}

pub fn build_inventory(catalog: &ChapterCatalog) -> Result<ChapterInventoryManifest> {
    let pattern =
        Regex::new(r"^chapter(\d+)\.md$").context("failed to compile raw chapter filename regex")?;

    let mut chapters = Vec::with_capacity(catalog.chapters.len());
    let mut configured_inputs = HashSet::<PathBuf>::new();

    for chapter in &catalog.chapters {
        let input_path = catalog.input_path(chapter);
        configured_inputs.insert(input_path.clone());

        if !input_path.is_file() {
            warn!(
                chapter = chapter.number,
                path = %input_path.display(),
                "configured chapter input missing"
            );
            chapters.push(InventoryEntry {
                number: chapter.number,
                input_path: input_path.display().to_string(),
                exists: false,
                sha256: None,
                line_count: None,
            });
            continue;
        }

        let text = fs::read_to_string(&input_path)
            .with_context(|| format!("failed to read {}", input_path.display()))?;
        chapters.push(InventoryEntry {
            number: chapter.number,
            input_path: input_path.display().to_string(),
            exists: true,
            sha256: Some(sha256_str(&text)),
            line_count: Some(text.lines().count()),
        });
    }

    let present_count = chapters.iter().filter(|entry| entry.exists).count();
    if present_count == 0 {
        bail!(
            "none of the {} configured chapter inputs exist under {}",
            chapters.len(),
            catalog.raw_dir.display()
        );
    }

    let mut unconfigured_inputs = Vec::new();
    for (number, path) in discover_raw_chapters(&catalog.raw_dir, &pattern)? {
        if configured_inputs.contains(&path) {
            continue;
        }
        warn!(
            chapter = number,
            path = %path.display(),
            "raw chapter file is not referenced by the manifest"
        );
        unconfigured_inputs.push(path.display().to_string());
    }

    Ok(ChapterInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        manifest_path: catalog.manifest_path.display().to_string(),
        raw_dir: catalog.raw_dir.display().to_string(),
        chapter_count: chapters.len(),
        present_count,
        chapters,
        unconfigured_inputs,
    })
}

fn discover_raw_chapters(raw_dir: &Path, pattern: &Regex) -> Result<Vec<(u32, PathBuf)>> {
    let mut found = Vec::new();

    let entries =
        fs::read_dir(raw_dir).with_context(|| format!("failed to read {}", raw_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", raw_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let Some(number) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| parse_chapter_number(name, pattern))
        else {
            continue;
        };

        found.push((number, path));
    }

    found.sort();
    Ok(found)
}

fn parse_chapter_number(filename: &str, pattern: &Regex) -> Option<u32> {
    pattern
        .captures(filename)?
        .get(1)
        .and_then(|value| value.as_str().parse::<u32>().ok())
}
