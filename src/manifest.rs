use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::model::{ChapterManifest, ChapterSpec};
use crate::util::read_json;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const STATE_DIR_NAME: &str = ".chapterdocs";

#[derive(Debug, Clone)]
pub struct ChapterCatalog {
    pub manifest_path: PathBuf,
    pub base_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub chapters: Vec<ChapterSpec>,
}

impl ChapterCatalog {
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest: ChapterManifest = read_json(manifest_path)
            .with_context(|| format!("failed to load chapter manifest {}", manifest_path.display()))?;

        let base_dir = manifest_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_manifest(manifest_path, &base_dir, manifest)
    }

    pub fn from_manifest(
        manifest_path: &Path,
        base_dir: &Path,
        manifest: ChapterManifest,
    ) -> Result<Self> {
        if manifest.manifest_version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported chapter manifest version {} in {} (expected {})",
                manifest.manifest_version,
                manifest_path.display(),
                SUPPORTED_MANIFEST_VERSION
            );
        }

        if manifest.chapters.is_empty() {
            bail!("chapter manifest {} lists no chapters", manifest_path.display());
        }

        let mut seen = HashSet::<u32>::new();
        for chapter in &manifest.chapters {
            if !seen.insert(chapter.number) {
                bail!(
                    "chapter {} is configured more than once in {}",
                    chapter.number,
                    manifest_path.display()
                );
            }
            if chapter.title.trim().is_empty() {
                bail!("chapter {} has an empty title", chapter.number);
            }
        }

        Ok(Self {
            manifest_path: manifest_path.to_path_buf(),
            base_dir: base_dir.to_path_buf(),
            raw_dir: base_dir.join(&manifest.raw_dir),
            docs_dir: base_dir.join(&manifest.docs_dir),
            chapters: manifest.chapters,
        })
    }

    pub fn input_path(&self, chapter: &ChapterSpec) -> PathBuf {
        self.raw_dir.join(&chapter.input)
    }

    pub fn output_path(&self, chapter: &ChapterSpec) -> PathBuf {
        self.docs_dir.join(&chapter.output)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.base_dir.join(STATE_DIR_NAME)
    }

    pub fn default_report_path(&self) -> PathBuf {
        self.state_dir().join("last_run.json")
    }

    pub fn default_inventory_path(&self) -> PathBuf {
        self.state_dir().join("inventory.json")
    }

    pub fn select(&self, numbers: &[u32]) -> Result<Vec<&ChapterSpec>> {
        if numbers.is_empty() {
            return Ok(self.chapters.iter().collect());
        }

        let mut selected = Vec::with_capacity(numbers.len());
        for number in numbers {
            let chapter = self
                .chapters
                .iter()
                .find(|chapter| chapter.number == *number)
                .with_context(|| {
                    format!(
                        "chapter {} is not configured in {}",
                        number,
                        self.manifest_path.display()
                    )
                })?;
            selected.push(chapter);
        }

        // Manifest order decides processing order, not flag order.
        selected.sort_by_key(|chapter| {
            self.chapters
                .iter()
                .position(|candidate| candidate.number == chapter.number)
        });
        selected.dedup_by_key(|chapter| chapter.number);

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(number: u32) -> ChapterSpec {
        ChapterSpec {
            number,
            input: PathBuf::from(format!("chapter{number}.md")),
            output: PathBuf::from(format!("chapter{number:02}.md")),
            sidebar_position: number,
            title: format!("Title {number}"),
            description: String::new(),
            prev: None,
            next: None,
        }
    }

    fn manifest(chapters: Vec<ChapterSpec>) -> ChapterManifest {
        ChapterManifest {
            manifest_version: 1,
            raw_dir: PathBuf::from("raw"),
            docs_dir: PathBuf::from("docs/docs"),
            chapters,
        }
    }

    #[test]
    fn paths_resolve_against_manifest_directory() {
        let catalog = ChapterCatalog::from_manifest(
            Path::new("book/chapters.json"),
            Path::new("book"),
            manifest(vec![chapter(3)]),
        )
        .expect("catalog");

        let chapter = &catalog.chapters[0];
        assert_eq!(catalog.input_path(chapter), PathBuf::from("book/raw/chapter3.md"));
        assert_eq!(
            catalog.output_path(chapter),
            PathBuf::from("book/docs/docs/chapter03.md")
        );
        assert_eq!(
            catalog.default_report_path(),
            PathBuf::from("book/.chapterdocs/last_run.json")
        );
    }

    #[test]
    fn select_follows_manifest_order_and_rejects_unknown_chapters() {
        let catalog = ChapterCatalog::from_manifest(
            Path::new("chapters.json"),
            Path::new("."),
            manifest(vec![chapter(3), chapter(4), chapter(5)]),
        )
        .expect("catalog");

        let selected = catalog.select(&[5, 3, 5]).expect("selection");
        let numbers = selected
            .iter()
            .map(|chapter| chapter.number)
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![3, 5]);

        assert_eq!(catalog.select(&[]).expect("all").len(), 3);
        assert!(catalog.select(&[9]).is_err());
    }

    #[test]
    fn duplicate_chapters_and_unknown_versions_are_rejected() {
        assert!(ChapterCatalog::from_manifest(
            Path::new("chapters.json"),
            Path::new("."),
            manifest(vec![chapter(3), chapter(3)]),
        )
        .is_err());

        let mut unsupported = manifest(vec![chapter(3)]);
        unsupported.manifest_version = 2;
        assert!(
            ChapterCatalog::from_manifest(Path::new("chapters.json"), Path::new("."), unsupported)
                .is_err()
        );
    }
}
