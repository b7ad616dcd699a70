//! Batch driver
//!
//! Iterates a user selection, rearranges each object into a kit, persists
//! it, and captures a preview. Preconditions are checked once before any
//! work starts; after that, nothing inside the loop aborts the batch —
//! per-item problems degrade that item and are reported at the end.

use std::path::{Path, PathBuf};

use kitforge_scene::{AssetLibrary, KitPrefab, SceneObject};

use crate::policy::ConvertPolicy;
use crate::preview::{capture_preview, PreviewSource, SCREENSHOT_DIR};
use crate::rearrange::{rearrange, RearrangeResult};
use crate::warning::ConvertWarning;

/// File extension for persisted kits
pub const KIT_FILE_EXTENSION: &str = "kit.ron";

/// Blocking precondition failure, reported before any item is processed
#[derive(Debug)]
pub enum BatchError {
    /// The output root directory is not configured or does not exist
    MissingOutputDir(PathBuf),
    /// The selection is empty
    EmptySelection,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::MissingOutputDir(path) => write!(
                f,
                "Output directory '{}' is not configured or does not exist",
                path.display()
            ),
            BatchError::EmptySelection => write!(f, "No objects selected"),
        }
    }
}

impl std::error::Error for BatchError {}

/// Receives batch progress; the cancellation seam
pub trait ProgressSink {
    /// Called before each item starts. Returning `false` cancels the batch
    /// between items; the current selection entry is not processed.
    fn begin_item(&mut self, index: usize, total: usize, name: &str) -> bool;
}

/// Progress sink that reports through the log and never cancels
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn begin_item(&mut self, index: usize, total: usize, name: &str) -> bool {
        log::info!("Converting {}/{}: {}", index + 1, total, name);
        true
    }
}

/// Outcome of one converted item
#[derive(Debug)]
pub struct ItemReport {
    /// Sanitized kit name
    pub name: String,
    /// Path of the persisted kit, if serialization succeeded
    pub kit_path: Option<PathBuf>,
    /// Path of the written screenshot, if one was captured
    pub screenshot: Option<PathBuf>,
    /// Warnings gathered while converting this item
    pub warnings: Vec<ConvertWarning>,
    /// The live working copy, kept when policy says the scene retains it
    pub retained: Option<SceneObject>,
}

/// Aggregate outcome of a batch run
#[derive(Debug)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
    /// Whether the run was cancelled between items
    pub cancelled: bool,
}

impl BatchReport {
    /// Total number of warnings across all items
    pub fn warning_count(&self) -> usize {
        self.items.iter().map(|i| i.warnings.len()).sum()
    }
}

/// Converts selections of scene objects into persisted kits
pub struct KitConverter {
    root_dir: PathBuf,
    policy: ConvertPolicy,
}

impl KitConverter {
    /// Create a converter writing kits under `root_dir`
    pub fn new(root_dir: impl Into<PathBuf>, policy: ConvertPolicy) -> Self {
        Self {
            root_dir: root_dir.into(),
            policy,
        }
    }

    /// The policy snapshot this converter runs under
    pub fn policy(&self) -> &ConvertPolicy {
        &self.policy
    }

    /// Deterministic kit file path for a sanitized name
    pub fn kit_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{}.{}", name, KIT_FILE_EXTENSION))
    }

    /// The screenshot directory beside the kit files
    pub fn screenshot_dir(&self) -> PathBuf {
        self.root_dir.join(SCREENSHOT_DIR)
    }

    /// Convert every object in the selection, in order
    ///
    /// Fails up front on precondition errors; per-item problems never
    /// abort the run. The same policy snapshot governs every item.
    pub fn run_batch(
        &self,
        selection: Vec<SceneObject>,
        assets: &mut AssetLibrary,
        preview: &mut dyn PreviewSource,
        progress: &mut dyn ProgressSink,
    ) -> Result<BatchReport, BatchError> {
        if self.root_dir.as_os_str().is_empty() || !self.root_dir.is_dir() {
            return Err(BatchError::MissingOutputDir(self.root_dir.clone()));
        }
        if selection.is_empty() {
            return Err(BatchError::EmptySelection);
        }

        let total = selection.len();
        let mut items = Vec::with_capacity(total);
        let mut cancelled = false;

        for (index, object) in selection.into_iter().enumerate() {
            if !progress.begin_item(index, total, &object.name) {
                log::info!("Batch cancelled after {} of {} items", index, total);
                cancelled = true;
                break;
            }

            items.push(self.convert_item(object, assets, preview));
        }

        let report = BatchReport { items, cancelled };
        if report.warning_count() > 0 {
            log::warn!(
                "Batch finished with {} warning(s) across {} item(s)",
                report.warning_count(),
                report.items.len()
            );
        }
        Ok(report)
    }

    fn convert_item(
        &self,
        object: SceneObject,
        assets: &mut AssetLibrary,
        preview: &mut dyn PreviewSource,
    ) -> ItemReport {
        let RearrangeResult { root, mut warnings } = rearrange(object, &self.policy, assets);
        let name = root.name.clone();
        let kit_path = self.kit_path(&name);

        let saved = match KitPrefab::from_object(&root, assets) {
            Ok(prefab) => match prefab.save(&kit_path) {
                Ok(()) => true,
                Err(e) => {
                    let warning = ConvertWarning::SaveFailed {
                        name: name.clone(),
                        message: e.to_string(),
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                    false
                }
            },
            Err(e) => {
                let warning = ConvertWarning::SaveFailed {
                    name: name.clone(),
                    message: e.to_string(),
                };
                log::warn!("{}", warning);
                warnings.push(warning);
                false
            }
        };

        // Policy decides whether the scene keeps the live working copy or
        // only the serialized asset survives.
        let retained = if self.policy.destroy_after_generation {
            None
        } else {
            Some(root)
        };

        let mut screenshot = None;
        if saved && self.policy.generate_screenshot {
            match capture_preview(preview, &kit_path, &self.screenshot_dir(), &name) {
                Ok(Some(path)) => screenshot = Some(path),
                Ok(None) => {
                    let warning = ConvertWarning::PreviewTimeout { name: name.clone() };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }
                Err(e) => {
                    log::warn!("Screenshot for '{}' failed: {}", name, e);
                }
            }
        }

        ItemReport {
            name,
            kit_path: saved.then_some(kit_path),
            screenshot,
            warnings,
            retained,
        }
    }
}

/// Convenience wrapper used by hosts that only need default wiring
pub fn run_batch(
    root_dir: impl AsRef<Path>,
    policy: ConvertPolicy,
    selection: Vec<SceneObject>,
    assets: &mut AssetLibrary,
    preview: &mut dyn PreviewSource,
) -> Result<BatchReport, BatchError> {
    KitConverter::new(root_dir.as_ref(), policy).run_batch(
        selection,
        assets,
        preview,
        &mut LogProgress,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::NullPreviewSource;

    struct CancelAfter(usize);

    impl ProgressSink for CancelAfter {
        fn begin_item(&mut self, index: usize, _total: usize, _name: &str) -> bool {
            index < self.0
        }
    }

    fn selection(names: &[&str]) -> Vec<SceneObject> {
        names.iter().map(|name| SceneObject::new(*name)).collect()
    }

    #[test]
    fn test_missing_output_dir_blocks_batch() {
        let converter = KitConverter::new("/nonexistent/kit/output", ConvertPolicy::default());
        let mut assets = AssetLibrary::new();
        let result = converter.run_batch(
            selection(&["a"]),
            &mut assets,
            &mut NullPreviewSource,
            &mut LogProgress,
        );
        assert!(matches!(result, Err(BatchError::MissingOutputDir(_))));
    }

    #[test]
    fn test_unset_output_dir_blocks_batch() {
        let converter = KitConverter::new("", ConvertPolicy::default());
        let mut assets = AssetLibrary::new();
        let result = converter.run_batch(
            selection(&["a"]),
            &mut assets,
            &mut NullPreviewSource,
            &mut LogProgress,
        );
        assert!(matches!(result, Err(BatchError::MissingOutputDir(_))));
    }

    #[test]
    fn test_empty_selection_blocks_batch() {
        let dir = tempfile::tempdir().unwrap();
        let converter = KitConverter::new(dir.path(), ConvertPolicy::default());
        let mut assets = AssetLibrary::new();
        let result = converter.run_batch(
            Vec::new(),
            &mut assets,
            &mut NullPreviewSource,
            &mut LogProgress,
        );
        assert!(matches!(result, Err(BatchError::EmptySelection)));
    }

    #[test]
    fn test_kit_path_is_deterministic() {
        let converter = KitConverter::new("/kits", ConvertPolicy::default());
        assert_eq!(converter.kit_path("bench"), PathBuf::from("/kits/bench.kit.ron"));
        assert_eq!(converter.screenshot_dir(), PathBuf::from("/kits/Screenshots"));
    }

    #[test]
    fn test_batch_persists_each_item() {
        let dir = tempfile::tempdir().unwrap();
        let converter = KitConverter::new(dir.path(), ConvertPolicy::default());
        let mut assets = AssetLibrary::new();

        let report = converter
            .run_batch(
                selection(&["bench", "table"]),
                &mut assets,
                &mut NullPreviewSource,
                &mut LogProgress,
            )
            .unwrap();

        assert_eq!(report.items.len(), 2);
        assert!(!report.cancelled);
        for item in &report.items {
            let path = item.kit_path.as_ref().unwrap();
            assert!(path.exists(), "kit file missing: {}", path.display());
            // Destroyed after generation under the default policy
            assert!(item.retained.is_none());
        }
    }

    #[test]
    fn test_retain_when_not_destroying() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = ConvertPolicy::default();
        policy.destroy_after_generation = false;
        let converter = KitConverter::new(dir.path(), policy);
        let mut assets = AssetLibrary::new();

        let report = converter
            .run_batch(
                selection(&["bench"]),
                &mut assets,
                &mut NullPreviewSource,
                &mut LogProgress,
            )
            .unwrap();

        let retained = report.items[0].retained.as_ref().unwrap();
        assert_eq!(retained.name, "bench");
        assert_eq!(retained.children.len(), 2);
    }

    #[test]
    fn test_cancellation_between_items() {
        let dir = tempfile::tempdir().unwrap();
        let converter = KitConverter::new(dir.path(), ConvertPolicy::default());
        let mut assets = AssetLibrary::new();

        let report = converter
            .run_batch(
                selection(&["a", "b", "c"]),
                &mut assets,
                &mut NullPreviewSource,
                &mut CancelAfter(1),
            )
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].name, "a");
    }

    #[test]
    fn test_preview_timeout_warns_but_saves() {
        let dir = tempfile::tempdir().unwrap();
        let converter = KitConverter::new(dir.path(), ConvertPolicy::default());
        let mut assets = AssetLibrary::new();

        let report = converter
            .run_batch(
                selection(&["bench"]),
                &mut assets,
                &mut NullPreviewSource,
                &mut LogProgress,
            )
            .unwrap();

        let item = &report.items[0];
        assert!(item.kit_path.as_ref().unwrap().exists());
        assert!(item.screenshot.is_none());
        assert!(item
            .warnings
            .iter()
            .any(|w| matches!(w, ConvertWarning::PreviewTimeout { .. })));
    }

    #[test]
    fn test_screenshot_disabled_skips_capture() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = ConvertPolicy::default();
        policy.generate_screenshot = false;
        let converter = KitConverter::new(dir.path(), policy);
        let mut assets = AssetLibrary::new();

        let report = converter
            .run_batch(
                selection(&["bench"]),
                &mut assets,
                &mut NullPreviewSource,
                &mut LogProgress,
            )
            .unwrap();

        let item = &report.items[0];
        assert!(item.screenshot.is_none());
        // No timeout warning either: capture never ran
        assert!(item.warnings.is_empty());
    }
}
