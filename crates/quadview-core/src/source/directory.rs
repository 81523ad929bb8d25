use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, error, info, warn};

use crate::config::DirectoryConfig;
use crate::consts::IMAGE_CACHE_CAPACITY;
use crate::error::{QuadviewError, Result};
use crate::normalize::normalize_image;
use crate::pane::{PaneKey, PaneMap};
use crate::preview::create_low_res_preview;

use super::ImageSource;

/// Number of ASCII digits in a set identifier found on disk.
const SET_ID_DIGITS: usize = 4;

/// Serves image sets straight from three local directories.
pub struct DirectorySource {
    config: DirectoryConfig,
    cache: Mutex<ImageCache>,
}

impl DirectorySource {
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        if !config.patterns.tl.contains("{set}") {
            return Err(QuadviewError::Config(
                "top-left pattern needs a {set} placeholder".into(),
            ));
        }
        Ok(Self {
            config,
            cache: Mutex::new(ImageCache::new(IMAGE_CACHE_CAPACITY)),
        })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Expected full path of one pane's file.
    pub fn pane_path(&self, set: &str, pane: PaneKey) -> PathBuf {
        self.config
            .dir_for(pane)
            .join(self.config.patterns.file_name(pane, set))
    }

    fn is_complete(&self, set: &str) -> bool {
        PaneKey::ALL
            .iter()
            .all(|&pane| self.pane_path(set, pane).is_file())
    }

    /// Candidate set ids: reference files matching the top-left pattern.
    fn scan_candidates(&self) -> BTreeSet<String> {
        let dir = &self.config.reference_dir;
        let pattern = &self.config.patterns.tl;
        info!("Scanning for potential sets in {} using pattern {pattern}", dir.display());

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read reference directory {}: {e}", dir.display());
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                match_set_id(pattern, name.to_str()?).map(str::to_string)
            })
            .collect()
    }

    fn load_normalized(&self, path: &Path) -> Result<Arc<DynamicImage>> {
        if let Some(hit) = self.lock_cache().get(path) {
            return Ok(hit);
        }

        let start = Instant::now();
        let img = image::open(path)?;
        let img = if self.config.normalize_previews {
            normalize_image(img)
        } else {
            img
        };
        debug!(
            "Loaded {} ({}x{}) in {:?}",
            path.display(),
            img.width(),
            img.height(),
            start.elapsed()
        );

        let img = Arc::new(img);
        self.lock_cache().insert(path.to_path_buf(), Arc::clone(&img));
        Ok(img)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ImageCache> {
        // A panic while holding the lock cannot leave the cache half-written.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Extract the set id from `name` if it matches `pattern` with a
/// four-digit `{set}` part.
fn match_set_id<'a>(pattern: &str, name: &'a str) -> Option<&'a str> {
    let (prefix, suffix) = pattern.split_once("{set}")?;
    let id = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    (id.len() == SET_ID_DIGITS && id.bytes().all(|b| b.is_ascii_digit())).then_some(id)
}

impl ImageSource for DirectorySource {
    fn list_sets(&self) -> Result<Vec<String>> {
        let candidates = self.scan_candidates();
        if candidates.is_empty() {
            warn!(
                "No potential image numbers found in '{}'",
                self.config.reference_dir.display()
            );
            return Ok(Vec::new());
        }

        info!(
            "Found {} potential numbers. Verifying complete sets...",
            candidates.len()
        );
        let complete: Vec<String> = candidates
            .iter()
            .filter(|set| self.is_complete(set))
            .cloned()
            .collect();
        info!("Found {} complete image sets", complete.len());

        if complete.is_empty() {
            error!("No complete image sets found where all four files exist");
            if let Some(example) = candidates.iter().next() {
                info!("Example expected paths for set '{example}':");
                for pane in PaneKey::ALL {
                    let path = self.pane_path(example, pane);
                    info!(
                        "  {}: {} (exists: {})",
                        pane.as_str(),
                        path.display(),
                        path.is_file()
                    );
                }
            }
        }

        Ok(complete)
    }

    fn full_resolution_urls(&self, set: &str) -> Result<PaneMap<String>> {
        if !self.is_complete(set) {
            return Err(QuadviewError::UnknownSet(set.to_string()));
        }
        Ok(PaneMap::from_fn(|pane| {
            self.pane_path(set, pane).display().to_string()
        }))
    }

    fn fetch_preview(&self, set: &str, pane: PaneKey) -> Result<Vec<u8>> {
        let path = self.pane_path(set, pane);
        if !path.is_file() {
            return Err(QuadviewError::UnknownSet(format!("{set}/{}", pane.as_str())));
        }
        let img = self.load_normalized(&path)?;
        create_low_res_preview(&img, self.config.preview_width, self.config.preview_quality)
    }

    fn fetch_full(&self, url: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(url)?)
    }

    fn describe(&self) -> String {
        self.config.reference_dir.display().to_string()
    }
}

/// Bounded cache of decoded images; evicts the least recently used entry.
struct ImageCache {
    capacity: usize,
    /// Most recently used at the back.
    entries: VecDeque<(PathBuf, Arc<DynamicImage>)>,
}

impl ImageCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    fn get(&mut self, path: &Path) -> Option<Arc<DynamicImage>> {
        let pos = self.entries.iter().position(|(p, _)| p == path)?;
        let entry = self.entries.remove(pos)?;
        let img = Arc::clone(&entry.1);
        self.entries.push_back(entry);
        Some(img)
    }

    fn insert(&mut self, path: PathBuf, img: Arc<DynamicImage>) {
        if self.capacity == 0 {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|(p, _)| *p == path) {
            self.entries.remove(pos);
        } else if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((path, img));
    }

    #[cfg(test)]
    fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }
}
