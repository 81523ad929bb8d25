#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};

use quadview_core::error::{QuadviewError, Result};
use quadview_core::pane::{AssetStage, PaneKey, PaneMap};
use quadview_core::pipeline::{run_set_load, LoadEvent};
use quadview_core::source::ImageSource;
use quadview_core::token::LoadToken;

/// Encode a solid-colour RGBA PNG in memory.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

/// In-memory image source with scriptable failures and blocking.
///
/// Set `i` (zero-based position in `sets`) serves full-resolution images of
/// `(100 * (i + 1) + pane_index) x (50 * (i + 1))` pixels and previews of a
/// quarter of that, so every decoded image identifies its set, pane and stage.
pub struct FakeSource {
    pub sets: Vec<String>,
    pub failing_assets: HashSet<(String, PaneKey, AssetStage)>,
    pub failing_urls: HashSet<String>,
    pub corrupt_assets: HashSet<(String, PaneKey, AssetStage)>,
    /// Preview fetches for this set block until a message arrives.
    gates: Mutex<HashMap<String, mpsc::Receiver<()>>>,
    /// Full fetches of these sets wait (bounded) until all previews were requested.
    held_full: HashSet<String>,
    previews_requested: Mutex<HashMap<String, usize>>,
    preview_arrived: Condvar,
    pub fetches: AtomicUsize,
}

/// Upper bound on how long a held full fetch waits for the previews.
pub const HOLD_TIMEOUT: Duration = Duration::from_secs(2);

impl FakeSource {
    pub fn new(sets: &[&str]) -> Self {
        Self {
            sets: sets.iter().map(|s| s.to_string()).collect(),
            failing_assets: HashSet::new(),
            failing_urls: HashSet::new(),
            corrupt_assets: HashSet::new(),
            gates: Mutex::new(HashMap::new()),
            held_full: HashSet::new(),
            previews_requested: Mutex::new(HashMap::new()),
            preview_arrived: Condvar::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fail_asset(mut self, set: &str, pane: PaneKey, stage: AssetStage) -> Self {
        self.failing_assets.insert((set.to_string(), pane, stage));
        self
    }

    pub fn corrupt_asset(mut self, set: &str, pane: PaneKey, stage: AssetStage) -> Self {
        self.corrupt_assets.insert((set.to_string(), pane, stage));
        self
    }

    pub fn fail_urls(mut self, set: &str) -> Self {
        self.failing_urls.insert(set.to_string());
        self
    }

    /// Make every full fetch of `set` wait until all four previews were requested.
    pub fn hold_full_until_previews(mut self, set: &str) -> Self {
        self.held_full.insert(set.to_string());
        self
    }

    /// Block the first preview fetch of `set` until the returned sender fires.
    pub fn gate(&self, set: &str) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(set.to_string(), rx);
        tx
    }

    pub fn expected_dims(&self, set: &str, pane: PaneKey, stage: AssetStage) -> (u32, u32) {
        let i = self.sets.iter().position(|s| s == set).expect("known set") as u32;
        let full = (100 * (i + 1) + pane.index() as u32, 50 * (i + 1));
        match stage {
            AssetStage::Full => full,
            AssetStage::Preview => (full.0 / 4, full.1 / 4),
        }
    }

    fn asset(&self, set: &str, pane: PaneKey, stage: AssetStage) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (set.to_string(), pane, stage);
        if self.failing_assets.contains(&key) {
            return Err(QuadviewError::Http {
                status: 500,
                url: format!("mem://{set}/{}/{stage}", pane.as_str()),
            });
        }
        if self.corrupt_assets.contains(&key) {
            return Ok(b"not an image".to_vec());
        }
        let (w, h) = self.expected_dims(set, pane, stage);
        Ok(png_bytes(w, h, [pane.index() as u8 * 60, 0, 0, 255]))
    }
}

impl ImageSource for FakeSource {
    fn list_sets(&self) -> Result<Vec<String>> {
        Ok(self.sets.clone())
    }

    fn full_resolution_urls(&self, set: &str) -> Result<PaneMap<String>> {
        if self.failing_urls.contains(set) {
            return Err(QuadviewError::Http {
                status: 500,
                url: format!("mem://{set}"),
            });
        }
        if !self.sets.iter().any(|s| s == set) {
            return Err(QuadviewError::UnknownSet(set.to_string()));
        }
        Ok(PaneMap::from_fn(|pane| format!("{set}/{}", pane.as_str())))
    }

    fn fetch_preview(&self, set: &str, pane: PaneKey) -> Result<Vec<u8>> {
        let gate = self.gates.lock().unwrap().remove(set);
        if let Some(rx) = gate {
            let _ = rx.recv();
        }
        *self
            .previews_requested
            .lock()
            .unwrap()
            .entry(set.to_string())
            .or_default() += 1;
        self.preview_arrived.notify_all();
        self.asset(set, pane, AssetStage::Preview)
    }

    fn fetch_full(&self, url: &str) -> Result<Vec<u8>> {
        let (set, pane) = url.split_once('/').expect("fake url");
        if self.held_full.contains(set) {
            let requested = self.previews_requested.lock().unwrap();
            let _ = self
                .preview_arrived
                .wait_timeout_while(requested, HOLD_TIMEOUT, |counts| {
                    counts.get(set).copied().unwrap_or(0) < PaneKey::ALL.len()
                })
                .unwrap();
        }
        self.asset(set, pane.parse()?, AssetStage::Full)
    }

    fn describe(&self) -> String {
        "fake".into()
    }
}

/// Run a whole set load synchronously and collect its events in order.
pub fn collect_events(source: &dyn ImageSource, token: &LoadToken, set: &str) -> Vec<LoadEvent> {
    let events = Mutex::new(Vec::new());
    run_set_load(source, token, set, |event| events.lock().unwrap().push(event));
    events.into_inner().unwrap()
}
