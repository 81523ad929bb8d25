//! Two-stage (preview, then full-resolution) image loading for one set.
//!
//! [`run_set_load`] performs the fetches and reports [`LoadEvent`]s through a
//! sink; it may run on any thread. [`LoadPipeline`] owns the per-pane slots
//! and applies events on the thread that owns the view. Every write is gated
//! on the event's token still being the live one, so a superseded load can
//! finish its work but never touch the slots of a newer set.

use std::fmt;
use std::thread;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::decode::decode_asset;
use crate::error::QuadviewError;
use crate::pane::{AssetStage, ImageDimensions, PaneImage, PaneKey, PaneMap, PaneSlot};
use crate::source::ImageSource;
use crate::token::{LoadGeneration, LoadToken};

/// Result of one pipeline step, tagged with the token it was issued under.
#[derive(Debug)]
pub struct LoadEvent {
    pub token: LoadToken,
    pub kind: LoadEventKind,
}

#[derive(Debug)]
pub enum LoadEventKind {
    /// Full-resolution locators were resolved for all panes.
    UrlsResolved { urls: PaneMap<String> },
    /// The set could not be resolved; nothing else follows for this token.
    UrlsFailed { error: QuadviewError },
    /// A pane's preview or full-resolution asset finished (or failed).
    PaneAsset {
        pane: PaneKey,
        stage: AssetStage,
        result: Result<PaneImage, QuadviewError>,
    },
    /// All four pane chains have completed.
    Settled,
}

/// Run one set load to completion, reporting through `sink`.
///
/// Each pane runs on its own scoped thread, so a slow download in one pane
/// never delays another pane's preview and the load does not occupy a
/// shared worker pool. Within a pane the preview is always reported before
/// the full-resolution asset. Work stops early once `token` goes stale, and
/// nothing is reported after that point.
pub fn run_set_load<F>(source: &dyn ImageSource, token: &LoadToken, set: &str, sink: F)
where
    F: Fn(LoadEvent) + Sync,
{
    if !token.is_live() {
        return;
    }

    let emit = |kind: LoadEventKind| {
        if token.is_live() {
            sink(LoadEvent {
                token: token.clone(),
                kind,
            });
        }
    };

    let urls = match source.full_resolution_urls(set) {
        Ok(urls) => urls,
        Err(error) => {
            emit(LoadEventKind::UrlsFailed { error });
            return;
        }
    };
    emit(LoadEventKind::UrlsResolved {
        urls: urls.clone(),
    });

    thread::scope(|scope| {
        for pane in PaneKey::ALL {
            let (urls, emit) = (&urls, &emit);
            let spawned = thread::Builder::new()
                .name(format!("quadview-pane-{}", pane.as_str()))
                .spawn_scoped(scope, move || {
                    run_pane_chain(source, token, set, pane, &urls[pane], emit);
                });
            if let Err(e) = spawned {
                warn!("Could not spawn {} loader, running inline: {e}", pane.as_str());
                run_pane_chain(source, token, set, pane, &urls[pane], emit);
            }
        }
    });

    emit(LoadEventKind::Settled);
}

fn run_pane_chain(
    source: &dyn ImageSource,
    token: &LoadToken,
    set: &str,
    pane: PaneKey,
    full_url: &str,
    emit: &(dyn Fn(LoadEventKind) + Sync),
) {
    for stage in [AssetStage::Preview, AssetStage::Full] {
        if !token.is_live() {
            return;
        }
        let start = Instant::now();
        let bytes = match stage {
            AssetStage::Preview => source.fetch_preview(set, pane),
            AssetStage::Full => source.fetch_full(full_url),
        };
        let result = bytes.and_then(decode_asset);
        debug!("{set}/{} {stage} finished in {:?}", pane.as_str(), start.elapsed());
        emit(LoadEventKind::PaneAsset {
            pane,
            stage,
            result,
        });
    }
}

/// Set-level lifecycle, as shown in the status bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading { set: String },
    Ready { set: String },
    Failed { set: String, message: String },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading { .. })
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Idle => f.write_str("Idle"),
            LoadStatus::Loading { set } => write!(f, "Loading set {set}..."),
            LoadStatus::Ready { set } => write!(f, "Set {set}"),
            LoadStatus::Failed { set, message } => write!(f, "Error loading set {set}: {message}"),
        }
    }
}

/// What applying an event changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The event belonged to a superseded load and was dropped.
    Stale,
    /// Accepted, but nothing visible changed.
    Unchanged,
    /// The set-level status changed.
    Status,
    /// A pane's slot was replaced.
    Pane(PaneKey),
}

/// Per-pane image slots plus the live load token.
#[derive(Debug, Default)]
pub struct LoadPipeline {
    generation: LoadGeneration,
    live: Option<LoadToken>,
    panes: PaneMap<PaneSlot>,
    urls: Option<PaneMap<String>>,
    status: LoadStatus,
}

impl LoadPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `set`: supersede any running load and clear every pane.
    pub fn begin(&mut self, set: &str) -> LoadToken {
        let token = self.generation.issue();
        self.live = Some(token.clone());
        self.panes = PaneMap::default();
        self.urls = None;
        self.status = LoadStatus::Loading {
            set: set.to_string(),
        };
        info!("Loading image set {set}");
        token
    }

    /// Supersede the running load without starting another and clear the
    /// panes, leaving nothing selected.
    pub fn cancel(&mut self) {
        self.generation.cancel_all();
        self.live = None;
        self.panes = PaneMap::default();
        self.urls = None;
        self.status = LoadStatus::Idle;
    }

    pub fn is_live(&self, token: &LoadToken) -> bool {
        token.is_live() && self.live.as_ref() == Some(token)
    }

    pub fn apply(&mut self, event: LoadEvent) -> Applied {
        if !self.is_live(&event.token) {
            return Applied::Stale;
        }
        let set = self.current_set().unwrap_or_default().to_string();

        match event.kind {
            LoadEventKind::UrlsResolved { urls } => {
                self.urls = Some(urls);
                Applied::Unchanged
            }
            LoadEventKind::UrlsFailed { error } => {
                error!("Could not resolve image set {set}: {error}");
                self.status = LoadStatus::Failed {
                    set,
                    message: error.to_string(),
                };
                Applied::Status
            }
            LoadEventKind::PaneAsset {
                pane,
                stage,
                result,
            } => self.apply_pane_asset(&set, pane, stage, result),
            LoadEventKind::Settled => {
                if self.status.is_loading() {
                    info!("Image set {set} settled");
                    self.status = LoadStatus::Ready { set };
                    Applied::Status
                } else {
                    Applied::Unchanged
                }
            }
        }
    }

    fn apply_pane_asset(
        &mut self,
        set: &str,
        pane: PaneKey,
        stage: AssetStage,
        result: Result<PaneImage, QuadviewError>,
    ) -> Applied {
        // A full-resolution image is never replaced by anything from the preview stage.
        if stage == AssetStage::Preview && self.panes[pane].stage() == Some(AssetStage::Full) {
            return Applied::Unchanged;
        }

        self.panes[pane] = match result {
            Ok(image) => PaneSlot::Loaded { image, stage },
            Err(e) => {
                warn!("Pane {} of set {set}: {stage} failed: {e}", pane.as_str());
                PaneSlot::Failed {
                    reason: e.to_string(),
                }
            }
        };
        Applied::Pane(pane)
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn current_set(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Idle => None,
            LoadStatus::Loading { set }
            | LoadStatus::Ready { set }
            | LoadStatus::Failed { set, .. } => Some(set),
        }
    }

    pub fn panes(&self) -> &PaneMap<PaneSlot> {
        &self.panes
    }

    pub fn slot(&self, pane: PaneKey) -> &PaneSlot {
        &self.panes[pane]
    }

    pub fn urls(&self) -> Option<&PaneMap<String>> {
        self.urls.as_ref()
    }

    /// Dimensions of the reference pane, when it holds a usable image.
    pub fn reference_dims(&self) -> Option<ImageDimensions> {
        self.panes[PaneKey::REFERENCE]
            .dims()
            .filter(|d| !d.is_degenerate())
    }
}
