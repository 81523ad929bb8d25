use quadview_core::config::{SourceConfig, ViewerConfig};
use quadview_core::pipeline::LoadEvent;
use quadview_core::viewer::LoadRequest;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Replace the image source, then list its sets.
    SwitchSource { config: SourceConfig },

    /// List the sets of the current source.
    ListSets,

    /// Run a set load; its events come back as [`WorkerResult::Load`].
    LoadSet(LoadRequest),
}

/// Results sent from worker threads back to UI thread.
pub enum WorkerResult {
    Sets {
        sets: Vec<String>,
        source: String,
    },
    SetsFailed {
        message: String,
    },

    /// One step of a set load, tagged with its token.
    Load(LoadEvent),

    ConfigImported {
        config: ViewerConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
