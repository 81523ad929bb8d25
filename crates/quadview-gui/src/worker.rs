use std::sync::{mpsc, Arc};

use quadview_core::pipeline::run_set_load;
use quadview_core::source::{open_source, ImageSource};
use quadview_core::viewer::LoadRequest;
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("quadview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut source: Option<Arc<dyn ImageSource>> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::SwitchSource { config } => match open_source(&config) {
                Ok(opened) => {
                    info!("Using image source {config}");
                    source = Some(opened);
                    handle_list_sets(source.as_deref(), &tx, &ctx);
                }
                Err(e) => {
                    error!("Cannot open image source {config}: {e}");
                    send_error(&tx, &ctx, format!("Cannot open image source: {e}"));
                }
            },
            WorkerCommand::ListSets => handle_list_sets(source.as_deref(), &tx, &ctx),
            WorkerCommand::LoadSet(request) => match source {
                Some(ref source) => handle_load_set(Arc::clone(source), request, &tx, &ctx),
                None => send_error(&tx, &ctx, "No image source configured"),
            },
        }
    }
}

fn handle_list_sets(
    source: Option<&dyn ImageSource>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(source) = source else {
        send_error(tx, ctx, "No image source configured");
        return;
    };
    let result = match source.list_sets() {
        Ok(sets) => WorkerResult::Sets {
            sets,
            source: source.describe(),
        },
        Err(e) => {
            error!("Error fetching image sets: {e}");
            WorkerResult::SetsFailed {
                message: e.to_string(),
            }
        }
    };
    send(tx, ctx, result);
}

/// Each load runs on its own thread. A superseded load stops at its next
/// token check and sends nothing further.
fn handle_load_set(
    source: Arc<dyn ImageSource>,
    request: LoadRequest,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let tx = tx.clone();
    let ctx = ctx.clone();
    let spawned = std::thread::Builder::new()
        .name(format!("quadview-load-{}", request.set))
        .spawn(move || {
            run_set_load(source.as_ref(), &request.token, &request.set, |event| {
                let _ = tx.send(WorkerResult::Load(event));
                ctx.request_repaint();
            });
        });
    if let Err(e) = spawned {
        error!("Failed to spawn load thread: {e}");
    }
}
