mod common;

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use common::{collect_events, png_bytes};
use quadview_core::error::QuadviewError;
use quadview_core::pane::{AssetStage, PaneKey};
use quadview_core::pipeline::{LoadPipeline, LoadStatus};
use quadview_core::source::{HttpSource, ImageSource};

/// Minimal image-set server: one request per connection, `Connection: close`.
fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream);
        }
    });
    format!("http://{addr}")
}

fn handle(mut stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
            break;
        }
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, content_type, body) = route(&path);
    let head = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}

fn route(path: &str) -> (&'static str, &'static str, Vec<u8>) {
    const OK: &str = "200 OK";
    const JSON: &str = "application/json";
    match path {
        "/api/image-sets" => (OK, JSON, br#"{"sets": ["0001", "0002"]}"#.to_vec()),
        "/api/image-urls/0001" => (
            OK,
            JSON,
            br#"{"tl": "/static-ref/0001-tl.png", "tr": "/static-ref/0001-tr.png",
                 "bl": "/static-img1/0001-bl.png", "br": "/static-img2/0001-br.png"}"#
                .to_vec(),
        ),
        "/api/image-urls/0002" => (
            OK,
            JSON,
            br#"{"tl": "/static-ref/0002-tl.png", "tr": "/missing.png",
                 "bl": "/static-img1/0002-bl.png", "br": "/static-img2/0002-br.png"}"#
                .to_vec(),
        ),
        p if p.starts_with("/api/image-preview/") => {
            (OK, "image/png", png_bytes(40, 30, [9, 9, 9, 255]))
        }
        p if p.starts_with("/static-") => (OK, "image/png", png_bytes(160, 120, [200, 9, 9, 255])),
        _ => ("404 Not Found", "text/plain", b"not found".to_vec()),
    }
}

#[test]
fn test_lists_sets() {
    let source = HttpSource::new(serve());
    assert_eq!(source.list_sets().unwrap(), vec!["0001", "0002"]);
}

#[test]
fn test_resolves_relative_urls_against_base() {
    let base = serve();
    let source = HttpSource::new(format!("{base}/"));

    let urls = source.full_resolution_urls("0001").unwrap();
    assert_eq!(urls[PaneKey::BottomLeft], format!("{base}/static-img1/0001-bl.png"));
}

#[test]
fn test_unknown_set_maps_status_code() {
    let source = HttpSource::new(serve());

    let err = source.full_resolution_urls("9999").unwrap_err();
    assert!(matches!(err, QuadviewError::Http { status: 404, .. }));
}

#[test]
fn test_full_set_load_over_http() {
    let source = HttpSource::new(serve());
    let mut pipeline = LoadPipeline::new();
    let token = pipeline.begin("0001");

    for event in collect_events(&source, &token, "0001") {
        pipeline.apply(event);
    }

    for pane in PaneKey::ALL {
        let slot = pipeline.slot(pane);
        assert_eq!(slot.stage(), Some(AssetStage::Full), "{pane}");
        assert_eq!(slot.dims().map(|d| (d.width, d.height)), Some((160, 120)));
    }
    assert_eq!(pipeline.status(), &LoadStatus::Ready { set: "0001".into() });
}

#[test]
fn test_missing_asset_fails_only_its_pane() {
    let source = HttpSource::new(serve());
    let mut pipeline = LoadPipeline::new();
    let token = pipeline.begin("0002");

    for event in collect_events(&source, &token, "0002") {
        pipeline.apply(event);
    }

    assert!(pipeline.slot(PaneKey::TopRight).is_failed());
    assert_eq!(pipeline.slot(PaneKey::TopLeft).stage(), Some(AssetStage::Full));
}

#[test]
fn test_unreachable_server_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let source = HttpSource::new(format!("http://127.0.0.1:{port}"));

    assert!(matches!(
        source.list_sets(),
        Err(QuadviewError::Transport { .. })
    ));
}
