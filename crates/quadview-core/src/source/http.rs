use std::io::Read;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use crate::error::{QuadviewError, Result};
use crate::pane::{PaneKey, PaneMap};

use super::ImageSource;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the image-set HTTP service.
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct SetsResponse {
    sets: Vec<String>,
}

#[derive(Deserialize)]
struct UrlsResponse {
    tl: String,
    tr: String,
    bl: String,
    br: String,
}

impl UrlsResponse {
    fn into_pane_map(self, source: &HttpSource) -> PaneMap<String> {
        PaneMap::from_fn(|pane| {
            let url = match pane {
                PaneKey::TopLeft => &self.tl,
                PaneKey::TopRight => &self.tr,
                PaneKey::BottomLeft => &self.bl,
                PaneKey::BottomRight => &self.br,
            };
            source.absolute_url(url)
        })
    }
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();
        Self { base_url, agent }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a possibly server-relative URL against the base.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    fn get(&self, url: &str) -> Result<ureq::Response> {
        self.agent.get(url).call().map_err(|e| map_ureq_error(url, e))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let start = Instant::now();
        let response = self.get(url)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| QuadviewError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        debug!("GET {url}: {} bytes in {:?}", bytes.len(), start.elapsed());
        Ok(bytes)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get(url)?
            .into_json::<T>()
            .map_err(|e| QuadviewError::Decode(format!("{url}: {e}")))
    }
}

fn map_ureq_error(url: &str, err: ureq::Error) -> QuadviewError {
    match err {
        ureq::Error::Status(status, _) => QuadviewError::Http {
            status,
            url: url.to_string(),
        },
        ureq::Error::Transport(t) => QuadviewError::Transport {
            url: url.to_string(),
            message: t.to_string(),
        },
    }
}

impl ImageSource for HttpSource {
    fn list_sets(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/image-sets", self.base_url);
        let response: SetsResponse = self.get_json(&url)?;
        Ok(response.sets)
    }

    fn full_resolution_urls(&self, set: &str) -> Result<PaneMap<String>> {
        let url = format!("{}/api/image-urls/{set}", self.base_url);
        let response: UrlsResponse = self.get_json(&url)?;
        Ok(response.into_pane_map(self))
    }

    fn fetch_preview(&self, set: &str, pane: PaneKey) -> Result<Vec<u8>> {
        let url = format!("{}/api/image-preview/{set}/{}", self.base_url, pane.as_str());
        self.get_bytes(&url)
    }

    fn fetch_full(&self, url: &str) -> Result<Vec<u8>> {
        self.get_bytes(&self.absolute_url(url))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
