//! Backend HTTP client
//!
//! One method per endpoint. Every call logs the request and response status,
//! maps transport failures to [`Error::Network`]/[`Error::Timeout`], non-2xx
//! replies to [`Error::Api`] and malformed bodies to [`Error::Decode`].

use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use dwnldr_core::prelude::*;
use dwnldr_core::{AccessLogEntry, CommandSpec, FileServerStatus, OsTab};

use crate::wire::{FileList, IpResponse, LogsResponse, StatusResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_LOGGED_BODY: usize = 512;

/// Client for the file-share backend API
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|_| Error::InvalidServerUrl {
            url: base_url.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidServerUrl {
                url: base_url.to_string(),
            });
        }
        // Relative joins keep any path prefix the backend is mounted under
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dwnldr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::network(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Send a request and return its body, failing on non-2xx
    async fn execute(&self, request: RequestBuilder, label: &str) -> Result<String> {
        debug!("API {}", label);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(label)
            } else {
                Error::network(format!("{}: {}", label, e))
            }
        })?;

        let status = response.status();
        debug!("API {} -> {}", label, status.as_u16());

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StatusResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_default();
            warn!("API {} failed with HTTP {}: {}", label, status.as_u16(), message);
            return Err(Error::api(status.as_u16(), message));
        }

        trace!("API {} body: {}", label, truncate_for_log(&body));
        Ok(body)
    }

    fn parse_json<T: DeserializeOwned>(body: &str, label: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            error!("API {} returned malformed JSON: {}", label, e);
            debug!("Raw response: {}", truncate_for_log(body));
            Error::decode(label, e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let label = format!("GET {}", url.path());
        let request = self.http.get(url).header(CACHE_CONTROL, "no-store");
        let body = self.execute(request, &label).await?;
        Self::parse_json(&body, &label)
    }

    async fn post(&self, url: Url) -> Result<()> {
        let label = format!("POST {}", url.path());
        self.execute(self.http.post(url), &label).await.map(|_| ())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// `GET /api/ip`; `Ok(None)` when the backend found no LAN address
    pub async fn detect_ip(&self) -> Result<Option<String>> {
        let response: IpResponse = self.get_json(self.endpoint("api/ip")?).await?;
        Ok(response
            .ip
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty()))
    }

    /// `GET /api/files`
    pub async fn list_files(&self) -> Result<FileList> {
        self.get_json(self.endpoint("api/files")?).await
    }

    /// `GET /api/file-listener`
    pub async fn listener_status(&self) -> Result<FileServerStatus> {
        self.get_json(self.endpoint("api/file-listener")?).await
    }

    /// `POST /api/file-listener/start?port=<port>`
    ///
    /// A refusal (port in use, already running, bind failure) comes back as
    /// [`Error::Api`] carrying the backend's `error` text.
    pub async fn start_listener(&self, port: u16) -> Result<()> {
        let mut url = self.endpoint("api/file-listener/start")?;
        url.query_pairs_mut().append_pair("port", &port.to_string());
        self.post(url).await
    }

    /// `POST /api/file-listener/stop`
    pub async fn stop_listener(&self) -> Result<()> {
        self.post(self.endpoint("api/file-listener/stop")?).await
    }

    /// `GET /api/file-listener/logs?limit=<limit>`
    pub async fn fetch_logs(&self, limit: usize) -> Result<Vec<AccessLogEntry>> {
        let mut url = self.endpoint("api/file-listener/logs")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let response: LogsResponse = self.get_json(url).await?;
        Ok(response.logs)
    }

    /// `POST /api/file-listener/logs/clear`
    pub async fn clear_logs(&self) -> Result<()> {
        self.post(self.endpoint("api/file-listener/logs/clear")?)
            .await
    }

    /// `GET /api/commands?os=<os>`
    pub async fn fetch_commands(&self, os: OsTab) -> Result<CommandSpec> {
        let mut url = self.endpoint("api/commands")?;
        url.query_pairs_mut().append_pair("os", os.as_str());
        let spec: CommandSpec = self.get_json(url).await?;
        if let Some(ref err) = spec.error {
            warn!(
                "Backend served fallback commands for {} ({}): {}",
                os,
                spec.path.as_deref().unwrap_or("?"),
                err
            );
        }
        Ok(spec)
    }
}

fn truncate_for_log(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
