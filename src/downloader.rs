//! Single request/response cycle against the download backend.

use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result, UNKNOWN_SERVER_ERROR};
use crate::model::{DownloadRequest, DownloadedMedia, MediaFormat};

/// Network seam between the controller and the backend.
///
/// One call is one attempt: implementations must not retry.
#[async_trait]
pub trait DownloadBackend: Send + Sync {
    async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedMedia>;
}

/// [`DownloadBackend`] that POSTs JSON to a fixed endpoint over HTTP(S).
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(endpoint: Url) -> Result<Self> {
        // No timeout: transcoding a long video can take minutes.
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DownloadBackend for HttpBackend {
    async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedMedia> {
        info!(
            endpoint = %self.endpoint,
            url = %request.url,
            format = %request.format,
            "dispatching download request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .inspect_err(|err| warn!(error = %err, "download request failed in transport"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            let message = backend_error_message(&body)?;
            warn!(%status, %message, "backend rejected download request");
            return Err(Error::Backend(message));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();
        debug!(
            size = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "received media payload"
        );

        Ok(DownloadedMedia {
            bytes,
            content_type,
        })
    }
}

/// Pulls the `error` string out of a non-2xx body.
///
/// Unparseable JSON counts as a malformed response. Valid JSON without a
/// non-empty string `error` field gets the generic message.
fn backend_error_message(body: &[u8]) -> Result<String> {
    let parsed: Value = serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "backend error body is not valid JSON");
        Error::Transport(err.to_string())
    })?;

    Ok(parsed
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| UNKNOWN_SERVER_ERROR.to_string(), str::to_owned))
}

/// Name under which a downloaded blob is offered for saving.
///
/// The extension is guessed from the declared media type only; the bytes are
/// never inspected.
pub fn file_name_for(format: MediaFormat, content_type: Option<&str>) -> String {
    let content_type = content_type.unwrap_or_default();
    let extension = if content_type.contains("mp4") {
        ".mp4"
    } else if content_type.contains("mp3") {
        ".mp3"
    } else {
        ""
    };
    format!("{}{}", format.file_stem(), extension)
}
