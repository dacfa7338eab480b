//! Artifact-service API client and presigned-storage transport.

use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;
use tracing::debug;

use shipstash_protocol::{
    ArtifactRecord, PartTicketRequest, PartTransferTicket, PresignedData, UploadMetadata,
    UploadPlan, ValidationError, VerifyRequest, validate_metadata,
};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.shipstash.dev/api/v1";

/// Headers a presigned destination's signature may cover. Only headers
/// the plan actually supplied are sent; none are invented.
const PRESIGNED_HEADERS: [&str; 3] = ["Content-Type", "Content-Disposition", "x-amz-acl"];

/// Errors from the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, timeout or redirect failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-200 from the artifact-service API, body verbatim for
    /// operator diagnostics.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered with a non-JSON body. Almost always a bad API
    /// key or wrong base URL being served an HTML page upstream, so it
    /// gets its own error instead of a confusing parse failure.
    #[error(
        "API returned {content_type} instead of JSON; check the API key and base URL"
    )]
    UnexpectedContentType { content_type: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-200 from a presigned storage PUT.
    #[error("storage upload failed ({status}): {body}")]
    Storage { status: u16, body: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("plan contains no presigned URL for direct transfer")]
    MissingPresignedUrl,

    #[error("presigned header {name} has an invalid value")]
    InvalidHeader { name: &'static str },

    #[error("invalid API key")]
    InvalidKey,
}

/// Which file a part ticket is for. The service tracks expansion-file
/// parts under a separate endpoint of the same pending upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileScope {
    Primary,
    Expansion,
}

impl FileScope {
    fn multipart_path(self) -> &'static str {
        match self {
            FileScope::Primary => "/upload/request/multipart",
            FileScope::Expansion => "/upload/request/multipart/expansion",
        }
    }
}

/// Artifact-service client.
///
/// Holds two reqwest clients: an authenticated one for API calls
/// (bearer token as a default header) and a credential-free one for
/// presigned PUTs, so the token never reaches third-party storage.
/// Redirects are followed transparently. Safe to share across
/// concurrent upload invocations; it keeps no per-call state.
pub struct Client {
    api: reqwest::Client,
    storage: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client authenticated with `api_key`.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::InvalidKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let api = reqwest::Client::builder().default_headers(headers).build()?;
        let storage = reqwest::Client::new();

        Ok(Self {
            api,
            storage,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (self-hosted deployments, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// POSTs `body` as JSON to an API path and parses the response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "API request");

        let resp = self.api.post(&url).json(body).send().await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let text = resp.text().await?;

        if status != 200 {
            return Err(Error::Api { status, body: text });
        }
        if !content_type.contains("json") {
            return Err(Error::UnexpectedContentType { content_type });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Requests an upload plan for `metadata`.
    ///
    /// Validates required fields first; a [`Error::Validation`] is
    /// returned before any network I/O happens.
    pub async fn request_plan(&self, metadata: &UploadMetadata) -> Result<UploadPlan, Error> {
        validate_metadata(metadata)?;
        self.post_json("/upload/request", metadata).await
    }

    /// Requests a single-use destination URL for one part.
    pub async fn request_part_ticket(
        &self,
        scope: FileScope,
        pending_upload_id: &str,
        part_number: u32,
        content_length: u64,
    ) -> Result<PartTransferTicket, Error> {
        let req = PartTicketRequest {
            pending_upload_id: pending_upload_id.to_string(),
            part_number,
            content_length,
        };
        self.post_json(scope.multipart_path(), &req).await
    }

    /// Tells the service the pending upload is complete and returns
    /// the final artifact record.
    pub async fn verify(&self, pending_upload_id: &str) -> Result<ArtifactRecord, Error> {
        let req = VerifyRequest {
            pending_upload_id: pending_upload_id.to_string(),
        };
        self.post_json("/upload/verify", &req).await
    }

    /// PUTs a whole file body to a presigned destination.
    ///
    /// Sends exactly the headers the plan supplied — the destination's
    /// signature covers them, so adding or dropping any would be
    /// rejected.
    pub async fn put_direct(&self, data: &PresignedData, body: Vec<u8>) -> Result<(), Error> {
        if data.url.trim().is_empty() {
            return Err(Error::MissingPresignedUrl);
        }

        let mut req = self.storage.put(&data.url);
        for name in PRESIGNED_HEADERS {
            if let Some(value) = data.header(name) {
                let value =
                    HeaderValue::from_str(&value).map_err(|_| Error::InvalidHeader { name })?;
                req = req.header(name, value);
            }
        }

        let resp = req.body(body).send().await?;
        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Storage { status, body });
        }
        Ok(())
    }

    /// PUTs a bounded byte stream of exactly `content_length` bytes to
    /// a part's presigned URL with a raw-octet content type.
    pub async fn put_part<R>(
        &self,
        url: &str,
        content_length: u64,
        body: R,
    ) -> Result<(), Error>
    where
        R: tokio::io::AsyncRead + Send + Sync + 'static,
    {
        let resp = self
            .storage
            .put(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, content_length)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(body)))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Storage { status, body });
        }
        Ok(())
    }
}
