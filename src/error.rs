use thiserror::Error;

/// Errors from the application store (id resolution and design documents)
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Application identifier is unknown
    #[error("Application not found: {0}")]
    NotFound(String),

    /// Backing storage could not be read
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored record is not valid JSON or has an unexpected shape
    #[error("Invalid application record {id}: {message}")]
    InvalidRecord { id: String, message: String },
}

/// Errors while turning an icon reference into raw image bytes
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The design document has no usable icon reference
    #[error("No icon source")]
    Missing,

    /// Inline payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// Inline payload decoded to zero bytes
    #[error("Empty inline payload")]
    EmptyPayload,

    /// Remote fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors from fetching a remote icon
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Connection, TLS or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote responded with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Fetch did not complete within the configured timeout
    #[error("Timed out after {timeout_ms}ms fetching {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// Response body exceeds the configured limit
    #[error("Response too large: more than {limit} bytes")]
    TooLarge { limit: usize },
}

/// Errors from the raster decode/scale/encode stage
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Bytes are not a decodable raster image
    #[error("Decode error: {message}")]
    DecodeError { message: String },

    /// Decoded image has a zero dimension
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("Encode error: {message}")]
    EncodeError { message: String },

    /// Worker thread panicked or was cancelled
    #[error("Render task failed: {0}")]
    Task(String),
}

/// Request-shape errors. These are the only errors surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Requested size is not in the supported set
    #[error("Unsupported icon size: {0}")]
    UnsupportedSize(String),

    /// Application identifier has invalid syntax
    #[error("Invalid application id: {0:?}")]
    InvalidApplicationId(String),
}

/// Any failure inside the icon pipeline.
///
/// Never surfaced to callers; every variant ends in the placeholder icon.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
