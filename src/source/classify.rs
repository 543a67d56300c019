//! Icon reference classification and inline decoding.
//!
//! An icon reference is an arbitrary user-supplied string. Three shapes are
//! recognised:
//!
//! - `data:[<mime>][;base64],<payload>` - an inline image
//! - `http://...` / `https://...` - a remote image
//! - anything else - no usable source

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use bytes::Bytes;
use url::Url;

use crate::error::SourceError;

/// Prefix identifying an inline data URL.
pub const DATA_URL_PREFIX: &str = "data:";

/// Marker in the data URL meta segment for base64 payloads.
pub const BASE64_MARKER: &str = ";base64";

/// Standard alphabet; trailing `=` padding is optional.
const INLINE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// =============================================================================
// IconSource
// =============================================================================

/// Where an application's icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// No usable reference
    None,

    /// Image embedded in the reference itself
    Inline {
        /// Media type from the meta segment, e.g. `image/png`
        mime_hint: Option<String>,
        /// Whether the payload is base64-encoded
        is_base64: bool,
        /// Everything after the first comma
        payload: String,
    },

    /// Image behind an http(s) URL
    Remote { url: Url },
}

impl IconSource {
    /// Classify a raw icon reference.
    ///
    /// Never fails: blank strings, data URLs without a comma, unparseable
    /// URLs and non-http schemes all classify as [`IconSource::None`].
    pub fn classify(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return IconSource::None,
        };

        if let Some(rest) = raw.strip_prefix(DATA_URL_PREFIX) {
            return Self::classify_data_url(rest);
        }

        match Url::parse(raw) {
            Ok(url)
                if url.scheme().eq_ignore_ascii_case("http")
                    || url.scheme().eq_ignore_ascii_case("https") =>
            {
                IconSource::Remote { url }
            }
            _ => IconSource::None,
        }
    }

    /// Parse the part of a data URL after `data:`.
    fn classify_data_url(rest: &str) -> Self {
        let Some((meta, payload)) = rest.split_once(',') else {
            return IconSource::None;
        };

        let mime_hint = meta
            .split(';')
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned);

        IconSource::Inline {
            mime_hint,
            is_base64: meta.contains(BASE64_MARKER),
            payload: payload.to_owned(),
        }
    }

    /// Returns true if there is something to render.
    pub fn is_usable(&self) -> bool {
        !matches!(self, IconSource::None)
    }

    /// Short label used in logs and the `X-Icon-Source` header.
    pub fn kind(&self) -> &'static str {
        match self {
            IconSource::None => "none",
            IconSource::Inline { .. } => "inline",
            IconSource::Remote { .. } => "remote",
        }
    }

    /// Decode an inline source into raw image bytes.
    ///
    /// Base64 payloads are decoded with the standard alphabet, padded or not. Other payloads
    /// are passed through as their literal UTF-8 bytes.
    pub fn decode_inline(&self) -> Result<RawImageBytes, SourceError> {
        let IconSource::Inline {
            is_base64, payload, ..
        } = self
        else {
            return Err(SourceError::Missing);
        };

        let data = if *is_base64 {
            INLINE_BASE64
                .decode(payload.trim())
                .map_err(|e| SourceError::InvalidBase64(e.to_string()))?
        } else {
            payload.as_bytes().to_vec()
        };

        if data.is_empty() {
            return Err(SourceError::EmptyPayload);
        }

        Ok(RawImageBytes::new(data))
    }
}

// =============================================================================
// RawImageBytes
// =============================================================================

/// Bytes that claim to be an encoded raster image.
///
/// Nothing has been checked yet; the scaler finds out whether the claim holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImageBytes(Bytes);

impl RawImageBytes {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for RawImageBytes {
    fn from(data: Bytes) -> Self {
        Self(data)
    }
}

// =============================================================================
// Tests
// =============================================================================
