//! Payload codecs for handler inputs and outputs.
//!
//! A codec pairs the byte-level encoding with the media type advertised in
//! the manifest. Codecs are chosen at bind time, per handler, mirroring
//! the runtime's per-handler `accept` / `content_type` configuration.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Media type used when no codec override is given.
pub const APPLICATION_JSON: &str = "application/json";
/// Media type advertised by [`RawCodec`].
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Encodes and decodes one payload type.
///
/// Type-parameterized rather than generic-per-method so that codecs like
/// [`RawCodec`] can exist for a single payload type.
pub trait PayloadCodec<T>: Send + Sync {
    /// Media type of the encoded payload.
    fn content_type(&self) -> &str;

    /// Encodes a value to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when the value cannot be represented.
    fn encode(&self, value: &T) -> Result<Vec<u8>>;

    /// Decodes a value from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the bytes are not a valid payload.
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}

/// Default JSON codec, available for any serde-capable type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Creates a new JSON codec.
    pub fn new() -> Self {
        Self
    }
}

impl<T> PayloadCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn content_type(&self) -> &str {
        APPLICATION_JSON
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| Error::encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::decode(e.to_string()))
    }
}

/// Pass-through codec for raw byte payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl RawCodec {
    /// Creates a new raw codec.
    pub fn new() -> Self {
        Self
    }
}

impl PayloadCodec<Vec<u8>> for RawCodec {
    fn content_type(&self) -> &str {
        APPLICATION_OCTET_STREAM
    }

    fn encode(&self, value: &Vec<u8>) -> Result<Vec<u8>> {
        Ok(value.clone())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

/// Media types and codecs applied when binding one handler.
///
/// The defaults mirror the runtime's: JSON in, JSON out,
/// `application/json` for both the accepted and produced media type.
#[derive(Debug, Clone)]
pub struct HandlerBinding<InC, OutC> {
    /// Media type the handler accepts.
    pub accept: String,
    /// Media type the handler produces.
    pub content_type: String,
    /// Codec for the input payload.
    pub input_codec: InC,
    /// Codec for the output payload.
    pub output_codec: OutC,
}

impl HandlerBinding<JsonCodec, JsonCodec> {
    /// JSON-in, JSON-out binding with `application/json` media types.
    pub fn json() -> Self {
        Self {
            accept: APPLICATION_JSON.to_string(),
            content_type: APPLICATION_JSON.to_string(),
            input_codec: JsonCodec,
            output_codec: JsonCodec,
        }
    }
}

impl Default for HandlerBinding<JsonCodec, JsonCodec> {
    fn default() -> Self {
        Self::json()
    }
}

impl<InC, OutC> HandlerBinding<InC, OutC> {
    /// Creates a binding from explicit codecs, taking the media types from
    /// the codecs themselves.
    pub fn with_codecs<I, O>(input_codec: InC, output_codec: OutC) -> Self
    where
        InC: PayloadCodec<I>,
        OutC: PayloadCodec<O>,
    {
        let accept = input_codec.content_type().to_string();
        let content_type = output_codec.content_type().to_string();
        Self {
            accept,
            content_type,
            input_codec,
            output_codec,
        }
    }

    /// Overrides the accepted media type.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Overrides the produced media type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}
