use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning one layer's `<data>` payload into tile ids.
///
/// Carries no layer context; [`MapError::Layer`] adds the layer name.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A CSV token is not a base-10 unsigned integer
    #[error("'{token}' is not a number")]
    MalformedNumber {
        /// The offending token, trimmed
        token: String,
    },
    /// The base64 payload is invalid
    #[error("invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The zlib/gzip stream could not be opened or read
    #[error("decompression failed: {0}")]
    Decompression(#[source] io::Error),
}

/// Error type for loading and transforming TMX maps
#[derive(Debug, Error)]
pub enum MapError {
    /// A resource could not be opened or read
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Resource path as given to the source
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
    /// The document is not valid UTF-8
    #[error("document is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Malformed XML markup
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The document root is not the element we expected
    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        /// Element the parser accepts
        expected: &'static str,
        /// Element the document has
        found: String,
    },
    /// A required attribute is absent
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
    },
    /// An attribute value could not be bound to its field type
    #[error("<{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute text
        value: String,
    },
    /// Layer data uses an encoding other than csv, base64 or plain XML
    #[error("layer '{layer}': unsupported encoding '{value}'")]
    UnsupportedEncoding {
        /// Layer name
        layer: String,
        /// Tag as written in the document
        value: String,
    },
    /// Layer data uses a compression other than zlib or gzip
    #[error("layer '{layer}': unsupported compression '{value}'")]
    UnsupportedCompression {
        /// Layer name
        layer: String,
        /// Tag as written in the document
        value: String,
    },
    /// A layer payload failed to decode
    #[error("layer '{layer}': {source}")]
    Layer {
        /// Layer name
        layer: String,
        /// Decoder failure
        #[source]
        source: DecodeError,
    },
    /// Infinite (chunked) maps are not supported
    #[error("infinite maps are not supported")]
    InfiniteMap,
}
