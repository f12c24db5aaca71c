use crate::document::{Compression, Encoding};
use crate::error::DecodeError;
use base64::Engine;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// Decodes one layer payload into tile ids, in row-major order.
///
/// `Encoding::Xml` payloads carry no text to decode and yield an empty vector;
/// their ids are collected from `<tile>` elements at parse time.
pub fn decode_layer_data(
    encoding: Encoding,
    compression: Compression,
    raw: &[u8],
) -> Result<Vec<u32>, DecodeError> {
    match encoding {
        Encoding::Csv => decode_csv(raw),
        Encoding::Base64 => decode_base64(compression, raw),
        Encoding::Xml => Ok(Vec::new()),
    }
}

fn decode_csv(raw: &[u8]) -> Result<Vec<u32>, DecodeError> {
    let text = String::from_utf8_lossy(raw);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<u32>().map_err(|_| DecodeError::MalformedNumber {
                token: token.to_owned(),
            })
        })
        .collect()
}

fn decode_base64(compression: Compression, raw: &[u8]) -> Result<Vec<u32>, DecodeError> {
    // Line breaks inside the payload are allowed; any other stray byte is an error.
    let text: Vec<u8> = raw
        .trim_ascii()
        .iter()
        .copied()
        .filter(|b| !matches!(*b, b'\r' | b'\n'))
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(text)?;

    let stream = match compression {
        Compression::None => bytes,
        Compression::Zlib => {
            log::debug!("inflating zlib layer payload ({} bytes)", bytes.len());
            inflate(ZlibDecoder::new(bytes.as_slice()))?
        }
        Compression::Gzip => {
            log::debug!("inflating gzip layer payload ({} bytes)", bytes.len());
            inflate(GzDecoder::new(bytes.as_slice()))?
        }
    };

    Ok(unpack_le_u32(&stream))
}

fn inflate(mut reader: impl Read) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompression)?;
    Ok(out)
}

/// Splits a byte stream into little-endian `u32`s. A trailing partial chunk is dropped.
pub fn unpack_le_u32(stream: &[u8]) -> Vec<u32> {
    let chunks = stream.chunks_exact(4);
    let rest = chunks.remainder().len();
    if rest != 0 {
        log::warn!("dropping {rest} trailing byte(s) of layer data");
    }
    chunks
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
