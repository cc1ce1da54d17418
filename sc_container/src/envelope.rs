use std::io::Cursor;

use crate::error::{ScError, ScResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    None,
    Lzma,
    Lzham,
    Zstd,
}

const OUTER_ENVELOPE_PREFIX_LEN: usize = 22; // 2-byte "SC" + 4-byte version + 16-byte metadata hash
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const LZHAM_MAGIC: &[u8] = b"SCLZ";

/// Strips the optional outer Supercell envelope, returning the bytes that
/// start at the compression-specific magic (or at the raw tag stream).
fn strip_outer_envelope(bytes: &[u8]) -> &[u8] {
    if bytes.len() >= OUTER_ENVELOPE_PREFIX_LEN && &bytes[0..2] == b"SC" {
        &bytes[OUTER_ENVELOPE_PREFIX_LEN..]
    } else {
        bytes
    }
}

/// The properties byte `lzma-rs` (and every other encoder using the default
/// `lc=3, lp=0, pb=2`) emits: `(pb * 5 + lp) * 9 + lc == 93`.
const LZMA_PROPS_BYTE: u8 = 0x5D;

fn detect_method(bytes: &[u8]) -> CompressionMethod {
    if bytes.starts_with(&ZSTD_MAGIC) {
        return CompressionMethod::Zstd;
    }
    if bytes.starts_with(LZHAM_MAGIC) {
        return CompressionMethod::Lzham;
    }
    if looks_like_lzma(bytes) {
        return CompressionMethod::Lzma;
    }
    CompressionMethod::None
}

/// A header of small tag-stream counts (an uncompressed payload) must not be
/// mistaken for LZMA. We require the canonical properties byte exactly, plus
/// a size field consistent with the bytes actually present, rather than just
/// "first byte looks small" (every uncompressed `.sc` payload's first byte is
/// a header count and is small too).
fn looks_like_lzma(bytes: &[u8]) -> bool {
    if bytes.len() < 9 || bytes[0] != LZMA_PROPS_BYTE {
        return false;
    }
    let uncompressed_size = u32::from_le_bytes(bytes[5..9].try_into().unwrap()) as usize;
    if uncompressed_size == 0 {
        return false;
    }
    let compressed_len = bytes.len() - 9;
    // LZMA practically never expands a stream past a small multiple of its
    // original size; a declared size wildly out of proportion with what's
    // actually on disk is a sign this isn't really an LZMA header.
    compressed_len <= uncompressed_size.saturating_mul(4) + 64
}

/// Classifies and unwraps a loaded file. Total over its input: an
/// unrecognised stream comes back as `(None, bytes unchanged)` rather than
/// failing, since the reader will surface any real malformation itself.
/// A recognised method whose payload doesn't actually decode raises
/// `CompressionFailure`.
pub fn decompress(bytes: &[u8]) -> ScResult<(CompressionMethod, Vec<u8>)> {
    let stripped = strip_outer_envelope(bytes);
    match detect_method(stripped) {
        CompressionMethod::None => Ok((CompressionMethod::None, stripped.to_vec())),
        method => {
            let plain = decompress_payload(method, stripped)?;
            Ok((method, plain))
        }
    }
}

fn decompress_payload(method: CompressionMethod, bytes: &[u8]) -> ScResult<Vec<u8>> {
    match method {
        CompressionMethod::None => Ok(bytes.to_vec()),
        CompressionMethod::Lzma => decompress_lzma(bytes).map_err(|source| ScError::CompressionFailure {
            method,
            source,
        }),
        CompressionMethod::Zstd => decompress_zstd(bytes).map_err(|source| ScError::CompressionFailure {
            method,
            source,
        }),
        CompressionMethod::Lzham => Err(ScError::CompressionFailure {
            method,
            source: "LZHAM decoding is not supported by this build".into(),
        }),
    }
}

pub fn compress(method: CompressionMethod, bytes: &[u8]) -> ScResult<Vec<u8>> {
    match method {
        CompressionMethod::None => Ok(bytes.to_vec()),
        CompressionMethod::Lzma => compress_lzma(bytes).map_err(|source| ScError::CompressionFailure {
            method,
            source,
        }),
        CompressionMethod::Zstd => compress_zstd(bytes).map_err(|source| ScError::CompressionFailure {
            method,
            source,
        }),
        CompressionMethod::Lzham => Err(ScError::CompressionFailure {
            method,
            source: "LZHAM encoding is not supported by this build".into(),
        }),
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The container's LZMA envelope is a 5-byte properties header followed by a
/// 4-byte little-endian uncompressed size, unlike the 8-byte size field the
/// standard `.lzma` container uses. We let `lzma-rs` produce the standard
/// framing and simply re-pack the size field to our width.
fn compress_lzma(bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
    let mut encoded = Vec::new();
    lzma_rs::lzma_compress(&mut Cursor::new(bytes), &mut encoded)?;

    let mut out = Vec::with_capacity(5 + 4 + (encoded.len() - 13));
    out.extend_from_slice(&encoded[0..5]);
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&encoded[13..]);
    Ok(out)
}

fn decompress_lzma(bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
    if bytes.len() < 9 {
        return Err("lzma envelope shorter than its 9-byte header".into());
    }
    let uncompressed_size = u32::from_le_bytes(bytes[5..9].try_into().unwrap());

    let mut standard = Vec::with_capacity(13 + (bytes.len() - 9));
    standard.extend_from_slice(&bytes[0..5]);
    standard.extend_from_slice(&(uncompressed_size as u64).to_le_bytes());
    standard.extend_from_slice(&bytes[9..]);

    let mut plain = Vec::new();
    lzma_rs::lzma_decompress(&mut Cursor::new(standard), &mut plain)?;
    Ok(plain)
}

fn compress_zstd(bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(zstd::stream::encode_all(Cursor::new(bytes), 0)?)
}

fn decompress_zstd(bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(zstd::stream::decode_all(Cursor::new(bytes))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_stream_is_returned_unchanged() {
        let bytes = vec![0xAA; 32];
        let (method, plain) = decompress(&bytes).unwrap();
        assert_eq!(method, CompressionMethod::None);
        assert_eq!(plain, bytes);
    }

    #[test]
    fn zstd_round_trips() {
        let plain = b"some tag stream bytes".repeat(8);
        let wrapped = compress(CompressionMethod::Zstd, &plain).unwrap();
        assert!(wrapped.starts_with(&ZSTD_MAGIC));
        let (method, round_tripped) = decompress(&wrapped).unwrap();
        assert_eq!(method, CompressionMethod::Zstd);
        assert_eq!(round_tripped, plain);
    }

    #[test]
    fn lzma_round_trips_with_four_byte_size() {
        let plain = b"another tag stream, a bit longer this time".repeat(4);
        let wrapped = compress(CompressionMethod::Lzma, &plain).unwrap();
        let size_field = u32::from_le_bytes(wrapped[5..9].try_into().unwrap());
        assert_eq!(size_field as usize, plain.len());
        let (method, round_tripped) = decompress(&wrapped).unwrap();
        assert_eq!(method, CompressionMethod::Lzma);
        assert_eq!(round_tripped, plain);
    }

    #[test]
    fn uncompressed_tag_stream_is_not_mistaken_for_lzma() {
        // An uncompressed `.sc` payload's first bytes are small header
        // counts, typically starting with 0x00 - well within the old
        // "first byte <= 224" heuristic's false-positive range.
        let mut bytes = vec![0u8; 2];
        bytes.extend_from_slice(&0u16.to_le_bytes()); // movie_clip_count
        bytes.extend_from_slice(&0u16.to_le_bytes()); // texture_count
        bytes.extend_from_slice(&0u16.to_le_bytes()); // text_field_count
        let (method, plain) = decompress(&bytes).unwrap();
        assert_eq!(method, CompressionMethod::None);
        assert_eq!(plain, bytes);
    }

    #[test]
    fn lzham_fails_closed() {
        let mut bytes = LZHAM_MAGIC.to_vec();
        bytes.extend_from_slice(&[0; 16]);
        let err = decompress(&bytes).unwrap_err();
        assert!(matches!(err, ScError::CompressionFailure { method: CompressionMethod::Lzham, .. }));
    }
}
