use crate::compress::compress;
use crate::compress::decompress;
use crate::error::TransportError;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::BE;
use dk_core::MAX_BRIEF_PAYLOAD;
use std::io::Cursor;

const COMPRESSED_FLAG: u16 = 0x8000;
const EXTENDED_FLAG: u16 = 0x4000;
const BRIEF_LENGTH_MASK: u16 = 0x3FFF;

/// Compression behavior when framing an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    /// Compress and keep whichever of the compressed/uncompressed forms is
    /// smaller.
    #[default]
    Auto,
    /// Always compress, even if the result is larger.
    Compressed,
    /// Never compress.
    Uncompressed,
}

/// Header length behavior when framing an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Use a brief 14-bit length unless the payload exceeds
    /// `MAX_BRIEF_PAYLOAD`, in which case fall back to an extended header.
    #[default]
    Auto,
    /// Always use the 14-bit brief length; reject payloads that don't fit.
    Brief,
    /// Always emit the 32-bit extended length field.
    Extended,
}

/// Encode one message into a complete wire frame: header, optional extended
/// length, and body.
pub fn encode_frame(payload: &[u8], compression: CompressionMode, header_mode: HeaderMode) -> Result<Vec<u8>, TransportError> {
    let mut header: u16 = 0;

    let body: Vec<u8> = match compression {
        CompressionMode::Uncompressed => payload.to_vec(),
        CompressionMode::Compressed => {
            header |= COMPRESSED_FLAG;
            compress(payload)
        }
        CompressionMode::Auto => {
            let compressed = compress(payload);
            if compressed.len() < payload.len() {
                header |= COMPRESSED_FLAG;
                compressed
            } else {
                payload.to_vec()
            }
        }
    };

    let size = body.len();

    if header_mode == HeaderMode::Brief && size > MAX_BRIEF_PAYLOAD {
        return Err(TransportError::PayloadTooLarge { size });
    }

    let extended = header_mode == HeaderMode::Extended
        || (header_mode == HeaderMode::Auto && size > MAX_BRIEF_PAYLOAD);

    if extended {
        header |= EXTENDED_FLAG;
    } else {
        header |= size as u16 & BRIEF_LENGTH_MASK;
    }

    let mut out = Vec::with_capacity(2 + if extended { 4 } else { 0 } + size);
    out.write_u16::<BE>(header).expect("write to Vec cannot fail");
    if extended {
        out.write_u32::<BE>(size as u32).expect("write to Vec cannot fail");
    }
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode a single already-delimited frame body (the bytes after the
/// header and optional extended length have been stripped), honoring the
/// header's compression flag.
pub(crate) fn decode_body(header: u16, body: &[u8]) -> Result<Vec<u8>, TransportError> {
    if header & COMPRESSED_FLAG != 0 {
        decompress(body)
    } else {
        Ok(body.to_vec())
    }
}

pub(crate) fn is_compressed(header: u16) -> bool {
    header & COMPRESSED_FLAG != 0
}

pub(crate) fn is_extended(header: u16) -> bool {
    header & EXTENDED_FLAG != 0
}

pub(crate) fn brief_length(header: u16) -> u16 {
    header & BRIEF_LENGTH_MASK
}

pub(crate) fn read_header(cursor: &mut Cursor<&[u8]>) -> std::io::Result<u16> {
    cursor.read_u16::<BE>()
}

pub(crate) fn read_extended_length(cursor: &mut Cursor<&[u8]>) -> std::io::Result<u32> {
    cursor.read_u32::<BE>()
}
