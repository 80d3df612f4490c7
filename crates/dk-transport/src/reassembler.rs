use crate::error::TransportError;
use crate::frame::decode_body;
use crate::frame::is_extended;
use byteorder::ReadBytesExt;
use byteorder::BE;
use std::io::Cursor;

/// What the reassembler is waiting to see enough bytes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No partial header buffered yet.
    NeedHeader,
    /// Header seen, header declared an extended length, waiting on the
    /// 32-bit length field.
    NeedExtendedLength { header: u16 },
    /// Header (and extended length, if any) fully known; waiting on
    /// `remaining` more body bytes.
    NeedBody { header: u16, remaining: u32 },
}

/// Incrementally reassembles length-prefixed frames out of an arbitrarily
/// chunked byte stream, decompressing each completed frame's body. Caller
/// feeds raw bytes as they arrive off a socket; completed, decompressed
/// payloads are returned from `push`.
pub struct FrameReassembler {
    state: State,
    buffer: Vec<u8>,
    frame_limit: u32,
    bytes_received: u64,
}

impl FrameReassembler {
    pub fn new(frame_limit: u32) -> Self {
        Self {
            state: State::NeedHeader,
            buffer: Vec::new(),
            frame_limit,
            bytes_received: 0,
        }
    }

    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Feed newly-arrived bytes and drain as many complete frames as are
    /// now available. Returns one decompressed payload per completed
    /// frame, in arrival order.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Vec<u8>>, TransportError> {
        self.buffer.extend_from_slice(chunk);
        self.bytes_received += chunk.len() as u64;
        let mut out = Vec::new();
        loop {
            match self.state {
                State::NeedHeader => {
                    if self.buffer.len() < 2 {
                        break;
                    }
                    let header = read_u16(&self.buffer[..2]);
                    self.drain_front(2);
                    self.state = if is_extended(header) {
                        State::NeedExtendedLength { header }
                    } else {
                        let remaining = crate::frame::brief_length(header) as u32;
                        State::NeedBody { header, remaining }
                    };
                }
                State::NeedExtendedLength { header } => {
                    if self.buffer.len() < 4 {
                        break;
                    }
                    let mut cursor = Cursor::new(&self.buffer[..4]);
                    let len = cursor.read_u32::<BE>().expect("4 bytes buffered");
                    self.drain_front(4);
                    if len > self.frame_limit {
                        return Err(TransportError::FrameTooLarge {
                            declared: len,
                            limit: self.frame_limit,
                        });
                    }
                    self.state = State::NeedBody { header, remaining: len };
                }
                State::NeedBody { header, remaining } => {
                    let remaining = remaining as usize;
                    if self.buffer.len() < remaining {
                        break;
                    }
                    let body: Vec<u8> = self.buffer.drain(..remaining).collect();
                    let payload = decode_body(header, &body)?;
                    out.push(payload);
                    self.state = State::NeedHeader;
                }
            }
        }
        Ok(out)
    }

    fn drain_front(&mut self, n: usize) {
        self.buffer.drain(..n);
    }
}

fn read_u16(bytes: &[u8]) -> u16 {
    let mut cursor = Cursor::new(bytes);
    cursor.read_u16::<BE>().expect("2 bytes buffered")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::encode_frame;
    use crate::frame::CompressionMode;
    use crate::frame::HeaderMode;

    #[test]
    fn reassembles_a_single_frame_delivered_whole() {
        let frame = encode_frame(b"hello", CompressionMode::Uncompressed, HeaderMode::Auto).unwrap();
        let mut reassembler = FrameReassembler::new(1 << 20);
        let out = reassembler.push(&frame).unwrap();
        assert_eq!(out, vec![b"hello".to_vec()]);
    }

    #[test]
    fn reassembles_a_frame_split_across_many_chunks() {
        let frame = encode_frame(b"a somewhat longer payload here", CompressionMode::Uncompressed, HeaderMode::Auto).unwrap();
        let mut reassembler = FrameReassembler::new(1 << 20);
        let mut out = Vec::new();
        for byte in frame.iter() {
            out.extend(reassembler.push(std::slice::from_ref(byte)).unwrap());
        }
        assert_eq!(out, vec![b"a somewhat longer payload here".to_vec()]);
    }

    #[test]
    fn reassembles_back_to_back_frames_in_one_chunk() {
        let a = encode_frame(b"first", CompressionMode::Uncompressed, HeaderMode::Auto).unwrap();
        let b = encode_frame(b"second", CompressionMode::Uncompressed, HeaderMode::Auto).unwrap();
        let mut combined = a;
        combined.extend(b);
        let mut reassembler = FrameReassembler::new(1 << 20);
        let out = reassembler.push(&combined).unwrap();
        assert_eq!(out, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn reassembles_a_compressed_frame() {
        let payload = b"repeat repeat repeat repeat repeat repeat".to_vec();
        let frame = encode_frame(&payload, CompressionMode::Compressed, HeaderMode::Auto).unwrap();
        let mut reassembler = FrameReassembler::new(1 << 20);
        let out = reassembler.push(&frame).unwrap();
        assert_eq!(out, vec![payload]);
    }

    #[test]
    fn rejects_a_declared_length_above_the_frame_limit() {
        let frame = encode_frame(&vec![0u8; 20_000], CompressionMode::Uncompressed, HeaderMode::Extended).unwrap();
        let mut reassembler = FrameReassembler::new(1_000);
        assert!(matches!(reassembler.push(&frame), Err(TransportError::FrameTooLarge { .. })));
    }
}
