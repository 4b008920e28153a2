//! Just enough DRPC framing to send one unary call nobody serves.
//!
//! A DRPC frame is a header byte (`kind << 1 | done`, high bit for control
//! frames) followed by uvarint stream ID, uvarint message ID, uvarint payload
//! length and the payload.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// RPC name for the probe call. Peers answer with an "unknown rpc" error.
pub const NOOP_RPC: &str = "/idconv.Probe/Noop";

const STREAM_ID: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameKind {
    Invoke = 1,
    Message = 2,
    CloseSend = 6,
}

pub fn append_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

pub fn append_frame(buf: &mut Vec<u8>, kind: FrameKind, message_id: u64, data: &[u8], done: bool) {
    buf.push(((kind as u8) << 1) | u8::from(done));
    append_uvarint(buf, STREAM_ID);
    append_uvarint(buf, message_id);
    append_uvarint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

/// Bytes of a complete unary invocation: invoke, a one-byte message, close-send.
pub fn noop_invocation() -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    append_frame(&mut buf, FrameKind::Invoke, 1, NOOP_RPC.as_bytes(), true);
    append_frame(&mut buf, FrameKind::Message, 2, &[1], true);
    append_frame(&mut buf, FrameKind::CloseSend, 3, &[], true);
    buf
}

/// Writes the probe call. The reply, if any, is never read.
pub async fn invoke_noop<S: AsyncWrite + Unpin>(stream: &mut S) -> io::Result<()> {
    stream.write_all(&noop_invocation()).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uvarint_matches_protobuf_encoding() {
        let mut buf = Vec::new();
        append_uvarint(&mut buf, 1);
        append_uvarint(&mut buf, 300);
        assert_eq!(buf, [0x01, 0xac, 0x02]);
    }

    #[test]
    fn frame_header_carries_kind_and_done() {
        let mut buf = Vec::new();
        append_frame(&mut buf, FrameKind::Message, 2, &[1], true);
        assert_eq!(buf, [0x05, 0x01, 0x02, 0x01, 0x01]);
    }

    #[test]
    fn invocation_ends_with_close_send() {
        let bytes = noop_invocation();
        assert_eq!(bytes[0], 0x03);
        assert_eq!(&bytes[4..4 + NOOP_RPC.len()], NOOP_RPC.as_bytes());
        assert_eq!(&bytes[bytes.len() - 4..], [0x0d, 0x01, 0x03, 0x00]);
    }

    #[tokio::test]
    async fn invoke_writes_whole_invocation() {
        let mut sink = Vec::new();
        invoke_noop(&mut sink).await.expect("write");
        assert_eq!(sink, noop_invocation());
    }
}
