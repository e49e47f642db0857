//! Stdio message framing: one JSON document per line, or a
//! `Content-Length` header block followed by exactly that many body bytes.

use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

use crate::protocol::JsonRpcResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    LineDelimited,
    ContentLength,
}

impl Frame {
    pub fn starts_header(line: &str) -> bool {
        let lower = line.to_ascii_lowercase();
        lower.starts_with("content-length:") || lower.starts_with("content-type:")
    }

    /// Writes `response` back in the same framing the request used.
    pub fn write<W: Write>(self, writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
        match self {
            Self::LineDelimited => {
                let serialized = serde_json::to_string(response)?;
                writeln!(writer, "{serialized}")?;
            }
            Self::ContentLength => {
                let serialized = serde_json::to_vec(response)?;
                write!(writer, "Content-Length: {}\r\n\r\n", serialized.len())?;
                writer.write_all(&serialized)?;
            }
        }
        writer.flush()
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid stdio frame: {0}")]
    Header(io::Error),

    #[error("stdio frame of {length} bytes exceeds the {limit} byte limit")]
    TooLarge { length: usize, limit: usize },

    #[error("invalid stdio frame body: {0}")]
    Body(io::Error),
}

impl FrameError {
    /// Framing to answer with; header failures leave no reliable length to honour.
    pub fn reply_frame(&self) -> Frame {
        match self {
            Self::Header(_) => Frame::LineDelimited,
            Self::TooLarge { .. } | Self::Body(_) => Frame::ContentLength,
        }
    }
}

/// Reads the rest of a header block starting at `first_line`, then its body.
///
/// Bodies longer than `limit` are drained without being buffered.
pub fn read_framed_body<R: BufRead>(
    reader: &mut R,
    first_line: &str,
    limit: usize,
) -> Result<Vec<u8>, FrameError> {
    let length = read_content_length(reader, first_line).map_err(FrameError::Header)?;
    if length > limit {
        let skip = u64::try_from(length).unwrap_or(u64::MAX);
        io::copy(&mut reader.by_ref().take(skip), &mut io::sink()).map_err(FrameError::Body)?;
        return Err(FrameError::TooLarge { length, limit });
    }

    let mut body = vec![0_u8; length];
    reader.read_exact(&mut body).map_err(FrameError::Body)?;
    Ok(body)
}

/// Reads one line of at most `limit` bytes into `line`.
///
/// Returns `Ok(None)` at EOF and `Ok(Some(false))` when the line was longer
/// than `limit`; the remainder of that line is consumed and dropped.
pub fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    line: &mut String,
    limit: usize,
) -> io::Result<Option<bool>> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(2);
    if reader.by_ref().take(cap).read_line(line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') || line.len() <= limit {
        return Ok(Some(true));
    }
    discard_line(reader)?;
    Ok(Some(false))
}

fn discard_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(pos) = buf.iter().position(|b| *b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = buf.len();
        reader.consume(len);
    }
}

fn read_content_length<R: BufRead>(reader: &mut R, first_line: &str) -> io::Result<usize> {
    let mut length = header_content_length(first_line);
    let mut header = String::new();
    loop {
        header.clear();
        if reader.read_line(&mut header)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected eof while reading frame headers",
            ));
        }
        let trimmed = header.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(v) = header_content_length(trimmed) {
            length = Some(v);
        }
    }
    length.ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "missing content-length header")
    })
}

fn header_content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}
