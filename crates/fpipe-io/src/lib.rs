//! fpipe-io — text-line sources for fpipe pipelines.
//!
//! Every source yields one `String` per line with the terminator (`\n` or
//! `\r\n`) removed, suspends while waiting for input, and ends when the
//! underlying reader reports EOF. Read failures surface in-band as
//! [`FpError::Io`] items so the pipeline's terminal sees them.
//!
//! - [`stdin_lines`]: process standard input.
//! - [`file_lines`]: a named file (opening errors carry the path).
//! - [`reader_lines`]: any buffered async reader, e.g. an in-memory buffer.
//! - [`open_lines`]: `-` for stdin, anything else a path.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context as _, Result};
use fpipe_core::{BoxSeq, FpError, SeqExt};
use futures_core::{ready, FusedStream, Stream};
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

/// Owning line sequence over an async buffered reader.
///
/// Tracks the 1-based number of the last line read so I/O errors can say
/// where they happened.
pub struct LineStream<R> {
    lines: Lines<R>,
    label: String,
    line_no: usize,
    eof: bool,
}

impl<R> LineStream<R> {
    fn new(lines: Lines<R>, label: impl Into<String>) -> Self {
        Self {
            lines,
            label: label.into(),
            line_no: 0,
            eof: false,
        }
    }

    /// Number of lines yielded so far.
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: AsyncBufRead + Unpin> Stream for LineStream<R> {
    type Item = fpipe_core::Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.eof {
            return Poll::Ready(None);
        }
        match ready!(Pin::new(&mut this.lines).poll_next_line(cx)) {
            Ok(Some(line)) => {
                this.line_no += 1;
                Poll::Ready(Some(Ok(line)))
            }
            Ok(None) => {
                this.eof = true;
                debug!(source = %this.label, lines = this.line_no, "line source exhausted");
                Poll::Ready(None)
            }
            Err(e) => {
                let at = this.line_no + 1;
                let e = io::Error::new(e.kind(), format!("{} line {at}: {e}", this.label));
                Poll::Ready(Some(Err(FpError::Io(e))))
            }
        }
    }
}

impl<R: AsyncBufRead + Unpin> FusedStream for LineStream<R> {
    fn is_terminated(&self) -> bool {
        self.eof
    }
}

/// Lines of process standard input.
pub fn stdin_lines() -> LineStream<BufReader<Stdin>> {
    LineStream::new(BufReader::new(tokio::io::stdin()).lines(), "<stdin>")
}

/// Lines of any buffered async reader.
pub fn reader_lines<R: AsyncBufRead + Unpin>(reader: R) -> LineStream<R> {
    LineStream::new(reader.lines(), "<reader>")
}

/// Lines of the file at `path`.
///
/// # Errors
/// If the file cannot be opened; the error names the path.
pub async fn file_lines<P: AsRef<Path>>(path: P) -> Result<LineStream<BufReader<File>>> {
    let path = path.as_ref();
    let f = File::open(path)
        .await
        .with_context(|| format!("open {}", path.display()))?;
    Ok(LineStream::new(
        BufReader::new(f).lines(),
        path.display().to_string(),
    ))
}

/// `-` selects stdin; anything else is opened as a file.
///
/// # Errors
/// Same as [`file_lines`].
pub async fn open_lines(spec: &str) -> Result<BoxSeq<'static, String>> {
    if spec == "-" {
        return Ok(stdin_lines().boxed());
    }
    Ok(file_lines(spec).await?.boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(tag: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("fpipe_io_{tag}_{}.txt", std::process::id()));
        p
    }

    #[tokio::test]
    async fn strips_both_terminator_styles() {
        let input: &[u8] = b"L68\r\nR43\n\nL23";
        let mut src = reader_lines(input);
        let got = (&mut src).collect_vec().await.unwrap();
        assert_eq!(got, vec!["L68", "R43", "", "L23"]);
        assert_eq!(src.lines_read(), 4);
        assert!(src.is_terminated());
        assert_eq!(src.take_first().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_reader_is_empty_sequence() {
        let input: &[u8] = b"";
        assert_eq!(reader_lines(input).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn file_lines_streams_a_file() {
        let p = tmp_path("stream");
        tokio::fs::write(&p, "1\n2\n3\n").await.unwrap();
        let total = file_lines(&p)
            .await
            .unwrap()
            .map(|l| l.parse::<u32>().unwrap_or(0))
            .sum()
            .await
            .unwrap();
        assert_eq!(total, 6);
        let via_spec = open_lines(p.to_str().unwrap()).await.unwrap();
        assert_eq!(via_spec.count().await.unwrap(), 3);
        let _ = tokio::fs::remove_file(&p).await;
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let p = tmp_path("missing");
        let err = match file_lines(&p).await {
            Ok(_) => panic!("opened a file that does not exist"),
            Err(e) => e,
        };
        assert!(err.to_string().starts_with("open "), "{err}");
        assert!(err.to_string().contains("fpipe_io_missing"));
    }
}
