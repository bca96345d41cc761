//! Inbound line framing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Splits the uplink byte stream into lines.
///
/// Lines are decoded lossily, so Latin-1 nicks and gecos arrive with
/// replacement characters. `next_line` is cancel safe; a partial line
/// survives into the next call.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(512),
        }
    }

    /// Next line without its CR LF, or `None` at end of stream.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let read = self.inner.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }

        let mut raw = std::mem::take(&mut self.buf);
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }

        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
                debug!(line = %line, "Replaced invalid UTF-8 in inbound line");
                line
            }
        };
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn strips_terminators() {
        let mut reader = LineReader::new(&b"PING :hub\r\nPONG hub\n"[..]);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("PING :hub"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("PONG hub"));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_utf8_does_not_end_the_stream() {
        let input: &[u8] = b":hub NICK bob 1 b h 1 + :Ren\xe9\r\n:hub PONG hub\r\n";
        let mut reader = LineReader::new(input);

        let first = reader.next_line().await.unwrap().unwrap();
        assert_eq!(first, ":hub NICK bob 1 b h 1 + :Ren\u{FFFD}");
        assert_eq!(
            reader.next_line().await.unwrap().as_deref(),
            Some(":hub PONG hub")
        );
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unterminated_last_line_is_returned() {
        let mut reader = LineReader::new(&b"ERROR :closing"[..]);
        assert_eq!(
            reader.next_line().await.unwrap().as_deref(),
            Some("ERROR :closing")
        );
        assert_eq!(reader.next_line().await.unwrap(), None);
    }
}
