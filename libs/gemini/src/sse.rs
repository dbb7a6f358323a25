/// Incremental splitter for `text/event-stream` bodies.
///
/// Network reads can cut a frame anywhere; `push` buffers input and
/// returns the `data:` payloads of every frame completed so far, in
/// arrival order.
#[derive(Debug, Default)]
pub struct SseBuffer {
    buffer: String,
}

impl SseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        let mut payloads = Vec::new();
        while let Some(end) = self.buffer.find("\n\n") {
            let frame: String = self.buffer.drain(..end + 2).collect();
            for line in frame.lines() {
                let line = line.trim_end_matches('\r');
                if let Some(data) = line.strip_prefix("data: ") {
                    payloads.push(data.to_string());
                }
            }
        }
        payloads
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_complete_frames() {
        let mut buffer = SseBuffer::new();

        let payloads =
            buffer.push(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\n");

        assert_eq!(payloads, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn holds_partial_frames_until_complete() {
        let mut buffer = SseBuffer::new();

        assert!(buffer.push(b"data: {\"text\":\"hel").is_empty());
        assert!(buffer.push(b"lo\"}\n").is_empty());
        let payloads = buffer.push(b"\ndata: {\"text\":\"!\"}\n\n");

        assert_eq!(payloads, vec!["{\"text\":\"hello\"}", "{\"text\":\"!\"}"]);
    }

    #[test]
    fn ignores_non_data_lines() {
        let mut buffer = SseBuffer::new();

        let payloads = buffer.push(b": keep-alive\nevent: x\ndata: 1\n\n");

        assert_eq!(payloads, vec!["1"]);
    }
}
