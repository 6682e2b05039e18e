use crate::utils::error::{BrokerError, Result};

/// Frames the elements of a top-level JSON array out of an incrementally
/// arriving byte stream. Bytes are pushed in as network chunks land;
/// `next_value` hands back one complete element at a time, so a consumer can
/// decode the first element long before the closing bracket has arrived.
///
/// Only element boundaries are understood here; each returned slice is decoded
/// by `serde_json` at the call site.
#[derive(Debug, Default)]
pub struct JsonArrayDecoder {
    buf: Vec<u8>,
    scan: usize,
    element_start: Option<usize>,
    depth: u32,
    in_string: bool,
    escaped: bool,
    opened: bool,
    closed: bool,
}

impl JsonArrayDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Returns the next complete array element, or `None` when more input is
    /// needed (or the array has been fully consumed).
    pub fn next_value(&mut self) -> Result<Option<Vec<u8>>> {
        while self.scan < self.buf.len() {
            let b = self.buf[self.scan];

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == b'"' {
                    self.in_string = false;
                }
                self.scan += 1;
                continue;
            }

            if !self.opened {
                match b {
                    b' ' | b'\t' | b'\r' | b'\n' => {}
                    b'[' => self.opened = true,
                    other => return Err(malformed(format!("expected '[', got '{}'", other as char))),
                }
                self.scan += 1;
                continue;
            }

            if self.closed {
                match b {
                    b' ' | b'\t' | b'\r' | b'\n' => {
                        self.scan += 1;
                        continue;
                    }
                    other => {
                        return Err(malformed(format!(
                            "trailing data after array: '{}'",
                            other as char
                        )))
                    }
                }
            }

            let Some(start) = self.element_start else {
                // Between elements: skip separators until the next one starts.
                match b {
                    b' ' | b'\t' | b'\r' | b'\n' | b',' => {}
                    b']' => self.closed = true,
                    b'"' => {
                        self.element_start = Some(self.scan);
                        self.in_string = true;
                    }
                    b'{' | b'[' => {
                        self.element_start = Some(self.scan);
                        self.depth = 1;
                    }
                    _ => self.element_start = Some(self.scan),
                }
                self.scan += 1;
                continue;
            };

            match b {
                b'"' => self.in_string = true,
                b'{' | b'[' => self.depth += 1,
                b'}' | b']' if self.depth > 0 => self.depth -= 1,
                b']' => {
                    // Closing bracket of the array itself, ending an element.
                    let value = self.take_element(start);
                    self.buf.drain(..1);
                    self.closed = true;
                    return Ok(Some(value));
                }
                b'}' => return Err(malformed("unbalanced '}' in array".to_string())),
                b',' if self.depth == 0 => {
                    let value = self.take_element(start);
                    return Ok(Some(value));
                }
                _ => {}
            }
            self.scan += 1;
        }
        Ok(None)
    }

    /// Checks that the input formed a complete array. Call once the byte
    /// stream is exhausted.
    pub fn finish(&self) -> Result<()> {
        if !self.closed {
            return Err(malformed("input ended before array was closed".to_string()));
        }
        Ok(())
    }

    fn take_element(&mut self, start: usize) -> Vec<u8> {
        let value = self.buf[start..self.scan].to_vec();
        // Drop everything consumed so far; the delimiter at `scan` is
        // re-examined (']' closes the array, ',' is skipped as a separator).
        self.buf.drain(..self.scan);
        self.scan = 0;
        self.element_start = None;
        self.depth = 0;
        value
    }
}

fn malformed(message: String) -> BrokerError {
    BrokerError::MalformedStream { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(decoder: &mut JsonArrayDecoder) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(value) = decoder.next_value().unwrap() {
            out.push(String::from_utf8(value).unwrap());
        }
        out
    }

    #[test]
    fn frames_objects_in_one_chunk() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(br#"[{"id":1,"name":"Rex"},{"id":2,"name":"Ada"}]"#);

        let values = drain(&mut decoder);
        assert_eq!(
            values,
            vec![r#"{"id":1,"name":"Rex"}"#, r#"{"id":2,"name":"Ada"}"#]
        );
        decoder.finish().unwrap();
    }

    #[test]
    fn first_element_is_available_before_the_array_closes() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(br#"[{"id":1,"name":"Rex"},{"id":2,"na"#);

        assert_eq!(
            drain(&mut decoder),
            vec![r#"{"id":1,"name":"Rex"}"#.to_string()]
        );
        assert!(decoder.finish().is_err());

        decoder.push(br#"me":"Ada"}]"#);
        assert_eq!(
            drain(&mut decoder),
            vec![r#"{"id":2,"name":"Ada"}"#.to_string()]
        );
        decoder.finish().unwrap();
    }

    #[test]
    fn survives_chunk_split_inside_a_string_escape() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(br#"[{"name":"a\"#);
        assert!(decoder.next_value().unwrap().is_none());
        decoder.push(br#""b,]"}]"#);

        let values = drain(&mut decoder);
        assert_eq!(values, vec![r#"{"name":"a\"b,]"}"#]);
        decoder.finish().unwrap();
    }

    #[test]
    fn nested_arrays_and_objects_do_not_split_elements() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(br#"[{"tags":["a","b"],"meta":{"k":[1,2]}}]"#);

        let values = drain(&mut decoder);
        assert_eq!(values, vec![r#"{"tags":["a","b"],"meta":{"k":[1,2]}}"#]);
        decoder.finish().unwrap();
    }

    #[test]
    fn handles_whitespace_and_scalars() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(b" [ 1 , 2,3 ] ");

        let values = drain(&mut decoder);
        assert_eq!(values, vec!["1 ", "2", "3 "]);
        decoder.finish().unwrap();

        let parsed: u64 = serde_json::from_slice(values[0].as_bytes()).unwrap();
        assert_eq!(parsed, 1);
    }

    #[test]
    fn empty_array_yields_nothing() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(b"[]");
        assert!(decoder.next_value().unwrap().is_none());
        decoder.finish().unwrap();
    }

    #[test]
    fn rejects_non_array_input() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(br#"{"id":1}"#);
        assert!(decoder.next_value().is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut decoder = JsonArrayDecoder::new();
        decoder.push(b"[1]x");
        assert_eq!(decoder.next_value().unwrap().unwrap(), b"1");
        assert!(decoder.next_value().is_err());
    }
}
