use std::io::{BufRead, ErrorKind};

/// Splits a stream into lines terminated by `\n`, `\r\n` or a lone `\r`.
///
/// Terminators are never part of a line, so no line can contain a `\r`. A `\n`
/// following a `\r` is skipped lazily on the next read, which keeps interactive
/// input from blocking on a lookahead.
pub(crate) struct Lines<R> {
    reader: R,
    skip_lf: bool,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Lines {
            reader,
            skip_lf: false,
        }
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut read_any = false;

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if buf.is_empty() {
                return if read_any {
                    finish(line).map(Some)
                } else {
                    Ok(None)
                };
            }

            let start = if std::mem::take(&mut self.skip_lf) && buf[0] == b'\n' {
                1
            } else {
                0
            };
            let rest = &buf[start..];

            match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(idx) => {
                    line.extend_from_slice(&rest[..idx]);
                    self.skip_lf = rest[idx] == b'\r';
                    self.reader.consume(start + idx + 1);
                    return finish(line).map(Some);
                }
                None => {
                    read_any |= !rest.is_empty();
                    line.extend_from_slice(rest);
                    let used = buf.len();
                    self.reader.consume(used);
                }
            }
        }
    }
}

fn finish(line: Vec<u8>) -> std::io::Result<String> {
    String::from_utf8(line).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<String> {
        Lines::new(input.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_terminators() {
        assert_eq!(split("A\nB\r\nC\rD"), vec!["A", "B", "C", "D"]);
        assert_eq!(split("A\nB\r"), vec!["A", "B"]);
        assert_eq!(split("A\r\r\nB"), vec!["A", "", "B"]);
    }

    #[test]
    fn test_blank_lines_and_end_of_stream() {
        assert!(split("").is_empty());
        assert_eq!(split("\n"), vec![""]);
        assert_eq!(split("A\n\n"), vec!["A", ""]);
        assert_eq!(split("A\r\n"), vec!["A"]);
    }

    #[test]
    fn test_crlf_split_across_reads() {
        // A one-byte buffer forces the `\n` of a `\r\n` into the next read
        let reader = std::io::BufReader::with_capacity(1, "1\r\n2\r\n".as_bytes());
        let lines = Lines::new(reader).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(lines, vec!["1", "2"]);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut lines = Lines::new(&b"\xff\xfe\n"[..]);
        assert_eq!(
            lines.next().unwrap().unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }
}
