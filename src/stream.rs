use std::io::{self, BufRead, Write};

use crate::decoder::decode;
use crate::policy::{evaluate, Verdict};

/// Runs the evaluator over a stream of newline-terminated records.
///
/// Exactly one verdict line per non-blank input line, in input order; blank
/// lines produce no output at all, so the Nth verdict always answers the
/// Nth non-blank input line. A line that fails to decode is reported on the
/// diagnostic channel together with its raw text and still yields
/// `unauthorized`, keeping the correspondence intact.
///
/// An unreadable input stream is treated as end of input, not as a
/// processing failure. Write errors on `output` do propagate.
pub fn process<R, W>(input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(error = %error, "input unreadable, treating as end of input");
                break;
            }
        };

        if line.is_empty() {
            continue;
        }

        let verdict = match decode(&line) {
            Ok(record) => evaluate(&record),
            Err(error) => {
                tracing::error!(error = %error, line = %line, "failed to decode record");
                Verdict::Unauthorized
            }
        };

        writeln!(output, "{verdict}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    fn run(input: &str) -> String {
        let mut output = Vec::new();
        process(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn emits_one_verdict_per_line_in_order() {
        let input = concat!(
            r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
            "\n",
            r#"{"azure.authenticated":"false","azure.role":"admin"}"#,
            "\n",
            r#"{"azure.authenticated":"true","azure.role":"user","azure.email":"alice@example.com"}"#,
            "\n",
        );
        assert_eq!(run(input), "authorized\nunauthorized\nauthorized\n");
    }

    #[test]
    fn blank_lines_produce_no_output() {
        let input = concat!(
            "\n",
            r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
            "\n\n\n",
            r#"{"azure.authenticated":"false"}"#,
            "\n\n",
        );
        assert_eq!(run(input), "authorized\nunauthorized\n");
    }

    #[test]
    fn malformed_lines_yield_unauthorized_and_processing_continues() {
        let input = concat!(
            "not a record\n",
            r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
            "\n",
        );
        assert_eq!(run(input), "unauthorized\nauthorized\n");
    }

    #[test]
    fn mixed_stream_keeps_positional_correspondence() {
        let input = concat!(
            r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
            "\n\n",
            "{broken\n",
            r#"{"azure.authenticated":"true","azure.department":"Engineering","azure.groups":"build-developers"}"#,
            "\n",
        );
        assert_eq!(run(input), "authorized\nunauthorized\nauthorized\n");
    }

    #[test]
    fn final_line_without_terminator_is_processed() {
        let input = r#"{"azure.authenticated":"true","azure.role":"admin"}"#;
        assert_eq!(run(input), "authorized\n");
    }

    #[test]
    fn whitespace_only_line_is_not_blank() {
        // It reaches the decoder, fails there, and still gets its verdict
        // line.
        assert_eq!(run("   \n"), "unauthorized\n");
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert_eq!(run(""), "");
    }

    #[test]
    fn very_long_lines_do_not_corrupt_following_lines() {
        // No fixed line buffer: a record far past any plausible one is
        // read whole, never clipped with the remainder bleeding into the
        // next record.
        let long = "x".repeat(10_000);
        let admin = r#"{"azure.authenticated":"true","azure.role":"admin"}"#;

        let padded = format!(
            r#"{{"azure.authenticated":"true","azure.role":"admin","azure.note":"{long}"}}"#
        );
        assert_eq!(run(&format!("{padded}\n{admin}\n")), "authorized\nauthorized\n");

        // Same when the oversized line is malformed (unterminated value).
        let broken = format!(r#"{{"azure.authenticated":"true","azure.note":"{long}"#);
        assert_eq!(run(&format!("{broken}\n{admin}\n")), "unauthorized\nauthorized\n");
    }

    /// Serves its payload, then errors instead of reporting end of input.
    struct FailingReader(&'static [u8]);

    impl io::Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    impl io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.0.is_empty() {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
            } else {
                Ok(self.0)
            }
        }

        fn consume(&mut self, amt: usize) {
            self.0 = &self.0[amt..];
        }
    }

    #[test]
    fn read_error_is_treated_as_end_of_input() {
        let line = concat!(
            r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
            "\n",
        );
        let reader = FailingReader(line.as_bytes());
        let mut output = Vec::new();

        process(reader, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "authorized\n");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn decode_failures_are_reported_with_the_raw_line() {
        let diagnostics = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(diagnostics.clone())
            .with_ansi(false)
            .finish();

        let output = tracing::subscriber::with_default(subscriber, || run("{broken\n"));

        assert_eq!(output, "unauthorized\n");
        let report = diagnostics.contents();
        assert!(report.contains("failed to decode record"));
        assert!(report.contains("{broken"));
    }
}
