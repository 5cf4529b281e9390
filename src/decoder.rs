use crate::errors::{Error, Result};
use crate::record::AttributeRecord;

/// Decodes one input line into an [`AttributeRecord`].
///
/// The accepted grammar is a deliberately loose subset of JSON: a flat
/// object of double-quoted string pairs. There are no escape sequences, so
/// a quoted segment runs to the next `"` and may contain `{`, `}`, `,` or
/// `:` as plain content. Between entries, whitespace and commas are
/// interchangeable separators. Decoding stops successfully at the closing
/// `}`, at the record's pair capacity, or at end of input directly after a
/// completed pair; whatever follows the stopping point is ignored.
///
/// Everything else is [`Error::MalformedRecord`]. The decoder never
/// distinguishes failure shapes.
pub fn decode(line: &str) -> Result<AttributeRecord> {
    let mut scanner = Scanner::new(line);
    let mut record = AttributeRecord::new();

    scanner.skip_whitespace();
    if !scanner.eat('{') {
        return Err(Error::MalformedRecord);
    }

    while !scanner.at_end() && scanner.peek() != Some('}') && !record.is_full() {
        scanner.skip_separators();
        if scanner.peek() == Some('}') {
            break;
        }

        let key = scanner.quoted()?;
        scanner.skip_inline_whitespace();
        if !scanner.eat(':') {
            return Err(Error::MalformedRecord);
        }
        scanner.skip_inline_whitespace();
        let value = scanner.quoted()?;

        record.push(key, value);
    }

    Ok(record)
}

/// Cursor over one line. `pos` is a byte offset, always on a character
/// boundary.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos == self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Consumes `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(|c| matches!(c, ' ' | '\t' | '\n'));
    }

    /// Entry separators: whitespace and commas in any order, any count.
    fn skip_separators(&mut self) {
        self.skip_while(|c| matches!(c, ' ' | '\t' | '\n' | ','));
    }

    /// Only spaces and tabs may surround the key-value colon.
    fn skip_inline_whitespace(&mut self) {
        self.skip_while(|c| matches!(c, ' ' | '\t'));
    }

    /// Scans a double-quoted segment and returns its content verbatim.
    ///
    /// Fails when the opening or the closing quote is missing.
    fn quoted(&mut self) -> Result<&'a str> {
        if !self.eat('"') {
            return Err(Error::MalformedRecord);
        }
        let start = self.pos;
        match self.src[start..].find('"') {
            Some(len) => {
                self.pos = start + len + 1;
                Ok(&self.src[start..start + len])
            }
            None => Err(Error::MalformedRecord),
        }
    }
}
