//! Clipboard seam and TSV formatting.
//!
//! Copy writes the selection as tab-separated rows; paste splits clipboard
//! text back into a block. Values containing tabs, newlines or quotes are
//! quoted the way spreadsheet applications do it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::Delivery;
use crate::error::Result;

/// System clipboard access.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Read the clipboard. Asynchronous implementations return
    /// [`Delivery::Pending`] and hand the text to the sheet later.
    fn read_text(&mut self) -> Result<Delivery<String>>;
}

/// Process-local clipboard; clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    pub fn set_contents(&self, text: &str) {
        *self.contents.borrow_mut() = text.to_string();
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.set_contents(text);
        Ok(())
    }

    fn read_text(&mut self) -> Result<Delivery<String>> {
        Ok(Delivery::Ready(self.contents()))
    }
}

/// Quote a value for TSV if it contains a tab, newline, or quote.
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains(['\t', '\n', '\r', '"']);
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join rows of values as TSV: tabs between cells, `\n` between rows.
pub fn to_tsv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|v| escape_cell_value(v))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split TSV text into rows of values.
///
/// Accepts `\n` and `\r\n` line endings and quoted fields. A single
/// trailing line break does not produce an extra empty row.
pub fn parse_tsv(text: &str) -> Vec<Vec<String>> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut chars = text.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            '\t' => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
            }
            _ => {
                field.push(c);
                at_field_start = false;
            }
        }
    }
    row.push(field);
    rows.push(row);
    rows
}

#[cfg(target_arch = "wasm32")]
pub use web::{TextSink, WebClipboard};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;

    use wasm_bindgen_futures::{spawn_local, JsFuture};

    use super::Clipboard;
    use crate::backend::Delivery;
    use crate::error::{js_error, GridError, Result};

    /// Receives text read asynchronously from the clipboard.
    pub type TextSink = Rc<dyn Fn(Result<String>)>;

    /// `navigator.clipboard`.
    pub struct WebClipboard {
        sink: TextSink,
    }

    impl WebClipboard {
        pub fn new(sink: TextSink) -> Self {
            Self { sink }
        }

        fn clipboard() -> Result<web_sys::Clipboard> {
            let window = web_sys::window().ok_or(GridError::Clipboard("No window".to_string()))?;
            Ok(window.navigator().clipboard())
        }
    }

    impl Clipboard for WebClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            let promise = Self::clipboard()?.write_text(text);
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    tracing::warn!(target: "sheetgrid::clipboard", error = %js_error("write", &e), "clipboard write failed");
                }
            });
            Ok(())
        }

        fn read_text(&mut self) -> Result<Delivery<String>> {
            let promise = Self::clipboard()?.read_text();
            let sink = Rc::clone(&self.sink);
            spawn_local(async move {
                let text = JsFuture::from(promise)
                    .await
                    .map(|v| v.as_string().unwrap_or_default())
                    .map_err(|e| GridError::Clipboard(js_error("read", &e)));
                sink(text);
            });
            Ok(Delivery::Pending)
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|v| (*v).to_string()).collect())
            .collect()
    }

    #[test_case("plain", "plain" ; "plain")]
    #[test_case("a\tb", "\"a\tb\"" ; "tab")]
    #[test_case("line\nbreak", "\"line\nbreak\"" ; "newline")]
    #[test_case("say \"hi\"", "\"say \"\"hi\"\"\"" ; "quotes")]
    fn escapes_cells(input: &str, expected: &str) {
        assert_eq!(escape_cell_value(input), expected);
    }

    #[test]
    fn tsv_layout() {
        let block = rows(&[&["1", "2"], &["", "x"]]);
        assert_eq!(to_tsv(&block), "1\t2\n\tx");
    }

    #[test_case("a\tb\nc\td", &[&["a", "b"], &["c", "d"]] ; "simple")]
    #[test_case("a\tb\r\nc\td\r\n", &[&["a", "b"], &["c", "d"]] ; "crlf with trailing")]
    #[test_case("\"x\ty\"\tz", &[&["x\ty", "z"]] ; "quoted tab")]
    #[test_case("\"say \"\"hi\"\"\"", &[&["say \"hi\""]] ; "doubled quotes")]
    #[test_case("a\n\nb", &[&["a"], &[""], &["b"]] ; "blank line")]
    fn parses_tsv(text: &str, expected: &[&[&str]]) {
        assert_eq!(parse_tsv(text), rows(expected));
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv("\n").is_empty());
    }

    #[test]
    fn copy_then_paste_preserves_awkward_values() {
        let block = rows(&[&["a\tb", "\"q\""], &["multi\nline", ""]]);
        assert_eq!(parse_tsv(&to_tsv(&block)), block);
    }

    #[test]
    fn memory_clipboard_shares_contents() {
        let mut clipboard = MemoryClipboard::new();
        let view = clipboard.clone();
        clipboard.write_text("hello").unwrap();
        assert_eq!(view.contents(), "hello");
        assert_eq!(clipboard.read_text().unwrap(), Delivery::Ready("hello".to_string()));
    }
}
