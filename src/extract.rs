//! Table-cell text extraction.
//!
//! The specials pages carry their menu lines in `td` cells, one line per
//! cell, with the visual hierarchy expressed through inline font sizes on
//! wrapper elements rather than through markup structure. This module walks
//! the raw token stream, takes the first text run of every cell, and turns
//! the font-size hint seen on the way there into leading spaces.

use std::cell::{Cell, RefCell};
use std::io::Read;
use std::sync::LazyLock;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use regex_lite::Regex;

use crate::error::Result;

/// Font size the site uses for unindented entries; smaller sizes indent.
const MAX_FONT_SIZE: i32 = 12;

/// Matches inline style values like `FONT-SIZE:8pt`. The site writes the
/// property uppercase, and only the integer form ever appears.
static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("FONT-SIZE:([0-9]+)pt").unwrap());

/// How extracted entries are indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Leading spaces derived from the font-size hint of each cell.
    FontSize,
    /// No leading spaces. Used for JSON output, where indentation would be
    /// meaningless inside an array element.
    None,
}

enum State {
    /// Outside any cell, waiting for the next `td` start tag.
    Scanning,
    /// Inside a cell. `text` stays `None` until the first character token;
    /// once it is `Some`, the run accumulates until a non-character token
    /// closes the cell.
    InCell { spaces: i32, text: Option<String> },
}

/// Token sink that collects one formatted line per `td` cell.
///
/// html5ever sinks take `&self`, so all state lives behind `Cell`/`RefCell`
/// interior mutability.
struct CellSink {
    indent: Indent,
    state: RefCell<State>,
    lines: RefCell<Vec<String>>,
    done: Cell<bool>,
}

impl CellSink {
    fn new(indent: Indent) -> Self {
        Self {
            indent,
            state: RefCell::new(State::Scanning),
            lines: RefCell::new(Vec::new()),
            done: Cell::new(false),
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.lines.into_inner()
    }

    /// Close the current cell if its text run has started, appending the
    /// formatted entry and returning to `Scanning`.
    fn finish_pending(&self) {
        let mut state = self.state.borrow_mut();
        if let State::InCell {
            spaces,
            text: Some(text),
        } = &*state
        {
            let mut lines = self.lines.borrow_mut();
            // The first entry is never indented, and widths from oversize
            // fonts collapse to zero instead of wrapping.
            let width = if lines.is_empty() {
                0
            } else {
                (*spaces).max(0) as usize
            };
            lines.push(format!("{}{}", " ".repeat(width), text.trim()));
            *state = State::Scanning;
        }
    }

    fn handle_tag(&self, tag: &Tag) {
        self.finish_pending();
        let mut state = self.state.borrow_mut();
        match &mut *state {
            State::Scanning => {
                if tag.kind == TagKind::StartTag && tag.name.as_ref() == "td" {
                    *state = State::InCell {
                        spaces: 0,
                        text: None,
                    };
                } else if tag.kind == TagKind::EndTag && tag.name.as_ref() == "html" {
                    // Document boundary: everything after it is ignored.
                    self.done.set(true);
                }
            }
            State::InCell { spaces, .. } => {
                if self.indent == Indent::FontSize {
                    // The first matching attribute on this tag wins; a later
                    // tag before the text can still overwrite the width.
                    for attr in &tag.attrs {
                        if let Some(caps) = FONT_SIZE_RE.captures(&attr.value) {
                            if let Ok(size) = caps[1].parse::<i32>() {
                                *spaces = MAX_FONT_SIZE - size;
                            }
                            break;
                        }
                    }
                }
            }
        }
    }

    fn append_text(&self, chunk: &str) {
        let mut state = self.state.borrow_mut();
        if let State::InCell { text, .. } = &mut *state {
            // The tokenizer may split one text run into several chunks
            // (entities, buffer boundaries); they all belong to this cell.
            text.get_or_insert_with(String::new).push_str(chunk);
        }
    }
}

impl TokenSink for CellSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.done.get() {
            return TokenSinkResult::Continue;
        }

        match token {
            Token::CharacterTokens(text) => self.append_text(&text),
            Token::TagToken(tag) => self.handle_tag(&tag),
            Token::CommentToken(_) | Token::DoctypeToken(_) | Token::NullCharacterToken => {
                self.finish_pending();
            }
            Token::EOFToken => {
                // A finished text run still becomes an entry; a cell that
                // never reached text contributes nothing.
                self.finish_pending();
                self.done.set(true);
            }
            // Tokenizer notices are recoveries, not faults.
            Token::ParseError(_) => {}
        }

        TokenSinkResult::Continue
    }
}

/// Extract the specials from one HTML document.
///
/// Reads the stream to the end, then walks the token stream: every `td`
/// cell whose scan reaches a text run contributes one entry, in document
/// order. A read failure or non-UTF-8 content aborts the whole extraction;
/// there is no partial output.
pub fn extract_specials<R: Read>(mut reader: R, indent: Indent) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let html = String::from_utf8(bytes)?;

    let input = BufferQueue::default();
    input.push_back(StrTendril::from(html.as_str()));

    let tokenizer = Tokenizer::new(CellSink::new(indent), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let lines = tokenizer.sink.into_lines();
    log::debug!("extracted {} entries", lines.len());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn extract(html: &str) -> Vec<String> {
        extract_specials(html.as_bytes(), Indent::FontSize).unwrap()
    }

    #[test]
    fn test_no_cells_yields_empty_output() {
        let html = "<html><body><p>closed for the holiday</p></body></html>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_one_entry_per_cell_in_document_order() {
        let html = "<html><body><table>\
            <tr><td>Soup</td></tr>\
            <tr><td>Salad</td></tr>\
            </table></body></html>";
        assert_eq!(extract(html), vec!["Soup", "Salad"]);
    }

    #[test]
    fn test_first_entry_ignores_font_hint() {
        let html = r#"<html><td><span style="FONT-SIZE:8pt">Specials</span></td></html>"#;
        assert_eq!(extract(html), vec!["Specials"]);
    }

    #[test]
    fn test_font_hint_indents_later_entries() {
        let html = r#"<html><table>
            <tr><td>Soups</td></tr>
            <tr><td><span style="FONT-SIZE:8pt">  Chef Special  </span></td></tr>
            </table></html>"#;
        assert_eq!(extract(html), vec!["Soups", "    Chef Special"]);
    }

    #[test]
    fn test_no_hint_means_no_indent() {
        let html = "<html><td>One</td><td><b>Two</b></td></html>";
        assert_eq!(extract(html), vec!["One", "Two"]);
    }

    #[test]
    fn test_last_matching_tag_wins() {
        let html = r#"<html><td>x</td>
            <td><span style="FONT-SIZE:10pt"><span style="FONT-SIZE:8pt">Inner</span></span></td>
            </html>"#;
        assert_eq!(extract(html)[1], "    Inner");
    }

    #[test]
    fn test_first_matching_attribute_on_a_tag_wins() {
        let html = r#"<html><td>x</td>
            <td><span data-a="FONT-SIZE:9pt" data-b="FONT-SIZE:7pt">Entry</span></td>
            </html>"#;
        assert_eq!(extract(html)[1], "   Entry");
    }

    #[test]
    fn test_hint_matches_any_attribute_value() {
        let html = r#"<html><td>x</td>
            <td><font face="FONT-SIZE:10pt">Entry</font></td>
            </html>"#;
        assert_eq!(extract(html)[1], "  Entry");
    }

    #[test]
    fn test_oversize_font_clamps_to_zero() {
        let html = r#"<html><td>x</td>
            <td><span style="FONT-SIZE:14pt">Banner</span></td>
            </html>"#;
        assert_eq!(extract(html)[1], "Banner");
    }

    #[test]
    fn test_json_indent_mode_skips_hints() {
        let html = r#"<html><td>x</td>
            <td><span style="FONT-SIZE:8pt">Entry</span></td>
            </html>"#;
        let lines = extract_specials(html.as_bytes(), Indent::None).unwrap();
        assert_eq!(lines, vec!["x", "Entry"]);
    }

    #[test]
    fn test_entity_split_text_run_stays_one_entry() {
        let html = "<html><td>Soup &amp; Salad</td></html>";
        assert_eq!(extract(html), vec!["Soup & Salad"]);
    }

    #[test]
    fn test_whitespace_first_text_run_trims_to_empty() {
        // Whitespace between the cell and its styled wrapper is itself the
        // first text run, so the cell contributes a trimmed-empty entry.
        let html = "<html><td>\n  <b>Late</b></td></html>";
        assert_eq!(extract(html), vec![""]);
    }

    #[test]
    fn test_cell_without_text_contributes_nothing() {
        let html = "<html><td>First</td><td><b><i>";
        assert_eq!(extract(html), vec!["First"]);
    }

    #[test]
    fn test_content_after_html_end_tag_is_ignored() {
        let html = "<html><td>Kept</td></html><td>Dropped</td>";
        assert_eq!(extract(html), vec!["Kept"]);
    }

    #[test]
    fn test_read_fault_aborts_extraction() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("connection reset"))
            }
        }

        let err = extract_specials(Failing, Indent::FontSize).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_utf8_aborts_extraction() {
        let bytes: &[u8] = b"<html><td>\xff\xfe</td></html>";
        let err = extract_specials(bytes, Indent::FontSize).unwrap_err();
        assert!(matches!(err, Error::Utf8(_)));
    }
}
