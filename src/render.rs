//! Output rendering for extracted specials.
//!
//! Both renderings are plain functions of the same ordered sequence; no
//! entry is merged, reordered, or dropped here.

use std::io::{self, Write};

use crate::error::Result;

/// Write each entry on its own line, in order.
pub fn write_plain<W: Write>(mut w: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Serialize the entries as a JSON array of strings.
///
/// Compact by default; `pretty` switches to the multi-line 2-space-indented
/// form.
pub fn to_json(lines: &[String], pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(lines)?
    } else {
        serde_json::to_string(lines)?
    };
    Ok(out)
}
