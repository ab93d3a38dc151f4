//! Frame Splitting and Normalization
//!
//! A frame is one complete adapter response: everything buffered up to
//! the `>` prompt, possibly spanning several carriage-return-separated
//! lines and polluted with stray line feeds or escaped carriage returns
//! from the transport.

use crate::elm;

/// Split a complete frame into normalized command strings.
///
/// Normalization order: line feeds are removed outright, the literal
/// `\r` escape is rewritten to a real carriage return, then the frame is
/// split on carriage returns. Each segment is stripped of prompt
/// characters and internal spaces and trimmed; segments left empty are
/// dropped. Output order matches arrival order.
pub fn split_frame(frame: &str) -> Vec<String> {
    let normalized = frame.replace('\n', "").replace(elm::ESCAPED_CR, "\r");

    normalized
        .split('\r')
        .map(|segment| {
            segment
                .replace(elm::PROMPT, "")
                .replace(' ', "")
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}
