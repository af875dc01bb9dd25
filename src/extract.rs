// src/extract.rs

use crate::sexpr::{self, SExpr};
use regex::Regex;
use std::sync::LazyLock;

static LIB_SYMBOLS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*lib_symbols").unwrap());

/// Reduces raw schematic text to the text of exactly one symbol definition.
///
/// If the text carries a `lib_symbols` container, the first `symbol` child
/// inside it is located and filtered through
/// [`sexpr::strip_unsupported`]. Any miss along the way (tokenizer failure,
/// no container child, no symbol child) logs a warning and degrades to the
/// raw trimmed text, unfiltered. This never fails past this boundary.
pub fn extract_symbol_text(raw: &str) -> String {
    if !LIB_SYMBOLS_MARKER.is_match(raw) {
        return raw.trim().to_string();
    }

    match find_first_symbol(raw) {
        Some(def) => sexpr::strip_unsupported(&def).to_string(),
        None => {
            log::warn!("could not extract a symbol from lib_symbols container, using raw text");
            raw.trim().to_string()
        }
    }
}

fn find_first_symbol(raw: &str) -> Option<SExpr> {
    let root = sexpr::parse(raw).ok()?;
    let container = if root.tag() == Some("lib_symbols") {
        root
    } else {
        root.find("lib_symbols")?.clone()
    };
    container.find("symbol").cloned()
}
