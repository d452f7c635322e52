//! Component identifier generation.
//!
//! Identifiers are `<name>-<token>` where the token is a short alphabetic
//! hash of the name and how many times that name has been seen. The counters
//! live in an [`IdRegistry`]; builders share [`IdRegistry::global`] unless
//! given another one.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use regex::Regex;

/// Name used when a component has no display name.
pub const DEFAULT_NAME: &str = "sc";

const SEED: i32 = 5381;
const CHARS_LENGTH: u32 = 52;

static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[!"#$%&'()*+,./:;<=>?@\[\\\]^`{|}~-]+"##).expect("Invalid escape regex")
});

static DASHES_AT_ENDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^-|-$)").expect("Invalid dashes regex"));

static AD_REPLACER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(a)(d)").expect("Invalid ad replacer regex"));

static GLOBAL: LazyLock<Arc<IdRegistry>> = LazyLock::new(|| Arc::new(IdRegistry::new()));

/// Replace characters that are unsafe in class names and selectors with `-`.
pub fn escape(name: &str) -> String {
    let replaced = ESCAPE_RE.replace_all(name, "-");
    DASHES_AT_ENDS_RE.replace_all(&replaced, "").into_owned()
}

fn phash(mut h: i32, input: &str) -> i32 {
    let units: Vec<u16> = input.encode_utf16().collect();
    for unit in units.iter().rev() {
        h = h.wrapping_mul(33) ^ i32::from(*unit);
    }
    h
}

/// djb2 (xor variant) over UTF-16 code units, read right to left.
pub fn hash(input: &str) -> u32 {
    phash(SEED, input) as u32
}

fn alphabetic_char(code: u32) -> char {
    // code < 52 by construction
    let code = code as u8;
    if code > 25 {
        (b'A' + code - 26) as char
    } else {
        (b'a' + code) as char
    }
}

/// Encode a hash as letters, most significant first.
///
/// `ad` pairs are split so the result never reads as an ad-blocker target.
pub fn generate_alphabetic_name(code: u32) -> String {
    let mut chars = Vec::new();
    let mut x = code;
    while x > CHARS_LENGTH {
        chars.push(alphabetic_char(x % CHARS_LENGTH));
        x /= CHARS_LENGTH;
    }
    chars.push(alphabetic_char(x % CHARS_LENGTH));

    let name: String = chars.into_iter().rev().collect();
    AD_REPLACER_RE.replace_all(&name, "${1}-${2}").into_owned()
}

/// Short token for an arbitrary string.
pub fn generate_component_id(input: &str) -> String {
    generate_alphabetic_name(hash(input))
}

/// Per-name occurrence counters backing identifier generation.
#[derive(Debug, Default)]
pub struct IdRegistry {
    counters: Mutex<HashMap<String, u64>>,
}

impl IdRegistry {
    /// Create a registry with no recorded names.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<IdRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Generate the next identifier for `display_name`.
    pub fn generate(&self, display_name: Option<&str>, parent_component_id: Option<&str>) -> String {
        let name = display_name.map_or_else(|| DEFAULT_NAME.to_string(), escape);

        let count = {
            let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
            let counter = counters.entry(name.clone()).or_insert(0);
            *counter += 1;
            *counter
        };

        let component_id = format!("{name}-{}", generate_component_id(&format!("{name}{count}")));

        match parent_component_id {
            Some(parent) if !parent.is_empty() => format!("{parent}-{component_id}"),
            _ => component_id,
        }
    }

    /// How many identifiers have been generated for an escaped name.
    pub fn count(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}
