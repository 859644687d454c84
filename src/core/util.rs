//! Common utilities

use once_cell::sync::Lazy;
use regex::Regex;
use sha1::{Digest, Sha1};
use xxhash_rust::xxh3::xxh3_64;

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Xxh3,
    Sha1,
}

impl std::str::FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xxh3" => Ok(HashAlgorithm::Xxh3),
            "sha1" => Ok(HashAlgorithm::Sha1),
            _ => Err(format!("Unknown hash algorithm: {}", s)),
        }
    }
}

/// Compute hash of bytes
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Xxh3 => format!("{:016x}", xxh3_64(data)),
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
    }
}

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Keywords that cannot name a static or a module
const RESERVED: &[&str] = &[
    "_", "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Whether `name` can be used verbatim as a Rust item name
pub fn is_rust_ident(name: &str) -> bool {
    IDENT_RE.is_match(name) && !RESERVED.contains(&name)
}

/// Escape bytes for use inside a Rust byte string literal `b"..."`
pub fn escape_byte_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'\0' => out.push_str("\\0"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out
}

/// Escape a key for use inside a Rust string literal `"..."`
pub fn escape_str(s: &str) -> String {
    s.escape_default().to_string()
}
