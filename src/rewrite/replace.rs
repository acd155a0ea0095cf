//! Literal substring substitution over raw template bytes.

use memchr::memmem;

use crate::asset::PathMapping;

/// Apply every mapping to `content`, in order.
///
/// Each mapping is one left-to-right, non-overlapping pass over the output of
/// the previous one, so a later `from` can match text an earlier `to`
/// introduced. Empty `from` values are ignored. Content is bytes, so
/// templates in any ASCII-compatible encoding are rewritten as they are.
///
/// Returns the new content and the number of substitutions made.
pub fn replace_all(content: impl AsRef<[u8]>, mappings: &[PathMapping]) -> (Vec<u8>, usize) {
    mappings
        .iter()
        .filter(|mapping| !mapping.from.is_empty())
        .fold((content.as_ref().to_vec(), 0), |(text, count), mapping| {
            let (text, hits) = replace_bytes(text, mapping.from.as_bytes(), mapping.to.as_bytes());
            (text, count + hits)
        })
}

/// One pass replacing each non-overlapping `needle` with `with`.
fn replace_bytes(haystack: Vec<u8>, needle: &[u8], with: &[u8]) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let mut last = 0;
    let mut hits = 0;

    for start in memmem::find_iter(&haystack, needle) {
        if hits == 0 {
            out.reserve(haystack.len());
        }
        out.extend_from_slice(&haystack[last..start]);
        out.extend_from_slice(with);
        last = start + needle.len();
        hits += 1;
    }

    if hits == 0 {
        return (haystack, 0);
    }
    out.extend_from_slice(&haystack[last..]);
    (out, hits)
}
