/// Removes single-level `<...>` type parameters from a link or source line.
///
/// Text is split on `<`. A segment containing a lambda arrow (`->`) is kept
/// verbatim; otherwise everything up to and including the first `>` is dropped.
pub fn strip_generics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in text.split('<') {
        if segment.contains("->") {
            out.push_str(segment);
        } else if let Some((_, rest)) = segment.split_once('>') {
            out.push_str(rest);
        } else {
            out.push_str(segment);
        }
    }
    out
}
