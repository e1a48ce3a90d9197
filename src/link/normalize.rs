// src/link/normalize.rs
// =============================================================================
// Link normalization.
//
// Pages often write links without a scheme: <a href="//example.com/a">.
// Browsers reuse the page's scheme for those; we always pick http:// and let
// the server redirect to https if it wants to.
//
// That is the ONLY rewrite we do. Relative paths ("/docs", "../about") are
// left exactly as written, so they fail the domain check later and get
// dropped. Trailing slashes, query order and fragments are not touched
// either: two links are the same link only if their strings are identical.
// =============================================================================

// Rewrites a scheme-relative link to an absolute http:// link
//
// Examples:
//   "//example.com/a"      -> "http://example.com/a"
//   "https://example.com"  -> "https://example.com" (unchanged)
//   "/docs"                -> "/docs" (unchanged, not resolved)
pub fn normalize_link(raw: &str) -> String {
    match raw.strip_prefix("//") {
        Some(rest) => format!("http://{}", rest),
        None => raw.to_string(),
    }
}
