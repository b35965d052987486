//! WOW64 registry key-path rewriting.
//!
//! Install scripts encode "install under the WOW64-redirected view" with
//! synthetic `_wow64_32` / `_wow64_64` suffixes on the root key. This module
//! materializes the real registry path Windows expects: the 32-bit view gets
//! a `WOW6432Node` segment spliced in after the first child key, the 64-bit
//! view just drops the marker.

/// Length of the `_wow64_32` / `_wow64_64` suffix.
const SUFFIX_LEN: usize = "_wow64_32".len();

/// Rewrite a registry key path, resolving any WOW64 root-suffix marker.
///
/// Paths without a marker (or without any backslash at all) are returned
/// unchanged.
pub fn rewrite_key_path(key_path: &str) -> String {
    let Some((root, rest)) = key_path.split_once('\\') else {
        return key_path.to_string();
    };

    let root_lower = root.to_lowercase();
    if root_lower.ends_with("_wow64_32") {
        let stripped = &root[..root.len() - SUFFIX_LEN];
        match rest.split_once('\\') {
            Some((first_child, remainder)) => {
                format!("{stripped}\\{first_child}\\WOW6432Node\\{remainder}")
            }
            None => format!("{stripped}\\{rest}\\WOW6432Node"),
        }
    } else if root_lower.ends_with("_wow64_64") {
        let stripped = &root[..root.len() - SUFFIX_LEN];
        format!("{stripped}\\{rest}")
    } else {
        key_path.to_string()
    }
}
