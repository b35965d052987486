//! Minimal parser for Valve's key/value text format (VDF).
//!
//! Install scripts are small, so this is a deliberately simple two-pass
//! parser: tokenize into quoted strings and braces, then build the tree
//! recursively. It is not a general VDF library; it only covers what Steam
//! install scripts actually use (quoted tokens, nesting, `//` comments,
//! backslash escapes inside quoted tokens).
//!
//! The tree preserves insertion order, which the registry writer relies on:
//! sections and values are emitted in the order they appear in the source.

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::Path;

/// An insertion-ordered key/value mapping.
pub type VdfMap = IndexMap<String, VdfValue>;

/// A node in a parsed VDF tree: either a literal string or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VdfValue {
    Str(String),
    Map(VdfMap),
}

impl VdfValue {
    /// Get the nested mapping, if this node is one.
    pub fn as_map(&self) -> Option<&VdfMap> {
        match self {
            VdfValue::Map(map) => Some(map),
            VdfValue::Str(_) => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Text(String),
}

/// Parse VDF text into an ordered tree.
///
/// The parser is permissive: unbalanced braces and dangling keys produce a
/// best-effort tree instead of an error, mirroring how tolerant the Steam
/// client itself is about these files.
pub fn parse(input: &str) -> VdfMap {
    let tokens = tokenize(input);
    let mut i = 0;
    parse_object(&tokens, &mut i)
}

/// Read a VDF file from disk and parse it.
///
/// Bytes that are not valid UTF-8 are decoded lossily rather than rejected;
/// install scripts in the wild occasionally carry mojibake in localized
/// values and the conversion should survive that.
pub fn load(path: &Path) -> io::Result<VdfMap> {
    let bytes = fs::read(path)?;
    Ok(parse(&String::from_utf8_lossy(&bytes)))
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut current = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        // Escape sequences inside quoted tokens, as written
                        // by Valve's own serializer.
                        '\\' => match chars.next() {
                            Some('"') => current.push('"'),
                            Some('\\') => current.push('\\'),
                            Some('n') => current.push('\n'),
                            Some('t') => current.push('\t'),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => current.push('\\'),
                        },
                        _ => current.push(c),
                    }
                }
                tokens.push(Token::Text(current));
            }
            '{' => tokens.push(Token::Open),
            '}' => tokens.push(Token::Close),
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {}
            c => {
                // Bare (unquoted) token.
                let mut current = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '"' | '{' | '}') {
                        break;
                    }
                    current.push(next);
                    chars.next();
                }
                tokens.push(Token::Text(current));
            }
        }
    }

    tokens
}

fn parse_object(tokens: &[Token], i: &mut usize) -> VdfMap {
    let mut map = VdfMap::new();

    while *i < tokens.len() {
        match &tokens[*i] {
            Token::Close => {
                *i += 1;
                break;
            }
            Token::Open => {
                *i += 1;
            }
            Token::Text(key) => {
                *i += 1;
                match tokens.get(*i) {
                    Some(Token::Open) => {
                        *i += 1;
                        let child = parse_object(tokens, i);
                        map.insert(key.clone(), VdfValue::Map(child));
                    }
                    Some(Token::Close) => {
                        *i += 1;
                    }
                    Some(Token::Text(value)) => {
                        map.insert(key.clone(), VdfValue::Str(value.clone()));
                        *i += 1;
                    }
                    None => {}
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_pairs() {
        let tree = parse(r#""a" "1" "b" "2""#);
        assert_eq!(tree.get("a"), Some(&VdfValue::Str("1".to_string())));
        assert_eq!(tree.get("b"), Some(&VdfValue::Str("2".to_string())));
    }

    #[test]
    fn test_parse_nested_map() {
        let tree = parse(
            r#"
            "InstallScript"
            {
                "Registry"
                {
                    "HKEY_LOCAL_MACHINE\\Software\\Test"
                    {
                        "Version" "1.0"
                    }
                }
            }
            "#,
        );

        let script = tree.get("InstallScript").and_then(VdfValue::as_map).unwrap();
        let registry = script.get("Registry").and_then(VdfValue::as_map).unwrap();
        let key = registry
            .get("HKEY_LOCAL_MACHINE\\Software\\Test")
            .and_then(VdfValue::as_map)
            .unwrap();
        assert_eq!(key.get("Version"), Some(&VdfValue::Str("1.0".to_string())));
    }

    #[test]
    fn test_parse_preserves_insertion_order() {
        let tree = parse(r#""z" "1" "a" "2" "m" "3""#);
        let keys: Vec<&String> = tree.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_parse_escaped_backslashes() {
        let tree = parse(r#""Path" "%INSTALLDIR%\\bin""#);
        assert_eq!(
            tree.get("Path"),
            Some(&VdfValue::Str("%INSTALLDIR%\\bin".to_string()))
        );
    }

    #[test]
    fn test_parse_escaped_quote() {
        let tree = parse(r#""name" "say \"hi\"""#);
        assert_eq!(
            tree.get("name"),
            Some(&VdfValue::Str("say \"hi\"".to_string()))
        );
    }

    #[test]
    fn test_parse_line_comments() {
        let tree = parse(
            "// header comment\n\"a\" \"1\" // trailing\n\"b\" \"2\"\n",
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("b"), Some(&VdfValue::Str("2".to_string())));
    }

    #[test]
    fn test_parse_bare_tokens() {
        let tree = parse("key value");
        assert_eq!(tree.get("key"), Some(&VdfValue::Str("value".to_string())));
    }

    #[test]
    fn test_parse_unbalanced_input_is_best_effort() {
        let tree = parse(r#""a" { "b" "1" "#);
        let a = tree.get("a").and_then(VdfValue::as_map).unwrap();
        assert_eq!(a.get("b"), Some(&VdfValue::Str("1".to_string())));
    }
}
