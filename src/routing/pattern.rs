//! URI template compilation.
//!
//! # Responsibilities
//! - Normalize templates to a leading `/`
//! - Turn `:name` / `{name}` segments into word captures and record labels
//! - Turn `*` into match-anything captures (never labelled)
//! - Produce the anchored table key and the group start prefix
//!
//! # Design Decisions
//! - Trailing slash is optional on every route (`/users/:id` matches `/users/42/`)
//! - Literal text is escaped, so `.` in `/feed.json` only matches a dot
//! - Word captures are ASCII-only (`[0-9A-Za-z_]`)
//! - No validation pass: a template whose expression cannot be built within
//!   the size limit falls back to exact string comparison
//! - Labels keep the capture slot they came from; wildcard groups never
//!   shift a label onto the wrong value

use regex::{Regex, RegexBuilder};

/// Expression substituted for `:name` and `{name}` segments.
const WORD: &str = "([[:word:]]+)";

/// Expression substituted for every `*`.
const ANY: &str = "(.*)";

/// Compiled size limit for one route expression.
const SIZE_LIMIT: usize = 1 << 20;

/// A template compiled into a matcher plus its parameter labels.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    key: String,
    matcher: Matcher,
    labels: Vec<String>,
    slots: Vec<usize>,
}

#[derive(Debug, Clone)]
enum Matcher {
    Expression(Regex),
    Literal(String),
}

/// Intermediate form shared by route keys and group prefixes.
struct Expansion {
    normalized: String,
    /// Always ends with `/`.
    source: String,
    labels: Vec<String>,
    slots: Vec<usize>,
}

/// Prefix a template with `/` when it has none.
pub fn normalize(uri: &str) -> String {
    if uri.starts_with('/') {
        uri.to_string()
    } else {
        format!("/{}", uri)
    }
}

fn expand(uri: &str) -> Expansion {
    let normalized = normalize(uri);
    let segments: Vec<&str> = normalized.split('/').collect();

    let mut pieces = Vec::with_capacity(segments.len() + 1);
    let mut labels = Vec::new();
    let mut slots = Vec::new();
    let mut groups = 0;

    for segment in &segments {
        // `:tenant*` keeps its label and still matches anything after it.
        let head = segment.trim_end_matches('*');
        let stars = segment.len() - head.len();
        let label = head.strip_prefix(':').or_else(|| {
            head.strip_prefix('{')
                .map(|rest| rest.strip_suffix('}').unwrap_or(rest))
        });

        if let Some(label) = label {
            groups += 1;
            labels.push(label.to_string());
            slots.push(groups);
            pieces.push(format!("{}{}", WORD, ANY.repeat(stars)));
            groups += stars;
            continue;
        }

        let literals: Vec<String> = segment.split('*').map(regex::escape).collect();
        groups += literals.len() - 1;
        pieces.push(literals.join(ANY));
    }

    if segments.last().is_some_and(|last| !last.is_empty()) {
        pieces.push(String::new());
    }

    Expansion {
        normalized,
        source: pieces.join("/"),
        labels,
        slots,
    }
}

impl CompiledPattern {
    /// Compile a route template, anchored at both ends.
    pub fn compile(uri: &str) -> Self {
        Self::compile_with_limit(uri, SIZE_LIMIT)
    }

    fn compile_with_limit(uri: &str, size_limit: usize) -> Self {
        let expansion = expand(uri);
        let stem = &expansion.source[..expansion.source.len() - 1];
        let key = format!("^{}/?$", stem);

        let matcher = match RegexBuilder::new(&key).size_limit(size_limit).build() {
            Ok(regex) => Matcher::Expression(regex),
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "Template degraded to a literal match");
                Matcher::Literal(expansion.normalized.clone())
            }
        };

        Self {
            key,
            matcher,
            labels: expansion.labels,
            slots: expansion.slots,
        }
    }

    /// The table key (anchored expression source).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parameter names in template order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns true if `uri` structurally matches this pattern.
    pub fn is_match(&self, uri: &str) -> bool {
        match &self.matcher {
            Matcher::Expression(regex) => regex.is_match(uri),
            Matcher::Literal(literal) => literal_matches(literal, uri),
        }
    }

    /// Positional captures for `uri`, without the whole-match capture.
    pub fn captures(&self, uri: &str) -> Option<Vec<String>> {
        match &self.matcher {
            Matcher::Expression(regex) => regex.captures(uri).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect()
            }),
            Matcher::Literal(literal) => literal_matches(literal, uri).then(Vec::new),
        }
    }

    /// Pairs each label with the capture it was compiled from.
    pub fn label_values<'a>(
        &'a self,
        captures: &'a [String],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.labels.iter().zip(&self.slots).map(move |(label, slot)| {
            let value = captures.get(slot - 1).map_or("", String::as_str);
            (label.as_str(), value)
        })
    }
}

fn literal_matches(literal: &str, uri: &str) -> bool {
    uri == literal || uri.strip_suffix('/') == Some(literal)
}

/// Expression for a group prefix, anchored only at the start.
///
/// `/api` yields `^/api(?:/|$)`, so both `/api` and `/api/...` are stripped.
pub fn start_pattern(start: &str) -> String {
    let expansion = expand(start);
    let stem = &expansion.source[..expansion.source.len() - 1];
    format!("^{}(?:/|$)", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_template() {
        let pattern = CompiledPattern::compile("/users");
        assert_eq!(pattern.key(), "^/users/?$");
        assert!(pattern.is_match("/users"));
        assert!(pattern.is_match("/users/"));
        assert!(!pattern.is_match("/users/42"));
        assert!(pattern.labels().is_empty());
    }

    #[test]
    fn test_leading_slash_is_added() {
        let a = CompiledPattern::compile("users/:id");
        let b = CompiledPattern::compile("/users/:id");
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_colon_and_brace_labels() {
        let pattern = CompiledPattern::compile("/users/:id/posts/{post}");
        assert_eq!(pattern.labels(), ["id", "post"]);

        let captures = pattern.captures("/users/42/posts/7").unwrap();
        assert_eq!(captures, ["42", "7"]);

        let named: Vec<_> = pattern.label_values(&captures).collect();
        assert_eq!(named, [("id", "42"), ("post", "7")]);
    }

    #[test]
    fn test_label_requires_word_characters() {
        let pattern = CompiledPattern::compile("/users/:id");
        assert!(!pattern.is_match("/users/"));
        assert!(!pattern.is_match("/users/a-b"));
        assert!(pattern.is_match("/users/a_b"));
    }

    #[test]
    fn test_wildcards_are_captured_but_not_named() {
        let pattern = CompiledPattern::compile("/files/*/:name");
        assert_eq!(pattern.labels(), ["name"]);

        let captures = pattern.captures("/files/a/b/report").unwrap();
        assert_eq!(captures, ["a/b", "report"]);

        let named: Vec<_> = pattern.label_values(&captures).collect();
        assert_eq!(named, [("name", "report")]);
    }

    #[test]
    fn test_root_template() {
        let pattern = CompiledPattern::compile("/");
        assert_eq!(pattern.key(), "^/?$");
        assert!(pattern.is_match("/"));
        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("/x"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let pattern = CompiledPattern::compile("/feed.json");
        assert!(pattern.is_match("/feed.json"));
        assert!(!pattern.is_match("/feedxjson"));
    }

    #[test]
    fn test_group_route_template() {
        let pattern = CompiledPattern::compile("/api*");
        assert_eq!(pattern.key(), "^/api(.*)/?$");
        assert!(pattern.is_match("/api"));
        assert!(pattern.is_match("/api/widgets"));
    }

    #[test]
    fn test_start_pattern() {
        assert_eq!(start_pattern("/api"), "^/api(?:/|$)");
        assert_eq!(start_pattern(""), "^(?:/|$)");
        assert_eq!(start_pattern("/v1/:tenant"), "^/v1/([[:word:]]+)(?:/|$)");
    }

    #[test]
    fn test_word_captures_are_ascii() {
        let pattern = CompiledPattern::compile("/users/:id");
        assert!(pattern.is_match("/users/abc_19"));
        assert!(!pattern.is_match("/users/日本"));
        assert!(!pattern.is_match("/users/café"));
    }

    #[test]
    fn test_label_followed_by_wildcard() {
        let pattern = CompiledPattern::compile("/t/:tenant*");
        assert_eq!(pattern.key(), "^/t/([[:word:]]+)(.*)/?$");
        assert_eq!(pattern.labels(), ["tenant"]);

        let captures = pattern.captures("/t/acme/users").unwrap();
        assert_eq!(captures, ["acme", "/users"]);
        let named: Vec<_> = pattern.label_values(&captures).collect();
        assert_eq!(named, [("tenant", "acme")]);

        let braced = CompiledPattern::compile("/t/{tenant}*");
        assert_eq!(braced.key(), pattern.key());
    }

    #[test]
    fn test_oversized_expression_falls_back_to_literal() {
        let pattern = CompiledPattern::compile_with_limit("/users/:id", 8);
        assert_eq!(pattern.key(), "^/users/([[:word:]]+)/?$");
        assert!(pattern.is_match("/users/:id"));
        assert!(pattern.is_match("/users/:id/"));
        assert!(!pattern.is_match("/users/42"));
        assert_eq!(pattern.captures("/users/:id"), Some(Vec::new()));
        assert_eq!(pattern.captures("/users/42"), None);
    }
}
