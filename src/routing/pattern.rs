//! Built-in pattern compiler.
//!
//! # Syntax
//! ```text
//!  hello/world        literal
//!  hello/:name        named parameter, one segment
//!  file.:ext          '.' is the prefix, parameter stops at the next '.'
//!  user/:id(\d+)      named parameter with a custom pattern
//!  (\d+)/edit         unnamed parameter, keyed "0", "1", ...
//!  post/:slug?        optional (the prefix is optional too)
//!  tags/:tag*         zero or more segments
//!  tags/:tag+         one or more segments
//!  static/*           unnamed catch-all
//! ```
//!
//! # Design Decisions
//! - Compiles to a single anchored `regex::Regex`, one capture group per key
//! - Capturing groups inside custom patterns are rejected so that captures
//!   stay aligned with the declared keys
//! - Case-insensitive and trailing-slash tolerant unless configured otherwise

use regex::Regex;
use thiserror::Error;

use crate::config::MatchingConfig;
use crate::routing::matcher::{Captures, Matcher, PatternCompiler};

/// Errors raised while compiling a route pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `:` was not followed by a parameter name.
    #[error("missing parameter name at position {position}")]
    MissingName { position: usize },

    /// A `(` was never closed.
    #[error("unbalanced group starting at position {position}")]
    UnbalancedGroup { position: usize },

    /// A custom pattern `()` was empty.
    #[error("empty group at position {position}")]
    EmptyGroup { position: usize },

    /// A custom pattern contained its own capturing group.
    #[error("capturing group at position {position}, use (?:...) instead")]
    CapturingGroup { position: usize },

    /// The generated expression was rejected by the regex engine.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Error reported by a third-party compiler.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param(Param),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Param {
    name: String,
    prefix: String,
    optional: bool,
    repeat: bool,
    pattern: String,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Reads a `( ... )` group starting at `open`, returning its body and the
/// position just past the closing parenthesis.
fn read_group(chars: &[char], open: usize) -> Result<(String, usize), PatternError> {
    let mut depth = 1;
    let mut body = String::new();
    let mut i = open + 1;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                body.push('\\');
                if let Some(&escaped) = chars.get(i + 1) {
                    body.push(escaped);
                }
                i += 2;
                continue;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    if body.is_empty() {
                        return Err(PatternError::EmptyGroup { position: open });
                    }
                    return Ok((body, i + 1));
                }
            }
            '(' => {
                if chars.get(i + 1) != Some(&'?') {
                    return Err(PatternError::CapturingGroup { position: i });
                }
                depth += 1;
            }
            _ => {}
        }
        body.push(chars[i]);
        i += 1;
    }

    Err(PatternError::UnbalancedGroup { position: open })
}

fn parse(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut unnamed = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                match chars.get(i + 1) {
                    Some(&escaped) => literal.push(escaped),
                    None => literal.push('\\'),
                }
                i += 2;
            }
            ':' | '(' | '*' => {
                let start = i;
                let mut name = String::new();
                let mut custom = None;

                if c == ':' {
                    i += 1;
                    while i < chars.len() && is_name_char(chars[i]) {
                        name.push(chars[i]);
                        i += 1;
                    }
                    if name.is_empty() {
                        return Err(PatternError::MissingName { position: start });
                    }
                }

                if c == '*' {
                    custom = Some(".*".to_string());
                    i += 1;
                } else if chars.get(i) == Some(&'(') {
                    let (body, end) = read_group(&chars, i)?;
                    custom = Some(body);
                    i = end;
                }

                let prefix = match literal.chars().last() {
                    Some(p @ ('/' | '.')) if c != '*' => {
                        literal.pop();
                        p.to_string()
                    }
                    _ => String::new(),
                };

                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }

                let (optional, repeat) = if c == '*' {
                    (false, false)
                } else {
                    match chars.get(i) {
                        Some('?') => (true, false),
                        Some('*') => (true, true),
                        Some('+') => (false, true),
                        _ => (false, false),
                    }
                };
                if optional || repeat {
                    i += 1;
                }

                if name.is_empty() {
                    name = unnamed.to_string();
                    unnamed += 1;
                }

                let delimiter = prefix.chars().next().unwrap_or('/');
                let pattern = custom.unwrap_or_else(|| {
                    format!("[^{}]+?", regex::escape(&delimiter.to_string()))
                });

                tokens.push(Token::Param(Param {
                    name,
                    prefix,
                    optional,
                    repeat,
                    pattern,
                }));
            }
            _ => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

fn to_regex(tokens: &[Token], options: &MatchingConfig) -> String {
    let mut route = String::new();
    if !options.sensitive {
        route.push_str("(?i)");
    }
    route.push('^');

    for token in tokens {
        match token {
            Token::Literal(text) => route.push_str(&regex::escape(text)),
            Token::Param(param) => {
                let prefix = regex::escape(&param.prefix);
                let mut capture = format!("(?:{})", param.pattern);
                if param.repeat {
                    capture = format!("{capture}(?:{prefix}{capture})*");
                }

                if param.optional {
                    route.push_str(&format!("(?:{prefix}({capture}))?"));
                } else {
                    route.push_str(&format!("{prefix}({capture})"));
                }
            }
        }
    }

    let ends_with_slash = matches!(tokens.last(), Some(Token::Literal(text)) if text.ends_with('/'));

    if options.end {
        if !options.strict {
            route.push_str("(?:/)?");
        }
        route.push('$');
    } else if !ends_with_slash {
        route.push_str("(?:/|$)");
    }

    route
}

/// A route pattern compiled to a regular expression.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    keys: Vec<String>,
    regex: Regex,
}

impl PathPattern {
    /// Compile `pattern` with the given matching options.
    pub fn new(pattern: &str, options: &MatchingConfig) -> Result<Self, PatternError> {
        let tokens = parse(pattern)?;
        let keys = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Param(param) => Some(param.name.clone()),
                Token::Literal(_) => None,
            })
            .collect();
        let regex = Regex::new(&to_regex(&tokens, options))?;

        Ok(Self {
            source: pattern.to_string(),
            keys,
            regex,
        })
    }

    /// The pattern this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The generated expression.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

impl Matcher for PathPattern {
    fn keys(&self) -> &[String] {
        &self.keys
    }

    fn captures<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
        self.regex.captures(path).map(|caps| {
            caps.iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()))
                .collect()
        })
    }

    fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Compiles patterns into [`PathPattern`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompiler {
    options: MatchingConfig,
}

impl PathCompiler {
    pub fn new(options: MatchingConfig) -> Self {
        Self { options }
    }
}

impl PatternCompiler for PathCompiler {
    fn compile(&self, pattern: &str) -> Result<Box<dyn Matcher>, PatternError> {
        Ok(Box::new(PathPattern::new(pattern, &self.options)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> PathPattern {
        PathPattern::new(pattern, &MatchingConfig::default()).unwrap()
    }

    #[test]
    fn test_literal_pattern() {
        let pattern = compile("hello");
        assert!(pattern.keys().is_empty());
        assert!(pattern.matches("hello"));
        assert!(pattern.matches("hello/"));
        assert!(pattern.matches("HELLO"));
        assert!(!pattern.matches("hello/world"));
        assert!(!pattern.matches("say/hello"));
    }

    #[test]
    fn test_named_param() {
        let pattern = compile("hello/:name");
        assert_eq!(pattern.keys(), ["name"]);
        assert_eq!(pattern.captures("hello/world"), Some(vec![Some("world")]));
        assert_eq!(pattern.captures("hello/"), None);
        assert_eq!(pattern.captures("hello/world/again"), None);
    }

    #[test]
    fn test_multiple_params() {
        let pattern = compile("/blog/:category/:post");
        assert_eq!(pattern.keys(), ["category", "post"]);
        assert_eq!(
            pattern.captures("/blog/rust/request-routers"),
            Some(vec![Some("rust"), Some("request-routers")])
        );
        assert_eq!(pattern.captures("/blog/rust/"), None);
    }

    #[test]
    fn test_dot_prefix() {
        let pattern = compile("/file.:ext");
        assert_eq!(pattern.captures("/file.tar"), Some(vec![Some("tar")]));
        assert_eq!(pattern.captures("/file.tar.gz"), None);
    }

    #[test]
    fn test_custom_and_unnamed_groups() {
        let pattern = compile("/user/:id(\\d+)/(edit|view)");
        assert_eq!(pattern.keys(), ["id", "0"]);
        assert_eq!(
            pattern.captures("/user/42/edit"),
            Some(vec![Some("42"), Some("edit")])
        );
        assert!(!pattern.matches("/user/abc/edit"));
    }

    #[test]
    fn test_optional_param() {
        let pattern = compile("/post/:slug?");
        assert_eq!(pattern.captures("/post/intro"), Some(vec![Some("intro")]));
        assert_eq!(pattern.captures("/post"), Some(vec![None]));
    }

    #[test]
    fn test_repeated_params() {
        let star = compile("/tags/:tag*");
        assert_eq!(star.captures("/tags"), Some(vec![None]));
        assert_eq!(star.captures("/tags/a/b"), Some(vec![Some("a/b")]));

        let plus = compile("/tags/:tag+");
        assert!(!plus.matches("/tags"));
        assert_eq!(plus.captures("/tags/a/b/c"), Some(vec![Some("a/b/c")]));
    }

    #[test]
    fn test_catch_all() {
        let pattern = compile("/static/*");
        assert_eq!(pattern.keys(), ["0"]);
        assert_eq!(
            pattern.captures("/static/css/site.css"),
            Some(vec![Some("css/site.css")])
        );
    }

    #[test]
    fn test_escaped_characters() {
        let pattern = compile("/price\\:usd");
        assert!(pattern.keys().is_empty());
        assert!(pattern.matches("/price:usd"));
    }

    #[test]
    fn test_options() {
        let sensitive = MatchingConfig {
            sensitive: true,
            ..MatchingConfig::default()
        };
        let pattern = PathPattern::new("/Home", &sensitive).unwrap();
        assert!(pattern.matches("/Home"));
        assert!(!pattern.matches("/home"));

        let strict = MatchingConfig {
            strict: true,
            ..MatchingConfig::default()
        };
        let pattern = PathPattern::new("/home", &strict).unwrap();
        assert!(pattern.matches("/home"));
        assert!(!pattern.matches("/home/"));

        let prefix = MatchingConfig {
            end: false,
            ..MatchingConfig::default()
        };
        let pattern = PathPattern::new("/api", &prefix).unwrap();
        assert!(pattern.matches("/api"));
        assert!(pattern.matches("/api/v1/users"));
        assert!(!pattern.matches("/apiary"));
    }

    #[test]
    fn test_compile_errors() {
        let options = MatchingConfig::default();
        assert!(matches!(
            PathPattern::new("/user/:", &options),
            Err(PatternError::MissingName { position: 6 })
        ));
        assert!(matches!(
            PathPattern::new("/user/:id(\\d+", &options),
            Err(PatternError::UnbalancedGroup { .. })
        ));
        assert!(matches!(
            PathPattern::new("/user/()", &options),
            Err(PatternError::EmptyGroup { .. })
        ));
        assert!(matches!(
            PathPattern::new("/user/:id((a)b)", &options),
            Err(PatternError::CapturingGroup { .. })
        ));
    }

    #[test]
    fn test_compiler_trait_object() {
        let compiler = PathCompiler::default();
        let matcher = compiler.compile("hello/:name").unwrap();
        assert_eq!(matcher.keys(), ["name"]);
        assert!(matcher.matches("hello/world"));
    }
}
