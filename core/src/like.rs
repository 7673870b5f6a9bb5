use regex::Regex;

use crate::error::{Error, Result};

/// A compiled SQL `LIKE` pattern: `%` matches any run of characters, `_` exactly one, and `\`
/// escapes the next character. Matching is anchored and case-sensitive, as in PostgreSQL.
#[derive(Clone, Debug)]
pub struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut expr = String::from("(?s)^");
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                '\\' => match chars.next() {
                    Some(escaped) => expr.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4]))),
                    None => return Err(Error::Config(format!("LIKE pattern '{}' must not end with the escape character", pattern))),
                },
                c => expr.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');
        let regex = Regex::new(&expr).map_err(|e| Error::Config(e.to_string()))?;
        Ok(LikePattern { regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}
