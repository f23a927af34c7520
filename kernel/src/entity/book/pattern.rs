use crate::entity::BookName;

/// A `LIKE` pattern matched against [`BookName`]s.
///
/// `%` matches any run of characters, `_` exactly one, and `\` makes the next
/// character literal. Matching is case-sensitive.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookNamePattern(String);

impl BookNamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Substring search. The fragment is not escaped, wildcards in it stay live.
    pub fn contains(fragment: impl AsRef<str>) -> Self {
        Self(format!("%{}%", fragment.as_ref()))
    }

    pub fn is_match(&self, name: &BookName) -> bool {
        let tokens = tokenize(&self.0);
        let name: &String = name.as_ref();
        let text = name.chars().collect::<Vec<_>>();

        let (mut t, mut p) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;
        while t < text.len() {
            match tokens.get(p) {
                Some(Token::One) => {
                    t += 1;
                    p += 1;
                    continue;
                }
                Some(Token::Literal(c)) if *c == text[t] => {
                    t += 1;
                    p += 1;
                    continue;
                }
                Some(Token::Any) => {
                    backtrack = Some((p, t));
                    p += 1;
                    continue;
                }
                _ => {}
            }
            match backtrack {
                Some((any, from)) => {
                    p = any + 1;
                    t = from + 1;
                    backtrack = Some((any, from + 1));
                }
                None => return false,
            }
        }
        tokens[p..].iter().all(|token| matches!(token, Token::Any))
    }
}

impl AsRef<str> for BookNamePattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

enum Token {
    Any,
    One,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut chars = pattern.chars();
    let mut tokens = Vec::new();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => Token::Any,
            '_' => Token::One,
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            c => Token::Literal(c),
        };
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
mod test {
    use super::BookNamePattern;
    use crate::entity::BookName;

    fn matches(pattern: &BookNamePattern, name: &str) -> bool {
        pattern.is_match(&BookName::new(name))
    }

    #[test]
    fn contains_wraps_fragment() {
        assert_eq!(BookNamePattern::contains("une").as_ref(), "%une%");
    }

    #[test]
    fn substring_search() {
        let pattern = BookNamePattern::contains("und");
        assert!(matches(&pattern, "Foundation"));
        assert!(matches(&pattern, "und"));
        assert!(!matches(&pattern, "Dune"));
        assert!(!matches(&pattern, "FOUNDATION"));
    }

    #[test]
    fn empty_fragment_matches_everything() {
        let pattern = BookNamePattern::contains("");
        assert!(matches(&pattern, ""));
        assert!(matches(&pattern, "Dune"));
    }

    #[test]
    fn wildcards() {
        assert!(matches(&BookNamePattern::new("D_ne"), "Dune"));
        assert!(!matches(&BookNamePattern::new("D_ne"), "Duune"));
        assert!(matches(&BookNamePattern::new("F%n"), "Foundation"));
        assert!(!matches(&BookNamePattern::new("F%x"), "Foundation"));
        assert!(matches(&BookNamePattern::new("%a%i%"), "Foundation"));
    }

    #[test]
    fn escaped_wildcards_are_literal() {
        let pattern = BookNamePattern::new(r"100\%");
        assert!(matches(&pattern, "100%"));
        assert!(!matches(&pattern, "1000"));
    }
}
