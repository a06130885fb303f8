//! String tokenizer for natural ("human") and version ordering.
//!
//! A string is split left to right into maximal runs:
//!
//! 1. digits, one `.`, digits: a [`Token::Float`] (natural mode only),
//! 2. digits: a [`Token::Integer`],
//! 3. anything else: a [`Token::Text`].
//!
//! Every token keeps the substring it was parsed from, so joining [`Token::as_str`]
//! over the output always gives back the input.
//!
//! ```
//! use keysort::token::{tokenize, Token};
//!
//! let tokens: Vec<Token> = tokenize("v2.10-rc3").collect();
//! assert_eq!(tokens[0], Token::Text("v"));
//! assert_eq!(tokens[1].as_str(), "2.10");
//! assert_eq!(tokens.iter().map(Token::as_str).collect::<String>(), "v2.10-rc3");
//! ```

use std::cmp::Ordering;
use std::ops::Range;

/// One run of a tokenized string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    Integer { value: i64, source: &'a str },
    Float { value: f64, source: &'a str },
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// The exact substring this token was parsed from.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Integer { source, .. } | Token::Float { source, .. } => source,
            Token::Text(text) => text,
        }
    }

    /// Total order over tokens.
    ///
    /// Text compares bytewise, numbers compare by exact numeric value (an integer
    /// against a float is never rounded), and any number sorts before any text.
    pub fn compare(&self, other: &Token<'_>) -> Ordering {
        match (*self, *other) {
            (Token::Text(a), Token::Text(b)) => a.cmp(b),
            (Token::Integer { value: a, .. }, Token::Integer { value: b, .. }) => a.cmp(&b),
            (Token::Integer { value: a, .. }, Token::Float { value: b, .. }) => {
                cmp_int_float(a, b)
            }
            (Token::Float { value: a, .. }, Token::Integer { value: b, .. }) => {
                cmp_int_float(b, a).reverse()
            }
            (Token::Float { value: a, .. }, Token::Float { value: b, .. }) => cmp_floats(a, b),
            (Token::Text(_), _) => Ordering::Greater,
            (_, Token::Text(_)) => Ordering::Less,
        }
    }
}

/// `f64::total_cmp`, except that `-0.0` and `0.0` are equal.
///
/// Both zeros equal the integer `0`, so they must equal each other as well.
pub(crate) fn cmp_floats(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Compares an integer with a float by exact value, consistent with [`cmp_floats`].
///
/// Casting the integer to `f64` would round above 2^53 and make equivalence
/// non-transitive, so the float's integer part is compared as an `i64` instead.
pub(crate) fn cmp_int_float(a: i64, b: f64) -> Ordering {
    // 2^63: the first float above every i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        // total_cmp puts negative NaNs below every number and positive NaNs above.
        return if b.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }

    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = b - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        unequal => unequal,
    }
}

/// Which numeric runs the tokenizer recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Integers and `digits.digits` floats.
    #[default]
    Natural,
    /// Integers only; a `.` is always text.
    Version,
}

/// Tokenizes `s` for natural ordering.
pub fn tokenize(s: &str) -> Tokenizer<'_> {
    Tokenizer::new(s, Mode::Natural)
}

/// Tokenizes `s` for version ordering.
pub fn tokenize_version(s: &str) -> Tokenizer<'_> {
    Tokenizer::new(s, Mode::Version)
}

/// Iterator over the tokens of a string.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    mode: Mode,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str, mode: Mode) -> Self {
        Self {
            input,
            pos: 0,
            mode,
        }
    }

    /// Returns the span of the next run and whether it holds a decimal point.
    fn next_span(&mut self) -> Option<(Range<usize>, RunKind)> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let mut end = start;
        let kind = if bytes[start].is_ascii_digit() {
            end = skip_digits(bytes, end);
            let fractional = self.mode == Mode::Natural
                && end + 1 < bytes.len()
                && bytes[end] == b'.'
                && bytes[end + 1].is_ascii_digit();
            if fractional {
                end = skip_digits(bytes, end + 1);
                RunKind::Float
            } else {
                RunKind::Integer
            }
        } else {
            // ASCII digits never occur inside a multi-byte UTF-8 sequence, so `end`
            // always lands on a char boundary.
            while end < bytes.len() && !bytes[end].is_ascii_digit() {
                end += 1;
            }
            RunKind::Text
        };

        self.pos = end;
        Some((start..end, kind))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunKind {
    Integer,
    Float,
    Text,
}

fn skip_digits(bytes: &[u8], mut at: usize) -> usize {
    while at < bytes.len() && bytes[at].is_ascii_digit() {
        at += 1;
    }
    at
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, kind) = self.next_span()?;
        Some(make_token(&self.input[span], kind))
    }
}

/// Builds a token from a run the tokenizer already classified.
///
/// Integer runs too large for `i64` fall back to a float of the same digits.
pub(crate) fn make_token(source: &str, kind: RunKind) -> Token<'_> {
    match kind {
        RunKind::Text => Token::Text(source),
        RunKind::Integer => match source.parse::<i64>() {
            Ok(value) => Token::Integer { value, source },
            Err(_) => Token::Float {
                value: parse_digits(source),
                source,
            },
        },
        RunKind::Float => Token::Float {
            value: parse_digits(source),
            source,
        },
    }
}

fn parse_digits(source: &str) -> f64 {
    // Runs are ASCII digits with at most one interior '.', always valid f64 syntax.
    source.parse().unwrap_or(f64::INFINITY)
}

/// The parsed content of one run, stored next to its span.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Parsed {
    Integer(i64),
    Float(f64),
    Text,
}

/// An owned string, tokenized once.
///
/// Natural and version policies build these during normalization, parsing every numeric
/// run a single time, and then compare them many times during the sort without
/// parsing again.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenizedKey {
    text: String,
    runs: Vec<(Range<usize>, Parsed)>,
}

impl TokenizedKey {
    pub fn new(text: String, mode: Mode) -> Self {
        let mut tokenizer = Tokenizer::new(&text, mode);
        let mut runs = Vec::new();
        while let Some((span, kind)) = tokenizer.next_span() {
            let parsed = match make_token(&text[span.clone()], kind) {
                Token::Integer { value, .. } => Parsed::Integer(value),
                Token::Float { value, .. } => Parsed::Float(value),
                Token::Text(_) => Parsed::Text,
            };
            runs.push((span, parsed));
        }
        Self { text, runs }
    }

    /// The key text, as rendered by the policy.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.runs.iter().map(|(span, parsed)| {
            let source = &self.text[span.clone()];
            match *parsed {
                Parsed::Integer(value) => Token::Integer { value, source },
                Parsed::Float(value) => Token::Float { value, source },
                Parsed::Text => Token::Text(source),
            }
        })
    }

    /// Compares token by token; when one key is a prefix of the other, the shorter
    /// key sorts first.
    pub fn compare(&self, other: &TokenizedKey) -> Ordering {
        let mut left = self.tokens();
        let mut right = other.tokens();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) => match a.compare(&b) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (None, None) => return Ordering::Equal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strs(s: &str, mode: Mode) -> Vec<&str> {
        Tokenizer::new(s, mode).map(|t| t.as_str()).collect()
    }

    #[test]
    fn splits_numeric_and_text_runs() {
        assert_eq!(strs("item-10", Mode::Natural), vec!["item-", "10"]);
        assert_eq!(strs("2.30kg", Mode::Natural), vec!["2.30", "kg"]);
        assert_eq!(strs("1.2.3", Mode::Natural), vec!["1.2", ".", "3"]);
        assert_eq!(strs("1.2.3", Mode::Version), vec!["1", ".", "2", ".", "3"]);
        assert_eq!(strs("a.b", Mode::Natural), vec!["a.b"]);
        assert_eq!(strs("7.", Mode::Natural), vec!["7", "."]);
        assert!(strs("", Mode::Natural).is_empty());
    }

    #[test]
    fn classifies_tokens() {
        let tokens: Vec<Token> = tokenize("x007y2.5").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("x"),
                Token::Integer {
                    value: 7,
                    source: "007"
                },
                Token::Text("y"),
                Token::Float {
                    value: 2.5,
                    source: "2.5"
                },
            ]
        );
    }

    #[test]
    fn oversized_integer_becomes_float() {
        let digits = "123456789012345678901234567890";
        let token = tokenize(digits).next().unwrap();
        assert!(matches!(token, Token::Float { .. }));
        assert_eq!(token.as_str(), digits);
    }

    #[test]
    fn numbers_sort_before_text() {
        let n = Token::Integer {
            value: 999,
            source: "999",
        };
        let t = Token::Text("!");
        assert_eq!(n.compare(&t), Ordering::Less);
        assert_eq!(t.compare(&n), Ordering::Greater);

        let f = Token::Float {
            value: 2.5,
            source: "2.5",
        };
        let i = Token::Integer {
            value: 2,
            source: "2",
        };
        assert_eq!(i.compare(&f), Ordering::Less);
        assert_eq!(f.compare(&i), Ordering::Greater);
    }

    #[test]
    fn version_tokenizer_keeps_dots_as_text() {
        let tokens: Vec<Token> = tokenize_version("10.2-rc1").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Integer {
                    value: 10,
                    source: "10"
                },
                Token::Text("."),
                Token::Integer {
                    value: 2,
                    source: "2"
                },
                Token::Text("-rc"),
                Token::Integer {
                    value: 1,
                    source: "1"
                },
            ]
        );
        let joined: String = tokenize_version("v1.0.12b").map(|t| t.as_str()).collect();
        assert_eq!(joined, "v1.0.12b");
    }

    #[test]
    fn integer_against_float_is_exact() {
        let big = 1i64 << 53;
        let int = |value: i64| Token::Integer { value, source: "" };
        let float = |value: f64| Token::Float { value, source: "" };

        // 2^53 + 1 rounds to 2^53 as f64, but it is still greater.
        assert_eq!(int(big + 1).compare(&float(big as f64)), Ordering::Greater);
        assert_eq!(float(big as f64).compare(&int(big + 1)), Ordering::Less);
        assert_eq!(int(big).compare(&float(big as f64)), Ordering::Equal);

        assert_eq!(int(2).compare(&float(2.5)), Ordering::Less);
        assert_eq!(int(-3).compare(&float(-2.5)), Ordering::Less);
        assert_eq!(int(-2).compare(&float(-2.5)), Ordering::Greater);
        assert_eq!(int(i64::MAX).compare(&float(9.3e18)), Ordering::Less);
        assert_eq!(int(i64::MIN).compare(&float(-9.3e18)), Ordering::Greater);
        assert_eq!(int(i64::MAX).compare(&float(f64::INFINITY)), Ordering::Less);
        assert_eq!(int(0).compare(&float(f64::NAN)), Ordering::Less);
        assert_eq!(int(0).compare(&float(-0.0)), Ordering::Equal);
        assert_eq!(float(-0.0).compare(&float(0.0)), Ordering::Equal);
    }

    #[test]
    fn mixed_numeric_tokens_are_transitive() {
        let mut rng = StdRng::seed_from_u64(11);
        let big = 1i64 << 53;
        let mut pool: Vec<Token> = Vec::new();
        for _ in 0..40 {
            let offset = rng.random_range(-3..=3);
            pool.push(Token::Integer {
                value: big + offset,
                source: "",
            });
            pool.push(Token::Float {
                value: (big + offset) as f64,
                source: "",
            });
            let small = rng.random_range(-5..5);
            pool.push(Token::Integer {
                value: small,
                source: "",
            });
            pool.push(Token::Float {
                value: small as f64 + 0.5,
                source: "",
            });
        }

        for a in &pool {
            assert_eq!(a.compare(a), Ordering::Equal);
            for b in &pool {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                for c in &pool {
                    let ab = a.compare(b);
                    if ab != Ordering::Greater && b.compare(c) == ab {
                        assert_eq!(a.compare(c), ab, "{a:?} {b:?} {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn tokenized_key_keeps_its_text() {
        let key = TokenizedKey::new("file10.txt".into(), Mode::Natural);
        assert_eq!(key.as_str(), "file10.txt");
        assert_eq!(
            key.tokens().nth(1),
            Some(Token::Integer {
                value: 10,
                source: "10"
            })
        );
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let a = TokenizedKey::new("file".into(), Mode::Natural);
        let b = TokenizedKey::new("file1".into(), Mode::Natural);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&b.clone()), Ordering::Equal);
    }

    #[test]
    fn round_trip_random_strings() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet: Vec<char> = "0123456789..-_abcXYZ é日".chars().collect();

        for _ in 0..2_000 {
            let len = rng.random_range(0..24);
            let s: String = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();

            for mode in [Mode::Natural, Mode::Version] {
                let joined: String = Tokenizer::new(&s, mode).map(|t| t.as_str()).collect();
                assert_eq!(joined, s);

                let key = TokenizedKey::new(s.clone(), mode);
                let joined: String = key.tokens().map(|t| t.as_str()).collect();
                assert_eq!(joined, s);
            }
        }
    }
}
