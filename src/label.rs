//! Free-text labels for nodes and edges.
//!
//! A label doubles as a cost whenever its whole text is an integer, which is how weighted
//! graphs are expressed (see [`Kruskal`](crate::algo::Kruskal)).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns *true* if the complete text is a (signed) integer
    pub fn is_cost(&self) -> bool {
        self.cost().is_some()
    }

    /// Returns the integer value of the label if the complete text is an integer
    pub fn cost(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    /// Parses a leading (signed) integer and ignores everything after it.
    /// Texts without a leading integer evaluate to `0`.
    pub fn lenient_cost(&self) -> i64 {
        let text = self.0.trim_start();
        let (sign, digits) = match text.as_bytes().first() {
            Some(b'-') => (-1, &text[1..]),
            Some(b'+') => (1, &text[1..]),
            _ => (1, text),
        };

        sign * digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0i64, |acc, d| {
                acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
            })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

macro_rules! label_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Label {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

label_from_integer!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_detection() {
        assert!(Label::from(42).is_cost());
        assert!(Label::from("-7").is_cost());
        assert!(!Label::from("7a").is_cost());
        assert!(!Label::from("").is_cost());
        assert_eq!(Label::from("13").cost(), Some(13));
    }

    #[test]
    fn lenient_cost_behaves_like_atoi() {
        assert_eq!(Label::from("12abc").lenient_cost(), 12);
        assert_eq!(Label::from("  -3").lenient_cost(), -3);
        assert_eq!(Label::from("abc").lenient_cost(), 0);
        assert_eq!(Label::from("").lenient_cost(), 0);
        assert_eq!(Label::from("+5").lenient_cost(), 5);
    }
}
