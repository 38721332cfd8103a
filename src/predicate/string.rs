//! String predicates
//!
//! Each predicate only matches [`Value::Str`]; any other value fails.

use super::combinators::Predicate;
use crate::Value;

/// Predicate that checks if a string starts with a prefix.
#[derive(Clone, Debug)]
pub struct StartsWith<S>(pub S);

impl<S: AsRef<str> + Send + Sync> Predicate<Value> for StartsWith<S> {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.starts_with(self.0.as_ref()))
    }
}

/// Create a predicate that checks if a string starts with prefix.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// assert!(starts_with("http").check(&Value::from("https://example.com")));
/// assert!(!starts_with("http").check(&Value::from("ftp://example.com")));
/// ```
pub fn starts_with<S: AsRef<str> + Send + Sync>(prefix: S) -> StartsWith<S> {
    StartsWith(prefix)
}

/// Predicate that checks if a string ends with a suffix.
#[derive(Clone, Debug)]
pub struct EndsWith<S>(pub S);

impl<S: AsRef<str> + Send + Sync> Predicate<Value> for EndsWith<S> {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.ends_with(self.0.as_ref()))
    }
}

/// Create a predicate that checks if a string ends with suffix.
pub fn ends_with<S: AsRef<str> + Send + Sync>(suffix: S) -> EndsWith<S> {
    EndsWith(suffix)
}

/// Predicate that checks if a string contains a substring.
#[derive(Clone, Debug)]
pub struct Contains<S>(pub S);

impl<S: AsRef<str> + Send + Sync> Predicate<Value> for Contains<S> {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.contains(self.0.as_ref()))
    }
}

/// Create a predicate that checks if a string contains substring.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// assert!(contains("@").check(&Value::from("user@example.com")));
/// assert!(!contains("@").check(&Value::from("invalid")));
/// ```
pub fn contains<S: AsRef<str> + Send + Sync>(substring: S) -> Contains<S> {
    Contains(substring)
}

/// Predicate that checks if all characters satisfy a predicate.
#[derive(Clone, Copy, Debug)]
pub struct AllChars<F>(pub F);

impl<F: Fn(char) -> bool + Send + Sync> Predicate<Value> for AllChars<F> {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.chars().all(&self.0))
    }
}

/// Create a predicate that checks if every character satisfies `f`.
///
/// An empty string satisfies it.
pub fn all_chars<F: Fn(char) -> bool + Send + Sync>(f: F) -> AllChars<F> {
    AllChars(f)
}

/// String contains only ASCII alphanumeric characters.
pub fn is_alphanumeric() -> AllChars<fn(char) -> bool> {
    AllChars(|c| c.is_ascii_alphanumeric())
}
