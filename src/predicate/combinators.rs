//! The predicate trait, logical combinators and the kind guard

use crate::{Kind, Value};

/// A check over values of type `T`, composable with [`PredicateExt`].
///
/// Validators are predicates over [`Value`](crate::Value); any
/// `Fn(&Value) -> bool + Send + Sync` closure is one.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::Value;
///
/// let small_positive = gt(0).and(lt(100));
/// assert!(small_positive.check(&Value::from(25)));
/// assert!(!small_positive.check(&Value::from(-5)));
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Whether `value` passes.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// `and` / `or` / `not` for every predicate.
///
/// Chains stay concrete types until they are shared into a validator.
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Both must pass.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtypes::predicate::*;
    /// use vtypes::Value;
    ///
    /// let p = gt(0).and(lt(100));
    /// assert!(p.check(&Value::from(50)));
    /// assert!(!p.check(&Value::from(100)));
    /// ```
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// At least one must pass.
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Passes exactly when `self` fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtypes::predicate::*;
    /// use vtypes::Value;
    ///
    /// let p = not_empty().not();
    /// assert!(p.check(&Value::from("")));
    /// assert!(!p.check(&Value::from("x")));
    /// ```
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// Result of [`PredicateExt::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// Result of [`PredicateExt::or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// Result of [`PredicateExt::not`].
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}

/// Passes values of one [`Kind`] (or one of its subkinds).
///
/// Structural types belong in the type's declared types; this guard is for
/// validators that only apply to some shapes, combined with `or`.
///
/// # Example
///
/// ```rust
/// use vtypes::predicate::*;
/// use vtypes::{Kind, Value};
///
/// // Strings must be short, anything else is accepted
/// let short_if_str = of_kind(Kind::Str).not().or(len_max(3));
/// assert!(short_if_str.check(&Value::from("abc")));
/// assert!(!short_if_str.check(&Value::from("abcd")));
/// assert!(short_if_str.check(&Value::from(12345)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OfKind(pub Kind);

impl Predicate<Value> for OfKind {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.0.accepts(value)
    }
}

/// Guard on the kind of a value.
pub fn of_kind(kind: Kind) -> OfKind {
    OfKind(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{gt, len_max, lt, not_empty};

    #[test]
    fn test_and() {
        let p = gt(0).and(lt(10));
        assert!(p.check(&Value::from(5)));
        assert!(!p.check(&Value::from(0)));
        assert!(!p.check(&Value::from(10)));
    }

    #[test]
    fn test_or() {
        let p = lt(0).or(gt(100));
        assert!(p.check(&Value::from(-5)));
        assert!(p.check(&Value::from(150)));
        assert!(!p.check(&Value::from(50)));
    }

    #[test]
    fn test_not() {
        let p = not_empty().not();
        assert!(p.check(&Value::from(Vec::<i32>::new())));
        assert!(!p.check(&Value::from(vec![1])));
        // Scalars have no length, so not_empty fails and not() passes
        assert!(p.check(&Value::from(1)));
    }

    #[test]
    fn test_closure_as_predicate() {
        let is_even = |v: &Value| v.as_i64().is_some_and(|i| i % 2 == 0);
        assert!(is_even.check(&Value::from(4)));
        assert!(!is_even.check(&Value::from(3)));

        let even_and_positive = is_even.and(gt(0));
        assert!(even_and_positive.check(&Value::from(4)));
        assert!(!even_and_positive.check(&Value::from(-4)));
    }

    #[test]
    fn test_of_kind() {
        assert!(of_kind(Kind::Number).check(&Value::from(true)));
        assert!(of_kind(Kind::Number).check(&Value::from(1.5)));
        assert!(!of_kind(Kind::Number).check(&Value::from("1")));

        let short_if_str = of_kind(Kind::Str).not().or(len_max(2));
        assert!(short_if_str.check(&Value::from(vec![1, 2, 3])));
        assert!(!short_if_str.check(&Value::from("abc")));
    }
}
