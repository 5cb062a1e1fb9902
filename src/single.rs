use crate::{pair::Pair, EmptyValueError};

/// A single optional value with chainable combinators. Absence is
/// absorbing: once empty, downstream transformations are skipped and
/// their callbacks never run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct Single<C> {
    #[cfg_attr(feature = "minicbor", n(0))]
    value: Option<C>,
}

impl<C> Single<C> {
    /// Wraps a value that is known to be present.
    pub const fn new(value: C) -> Self {
        Self { value: Some(value) }
    }

    /// Present iff the given `Option` is `Some`.
    pub const fn from_option(value: Option<C>) -> Self {
        Self { value }
    }

    /// A container holding nothing. Stateless and free to construct.
    pub const fn empty() -> Self {
        Self { value: None }
    }

    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the held value, or [`EmptyValueError`] if there is none.
    pub fn get(self) -> Result<C, EmptyValueError> {
        self.value.ok_or(EmptyValueError::Value)
    }

    /// Returns the held value, or the lazily built error if there is
    /// none.
    pub fn get_or<E>(self, err: impl FnOnce() -> E) -> Result<C, E> {
        self.value.ok_or_else(err)
    }

    pub fn into_option(self) -> Option<C> {
        self.value
    }

    /// Returns the held value, or the given fallback.
    pub fn unwrap_or(self, fallback: C) -> C {
        self.value.unwrap_or(fallback)
    }

    /// Returns the held value, or computes one. The supplier runs only
    /// when the container is empty.
    pub fn unwrap_or_else(self, supply: impl FnOnce() -> C) -> C {
        self.value.unwrap_or_else(supply)
    }

    /// Starts tracking a second value alongside this one. The resulting
    /// pair is aggregate-present only if this container is present.
    pub fn and<D>(self, second: D) -> Pair<C, D> {
        match self.value {
            Some(first) => Pair::from_options(Some(first), Some(second)),
            None => Pair::empty(),
        }
    }

    /// Like [`Single::and`], with a second value that may be missing.
    pub fn and_option<D>(self, second: Option<D>) -> Pair<C, D> {
        match self.value {
            Some(first) => Pair::from_options(Some(first), second),
            None => Pair::empty(),
        }
    }

    /// Computes the second value from the first. `f` never runs when
    /// this container is empty, side effects included.
    pub fn and_with<D>(self, f: impl FnOnce(&C) -> D) -> Pair<C, D> {
        match self.value {
            Some(first) => {
                let second = f(&first);
                Pair::from_options(Some(first), Some(second))
            }
            None => Pair::empty(),
        }
    }

    /// Like [`Single::and_with`], for computations that may come up
    /// empty.
    pub fn and_with_option<D>(self, f: impl FnOnce(&C) -> Option<D>) -> Pair<C, D> {
        match self.value {
            Some(first) => {
                let second = f(&first);
                Pair::from_options(Some(first), second)
            }
            None => Pair::empty(),
        }
    }

    /// Like [`Single::and_with`], for fallible computations. The
    /// caller's error is returned as-is; an empty container
    /// short-circuits to an empty pair without running `f`.
    pub fn try_and_with<D, E>(self, f: impl FnOnce(&C) -> Result<D, E>) -> Result<Pair<C, D>, E> {
        match self.value {
            Some(first) => {
                let second = f(&first)?;
                Ok(Pair::from_options(Some(first), Some(second)))
            }
            None => Ok(Pair::empty()),
        }
    }

    /// Keeps this container when present, otherwise holds `fallback`.
    pub fn or_value(self, fallback: C) -> Self {
        match self.value {
            Some(_) => self,
            None => Self::new(fallback),
        }
    }

    /// Keeps this container when present, otherwise computes a
    /// replacement. The supplier runs only on the empty path.
    pub fn or_else(self, supply: impl FnOnce() -> C) -> Self {
        match self.value {
            Some(_) => self,
            None => Self::new(supply()),
        }
    }

    /// Keeps this container when present, otherwise uses `fallback`.
    pub fn or(self, fallback: Single<C>) -> Self {
        match self.value {
            Some(_) => self,
            None => fallback,
        }
    }

    /// Keeps this container when present, otherwise pulls a replacement
    /// from a source that may itself come up empty.
    pub fn or_else_option(self, supply: impl FnOnce() -> Option<C>) -> Self {
        match self.value {
            Some(_) => self,
            None => Self::from_option(supply()),
        }
    }

    /// Transforms the held value. Empty containers pass through
    /// untouched and `f` never runs for them.
    pub fn map<B>(self, f: impl FnOnce(C) -> B) -> Single<B> {
        Single {
            value: self.value.map(f),
        }
    }

    /// Like [`Single::map`], for fallible transformations; the caller's
    /// error is returned as-is.
    pub fn try_map<B, E>(self, f: impl FnOnce(C) -> Result<B, E>) -> Result<Single<B>, E> {
        match self.value {
            Some(value) => Ok(Single::new(f(value)?)),
            None => Ok(Single::empty()),
        }
    }

    /// Transforms the held value with a computation that may come up
    /// empty.
    pub fn flat_map<B>(self, f: impl FnOnce(C) -> Option<B>) -> Single<B> {
        Single {
            value: self.value.and_then(f),
        }
    }

    /// Keeps the value only if the predicate holds for it. The
    /// predicate is skipped on empty containers.
    pub fn filter(self, predicate: impl FnOnce(&C) -> bool) -> Self {
        Self {
            value: self.value.filter(predicate),
        }
    }

    /// Lets `f` observe the value when present. Returns the container
    /// unchanged either way.
    pub fn if_present(self, f: impl FnOnce(&C)) -> Self {
        if let Some(value) = &self.value {
            f(value);
        }
        self
    }

    /// Runs `f` when the container is empty. Returns the container
    /// unchanged either way.
    pub fn if_empty(self, f: impl FnOnce()) -> Self {
        if self.value.is_none() {
            f();
        }
        self
    }

    pub fn if_present_or_else(self, f: impl FnOnce(&C), or_else: impl FnOnce()) -> Self {
        match &self.value {
            Some(value) => f(value),
            None => or_else(),
        }
        self
    }

    /// Chainable presence assertion.
    pub fn require(self) -> Result<Self, EmptyValueError> {
        self.require_with(|| EmptyValueError::Value)
    }

    /// Chainable presence assertion with a caller-chosen error. The
    /// supplier runs only when the container is empty.
    pub fn require_with<E>(self, err: impl FnOnce() -> E) -> Result<Self, E> {
        match self.value {
            Some(_) => Ok(self),
            None => Err(err()),
        }
    }
}

impl<C> From<Option<C>> for Single<C> {
    fn from(value: Option<C>) -> Self {
        Self { value }
    }
}

impl<C> From<Single<C>> for Option<C> {
    fn from(single: Single<C>) -> Self {
        single.value
    }
}

#[cfg(test)]
use core::cell::Cell;

#[test]
fn check_laws() {
    crate::partially_verify_presence_laws([Single::empty(), Single::new(0), Single::new(5)]);
}

#[test]
fn map_applies_to_present_values() {
    assert_eq!(Single::new(4).map(|x| x * 2).get(), Ok(8));
    assert_eq!(Single::new("Cora").map(str::len).get(), Ok(4));
}

#[test]
fn empty_skips_callbacks() {
    let calls = Cell::new(0);
    let observed = Single::<i32>::empty()
        .map(|x| {
            calls.set(calls.get() + 1);
            x
        })
        .flat_map(|x| {
            calls.set(calls.get() + 1);
            Some(x)
        })
        .filter(|_| {
            calls.set(calls.get() + 1);
            true
        })
        .and_with(|x| {
            calls.set(calls.get() + 1);
            *x
        });
    assert!(observed.is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn fallbacks_fill_only_the_empty_path() {
    assert_eq!(Single::empty().or_value("b").get(), Ok("b"));
    assert_eq!(Single::new("a").or_value("b").get(), Ok("a"));
    assert_eq!(Single::new("a").or(Single::new("b")).get(), Ok("a"));
    assert_eq!(Single::empty().or(Single::new("b")).get(), Ok("b"));

    // A present value must never evaluate the supplier.
    let kept = Single::new(1).or_else(|| unreachable!());
    assert_eq!(kept.get(), Ok(1));

    assert_eq!(Single::empty().or_else(|| 2).get(), Ok(2));
    assert_eq!(Single::empty().or_else_option(|| Some(3)).get(), Ok(3));
    assert!(Single::<i32>::empty().or_else_option(|| None).is_empty());
}

#[test]
fn filter_then_map_chain() {
    let length = Single::new("Cora")
        .filter(|name| !name.is_empty())
        .map(str::len);
    assert_eq!(length.get(), Ok(4));

    assert!(Single::new("Cora").filter(|name| name.len() > 10).is_empty());
    assert_eq!(
        Single::new("Cora").flat_map(|name| name.chars().next()).get(),
        Ok('C')
    );
}

#[test]
fn get_and_require_report_absence() {
    assert_eq!(Single::<i32>::empty().get(), Err(EmptyValueError::Value));
    assert_eq!(Single::<i32>::empty().require(), Err(EmptyValueError::Value));
    assert_eq!(Single::new(7).require().and_then(Single::get), Ok(7));
    assert_eq!(Single::<i32>::empty().get_or(|| "gone"), Err("gone"));
    assert_eq!(Single::new(7).unwrap_or(0), 7);
    assert_eq!(Single::empty().unwrap_or(0), 0);
}

#[test]
fn try_callbacks_pass_errors_through() {
    assert_eq!(
        Single::new(2).try_map(|x| Ok::<_, ()>(x + 1)).map(Single::get),
        Ok(Ok(3))
    );
    assert_eq!(Single::new(2).try_map(|_| Err::<i32, _>("boom")), Err("boom"));

    // An empty container never runs the fallible computation.
    let skipped = Single::<i32>::empty().try_map(|_| Err::<i32, _>("boom"));
    assert_eq!(skipped, Ok(Single::empty()));
}

#[test]
fn side_effect_chain_keeps_the_container() {
    let seen = Cell::new(0);
    let kept = Single::new(9)
        .if_present(|x| seen.set(*x))
        .if_empty(|| seen.set(-1));
    assert_eq!(seen.get(), 9);
    assert_eq!(kept.get(), Ok(9));

    Single::<i32>::empty().if_present_or_else(|_| seen.set(-2), || seen.set(100));
    assert_eq!(seen.get(), 100);
}
