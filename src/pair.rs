use crate::{single::Single, EmptyValueError};

/// Two optional values tracked together. The pair as a whole counts as
/// present only when both slots are, and the first slot drives every
/// derivation: once it is empty, the second value is never computed
/// or backfilled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct Pair<C, D> {
    #[cfg_attr(feature = "minicbor", n(0))]
    first: Option<C>,
    #[cfg_attr(feature = "minicbor", n(1))]
    second: Option<D>,
}

impl<C, D> Pair<C, D> {
    /// Wraps two values that are known to be present.
    pub const fn new(first: C, second: D) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    /// Each slot is present iff the matching `Option` is `Some`.
    pub const fn from_options(first: Option<C>, second: Option<D>) -> Self {
        Self { first, second }
    }

    /// A pair holding nothing. Stateless and free to construct.
    pub const fn empty() -> Self {
        Self {
            first: None,
            second: None,
        }
    }

    /// True only when both slots hold a value.
    pub const fn is_present(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// True when either slot is missing its value.
    pub const fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// Returns both values, or [`EmptyValueError`] if either is
    /// missing.
    pub fn get(self) -> Result<(C, D), EmptyValueError> {
        self.first.zip(self.second).ok_or(EmptyValueError::Pair)
    }

    /// Returns the first value. Only its own slot is checked, so this
    /// can succeed while the pair as a whole is empty.
    pub fn get_first(self) -> Result<C, EmptyValueError> {
        self.first.ok_or(EmptyValueError::First)
    }

    /// Returns the second value. Only its own slot is checked.
    pub fn get_second(self) -> Result<D, EmptyValueError> {
        self.second.ok_or(EmptyValueError::Second)
    }

    /// Returns both values, or the lazily built error if either is
    /// missing.
    pub fn get_or<E>(self, err: impl FnOnce() -> E) -> Result<(C, D), E> {
        self.first.zip(self.second).ok_or_else(err)
    }

    /// Both values zipped into the plain optional form.
    pub fn into_option(self) -> Option<(C, D)> {
        self.first.zip(self.second)
    }

    /// Best-effort tuple: each missing slot is replaced by its
    /// fallback, independently of the other.
    pub fn unwrap_or(self, first: C, second: D) -> (C, D) {
        (self.first.unwrap_or(first), self.second.unwrap_or(second))
    }

    /// Best-effort tuple with computed fallbacks; each supplier runs
    /// only when its own slot is empty.
    pub fn unwrap_or_else(self, first: impl FnOnce() -> C, second: impl FnOnce() -> D) -> (C, D) {
        (
            self.first.unwrap_or_else(first),
            self.second.unwrap_or_else(second),
        )
    }

    /// Backfills the second slot from `fallback` when it is empty. The
    /// first slot drives: when it is empty the whole pair collapses to
    /// empty and the fallback is discarded.
    pub fn or(self, fallback: Single<D>) -> Self {
        if self.first.is_none() {
            return Self::empty();
        }
        if self.second.is_some() {
            self
        } else {
            Self {
                second: fallback.into_option(),
                ..self
            }
        }
    }

    /// Backfills the second slot with a literal value. Same first-slot
    /// rule as [`Pair::or`].
    pub fn or_value(self, fallback: D) -> Self {
        if self.first.is_none() {
            return Self::empty();
        }
        if self.second.is_some() {
            self
        } else {
            Self {
                second: Some(fallback),
                ..self
            }
        }
    }

    /// Backfills the second slot with a computed value. The supplier
    /// runs only when the first slot is present and the second is
    /// empty.
    pub fn or_else(self, supply: impl FnOnce() -> D) -> Self {
        if self.first.is_none() {
            return Self::empty();
        }
        if self.second.is_some() {
            self
        } else {
            Self {
                second: Some(supply()),
                ..self
            }
        }
    }

    /// Backfills the second slot from a source that may itself come up
    /// empty. Same evaluation rule as [`Pair::or_else`].
    pub fn or_else_option(self, supply: impl FnOnce() -> Option<D>) -> Self {
        if self.first.is_none() {
            return Self::empty();
        }
        if self.second.is_some() {
            self
        } else {
            Self {
                second: supply(),
                ..self
            }
        }
    }

    /// Transforms each slot with its own mapper, only when the pair is
    /// aggregate-present. Neither mapper runs otherwise.
    pub fn map<A, E>(self, first: impl FnOnce(C) -> A, second: impl FnOnce(D) -> E) -> Pair<A, E> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Pair::new(first(a), second(b)),
            _ => Pair::empty(),
        }
    }

    /// Like [`Pair::map`], except both mappers get to see both current
    /// values, for derivations that cross-reference the slots.
    pub fn map_with<A, E>(
        self,
        first: impl FnOnce(&C, &D) -> A,
        second: impl FnOnce(&C, &D) -> E,
    ) -> Pair<A, E> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => {
                let mapped_first = first(&a, &b);
                let mapped_second = second(&a, &b);
                Pair::new(mapped_first, mapped_second)
            }
            _ => Pair::empty(),
        }
    }

    /// Transforms each slot with a mapper that may come up empty. The
    /// mappers run only when the pair is aggregate-present; each may
    /// still leave its own slot of the result empty.
    pub fn flat_map<A, E>(
        self,
        first: impl FnOnce(C) -> Option<A>,
        second: impl FnOnce(D) -> Option<E>,
    ) -> Pair<A, E> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Pair::from_options(first(a), second(b)),
            _ => Pair::empty(),
        }
    }

    /// Keeps the pair only if the predicate holds over both values. A
    /// failing predicate collapses both slots; an already-empty pair
    /// is returned unchanged, partial slot included.
    pub fn filter(self, predicate: impl FnOnce(&C, &D) -> bool) -> Self {
        let keep = match (self.first.as_ref(), self.second.as_ref()) {
            (Some(first), Some(second)) => predicate(first, second),
            // One slot already empty; nothing to test.
            _ => true,
        };
        if keep {
            self
        } else {
            Self::empty()
        }
    }

    /// Collapses both values into one result, handed back in the plain
    /// optional form. An empty pair reduces to `None` without running
    /// the combiner.
    pub fn reduce<E>(self, f: impl FnOnce(C, D) -> E) -> Option<E> {
        self.into_option().map(|(first, second)| f(first, second))
    }

    /// Like [`Pair::reduce`], for combiners that may themselves come
    /// up empty.
    pub fn flat_map_reduce<E>(self, f: impl FnOnce(C, D) -> Option<E>) -> Option<E> {
        self.into_option().and_then(|(first, second)| f(first, second))
    }

    /// Like [`Pair::reduce`], for fallible combiners. The caller's
    /// error is returned as-is; an empty pair is `Ok(None)` and the
    /// combiner never runs for it.
    pub fn try_reduce<E, X>(self, f: impl FnOnce(C, D) -> Result<E, X>) -> Result<Option<E>, X> {
        match self.into_option() {
            Some((first, second)) => f(first, second).map(Some),
            None => Ok(None),
        }
    }

    /// Lets `f` observe both values when the pair is aggregate-present.
    /// Returns the pair unchanged either way.
    pub fn if_present(self, f: impl FnOnce(&C, &D)) -> Self {
        if let (Some(first), Some(second)) = (self.first.as_ref(), self.second.as_ref()) {
            f(first, second);
        }
        self
    }

    /// Per-slot variant of [`Pair::if_present`]; each consumer gets its
    /// own value, and both run only when the pair is aggregate-present.
    pub fn if_present_each(self, first: impl FnOnce(&C), second: impl FnOnce(&D)) -> Self {
        if let (Some(a), Some(b)) = (self.first.as_ref(), self.second.as_ref()) {
            first(a);
            second(b);
        }
        self
    }

    pub fn if_present_or_else(self, f: impl FnOnce(&C, &D), or_else: impl FnOnce()) -> Self {
        match (self.first.as_ref(), self.second.as_ref()) {
            (Some(first), Some(second)) => f(first, second),
            _ => or_else(),
        }
        self
    }

    /// Runs `f` when either slot is missing. Returns the pair
    /// unchanged.
    pub fn if_empty(self, f: impl FnOnce()) -> Self {
        if self.is_empty() {
            f();
        }
        self
    }

    /// Chainable aggregate-presence assertion.
    pub fn require(self) -> Result<Self, EmptyValueError> {
        self.require_with(|| EmptyValueError::Pair)
    }

    /// Chainable aggregate-presence assertion with a caller-chosen
    /// error. The supplier runs only when either slot is missing.
    pub fn require_with<E>(self, err: impl FnOnce() -> E) -> Result<Self, E> {
        if self.is_present() {
            Ok(self)
        } else {
            Err(err())
        }
    }
}

impl<C, D> From<(Option<C>, Option<D>)> for Pair<C, D> {
    fn from((first, second): (Option<C>, Option<D>)) -> Self {
        Self { first, second }
    }
}

#[cfg(test)]
use core::cell::Cell;

#[test]
fn check_laws() {
    crate::partially_verify_presence_laws([Single::empty(), Single::new(-1), Single::new(1)]);
}

#[test]
fn aggregate_presence_needs_both_slots() {
    assert!(Pair::new(1, "a").is_present());
    assert!(Pair::<i32, &str>::from_options(None, Some("a")).is_empty());
    assert!(Pair::<i32, &str>::from_options(Some(1), None).is_empty());
    assert!(Pair::<i32, &str>::empty().is_empty());
}

#[test]
fn slot_accessors_check_only_their_own_slot() {
    let pair = Pair::<i32, &str>::from_options(None, Some("a"));
    assert_eq!(pair.get_first(), Err(EmptyValueError::First));
    assert_eq!(pair.get_second(), Ok("a"));
    assert_eq!(pair.get(), Err(EmptyValueError::Pair));

    let pair = Pair::from_options(Some(1), None::<&str>);
    assert_eq!(pair.get_first(), Ok(1));
    assert_eq!(pair.get_second(), Err(EmptyValueError::Second));
}

#[test]
fn second_slot_fallback_never_revives_an_empty_first() {
    // First present: the missing second is backfilled.
    let filled = Pair::from_options(Some(1), None).or_value("b");
    assert_eq!(filled.get(), Ok((1, "b")));

    // First empty: the fallback is discarded and a present second
    // dropped with it.
    let dropped = Pair::<i32, &str>::from_options(None, Some("a")).or_value("b");
    assert!(dropped.is_empty());
    assert_eq!(dropped.get_second(), Err(EmptyValueError::Second));

    // The lazy forms never evaluate their supplier on that path, nor
    // when the second slot is already filled.
    let collapsed = Pair::<i32, &str>::from_options(None, None).or_else(|| unreachable!());
    assert!(collapsed.is_empty());
    let present = Pair::new(1, "a").or_else(|| unreachable!());
    assert_eq!(present.get(), Ok((1, "a")));

    let supplied = Pair::from_options(Some(1), None).or_else(|| "b");
    assert_eq!(supplied.get(), Ok((1, "b")));
    let sourced = Pair::from_options(Some(1), None).or_else_option(|| Some("b"));
    assert_eq!(sourced.get(), Ok((1, "b")));
    let from_single = Pair::from_options(Some(1), None).or(Single::new("b"));
    assert_eq!(from_single.get(), Ok((1, "b")));
}

#[test]
fn best_effort_tuples_substitute_per_slot() {
    assert_eq!(Pair::<i32, &str>::from_options(None, Some("a")).unwrap_or(1, "b"), (1, "a"));
    assert_eq!(Pair::from_options(Some(1), None).unwrap_or(2, "b"), (1, "b"));
    assert_eq!(
        Pair::<i32, &str>::empty().unwrap_or_else(|| 3, || "c"),
        (3, "c")
    );
}

#[test]
fn mapping_is_gated_on_aggregate_presence() {
    let calls = Cell::new(0);
    let mapped = Pair::from_options(Some(2), None::<i32>).map(
        |a| {
            calls.set(calls.get() + 1);
            a
        },
        |b| {
            calls.set(calls.get() + 1);
            b
        },
    );
    assert!(mapped.is_empty());
    // Even the present slot's mapper is skipped on a partial pair, and
    // the partial slot does not survive the mapping.
    assert_eq!(calls.get(), 0);
    assert_eq!(mapped.get_first(), Err(EmptyValueError::First));

    assert_eq!(Pair::new(2, 3).map(|a| a * 10, |b| b + 1).get(), Ok((20, 4)));
    assert_eq!(
        Pair::new(2, 3).map_with(|a, b| a + b, |a, b| a * b).get(),
        Ok((5, 6))
    );
    assert_eq!(
        Pair::new(2, 3).flat_map(Some, |_| None::<i32>).get_first(),
        Ok(2)
    );
}

#[test]
fn filter_collapses_on_failure_and_keeps_partial_pairs() {
    assert_eq!(Pair::new(1, 2).filter(|a, b| a < b).get(), Ok((1, 2)));
    assert!(Pair::new(2, 1).filter(|a, b| a < b).is_empty());

    // The predicate is skipped entirely for a partial pair, and the
    // present slot is left in place.
    let partial = Pair::from_options(Some(1), None::<i32>).filter(|_, _| unreachable!());
    assert_eq!(partial.get_first(), Ok(1));
}

#[test]
fn reduce_collapses_to_the_plain_optional() {
    assert_eq!(Pair::new(2, 3).reduce(|a, b| a * b), Some(6));
    assert_eq!(Pair::new(2, 3).reduce(|a, b| (a, b)), Some((2, 3)));
    assert_eq!(
        Pair::<i32, i32>::from_options(Some(2), None).reduce(|a, b| a * b),
        None
    );
    assert_eq!(
        Pair::new(2, 3).flat_map_reduce(|a, b| (a < b).then_some(a + b)),
        Some(5)
    );
    assert_eq!(
        Pair::new(3, 2).flat_map_reduce(|a, b| (a < b).then_some(a + b)),
        None
    );
}

#[test]
fn try_reduce_passes_errors_through() {
    assert_eq!(Pair::new(2, 3).try_reduce(|a, b| Ok::<_, ()>(a + b)), Ok(Some(5)));
    assert_eq!(Pair::new(2, 3).try_reduce(|_, _| Err::<i32, _>("boom")), Err("boom"));

    // The combiner never runs for an empty pair.
    let skipped = Pair::<i32, i32>::empty().try_reduce(|_, _| Err::<i32, _>("boom"));
    assert_eq!(skipped, Ok(None));
}

#[test]
fn side_effects_follow_the_aggregate_state() {
    let seen = Cell::new(0);

    Pair::new(1, 2).if_present(|a, b| seen.set(a + b));
    assert_eq!(seen.get(), 3);

    Pair::new(10, 20).if_present_each(|a| seen.set(seen.get() + a), |b| seen.set(seen.get() + b));
    assert_eq!(seen.get(), 33);

    Pair::<i32, i32>::from_options(Some(1), None)
        .if_present(|_, _| seen.set(-1))
        .if_empty(|| seen.set(100));
    assert_eq!(seen.get(), 100);

    Pair::<i32, i32>::empty().if_present_or_else(|_, _| seen.set(-1), || seen.set(200));
    assert_eq!(seen.get(), 200);
}
