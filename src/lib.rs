//! Short-circuiting combinators over a pair of optional values: build a
//! [`Pair`] up from a [`Single`], transform both slots together, and
//! reduce them back down to a plain [`Option`].

#![no_std]

use core::{cell::Cell, fmt::Debug};

pub mod error;
pub mod pair;
pub mod single;

pub use crate::{error::EmptyValueError, pair::Pair, single::Single};

/// Partially verify the presence semantics of the containers. For all
/// provided samples: absence must absorb every transformation without
/// invoking its callback, fallbacks must fire only on the empty path,
/// a derived pair must be aggregate-present exactly when both inputs
/// are, reduction must agree with zipping the raw optionals, and the
/// pair's fallback family must never revive an empty first slot.
pub fn partially_verify_presence_laws<C>(samples: impl IntoIterator<Item = Single<C>> + Clone)
where
    C: Clone + PartialEq + Debug,
{
    for a in samples.clone() {
        // Transformations preserve presence.
        assert_eq!(a.clone().map(|v| v), a);
        assert_eq!(a.clone().filter(|_| true), a);
        assert!(a.clone().filter(|_| false).is_empty());

        // Absence is absorbing and skips every callback.
        if a.is_empty() {
            let touched = Cell::new(false);
            a.clone().map(|v| {
                touched.set(true);
                v
            });
            a.clone().flat_map(|v| {
                touched.set(true);
                Some(v)
            });
            a.clone().filter(|_| {
                touched.set(true);
                true
            });
            a.clone().and_with(|v| {
                touched.set(true);
                v.clone()
            });
            assert!(!touched.get());
        }

        for b in samples.clone() {
            // Fallbacks fire only on the empty path.
            let fallen = a.clone().or(b.clone());
            if a.is_present() {
                assert_eq!(fallen, a);
            } else {
                assert_eq!(fallen, b);
            }

            // A derived pair is aggregate-present iff both inputs are.
            let pair = a.clone().and_option(b.clone().into_option());
            assert_eq!(pair.is_present(), a.is_present() && b.is_present());

            // Reduction agrees with zipping the raw optionals.
            assert_eq!(
                pair.clone().reduce(|x, y| (x, y)),
                a.clone().into_option().zip(b.clone().into_option())
            );

            // The first slot drives the pair's fallback family.
            for c in samples.clone() {
                let backfilled = pair.clone().or(c.clone());
                if a.is_empty() {
                    assert!(backfilled.is_empty());
                } else if b.is_present() {
                    assert_eq!(backfilled, pair);
                } else {
                    assert_eq!(
                        backfilled.into_option(),
                        a.clone().into_option().zip(c.clone().into_option())
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::Single;

    #[test]
    fn presence_laws_hold_for_mixed_samples() {
        crate::partially_verify_presence_laws([
            Single::empty(),
            Single::new("Hello"),
            Single::new("Hello world!"),
        ]);
    }
}
