use core::cell::Cell;

use optpair::{EmptyValueError, Pair, Single};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct UserId(u64);

#[derive(Debug, PartialEq, Eq)]
struct User {
    id: UserId,
    name: String,
}

fn find_user_id(name: &str) -> UserId {
    UserId(name.len() as u64 * 7)
}

fn login_user(id: UserId, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

#[test]
fn lookup_then_combine_matches_the_direct_call() {
    let user = Single::new("Cora")
        .and_with(|name| find_user_id(name))
        .reduce(|name, id| login_user(id, name));

    assert_eq!(user, Some(login_user(find_user_id("Cora"), "Cora")));
}

#[test]
fn absent_input_runs_nothing() {
    let lookups = Cell::new(0);
    let logins = Cell::new(0);

    let user = Single::from_option(None::<&str>)
        .and_with(|name| {
            lookups.set(lookups.get() + 1);
            find_user_id(name)
        })
        .reduce(|name, id| {
            logins.set(logins.get() + 1);
            login_user(id, name)
        });

    assert_eq!(user, None);
    assert_eq!(lookups.get(), 0);
    assert_eq!(logins.get(), 0);
}

#[test]
fn fallbacks_recover_a_broken_chain() {
    let warnings = Cell::new(0);

    let (name, id) = Single::from_option(None::<&str>)
        .if_empty(|| warnings.set(warnings.get() + 1))
        .or_value("Cora")
        .and_with_option(|_| None)
        .or_else(|| find_user_id("Cora"))
        .get()
        .unwrap();

    assert_eq!(name, "Cora");
    assert_eq!(id, find_user_id("Cora"));
    assert_eq!(warnings.get(), 1);
}

#[test]
fn require_reports_which_slot_is_missing() {
    let err = Single::<i32>::empty().require().unwrap_err();
    assert_eq!(err, EmptyValueError::Value);
    assert_eq!(err.to_string(), "no value is present");

    let err = Pair::<i32, i32>::from_options(None, Some(2))
        .get_first()
        .unwrap_err();
    assert_eq!(err.to_string(), "the first value is not present");

    let err = Pair::<i32, i32>::from_options(Some(1), None)
        .get_second()
        .unwrap_err();
    assert_eq!(err.to_string(), "the second value is not present");

    let err = Pair::<i32, i32>::empty().require().unwrap_err();
    assert_eq!(err, EmptyValueError::Pair);
    assert_eq!(err.to_string(), "one or more of the two values are not present");
}

#[derive(Debug, PartialEq)]
struct MissingUser;

#[test]
fn require_with_substitutes_the_callers_error() {
    fn load(name: Option<&str>) -> Result<String, MissingUser> {
        let user = Single::from_option(name)
            .require_with(|| MissingUser)?
            .map(str::to_uppercase)
            .get_or(|| MissingUser)?;
        Ok(user)
    }

    assert_eq!(load(Some("cora")), Ok("CORA".to_string()));
    assert_eq!(load(None), Err(MissingUser));
}

#[test]
fn fallible_callbacks_keep_their_error_type() {
    fn parse_port(raw: &str) -> Result<u16, core::num::ParseIntError> {
        raw.parse()
    }

    let pair = Single::new("8080").try_and_with(|raw| parse_port(raw));
    assert_eq!(pair.unwrap().get_second(), Ok(8080));

    let bad = Single::new("eighty").try_and_with(|raw| parse_port(raw));
    assert!(bad.is_err());

    // The empty path returns an empty pair without running the parser.
    let skipped = Single::<&str>::from_option(None)
        .try_and_with(|_| -> Result<u16, core::num::ParseIntError> { unreachable!() });
    assert!(skipped.unwrap().is_empty());
}

#[test]
fn option_interop_round_trips() {
    let single: Single<i32> = Some(3).into();
    assert_eq!(single.into_option(), Some(3));
    assert_eq!(Option::<i32>::from(Single::empty()), None);

    let pair = Pair::from((Some(1), Some("a")));
    assert_eq!(pair.into_option(), Some((1, "a")));

    // Reduction hands back the plain optional, ready for the usual
    // adapters.
    let doubled = Single::new(2).and(3).reduce(|a, b| a * b).map(|n| n * 10);
    assert_eq!(doubled, Some(60));
}
