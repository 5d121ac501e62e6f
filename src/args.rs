//! The resolution engine.
//!
//! An [Args] moves through two phases. While in [Declare], descriptors
//! register the names they answer to; every registered name is exempt from
//! the unknown-argument check. Calling [Args::ready] moves it into
//! [Retrieve], where values are read but nothing can be registered anymore.
//! [Args::finish] consumes the engine, so no operation is possible after the
//! completeness check ran.
//!
//! Declaring a descriptor is enough to accept its switches, even if the
//! program never retrieves its value afterwards.

use crate::arg::Descriptor;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::store::Store;
use std::collections::HashSet;
use std::fmt::Display;
use std::marker::PhantomData;

pub mod states {
    pub trait State {}

    /// Descriptors are being registered.
    #[derive(Debug, PartialEq)]
    pub struct Declare;

    /// Values are being retrieved.
    #[derive(Debug, PartialEq)]
    pub struct Retrieve;

    impl State for Declare {}
    impl State for Retrieve {}
}

use states::*;

#[derive(Debug, PartialEq)]
pub struct Args<S: State> {
    store: Store,
    optional: HashSet<Key>,
    _state: PhantomData<S>,
}

impl Args<Declare> {
    /// Wraps a fully tokenized store.
    pub(crate) fn from_store(store: Store) -> Self {
        tracing::trace!("constructed args from store {}", store);
        Self {
            store,
            optional: HashSet::new(),
            _state: PhantomData,
        }
    }

    /// Registers every name of the descriptor `d` so its switches are accepted
    /// by the completeness check.
    pub fn declare<D: Descriptor>(&mut self, d: &D) -> &mut Self {
        self.add_optional(d.names());
        self
    }

    /// Marks `names` as optional.
    ///
    /// An optional name may be present without ever being retrieved. Names
    /// that were never supplied are accepted and have no effect.
    pub fn add_optional<I, K>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        for name in names {
            let name = name.into();
            tracing::trace!("marking \"{}\" as optional", name);
            self.optional.insert(name);
        }
        self
    }

    /// Ends the declaration phase.
    pub fn ready(self) -> Args<Retrieve> {
        tracing::debug!(
            "declared {} names against {} supplied",
            self.optional.len(),
            self.store.len()
        );
        Args {
            store: self.store,
            optional: self.optional,
            _state: PhantomData,
        }
    }
}

impl<S: State> Args<S> {
    /// Returns the raw values supplied behind `key`, or an empty slice.
    pub fn raw(&self, key: &Key) -> &[String] {
        self.store.get(key)
    }

    /// Determines which one of `aliases` was supplied, if any.
    ///
    /// Aliases are scanned in the given order and the whole list is always
    /// scanned. Errors if two aliases are present, reporting the first two
    /// found.
    pub fn used_alias<'a>(&self, aliases: &'a [Key]) -> Result<Option<&'a Key>> {
        let mut found: Option<&Key> = None;
        for alias in aliases {
            if self.store.contains(alias) == false {
                continue;
            }
            match found {
                None => found = Some(alias),
                Some(first) => {
                    tracing::debug!("aliases \"{}\" and \"{}\" both supplied", first, alias);
                    return Err(Error::ambiguous_alias(first, alias));
                }
            }
        }
        Ok(found)
    }

    /// Checks if `key` is exempt from the completeness check.
    pub fn is_optional(&self, key: &Key) -> bool {
        self.optional.contains(key)
    }

    /// References the underlying raw store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Lists every supplied name that was not marked optional, in the order
    /// it was supplied.
    pub fn unrecognized(&self) -> Vec<String> {
        self.store
            .keys()
            .filter(|k| self.optional.contains(*k) == false)
            .map(|k| k.to_string())
            .collect()
    }

    /// Verifies no argument was supplied that was not declared.
    ///
    /// Errors with every unknown argument at once. This only reads state, so
    /// it can be called any number of times.
    pub fn check(&self) -> Result<()> {
        let extras = self.unrecognized();
        match extras.is_empty() {
            true => Ok(()),
            false => {
                tracing::debug!("found {} unknown arguments", extras.len());
                Err(Error::unknown_arguments(extras))
            }
        }
    }
}

impl Args<Retrieve> {
    /// Returns the value for the descriptor `d`.
    ///
    /// Panics if `d` was not declared before [Args::ready] was called.
    pub fn get<D: Descriptor>(&self, d: &D) -> Result<D::Output> {
        if let Some(k) = d.names().iter().find(|k| self.is_optional(k) == false) {
            panic!("argument \"{}\" must be declared before it is retrieved", k);
        }
        d.retrieve(self)
    }

    /// Runs the completeness check and ends the session.
    pub fn finish(self) -> Result<()> {
        self.check()
    }

    /// Runs `f` and then always runs the completeness check.
    ///
    /// An error from `f` takes precedence over an error from the check.
    pub fn scope<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&Args<Retrieve>) -> Result<T>,
    {
        let result = f(&self);
        let finished = self.finish();
        match (result, finished) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(suppressed)) => {
                tracing::debug!("suppressed completeness error: {}", suppressed);
                Err(e)
            }
        }
    }
}

impl<S: State> Display for Args<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.store)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arg::{Flag, Single};
    use crate::error::{ErrorContext, ErrorKind};

    fn store(pairs: Vec<(Key, Vec<&str>)>) -> Store {
        pairs.into_iter().collect()
    }

    fn keys(names: &[&str]) -> Vec<Key> {
        names.iter().map(|n| Key::named(n)).collect()
    }

    #[test]
    fn raw_lookup() {
        let args = Args::from_store(store(vec![
            (Key::Default, vec!["file.txt"]),
            (Key::named("name"), vec!["alice"]),
        ]));
        assert_eq!(args.raw(&Key::Default), &["file.txt"]);
        assert_eq!(args.raw(&Key::named("name")), &["alice"]);
        assert_eq!(args.raw(&Key::named("missing")), &[] as &[String]);
        // lookup did not insert
        assert_eq!(args.store().len(), 2);
    }

    #[test]
    fn used_alias_none_present() {
        let args = Args::from_store(store(vec![(Key::named("other"), vec![])]));
        assert_eq!(args.used_alias(&keys(&["v", "verbose"])).unwrap(), None);
        assert_eq!(args.used_alias(&[]).unwrap(), None);
    }

    #[test]
    fn used_alias_one_present() {
        let args = Args::from_store(store(vec![(Key::named("verbose"), vec![])]));
        assert_eq!(
            args.used_alias(&keys(&["v", "verbose"])).unwrap(),
            Some(&Key::named("verbose"))
        );
        // presence does not depend on having values
        let args = Args::from_store(store(vec![(Key::Default, vec![])]));
        assert_eq!(
            args.used_alias(&[Key::Default]).unwrap(),
            Some(&Key::Default)
        );
    }

    #[test]
    fn used_alias_conflict() {
        let args = Args::from_store(store(vec![
            (Key::named("v"), vec![]),
            (Key::named("verbose"), vec![]),
        ]));
        let err = args.used_alias(&keys(&["v", "verbose"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousAlias);
        match err.context() {
            ErrorContext::AmbiguousAlias(a, b) => {
                assert_eq!(a, &Key::named("v"));
                assert_eq!(b, &Key::named("verbose"));
            }
            _ => panic!("wrong error context"),
        }
    }

    #[test]
    fn used_alias_reports_in_list_order() {
        // store order is the reverse of the alias list
        let args = Args::from_store(store(vec![
            (Key::named("c"), vec![]),
            (Key::named("b"), vec![]),
            (Key::named("a"), vec![]),
        ]));
        let err = args.used_alias(&keys(&["x", "a", "y", "b", "c"])).unwrap_err();
        match err.context() {
            ErrorContext::AmbiguousAlias(a, b) => {
                assert_eq!(a, &Key::named("a"));
                assert_eq!(b, &Key::named("b"));
            }
            _ => panic!("wrong error context"),
        }
    }

    #[test]
    fn used_alias_scans_past_first_match() {
        let args = Args::from_store(store(vec![
            (Key::named("verbose"), vec![]),
            (Key::named("loud"), vec![]),
        ]));
        assert!(args.used_alias(&keys(&["verbose", "v", "noisy", "loud"])).is_err());
    }

    #[test]
    fn add_optional_is_idempotent() {
        let mut once = Args::from_store(Store::new());
        once.add_optional(["verbose"]);
        let mut twice = Args::from_store(Store::new());
        twice.add_optional(["verbose"]).add_optional(["verbose"]);
        assert_eq!(once, twice);
        assert!(twice.is_optional(&Key::named("verbose")));
    }

    #[test]
    fn unknown_default_argument() {
        let mut args = Args::from_store(store(vec![
            (Key::Default, vec!["file.txt"]),
            (Key::named("verbose"), vec![]),
        ]));
        args.add_optional(["verbose"]);
        let err = args.ready().finish().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArguments);
        match err.context() {
            ErrorContext::UnknownArguments(names) => {
                assert_eq!(names, &vec!["[default argument]".to_string()])
            }
            _ => panic!("wrong error context"),
        }
    }

    #[test]
    fn unknown_lists_every_name() {
        let mut args = Args::from_store(store(vec![
            (Key::named("color"), vec!["red"]),
            (Key::named("name"), vec!["alice"]),
            (Key::Default, vec!["x"]),
            (Key::named("q"), vec![]),
        ]));
        args.add_optional(["name"]);
        assert_eq!(
            args.unrecognized(),
            vec!["color", "[default argument]", "q"]
        );
    }

    #[test]
    fn check_is_idempotent() {
        let args = Args::from_store(store(vec![(Key::named("x"), vec![])])).ready();
        assert_eq!(args.check().unwrap_err().kind(), ErrorKind::UnknownArguments);
        assert_eq!(args.check().unwrap_err().kind(), ErrorKind::UnknownArguments);
        assert_eq!(args.unrecognized(), args.unrecognized());
    }

    #[test]
    fn optional_names_not_supplied() {
        let mut args = Args::from_store(store(vec![(Key::named("name"), vec!["alice"])]));
        args.add_optional(["name", "n", "never", "given"]);
        assert_eq!(args.ready().finish().unwrap(), ());
    }

    #[test]
    fn declared_and_retrieved() {
        let name = Single::<String>::new("name");
        let mut args = Args::from_store(store(vec![(Key::named("name"), vec!["alice"])]));
        args.declare(&name);
        let args = args.ready();
        assert_eq!(args.get(&name).unwrap(), Some("alice".to_string()));
        assert_eq!(args.finish().unwrap(), ());
    }

    #[test]
    fn empty_store_finishes() {
        let args = Args::from_store(Store::new()).ready();
        assert_eq!(args.unrecognized(), Vec::<String>::new());
        assert_eq!(args.finish().unwrap(), ());
    }

    #[test]
    fn declared_but_never_retrieved() {
        let quiet = Flag::new("quiet").alias("q");
        let mut args = Args::from_store(store(vec![(Key::named("q"), vec![])]));
        args.declare(&quiet);
        assert_eq!(args.ready().finish().unwrap(), ());
    }

    #[test]
    #[should_panic = "must be declared before it is retrieved"]
    fn get_undeclared() {
        let args = Args::from_store(store(vec![(Key::named("name"), vec!["alice"])])).ready();
        let _ = args.get(&Single::<String>::new("name"));
    }

    #[test]
    fn scope_runs_check_on_success() {
        let name = Single::<String>::new("name");
        let mut args = Args::from_store(store(vec![
            (Key::named("name"), vec!["alice"]),
            (Key::named("extra"), vec![]),
        ]));
        args.declare(&name);
        let result = args.ready().scope(|a| a.get(&name));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnknownArguments);
    }

    #[test]
    fn scope_prefers_first_error() {
        let rate = Single::<u8>::new("rate");
        let mut args = Args::from_store(store(vec![
            (Key::named("rate"), vec!["fast"]),
            (Key::named("extra"), vec![]),
        ]));
        args.declare(&rate);
        let result = args.ready().scope(|a| a.get(&rate));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::BadType);
    }

    #[test]
    fn scope_returns_value() {
        let rate = Single::<u8>::new("rate");
        let mut args = Args::from_store(store(vec![(Key::named("rate"), vec!["9"])]));
        args.declare(&rate);
        assert_eq!(args.ready().scope(|a| a.get(&rate)).unwrap(), Some(9));
    }

    #[test]
    fn args_disp() {
        let args = Args::from_store(store(vec![(Key::named("name"), vec!["alice"])]));
        assert_eq!(args.to_string(), "{ name: [\"alice\"] }");
    }
}
