use crate::args::states::Retrieve;
use crate::args::Args;
use crate::error::{Error, ErrorContext, ErrorKind, Result};
use crate::key::Key;
use std::marker::PhantomData;
use std::str::FromStr;

/// A typed argument that knows how to pull its own values out of [Args].
pub trait Descriptor {
    type Output;

    /// Every name this argument answers to, canonical name first.
    fn names(&self) -> &[Key];

    /// Reads and converts the raw values for this argument.
    fn retrieve(&self, args: &Args<Retrieve>) -> Result<Self::Output>;

    /// The name used when reporting errors about this argument.
    fn canonical(&self) -> &Key {
        &self.names()[0]
    }
}

/// Converts a single raw `word` supplied behind `key`.
fn parse<T: FromStr>(key: &Key, word: &str) -> Result<T>
where
    <T as FromStr>::Err: 'static + std::error::Error,
{
    word.parse::<T>().map_err(|err| {
        Error::new(
            ErrorKind::BadType,
            ErrorContext::FailedCast(key.clone(), word.to_string(), Box::new(err)),
        )
    })
}

/// A switch that is either raised or not and never carries values.
#[derive(Debug, PartialEq, Clone)]
pub struct Flag {
    names: Vec<Key>,
}

impl Flag {
    pub fn new<T: AsRef<str>>(name: T) -> Self {
        Self {
            names: vec![Key::named(name)],
        }
    }

    /// Accepts `name` as another spelling of this flag.
    pub fn alias<T: AsRef<str>>(mut self, name: T) -> Self {
        self.names.push(Key::named(name));
        self
    }
}

impl Descriptor for Flag {
    type Output = bool;

    fn names(&self) -> &[Key] {
        self.names.as_ref()
    }

    fn retrieve(&self, args: &Args<Retrieve>) -> Result<bool> {
        match args.used_alias(self.names())? {
            Some(key) => match args.raw(key).first() {
                Some(val) => Err(Error::new(
                    ErrorKind::UnexpectedValue,
                    ErrorContext::UnexpectedValue(key.clone(), val.clone()),
                )),
                None => Ok(true),
            },
            None => Ok(false),
        }
    }
}

/// An argument that accepts at most one value.
#[derive(Debug, PartialEq, Clone)]
pub struct Single<T> {
    names: Vec<Key>,
    _type: PhantomData<T>,
}

impl<T> Single<T> {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            names: vec![Key::named(name)],
            _type: PhantomData,
        }
    }

    /// Takes its value from the arguments given before any switch.
    pub fn positional() -> Self {
        Self {
            names: vec![Key::Default],
            _type: PhantomData,
        }
    }

    /// Accepts `name` as another spelling of this argument.
    pub fn alias<S: AsRef<str>>(mut self, name: S) -> Self {
        self.names.push(Key::named(name));
        self
    }

    /// Requires a value to be supplied.
    pub fn required(self) -> Required<T> {
        Required { inner: self }
    }
}

impl<T: FromStr> Descriptor for Single<T>
where
    <T as FromStr>::Err: 'static + std::error::Error,
{
    type Output = Option<T>;

    fn names(&self) -> &[Key] {
        self.names.as_ref()
    }

    fn retrieve(&self, args: &Args<Retrieve>) -> Result<Option<T>> {
        let key = match args.used_alias(self.names())? {
            Some(k) => k,
            None => return Ok(None),
        };
        match args.raw(key) {
            [] => Err(Error::new(
                ErrorKind::ExpectingValue,
                ErrorContext::FailedArg(key.clone()),
            )),
            [word] => Ok(Some(parse(key, word)?)),
            words => Err(Error::new(
                ErrorKind::DuplicateValue,
                ErrorContext::DuplicateValue(key.clone(), words.len()),
            )),
        }
    }
}

/// A [Single] argument that must be supplied.
#[derive(Debug, PartialEq, Clone)]
pub struct Required<T> {
    inner: Single<T>,
}

impl<T: FromStr> Descriptor for Required<T>
where
    <T as FromStr>::Err: 'static + std::error::Error,
{
    type Output = T;

    fn names(&self) -> &[Key] {
        self.inner.names()
    }

    fn retrieve(&self, args: &Args<Retrieve>) -> Result<T> {
        match self.inner.retrieve(args)? {
            Some(value) => Ok(value),
            None => Err(Error::new(
                ErrorKind::MissingRequired,
                ErrorContext::FailedArg(self.canonical().clone()),
            )),
        }
    }
}

/// An argument that collects every value supplied behind it.
#[derive(Debug, PartialEq, Clone)]
pub struct Multiple<T> {
    names: Vec<Key>,
    required: bool,
    _type: PhantomData<T>,
}

impl<T> Multiple<T> {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            names: vec![Key::named(name)],
            required: false,
            _type: PhantomData,
        }
    }

    /// Collects the arguments given before any switch.
    pub fn positional() -> Self {
        Self {
            names: vec![Key::Default],
            required: false,
            _type: PhantomData,
        }
    }

    /// Accepts `name` as another spelling of this argument.
    pub fn alias<S: AsRef<str>>(mut self, name: S) -> Self {
        self.names.push(Key::named(name));
        self
    }

    /// Requires at least one value to be supplied.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl<T: FromStr> Descriptor for Multiple<T>
where
    <T as FromStr>::Err: 'static + std::error::Error,
{
    type Output = Vec<T>;

    fn names(&self) -> &[Key] {
        self.names.as_ref()
    }

    fn retrieve(&self, args: &Args<Retrieve>) -> Result<Vec<T>> {
        let key = match args.used_alias(self.names())? {
            Some(k) => k,
            None => match self.required {
                true => {
                    return Err(Error::new(
                        ErrorKind::MissingRequired,
                        ErrorContext::FailedArg(self.canonical().clone()),
                    ))
                }
                false => return Ok(Vec::new()),
            },
        };
        let words = args.raw(key);
        if words.is_empty() == true && self.required == true {
            return Err(Error::new(
                ErrorKind::ExpectingValue,
                ErrorContext::FailedArg(key.clone()),
            ));
        }
        words.iter().map(|w| parse(key, w)).collect()
    }
}
