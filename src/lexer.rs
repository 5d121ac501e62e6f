use crate::args::states::Declare;
use crate::args::Args;
use crate::key::Key;
use crate::store::Store;
use std::collections::HashSet;

mod symbol {
    // series of characters to denote flags and switches
    pub const SWITCH: &str = "-";
    // @note: tokenizing depends on flag having the first character be the switch character
    pub const FLAG: &str = "--";
    pub const ATTACH: char = '=';
}

/// Splits raw command-line input into groups of values keyed by switch.
///
/// Values are collected into the most recently opened group; values given
/// before any switch land in [Key::Default].
#[derive(Debug, PartialEq, Clone)]
pub struct Tokenizer {
    split_switches: bool,
    terminator: bool,
    flags: HashSet<Key>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a `Tokenizer` with switch splitting and the `--` terminator enabled.
    pub fn new() -> Self {
        Self {
            split_switches: true,
            terminator: true,
            flags: HashSet::new(),
        }
    }

    /// Sets whether `-abc` is read as the three switches `a`, `b` and `c`.
    ///
    /// When disabled, `-abc` is the single switch `abc`.
    pub fn split_switches(mut self, enabled: bool) -> Self {
        self.split_switches = enabled;
        self
    }

    /// Sets whether a bare `--` ends switch parsing.
    ///
    /// Everything after the terminator is a default argument.
    pub fn terminator(mut self, enabled: bool) -> Self {
        self.terminator = enabled;
        self
    }

    /// Declares switches that never take values.
    ///
    /// Without this, `--verbose file.txt` places `file.txt` behind `verbose`.
    /// Values following a declared flag go back to the default group.
    pub fn flags<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.flags.extend(names.into_iter().map(Key::named));
        self
    }

    /// Builds the argument store from `args`, skipping the program name.
    pub fn tokenize<T: Iterator<Item = String>>(&self, args: T) -> Args<Declare> {
        Args::from_store(self.group(args.skip(1)))
    }

    /// Groups every token of `args` behind the switch it follows.
    pub fn group<T: Iterator<Item = String>>(&self, args: T) -> Store {
        let mut store = Store::new();
        let mut current = Key::Default;
        let mut terminated = false;
        for arg in args {
            // everything after the terminator is a default argument
            if terminated == true {
                store.push(Key::Default, arg);
            } else if self.terminator == true && arg == symbol::FLAG {
                tracing::trace!("caught terminator");
                terminated = true;
            // a lone dash is a value
            } else if arg.starts_with(symbol::SWITCH) == true && arg != symbol::SWITCH {
                // try to separate from '=' sign
                let (opt, value) = match arg.split_once(symbol::ATTACH) {
                    Some((opt, val)) => (opt, Some(val)),
                    None => (arg.as_str(), None),
                };
                let names = self.switch_names(opt);
                for name in &names {
                    store.touch(name.clone());
                }
                // the last switch in a group receives any following values
                current = names.last().cloned().unwrap_or(Key::Default);
                if let Some(val) = value {
                    store.push(current, val.to_string());
                    current = Key::Default;
                } else if self.flags.contains(&current) == true {
                    current = Key::Default;
                }
            } else {
                store.push(current.clone(), arg);
            }
        }
        tracing::debug!("tokenized {} argument groups", store.len());
        store
    }

    /// Determines the switch names written in `opt`, which starts with a dash.
    fn switch_names(&self, opt: &str) -> Vec<Key> {
        // handle long flag signal
        if let Some(name) = opt.strip_prefix(symbol::FLAG) {
            vec![Key::named(name)]
        // handle short flag signal
        } else {
            let name = &opt[symbol::SWITCH.len()..];
            match self.split_switches {
                true => name.chars().map(|c| Key::named(c.to_string())).collect(),
                false => vec![Key::named(name)],
            }
        }
    }
}
