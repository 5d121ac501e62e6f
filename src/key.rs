use std::fmt::Display;

mod symbol {
    pub const DEFAULT_LABEL: &str = "[default argument]";
}

/// Identifies a group of raw values in the argument store.
///
/// Values supplied before any switch live under [Key::Default]; every switch
/// lives under its own [Key::Named] entry, without its leading dashes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub enum Key {
    Default,
    Named(String),
}

impl Key {
    /// Creates a key for the switch `name`.
    pub fn named<T: AsRef<str>>(name: T) -> Self {
        Self::Named(name.as_ref().to_string())
    }

    pub fn is_default(&self) -> bool {
        match self {
            Self::Default => true,
            Self::Named(_) => false,
        }
    }

    /// Returns the switch name, or `None` for the default position.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(n) => Some(n.as_ref()),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::named(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Named(s)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "{}", symbol::DEFAULT_LABEL),
            Self::Named(n) => write!(f, "{}", n),
        }
    }
}
