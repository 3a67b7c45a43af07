use std::borrow::Cow;
use std::collections::BTreeMap;

use super::Mask;

/// Name of the mask used when a formatting call supplies none.
pub const DEFAULT_MASK_NAME: &str = "default";

const DEFAULT_MASK: &str = "ddd mmm dd yyyy HH:MM:ss";

const BUILTIN_MASKS: [(&str, &str); 12] = [
    ("shortDate", "m/d/yy"),
    ("mediumDate", "mmm d, yyyy"),
    ("longDate", "mmmm d, yyyy"),
    ("fullDate", "dddd, mmmm d, yyyy"),
    ("shortTime", "h:MM TT"),
    ("mediumTime", "h:MM:ss TT"),
    ("longTime", "h:MM:ss TT Z"),
    ("isoDate", "yyyy-mm-dd"),
    ("isoTime", "HH:MM:ss"),
    ("isoDateTime", "yyyy-mm-dd'T'HH:MM:sso"),
    ("isoUtcDateTime", "UTC:yyyy-mm-dd'T'HH:MM:ss'Z'"),
    ("expiresHeaderFormat", "ddd, dd mmm yyyy HH:MM:ss Z"),
];

/// Named masks, always holding a `default` entry.
#[derive(Debug, Clone)]
pub struct MaskTable {
    default: Mask,
    named: BTreeMap<String, Mask>,
}

impl Default for MaskTable {
    /// The built-in masks (`shortDate`, `isoDateTime`, ...).
    fn default() -> Self {
        let mut table = MaskTable::new(DEFAULT_MASK);
        for (name, mask) in BUILTIN_MASKS {
            table.insert(name, mask);
        }
        table
    }
}

impl MaskTable {
    /// A table whose only entry is `default`.
    pub fn new(default: &str) -> Self {
        MaskTable {
            default: Mask::compile(default),
            named: BTreeMap::new(),
        }
    }

    /// Add or replace a named mask. Naming it `default` replaces the fallback.
    pub fn insert(&mut self, name: &str, mask: &str) {
        if name == DEFAULT_MASK_NAME {
            self.default = Mask::compile(mask);
        } else {
            self.named.insert(name.to_string(), Mask::compile(mask));
        }
    }

    /// Add every `(name, mask)` pair, replacing existing names.
    pub fn extend<I, K, V>(&mut self, masks: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, mask) in masks {
            self.insert(name.as_ref(), mask.as_ref());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Mask> {
        if name == DEFAULT_MASK_NAME {
            Some(&self.default)
        } else {
            self.named.get(name)
        }
    }

    pub fn default_mask(&self) -> &Mask {
        &self.default
    }

    /// All entries, `default` first and the rest by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mask)> {
        std::iter::once((DEFAULT_MASK_NAME, &self.default))
            .chain(self.named.iter().map(|(name, mask)| (name.as_str(), mask)))
    }

    pub fn len(&self) -> usize {
        self.named.len() + 1
    }

    /// Never true; the `default` entry always exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pick the mask a formatting call asked for.
    ///
    /// A known, non-empty name wins. Anything else is a literal mask, except
    /// the empty string, which selects `default`.
    pub fn resolve(&self, name_or_mask: &str) -> Cow<'_, Mask> {
        match self.get(name_or_mask) {
            Some(mask) if !mask.is_empty() => Cow::Borrowed(mask),
            _ if name_or_mask.is_empty() => Cow::Borrowed(&self.default),
            _ => {
                log::debug!(
                    "{:?} is not a named mask, formatting it literally",
                    name_or_mask
                );
                Cow::Owned(Mask::compile(name_or_mask))
            }
        }
    }
}
