//! Locating repeated coded entries by their tags.
//!
//! Telecom and identifier sequences may hold any number of entries in any order, so they
//! are searched by `system` (and `use`, where it matters) rather than by index. The
//! helpers here return lazy iterators borrowed from the input slice; every call re-scans.

use crate::patient::{ContactPoint, Identifier};

/// An entry tagged with a coded system and an optional use-qualifier.
pub trait Coded {
    fn system(&self) -> Option<&str>;
    fn use_code(&self) -> Option<&str>;
    fn value(&self) -> Option<&str>;
}

impl Coded for ContactPoint {
    fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    fn use_code(&self) -> Option<&str> {
        self.use_type.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Coded for Identifier {
    fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    fn use_code(&self) -> Option<&str> {
        self.use_type.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// All entries satisfying `predicate`, in their original order.
pub fn matching_where<'a, T, P>(entries: &'a [T], mut predicate: P) -> impl Iterator<Item = &'a T> + 'a
where
    P: FnMut(&T) -> bool + 'a,
{
    entries.iter().filter(move |entry| predicate(*entry))
}

/// All entries whose `system` equals `system` and, when `use_code` is given, whose `use`
/// equals it too. `None` for `use_code` matches any use, including none.
pub fn find_matching<'a, T: Coded>(
    entries: &'a [T],
    system: &'a str,
    use_code: Option<&'a str>,
) -> impl Iterator<Item = &'a T> + 'a {
    matching_where(entries, move |entry: &T| {
        entry.system() == Some(system) && use_code.map_or(true, |u| entry.use_code() == Some(u))
    })
}

/// Value of the first matching entry, plus how many entries matched in total.
///
/// The first entry in list order wins; a matching entry without a value yields `""`.
pub fn first_value<'a, T: Coded>(
    entries: &'a [T],
    system: &'a str,
    use_code: Option<&'a str>,
) -> (Option<&'a str>, usize) {
    let mut matches = find_matching(entries, system, use_code);
    let first = matches.next().map(|entry| entry.value().unwrap_or(""));
    let total = first.map_or(0, |_| 1 + matches.count());
    (first, total)
}
