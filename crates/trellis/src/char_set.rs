//! Set algebra over an unbounded alphabet of code points.
//!
//! This module defines [`CharacterSet`], the leaf rule payload representing a
//! character class such as `[a-z]`, `[^\n]`, or "any character". The alphabet
//! is conceptually unbounded, so the set is stored either as a direct
//! enumeration of its members or as the complement of an enumeration of its
//! non-members; all algebra is expressed as a case table over that pair of
//! representations and never touches the full alphabet.

use std::collections::BTreeSet;
use std::fmt;

/// A closed interval `[min, max]` of code points.
///
/// Ranges are the unit handed to downstream automaton construction: the
/// range views on [`CharacterSet`] produce the minimal ordered sequence of
/// these whose union equals the stored point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterRange {
    /// The smallest code point in the range.
    pub min: u32,
    /// The largest code point in the range (inclusive).
    pub max: u32,
}

impl CharacterRange {
    /// Creates a range spanning `min` through `max` inclusive.
    ///
    /// Callers are responsible for `min <= max`; the algebra never checks it.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Creates a range containing the single code point `c`.
    #[must_use]
    pub fn point(c: u32) -> Self {
        Self { min: c, max: c }
    }
}

impl fmt::Display for CharacterRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// A possibly-complemented set of code points.
///
/// Exactly one of the two stored point sets is authoritative at a time,
/// selected by the `includes_all` discriminator:
///
/// - direct form (`includes_all == false`): the set is exactly
///   `included_chars`;
/// - complement form (`includes_all == true`): the set is the full alphabet
///   minus `excluded_chars`.
///
/// The non-authoritative set may hold leftover bookkeeping from the previous
/// operation and is never read without checking the discriminator first.
///
/// Equality, ordering, and hashing are *structural* over the normalized
/// fields, not semantic over the abstract point set: two sets with identical
/// membership reached through different call histories can compare unequal.
/// The enclosing rule tree deduplicates on construction shape, so this is the
/// behavior it wants.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterSet {
    includes_all: bool,
    included_chars: BTreeSet<u32>,
    excluded_chars: BTreeSet<u32>,
}

fn add_range(chars: &mut BTreeSet<u32>, min: u32, max: u32) {
    for c in min..=max {
        chars.insert(c);
    }
}

fn remove_range(chars: &mut BTreeSet<u32>, min: u32, max: u32) {
    for c in min..=max {
        chars.remove(&c);
    }
}

/// Removes every member of `right` from `left`, returning the ones that were
/// actually present.
fn remove_chars(left: &mut BTreeSet<u32>, right: &BTreeSet<u32>) -> BTreeSet<u32> {
    let mut result = BTreeSet::new();
    for &c in right {
        if left.remove(&c) {
            result.insert(c);
        }
    }
    result
}

/// Inserts every member of `right` into `left`, returning the ones that were
/// newly added.
fn add_chars(left: &mut BTreeSet<u32>, right: &BTreeSet<u32>) -> BTreeSet<u32> {
    let mut result = BTreeSet::new();
    for &c in right {
        if left.insert(c) {
            result.insert(c);
        }
    }
    result
}

/// Merges a sorted point set into the minimal ordered list of closed,
/// non-overlapping, non-adjacent ranges: extend the last range when the next
/// point is contiguous with it, otherwise start a new single-point range.
fn consolidate_ranges(chars: &BTreeSet<u32>) -> Vec<CharacterRange> {
    let mut result: Vec<CharacterRange> = Vec::new();
    for &c in chars {
        match result.last_mut() {
            Some(last) if last.max == c - 1 => last.max = c,
            _ => result.push(CharacterRange::point(c)),
        }
    }
    result
}

impl CharacterSet {
    /// Creates an empty set in direct form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the set is in complement form.
    ///
    /// Downstream consumers need this discriminator alongside the range views
    /// to know whether [`included_ranges`](Self::included_ranges) or
    /// [`excluded_ranges`](Self::excluded_ranges) describes the set.
    #[must_use]
    pub fn includes_all(&self) -> bool {
        self.includes_all
    }

    /// Switches to complement form representing "every character".
    ///
    /// Code point 0 is excluded as part of the switch: 0 is reserved as the
    /// end-of-input sentinel. Callers that really want 0 matched must
    /// `include(0)` afterwards.
    #[must_use]
    pub fn include_all(mut self) -> Self {
        self.includes_all = true;
        self.included_chars = BTreeSet::new();
        self.excluded_chars = BTreeSet::from([0]);
        self
    }

    /// Widens the set by the single code point `c`.
    #[must_use]
    pub fn include(self, c: u32) -> Self {
        self.include_range(c, c)
    }

    /// Widens the set by every code point in `[min, max]`.
    ///
    /// In complement form the range is dropped from the exclusions (those
    /// points are no longer excluded); in direct form it is added to the
    /// inclusions.
    #[must_use]
    pub fn include_range(mut self, min: u32, max: u32) -> Self {
        if self.includes_all {
            remove_range(&mut self.excluded_chars, min, max);
        } else {
            add_range(&mut self.included_chars, min, max);
        }
        self
    }

    /// Narrows the set by the single code point `c`.
    #[must_use]
    pub fn exclude(self, c: u32) -> Self {
        self.exclude_range(c, c)
    }

    /// Narrows the set by every code point in `[min, max]` (the dual of
    /// [`include_range`](Self::include_range)).
    #[must_use]
    pub fn exclude_range(mut self, min: u32, max: u32) -> Self {
        if self.includes_all {
            add_range(&mut self.excluded_chars, min, max);
        } else {
            remove_range(&mut self.included_chars, min, max);
        }
        self
    }

    /// Returns `true` if the set is in direct form with no inclusions.
    ///
    /// Complement form is never reported empty: the only way it could be is
    /// by excluding literally every code point, which is not detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.includes_all && self.included_chars.is_empty()
    }

    /// In-place union: afterwards `self` contains every point of either
    /// operand.
    ///
    /// The four representation pairings each stay within the explicitly
    /// stored points:
    ///
    /// - complement ∪ complement: a point stays excluded only if both
    ///   operands exclude it, so the exclusions narrow to their intersection;
    /// - complement ∪ direct: points `other` includes are struck from the
    ///   exclusions;
    /// - direct ∪ complement: `self` flips to complement form, keeping as
    ///   excluded only the points `other` excludes and `self` never
    ///   explicitly included;
    /// - direct ∪ direct: plain pointwise union of the inclusions.
    pub fn add_set(&mut self, other: &CharacterSet) {
        if self.includes_all {
            if other.includes_all {
                let still_excluded = remove_chars(&mut self.excluded_chars, &other.excluded_chars);
                self.excluded_chars = still_excluded;
            } else {
                remove_chars(&mut self.excluded_chars, &other.included_chars);
            }
        } else if other.includes_all {
            self.includes_all = true;
            for &c in &other.excluded_chars {
                if !self.included_chars.contains(&c) {
                    self.excluded_chars.insert(c);
                }
            }
            self.included_chars.clear();
        } else {
            self.included_chars.extend(other.included_chars.iter().copied());
        }
    }

    /// In-place difference: afterwards `self` contains its former points
    /// minus `other`'s, and the returned set holds the portion that was
    /// removed (`self ∩ other` before the call).
    ///
    /// Two of the pairings convert representations as a side effect of
    /// computing the correct point set:
    ///
    /// - complement − complement: `self` converts to direct form holding
    ///   `other`'s exclusions that `self` did not share, and the removed
    ///   portion is the complement of the two exclusion sets' union;
    /// - complement − direct: `other`'s inclusions join `self`'s exclusions,
    ///   and those newly excluded points are the removed portion;
    /// - direct − complement: only points `other` excludes survive in
    ///   `self`; everything else moves to the removed portion;
    /// - direct − direct: points present in both inclusion sets move to the
    ///   removed portion.
    pub fn remove_set(&mut self, other: &CharacterSet) -> CharacterSet {
        let mut result = CharacterSet::new();
        if self.includes_all {
            if other.includes_all {
                result.includes_all = true;
                result.excluded_chars = self.excluded_chars.clone();
                self.included_chars = add_chars(&mut result.excluded_chars, &other.excluded_chars);
                self.excluded_chars = BTreeSet::new();
                self.includes_all = false;
            } else {
                result.included_chars = add_chars(&mut self.excluded_chars, &other.included_chars);
            }
        } else if other.includes_all {
            result.included_chars = std::mem::take(&mut self.included_chars);
            self.included_chars = remove_chars(&mut result.included_chars, &other.excluded_chars);
        } else {
            result.included_chars = remove_chars(&mut self.included_chars, &other.included_chars);
        }
        result
    }

    /// Returns `true` if the two sets share at least one code point.
    ///
    /// Non-destructive: works on a scratch copy of `self`.
    #[must_use]
    pub fn intersects(&self, other: &CharacterSet) -> bool {
        !self.clone().remove_set(other).is_empty()
    }

    /// The stored inclusion points, consolidated into minimal ordered ranges.
    ///
    /// A pure read-side projection; the set is not mutated. In complement
    /// form this describes leftover bookkeeping, not the set's membership.
    #[must_use]
    pub fn included_ranges(&self) -> Vec<CharacterRange> {
        consolidate_ranges(&self.included_chars)
    }

    /// The stored exclusion points, consolidated into minimal ordered ranges.
    #[must_use]
    pub fn excluded_ranges(&self) -> Vec<CharacterRange> {
        consolidate_ranges(&self.excluded_chars)
    }
}

impl fmt::Display for CharacterSet {
    /// Renders the debug S-expression
    /// `(char [include_all] [(include r1 …)] [(exclude r1 …)])`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(char")?;
        if self.includes_all {
            write!(f, " include_all")?;
        }
        if !self.included_chars.is_empty() {
            write!(f, " (include")?;
            for range in self.included_ranges() {
                write!(f, " {range}")?;
            }
            write!(f, ")")?;
        }
        if !self.excluded_chars.is_empty() {
            write!(f, " (exclude")?;
            for range in self.excluded_ranges() {
                write!(f, " {range}")?;
            }
            write!(f, ")")?;
        }
        write!(f, ")")
    }
}
