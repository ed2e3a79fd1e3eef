//! Character-set algebra and rule-tree interning for lexer generators.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Set algebra over an unbounded alphabet of code points.
///
/// This module defines the character-class leaf used by lexical rules:
/// a value type that represents sets like `[a-z]`, `[^\n]`, or "any
/// character" without ever materializing the alphabet, and supports exact
/// union, difference, and intersection across its direct and complement
/// representations.
pub mod char_set;

/// Arena storage and hash-consing for rule trees.
///
/// Interning deduplicates structurally identical nodes so that repeated
/// character classes (and any other repeated construct) compress to one
/// node, addressed by index rather than shared pointers.
pub mod intern;

/// The closed set of grammar rule node kinds.
///
/// Every consumer of the tree is an exhaustive `match` over these variants;
/// the kind set is fixed at compile time.
pub mod rules;

/// Structural checks over a built rule tree.
///
/// Validation exists to protect downstream stages (like automaton
/// construction) from rule trees that cannot match anything sensible.
pub mod validate;

pub use char_set::{CharacterRange, CharacterSet};
pub use intern::RuleArena;
pub use rules::{Rule, RuleId};
pub use validate::{validate, ValidationError};
