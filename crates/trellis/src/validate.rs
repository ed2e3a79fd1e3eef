//! Structural checks over a built rule tree.
//!
//! Validation protects downstream stages (automaton construction in
//! particular) from rule trees that cannot match anything sensible. It runs
//! after a tree is interned and before its ranges are consumed: an empty
//! character class, a repetition of the empty production, or a dangling
//! symbol reference each abort the build with a descriptive error.

use crate::intern::RuleArena;
use crate::rules::{Rule, RuleId};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// A structural rule violation detected while checking a rule tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The root id does not belong to the arena being validated.
    #[error("rule id {0} is not in this arena")]
    UnknownRule(usize),

    /// A `Symbol` node references a rule name that is not defined.
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),

    /// A `CharacterSet` leaf matches no code point at all.
    #[error("character set at node {0} matches nothing")]
    EmptyCharacterSet(usize),

    /// A `Repeat` wraps a rule that matches the empty string.
    #[error("repetition of the empty production at node {0}")]
    RepeatOfBlank(usize),
}

/// Checks the subtree rooted at `root` for structural violations.
///
/// `defined` is the set of rule names that `Symbol` nodes may reference;
/// the enclosing grammar supplies it from its rule table.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered in pre-order.
pub fn validate(
    arena: &RuleArena,
    root: RuleId,
    defined: &FxHashSet<String>,
) -> Result<(), ValidationError> {
    let Some(rule) = arena.get(root) else {
        return Err(ValidationError::UnknownRule(root.index()));
    };

    match rule {
        Rule::Blank | Rule::String(_) => {}

        Rule::CharacterSet(set) => {
            if set.is_empty() {
                return Err(ValidationError::EmptyCharacterSet(root.index()));
            }
        }

        Rule::Symbol(name) => {
            if !defined.contains(name) {
                return Err(ValidationError::UndefinedSymbol(name.clone()));
            }
        }

        Rule::Seq(members) | Rule::Choice(members) => {
            for &member in members {
                validate(arena, member, defined)?;
            }
        }

        Rule::Repeat(content) => {
            if arena.get(*content) == Some(&Rule::Blank) {
                return Err(ValidationError::RepeatOfBlank(root.index()));
            }
            validate(arena, *content, defined)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_set::CharacterSet;

    fn defined(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_accepts_well_formed_tree() {
        let mut arena = RuleArena::new();
        let letter = arena.character_set(CharacterSet::new().include_range(97, 122));
        let word = arena.repeat(letter);
        let reference = arena.symbol("expression");
        let root = arena.seq(vec![word, reference]);

        assert_eq!(validate(&arena, root, &defined(&["expression"])), Ok(()));
    }

    #[test]
    fn test_rejects_undefined_symbol() {
        let mut arena = RuleArena::new();
        let reference = arena.symbol("missing");
        let root = arena.choice(vec![reference]);

        assert_eq!(
            validate(&arena, root, &defined(&["expression"])),
            Err(ValidationError::UndefinedSymbol("missing".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_character_set() {
        let mut arena = RuleArena::new();
        let nothing = arena.character_set(CharacterSet::new());
        let root = arena.seq(vec![nothing]);

        assert_eq!(
            validate(&arena, root, &defined(&[])),
            Err(ValidationError::EmptyCharacterSet(nothing.index()))
        );
    }

    #[test]
    fn test_complement_character_set_is_never_empty() {
        let mut arena = RuleArena::new();
        let any = arena.character_set(CharacterSet::new().include_all());
        assert_eq!(validate(&arena, any, &defined(&[])), Ok(()));
    }

    #[test]
    fn test_rejects_repeat_of_blank() {
        let mut arena = RuleArena::new();
        let blank = arena.blank();
        let root = arena.repeat(blank);

        assert_eq!(
            validate(&arena, root, &defined(&[])),
            Err(ValidationError::RepeatOfBlank(root.index()))
        );
    }

    #[test]
    fn test_rejects_foreign_root_id() {
        let mut arena = RuleArena::new();
        let id = arena.blank();

        let other = RuleArena::new();
        assert_eq!(
            validate(&other, id, &defined(&[])),
            Err(ValidationError::UnknownRule(id.index()))
        );
    }
}
