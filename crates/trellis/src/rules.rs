//! The closed set of grammar rule node kinds.
//!
//! Rules form a tree: composite kinds hold [`RuleId`] indices into a
//! [`RuleArena`](crate::intern::RuleArena) rather than owning their children,
//! so structurally identical subtrees share one node. The kind set is fixed
//! at compile time and every consumer is an exhaustive `match`, which keeps
//! tree algorithms total without any open dispatch.

use crate::char_set::CharacterSet;

/// An index identifying one interned rule node within its arena.
///
/// Ids are only meaningful together with the arena that produced them;
/// equality of ids within one arena is equality of subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(usize);

impl RuleId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// The position of this node in its arena's storage.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A grammar rule node.
///
/// Atomic kinds (`Blank`, `String`, `CharacterSet`, `Symbol`) carry their
/// payload directly; composite kinds (`Seq`, `Choice`, `Repeat`) reference
/// their children by [`RuleId`]. The derived comparison and hashing kit is
/// what the arena keys its deduplication on, so two nodes are "the same
/// rule" exactly when their kinds and payloads match structurally.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// An empty (ε) production.
    Blank,
    /// A literal string token.
    String(String),
    /// A character-class leaf: the set-algebra payload.
    CharacterSet(CharacterSet),
    /// A reference to another named rule.
    Symbol(String),
    /// A sequential composition of member rules.
    Seq(Vec<RuleId>),
    /// A rule that matches one of several alternatives.
    Choice(Vec<RuleId>),
    /// A zero-or-more repetition of a rule.
    Repeat(RuleId),
}

impl Rule {
    /// Returns the canonical string name of this rule kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Rule::Blank => "blank",
            Rule::String(_) => "string",
            Rule::CharacterSet(_) => "char",
            Rule::Symbol(_) => "sym",
            Rule::Seq(_) => "seq",
            Rule::Choice(_) => "choice",
            Rule::Repeat(_) => "repeat",
        }
    }

    /// Returns `true` if this rule represents a terminal (lexical) token.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Rule::String(_) | Rule::CharacterSet(_))
    }

    /// Returns the referenced symbol name, if this is a `Symbol` rule.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Rule::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the character-class payload, if this is a `CharacterSet`
    /// leaf.
    #[must_use]
    pub fn character_set(&self) -> Option<&CharacterSet> {
        match self {
            Rule::CharacterSet(set) => Some(set),
            _ => None,
        }
    }

    /// The ids of this node's direct children, in rule order.
    #[must_use]
    pub fn child_ids(&self) -> Vec<RuleId> {
        match self {
            Rule::Blank | Rule::String(_) | Rule::CharacterSet(_) | Rule::Symbol(_) => Vec::new(),
            Rule::Seq(members) | Rule::Choice(members) => members.clone(),
            Rule::Repeat(content) => vec![*content],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_cover_every_variant() {
        let set = CharacterSet::new().include(7);
        let rules = [
            Rule::Blank,
            Rule::String("if".into()),
            Rule::CharacterSet(set),
            Rule::Symbol("expression".into()),
            Rule::Seq(vec![RuleId::from_index(0)]),
            Rule::Choice(vec![RuleId::from_index(0)]),
            Rule::Repeat(RuleId::from_index(0)),
        ];
        let names: Vec<_> = rules.iter().map(Rule::kind_name).collect();
        assert_eq!(
            names,
            ["blank", "string", "char", "sym", "seq", "choice", "repeat"]
        );
    }

    #[test]
    fn test_terminals_and_accessors() {
        let leaf = Rule::CharacterSet(CharacterSet::new().include_range(97, 122));
        assert!(leaf.is_terminal());
        assert!(leaf.character_set().is_some());
        assert!(leaf.symbol_name().is_none());
        assert!(leaf.child_ids().is_empty());

        let reference = Rule::Symbol("statement".into());
        assert!(!reference.is_terminal());
        assert_eq!(reference.symbol_name(), Some("statement"));

        let repeat = Rule::Repeat(RuleId::from_index(3));
        assert_eq!(repeat.child_ids(), vec![RuleId::from_index(3)]);
    }

    #[test]
    fn test_identical_character_set_leaves_are_equal_rules() {
        let a = Rule::CharacterSet(CharacterSet::new().include(5).include(6).include(7));
        let b = Rule::CharacterSet(CharacterSet::new().include_range(5, 7));
        assert_eq!(a, b);

        let c = Rule::CharacterSet(CharacterSet::new().include_all().exclude_range(5, 7));
        assert_ne!(a, c);
    }
}
