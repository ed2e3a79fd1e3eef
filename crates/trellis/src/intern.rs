//! Arena storage and hash-consing for rule trees.
//!
//! Nodes are allocated once into a flat arena and addressed by [`RuleId`]
//! index. A hash map from structural content to id makes interning
//! idempotent: building the same subtree twice yields the same id, so the
//! enclosing grammar compresses identical character classes (and any other
//! repeated construct) to a single node. Children are interned before their
//! parents, which makes structural equality of parents a cheap comparison of
//! child ids.

use crate::char_set::CharacterSet;
use crate::rules::{Rule, RuleId};
use rustc_hash::FxHashMap;
use std::fmt::Write as _;
use tracing::trace;

/// An arena of interned rule nodes.
///
/// The arena owns every node in a rule tree. Interning deduplicates on the
/// node's structural content, so the number of stored nodes is the number of
/// distinct subtrees, not the number of construction calls.
#[derive(Debug, Default)]
pub struct RuleArena {
    nodes: Vec<Rule>,
    dedup: FxHashMap<Rule, RuleId>,
}

impl RuleArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct nodes stored so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Interns a rule node, returning the id of the stored copy.
    ///
    /// A node structurally identical to one interned earlier returns the
    /// existing id without allocating.
    pub fn intern(&mut self, rule: Rule) -> RuleId {
        if let Some(&id) = self.dedup.get(&rule) {
            return id;
        }
        let id = RuleId::from_index(self.nodes.len());
        trace!(index = id.index(), kind = rule.kind_name(), "interned rule node");
        self.nodes.push(rule.clone());
        self.dedup.insert(rule, id);
        id
    }

    /// Looks up a node by id.
    ///
    /// Returns `None` for an id that this arena never produced.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.nodes.get(id.index())
    }

    /// Interns an empty (ε) production.
    pub fn blank(&mut self) -> RuleId {
        self.intern(Rule::Blank)
    }

    /// Interns a literal string token.
    pub fn string(&mut self, value: impl Into<String>) -> RuleId {
        self.intern(Rule::String(value.into()))
    }

    /// Interns a character-class leaf.
    pub fn character_set(&mut self, set: CharacterSet) -> RuleId {
        self.intern(Rule::CharacterSet(set))
    }

    /// Interns a reference to the named rule.
    pub fn symbol(&mut self, name: impl Into<String>) -> RuleId {
        self.intern(Rule::Symbol(name.into()))
    }

    /// Interns a sequential composition of the given members.
    pub fn seq(&mut self, members: Vec<RuleId>) -> RuleId {
        self.intern(Rule::Seq(members))
    }

    /// Interns a choice between the given alternatives.
    pub fn choice(&mut self, members: Vec<RuleId>) -> RuleId {
        self.intern(Rule::Choice(members))
    }

    /// Interns a zero-or-more repetition of `content`.
    pub fn repeat(&mut self, content: RuleId) -> RuleId {
        self.intern(Rule::Repeat(content))
    }

    /// Visits the subtree rooted at `id` in pre-order, calling `visit` with
    /// each node's id and content.
    ///
    /// An id the arena never produced is skipped silently, so the traversal
    /// is total. Trees are acyclic by construction (a node can only
    /// reference ids interned before it), so no visited-set is needed.
    pub fn walk<F>(&self, id: RuleId, visit: &mut F)
    where
        F: FnMut(RuleId, &Rule),
    {
        let Some(rule) = self.get(id) else {
            return;
        };
        visit(id, rule);
        for child in rule.child_ids() {
            self.walk(child, visit);
        }
    }

    /// Renders the subtree rooted at `id` as a debug S-expression, e.g.
    /// `(seq (sym expression) (char (include 43 45)))`.
    ///
    /// This is a tree-dump format for tests and diagnostics, not a parseable
    /// persisted form.
    ///
    /// # Panics
    ///
    /// Panics if `id` (or any child id reachable from it) was not produced
    /// by this arena.
    #[must_use]
    pub fn to_sexp(&self, id: RuleId) -> String {
        let rule = self
            .get(id)
            .unwrap_or_else(|| panic!("rule id {} is not in this arena", id.index()));
        match rule {
            Rule::Blank => "(blank)".to_string(),
            Rule::String(value) => format!("(str \"{value}\")"),
            Rule::CharacterSet(set) => set.to_string(),
            Rule::Symbol(name) => format!("(sym {name})"),
            Rule::Seq(members) => self.compound_sexp("seq", members),
            Rule::Choice(members) => self.compound_sexp("choice", members),
            Rule::Repeat(content) => format!("(repeat {})", self.to_sexp(*content)),
        }
    }

    fn compound_sexp(&self, tag: &str, members: &[RuleId]) -> String {
        let mut result = format!("({tag}");
        for &member in members {
            let _ = write!(result, " {}", self.to_sexp(member));
        }
        result.push(')');
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_idempotent() {
        let mut arena = RuleArena::new();
        let a = arena.character_set(CharacterSet::new().include_range(48, 57));
        let b = arena.character_set(CharacterSet::new().include_range(48, 57));
        assert_eq!(a, b);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_identical_subtrees_share_one_node() {
        let mut arena = RuleArena::new();
        let digit = arena.character_set(CharacterSet::new().include_range(48, 57));
        let digits_a = arena.repeat(digit);
        let digits_b = arena.repeat(digit);
        assert_eq!(digits_a, digits_b);

        let sign = arena.character_set(CharacterSet::new().include(43).include(45));
        let number = arena.seq(vec![sign, digits_a]);
        // digit leaf, repeat, sign leaf, seq
        assert_eq!(arena.len(), 4);
        assert!(arena.get(number).is_some());
    }

    #[test]
    fn test_same_membership_different_history_does_not_merge() {
        // Structural keying: a direct class and a complement class can
        // describe overlapping membership yet intern as distinct nodes.
        let mut arena = RuleArena::new();
        let direct = arena.character_set(CharacterSet::new().include_range(1, 9));
        let complement =
            arena.character_set(CharacterSet::new().include_all().exclude(10).include(0));
        assert_ne!(direct, complement);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_walk_visits_pre_order() {
        let mut arena = RuleArena::new();
        let letter = arena.character_set(CharacterSet::new().include_range(97, 122));
        let word = arena.repeat(letter);
        let keyword = arena.string("let");
        let root = arena.choice(vec![keyword, word]);

        let mut kinds = Vec::new();
        arena.walk(root, &mut |_, rule| kinds.push(rule.kind_name()));
        assert_eq!(kinds, ["choice", "string", "repeat", "char"]);
    }

    #[test]
    fn test_to_sexp_renders_nested_tree() {
        let mut arena = RuleArena::new();
        let newline = arena.character_set(CharacterSet::new().include_all().exclude(10));
        let body = arena.repeat(newline);
        let hash = arena.string("#");
        let comment = arena.seq(vec![hash, body]);
        assert_eq!(
            arena.to_sexp(comment),
            "(seq (str \"#\") (repeat (char include_all (exclude 0 10))))"
        );
    }

    #[test]
    fn test_get_rejects_foreign_ids() {
        let mut arena = RuleArena::new();
        let id = arena.blank();
        assert!(arena.get(id).is_some());

        let other = RuleArena::new();
        assert!(other.get(id).is_none());
    }
}
