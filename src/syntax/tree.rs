use nonempty::NonEmpty;

/// A rule in the parse tree.
///
/// Fields are nodes with a value and no children. Blocks are nodes with
/// children and, optionally, a label stored as their value. Values keep their
/// surface form, including any quotes or parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    rule: String,
    value: Option<String>,
    children: Vec<Node>,
    line: usize,
}

impl Node {
    /// Creates a node with no value and no children.
    #[must_use]
    pub fn new(rule: impl Into<String>, line: usize) -> Self {
        Self {
            rule: rule.into(),
            value: None,
            children: Vec::new(),
            line,
        }
    }

    /// Sets the raw value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// The rule name, i.e. the keyword that introduced this node.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The raw value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// 1-based source line the node starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The first child for `rule`.
    #[must_use]
    pub fn child(&self, rule: &str) -> Option<&Self> {
        self.children.iter().find(|node| node.rule == rule)
    }

    /// All children for `rule`, in source order.
    pub fn children<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |node| node.rule == rule)
    }

    /// Every child, in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Self] {
        &self.children
    }
}

/// The parsed content of a source file: one or more `cv` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    cvs: NonEmpty<Node>,
}

impl ParseTree {
    /// Wraps the top-level `cv` blocks. Returns `None` if there are none.
    #[must_use]
    pub fn new(cvs: Vec<Node>) -> Option<Self> {
        NonEmpty::from_vec(cvs).map(|cvs| Self { cvs })
    }

    /// The first `cv` block, which is the one that gets built.
    #[must_use]
    pub fn cv(&self) -> &Node {
        self.cvs.first()
    }

    /// All `cv` blocks in source order.
    pub fn cvs(&self) -> impl Iterator<Item = &Node> {
        self.cvs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_lookup_preserves_source_order() {
        let node = Node::new("formacion", 1)
            .with_child(Node::new("oficial", 2).with_value("a"))
            .with_child(Node::new("complementaria", 3))
            .with_child(Node::new("oficial", 4).with_value("b"));

        let values: Vec<_> = node.children("oficial").filter_map(Node::value).collect();
        assert_eq!(values, ["a", "b"]);
        assert_eq!(node.child("oficial").and_then(Node::value), Some("a"));
        assert!(node.child("idiomas").is_none());
    }

    #[test]
    fn empty_tree_is_rejected() {
        assert!(ParseTree::new(Vec::new()).is_none());
    }
}
