//! The syntax tree: node arena, root, and parent links.

use crate::arena::Arena;
use crate::ids::NodeId;
use crate::node::{Node, NodeKind, NodeTag};
use lintel_source::{FileId, Span};

/// One file's syntax tree.
///
/// The tree never changes after construction. Parent links are recomputed
/// from the child lists in [`SyntaxTree::new`], so a host only has to supply
/// kinds and spans.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    file: FileId,
    nodes: Arena<NodeId, Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// Builds a tree from an arena of nodes, linking every child to its parent.
    ///
    /// Child IDs that do not address a node in `nodes` are ignored when linking.
    pub fn new(file: FileId, mut nodes: Arena<NodeId, Node>, root: NodeId) -> Self {
        let links: Vec<(NodeId, NodeId)> = nodes
            .iter()
            .flat_map(|(id, node)| {
                node.kind
                    .children()
                    .into_iter()
                    .map(move |child| (child, id))
            })
            .collect();
        for (_, node) in nodes.iter_mut() {
            node.parent = None;
        }
        for (child, parent) in links {
            if nodes.contains(child) {
                nodes[child].parent = Some(parent);
            }
        }
        Self { file, nodes, root }
    }

    /// Returns the file the spans of this tree index into.
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Returns the root node (normally a `Program`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the node with the given ID, or `None` for a foreign ID.
    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.try_get(id)
    }

    /// Returns the kind of a node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    /// Returns the tag of a node.
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.nodes[id].kind.tag()
    }

    /// Returns the span of a node.
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id].span
    }

    /// Returns the parent of a node; `None` for the root and foreign IDs.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.try_get(id).and_then(|n| n.parent)
    }

    /// Returns the direct children of a node in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id].kind.children()
    }

    /// Iterates over the strict ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Iterates over the whole tree in pre-order (source order). Only IDs
    /// that address a node of this tree are yielded.
    pub fn walk(&self) -> PreOrder<'_> {
        self.descendants(self.root)
    }

    /// Iterates over `id` and everything below it in pre-order.
    pub fn descendants(&self, id: NodeId) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Returns the name of an `Identifier` or `JsxIdentifier` node.
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match &self.try_node(id)?.kind {
            NodeKind::Identifier { name, .. } | NodeKind::JsxIdentifier { name } => Some(name),
            _ => None,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn skip_parens(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::ParenthesizedExpression { expression } = self.kind(id) {
            id = *expression;
        }
        id
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct PreOrder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    /// IDs that address no node in the tree are skipped together with
    /// their (nonexistent) subtree.
    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.tree.try_node(id) else {
                continue;
            };
            self.stack
                .extend(node.kind.children().into_iter().rev());
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;

    #[test]
    fn parents_are_linked() {
        let mut b = TreeBuilder::new("App.tsx");
        let x = b.ident("x");
        let one = b.number(1.0);
        let decl = b.const_decl(x, one);
        let program = b.program(&[decl]);
        let built = b.finish(program);
        let tree = &built.tree;

        assert_eq!(tree.parent(program), None);
        let declarator = tree.parent(x).unwrap();
        assert_eq!(tree.tag(declarator), NodeTag::VariableDeclarator);
        assert_eq!(tree.parent(declarator), Some(decl));
        let chain: Vec<NodeId> = tree.ancestors(one).collect();
        assert_eq!(chain, vec![declarator, decl, program]);
    }

    #[test]
    fn walk_is_source_order() {
        let mut b = TreeBuilder::new("App.tsx");
        let a = b.ident("a");
        let c = b.ident("c");
        let sum = b.binary(a, "+", c);
        let stmt = b.expr_stmt(sum);
        let program = b.program(&[stmt]);
        let built = b.finish(program);
        let order: Vec<NodeId> = built.tree.walk().collect();
        assert_eq!(order, vec![program, stmt, sum, a, c]);
        let starts: Vec<u32> = order.iter().map(|id| built.tree.span(*id).start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn skip_parens_unwraps_nested() {
        let mut b = TreeBuilder::new("App.tsx");
        let v = b.ident("v");
        let p1 = b.paren(v);
        let p2 = b.paren(p1);
        let stmt = b.expr_stmt(p2);
        let program = b.program(&[stmt]);
        let built = b.finish(program);
        assert_eq!(built.tree.skip_parens(p2), v);
        assert_eq!(built.tree.ident_name(v), Some("v"));
    }

    #[test]
    fn walk_skips_dangling_children() {
        let mut nodes: Arena<NodeId, Node> = Arena::new();
        let program = nodes.alloc(Node {
            kind: NodeKind::Program {
                body: vec![NodeId::from_raw(7)],
            },
            span: Span::new(FileId::from_raw(0), 0, 0),
            parent: None,
        });
        let tree = SyntaxTree::new(FileId::from_raw(0), nodes, program);
        assert_eq!(tree.walk().collect::<Vec<_>>(), vec![program]);
        assert_eq!(tree.descendants(NodeId::from_raw(3)).count(), 0);
    }
}
