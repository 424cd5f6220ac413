//! Visitor trait for walking a doc comment tree.
//!
//! Implement [`DocVisitor::visit`] and call [`walk`] to continue into the
//! children of a node.

use crate::node::DocNodeRef;

pub trait DocVisitor<'n, 'a> {
    fn visit(&mut self, node: DocNodeRef<'n, 'a>) {
        walk(self, node);
    }
}

/// Visit every child of `node` in order.
pub fn walk<'n, 'a, V: DocVisitor<'n, 'a> + ?Sized>(visitor: &mut V, node: DocNodeRef<'n, 'a>) {
    for child in node.child_nodes() {
        visitor.visit(child);
    }
}
