//! A DOM-like tree of nodes owned by a [`typed_arena::Arena`], with parent,
//! child and sibling links held in `Cell`s.  Trimmed down from the
//! `rust-forest` arena-tree design.

use std::cell::Cell;

/// A node inside a tree, allocated in an arena.  `T` is the payload.
pub struct Node<'a, T: 'a> {
    parent: Cell<Option<&'a Node<'a, T>>>,
    previous_sibling: Cell<Option<&'a Node<'a, T>>>,
    next_sibling: Cell<Option<&'a Node<'a, T>>>,
    first_child: Cell<Option<&'a Node<'a, T>>>,
    last_child: Cell<Option<&'a Node<'a, T>>>,

    /// The data held by the node.
    pub data: T,
}

impl<'a, T> Node<'a, T> {
    /// Creates a new node with no relatives.
    pub fn new(data: T) -> Node<'a, T> {
        Node {
            parent: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            data,
        }
    }

    /// Returns a reference to the parent node, unless this node is the root.
    pub fn parent(&self) -> Option<&'a Node<'a, T>> {
        self.parent.get()
    }

    /// Returns a reference to the first child, unless the node has none.
    pub fn first_child(&self) -> Option<&'a Node<'a, T>> {
        self.first_child.get()
    }

    /// Returns a reference to the last child, unless the node has none.
    pub fn last_child(&self) -> Option<&'a Node<'a, T>> {
        self.last_child.get()
    }

    /// Returns a reference to the previous sibling, unless this node is the
    /// first of its siblings.
    pub fn previous_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.previous_sibling.get()
    }

    /// Returns a reference to the next sibling, unless this node is the last
    /// of its siblings.
    pub fn next_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.next_sibling.get()
    }

    /// Returns whether two references point to the same node.
    pub fn same_node(&self, other: &Node<'a, T>) -> bool {
        std::ptr::eq(self, other)
    }

    /// Returns an iterator over this node's children.
    pub fn children(&'a self) -> Children<'a, T> {
        Children(self.first_child())
    }

    /// Returns an iterator over this node's children, in reverse order.
    pub fn reverse_children(&'a self) -> ReverseChildren<'a, T> {
        ReverseChildren(self.last_child())
    }

    /// Detaches the node from its parent and siblings.  Children are not
    /// affected.
    pub fn detach(&self) {
        let parent = self.parent.take();
        let previous_sibling = self.previous_sibling.take();
        let next_sibling = self.next_sibling.take();

        if let Some(next_sibling) = next_sibling {
            next_sibling.previous_sibling.set(previous_sibling);
        } else if let Some(parent) = parent {
            parent.last_child.set(previous_sibling);
        }

        if let Some(previous_sibling) = previous_sibling {
            previous_sibling.next_sibling.set(next_sibling);
        } else if let Some(parent) = parent {
            parent.first_child.set(next_sibling);
        }
    }

    /// Appends a new child to the node, after any existing children.  The
    /// child is detached from its present position first.
    pub fn append(&'a self, new_child: &'a Node<'a, T>) {
        new_child.detach();
        new_child.parent.set(Some(self));
        if let Some(last_child) = self.last_child.take() {
            new_child.previous_sibling.set(Some(last_child));
            last_child.next_sibling.set(Some(new_child));
        } else {
            self.first_child.set(Some(new_child));
        }
        self.last_child.set(Some(new_child));
    }

    /// Inserts a new sibling after the node.  The sibling is detached from
    /// its present position first.
    pub fn insert_after(&'a self, new_sibling: &'a Node<'a, T>) {
        new_sibling.detach();
        new_sibling.parent.set(self.parent.get());
        new_sibling.previous_sibling.set(Some(self));
        if let Some(next_sibling) = self.next_sibling.take() {
            next_sibling.previous_sibling.set(Some(new_sibling));
            new_sibling.next_sibling.set(Some(next_sibling));
        } else if let Some(parent) = self.parent.get() {
            parent.last_child.set(Some(new_sibling));
        }
        self.next_sibling.set(Some(new_sibling));
    }
}

/// An iterator over the children of a node.
pub struct Children<'a, T: 'a>(Option<&'a Node<'a, T>>);

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        if let Some(node) = node {
            self.0 = node.next_sibling();
        }
        node
    }
}

/// An iterator over the children of a node, in reverse order.
pub struct ReverseChildren<'a, T: 'a>(Option<&'a Node<'a, T>>);

impl<'a, T> Iterator for ReverseChildren<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        if let Some(node) = node {
            self.0 = node.previous_sibling();
        }
        node
    }
}
