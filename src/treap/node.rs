use crate::treap::implicit_tree::Tree;
use crate::treap::Summable;

/// A struct representing an internal node of an implicit treap.
///
/// Besides its own value, every node caches the number of nodes and the sum of the values in the
/// subtree rooted at it. The cached fields are only valid after `update` is called on a node whose
/// children have changed.
pub struct ImplicitNode<T> {
    pub value: T,
    pub priority: u32,
    pub len: usize,
    pub sum: T,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> ImplicitNode<T>
where
    T: Summable,
{
    pub fn new(value: T, priority: u32) -> Self {
        ImplicitNode {
            value,
            priority,
            len: 1,
            sum: value,
            left: None,
            right: None,
        }
    }

    pub fn update(&mut self) {
        let ImplicitNode {
            ref value,
            ref mut len,
            ref mut sum,
            ref left,
            ref right,
            ..
        } = self;
        *len = 1;
        *sum = *value;
        if let Some(ref left_node) = left {
            *len += left_node.len;
            *sum = left_node.sum + *sum;
        }
        if let Some(ref right_node) = right {
            *len += right_node.len;
            *sum = *sum + right_node.sum;
        }
    }
}

impl<T> ImplicitNode<T> {
    /// Returns the zero-indexed position of this node within its own subtree.
    pub fn get_implicit_key(&self) -> usize {
        match self.left {
            Some(ref left_node) => left_node.len,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImplicitNode;

    #[test]
    fn test_new() {
        let node = ImplicitNode::new(7, 3);
        assert_eq!(node.len, 1);
        assert_eq!(node.sum, 7);
        assert_eq!(node.get_implicit_key(), 0);
    }

    #[test]
    fn test_update() {
        let mut node = ImplicitNode::new(7, 3);
        node.left = Some(Box::new(ImplicitNode::new(-2, 1)));
        node.right = Some(Box::new(ImplicitNode::new(10, 2)));
        node.update();
        assert_eq!(node.len, 3);
        assert_eq!(node.sum, 15);
        assert_eq!(node.get_implicit_key(), 1);

        node.left = None;
        node.update();
        assert_eq!(node.len, 2);
        assert_eq!(node.sum, 17);
        assert_eq!(node.get_implicit_key(), 0);
    }

    #[test]
    fn test_update_float() {
        let mut node = ImplicitNode::new(0.5, 3);
        node.right = Some(Box::new(ImplicitNode::new(0.25, 1)));
        node.update();
        assert_eq!(node.sum, 0.75);
    }
}
