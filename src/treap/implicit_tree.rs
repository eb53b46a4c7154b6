use crate::treap::node::ImplicitNode;
use crate::treap::Summable;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<ImplicitNode<T>>>;

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

type Path<T> = Vec<(Box<ImplicitNode<T>>, Side)>;

// Hangs `tree` under the last node of `path` on the recorded side, then walks back up to the
// first node, refreshing aggregates along the way.
fn reattach<T>(mut path: Path<T>, mut tree: Tree<T>) -> Tree<T>
where
    T: Summable,
{
    while let Some((mut node, side)) = path.pop() {
        match side {
            Side::Left => node.left = tree,
            Side::Right => node.right = tree,
        }
        node.update();
        tree = Some(node);
    }
    tree
}

/// Concatenates two trees where every element of `l_tree` precedes every element of `r_tree`.
///
/// The root with the higher priority wins and the left root wins ties.
pub fn merge<T>(l_tree: Tree<T>, r_tree: Tree<T>) -> Tree<T>
where
    T: Summable,
{
    let mut path = Vec::new();
    let mut l_tree = l_tree;
    let mut r_tree = r_tree;
    let tree = loop {
        match (l_tree, r_tree) {
            (Some(mut l_node), Some(mut r_node)) => {
                if l_node.priority >= r_node.priority {
                    l_tree = l_node.right.take();
                    r_tree = Some(r_node);
                    path.push((l_node, Side::Right));
                } else {
                    l_tree = Some(l_node);
                    r_tree = r_node.left.take();
                    path.push((r_node, Side::Left));
                }
            },
            (new_tree, None) | (None, new_tree) => break new_tree,
        }
    };
    reattach(path, tree)
}

/// Splits a tree into its first `index` elements and the remaining elements. If `index` is
/// greater than the length of the tree, the right tree is empty.
pub fn split<T>(tree: Tree<T>, index: usize) -> (Tree<T>, Tree<T>)
where
    T: Summable,
{
    let mut l_path = Vec::new();
    let mut r_path = Vec::new();
    let mut current = tree;
    let mut index = index;
    while let Some(mut node) = current {
        let key = node.get_implicit_key();
        if index <= key {
            current = node.left.take();
            r_path.push((node, Side::Left));
        } else {
            index -= key + 1;
            current = node.right.take();
            l_path.push((node, Side::Right));
        }
    }
    (reattach(l_path, None), reattach(r_path, None))
}

pub fn insert<T>(tree: &mut Tree<T>, index: usize, new_node: ImplicitNode<T>)
where
    T: Summable,
{
    let (left, right) = split(tree.take(), index);
    *tree = merge(merge(left, Some(Box::new(new_node))), right);
}

/// Removes `count` elements starting at `index` and returns the detached segment.
pub fn erase<T>(tree: &mut Tree<T>, index: usize, count: usize) -> Tree<T>
where
    T: Summable,
{
    let (left, rest) = split(tree.take(), index);
    let (middle, right) = split(rest, count);
    *tree = merge(left, right);
    middle
}

pub fn remove<T>(tree: &mut Tree<T>, index: usize) -> Option<T>
where
    T: Summable,
{
    if index >= len(tree) {
        return None;
    }
    erase(tree, index, 1).map(|node| node.value)
}

/// Replaces the value at `index`, refreshing the sums of every ancestor. Returns the old value or
/// `None` if `index` is out of bounds.
pub fn set<T>(tree: &mut Tree<T>, index: usize, value: T) -> Option<T>
where
    T: Summable,
{
    if index >= len(tree) {
        return None;
    }
    let mut path = Vec::new();
    let mut current = tree.take();
    let mut index = index;
    while let Some(mut node) = current {
        let key = node.get_implicit_key();
        match index.cmp(&key) {
            Ordering::Less => {
                current = node.left.take();
                path.push((node, Side::Left));
            },
            Ordering::Greater => {
                index -= key + 1;
                current = node.right.take();
                path.push((node, Side::Right));
            },
            Ordering::Equal => {
                let old_value = mem::replace(&mut node.value, value);
                node.update();
                *tree = reattach(path, Some(node));
                return Some(old_value);
            },
        }
    }
    *tree = reattach(path, None);
    None
}

pub fn get<T>(tree: &Tree<T>, index: usize) -> Option<&T> {
    let mut current = tree;
    let mut index = index;
    while let Some(ref node) = current {
        let key = node.get_implicit_key();
        match index.cmp(&key) {
            Ordering::Less => current = &node.left,
            Ordering::Greater => {
                index -= key + 1;
                current = &node.right;
            },
            Ordering::Equal => return Some(&node.value),
        }
    }
    None
}

// Sum of the first `count` elements.
fn prefix_sum<T>(tree: &Tree<T>, count: usize) -> T
where
    T: Summable,
{
    let mut ret = T::default();
    let mut current = tree;
    let mut count = count;
    while count > 0 {
        let node = match current {
            Some(ref node) => node,
            None => break,
        };
        if count >= node.len {
            return ret + node.sum;
        }
        let key = node.get_implicit_key();
        if count <= key {
            current = &node.left;
        } else {
            ret = ret + sum(&node.left) + node.value;
            count -= key + 1;
            current = &node.right;
        }
    }
    ret
}

// Sum of every element from `index` onwards.
fn suffix_sum<T>(tree: &Tree<T>, index: usize) -> T
where
    T: Summable,
{
    let mut ret = T::default();
    let mut current = tree;
    let mut index = index;
    while let Some(ref node) = current {
        if index == 0 {
            return node.sum + ret;
        }
        let key = node.get_implicit_key();
        if index <= key {
            ret = node.value + sum(&node.right) + ret;
            current = &node.left;
        } else {
            index -= key + 1;
            current = &node.right;
        }
    }
    ret
}

/// Returns the sum of the elements in `[from, to)` without modifying the tree. Positions past the
/// end of the tree contribute nothing.
pub fn fold<T>(tree: &Tree<T>, from: usize, to: usize) -> T
where
    T: Summable,
{
    let mut current = tree;
    let mut from = from;
    let mut to = to;
    while let Some(ref node) = current {
        if from >= to {
            break;
        }
        let key = node.get_implicit_key();
        if to <= key {
            current = &node.left;
        } else if from > key {
            from -= key + 1;
            to -= key + 1;
            current = &node.right;
        } else {
            return suffix_sum(&node.left, from) + node.value + prefix_sum(&node.right, to - key - 1);
        }
    }
    T::default()
}

pub fn len<T>(tree: &Tree<T>) -> usize {
    match tree {
        Some(ref node) => node.len,
        None => 0,
    }
}

pub fn sum<T>(tree: &Tree<T>) -> T
where
    T: Summable,
{
    match tree {
        Some(ref node) => node.sum,
        None => T::default(),
    }
}

/// Releases every node of a tree without recursing on its height.
pub fn drop_tree<T>(tree: Tree<T>) {
    let mut stack = Vec::new();
    stack.extend(tree);
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
