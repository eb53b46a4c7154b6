use crate::treap::implicit_tree;
use crate::treap::node::ImplicitNode;
use crate::treap::{Error, Result, Summable};
use log::{debug, trace};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, Index};

// Filler for the upper half of the XorShift state so that no `u64` seed yields the all-zero state.
const SEED_FILL: [u32; 2] = [0x9E37_79B9, 0x7F4A_7C15];

/// A sequence of numbers implemented using an implicit treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occuring in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// An implicit treap is a treap where the key of a node is implicitly determined by the size of
/// its left subtree. Each node also caches the sum of the values in its subtree. These properties
/// allow the sequence to insert and erase at an arbitrary position, and to sum an arbitrary range
/// of positions in expected `O(log N)` time.
///
/// All positions are zero-indexed. Operations given invalid positions return an `Error` and leave
/// the tree unchanged.
///
/// # Examples
///
/// ```
/// use implicit_treap::treap::ImplicitTreap;
///
/// let mut treap = ImplicitTreap::new();
/// treap.insert(0, 5).unwrap();
/// treap.insert(1, 24).unwrap();
/// treap.insert(2, 42).unwrap();
/// treap.push_front(1);
///
/// assert_eq!(treap.len(), 4);
/// assert_eq!(treap.range_sum(1, 2), Ok(29));
/// assert_eq!(treap.sum(), 72);
///
/// treap.erase(0, 2).unwrap();
/// assert_eq!(treap.iter().collect::<Vec<&i32>>(), vec![&24, &42]);
/// ```
pub struct ImplicitTreap<T> {
    tree: implicit_tree::Tree<T>,
    rng: XorShiftRng,
}

impl<T> ImplicitTreap<T> {
    /// Constructs a new, empty `ImplicitTreap<T>` whose priorities are drawn from a randomly
    /// seeded generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let treap: ImplicitTreap<u32> = ImplicitTreap::new();
    /// ```
    pub fn new() -> Self {
        ImplicitTreap {
            tree: None,
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a new, empty `ImplicitTreap<T>` whose priorities are drawn from a generator
    /// seeded with `seed`. Two trees with the same seed that receive the same operations have
    /// identical shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let treap: ImplicitTreap<u32> = ImplicitTreap::with_seed(42);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        debug!("constructing implicit treap with seed {}", seed);
        ImplicitTreap {
            tree: None,
            rng: SeedableRng::from_seed([
                seed as u32,
                (seed >> 32) as u32,
                SEED_FILL[0],
                SEED_FILL[1],
            ]),
        }
    }

    /// Returns an immutable reference to the value at a particular position. Returns `None` if
    /// the position is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// assert_eq!(treap.get(0), Some(&1));
    /// assert_eq!(treap.get(1), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        implicit_tree::get(&self.tree, index)
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// assert_eq!(treap.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        implicit_tree::len(&self.tree)
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let treap: ImplicitTreap<u32> = ImplicitTreap::new();
    /// assert!(treap.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Clears the tree, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// treap.clear();
    /// assert_eq!(treap.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        implicit_tree::drop_tree(self.tree.take());
    }

    /// Returns an iterator over the tree in positional order.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    ///
    /// let mut iterator = treap.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> ImplicitTreapIter<'_, T> {
        ImplicitTreapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }
}

impl<T> ImplicitTreap<T>
where
    T: Summable,
{
    /// Inserts a value so that it ends up at a particular position, shifting the elements at and
    /// after that position one position to the right.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `index` is greater than the length of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::{Error, ImplicitTreap};
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.insert(0, 1).unwrap();
    /// treap.insert(0, 2).unwrap();
    /// assert_eq!(treap.get(0), Some(&2));
    /// assert_eq!(treap.get(1), Some(&1));
    /// assert_eq!(treap.insert(3, 3), Err(Error::InvalidPosition { position: 3, len: 2 }));
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::InvalidPosition { position: index, len });
        }
        let ImplicitTreap {
            ref mut tree,
            ref mut rng,
        } = self;
        implicit_tree::insert(tree, index, ImplicitNode::new(value, rng.next_u32()));
        trace!("inserted at position {}, length is now {}", index, len + 1);
        Ok(())
    }

    /// Removes `count` consecutive values starting at a particular position.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCount` if `count` is zero, `Error::InvalidPosition` if `index` is
    /// not less than the length of the tree, and `Error::InvalidRange` if the removed span would
    /// extend past the end of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::{Error, ImplicitTreap};
    ///
    /// let mut treap: ImplicitTreap<i32> = vec![1, 2, 3, 4].into_iter().collect();
    /// treap.erase(1, 2).unwrap();
    /// assert_eq!(treap.iter().collect::<Vec<&i32>>(), vec![&1, &4]);
    /// assert_eq!(treap.erase(1, 2), Err(Error::InvalidRange { from: 1, to: 2, len: 2 }));
    /// ```
    pub fn erase(&mut self, index: usize, count: usize) -> Result<()> {
        let len = self.len();
        if count == 0 {
            return Err(Error::InvalidCount);
        }
        if index >= len {
            return Err(Error::InvalidPosition { position: index, len });
        }
        if count > len - index {
            return Err(Error::InvalidRange {
                from: index,
                to: index.saturating_add(count - 1),
                len,
            });
        }
        implicit_tree::drop_tree(implicit_tree::erase(&mut self.tree, index, count));
        trace!("erased {} at position {}, length is now {}", count, index, len - count);
        Ok(())
    }

    /// Removes the value at a particular position from the tree and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `index` is not less than the length of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// assert_eq!(treap.remove(0), Ok(1));
    /// assert!(treap.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        let value = implicit_tree::remove(&mut self.tree, index)
            .ok_or(Error::InvalidPosition { position: index, len })?;
        trace!("removed position {}, length is now {}", index, len - 1);
        Ok(value)
    }

    /// Returns the sum of the values at positions `from` through `to`, both inclusive. The tree is
    /// not modified.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `from` is not less than the length of the tree and
    /// `Error::InvalidRange` if `from` is greater than `to` or `to` is not less than the length of
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::{Error, ImplicitTreap};
    ///
    /// let treap: ImplicitTreap<i32> = vec![5, 24, 42, 13].into_iter().collect();
    /// assert_eq!(treap.range_sum(0, 1), Ok(29));
    /// assert_eq!(treap.range_sum(2, 2), Ok(42));
    /// assert_eq!(treap.range_sum(2, 1), Err(Error::InvalidRange { from: 2, to: 1, len: 4 }));
    /// ```
    pub fn range_sum(&self, from: usize, to: usize) -> Result<T> {
        let len = self.len();
        if from >= len {
            return Err(Error::InvalidPosition { position: from, len });
        }
        if from > to || to >= len {
            return Err(Error::InvalidRange { from, to, len });
        }
        Ok(implicit_tree::fold(&self.tree, from, to + 1))
    }

    /// Returns the sum of every value in the tree, or `T::default()` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// assert_eq!(treap.sum(), 0);
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// assert_eq!(treap.sum(), 3);
    /// ```
    pub fn sum(&self) -> T {
        implicit_tree::sum(&self.tree)
    }

    /// Replaces the value at a particular position and returns the old value.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `index` is not less than the length of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// assert_eq!(treap.set(0, 10), Ok(1));
    /// assert_eq!(treap.sum(), 12);
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let len = self.len();
        implicit_tree::set(&mut self.tree, index, value)
            .ok_or(Error::InvalidPosition { position: index, len })
    }

    /// Inserts a value at the front of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_front(1);
    /// treap.push_front(2);
    /// assert_eq!(treap.get(0), Some(&2));
    /// ```
    pub fn push_front(&mut self, value: T) {
        let ImplicitTreap {
            ref mut tree,
            ref mut rng,
        } = self;
        let new_node = Some(Box::new(ImplicitNode::new(value, rng.next_u32())));
        *tree = implicit_tree::merge(new_node, tree.take());
        trace!("pushed to the front, length is now {}", implicit_tree::len(tree));
    }

    /// Inserts a value at the back of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// assert_eq!(treap.get(0), Some(&1));
    /// ```
    pub fn push_back(&mut self, value: T) {
        let ImplicitTreap {
            ref mut tree,
            ref mut rng,
        } = self;
        let new_node = Some(Box::new(ImplicitNode::new(value, rng.next_u32())));
        *tree = implicit_tree::merge(tree.take(), new_node);
        trace!("pushed to the back, length is now {}", implicit_tree::len(tree));
    }

    /// Removes the value at the front of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// assert_eq!(treap.pop_front(), Some(1));
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let value = implicit_tree::remove(&mut self.tree, 0)?;
        trace!("popped from the front, length is now {}", self.len());
        Some(value)
    }

    /// Removes the value at the back of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap = ImplicitTreap::new();
    /// treap.push_back(1);
    /// treap.push_back(2);
    /// assert_eq!(treap.pop_back(), Some(2));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let value = implicit_tree::remove(&mut self.tree, len - 1)?;
        trace!("popped from the back, length is now {}", len - 1);
        Some(value)
    }

    /// Splits the tree in two at a particular position. Afterwards `self` contains the values at
    /// positions `[0, at)` and the returned tree contains the values at positions `[at, len)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `at` is greater than the length of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap: ImplicitTreap<i32> = vec![5, 24, 42, 13].into_iter().collect();
    /// let other = treap.split_off(2).unwrap();
    /// assert_eq!(treap.sum(), 29);
    /// assert_eq!(other.sum(), 55);
    /// ```
    pub fn split_off(&mut self, at: usize) -> Result<Self> {
        let len = self.len();
        if at > len {
            return Err(Error::InvalidPosition { position: at, len });
        }
        let (left, right) = implicit_tree::split(self.tree.take(), at);
        self.tree = left;
        trace!("split off {} values at position {}", len - at, at);
        Ok(ImplicitTreap {
            tree: right,
            rng: self.rng.gen::<XorShiftRng>(),
        })
    }

    /// Moves every value of `other` to the back of `self`, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use implicit_treap::treap::ImplicitTreap;
    ///
    /// let mut treap: ImplicitTreap<i32> = vec![5, 24].into_iter().collect();
    /// let mut other: ImplicitTreap<i32> = vec![42, 13].into_iter().collect();
    /// treap.append(&mut other);
    /// assert_eq!(treap.iter().collect::<Vec<&i32>>(), vec![&5, &24, &42, &13]);
    /// assert!(other.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let appended = other.len();
        self.tree = implicit_tree::merge(self.tree.take(), other.tree.take());
        trace!("appended {} values, length is now {}", appended, self.len());
    }
}

impl<T> Drop for ImplicitTreap<T> {
    fn drop(&mut self) {
        implicit_tree::drop_tree(self.tree.take());
    }
}

impl<T> IntoIterator for ImplicitTreap<T> {
    type IntoIter = ImplicitTreapIntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.take(),
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ImplicitTreap<T>
where
    T: 'a,
{
    type IntoIter = ImplicitTreapIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `ImplicitTreap<T>`.
///
/// This iterator traverses the elements of the tree in positional order and yields owned values.
pub struct ImplicitTreapIntoIter<T> {
    current: implicit_tree::Tree<T>,
    stack: Vec<ImplicitNode<T>>,
}

impl<T> Iterator for ImplicitTreapIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let ImplicitNode { value, right, .. } = node;
            self.current = right;
            value
        })
    }
}

impl<T> Drop for ImplicitTreapIntoIter<T> {
    fn drop(&mut self) {
        implicit_tree::drop_tree(self.current.take());
        for mut node in self.stack.drain(..) {
            implicit_tree::drop_tree(node.right.take());
        }
    }
}

/// An iterator for `ImplicitTreap<T>`.
///
/// This iterator traverses the elements of the tree in positional order and yields immutable
/// references.
pub struct ImplicitTreapIter<'a, T> {
    current: &'a implicit_tree::Tree<T>,
    stack: Vec<&'a ImplicitNode<T>>,
}

impl<'a, T> Iterator for ImplicitTreapIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let ImplicitNode {
                ref value,
                ref right,
                ..
            } = node;
            self.current = right;
            value
        })
    }
}

impl<T> Default for ImplicitTreap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ImplicitTreap<T>
where
    T: Summable,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut treap = ImplicitTreap::new();
        treap.extend(iter);
        treap
    }
}

impl<T> Extend<T> for ImplicitTreap<T>
where
    T: Summable,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> Add for ImplicitTreap<T>
where
    T: Summable,
{
    type Output = ImplicitTreap<T>;

    fn add(mut self, mut other: ImplicitTreap<T>) -> ImplicitTreap<T> {
        self.append(&mut other);
        self
    }
}

impl<T> Index<usize> for ImplicitTreap<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Error: index out of bounds.")
    }
}

impl<T> fmt::Debug for ImplicitTreap<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
