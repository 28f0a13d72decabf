//! Intrusive unbalanced binary search tree.
//!
//! Elements embed a [`TreeLink`] holding their left and right children. The
//! tree stores only its root and the ordering it was built with. There are no
//! rotations: insertion order decides the shape, and sorted input degrades to
//! a list of depth n.
//!
//! Equal elements go to the right, so duplicates are allowed and an inorder
//! walk yields them in insertion order.
//!
//! # Erase Cost
//!
//! [`Tree::erase`] unlinks the target's whole subtree and reinserts every
//! descendant into a fresh subtree that takes the target's place. This needs
//! no predecessor splicing but costs O(k · d) for k descendants and resulting
//! depth d. Erase is not O(log n) even on a well-shaped tree.
//!
//! # Example
//!
//! ```
//! use std::ptr::NonNull;
//! use nexus_intrusive::{Tree, TreeLink, TreeLinked};
//!
//! struct Level {
//!     price: u64,
//!     link: TreeLink<Level>,
//! }
//!
//! impl TreeLinked for Level {
//!     fn tree_link(&self) -> &TreeLink<Self> {
//!         &self.link
//!     }
//! }
//!
//! let levels: Vec<Level> = [101, 99, 100]
//!     .into_iter()
//!     .map(|price| Level { price, link: TreeLink::new() })
//!     .collect();
//!
//! let mut book = Tree::new(|a: &Level, b: &Level| a.price < b.price);
//! for level in &levels {
//!     // Safety: `levels` outlives `book` and is never moved while linked.
//!     unsafe { book.insert(NonNull::from(level)) };
//! }
//!
//! assert_eq!(book.min().map(|l| l.price), Some(99));
//! assert_eq!(book.max().map(|l| l.price), Some(101));
//!
//! let mut prices = Vec::new();
//! book.inorder(|l| {
//!     prices.push(l.price);
//!     true
//! });
//! assert_eq!(prices, vec![99, 100, 101]);
//! ```

use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;
use std::collections::VecDeque;

type Child<T> = Cell<Option<NonNull<T>>>;

/// Left / right child pointers embedded in a tree element.
///
/// `None` marks an empty child position.
pub struct TreeLink<T> {
    left: Child<T>,
    right: Child<T>,
}

impl<T> TreeLink<T> {
    /// Creates a link with no children.
    #[inline]
    pub const fn new() -> Self {
        Self {
            left: Cell::new(None),
            right: Cell::new(None),
        }
    }

    /// Returns the left child.
    #[inline]
    pub fn left(&self) -> Option<NonNull<T>> {
        self.left.get()
    }

    /// Returns the right child.
    #[inline]
    pub fn right(&self) -> Option<NonNull<T>> {
        self.right.get()
    }

    /// Returns `true` if both child positions are empty.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.get().is_none() && self.right.get().is_none()
    }

    /// Clears both children so the element can be inserted again.
    ///
    /// Use this on elements left behind by [`Tree::clear`].
    ///
    /// # Safety
    ///
    /// The element must not be reachable from any tree still in use.
    #[inline]
    pub unsafe fn force_unlink(&self) {
        self.reset();
    }

    #[inline]
    fn reset(&self) {
        self.left.set(None);
        self.right.set(None);
    }
}

impl<T> Default for TreeLink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TreeLink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeLink")
            .field("left", &self.left.get())
            .field("right", &self.right.get())
            .finish()
    }
}

/// Trait for types that can participate in a [`Tree`].
pub trait TreeLinked: Sized {
    /// Returns the embedded tree link.
    fn tree_link(&self) -> &TreeLink<Self>;
}

/// Traversal order for [`Tree::iterate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, node, right subtree. Sorted order.
    Inorder,
    /// Left subtree, right subtree, node.
    Postorder,
    /// Level by level, left to right.
    BreadthFirst,
}

// Tree elements are alive while linked (tree contract).
#[inline]
fn node<'a, T>(ptr: NonNull<T>) -> &'a T {
    // Safety: only called on pointers reachable from a tree
    unsafe { ptr.as_ref() }
}

#[inline]
fn left<T: TreeLinked>(ptr: NonNull<T>) -> Option<NonNull<T>> {
    node(ptr).tree_link().left.get()
}

#[inline]
fn right<T: TreeLinked>(ptr: NonNull<T>) -> Option<NonNull<T>> {
    node(ptr).tree_link().right.get()
}

/// An intrusive binary search tree ordered by a strict less-than relation.
///
/// `less` is bound at construction and must stay consistent for the life
/// of the tree. Queries anchored at the root are safe. Inserting and the
/// `subtree_*` queries, which start from a caller-supplied element, are not.
pub struct Tree<T: TreeLinked, F = fn(&T, &T) -> bool> {
    root: Option<NonNull<T>>,
    less: F,
}

impl<T: TreeLinked + Ord> Tree<T> {
    /// Creates an empty tree ordered by `T`'s `Ord` impl.
    #[inline]
    pub fn ordered() -> Self {
        Self::new(PartialOrd::lt)
    }
}

impl<T: TreeLinked + Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::ordered()
    }
}

impl<T, F> Tree<T, F>
where
    T: TreeLinked,
    F: Fn(&T, &T) -> bool,
{
    /// Creates an empty tree ordered by `less`.
    #[inline]
    pub const fn new(less: F) -> Self {
        Self { root: None, less }
    }

    /// Returns `true` if the tree has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Detaches every element in O(1).
    ///
    /// Former elements keep stale child links. Call
    /// [`TreeLink::force_unlink`] on each before inserting it again.
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Returns the root element.
    #[inline]
    pub fn root(&self) -> Option<&T> {
        self.root.map(node)
    }

    /// Links `ptr` into the tree. Not rebalanced.
    ///
    /// # Safety
    ///
    /// - `ptr` points to a live element that is not in any tree
    /// - the element stays alive and does not move until it is erased or the
    ///   tree is cleared
    pub unsafe fn insert(&mut self, ptr: NonNull<T>) {
        debug_assert!(node(ptr).tree_link().is_leaf(), "node has children");
        insert_at(&mut self.root, ptr, &self.less);
    }

    /// Removes the first element equivalent to `probe` (neither is less than
    /// the other), found by the same descent as insertion.
    ///
    /// The removed element's links are reset so it can be inserted again.
    /// Returns `None` and leaves the tree unchanged if nothing is equivalent.
    ///
    /// See the [module docs](self) for the cost.
    pub fn erase(&mut self, probe: &T) -> Option<NonNull<T>> {
        // Child cell of the parent that points at `cur`; None while at root.
        let mut parent: Option<&Child<T>> = None;
        let mut cur = self.root?;

        loop {
            let at = node(cur);
            let child = if (self.less)(probe, at) {
                &at.tree_link().left
            } else if (self.less)(at, probe) {
                &at.tree_link().right
            } else {
                break;
            };
            parent = Some(child);
            cur = child.get()?;
        }

        let link = node(cur).tree_link();
        let mut orphans = Vec::new();
        walk_postorder(link.left.get(), |n| {
            orphans.push(n);
            true
        });
        walk_postorder(link.right.get(), |n| {
            orphans.push(n);
            true
        });

        for &orphan in &orphans {
            node(orphan).tree_link().reset();
        }

        let mut subtree = None;
        for &orphan in &orphans {
            insert_at(&mut subtree, orphan, &self.less);
        }

        match parent {
            Some(child) => child.set(subtree),
            None => self.root = subtree,
        }
        link.reset();

        Some(cur)
    }

    /// Returns the least element.
    #[inline]
    pub fn min(&self) -> Option<&T> {
        self.root.map(|r| node(leftmost(r)))
    }

    /// Returns the greatest element.
    #[inline]
    pub fn max(&self) -> Option<&T> {
        self.root.map(|r| node(rightmost(r)))
    }

    /// Returns the least element in the subtree rooted at `at`.
    ///
    /// # Safety
    ///
    /// `at` must currently be an element of this tree. A detached element
    /// (for example one left behind by [`clear`](Self::clear)) may still
    /// point at children that no longer exist.
    #[inline]
    pub unsafe fn subtree_min<'a>(&'a self, at: &'a T) -> &'a T {
        node(leftmost(NonNull::from(at)))
    }

    /// Returns the greatest element in the subtree rooted at `at`.
    ///
    /// # Safety
    ///
    /// Same contract as [`subtree_min`](Self::subtree_min).
    #[inline]
    pub unsafe fn subtree_max<'a>(&'a self, at: &'a T) -> &'a T {
        node(rightmost(NonNull::from(at)))
    }

    /// Returns the number of elements. O(n).
    pub fn len(&self) -> usize {
        let mut count = 0;
        walk_inorder(self.root, |_| {
            count += 1;
            true
        });
        count
    }

    /// Returns the number of levels: 0 when empty, 1 for a lone root.
    #[inline]
    pub fn height(&self) -> usize {
        height_of(self.root)
    }

    /// Returns the number of levels in the subtree rooted at `at`.
    ///
    /// # Safety
    ///
    /// Same contract as [`subtree_min`](Self::subtree_min).
    #[inline]
    pub unsafe fn subtree_height(&self, at: &T) -> usize {
        height_of(Some(NonNull::from(at)))
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Visits node, left, right until `f` returns `false`.
    pub fn preorder<V>(&self, mut f: V)
    where
        V: FnMut(&T) -> bool,
    {
        walk_preorder(self.root, |n| f(node(n)));
    }

    /// Visits left, node, right (sorted order) until `f` returns `false`.
    pub fn inorder<V>(&self, mut f: V)
    where
        V: FnMut(&T) -> bool,
    {
        walk_inorder(self.root, |n| f(node(n)));
    }

    /// Visits left, right, node until `f` returns `false`.
    pub fn postorder<V>(&self, mut f: V)
    where
        V: FnMut(&T) -> bool,
    {
        walk_postorder(self.root, |n| f(node(n)));
    }

    /// Visits every element level by level. There is no early exit.
    pub fn breadth_first<V>(&self, mut f: V)
    where
        V: FnMut(&T),
    {
        let mut queue: VecDeque<NonNull<T>> = self.root.into_iter().collect();
        while let Some(n) = queue.pop_front() {
            f(node(n));
            queue.extend(left(n));
            queue.extend(right(n));
        }
    }

    /// Visits elements in the given order.
    ///
    /// `f` returning `false` stops every order except
    /// [`Traversal::BreadthFirst`], which always visits everything.
    pub fn iterate<V>(&self, order: Traversal, mut f: V)
    where
        V: FnMut(&T) -> bool,
    {
        match order {
            Traversal::Preorder => self.preorder(f),
            Traversal::Inorder => self.inorder(f),
            Traversal::Postorder => self.postorder(f),
            Traversal::BreadthFirst => self.breadth_first(|n| {
                f(n);
            }),
        }
    }
}

impl<T, F> fmt::Debug for Tree<T, F>
where
    T: TreeLinked + fmt::Debug,
    F: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.inorder(|n| {
            list.entry(n);
            true
        });
        list.finish()
    }
}

// =============================================================================
// Walks
// =============================================================================

fn insert_at<T, F>(root: &mut Option<NonNull<T>>, ptr: NonNull<T>, less: &F)
where
    T: TreeLinked,
    F: Fn(&T, &T) -> bool,
{
    let Some(mut cur) = *root else {
        *root = Some(ptr);
        return;
    };

    let new = node(ptr);
    loop {
        let at = node(cur);
        let child = if less(new, at) {
            &at.tree_link().left
        } else {
            &at.tree_link().right
        };
        match child.get() {
            Some(next) => cur = next,
            None => {
                child.set(Some(ptr));
                return;
            }
        }
    }
}

fn leftmost<T: TreeLinked>(mut ptr: NonNull<T>) -> NonNull<T> {
    while let Some(l) = left(ptr) {
        ptr = l;
    }
    ptr
}

fn rightmost<T: TreeLinked>(mut ptr: NonNull<T>) -> NonNull<T> {
    while let Some(r) = right(ptr) {
        ptr = r;
    }
    ptr
}

fn walk_preorder<T, V>(root: Option<NonNull<T>>, mut visit: V)
where
    T: TreeLinked,
    V: FnMut(NonNull<T>) -> bool,
{
    let mut stack: Vec<NonNull<T>> = root.into_iter().collect();
    while let Some(n) = stack.pop() {
        if !visit(n) {
            return;
        }
        // Right first so left pops first.
        stack.extend(right(n));
        stack.extend(left(n));
    }
}

fn walk_inorder<T, V>(root: Option<NonNull<T>>, mut visit: V)
where
    T: TreeLinked,
    V: FnMut(NonNull<T>) -> bool,
{
    let mut stack = Vec::new();
    let mut cur = root;
    loop {
        while let Some(n) = cur {
            stack.push(n);
            cur = left(n);
        }
        let Some(n) = stack.pop() else {
            return;
        };
        if !visit(n) {
            return;
        }
        cur = right(n);
    }
}

fn walk_postorder<T, V>(root: Option<NonNull<T>>, mut visit: V)
where
    T: TreeLinked,
    V: FnMut(NonNull<T>) -> bool,
{
    let mut stack: Vec<NonNull<T>> = Vec::new();
    let mut cur = root;
    let mut last = None;
    loop {
        while let Some(n) = cur {
            stack.push(n);
            cur = left(n);
        }
        let Some(&top) = stack.last() else {
            return;
        };
        let r = right(top);
        if r.is_some() && r != last {
            cur = r;
        } else {
            if !visit(top) {
                return;
            }
            last = Some(top);
            stack.pop();
        }
    }
}

fn height_of<T: TreeLinked>(root: Option<NonNull<T>>) -> usize {
    let mut level: Vec<NonNull<T>> = root.into_iter().collect();
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .iter()
            .flat_map(|&n| [left(n), right(n)])
            .flatten()
            .collect();
    }
    height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Node {
        value: i32,
        link: TreeLink<Node>,
    }

    impl Node {
        fn new(value: i32) -> Self {
            Self {
                value,
                link: TreeLink::new(),
            }
        }
    }

    impl TreeLinked for Node {
        fn tree_link(&self) -> &TreeLink<Self> {
            &self.link
        }
    }

    fn by_value(a: &Node, b: &Node) -> bool {
        a.value < b.value
    }

    fn nodes(values: impl IntoIterator<Item = i32>) -> Vec<Box<Node>> {
        values.into_iter().map(|v| Box::new(Node::new(v))).collect()
    }

    fn tree_of(elems: &[Box<Node>]) -> Tree<Node> {
        let mut tree: Tree<Node> = Tree::new(by_value);
        for n in elems {
            unsafe { tree.insert(NonNull::from(&**n)) };
        }
        tree
    }

    fn collect<F: Fn(&Node, &Node) -> bool>(tree: &Tree<Node, F>, order: Traversal) -> Vec<i32> {
        let mut out = Vec::new();
        tree.iterate(order, |n| {
            out.push(n.value);
            true
        });
        out
    }

    #[test]
    fn empty_tree() {
        let tree: Tree<Node> = Tree::new(by_value);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.root().is_none());
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert!(collect(&tree, Traversal::BreadthFirst).is_empty());
    }

    #[test]
    fn single_node() {
        let elems = nodes([7]);
        let tree = tree_of(&elems);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root().map(|n| n.value), Some(7));
        assert!(elems[0].link.is_leaf());
    }

    #[test]
    fn four_traversal_orders() {
        let elems = nodes([4, 2, 1, 3, 0, 5]);
        let tree = tree_of(&elems);

        assert_eq!(collect(&tree, Traversal::Preorder), vec![4, 2, 1, 0, 3, 5]);
        assert_eq!(collect(&tree, Traversal::Inorder), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(collect(&tree, Traversal::Postorder), vec![0, 1, 3, 2, 5, 4]);
        assert_eq!(collect(&tree, Traversal::BreadthFirst), vec![4, 2, 5, 1, 3, 0]);
        assert_eq!(tree.height(), 4);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn erase_inner_node_reattaches_subtree() {
        let elems = nodes([4, 2, 1, 3, 0, 5]);
        let mut tree = tree_of(&elems);

        let erased = tree.erase(&Node::new(1));
        assert_eq!(erased, Some(NonNull::from(&*elems[2])));
        assert!(elems[2].link.is_leaf());
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.len(), 5);
        assert_eq!(collect(&tree, Traversal::Inorder), vec![0, 2, 3, 4, 5]);

        assert_eq!(tree.erase(&Node::new(30)), None);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn erase_root() {
        let elems = nodes([4, 2, 1, 3, 0, 5]);
        let mut tree = tree_of(&elems);

        tree.erase(&Node::new(4));
        assert_eq!(collect(&tree, Traversal::Inorder), vec![0, 1, 2, 3, 5]);
        // Postorder of the left subtree starts with 0, so 0 becomes the root.
        assert_eq!(tree.root().map(|n| n.value), Some(0));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn erase_leaf_and_last_node() {
        let elems = nodes([2, 1]);
        let mut tree = tree_of(&elems);

        tree.erase(&Node::new(1));
        assert_eq!(tree.height(), 1);
        assert!(elems[0].link.is_leaf());

        tree.erase(&Node::new(2));
        assert!(tree.is_empty());
        assert_eq!(tree.erase(&Node::new(2)), None);
    }

    #[test]
    fn erased_node_can_be_reinserted() {
        let elems = nodes([5, 3, 8, 1, 4]);
        let mut tree = tree_of(&elems);

        let ptr = tree.erase(&Node::new(3)).unwrap();
        assert_eq!(tree.len(), 4);
        unsafe { tree.insert(ptr) };
        assert_eq!(tree.len(), 5);
        assert_eq!(collect(&tree, Traversal::Inorder), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn duplicates_go_right() {
        let elems = nodes([2, 2, 1, 2]);
        let mut tree = tree_of(&elems);

        assert_eq!(collect(&tree, Traversal::Inorder), vec![1, 2, 2, 2]);
        assert_eq!(elems[0].link.right(), Some(NonNull::from(&*elems[1])));

        // Erase removes the first equivalent met on descent.
        assert_eq!(tree.erase(&Node::new(2)), Some(NonNull::from(&*elems[0])));
        assert_eq!(collect(&tree, Traversal::Inorder), vec![1, 2, 2]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn min_max_and_leaf_heights() {
        let elems = nodes([4, 2, 1, 3, 0, 5]);
        let tree = tree_of(&elems);

        let min = tree.min().unwrap();
        let max = tree.max().unwrap();
        assert_eq!(min.value, 0);
        assert_eq!(max.value, 5);
        assert_eq!(unsafe { tree.subtree_height(min) }, 1);
        assert_eq!(unsafe { tree.subtree_height(max) }, 1);

        let two = &*elems[1];
        unsafe {
            assert_eq!(tree.subtree_min(two).value, 0);
            assert_eq!(tree.subtree_max(two).value, 3);
            assert_eq!(tree.subtree_height(two), 3);
        }
    }

    #[test]
    fn traversals_stop_early() {
        let elems = nodes([4, 2, 1, 3, 0, 5]);
        let tree = tree_of(&elems);

        for order in [Traversal::Preorder, Traversal::Inorder, Traversal::Postorder] {
            let mut seen = 0;
            tree.iterate(order, |_| {
                seen += 1;
                seen < 2
            });
            assert_eq!(seen, 2, "{order:?}");
        }

        let mut seen = 0;
        tree.iterate(Traversal::BreadthFirst, |_| {
            seen += 1;
            false
        });
        assert_eq!(seen, 6);
    }

    #[test]
    fn sorted_input_degrades_without_overflow() {
        let elems = nodes(0..10_000);
        let mut tree = tree_of(&elems);

        assert_eq!(tree.height(), 10_000);
        assert_eq!(tree.len(), 10_000);
        assert_eq!(tree.max().map(|n| n.value), Some(9_999));

        tree.erase(&Node::new(9_998));
        assert_eq!(tree.len(), 9_999);
        assert_eq!(tree.height(), 9_999);
    }

    #[test]
    fn clear_detaches_everything() {
        let elems = nodes([2, 1, 3]);
        let mut tree = tree_of(&elems);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!elems[0].link.is_leaf());
    }

    #[test]
    fn cleared_tree_ignores_stale_links() {
        let parent = Box::new(Node::new(5));
        let child = Box::new(Node::new(1));
        let mut tree: Tree<Node> = Tree::new(by_value);
        unsafe {
            tree.insert(NonNull::from(&*parent));
            tree.insert(NonNull::from(&*child));
        }

        tree.clear();
        drop(child);

        // Root-anchored queries never touch the freed child.
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert_eq!(tree.height(), 0);
        assert!(!parent.link.is_leaf());

        unsafe { parent.link.force_unlink() };
        assert!(parent.link.is_leaf());

        let mut fresh: Tree<Node> = Tree::new(by_value);
        unsafe { fresh.insert(NonNull::from(&*parent)) };
        assert_eq!(fresh.min().map(|n| n.value), Some(5));
        unsafe {
            assert_eq!(fresh.subtree_min(&parent).value, 5);
            assert_eq!(fresh.subtree_height(&parent), 1);
        }
    }

    #[test]
    fn ordered_uses_ord() {
        #[derive(Debug)]
        struct Key {
            k: u32,
            link: TreeLink<Key>,
        }
        impl PartialEq for Key {
            fn eq(&self, other: &Self) -> bool {
                self.k == other.k
            }
        }
        impl Eq for Key {}
        impl PartialOrd for Key {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Key {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.k.cmp(&other.k)
            }
        }
        impl TreeLinked for Key {
            fn tree_link(&self) -> &TreeLink<Self> {
                &self.link
            }
        }

        let keys: Vec<Key> = [3, 1, 2]
            .into_iter()
            .map(|k| Key {
                k,
                link: TreeLink::new(),
            })
            .collect();

        let mut tree = Tree::ordered();
        for key in &keys {
            unsafe { tree.insert(NonNull::from(key)) };
        }

        let rendered = format!("{tree:?}");
        assert!(rendered.starts_with("[Key { k: 1"));
        assert_eq!(tree.min().map(|k| k.k), Some(1));

        let probe = Key {
            k: 3,
            link: TreeLink::new(),
        };
        assert_eq!(tree.erase(&probe), Some(NonNull::from(&keys[0])));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn element_in_tree_and_ring() {
        use crate::{Ring, RingLink, RingLinked};

        struct Order {
            price: i32,
            tree: TreeLink<Order>,
            ring: RingLink<Order>,
        }
        impl TreeLinked for Order {
            fn tree_link(&self) -> &TreeLink<Self> {
                &self.tree
            }
        }
        impl RingLinked for Order {
            fn ring_link(&self) -> &RingLink<Self> {
                &self.ring
            }
        }

        let orders: Vec<Order> = [30, 10, 20]
            .into_iter()
            .map(|price| Order {
                price,
                tree: TreeLink::new(),
                ring: RingLink::new(),
            })
            .collect();

        let mut tree = Tree::new(|a: &Order, b: &Order| a.price < b.price);
        let mut ring = Ring::new();
        for order in &orders {
            let ptr = NonNull::from(order);
            unsafe {
                tree.insert(ptr);
                ring.enqueue_back(ptr);
            }
        }

        let mut sorted = Vec::new();
        tree.inorder(|o| {
            sorted.push(o.price);
            true
        });
        let arrival: Vec<i32> = ring.iter().map(|o| o.price).collect();
        assert_eq!(sorted, vec![10, 20, 30]);
        assert_eq!(arrival, vec![30, 10, 20]);

        let erased = tree.erase(&orders[1]).unwrap();
        unsafe { ring.dequeue(erased) };
        assert_eq!(tree.len(), 2);
        assert_eq!(ring.len(), 2);
    }
}
