//! Intrusive circular doubly-linked ring over pointer-linked elements.
//!
//! Elements embed a [`RingLink`] and are linked by pointer. The ring itself
//! stores a single pointer to its first element; the last element is the
//! first element's `prev`. Nothing is allocated and nothing is owned.
//!
//! # Safety Model
//!
//! Operations that create membership ([`Ring::enqueue_back`],
//! [`Ring::enqueue_front`], [`Ring::insert_before`], [`Ring::insert_after`])
//! and [`Ring::dequeue`] are `unsafe`. The caller guarantees that an element
//! stays alive and does not move while it is linked, and that it is in at
//! most one ring at a time. Every other operation only follows links that
//! were established under that contract and is safe.
//!
//! Links use [`Cell`], so the ring only ever forms shared references to
//! elements.
//!
//! # Example
//!
//! ```
//! use std::ptr::NonNull;
//! use nexus_intrusive::{Ring, RingLink, RingLinked};
//!
//! struct Task {
//!     id: u32,
//!     link: RingLink<Task>,
//! }
//!
//! impl RingLinked for Task {
//!     fn ring_link(&self) -> &RingLink<Self> {
//!         &self.link
//!     }
//! }
//!
//! let tasks: Vec<Task> = (0..3).map(|id| Task { id, link: RingLink::new() }).collect();
//! let mut ring: Ring<Task> = Ring::new();
//!
//! for task in &tasks {
//!     // Safety: `tasks` outlives `ring` and is never moved while linked.
//!     unsafe { ring.enqueue_back(NonNull::from(task)) };
//! }
//!
//! let ids: Vec<u32> = ring.iter().map(|t| t.id).collect();
//! assert_eq!(ids, vec![0, 1, 2]);
//!
//! // O(1) removal given only the element.
//! unsafe { ring.dequeue(NonNull::from(&tasks[1])) };
//! assert_eq!(ring.iter().map(|t| t.id).collect::<Vec<_>>(), vec![0, 2]);
//! ```

use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Previous / next pointers embedded in a ring element.
///
/// `None` in both directions means the element is unattached.
pub struct RingLink<T> {
    next: Cell<Option<NonNull<T>>>,
    prev: Cell<Option<NonNull<T>>>,
}

impl<T> RingLink<T> {
    /// Creates an unattached link.
    #[inline]
    pub const fn new() -> Self {
        Self {
            next: Cell::new(None),
            prev: Cell::new(None),
        }
    }

    /// Returns `true` if the owning element is currently in a ring.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.get().is_some()
    }

    /// Clears both neighbours so the element can be linked again.
    ///
    /// Use this on elements left behind by [`Ring::clear`].
    ///
    /// # Safety
    ///
    /// The element must not be reachable from any ring still in use.
    #[inline]
    pub unsafe fn force_unlink(&self) {
        self.reset();
    }

    #[inline]
    fn reset(&self) {
        self.next.set(None);
        self.prev.set(None);
    }
}

impl<T> Default for RingLink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RingLink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingLink")
            .field("linked", &self.is_linked())
            .finish()
    }
}

/// Trait for types that can participate in a [`Ring`].
///
/// Implementors embed a [`RingLink`] and must always return that same field.
pub trait RingLinked: Sized {
    /// Returns the embedded ring link.
    fn ring_link(&self) -> &RingLink<Self>;
}

/// Error returned when moving elements into a ring that is not empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotEmpty;

impl fmt::Display for NotEmpty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destination ring is not empty")
    }
}

impl std::error::Error for NotEmpty {}

/// An intrusive circular doubly-linked list.
///
/// Iteration order is insertion position, not any sort key. `len` is O(n);
/// every other structural operation is O(1) plus, where a predicate is
/// involved, the forward search for the first match.
pub struct Ring<T: RingLinked> {
    head: Option<NonNull<T>>,
    _marker: PhantomData<T>,
}

impl<T: RingLinked> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Link accessors. Callers only pass pointers to live elements (ring contract).

#[inline]
fn link<'a, T: RingLinked>(node: NonNull<T>) -> &'a RingLink<T> {
    // Safety: ring elements are alive while linked
    unsafe { node.as_ref() }.ring_link()
}

#[inline]
fn next_of<T: RingLinked>(node: NonNull<T>) -> NonNull<T> {
    // Safety: every element in a ring has both neighbours
    unsafe { link(node).next.get().unwrap_unchecked() }
}

#[inline]
fn prev_of<T: RingLinked>(node: NonNull<T>) -> NonNull<T> {
    // Safety: every element in a ring has both neighbours
    unsafe { link(node).prev.get().unwrap_unchecked() }
}

#[inline]
fn set_next<T: RingLinked>(node: NonNull<T>, next: NonNull<T>) {
    link(node).next.set(Some(next));
}

#[inline]
fn set_prev<T: RingLinked>(node: NonNull<T>, prev: NonNull<T>) {
    link(node).prev.set(Some(prev));
}

/// Links `node` between `anchor.prev` and `anchor`.
#[inline]
fn splice_before<T: RingLinked>(anchor: NonNull<T>, node: NonNull<T>) {
    let prev = prev_of(anchor);
    set_prev(node, prev);
    set_next(node, anchor);
    set_next(prev, node);
    set_prev(anchor, node);
}

/// Links `node` between `anchor` and `anchor.next`.
#[inline]
fn splice_after<T: RingLinked>(anchor: NonNull<T>, node: NonNull<T>) {
    let next = next_of(anchor);
    set_prev(node, anchor);
    set_next(node, next);
    set_next(anchor, node);
    set_prev(next, node);
}

impl<T: RingLinked> Ring<T> {
    /// Creates an empty ring.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the ring has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<NonNull<T>> {
        self.head
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<NonNull<T>> {
        self.head.map(prev_of)
    }

    /// Returns the number of elements.
    ///
    /// This is O(n); the length is not cached.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Detaches every element in O(1).
    ///
    /// The former elements keep stale links. They must not be dequeued from
    /// this ring afterwards. Call [`RingLink::force_unlink`] on each before
    /// linking it again.
    #[inline]
    pub fn clear(&mut self) {
        self.head = None;
    }

    // ========================================================================
    // Link operations
    // ========================================================================

    /// Links `node` at the back of the ring.
    ///
    /// # Safety
    ///
    /// - `node` points to a live element that is not in any ring
    /// - the element stays alive and does not move until it is dequeued
    #[inline]
    pub unsafe fn enqueue_back(&mut self, node: NonNull<T>) {
        debug_assert!(!link(node).is_linked(), "node is already linked");

        match self.head {
            Some(head) => splice_before(head, node),
            None => {
                set_next(node, node);
                set_prev(node, node);
                self.head = Some(node);
            }
        }
    }

    /// Links `node` at the front of the ring.
    ///
    /// # Safety
    ///
    /// Same contract as [`enqueue_back`](Self::enqueue_back).
    #[inline]
    pub unsafe fn enqueue_front(&mut self, node: NonNull<T>) {
        // Safety: forwarded from caller
        unsafe { self.enqueue_back(node) };
        // Back of a circle is just before the head, so moving the head
        // one step back turns it into the front.
        self.head = Some(node);
    }

    /// Unlinks `node` in O(1). Its links are reset so it can be linked again.
    ///
    /// # Safety
    ///
    /// `node` must currently be an element of this ring.
    #[inline]
    pub unsafe fn dequeue(&mut self, node: NonNull<T>) {
        debug_assert!(link(node).is_linked(), "node is not linked");

        let next = next_of(node);
        if next == node {
            self.head = None;
        } else {
            let prev = prev_of(node);
            set_next(prev, next);
            set_prev(next, prev);
            if self.head == Some(node) {
                self.head = Some(next);
            }
        }

        link(node).reset();
    }

    /// Unlinks and returns the first element.
    #[inline]
    pub fn pop_front(&mut self) -> Option<NonNull<T>> {
        let head = self.head?;
        // Safety: head is an element of this ring
        unsafe { self.dequeue(head) };
        Some(head)
    }

    /// Unlinks and returns the last element.
    #[inline]
    pub fn pop_back(&mut self) -> Option<NonNull<T>> {
        let tail = self.back()?;
        // Safety: tail is an element of this ring
        unsafe { self.dequeue(tail) };
        Some(tail)
    }

    /// Links `node` immediately before the first element matching `pred`.
    ///
    /// Returns the anchor, or `None` if nothing matched, in which case `node`
    /// is left unattached. The anchor search is always front to back.
    ///
    /// # Safety
    ///
    /// Same contract as [`enqueue_back`](Self::enqueue_back).
    pub unsafe fn insert_before<F>(&mut self, node: NonNull<T>, pred: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> bool,
    {
        debug_assert!(!link(node).is_linked(), "node is already linked");

        let anchor = self.find(pred)?;
        splice_before(anchor, node);
        if self.head == Some(anchor) {
            self.head = Some(node);
        }
        Some(anchor)
    }

    /// Links `node` immediately after the first element matching `pred`.
    ///
    /// Returns the anchor, or `None` if nothing matched, in which case `node`
    /// is left unattached.
    ///
    /// # Safety
    ///
    /// Same contract as [`enqueue_back`](Self::enqueue_back).
    pub unsafe fn insert_after<F>(&mut self, node: NonNull<T>, pred: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> bool,
    {
        debug_assert!(!link(node).is_linked(), "node is already linked");

        let anchor = self.find(pred)?;
        splice_after(anchor, node);
        Some(anchor)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Moves every element of `other` onto the back of this ring in O(1).
    ///
    /// `other` is left empty. Its former elements now belong to `self`.
    pub fn append(&mut self, other: &mut Self) {
        let Some(theirs) = other.head.take() else {
            return;
        };

        match self.head {
            None => self.head = Some(theirs),
            Some(ours) => {
                let our_tail = prev_of(ours);
                let their_tail = prev_of(theirs);

                set_next(our_tail, theirs);
                set_prev(theirs, our_tail);
                set_next(their_tail, ours);
                set_prev(ours, their_tail);
            }
        }
    }

    /// Moves the first element matching `pred`, and everything after it,
    /// into `out`.
    ///
    /// Returns the element the split happened at, or `Ok(None)` if nothing
    /// matched (both rings untouched).
    ///
    /// # Errors
    ///
    /// Returns `Err(NotEmpty)` without changing anything if `out` already
    /// holds elements.
    pub fn split<F>(&mut self, pred: F, out: &mut Self) -> Result<Option<NonNull<T>>, NotEmpty>
    where
        F: FnMut(&T) -> bool,
    {
        if !out.is_empty() {
            return Err(NotEmpty);
        }

        let Some(at) = self.find(pred) else {
            return Ok(None);
        };
        // Safety: find returned an element, so the ring is non-empty
        let head = unsafe { self.head.unwrap_unchecked() };

        if at == head {
            out.head = self.head.take();
            return Ok(Some(at));
        }

        let tail = prev_of(head);
        let before = prev_of(at);

        // Close [head, before] into its own circle.
        set_next(before, head);
        set_prev(head, before);

        // Close [at, tail] into its own circle.
        set_prev(at, tail);
        set_next(tail, at);

        out.head = Some(at);
        Ok(Some(at))
    }

    /// Moves every element into `out`. Does nothing if this ring is empty.
    ///
    /// # Errors
    ///
    /// Returns `Err(NotEmpty)` if this ring has elements and `out` is not
    /// empty.
    #[inline]
    pub fn move_into(&mut self, out: &mut Self) -> Result<(), NotEmpty> {
        if self.is_empty() {
            return Ok(());
        }
        self.split(|_| true, out).map(|_| ())
    }

    // ========================================================================
    // Search and iteration
    // ========================================================================

    /// Returns the first element, front to back, matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> bool,
    {
        self.nodes().find(|&node| {
            // Safety: ring elements are alive while linked
            pred(unsafe { node.as_ref() })
        })
    }

    /// Returns the first element, back to front, matching `pred`.
    pub fn find_rev<F>(&self, mut pred: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> bool,
    {
        self.nodes().rev().find(|&node| {
            // Safety: ring elements are alive while linked
            pred(unsafe { node.as_ref() })
        })
    }

    /// Visits elements front to back until `f` returns `false`.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        for elem in self.iter() {
            if !f(elem) {
                break;
            }
        }
    }

    /// Visits elements back to front until `f` returns `false`.
    pub fn iterate_rev<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        for elem in self.iter().rev() {
            if !f(elem) {
                break;
            }
        }
    }

    /// Returns an iterator over the elements, front to back.
    ///
    /// The iterator is finite and double-ended; call `iter` again to
    /// restart.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: self.nodes(),
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over element pointers, front to back.
    #[inline]
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            front: self.head,
            back: self.back(),
            _marker: PhantomData,
        }
    }
}

impl<T: RingLinked + fmt::Debug> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over element pointers in a ring.
pub struct Nodes<'a, T: RingLinked> {
    front: Option<NonNull<T>>,
    back: Option<NonNull<T>>,
    _marker: PhantomData<&'a Ring<T>>,
}

impl<T: RingLinked> Iterator for Nodes<'_, T> {
    type Item = NonNull<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front?;

        // Check if we've met in the middle
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = Some(next_of(node));
        }

        Some(node)
    }
}

impl<T: RingLinked> DoubleEndedIterator for Nodes<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.back?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = Some(prev_of(node));
        }

        Some(node)
    }
}

/// Iterator over references to ring elements.
pub struct Iter<'a, T: RingLinked> {
    nodes: Nodes<'a, T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: RingLinked + 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        // Safety: ring elements are alive while linked
        self.nodes.next().map(|node| unsafe { node.as_ref() })
    }
}

impl<'a, T: RingLinked + 'a> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        // Safety: ring elements are alive while linked
        self.nodes.next_back().map(|node| unsafe { node.as_ref() })
    }
}

impl<'a, T: RingLinked + 'a> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
