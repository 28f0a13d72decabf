//! Doubly-linked list addressed by slot index.
//!
//! Elements live in caller-managed storage (a `Vec`, a slab, an arena) and
//! embed a [`SlotLink`](crate::SlotLink). Links are indices, never pointers:
//! every hop is resolved through the list's [`Resolver`]. The list's own head
//! is addressed by the `NONE` slot, so the head plus the linked elements form
//! one ring of indices.
//!
//! # Example
//!
//! ```
//! use nexus_intrusive::{SlotLink, SlotLinked, SlotList};
//!
//! struct Order {
//!     id: u64,
//!     link: SlotLink<u32>,
//! }
//!
//! impl SlotLinked for Order {
//!     type Slot = u32;
//!     fn slot_link(&self) -> &SlotLink<u32> { &self.link }
//!     fn slot_link_mut(&mut self) -> &mut SlotLink<u32> { &mut self.link }
//! }
//!
//! let orders: Vec<Order> = (0..4)
//!     .map(|i| Order { id: 100 + i as u64, link: SlotLink::new(i) })
//!     .collect();
//!
//! let mut queue = SlotList::new(orders);
//! queue.enqueue_back(1);
//! queue.enqueue_back(2);
//! queue.enqueue_front(0);
//!
//! let ids: Vec<u64> = queue.iter().map(|o| o.id).collect();
//! assert_eq!(ids, vec![100, 101, 102]);
//!
//! queue.dequeue(1);
//! assert_eq!(queue.slots().collect::<Vec<_>>(), vec![0, 2]);
//! ```

use core::fmt;

use crate::{Resolver, SlotIndex, SlotLink, SlotLinked, SlotOf};

/// Head link of a [`SlotList`].
///
/// `next` is the first element's slot and `prev` the last element's. An
/// empty head holds `NONE` in both, which is the head pointing at itself.
/// The head is plain data: it can be stored, copied and reattached with
/// [`SlotList::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHead<K: SlotIndex> {
    /// First element, or `NONE` if empty.
    pub next: K,
    /// Last element, or `NONE` if empty.
    pub prev: K,
}

impl<K: SlotIndex> SlotHead<K> {
    /// Creates an empty head.
    #[inline]
    pub const fn new() -> Self {
        Self {
            next: K::NONE,
            prev: K::NONE,
        }
    }

    /// Returns `true` if no element is linked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }
}

impl<K: SlotIndex> Default for SlotHead<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Doubly-linked list over elements in index-addressable storage.
///
/// The list owns its resolver. Pass `&mut storage` to keep ownership of the
/// storage elsewhere; use [`into_parts`](Self::into_parts) and
/// [`from_parts`](Self::from_parts) to let several lists share one arena.
///
/// Enqueue, dequeue and `front`/`back` are O(1). Search, `len` and the
/// anchored inserts are O(n).
///
/// # Panics
///
/// Linking or unlinking a slot that does not resolve to an element panics
/// with "invalid slot". Traversals stop quietly at such a slot.
pub struct SlotList<R: Resolver> {
    head: SlotHead<SlotOf<R>>,
    resolver: R,
}

impl<R: Resolver> SlotList<R> {
    /// Creates an empty list over `resolver`.
    #[inline]
    pub fn new(resolver: R) -> Self {
        Self::from_parts(SlotHead::new(), resolver)
    }

    /// Reattaches a head previously taken with [`into_parts`](Self::into_parts).
    ///
    /// The head's links must describe elements stored in `resolver`.
    #[inline]
    pub fn from_parts(head: SlotHead<SlotOf<R>>, resolver: R) -> Self {
        Self { head, resolver }
    }

    /// Splits the list into its head and resolver.
    #[inline]
    pub fn into_parts(self) -> (SlotHead<SlotOf<R>>, R) {
        (self.head, self.resolver)
    }

    /// Returns a copy of the head link.
    #[inline]
    pub fn head(&self) -> SlotHead<SlotOf<R>> {
        self.head
    }

    /// Returns the resolver.
    #[inline]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the resolver mutably.
    ///
    /// Elements that are linked must stay at their slots.
    #[inline]
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_empty()
    }

    /// Returns the number of elements. O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Detaches every element in O(1).
    ///
    /// Former elements keep stale links and must not be dequeued from this
    /// list afterwards.
    #[inline]
    pub fn clear(&mut self) {
        self.head = SlotHead::new();
    }

    /// Returns the element at `slot`, whether or not it is linked.
    #[inline]
    pub fn get(&self, slot: SlotOf<R>) -> Option<&R::Elem> {
        self.resolver.to_address(slot)
    }

    /// Returns the element at `slot` mutably.
    ///
    /// The element's link must not be modified through this reference.
    #[inline]
    pub fn get_mut(&mut self, slot: SlotOf<R>) -> Option<&mut R::Elem> {
        self.resolver.to_address_mut(slot)
    }

    /// Returns the first element's slot.
    #[inline]
    pub fn front_slot(&self) -> Option<SlotOf<R>> {
        self.head.next.into_option()
    }

    /// Returns the last element's slot.
    #[inline]
    pub fn back_slot(&self) -> Option<SlotOf<R>> {
        self.head.prev.into_option()
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&R::Elem> {
        self.resolver.to_address(self.head.next)
    }

    /// Returns the last element.
    #[inline]
    pub fn back(&self) -> Option<&R::Elem> {
        self.resolver.to_address(self.head.prev)
    }

    // ========================================================================
    // Link operations
    // ========================================================================

    /// Links the element at `slot` at the back.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not resolve.
    #[inline]
    pub fn enqueue_back(&mut self, slot: SlotOf<R>) {
        self.link_before(slot, <SlotOf<R> as SlotIndex>::NONE);
    }

    /// Links the element at `slot` at the front.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not resolve.
    #[inline]
    pub fn enqueue_front(&mut self, slot: SlotOf<R>) {
        self.link_after(slot, <SlotOf<R> as SlotIndex>::NONE);
    }

    /// Unlinks the element at `slot` in O(1) and resets its links to `NONE`.
    ///
    /// The element must be linked in this list.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not resolve.
    pub fn dequeue(&mut self, slot: SlotOf<R>) {
        let link = self.link(slot);
        let (next, prev) = (link.next, link.prev);

        debug_assert!(
            self.next_of(prev) == slot && self.prev_of(next) == slot,
            "slot is not linked in this list"
        );

        self.set_next(prev, next);
        self.set_prev(next, prev);
        self.link_mut(slot).reset();
    }

    /// Unlinks and returns the first element's slot.
    #[inline]
    pub fn pop_front(&mut self) -> Option<SlotOf<R>> {
        let slot = self.front_slot()?;
        self.dequeue(slot);
        Some(slot)
    }

    /// Unlinks and returns the last element's slot.
    #[inline]
    pub fn pop_back(&mut self) -> Option<SlotOf<R>> {
        let slot = self.back_slot()?;
        self.dequeue(slot);
        Some(slot)
    }

    /// Links the element at `slot` before the first element matching `pred`.
    ///
    /// Returns the anchor's slot. With no match the element stays
    /// unattached and `None` is returned.
    ///
    /// # Panics
    ///
    /// Panics if an anchor is found and `slot` does not resolve.
    pub fn insert_before<F>(&mut self, slot: SlotOf<R>, pred: F) -> Option<SlotOf<R>>
    where
        F: FnMut(&R::Elem) -> bool,
    {
        let anchor = self.find(pred)?;
        self.link_before(slot, anchor);
        Some(anchor)
    }

    /// Links the element at `slot` after the first element matching `pred`.
    ///
    /// Returns the anchor's slot. With no match the element stays
    /// unattached and `None` is returned.
    ///
    /// # Panics
    ///
    /// Panics if an anchor is found and `slot` does not resolve.
    pub fn insert_after<F>(&mut self, slot: SlotOf<R>, pred: F) -> Option<SlotOf<R>>
    where
        F: FnMut(&R::Elem) -> bool,
    {
        let anchor = self.find(pred)?;
        self.link_after(slot, anchor);
        Some(anchor)
    }

    // ========================================================================
    // Search and iteration
    // ========================================================================

    /// Returns the slot of the first element, front to back, matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<SlotOf<R>>
    where
        F: FnMut(&R::Elem) -> bool,
    {
        self.iter()
            .find(|&elem| pred(elem))
            .map(|elem| self.resolver.to_slot(elem))
    }

    /// Returns the slot of the first element, back to front, matching `pred`.
    pub fn find_rev<F>(&self, mut pred: F) -> Option<SlotOf<R>>
    where
        F: FnMut(&R::Elem) -> bool,
    {
        self.iter()
            .rev()
            .find(|&elem| pred(elem))
            .map(|elem| self.resolver.to_slot(elem))
    }

    /// Visits elements front to back until `f` returns `false`.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(&R::Elem) -> bool,
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
        F: FnMut(&R::Elem) -> bool,
    {
        for elem in self.iter().rev() {
            if !f(elem) {
                break;
            }
        }
    }

    /// Returns a double-ended iterator over elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            list: self,
            front: self.head.next,
            back: self.head.prev,
        }
    }

    /// Returns a double-ended iterator over slots, front to back.
    #[inline]
    pub fn slots(&self) -> Slots<'_, R> {
        Slots { iter: self.iter() }
    }

    // ========================================================================
    // Internal
    // ========================================================================

    #[inline]
    fn link(&self, slot: SlotOf<R>) -> &SlotLink<SlotOf<R>> {
        self.resolver
            .to_address(slot)
            .expect("invalid slot")
            .slot_link()
    }

    #[inline]
    fn link_mut(&mut self, slot: SlotOf<R>) -> &mut SlotLink<SlotOf<R>> {
        self.resolver
            .to_address_mut(slot)
            .expect("invalid slot")
            .slot_link_mut()
    }

    // `NONE` addresses the head in the four accessors below.

    #[inline]
    fn next_of(&self, slot: SlotOf<R>) -> SlotOf<R> {
        if slot.is_none() {
            self.head.next
        } else {
            self.link(slot).next
        }
    }

    #[inline]
    fn prev_of(&self, slot: SlotOf<R>) -> SlotOf<R> {
        if slot.is_none() {
            self.head.prev
        } else {
            self.link(slot).prev
        }
    }

    #[inline]
    fn set_next(&mut self, slot: SlotOf<R>, next: SlotOf<R>) {
        if slot.is_none() {
            self.head.next = next;
        } else {
            self.link_mut(slot).next = next;
        }
    }

    #[inline]
    fn set_prev(&mut self, slot: SlotOf<R>, prev: SlotOf<R>) {
        if slot.is_none() {
            self.head.prev = prev;
        } else {
            self.link_mut(slot).prev = prev;
        }
    }

    /// Links `slot` between `anchor` and `anchor.next`.
    fn link_after(&mut self, slot: SlotOf<R>, anchor: SlotOf<R>) {
        debug_assert!(slot.is_some(), "cannot link the head slot");
        debug_assert!(
            self.resolver.to_slot(self.get(slot).expect("invalid slot")) == slot,
            "element reports a different slot"
        );

        let next = self.next_of(anchor);
        // New element first so an invalid slot panics before the list changes.
        self.set_prev(slot, anchor);
        self.set_next(slot, next);
        self.set_next(anchor, slot);
        self.set_prev(next, slot);
    }

    /// Links `slot` between `anchor.prev` and `anchor`.
    fn link_before(&mut self, slot: SlotOf<R>, anchor: SlotOf<R>) {
        debug_assert!(slot.is_some(), "cannot link the head slot");
        debug_assert!(
            self.resolver.to_slot(self.get(slot).expect("invalid slot")) == slot,
            "element reports a different slot"
        );

        let prev = self.prev_of(anchor);
        self.set_prev(slot, prev);
        self.set_next(slot, anchor);
        self.set_next(prev, slot);
        self.set_prev(anchor, slot);
    }
}

impl<R> fmt::Debug for SlotList<R>
where
    R: Resolver,
    R::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over the elements of a [`SlotList`].
pub struct Iter<'a, R: Resolver> {
    list: &'a SlotList<R>,
    front: SlotOf<R>,
    back: SlotOf<R>,
}

impl<R: Resolver> Iter<'_, R> {
    #[inline]
    fn finish(&mut self) {
        self.front = <SlotOf<R> as SlotIndex>::NONE;
        self.back = <SlotOf<R> as SlotIndex>::NONE;
    }
}

impl<'a, R: Resolver> Iterator for Iter<'a, R> {
    type Item = &'a R::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.front.into_option()?;
        let Some(elem) = self.list.resolver.to_address(slot) else {
            self.finish();
            return None;
        };

        // Check if we've met in the middle
        if self.front == self.back {
            self.finish();
        } else {
            self.front = elem.slot_link().next;
        }

        Some(elem)
    }
}

impl<R: Resolver> DoubleEndedIterator for Iter<'_, R> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let slot = self.back.into_option()?;
        let Some(elem) = self.list.resolver.to_address(slot) else {
            self.finish();
            return None;
        };

        if self.front == self.back {
            self.finish();
        } else {
            self.back = elem.slot_link().prev;
        }

        Some(elem)
    }
}

impl<'a, R: Resolver> IntoIterator for &'a SlotList<R> {
    type Item = &'a R::Elem;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the slots of a [`SlotList`].
pub struct Slots<'a, R: Resolver> {
    iter: Iter<'a, R>,
}

impl<R: Resolver> Iterator for Slots<'_, R> {
    type Item = SlotOf<R>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.iter.next()?;
        Some(self.iter.list.resolver.to_slot(elem))
    }
}

impl<R: Resolver> DoubleEndedIterator for Slots<'_, R> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let elem = self.iter.next_back()?;
        Some(self.iter.list.resolver.to_slot(elem))
    }
}
