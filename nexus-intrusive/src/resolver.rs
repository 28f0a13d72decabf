//! Address resolution for slot-linked elements.
//!
//! A [`SlotList`](crate::SlotList) never holds pointers. Its links are slot
//! indices, and every hop goes through a [`Resolver`] that maps a slot to the
//! element stored there. The resolver is whatever owns the elements: a
//! `Vec`, a slice, a slab.

use crate::SlotIndex;

/// Slot type used by a resolver's elements.
pub type SlotOf<R> = <<R as Resolver>::Elem as SlotLinked>::Slot;

/// Index-based link embedded in an element.
///
/// Holds the element's own slot (fixed at construction) and the slots of its
/// neighbours. An unattached link has both neighbours set to `NONE`.
///
/// # Example
///
/// ```
/// use nexus_intrusive::{SlotIndex, SlotLink};
///
/// let link: SlotLink<u32> = SlotLink::new(4);
/// assert_eq!(link.slot(), 4);
/// assert!(link.next().is_none());
/// assert!(link.prev().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLink<K: SlotIndex> {
    slot: K,
    pub(crate) next: K,
    pub(crate) prev: K,
}

impl<K: SlotIndex> SlotLink<K> {
    /// Creates an unattached link for the element stored at `slot`.
    #[inline]
    pub const fn new(slot: K) -> Self {
        Self {
            slot,
            next: K::NONE,
            prev: K::NONE,
        }
    }

    /// Returns the slot of the element that owns this link.
    #[inline]
    pub const fn slot(&self) -> K {
        self.slot
    }

    /// Returns the next element's slot, or `NONE` if the next hop is the list head.
    #[inline]
    pub const fn next(&self) -> K {
        self.next
    }

    /// Returns the previous element's slot, or `NONE` if the previous hop is the list head.
    #[inline]
    pub const fn prev(&self) -> K {
        self.prev
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.next = K::NONE;
        self.prev = K::NONE;
    }
}

/// Trait for elements that can sit in a [`SlotList`](crate::SlotList).
///
/// Implementors embed a [`SlotLink`] and hand it out.
///
/// # Example
///
/// ```
/// use nexus_intrusive::{SlotLink, SlotLinked};
///
/// struct Order {
///     id: u64,
///     qty: u64,
///     link: SlotLink<u32>,
/// }
///
/// impl SlotLinked for Order {
///     type Slot = u32;
///
///     fn slot_link(&self) -> &SlotLink<u32> { &self.link }
///     fn slot_link_mut(&mut self) -> &mut SlotLink<u32> { &mut self.link }
/// }
/// ```
pub trait SlotLinked {
    /// Index type used to address elements.
    type Slot: SlotIndex;

    /// Returns the embedded link.
    fn slot_link(&self) -> &SlotLink<Self::Slot>;

    /// Returns the embedded link mutably.
    fn slot_link_mut(&mut self) -> &mut SlotLink<Self::Slot>;
}

/// Maps slots to elements and elements back to slots.
///
/// # Requirements
///
/// - **Stable**: resolving a slot returns the same logical element for as
///   long as any list links to it
/// - **Sentinel**: resolving `NONE` returns `None`
/// - **Consistent**: the element at slot `s` reports `s` from its link
///
/// # Implementations
///
/// - `[E]` and `Vec<E>` - slot is the position in the slice
/// - `&mut R` for any resolver `R` - borrow an arena instead of owning it
/// - `slab::Slab<E>` - slot is the slab key (feature `slab`)
pub trait Resolver {
    /// Element type stored behind the slots.
    type Elem: SlotLinked;

    /// Returns the element stored at `slot`, if any.
    fn to_address(&self, slot: SlotOf<Self>) -> Option<&Self::Elem>;

    /// Returns the element stored at `slot` mutably, if any.
    fn to_address_mut(&mut self, slot: SlotOf<Self>) -> Option<&mut Self::Elem>;

    /// Returns the slot an element lives at.
    #[inline]
    fn to_slot(&self, elem: &Self::Elem) -> SlotOf<Self> {
        elem.slot_link().slot()
    }
}

impl<E: SlotLinked> Resolver for [E] {
    type Elem = E;

    #[inline]
    fn to_address(&self, slot: E::Slot) -> Option<&E> {
        if slot.is_none() {
            return None;
        }
        self.get(slot.as_usize())
    }

    #[inline]
    fn to_address_mut(&mut self, slot: E::Slot) -> Option<&mut E> {
        if slot.is_none() {
            return None;
        }
        self.get_mut(slot.as_usize())
    }
}

impl<E: SlotLinked> Resolver for Vec<E> {
    type Elem = E;

    #[inline]
    fn to_address(&self, slot: E::Slot) -> Option<&E> {
        self.as_slice().to_address(slot)
    }

    #[inline]
    fn to_address_mut(&mut self, slot: E::Slot) -> Option<&mut E> {
        self.as_mut_slice().to_address_mut(slot)
    }
}

impl<R: Resolver + ?Sized> Resolver for &mut R {
    type Elem = R::Elem;

    #[inline]
    fn to_address(&self, slot: SlotOf<R>) -> Option<&R::Elem> {
        (**self).to_address(slot)
    }

    #[inline]
    fn to_address_mut(&mut self, slot: SlotOf<R>) -> Option<&mut R::Elem> {
        (**self).to_address_mut(slot)
    }

    #[inline]
    fn to_slot(&self, elem: &R::Elem) -> SlotOf<R> {
        (**self).to_slot(elem)
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<E: SlotLinked> Resolver for slab::Slab<E> {
    type Elem = E;

    #[inline]
    fn to_address(&self, slot: E::Slot) -> Option<&E> {
        if slot.is_none() {
            return None;
        }
        self.get(slot.as_usize())
    }

    #[inline]
    fn to_address_mut(&mut self, slot: E::Slot) -> Option<&mut E> {
        if slot.is_none() {
            return None;
        }
        self.get_mut(slot.as_usize())
    }
}
