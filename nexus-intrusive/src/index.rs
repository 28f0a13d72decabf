//! Slot index trait with a reserved "no index" value.
//!
//! The slot list links elements by index instead of by pointer. A reserved
//! sentinel (`MAX` for unsigned integers) marks an absent neighbour, and
//! inside a list it also addresses the list's own head.

/// A copyable slot index with a sentinel "none" value.
///
/// Implemented for the unsigned integer types. Custom index types (for
/// example a strongly-typed order id) can implement it too, as long as
/// `NONE` is never handed out as a real slot.
///
/// # Example
///
/// ```
/// use nexus_intrusive::SlotIndex;
///
/// let slot: u32 = 5;
/// assert!(slot.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(slot.as_usize(), 5);
/// ```
///
/// # Custom Index Types
///
/// ```
/// use nexus_intrusive::SlotIndex;
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// struct OrderSlot(u32);
///
/// impl SlotIndex for OrderSlot {
///     const NONE: Self = OrderSlot(u32::MAX);
///
///     fn as_usize(self) -> usize {
///         self.0 as usize
///     }
/// }
///
/// assert!(OrderSlot::NONE.is_none());
/// ```
pub trait SlotIndex: Copy + Eq {
    /// Sentinel value meaning "no slot".
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the slot as a `usize`, for indexing into arrays.
    fn as_usize(self) -> usize;

    /// Converts the sentinel into `None`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

macro_rules! impl_slot_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl SlotIndex for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_slot_index_for_unsigned!(u8, u16, u32, u64, usize);
