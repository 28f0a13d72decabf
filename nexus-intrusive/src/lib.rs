//! Intrusive containers with caller-owned elements.
//!
//! The link metadata lives inside the element, not in a node the container
//! allocates. Containers only rewire those embedded links. Nothing here
//! allocates per element, and removal given just the element is O(1).
//!
//! # Design Philosophy
//!
//! Traditional collections own their elements:
//!
//! ```text
//! LinkedList<T>  - allocates a node per push, owns T
//! BTreeSet<T>    - allocates on insert, owns T
//! ```
//!
//! This crate inverts the model:
//!
//! ```text
//! Element (caller)   - owns its data and embeds the links
//! Ring/Tree/SlotList - rewire links, never own or allocate
//! ```
//!
//! Benefits:
//! - **O(1) removal**: unlink from the middle with only the element in hand
//! - **Zero allocation on hot path**: elements live wherever the caller puts them
//! - **Multiple membership**: an element can sit in a ring and a tree at once,
//!   each through its own embedded link
//! - **Splicing**: move whole runs of elements between rings without touching
//!   each one
//!
//! # Containers
//!
//! | Container | Links | Key Operations |
//! |-----------|-------|----------------|
//! | [`Ring`] | pointers | O(1) enqueue/dequeue, O(1) append, split at a match |
//! | [`SlotList`] | slot indices | O(1) enqueue/dequeue through a [`Resolver`] |
//! | [`Tree`] | pointers | unbalanced BST, four traversal orders |
//!
//! # Quick Start
//!
//! ```
//! use std::ptr::NonNull;
//! use nexus_intrusive::{Ring, RingLink, RingLinked};
//!
//! struct Order {
//!     id: u64,
//!     link: RingLink<Order>,
//! }
//!
//! impl RingLinked for Order {
//!     fn ring_link(&self) -> &RingLink<Self> {
//!         &self.link
//!     }
//! }
//!
//! let orders: Vec<Order> = (0..4).map(|id| Order { id, link: RingLink::new() }).collect();
//! let mut bids: Ring<Order> = Ring::new();
//! let mut filled: Ring<Order> = Ring::new();
//!
//! for order in &orders {
//!     unsafe { bids.enqueue_back(NonNull::from(order)) };
//! }
//!
//! // Everything from order 2 onwards moves in one splice.
//! bids.split(|o| o.id == 2, &mut filled).unwrap();
//!
//! assert_eq!(bids.iter().map(|o| o.id).collect::<Vec<_>>(), vec![0, 1]);
//! assert_eq!(filled.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2, 3]);
//! ```
//!
//! # Safety Model
//!
//! [`Ring`] and [`Tree`] link elements by pointer. Inserting is `unsafe`: the
//! caller promises the element stays alive and unmoved while linked, and is
//! in at most one container of each kind. Removing from a ring, querying a
//! tree from a caller-supplied element (`subtree_*`), and force-unlinking an
//! element after `clear` are `unsafe` too. Everything else is safe because it
//! only follows links created under that promise, starting from the
//! container's own head or root. Links use `Cell`, so the containers never
//! form `&mut` to an element.
//!
//! [`SlotList`] links by index and resolves every hop through its
//! [`Resolver`], so it has no `unsafe` API. A slot that does not resolve
//! panics when linked or unlinked and ends traversals.
//!
//! Contract checks (double insertion, removing from the wrong list) are
//! `debug_assert!` only.
//!
//! # Thread Safety
//!
//! [`Ring`] and [`Tree`] hold raw pointers and are neither `Send` nor `Sync`.
//! [`SlotList`] is as thread-safe as its resolver. None of them lock
//! internally; share one across threads only behind external exclusion.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Resolver`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod index;
pub mod resolver;
pub mod ring;
pub mod slot_list;
pub mod tree;

pub use index::SlotIndex;
pub use resolver::{Resolver, SlotLink, SlotLinked, SlotOf};
pub use ring::{NotEmpty, Ring, RingLink, RingLinked};
pub use slot_list::{SlotHead, SlotList};
pub use tree::{Traversal, Tree, TreeLink, TreeLinked};
