#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod primes;

/// A chained-hash multiset with slot recycling.
///
/// This module provides [`HashPile`], which stores duplicate-permitting
/// elements in a flat slot array with intrusive bucket chains and an
/// intrusive free list, plus the cursor and introspection types built
/// around it.
pub mod hash_pile;

/// A sequential list with inline first-element storage.
///
/// This module provides [`InlinedList`], which keeps logical index 0
/// directly in the container and spills later elements into a
/// lazily-allocated overflow buffer.
pub mod inlined_list;

pub use error::CursorError;
pub use hash_pile::Cursor;
pub use hash_pile::HashPile;
pub use inlined_list::InlinedList;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default [`BuildHasher`](core::hash::BuildHasher) used by
        /// [`HashPile`] when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The default [`BuildHasher`](core::hash::BuildHasher) used by
        /// [`HashPile`] when none is specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hasher builder used when neither the `std` nor the
        /// `foldhash` feature is enabled.
        ///
        /// It implements no hashing; construct piles through
        /// [`HashPile::with_hasher`] instead.
        #[derive(Clone, Copy, Debug, Default)]
        pub struct DefaultHashBuilder;
    }
}
