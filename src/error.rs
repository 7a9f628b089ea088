//! Shared failure signaling for both collections.
//!
//! Contract violations on arguments (indices, offsets, destination sizes)
//! panic before any mutation happens. The panic formatting lives here in
//! cold, never-inlined functions so the bounds checks at each call site
//! stay small.

use core::fmt;

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn index_out_of_range(index: usize, len: usize) -> ! {
    panic!("index out of range: the index is {index} but the length is {len}");
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn range_out_of_range(start: usize, len: usize, extent: usize) -> ! {
    panic!(
        "range out of range: start {start} with length {len} exceeds collection length {extent}"
    );
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn destination_too_small(needed: usize, available: usize) -> ! {
    panic!("destination too small: need {needed} elements but only {available} fit");
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn offset_out_of_range(offset: usize, len: usize) -> ! {
    panic!("offset out of range: the offset is {offset} but the destination length is {len}");
}

/// Error returned by [`Cursor::next`](crate::hash_pile::Cursor::next) when
/// the pile was structurally mutated after the cursor was created.
///
/// The cursor is permanently invalidated; create a new one to resume
/// iteration over the current contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorError;

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("collection was modified during cursor iteration")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CursorError {}
