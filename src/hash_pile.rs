use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;

use crate::DefaultHashBuilder;
use crate::error;
use crate::error::CursorError;
use crate::primes;

/// Fraction of the table that may be occupied before an insertion grows it.
///
/// Occupancy is measured by `last_index` (the slot high-water mark), not by
/// `count`, so abandoned holes count against the budget until the table is
/// compacted.
#[inline(always)]
fn load_threshold(size: usize) -> usize {
    ((size as u128 * 72) / 100) as usize
}

/// Stored-hash value marking a free slot.
///
/// Item hashes are folded to a non-negative 31-bit value before storage, so
/// `-1` can never collide with an occupied slot's hash.
const FREE: i32 = -1;

/// Decodes a 1-based intrusive link; 0 means "none".
#[inline(always)]
fn link_target(link: usize) -> Option<usize> {
    link.checked_sub(1)
}

/// One storage cell of the slot array.
///
/// `next` is a 1-based index into the same array. For an occupied slot it
/// links to the next slot in the same bucket chain; for a free slot it links
/// to the next entry of the free list. In both roles, 0 terminates.
#[derive(Clone)]
struct Slot<T> {
    hash: i32,
    next: usize,
    value: Option<T>,
}

impl<T> Slot<T> {
    #[inline(always)]
    fn empty() -> Self {
        Slot {
            hash: FREE,
            next: 0,
            value: None,
        }
    }

    #[inline(always)]
    fn is_occupied(&self) -> bool {
        self.hash >= 0
    }
}

/// A chained-hash multiset with slot recycling.
///
/// `HashPile<T, S>` stores values of type `T` (requiring `Hash + Eq` for
/// lookup operations) and uses a configurable hasher builder `S`. Unlike a
/// set, insertion never rejects duplicates: every call to [`insert`] stores
/// another occurrence, and [`count_of`] reports multiplicity.
///
/// All elements live in a single flat slot array. Bucket chains and the
/// free list of vacated slots are threaded through that array as 1-based
/// intrusive indices, so no operation allocates per element. The bucket
/// table is kept at a prime size and grows when occupancy crosses 72% of
/// the table.
///
/// Iteration yields elements in ascending slot-index order. That order is
/// not insertion order: removal recycles slots, and growth rebuilds chains
/// by slot index.
///
/// [`insert`]: HashPile::insert
/// [`count_of`]: HashPile::count_of
#[derive(Clone)]
pub struct HashPile<T, S = DefaultHashBuilder> {
    buckets: Box<[usize]>,
    slots: Box<[Slot<T>]>,
    last_index: usize,
    free_list: Option<usize>,
    count: usize,
    version: u64,
    threshold: usize,
    hash_builder: S,
}

impl<T, S> Debug for HashPile<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new, empty pile using the default hasher builder.
    ///
    /// No storage is allocated until the first insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let pile: HashPile<i32> = HashPile::new();
    /// assert!(pile.is_empty());
    /// assert_eq!(pile.capacity(), 0);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new pile sized for at least `capacity` elements, using the
    /// default hasher builder.
    ///
    /// The actual capacity is the next suitable prime, so it may be larger
    /// than requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let pile: HashPile<i32> = HashPile::with_capacity(100);
    /// assert!(pile.capacity() >= 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new, empty pile with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use hash_pile::HashPile;
    ///
    /// let pile: HashPile<i32, _> = HashPile::with_hasher(RandomState::new());
    /// assert!(pile.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new pile sized for at least `capacity` elements with the
    /// given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let mut pile = Self {
            buckets: Box::default(),
            slots: Box::default(),
            last_index: 0,
            free_list: None,
            count: 0,
            version: 0,
            threshold: 0,
            hash_builder,
        };
        if capacity > 0 {
            pile.initialize(capacity);
        }
        pile
    }

    /// Returns the number of elements in the pile, counting duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(1);
    /// pile.insert(1);
    /// assert_eq!(pile.len(), 2);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the pile contains no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots currently allocated.
    ///
    /// The pile grows before occupancy reaches this value, at 72% of the
    /// slot array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a value into the pile.
    ///
    /// This always succeeds: the pile is a multiset and performs no
    /// uniqueness check. The value is placed in a recycled slot if the free
    /// list is non-empty, otherwise in the next never-used slot, and linked
    /// at the head of its bucket's chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<&str> = HashPile::new();
    /// pile.insert("a");
    /// pile.insert("a");
    /// assert_eq!(pile.count_of(&"a"), 2);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) {
        if self.buckets.is_empty() {
            self.initialize(1);
        }
        let hash = self.fold_hash(&value);
        let mut bucket = hash as usize % self.buckets.len();
        if self.last_index >= self.threshold || self.last_index == self.slots.len() {
            self.grow();
            bucket = hash as usize % self.buckets.len();
        }
        let index = match self.free_list {
            Some(head) => {
                self.free_list = link_target(self.slots[head].next);
                head
            }
            None => {
                let index = self.last_index;
                self.last_index += 1;
                index
            }
        };
        let slot = &mut self.slots[index];
        slot.hash = hash;
        slot.value = Some(value);
        slot.next = self.buckets[bucket];
        self.buckets[bucket] = index + 1;
        self.count += 1;
        self.version = self.version.wrapping_add(1);
    }

    /// Removes one occurrence of `value` from the pile.
    ///
    /// The occurrence removed is the first match encountered while walking
    /// the value's bucket chain; chain order is an implementation detail,
    /// not insertion order. The vacated slot is pushed onto the free list
    /// for reuse.
    ///
    /// Returns whether an occurrence was found and removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<&str> = HashPile::new();
    /// pile.insert("a");
    /// pile.insert("a");
    ///
    /// assert!(pile.remove(&"a"));
    /// assert_eq!(pile.count_of(&"a"), 1);
    /// assert!(pile.remove(&"a"));
    /// assert!(!pile.remove(&"a"));
    /// # }
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        if self.buckets.is_empty() {
            return false;
        }
        let hash = self.fold_hash(value);
        let bucket = hash as usize % self.buckets.len();
        let mut prev: Option<usize> = None;
        let mut cursor = link_target(self.buckets[bucket]);
        while let Some(i) = cursor {
            if self.slot_matches(i, hash, value) {
                let next = self.slots[i].next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.slots[p].next = next,
                }
                self.release_slot(i);
                self.count -= 1;
                self.version = self.version.wrapping_add(1);
                return true;
            }
            prev = Some(i);
            cursor = link_target(self.slots[i].next);
        }
        false
    }

    /// Removes every occurrence of `value` in a single chain walk.
    ///
    /// Returns the number of occurrences removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(7);
    /// pile.insert(7);
    /// pile.insert(8);
    ///
    /// assert_eq!(pile.remove_all(&7), 2);
    /// assert_eq!(pile.len(), 1);
    /// # }
    /// ```
    pub fn remove_all(&mut self, value: &T) -> usize {
        if self.buckets.is_empty() {
            return 0;
        }
        let hash = self.fold_hash(value);
        let bucket = hash as usize % self.buckets.len();
        let mut removed = 0;
        let mut prev: Option<usize> = None;
        let mut cursor = link_target(self.buckets[bucket]);
        while let Some(i) = cursor {
            if self.slot_matches(i, hash, value) {
                let next = self.slots[i].next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.slots[p].next = next,
                }
                self.release_slot(i);
                removed += 1;
                self.count -= 1;
                cursor = link_target(next);
                continue;
            }
            prev = Some(i);
            cursor = link_target(self.slots[i].next);
        }
        if removed > 0 {
            self.version = self.version.wrapping_add(1);
        }
        removed
    }

    /// Returns `true` if the pile contains at least one occurrence of
    /// `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find_slot(value).is_some()
    }

    /// Returns the number of occurrences of `value` in the pile.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(3);
    /// pile.insert(3);
    /// pile.insert(3);
    /// assert_eq!(pile.count_of(&3), 3);
    /// assert_eq!(pile.count_of(&4), 0);
    /// # }
    /// ```
    pub fn count_of(&self, value: &T) -> usize {
        if self.buckets.is_empty() {
            return 0;
        }
        let hash = self.fold_hash(value);
        let mut count = 0;
        let mut cursor = link_target(self.buckets[hash as usize % self.buckets.len()]);
        while let Some(i) = cursor {
            if self.slot_matches(i, hash, value) {
                count += 1;
            }
            cursor = link_target(self.slots[i].next);
        }
        count
    }

    /// Removes all elements from the pile.
    ///
    /// Bucket and slot storage is zeroed but not released; the allocated
    /// capacity is preserved.
    pub fn clear(&mut self) {
        if self.last_index == 0 && self.free_list.is_none() {
            return;
        }
        self.buckets.fill(0);
        for slot in &mut self.slots[..self.last_index] {
            *slot = Slot::empty();
        }
        self.free_list = None;
        self.last_index = 0;
        self.count = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Grows the pile so the slot array holds at least `min` slots.
    ///
    /// Does nothing if the current capacity already suffices. The new size
    /// is the next suitable prime, existing slots keep their indices, and
    /// bucket chains are rebuilt in ascending slot-index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.ensure_capacity(50);
    /// assert!(pile.capacity() >= 50);
    /// # }
    /// ```
    pub fn ensure_capacity(&mut self, min: usize) {
        let min = min.max(primes::DEFAULT_CAPACITY);
        if self.buckets.is_empty() {
            self.initialize(min);
            return;
        }
        if self.slots.len() >= min {
            return;
        }
        self.rebuild(primes::next_prime(min));
        self.version = self.version.wrapping_add(1);
    }

    /// Shrinks the backing storage to the smallest suitable prime that fits
    /// the current element count.
    ///
    /// Unlike growth, this also compacts: occupied slots are reassigned to
    /// contiguous indices starting at 0 and the free list is discarded. Does
    /// nothing if no smaller table would fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// for i in 0..1000 {
    ///     pile.insert(i);
    /// }
    /// for i in 3..1000 {
    ///     pile.remove(&i);
    /// }
    ///
    /// let before = pile.capacity();
    /// pile.shrink_to_fit();
    /// assert!(pile.capacity() < before);
    /// assert_eq!(pile.len(), 3);
    /// # }
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.count == 0 {
            self.clear();
            return;
        }
        let new_size = primes::next_prime(self.count);
        if new_size >= self.buckets.len() {
            return;
        }
        let old_slots = mem::take(&mut self.slots);
        let mut new_buckets = alloc::vec![0usize; new_size].into_boxed_slice();
        let mut new_slots: Vec<Slot<T>> = Vec::with_capacity(new_size);
        for slot in old_slots.into_vec().into_iter().take(self.last_index) {
            if !slot.is_occupied() {
                continue;
            }
            let bucket = slot.hash as usize % new_size;
            let index = new_slots.len();
            new_slots.push(Slot {
                hash: slot.hash,
                next: new_buckets[bucket],
                value: slot.value,
            });
            new_buckets[bucket] = index + 1;
        }
        self.last_index = new_slots.len();
        new_slots.resize_with(new_size, Slot::empty);
        self.buckets = new_buckets;
        self.slots = new_slots.into_boxed_slice();
        self.free_list = None;
        self.threshold = load_threshold(new_size);
        self.version = self.version.wrapping_add(1);
    }

    /// Begins detached iteration over the pile.
    ///
    /// Unlike [`iter`](HashPile::iter), a [`Cursor`] does not borrow the
    /// pile between steps, so the pile can be mutated while a cursor is
    /// live. Every [`Cursor::next`] call re-validates the version captured
    /// here and reports any intervening structural mutation as a
    /// [`CursorError`] instead of yielding inconsistent elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(1);
    ///
    /// let mut cursor = pile.cursor();
    /// assert_eq!(cursor.next(&pile), Ok(Some(&1)));
    ///
    /// pile.insert(2);
    /// assert!(cursor.next(&pile).is_err());
    /// # }
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor {
            version: self.version,
            index: 0,
        }
    }

    fn initialize(&mut self, capacity: usize) {
        let size = primes::next_prime(capacity);
        self.buckets = alloc::vec![0usize; size].into_boxed_slice();
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, Slot::empty);
        self.slots = slots.into_boxed_slice();
        self.free_list = None;
        self.last_index = 0;
        self.count = 0;
        self.threshold = load_threshold(size);
        self.version = self.version.wrapping_add(1);
    }

    fn grow(&mut self) {
        let new_size = if self.buckets.is_empty() {
            primes::next_prime(primes::DEFAULT_CAPACITY)
        } else {
            primes::expand_prime(self.buckets.len())
        };
        self.rebuild(new_size);
    }

    /// Replaces the backing arrays with ones of `new_size` slots.
    ///
    /// Slot records keep their indices (holes included); chains are then
    /// rebuilt by scanning occupied slots in ascending index order and
    /// linking each at its new bucket's head, so post-rebuild chain order
    /// depends only on slot layout. The free list is rethreaded over the
    /// surviving holes.
    fn rebuild(&mut self, new_size: usize) {
        let old_slots = mem::take(&mut self.slots);
        let mut new_buckets = alloc::vec![0usize; new_size].into_boxed_slice();
        let mut new_slots = old_slots.into_vec();
        new_slots.truncate(self.last_index);
        new_slots.resize_with(new_size, Slot::empty);
        for i in 0..self.last_index {
            let hash = new_slots[i].hash;
            if hash < 0 {
                continue;
            }
            let bucket = hash as usize % new_size;
            new_slots[i].next = new_buckets[bucket];
            new_buckets[bucket] = i + 1;
        }
        self.free_list = None;
        let mut i = self.last_index;
        while i > 0 {
            i -= 1;
            if !new_slots[i].is_occupied() {
                new_slots[i].next = self.free_list.map_or(0, |head| head + 1);
                self.free_list = Some(i);
            }
        }
        self.buckets = new_buckets;
        self.slots = new_slots.into_boxed_slice();
        self.threshold = load_threshold(new_size);
    }

    /// Marks a slot free and pushes it onto the free list. The caller must
    /// already have unlinked it from its bucket chain.
    fn release_slot(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.hash = FREE;
        slot.value = None;
        slot.next = self.free_list.map_or(0, |head| head + 1);
        self.free_list = Some(index);
    }

    #[inline]
    fn slot_matches(&self, index: usize, hash: i32, value: &T) -> bool {
        let slot = &self.slots[index];
        slot.hash == hash && slot.value.as_ref().is_some_and(|v| v == value)
    }

    fn find_slot(&self, value: &T) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.fold_hash(value);
        let mut cursor = link_target(self.buckets[hash as usize % self.buckets.len()]);
        while let Some(i) = cursor {
            if self.slot_matches(i, hash, value) {
                return Some(i);
            }
            cursor = link_target(self.slots[i].next);
        }
        None
    }

    /// Folds a value's 64-bit hash into the non-negative 31-bit form stored
    /// in slots, keeping [`FREE`] unambiguous.
    #[inline]
    fn fold_hash(&self, value: &T) -> i32 {
        let hash = self.hash_builder.hash_one(value);
        ((hash as u32 ^ (hash >> 32) as u32) & 0x7FFF_FFFF) as i32
    }
}

impl<T, S> HashPile<T, S> {
    /// Returns an iterator over the elements of the pile.
    ///
    /// Elements are yielded in ascending slot-index order, skipping free
    /// slots. This is not insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots[..self.last_index].iter(),
        }
    }

    /// Returns an iterator over the indices of currently-free slots, in
    /// free-list order (most recently vacated first).
    ///
    /// This is a read-only view over the intrusive free list, intended for
    /// inspection tooling that renders the slot array directly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(1);
    /// pile.insert(2);
    /// pile.remove(&1);
    ///
    /// let free: Vec<usize> = pile.free_slot_indices().collect();
    /// assert_eq!(free.len(), 1);
    /// # }
    /// ```
    pub fn free_slot_indices(&self) -> FreeSlotIndices<'_, T> {
        FreeSlotIndices {
            slots: &self.slots,
            next: self.free_list,
        }
    }

    /// Returns an iterator over the occupied slots of the pile, exposing
    /// each element together with its slot index and stored hash code.
    ///
    /// Intended for inspection tooling that groups elements by hash; the
    /// stored hash is the folded 31-bit value, not the raw hasher output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hash_pile::HashPile;
    ///
    /// let mut pile: HashPile<i32> = HashPile::new();
    /// pile.insert(5);
    /// pile.insert(5);
    ///
    /// let entries: Vec<_> = pile.slots().collect();
    /// assert_eq!(entries.len(), 2);
    /// // duplicates store the same hash code
    /// assert_eq!(entries[0].hash, entries[1].hash);
    /// # }
    /// ```
    pub fn slots(&self) -> Slots<'_, T> {
        Slots {
            slots: self.slots[..self.last_index].iter().enumerate(),
        }
    }

    /// Copies every element into `dest` starting at `offset`, in ascending
    /// slot-index order.
    ///
    /// # Panics
    ///
    /// Panics before writing anything if `offset` is past the end of `dest`
    /// or if fewer than [`len`](HashPile::len) elements fit after `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize)
    where
        T: Clone,
    {
        if offset > dest.len() {
            error::offset_out_of_range(offset, dest.len());
        }
        if dest.len() - offset < self.count {
            error::destination_too_small(self.count, dest.len() - offset);
        }
        let mut copied = 0;
        for slot in &self.slots[..self.last_index] {
            if copied == self.count {
                break;
            }
            if let Some(value) = &slot.value {
                dest[offset + copied] = value.clone();
                copied += 1;
            }
        }
    }
}

impl<T, S> PartialEq for HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Multiset equality: equal lengths and equal multiplicity for every
    /// element, regardless of slot layout.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| self.count_of(v) == other.count_of(v))
    }
}

impl<T, S> Eq for HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Extend<T> for HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, S> FromIterator<T> for HashPile<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pile = HashPile::new();
        pile.extend(iter);
        pile
    }
}

/// An iterator over the elements of a `HashPile`.
///
/// Yields elements in ascending slot-index order.
pub struct Iter<'a, T> {
    slots: core::slice::Iter<'a, Slot<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slot = self.slots.next()?;
            if let Some(value) = &slot.value {
                return Some(value);
            }
        }
    }
}

/// A consuming iterator over the elements of a `HashPile`.
pub struct IntoIter<T> {
    slots: alloc::vec::IntoIter<Slot<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slot = self.slots.next()?;
            if let Some(value) = slot.value {
                return Some(value);
            }
        }
    }
}

impl<T, S> IntoIterator for HashPile<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let mut slots = self.slots.into_vec();
        slots.truncate(self.last_index);
        IntoIter {
            slots: slots.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashPile<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A detached iteration handle over a `HashPile`, created by
/// [`HashPile::cursor`].
///
/// A cursor holds no borrow of the pile; it captures the pile's version
/// counter at creation and takes the pile by reference on every step. If the
/// pile is structurally mutated after the cursor is created, the next step
/// fails with [`CursorError`]. A cursor is only meaningful against the pile
/// it was created from.
///
/// This is a fail-fast safeguard for single-owner code that interleaves
/// reads with mutation, not a synchronization mechanism.
#[derive(Debug, Clone)]
pub struct Cursor {
    version: u64,
    index: usize,
}

impl Cursor {
    /// Advances to the next occupied slot of `pile`, in ascending
    /// slot-index order.
    ///
    /// Returns `Ok(None)` once the pile is exhausted, and
    /// [`Err(CursorError)`](CursorError) if the pile was structurally
    /// mutated since the cursor was created.
    pub fn next<'a, T, S>(&mut self, pile: &'a HashPile<T, S>) -> Result<Option<&'a T>, CursorError> {
        if self.version != pile.version {
            return Err(CursorError);
        }
        while self.index < pile.last_index {
            let slot = &pile.slots[self.index];
            self.index += 1;
            if let Some(value) = &slot.value {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Rewinds the cursor to the first slot.
    ///
    /// Fails like [`next`](Cursor::next) if the pile was structurally
    /// mutated since the cursor was created.
    pub fn reset<T, S>(&mut self, pile: &HashPile<T, S>) -> Result<(), CursorError> {
        if self.version != pile.version {
            return Err(CursorError);
        }
        self.index = 0;
        Ok(())
    }
}

/// An iterator over the free-list slot indices of a `HashPile`, created by
/// [`HashPile::free_slot_indices`].
pub struct FreeSlotIndices<'a, T> {
    slots: &'a [Slot<T>],
    next: Option<usize>,
}

impl<T> Iterator for FreeSlotIndices<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = link_target(self.slots[index].next);
        Some(index)
    }
}

/// An occupied slot of a `HashPile`, as yielded by [`HashPile::slots`].
#[derive(Debug, Clone, Copy)]
pub struct SlotEntry<'a, T> {
    /// Position of the slot in the slot array.
    pub index: usize,
    /// The folded 31-bit hash stored alongside the element.
    pub hash: i32,
    /// The element itself.
    pub value: &'a T,
}

/// An iterator over the occupied slots of a `HashPile`, created by
/// [`HashPile::slots`].
pub struct Slots<'a, T> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for Slots<'a, T> {
    type Item = SlotEntry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.slots.next()?;
            if let Some(value) = &slot.value {
                return Some(SlotEntry {
                    index,
                    hash: slot.hash,
                    value,
                });
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<T, S> serde::Serialize for HashPile<T, S>
where
    T: serde::Serialize,
{
    /// Serializes as a flat sequence of elements in ascending slot-index
    /// order. Slot layout is not part of the format.
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for HashPile<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    /// Rebuilds the pile by replaying [`insert`](HashPile::insert) over the
    /// serialized sequence. Multiset content is reproduced exactly; slot
    /// layout is not.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SeqVisitor<T, S> {
            marker: core::marker::PhantomData<(T, S)>,
        }

        impl<'de, T, S> serde::de::Visitor<'de> for SeqVisitor<T, S>
        where
            T: serde::Deserialize<'de> + Hash + Eq,
            S: BuildHasher + Default,
        {
            type Value = HashPile<T, S>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence of elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut pile = HashPile::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    pile.insert(value);
                }
                Ok(pile)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: core::marker::PhantomData,
        })
    }
}
