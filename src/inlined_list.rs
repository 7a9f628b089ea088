use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::Index;
use core::ops::IndexMut;

use crate::error;

/// A sequential list that stores its first element inline.
///
/// Logical index 0 lives directly in the container; indices `1..len` live in
/// a lazily-allocated overflow buffer. A list of zero or one element never
/// allocates, which makes `InlinedList` cheap as a placeholder field that is
/// usually empty or holds a single entry.
///
/// All positional operations resolve through the same inline/overflow split,
/// so `reverse`, `sort_range_by`, and iteration behave identically whether
/// an index lands inline or in the overflow buffer.
///
/// The flat snapshot produced by [`to_vec`] is the persistence boundary:
/// replaying [`push`] over such a snapshot (which is what [`FromIterator`]
/// and the optional `serde` support do) rebuilds a list with identical
/// logical content. Overflow capacity is not part of that contract.
///
/// [`to_vec`]: InlinedList::to_vec
/// [`push`]: InlinedList::push
#[derive(Clone)]
pub struct InlinedList<T> {
    first: Option<T>,
    overflow: Vec<T>,
}

impl<T> InlinedList<T> {
    /// Creates a new, empty list. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let list: InlinedList<i32> = InlinedList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            first: None,
            overflow: Vec::new(),
        }
    }

    /// Creates a new, empty list with room for `capacity` elements before
    /// the overflow buffer has to grow.
    ///
    /// The first element is always inline, so a `capacity` of 0 or 1
    /// allocates nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            first: None,
            overflow: Vec::with_capacity(capacity.saturating_sub(1)),
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        match self.first {
            Some(_) => 1 + self.overflow.len(),
            None => 0,
        }
    }

    /// Returns `true` if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Returns the number of elements the list can hold without growing:
    /// the inline slot plus the overflow buffer's capacity.
    pub fn capacity(&self) -> usize {
        1 + self.overflow.capacity()
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let mut list = InlinedList::new();
    /// list.push(10);
    /// list.push(20);
    /// assert_eq!(list.get(0), Some(&10));
    /// assert_eq!(list.get(1), Some(&20));
    /// assert_eq!(list.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index == 0 {
            self.first.as_ref()
        } else {
            self.overflow.get(index - 1)
        }
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index == 0 {
            self.first.as_mut()
        } else {
            self.overflow.get_mut(index - 1)
        }
    }

    /// Appends an element to the back of the list.
    ///
    /// The first element goes into the inline slot without allocating;
    /// later elements go into the overflow buffer, which grows by doubling
    /// when full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let mut list = InlinedList::new();
    /// list.push(1);
    /// assert_eq!(list.len(), 1);
    /// assert_eq!(list[0], 1);
    /// list.push(2);
    /// assert_eq!(list[1], 2);
    /// ```
    pub fn push(&mut self, value: T) {
        match self.first {
            None => self.first = Some(value),
            Some(_) => self.overflow.push(value),
        }
    }

    /// Inserts an element at `index`, shifting everything after it one
    /// position toward the back.
    ///
    /// Inserting at 0 moves the current inline element (if any) to the
    /// front of the overflow buffer.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let mut list = InlinedList::new();
    /// list.push(1);
    /// list.push(2);
    /// list.insert(0, 0);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        if index > len {
            error::index_out_of_range(index, len);
        }
        if index == 0 {
            if let Some(displaced) = self.first.take() {
                self.overflow.insert(0, displaced);
            }
            self.first = Some(value);
        } else {
            self.overflow.insert(index - 1, value);
        }
    }

    /// Removes and returns the element at `index`, shifting everything
    /// after it one position toward the front.
    ///
    /// Removing index 0 pulls the front of the overflow buffer (if any)
    /// into the inline slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        if index >= len {
            error::index_out_of_range(index, len);
        }
        if index == 0 {
            let removed = self.first.take();
            if !self.overflow.is_empty() {
                self.first = Some(self.overflow.remove(0));
            }
            // len check above guarantees the inline slot was occupied
            removed.unwrap()
        } else {
            self.overflow.remove(index - 1)
        }
    }

    /// Removes the first occurrence of `value`, if present.
    ///
    /// Returns whether an occurrence was found and removed.
    pub fn remove_value(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the logical index of the first occurrence of `value`, or
    /// `None` if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let mut list = InlinedList::new();
    /// list.push("a");
    /// list.push("b");
    /// assert_eq!(list.index_of(&"b"), Some(1));
    /// assert_eq!(list.index_of(&"c"), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let first = self.first.as_ref()?;
        if first == value {
            return Some(0);
        }
        self.overflow.iter().position(|v| v == value).map(|i| i + 1)
    }

    /// Returns `true` if the list contains `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Removes all elements from the list.
    ///
    /// Held elements are dropped so their resources are reclaimed, but the
    /// overflow buffer's capacity is kept for reuse.
    pub fn clear(&mut self) {
        self.first = None;
        self.overflow.clear();
    }

    /// Reverses the order of the whole list in place.
    pub fn reverse(&mut self) {
        self.reverse_range(0, self.len());
    }

    /// Reverses `len` elements in place starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start + len` exceeds the list length.
    pub fn reverse_range(&mut self, start: usize, len: usize) {
        self.check_range(start, len);
        if len < 2 {
            return;
        }
        let mut i = start;
        let mut j = start + len - 1;
        while i < j {
            self.swap(i, j);
            i += 1;
            j -= 1;
        }
    }

    /// Sorts the whole list with the supplied comparator.
    ///
    /// The sort is stable; ordering design is entirely the comparator's.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_range_by(0, self.len(), compare);
    }

    /// Sorts `len` elements starting at `start` with the supplied
    /// comparator.
    ///
    /// The range is moved into a scratch buffer, sorted there, and written
    /// back in place, so the inline/overflow boundary is invisible to the
    /// comparator.
    ///
    /// # Panics
    ///
    /// Panics if `start + len` exceeds the list length.
    pub fn sort_range_by<F>(&mut self, start: usize, len: usize, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.check_range(start, len);
        if len < 2 {
            return;
        }
        let mut scratch: Vec<T> = Vec::with_capacity(len);
        let overflow_start = start.saturating_sub(1);
        if start == 0 {
            // len >= 2, so the inline slot is occupied
            scratch.push(self.first.take().unwrap());
            scratch.extend(self.overflow.drain(..len - 1));
        } else {
            scratch.extend(self.overflow.drain(overflow_start..overflow_start + len));
        }
        scratch.sort_by(compare);
        let mut sorted = scratch.into_iter();
        if start == 0 {
            self.first = sorted.next();
        }
        self.overflow.splice(overflow_start..overflow_start, sorted);
    }

    /// Returns a flat copy of the list in logical order.
    ///
    /// This is the persistence snapshot: replaying [`push`] over the result
    /// rebuilds an equivalent list.
    ///
    /// [`push`]: InlinedList::push
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hash_pile::InlinedList;
    ///
    /// let mut list = InlinedList::new();
    /// list.push(1);
    /// list.push(2);
    ///
    /// let snapshot = list.to_vec();
    /// let restored: InlinedList<i32> = snapshot.into_iter().collect();
    /// assert_eq!(restored, list);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        if let Some(first) = &self.first {
            out.push(first.clone());
            out.extend(self.overflow.iter().cloned());
        }
        out
    }

    /// Copies every element into `dest` starting at `offset`, in logical
    /// order.
    ///
    /// # Panics
    ///
    /// Panics before writing anything if `offset` is past the end of `dest`
    /// or if fewer than [`len`](InlinedList::len) elements fit after
    /// `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize)
    where
        T: Clone,
    {
        if offset > dest.len() {
            error::offset_out_of_range(offset, dest.len());
        }
        let len = self.len();
        if dest.len() - offset < len {
            error::destination_too_small(len, dest.len() - offset);
        }
        if let Some(first) = &self.first {
            dest[offset] = first.clone();
            dest[offset + 1..offset + len].clone_from_slice(&self.overflow);
        }
    }

    /// Returns an iterator over the elements in logical order.
    ///
    /// The iterator is `Clone`, so iteration can be restarted from any
    /// captured position.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            first: self.first.as_ref(),
            overflow: self.overflow.iter(),
        }
    }

    /// Swaps the elements at logical indices `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        if a >= len {
            error::index_out_of_range(a, len);
        }
        if b >= len {
            error::index_out_of_range(b, len);
        }
        if a == b {
            return;
        }
        if a == 0 || b == 0 {
            let other = a.max(b);
            // both bounds hold and a != b, so the inline slot is occupied
            let first = self.first.as_mut().unwrap();
            core::mem::swap(first, &mut self.overflow[other - 1]);
        } else {
            self.overflow.swap(a - 1, b - 1);
        }
    }

    fn check_range(&self, start: usize, len: usize) {
        let extent = self.len();
        match start.checked_add(len) {
            Some(end) if end <= extent => {}
            _ => error::range_out_of_range(start, len, extent),
        }
    }

}

impl<T> Default for InlinedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for InlinedList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for InlinedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for InlinedList<T> {}

impl<T> Index<usize> for InlinedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => error::index_out_of_range(index, self.len()),
        }
    }
}

impl<T> IndexMut<usize> for InlinedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => error::index_out_of_range(index, len),
        }
    }
}

impl<T> Extend<T> for InlinedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for InlinedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = InlinedList::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for InlinedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

/// An iterator over the elements of an `InlinedList`, in logical order.
#[derive(Clone)]
pub struct Iter<'a, T> {
    first: Option<&'a T>,
    overflow: core::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.first.take() {
            Some(first) => Some(first),
            None => self.overflow.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.first.is_some() as usize + self.overflow.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A consuming iterator over the elements of an `InlinedList`, in logical
/// order.
pub struct IntoIter<T> {
    first: Option<T>,
    overflow: alloc::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.first.take() {
            Some(first) => Some(first),
            None => self.overflow.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.first.is_some() as usize + self.overflow.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for InlinedList<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            first: self.first,
            overflow: self.overflow.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a InlinedList<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for InlinedList<T>
where
    T: serde::Serialize,
{
    /// Serializes as a flat sequence of elements in logical order.
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for InlinedList<T>
where
    T: serde::Deserialize<'de>,
{
    /// Rebuilds the list by replaying [`push`](InlinedList::push) over the
    /// serialized sequence. Logical indexing is reproduced exactly;
    /// overflow capacity is not part of the format.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SeqVisitor<T> {
            marker: core::marker::PhantomData<T>,
        }

        impl<'de, T> serde::de::Visitor<'de> for SeqVisitor<T>
        where
            T: serde::Deserialize<'de>,
        {
            type Value = InlinedList<T>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence of elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut list = InlinedList::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    list.push(value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: core::marker::PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_new_is_empty_without_allocation() {
        let list: InlinedList<i32> = InlinedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), 1);
        assert_eq!(list.get(0), None);
    }

    #[test]
    fn test_single_element_stays_inline() {
        let mut list = InlinedList::new();
        list.push(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], 1);
        // no overflow storage required for one element
        assert_eq!(list.capacity(), 1);
    }

    #[test]
    fn test_push_insert_scenario() {
        let mut list = InlinedList::new();
        list.push(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], 1);

        list.push(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], 2);

        list.insert(0, 0);
        assert_eq!(list.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_indexing_across_boundary() {
        let mut list = InlinedList::new();
        for i in 0..5 {
            list.push(i * 10);
        }
        for i in 0..5 {
            assert_eq!(list[i], (i * 10) as i32);
        }
        list[0] = -1;
        list[4] = -5;
        assert_eq!(list.to_vec(), vec![-1, 10, 20, 30, -5]);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_past_end_panics() {
        let mut list = InlinedList::new();
        list.push(1);
        let _ = list[1];
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_empty_panics() {
        let list: InlinedList<i32> = InlinedList::new();
        let _ = list[0];
    }

    #[test]
    fn test_get_is_checked() {
        let mut list = InlinedList::new();
        list.push(7);
        assert_eq!(list.get(0), Some(&7));
        assert_eq!(list.get(1), None);
        *list.get_mut(0).unwrap() = 8;
        assert_eq!(list[0], 8);
        assert_eq!(list.get_mut(5), None);
    }

    #[test]
    fn test_insert_at_every_position() {
        let mut list = InlinedList::new();
        list.insert(0, 2); // [2]
        list.insert(0, 0); // [0, 2]
        list.insert(1, 1); // [0, 1, 2]
        list.insert(3, 3); // [0, 1, 2, 3]
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_insert_past_end_panics() {
        let mut list = InlinedList::new();
        list.push(1);
        list.insert(2, 9);
    }

    #[test]
    fn test_remove_at_every_position() {
        let mut list: InlinedList<i32> = (0..5).collect();
        assert_eq!(list.remove(0), 0); // [1, 2, 3, 4]
        assert_eq!(list[0], 1);
        assert_eq!(list.remove(3), 4); // [1, 2, 3]
        assert_eq!(list.remove(1), 2); // [1, 3]
        assert_eq!(list.to_vec(), vec![1, 3]);
        assert_eq!(list.remove(0), 1);
        assert_eq!(list.remove(0), 3);
        assert!(list.is_empty());
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_remove_past_end_panics() {
        let mut list = InlinedList::new();
        list.push(1);
        list.remove(1);
    }

    #[test]
    fn test_remove_value() {
        let mut list: InlinedList<i32> = vec![1, 2, 1].into();
        assert!(list.remove_value(&1));
        assert_eq!(list.to_vec(), vec![2, 1]);
        assert!(!list.remove_value(&9));
    }

    #[test]
    fn test_index_of_matches_to_vec() {
        let mut list = InlinedList::new();
        for value in ["a", "b", "c", "b"] {
            list.push(value);
        }
        let snapshot = list.to_vec();
        for (i, value) in snapshot.iter().enumerate() {
            let found = list.index_of(value).unwrap();
            assert_eq!(snapshot[found], *value);
            assert!(found <= i);
        }
        assert_eq!(list.index_of(&"a"), Some(0));
        assert_eq!(list.index_of(&"b"), Some(1));
        assert_eq!(list.index_of(&"z"), None);
        assert!(list.contains(&"c"));
        assert!(!list.contains(&"z"));
    }

    #[test]
    fn test_clear_keeps_overflow_capacity() {
        let mut list: InlinedList<i32> = (0..100).collect();
        let capacity = list.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), capacity);
        assert_eq!(list.get(0), None);
    }

    #[test]
    fn test_clear_releases_elements() {
        use alloc::rc::Rc;

        let tracked = Rc::new(0);
        let mut list = InlinedList::new();
        for _ in 0..3 {
            list.push(Rc::clone(&tracked));
        }
        assert_eq!(Rc::strong_count(&tracked), 4);
        list.clear();
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn test_reverse() {
        let mut list: InlinedList<i32> = (0..6).collect();
        list.reverse();
        assert_eq!(list.to_vec(), vec![5, 4, 3, 2, 1, 0]);

        let mut single = InlinedList::new();
        single.push(1);
        single.reverse();
        assert_eq!(single.to_vec(), vec![1]);

        let mut empty: InlinedList<i32> = InlinedList::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_reverse_range_spans_inline_boundary() {
        let mut list: InlinedList<i32> = (0..6).collect();
        list.reverse_range(0, 3);
        assert_eq!(list.to_vec(), vec![2, 1, 0, 3, 4, 5]);
        list.reverse_range(3, 3);
        assert_eq!(list.to_vec(), vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    #[should_panic(expected = "range out of range")]
    fn test_reverse_range_out_of_range() {
        let mut list: InlinedList<i32> = (0..3).collect();
        list.reverse_range(1, 3);
    }

    #[test]
    fn test_sort_by() {
        let mut list: InlinedList<i32> = vec![3, 1, 4, 1, 5, 9, 2, 6].into();
        list.sort_by(|a, b| a.cmp(b));
        assert_eq!(list.to_vec(), vec![1, 1, 2, 3, 4, 5, 6, 9]);

        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list.to_vec(), vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn test_sort_range_by_leaves_rest_untouched() {
        let mut list: InlinedList<i32> = vec![9, 3, 1, 2, 0].into();
        list.sort_range_by(1, 3, |a, b| a.cmp(b));
        assert_eq!(list.to_vec(), vec![9, 1, 2, 3, 0]);
    }

    #[test]
    fn test_sort_range_including_inline_slot() {
        let mut list: InlinedList<i32> = vec![5, 4, 3].into();
        list.sort_range_by(0, 2, |a, b| a.cmp(b));
        assert_eq!(list.to_vec(), vec![4, 5, 3]);
    }

    #[test]
    #[should_panic(expected = "range out of range")]
    fn test_sort_range_out_of_range() {
        let mut list: InlinedList<i32> = (0..3).collect();
        list.sort_range_by(2, 2, |a, b| a.cmp(b));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut list: InlinedList<(i32, char)> =
            vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(list.to_vec(), vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_swap() {
        let mut list: InlinedList<i32> = (0..4).collect();
        list.swap(0, 3);
        assert_eq!(list.to_vec(), vec![3, 1, 2, 0]);
        list.swap(1, 2);
        assert_eq!(list.to_vec(), vec![3, 2, 1, 0]);
        list.swap(2, 2);
        assert_eq!(list.to_vec(), vec![3, 2, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_swap_out_of_range() {
        let mut list: InlinedList<i32> = (0..2).collect();
        list.swap(0, 5);
    }

    #[test]
    fn test_copy_to() {
        let list: InlinedList<i32> = (1..4).collect();
        let mut dest = vec![0; 5];
        list.copy_to(&mut dest, 1);
        assert_eq!(dest, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    #[should_panic(expected = "destination too small")]
    fn test_copy_to_destination_too_small() {
        let list: InlinedList<i32> = (0..3).collect();
        let mut dest = vec![0; 4];
        list.copy_to(&mut dest, 2);
    }

    #[test]
    fn test_iter_logical_order_and_restart() {
        let list: InlinedList<i32> = (0..5).collect();
        let collected: Vec<i32> = list.iter().copied().collect();
        assert_eq!(collected, vec![0, 1, 2, 3, 4]);

        let mut iter = list.iter();
        iter.next();
        iter.next();
        let resumed = iter.clone();
        let rest: Vec<i32> = iter.copied().collect();
        let rest_again: Vec<i32> = resumed.copied().collect();
        assert_eq!(rest, vec![2, 3, 4]);
        assert_eq!(rest, rest_again);
    }

    #[test]
    fn test_iter_exact_size() {
        let list: InlinedList<i32> = (0..4).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_into_iter() {
        let list: InlinedList<String> = vec!["a".to_string(), "b".to_string()].into();
        let collected: Vec<String> = list.into_iter().collect();
        assert_eq!(collected, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_model_against_vec_reference() {
        let mut list = InlinedList::new();
        let mut model: Vec<i32> = Vec::new();

        for i in 0..100 {
            match i % 5 {
                0 | 1 => {
                    list.push(i);
                    model.push(i);
                }
                2 => {
                    let at = (i as usize) % (model.len() + 1);
                    list.insert(at, i);
                    model.insert(at, i);
                }
                3 if !model.is_empty() => {
                    let at = (i as usize) % model.len();
                    assert_eq!(list.remove(at), model.remove(at));
                }
                _ => {
                    assert_eq!(list.index_of(&i), model.iter().position(|&v| v == i));
                }
            }
            assert_eq!(list.len(), model.len());
            assert_eq!(list.to_vec(), model);
        }
    }

    #[test]
    fn test_persistence_round_trip() {
        for len in [0usize, 1, 2, 100] {
            let original: InlinedList<usize> = (0..len).collect();
            let snapshot = original.to_vec();
            assert_eq!(snapshot.len(), original.len());

            let mut restored = InlinedList::new();
            for value in &snapshot {
                restored.push(*value);
            }
            assert_eq!(restored.to_vec(), snapshot);
            assert_eq!(restored, original);
        }
    }

    #[test]
    fn test_equality_and_debug() {
        let a: InlinedList<i32> = (0..3).collect();
        let b: InlinedList<i32> = vec![0, 1, 2].into();
        let c: InlinedList<i32> = vec![0, 1].into();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(alloc::format!("{a:?}"), "[0, 1, 2]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        for len in [0usize, 1, 2, 100] {
            let original: InlinedList<usize> = (0..len).collect();
            let json = serde_json::to_string(&original).unwrap();
            let restored: InlinedList<usize> = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, original);
        }
    }
}
