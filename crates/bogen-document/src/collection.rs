// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ordered image collection — the list the user builds before exporting.
//
// Positions are always contiguous (0..len). Out-of-range positions are
// reported as `IndexOutOfRange` and leave the collection untouched.

use bogen_core::error::{BogenError, Result};
use bogen_core::types::SortOrder;

use crate::image::source::SourceImage;

/// Ordered, mutable sequence of images.
///
/// Generic so the ordering rules can be exercised without decoding pixels;
/// sessions use the default `SourceImage`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollection<T = SourceImage> {
    images: Vec<T>,
}

impl<T> ImageCollection<T> {
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    // -- Mutation -------------------------------------------------------------

    /// Append an image to the end. Duplicates and zero-area images are kept.
    pub fn add(&mut self, image: T) {
        self.images.push(image);
    }

    /// Remove and return the image at `index`; later images shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.images.remove(index))
    }

    /// Move the image at `index` to position 0, keeping everything else in
    /// relative order.
    pub fn move_to_front(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.images[..=index].rotate_right(1);
        Ok(())
    }

    /// `Ascending` keeps insertion order; `Descending` reverses it.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => {}
            SortOrder::Descending => self.images.reverse(),
        }
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    // -- Access ---------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.images.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.images.iter()
    }

    /// Read-only view handed to the composer.
    pub fn as_slice(&self) -> &[T] {
        &self.images
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(BogenError::IndexOutOfRange {
                index,
                len: self.images.len(),
            })
        }
    }
}

impl<T> Default for ImageCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ImageCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ImageCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labelled(n: u32) -> ImageCollection<u32> {
        (0..n).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut c = ImageCollection::new();
        c.add("a");
        c.add("b");
        c.add("a");
        assert_eq!(c.as_slice(), &["a", "b", "a"]);
    }

    #[test]
    fn remove_at_returns_element_and_shifts() {
        let mut c = labelled(4);
        assert_eq!(c.remove_at(1).unwrap(), 1);
        assert_eq!(c.as_slice(), &[0, 2, 3]);
    }

    #[test]
    fn remove_out_of_range_is_reported_and_harmless() {
        let mut c = labelled(2);
        let err = c.remove_at(2).unwrap_err();
        assert!(matches!(err, BogenError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(c.as_slice(), &[0, 1]);

        let mut empty: ImageCollection<u32> = ImageCollection::new();
        assert!(empty.remove_at(0).is_err());
    }

    #[test]
    fn move_to_front_rotates_prefix() {
        let mut c = labelled(5);
        c.move_to_front(3).unwrap();
        assert_eq!(c.as_slice(), &[3, 0, 1, 2, 4]);

        c.move_to_front(0).unwrap();
        assert_eq!(c.as_slice(), &[3, 0, 1, 2, 4]);
    }

    #[test]
    fn move_to_front_out_of_range_is_noop() {
        let mut c = labelled(3);
        let err = c.move_to_front(7).unwrap_err();
        assert!(matches!(err, BogenError::IndexOutOfRange { index: 7, len: 3 }));
        assert_eq!(c.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn sort_descending_reverses_and_ascending_is_identity() {
        let mut c = labelled(4);
        c.sort(SortOrder::Ascending);
        assert_eq!(c.as_slice(), &[0, 1, 2, 3]);
        c.sort(SortOrder::Descending);
        assert_eq!(c.as_slice(), &[3, 2, 1, 0]);
        // Ascending does not undo a previous descending sort.
        c.sort(SortOrder::Ascending);
        assert_eq!(c.as_slice(), &[3, 2, 1, 0]);
    }

    #[test]
    fn clear_empties() {
        let mut c = labelled(3);
        c.clear();
        assert!(c.is_empty());
        c.clear();
        assert_eq!(c.len(), 0);
    }

    proptest! {
        #[test]
        fn prop_remove_keeps_relative_order(len in 1usize..40, pick in any::<prop::sample::Index>()) {
            let mut c = labelled(len as u32);
            let index = pick.index(len);
            let removed = c.remove_at(index).unwrap();

            prop_assert_eq!(removed, index as u32);
            prop_assert_eq!(c.len(), len - 1);
            let expected: Vec<u32> = (0..len as u32).filter(|&v| v != index as u32).collect();
            prop_assert_eq!(c.as_slice(), expected.as_slice());
        }

        #[test]
        fn prop_move_to_front_puts_element_first(len in 1usize..40, pick in any::<prop::sample::Index>()) {
            let mut c = labelled(len as u32);
            let index = pick.index(len);
            c.move_to_front(index).unwrap();

            prop_assert_eq!(c.get(0).copied(), Some(index as u32));
            let rest: Vec<u32> = c.iter().skip(1).copied().collect();
            let expected: Vec<u32> = (0..len as u32).filter(|&v| v != index as u32).collect();
            prop_assert_eq!(rest, expected);
        }

        #[test]
        fn prop_descending_is_self_inverse(items in prop::collection::vec(any::<u16>(), 0..50)) {
            let mut c: ImageCollection<u16> = items.iter().copied().collect();
            c.sort(SortOrder::Descending);
            c.sort(SortOrder::Descending);
            prop_assert_eq!(c.as_slice(), items.as_slice());
        }
    }
}
