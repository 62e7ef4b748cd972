//! Byte-slice view (component A): an immutable `{pointer, length}` view over
//! input bytes, with bounds-checked access and non-copying sub-slicing.
//!
//! This is intentionally the minimal surface the tokenizer needs — a generic
//! byte-string substrate is out of scope (`spec.md` §1) — so `ByteView` is a
//! thin, `Copy` wrapper over `&[u8]` rather than a reimplementation of a
//! string library. Comparison and search helpers are provided via `bstr`'s
//! `ByteSlice` extension trait, the same crate the teacher depends on for
//! byte-string ergonomics, since the spec marks those helpers "not part of
//! the core".

use bstr::ByteSlice;

/// A sub-slice bound: an exact index, an offset from the end, or the
/// end-of-slice sentinel. Used by [`ByteView::sub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// An absolute, zero-based index from the start.
    From(usize),
    /// An index counted back from the end (`End(1)` is the last byte).
    FromEnd(usize),
    /// The end of the slice.
    End,
}

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Bound::From(value)
    }
}

/// An immutable, non-owning view over a byte range. `Copy` and borrow-only:
/// no `ByteView` ever owns the bytes it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteView<'a> {
    #[cfg_attr(feature = "serde", serde(borrow))]
    data: &'a [u8],
}

impl Default for ByteView<'_> {
    fn default() -> Self {
        ByteView { data: &[] }
    }
}

impl<'a> ByteView<'a> {
    /// Wrap a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The number of bytes in view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked byte access.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    fn resolve(&self, bound: Bound) -> usize {
        let len = self.data.len();
        match bound {
            Bound::From(i) => i.min(len),
            Bound::FromEnd(i) => len.saturating_sub(i),
            Bound::End => len,
        }
    }

    /// Take a half-open sub-slice `[start, end)`. Each bound may be an
    /// absolute index, an offset from the end, or [`Bound::End`]; bounds
    /// that fall past the end are clamped rather than panicking. Never
    /// copies bytes.
    #[must_use]
    pub fn sub(&self, start: impl Into<Bound>, end: impl Into<Bound>) -> ByteView<'a> {
        let start = self.resolve(start.into());
        let end = self.resolve(end.into());
        if start >= end {
            ByteView { data: &[] }
        } else {
            ByteView {
                data: &self.data[start..end],
            }
        }
    }

    /// Whether this view starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data.starts_with_str(prefix)
    }

    /// Whether `needle` occurs anywhere in this view.
    #[must_use]
    pub fn contains(&self, needle: &[u8]) -> bool {
        self.data.contains_str(needle)
    }

    /// The byte offset of the first occurrence of `needle`, if any.
    #[must_use]
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        self.data.find(needle)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(data: &'a [u8]) -> Self {
        ByteView::new(data)
    }
}

impl<'a> From<&'a str> for ByteView<'a> {
    fn from(data: &'a str) -> Self {
        ByteView::new(data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_bounds_checked() {
        let v = ByteView::new(b"abc");
        assert_eq!(v.get(0), Some(b'a'));
        assert_eq!(v.get(2), Some(b'c'));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn sub_supports_absolute_and_end_relative_bounds() {
        let v = ByteView::new(b"hello world");
        assert_eq!(v.sub(0, 5).as_bytes(), b"hello");
        assert_eq!(v.sub(6, Bound::End).as_bytes(), b"world");
        assert_eq!(v.sub(0, Bound::FromEnd(6)).as_bytes(), b"hello");
    }

    #[test]
    fn sub_clamps_past_end_instead_of_panicking() {
        let v = ByteView::new(b"abc");
        assert_eq!(v.sub(0, 100).as_bytes(), b"abc");
        assert_eq!(v.sub(100, 200).as_bytes(), b"");
        assert_eq!(v.sub(2, 1).as_bytes(), b"");
    }

    #[test]
    fn search_helpers_delegate_to_bstr() {
        let v = ByteView::new(b"[1,2,3]");
        assert!(v.starts_with(b"["));
        assert!(v.contains(b",2,"));
        assert_eq!(v.find(b"2"), Some(3));
    }
}
