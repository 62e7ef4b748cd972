//! Tree navigation (component F, `spec.md` §4.F): read-only scans over the
//! flat, preorder token array using `depth` and the `IS_FIRST`/`IS_LAST`
//! flags as stop conditions. No auxiliary index is ever built — this
//! mirrors the teacher's cursor/zipper pattern (`value_zipper.rs`) but over
//! an immutable flat array rather than an owned, mutable tree, so no
//! pointer stack or `unsafe` is needed.

use crate::token::Token;

/// A read-only position within a parsed [`crate::store::TokenStore`]'s
/// token slice. All operations are total: they return `None` rather than
/// panicking when a neighbor doesn't exist.
#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'t, 'src> {
    tokens: &'t [Token<'src>],
    index: usize,
}

impl<'t, 'src> TokenCursor<'t, 'src> {
    /// Build a cursor at `index` into `tokens`. Returns `None` if `index` is
    /// out of bounds.
    #[must_use]
    pub fn new(tokens: &'t [Token<'src>], index: usize) -> Option<Self> {
        if index < tokens.len() {
            Some(TokenCursor { tokens, index })
        } else {
            None
        }
    }

    /// The token this cursor currently points at.
    #[must_use]
    pub fn token(&self) -> &'t Token<'src> {
        &self.tokens[self.index]
    }

    /// This token's index within the preorder array.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    fn at(&self, index: usize) -> Self {
        TokenCursor {
            tokens: self.tokens,
            index,
        }
    }

    /// The token immediately preceding this one in preorder, unless this
    /// one is marked `IS_FIRST`.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        if self.token().is_first() {
            None
        } else {
            Some(self.at(self.index - 1))
        }
    }

    /// The token immediately following this one in preorder, unless this
    /// one is marked `IS_LAST`.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        if self.token().is_last() {
            None
        } else {
            Some(self.at(self.index + 1))
        }
    }

    /// The root of the tree this token belongs to: walk backward until
    /// `IS_FIRST`.
    #[must_use]
    pub fn root(&self) -> Self {
        let mut cursor = *self;
        while !cursor.token().is_first() {
            cursor = cursor.at(cursor.index - 1);
        }
        cursor
    }

    /// The nearest enclosing container: walk backward while depth is `>=`
    /// this token's depth, and return the first record with strictly
    /// lesser depth.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let depth = self.token().depth();
        let mut i = self.index;
        while i > 0 {
            i -= 1;
            if self.tokens[i].depth() < depth {
                return Some(self.at(i));
            }
        }
        None
    }

    /// The first child: the next record in preorder, iff its depth is
    /// exactly one greater than this token's.
    #[must_use]
    pub fn child(&self) -> Option<Self> {
        let next = self.next()?;
        if next.token().depth() == self.token().depth() + 1 {
            Some(next)
        } else {
            None
        }
    }

    /// The previous sibling: walk backward, skipping deeper descendants,
    /// stopping at the first record of equal depth (returned) or lesser
    /// depth (absent).
    #[must_use]
    pub fn prev_sibling(&self) -> Option<Self> {
        let depth = self.token().depth();
        let mut cursor = self.prev()?;
        loop {
            let d = cursor.token().depth();
            if d == depth {
                return Some(cursor);
            }
            if d < depth {
                return None;
            }
            cursor = cursor.prev()?;
        }
    }

    /// The next sibling: walk forward, skipping deeper descendants,
    /// stopping at the first record of equal depth (returned) or lesser
    /// depth (absent).
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        let depth = self.token().depth();
        let mut cursor = self.next()?;
        loop {
            let d = cursor.token().depth();
            if d == depth {
                return Some(cursor);
            }
            if d < depth {
                return None;
            }
            cursor = cursor.next()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_slice, store::TokenStore, token::Token};

    #[test]
    fn root_walks_back_to_index_zero() {
        let mut storage = [Token::default(); 64];
        let mut store = TokenStore::new(&mut storage);
        let count = parse_slice(br#"{"a":[1,2]}"#.as_slice().into(), &mut store).unwrap();
        let slice = store.as_slice();
        let last = TokenCursor::new(slice, count - 1).unwrap();
        assert_eq!(last.root().index(), 0);
    }

    #[test]
    fn child_and_parent_are_dual() {
        let mut storage = [Token::default(); 64];
        let mut store = TokenStore::new(&mut storage);
        parse_slice(br#"{"a":[1,2]}"#.as_slice().into(), &mut store).unwrap();
        let slice = store.as_slice();
        let root = TokenCursor::new(slice, 0).unwrap();
        let child = root.child().unwrap();
        assert_eq!(child.parent().unwrap().index(), root.index());
    }

    #[test]
    fn sibling_navigation_is_dual() {
        let mut storage = [Token::default(); 64];
        let mut store = TokenStore::new(&mut storage);
        parse_slice(b"[1,2,3]".as_slice().into(), &mut store).unwrap();
        let slice = store.as_slice();
        let arr = TokenCursor::new(slice, 0).unwrap();
        let first = arr.child().unwrap();
        let second = first.next_sibling().unwrap();
        assert_eq!(second.prev_sibling().unwrap().index(), first.index());
        let third = second.next_sibling().unwrap();
        assert!(third.next_sibling().is_none());
    }

    #[test]
    fn bookends_have_no_prev_or_next_past_the_ends() {
        let mut storage = [Token::default(); 64];
        let mut store = TokenStore::new(&mut storage);
        let count = parse_slice(b"[1,2,3]".as_slice().into(), &mut store).unwrap();
        let slice = store.as_slice();
        let first = TokenCursor::new(slice, 0).unwrap();
        assert!(first.prev().is_none());
        let last = TokenCursor::new(slice, count - 1).unwrap();
        assert!(last.next().is_none());
    }
}
