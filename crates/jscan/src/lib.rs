//! `jscan` is a table-driven JSON tokenizer that never allocates: given a
//! byte slice and a caller-provided array of [`Token`] records, it walks a
//! 31-state, 31-class transition table once and writes a flat, preorder
//! array of tokens describing every value and container in the input. The
//! array is read back with [`TokenCursor`], which turns `depth` and the
//! bookend flags into tree navigation without ever building an index.
//!
//! ```
//! use jscan::{parse_slice, Token, TokenStore};
//!
//! let mut storage = [Token::default(); 16];
//! let mut store = TokenStore::new(&mut storage);
//! let count = parse_slice(br#"{"a":[1,2,3]}"#.as_slice().into(), &mut store).unwrap();
//! assert_eq!(count, 6); // the object, the key, the array, and its three elements
//! ```

#![no_std]

mod class;
mod cursor;
mod error;
mod parser;
mod slice;
mod store;
mod table;
mod token;

pub use cursor::TokenCursor;
pub use error::JsonError;
pub use slice::{Bound, ByteView};
pub use store::TokenStore;
pub use token::{Token, TokenFlags, TokenKind};

use core::ffi::CStr;

use parser::Driver;

/// Tokenize a NUL-terminated C string, stopping at its first NUL byte.
/// Returns the number of tokens written, or the error that stopped parsing.
pub fn parse_cstr<'t, 'src>(s: &'src CStr, store: &mut TokenStore<'t, 'src>) -> Result<usize, JsonError> {
    parse_slice(ByteView::new(s.to_bytes()), store)
}

/// Tokenize `view`, writing preorder [`Token`] records into `store`.
/// Returns the number of tokens written, or the error that stopped parsing.
pub fn parse_slice<'t, 'src>(view: ByteView<'src>, store: &mut TokenStore<'t, 'src>) -> Result<usize, JsonError> {
    Driver::new(view, store).run()
}

/// Tokenize the `len` bytes starting at `ptr`, writing preorder [`Token`]
/// records into `store`.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes, those bytes must stay
/// initialized and unaliased for the duration of `'src`, and `len` must not
/// overflow `isize` when added to `ptr`, per the safety contract of
/// [`core::slice::from_raw_parts`].
pub unsafe fn parse_raw_parts<'t, 'src>(
    ptr: *const u8,
    len: usize,
    store: &mut TokenStore<'t, 'src>,
) -> Result<usize, JsonError> {
    let bytes = unsafe { core::slice::from_raw_parts(ptr, len) };
    parse_slice(ByteView::new(bytes), store)
}
