//! The driver (component D): walks the input byte by byte, consults the
//! transition table for each `(state, class)` pair, and performs the side
//! effect an action cell requests. The three public entry points in the
//! crate root all bottom out in [`Driver::run`].
//!
//! A handful of actions (`Pl`, `Pm`, `Pq`, `Fa`, `Fo`) need context the table
//! doesn't encode: whether the value just finished is a key or a value,
//! which container it belongs to, whether that container is still empty.
//! Rather than keep a side stack of open containers, the driver answers
//! these questions by walking the already-written token array backward,
//! reusing [`TokenCursor`]'s `parent`/`prev_sibling` — both of which only
//! ever look behind the cursor, so they're safe to call mid-parse even
//! though `IS_LAST` isn't assigned until the very end.

use crate::class::Class;
use crate::cursor::TokenCursor;
use crate::error::JsonError;
use crate::slice::ByteView;
use crate::store::TokenStore;
use crate::table::{self, Action, Cell, State};
use crate::token::{Token, TokenKind};

pub(crate) struct Driver<'s, 't, 'src> {
    source: ByteView<'src>,
    store: &'s mut TokenStore<'t, 'src>,
    state: State,
    depth: u32,
    pos: usize,
}

impl<'s, 't, 'src> Driver<'s, 't, 'src> {
    pub(crate) fn new(source: ByteView<'src>, store: &'s mut TokenStore<'t, 'src>) -> Self {
        Driver {
            source,
            store,
            state: State::Go,
            depth: 0,
            pos: 0,
        }
    }

    pub(crate) fn run(mut self) -> Result<usize, JsonError> {
        let len = self.source.len();
        let mut i = 0;
        while i < len {
            let byte = self.source.get(i).expect("i is within bounds by the loop condition");
            let class = Class::classify(byte).ok_or(JsonError::BadFormat { at: i })?;
            self.pos = i;
            self.step(class)?;
            i += 1;
        }
        self.pos = len;
        self.finalize()
    }

    fn step(&mut self, class: Class) -> Result<(), JsonError> {
        match table::lookup(self.state, class) {
            Some(Cell::State(next)) => {
                self.state = next;
                Ok(())
            }
            Some(Cell::Action(action)) => self.dispatch(action),
            None => Err(JsonError::BadFormat { at: self.pos }),
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<(), JsonError> {
        match action {
            Action::Ba => self.begin(TokenKind::Array, State::Ar, true),
            Action::Bo => self.begin(TokenKind::Object, State::Ob, true),
            Action::Bs => self.begin(TokenKind::String, State::St, false),
            Action::Bt => self.begin(TokenKind::True, State::T1, false),
            Action::Bf => self.begin(TokenKind::False, State::F1, false),
            Action::Bn => self.begin(TokenKind::Null, State::N1, false),
            Action::Bm => self.begin(TokenKind::Number, State::Mi, false),
            Action::Bz => self.begin(TokenKind::Number, State::Ze, false),
            Action::Bd => self.begin(TokenKind::Number, State::In, false),
            Action::Fa => self.finish(TokenKind::Array),
            Action::Fo => self.finish(TokenKind::Object),
            Action::Pl => {
                self.state = State::Va;
                Ok(())
            }
            Action::Pm => self.process_comma(),
            Action::Ps => self.process_delimiter(),
            Action::Pq => self.process_closing_quote(),
        }
    }

    /// Allocate a token at the current position. `is_container` advances
    /// the child depth for everything parsed until its matching close.
    fn begin(&mut self, kind: TokenKind, next_state: State, is_container: bool) -> Result<(), JsonError> {
        if !self.store.has_room() {
            return Err(JsonError::NoTokens { at: self.pos });
        }
        let token = Token::new(kind, self.source, self.pos, self.depth);
        let index = self.store.push(token);
        if index == 0 {
            self.store.get_mut(0).mark_first();
        }
        if is_container {
            self.depth += 1;
        }
        self.state = next_state;
        Ok(())
    }

    /// Seal the token at `index` to end exclusively at the current
    /// position, unless it's already sealed (e.g. a scalar that a
    /// preceding [`Driver::process_delimiter`] already closed).
    fn seal_if_open(&mut self, index: usize, end: usize) {
        if !self.store.get(index).is_sealed() {
            self.store.get_mut(index).seal(self.source, end);
        }
    }

    /// `PS`: whitespace or input end beside a value. Seals the most
    /// recently opened token if it hasn't been sealed yet — true of a bare
    /// number or literal, a no-op for anything `Fa`/`Fo`/`Pq` already
    /// closed.
    fn process_delimiter(&mut self) -> Result<(), JsonError> {
        let top = self.store.len() - 1;
        self.seal_if_open(top, self.pos);
        self.state = State::Ok;
        Ok(())
    }

    /// `PM`: a comma inside an array or object. Seals the element that
    /// just finished if needed, then asks the enclosing container what
    /// comes next: another key in an object, another value in an array.
    fn process_comma(&mut self) -> Result<(), JsonError> {
        let top = self.store.len() - 1;
        self.seal_if_open(top, self.pos);
        let parent = TokenCursor::new(self.store.as_slice(), top)
            .and_then(|cursor| cursor.parent())
            .ok_or(JsonError::BadFormat { at: self.pos })?;
        self.state = if parent.token().kind() == TokenKind::Object {
            State::Ke
        } else {
            State::Va
        };
        Ok(())
    }

    /// `PQ`: the closing quote of a string. The quote is part of the
    /// token, so the seal is inclusive. Whether the next state is `CO`
    /// (this string was an object key) or `OK` (it was a value) depends on
    /// whether it's at an even or odd position among its parent's
    /// children — keys and values alternate, so parity alone decides it,
    /// with no need to track "is this a key" anywhere else.
    fn process_closing_quote(&mut self) -> Result<(), JsonError> {
        let top = self.store.len() - 1;
        self.store.get_mut(top).seal(self.source, self.pos + 1);
        let cursor = TokenCursor::new(self.store.as_slice(), top).ok_or(JsonError::BadFormat { at: self.pos })?;
        self.state = match cursor.parent() {
            Some(parent) if parent.token().kind() == TokenKind::Object => {
                let mut position = 0usize;
                let mut sibling = cursor;
                while let Some(prev) = sibling.prev_sibling() {
                    position += 1;
                    sibling = prev;
                }
                if position % 2 == 0 { State::Co } else { State::Ok }
            }
            _ => State::Ok,
        };
        Ok(())
    }

    /// `FA`/`FO`: close an array or object. `top`, the last record ever
    /// written, is fixed at `store.len() - 1` no matter how many
    /// containers have since closed in place around it, so it only names
    /// the container actually closing now when that container's last
    /// child is a scalar at the current depth (sealed here if a trailing
    /// delimiter hasn't already done so) — then its parent is the
    /// container. Otherwise (the last child was itself a closed
    /// container, possibly several levels deep) `top` is stale and the
    /// container has to be found by walking back for the nearest record
    /// still open one level up, which also covers the empty-container
    /// case where `top` already sits at that depth.
    fn finish(&mut self, expected: TokenKind) -> Result<(), JsonError> {
        let depth = self.depth;
        let top = self.store.len() - 1;
        let container = if self.store.get(top).depth() == depth {
            self.seal_if_open(top, self.pos);
            TokenCursor::new(self.store.as_slice(), top)
                .and_then(|cursor| cursor.parent())
                .ok_or(JsonError::BadFormat { at: self.pos })?
                .index()
        } else {
            self.find_open_ancestor(top, depth - 1)
                .ok_or(JsonError::BadFormat { at: self.pos })?
        };
        if self.store.get(container).kind() != expected {
            return Err(JsonError::BadFormat { at: self.pos });
        }
        self.store.get_mut(container).seal(self.source, self.pos + 1);
        self.depth = depth - 1;
        self.state = State::Ok;
        Ok(())
    }

    /// Walk backward from `from` to the nearest record at `target` depth.
    fn find_open_ancestor(&self, from: usize, target: u32) -> Option<usize> {
        let mut i = from;
        loop {
            if self.store.get(i).depth() == target {
                return Some(i);
            }
            i = i.checked_sub(1)?;
        }
    }

    /// Input has ended. `depth` is checked before the state machine's own
    /// shape, per `spec.md` §4.D: a document that simply stopped short
    /// inside an open container is `INCOMPLETE` even if the in-flight token
    /// (an unterminated string, a partial literal) would otherwise be a
    /// `BAD_FORMAT` on its own. Only once `depth` is back to zero does a
    /// number or literal still mid-flight in a state that's allowed to stop
    /// here get sealed as if whitespace had followed it; anything else
    /// outside `OK` is a truncated token. Once the document's shape checks
    /// out, the last record written is marked `IS_LAST`.
    fn finalize(&mut self) -> Result<usize, JsonError> {
        if self.depth != 0 {
            return Err(JsonError::Incomplete { at: self.pos });
        }
        match self.state {
            State::Ok => {}
            State::Ze | State::In | State::Fs | State::E3 => {
                let top = self.store.len() - 1;
                self.seal_if_open(top, self.pos);
            }
            _ => return Err(JsonError::BadFormat { at: self.pos }),
        }
        let count = self.store.len();
        self.store.get_mut(count - 1).mark_last();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::TokenStore;
    use crate::token::{Token, TokenKind};
    use crate::{JsonError, parse_slice};

    fn run<'src>(json: &'src [u8], storage: &mut [Token<'src>]) -> Result<usize, JsonError> {
        let mut store = TokenStore::new(storage);
        parse_slice(json.into(), &mut store)
    }

    #[test]
    fn flat_object_yields_one_token_per_member_plus_the_object() {
        let mut storage = [Token::default(); 16];
        let count = run(br#"{"a":111,"b":[222,true],"c":{}}"#, &mut storage).unwrap();
        assert_eq!(count, 9);
        let tokens = &storage[..count];
        assert_eq!(tokens[0].kind(), TokenKind::Object);
        assert_eq!(tokens[0].depth(), 0);
        assert!(tokens[0].is_first());
        assert!(tokens[0].is_sealed());
        assert_eq!(tokens[8].kind(), TokenKind::Object);
        assert!(tokens[8].is_last());
        assert!(tokens[8].is_sealed());
    }

    #[test]
    fn nested_empty_arrays_close_in_order() {
        let mut storage = [Token::default(); 8];
        let count = run(b"[[]]", &mut storage).unwrap();
        assert_eq!(count, 2);
        let tokens = &storage[..count];
        assert_eq!(tokens[0].kind(), TokenKind::Array);
        assert_eq!(tokens[0].depth(), 0);
        assert_eq!(tokens[0].slice().as_bytes(), b"[[]]");
        assert_eq!(tokens[1].kind(), TokenKind::Array);
        assert_eq!(tokens[1].depth(), 1);
        assert_eq!(tokens[1].slice().as_bytes(), b"[]");
    }

    #[test]
    fn nested_nonempty_containers_close_correctly() {
        let mut storage = [Token::default(); 8];

        let count = run(br#"{"a":[1]}"#, &mut storage).unwrap();
        assert_eq!(count, 3);
        assert_eq!(storage[0].kind(), TokenKind::Object);
        assert_eq!(storage[0].slice().as_bytes(), br#"{"a":[1]}"#);
        assert_eq!(storage[2].kind(), TokenKind::Array);
        assert_eq!(storage[2].slice().as_bytes(), b"[1]");

        let count = run(b"[1,[2]]", &mut storage).unwrap();
        assert_eq!(count, 3);
        assert_eq!(storage[0].kind(), TokenKind::Array);
        assert_eq!(storage[0].slice().as_bytes(), b"[1,[2]]");
        assert_eq!(storage[2].kind(), TokenKind::Array);
        assert_eq!(storage[2].slice().as_bytes(), b"[2]");

        let count = run(br#"{"a":{"b":1}}"#, &mut storage).unwrap();
        assert_eq!(count, 4);
        assert_eq!(storage[0].kind(), TokenKind::Object);
        assert_eq!(storage[0].slice().as_bytes(), br#"{"a":{"b":1}}"#);
        assert_eq!(storage[2].kind(), TokenKind::Object);
        assert_eq!(storage[2].slice().as_bytes(), br#"{"b":1}"#);

        let count = run(b"[1,[2,[3]]]", &mut storage).unwrap();
        assert_eq!(count, 6);
        assert_eq!(storage[0].kind(), TokenKind::Array);
        assert_eq!(storage[0].slice().as_bytes(), b"[1,[2,[3]]]");
        assert_eq!(storage[2].kind(), TokenKind::Array);
        assert_eq!(storage[2].slice().as_bytes(), b"[2,[3]]");
        assert_eq!(storage[4].kind(), TokenKind::Array);
        assert_eq!(storage[4].slice().as_bytes(), b"[3]");
        assert!(storage[5].is_last());
    }

    #[test]
    fn object_keys_and_values_alternate_correctly() {
        let mut storage = [Token::default(); 8];
        let count = run(br#"{"k":"v"}"#, &mut storage).unwrap();
        assert_eq!(count, 3);
        let tokens = &storage[..count];
        assert_eq!(tokens[1].kind(), TokenKind::String);
        assert_eq!(tokens[1].slice().as_bytes(), br#""k""#);
        assert_eq!(tokens[2].kind(), TokenKind::String);
        assert_eq!(tokens[2].slice().as_bytes(), br#""v""#);
    }

    #[test]
    fn bare_number_is_sealed_at_end_of_input() {
        let mut storage = [Token::default(); 4];
        let count = run(b"-12.5e+3", &mut storage).unwrap();
        assert_eq!(count, 1);
        assert_eq!(storage[0].slice().as_bytes(), b"-12.5e+3");
        assert_eq!(storage[0].kind(), TokenKind::Number);
    }

    #[test]
    fn surrounding_whitespace_is_excluded_from_the_root_slice() {
        let mut storage = [Token::default(); 4];
        let count = run(b"  true  ", &mut storage).unwrap();
        assert_eq!(count, 1);
        assert_eq!(storage[0].slice().as_bytes(), b"true");
    }

    #[test]
    fn mismatched_close_is_bad_format() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"[1}", &mut storage), Err(JsonError::BadFormat { .. })));
    }

    #[test]
    fn unclosed_container_is_incomplete() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"[1,2", &mut storage), Err(JsonError::Incomplete { .. })));
    }

    #[test]
    fn truncated_literal_inside_an_open_container_is_incomplete_not_bad_format() {
        // Depth is checked before state: a document that stops mid-literal
        // while a container is still open is INCOMPLETE, not BAD_FORMAT,
        // even though `tru` alone (depth 0) is BAD_FORMAT.
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"[tru", &mut storage), Err(JsonError::Incomplete { .. })));
    }

    #[test]
    fn unterminated_string_inside_an_open_container_is_incomplete() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(
            run(br#"{"a":"b"#, &mut storage),
            Err(JsonError::Incomplete { .. })
        ));
    }

    #[test]
    fn truncated_literal_is_bad_format_even_at_depth_zero() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"tru", &mut storage), Err(JsonError::BadFormat { .. })));
    }

    #[test]
    fn empty_input_is_bad_format() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"", &mut storage), Err(JsonError::BadFormat { .. })));
    }

    #[test]
    fn exhausted_store_reports_no_tokens() {
        let mut storage = [Token::default(); 2];
        assert!(matches!(
            run(b"[1,2,3]", &mut storage),
            Err(JsonError::NoTokens { .. })
        ));
    }

    #[test]
    fn leading_zero_followed_by_digit_is_rejected() {
        let mut storage = [Token::default(); 4];
        assert!(matches!(run(b"01", &mut storage), Err(JsonError::BadFormat { .. })));
    }
}
