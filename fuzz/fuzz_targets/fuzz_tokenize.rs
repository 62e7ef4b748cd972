#![no_main]

use jscan::{JsonError, Token, TokenStore, parse_slice};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut storage = [Token::default(); 256];
    let mut store = TokenStore::new(&mut storage);
    match parse_slice(data.into(), &mut store) {
        Ok(count) => {
            let tokens = &store.as_slice()[..count];
            assert!(!tokens.is_empty());
            assert!(tokens[0].is_first());
            assert!(tokens[count - 1].is_last());
            for token in tokens {
                assert!(token.is_sealed());
                assert!(!token.slice().is_empty());
            }
        }
        Err(JsonError::BadFormat { .. } | JsonError::NoTokens { .. } | JsonError::Incomplete { .. }) => {}
    }
});
