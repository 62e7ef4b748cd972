//! Cross-validates token shape against `serde_json` as an oracle: every
//! token's slice must itself be a complete, valid JSON value whose
//! `serde_json::Value` variant agrees with the token's `TokenKind`.

use jscan::{Token, TokenKind, TokenStore, parse_slice};
use serde_json::Value;

fn check(json: &str) {
    let mut storage = [Token::default(); 64];
    let mut store = TokenStore::new(&mut storage);
    let count = parse_slice(json.as_bytes().into(), &mut store).expect("fixture is valid JSON");
    for token in &store.as_slice()[..count] {
        let text = core::str::from_utf8(token.slice().as_bytes()).expect("fixture is ASCII");
        let value: Value = serde_json::from_str(text).unwrap_or_else(|e| panic!("{text} failed to reparse: {e}"));
        let agrees = matches!(
            (&value, token.kind()),
            (Value::Object(_), TokenKind::Object)
                | (Value::Array(_), TokenKind::Array)
                | (Value::String(_), TokenKind::String)
                | (Value::Number(_), TokenKind::Number)
                | (Value::Bool(true), TokenKind::True)
                | (Value::Bool(false), TokenKind::False)
                | (Value::Null, TokenKind::Null)
        );
        assert!(
            agrees,
            "token kind {:?} disagrees with serde_json shape {value:?} for {text:?}",
            token.kind()
        );
    }
}

#[test]
fn fixtures_agree_with_serde_json_shape() {
    for fixture in [
        r#"{"a":111,"b":[222,true],"c":{}}"#,
        "[]",
        "\"hi\\n\"",
        "-0.5e+2",
        "null",
        "false",
        "[1,2,3]",
        r#"{"nested":{"deep":[1,[2,[3]]]}}"#,
        r#"{"unicode":"café"}"#,
    ] {
        check(fixture);
    }
}
