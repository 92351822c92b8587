#![no_main]

use std::sync::LazyLock;

use ftlex::grammar;
use ftlex::{Grammar, LexerConfig};
use libfuzzer_sys::fuzz_target;

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| grammar::freemarker().expect("template grammar builds"));

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Lex line by line from every state; the tokens must always cover the input exactly
        for (id, _) in GRAMMAR.states() {
            let mut state = id;
            for line in s.lines() {
                let lexed = GRAMMAR
                    .tokenize_line_with(line, state, LexerConfig::new().with_token_limit(None))
                    .expect("recovery never fails");
                let joined: String = lexed.tokens.iter().map(|t| t.text).collect();
                assert_eq!(joined, line);
                state = lexed.end_state;
            }
            // Strict lexing may fail, but never panics
            let _ = GRAMMAR.tokenize_line_with(s, id, LexerConfig::strict());
        }
    }
});
