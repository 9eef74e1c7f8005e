#![allow(dead_code)]

use qql::{Token, TokenKind, lex};

pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input, "test.qql")
        .expect("lex failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Rebuild the source from token spans and the gaps between them, and
/// check that every gap is only whitespace or comments.
pub fn assert_lossless(source: &str, tokens: &[Token]) {
    let mut rebuilt = String::new();
    let mut cursor = 0;

    for token in tokens {
        let gap = &source[cursor..token.span.start];
        assert!(
            is_trivia(gap),
            "non-trivia gap {gap:?} before {token:?}\n--- source ---\n{source}"
        );
        rebuilt.push_str(gap);

        let text = &source[token.span.start..token.span.end];
        match token.kind {
            TokenKind::StringLiteral { .. } => {
                assert_eq!(text, format!("\"{}\"", token.lexeme));
            }
            _ => assert_eq!(text, token.lexeme),
        }
        rebuilt.push_str(text);
        cursor = token.span.end;
    }

    assert_eq!(cursor, source.len(), "tokens stop short of end of input");
    assert_eq!(rebuilt, source);
}

fn is_trivia(gap: &str) -> bool {
    let gap = gap.strip_prefix('\u{FEFF}').unwrap_or(gap);
    let mut in_comment = false;
    for c in gap.chars() {
        match c {
            '\n' => in_comment = false,
            '#' => in_comment = true,
            ' ' | '\t' | '\r' | '\x0C' => {}
            _ if in_comment => {}
            _ => return false,
        }
    }
    true
}
