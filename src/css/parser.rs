use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

use crate::css::{Block, Node, NodeKind, Stylesheet};

pub(super) fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let (nodes, after) = parse_list(&mut parser);
    Stylesheet { nodes, after }
}

/// Parses nodes until the end of the current input or block.
///
/// Returns the nodes and the whitespace that trails the last one.
fn parse_list(input: &mut Parser<'_, '_>) -> (Vec<Node>, String) {
    let mut nodes = Vec::new();
    loop {
        let trivia_start = input.position();
        let (start, first) = loop {
            let start = input.position();
            match input.next_including_whitespace_and_comments() {
                Ok(Token::WhiteSpace(_)) => continue,
                Ok(token) => break (start, token.clone()),
                Err(_) => return (nodes, input.slice_from(trivia_start).to_owned()),
            }
        };
        let before = input.slice(trivia_start..start).to_owned();
        nodes.push(parse_node(input, before, start, first));
    }
}

fn parse_node<'i>(
    input: &mut Parser<'i, '_>,
    before: String,
    start: SourcePosition,
    first: Token<'i>,
) -> Node {
    match first {
        Token::Comment(_) => leaf(input, before, start, NodeKind::Comment),
        Token::Semicolon => leaf(input, before, start, NodeKind::Declaration),
        Token::CurlyBracketBlock => {
            let head = input.slice_from(start).to_owned();
            let block = parse_block(input);
            Node {
                before,
                kind: NodeKind::Rule,
                head,
                block: Some(block),
            }
        }
        Token::AtKeyword(name) => parse_at_rule(input, before, start, name.to_string()),
        _ => parse_rule_or_declaration(input, before, start),
    }
}

fn leaf(input: &Parser<'_, '_>, before: String, start: SourcePosition, kind: NodeKind) -> Node {
    Node {
        before,
        kind,
        head: input.slice_from(start).to_owned(),
        block: None,
    }
}

fn parse_at_rule(
    input: &mut Parser<'_, '_>,
    before: String,
    start: SourcePosition,
    name: String,
) -> Node {
    let params_start = input.position();
    // The position before `next` is unreliable: a pending `(...)` block is
    // skipped first, so `@media (x){` would end the prelude after `(`.
    let (terminated, has_block) = loop {
        match input.next_including_whitespace_and_comments() {
            Ok(Token::Semicolon) => break (true, false),
            Ok(Token::CurlyBracketBlock) => break (true, true),
            Ok(_) => {}
            Err(_) => break (false, false),
        }
    };
    let consumed = input.slice_from(params_start);
    // `{` and `;` are one byte each.
    let prelude = if terminated {
        &consumed[..consumed.len() - 1]
    } else {
        consumed
    };
    let params = prelude.trim().to_owned();
    let head = input.slice_from(start).to_owned();
    let block = has_block.then(|| parse_block(input));
    Node {
        before,
        kind: NodeKind::AtRule { name, params },
        head,
        block,
    }
}

/// A qualified rule ends at its `{}` block, a declaration at `;` or at the
/// end of the enclosing block.
fn parse_rule_or_declaration(
    input: &mut Parser<'_, '_>,
    before: String,
    start: SourcePosition,
) -> Node {
    loop {
        match input.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => {
                let head = input.slice_from(start).to_owned();
                let block = parse_block(input);
                return Node {
                    before,
                    kind: NodeKind::Rule,
                    head,
                    block: Some(block),
                };
            }
            Ok(Token::Semicolon) | Err(_) => {
                return leaf(input, before, start, NodeKind::Declaration);
            }
            Ok(_) => continue,
        }
    }
}

/// Must be called right after a `{` token has been consumed.
fn parse_block(input: &mut Parser<'_, '_>) -> Block {
    let parsed = input.parse_nested_block(|nested| {
        let (nodes, after) = parse_list(nested);
        Ok::<_, ParseError<'_, ()>>((nodes, after, nested.position()))
    });
    match parsed {
        Ok((nodes, after, inner_end)) => Block {
            nodes,
            after,
            close: input.slice(inner_end..input.position()).to_owned(),
        },
        Err(_) => Block::default(),
    }
}
