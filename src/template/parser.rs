//! Tokenizer and tree builder for the logic-less template dialect

use crate::error::{PromptError, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Parsed template node
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Variable(String),
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
    Partial(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Section,
    Inverted,
    Close,
    Partial,
    Comment,
}

impl TagKind {
    /// Tags that vanish together with their line when alone on it
    fn is_standalone_candidate(self) -> bool {
        matches!(self, Self::Section | Self::Inverted | Self::Close | Self::Comment)
    }
}

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Tag {
        kind: TagKind,
        name: String,
        offset: usize,
    },
}

pub(crate) fn parse(source: &str) -> Result<Vec<Node>> {
    let mut tokens = tokenize(source)?;
    strip_standalone_lines(&mut tokens);
    build_tree(tokens)
}

fn syntax_error(detail: impl std::fmt::Display) -> PromptError {
    PromptError::template(format!("Unable to format template: {detail}"))
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            tokens.push(Token::Text(rest[..start].to_string()));
        }
        let tag_offset = offset + start;
        let after_open = &rest[start + OPEN.len()..];

        // `{{{name}}}` is the unescaped form; output is never escaped so it
        // is equivalent to `{{name}}`.
        let (body, consumed) = if let Some(inner) = after_open.strip_prefix('{') {
            let end = inner
                .find("}}}")
                .ok_or_else(|| syntax_error(format!("unclosed tag at offset {tag_offset}")))?;
            (&inner[..end], OPEN.len() + 1 + end + 3)
        } else {
            let end = after_open
                .find(CLOSE)
                .ok_or_else(|| syntax_error(format!("unclosed tag at offset {tag_offset}")))?;
            (&after_open[..end], OPEN.len() + end + CLOSE.len())
        };

        tokens.push(classify(body, tag_offset)?);
        rest = &rest[start + consumed..];
        offset += start + consumed;
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }
    Ok(tokens)
}

fn classify(body: &str, offset: usize) -> Result<Token> {
    let body = body.trim();
    let (kind, name) = match body.chars().next() {
        Some('#') => (TagKind::Section, &body[1..]),
        Some('^') => (TagKind::Inverted, &body[1..]),
        Some('/') => (TagKind::Close, &body[1..]),
        Some('>') => (TagKind::Partial, &body[1..]),
        Some('!') => (TagKind::Comment, ""),
        Some('&') => (TagKind::Variable, &body[1..]),
        Some('=') => {
            return Err(syntax_error(format!(
                "delimiter changes are not supported (offset {offset})"
            )));
        }
        _ => (TagKind::Variable, body),
    };
    let name = name.trim();
    if kind != TagKind::Comment && name.is_empty() {
        return Err(syntax_error(format!("empty tag at offset {offset}")));
    }
    Ok(Token::Tag {
        kind,
        name: name.to_string(),
        offset,
    })
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Text before the tag ends at a line start (only spaces/tabs after the last newline)
fn ends_at_line_start(text: &str, at_template_start: bool) -> bool {
    match text.rfind('\n') {
        Some(pos) => text[pos + 1..].chars().all(is_inline_space),
        None => at_template_start && text.chars().all(is_inline_space),
    }
}

/// Text after the tag starts with the rest of the line (spaces/tabs then a newline)
fn starts_at_line_end(text: &str, at_template_end: bool) -> bool {
    let trimmed = text.trim_start_matches(is_inline_space);
    trimmed.starts_with('\n') || trimmed.starts_with("\r\n") || (at_template_end && trimmed.is_empty())
}

/// Section, inverted, closing and comment tags that sit alone on a line
/// remove that whole line from the output.
fn strip_standalone_lines(tokens: &mut [Token]) {
    let last = tokens.len().saturating_sub(1);
    let standalone: Vec<usize> = (0..tokens.len())
        .filter(|&i| {
            let Token::Tag { kind, .. } = &tokens[i] else {
                return false;
            };
            if !kind.is_standalone_candidate() {
                return false;
            }
            let before_ok = match i.checked_sub(1).map(|p| &tokens[p]) {
                None => true,
                Some(Token::Text(text)) => ends_at_line_start(text, i == 1),
                Some(Token::Tag { .. }) => false,
            };
            let after_ok = match tokens.get(i + 1) {
                None => true,
                Some(Token::Text(text)) => starts_at_line_end(text, i + 1 == last),
                Some(Token::Tag { .. }) => false,
            };
            before_ok && after_ok
        })
        .collect();

    for i in standalone {
        if let Some(Token::Text(text)) = i.checked_sub(1).and_then(|p| tokens.get_mut(p)) {
            let keep = text.trim_end_matches(is_inline_space).len();
            text.truncate(keep);
        }
        if let Some(Token::Text(text)) = tokens.get_mut(i + 1) {
            let trimmed = text.trim_start_matches(is_inline_space);
            let trimmed = trimmed
                .strip_prefix("\r\n")
                .or_else(|| trimmed.strip_prefix('\n'))
                .unwrap_or(trimmed);
            *text = trimmed.to_string();
        }
    }
}

fn build_tree(tokens: Vec<Token>) -> Result<Vec<Node>> {
    // Stack of open sections: (name, inverted, offset, parent's children so far)
    let mut stack: Vec<(String, bool, usize, Vec<Node>)> = Vec::new();
    let mut current: Vec<Node> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    current.push(Node::Text(text));
                }
            }
            Token::Tag { kind, name, offset } => match kind {
                TagKind::Variable => current.push(Node::Variable(name)),
                TagKind::Partial => current.push(Node::Partial(name)),
                TagKind::Comment => {}
                TagKind::Section | TagKind::Inverted => {
                    let parent = std::mem::take(&mut current);
                    stack.push((name, kind == TagKind::Inverted, offset, parent));
                }
                TagKind::Close => {
                    let Some((open_name, inverted, _, parent)) = stack.pop() else {
                        return Err(syntax_error(format!(
                            "unexpected closing tag '{name}' at offset {offset}"
                        )));
                    };
                    if open_name != name {
                        return Err(syntax_error(format!(
                            "closing tag '{name}' at offset {offset} does not match open section '{open_name}'"
                        )));
                    }
                    let children = std::mem::replace(&mut current, parent);
                    current.push(Node::Section {
                        name,
                        inverted,
                        children,
                    });
                }
            },
        }
    }

    if let Some((name, _, offset, _)) = stack.pop() {
        return Err(syntax_error(format!(
            "unclosed section '{name}' opened at offset {offset}"
        )));
    }
    Ok(current)
}
