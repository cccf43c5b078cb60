//! Grammar productions.
//!
//! Each function parses one construct, pushing tokens and completed nodes
//! through the [`Parser`]'s frame stack. Recovery token sets are per
//! parsing context: on a syntax error the parser skips ahead to the
//! nearest token that lets the surrounding production resume, wrapping the
//! skipped tokens into an `Error` node.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::diagnostics::DiagnosticCode;
use crate::syntax::{tag_name_nodes_match, Node, SyntaxKind};

use super::parser::Parser;

const RECOVER_FILE: &[SyntaxKind] = &[SyntaxKind::CData, SyntaxKind::Script, SyntaxKind::OpenTagStart];

const RECOVER_OPEN_TAG: &[SyntaxKind] = &[
    SyntaxKind::OpenTagStart,
    SyntaxKind::TagEnd,
    SyntaxKind::SelfClose,
    SyntaxKind::CloseTagStart,
    SyntaxKind::CData,
    SyntaxKind::Script,
];

const RECOVER_TAG_NAME: &[SyntaxKind] = &[
    SyntaxKind::Ident,
    SyntaxKind::OpenTagStart,
    SyntaxKind::TagEnd,
    SyntaxKind::SelfClose,
    SyntaxKind::CloseTagStart,
    SyntaxKind::CData,
    SyntaxKind::Script,
];

const RECOVER_ATTR: &[SyntaxKind] = RECOVER_TAG_NAME;

const RECOVER_ATTR_NAME: &[SyntaxKind] = &[
    SyntaxKind::Equal,
    SyntaxKind::Ident,
    SyntaxKind::OpenTagStart,
    SyntaxKind::TagEnd,
    SyntaxKind::SelfClose,
    SyntaxKind::CloseTagStart,
    SyntaxKind::CData,
    SyntaxKind::Script,
];

const RECOVER_CONTENT_LIST: &[SyntaxKind] = &[
    SyntaxKind::Text,
    SyntaxKind::StringLiteral,
    SyntaxKind::CData,
    SyntaxKind::Script,
    SyntaxKind::OpenTagStart,
    SyntaxKind::CloseTagStart,
];

const RECOVER_CLOSE_TAG: &[SyntaxKind] = &[
    SyntaxKind::TagEnd,
    SyntaxKind::OpenTagStart,
    SyntaxKind::CloseTagStart,
    SyntaxKind::CData,
    SyntaxKind::Script,
];

/// An attribute key, `(namespace, name)`, for duplicate detection.
type AttrKey = (Option<SmolStr>, SmolStr);

/// Parses the whole file into the bottom frame. The caller folds that
/// frame into the file-level content list.
pub(crate) fn file(p: &mut Parser<'_>) {
    loop {
        match p.peek_in_content() {
            SyntaxKind::Eof => {
                p.bump_any();
                return;
            }
            SyntaxKind::CData | SyntaxKind::Script | SyntaxKind::Text => {
                p.bump_any();
            }
            SyntaxKind::OpenTagStart => opening_tag(p),
            SyntaxKind::CloseTagStart => {
                // A stray `</` always skips at least the `</` itself.
                if let Some(range) = p.err_node_until(RECOVER_FILE) {
                    let message = DiagnosticCode::UnexpectedCloseTag
                        .default_message()
                        .unwrap_or("");
                    p.error_at(DiagnosticCode::UnexpectedCloseTag, message, range);
                }
            }
            _ => {
                let message = DiagnosticCode::ExpectedTagOpen.default_message().unwrap_or("");
                if let Some(range) = p.err_node_until(RECOVER_FILE) {
                    p.error_at(DiagnosticCode::ExpectedTagOpen, message, range);
                } else {
                    p.error(DiagnosticCode::ExpectedTagOpen, message);
                }
            }
        }
    }
}

/// Element content between `>` and `</`. Completes a `ContentList` node
/// only when there is any content at all.
fn content_list(p: &mut Parser<'_>) {
    let m = p.start();
    loop {
        match p.peek_in_content() {
            SyntaxKind::Text
            | SyntaxKind::StringLiteral
            | SyntaxKind::CData
            | SyntaxKind::Script => {
                p.bump_any();
            }
            SyntaxKind::OpenTagStart => opening_tag(p),
            SyntaxKind::CloseTagStart | SyntaxKind::Eof => break,
            _ => {
                let message = DiagnosticCode::ExpectedTagOpen.default_message().unwrap_or("");
                if let Some(range) = p.err_node_until(RECOVER_CONTENT_LIST) {
                    p.error_at(DiagnosticCode::ExpectedTagOpen, message, range);
                } else {
                    p.error(DiagnosticCode::ExpectedTagOpen, message);
                }
            }
        }
    }
    if p.frame_is_empty() {
        m.abandon(p);
    } else {
        m.complete(p, SyntaxKind::ContentList);
    }
}

fn opening_tag(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(SyntaxKind::OpenTagStart);
    let mut err_in_name = true;
    let mut open_tag_name = None;
    if p.at(SyntaxKind::Ident) {
        let (name, had_err) = opening_tag_name(p);
        err_in_name = had_err;
        open_tag_name = Some(name);
    } else {
        let message = DiagnosticCode::ExpectedTagName.default_message().unwrap_or("");
        if let Some(range) = p.err_node_until(RECOVER_OPEN_TAG) {
            p.error_at(DiagnosticCode::ExpectedTagName, message, range);
        } else {
            p.error(DiagnosticCode::ExpectedTagName, message);
        }
    }
    if !err_in_name {
        attr_list(p);
    }
    match p.current() {
        SyntaxKind::SelfClose => {
            p.bump_any();
            m.complete(p, SyntaxKind::Element);
        }
        SyntaxKind::TagEnd => {
            p.bump_any();
            content_list(p);
            closing_tag(p, open_tag_name.as_ref(), err_in_name);
            m.complete(p, SyntaxKind::Element);
        }
        _ => {
            m.complete(p, SyntaxKind::Element);
            let message = DiagnosticCode::ExpectedEndOrClose.default_message().unwrap_or("");
            p.error(DiagnosticCode::ExpectedEndOrClose, message);
        }
    }
}

/// `name` or `ns:name` after `<`. Returns the completed name node and
/// whether it was malformed (which suppresses attribute parsing and
/// open/close matching).
fn opening_tag_name(p: &mut Parser<'_>) -> (Node, bool) {
    let m = p.start();
    let ident_range = p.bump(SyntaxKind::Ident);
    if p.eat(SyntaxKind::Colon) && !p.eat(SyntaxKind::Ident) {
        let name = m.complete_cloned(p, SyntaxKind::TagName);
        let namespace = p.text_at(ident_range);
        let message = format!("A tag name expected after namespace '{namespace}'.");
        p.error_at(
            DiagnosticCode::ExpectedTagNameAfterNamespace,
            message,
            name.content_range(),
        );
        p.err_node_until(RECOVER_TAG_NAME);
        (name, true)
    } else {
        (m.complete_cloned(p, SyntaxKind::TagName), false)
    }
}

fn attr_list(p: &mut Parser<'_>) {
    let m = p.start();
    let mut seen: FxHashSet<AttrKey> = FxHashSet::default();
    loop {
        match p.current() {
            SyntaxKind::Eof
            | SyntaxKind::OpenTagStart
            | SyntaxKind::TagEnd
            | SyntaxKind::SelfClose
            | SyntaxKind::CloseTagStart
            | SyntaxKind::CData
            | SyntaxKind::Script => break,
            _ => attr(p, &mut seen),
        }
    }
    if p.frame_is_empty() {
        m.abandon(p);
    } else {
        m.complete(p, SyntaxKind::AttributeList);
    }
}

fn attr(p: &mut Parser<'_>, seen: &mut FxHashSet<AttrKey>) {
    let m = p.start();
    if p.at(SyntaxKind::Ident) {
        attr_name(p, seen);
    } else {
        if let Some(range) = p.err_node_until(RECOVER_ATTR) {
            if p.at(SyntaxKind::Equal) {
                let message = DiagnosticCode::ExpectedAttrNameBeforeEq
                    .default_message()
                    .unwrap_or("");
                p.error_at(DiagnosticCode::ExpectedAttrNameBeforeEq, message, range);
            } else {
                let message = DiagnosticCode::ExpectedAttrName.default_message().unwrap_or("");
                p.error_at(DiagnosticCode::ExpectedAttrName, message, range);
            }
            m.complete(p, SyntaxKind::Attribute);
        } else {
            m.abandon(p);
            let message = DiagnosticCode::ExpectedAttrName.default_message().unwrap_or("");
            p.error(DiagnosticCode::ExpectedAttrName, message);
        }
        return;
    }
    if p.eat(SyntaxKind::Equal) && !p.eat(SyntaxKind::StringLiteral) {
        let message = DiagnosticCode::ExpectedAttrValue.default_message().unwrap_or("");
        if let Some(range) = p.err_node_until(RECOVER_ATTR) {
            p.error_at(DiagnosticCode::ExpectedAttrValue, message, range);
        } else {
            p.error(DiagnosticCode::ExpectedAttrValue, message);
        }
    }
    m.complete(p, SyntaxKind::Attribute);
}

/// `name` or `ns:name` in attribute position, with duplicate and
/// uppercase-initial validation.
fn attr_name(p: &mut Parser<'_>, seen: &mut FxHashSet<AttrKey>) {
    let m = p.start();
    let mut name_ident = p.bump(SyntaxKind::Ident);
    let mut ns_ident = None;
    if p.eat(SyntaxKind::Colon) {
        if p.at(SyntaxKind::Ident) {
            ns_ident = Some(name_ident);
            name_ident = p.bump(SyntaxKind::Ident);
        } else {
            let namespace = p.text_at(name_ident);
            let message = format!("An attribute name expected after namespace '{namespace}'.");
            if let Some(range) = p.err_node_until(RECOVER_ATTR_NAME) {
                p.error_at(DiagnosticCode::ExpectedAttrNameAfterNamespace, message, range);
            } else {
                p.error(DiagnosticCode::ExpectedAttrNameAfterNamespace, message);
            }
        }
    }
    check_attr_name(p, seen, ns_ident, name_ident);
    m.complete(p, SyntaxKind::AttributeKey);
}

fn check_attr_name(
    p: &mut Parser<'_>,
    seen: &mut FxHashSet<AttrKey>,
    ns_ident: Option<TextRange>,
    name_ident: TextRange,
) {
    let name = SmolStr::new(p.text_at(name_ident));
    let namespace = ns_ident.map(|range| SmolStr::new(p.text_at(range)));
    let key = (namespace, name.clone());
    let is_duplicate = seen.contains(&key);
    let starts_uppercase = name.chars().next().is_some_and(|ch| ch.is_ascii_uppercase());
    if is_duplicate {
        let message = format!("Duplicated attribute: '{name}'.");
        p.error_at(DiagnosticCode::DuplicateAttr, message, name_ident);
    }
    if key.0.is_none() && starts_uppercase {
        let message = format!("Attribute name '{name}' cannot start with an uppercase letter.");
        p.error_at(DiagnosticCode::UppercaseAttr, message, name_ident);
    }
    if !is_duplicate && !starts_uppercase {
        seen.insert(key);
    }
}

/// `</name>` after an element's content. `skip_name_matching` suppresses
/// the mismatch check when the opening name was already malformed.
fn closing_tag(p: &mut Parser<'_>, open_tag_name: Option<&Node>, skip_name_matching: bool) {
    if p.eat(SyntaxKind::CloseTagStart) {
        if p.at(SyntaxKind::Ident) {
            let close_tag_name = closing_tag_name(p);
            if !skip_name_matching {
                if let Some(open_name) = open_tag_name {
                    if !tag_name_nodes_match(open_name, &close_tag_name, p.source()) {
                        let message = format!(
                            "Opening and closing tag names should match. Opening tag has a name '{}', but the closing tag name is '{}'.",
                            p.text_of(open_name),
                            p.text_of(&close_tag_name),
                        );
                        p.error_at(
                            DiagnosticCode::TagNameMismatch,
                            message,
                            close_tag_name.content_range(),
                        );
                    }
                }
            }
        } else {
            let message = DiagnosticCode::ExpectedTagNameAfterCloseStart
                .default_message()
                .unwrap_or("");
            if let Some(range) = p.err_node_until(RECOVER_CLOSE_TAG) {
                p.error_at(DiagnosticCode::ExpectedTagNameAfterCloseStart, message, range);
            } else {
                p.error(DiagnosticCode::ExpectedTagNameAfterCloseStart, message);
            }
        }
        if !p.eat(SyntaxKind::TagEnd) {
            let message = DiagnosticCode::ExpectedEnd.default_message().unwrap_or("");
            p.error(DiagnosticCode::ExpectedEnd, message);
        }
    } else if let Some(open_name) = open_tag_name {
        let message = format!(
            "Opened tag has no closing pair. Expected to see '</{}>'.",
            p.text_of(open_name)
        );
        p.error_at(
            DiagnosticCode::ExpectedCloseStartWithName,
            message,
            open_name.content_range(),
        );
    } else {
        let message = DiagnosticCode::ExpectedCloseStart.default_message().unwrap_or("");
        p.error(DiagnosticCode::ExpectedCloseStart, message);
    }
}

fn closing_tag_name(p: &mut Parser<'_>) -> Node {
    let m = p.start();
    let ident_range = p.bump(SyntaxKind::Ident);
    if p.eat(SyntaxKind::Colon) && !p.eat(SyntaxKind::Ident) {
        let name = m.complete_cloned(p, SyntaxKind::TagName);
        let namespace = p.text_at(ident_range);
        let message = format!("A tag name expected after namespace '{namespace}'.");
        p.error_at(
            DiagnosticCode::ExpectedTagNameAfterNamespace,
            message,
            name.content_range(),
        );
        p.err_node_until(RECOVER_OPEN_TAG);
        name
    } else {
        m.complete_cloned(p, SyntaxKind::TagName)
    }
}
