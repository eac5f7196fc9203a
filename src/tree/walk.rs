//! Typed walk helpers over the parse tree.

use widestring::{Utf32Str, Utf32String};

use crate::lexer::redirect::redirection_type;
use crate::lexer::token::RedirectKind;
use crate::tree::{NodeId, NodeKind, ParseTree};

/// Decoration keyword applied to a plain statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementDecoration {
    /// No decoration.
    #[default]
    None,
    /// `command`: skip functions and builtins.
    Command,
    /// `builtin`: only consider builtins.
    Builtin,
    /// `exec`: replace the shell process.
    Exec,
}

impl StatementDecoration {
    fn from_tag(tag: u8) -> Self {
        match tag {
            1 => StatementDecoration::Command,
            2 => StatementDecoration::Builtin,
            3 => StatementDecoration::Exec,
            _ => StatementDecoration::None,
        }
    }
}

/// Boolean statement keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolStatementKind {
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
}

impl BoolStatementKind {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BoolStatementKind::And),
            1 => Some(BoolStatementKind::Or),
            2 => Some(BoolStatementKind::Not),
            _ => None,
        }
    }
}

/// Tag carried by an `OptionalBackground` node when the job ends in `&`.
const TAG_BACKGROUND: u8 = 1;

/// A redirection node decoded through the lexical oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRedirection {
    /// Redirection kind and fd, or `None` when the primitive is missing its
    /// source or does not decode as a redirection.
    pub redirect: Option<(RedirectKind, i32)>,
    /// The redirection target text, such as `&1` or a file path.
    pub target: Utf32String,
}

/// Returns the decoration of a plain statement.
///
/// The decoration lives on the decorated-statement parent; a bare plain
/// statement has none.
pub fn statement_decoration(tree: &ParseTree, plain_statement: NodeId) -> StatementDecoration {
    debug_assert_eq!(tree.node(plain_statement).kind(), NodeKind::PlainStatement);
    match tree.parent_of_kind(plain_statement, NodeKind::DecoratedStatement) {
        Some(decorated) => StatementDecoration::from_tag(tree.node(decorated).tag()),
        None => StatementDecoration::None,
    }
}

/// Returns the tag of a boolean statement interpreted as its keyword.
pub fn bool_statement_kind(tree: &ParseTree, statement: NodeId) -> Option<BoolStatementKind> {
    debug_assert_eq!(tree.node(statement).kind(), NodeKind::BooleanStatement);
    BoolStatementKind::from_tag(tree.node(statement).tag())
}

/// Decodes a redirection node: the primitive prefix through the lexical
/// redirection oracle, and the target text.
pub fn decode_redirection(
    tree: &ParseTree,
    redirection: NodeId,
    src: &Utf32Str,
) -> DecodedRedirection {
    debug_assert_eq!(tree.node(redirection).kind(), NodeKind::Redirection);

    let redirect = tree
        .child_of(redirection, 0)
        .filter(|&prim| tree.node(prim).kind() == NodeKind::TokenRedirection)
        .and_then(|prim| tree.node(prim).source(src))
        .and_then(redirection_type);

    let target = tree
        .child_of(redirection, 1)
        .filter(|&target| tree.node(target).kind() == NodeKind::TokenString)
        .and_then(|target| tree.node(target).source(src))
        .map(|text| text.to_owned())
        .unwrap_or_else(Utf32String::new);

    DecodedRedirection { redirect, target }
}

/// Returns `true` when the job's trailing optional-background child marks it
/// as a background job.
pub fn job_is_background(tree: &ParseTree, job: NodeId) -> bool {
    debug_assert_eq!(tree.node(job).kind(), NodeKind::Job);
    match tree.child_of(job, 2) {
        Some(background) => {
            tree.node(background).kind() == NodeKind::OptionalBackground
                && tree.node(background).tag() == TAG_BACKGROUND
        }
        None => false,
    }
}

/// Returns `true` when a statement participates in a pipeline.
///
/// A statement under a job continuation is always in a pipeline. With
/// `include_first`, the head statement of a job also counts when the job's
/// continuation produces another statement.
pub fn statement_is_in_pipeline(tree: &ParseTree, statement: NodeId, include_first: bool) -> bool {
    debug_assert_eq!(tree.node(statement).kind(), NodeKind::Statement);

    if tree
        .parent_of_kind(statement, NodeKind::JobContinuation)
        .is_some()
    {
        return true;
    }

    if include_first {
        let continuation = tree
            .parent_of_kind(statement, NodeKind::Job)
            .and_then(|job| tree.child_of(job, 1))
            .filter(|&child| tree.node(child).kind() == NodeKind::JobContinuation);
        if let Some(continuation) = continuation {
            // The continuation production is pipe, newlines, statement, tail.
            if let Some(next) = tree.child_of(continuation, 2) {
                if tree.node(next).kind() == NodeKind::Statement {
                    return true;
                }
            }
        }
    }
    false
}

/// Returns the command text of a plain statement, when its command token has
/// source attached.
pub fn plain_statement_command(
    tree: &ParseTree,
    plain_statement: NodeId,
    src: &Utf32Str,
) -> Option<Utf32String> {
    debug_assert_eq!(tree.node(plain_statement).kind(), NodeKind::PlainStatement);
    tree.child_of(plain_statement, 0)
        .filter(|&command| tree.node(command).kind() == NodeKind::TokenString)
        .and_then(|command| tree.node(command).source(src))
        .map(|text| text.to_owned())
}

/// Collects up to `max` argument nodes below `list` in source order.
pub fn argument_nodes(tree: &ParseTree, list: NodeId, max: usize) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![list];
    while let Some(id) = stack.pop() {
        if result.len() >= max {
            break;
        }
        if id != list && tree.node(id).kind() == NodeKind::Argument {
            result.push(id);
        }
        for index in (0..tree.node(id).child_count()).rev() {
            if let Some(child) = tree.child_of(id, index) {
                stack.push(child);
            }
        }
    }
    result
}
