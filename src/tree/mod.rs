//! Arena-backed parse tree consumed by the walk helpers.
//!
//! The tree is produced elsewhere (by a parser or by tests); this module
//! only defines the node representation and generic traversal. Nodes are
//! stored flat and addressed by id, with parent links for upward walks.

mod walk;

use widestring::Utf32Str;

use crate::lexer::span::Span;

pub use walk::{
    argument_nodes, bool_statement_kind, decode_redirection, job_is_background,
    plain_statement_command, statement_decoration, statement_is_in_pipeline, BoolStatementKind,
    DecodedRedirection, StatementDecoration,
};

/// Opaque parse-node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a node id from a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Grammar symbols the walk helpers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `JobList := Job JobList | <End> JobList | empty`
    JobList,
    /// `Job := Statement JobContinuation OptionalBackground`
    Job,
    /// `JobContinuation := <Pipe> NewlineList Statement JobContinuation | empty`
    JobContinuation,
    /// Statement wrapper around the concrete statement forms.
    Statement,
    /// A command with arguments and redirections.
    PlainStatement,
    /// A plain statement with a decoration keyword.
    DecoratedStatement,
    /// `and`, `or`, or `not` applied to a statement.
    BooleanStatement,
    /// `Redirection := <TokenRedirection> <TokenString>`
    Redirection,
    /// Trailing optional `&` of a job.
    OptionalBackground,
    /// Homogeneous list of arguments.
    ArgumentList,
    /// Mixed list of arguments and redirections.
    ArgumentsOrRedirectionsList,
    /// One command argument.
    Argument,
    /// Run of newlines between productions.
    NewlineList,
    /// Primitive string token node.
    TokenString,
    /// Primitive redirection token node.
    TokenRedirection,
    /// Primitive pipe token node.
    TokenPipe,
    /// A comment attached to a node.
    Comment,
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    kind: NodeKind,
    /// Production tag; meaning depends on the node kind.
    tag: u8,
    source: Option<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    has_comments: bool,
}

impl ParseNode {
    /// Returns the grammar symbol of this node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the production tag of this node.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the child id at `index`.
    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    /// Returns the parent id, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` when this node covers a source range.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Returns the source slice this node covers.
    pub fn source<'s>(&self, src: &'s Utf32Str) -> Option<&'s Utf32Str> {
        let span = self.source?;
        src.get(span.start.as_usize()..span.end.as_usize())
    }

    /// Returns `true` when comment nodes may be attached to this node.
    pub fn has_comments(&self) -> bool {
        self.has_comments
    }
}

/// Flat parse-node arena with parent links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl ParseTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Returns the node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node behind `id`.
    ///
    /// Ids are only minted by [`ParseTree::add_node`], so lookups cannot
    /// fail for ids of this tree.
    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id.index()]
    }

    /// Appends a node and links it under `parent`.
    pub fn add_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(ParseNode {
            kind,
            tag: 0,
            source: None,
            parent,
            children: Vec::new(),
            has_comments: false,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Sets the production tag of a node.
    pub fn set_tag(&mut self, id: NodeId, tag: u8) {
        self.nodes[id.index()].tag = tag;
    }

    /// Sets the source range of a node.
    pub fn set_source(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].source = Some(span);
    }

    /// Marks a node as carrying attached comments.
    pub fn mark_has_comments(&mut self, id: NodeId) {
        self.nodes[id.index()].has_comments = true;
    }

    /// Returns the child of `id` at `index`.
    pub fn child_of(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.node(id).child(index)
    }

    /// Returns the parent of `id`, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    /// Returns the parent of `id` when the parent has the given kind.
    pub fn parent_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        (self.node(parent).kind == kind).then_some(parent)
    }

    /// Finds the next entry in a homogeneous list production.
    ///
    /// Given a list node whose production is `List := Entry List | empty`,
    /// returns the entry at the head and the list tail. Interior empty
    /// productions, such as blank lines in a job list, are walked over.
    pub fn next_in_list(
        &self,
        list: NodeId,
        entry_kind: NodeKind,
    ) -> (Option<NodeId>, Option<NodeId>) {
        let list_kind = self.node(list).kind;
        // A list production cannot contain itself as its entry.
        debug_assert_ne!(list_kind, entry_kind);

        let mut cursor = Some(list);
        let mut entry = None;
        while entry.is_none() {
            let Some(current) = cursor else {
                break;
            };
            let mut next_cursor = None;
            for &child in &self.node(current).children {
                let child_kind = self.node(child).kind;
                if child_kind == entry_kind {
                    entry = Some(child);
                } else if child_kind == list_kind {
                    next_cursor = Some(child);
                }
            }
            cursor = next_cursor;
        }
        (entry, cursor)
    }

    /// Collects the comment nodes whose parent is `parent`.
    ///
    /// The scan walks the whole arena, so it is gated on the parent
    /// advertising attached comments.
    pub fn comment_nodes_for(&self, parent: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if !self.node(parent).has_comments {
            return result;
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if node.kind == NodeKind::Comment && node.parent == Some(parent) {
                result.push(NodeId::new(index));
            }
        }
        result
    }
}
