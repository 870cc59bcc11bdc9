//! Outline forest arena.
//!
//! # Responsibility
//! - Own every node of one outline level and its root ordering.
//! - Provide append, detach/reattach, clear, and id-based lookup.
//!
//! # Invariants
//! - Every stored node is reachable from `roots` exactly once.
//! - Child order is insertion order; new nodes are always appended last.
//! - Notebook forest is flat; section nesting is only section-under-group;
//!   page nesting is only under page/subpage.
//! - Page-tree kinds follow position: root nodes are `Page`, nested ones
//!   are `Subpage`.

use crate::model::node::{ForestLevel, NodeId, NodeKind, NodeValidationError, OutlineNode};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for forest operations.
pub type ForestResult<T> = Result<T, ForestError>;

/// Attachment target inside one forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// The invisible forest root.
    Root,
    Node(NodeId),
}

impl From<Option<NodeId>> for ParentRef {
    fn from(value: Option<NodeId>) -> Self {
        match value {
            Some(id) => Self::Node(id),
            None => Self::Root,
        }
    }
}

/// Errors from forest operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestError {
    /// Node failed label or kind validation.
    Validation(NodeValidationError),
    /// Target node is not stored in this forest.
    NodeNotFound(NodeId),
    /// Parent node is not stored in this forest.
    ParentNotFound(NodeId),
    /// Node id is already present in this forest.
    DuplicateNode(NodeId),
    /// Parent cannot hold a child of this kind.
    NestingNotAllowed {
        level: ForestLevel,
        parent: NodeId,
        kind: NodeKind,
    },
    /// Root-level node cannot be detached through its parent.
    NodeIsRoot(NodeId),
}

impl Display for ForestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NodeNotFound(id) => write!(f, "outline node not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "outline parent not found: {id}"),
            Self::DuplicateNode(id) => write!(f, "outline node already present: {id}"),
            Self::NestingNotAllowed {
                level,
                parent,
                kind,
            } => write!(
                f,
                "{level} forest does not allow {kind:?} under parent {parent}"
            ),
            Self::NodeIsRoot(id) => write!(f, "outline node is already top-level: {id}"),
        }
    }
}

impl Error for ForestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NodeValidationError> for ForestError {
    fn from(value: NodeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Subtree taken out of a forest, awaiting `reattach`.
///
/// Owns its nodes; dropping it discards the whole subtree.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a detached subtree is lost unless reattached"]
pub struct DetachedSubtree {
    root: NodeId,
    nodes: HashMap<NodeId, OutlineNode>,
}

impl DetachedSubtree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes including the subtree root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }
}

/// Failed reattach; hands the subtree back so it is not lost.
#[derive(Debug)]
pub struct ReattachError {
    pub error: ForestError,
    pub subtree: DetachedSubtree,
}

impl Display for ReattachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "reattach of subtree {} failed: {}", self.subtree.root, self.error)
    }
}

impl Error for ReattachError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Ordered collection of independent trees for one outline level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineForest {
    level: ForestLevel,
    roots: Vec<NodeId>,
    nodes: HashMap<NodeId, OutlineNode>,
}

impl OutlineForest {
    /// Creates an empty forest for `level`.
    pub fn new(level: ForestLevel) -> Self {
        Self {
            level,
            roots: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn level(&self) -> ForestLevel {
        self.level
    }

    /// Allocates a detached node valid for this forest.
    ///
    /// # Errors
    /// - `Validation(BlankLabel)` when `label` trims to nothing.
    /// - `Validation(KindLevelMismatch)` when `kind` belongs to another level.
    pub fn create_node(&self, label: &str, kind: NodeKind) -> ForestResult<OutlineNode> {
        self.ensure_kind(kind)?;
        Ok(OutlineNode::new(label, kind)?)
    }

    /// Creates and appends one node in a single step.
    pub fn insert(
        &mut self,
        parent: ParentRef,
        label: &str,
        kind: NodeKind,
    ) -> ForestResult<NodeId> {
        let node = self.create_node(label, kind)?;
        self.append_child(parent, node)
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(
        &mut self,
        parent: ParentRef,
        mut node: OutlineNode,
    ) -> ForestResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(ForestError::DuplicateNode(node.id));
        }
        self.ensure_can_attach(parent, node.kind)?;

        let id = node.id;
        node.children.clear();
        self.place(parent, &mut node);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Detaches `id` and its whole subtree from its parent.
    ///
    /// # Errors
    /// - `NodeNotFound` when `id` is not stored here.
    /// - `NodeIsRoot` when `id` has no parent node.
    pub fn remove_from_parent(&mut self, id: NodeId) -> ForestResult<DetachedSubtree> {
        let parent_id = self
            .nodes
            .get(&id)
            .ok_or(ForestError::NodeNotFound(id))?
            .parent
            .ok_or(ForestError::NodeIsRoot(id))?;

        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.retain(|child| *child != id);
        }

        let mut nodes = HashMap::new();
        for member in self.subtree_ids(id) {
            if let Some(node) = self.nodes.remove(&member) {
                nodes.insert(member, node);
            }
        }
        if let Some(root) = nodes.get_mut(&id) {
            root.parent = None;
        }
        Ok(DetachedSubtree { root: id, nodes })
    }

    /// Appends a previously detached subtree as the last child of `parent`.
    ///
    /// Subtree ids and internal structure are preserved exactly.
    pub fn reattach(
        &mut self,
        mut subtree: DetachedSubtree,
        parent: ParentRef,
    ) -> Result<NodeId, ReattachError> {
        let check = self.check_reattach(&subtree, parent);
        let root_id = subtree.root;
        let mut root = match (check, subtree.nodes.remove(&root_id)) {
            (Ok(()), Some(root)) => root,
            (Err(error), root) => {
                if let Some(root) = root {
                    subtree.nodes.insert(root_id, root);
                }
                return Err(ReattachError { error, subtree });
            }
            (Ok(()), None) => {
                return Err(ReattachError {
                    error: ForestError::NodeNotFound(root_id),
                    subtree,
                })
            }
        };

        self.place(parent, &mut root);
        self.nodes.insert(root_id, root);
        self.nodes.extend(subtree.nodes);
        Ok(root_id)
    }

    /// Moves `id` with its subtree to the end of `new_parent`.
    ///
    /// Validation happens before detaching, so failures leave the forest
    /// untouched.
    pub fn move_subtree(&mut self, id: NodeId, new_parent: ParentRef) -> ForestResult<()> {
        let node = self.node(id)?;
        if node.is_root() {
            return Err(ForestError::NodeIsRoot(id));
        }
        if let ParentRef::Node(parent_id) = new_parent {
            if self.subtree_ids(id).contains(&parent_id) {
                return Err(ForestError::NestingNotAllowed {
                    level: self.level,
                    parent: parent_id,
                    kind: node.kind,
                });
            }
        }
        self.ensure_can_attach(new_parent, node.kind)?;

        let subtree = self.remove_from_parent(id)?;
        self.reattach(subtree, new_parent)
            .map(|_| ())
            .map_err(|err| err.error)
    }

    /// Removes every node; ids handed out before become unknown.
    pub fn clear(&mut self) {
        self.roots.clear();
        self.nodes.clear();
    }

    pub fn get(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(&id)
    }

    /// Like `get`, but reports a missing id as an error.
    pub fn node(&self, id: NodeId) -> ForestResult<&OutlineNode> {
        self.nodes.get(&id).ok_or(ForestError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `parent` in display order.
    pub fn children_of(&self, parent: ParentRef) -> ForestResult<&[NodeId]> {
        match parent {
            ParentRef::Root => Ok(&self.roots),
            ParentRef::Node(id) => self
                .nodes
                .get(&id)
                .map(|node| node.children.as_slice())
                .ok_or(ForestError::NodeNotFound(id)),
        }
    }

    /// Parent of `id`, `ParentRef::Root` for top-level nodes.
    pub fn parent_of(&self, id: NodeId) -> ForestResult<ParentRef> {
        Ok(self.node(id)?.parent.into())
    }

    /// Number of stored nodes across all trees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First root, used for auto-selection after a repopulate.
    pub fn first_root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Number of ancestors of `id` (0 for roots).
    pub fn depth(&self, id: NodeId) -> ForestResult<usize> {
        let mut depth = 0;
        let mut cursor = self.node(id)?.parent;
        while let Some(current) = cursor {
            depth += 1;
            cursor = self.node(current)?.parent;
        }
        Ok(depth)
    }

    /// Resolves a child-index path (`[1, 0]` = first child of second root).
    pub fn resolve_path(&self, path: &[usize]) -> Option<NodeId> {
        let (first, rest) = path.split_first()?;
        let mut current = *self.roots.get(*first)?;
        for index in rest {
            current = *self.nodes.get(&current)?.children.get(*index)?;
        }
        Some(current)
    }

    /// Inverse of `resolve_path`.
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut cursor = id;
        loop {
            let node = self.nodes.get(&cursor)?;
            let siblings = match node.parent {
                Some(parent) => &self.nodes.get(&parent)?.children,
                None => &self.roots,
            };
            path.push(siblings.iter().position(|sibling| *sibling == cursor)?);
            match node.parent {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    /// Depth-first pre-order listing of `(depth, node)`.
    pub fn walk(&self) -> Vec<(usize, &OutlineNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> =
            self.roots.iter().rev().map(|id| (0, *id)).collect();
        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|child| (depth + 1, *child)));
        }
        out
    }

    fn place(&mut self, parent: ParentRef, node: &mut OutlineNode) {
        match parent {
            ParentRef::Root => {
                node.parent = None;
                self.roots.push(node.id);
            }
            ParentRef::Node(parent_id) => {
                node.parent = Some(parent_id);
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.push(node.id);
                }
            }
        }
        if node.kind.is_page_like() {
            node.kind = match parent {
                ParentRef::Root => NodeKind::Page,
                ParentRef::Node(_) => NodeKind::Subpage,
            };
        }
    }

    fn subtree_ids(&self, id: NodeId) -> HashSet<NodeId> {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
        seen
    }

    fn check_reattach(&self, subtree: &DetachedSubtree, parent: ParentRef) -> ForestResult<()> {
        if let Some(id) = subtree.nodes.keys().find(|id| self.nodes.contains_key(id)) {
            return Err(ForestError::DuplicateNode(*id));
        }
        let kind = subtree
            .nodes
            .get(&subtree.root)
            .map(|node| node.kind)
            .ok_or(ForestError::NodeNotFound(subtree.root))?;
        self.ensure_can_attach(parent, kind)
    }

    fn ensure_kind(&self, kind: NodeKind) -> ForestResult<()> {
        if kind.level() != self.level {
            return Err(NodeValidationError::KindLevelMismatch {
                kind,
                level: self.level,
            }
            .into());
        }
        Ok(())
    }

    fn ensure_can_attach(&self, parent: ParentRef, kind: NodeKind) -> ForestResult<()> {
        self.ensure_kind(kind)?;
        let ParentRef::Node(parent_id) = parent else {
            return Ok(());
        };
        let parent_node = self
            .nodes
            .get(&parent_id)
            .ok_or(ForestError::ParentNotFound(parent_id))?;

        let allowed = match self.level {
            ForestLevel::Notebook => false,
            ForestLevel::Section => parent_node.is_group && kind == NodeKind::Section,
            ForestLevel::Page => parent_node.kind.is_page_like(),
        };
        if !allowed {
            return Err(ForestError::NestingNotAllowed {
                level: self.level,
                parent: parent_id,
                kind,
            });
        }
        Ok(())
    }
}
