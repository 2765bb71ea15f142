//! The accessible-node query contract.
//!
//! [`AccessibleNode`] is the tree-shaped query interface the host
//! accessibility platform drives: child enumeration, point hit-testing,
//! parent navigation, naming, roles, state bundles, and inter-item
//! relations. The pie view produces two implementations, one for the widget
//! as a whole and one per grid cell.

use std::any::Any;
use std::sync::Arc;

use crate::geometry::Rect;

use super::role::AccessibleRole;
use super::state::AccessibleState;

/// The kinds of text a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// The primary label screen readers announce.
    Name,
    /// Additional context beyond the name.
    Description,
    /// The node's value, for value-bearing nodes.
    Value,
    /// Usage instructions.
    Help,
    /// Keyboard accelerator.
    Accelerator,
}

/// A directed relation between two accessible nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// This node labels the target node.
    Labels,
    /// This node is labelled by the target node.
    LabelledBy,
}

/// Selects which relations a [`AccessibleNode::relations`] query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationFilter {
    /// Report targets this node labels.
    pub labels: bool,
    /// Report targets that label this node.
    pub labelled_by: bool,
}

impl RelationFilter {
    /// Matches every relation.
    pub const fn all() -> Self {
        Self {
            labels: true,
            labelled_by: true,
        }
    }

    /// Matches only "labels" relations.
    pub const fn labels() -> Self {
        Self {
            labels: true,
            labelled_by: false,
        }
    }

    /// Matches only "labelled by" relations.
    pub const fn labelled_by() -> Self {
        Self {
            labels: false,
            labelled_by: true,
        }
    }
}

/// The query contract one accessible tree node implements.
///
/// All answers are computed live from the model, the selection state, and
/// the widget geometry at call time; nothing but node identity is cached.
///
/// # Validity
///
/// Once [`is_valid`](AccessibleNode::is_valid) returns `false` (the widget
/// was destroyed, or the referenced cell's row was removed), callers are
/// expected to stop querying the node. Queries against an invalid node
/// degrade to empty results; they never attempt to heal the reference.
pub trait AccessibleNode: Send + Sync {
    /// Number of children of this node.
    fn child_count(&self) -> usize {
        0
    }

    /// The child at the given linear index.
    ///
    /// # Panics
    ///
    /// Implementations with children panic when `index` is outside
    /// `[0, child_count)`; the platform is trusted not to ask.
    fn child(&self, _index: usize) -> Option<Arc<dyn AccessibleNode>> {
        None
    }

    /// The deepest child at the given screen-space point, or `None` when
    /// the point hits no child.
    fn child_at(&self, _x: f32, _y: f32) -> Option<Arc<dyn AccessibleNode>> {
        None
    }

    /// The child that currently has focus, or `None` if none has.
    fn focus_child(&self) -> Option<Arc<dyn AccessibleNode>> {
        None
    }

    /// The linear index of the given child within this node.
    ///
    /// # Panics
    ///
    /// Panics when the argument is not a valid child of this node. Leaf
    /// nodes panic unconditionally.
    fn index_of_child(&self, _child: &dyn AccessibleNode) -> usize {
        panic!("accessible node has no children");
    }

    /// The parent node, or `None` for the root of this subtree.
    fn parent(&self) -> Option<Arc<dyn AccessibleNode>> {
        None
    }

    /// The node's bounding rectangle in screen coordinates.
    fn rect(&self) -> Rect;

    /// The node's role.
    fn role(&self) -> AccessibleRole;

    /// The node's current state bundle.
    fn state(&self) -> AccessibleState;

    /// The node's text of the given kind; empty when the kind does not
    /// apply.
    fn text(&self, kind: TextKind) -> String;

    /// Stores text of the given kind on the node.
    ///
    /// # Panics
    ///
    /// Panics for kinds the node does not accept; writing an unsupported
    /// kind is a contract violation, not a recoverable error.
    fn set_text(&self, kind: TextKind, text: &str);

    /// The relations of this node matching the filter, with their targets.
    fn relations(&self, _filter: RelationFilter) -> Vec<(Arc<dyn AccessibleNode>, Relation)> {
        Vec::new()
    }

    /// Whether this node may still be queried.
    fn is_valid(&self) -> bool;

    /// Identity access for downcasting.
    fn as_any(&self) -> &dyn Any;
}
