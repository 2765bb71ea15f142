//! Accessible state bundles.

/// The boolean state flags of an accessible node.
///
/// Only a few of these affect screen reader output for any given role; the
/// adapters nevertheless set the full bundle so the platform never has to
/// guess. All flags default to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibleState {
    /// The node belongs to the active window.
    pub active: bool,
    /// The node can take keyboard focus.
    pub focusable: bool,
    /// The node currently has keyboard focus.
    pub focused: bool,
    /// The node can be selected.
    pub selectable: bool,
    /// The node is selected.
    pub selected: bool,
    /// More than one child may be selected at a time.
    pub multi_selectable: bool,
    /// Selection can be extended over a range.
    pub ext_selectable: bool,
    /// The node is pressed.
    pub pressed: bool,
    /// The node is not visible on screen.
    pub invisible: bool,
    /// The node is disabled.
    pub disabled: bool,
    /// The node is busy (loading, processing).
    pub busy: bool,
    /// The node's value can be edited.
    pub editable: bool,
    /// The node's value cannot be changed.
    pub read_only: bool,
    /// The node can be expanded.
    pub expandable: bool,
    /// The node is expanded.
    pub expanded: bool,
    /// The node has a check state.
    pub checkable: bool,
    /// The node is checked.
    pub checked: bool,
    /// The node opens a popup.
    pub has_popup: bool,
    /// The node's content is invalid.
    pub invalid: bool,
    /// The node contains multiple lines of text.
    pub multi_line: bool,
    /// The node can be moved.
    pub movable: bool,
    /// The node is scrolled out of view.
    pub offscreen: bool,
    /// The node is modal.
    pub modal: bool,
}
