//! Accessibility roles.

use accesskit::Role;

/// The accessibility role of a node.
///
/// A simplified set of roles covering the pie view's tree, mapping into the
/// more comprehensive AccessKit `Role` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// A generic node with no specific role.
    #[default]
    Unknown,

    /// A list of items.
    List,

    /// An item within a list.
    ListItem,

    /// A static text label.
    StaticText,

    /// A table/grid.
    Table,

    /// A tree view.
    Tree,

    /// A cell within a table.
    Cell,
}

impl AccessibleRole {
    /// Convert to AccessKit's Role enum.
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AccessibleRole::Unknown => Role::Unknown,
            AccessibleRole::List => Role::List,
            AccessibleRole::ListItem => Role::ListItem,
            AccessibleRole::StaticText => Role::Label, // no direct StaticText, use Label
            AccessibleRole::Table => Role::Table,
            AccessibleRole::Tree => Role::Tree,
            AccessibleRole::Cell => Role::Cell,
        }
    }
}

impl From<AccessibleRole> for Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping() {
        assert_eq!(AccessibleRole::List.to_accesskit_role(), Role::List);
        assert_eq!(AccessibleRole::ListItem.to_accesskit_role(), Role::ListItem);
        assert_eq!(AccessibleRole::StaticText.to_accesskit_role(), Role::Label);
        assert_eq!(AccessibleRole::default(), AccessibleRole::Unknown);
    }
}
