//! Data roles for item models.
//!
//! Roles define what aspect of a cell is being requested or set. Each cell
//! can have data for multiple roles: the displayed text, an edit value, an
//! accessible description, and so on.

/// Standard roles for accessing different aspects of item data.
///
/// When querying data from a model via [`ItemModel::data`](super::ItemModel::data),
/// the role specifies what information is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Primary value to display. Text for category cells, a number for
    /// slice-value cells.
    Display,

    /// Value for editing (may be richer than display text).
    Edit,

    /// Tooltip text shown on hover.
    ToolTip,

    /// Pre-computed accessible text, when a model chooses to store one.
    AccessibleText,

    /// Accessible description for screen readers.
    AccessibleDescription,

    /// First role available for application-specific data.
    User(u32),
}

impl ItemRole {
    /// Returns `true` if this is a user-defined role.
    #[inline]
    pub fn is_user_role(&self) -> bool {
        matches!(self, ItemRole::User(_))
    }

    /// Returns the numeric value of this role.
    ///
    /// Standard roles have fixed values 0-255; user roles start at 256.
    pub fn value(&self) -> u32 {
        match self {
            ItemRole::Display => 0,
            ItemRole::Edit => 1,
            ItemRole::ToolTip => 2,
            ItemRole::AccessibleText => 3,
            ItemRole::AccessibleDescription => 4,
            ItemRole::User(n) => 256 + n,
        }
    }

    /// Creates an `ItemRole` from a numeric value.
    ///
    /// Returns `None` for reserved but undefined role values (5-255).
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(ItemRole::Display),
            1 => Some(ItemRole::Edit),
            2 => Some(ItemRole::ToolTip),
            3 => Some(ItemRole::AccessibleText),
            4 => Some(ItemRole::AccessibleDescription),
            5..=255 => None,
            n => Some(ItemRole::User(n - 256)),
        }
    }
}

/// A single piece of item data, tagged by type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemData {
    /// No data for the requested role.
    #[default]
    None,
    /// Textual data.
    Text(String),
    /// Numeric data.
    Number(f64),
    /// Boolean data.
    Flag(bool),
}

impl ItemData {
    /// Returns `true` if there is no data.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Converts into a string, if the data is textual.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value, if the data is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ItemData::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value, if the data is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::Text(s)
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::Text(s.to_string())
    }
}

impl From<f64> for ItemData {
    fn from(n: f64) -> Self {
        ItemData::Number(n)
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Flag(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_values_round_trip() {
        for role in [
            ItemRole::Display,
            ItemRole::Edit,
            ItemRole::ToolTip,
            ItemRole::AccessibleText,
            ItemRole::AccessibleDescription,
            ItemRole::User(0),
            ItemRole::User(17),
        ] {
            assert_eq!(ItemRole::from_value(role.value()), Some(role));
        }
        assert_eq!(ItemRole::from_value(100), None);
    }

    #[test]
    fn test_item_data_accessors() {
        assert_eq!(ItemData::from("abc").into_string(), Some("abc".to_string()));
        assert_eq!(ItemData::from(2.5).as_f64(), Some(2.5));
        assert_eq!(ItemData::from(true).as_bool(), Some(true));
        assert!(ItemData::None.is_none());
        assert_eq!(ItemData::from(2.5).into_string(), None);
        assert_eq!(ItemData::from("abc").as_f64(), None);
    }
}
