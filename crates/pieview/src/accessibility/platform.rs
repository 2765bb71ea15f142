//! Per-platform announcement policy.
//!
//! Screen readers disagree about which node roles announce cleanly, and
//! about whether selection state is spoken at all. Rather than scattering
//! `cfg` branches through the adapters, the differences are collected into
//! one policy value resolved at configuration time and injected into every
//! adapter.

use super::role::AccessibleRole;

/// The platform family the adapters are serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform this build targets.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// Resolved role/announcement decisions for one platform.
///
/// `item_role` is the role reported for grid cells: VoiceOver on macOS
/// reads static text cleanly but adds unwanted output for list items,
/// while Narrator, NVDA, JAWS and Orca all prefer list items. No single
/// role works best everywhere.
///
/// `announces_selection` records whether the platform's screen readers
/// speak selection state on their own. Where they do not, the item name
/// carries a "not selected" marker so users still hear it. Screen readers
/// improve over time, so this is an overridable capability flag rather
/// than a hardcoded platform property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformPolicy {
    /// Role reported for grid cells.
    pub item_role: AccessibleRole,
    /// Whether the target announces selection state natively.
    pub announces_selection: bool,
}

impl PlatformPolicy {
    /// The policy for the platform this build targets.
    pub fn current() -> Self {
        Self::for_platform(Platform::current())
    }

    /// The policy table entry for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => Self {
                item_role: AccessibleRole::StaticText,
                announces_selection: false,
            },
            Platform::Windows => Self {
                item_role: AccessibleRole::ListItem,
                announces_selection: true,
            },
            Platform::Linux => Self {
                item_role: AccessibleRole::ListItem,
                announces_selection: false,
            },
        }
    }

    /// Overrides the selection-announcement capability.
    pub fn with_selection_announcement(mut self, announces_selection: bool) -> Self {
        self.announces_selection = announces_selection;
        self
    }
}

impl Default for PlatformPolicy {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        let windows = PlatformPolicy::for_platform(Platform::Windows);
        assert_eq!(windows.item_role, AccessibleRole::ListItem);
        assert!(windows.announces_selection);

        let macos = PlatformPolicy::for_platform(Platform::MacOs);
        assert_eq!(macos.item_role, AccessibleRole::StaticText);
        assert!(!macos.announces_selection);

        let linux = PlatformPolicy::for_platform(Platform::Linux);
        assert_eq!(linux.item_role, AccessibleRole::ListItem);
        assert!(!linux.announces_selection);
    }

    #[test]
    fn test_selection_announcement_override() {
        let policy = PlatformPolicy::for_platform(Platform::Linux)
            .with_selection_announcement(true);
        assert!(policy.announces_selection);
    }
}
