use leptos::prelude::*;

use crate::shared::media::{use_media_query, PHONE_QUERY, TABLET_QUERY};
use crate::system::auth::storage::{KeyValueStorage, StorageTier, WebStorage};

pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar:collapsed";

/// How the sidebar is drawn for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarPresentation {
    /// Full-width overlay on phones; `collapsed == true` means closed.
    Drawer { open: bool },
    /// Fixed column: icons only when collapsed.
    Column { collapsed: bool },
}

impl SidebarPresentation {
    pub fn resolve(is_phone: bool, collapsed: bool) -> Self {
        if is_phone {
            SidebarPresentation::Drawer { open: !collapsed }
        } else {
            SidebarPresentation::Column { collapsed }
        }
    }

    pub fn is_drawer_open(self) -> bool {
        matches!(self, SidebarPresentation::Drawer { open: true })
    }

    pub fn is_collapsed(self) -> bool {
        match self {
            SidebarPresentation::Drawer { open } => !open,
            SidebarPresentation::Column { collapsed } => collapsed,
        }
    }
}

/// Parse the persisted flag. Anything unreadable means expanded.
pub fn parse_collapsed(raw: Option<&str>) -> bool {
    raw.and_then(|v| serde_json::from_str::<bool>(v).ok())
        .unwrap_or(false)
}

/// Collapsed state after a viewport change. A user choice wins.
pub fn collapsed_for_viewport(current: bool, pinned_by_user: bool, is_tablet: bool) -> bool {
    if pinned_by_user {
        current
    } else {
        is_tablet
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub collapsed: RwSignal<bool>,
    /// Set once the user toggles by hand; stops viewport auto-collapse.
    pub pinned_by_user: RwSignal<bool>,
    pub is_tablet: ReadSignal<bool>,
    pub is_phone: ReadSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let storage = WebStorage::new(StorageTier::Durable);
        let stored = storage.get(SIDEBAR_COLLAPSED_KEY);
        let is_tablet = use_media_query(TABLET_QUERY);
        let is_phone = use_media_query(PHONE_QUERY);

        let initial = match stored.as_deref() {
            Some(raw) => parse_collapsed(Some(raw)),
            None => is_tablet.get_untracked(),
        };

        let ctx = Self {
            collapsed: RwSignal::new(initial),
            pinned_by_user: RwSignal::new(stored.is_some()),
            is_tablet,
            is_phone,
        };

        Effect::new(move |_| {
            let tablet = ctx.is_tablet.get();
            let pinned = ctx.pinned_by_user.get_untracked();
            ctx.collapsed
                .update(|c| *c = collapsed_for_viewport(*c, pinned, tablet));
        });

        ctx
    }

    pub fn presentation(&self) -> SidebarPresentation {
        SidebarPresentation::resolve(self.is_phone.get(), self.collapsed.get())
    }

    /// Manual toggle; the choice is persisted and pins the state.
    /// On phones this only opens or closes the drawer.
    pub fn toggle_sidebar(&self) {
        if self.is_phone.get_untracked() {
            self.collapsed.update(|val| *val = !*val);
            return;
        }
        self.pinned_by_user.set(true);
        self.collapsed.update(|val| *val = !*val);
        WebStorage::new(StorageTier::Durable).set(
            SIDEBAR_COLLAPSED_KEY,
            &self.collapsed.get_untracked().to_string(),
        );
    }

    /// Close the phone drawer (backdrop tap, Escape, navigation).
    pub fn close_drawer(&self) {
        if self.is_phone.get_untracked() && !self.collapsed.get_untracked() {
            self.collapsed.set(true);
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_is_drawer_on_phone() {
        assert_eq!(
            SidebarPresentation::resolve(true, false),
            SidebarPresentation::Drawer { open: true }
        );
        assert!(!SidebarPresentation::resolve(true, true).is_drawer_open());
    }

    #[test]
    fn test_drawer_and_column_never_both() {
        for phone in [true, false] {
            for collapsed in [true, false] {
                let p = SidebarPresentation::resolve(phone, collapsed);
                let is_column = matches!(p, SidebarPresentation::Column { .. });
                assert!(!(p.is_drawer_open() && is_column));
                assert_eq!(p.is_collapsed(), collapsed);
            }
        }
    }

    #[test]
    fn test_parse_collapsed() {
        assert!(parse_collapsed(Some("true")));
        assert!(!parse_collapsed(Some("false")));
        assert!(!parse_collapsed(Some("yes")));
        assert!(!parse_collapsed(None));
    }

    #[test]
    fn test_viewport_only_applies_until_user_pins() {
        assert!(collapsed_for_viewport(false, false, true));
        assert!(!collapsed_for_viewport(true, false, false));
        assert!(!collapsed_for_viewport(false, true, true));
        assert!(collapsed_for_viewport(true, true, false));
    }
}
