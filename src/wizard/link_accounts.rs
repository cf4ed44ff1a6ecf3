//! Link-Account manager: the repeated-entry editor used while the
//! link-accounts step is active.
//!
//! Entries keep insertion order and may repeat a platform. Each entry gets a
//! stable id on insertion so callers can remove by id instead of position.

use tracing::debug;
use uuid::Uuid;

use crate::errors::{Result, WizardError};
use crate::reference::{self, Platform, PlatformIcon};
use crate::schema::{fields::parse_url, LinkAccountEntry, StepInput};

/// Display row for one connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAccountRow {
    pub id: Uuid,
    pub platform: String,
    pub icon: PlatformIcon,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct LinkAccountManager {
    entries: Vec<LinkAccountEntry>,
    pending_platform: Option<&'static Platform>,
    pending_url: String,
}

impl LinkAccountManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the editor with previously accepted entries.
    pub fn from_entries(entries: Vec<LinkAccountEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[LinkAccountEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_platform(&self) -> Option<&'static Platform> {
        self.pending_platform
    }

    pub fn pending_url(&self) -> &str {
        &self.pending_url
    }

    /// Sets the platform for the next entry. Accepts an id or display name.
    pub fn select_platform(&mut self, platform: &str) -> Result<&'static Platform> {
        let resolved = reference::resolve_platform(platform)
            .ok_or_else(|| WizardError::UnknownPlatform(platform.trim().to_string()))?;
        self.pending_platform = Some(resolved);
        Ok(resolved)
    }

    pub fn set_pending_url(&mut self, url: impl Into<String>) {
        self.pending_url = url.into();
    }

    /// Appends `{pending platform, url}`. Fails without touching the list when
    /// no platform is selected or the URL is invalid; on success the pending
    /// platform and URL are cleared.
    pub fn add_entry(&mut self, url: &str) -> Result<Uuid> {
        let platform = self.pending_platform.ok_or(WizardError::NoPlatformSelected)?;
        let url = parse_url(url).ok_or_else(|| WizardError::InvalidUrl(url.trim().to_string()))?;
        let entry = LinkAccountEntry::new(platform.id, url);
        let id = entry.id;
        debug!(platform = platform.id, %id, "Linked account added");
        self.entries.push(entry);
        self.pending_platform = None;
        self.pending_url.clear();
        Ok(id)
    }

    /// [`add_entry`](Self::add_entry) using the pending URL.
    pub fn connect(&mut self) -> Result<Uuid> {
        let url = self.pending_url.clone();
        self.add_entry(&url)
    }

    /// Removes the entry at `index` in display order.
    pub fn remove_entry(&mut self, index: usize) -> Result<LinkAccountEntry> {
        if index >= self.entries.len() {
            return Err(WizardError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        debug!(id = %removed.id, "Linked account removed");
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<LinkAccountEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(WizardError::EntryNotFound(id))?;
        self.remove_entry(index)
    }

    pub fn rows(&self) -> Vec<LinkAccountRow> {
        self.entries
            .iter()
            .map(|entry| {
                let platform = reference::platform_for_display(&entry.platform);
                LinkAccountRow {
                    id: entry.id,
                    platform: platform.name.to_string(),
                    icon: platform.icon,
                    url: entry.url.clone(),
                }
            })
            .collect()
    }

    /// Step input carrying the current list.
    pub fn to_input(&self) -> StepInput {
        StepInput::LinkAccounts(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_facebook() -> LinkAccountManager {
        let mut manager = LinkAccountManager::new();
        manager.select_platform("Facebook").unwrap();
        manager
    }

    #[test]
    fn add_entry_appends_and_resets_pending_state() {
        let mut manager = with_facebook();
        manager.set_pending_url("https://fb.com/acme");
        let before = manager.len();
        let id = manager.add_entry("https://fb.com/acme").unwrap();
        assert_eq!(manager.len(), before + 1);
        assert_eq!(manager.entries()[0].id, id);
        assert_eq!(manager.entries()[0].platform, "facebook");
        assert!(manager.pending_platform().is_none());
        assert_eq!(manager.pending_url(), "");
    }

    #[test]
    fn add_entry_without_platform_never_grows() {
        let mut manager = LinkAccountManager::new();
        for _ in 0..5 {
            let err = manager.add_entry("https://fb.com/acme").unwrap_err();
            assert!(matches!(err, WizardError::NoPlatformSelected));
        }
        assert!(manager.is_empty());
    }

    #[test]
    fn invalid_url_keeps_pending_platform() {
        let mut manager = with_facebook();
        let err = manager.add_entry("fb dot com").unwrap_err();
        assert!(matches!(err, WizardError::InvalidUrl(_)));
        assert!(manager.is_empty());
        assert_eq!(manager.pending_platform().map(|p| p.id), Some("facebook"));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let mut manager = LinkAccountManager::new();
        let err = manager.select_platform("myspace").unwrap_err();
        assert!(matches!(
            err,
            WizardError::UnknownPlatform(name) if name == "myspace"
        ));
        assert!(manager.pending_platform().is_none());
    }

    #[test]
    fn duplicate_platforms_are_kept_in_order() {
        let mut manager = with_facebook();
        manager.add_entry("https://fb.com/one").unwrap();
        manager.select_platform("facebook").unwrap();
        manager.add_entry("https://fb.com/two").unwrap();
        let urls: Vec<_> = manager.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["https://fb.com/one", "https://fb.com/two"]);
    }

    #[test]
    fn remove_entry_guards_index() {
        let mut manager = with_facebook();
        manager.add_entry("https://fb.com/one").unwrap();
        manager.select_platform("yelp").unwrap();
        manager.add_entry("https://yelp.com/biz/acme").unwrap();

        let err = manager.remove_entry(5).unwrap_err();
        assert!(matches!(
            err,
            WizardError::IndexOutOfRange { index: 5, len: 2 }
        ));
        assert_eq!(manager.len(), 2);

        let removed = manager.remove_entry(0).unwrap();
        assert_eq!(removed.url, "https://fb.com/one");
        assert_eq!(manager.entries()[0].platform, "yelp");
    }

    #[test]
    fn remove_by_id_survives_reordering() {
        let mut manager = with_facebook();
        manager.add_entry("https://fb.com/one").unwrap();
        manager.select_platform("google").unwrap();
        let google = manager.add_entry("https://g.page/acme").unwrap();
        manager.remove_entry(0).unwrap();

        let removed = manager.remove_by_id(google).unwrap();
        assert_eq!(removed.platform, "google");
        assert!(matches!(
            manager.remove_by_id(google).unwrap_err(),
            WizardError::EntryNotFound(id) if id == google
        ));
    }

    #[test]
    fn rows_fall_back_to_generic_icon() {
        let manager = LinkAccountManager::from_entries(vec![
            LinkAccountEntry::new("facebook", "https://fb.com/acme"),
            LinkAccountEntry::new("myspace", "https://myspace.com/acme"),
        ]);
        let rows = manager.rows();
        assert_eq!(rows[0].icon, PlatformIcon::Facebook);
        assert_eq!(rows[1].icon, PlatformIcon::Generic);
        assert_eq!(rows[1].url, "https://myspace.com/acme");
    }

    #[test]
    fn connect_uses_pending_url() {
        let mut manager = with_facebook();
        manager.set_pending_url("https://fb.com/acme");
        manager.connect().unwrap();
        assert_eq!(manager.entries()[0].url, "https://fb.com/acme");
    }
}
