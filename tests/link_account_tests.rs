use setup_wizard::{
    errors::WizardError,
    reference::PlatformIcon,
    wizard::LinkAccountManager,
};

#[test]
fn connecting_facebook_appends_exactly_one_entry() {
    let mut manager = LinkAccountManager::new();
    manager.select_platform("Facebook").unwrap();
    let before = manager.len();

    manager.add_entry("https://fb.com/acme").unwrap();

    assert_eq!(manager.len(), before + 1);
    assert!(manager.pending_platform().is_none());
    let rows = manager.rows();
    assert_eq!(rows[0].platform, "Facebook");
    assert_eq!(rows[0].icon, PlatformIcon::Facebook);
}

#[test]
fn add_without_platform_never_changes_length() {
    let mut manager = LinkAccountManager::new();
    manager.select_platform("google").unwrap();
    manager.add_entry("https://g.page/acme").unwrap();

    for _ in 0..10 {
        assert!(matches!(
            manager.add_entry("https://g.page/other"),
            Err(WizardError::NoPlatformSelected)
        ));
        assert_eq!(manager.len(), 1);
    }
}

#[test]
fn removing_past_the_end_is_an_error() {
    let mut manager = LinkAccountManager::new();
    manager.select_platform("facebook").unwrap();
    manager.add_entry("https://fb.com/acme").unwrap();
    manager.select_platform("tripadvisor").unwrap();
    manager.add_entry("https://tripadvisor.com/acme").unwrap();

    let err = manager.remove_entry(5).unwrap_err();
    assert!(matches!(
        err,
        WizardError::IndexOutOfRange { index: 5, len: 2 }
    ));
    assert_eq!(
        err.to_string(),
        "Index 5 out of range for 2 linked accounts"
    );
    assert_eq!(manager.len(), 2);
}
