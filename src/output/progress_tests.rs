use super::*;

#[test]
fn test_progress_bar_hidden_in_quiet_mode() {
    let progress = ScanProgress::new(8, true);
    progress.tick("Style & Validation");
    progress.tick("Build System");
    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn test_progress_bar_visible_path() {
    let progress = ScanProgress::new_with_visibility(3, false, true);
    for pillar in ["Testing", "Security", "Task Discovery"] {
        progress.tick(pillar);
    }
    assert_eq!(progress.position(), 3);
    progress.finish();
}

#[test]
fn test_progress_bar_hidden_without_tty() {
    let progress = ScanProgress::new_with_visibility(3, false, false);
    progress.tick("Testing");
    assert_eq!(progress.position(), 1);
    progress.finish();
}

#[test]
fn test_progress_bar_clone_shares_state() {
    let progress = ScanProgress::new(4, true);
    let cloned = progress.clone();

    progress.tick("Testing");
    cloned.tick("Security");

    assert_eq!(progress.position(), 2);
    progress.finish();
}
