// tests/guard_properties.rs

use std::path::PathBuf;

use proptest::prelude::*;
use tmpguard::guard::{GuardRejection, PathGuard, SandboxRoot};

const ROOT: &str = "/tmp/x";

fn guard() -> PathGuard {
    PathGuard::new(SandboxRoot::new(ROOT).unwrap())
}

/// One path component without separators, dots-only names or glob characters.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _-][A-Za-z0-9 ._-]{0,11}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..5).prop_map(|segs| segs.iter().collect())
}

proptest! {
    #[test]
    fn paths_under_root_are_accepted(rel in relative_path()) {
        let path = PathBuf::from(ROOT).join(rel);
        prop_assert_eq!(guard().validate(&path), Ok(()));
        prop_assert_eq!(guard().validate_paired(&path), Ok(()));
    }

    #[test]
    fn paths_outside_root_are_rejected(
        top in "[a-w][a-z]{0,7}",
        rel in relative_path(),
    ) {
        // Any first component other than "tmp" leaves the root.
        prop_assume!(top != "tmp");
        let path = PathBuf::from("/").join(top).join(rel);
        let is_outside = matches!(
            guard().validate(&path),
            Err(GuardRejection::OutsideSandbox { .. })
        );
        prop_assert!(is_outside);
    }

    #[test]
    fn wildcards_are_rejected_everywhere(
        prefix in prop_oneof![Just(ROOT.to_string()), Just("/etc".to_string()), Just("rel".to_string())],
        rel in relative_path(),
        insert_at in 0usize..12,
    ) {
        let mut text = PathBuf::from(prefix).join(rel).to_string_lossy().into_owned();
        let at = insert_at.min(text.len());
        text.insert(at, '*');

        let is_wildcard = matches!(
            guard().validate(&PathBuf::from(text)),
            Err(GuardRejection::Wildcard { wildcard: '*', .. })
        );
        prop_assert!(is_wildcard);
    }

    #[test]
    fn validation_is_deterministic(rel in relative_path(), outside in any::<bool>()) {
        let base = if outside { "/opt" } else { ROOT };
        let path = PathBuf::from(base).join(rel);
        prop_assert_eq!(guard().validate(&path), guard().validate(&path));
    }
}
