/// Tests for CompositorConfig and GlobalNamePolicy

use super::*;

// ============================================================================
// Tests: GlobalNamePolicy
// ============================================================================

#[test]
fn test_default_policy_uses_global_prefix() {
    let policy = GlobalNamePolicy::default();
    assert_eq!(policy.prefix, "global_");
    assert!(!policy.ignore_ascii_case);
}

#[test]
fn test_prefix_must_match_at_start() {
    let policy = GlobalNamePolicy::default();
    assert!(policy.is_global_name("global_shadowMap"));
    assert!(policy.is_global_name("global_"));
    assert!(!policy.is_global_name("my_global_shadowMap"));
    assert!(!policy.is_global_name("global"));
    assert!(!policy.is_global_name(""));
}

#[test]
fn test_default_policy_is_case_sensitive() {
    let policy = GlobalNamePolicy::default();
    assert!(!policy.is_global_name("GLOBAL_rt"));
    assert!(!policy.is_global_name("Global_rt"));
}

#[test]
fn test_case_insensitive_policy() {
    let policy = GlobalNamePolicy {
        prefix: "global_".to_string(),
        ignore_ascii_case: true,
    };
    assert!(policy.is_global_name("GLOBAL_rt"));
    assert!(policy.is_global_name("global_rt"));
    assert!(!policy.is_global_name("rt"));
}

#[test]
fn test_custom_prefix() {
    let policy = GlobalNamePolicy::with_prefix("g:");
    assert!(policy.is_global_name("g:backbuffer"));
    assert!(!policy.is_global_name("global_backbuffer"));
}

#[test]
fn test_empty_prefix_never_matches() {
    let policy = GlobalNamePolicy::with_prefix("");
    assert!(!policy.is_global_name("anything"));
}

#[test]
fn test_multibyte_name_shorter_than_prefix_boundary() {
    let policy = GlobalNamePolicy::with_prefix("ab");
    // 'é' is two bytes: slicing at byte 2 would split it
    assert!(!policy.is_global_name("aé"));
}

// ============================================================================
// Tests: CompositorConfig
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = CompositorConfig::default();
    assert_eq!(config.global_name_policy, GlobalNamePolicy::default());
    assert_eq!(config.mip_levels, 0);
    assert_eq!(config.reserve_hint, 8);
}
