//! Integration tests for the compositor logging system
//!
//! These tests verify that compositor operations report through the global
//! logger. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_compositor::galaxy3d::log::{self as glog, Logger, LogEntry, LogSeverity};
use galaxy_3d_compositor::galaxy3d::compositor::{CompositorManager, TextureSource};
use galaxy_3d_compositor::galaxy3d::render::{
    DeviceCapabilities, HeadlessGraphicsDevice, PixelFormat, ReferenceTarget,
};
use galaxy_3d_compositor::galaxy3d::{CompositorConfig, IdString};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_test_logger(min_severity: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    let (test_logger, entries) = TestLogger::new();
    glog::set_logger(test_logger);
    glog::set_min_severity(min_severity);
    entries
}

fn restore_default_logger() {
    glog::reset_logger();
    glog::set_min_severity(LogSeverity::Info);
}

fn create_manager(device: HeadlessGraphicsDevice) -> CompositorManager {
    CompositorManager::new(Arc::new(Mutex::new(device)), CompositorConfig::default())
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_registration_error_is_logged_with_location() {
    let entries = install_test_logger(LogSeverity::Trace);

    let manager = create_manager(HeadlessGraphicsDevice::new());
    let mut def = manager.new_shadow_node_definition("ShadowNode");
    let result = def.add_texture_source_name("shadowMap", 0, TextureSource::Global);
    assert!(result.is_err());

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .expect("an error entry");
        assert_eq!(error.source, "galaxy3d::TextureDefinitionRegistry");
        assert!(error.message.contains("shadowMap"));
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    restore_default_logger();
}

#[test]
#[serial]
fn test_integration_explicit_resolve_downgrade_warns() {
    let entries = install_test_logger(LogSeverity::Warn);

    let device = HeadlessGraphicsDevice::with_capabilities(DeviceCapabilities {
        supports_explicit_resolve: false,
        ..DeviceCapabilities::default()
    });
    let mut manager = create_manager(device);

    let mut def = manager.new_shadow_node_definition("ShadowNode_Resolve");
    let handle = def.add_texture_definition("shadowMap0").unwrap();
    let tex = def.texture_definition_mut(handle).unwrap();
    tex.width = 256;
    tex.height = 256;
    tex.format_list = vec![PixelFormat::R16_FLOAT];
    tex.fsaa_explicit_resolve = true;
    manager.add_shadow_node_definition(def).unwrap();

    let reference = ReferenceTarget::new(1280, 720).with_fsaa_samples(4);
    manager
        .create_shadow_node(IdString::new("ShadowNode_Resolve"), &reference)
        .unwrap();

    {
        let captured = entries.lock().unwrap();
        assert!(captured.iter().all(|e| e.severity >= LogSeverity::Warn));
        let warning = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Warn)
            .expect("a warning entry");
        assert_eq!(warning.source, "galaxy3d::ShadowNode");
        assert!(warning.message.contains("shadowMap0"));
        assert!(warning.file.is_none());
    }

    restore_default_logger();
}

#[test]
#[serial]
fn test_integration_node_lifecycle_is_logged_at_info() {
    let entries = install_test_logger(LogSeverity::Info);

    let mut manager = create_manager(HeadlessGraphicsDevice::new());
    let mut def = manager.new_shadow_node_definition("ShadowNode_Info");
    let handle = def.add_texture_definition("shadowMap0").unwrap();
    let tex = def.texture_definition_mut(handle).unwrap();
    tex.width = 64;
    tex.height = 64;
    tex.format_list = vec![PixelFormat::D32_FLOAT];
    manager.add_shadow_node_definition(def).unwrap();

    let key = manager
        .create_shadow_node(IdString::new("ShadowNode_Info"), &ReferenceTarget::new(64, 64))
        .unwrap();
    assert!(manager.destroy_shadow_node(key));

    {
        let captured = entries.lock().unwrap();
        let infos: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.source == "galaxy3d::CompositorManager")
            .collect();
        assert_eq!(infos.len(), 2);
        assert!(infos[0].message.contains("created"));
        assert!(infos[1].message.contains("destroyed"));
        // Debug and trace entries are filtered out at Info
        assert!(captured.iter().all(|e| e.severity >= LogSeverity::Info));
    }

    restore_default_logger();
}

#[test]
#[serial]
fn test_integration_min_severity_round_trip() {
    glog::set_min_severity(LogSeverity::Error);
    assert_eq!(glog::min_severity(), LogSeverity::Error);

    restore_default_logger();
    assert_eq!(glog::min_severity(), LogSeverity::Info);
}
