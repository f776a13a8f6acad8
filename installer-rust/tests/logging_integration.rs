#[path = "../src/logging.rs"]
mod logging;

#[test]
fn logging_init_writes_to_log_file() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("installer.log");
    logging::init(1, Some(&log_path)).expect("logging init should succeed");

    log::info!("hello from the installer");
    log::logger().flush();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("hello from the installer"));
}
