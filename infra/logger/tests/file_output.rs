use lectern_logger::{FileFormat, LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_output_is_written() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("lectern-file")
        .console(false)
        .level(LevelFilter::INFO)
        .path(&dir)
        .format(FileFormat::Json)
        .init()?;
    assert!(logger.has_file_output());

    tracing::info!(tier = "gold", "session restored");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("a log file should exist");

    let contents = fs::read_to_string(log_file)?;
    let first = contents.lines().next().expect("at least one line").trim();
    assert!(first.starts_with('{') && first.ends_with('}'), "json lines expected: {first}");
    assert!(contents.contains("session restored"));

    Ok(())
}
