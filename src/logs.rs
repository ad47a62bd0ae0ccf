use std::fs::{File, OpenOptions, metadata};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "autodesktop";
const LOG_WARN_BYTES: u64 = 5 * 1024 * 1024;

/// Debug lines are only written when this variable is set.
const DEBUG_ENV: &str = "AUTODESKTOP_DEBUG";

pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = get_log_file()?;

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}

pub fn log_info(msg: &str) {
    write_log("INFO", msg);
}

pub fn log_warn(msg: &str) {
    write_log("WARN", msg);
}

pub fn log_error(msg: &str) {
    write_log("ERROR", msg);
}

pub fn log_debug(msg: &str) {
    if std::env::var_os(DEBUG_ENV).is_some() {
        write_log("DEBUG", msg);
    }
}

fn format_entry(level: &str, msg: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] {}: {}\n", timestamp, level, msg)
}

fn write_log(level: &str, msg: &str) {
    let Some(log_file) = log_sink() else {
        return;
    };

    append(&log_file, &format_entry(level, msg));

    if let Ok(size) = metadata(&log_file).map(|m| m.len()) {
        if size > LOG_WARN_BYTES {
            let warning = format_entry(
                "WARN",
                &format!(
                    "Log file is {:.1} MiB. Consider running 'autodesktop --clear-logs'",
                    size as f64 / 1_048_576.0
                ),
            );
            append(&log_file, &warning);
        }
    }
}

/// File that log lines go to. Test builds never touch the user's log.
fn log_sink() -> Option<PathBuf> {
    if cfg!(test) {
        return None;
    }
    get_log_file().ok()
}

fn append(log_file: &Path, entry: &str) {
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .and_then(|mut file| file.write_all(entry.as_bytes()));
}

pub fn show_logs(lines: usize) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = get_log_file()?;

    if !log_file.exists() {
        println!("No log file found");
        return Ok(());
    }

    let size = metadata(&log_file)?.len();
    if size > LOG_WARN_BYTES {
        eprintln!(
            "Warning: Log file is {:.1} MiB. Consider clearing it.",
            size as f64 / 1_048_576.0
        );
    }

    let reader = BufReader::new(File::open(&log_file)?);
    let all_lines: Vec<String> = reader.lines().collect::<Result<Vec<_>, _>>()?;

    for line in tail(&all_lines, lines) {
        println!("{}", line);
    }

    Ok(())
}

pub fn clear_logs() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = get_log_file()?;

    if log_file.exists() {
        std::fs::write(&log_file, "")?;
        println!("Log file cleared");
    } else {
        println!("No log file to clear");
    }

    Ok(())
}

fn tail(lines: &[String], count: usize) -> &[String] {
    &lines[lines.len().saturating_sub(count)..]
}

fn get_log_file() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base = match std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or("could not determine home directory")?
            .join(".local")
            .join("share"),
    };

    Ok(base.join(APP_DIR).join(format!("{}.log", APP_DIR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_format() {
        let entry = format_entry("INFO", "Creating new desktop entry");
        assert!(entry.starts_with('['));
        assert!(entry.ends_with("] INFO: Creating new desktop entry\n"));
    }

    #[test]
    fn test_log_sink_is_off_under_test() {
        assert_eq!(log_sink(), None);
        log_info("not written anywhere");
    }

    #[test]
    fn test_tail_takes_last_lines() {
        let lines: Vec<String> = (1..=5).map(|n| n.to_string()).collect();
        assert_eq!(tail(&lines, 2), &["4".to_string(), "5".to_string()]);
        assert_eq!(tail(&lines, 50).len(), 5);
        assert!(tail(&lines, 0).is_empty());
    }
}
