use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Where log lines are mirrored so `commitgen logs` can show them later.
pub fn log_file_path() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?;
    Some(dir.join("commitgen").join("commitgen.log"))
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn init_logger(level: &str) {
    let mut builder = Builder::new();
    builder.filter_level(parse_level(level));

    builder.format(|buf, record| {
        let level_label = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(buf, "{} {}", level_label, record.args())
    });

    let file = log_file_path().and_then(|path| {
        fs::create_dir_all(path.parent()?).ok()?;
        OpenOptions::new().create(true).append(true).open(&path).ok()
    });
    builder.target(Target::Pipe(Box::new(Tee { file })));

    builder.init();
}

/// Writes formatted records to stderr and mirrors them, without color codes,
/// into the log file.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            // Log-file write failures must not take down the command.
            let _ = file.write_all(&strip_ansi(buf));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            let _ = file.flush();
        }
        Ok(())
    }
}

/// Drop ANSI escape sequences (ESC '[' ... final letter).
fn strip_ansi(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len());
    let mut in_escape = false;
    for b in buf.iter().copied() {
        if in_escape {
            if b.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if b == 0x1b {
            in_escape = true;
        } else {
            out.push(b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level(" error "), LevelFilter::Error);
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
        assert_eq!(parse_level(""), LevelFilter::Info);
    }

    #[test]
    fn ansi_codes_are_stripped_for_the_log_file() {
        let colored_line = b"\x1b[31;1mERROR\x1b[0m something failed\n";
        assert_eq!(strip_ansi(colored_line), b"ERROR something failed\n");
    }
}
