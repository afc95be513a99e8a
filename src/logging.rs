use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use spotifetch::clients::errors::Result;

// Writes every formatted log line to stdout and appends it to the log file
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

// Console logging by default, filter level `info` unless RUST_LOG overrides
// it. With `log_file` the same lines are additionally appended to the file.
// Line format: `<timestamp> [<LEVEL>]: <message>`.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}]: {}",
            buf.timestamp(),
            record.level(),
            record.args()
        )
    });

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(Tee { file })));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder.init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Tee;
    use std::io::Write;

    #[test]
    fn tee_appends_every_line_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let file = std::fs::File::options()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let line = b"2026-01-01T00:00:00Z [INFO]: Spotify authenticated successfully\n";
        let mut tee = Tee { file };
        let written = tee.write(line).unwrap();
        tee.flush().unwrap();

        assert_eq!(written, line.len());
        assert_eq!(std::fs::read(&path).unwrap(), line);
    }
}
