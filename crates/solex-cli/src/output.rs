use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    write_line(&mut io::stdout().lock(), &s)?;
    Ok(())
}

/// One compact JSON document per line, for streamed output.
pub fn print_json_line<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string(value)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")?;
    out.flush()?;
    Ok(())
}

pub fn print_line(msg: &str) -> anyhow::Result<()> {
    write_line(&mut io::stdout().lock(), msg)?;
    Ok(())
}

fn write_line<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{msg}")?;
    out.flush()
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_line_appends_newline() {
        let mut buf = Vec::new();
        write_line(&mut buf, "5sig").unwrap();
        assert_eq!(buf, b"5sig\n");
    }

    #[test]
    fn write_failures_are_returned() {
        let err = write_line(&mut Closed, "5sig").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
