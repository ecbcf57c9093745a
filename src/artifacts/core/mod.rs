//! Core utilities shared by the commands

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Adapts the minus pager to `std::io::Write`
///
/// `log` and `global-log` can print long histories; when stdout is a terminal
/// their output is pushed into a pager and shown once the command finishes.
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "===")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
