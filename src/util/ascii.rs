//! ASCII-safe rendering of path text for terminal output.
//!
//! Non-ASCII characters are replaced with backslash escapes: `\xNN` for code
//! points up to U+00FF, `\uNNNN` up to U+FFFF and `\UNNNNNNNN` beyond that.
//! On Unix, path bytes that are not valid UTF-8 are rendered as `\xNN`.

use std::ffi::OsStr;
use std::fmt::Write;
use std::path::Path;

pub fn escape_path(path: &Path) -> String {
    escape_os_str(path.as_os_str())
}

pub fn escape_os_str(value: &OsStr) -> String {
    let mut out = String::new();

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        for chunk in value.as_bytes().utf8_chunks() {
            push_escaped(&mut out, chunk.valid());
            for byte in chunk.invalid() {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    #[cfg(not(unix))]
    {
        push_escaped(&mut out, &value.to_string_lossy());
    }

    out
}

// Writing to a String cannot fail, so the fmt::Results here are discarded.
fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        let code = u32::from(ch);
        let _ = match code {
            0..=0x7f => out.write_char(ch),
            0x80..=0xff => write!(out, "\\x{code:02x}"),
            0x100..=0xffff => write!(out, "\\u{code:04x}"),
            _ => write!(out, "\\U{code:08x}"),
        };
    }
}
