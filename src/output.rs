//! Rendering of command results for humans or machines

use std::io::Write;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(self) -> bool {
        self == Self::Human
    }
}

/// Write a success envelope: `{"ok": true, "command": ..., "data": ...}`
pub fn emit_success(
    out: &mut dyn Write,
    command: &str,
    data: serde_json::Value,
) -> crate::Result<()> {
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(())
}

/// Quote `text` for display.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote. Backslashes, the chosen quote and non-printing characters
/// are escaped as `\xNN`, `\uNNNN` or `\UNNNNNNNN`.
pub fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

    let mut rendered = String::with_capacity(text.len() + 2);
    rendered.push(quote);
    for c in text.chars() {
        match c {
            '\\' => rendered.push_str("\\\\"),
            '\n' => rendered.push_str("\\n"),
            '\r' => rendered.push_str("\\r"),
            '\t' => rendered.push_str("\\t"),
            c if c == quote => {
                rendered.push('\\');
                rendered.push(c);
            }
            c if !is_printable(c) => {
                let code = c as u32;
                let escape = match code {
                    0..=0xff => format!("\\x{:02x}", code),
                    0x100..=0xffff => format!("\\u{:04x}", code),
                    _ => format!("\\U{:08x}", code),
                };
                rendered.push_str(&escape);
            }
            c => rendered.push(c),
        }
    }
    rendered.push(quote);
    rendered
}

/// Whether `c` is shown as-is. Controls, separators other than the plain
/// space, format characters, noncharacters and private use code points are
/// escaped instead.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c as u32,
        0xad
            | 0x600..=0x605
            | 0x61c
            | 0x6dd
            | 0x70f
            | 0x890..=0x891
            | 0x8e2
            | 0x180e
            | 0x200b..=0x200f
            | 0x202a..=0x202e
            | 0x2060..=0x2064
            | 0x2066..=0x206f
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0xfffe..=0xffff
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..=0x10ffff
    )
}
