use std::io::{self, Write};
use std::process::Command;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// OSC 52 escape that asks the terminal to put `text` on the clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x1b\\", STANDARD.encode(text.as_bytes()))
}

/// Write `text` to the system clipboard through the terminal.
pub fn copy_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// Where pasted text comes from. OSC 52 is write-only, so reading goes
/// through the platform's clipboard tools.
pub trait ClipboardSource {
    fn read_text(&self) -> Option<String>;
}

/// `pbpaste` on macOS; `wl-paste`, then `xclip` elsewhere
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&self) -> Option<String> {
        #[cfg(target_os = "macos")]
        let candidates: &[(&str, &[&str])] = &[("pbpaste", &[])];
        #[cfg(not(target_os = "macos"))]
        let candidates: &[(&str, &[&str])] = &[
            ("wl-paste", &["--no-newline"]),
            ("xclip", &["-selection", "clipboard", "-o"]),
        ];
        candidates.iter().find_map(|(program, args)| {
            let output = Command::new(program).args(*args).output().ok()?;
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
    }
}
