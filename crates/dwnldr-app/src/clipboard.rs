//! Clipboard access for copying rendered commands

use std::io::Write;
use std::process::{Command, Stdio};

use dwnldr_core::prelude::*;

/// Destination for copied command text
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// System clipboard via arboard, falling back to platform copy tools
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("arboard unavailable ({}), trying copy tools", e);
                copy_with_tools(text)
            }
        }
    }
}

fn copy_tools() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else if cfg!(windows) {
        &[("clip.exe", &[])]
    } else {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

fn copy_with_tools(text: &str) -> Result<()> {
    for (cmd, args) in copy_tools() {
        let mut child = match Command::new(cmd)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(_) => continue,
        };

        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                let _ = child.kill();
                continue;
            }
        }

        match child.wait() {
            Ok(status) if status.success() => return Ok(()),
            _ => continue,
        }
    }

    Err(Error::clipboard("no clipboard available"))
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingClipboard;
    use super::*;

    #[test]
    fn test_copy_tools_listed_for_platform() {
        assert!(!copy_tools().is_empty());
    }

    #[test]
    fn test_recording_clipboard() {
        let cb = RecordingClipboard::default();
        cb.set_text("curl -O http://10.0.0.5:3000/files/a.txt").unwrap();
        assert_eq!(cb.copied.lock().unwrap().len(), 1);

        let failing = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            failing.set_text("x"),
            Err(Error::Clipboard { .. })
        ));
    }
}
