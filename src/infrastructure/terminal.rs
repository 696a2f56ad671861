//! Terminal dialogs and the system clipboard for the desktop binary

use async_trait::async_trait;
use std::io::{BufRead, Write};

#[cfg(feature = "desktop")]
use crate::domain::ClipboardSink;
use crate::domain::DialogSurface;
use crate::models::{Dialog, DialogAction};

/// Prints dialogs to stdout and reads the chosen button from stdin
pub struct TerminalSurface;

#[async_trait]
impl DialogSurface for TerminalSurface {
    async fn show(&self, dialog: &Dialog) -> DialogAction {
        let dialog = dialog.clone();
        tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            prompt(&dialog, &mut input, &mut out)
        })
        .await
        .unwrap_or(DialogAction::Dismiss)
    }
}

/// Render a dialog and read answers until one matches a button.
/// End of input picks the least destructive button.
fn prompt(dialog: &Dialog, input: &mut impl BufRead, out: &mut impl Write) -> DialogAction {
    let fallback = fallback_action(dialog);
    let _ = writeln!(out, "\n== {} ==\n{}", dialog.title, dialog.message);

    if dialog.buttons.len() < 2 {
        let label = dialog
            .buttons
            .first()
            .map(|b| b.label.as_str())
            .unwrap_or_default();
        let _ = writeln!(out, "[Enter] {}", label);
        let _ = out.flush();
        let mut line = String::new();
        let _ = input.read_line(&mut line);
        return fallback;
    }

    for (i, button) in dialog.buttons.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, button.label);
    }

    loop {
        let _ = write!(out, "> ");
        let _ = out.flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return fallback,
            Ok(_) => {}
        }

        let answer = line.trim();
        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| dialog.buttons.get(i))
            .or_else(|| {
                dialog
                    .buttons
                    .iter()
                    .find(|b| !answer.is_empty() && b.label.eq_ignore_ascii_case(answer))
            });

        if let Some(button) = chosen {
            return button.action;
        }
    }
}

fn fallback_action(dialog: &Dialog) -> DialogAction {
    if dialog.offers(DialogAction::Dismiss) {
        DialogAction::Dismiss
    } else {
        DialogAction::Acknowledge
    }
}

/// System clipboard via arboard.
///
/// X11 and Wayland selections belong to the process that set them, so on
/// Linux a copy blocks until another application takes the contents over.
#[cfg(feature = "desktop")]
pub struct SystemClipboard {
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    wait_for_handoff: bool,
}

#[cfg(feature = "desktop")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            wait_for_handoff: cfg!(target_os = "linux"),
        }
    }
}

#[cfg(feature = "desktop")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "desktop")]
impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| format!("Failed to initialize clipboard: {}", e))?;

        #[cfg(target_os = "linux")]
        if self.wait_for_handoff {
            use arboard::SetExtLinux;

            tracing::info!("Holding the clipboard until another application takes it");
            return clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| format!("Failed to copy to clipboard: {}", e));
        }

        clipboard
            .set_text(text)
            .map_err(|e| format!("Failed to copy to clipboard: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(dialog: &Dialog, answers: &str) -> (DialogAction, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let action = prompt(dialog, &mut input, &mut out);
        (action, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_result_dialog_by_number() {
        let dialog = Dialog::copyable("Scanned text:", "\nHello\n", "Copy text", "Cancel");
        let (action, out) = run(&dialog, "1\n");
        assert_eq!(action, DialogAction::Copy);
        assert!(out.contains("== Scanned text: =="));
        assert!(out.contains("[1] Copy text"));
        assert!(out.contains("[2] Cancel"));
    }

    #[test]
    fn test_result_dialog_by_label_after_bad_answer() {
        let dialog = Dialog::copyable("t", "m", "Copy text", "Cancel");
        let (action, _) = run(&dialog, "7\ncancel\n");
        assert_eq!(action, DialogAction::Dismiss);
    }

    #[test]
    fn test_end_of_input_dismisses() {
        let dialog = Dialog::copyable("t", "m", "Copy text", "Cancel");
        let (action, _) = run(&dialog, "");
        assert_eq!(action, DialogAction::Dismiss);
    }

    #[cfg(feature = "desktop")]
    #[test]
    fn test_clipboard_waits_for_handoff_on_linux() {
        let clipboard = SystemClipboard::new();
        assert_eq!(clipboard.wait_for_handoff, cfg!(target_os = "linux"));
    }

    #[test]
    fn test_alert_is_acknowledged() {
        let dialog = Dialog::alert("Error", "network unreachable", "OK");
        let (action, out) = run(&dialog, "\n");
        assert_eq!(action, DialogAction::Acknowledge);
        assert!(out.contains("network unreachable"));
        assert!(out.contains("[Enter] OK"));
    }
}
