//! Terminal implementations of the admin notification and confirmation seams.

use std::io::{self, BufRead, Write};

use vitrine_admin::{Confirm, Notice, NoticeLevel, Notifier};

/// Prints notices to stderr so stdout stays clean for listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => eprintln!("ok: {notice}"),
            NoticeLevel::Error => eprintln!("error: {notice}"),
        }
    }
}

/// Asks on the terminal. Anything but an explicit yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match ask(&format!("{prompt} [y/N] ")) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("could not read confirmation: {e}");
                false
            }
        }
    }
}

/// Confirms every prompt; used for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Print `prompt` on stderr and read one line from stdin.
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn assume_yes_confirms() {
        assert!(AssumeYes.confirm("Delete this faq?"));
    }
}
