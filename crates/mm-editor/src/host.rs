//! Host collaborators: everything the editor asks of the page around it.
//!
//! File dialogs, confirmation prompts and the node editor form belong to
//! the host (a browser page, a test harness). The editor only calls these
//! hooks; it never blocks on them. Opening a file is the reverse
//! direction: the host calls `Editor::finish_load` when the user has
//! picked one.

use mm_core::model::Node;

pub trait Host {
    /// Offer `bytes` to the user as a download named `file_name`.
    fn save_file(&mut self, bytes: &[u8], file_name: &str) -> Result<(), String>;

    /// Ask a yes/no question. `true` means go ahead.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show an error message to the user.
    fn report_error(&mut self, message: &str);

    /// Open the label/color form for `node`.
    fn open_editor(&mut self, node: &Node);
}

/// A host that accepts everything and records what it was asked.
/// Useful for headless tools and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Answer returned by `confirm`.
    pub confirm_answer: bool,
    pub saved: Vec<(String, Vec<u8>)>,
    pub confirmations: Vec<String>,
    pub errors: Vec<String>,
    /// Ids of the nodes the editor form was opened for.
    pub opened: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            ..Self::default()
        }
    }
}

impl Host for RecordingHost {
    fn save_file(&mut self, bytes: &[u8], file_name: &str) -> Result<(), String> {
        self.saved.push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn open_editor(&mut self, node: &Node) {
        self.opened.push(node.id.to_string());
    }
}
