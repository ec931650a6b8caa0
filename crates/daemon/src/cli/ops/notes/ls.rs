use clap::Args;
use serde_json::Value;

use common::prelude::Note;
use jotter_daemon::http_server::api::client::ApiError;
use jotter_daemon::http_server::api::GetNotesRequest;

/// Longest content preview shown per note
const PREVIEW_CHARS: usize = 60;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    #[command(flatten)]
    pub request: GetNotesRequest,

    /// Only list notes the classifier marked as todos
    #[arg(long)]
    pub todo: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum NotesLsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = NotesLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let notes = ctx.client.call(self.request.clone()).await?;
        Ok(render(&notes, self.todo))
    }
}

/// One line per note; records that aren't notes are counted, not rendered.
fn render(records: &[Value], todo_only: bool) -> String {
    let mut skipped = 0;
    let mut lines = Vec::new();

    for record in records {
        let Ok(note) = serde_json::from_value::<Note>(record.clone()) else {
            skipped += 1;
            continue;
        };
        if todo_only && !note.is_todo() {
            continue;
        }

        let mut preview: String = note
            .content
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        if note.content.chars().count() > preview.chars().count() {
            preview.push_str("...");
        }

        let tags = note
            .tags()
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if note.is_todo() { "[ ]" } else { "-" };
        lines.push(format!("{} {} {} {}", marker, note.id, preview, tags).trim_end().to_string());
    }

    if lines.is_empty() {
        lines.push("No notes found".to_string());
    }
    if skipped > 0 {
        lines.push(format!("({} unrecognized records skipped)", skipped));
    }
    lines.join("\n")
}
