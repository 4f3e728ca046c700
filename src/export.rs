use crate::FaqRecord;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of `{question, answer}` objects.
    Json,
    /// One chat fine-tuning example per line (user asks, assistant answers).
    Chat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatExample<'a> {
    messages: [ChatMessage<'a>; 2],
}

impl<'a> From<&'a FaqRecord> for ChatExample<'a> {
    fn from(record: &'a FaqRecord) -> Self {
        ChatExample {
            messages: [
                ChatMessage {
                    role: "user",
                    content: &record.question,
                },
                ChatMessage {
                    role: "assistant",
                    content: &record.answer,
                },
            ],
        }
    }
}

pub fn export<W: Write>(records: &[FaqRecord], format: ExportFormat, mut writer: W) -> io::Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
        }
        ExportFormat::Chat => {
            for record in records {
                serde_json::to_writer(&mut writer, &ChatExample::from(record))?;
                writer.write_all(b"\n")?;
            }
        }
    }
    writer.flush()
}
