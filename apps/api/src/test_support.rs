//! Shared fixtures for unit tests: in-memory PDFs and a recording AI double.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::analysis::models::UploadedDocument;
use crate::llm_client::{AiError, AiService};

pub const QUICK_REPLY: &str = r#"{"overallScore":82,"scores":{"impact":80,"brevity":75,"style":85,"structure":78,"skills":88,"atsCompatibility":81},"strengths":["a","b","c"],"improvements":["x","y"],"analysis":"ok"}"#;

/// A one-page PDF whose text layer is `text` in Courier.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    build_pdf(vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ])
}

/// A one-page PDF containing only a filled rectangle: valid, but no text.
pub fn blank_pdf() -> Vec<u8> {
    build_pdf(vec![
        Operation::new(
            "re",
            vec![72.into(), 72.into(), 200.into(), 100.into()],
        ),
        Operation::new("f", vec![]),
    ])
}

fn build_pdf(operations: Vec<Operation>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize fixture pdf");
    buf
}

pub fn pdf_upload(content: Vec<u8>) -> UploadedDocument {
    UploadedDocument {
        content: Bytes::from(content),
        media_type: Some("application/pdf".to_string()),
        file_name: Some("resume.pdf".to_string()),
    }
}

enum MockReply {
    Text(String),
    Fail(String),
    Hang,
}

/// Test double for the AI provider. Counts calls and records prompts.
pub struct MockAi {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockAi {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_reply(MockReply::Text(text.to_string()))
    }

    /// Fails every call with a provider API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_reply(MockReply::Fail(message.to_string()))
    }

    /// Never answers.
    pub fn hanging() -> Self {
        Self::with_reply(MockReply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AiService for MockAi {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(AiError::Api {
                status: 429,
                message: message.clone(),
            }),
            MockReply::Hang => std::future::pending().await,
        }
    }
}
