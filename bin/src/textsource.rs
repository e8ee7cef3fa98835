//! Turns uploaded or on-disk documents into text for extraction.

use std::{
    panic::{self, AssertUnwindSafe},
    path::Path,
};

use anyhow::{Result, anyhow};

/// Produces the text layer of a document, with line breaks preserved.
pub trait TextSource: Send + Sync {
    fn read_text(&self, data: &[u8]) -> Result<String>;
}

/// Extracts text from PDF documents.
pub struct PdfText;

impl TextSource for PdfText {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        // pdf_extract can panic on malformed documents.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(data)
        }));
        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => Err(anyhow!("extracting PDF text: {err}")),
            Err(_) => Err(anyhow!("extracting PDF text: malformed document")),
        }
    }
}

/// Passes through already extracted text.
pub struct PlainText;

impl TextSource for PlainText {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Selects how input documents are read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum InputType {
    /// PDF for a `.pdf` extension, text otherwise.
    #[default]
    Auto,
    Pdf,
    Text,
}

impl InputType {
    /// Resolves [InputType::Auto] against the input path.
    pub fn resolve(self, path: &Path) -> InputType {
        match self {
            InputType::Auto => {
                let is_pdf = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
                if is_pdf {
                    InputType::Pdf
                } else {
                    InputType::Text
                }
            }
            other => other,
        }
    }

    /// Returns the text source for a resolved input type.
    pub fn source(self) -> Box<dyn TextSource> {
        match self {
            InputType::Pdf => Box::new(PdfText),
            InputType::Auto | InputType::Text => Box::new(PlainText),
        }
    }
}
