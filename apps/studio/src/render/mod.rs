// Renderers: three independent projections of the same Document.
// Each one applies the presence rule itself and never mutates the Document.

pub mod doc_tree;
pub mod preview;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use doc_tree::{render_doc_tree, DocTree};
pub use preview::{Preview, PreviewSection};
pub use text::render_plain_text;

/// Active template. Only the document-tree export reads it: alignment of
/// the header block and the accent color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Classic,
    Modern,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" => Ok(Template::Classic),
            "modern" => Ok(Template::Modern),
            other => Err(format!("unknown template '{other}' (expected classic or modern)")),
        }
    }
}

/// Profile name with whitespace runs collapsed to `_`, or `None` when blank.
fn file_stem(name: &str) -> Option<String> {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    (!stem.is_empty()).then_some(stem)
}

/// `Jane_Doe.txt`, or `Resume.txt` without a name.
pub fn text_export_filename(name: &str) -> String {
    format!("{}.txt", file_stem(name).unwrap_or_else(|| "Resume".to_string()))
}

/// `Jane_Doe_Resume.<ext>`, or `Resume.<ext>` without a name.
pub fn document_export_filename(name: &str, extension: &str) -> String {
    match file_stem(name) {
        Some(stem) => format!("{stem}_Resume.{extension}"),
        None => format!("Resume.{extension}"),
    }
}

/// Title handed to the print pipeline; browsers use it as the PDF name.
pub fn print_title(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}
