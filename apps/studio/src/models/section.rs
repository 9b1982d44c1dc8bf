use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level sections of the resume, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Profile,
    Links,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
    Languages,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Profile,
        Section::Links,
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Links => "links",
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Languages => "languages",
        }
    }

    /// All-caps heading used by the text and document-tree exports. The
    /// profile header and links carry no heading.
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Section::Profile | Section::Links => None,
            Section::Summary => Some("SUMMARY"),
            Section::Skills => Some("SKILLS"),
            Section::Experience => Some("EXPERIENCE"),
            Section::Education => Some("EDUCATION"),
            Section::Projects => Some("PROJECTS"),
            Section::Certifications => Some("CERTIFICATIONS"),
            Section::Languages => Some("LANGUAGES"),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
