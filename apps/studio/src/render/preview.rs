//! Preview projection: data-driven view-models for the on-screen resume.
//!
//! Each section is rebuilt from scratch on every projection; nothing from a
//! previous projection leaks into the next one.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Document, Presence, Section};
use crate::render::Template;

const PLACEHOLDER_NAME: &str = "Your Name";
const PLACEHOLDER_TITLE: &str = "Professional Title";
const PLACEHOLDER_EMAIL: &str = "email@example.com";
const PLACEHOLDER_PHONE: &str = "(123) 456-7890";
const PLACEHOLDER_LOCATION: &str = "City, State";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Whether the preview panel is showing.
    pub visible: bool,
    pub template: Template,
    pub generated_on: NaiveDate,
    pub summary_chars: usize,
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSection {
    pub section: Section,
    pub heading: Option<&'static str>,
    pub visible: bool,
    pub items: Vec<PreviewItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewItem {
    Header {
        name: String,
        title: String,
        email: String,
        phone: String,
        location: String,
        photo: Option<String>,
    },
    Link {
        label: String,
        url: String,
    },
    Text {
        text: String,
    },
    Tag {
        text: String,
    },
    Entry {
        title: String,
        subtitle: String,
        details: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tech: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        bullets: Vec<String>,
    },
    Line {
        strong: String,
        rest: String,
    },
}

impl Preview {
    /// An unprojected preview: every section present in order, all hidden.
    pub fn new(template: Template, generated_on: NaiveDate) -> Self {
        Self {
            visible: false,
            template,
            generated_on,
            summary_chars: 0,
            sections: Section::ALL
                .into_iter()
                .map(|section| PreviewSection {
                    section,
                    heading: section.heading(),
                    visible: false,
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn section(&self, section: Section) -> Option<&PreviewSection> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// Replaces one section in place; order never changes.
    pub fn replace_section(&mut self, projected: PreviewSection) {
        if let Some(slot) = self.sections.iter_mut().find(|s| s.section == projected.section) {
            *slot = projected;
        }
    }

    /// Re-projects one section from `document`.
    pub fn project(&mut self, document: &Document, section: Section) {
        if section == Section::Summary {
            self.summary_chars = document.summary.chars().count();
        }
        self.replace_section(project_section(document, section));
    }

    pub fn project_all(&mut self, document: &Document) {
        for section in Section::ALL {
            self.project(document, section);
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn details_line(location: &str, start: &str, end: &str) -> String {
    format!("{location} | {start} - {end}")
}

/// Builds the view-model for one section of `document`.
pub fn project_section(document: &Document, section: Section) -> PreviewSection {
    let items: Vec<PreviewItem> = match section {
        Section::Profile => {
            let p = &document.profile;
            vec![PreviewItem::Header {
                name: or_placeholder(&p.name, PLACEHOLDER_NAME),
                title: or_placeholder(&p.title, PLACEHOLDER_TITLE),
                email: or_placeholder(&p.email, PLACEHOLDER_EMAIL),
                phone: or_placeholder(&p.phone, PLACEHOLDER_PHONE),
                location: or_placeholder(&p.location, PLACEHOLDER_LOCATION),
                photo: p.photo.clone(),
            }]
        }
        Section::Links => document
            .profile
            .links
            .iter()
            .filter(|l| l.is_present())
            .map(|l| PreviewItem::Link {
                label: l.label.clone(),
                url: l.url.clone(),
            })
            .collect(),
        Section::Summary => {
            if document.summary.is_present() {
                vec![PreviewItem::Text {
                    text: document.summary.clone(),
                }]
            } else {
                Vec::new()
            }
        }
        Section::Skills => document
            .skills
            .iter()
            .filter(|s| s.is_present())
            .map(|s| PreviewItem::Tag { text: s.clone() })
            .collect(),
        Section::Experience => document
            .experience
            .iter()
            .filter(|e| e.is_present())
            .map(|e| PreviewItem::Entry {
                title: e.role.clone(),
                subtitle: e.company.clone(),
                details: details_line(&e.location, &e.start, &e.end),
                tech: Vec::new(),
                link: None,
                note: None,
                bullets: present_bullets(&e.bullets),
            })
            .collect(),
        Section::Education => document
            .education
            .iter()
            .filter(|e| e.is_present())
            .map(|e| PreviewItem::Entry {
                title: e.degree.clone(),
                subtitle: e.school.clone(),
                details: details_line(&e.location, &e.start, &e.end),
                tech: Vec::new(),
                link: None,
                note: e.details.is_present().then(|| e.details.clone()),
                bullets: Vec::new(),
            })
            .collect(),
        Section::Projects => document
            .projects
            .iter()
            .filter(|p| p.is_present())
            .map(|p| PreviewItem::Entry {
                title: p.name.clone(),
                subtitle: String::new(),
                details: String::new(),
                tech: p.tech.iter().filter(|t| t.is_present()).cloned().collect(),
                link: p.link.is_present().then(|| p.link.clone()),
                note: None,
                bullets: present_bullets(&p.bullets),
            })
            .collect(),
        Section::Certifications => document
            .certifications
            .iter()
            .filter(|c| c.is_present())
            .map(|c| {
                let mut rest = String::new();
                if c.issuer.is_present() {
                    rest.push_str(&format!(", {}", c.issuer));
                }
                if c.year.is_present() {
                    rest.push_str(&format!(" ({})", c.year));
                }
                PreviewItem::Line {
                    strong: c.name.clone(),
                    rest,
                }
            })
            .collect(),
        Section::Languages => document
            .languages
            .iter()
            .filter(|l| l.is_present())
            .map(|l| PreviewItem::Line {
                strong: l.language.clone(),
                rest: format!(" - {}", l.proficiency),
            })
            .collect(),
    };

    // The header block always shows, placeholders included.
    let visible = section == Section::Profile || !items.is_empty();
    PreviewSection {
        section,
        heading: section.heading(),
        visible,
        items,
    }
}

fn present_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .filter(|b| b.is_present())
        .map(|b| b.trim().to_string())
        .collect()
}
