//! Document-tree projection for word-processor export.
//!
//! Produces an ordered list of styled blocks that a `DocumentGenerator`
//! turns into a binary file. The two templates share one structure: only
//! the header alignment and the accent color differ.
//!
//! Sizes are half-points (22 = 11pt); spacing and margins are twips
//! (1440 = 1 inch), the units word processors use natively.

use serde::Serialize;

use crate::models::{Document, Presence};
use crate::render::Template;

pub const ACCENT_CLASSIC: &str = "2A60C8";
pub const ACCENT_MODERN: &str = "333333";
const LINK_COLOR: &str = "0563C1";
const MUTED_COLOR: &str = "666666";
const RULE_COLOR: &str = "999999";

const SIZE_ENTRY_TITLE: u16 = 24;
const SIZE_SMALL: u16 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTree {
    pub template: Template,
    pub styles: DocStyles,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocStyles {
    pub font: &'static str,
    pub body_size: u16,
    pub heading1_size: u16,
    pub heading2_size: u16,
    /// 276 = 1.15 line spacing.
    pub line_spacing: u16,
    pub accent_color: &'static str,
    pub heading2_rule_color: &'static str,
    pub margin: u16,
}

impl DocStyles {
    fn for_template(template: Template) -> Self {
        Self {
            font: "Calibri",
            body_size: 22,
            heading1_size: 32,
            heading2_size: 26,
            line_spacing: 276,
            accent_color: accent_color(template),
            heading2_rule_color: RULE_COLOR,
            margin: 720,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading1,
    Heading2,
    Paragraph,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub before: u16,
    pub after: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub runs: Vec<Run>,
    /// Bullet-list level when the paragraph is a list item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_level: Option<u8>,
    pub spacing: Spacing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u16>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }
}

impl Block {
    fn paragraph(runs: Vec<Run>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            alignment: Alignment::Left,
            runs,
            bullet_level: None,
            spacing: Spacing::default(),
        }
    }

    fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn spaced(mut self, before: u16, after: u16) -> Self {
        self.spacing = Spacing { before, after };
        self
    }

    fn bullet(text: &str) -> Self {
        Self {
            bullet_level: Some(0),
            ..Self::paragraph(vec![Run::plain(text.trim())])
        }
        .spaced(20, 20)
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

pub fn accent_color(template: Template) -> &'static str {
    match template {
        Template::Classic => ACCENT_CLASSIC,
        Template::Modern => ACCENT_MODERN,
    }
}

fn header_alignment(template: Template) -> Alignment {
    match template {
        Template::Classic => Alignment::Left,
        Template::Modern => Alignment::Center,
    }
}

struct TreeBuilder {
    accent: &'static str,
    header: Alignment,
    blocks: Vec<Block>,
}

impl TreeBuilder {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn section_heading(&mut self, heading: &str) {
        self.push(
            Block {
                kind: BlockKind::Heading2,
                ..Block::paragraph(vec![Run::plain(heading).bold().color(self.accent)])
            }
            .spaced(240, 120),
        );
    }

    fn entry_title(&mut self, text: &str) {
        self.push(
            Block::paragraph(vec![Run::plain(text.trim()).bold().size(SIZE_ENTRY_TITLE)])
                .spaced(120, 0),
        );
    }

    fn bullets(&mut self, bullets: &[String]) {
        for bullet in bullets.iter().filter(|b| b.is_present()) {
            self.push(Block::bullet(bullet));
        }
    }
}

pub fn render_doc_tree(document: &Document, template: Template) -> DocTree {
    let mut tree = TreeBuilder {
        accent: accent_color(template),
        header: header_alignment(template),
        blocks: Vec::new(),
    };
    let profile = &document.profile;

    let name = if profile.name.is_present() {
        profile.name.trim()
    } else {
        "Your Name"
    };
    tree.push(
        Block {
            kind: BlockKind::Heading1,
            ..Block::paragraph(vec![Run::plain(name).bold().color(tree.accent)])
        }
        .aligned(tree.header)
        .spaced(240, 120),
    );

    let title = if profile.title.is_present() {
        profile.title.trim()
    } else {
        "Professional Title"
    };
    tree.push(
        Block::paragraph(vec![Run::plain(title).bold().size(SIZE_ENTRY_TITLE)])
            .aligned(tree.header)
            .spaced(0, 80),
    );

    let contact: Vec<&str> = [&profile.email, &profile.phone, &profile.location]
        .into_iter()
        .filter(|v| v.is_present())
        .map(|v| v.trim())
        .collect();
    if !contact.is_empty() {
        tree.push(
            Block::paragraph(vec![Run::plain(contact.join(" • ")).size(SIZE_SMALL)])
                .aligned(tree.header)
                .spaced(0, 80),
        );
    }

    let links: Vec<String> = profile
        .links
        .iter()
        .filter(|l| l.is_present())
        .map(|l| format!("{}: {}", l.label.trim(), l.url.trim()))
        .collect();
    if !links.is_empty() {
        tree.push(
            Block::paragraph(vec![Run::plain(links.join(" | "))
                .size(SIZE_SMALL)
                .color(LINK_COLOR)
                .underline()])
            .aligned(tree.header)
            .spaced(0, 160),
        );
    }

    if document.summary.is_present() {
        tree.section_heading("SUMMARY");
        tree.push(Block::paragraph(vec![Run::plain(document.summary.trim())]).spaced(0, 160));
    }

    let skills: Vec<&str> = document
        .skills
        .iter()
        .filter(|s| s.is_present())
        .map(|s| s.trim())
        .collect();
    if !skills.is_empty() {
        tree.section_heading("SKILLS");
        tree.push(Block::paragraph(vec![Run::plain(skills.join(", "))]).spaced(0, 160));
    }

    let experience: Vec<_> = document.experience.iter().filter(|e| e.is_present()).collect();
    if !experience.is_empty() {
        tree.section_heading("EXPERIENCE");
        for exp in experience {
            tree.entry_title(&exp.role);
            tree.push(Block::paragraph(vec![
                Run::plain(with_location(&exp.company, &exp.location)).italic()
            ]));
            let end = if exp.end.is_present() { exp.end.trim() } else { "Present" };
            tree.push(
                Block::paragraph(vec![Run::plain(format!("{} to {}", exp.start.trim(), end))
                    .size(SIZE_SMALL)
                    .color(MUTED_COLOR)])
                .spaced(0, 80),
            );
            tree.bullets(&exp.bullets);
        }
    }

    let education: Vec<_> = document.education.iter().filter(|e| e.is_present()).collect();
    if !education.is_empty() {
        tree.section_heading("EDUCATION");
        for edu in education {
            tree.entry_title(&edu.degree);
            tree.push(Block::paragraph(vec![
                Run::plain(with_location(&edu.school, &edu.location)).italic()
            ]));
            tree.push(Block::paragraph(vec![Run::plain(format!(
                "{} to {}",
                edu.start.trim(),
                edu.end.trim()
            ))
            .size(SIZE_SMALL)
            .color(MUTED_COLOR)]));
            if edu.details.is_present() {
                tree.push(Block::paragraph(vec![Run::plain(edu.details.trim())]).spaced(0, 80));
            }
        }
    }

    let projects: Vec<_> = document.projects.iter().filter(|p| p.is_present()).collect();
    if !projects.is_empty() {
        tree.section_heading("PROJECTS");
        for project in projects {
            tree.entry_title(&project.name);
            let tech: Vec<&str> = project
                .tech
                .iter()
                .filter(|t| t.is_present())
                .map(|t| t.trim())
                .collect();
            if !tech.is_empty() {
                tree.push(Block::paragraph(vec![Run::plain(format!(
                    "Technologies: {}",
                    tech.join(", ")
                ))
                .italic()
                .size(SIZE_SMALL)]));
            }
            if project.link.is_present() {
                tree.push(
                    Block::paragraph(vec![Run::plain(project.link.trim())
                        .size(SIZE_SMALL)
                        .color(LINK_COLOR)
                        .underline()])
                    .spaced(0, 80),
                );
            }
            tree.bullets(&project.bullets);
        }
    }

    let certifications: Vec<_> = document
        .certifications
        .iter()
        .filter(|c| c.is_present())
        .collect();
    if !certifications.is_empty() {
        tree.section_heading("CERTIFICATIONS");
        for cert in certifications {
            let mut runs = vec![Run::plain(cert.name.trim()).bold()];
            if cert.issuer.is_present() {
                runs.push(Run::plain(format!(", {}", cert.issuer.trim())));
            }
            if cert.year.is_present() {
                runs.push(Run::plain(format!(" ({})", cert.year.trim())));
            }
            tree.push(Block::paragraph(runs).spaced(80, 40));
        }
    }

    let languages: Vec<_> = document.languages.iter().filter(|l| l.is_present()).collect();
    if !languages.is_empty() {
        tree.section_heading("LANGUAGES");
        for lang in languages {
            tree.push(
                Block::paragraph(vec![
                    Run::plain(lang.language.trim()).bold(),
                    Run::plain(format!(" - {}", lang.proficiency)),
                ])
                .spaced(80, 40),
            );
        }
    }

    DocTree {
        template,
        styles: DocStyles::for_template(template),
        blocks: tree.blocks,
    }
}

fn with_location(place: &str, location: &str) -> String {
    if location.is_present() {
        format!("{}, {}", place.trim(), location.trim())
    } else {
        place.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Certification, Experience};

    /// Blocks with alignment and accent color erased.
    fn shape(tree: &DocTree) -> Vec<Block> {
        tree.blocks
            .iter()
            .cloned()
            .map(|mut block| {
                block.alignment = Alignment::Left;
                for run in &mut block.runs {
                    if run.color.as_deref() == Some(accent_color(tree.template)) {
                        run.color = None;
                    }
                }
                block
            })
            .collect()
    }

    #[test]
    fn test_templates_share_structure() {
        let doc = Document::sample();
        let classic = render_doc_tree(&doc, Template::Classic);
        let modern = render_doc_tree(&doc, Template::Modern);
        assert_ne!(classic, modern);
        assert_eq!(shape(&classic), shape(&modern));
    }

    #[test]
    fn test_modern_centers_header_only() {
        let tree = render_doc_tree(&Document::sample(), Template::Modern);
        assert_eq!(tree.blocks[0].alignment, Alignment::Center);
        assert_eq!(tree.styles.accent_color, ACCENT_MODERN);
        let summary = tree
            .blocks
            .iter()
            .position(|b| b.kind == BlockKind::Heading2)
            .unwrap();
        assert!(tree.blocks[summary..]
            .iter()
            .all(|b| b.alignment == Alignment::Left));
    }

    #[test]
    fn test_classic_accent_on_headings() {
        let tree = render_doc_tree(&Document::sample(), Template::Classic);
        for block in tree.blocks.iter().filter(|b| b.kind != BlockKind::Paragraph) {
            assert_eq!(block.runs[0].color.as_deref(), Some(ACCENT_CLASSIC));
        }
    }

    #[test]
    fn test_section_headings_in_fixed_order() {
        let tree = render_doc_tree(&Document::sample(), Template::Classic);
        let headings: Vec<String> = tree
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Heading2)
            .map(Block::text)
            .collect();
        assert_eq!(
            headings,
            vec![
                "SUMMARY",
                "SKILLS",
                "EXPERIENCE",
                "EDUCATION",
                "PROJECTS",
                "CERTIFICATIONS",
                "LANGUAGES"
            ]
        );
    }

    #[test]
    fn test_bullets_are_list_items() {
        let doc = Document {
            experience: vec![Experience {
                role: "Engineer".to_string(),
                bullets: vec!["One".to_string(), " ".to_string(), "Two".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let tree = render_doc_tree(&doc, Template::Classic);
        let bullets: Vec<String> = tree
            .blocks
            .iter()
            .filter(|b| b.bullet_level == Some(0))
            .map(Block::text)
            .collect();
        assert_eq!(bullets, vec!["One", "Two"]);
    }

    #[test]
    fn test_nameless_certification_is_suppressed() {
        let doc = Document {
            certifications: vec![Certification {
                issuer: "AWS".to_string(),
                year: "2021".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let tree = render_doc_tree(&doc, Template::Classic);
        assert!(!tree.blocks.iter().any(|b| b.text() == "CERTIFICATIONS"));
    }

    #[test]
    fn test_certification_runs() {
        let tree = render_doc_tree(&Document::sample(), Template::Classic);
        let cert = tree
            .blocks
            .iter()
            .find(|b| b.text().starts_with("AWS Certified Developer"))
            .unwrap();
        assert!(cert.runs[0].bold);
        assert_eq!(cert.text(), "AWS Certified Developer, Amazon Web Services (2021)");
    }

    #[test]
    fn test_empty_document_has_placeholder_header() {
        let tree = render_doc_tree(&Document::default(), Template::Classic);
        assert_eq!(tree.blocks.len(), 2);
        assert_eq!(tree.blocks[0].text(), "Your Name");
        assert_eq!(tree.blocks[1].text(), "Professional Title");
    }

    #[test]
    fn test_open_experience_reads_present() {
        let doc = Document {
            experience: vec![Experience {
                role: "Engineer".to_string(),
                start: "2020".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let tree = render_doc_tree(&doc, Template::Classic);
        assert!(tree.blocks.iter().any(|b| b.text() == "2020 to Present"));
    }

    #[test]
    fn test_company_line_joins_location_when_present() {
        assert_eq!(with_location("Acme", "Remote"), "Acme, Remote");
        assert_eq!(with_location(" Acme ", "  "), "Acme");
    }
}
