//! Plain-text (ATS) export.
//!
//! Fixed section order: profile header, links, SUMMARY, SKILLS, EXPERIENCE,
//! EDUCATION, PROJECTS, CERTIFICATIONS, LANGUAGES. Emitted blocks are
//! separated by exactly one blank line and the last one ends with its own
//! newline; blocks with nothing present are skipped entirely.

use crate::models::{Document, Presence, Section};

pub const BULLET_MARKER: char = '•';

pub fn render_plain_text(document: &Document) -> String {
    let blocks = [
        header_block(document),
        links_block(document),
        summary_block(document),
        skills_block(document),
        experience_block(document),
        education_block(document),
        projects_block(document),
        certifications_block(document),
        languages_block(document),
    ];

    let mut out = String::new();
    for (i, lines) in blocks.into_iter().flatten().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn header_block(document: &Document) -> Option<Vec<String>> {
    let p = &document.profile;
    let mut lines = Vec::new();
    if p.name.is_present() {
        lines.push(p.name.trim().to_string());
    }
    if p.title.is_present() {
        lines.push(p.title.trim().to_string());
    }
    let contact = [p.email.as_str(), p.phone.as_str(), p.location.as_str()];
    lines.extend(join_present(&contact, " | "));
    non_empty(lines)
}

fn links_block(document: &Document) -> Option<Vec<String>> {
    let lines = document
        .profile
        .links
        .iter()
        .filter(|l| l.is_present())
        .map(|l| format!("{}: {}", l.label.trim(), l.url.trim()))
        .collect();
    non_empty(lines)
}

fn summary_block(document: &Document) -> Option<Vec<String>> {
    if !document.summary.is_present() {
        return None;
    }
    section_block(Section::Summary, vec![document.summary.trim().to_string()])
}

fn skills_block(document: &Document) -> Option<Vec<String>> {
    let skills = join_present(
        &document.skills.iter().map(String::as_str).collect::<Vec<_>>(),
        ", ",
    )?;
    section_block(Section::Skills, vec![skills])
}

fn experience_block(document: &Document) -> Option<Vec<String>> {
    let entries = document
        .experience
        .iter()
        .filter(|e| e.is_present())
        .map(|e| {
            let mut lines = Vec::new();
            if e.role.is_present() {
                lines.push(e.role.trim().to_string());
            }
            lines.extend(join_present(&[e.company.as_str(), e.location.as_str()], ", "));
            lines.extend(date_range(&e.start, &e.end, Some("Present")));
            lines.extend(bullet_lines(&e.bullets));
            lines
        })
        .collect();
    entries_block(Section::Experience, entries)
}

fn education_block(document: &Document) -> Option<Vec<String>> {
    let entries = document
        .education
        .iter()
        .filter(|e| e.is_present())
        .map(|e| {
            let mut lines = Vec::new();
            if e.degree.is_present() {
                lines.push(e.degree.trim().to_string());
            }
            lines.extend(join_present(&[e.school.as_str(), e.location.as_str()], ", "));
            lines.extend(date_range(&e.start, &e.end, None));
            if e.details.is_present() {
                lines.push(e.details.trim().to_string());
            }
            lines
        })
        .collect();
    entries_block(Section::Education, entries)
}

fn projects_block(document: &Document) -> Option<Vec<String>> {
    let entries = document
        .projects
        .iter()
        .filter(|p| p.is_present())
        .map(|p| {
            let mut lines = vec![p.name.trim().to_string()];
            if p.link.is_present() {
                lines.push(p.link.trim().to_string());
            }
            let tech: Vec<&str> = p.tech.iter().map(String::as_str).collect();
            if let Some(tech) = join_present(&tech, ", ") {
                lines.push(format!("Technologies: {tech}"));
            }
            lines.extend(bullet_lines(&p.bullets));
            lines
        })
        .collect();
    entries_block(Section::Projects, entries)
}

fn certifications_block(document: &Document) -> Option<Vec<String>> {
    let lines: Vec<String> = document
        .certifications
        .iter()
        .filter(|c| c.is_present())
        .filter_map(|c| {
            join_present(&[c.name.as_str(), c.issuer.as_str(), c.year.as_str()], ", ")
        })
        .collect();
    if lines.is_empty() {
        return None;
    }
    section_block(Section::Certifications, lines)
}

fn languages_block(document: &Document) -> Option<Vec<String>> {
    let lines: Vec<String> = document
        .languages
        .iter()
        .filter(|l| l.is_present())
        .map(|l| format!("{} - {}", l.language.trim(), l.proficiency))
        .collect();
    if lines.is_empty() {
        return None;
    }
    section_block(Section::Languages, lines)
}

/// Heading followed by `lines`.
fn section_block(section: Section, lines: Vec<String>) -> Option<Vec<String>> {
    let mut block = Vec::with_capacity(lines.len() + 1);
    block.extend(section.heading().map(str::to_string));
    block.extend(lines);
    Some(block)
}

/// Heading followed by multi-line entries separated by one blank line.
fn entries_block(section: Section, entries: Vec<Vec<String>>) -> Option<Vec<String>> {
    if entries.is_empty() {
        return None;
    }
    let mut lines = Vec::new();
    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(entry);
    }
    section_block(section, lines)
}

fn bullet_lines(bullets: &[String]) -> impl Iterator<Item = String> + '_ {
    bullets
        .iter()
        .filter(|b| b.is_present())
        .map(|b| format!("{BULLET_MARKER} {}", b.trim()))
}

/// `start to end`; an open end reads `open_end` when given.
fn date_range(start: &str, end: &str, open_end: Option<&str>) -> Option<String> {
    let (start, end) = (start.trim(), end.trim());
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, false) => Some(format!("{start} to {end}")),
        (false, true) => Some(match open_end {
            Some(open) => format!("{start} to {open}"),
            None => start.to_string(),
        }),
        (true, false) => Some(end.to_string()),
    }
}

fn join_present(parts: &[&str], separator: &str) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    (!present.is_empty()).then(|| present.join(separator))
}

fn non_empty(lines: Vec<String>) -> Option<Vec<String>> {
    (!lines.is_empty()).then_some(lines)
}
