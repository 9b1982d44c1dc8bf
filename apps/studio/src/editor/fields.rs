//! Editable field state: the transient, denormalized side of the editor.
//!
//! Mirrors what the form shows, blank entries included. Every section can be
//! collected into the Document at any time without loss.

use serde::Serialize;

use crate::collection::{CollectEntry, Collection, TagCollection};
use crate::models::{
    Certification, Document, Education, Experience, Language, Link, Presence, Proficiency,
    Project, Section,
};

/// Why a field assignment was refused. Nothing is written when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Unknown,
    Invalid,
}

/// An entry whose text fields can be edited by name.
pub trait EditableEntry {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileFields {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub include_photo: bool,
    pub photo: Option<String>,
}

impl EditableEntry for ProfileFields {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "name" => &mut self.name,
            "title" => &mut self.title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "location" => &mut self.location,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl ProfileFields {
    /// Turning inclusion off drops the stored photo.
    pub fn set_include_photo(&mut self, enabled: bool) {
        self.include_photo = enabled;
        if !enabled {
            self.photo = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceForm {
    pub role: String,
    pub company: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub bullets: Collection<String>,
}

impl ExperienceForm {
    /// A new form entry starts with one blank bullet ready for typing.
    pub fn blank() -> Self {
        Self {
            bullets: Collection::from_values([String::new()]),
            ..Self::default()
        }
    }
}

impl From<&Experience> for ExperienceForm {
    fn from(entry: &Experience) -> Self {
        let mut form = Self {
            role: entry.role.clone(),
            company: entry.company.clone(),
            location: entry.location.clone(),
            start: entry.start.clone(),
            end: entry.end.clone(),
            bullets: Collection::from_values(entry.bullets.iter().cloned()),
        };
        if form.bullets.is_empty() {
            form.bullets.add(String::new());
        }
        form
    }
}

impl EditableEntry for ExperienceForm {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "role" => &mut self.role,
            "company" => &mut self.company,
            "location" => &mut self.location,
            "start" => &mut self.start,
            "end" => &mut self.end,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl CollectEntry for ExperienceForm {
    type Output = Experience;

    fn snapshot(&self) -> Experience {
        Experience {
            role: self.role.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            bullets: self.bullets.collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectForm {
    pub name: String,
    pub link: String,
    pub tech: TagCollection,
    pub bullets: Collection<String>,
}

impl ProjectForm {
    pub fn blank() -> Self {
        Self {
            bullets: Collection::from_values([String::new()]),
            ..Self::default()
        }
    }
}

impl From<&Project> for ProjectForm {
    fn from(entry: &Project) -> Self {
        let mut form = Self {
            name: entry.name.clone(),
            link: entry.link.clone(),
            tech: TagCollection::from_values(&entry.tech),
            bullets: Collection::from_values(entry.bullets.iter().cloned()),
        };
        if form.bullets.is_empty() {
            form.bullets.add(String::new());
        }
        form
    }
}

impl EditableEntry for ProjectForm {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "name" => &mut self.name,
            "link" => &mut self.link,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl CollectEntry for ProjectForm {
    type Output = Project;

    fn snapshot(&self) -> Project {
        Project {
            name: self.name.clone(),
            link: self.link.clone(),
            tech: self.tech.collect(),
            bullets: self.bullets.collect(),
        }
    }
}

impl EditableEntry for Link {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "label" => &mut self.label,
            "url" => &mut self.url,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl EditableEntry for Education {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "degree" => &mut self.degree,
            "school" => &mut self.school,
            "location" => &mut self.location,
            "start" => &mut self.start,
            "end" => &mut self.end,
            "details" => &mut self.details,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl EditableEntry for Certification {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        let slot = match field {
            "name" => &mut self.name,
            "issuer" => &mut self.issuer,
            "year" => &mut self.year,
            _ => return Err(FieldError::Unknown),
        };
        *slot = value;
        Ok(())
    }
}

impl EditableEntry for Language {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            "language" => self.language = value,
            "proficiency" => {
                self.proficiency = Proficiency::parse(&value).ok_or(FieldError::Invalid)?;
            }
            _ => return Err(FieldError::Unknown),
        }
        Ok(())
    }
}

/// Flat entries are stored in the form exactly as the Document holds them.
macro_rules! collect_as_is {
    ($($ty:ty),+) => {
        $(
            impl CollectEntry for $ty {
                type Output = $ty;

                fn snapshot(&self) -> $ty {
                    self.clone()
                }
            }
        )+
    };
}

collect_as_is!(Link, Education, Certification, Language);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub profile: ProfileFields,
    pub links: Collection<Link>,
    pub summary: String,
    pub skills: TagCollection,
    pub experience: Collection<ExperienceForm>,
    pub education: Collection<Education>,
    pub projects: Collection<ProjectForm>,
    pub certifications: Collection<Certification>,
    pub languages: Collection<Language>,
}

impl FormState {
    /// Rebuilds the whole form from a document, as on load or startup.
    pub fn from_document(document: &Document) -> Self {
        let profile = &document.profile;
        Self {
            profile: ProfileFields {
                name: profile.name.clone(),
                title: profile.title.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
                location: profile.location.clone(),
                include_photo: profile.photo.is_some(),
                photo: profile.photo.clone(),
            },
            links: Collection::from_values(profile.links.iter().cloned()),
            summary: document.summary.clone(),
            skills: TagCollection::from_values(&document.skills),
            experience: Collection::from_values(
                document.experience.iter().map(ExperienceForm::from),
            ),
            education: Collection::from_values(document.education.iter().cloned()),
            projects: Collection::from_values(document.projects.iter().map(ProjectForm::from)),
            certifications: Collection::from_values(document.certifications.iter().cloned()),
            languages: Collection::from_values(document.languages.iter().cloned()),
        }
    }

    /// Writes one section of the form into `document`, leaving the rest alone.
    pub fn collect_into(&self, section: Section, document: &mut Document) {
        match section {
            Section::Profile => {
                let fields = &self.profile;
                let profile = &mut document.profile;
                profile.name = fields.name.clone();
                profile.title = fields.title.clone();
                profile.email = fields.email.clone();
                profile.phone = fields.phone.clone();
                profile.location = fields.location.clone();
                profile.photo = if fields.include_photo {
                    fields.photo.clone()
                } else {
                    None
                };
            }
            Section::Links => document.profile.links = self.links.collect(),
            Section::Summary => document.summary = self.summary.clone(),
            Section::Skills => document.skills = self.skills.collect(),
            Section::Experience => document.experience = self.experience.collect(),
            Section::Education => document.education = self.education.collect(),
            Section::Projects => document.projects = self.projects.collect(),
            Section::Certifications => document.certifications = self.certifications.collect(),
            Section::Languages => document.languages = self.languages.collect(),
        }
    }

    /// Collects every section into a fresh document.
    pub fn collect_all(&self) -> Document {
        let mut document = Document::default();
        for section in Section::ALL {
            self.collect_into(section, &mut document);
        }
        document
    }

    /// Number of entries the form holds for a section, blank ones included.
    pub fn entry_count(&self, section: Section) -> usize {
        match section {
            Section::Profile | Section::Summary => 1,
            Section::Links => self.links.len(),
            Section::Skills => self.skills.len(),
            Section::Experience => self.experience.len(),
            Section::Education => self.education.len(),
            Section::Projects => self.projects.len(),
            Section::Certifications => self.certifications.len(),
            Section::Languages => self.languages.len(),
        }
    }

    /// Number of entries the projections would show for a section.
    pub fn present_count(&self, section: Section) -> usize {
        match section {
            Section::Profile => 1,
            Section::Summary => usize::from(self.summary.is_present()),
            Section::Links => self.links.collect().len(),
            Section::Skills => self.skills.collect().len(),
            Section::Experience => self.experience.collect().len(),
            Section::Education => self.education.collect().len(),
            Section::Projects => self.projects.collect().len(),
            Section::Certifications => self.certifications.collect().len(),
            Section::Languages => self.languages.collect().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_present_entries_in_order() {
        let mut doc = Document::sample();
        doc.experience.insert(1, Experience::default());
        doc.certifications.push(Certification {
            issuer: "No name".to_string(),
            ..Default::default()
        });

        let collected = FormState::from_document(&doc).collect_all();
        assert_eq!(collected, doc.present_only());
        assert_eq!(collected.experience.len(), 2);
        assert_eq!(collected.experience[0].role, "Senior Frontend Developer");
        assert_eq!(collected.experience[1].role, "Full Stack Developer");
    }

    #[test]
    fn test_collect_is_idempotent() {
        let form = FormState::from_document(&Document::sample());
        assert_eq!(form.collect_all(), form.collect_all());
    }

    #[test]
    fn test_blank_entries_stay_in_form_but_not_in_document() {
        let mut form = FormState::default();
        form.experience.add(ExperienceForm::blank());
        assert_eq!(form.entry_count(Section::Experience), 1);
        assert_eq!(form.present_count(Section::Experience), 0);
        assert!(form.collect_all().experience.is_empty());
    }

    #[test]
    fn test_empty_bullet_list_gets_placeholder_bullet() {
        let entry = Experience {
            role: "Engineer".to_string(),
            ..Default::default()
        };
        let form = ExperienceForm::from(&entry);
        assert_eq!(form.bullets.len(), 1);
        assert!(form.snapshot().bullets.is_empty());
    }

    #[test]
    fn test_photo_cleared_when_inclusion_disabled() {
        let mut form = FormState::default();
        form.profile.set_include_photo(true);
        form.profile.photo = Some("data:image/png;base64,AAAA".to_string());
        assert!(form.collect_all().profile.photo.is_some());

        form.profile.set_include_photo(false);
        assert_eq!(form.profile.photo, None);
        assert_eq!(form.collect_all().profile.photo, None);
    }

    #[test]
    fn test_collect_into_touches_only_one_section() {
        let mut doc = Document::sample();
        let mut form = FormState::from_document(&doc);
        form.summary = "Changed".to_string();
        form.profile.name = "Someone Else".to_string();
        form.collect_into(Section::Summary, &mut doc);
        assert_eq!(doc.summary, "Changed");
        assert_eq!(doc.profile.name, "Alex Johnson");
    }

    #[test]
    fn test_language_rejects_unknown_proficiency() {
        let mut lang = Language::default();
        assert_eq!(
            lang.set_field("proficiency", "Elvish".to_string()),
            Err(FieldError::Invalid)
        );
        assert_eq!(lang.proficiency, Proficiency::Intermediate);
        assert!(lang.set_field("proficiency", "native".to_string()).is_ok());
        assert_eq!(lang.proficiency, Proficiency::Native);
    }

    #[test]
    fn test_unknown_field_is_refused() {
        let mut edu = Education::default();
        assert_eq!(
            edu.set_field("gpa", "4.0".to_string()),
            Err(FieldError::Unknown)
        );
    }

    #[test]
    fn test_project_tech_collects_in_order() {
        let mut form = ProjectForm::blank();
        form.name = "Thing".to_string();
        form.tech.add("Rust");
        form.tech.add("Axum");
        form.tech.add("Rust");
        assert_eq!(form.snapshot().tech, vec!["Rust".to_string(), "Axum".to_string()]);
    }
}
