//! The Synchronizer: owns the editable field state, the Document and the
//! preview, and keeps them consistent.
//!
//! Every UI interaction goes through [`Synchronizer::dispatch`]. A successful
//! action is followed by a scoped cycle: the owning section is collected into
//! the Document and then re-projected into the preview. A refused action
//! leaves all three untouched.

pub mod events;
pub mod fields;
pub mod handlers;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::collection::{Collection, EntryId, TagCollection};
use crate::models::{Document, Section, SnapshotError};
use crate::render::{
    print_title, render_doc_tree, render_plain_text, text_export_filename, DocTree, Preview,
    Template,
};

pub use events::{Action, UiEvent};
pub use fields::{EditableEntry, ExperienceForm, FieldError, FormState, ProjectForm};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no {section} entry with id {id}")]
    UnknownEntry { section: Section, id: EntryId },

    #[error("this {0} action needs an entry id")]
    MissingId(Section),

    #[error("{section} has no field '{field}'")]
    UnknownField { section: Section, field: String },

    #[error("'{value}' is not a valid {field}")]
    InvalidValue { field: String, value: String },

    #[error("action '{action}' does not apply to {section}")]
    Unsupported {
        section: Section,
        action: &'static str,
    },

    #[error("photo inclusion is turned off")]
    PhotoDisabled,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub section: Section,
    pub action: &'static str,
    /// False for accepted no-ops such as moving the first entry up.
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<EntryId>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Effect {
    changed: bool,
    created: Option<EntryId>,
}

impl Effect {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            created: None,
        }
    }

    fn created(id: EntryId) -> Self {
        Self {
            changed: true,
            created: Some(id),
        }
    }
}

/// Handed to the print pipeline with the fully materialized preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintJob {
    pub title: String,
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextExport {
    pub filename: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Synchronizer {
    fields: FormState,
    document: Document,
    preview: Preview,
}

impl Synchronizer {
    pub fn new(document: Document, template: Template) -> Self {
        Self::with_date(document, template, Local::now().date_naive())
    }

    pub fn with_date(document: Document, template: Template, generated_on: NaiveDate) -> Self {
        let mut sync = Self {
            fields: FormState::default(),
            document: Document::default(),
            preview: Preview::new(template, generated_on),
        };
        sync.load(document);
        sync
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn fields(&self) -> &FormState {
        &self.fields
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn template(&self) -> Template {
        self.preview.template
    }

    /// Replaces all state with `document`, then runs a full cycle.
    pub fn load(&mut self, document: Document) {
        self.fields = FormState::from_document(&document);
        self.refresh();
        info!(
            experience = self.document.experience.len(),
            projects = self.document.projects.len(),
            "document loaded"
        );
    }

    /// Parses snapshot text or raw file bytes and loads it. On error nothing
    /// changes.
    pub fn load_snapshot(&mut self, snapshot: impl AsRef<[u8]>) -> Result<(), SnapshotError> {
        let document = Document::from_snapshot_bytes(snapshot.as_ref())?;
        self.load(document);
        Ok(())
    }

    /// Pretty JSON of the freshly collected Document.
    pub fn snapshot(&mut self) -> Result<String, serde_json::Error> {
        self.collect_all();
        self.document.to_snapshot()
    }

    pub fn collect_all(&mut self) -> &Document {
        self.document = self.fields.collect_all();
        &self.document
    }

    pub fn collect_section(&mut self, section: Section) {
        self.fields.collect_into(section, &mut self.document);
    }

    pub fn project_all(&mut self) {
        self.preview.project_all(&self.document);
    }

    pub fn project_section(&mut self, section: Section) {
        self.preview.project(&self.document, section);
    }

    /// Full collect followed by full projection.
    pub fn refresh(&mut self) {
        self.collect_all();
        self.project_all();
    }

    pub fn set_template(&mut self, template: Template) {
        self.preview.template = template;
        self.refresh();
        info!(%template, "template selected");
    }

    /// Flips preview visibility and returns the new state.
    pub fn toggle_preview(&mut self) -> bool {
        self.preview.visible = !self.preview.visible;
        if self.preview.visible {
            self.refresh();
        }
        self.preview.visible
    }

    /// Shows the preview, refreshes it, runs `host` on the print job and
    /// restores the previous visibility.
    pub fn print<F, R>(&mut self, host: F) -> R
    where
        F: FnOnce(&PrintJob) -> R,
    {
        let was_visible = self.preview.visible;
        self.preview.visible = true;
        self.refresh();

        let job = PrintJob {
            title: print_title(&self.document.profile.name),
            preview: self.preview.clone(),
        };
        let result = host(&job);

        self.preview.visible = was_visible;
        info!(title = %job.title, "print job handed off");
        result
    }

    pub fn export_text(&mut self) -> TextExport {
        self.collect_all();
        TextExport {
            filename: text_export_filename(&self.document.profile.name),
            body: render_plain_text(&self.document),
        }
    }

    pub fn document_tree(&mut self) -> DocTree {
        self.collect_all();
        render_doc_tree(&self.document, self.template())
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<DispatchOutcome, EditError> {
        let UiEvent {
            section,
            id,
            action,
        } = event;
        let name = action.name();
        debug!(%section, action = name, id = ?id, "dispatch");

        let effect = self.apply(section, id, action)?;
        self.collect_section(section);
        self.project_section(section);

        Ok(DispatchOutcome {
            section,
            action: name,
            changed: effect.changed,
            created: effect.created,
        })
    }

    fn apply(
        &mut self,
        section: Section,
        id: Option<EntryId>,
        action: Action,
    ) -> Result<Effect, EditError> {
        let fields = &mut self.fields;
        match section {
            Section::Profile => apply_profile(fields, action),
            Section::Summary => match action {
                Action::Edit { field, value } if field == "summary" => {
                    fields.summary = value;
                    Ok(Effect::changed(true))
                }
                Action::Edit { field, .. } => Err(EditError::UnknownField { section, field }),
                other => Err(unsupported(section, &other)),
            },
            Section::Skills => apply_tags(&mut fields.skills, section, id, action),
            Section::Links => apply_entry(
                &mut fields.links,
                section,
                id,
                action,
                Default::default,
                flat(section),
            ),
            Section::Education => apply_entry(
                &mut fields.education,
                section,
                id,
                action,
                Default::default,
                flat(section),
            ),
            Section::Certifications => apply_entry(
                &mut fields.certifications,
                section,
                id,
                action,
                Default::default,
                flat(section),
            ),
            Section::Languages => apply_entry(
                &mut fields.languages,
                section,
                id,
                action,
                Default::default,
                flat(section),
            ),
            Section::Experience => apply_entry(
                &mut fields.experience,
                section,
                id,
                action,
                ExperienceForm::blank,
                |entry: &mut ExperienceForm, action| {
                    apply_bullets(&mut entry.bullets, section, action)
                },
            ),
            Section::Projects => apply_entry(
                &mut fields.projects,
                section,
                id,
                action,
                ProjectForm::blank,
                |entry: &mut ProjectForm, action| match action {
                    Action::AddTag { .. } | Action::RemoveTag { .. } | Action::ToggleTag { .. } => {
                        apply_tag_value(&mut entry.tech, section, action)
                    }
                    other => apply_bullets(&mut entry.bullets, section, other),
                },
            ),
        }
    }
}

fn unsupported(section: Section, action: &Action) -> EditError {
    EditError::Unsupported {
        section,
        action: action.name(),
    }
}

fn require_id(section: Section, id: Option<EntryId>) -> Result<EntryId, EditError> {
    id.ok_or(EditError::MissingId(section))
}

fn field_error(section: Section, field: String, value: String, err: FieldError) -> EditError {
    match err {
        FieldError::Unknown => EditError::UnknownField { section, field },
        FieldError::Invalid => EditError::InvalidValue { field, value },
    }
}

/// Nested handler for sections whose entries have no inner lists.
fn flat<T>(section: Section) -> impl FnOnce(&mut T, Action) -> Result<Effect, EditError> {
    move |_, action| Err(unsupported(section, &action))
}

fn apply_profile(fields: &mut FormState, action: Action) -> Result<Effect, EditError> {
    let profile = &mut fields.profile;
    match action {
        Action::Edit { field, value } => {
            let rejected = value.clone();
            profile
                .set_field(&field, value)
                .map_err(|e| field_error(Section::Profile, field, rejected, e))?;
            Ok(Effect::changed(true))
        }
        Action::IncludePhoto { enabled } => {
            let changed = profile.include_photo != enabled;
            profile.set_include_photo(enabled);
            Ok(Effect::changed(changed))
        }
        Action::SetPhoto { data } => {
            if !profile.include_photo {
                return Err(EditError::PhotoDisabled);
            }
            profile.photo = (!data.trim().is_empty()).then_some(data);
            Ok(Effect::changed(true))
        }
        other => Err(unsupported(Section::Profile, &other)),
    }
}

/// Entry-level actions shared by every list section. Anything else is passed
/// to `nested` with the target entry.
fn apply_entry<T, F>(
    entries: &mut Collection<T>,
    section: Section,
    id: Option<EntryId>,
    action: Action,
    blank: fn() -> T,
    nested: F,
) -> Result<Effect, EditError>
where
    T: EditableEntry,
    F: FnOnce(&mut T, Action) -> Result<Effect, EditError>,
{
    match action {
        Action::Add => Ok(Effect::created(entries.add(blank()))),
        Action::Remove => {
            let id = require_id(section, id)?;
            Ok(Effect::changed(entries.remove(id).is_some()))
        }
        Action::MoveUp => Ok(Effect::changed(entries.move_up(require_id(section, id)?))),
        Action::MoveDown => Ok(Effect::changed(entries.move_down(require_id(section, id)?))),
        other => {
            let id = require_id(section, id)?;
            let entry = entries
                .get_mut(id)
                .ok_or(EditError::UnknownEntry { section, id })?;
            match other {
                Action::Edit { field, value } => {
                    let rejected = value.clone();
                    entry
                        .set_field(&field, value)
                        .map_err(|e| field_error(section, field, rejected, e))?;
                    Ok(Effect::changed(true))
                }
                other => nested(entry, other),
            }
        }
    }
}

fn apply_bullets(
    bullets: &mut Collection<String>,
    section: Section,
    action: Action,
) -> Result<Effect, EditError> {
    match action {
        Action::AddBullet { value } => Ok(Effect::created(bullets.add(value))),
        Action::EditBullet { bullet_id, value } => {
            let bullet = bullets.get_mut(bullet_id).ok_or(EditError::UnknownEntry {
                section,
                id: bullet_id,
            })?;
            *bullet = value;
            Ok(Effect::changed(true))
        }
        Action::RemoveBullet { bullet_id } => {
            Ok(Effect::changed(bullets.remove(bullet_id).is_some()))
        }
        Action::MoveBulletUp { bullet_id } => Ok(Effect::changed(bullets.move_up(bullet_id))),
        Action::MoveBulletDown { bullet_id } => Ok(Effect::changed(bullets.move_down(bullet_id))),
        other => Err(unsupported(section, &other)),
    }
}

/// Value-based tag actions. Adding a duplicate or blank tag is an accepted no-op.
fn apply_tag_value(
    tags: &mut TagCollection,
    section: Section,
    action: Action,
) -> Result<Effect, EditError> {
    match action {
        Action::AddTag { value } => Ok(match tags.add(&value) {
            Some(id) => Effect::created(id),
            None => Effect::changed(false),
        }),
        Action::RemoveTag { value } => Ok(Effect::changed(tags.remove_by_value(&value))),
        Action::ToggleTag { value } => {
            let before = tags.contains(&value);
            let after = tags.toggle(&value);
            Ok(Effect::changed(before != after))
        }
        other => Err(unsupported(section, &other)),
    }
}

fn apply_tags(
    tags: &mut TagCollection,
    section: Section,
    id: Option<EntryId>,
    action: Action,
) -> Result<Effect, EditError> {
    match action {
        Action::Remove => Ok(Effect::changed(tags.remove(require_id(section, id)?).is_some())),
        Action::MoveUp => Ok(Effect::changed(tags.move_up(require_id(section, id)?))),
        Action::MoveDown => Ok(Effect::changed(tags.move_down(require_id(section, id)?))),
        other => apply_tag_value(tags, section, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Experience, Proficiency};
    use crate::render::preview::PreviewItem;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn sample() -> Synchronizer {
        Synchronizer::with_date(Document::sample(), Template::Classic, today())
    }

    fn empty() -> Synchronizer {
        Synchronizer::with_date(Document::default(), Template::Classic, today())
    }

    fn entry_titles(sync: &Synchronizer, section: Section) -> Vec<String> {
        sync.preview()
            .section(section)
            .unwrap()
            .items
            .iter()
            .filter_map(|item| match item {
                PreviewItem::Entry { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_collect_after_load_preserves_present_entries() {
        let mut doc = Document::sample();
        doc.experience.push(Experience::default());
        let mut sync = Synchronizer::with_date(doc.clone(), Template::Classic, today());
        assert_eq!(sync.document(), &doc.present_only());
        assert_eq!(sync.collect_all(), &doc.present_only());
    }

    #[test]
    fn test_full_cycle_is_idempotent() {
        let mut sync = sample();
        let document = sync.document().clone();
        let preview = sync.preview().clone();
        sync.refresh();
        assert_eq!(sync.document(), &document);
        assert_eq!(sync.preview(), &preview);
    }

    #[test]
    fn test_add_then_edit_experience_reaches_preview() {
        let mut sync = empty();
        let outcome = sync
            .dispatch(UiEvent::new(Section::Experience, Action::Add))
            .unwrap();
        let id = outcome.created.unwrap();
        assert!(outcome.changed);
        // Blank entry stays in the form only.
        assert_eq!(sync.fields().entry_count(Section::Experience), 1);
        assert!(sync.document().experience.is_empty());
        assert!(!sync.preview().section(Section::Experience).unwrap().visible);

        sync.dispatch(UiEvent::edit(Section::Experience, Some(id), "role", "Engineer"))
            .unwrap();
        assert_eq!(sync.document().experience[0].role, "Engineer");
        assert_eq!(entry_titles(&sync, Section::Experience), vec!["Engineer"]);
    }

    #[test]
    fn test_move_reorders_document_and_preview() {
        let mut sync = sample();
        let ids = sync.fields().experience.ids();
        sync.dispatch(UiEvent::on(Section::Experience, ids[1], Action::MoveUp))
            .unwrap();
        assert_eq!(
            entry_titles(&sync, Section::Experience),
            vec!["Full Stack Developer", "Senior Frontend Developer"]
        );

        let outcome = sync
            .dispatch(UiEvent::on(Section::Experience, ids[1], Action::MoveUp))
            .unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn test_remove_absent_entry_is_a_no_op() {
        let mut sync = sample();
        let before = sync.document().clone();
        let outcome = sync
            .dispatch(UiEvent::on(Section::Education, EntryId::new(), Action::Remove))
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(sync.document(), &before);
    }

    #[test]
    fn test_edit_unknown_entry_leaves_state_untouched() {
        let mut sync = sample();
        let before = sync.clone();
        let missing = EntryId::new();
        let err = sync
            .dispatch(UiEvent::edit(Section::Links, Some(missing), "url", "x"))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::UnknownEntry {
                section: Section::Links,
                id: missing
            }
        );
        assert_eq!(sync.fields(), before.fields());
        assert_eq!(sync.document(), before.document());
    }

    #[test]
    fn test_unknown_field_and_invalid_value_are_refused() {
        let mut sync = sample();
        let id = sync.fields().languages.ids()[0];
        let err = sync
            .dispatch(UiEvent::edit(Section::Languages, Some(id), "dialect", "x"))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownField { .. }));

        let err = sync
            .dispatch(UiEvent::edit(Section::Languages, Some(id), "proficiency", "Elvish"))
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidValue { .. }));

        sync.dispatch(UiEvent::edit(Section::Languages, Some(id), "proficiency", "basic"))
            .unwrap();
        assert_eq!(sync.document().languages[0].proficiency, Proficiency::Basic);
    }

    #[test]
    fn test_action_not_valid_for_section() {
        let mut sync = sample();
        let err = sync
            .dispatch(UiEvent::new(Section::Summary, Action::Add))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::Unsupported {
                section: Section::Summary,
                action: "add"
            }
        );

        let id = sync.fields().certifications.ids()[0];
        let err = sync
            .dispatch(UiEvent::on(
                Section::Certifications,
                id,
                Action::AddBullet {
                    value: "x".to_string(),
                },
            ))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::Unsupported {
                section: Section::Certifications,
                action: "add_bullet"
            }
        );
    }

    #[test]
    fn test_entry_action_without_id() {
        let mut sync = sample();
        let err = sync
            .dispatch(UiEvent::new(Section::Projects, Action::Remove))
            .unwrap_err();
        assert_eq!(err, EditError::MissingId(Section::Projects));
    }

    #[test]
    fn test_duplicate_skill_is_a_no_op() {
        let mut sync = sample();
        let count = sync.document().skills.len();
        let outcome = sync
            .dispatch(UiEvent::new(
                Section::Skills,
                Action::AddTag {
                    value: "React".to_string(),
                },
            ))
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(sync.document().skills.len(), count);

        sync.dispatch(UiEvent::new(
            Section::Skills,
            Action::ToggleTag {
                value: "React".to_string(),
            },
        ))
        .unwrap();
        assert!(!sync.document().skills.contains(&"React".to_string()));
    }

    #[test]
    fn test_bullets_and_tech_inside_project() {
        let mut sync = empty();
        let id = sync
            .dispatch(UiEvent::new(Section::Projects, Action::Add))
            .unwrap()
            .created
            .unwrap();
        sync.dispatch(UiEvent::edit(Section::Projects, Some(id), "name", "Studio"))
            .unwrap();
        let blank_bullet = sync.fields().projects.get(id).unwrap().bullets.ids()[0];
        sync.dispatch(UiEvent::on(
            Section::Projects,
            id,
            Action::EditBullet {
                bullet_id: blank_bullet,
                value: "Shipped it".to_string(),
            },
        ))
        .unwrap();
        sync.dispatch(UiEvent::on(
            Section::Projects,
            id,
            Action::AddTag {
                value: "Rust".to_string(),
            },
        ))
        .unwrap();

        let project = &sync.document().projects[0];
        assert_eq!(project.bullets, vec!["Shipped it".to_string()]);
        assert_eq!(project.tech, vec!["Rust".to_string()]);

        sync.dispatch(UiEvent::on(Section::Projects, id, Action::Remove))
            .unwrap();
        assert!(sync.document().projects.is_empty());
        assert_eq!(sync.fields().entry_count(Section::Projects), 0);
    }

    #[test]
    fn test_photo_requires_inclusion() {
        let mut sync = empty();
        let photo = Action::SetPhoto {
            data: "data:image/png;base64,AAAA".to_string(),
        };
        assert_eq!(
            sync.dispatch(UiEvent::new(Section::Profile, photo.clone())),
            Err(EditError::PhotoDisabled)
        );

        sync.dispatch(UiEvent::new(
            Section::Profile,
            Action::IncludePhoto { enabled: true },
        ))
        .unwrap();
        sync.dispatch(UiEvent::new(Section::Profile, photo)).unwrap();
        assert!(sync.document().profile.photo.is_some());

        sync.dispatch(UiEvent::new(
            Section::Profile,
            Action::IncludePhoto { enabled: false },
        ))
        .unwrap();
        assert_eq!(sync.document().profile.photo, None);
    }

    #[test]
    fn test_print_restores_visibility() {
        let mut sync = sample();
        assert!(!sync.preview().visible);
        let title = sync.print(|job| {
            assert!(job.preview.visible);
            job.title.clone()
        });
        assert_eq!(title, "Alex Johnson - Resume");
        assert!(!sync.preview().visible);
    }

    #[test]
    fn test_toggle_preview() {
        let mut sync = empty();
        assert!(sync.toggle_preview());
        assert!(sync.preview().visible);
        assert!(!sync.toggle_preview());
    }

    #[test]
    fn test_malformed_snapshot_keeps_state() {
        let mut sync = sample();
        let before = sync.document().clone();
        assert!(sync.load_snapshot("{not json").is_err());
        assert!(sync.load_snapshot("[1, 2]").is_err());
        assert_eq!(sync.document(), &before);

        sync.load_snapshot(r#"{"profile": {"name": "Jane Doe"}, "skills": ["Go"]}"#)
            .unwrap();
        assert_eq!(sync.document().profile.name, "Jane Doe");
        assert!(sync.document().experience.is_empty());
    }

    #[test]
    fn test_text_export_uses_profile_name() {
        let mut sync = empty();
        sync.dispatch(UiEvent::edit(Section::Profile, None, "name", "Jane  Doe"))
            .unwrap();
        let export = sync.export_text();
        assert_eq!(export.filename, "Jane_Doe.txt");
        assert!(export.body.starts_with("Jane  Doe\n"));
    }

    #[test]
    fn test_template_switch_changes_tree_only() {
        let mut sync = sample();
        let document = sync.document().clone();
        sync.set_template(Template::Modern);
        assert_eq!(sync.template(), Template::Modern);
        assert_eq!(sync.document_tree().template, Template::Modern);
        assert_eq!(sync.document(), &document);
    }
}
