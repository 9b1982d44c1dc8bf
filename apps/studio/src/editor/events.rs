//! UI events. Every widget interaction arrives as one `UiEvent` carrying
//! `(section, action, id)` and goes through `Synchronizer::dispatch`.

use serde::{Deserialize, Serialize};

use crate::collection::EntryId;
use crate::models::Section;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiEvent {
    pub section: Section,
    /// Target entry for entry-scoped actions; absent for section-level ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Add,
    Remove,
    MoveUp,
    MoveDown,
    Edit {
        field: String,
        value: String,
    },
    AddBullet {
        #[serde(default)]
        value: String,
    },
    EditBullet {
        bullet_id: EntryId,
        value: String,
    },
    RemoveBullet {
        bullet_id: EntryId,
    },
    MoveBulletUp {
        bullet_id: EntryId,
    },
    MoveBulletDown {
        bullet_id: EntryId,
    },
    AddTag {
        value: String,
    },
    RemoveTag {
        value: String,
    },
    ToggleTag {
        value: String,
    },
    IncludePhoto {
        enabled: bool,
    },
    SetPhoto {
        data: String,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Edit { .. } => "edit",
            Action::AddBullet { .. } => "add_bullet",
            Action::EditBullet { .. } => "edit_bullet",
            Action::RemoveBullet { .. } => "remove_bullet",
            Action::MoveBulletUp { .. } => "move_bullet_up",
            Action::MoveBulletDown { .. } => "move_bullet_down",
            Action::AddTag { .. } => "add_tag",
            Action::RemoveTag { .. } => "remove_tag",
            Action::ToggleTag { .. } => "toggle_tag",
            Action::IncludePhoto { .. } => "include_photo",
            Action::SetPhoto { .. } => "set_photo",
        }
    }
}

impl UiEvent {
    pub fn new(section: Section, action: Action) -> Self {
        Self {
            section,
            id: None,
            action,
        }
    }

    pub fn on(section: Section, id: EntryId, action: Action) -> Self {
        Self {
            section,
            id: Some(id),
            action,
        }
    }

    pub fn edit(section: Section, id: Option<EntryId>, field: &str, value: &str) -> Self {
        Self {
            section,
            id,
            action: Action::Edit {
                field: field.to_string(),
                value: value.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edit_event_deserializes_flat() {
        let id = EntryId::new();
        let event: UiEvent = serde_json::from_value(json!({
            "section": "experience",
            "id": id,
            "action": "edit",
            "field": "role",
            "value": "Engineer"
        }))
        .unwrap();
        assert_eq!(event, UiEvent::edit(Section::Experience, Some(id), "role", "Engineer"));
    }

    #[test]
    fn test_section_level_event_without_id() {
        let event: UiEvent = serde_json::from_value(json!({
            "section": "skills",
            "action": "add_tag",
            "value": "Rust"
        }))
        .unwrap();
        assert_eq!(event.id, None);
        assert_eq!(
            event.action,
            Action::AddTag {
                value: "Rust".to_string()
            }
        );
    }

    #[test]
    fn test_add_bullet_value_is_optional() {
        let event: UiEvent = serde_json::from_value(json!({
            "section": "projects",
            "id": EntryId::new(),
            "action": "add_bullet"
        }))
        .unwrap();
        assert_eq!(
            event.action,
            Action::AddBullet {
                value: String::new()
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<UiEvent, _> = serde_json::from_value(json!({
            "section": "skills",
            "action": "explode"
        }));
        assert!(result.is_err());
    }
}
