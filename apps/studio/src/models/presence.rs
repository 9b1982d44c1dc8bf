//! Presence rule shared by every projection.
//!
//! An entry is rendered or exported only when its discriminating field(s)
//! are non-empty. Entries failing the rule stay in the editable state.

use crate::models::document::{
    Certification, Education, Experience, Language, Link, Project,
};

pub trait Presence {
    fn is_present(&self) -> bool;
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl Presence for str {
    fn is_present(&self) -> bool {
        filled(self)
    }
}

/// Bullets and tags.
impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl Presence for Link {
    fn is_present(&self) -> bool {
        filled(&self.label) && filled(&self.url)
    }
}

impl Presence for Experience {
    fn is_present(&self) -> bool {
        filled(&self.role) || filled(&self.company)
    }
}

impl Presence for Education {
    fn is_present(&self) -> bool {
        filled(&self.degree) || filled(&self.school)
    }
}

impl Presence for Project {
    fn is_present(&self) -> bool {
        filled(&self.name)
    }
}

impl Presence for Certification {
    fn is_present(&self) -> bool {
        filled(&self.name)
    }
}

impl Presence for Language {
    fn is_present(&self) -> bool {
        filled(&self.language)
    }
}
