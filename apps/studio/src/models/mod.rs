pub mod document;
pub mod presence;
pub mod section;
pub mod snapshot;

pub use document::{
    Certification, Document, Education, Experience, Language, Link, Profile, Proficiency, Project,
};
pub use presence::Presence;
pub use section::Section;
pub use snapshot::SnapshotError;
