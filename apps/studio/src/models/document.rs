//! The normalized, serializable resume.
//!
//! Every struct is `#[serde(default)]` so an older or partial snapshot
//! deserializes with empty values for whatever it lacks, and unknown keys are
//! ignored. The JSON shape is the saved snapshot format.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::presence::Presence;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub profile: Profile,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Data URL of the uploaded photo. Older saves store `""` for "no photo".
    #[serde(
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub link: String,
    pub tech: Vec<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub language: String,
    pub proficiency: Proficiency,
}

/// Fixed proficiency levels offered by the language picker.
///
/// Deserialization is lenient: matching ignores case and anything unknown
/// falls back to the default level rather than failing the whole load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    #[default]
    Intermediate,
    Basic,
}

impl Proficiency {
    pub const ALL: [Proficiency; 5] = [
        Proficiency::Native,
        Proficiency::Fluent,
        Proficiency::Advanced,
        Proficiency::Intermediate,
        Proficiency::Basic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
    }
}

impl From<String> for Proficiency {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl std::fmt::Display for Proficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl Document {
    /// A copy holding only what the renderers would show: present entries,
    /// present links, present bullets and trimmed tags.
    pub fn present_only(&self) -> Document {
        Document {
            profile: Profile {
                links: self.profile.links.iter().filter(|l| l.is_present()).cloned().collect(),
                ..self.profile.clone()
            },
            summary: self.summary.clone(),
            skills: self.skills.iter().filter(|s| s.is_present()).cloned().collect(),
            experience: self
                .experience
                .iter()
                .filter(|e| e.is_present())
                .map(|e| Experience {
                    bullets: present_lines(&e.bullets),
                    ..e.clone()
                })
                .collect(),
            education: self.education.iter().filter(|e| e.is_present()).cloned().collect(),
            projects: self
                .projects
                .iter()
                .filter(|p| p.is_present())
                .map(|p| Project {
                    bullets: present_lines(&p.bullets),
                    ..p.clone()
                })
                .collect(),
            certifications: self
                .certifications
                .iter()
                .filter(|c| c.is_present())
                .cloned()
                .collect(),
            languages: self.languages.iter().filter(|l| l.is_present()).cloned().collect(),
        }
    }

    /// Built-in demonstration resume used when nothing has been saved yet.
    pub fn sample() -> Self {
        Document {
            profile: Profile {
                name: "Alex Johnson".to_string(),
                title: "Full Stack Web Developer".to_string(),
                email: "alex@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "San Francisco, CA".to_string(),
                photo: None,
                links: vec![
                    Link {
                        label: "LinkedIn".to_string(),
                        url: "https://linkedin.com/in/alexjohnson".to_string(),
                    },
                    Link {
                        label: "GitHub".to_string(),
                        url: "https://github.com/alexjohnson".to_string(),
                    },
                ],
            },
            summary: "Dedicated Full Stack Web Developer with 5+ years of experience building \
                      responsive and user-friendly web applications. Specialized in modern \
                      JavaScript frameworks and backend technologies with a strong focus on \
                      clean, maintainable code and optimal user experience."
                .to_string(),
            skills: strings(&[
                "JavaScript",
                "React",
                "Node.js",
                "Express",
                "MongoDB",
                "HTML5/CSS3",
                "Git",
                "AWS",
                "Docker",
                "TypeScript",
            ]),
            experience: vec![
                Experience {
                    role: "Senior Frontend Developer".to_string(),
                    company: "TechCorp Inc.".to_string(),
                    location: "San Francisco, CA".to_string(),
                    start: "Jan 2022".to_string(),
                    end: "Present".to_string(),
                    bullets: strings(&[
                        "Led development of a React-based dashboard that increased user engagement by 35%",
                        "Optimized frontend performance, reducing load times by 40% and improving core web vitals",
                        "Mentored junior developers and implemented code review best practices",
                    ]),
                },
                Experience {
                    role: "Full Stack Developer".to_string(),
                    company: "InnoSoft Solutions".to_string(),
                    location: "Oakland, CA".to_string(),
                    start: "Mar 2019".to_string(),
                    end: "Dec 2021".to_string(),
                    bullets: strings(&[
                        "Developed and maintained multiple client-facing applications using the MERN stack",
                        "Implemented authentication system using JWT, reducing security incidents by 90%",
                        "Collaborated with UI/UX designers to implement responsive designs across all platforms",
                    ]),
                },
            ],
            education: vec![Education {
                degree: "Bachelor of Science in Computer Science".to_string(),
                school: "University of California".to_string(),
                location: "Berkeley, CA".to_string(),
                start: "Aug 2015".to_string(),
                end: "May 2019".to_string(),
                details: "GPA: 3.8/4.0, Dean's List, Computer Science Student Association"
                    .to_string(),
            }],
            projects: vec![Project {
                name: "E-commerce Platform".to_string(),
                link: "https://github.com/alexjohnson/ecommerce-platform".to_string(),
                tech: strings(&["React", "Node.js", "MongoDB", "Stripe API"]),
                bullets: strings(&[
                    "Built a full-featured e-commerce platform with user authentication and payment processing",
                    "Implemented responsive design principles to ensure compatibility across devices",
                    "Integrated with Stripe for payment processing and AWS S3 for image storage",
                ]),
            }],
            certifications: vec![
                Certification {
                    name: "AWS Certified Developer".to_string(),
                    issuer: "Amazon Web Services".to_string(),
                    year: "2021".to_string(),
                },
                Certification {
                    name: "MongoDB Certified Developer".to_string(),
                    issuer: "MongoDB Inc.".to_string(),
                    year: "2020".to_string(),
                },
            ],
            languages: vec![
                Language {
                    language: "English".to_string(),
                    proficiency: Proficiency::Native,
                },
                Language {
                    language: "Spanish".to_string(),
                    proficiency: Proficiency::Intermediate,
                },
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn present_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_with_snapshot_keys() {
        let value = serde_json::to_value(Document::default()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in [
            "profile",
            "summary",
            "skills",
            "experience",
            "education",
            "projects",
            "certifications",
            "languages",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
    }

    #[test]
    fn test_empty_photo_string_reads_as_none() {
        let profile: Profile = serde_json::from_str(r#"{"name":"A","photo":""}"#).unwrap();
        assert_eq!(profile.photo, None);
        assert_eq!(profile.name, "A");
    }

    #[test]
    fn test_proficiency_parsing_is_lenient() {
        let lang: Language =
            serde_json::from_str(r#"{"language":"French","proficiency":"fluent"}"#).unwrap();
        assert_eq!(lang.proficiency, Proficiency::Fluent);

        let lang: Language =
            serde_json::from_str(r#"{"language":"Latin","proficiency":"Conversational"}"#)
                .unwrap();
        assert_eq!(lang.proficiency, Proficiency::Intermediate);
    }

    #[test]
    fn test_proficiency_serializes_as_word() {
        let json = serde_json::to_string(&Proficiency::Native).unwrap();
        assert_eq!(json, "\"Native\"");
    }

    #[test]
    fn test_present_only_drops_blank_entries_and_bullets() {
        let doc = Document {
            experience: vec![
                Experience {
                    role: "Engineer".to_string(),
                    bullets: vec!["  Shipped it  ".to_string(), "   ".to_string()],
                    ..Default::default()
                },
                Experience::default(),
            ],
            certifications: vec![Certification {
                issuer: "Nobody".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let present = doc.present_only();
        assert_eq!(present.experience.len(), 1);
        assert_eq!(present.experience[0].bullets, vec!["Shipped it".to_string()]);
        assert!(present.certifications.is_empty());
    }

    #[test]
    fn test_sample_is_fully_present() {
        let sample = Document::sample();
        assert_eq!(sample.present_only(), sample);
    }
}
