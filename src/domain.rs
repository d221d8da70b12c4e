//! Domain model of a curriculum vitae.
//!
//! These are plain records. They are produced once by the
//! [`builder`](crate::builder) and then only read, either directly or through
//! their serialized [`Context`](crate::Context) form.

mod document;
pub use document::CvDocument;

/// Identity and contact details.
pub mod personal;
pub use personal::{Networks, PersonalInfo};

/// Formal and supplementary education.
pub mod education;
pub use education::{Education, EducationEntry, EducationKind};

mod languages;
pub use languages::{LanguageEntry, Languages};

/// Employment and volunteering history.
pub mod experience;
pub use experience::{Experience, ExperienceEntry, ExperienceKind};

mod skills;
pub use skills::{SkillEntry, SkillKind, Skills};

mod portfolio;
pub use portfolio::{MeritEntry, Portfolio, ProjectEntry};

/// Substitute used for an organization, role or institution the source
/// leaves out.
pub const PLACEHOLDER: &str = "—";
