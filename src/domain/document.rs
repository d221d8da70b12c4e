use super::{Education, Experience, Languages, PersonalInfo, Portfolio, Skills};

/// A complete curriculum vitae.
///
/// Identity and education are always present. The remaining sections hold
/// their empty value when the source omits them, so consumers never need to
/// check for absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvDocument {
    pub(crate) id: String,
    pub(crate) personal: PersonalInfo,
    pub(crate) education: Education,
    pub(crate) languages: Languages,
    pub(crate) experience: Experience,
    pub(crate) skills: Skills,
    pub(crate) portfolio: Portfolio,
}

impl CvDocument {
    /// Identifier used when the source does not label its `cv` block.
    pub const DEFAULT_ID: &'static str = "CV";

    /// The document identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity and contact details.
    #[must_use]
    pub const fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    /// Education entries.
    #[must_use]
    pub const fn education(&self) -> &Education {
        &self.education
    }

    /// Languages, possibly empty.
    #[must_use]
    pub const fn languages(&self) -> &Languages {
        &self.languages
    }

    /// Experience, possibly empty.
    #[must_use]
    pub const fn experience(&self) -> &Experience {
        &self.experience
    }

    /// Skills, possibly empty.
    #[must_use]
    pub const fn skills(&self) -> &Skills {
        &self.skills
    }

    /// Portfolio, possibly empty.
    #[must_use]
    pub const fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}
