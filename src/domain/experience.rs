use serde::Serialize;

use super::PLACEHOLDER;

/// The experience section, employment entries first. Empty when the source
/// has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Experience {
    /// Entries in source order within each kind.
    #[serde(rename = "experiencias")]
    pub entries: Vec<ExperienceEntry>,
}

/// What sort of experience an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceKind {
    /// Paid work.
    #[serde(rename = "laboral")]
    Employment,
    /// Volunteering.
    #[serde(rename = "voluntariado")]
    Volunteering,
}

impl ExperienceKind {
    /// The source field that carries this kind's description.
    ///
    /// Both fields end up in [`ExperienceEntry::description`].
    #[must_use]
    pub const fn description_field(self) -> &'static str {
        match self {
            Self::Employment => "responsabilidades",
            Self::Volunteering => "descripcion",
        }
    }

    /// The keyword introducing an entry of this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Employment => "laboral",
            Self::Volunteering => "voluntariado",
        }
    }
}

/// A single employment or volunteering entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    /// The kind of experience.
    #[serde(rename = "tipo")]
    pub kind: ExperienceKind,
    /// Employer or organization, or [`PLACEHOLDER`].
    #[serde(rename = "organizacion")]
    pub organization: String,
    /// Role held, or [`PLACEHOLDER`].
    #[serde(rename = "puesto")]
    pub role: String,
    /// Hours dedicated, if stated.
    #[serde(rename = "horas")]
    pub hours: Option<u32>,
    /// Responsibilities (employment) or description (volunteering).
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

impl ExperienceEntry {
    /// An employment entry. Missing organization or role become
    /// [`PLACEHOLDER`].
    #[must_use]
    pub fn employment(organization: Option<String>, role: Option<String>) -> Self {
        Self::new(ExperienceKind::Employment, organization, role)
    }

    /// A volunteering entry. Missing organization or role become
    /// [`PLACEHOLDER`].
    #[must_use]
    pub fn volunteering(organization: Option<String>, role: Option<String>) -> Self {
        Self::new(ExperienceKind::Volunteering, organization, role)
    }

    fn new(kind: ExperienceKind, organization: Option<String>, role: Option<String>) -> Self {
        Self {
            kind,
            organization: organization.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            role: role.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            hours: None,
            description: None,
        }
    }

    /// Sets the hours.
    #[must_use]
    pub const fn with_hours(mut self, hours: Option<u32>) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_organization_and_role_use_placeholder() {
        let entry = ExperienceEntry::volunteering(None, None);
        assert_eq!(entry.organization, PLACEHOLDER);
        assert_eq!(entry.role, PLACEHOLDER);
        assert!(!entry.organization.is_empty());
    }

    #[test]
    fn serializes_kind_with_source_names() {
        let entry = ExperienceEntry::employment(Some("Acme".to_owned()), Some("Engineer".to_owned()))
            .with_hours(Some(40))
            .with_description(Some("Built systems".to_owned()));

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "tipo": "laboral",
                "organizacion": "Acme",
                "puesto": "Engineer",
                "horas": 40,
                "descripcion": "Built systems",
            })
        );
    }
}
