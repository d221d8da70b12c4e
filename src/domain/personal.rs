use serde::Serialize;

/// Identity and contact details of the person the CV describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    /// Full name, as written in the source.
    #[serde(rename = "nombre")]
    pub full_name: String,

    /// Birth date. Kept as free text; the source format is not constrained.
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<String>,

    /// Short biography.
    pub bio: Option<String>,

    /// Reference to a photo (path or URL).
    #[serde(rename = "foto")]
    pub photo: Option<String>,

    /// Contact email address.
    pub email: String,

    /// Contact phone number, without enclosing parentheses.
    #[serde(rename = "telefono")]
    pub phone: String,

    /// Social and professional network handles.
    #[serde(rename = "redes")]
    pub networks: Networks,
}

/// Optional network handles listed under the contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Networks {
    /// `LinkedIn` handle or profile URL.
    pub linkedin: Option<String>,
    /// GitHub handle or profile URL.
    pub github: Option<String>,
    /// Personal website.
    pub web: Option<String>,
}

impl Networks {
    /// Returns `true` if no network handle was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.github.is_none() && self.web.is_none()
    }
}
