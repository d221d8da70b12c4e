use serde::Serialize;

/// The portfolio section: projects and merits, kept apart. Empty when the
/// source has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Portfolio {
    /// Projects in source order.
    #[serde(rename = "proyectos")]
    pub projects: Vec<ProjectEntry>,
    /// Merits in source order.
    #[serde(rename = "meritos")]
    pub merits: Vec<MeritEntry>,
}

/// A project worth showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    /// Project name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// What the project is.
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Free-form category.
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    /// Technology tags, in source order.
    #[serde(rename = "tecnologias")]
    pub technologies: Vec<String>,
}

/// An award, publication or other distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeritEntry {
    /// Merit name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// What it was awarded for.
    #[serde(rename = "descripcion")]
    pub description: String,
}
