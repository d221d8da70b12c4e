use serde::Serialize;

/// A spoken language and the level certified for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    /// Language name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Proficiency level, e.g. `C1` or `Nativo`.
    #[serde(rename = "nivel")]
    pub level: String,
    /// Authority that issued the certificate, if any.
    #[serde(rename = "expedidor")]
    pub issuer: Option<String>,
}

/// The languages section. Empty when the source has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Languages {
    /// Entries in source order.
    #[serde(rename = "idiomas")]
    pub entries: Vec<LanguageEntry>,
}
