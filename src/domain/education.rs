use serde::Serialize;

use super::PLACEHOLDER;
use crate::builder::fields::unquote;

/// Date tokens which mark a supplementary entry as still ongoing.
///
/// Matching is exact against this set after the date is trimmed, unquoted and
/// lowercased, either as written or with internal separators removed.
pub const ONGOING_TOKENS: [&str; 3] = ["en_curso", "encurso", "en curso"];

/// Returns `true` if `date` is one of the [`ONGOING_TOKENS`].
///
/// ```
/// use cvlang::domain::education::is_ongoing;
///
/// assert!(is_ongoing("En Curso"));
/// assert!(is_ongoing(" EN-CURSO "));
/// assert!(is_ongoing("\"en curso\""));
/// assert!(!is_ongoing("2024"));
/// assert!(!is_ongoing("en curso desde 2023"));
/// ```
#[must_use]
pub fn is_ongoing(date: &str) -> bool {
    let lowered = unquote(date).to_lowercase();
    let compact: String = lowered
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '\t'))
        .collect();

    ONGOING_TOKENS.contains(&lowered.as_str()) || ONGOING_TOKENS.contains(&compact.as_str())
}

/// All education entries, formal entries first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Education {
    /// Entries in source order within each kind.
    pub items: Vec<EducationEntry>,
}

impl Education {
    /// Iterates over the formal entries.
    pub fn formal(&self) -> impl Iterator<Item = &EducationEntry> {
        self.items.iter().filter(|entry| entry.is_formal())
    }

    /// Iterates over the supplementary entries.
    pub fn supplementary(&self) -> impl Iterator<Item = &EducationEntry> {
        self.items.iter().filter(|entry| !entry.is_formal())
    }
}

/// A single education entry.
///
/// Entries are created through [`EducationEntry::formal`] or
/// [`EducationEntry::supplementary`]; the kind decides which fields are
/// mandatory and whether the entry can be in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "EducationRecord")]
pub struct EducationEntry {
    title: String,
    institution: String,
    description: Option<String>,
    achievements: Option<String>,
    kind: EducationKind,
}

/// Kind-specific part of an [`EducationEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationKind {
    /// Official, completed studies. Always dated.
    Formal {
        /// Completion date.
        date: String,
    },
    /// Courses, certificates and other complementary training.
    Supplementary {
        /// Date, if given.
        date: Option<String>,
        /// Whether the date is one of the [`ONGOING_TOKENS`].
        in_progress: bool,
    },
}

impl EducationEntry {
    /// A formal entry. Formal education is never in progress.
    #[must_use]
    pub const fn formal(title: String, institution: String, date: String) -> Self {
        Self {
            title,
            institution,
            description: None,
            achievements: None,
            kind: EducationKind::Formal { date },
        }
    }

    /// A supplementary entry.
    ///
    /// A missing institution becomes [`PLACEHOLDER`]. `in_progress` is derived
    /// from `date` here and never recomputed.
    #[must_use]
    pub fn supplementary(title: String, institution: Option<String>, date: Option<String>) -> Self {
        let in_progress = date.as_deref().is_some_and(is_ongoing);
        Self {
            title,
            institution: institution.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            description: None,
            achievements: None,
            kind: EducationKind::Supplementary { date, in_progress },
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the achievements.
    #[must_use]
    pub fn with_achievements(mut self, achievements: Option<String>) -> Self {
        self.achievements = achievements;
        self
    }

    /// The title obtained.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The issuing institution, or [`PLACEHOLDER`].
    #[must_use]
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Free-text achievements.
    #[must_use]
    pub fn achievements(&self) -> Option<&str> {
        self.achievements.as_deref()
    }

    /// The kind-specific fields.
    #[must_use]
    pub const fn kind(&self) -> &EducationKind {
        &self.kind
    }

    /// Whether this is a formal entry.
    #[must_use]
    pub const fn is_formal(&self) -> bool {
        matches!(self.kind, EducationKind::Formal { .. })
    }

    /// The date, as written in the source.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        match &self.kind {
            EducationKind::Formal { date } => Some(date),
            EducationKind::Supplementary { date, .. } => date.as_deref(),
        }
    }

    /// Whether the entry is still ongoing.
    #[must_use]
    pub const fn in_progress(&self) -> bool {
        match self.kind {
            EducationKind::Formal { .. } => false,
            EducationKind::Supplementary { in_progress, .. } => in_progress,
        }
    }
}

#[derive(Serialize)]
struct EducationRecord {
    titulo: String,
    institucion: String,
    tipo: &'static str,
    descripcion: Option<String>,
    logros: Option<String>,
    fecha: Option<String>,
    en_curso: bool,
}

impl From<EducationEntry> for EducationRecord {
    fn from(entry: EducationEntry) -> Self {
        let EducationEntry {
            title,
            institution,
            description,
            achievements,
            kind,
        } = entry;

        let (tipo, fecha, en_curso) = match kind {
            EducationKind::Formal { date } => ("oficial", Some(date), false),
            EducationKind::Supplementary { date, in_progress } => {
                ("complementaria", date, in_progress)
            }
        };

        Self {
            titulo: title,
            institucion: institution,
            tipo,
            descripcion: description,
            logros: achievements,
            fecha,
            en_curso,
        }
    }
}
