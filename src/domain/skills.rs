use serde::Serialize;

/// The skills section. Empty when the source has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Skills {
    /// Soft skills first, then hard skills, each in source order.
    #[serde(rename = "habilidades")]
    pub entries: Vec<SkillEntry>,
}

/// A named skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SkillRecord")]
pub struct SkillEntry {
    /// Skill name.
    pub name: String,
    /// Soft or hard, with the hard-only fields.
    pub kind: SkillKind,
}

/// Kind-specific part of a [`SkillEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillKind {
    /// Interpersonal skill. Carries no category or level.
    Soft,
    /// Technical skill.
    Hard {
        /// Grouping such as `Lenguajes` or `Bases de datos`.
        category: String,
        /// Proficiency level.
        level: String,
    },
}

impl SkillEntry {
    /// A soft skill.
    #[must_use]
    pub const fn soft(name: String) -> Self {
        Self {
            name,
            kind: SkillKind::Soft,
        }
    }

    /// A hard skill.
    #[must_use]
    pub const fn hard(name: String, category: String, level: String) -> Self {
        Self {
            name,
            kind: SkillKind::Hard { category, level },
        }
    }

    /// Whether this is a hard skill.
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        matches!(self.kind, SkillKind::Hard { .. })
    }
}

#[derive(Serialize)]
struct SkillRecord {
    nombre: String,
    tipo: &'static str,
    categoria: Option<String>,
    nivel: Option<String>,
}

impl From<SkillEntry> for SkillRecord {
    fn from(SkillEntry { name, kind }: SkillEntry) -> Self {
        match kind {
            SkillKind::Soft => Self {
                nombre: name,
                tipo: "soft",
                categoria: None,
                nivel: None,
            },
            SkillKind::Hard { category, level } => Self {
                nombre: name,
                tipo: "hard",
                categoria: Some(category),
                nivel: Some(level),
            },
        }
    }
}
