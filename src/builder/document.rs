use tracing::{debug, instrument};

use super::{
    BuildError, QuoteHandling, Section,
    fields::{check_rules, extract_value},
    sections,
};
use crate::{
    domain::{CvDocument, Education, Experience, Languages, PersonalInfo, Portfolio, Skills},
    syntax::{Node, ParseTree},
};

/// Accumulates the sections of one document.
///
/// A builder is used for a single build: [`visit_cv`](Self::visit_cv) fills
/// it in and [`finish`](Self::finish) consumes it.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    quotes: QuoteHandling,
    id: Option<String>,
    personal: Option<PersonalInfo>,
    education: Option<Education>,
    languages: Languages,
    experience: Experience,
    skills: Skills,
    portfolio: Portfolio,
}

impl DocumentBuilder {
    /// Creates a builder that strips quotes from values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given quote handling.
    #[must_use]
    pub fn with_quotes(quotes: QuoteHandling) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    /// Builds every section present in `cv`.
    ///
    /// Identity and education are attempted unconditionally; if their subtree
    /// is absent the omission surfaces in [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownRule`] or [`BuildError::DuplicateRule`] if
    /// `cv` holds anything but the six sections, each at most once. Otherwise
    /// returns the first error raised by a section builder.
    pub fn visit_cv(&mut self, cv: &Node) -> Result<(), BuildError> {
        if cv.value().is_some() {
            self.id = Some(extract_value(cv, self.quotes)?);
        }
        check_rules(cv, None, &Section::ALL.map(Section::rule), &[])?;

        let quotes = self.quotes;
        for section in Section::ALL {
            let Some(node) = cv.child(section.rule()) else {
                debug!(%section, "section absent");
                continue;
            };
            match section {
                Section::Identity => {
                    self.personal = Some(sections::personal_info(node, quotes)?);
                }
                Section::Education => {
                    let education = sections::education(node, quotes)?;
                    debug!(%section, entries = education.items.len(), "section built");
                    self.education = Some(education);
                }
                Section::Languages => {
                    self.languages = sections::languages(node, quotes)?;
                    debug!(%section, entries = self.languages.entries.len(), "section built");
                }
                Section::Experience => {
                    self.experience = sections::experience(node, quotes)?;
                    debug!(%section, entries = self.experience.entries.len(), "section built");
                }
                Section::Skills => {
                    self.skills = sections::skills(node, quotes)?;
                    debug!(%section, entries = self.skills.entries.len(), "section built");
                }
                Section::Portfolio => {
                    self.portfolio = sections::portfolio(node, quotes)?;
                    debug!(
                        %section,
                        projects = self.portfolio.projects.len(),
                        merits = self.portfolio.merits.len(),
                        "section built"
                    );
                }
            }
        }

        Ok(())
    }

    /// Checks the mandatory sections and returns the document.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Incomplete`] naming identity or education if
    /// either was never built.
    pub fn finish(self) -> Result<CvDocument, BuildError> {
        let personal = self
            .personal
            .ok_or(BuildError::Incomplete(Section::Identity))?;
        let education = self
            .education
            .ok_or(BuildError::Incomplete(Section::Education))?;

        Ok(CvDocument {
            id: self.id.unwrap_or_else(|| CvDocument::DEFAULT_ID.to_owned()),
            personal,
            education,
            languages: self.languages,
            experience: self.experience,
            skills: self.skills,
            portfolio: self.portfolio,
        })
    }
}

/// Builds the first `cv` block of `tree`.
///
/// # Errors
///
/// Returns an error if a section is malformed or a mandatory section is
/// missing.
#[instrument(level = "debug", skip(tree))]
pub fn build(tree: &ParseTree, quotes: QuoteHandling) -> Result<CvDocument, BuildError> {
    let mut builder = DocumentBuilder::with_quotes(quotes);
    builder.visit_cv(tree.cv())?;
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::descent;

    const MINIMAL: &str = r#"
cv {
  datospersonales {
    nomyape: "Ana Pérez";
    contacto { email: "ana@example.com"; telefono: 600123123; }
  }
  formacion {
    oficial { titulo: "BSc"; expedidor: "Uni"; fecha: "2020"; }
  }
}
"#;

    fn build_str(source: &str) -> Result<CvDocument, BuildError> {
        build(&descent::parse(source).unwrap(), QuoteHandling::Strip)
    }

    #[test]
    fn minimal_document_has_empty_optional_sections() {
        let document = build_str(MINIMAL).unwrap();

        assert_eq!(document.id(), CvDocument::DEFAULT_ID);
        assert_eq!(document.personal().full_name, "Ana Pérez");
        assert_eq!(document.education().items.len(), 1);
        assert_eq!(document.languages(), &Languages::default());
        assert_eq!(document.experience(), &Experience::default());
        assert_eq!(document.skills(), &Skills::default());
        assert_eq!(document.portfolio(), &Portfolio::default());
    }

    #[test]
    fn label_supplies_the_document_id() {
        let source = MINIMAL.replacen("cv {", "cv \"ana-2024\" {", 1);
        assert_eq!(build_str(&source).unwrap().id(), "ana-2024");
    }

    #[test]
    fn building_twice_gives_equal_documents() {
        let tree = descent::parse(MINIMAL).unwrap();
        assert_eq!(
            build(&tree, QuoteHandling::Strip).unwrap(),
            build(&tree, QuoteHandling::Strip).unwrap()
        );
    }

    #[test]
    fn missing_education_names_formacion() {
        let source = r"
cv {
  datospersonales { nomyape: Ana; contacto { email: a@b.c; telefono: 1; } }
  idiomas { idioma Inglés { nivel: C1; } }
}";
        let error = build_str(source).unwrap_err();
        assert_eq!(error, BuildError::Incomplete(Section::Education));
        assert!(error.to_string().contains("formacion"));
    }

    #[test]
    fn missing_identity_names_datospersonales() {
        let source = "cv { formacion { } }";
        let error = build_str(source).unwrap_err();
        assert_eq!(error, BuildError::Incomplete(Section::Identity));
        assert!(error.to_string().contains("datospersonales"));
    }

    #[test]
    fn empty_education_section_is_allowed() {
        let source = "cv { datospersonales { nomyape: Ana; contacto { email: a@b.c; telefono: 1; } } formacion { } }";
        let document = build_str(source).unwrap();
        assert!(document.education().items.is_empty());
    }

    #[test]
    fn section_errors_propagate_unchanged() {
        let source = MINIMAL.replacen(
            "formacion {",
            "experiencia { laboral { horas: diez; } }\n  formacion {",
            1,
        );
        let error = build_str(&source).unwrap_err();
        assert!(matches!(error, BuildError::Numeric { field: "horas", .. }));
    }

    #[test]
    fn misspelled_section_is_rejected() {
        let source = MINIMAL.replacen(
            "formacion {",
            "experiencias { laboral { organizacion: Acme; horas: 40; } }\n  formacion {",
            1,
        );
        let error = build_str(&source).unwrap_err();
        assert_eq!(
            error,
            BuildError::UnknownRule {
                section: None,
                within: "cv".to_owned(),
                rule: "experiencias".to_owned(),
                line: 7,
            }
        );
    }

    #[test]
    fn repeated_section_is_rejected() {
        let source = MINIMAL.replacen(
            "formacion {",
            "idiomas { idioma Inglés { nivel: C1; } }\n  idiomas { idioma Francés { nivel: B1; } }\n  formacion {",
            1,
        );
        let error = build_str(&source).unwrap_err();
        assert!(matches!(
            error,
            BuildError::DuplicateRule { section: None, line: 8, first_line: 7, ref rule, .. }
                if rule == "idiomas"
        ));
    }

    #[test]
    fn only_the_first_cv_is_built() {
        let source = format!("{MINIMAL}\ncv \"second\" {{ }}");
        let document = build_str(&source).unwrap();
        assert_eq!(document.id(), CvDocument::DEFAULT_ID);
    }

    #[test]
    fn preserved_quotes_reach_the_document() {
        let tree = descent::parse(MINIMAL).unwrap();
        let document = build(&tree, QuoteHandling::Preserve).unwrap();
        assert_eq!(document.personal().full_name, "\"Ana Pérez\"");
    }
}
