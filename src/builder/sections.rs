//! One builder per section. Each receives the section's subtree.

use tracing::trace;

use super::{
    BuildError, Section,
    fields::{Fields, QuoteHandling, extract_value, split_technologies},
};
use crate::{
    domain::{
        Education, EducationEntry, Experience, ExperienceEntry, ExperienceKind, LanguageEntry,
        Languages, MeritEntry, Networks, PersonalInfo, Portfolio, ProjectEntry, SkillEntry, Skills,
    },
    syntax::Node,
};

const EDUCATION_FIELDS: [&str; 5] = ["titulo", "expedidor", "fecha", "descripcion", "logros"];

pub(crate) fn personal_info(node: &Node, quotes: QuoteHandling) -> Result<PersonalInfo, BuildError> {
    let fields = Fields::new(node, Section::Identity, quotes);
    fields.only(&["nomyape", "fecha", "bio", "foto", "contacto"], &[])?;
    let full_name = fields.required("nomyape")?;
    let birth_date = fields.optional("fecha")?;
    let bio = fields.optional("bio")?;
    let photo = fields.optional("foto")?;

    let contact_node = fields.node("contacto")?;
    let contact = fields.of(contact_node);
    contact.only(&["email", "telefono", "redes"], &[])?;
    let email = contact.required("email")?;
    let phone = normalize_phone(&contact.required("telefono")?);

    let networks = match contact_node.child("redes") {
        Some(redes) => {
            let redes = fields.of(redes);
            redes.only(&["linkedin", "github", "web"], &[])?;
            Networks {
                linkedin: redes.optional("linkedin")?,
                github: redes.optional("github")?,
                web: redes.optional("web")?,
            }
        }
        None => Networks::default(),
    };

    Ok(PersonalInfo {
        full_name,
        birth_date,
        bio,
        photo,
        email,
        phone,
        networks,
    })
}

/// Removes the enclosing parentheses some sources put around the number.
fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim()
        .to_owned()
}

pub(crate) fn education(node: &Node, quotes: QuoteHandling) -> Result<Education, BuildError> {
    let fields = Fields::new(node, Section::Education, quotes);
    fields.only(&[], &["oficial", "complementaria"])?;
    let mut items = Vec::new();

    for formal in node.children("oficial") {
        let entry = fields.of(formal);
        entry.only(&EDUCATION_FIELDS, &[])?;
        items.push(
            EducationEntry::formal(
                entry.required("titulo")?,
                entry.required("expedidor")?,
                entry.required("fecha")?,
            )
            .with_description(entry.optional("descripcion")?)
            .with_achievements(entry.optional("logros")?),
        );
    }

    for supplementary in node.children("complementaria") {
        let entry = fields.of(supplementary);
        entry.only(&EDUCATION_FIELDS, &[])?;
        let item = EducationEntry::supplementary(
            entry.required("titulo")?,
            entry.optional("expedidor")?,
            entry.optional("fecha")?,
        )
        .with_description(entry.optional("descripcion")?)
        .with_achievements(entry.optional("logros")?);
        trace!(title = item.title(), in_progress = item.in_progress(), "supplementary entry");
        items.push(item);
    }

    Ok(Education { items })
}

pub(crate) fn languages(node: &Node, quotes: QuoteHandling) -> Result<Languages, BuildError> {
    let fields = Fields::new(node, Section::Languages, quotes);
    fields.only(&[], &["idioma"])?;

    let entries = node
        .children("idioma")
        .map(|language| -> Result<_, BuildError> {
            let entry = fields.of(language);
            entry.only(&["nombre", "nivel", "expedidor"], &[])?;
            let name = match entry.label()? {
                Some(name) => name,
                None => entry.required("nombre")?,
            };
            Ok(LanguageEntry {
                name,
                level: entry.required("nivel")?,
                issuer: entry.optional("expedidor")?,
            })
        })
        .collect::<Result<_, BuildError>>()?;

    Ok(Languages { entries })
}

pub(crate) fn experience(node: &Node, quotes: QuoteHandling) -> Result<Experience, BuildError> {
    let fields = Fields::new(node, Section::Experience, quotes);
    fields.only(&[], &["laboral", "voluntariado"])?;
    let mut entries = Vec::new();

    for kind in [ExperienceKind::Employment, ExperienceKind::Volunteering] {
        for item in node.children(kind.keyword()) {
            let item = fields.of(item);
            item.only(
                &["organizacion", "puesto", "horas", kind.description_field()],
                &[],
            )?;
            let organization = item.optional("organizacion")?;
            let role = item.optional("puesto")?;
            let entry = match kind {
                ExperienceKind::Employment => ExperienceEntry::employment(organization, role),
                ExperienceKind::Volunteering => ExperienceEntry::volunteering(organization, role),
            };
            entries.push(
                entry
                    .with_hours(item.number("horas")?)
                    .with_description(item.optional(kind.description_field())?),
            );
        }
    }

    Ok(Experience { entries })
}

pub(crate) fn skills(node: &Node, quotes: QuoteHandling) -> Result<Skills, BuildError> {
    let fields = Fields::new(node, Section::Skills, quotes);
    fields.only(&[], &["soft", "hard"])?;
    let mut entries = Vec::new();

    for group in node.children("soft") {
        fields.of(group).only(&[], &["habilidad"])?;
        for skill in group.children("habilidad") {
            entries.push(SkillEntry::soft(extract_value(skill, fields.quotes())?));
        }
    }

    for group in node.children("hard") {
        fields.of(group).only(&[], &["item"])?;
        for item in group.children("item") {
            let item = fields.of(item);
            item.only(&["nombre", "categoria", "nivel"], &[])?;
            entries.push(SkillEntry::hard(
                item.required("nombre")?,
                item.required("categoria")?,
                item.required("nivel")?,
            ));
        }
    }

    Ok(Skills { entries })
}

pub(crate) fn portfolio(node: &Node, quotes: QuoteHandling) -> Result<Portfolio, BuildError> {
    let fields = Fields::new(node, Section::Portfolio, quotes);
    fields.only(&[], &["proyecto", "merito"])?;

    let projects = node
        .children("proyecto")
        .map(|project| -> Result<_, BuildError> {
            let project = fields.of(project);
            project.only(&["nombre", "descripcion", "categoria", "tecnologias"], &[])?;
            Ok(ProjectEntry {
                name: project.required("nombre")?,
                description: project.required("descripcion")?,
                category: Some(project.required("categoria")?),
                technologies: split_technologies(&project.required("tecnologias")?),
            })
        })
        .collect::<Result<_, BuildError>>()?;

    let merits = node
        .children("merito")
        .map(|merit| -> Result<_, BuildError> {
            let merit = fields.of(merit);
            merit.only(&["nombre", "descripcion"], &[])?;
            Ok(MeritEntry {
                name: merit.required("nombre")?,
                description: merit.required("descripcion")?,
            })
        })
        .collect::<Result<_, BuildError>>()?;

    Ok(Portfolio { projects, merits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::PLACEHOLDER, syntax::descent};

    /// Parses `body` inside a `cv` block and returns the `section` subtree.
    fn section(body: &str, section: &str) -> Node {
        let tree = descent::parse(&format!("cv {{ {body} }}")).unwrap();
        tree.cv().child(section).unwrap().clone()
    }

    #[test]
    fn personal_info_reads_optional_fields_and_networks() {
        let node = section(
            r#"datospersonales {
                nomyape: "Ana Pérez";
                fecha: "1990-04-12";
                foto: "img/ana.png";
                contacto {
                    email: "ana@example.com";
                    telefono: (600123123);
                    redes { github: "anap"; web: "https://ana.dev"; }
                }
            }"#,
            "datospersonales",
        );

        let info = personal_info(&node, QuoteHandling::Strip).unwrap();

        assert_eq!(info.full_name, "Ana Pérez");
        assert_eq!(info.birth_date.as_deref(), Some("1990-04-12"));
        assert_eq!(info.bio, None);
        assert_eq!(info.photo.as_deref(), Some("img/ana.png"));
        assert_eq!(info.phone, "600123123");
        assert_eq!(info.networks.linkedin, None);
        assert_eq!(info.networks.github.as_deref(), Some("anap"));
        assert_eq!(info.networks.web.as_deref(), Some("https://ana.dev"));
    }

    #[test]
    fn personal_info_without_networks() {
        let node = section(
            "datospersonales { nomyape: Ana; contacto { email: a@b.c; telefono: 600123123; } }",
            "datospersonales",
        );
        let info = personal_info(&node, QuoteHandling::Strip).unwrap();
        assert!(info.networks.is_empty());
        assert_eq!(info.phone, "600123123");
    }

    #[test]
    fn personal_info_requires_contact_details() {
        let node = section(
            "datospersonales { nomyape: Ana; contacto { email: a@b.c; } }",
            "datospersonales",
        );
        let error = personal_info(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(
            error,
            BuildError::MissingField {
                section: Section::Identity,
                field: "telefono",
                ..
            }
        ));

        let node = section("datospersonales { nomyape: Ana; }", "datospersonales");
        let error = personal_info(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(
            error,
            BuildError::MissingField {
                field: "contacto",
                ..
            }
        ));
    }

    #[test]
    fn education_lists_formal_entries_first() {
        let node = section(
            r#"formacion {
                complementaria { titulo: "Rust"; fecha: "en curso"; }
                oficial { titulo: "BSc"; expedidor: "Uni"; fecha: "2020"; logros: "Honours"; }
                complementaria { titulo: "Go"; expedidor: "Academy"; fecha: "2019"; }
                oficial { titulo: "MSc"; expedidor: "Uni"; fecha: "2022"; }
            }"#,
            "formacion",
        );

        let education = education(&node, QuoteHandling::Strip).unwrap();
        let titles: Vec<_> = education.items.iter().map(EducationEntry::title).collect();
        assert_eq!(titles, ["BSc", "MSc", "Rust", "Go"]);

        let [bsc, msc, rust, go] = education.items.as_slice() else {
            panic!("expected four entries");
        };
        assert_eq!(bsc.achievements(), Some("Honours"));
        assert!(!bsc.in_progress() && !msc.in_progress());
        assert!(rust.in_progress());
        assert_eq!(rust.institution(), PLACEHOLDER);
        assert!(!go.in_progress());
        assert_eq!(go.institution(), "Academy");
    }

    #[test]
    fn quoted_ongoing_date_is_recognised_when_quotes_are_kept() {
        let node = section(
            r#"formacion { complementaria { titulo: "Rust"; fecha: "en curso"; } }"#,
            "formacion",
        );

        let education = education(&node, QuoteHandling::Preserve).unwrap();
        let [rust] = education.items.as_slice() else {
            panic!("expected one entry");
        };
        assert!(rust.in_progress());
        assert_eq!(rust.date(), Some("\"en curso\""));
    }

    #[test]
    fn formal_entry_requires_date() {
        let node = section(
            "formacion { oficial { titulo: BSc; expedidor: Uni; } }",
            "formacion",
        );
        let error = education(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(
            error,
            BuildError::MissingField {
                section: Section::Education,
                field: "fecha",
                ..
            }
        ));
    }

    #[test]
    fn languages_take_name_from_label_or_field() {
        let node = section(
            r#"idiomas {
                idioma "Inglés" { nivel: "C1"; expedidor: "Cambridge"; }
                idioma { nombre: "Francés"; nivel: "B1"; }
            }"#,
            "idiomas",
        );

        let languages = languages(&node, QuoteHandling::Strip).unwrap();
        assert_eq!(
            languages.entries,
            [
                LanguageEntry {
                    name: "Inglés".to_owned(),
                    level: "C1".to_owned(),
                    issuer: Some("Cambridge".to_owned()),
                },
                LanguageEntry {
                    name: "Francés".to_owned(),
                    level: "B1".to_owned(),
                    issuer: None,
                },
            ]
        );
    }

    #[test]
    fn experience_normalizes_description_and_placeholders() {
        let node = section(
            r#"experiencia {
                voluntariado { organizacion: "Cruz Roja"; horas: 5; descripcion: "Logística"; }
                laboral { organizacion: "Acme"; puesto: "Engineer"; horas: 40; responsabilidades: "Built systems"; }
                laboral { puesto: "Freelance"; }
            }"#,
            "experiencia",
        );

        let experience = experience(&node, QuoteHandling::Strip).unwrap();
        let [acme, freelance, volunteer] = experience.entries.as_slice() else {
            panic!("expected three entries");
        };

        assert_eq!(acme.kind, ExperienceKind::Employment);
        assert_eq!(acme.hours, Some(40));
        assert_eq!(acme.description.as_deref(), Some("Built systems"));

        assert_eq!(freelance.organization, PLACEHOLDER);
        assert_eq!(freelance.role, "Freelance");
        assert_eq!(freelance.hours, None);

        assert_eq!(volunteer.kind, ExperienceKind::Volunteering);
        assert_eq!(volunteer.role, PLACEHOLDER);
        assert_eq!(volunteer.description.as_deref(), Some("Logística"));
    }

    #[test]
    fn experience_rejects_the_other_kinds_description_field() {
        let node = section(
            "experiencia {\n laboral { descripcion: x; }\n}",
            "experiencia",
        );
        let error = experience(&node, QuoteHandling::Strip).unwrap_err();
        assert_eq!(
            error,
            BuildError::UnknownRule {
                section: Some(Section::Experience),
                within: "laboral".to_owned(),
                rule: "descripcion".to_owned(),
                line: 2,
            }
        );

        let node = section(
            "experiencia { voluntariado { responsabilidades: y; } }",
            "experiencia",
        );
        assert!(matches!(
            experience(&node, QuoteHandling::Strip),
            Err(BuildError::UnknownRule { ref rule, .. }) if rule == "responsabilidades"
        ));
    }

    #[test]
    fn misspelled_field_is_not_silently_dropped() {
        let node = section(
            "experiencia { laboral { organizacon: Acme; horas: 40; } }",
            "experiencia",
        );
        let error = experience(&node, QuoteHandling::Strip).unwrap_err();
        assert!(error.to_string().contains("unknown rule `organizacon` in `laboral`"));
    }

    #[test]
    fn repeated_single_field_is_rejected() {
        let node = section(
            "idiomas { idioma Inglés {\n nivel: C1;\n nivel: B2;\n } }",
            "idiomas",
        );
        assert_eq!(
            languages(&node, QuoteHandling::Strip),
            Err(BuildError::DuplicateRule {
                section: Some(Section::Languages),
                within: "idioma".to_owned(),
                rule: "nivel".to_owned(),
                line: 3,
                first_line: 2,
            })
        );
    }

    #[test]
    fn unknown_record_inside_a_section_is_rejected() {
        let node = section("habilidades { blandas { habilidad: x; } }", "habilidades");
        assert!(matches!(
            skills(&node, QuoteHandling::Strip),
            Err(BuildError::UnknownRule { section: Some(Section::Skills), ref rule, .. }) if rule == "blandas"
        ));
    }

    #[test]
    fn non_numeric_hours_fail() {
        let node = section(
            "experiencia { laboral { organizacion: Acme; horas: muchas; } }",
            "experiencia",
        );
        let error = experience(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(error, BuildError::Numeric { field: "horas", .. }));
    }

    #[test]
    fn skills_keep_soft_then_hard() {
        let node = section(
            r#"habilidades {
                hard { item { nombre: "Rust"; categoria: "Lenguajes"; nivel: "Avanzado"; } }
                soft { habilidad: "Liderazgo"; habilidad: "Comunicación"; }
                soft { habilidad: "Empatía"; }
            }"#,
            "habilidades",
        );

        let skills = skills(&node, QuoteHandling::Strip).unwrap();
        let names: Vec<_> = skills.entries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Liderazgo", "Comunicación", "Empatía", "Rust"]);
        assert!(skills.entries[3].is_hard());
        assert!(!skills.entries[0].is_hard());
    }

    #[test]
    fn hard_skill_requires_level() {
        let node = section(
            "habilidades { hard { item { nombre: Rust; categoria: Lenguajes; } } }",
            "habilidades",
        );
        let error = skills(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(
            error,
            BuildError::MissingField {
                section: Section::Skills,
                field: "nivel",
                ..
            }
        ));
    }

    #[test]
    fn portfolio_keeps_projects_and_merits_apart() {
        let node = section(
            r#"portafolio {
                proyecto { nombre: "cvlang"; descripcion: "CV compiler"; categoria: "Tooling"; tecnologias: "Rust, serde"; }
                merito { nombre: "Hackathon"; descripcion: "First place"; }
                proyecto { nombre: "site"; descripcion: "Web"; categoria: "Web"; tecnologias: "HTML CSS"; }
            }"#,
            "portafolio",
        );

        let portfolio = portfolio(&node, QuoteHandling::Strip).unwrap();
        assert_eq!(portfolio.projects.len(), 2);
        assert_eq!(portfolio.projects[0].technologies, ["Rust", "serde"]);
        assert_eq!(portfolio.projects[1].technologies, ["HTML", "CSS"]);
        assert_eq!(portfolio.projects[1].category.as_deref(), Some("Web"));
        assert_eq!(
            portfolio.merits,
            [MeritEntry {
                name: "Hackathon".to_owned(),
                description: "First place".to_owned(),
            }]
        );
    }

    #[test]
    fn project_requires_category() {
        let node = section(
            "portafolio { proyecto { nombre: a; descripcion: b; tecnologias: c; } }",
            "portafolio",
        );
        let error = portfolio(&node, QuoteHandling::Strip).unwrap_err();
        assert!(matches!(
            error,
            BuildError::MissingField {
                section: Section::Portfolio,
                field: "categoria",
                ..
            }
        ));
    }
}
