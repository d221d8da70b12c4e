//! Plain-text curricula vitae
//!
//! A CV is written in a small block language, parsed by one of two
//! interchangeable [`Engine`]s, built into a [`CvDocument`] and serialized
//! into a [`Context`] that a template renderer consumes.
//!
//! ```
//! use cvlang::{Engine, QuoteHandling};
//!
//! let source = r#"
//! cv {
//!   datospersonales {
//!     nomyape: "Ana Pérez";
//!     contacto { email: ana@example.com; telefono: 600123123; }
//!   }
//!   formacion {
//!     oficial { titulo: "BSc"; expedidor: "Uni"; fecha: 2020; }
//!   }
//! }
//! "#;
//!
//! let context = Engine::Descent.context(source, QuoteHandling::Strip)?;
//! assert_eq!(context.get("datos").unwrap()["nombre"], "Ana Pérez");
//! # Ok::<(), cvlang::engine::Error>(())
//! ```

pub mod builder;
pub use builder::{BuildError, DocumentBuilder, QuoteHandling, Section};

pub mod domain;
pub use domain::CvDocument;

pub mod syntax;
pub use syntax::{Node, ParseTree, SyntaxError};

mod context;
pub use context::Context;

pub mod engine;
pub use engine::{Engine, parse, parse_with};

pub mod config;
pub use config::{Arguments, Config};
