//! starterkit - MicroProfile project scaffolding with per-server addons
//!
//! A generation request selects a runtime, a MicroProfile version and a set
//! of specifications. The addon registered for the runtime renders the
//! project files from templates and adapts the Maven build descriptor of the
//! main project and, in a two-project setup, of the secondary project.
//!
//! # Example
//!
//! ```no_run
//! use starterkit::fs::RealFileSystem;
//! use starterkit::model::{MicroprofileSpec, SupportedServer, Topology};
//! use starterkit::{AddonRegistry, FeatureModel, Generator};
//! use std::sync::Arc;
//!
//! # fn example() -> starterkit::Result<()> {
//! let fs = Arc::new(RealFileSystem::new());
//! let generator = Generator::new(AddonRegistry::with_defaults(fs.clone(), None)?, fs);
//!
//! let model = FeatureModel::builder(SupportedServer::Quarkus, "/tmp/shop")
//!     .spec(MicroprofileSpec::JwtAuth)
//!     .topology(Topology::MainPlusSecondary)
//!     .build()?;
//!
//! let outcome = generator.run(model, None)?;
//! generator.write_descriptors(&outcome)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`model`]: feature model, identifiers and per-role variant sets
//! - [`addon`]: the addon contract, registry and the Quarkus addon
//! - [`descriptor`]: the Maven build descriptor and its `pom.xml` I/O
//! - [`template`]: template rendering
//! - [`fs`]: filesystem abstraction

pub mod addon;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod fs;
pub mod generate;
pub mod model;
pub mod template;
pub mod util;

pub use addon::{Addon, AddonRegistry, QuarkusAddon};
pub use config::{ConfigError, GenerationRequest, StarterConfig};
pub use descriptor::BuildDescriptor;
pub use error::{GenerationError, Result};
pub use generate::{GenerationOutcome, Generator};
pub use model::{FeatureModel, FeatureModelBuilder, Topology, VariantSet};
pub use template::{MiniJinjaEngine, TemplateEngine};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
