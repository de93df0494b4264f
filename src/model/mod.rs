//! Feature model: what the user selected for one generation request.

#[macro_use]
pub mod id_enum_macro;

pub mod feature_model;
pub mod ids;
pub mod variant;

pub use feature_model::{FeatureModel, FeatureModelBuilder, Topology};
pub use ids::{MicroProfileVersion, MicroprofileSpec, SupportedServer};
pub use variant::{ProjectRole, VariantSet, SECONDARY_INDICATOR};
