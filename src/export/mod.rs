//! Output generation: XML serialization and profile stubs

pub mod profile;
pub mod xml;

pub use profile::{Profile, build_profiles};
pub use xml::to_xml_string;
