mod naming_convention;

pub use naming_convention::{METADATA_FIELD_NAME, METADATA_TYPES, NamingConvention};
