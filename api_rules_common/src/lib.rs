pub mod struct_tag;
pub mod types;
pub mod universe;

pub use struct_tag::StructTag;
pub use types::{Kind, Member, Name, Type};
pub use universe::TypeUniverse;
