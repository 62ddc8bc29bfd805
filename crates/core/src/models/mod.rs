pub mod enums;
pub mod version;
