pub mod env;
pub mod path;
pub mod track;
