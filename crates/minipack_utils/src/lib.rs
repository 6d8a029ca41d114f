pub mod escape_regex;
pub mod indexmap;
pub mod parse_int;
pub mod path_ext;
