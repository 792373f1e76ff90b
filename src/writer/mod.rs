//! Document serialization back to the tag-value format.

mod tagvalue;

pub use tagvalue::{write_tag_value, write_tag_value_file, write_tag_value_string};
