pub mod placeholder;
pub mod populate;

pub use placeholder::{scan_placeholders, template_variables};
pub use populate::{
    PopulateConfig, Populator, populate_chat_template, populate_json_template,
    populate_string_template, populate_template, stringify_value,
};
