pub mod details;
pub mod header;
pub mod notice;
pub mod step_box;
