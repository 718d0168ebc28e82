pub mod review;
pub mod step_editor;
