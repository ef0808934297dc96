pub mod course;
pub mod detect;
