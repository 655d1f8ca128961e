pub mod progress_bar;
pub mod status_badge;
pub mod text_input;
