pub mod letter_grid;
pub mod menu;
pub mod progress_bar;
pub mod summary;
