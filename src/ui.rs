mod menu;
mod prompt;
mod render;

pub use menu::run_menu;
