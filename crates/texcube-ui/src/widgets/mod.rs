pub mod container;
pub mod flex;
pub mod option_menu;
pub mod slider;
pub mod text;
