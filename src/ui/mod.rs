pub mod theme;
pub mod timeline_grid;
pub mod toolbar;
