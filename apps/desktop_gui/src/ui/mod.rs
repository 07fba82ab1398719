//! UI layer for the artwork viewer: app shell, artworks table, pager, and custom-select popup.

pub mod app;

pub use app::ArtworkViewerApp;
