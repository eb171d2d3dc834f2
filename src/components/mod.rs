//! UI Components
//!
//! Leptos components for the launcher and the Time Fragments widget.

mod icon_view;
mod tile_card;
mod tile_grid;
mod paginator;
mod launcher;
mod theme_switcher;
mod view_nav;
mod sync_bar;
mod offline_banner;
mod fragments_panel;

pub use icon_view::IconView;
pub use tile_card::TileCard;
pub use tile_grid::TileGrid;
pub use paginator::Paginator;
pub use launcher::Launcher;
pub use theme_switcher::ThemeSwitcher;
pub use view_nav::ViewNav;
pub use sync_bar::SyncBar;
pub use offline_banner::OfflineBanner;
pub use fragments_panel::FragmentsPanel;
