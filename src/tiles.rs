//! Tile Catalog
//!
//! Deterministic launcher contents and page slicing.

use crate::models::{Icon, Tile};

/// Number of cells in the launcher
pub const TOTAL_TILES: u32 = 100;

/// Cells shown per page
pub const TILES_PER_PAGE: usize = 10;

/// Fixed entries, by id
const PINNED: &[(u32, &str, &str, Icon)] = &[
    (1, "悟空时光器", "http://year.wukong.lol/", Icon::Hourglass),
    (2, "悟空倒计时", "https://react.wukong.lol/", Icon::Timer),
    (3, "悟空卡牌", "https://kapai.wukong.lol/", Icon::Command),
    (4, "悟空BNS提取", "https://www.kang.meme/bns", Icon::Command),
];

/// Icons cycled through by placeholder cells
const PLACEHOLDER_ICONS: [Icon; 5] = [
    Icon::Circle,
    Icon::Square,
    Icon::Triangle,
    Icon::Hexagon,
    Icon::Command,
];

/// Tile for a single id (1-based)
pub fn tile_for(id: u32) -> Tile {
    if let Some((_, name, link, icon)) = PINNED.iter().find(|(pinned, ..)| *pinned == id) {
        return Tile {
            id,
            name: name.to_string(),
            link: Some(link.to_string()),
            icon: *icon,
        };
    }

    let index = id.saturating_sub(1) as usize % PLACEHOLDER_ICONS.len();
    Tile {
        id,
        name: format!("App {:03}", id),
        link: None,
        icon: PLACEHOLDER_ICONS[index],
    }
}

/// Ordered list of tiles `1..=total`
pub fn tile_catalog(total: u32) -> Vec<Tile> {
    (1..=total).map(tile_for).collect()
}

/// Number of pages needed for `len` tiles
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Tiles on a 1-based page; empty when the page is out of range
pub fn page_slice(tiles: &[Tile], page: usize, per_page: usize) -> &[Tile] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= tiles.len() {
        return &[];
    }
    let end = (start + per_page).min(tiles.len());
    &tiles[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tiles: &[Tile]) -> Vec<u32> {
        tiles.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_catalog_has_hundred_ordered_tiles() {
        let tiles = tile_catalog(TOTAL_TILES);
        assert_eq!(tiles.len(), 100);
        assert_eq!(ids(&tiles), (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_first_tile_is_always_hourglass() {
        for _ in 0..3 {
            let first = &tile_catalog(TOTAL_TILES)[0];
            assert_eq!(first.id, 1);
            assert_eq!(first.name, "悟空时光器");
            assert_eq!(first.link.as_deref(), Some("http://year.wukong.lol/"));
            assert_eq!(first.icon, Icon::Hourglass);
        }
    }

    #[test]
    fn test_placeholder_rule() {
        let tile = tile_for(5);
        assert_eq!(tile.name, "App 005");
        assert!(!tile.is_link());
        assert_eq!(tile.icon, Icon::Command);

        assert_eq!(tile_for(6).icon, Icon::Circle);
        assert_eq!(tile_for(7).icon, Icon::Square);
        assert_eq!(tile_for(9).icon, Icon::Hexagon);
        assert_eq!(tile_for(10).icon, Icon::Command);
        assert_eq!(tile_for(100).name, "App 100");
        assert_eq!(tile_for(100).icon, Icon::Command);
    }

    #[test]
    fn test_pagination_of_hundred_tiles() {
        let tiles = tile_catalog(TOTAL_TILES);
        assert_eq!(page_count(tiles.len(), TILES_PER_PAGE), 10);
        assert_eq!(ids(page_slice(&tiles, 1, TILES_PER_PAGE)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(page_slice(&tiles, 10, TILES_PER_PAGE)), (91..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let tiles = tile_catalog(TOTAL_TILES);
        assert!(page_slice(&tiles, 0, TILES_PER_PAGE).is_empty());
        assert!(page_slice(&tiles, 11, TILES_PER_PAGE).is_empty());
        assert!(page_slice(&tiles, usize::MAX, TILES_PER_PAGE).is_empty());
    }

    #[test]
    fn test_partial_last_page() {
        let tiles = tile_catalog(23);
        assert_eq!(page_count(tiles.len(), TILES_PER_PAGE), 3);
        assert_eq!(ids(page_slice(&tiles, 3, TILES_PER_PAGE)), vec![21, 22, 23]);
    }
}
