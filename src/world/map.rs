//! Procedural island map
//!
//! The world is a row-major grid of tiles several screens wide. Generation:
//! 1. Every tile starts as water
//! 2. 2-4 islands are raised around random centers; each tile inside an
//!    island's noisy coastline becomes grass/forest (core) or sand (beach),
//!    and 5% of those flip to rock
//! 3. About 1% of the grid is probed for stray rocks out at sea
//!
//! There is no connectivity guarantee and a map may end up with no walkable
//! tile at all; `try_valid_position` reports that, `get_valid_position`
//! degrades to the map center.

use macroquad::math::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use super::tile::{Tile, TileKind};

/// Generation constants
pub mod params {
    /// Number of islands raised per map (inclusive range)
    pub const MIN_ISLANDS: usize = 2;
    pub const MAX_ISLANDS: usize = 4;
    /// Island radius is min(columns, rows) divided by a value in this range
    pub const MIN_RADIUS_DIVISOR: usize = 4;
    pub const MAX_RADIUS_DIVISOR: usize = 6;
    /// Fraction of the radius that is grass/forest instead of beach
    pub const CORE_FRACTION: f32 = 0.5;
    /// Base coastline as a fraction of the radius, before noise
    pub const COAST_FRACTION: f32 = 0.8;
    /// Per-tile coastline jitter, uniform in [-COAST_NOISE, COAST_NOISE]
    pub const COAST_NOISE: f32 = 0.2;
    pub const FOREST_CHANCE: f64 = 0.2;
    pub const ISLAND_ROCK_CHANCE: f64 = 0.05;
    /// One sea rock probe per this many tiles
    pub const SEA_ROCK_DIVISOR: usize = 100;
}

/// A raised island, in tile coordinates
#[derive(Debug, Clone, Copy)]
struct Island {
    column: usize,
    row: usize,
    radius: usize,
}

/// The world grid
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    /// World size in pixels
    width: f32,
    height: f32,
    tile_size: f32,
    columns: usize,
    rows: usize,
    /// Row-major, `columns * rows` entries
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Create a map of the given pixel size filled with a single terrain.
    pub fn filled(width: u32, height: u32, tile_size: u32, kind: TileKind) -> Self {
        let tile_size = tile_size.max(1);
        let columns = (width / tile_size) as usize;
        let rows = (height / tile_size) as usize;
        let size = tile_size as f32;

        let mut tiles = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let position = Vec2::new(column as f32 * size, row as f32 * size);
                tiles.push(Tile::new(kind, position, size));
            }
        }

        Self {
            width: width as f32,
            height: height as f32,
            tile_size: size,
            columns,
            rows,
            tiles,
        }
    }

    /// Generate an island map `scale` screens wide and tall.
    ///
    /// All randomness comes from `rng`, so a seeded generator always yields
    /// the same map.
    pub fn generate<R: Rng + ?Sized>(
        screen_width: u32,
        screen_height: u32,
        tile_size: u32,
        scale: u32,
        rng: &mut R,
    ) -> Self {
        let mut map = Self::filled(
            screen_width * scale,
            screen_height * scale,
            tile_size,
            TileKind::Water,
        );

        map.raise_islands(rng);
        map.scatter_sea_rocks(rng);

        map
    }

    /// Raise 2-4 islands and return them in the order they were painted
    fn raise_islands<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Island> {
        let count = rng.gen_range(params::MIN_ISLANDS..=params::MAX_ISLANDS);
        let mut islands = Vec::with_capacity(count);
        for _ in 0..count {
            let island = self.pick_island(rng);
            self.raise_island(island, rng);
            islands.push(island);
        }
        islands
    }

    fn pick_island<R: Rng + ?Sized>(&self, rng: &mut R) -> Island {
        let column = rng.gen_range(self.columns / 4..=self.columns * 3 / 4);
        let row = rng.gen_range(self.rows / 4..=self.rows * 3 / 4);
        let divisor = rng.gen_range(params::MIN_RADIUS_DIVISOR..=params::MAX_RADIUS_DIVISOR);
        Island {
            column,
            row,
            radius: self.columns.min(self.rows) / divisor,
        }
    }

    fn raise_island<R: Rng + ?Sized>(&mut self, island: Island, rng: &mut R) {
        let radius = island.radius as f32;
        let columns = self.columns;

        for (i, tile) in self.tiles.iter_mut().enumerate() {
            let dx = (i % columns) as f32 - island.column as f32;
            let dy = (i / columns) as f32 - island.row as f32;
            let distance = (dx * dx + dy * dy).sqrt();

            // Sampled for every tile so the coastline noise stays independent
            // of where the tile lies
            let noise = rng.gen_range(-params::COAST_NOISE..=params::COAST_NOISE);
            if distance >= radius * (params::COAST_FRACTION + noise) {
                continue;
            }

            tile.kind = if distance < radius * params::CORE_FRACTION {
                if rng.gen_bool(params::FOREST_CHANCE) {
                    TileKind::Forest
                } else {
                    TileKind::Grass
                }
            } else {
                TileKind::Sand
            };

            if rng.gen_bool(params::ISLAND_ROCK_CHANCE) {
                tile.kind = TileKind::Rock;
            }
        }
    }

    fn scatter_sea_rocks<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let probes = self.columns * self.rows / params::SEA_ROCK_DIVISOR;
        for _ in 0..probes {
            let column = rng.gen_range(0..self.columns);
            let row = rng.gen_range(0..self.rows);
            let tile = &mut self.tiles[row * self.columns + column];
            if tile.kind == TileKind::Water {
                tile.kind = TileKind::Rock;
            }
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// World size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Grid coordinates of the tile under a world position, if any.
    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let column = (position.x / self.tile_size).floor() as usize;
        let row = (position.y / self.tile_size).floor() as usize;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some((column, row))
    }

    /// Tile under a world position. `None` outside the grid.
    pub fn tile_at(&self, position: Vec2) -> Option<&Tile> {
        self.cell_at(position)
            .and_then(|(column, row)| self.tiles.get(row * self.columns + column))
    }

    /// Mutable tile access by grid coordinates
    #[cfg(test)]
    pub fn tile_mut(&mut self, column: usize, row: usize) -> Option<&mut Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles.get_mut(row * self.columns + column)
    }

    /// Can the explorer stand at this world position? Off-map is never
    /// walkable.
    pub fn is_walkable(&self, position: Vec2) -> bool {
        self.tile_at(position).is_some_and(Tile::is_walkable)
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    /// Center of a uniformly chosen walkable tile, or `None` when the map has
    /// no land to stand on.
    pub fn try_valid_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        let walkable: Vec<&Tile> = self.tiles.iter().filter(|t| t.is_walkable()).collect();
        walkable.choose(rng).map(|tile| tile.center())
    }

    /// Center of a uniformly chosen walkable tile, falling back to the map
    /// center when there is none.
    pub fn get_valid_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        self.try_valid_position(rng).unwrap_or_else(|| self.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(seed: u64) -> TileMap {
        let mut rng = StdRng::seed_from_u64(seed);
        TileMap::generate(800, 600, 20, 3, &mut rng)
    }

    #[test]
    fn test_grid_dimensions() {
        for seed in 0..8 {
            let map = generate(seed);
            assert_eq!(map.columns(), 3 * 800 / 20);
            assert_eq!(map.rows(), 3 * 600 / 20);
            assert_eq!(map.tiles().len(), map.columns() * map.rows());
            assert_eq!(map.width(), 2400.0);
            assert_eq!(map.height(), 1800.0);
        }
    }

    #[test]
    fn test_grid_dimensions_other_screens() {
        let mut rng = StdRng::seed_from_u64(4);
        let map = TileMap::generate(1024, 768, 32, 2, &mut rng);
        assert_eq!((map.columns(), map.rows()), (64, 48));
        assert_eq!(map.tiles().len(), 64 * 48);

        // Partial tiles at the right and bottom edges are dropped
        let map = TileMap::generate(1000, 700, 30, 1, &mut rng);
        assert_eq!((map.columns(), map.rows()), (33, 23));
        assert_eq!(map.tiles().len(), 33 * 23);
        assert_eq!(map.size(), Vec2::new(1000.0, 700.0));
    }

    #[test]
    fn test_tiles_are_row_major() {
        let map = generate(3);
        for (i, tile) in map.tiles().iter().enumerate() {
            let column = i % map.columns();
            let row = i / map.columns();
            assert_eq!(tile.position, Vec2::new(column as f32 * 20.0, row as f32 * 20.0));
            assert_eq!(tile.size, 20.0);
            assert_eq!(map.cell_at(tile.center()), Some((column, row)));
        }
    }

    #[test]
    fn test_tile_kinds_are_known() {
        for seed in 0..8 {
            let map = generate(seed);
            assert!(map.tiles().iter().all(|t| TileKind::ALL.contains(&t.kind)));
        }
    }

    #[test]
    fn test_generation_produces_land_and_sea() {
        let map = generate(42);
        let water = map.tiles().iter().filter(|t| t.kind == TileKind::Water).count();
        assert!(water > 0);
        assert!(map.walkable_count() > 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(7), generate(7));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate(1), generate(2));
    }

    #[test]
    fn test_valid_position_is_walkable() {
        let map = generate(11);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let pos = map.get_valid_position(&mut rng);
            assert!(map.is_walkable(pos), "landed on {:?}", map.tile_at(pos));
        }
    }

    #[test]
    fn test_valid_position_is_tile_center() {
        let map = generate(5);
        let mut rng = StdRng::seed_from_u64(5);
        let pos = map.get_valid_position(&mut rng);
        let tile = map.tile_at(pos).unwrap();
        assert_eq!(tile.center(), pos);
    }

    #[test]
    fn test_all_water_degrades_to_center() {
        let map = TileMap::filled(2400, 1800, 20, TileKind::Water);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(map.walkable_count(), 0);
        assert_eq!(map.try_valid_position(&mut rng), None);
        assert_eq!(map.get_valid_position(&mut rng), Vec2::new(1200.0, 900.0));
        // The fallback is not actually standable
        assert!(!map.is_walkable(map.get_valid_position(&mut rng)));
    }

    #[test]
    fn test_single_walkable_tile_is_always_chosen() {
        let mut map = TileMap::filled(200, 200, 20, TileKind::Rock);
        map.tile_mut(3, 4).unwrap().kind = TileKind::Grass;
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            assert_eq!(map.get_valid_position(&mut rng), Vec2::new(70.0, 90.0));
        }
    }

    #[test]
    fn test_out_of_range_lookups() {
        let mut map = TileMap::filled(100, 100, 20, TileKind::Grass);
        assert!(map.tile_at(Vec2::new(-1.0, 10.0)).is_none());
        assert!(map.tile_at(Vec2::new(10.0, 100.0)).is_none());
        assert!(!map.is_walkable(Vec2::new(100.0, 50.0)));
        assert!(map.is_walkable(Vec2::new(99.9, 99.9)));
        assert!(map.tile_mut(5, 0).is_none());
    }

    #[test]
    fn test_tiny_map_has_no_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = TileMap::generate(1, 1, 20, 3, &mut rng);
        assert!(map.tiles().is_empty());
        assert_eq!(map.get_valid_position(&mut rng), Vec2::new(1.5, 1.5));
    }

    const SEEDS: std::ops::Range<u64> = 0..20;

    /// Water map with islands raised but no sea rocks yet
    fn with_islands(seed: u64) -> (TileMap, Vec<Island>, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map = TileMap::filled(2400, 1800, 20, TileKind::Water);
        let islands = map.raise_islands(&mut rng);
        (map, islands, rng)
    }

    fn distance(map: &TileMap, index: usize, island: &Island) -> f32 {
        let dx = (index % map.columns()) as f32 - island.column as f32;
        let dy = (index / map.columns()) as f32 - island.row as f32;
        (dx * dx + dy * dy).sqrt()
    }

    fn count(map: &TileMap, kind: TileKind) -> usize {
        map.tiles().iter().filter(|t| t.kind == kind).count()
    }

    #[test]
    fn test_island_count_and_placement() {
        for seed in SEEDS {
            let (map, islands, _) = with_islands(seed);
            let (columns, rows) = (map.columns(), map.rows());
            assert!((params::MIN_ISLANDS..=params::MAX_ISLANDS).contains(&islands.len()));
            for island in &islands {
                assert!((columns / 4..=columns * 3 / 4).contains(&island.column), "{:?}", island);
                assert!((rows / 4..=rows * 3 / 4).contains(&island.row), "{:?}", island);
                let shortest = columns.min(rows);
                assert!((shortest / params::MAX_RADIUS_DIVISOR..=shortest / params::MIN_RADIUS_DIVISOR)
                    .contains(&island.radius));
            }
        }
    }

    #[test]
    fn test_land_stays_inside_islands() {
        for seed in SEEDS {
            let (map, islands, _) = with_islands(seed);
            for (i, tile) in map.tiles().iter().enumerate() {
                let reach = match tile.kind {
                    TileKind::Water => continue,
                    // Grass and forest only form in the island cores
                    TileKind::Grass | TileKind::Forest => params::CORE_FRACTION,
                    // The coastline is never past the full radius
                    TileKind::Sand | TileKind::Rock => 1.0,
                };
                assert!(
                    islands.iter().any(|island| distance(&map, i, island) < island.radius as f32 * reach),
                    "{:?} tile {} outside every island",
                    tile.kind,
                    i
                );
            }
        }
    }

    #[test]
    fn test_forest_share_of_island_cores() {
        let (mut forest, mut grass) = (0, 0);
        for seed in SEEDS {
            let (map, _, _) = with_islands(seed);
            forest += count(&map, TileKind::Forest);
            grass += count(&map, TileKind::Grass);
        }
        let share = forest as f64 / (forest + grass) as f64;
        assert!((0.15..0.25).contains(&share), "forest share {}", share);
    }

    #[test]
    fn test_island_rock_share() {
        let (mut rock, mut land) = (0, 0);
        for seed in SEEDS {
            let (map, _, _) = with_islands(seed);
            rock += count(&map, TileKind::Rock);
            land += map.tiles().len() - count(&map, TileKind::Water);
        }
        let share = rock as f64 / land as f64;
        assert!((0.03..0.07).contains(&share), "rock share {}", share);
    }

    #[test]
    fn test_sea_rocks_only_replace_water() {
        let mut placed = 0;
        for seed in SEEDS {
            let (mut map, _, mut rng) = with_islands(seed);
            let before: Vec<TileKind> = map.tiles().iter().map(|t| t.kind).collect();
            map.scatter_sea_rocks(&mut rng);

            let mut changed = 0;
            for (old, tile) in before.iter().zip(map.tiles()) {
                if *old != tile.kind {
                    assert_eq!((*old, tile.kind), (TileKind::Water, TileKind::Rock));
                    changed += 1;
                }
            }
            assert!(changed <= map.tiles().len() / params::SEA_ROCK_DIVISOR);
            placed += changed;
        }
        assert!(placed > 0);
    }
}
