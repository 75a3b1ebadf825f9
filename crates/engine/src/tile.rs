//! Tile sequence: one falling tile per note of the song.
//!
//! Tiles are created once and recycled forever. Walking the array from the
//! active index (wrapping) visits tiles in fall order, lowest first; every
//! tile sits strictly above the one before it.

use platform::{Lane, RowMask, LANE_COUNT, MATRIX_ROWS};
use rand::{Rng, RngCore};

use crate::config::GameConfig;
use crate::error::GameError;

/// Most tiles that can be on the matrix at once (one per visible position).
pub const VISIBLE_CAPACITY: usize = (MATRIX_ROWS as usize).saturating_add(1);

/// Tiles drawn in one frame.
pub type Sprites = heapless::Vec<TileSprite, VISIBLE_CAPACITY>;

/// One falling block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tile {
    lane: Lane,
    position: i32,
    resolved: bool,
}

impl Tile {
    /// Build a tile directly (unresolved).
    pub fn new(lane: Lane, position: i32) -> Self {
        Self {
            lane,
            position,
            resolved: false,
        }
    }

    /// Lane the tile falls in.
    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Row of the tile's top edge. Negative once it has passed the hit line.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Whether the tile has been hit and awaits recycling.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Whether the tile has fallen past the hit line.
    pub fn has_expired(&self) -> bool {
        self.position < 0
    }
}

/// What the render task draws for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TileSprite {
    /// Lane to light.
    pub lane: Lane,
    /// Rows to light in that lane.
    pub rows: RowMask,
}

/// Fixed-length queue of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSequence<const N: usize> {
    tiles: [Tile; N],
    initial_top: i32,
    step: i32,
}

fn random_lane<R: RngCore>(rng: &mut R) -> Lane {
    Lane::from_index(rng.gen_range(0..LANE_COUNT)).unwrap_or(Lane::ALL[0])
}

impl<const N: usize> TileSequence<N> {
    /// Lay out `N` tiles with random lanes, `tile_row_step` apart from
    /// `first_tile_row` upward.
    pub fn initialize<R: RngCore>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        let lanes: [Lane; N] = core::array::from_fn(|_| random_lane(rng));
        Self::with_lanes(config, lanes)
    }

    /// Lay out `N` tiles in the given lanes.
    pub fn with_lanes(config: &GameConfig, lanes: [Lane; N]) -> Result<Self, GameError> {
        if N == 0 {
            return Err(GameError::EmptySequence);
        }
        let step = config.tile_row_step;
        let mut position = config.first_tile_row;
        let tiles = lanes.map(|lane| {
            let tile = Tile::new(lane, position);
            position = position.saturating_add(step);
            tile
        });
        Ok(Self {
            tiles,
            initial_top: config.initial_top_row(N),
            step,
        })
    }

    /// Number of tiles.
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false; an empty sequence cannot be built.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// All tiles in array order.
    pub fn tiles(&self) -> &[Tile; N] {
        &self.tiles
    }

    /// Tile at `index`.
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Move every tile down one row.
    pub fn advance_all(&mut self) {
        for tile in &mut self.tiles {
            tile.position = tile.position.saturating_sub(1);
        }
    }

    /// Where a recycled tile re-enters: the initial top row, or one step
    /// above the highest tile if the queue has not fallen that far yet.
    pub fn top_of_queue(&self) -> i32 {
        let highest = self
            .tiles
            .iter()
            .map(Tile::position)
            .max()
            .unwrap_or(self.initial_top);
        self.initial_top.max(highest.saturating_add(self.step))
    }

    /// Flag the tile at `index` as hit.
    pub fn mark_resolved(&mut self, index: usize) -> Result<(), GameError> {
        let tile = self
            .tiles
            .get_mut(index)
            .ok_or(GameError::TileIndexOutOfRange { index, len: N })?;
        tile.resolved = true;
        Ok(())
    }

    /// Send the tile at `index` back to the top with a fresh lane.
    pub fn recycle<R: RngCore>(&mut self, index: usize, rng: &mut R) -> Result<(), GameError> {
        let lane = random_lane(rng);
        self.recycle_into(index, lane)
    }

    /// Send the tile at `index` back to the top in `lane`.
    pub fn recycle_into(&mut self, index: usize, lane: Lane) -> Result<(), GameError> {
        let top = self.top_of_queue();
        let tile = self
            .tiles
            .get_mut(index)
            .ok_or(GameError::TileIndexOutOfRange { index, len: N })?;
        *tile = Tile::new(lane, top);
        Ok(())
    }

    /// Indices in fall order starting at `active`.
    pub fn fall_order(&self, active: usize) -> impl Iterator<Item = usize> {
        (0..N).map(move |k| active.wrapping_add(k).checked_rem(N).unwrap_or(0))
    }

    /// Unresolved tiles below `off_screen`, walked in fall order from
    /// `active`, as `(lane, rows)` pairs.
    pub fn visible_sprites(&self, active: usize, off_screen: i32) -> Sprites {
        let mut sprites = Sprites::new();
        for index in self.fall_order(active) {
            let Some(tile) = self.tiles.get(index) else {
                break;
            };
            if tile.position >= off_screen {
                break;
            }
            if tile.resolved {
                continue;
            }
            if let Some(rows) = RowMask::for_position(tile.position) {
                if sprites
                    .push(TileSprite {
                        lane: tile.lane,
                        rows,
                    })
                    .is_err()
                {
                    break;
                }
            }
        }
        sprites
    }

    /// Verify the queue is strictly ascending in fall order from `active`.
    pub fn check_order(&self, active: usize) -> Result<(), GameError> {
        if active >= N {
            return Err(GameError::ActiveIndexOutOfRange {
                index: active,
                len: N,
            });
        }
        let mut below: Option<i32> = None;
        for index in self.fall_order(active) {
            let position = self.tiles.get(index).map_or(i32::MIN, Tile::position);
            if below.is_some_and(|b| position <= b) {
                return Err(GameError::QueueOrder { index, position });
            }
            below = Some(position);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn lanes<const N: usize>(lane: u8) -> [Lane; N] {
        [Lane::try_new(lane).unwrap(); N]
    }

    #[test]
    fn test_initialize_spaces_tiles_by_step() {
        let mut rng = SmallRng::seed_from_u64(7);
        let seq = TileSequence::<50>::initialize(&GameConfig::DEFAULT, &mut rng).unwrap();
        for (i, tile) in seq.tiles().iter().enumerate() {
            assert_eq!(tile.position(), 7 + 2 * i as i32);
            assert!(!tile.is_resolved());
            assert!(tile.lane().index() < LANE_COUNT);
        }
        assert_eq!(seq.check_order(0), Ok(()));
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(
            TileSequence::<0>::with_lanes(&GameConfig::DEFAULT, []),
            Err(GameError::EmptySequence)
        );
    }

    #[test]
    fn test_advance_all_moves_every_tile_down() {
        let mut seq = TileSequence::<3>::with_lanes(&GameConfig::DEFAULT, lanes(1)).unwrap();
        seq.advance_all();
        let positions: [i32; 3] = seq.tiles().map(|t| t.position());
        assert_eq!(positions, [6, 8, 10]);
    }

    #[test]
    fn test_top_of_queue_is_initial_top_once_queue_has_fallen() {
        let mut seq = TileSequence::<50>::with_lanes(&GameConfig::DEFAULT, lanes(0)).unwrap();
        assert_eq!(seq.top_of_queue(), 107);
        seq.advance_all();
        seq.advance_all();
        assert_eq!(seq.top_of_queue(), 105);
        seq.advance_all();
        assert_eq!(seq.top_of_queue(), 105);
    }

    #[test]
    fn test_recycle_moves_tile_to_top_unresolved() {
        let mut seq = TileSequence::<4>::with_lanes(&GameConfig::DEFAULT, lanes(0)).unwrap();
        for _ in 0..8 {
            seq.advance_all();
        }
        seq.mark_resolved(0).unwrap();
        seq.recycle_into(0, Lane::try_new(3).unwrap()).unwrap();
        let tile = seq.get(0).unwrap();
        assert_eq!(tile.position(), 13);
        assert_eq!(tile.lane().get(), 3);
        assert!(!tile.is_resolved());
        assert_eq!(seq.check_order(1), Ok(()));
    }

    #[test]
    fn test_recycle_out_of_range_is_error() {
        let mut seq = TileSequence::<2>::with_lanes(&GameConfig::DEFAULT, lanes(0)).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            seq.recycle(2, &mut rng),
            Err(GameError::TileIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_visible_sprites_start_at_active_and_stop_off_screen() {
        let seq = TileSequence::<50>::with_lanes(&GameConfig::DEFAULT, lanes(2)).unwrap();
        let sprites = seq.visible_sprites(0, 9);
        // Only tile 0 (row 7) is below row 9 at start.
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].rows, RowMask::from_bits(0b1100_0000));
    }

    #[test]
    fn test_visible_sprites_wrap_past_end_of_array() {
        let mut seq = TileSequence::<3>::with_lanes(&GameConfig::DEFAULT, lanes(1)).unwrap();
        for _ in 0..7 {
            seq.advance_all();
        }
        // Positions 0, 2, 4; hit tile 0 so it goes to the top.
        seq.recycle_into(0, Lane::try_new(3).unwrap()).unwrap();
        for _ in 0..6 {
            seq.advance_all();
        }
        // Tiles 1 and 2 are past the hit line and draw nothing.
        let sprites = seq.visible_sprites(1, 9);
        let drawn: Vec<u8> = sprites.iter().map(|s| s.lane.get()).collect();
        assert_eq!(drawn, [3]);
    }

    #[test]
    fn test_check_order_detects_collision() {
        let mut seq = TileSequence::<3>::with_lanes(&GameConfig::DEFAULT, lanes(0)).unwrap();
        seq.tiles[2].position = 9;
        assert_eq!(
            seq.check_order(0),
            Err(GameError::QueueOrder {
                index: 2,
                position: 9
            })
        );
    }
}
