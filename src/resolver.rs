//! Gid → tileset resolution.

use crate::error::{MapError, Result};
use crate::tileset::Tileset;

/// Where a gid lives: which tileset, which local tile, which atlas pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTile {
    /// Index into the tileset list the resolver was built over.
    pub tileset: usize,
    /// Tile index within its tileset.
    pub local_id: u32,
    /// Top-left pixel of the tile inside the atlas.
    pub pixel: (u32, u32),
}

/// Resolves gids against a tileset list sorted ascending by `first_gid`.
#[derive(Debug, Clone, Copy)]
pub struct TilesetResolver<'a> {
    tilesets: &'a [Tileset],
}

impl<'a> TilesetResolver<'a> {
    /// `tilesets` must be sorted by strictly increasing `first_gid`.
    pub fn new(tilesets: &'a [Tileset]) -> Self {
        debug_assert!(
            tilesets.windows(2).all(|w| w[0].first_gid < w[1].first_gid),
            "tilesets must be sorted by strictly increasing first_gid"
        );
        Self { tilesets }
    }

    /// Index of the tileset with the greatest `first_gid <= gid`.
    #[inline]
    pub fn owner_of(&self, gid: u32) -> Option<usize> {
        // Number of tilesets starting at or before gid; the last of them owns it.
        let n = self.tilesets.partition_point(|t| t.first_gid <= gid);
        n.checked_sub(1)
    }

    /// Resolves a flag-free gid.
    ///
    /// A gid past its owner's `tilecount` still resolves to that owner; the
    /// sheet lookup reports it out of bounds. Gid 0, gids below every
    /// `first_gid`, and gids whose atlas offset overflows are
    /// [`MapError::UnresolvedGid`].
    pub fn resolve(&self, gid: u32) -> Result<ResolvedTile> {
        if gid == 0 {
            return Err(MapError::UnresolvedGid { gid });
        }
        let index = self.owner_of(gid).ok_or(MapError::UnresolvedGid { gid })?;
        let ts = &self.tilesets[index];
        let local_id = gid - ts.first_gid;
        let pixel = ts.tile_pixel(local_id).ok_or(MapError::UnresolvedGid { gid })?;
        Ok(ResolvedTile {
            tileset: index,
            local_id,
            pixel,
        })
    }

    /// Tileset at a [`ResolvedTile::tileset`] index.
    pub fn tileset(&self, index: usize) -> Option<&'a Tileset> {
        self.tilesets.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::atlas;

    #[test]
    fn picks_greatest_first_gid_not_above() {
        let sets = vec![atlas(1, 4, 16), atlas(17, 2, 4), atlas(40, 8, 64)];
        let r = TilesetResolver::new(&sets);

        assert_eq!(r.resolve(1).unwrap().tileset, 0);
        assert_eq!(r.resolve(16).unwrap().tileset, 0);
        assert_eq!(r.resolve(17).unwrap().tileset, 1);
        // Past tileset 1's tilecount but below the next firstgid: still owned by 1.
        assert_eq!(r.resolve(30).unwrap().tileset, 1);
        assert_eq!(r.resolve(41).unwrap(), ResolvedTile {
            tileset: 2,
            local_id: 1,
            pixel: (32, 0),
        });
    }

    #[test]
    fn below_every_first_gid_is_an_error() {
        let sets = vec![atlas(5, 4, 16)];
        let r = TilesetResolver::new(&sets);
        assert!(matches!(r.resolve(4), Err(MapError::UnresolvedGid { gid: 4 })));
        assert!(matches!(r.resolve(0), Err(MapError::UnresolvedGid { gid: 0 })));
    }

    #[test]
    fn gid_far_past_a_narrow_atlas_is_an_error() {
        let sets = vec![atlas(1, 1, 4)];
        let r = TilesetResolver::new(&sets);
        assert!(matches!(
            r.resolve(0x1FFF_FFFF),
            Err(MapError::UnresolvedGid { gid: 0x1FFF_FFFF })
        ));
        assert_eq!(r.resolve(4).unwrap().pixel, (0, 96));
    }

    #[test]
    fn empty_list_is_an_error() {
        let r = TilesetResolver::new(&[]);
        assert!(matches!(r.resolve(1), Err(MapError::UnresolvedGid { gid: 1 })));
    }

    #[test]
    fn pixel_positions_land_on_the_grid() {
        let mut ts = atlas(1, 5, 25);
        ts.margin = 2;
        ts.spacing = 3;
        let sets = vec![ts];
        let r = TilesetResolver::new(&sets);
        for gid in 1..=25 {
            let (px, py) = r.resolve(gid).unwrap().pixel;
            assert_eq!((px - 2) % 35, 0);
            assert_eq!((py - 2) % 35, 0);
        }
    }
}
