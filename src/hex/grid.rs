//! Rectangular grid enumeration over the coordinate lattice.

use std::collections::HashMap;

use super::loc::Loc;

/// A rectangular span of locations centered on the origin, keyed by
/// canonical id, together with the coordinate extrema the enumeration
/// actually reached.
///
/// Grids bootstrap a collection and back tests; they are never persisted
/// as a unit.
#[derive(Debug)]
pub struct Grid {
    locs: HashMap<String, Loc>,
    xmin: i64,
    xmax: i64,
    ymin: i64,
    ymax: i64,
    zmin: i64,
    zmax: i64,
}

impl Grid {
    /// Enumerates every location in an `x_size` by `y_size` span centered
    /// on the origin. Bounds are `size / 2` in each direction, so even
    /// sizes gain one cell per axis. The z coordinate is derived as
    /// `-(x + y)` for each cell.
    pub fn build(x_size: i64, y_size: i64) -> Self {
        let xmax = x_size / 2;
        let ymax = y_size / 2;
        let mut grid = Grid {
            locs: HashMap::new(),
            xmin: -xmax,
            xmax,
            ymin: -ymax,
            ymax,
            zmin: 0,
            zmax: 0,
        };

        for x in grid.xmin..=grid.xmax {
            for y in grid.ymin..=grid.ymax {
                let z = -(x + y);
                grid.zmin = grid.zmin.min(z);
                grid.zmax = grid.zmax.max(z);
                let loc = Loc::from_coords(x, y, z);
                grid.locs.insert(loc.id().to_string(), loc);
            }
        }
        grid
    }

    /// Looks up a location by canonical id.
    pub fn get_loc(&self, id: &str) -> Option<&Loc> {
        self.locs.get(id)
    }

    /// Number of enumerated locations.
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Iterates the enumerated locations in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Loc> {
        self.locs.values()
    }

    pub fn x_min(&self) -> i64 {
        self.xmin
    }

    pub fn x_max(&self) -> i64 {
        self.xmax
    }

    pub fn y_min(&self) -> i64 {
        self.ymin
    }

    pub fn y_max(&self) -> i64 {
        self.ymax
    }

    pub fn z_min(&self) -> i64 {
        self.zmin
    }

    pub fn z_max(&self) -> i64 {
        self.zmax
    }
}
