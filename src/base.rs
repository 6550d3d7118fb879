use std::cmp::max;

//////////////////////////////////////////////////////////////////////////////

// Basics

#[macro_export]
macro_rules! static_assert_size {
    ($x:ty, $y:expr) => {
        const _: fn() = || { let _ = std::mem::transmute::<$x, [u8; $y]>; };
    }
}

pub type HashSet<K> = fxhash::FxHashSet<K>;
pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;

pub fn clamp<T: PartialOrd>(x: T, min: T, max: T) -> T {
    if x < min { min } else if x > max { max } else { x }
}

//////////////////////////////////////////////////////////////////////////////

// Tile

// Distance reported across planes, larger than any in-plane distance.
pub const FAR: i32 = 1 << 24;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tile(pub i32, pub i32, pub i32);
static_assert_size!(Tile, 12);

impl Tile {
    pub fn dx(&self, n: i32) -> Tile { Tile(self.0 + n, self.1, self.2) }

    pub fn dy(&self, n: i32) -> Tile { Tile(self.0, self.1 + n, self.2) }

    pub fn same_plane(&self, other: Tile) -> bool { self.2 == other.2 }

    pub fn chebyshev(&self, other: Tile) -> i32 {
        if !self.same_plane(other) { return FAR; }
        max((self.0 - other.0).abs(), (self.1 - other.1).abs())
    }
}

//////////////////////////////////////////////////////////////////////////////

// Zone: the square footprint of an actor, anchored at its south-west tile.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Zone {
    pub root: Tile,
    pub size: i32,
}

impl Zone {
    pub fn new(root: Tile, size: i32) -> Self {
        Self { root, size: max(size, 1) }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.gap(tile) == Some((0, 0))
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let Tile(rx, ry, plane) = self.root;
        (0..self.size).flat_map(move |x| {
            (0..self.size).map(move |y| Tile(rx + x, ry + y, plane))
        })
    }

    // Signed per-axis distance from the footprint's edge to the tile;
    // zero on an axis where the tile is within the footprint's span.
    pub fn gap(&self, tile: Tile) -> Option<(i32, i32)> {
        if !self.root.same_plane(tile) { return None; }
        let axis = |t: i32, r: i32| {
            if t < r { t - r } else if t > r + self.size - 1 { t - (r + self.size - 1) } else { 0 }
        };
        Some((axis(tile.0, self.root.0), axis(tile.1, self.root.1)))
    }

    pub fn distance(&self, tile: Tile) -> i32 {
        let Some((gx, gy)) = self.gap(tile) else { return FAR; };
        max(gx.abs(), gy.abs())
    }

    // Melee reach excludes diagonals: cardinally adjacent to the edge.
    pub fn in_melee_range(&self, tile: Tile) -> bool {
        let Some((gx, gy)) = self.gap(tile) else { return false; };
        gx.abs() + gy.abs() == 1
    }

    // The footprint tile closest to the target, used as the sight origin.
    pub fn nearest_tile(&self, tile: Tile) -> Tile {
        let Tile(rx, ry, plane) = self.root;
        let x = clamp(tile.0, rx, rx + self.size - 1);
        let y = clamp(tile.1, ry, ry + self.size - 1);
        Tile(x, y, plane)
    }
}

//////////////////////////////////////////////////////////////////////////////

// Arena: the static geometry of the fight area. Walls block both sight
// and movement; everything else is open floor.

#[derive(Default)]
pub struct Arena {
    walls: HashSet<Tile>,
}

impl Arena {
    pub fn new(walls: impl IntoIterator<Item = Tile>) -> Self {
        Self { walls: walls.into_iter().collect() }
    }

    pub fn open() -> Self { Self::default() }

    pub fn blocks(&self, tile: Tile) -> bool { self.walls.contains(&tile) }

    // Sight between two tiles: endpoints excluded, interior unobstructed.
    pub fn sight_clear(&self, a: Tile, b: Tile) -> bool {
        if !a.same_plane(b) { return false; }
        let line = LOS(a, b);
        if line.len() <= 2 { return true; }
        line[1..line.len() - 1].iter().all(|x| !self.blocks(*x))
    }
}

//////////////////////////////////////////////////////////////////////////////

// Bresenham line-of-sight

#[allow(non_snake_case)]
pub fn LOS(a: Tile, b: Tile) -> Vec<Tile> {
    let x_diff = (a.0 - b.0).abs();
    let y_diff = (a.1 - b.1).abs();
    let x_sign = if b.0 < a.0 { -1 } else { 1 };
    let y_sign = if b.1 < a.1 { -1 } else { 1 };

    let size = (max(x_diff, y_diff) + 1) as usize;
    let mut result = vec![];
    result.reserve_exact(size);
    result.push(a);

    let mut test = 0;
    let mut current = a;

    if x_diff >= y_diff {
        test = (x_diff + test) / 2;
        for _ in 0..x_diff {
            current.0 += x_sign;
            test -= y_diff;
            if test < 0 {
                current.1 += y_sign;
                test += x_diff;
            }
            result.push(current);
        }
    } else {
        test = (y_diff + test) / 2;
        for _ in 0..y_diff {
            current.1 += y_sign;
            test -= x_diff;
            if test < 0 {
                current.0 += x_sign;
                test += y_diff;
            }
            result.push(current);
        }
    }

    assert!(result.len() == size);
    result
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_los_endpoints() {
        let line = LOS(Tile(0, 0, 0), Tile(5, 2, 0));
        assert_eq!(line[0], Tile(0, 0, 0));
        assert_eq!(*line.last().unwrap(), Tile(5, 2, 0));
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn test_zone_distance() {
        let zone = Zone::new(Tile(10, 10, 0), 3);
        assert_eq!(zone.distance(Tile(11, 11, 0)), 0);
        assert_eq!(zone.distance(Tile(13, 10, 0)), 1);
        assert_eq!(zone.distance(Tile(15, 14, 0)), 3);
        assert_eq!(zone.distance(Tile(10, 10, 1)), FAR);
    }

    #[test]
    fn test_melee_range_excludes_diagonals() {
        let zone = Zone::new(Tile(0, 0, 0), 1);
        assert!(zone.in_melee_range(Tile(1, 0, 0)));
        assert!(zone.in_melee_range(Tile(0, -1, 0)));
        assert!(!zone.in_melee_range(Tile(1, 1, 0)));
        assert!(!zone.in_melee_range(Tile(0, 0, 0)));
        assert!(!zone.in_melee_range(Tile(1, 0, 1)));
    }

    #[test]
    fn test_sight_blocked_by_walls() {
        let arena = Arena::new((1..4).map(|x| Tile(x, 1, 0)));
        assert!(!arena.sight_clear(Tile(2, 0, 0), Tile(2, 2, 0)));
        assert!(arena.sight_clear(Tile(0, 0, 0), Tile(0, 5, 0)));
        assert!(arena.sight_clear(Tile(2, 0, 0), Tile(2, 1, 0)));
    }

    #[test]
    fn test_nearest_tile() {
        let zone = Zone::new(Tile(5, 5, 0), 4);
        assert_eq!(zone.nearest_tile(Tile(0, 7, 0)), Tile(5, 7, 0));
        assert_eq!(zone.nearest_tile(Tile(6, 6, 0)), Tile(6, 6, 0));
        assert_eq!(zone.nearest_tile(Tile(9, 9, 0)), Tile(8, 8, 0));
    }
}
