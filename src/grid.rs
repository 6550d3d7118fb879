use crate::actor::{Actor, ActorId, ActorMap};
use crate::archetype::{Archetype, Attack};
use crate::base::{Arena, HashMap, HashSet, Tile};
use crate::oracle::{can_reach_to_strike, can_strike};

//////////////////////////////////////////////////////////////////////////////

// Safety codes: an OR of the attack categories that can reach a tile.
// Zero means confirmed safe; a tile absent from the grid was not tested.

pub const MELEE_BIT: u8 = 1;
pub const RANGED_BIT: u8 = 2;
pub const MAGIC_BIT: u8 = 4;

//////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct SafetyGrid {
    map: HashMap<Tile, u8>,
    order: Vec<Tile>,
}

impl SafetyGrid {
    // Scan every walkable tile within the radius against every tracked
    // actor. The roster fixes the scan order, which matters: the
    // splitting kind marks whichever of magic/ranged is still unset.
    pub fn build(player: Tile, radius: i32, arena: &Arena,
                 obstacles: &HashSet<Tile>, actors: &mut ActorMap,
                 roster: &[ActorId]) -> Self {
        let mut result = Self::default();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let tile = player.dx(dx).dy(dy);
                if arena.blocks(tile) || obstacles.contains(&tile) { continue; }

                result.insert(tile, 0);
                for &aid in roster {
                    let Some(actor) = actors.get_mut(aid) else { continue; };
                    if !actor.archetype.safespot_tracked() { continue; }
                    if !can_strike(actor, arena, tile) &&
                       !can_reach_to_strike(actor, arena, obstacles, tile) {
                        continue;
                    }

                    let code = result.map.get(&tile).copied().unwrap_or(0);
                    let next = merge_threat(code, actor, tile);
                    result.map.insert(tile, next);
                }
            }
        }
        result
    }

    pub fn insert(&mut self, tile: Tile, code: u8) {
        if self.map.insert(tile, code).is_none() {
            self.order.push(tile);
        }
    }

    pub fn code(&self, tile: Tile) -> Option<u8> {
        self.map.get(&tile).copied()
    }

    pub fn is_safe(&self, tile: Tile) -> bool {
        self.code(tile) == Some(0)
    }

    // The first tested tile confirmed safe, else the player's own tile.
    pub fn optimal_tile(&self, player: Tile) -> Tile {
        self.order.iter().copied().find(|x| self.is_safe(*x)).unwrap_or(player)
    }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.order.iter().map(|x| (*x, self.map[x]))
    }
}

// OR one actor's threat category onto a tile's code. The splitting kind
// can resolve to magic or ranged, so it takes whichever of those bits is
// still unset, leaving a genuinely-covered combination alone.
fn merge_threat(code: u8, actor: &Actor, tile: Tile) -> u8 {
    let mut code = code;
    let splash = actor.archetype == Archetype::Splash;
    let default = actor.archetype.default_attack();

    if default == Attack::Melee {
        code |= MELEE_BIT;
    }
    if default == Attack::Magic || (splash && code & RANGED_BIT == 0) {
        code |= MAGIC_BIT;
    }
    if default == Attack::Ranged || (splash && code & MAGIC_BIT == 0) {
        code |= RANGED_BIT;
    }
    if actor.archetype == Archetype::Warden && actor.zone.in_melee_range(tile) {
        code |= MELEE_BIT;
    }
    code
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn build(player: Tile, radius: i32, arena: &Arena,
             obstacles: &HashSet<Tile>, actors: &mut ActorMap,
             roster: &[ActorId]) -> SafetyGrid {
        SafetyGrid::build(player, radius, arena, obstacles, actors, roster)
    }

    #[test]
    fn test_melee_reaches_everything_in_the_open() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let roster = vec![map.add(Archetype::Brawler, Tile(20, 20, 0))];
        let grid = build(Tile(10, 10, 0), 2, &arena, &HashSet::default(),
                         &mut map, &roster);
        assert_eq!(grid.len(), 25);
        assert!(grid.iter().all(|x| x.1 == MELEE_BIT));
        assert_eq!(grid.optimal_tile(Tile(10, 10, 0)), Tile(10, 10, 0));
    }

    #[test]
    fn test_lone_splash_marks_magic() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let roster = vec![map.add(Archetype::Splash, Tile(12, 12, 0))];
        let grid = build(Tile(10, 10, 0), 1, &arena, &HashSet::default(),
                         &mut map, &roster);
        assert_eq!(grid.code(Tile(10, 10, 0)), Some(MAGIC_BIT));
    }

    #[test]
    fn test_splash_after_ranged_adds_nothing() {
        // The ranged bit is already set, so the splitting kind leaves the
        // magic bit alone rather than double-blocking the tile.
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let marksman = map.add(Archetype::Marksman, Tile(20, 10, 0));
        let splash = map.add(Archetype::Splash, Tile(12, 12, 0));
        let grid = build(Tile(10, 10, 0), 1, &arena, &HashSet::default(),
                         &mut map, &[marksman, splash]);
        assert_eq!(grid.code(Tile(10, 10, 0)), Some(RANGED_BIT));
    }

    #[test]
    fn test_obstacle_tiles_are_untested() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let roster = vec![map.add(Archetype::Sorcerer, Tile(20, 20, 0))];
        let obstacles: HashSet<Tile> = [Tile(10, 11, 0)].into_iter().collect();
        let grid = build(Tile(10, 10, 0), 1, &arena, &obstacles,
                         &mut map, &roster);
        assert_eq!(grid.code(Tile(10, 11, 0)), None);
        assert_eq!(grid.code(Tile(10, 10, 0)), Some(MAGIC_BIT));
    }

    #[test]
    fn test_warden_marks_melee_by_adjacency() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        // Footprint covers (12..17)x(12..17); (11, 12) is cardinally
        // adjacent, (11, 11) only diagonally.
        let roster = vec![map.add(Archetype::Warden, Tile(12, 12, 0))];
        let grid = build(Tile(10, 11, 0), 1, &arena, &HashSet::default(),
                         &mut map, &roster);
        assert_eq!(grid.code(Tile(11, 12, 0)), Some(MELEE_BIT));
        assert_eq!(grid.code(Tile(11, 11, 0)), Some(0));
    }

    #[test]
    fn test_stalled_melee_leaves_safe_tiles() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let roster = vec![map.add(Archetype::Mender, Tile(20, 10, 0))];
        // Wall the mender in so it can neither strike nor path out.
        let ring: HashSet<Tile> = [
            Tile(21, 10, 0), Tile(21, 11, 0), Tile(20, 11, 0), Tile(19, 11, 0),
            Tile(19, 10, 0), Tile(19, 9, 0), Tile(20, 9, 0), Tile(21, 9, 0),
        ].into_iter().collect();
        let grid = build(Tile(10, 10, 0), 1, &arena, &ring, &mut map, &roster);
        assert!(grid.is_safe(Tile(10, 10, 0)));
        assert_eq!(grid.optimal_tile(Tile(15, 15, 0)), Tile(9, 9, 0));
    }

    #[test]
    fn test_build_is_idempotent() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let roster = vec![
            map.add(Archetype::Bat, Tile(13, 10, 0)),
            map.add(Archetype::Splash, Tile(16, 16, 0)),
        ];
        let player = Tile(10, 10, 0);
        let a = build(player, 2, &arena, &HashSet::default(), &mut map, &roster);
        let b = build(player, 2, &arena, &HashSet::default(), &mut map, &roster);
        for (tile, code) in a.iter() {
            assert_eq!(b.code(tile), Some(code));
        }
        assert_eq!(a.len(), b.len());
    }
}
