use crate::actor::{Actor, Verdict};
use crate::base::{Arena, HashSet, Tile, Zone};

//////////////////////////////////////////////////////////////////////////////

// Bound on simulated movement steps; past this the path is treated as
// unable to reach a striking position.

const MAX_TRAVEL_STEPS: i32 = 30;

//////////////////////////////////////////////////////////////////////////////

// Strike tests

// Sight plus range from a given footprint. Melee-only kinds must be
// cardinally adjacent; everything else uses Chebyshev distance.
fn strikes_from(actor: &Actor, zone: &Zone, arena: &Arena, target: Tile) -> bool {
    let sight = arena.sight_clear(zone.nearest_tile(target), target);
    let range = if actor.archetype.melee_only() {
        zone.in_melee_range(target)
    } else {
        zone.distance(target) <= actor.archetype.range()
    };
    sight && range
}

// Sight alone, ignoring range. Used for the previous-tick reachability
// trigger of the proximity-gated archetype.
pub fn had_sight(actor: &Actor, arena: &Arena, target: Tile) -> bool {
    arena.sight_clear(actor.zone.nearest_tile(target), target)
}

pub fn can_strike(actor: &mut Actor, arena: &Arena, target: Tile) -> bool {
    if let Some(&verdict) = actor.memo.get(&target) {
        return verdict == Verdict::Immediate;
    }

    let hit = strikes_from(actor, &actor.zone, arena, target);
    if hit {
        actor.memo.insert(target, Verdict::Immediate);
    }
    hit
}

pub fn can_reach_to_strike(actor: &mut Actor, arena: &Arena,
                           obstacles: &HashSet<Tile>, target: Tile) -> bool {
    if let Some(&verdict) = actor.memo.get(&target) {
        return verdict != Verdict::Blocked;
    }

    // The actor's own footprint never blocks its own path.
    let blocked: HashSet<Tile> = obstacles.iter().copied()
        .filter(|x| !actor.zone.contains(*x)).collect();

    let mut current = actor.zone;
    let mut steps = 0;
    loop {
        steps += 1;
        if steps > MAX_TRAVEL_STEPS { return false; }

        match predict_step(&current, arena, &blocked, target) {
            // Cannot resolve a next position: cannot be ruled unsafe.
            Step::Unresolved => {
                actor.memo.insert(target, Verdict::AfterMove);
                return true;
            }
            Step::Stalled => {
                actor.memo.insert(target, Verdict::Blocked);
                return false;
            }
            Step::To(next) => {
                if strikes_from(actor, &next, arena, target) {
                    actor.memo.insert(target, Verdict::AfterMove);
                    return true;
                }
                current = next;
            }
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

// Movement prediction: one travelling step toward the target, diagonal
// first, then each axis alone.

enum Step { To(Zone), Stalled, Unresolved }

fn predict_step(zone: &Zone, arena: &Arena,
                blocked: &HashSet<Tile>, target: Tile) -> Step {
    let Some((gx, gy)) = zone.gap(target) else { return Step::Unresolved; };
    if (gx, gy) == (0, 0) { return Step::Unresolved; }

    let (dx, dy) = (gx.signum(), gy.signum());
    let passable = |z: &Zone| z.tiles().all(|t| !arena.blocks(t) && !blocked.contains(&t));

    let moved = |dx: i32, dy: i32| Zone::new(zone.root.dx(dx).dy(dy), zone.size);
    for (mx, my) in [(dx, dy), (dx, 0), (0, dy)] {
        if (mx, my) == (0, 0) { continue; }
        let next = moved(mx, my);
        if passable(&next) { return Step::To(next); }
    }
    Step::Stalled
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorMap;
    use crate::archetype::Archetype;

    fn spawn(map: &mut ActorMap, archetype: Archetype, pos: Tile) -> &mut Actor {
        let aid = map.add(archetype, pos);
        map.get_mut(aid).unwrap()
    }

    #[test]
    fn test_out_of_range_never_strikes() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let bat = spawn(&mut map, Archetype::Bat, Tile(0, 0, 0));
        assert!(bat.archetype.range() == 4);
        assert!(can_strike(bat, &arena, Tile(4, 0, 0)));
        assert!(!can_strike(bat, &arena, Tile(7, 0, 0)));
        assert!(!can_strike(bat, &arena, Tile(0, 0, 1)));
    }

    #[test]
    fn test_melee_requires_adjacency() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let brawler = spawn(&mut map, Archetype::Brawler, Tile(0, 0, 0));
        assert!(can_strike(brawler, &arena, Tile(4, 0, 0)));
        assert!(!can_strike(brawler, &arena, Tile(4, 4, 0)));
        assert!(!can_strike(brawler, &arena, Tile(5, 0, 0)));
    }

    #[test]
    fn test_reach_steps_past_a_wall_tile() {
        // A lone wall tile on the straight line: the melee actor still
        // closes in, and strikes once cardinally adjacent.
        let arena = Arena::new([Tile(3, 3, 0)]);
        let mut map = ActorMap::default();
        let mender = spawn(&mut map, Archetype::Mender, Tile(1, 3, 0));
        let target = Tile(5, 4, 0);
        assert!(!can_strike(mender, &arena, target));
        assert!(can_reach_to_strike(mender, &arena, &HashSet::default(), target));
        assert_eq!(mender.memo.get(&target), Some(&Verdict::AfterMove));
    }

    #[test]
    fn test_reach_stalls_against_a_wall_column() {
        // Greedy travel only steps toward the target; a full column on
        // the way means the actor never reaches a striking position.
        let arena = Arena::new((0..7).map(|y| Tile(3, y, 0)));
        let mut map = ActorMap::default();
        let mender = spawn(&mut map, Archetype::Mender, Tile(1, 3, 0));
        assert!(!can_reach_to_strike(mender, &arena, &HashSet::default(), Tile(5, 3, 0)));
    }

    #[test]
    fn test_surrounded_actor_stalls() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let mender = spawn(&mut map, Archetype::Mender, Tile(0, 0, 0));
        let ring: HashSet<Tile> = [
            Tile(1, 0, 0), Tile(1, 1, 0), Tile(0, 1, 0), Tile(-1, 1, 0),
            Tile(-1, 0, 0), Tile(-1, -1, 0), Tile(0, -1, 0), Tile(1, -1, 0),
        ].into_iter().collect();
        assert!(!can_reach_to_strike(mender, &arena, &ring, Tile(5, 0, 0)));
        // Stalls are memoized for the rest of the tick.
        assert_eq!(mender.memo.get(&Tile(5, 0, 0)), Some(&Verdict::Blocked));
    }

    #[test]
    fn test_target_underneath_is_conservatively_reachable() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let splash = spawn(&mut map, Archetype::Splash, Tile(0, 0, 0));
        // Tile inside the footprint: path prediction cannot resolve.
        assert!(can_reach_to_strike(splash, &arena, &HashSet::default(), Tile(1, 1, 0)));
    }

    #[test]
    fn test_memo_is_consulted() {
        let arena = Arena::open();
        let mut map = ActorMap::default();
        let bat = spawn(&mut map, Archetype::Bat, Tile(0, 0, 0));
        bat.memo.insert(Tile(2, 0, 0), Verdict::Blocked);
        assert!(!can_strike(bat, &arena, Tile(2, 0, 0)));
        assert!(!can_reach_to_strike(bat, &arena, &HashSet::default(), Tile(2, 0, 0)));
    }
}
