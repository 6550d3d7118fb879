use crate::actor::Actor;
use crate::archetype::{Archetype, Attack};
use crate::base::HashMap;

//////////////////////////////////////////////////////////////////////////////

// UpcomingAttacks: tick offset -> attack type -> best (lowest) priority
// among the actors predicted to land that type at that offset. Rebuilt
// from scratch each tick.

#[derive(Default)]
pub struct UpcomingAttacks {
    map: HashMap<i32, HashMap<Attack, i32>>,
}

impl UpcomingAttacks {
    pub fn aggregate<'a>(actors: impl Iterator<Item = &'a Actor>,
                         blob_hint: bool) -> Self {
        let mut result = Self::default();
        for actor in actors {
            if actor.ticks_until_next <= 0 { continue; }
            if !actor.archetype.stance_tracked() { continue; }

            let pending = blob_hint && actor.archetype == Archetype::Splash &&
                          actor.ticks_until_next >= 4;
            if pending {
                result.register_pending_splash(actor);
            } else if actor.next_attack != Attack::Unknown {
                result.register(actor.ticks_until_next, actor.next_attack,
                                actor.archetype.priority());
            }
        }
        result
    }

    pub fn at(&self, offset: i32) -> Option<&HashMap<Attack, i32>> {
        self.map.get(&offset)
    }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    // The soonest predicted attack; ties at an offset go to the entry
    // with the lowest priority, then the hardest-hitting type.
    pub fn closest(&self) -> Option<Attack> {
        let mut best: Option<(i32, i32, Attack)> = None;
        for (&offset, attacks) in &self.map {
            for (&attack, &priority) in attacks {
                let key = (offset, priority, attack);
                let better = match best {
                    None => true,
                    Some((o, p, a)) => {
                        (key.0, key.1, key.2.priority()) < (o, p, a.priority())
                    }
                };
                if better { best = Some(key); }
            }
        }
        best.map(|x| x.2)
    }

    fn register(&mut self, offset: i32, attack: Attack, priority: i32) {
        let entry = self.map.entry(offset).or_default()
            .entry(attack).or_insert(priority);
        *entry = (*entry).min(priority);
    }

    // A splitting actor that has not yet committed to a type charges a
    // magic-or-ranged attack. Register it at its detection tick, carrying
    // forward a type already predicted at the resolution tick or one
    // cycle earlier; with nothing to go on, call it magic.
    fn register_pending_splash(&mut self, actor: &Actor) {
        let ticks = actor.ticks_until_next;
        let known = |offset: i32, attack: Attack| {
            self.map.get(&offset).map_or(false, |x| x.contains_key(&attack))
        };
        let attack = if known(ticks, Attack::Magic) || known(ticks - 4, Attack::Magic) {
            Attack::Magic
        } else if known(ticks, Attack::Ranged) || known(ticks - 4, Attack::Ranged) {
            Attack::Ranged
        } else {
            Attack::Magic
        };
        self.register(ticks - 3, attack, actor.archetype.priority());
    }
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorMap;
    use crate::base::Tile;

    fn pool(entries: &[(Archetype, Attack, i32)]) -> ActorMap {
        let mut map = ActorMap::default();
        for &(archetype, attack, ticks) in entries {
            let aid = map.add(archetype, Tile(0, 0, 0));
            map[aid].update_next_attack(attack, ticks);
        }
        map
    }

    #[test]
    fn test_min_priority_merge() {
        let map = pool(&[
            (Archetype::Bat, Attack::Ranged, 5),
            (Archetype::Marksman, Attack::Ranged, 5),
        ]);
        let upcoming = UpcomingAttacks::aggregate(map.iter().map(|x| x.1), true);
        let at = upcoming.at(5).unwrap();
        assert_eq!(at.get(&Attack::Ranged), Some(&Archetype::Marksman.priority()));
    }

    #[test]
    fn test_untracked_and_idle_actors_are_skipped() {
        let map = pool(&[
            (Archetype::Swarm, Attack::Melee, 3),
            (Archetype::Brawler, Attack::Melee, 0),
            (Archetype::Sorcerer, Attack::Unknown, 4),
        ]);
        let upcoming = UpcomingAttacks::aggregate(map.iter().map(|x| x.1), true);
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_pending_splash_defaults_to_magic() {
        let map = pool(&[(Archetype::Splash, Attack::Unknown, 6)]);
        let upcoming = UpcomingAttacks::aggregate(map.iter().map(|x| x.1), true);
        let at = upcoming.at(3).unwrap();
        assert_eq!(at.get(&Attack::Magic), Some(&Archetype::Splash.priority()));
    }

    #[test]
    fn test_pending_splash_carries_forward_ranged() {
        // A ranged attack already lands at the resolution tick, so the
        // charge is read as ranged rather than the magic default.
        let mut map = pool(&[(Archetype::Bat, Attack::Ranged, 6)]);
        let splash = map.add(Archetype::Splash, Tile(0, 0, 0));
        map[splash].update_next_attack(Attack::Unknown, 6);

        let bat = map.iter().find(|x| x.1.archetype == Archetype::Bat).unwrap().0;
        let actors = [&map[bat], &map[splash]];
        let upcoming = UpcomingAttacks::aggregate(actors.into_iter(), true);
        let at = upcoming.at(3).unwrap();
        assert_eq!(at.get(&Attack::Ranged), Some(&Archetype::Splash.priority()));
        assert_eq!(at.get(&Attack::Magic), None);
    }

    #[test]
    fn test_pending_splash_without_hint_is_dropped() {
        let map = pool(&[(Archetype::Splash, Attack::Unknown, 6)]);
        let upcoming = UpcomingAttacks::aggregate(map.iter().map(|x| x.1), false);
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_closest_prefers_smallest_offset_then_priority() {
        let map = pool(&[
            (Archetype::Bat, Attack::Ranged, 2),
            (Archetype::Sorcerer, Attack::Magic, 2),
            (Archetype::Brawler, Attack::Melee, 6),
        ]);
        let upcoming = UpcomingAttacks::aggregate(map.iter().map(|x| x.1), true);
        // Offset 2 has both a ranged and a magic entry; the sorcerer's
        // lower priority wins.
        assert_eq!(upcoming.closest(), Some(Attack::Magic));
    }
}
