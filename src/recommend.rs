use crate::actor::{ActorId, ActorMap};
use crate::archetype::{Attack, Stance};
use crate::base::{Arena, HashMap, Tile};
use crate::grid::SafetyGrid;
use crate::oracle::can_strike;

//////////////////////////////////////////////////////////////////////////////

// How to break ties when several attack types land on the same tick.

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RecommendMode {
    #[default]
    LowestPriority,
    MostCommon,
    First,
}

//////////////////////////////////////////////////////////////////////////////

// The attacks landing on the player this tick, in roster order, with the
// attacker's static priority.

pub fn attacks_this_tick(actors: &mut ActorMap, roster: &[ActorId],
                         arena: &Arena, player: Tile) -> Vec<(Attack, i32)> {
    let mut result = vec![];
    for &aid in roster {
        let Some(actor) = actors.get_mut(aid) else { continue; };
        if actor.ticks_until_next != 0 { continue; }
        if actor.next_attack.stance().is_none() { continue; }
        if !can_strike(actor, arena, player) { continue; }
        result.push((actor.next_attack, actor.archetype.priority()));
    }
    result
}

pub fn recommend(actors: &mut ActorMap, roster: &[ActorId], arena: &Arena,
                 player: Tile, grid: &SafetyGrid,
                 mode: RecommendMode) -> Option<Stance> {
    // Standing on a confirmed safe tile beats any stance.
    if grid.is_safe(player) { return None; }

    let attacks = attacks_this_tick(actors, roster, arena, player);
    let chosen = match mode {
        RecommendMode::LowestPriority => {
            // Melee hits hardest unprayed, then ranged, then magic; the
            // attacker's own rank only breaks ties.
            attacks.iter().min_by_key(|x| (x.0.priority(), x.1)).map(|x| x.0)
        }
        RecommendMode::MostCommon => {
            let mut tally: HashMap<Attack, (usize, i32)> = HashMap::default();
            for &(attack, priority) in &attacks {
                let entry = tally.entry(attack).or_insert((0, priority));
                entry.0 += 1;
                entry.1 = entry.1.min(priority);
            }
            // Highest count wins; ties go to the lowest priority.
            tally.into_iter()
                .min_by_key(|&(_, (count, priority))| (-(count as i64), priority))
                .map(|x| x.0)
        }
        RecommendMode::First => attacks.first().map(|x| x.0),
    };
    chosen.and_then(|x| x.stance())
}

//////////////////////////////////////////////////////////////////////////////
