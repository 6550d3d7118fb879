use crate::actor::Actor;
use crate::archetype::*;
use crate::base::{Arena, Tile};
use crate::oracle::{can_strike, had_sight};

//////////////////////////////////////////////////////////////////////////////

// The player as seen by the cycle trackers this tick.

#[derive(Clone, Copy)]
pub struct PlayerView {
    pub pos: Tile,
    pub last_pos: Tile,
    pub stance: Option<Stance>,
}

pub struct CycleContext<'a> {
    pub arena: &'a Arena,
    pub player: PlayerView,
    pub final_phase: bool,
    pub ticks_since_final_phase: i32,
}

//////////////////////////////////////////////////////////////////////////////

// One tick of cycle tracking for a single actor. Animation observations
// for the current tick must already be applied to actor.animation.

pub fn advance(actor: &mut Actor, ctx: &CycleContext) {
    actor.memo.clear();
    actor.idle_ticks += 1;
    if actor.ticks_until_next > 0 {
        actor.ticks_until_next -= 1;
    }

    let animation = actor.animation;
    let view = ctx.player;

    // The boss-room tank telegraphs its attack type mid-cycle by the
    // animation it plays, overriding whatever we had predicted.
    if actor.archetype == Archetype::Warden &&
       animation != IDLE_ANIMATION && animation != actor.last_animation {
        if let Some(attack) = Attack::from_animation(animation) {
            actor.update_next_attack(attack, 3);
        }
    }

    if actor.ticks_until_next <= 0 {
        match actor.archetype {
            Archetype::Overseer => {
                if animation == OVERSEER_SLAM {
                    if ctx.final_phase {
                        if ctx.ticks_since_final_phase > 3 {
                            actor.update_next_attack(actor.archetype.default_attack(), 7);
                        }
                    } else {
                        actor.update_next_attack(actor.archetype.default_attack(), 10);
                    }
                }
            }
            Archetype::Warden => {
                // The cycle continues with no animation to mark it, and
                // the type is only learned from the next telegraph.
                if actor.next_attack != Attack::Unknown {
                    actor.update_next_attack(actor.archetype.default_attack(), 8);
                }
            }
            Archetype::Splash => {
                // Engine pathing grants this kind an attack one tick
                // after gaining sight of where the player stood.
                if !actor.last_could_strike &&
                   had_sight(actor, ctx.arena, view.last_pos) {
                    actor.update_next_attack(Attack::Unknown, 3);
                } else if !actor.last_could_strike &&
                          can_strike(actor, ctx.arena, view.pos) {
                    actor.update_next_attack(Attack::Unknown, 4);
                } else if animation != IDLE_ANIMATION {
                    actor.update_next_attack(actor.archetype.default_attack(), 6);
                }
            }
            Archetype::Bat => {
                if animation != BAT_STAND && animation != IDLE_ANIMATION &&
                   can_strike(actor, ctx.arena, view.pos) {
                    actor.update_next_attack(actor.archetype.default_attack(), 3);
                }
            }
            Archetype::Brawler | Archetype::Marksman | Archetype::Sorcerer => {
                match animation {
                    BRAWLER_SMASH | MARKSMAN_MELEE | MARKSMAN_SHOOT |
                    SORCERER_CAST | SORCERER_MELEE => {
                        let cycle = actor.archetype.attack_cycle();
                        actor.update_next_attack(actor.archetype.default_attack(), cycle);
                    }
                    BRAWLER_BURROW => {
                        actor.update_next_attack(actor.archetype.default_attack(), 12);
                    }
                    SORCERER_REVIVE => {
                        actor.update_next_attack(actor.archetype.default_attack(), 8);
                    }
                    _ => {}
                }
            }
            _ => {
                if animation != IDLE_ANIMATION {
                    let cycle = actor.archetype.attack_cycle();
                    actor.update_next_attack(actor.archetype.default_attack(), cycle);
                }
            }
        }
    }

    // Three ticks out, the splitting kind commits to the type countered
    // by the stance the player holds right now.
    if actor.archetype == Archetype::Splash && actor.ticks_until_next == 3 &&
       actor.zone.distance(view.pos) <= actor.archetype.range() {
        let attack = match view.stance {
            Some(Stance::Ranged) => Attack::Magic,
            Some(Stance::Magic) => Attack::Ranged,
            _ => Attack::Unknown,
        };
        actor.retype_next_attack(attack);
    }

    actor.last_animation = animation;
    actor.last_could_strike = can_strike(actor, ctx.arena, view.pos);
}

//////////////////////////////////////////////////////////////////////////////
