use lazy_static::lazy_static;

use crate::base::HashMap;

//////////////////////////////////////////////////////////////////////////////

// Animation codes

pub const IDLE_ANIMATION: i32 = -1;

pub const SWARM_BITE: i32 = 7574;
pub const SWARM_DEATH: i32 = 7576;
pub const BAT_STAND: i32 = 7577;
pub const BAT_SHOOT: i32 = 7578;
pub const SPLASH_RANGE: i32 = 7581;
pub const SPLASH_MELEE: i32 = 7582;
pub const SPLASH_MAGIC: i32 = 7583;
pub const BRAWLER_SMASH: i32 = 7597;
pub const BRAWLER_BURROW: i32 = 7600;
pub const MARKSMAN_MELEE: i32 = 7604;
pub const MARKSMAN_SHOOT: i32 = 7605;
pub const SORCERER_CAST: i32 = 7610;
pub const SORCERER_REVIVE: i32 = 7611;
pub const SORCERER_MELEE: i32 = 7612;
pub const WARDEN_MAGE_BLAST: i32 = 7592;
pub const WARDEN_RANGE_VOLLEY: i32 = 7593;
pub const OVERSEER_SLAM: i32 = 7566;

//////////////////////////////////////////////////////////////////////////////

// Spawn ids, as delivered by the host's spawn events.

const SWARM_IDS: &[i32] = &[7691];
const BAT_IDS: &[i32] = &[7692];
const SPLASH_IDS: &[i32] = &[7693];
const BRAWLER_IDS: &[i32] = &[7697];
const MARKSMAN_IDS: &[i32] = &[7698, 7702];
const SORCERER_IDS: &[i32] = &[7699, 7703];
const WARDEN_IDS: &[i32] = &[7700, 7704, 10623];
const MENDER_IDS: &[i32] = &[7696, 7701, 7705];
const OVERSEER_IDS: &[i32] = &[7706];
const OVERSEER_MENDER_IDS: &[i32] = &[7708, 10624];

pub const SHIELD_ID: i32 = 7707;

//////////////////////////////////////////////////////////////////////////////

// Stance and Attack

// The three protective stances; one per concrete attack type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stance { Melee, Ranged, Magic }

impl Stance {
    pub fn counters(&self) -> Attack {
        match self {
            Stance::Melee => Attack::Melee,
            Stance::Ranged => Attack::Ranged,
            Stance::Magic => Attack::Magic,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Attack { Melee, Ranged, Magic, Unknown }

impl Attack {
    pub fn stance(&self) -> Option<Stance> {
        match self {
            Attack::Melee => Some(Stance::Melee),
            Attack::Ranged => Some(Stance::Ranged),
            Attack::Magic => Some(Stance::Magic),
            Attack::Unknown => None,
        }
    }

    // Arbitration rank for simultaneous attacks: lower lands harder.
    pub fn priority(&self) -> i32 {
        match self {
            Attack::Melee => 1,
            Attack::Ranged => 2,
            Attack::Magic => 3,
            Attack::Unknown => 99,
        }
    }

    pub fn from_animation(animation: i32) -> Option<Attack> {
        ATTACK_ANIMATIONS.get(&animation).copied()
    }
}

lazy_static! {
    static ref ATTACK_ANIMATIONS: HashMap<i32, Attack> = {
        let items = [
            (SWARM_BITE, Attack::Melee),
            (SPLASH_MELEE, Attack::Melee),
            (BRAWLER_SMASH, Attack::Melee),
            (MARKSMAN_MELEE, Attack::Melee),
            (SORCERER_MELEE, Attack::Melee),
            (BAT_SHOOT, Attack::Ranged),
            (SPLASH_RANGE, Attack::Ranged),
            (MARKSMAN_SHOOT, Attack::Ranged),
            (WARDEN_RANGE_VOLLEY, Attack::Ranged),
            (SPLASH_MAGIC, Attack::Magic),
            (SORCERER_CAST, Attack::Magic),
            (WARDEN_MAGE_BLAST, Attack::Magic),
        ];
        let mut result = HashMap::default();
        for (animation, attack) in items {
            result.insert(animation, attack);
        }
        result
    };
}

//////////////////////////////////////////////////////////////////////////////

// Archetype: the closed set of hostile creature kinds. All per-kind
// behavior is dispatched by match; the set never grows at runtime.

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Archetype {
    Swarm,
    Bat,
    Splash,
    Brawler,
    Marksman,
    Sorcerer,
    Warden,
    Mender,
    Overseer,
    OverseerMender,
}

impl Archetype {
    pub fn from_spawn_id(id: i32) -> Option<Archetype> {
        let all = [
            (SWARM_IDS, Archetype::Swarm),
            (BAT_IDS, Archetype::Bat),
            (SPLASH_IDS, Archetype::Splash),
            (BRAWLER_IDS, Archetype::Brawler),
            (MARKSMAN_IDS, Archetype::Marksman),
            (SORCERER_IDS, Archetype::Sorcerer),
            (WARDEN_IDS, Archetype::Warden),
            (MENDER_IDS, Archetype::Mender),
            (OVERSEER_IDS, Archetype::Overseer),
            (OVERSEER_MENDER_IDS, Archetype::OverseerMender),
        ];
        all.iter().find(|x| x.0.contains(&id)).map(|x| x.1)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Swarm => "Swarm",
            Archetype::Bat => "Bat",
            Archetype::Splash => "Splash",
            Archetype::Brawler => "Brawler",
            Archetype::Marksman => "Marksman",
            Archetype::Sorcerer => "Sorcerer",
            Archetype::Warden => "Warden",
            Archetype::Mender => "Mender",
            Archetype::Overseer => "Overseer",
            Archetype::OverseerMender => "Overseer Mender",
        }
    }

    pub fn default_attack(&self) -> Attack {
        match self {
            Archetype::Swarm => Attack::Melee,
            Archetype::Bat => Attack::Ranged,
            Archetype::Splash => Attack::Unknown,
            Archetype::Brawler => Attack::Melee,
            Archetype::Marksman => Attack::Ranged,
            Archetype::Sorcerer => Attack::Magic,
            Archetype::Warden => Attack::Unknown,
            Archetype::Mender => Attack::Melee,
            Archetype::Overseer => Attack::Unknown,
            Archetype::OverseerMender => Attack::Unknown,
        }
    }

    // Ticks from a recognized attack animation to the next attack.
    pub fn attack_cycle(&self) -> i32 {
        match self {
            Archetype::Swarm => 4,
            Archetype::Bat => 3,
            Archetype::Splash => 6,
            Archetype::Brawler => 4,
            Archetype::Marksman => 4,
            Archetype::Sorcerer => 4,
            Archetype::Warden => 3,
            Archetype::Mender => 4,
            Archetype::Overseer => 10,
            Archetype::OverseerMender => -1,
        }
    }

    pub fn range(&self) -> i32 {
        match self {
            Archetype::Swarm => 99,
            Archetype::Bat => 4,
            Archetype::Splash => 15,
            Archetype::Brawler => 1,
            Archetype::Marksman => 98,
            Archetype::Sorcerer => 98,
            Archetype::Warden => 99,
            Archetype::Mender => 1,
            Archetype::Overseer => 99,
            Archetype::OverseerMender => 99,
        }
    }

    // Static tie-break priority; lower is more urgent.
    pub fn priority(&self) -> i32 {
        match self {
            Archetype::Swarm => 100,
            Archetype::Bat => 7,
            Archetype::Splash => 4,
            Archetype::Brawler => 3,
            Archetype::Marksman => 2,
            Archetype::Sorcerer => 1,
            Archetype::Warden => 0,
            Archetype::Mender => 6,
            Archetype::Overseer => 99,
            Archetype::OverseerMender => 100,
        }
    }

    // Footprint side length, in tiles.
    pub fn size(&self) -> i32 {
        match self {
            Archetype::Swarm => 1,
            Archetype::Bat => 2,
            Archetype::Splash => 3,
            Archetype::Brawler => 4,
            Archetype::Marksman => 3,
            Archetype::Sorcerer => 4,
            Archetype::Warden => 5,
            Archetype::Mender => 1,
            Archetype::Overseer => 7,
            Archetype::OverseerMender => 1,
        }
    }

    // Kinds whose upcoming attacks feed the stance recommendation.
    pub fn stance_tracked(&self) -> bool {
        match self {
            Archetype::Bat | Archetype::Splash | Archetype::Brawler |
            Archetype::Marksman | Archetype::Sorcerer | Archetype::Mender |
            Archetype::Warden => true,
            Archetype::Swarm | Archetype::Overseer | Archetype::OverseerMender => false,
        }
    }

    // Kinds scanned when classifying safe tiles.
    pub fn safespot_tracked(&self) -> bool {
        self.stance_tracked()
    }

    pub fn melee_only(&self) -> bool {
        self.default_attack() == Attack::Melee
    }
}

//////////////////////////////////////////////////////////////////////////////
