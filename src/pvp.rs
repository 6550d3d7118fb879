use crate::archetype::Stance;
use crate::base::Tile;

//////////////////////////////////////////////////////////////////////////////

// Freeze spells, identified by the graphic they play on the victim.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Freeze {
    Bind,
    Snare,
    Entangle,
    Rush,
    Burst,
    Blitz,
    Barrage,
    ScorchingBow,
}

impl Freeze {
    pub fn from_graphic(graphic: i32) -> Option<Freeze> {
        match graphic {
            181 => Some(Freeze::Bind),
            180 => Some(Freeze::Snare),
            179 => Some(Freeze::Entangle),
            361 => Some(Freeze::Rush),
            363 => Some(Freeze::Burst),
            367 => Some(Freeze::Blitz),
            369 => Some(Freeze::Barrage),
            2808 => Some(Freeze::ScorchingBow),
            _ => None,
        }
    }

    pub fn duration(&self) -> i32 {
        match self {
            Freeze::Bind => 8,
            Freeze::Snare => 16,
            Freeze::Entangle => 24,
            Freeze::Rush => 8,
            Freeze::Burst => 16,
            Freeze::Blitz => 24,
            Freeze::Barrage => 32,
            Freeze::ScorchingBow => 20,
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

// FreezeTracker: per-opponent immobilization countdown. Movement breaks
// the freeze immediately; switching opponents forgets it.

#[derive(Clone, Copy)]
pub struct Opponent {
    pub id: u64,
    pub pos: Tile,
    pub graphic: i32,
}

#[derive(Default)]
pub struct FreezeTracker {
    opponent: Option<u64>,
    frozen_at: Option<Tile>,
    ticks_remaining: i32,
}

impl FreezeTracker {
    pub fn frozen(&self) -> bool { self.ticks_remaining > 0 }

    pub fn ticks_remaining(&self) -> i32 { self.ticks_remaining }

    pub fn clear(&mut self) {
        self.opponent = None;
        self.frozen_at = None;
        self.ticks_remaining = 0;
    }

    // One observation per tick of whoever the player is fighting.
    pub fn observe(&mut self, opponent: Option<Opponent>) {
        let Some(target) = opponent else { return self.clear(); };

        if let Some(freeze) = Freeze::from_graphic(target.graphic) {
            self.opponent = Some(target.id);
            self.frozen_at = Some(target.pos);
            self.ticks_remaining = freeze.duration();
        } else if self.opponent == Some(target.id) && self.ticks_remaining > 0 {
            if self.frozen_at.map_or(false, |x| x != target.pos) {
                self.ticks_remaining = 0;
            } else {
                self.ticks_remaining -= 1;
            }
        } else if self.opponent != Some(target.id) {
            self.opponent = Some(target.id);
            self.frozen_at = None;
            self.ticks_remaining = 0;
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

// Weapon-style classifier: infer the attack style an opposing player is
// set up for from equipment names. Melee weapons dominate, then ranged;
// a magic weapon over ranged armor reads as ranged (the weapon is bait).

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WeaponStyle { Melee, Ranged, Magic, Unknown }

impl WeaponStyle {
    pub fn counter(&self) -> Option<Stance> {
        match self {
            WeaponStyle::Melee => Some(Stance::Melee),
            WeaponStyle::Ranged => Some(Stance::Ranged),
            WeaponStyle::Magic => Some(Stance::Magic),
            WeaponStyle::Unknown => None,
        }
    }
}

const MELEE_WEAPONS: &[&str] = &[
    "sword", "scimitar", "dagger", "spear", "mace", "axe", "whip", "tentacle",
    "-ket-", "-xil-", "warhammer", "halberd", "claws", "hasta", "scythe",
    "maul", "anchor", "sabre", "excalibur", "machete", "dragon hunter lance",
    "event rpg", "silverlight", "darklight", "arclight", "flail",
    "granite hammer", "rapier", "bulwark", "osmumten's fang", "gsword",
    "godsword",
];

const RANGED_WEAPONS: &[&str] = &[
    "bow", "blowpipe", "xil-ul", "knife", "dart", "thrownaxe", "chinchompa",
    "ballista", "crossbow", "xbow", "shortbow", "longbow", "crystal bow",
    "hand cannon",
];

const MAGIC_WEAPONS: &[&str] = &[
    "staff", "trident", "wand", "dawnbringer", "voidwaker", "sceptre", "tome",
    "kodai", "sanguinesti", "harmonised", "swamp", "nightmare staff",
];

const RANGED_TORSOS: &[&str] = &[
    "hardleather", "studded", "frog-leather", "shayzien", "snakeskin",
    "rangers'", "green d'hide", "spined", "gilded d'hide", "blue d'hide",
    "red d'hide", "mixed hide", "black d'hide", "blessed", "hueycoatl hide",
    "third-age range", "karil's", "crystal body", "eclipse moon",
    "armadyl chestplate", "morrigan's", "masori", "pernix body",
    "void knight top", "elite void top",
];

const MAGIC_TORSOS: &[&str] = &[
    "zamorak monk", "wizard", "black robe", "dark squall", "vestment",
    "ghostly", "moonclan", "xerician", "skeletal", "elder chaos", "lunar",
    "splitbark", "swampbark", "mystic", "enchanted", "darkness", "bloodbark",
    "infinity", "third age mage", "dagon'hai", "blue moon", "ahrim's",
    "virtus", "ancestral", "zuriel", "robe top", "gown", "wizard robe",
];

fn matches_any(name: &str, needles: &[&str]) -> bool {
    needles.iter().any(|x| name.contains(x))
}

fn normalize(name: Option<&str>) -> Option<String> {
    let name = name?.to_lowercase();
    if name == "null" || name == "unarmed" { return None; }
    Some(name)
}

pub fn classify_weapon(weapon: Option<&str>, torso: Option<&str>) -> WeaponStyle {
    let weapon = normalize(weapon);
    let torso = normalize(torso);

    let weapon_is = |t: &[&str]| weapon.as_deref().map_or(false, |x| matches_any(x, t));
    let torso_is = |t: &[&str]| torso.as_deref().map_or(false, |x| matches_any(x, t));

    if weapon_is(MELEE_WEAPONS) { return WeaponStyle::Melee; }
    if weapon_is(RANGED_WEAPONS) { return WeaponStyle::Ranged; }
    if weapon_is(MAGIC_WEAPONS) {
        if torso_is(RANGED_TORSOS) { return WeaponStyle::Ranged; }
        return WeaponStyle::Magic;
    }
    if torso_is(RANGED_TORSOS) { return WeaponStyle::Ranged; }
    if torso_is(MAGIC_TORSOS) { return WeaponStyle::Magic; }
    WeaponStyle::Unknown
}

//////////////////////////////////////////////////////////////////////////////
