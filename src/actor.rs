use std::iter::FusedIterator;
use std::num::NonZeroU64;
use std::ops::{Index, IndexMut};

use slotmap::{DefaultKey, Key, KeyData};
use slotmap::hop::HopSlotMap;

use crate::static_assert_size;
use crate::archetype::{Archetype, Attack, IDLE_ANIMATION};
use crate::base::{HashMap, Tile, Zone};

//////////////////////////////////////////////////////////////////////////////

// Verdict: the cached answer for "can this actor hit that tile", memoized
// per (actor, tile) for the remainder of the current tick.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict { Blocked, AfterMove, Immediate }

//////////////////////////////////////////////////////////////////////////////

// Actor

pub struct Actor {
    pub aid: ActorId,
    pub archetype: Archetype,
    pub zone: Zone,

    // Cycle state:
    pub next_attack: Attack,
    pub ticks_until_next: i32,
    pub idle_ticks: i32,
    pub animation: i32,
    pub last_animation: i32,
    pub last_could_strike: bool,

    // Tick-scoped strike memo, cleared when the cycle advances.
    pub memo: HashMap<Tile, Verdict>,
}

impl Actor {
    fn new(aid: ActorId, archetype: Archetype, pos: Tile) -> Self {
        Self {
            aid,
            archetype,
            zone: Zone::new(pos, archetype.size()),

            // Cycle state:
            next_attack: archetype.default_attack(),
            ticks_until_next: 0,
            idle_ticks: 0,
            animation: IDLE_ANIMATION,
            last_animation: IDLE_ANIMATION,
            last_could_strike: false,

            memo: HashMap::default(),
        }
    }

    pub fn update_next_attack(&mut self, attack: Attack, ticks: i32) {
        self.idle_ticks = 0;
        self.next_attack = attack;
        self.ticks_until_next = ticks;
    }

    pub fn retype_next_attack(&mut self, attack: Attack) {
        self.next_attack = attack;
    }
}

//////////////////////////////////////////////////////////////////////////////

// ActorId

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ActorId(NonZeroU64);
static_assert_size!(Option<ActorId>, 8);

impl Default for ActorId {
    fn default() -> Self {
        to_aid(DefaultKey::null())
    }
}

fn to_key(aid: ActorId) -> DefaultKey {
    KeyData::from_ffi(aid.0.get()).into()
}

fn to_aid(key: DefaultKey) -> ActorId {
    ActorId(NonZeroU64::new(key.data().as_ffi()).unwrap())
}

//////////////////////////////////////////////////////////////////////////////

// ActorMap

type BaseMap = HopSlotMap<DefaultKey, Actor>;

#[derive(Default)]
pub struct ActorMap(BaseMap);

impl ActorMap {
    pub fn add(&mut self, archetype: Archetype, pos: Tile) -> ActorId {
        to_aid(self.0.insert_with_key(|x| Actor::new(to_aid(x), archetype, pos)))
    }

    pub fn clear(&mut self) { self.0.clear(); }

    pub fn get(&self, aid: ActorId) -> Option<&Actor> { self.0.get(to_key(aid)) }

    pub fn get_mut(&mut self, aid: ActorId) -> Option<&mut Actor> { self.0.get_mut(to_key(aid)) }

    pub fn has(&self, aid: ActorId) -> bool { self.0.contains_key(to_key(aid)) }

    pub fn remove(&mut self, aid: ActorId) -> Option<Actor> { self.0.remove(to_key(aid)) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> Iter<'_> { Iter(self.0.iter()) }

    pub fn iter_mut(&mut self) -> IterMut<'_> { IterMut(self.0.iter_mut()) }
}

impl Index<ActorId> for ActorMap {
    type Output = Actor;
    fn index(&self, aid: ActorId) -> &Self::Output {
        self.get(aid).unwrap()
    }
}

impl IndexMut<ActorId> for ActorMap {
    fn index_mut(&mut self, aid: ActorId) -> &mut Self::Output {
        self.get_mut(aid).unwrap()
    }
}

impl<'a> IntoIterator for &'a ActorMap {
    type Item = (ActorId, &'a Actor);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a> IntoIterator for &'a mut ActorMap {
    type Item = (ActorId, &'a mut Actor);
    type IntoIter = IterMut<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

//////////////////////////////////////////////////////////////////////////////

// ActorMap iterators

pub struct Iter<'a>(slotmap::hop::Iter<'a, DefaultKey, Actor>);

pub struct IterMut<'a>(slotmap::hop::IterMut<'a, DefaultKey, Actor>);

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> FusedIterator for IterMut<'a> {}

impl<'a> Iterator for Iter<'a> {
    type Item = (ActorId, &'a Actor);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (to_aid(k), v))
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (ActorId, &'a mut Actor);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (to_aid(k), v))
    }
}

//////////////////////////////////////////////////////////////////////////////
