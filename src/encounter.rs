use crate::actor::{ActorId, ActorMap};
use crate::archetype::{Archetype, Attack, Stance, SHIELD_ID, SWARM_DEATH};
use crate::base::{Arena, HashSet, Tile, Zone};
use crate::cycle::{self, CycleContext, PlayerView};
use crate::debug::{self, DebugLog};
use crate::grid::SafetyGrid;
use crate::predict::UpcomingAttacks;
use crate::recommend::{self, RecommendMode};
use crate::shield::{safe_zone, ShieldTracker};

//////////////////////////////////////////////////////////////////////////////

pub const TERMINAL_WAVE: i32 = 69;

// Boss health thresholds gating the terminal-phase spawn timer.
const SPAWN_PAUSE_HP: i32 = 600;
const SPAWN_RESUME_HP: i32 = 480;

//////////////////////////////////////////////////////////////////////////////

// Options

pub struct Options {
    pub check_radius: i32,
    pub mode: RecommendMode,
    pub blob_detection_hint: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            check_radius: 3,
            mode: RecommendMode::default(),
            blob_detection_hint: true,
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

// Tick I/O

pub struct TickInput<'a> {
    pub player: Tile,
    pub stance: Option<Stance>,

    // Observed actor positions this tick, for actors that moved.
    pub movements: &'a [(ActorId, Tile)],

    // Impassable tiles beyond tracked actor footprints.
    pub blockers: &'a [Tile],

    pub shield_pos: Option<Tile>,
    pub boss_health: Option<i32>,
}

impl<'a> Default for TickInput<'a> {
    fn default() -> Self {
        Self {
            player: Tile(0, 0, 0),
            stance: None,
            movements: &[],
            blockers: &[],
            shield_pos: None,
            boss_health: None,
        }
    }
}

pub struct TickReport {
    pub stance: Option<Stance>,
    pub stance_changed: bool,
    pub closest_attack: Option<Attack>,
    pub closest_changed: bool,
    pub flickable: bool,
    pub on_safe_tile: bool,
    pub optimal_tile: Tile,
}

//////////////////////////////////////////////////////////////////////////////

// SpawnTimer: counts ticks toward the next terminal-phase spawn. Runs
// from boss spawn, pauses and resumes on the boss's health thresholds.

pub struct SpawnTimer {
    ticks: i32,
    running: bool,
}

impl SpawnTimer {
    fn started() -> Self { Self { ticks: 0, running: true } }

    pub fn ticks(&self) -> i32 { self.ticks }

    pub fn running(&self) -> bool { self.running }

    fn run(&mut self) { self.running = true; }

    fn pause(&mut self) { self.running = false; }

    fn reset(&mut self) { self.ticks = 0; }

    fn tick(&mut self) { if self.running { self.ticks += 1; } }
}

//////////////////////////////////////////////////////////////////////////////

// Encounter: all mutable state for one fight, advanced by host events
// plus one tick() call per game tick.

pub struct Encounter {
    arena: Arena,
    options: Options,
    actors: ActorMap,

    // Processing order: most kinds join at the front, the splitting kind
    // at the back so it sees everyone else's predictions when merging.
    roster: Vec<ActorId>,

    wave: i32,
    final_phase: bool,
    final_phase_tick: bool,
    ticks_since_final_phase: i32,

    boss: Option<ActorId>,
    shield: ShieldTracker,
    spawn_timer: Option<SpawnTimer>,

    grid: SafetyGrid,
    obstacles: HashSet<Tile>,
    central_swarm: Option<ActorId>,
    log: DebugLog,

    last_player: Option<Tile>,
    last_stance: Option<Stance>,
    last_closest: Option<Attack>,
}

impl Encounter {
    pub fn new(arena: Arena, options: Options) -> Self {
        Self {
            arena,
            options,
            actors: ActorMap::default(),
            roster: vec![],
            wave: -1,
            final_phase: false,
            final_phase_tick: false,
            ticks_since_final_phase: 0,
            boss: None,
            shield: ShieldTracker::default(),
            spawn_timer: None,
            grid: SafetyGrid::default(),
            obstacles: HashSet::default(),
            central_swarm: None,
            log: DebugLog::default(),
            last_player: None,
            last_stance: None,
            last_closest: None,
        }
    }

    //////////////////////////////////////////////////////////////////////////
    // Host events

    // An actor appeared. Returns None for ids we don't track as actors
    // (the shield, and anything unrecognized).
    pub fn spawn(&mut self, id: i32, pos: Tile) -> Option<ActorId> {
        if id == SHIELD_ID {
            self.shield.observe(pos);
            return None;
        }

        let archetype = Archetype::from_spawn_id(id)?;
        let aid = self.actors.add(archetype, pos);

        match archetype {
            Archetype::Splash => {
                self.roster.push(aid);
                return Some(aid);
            }
            Archetype::Sorcerer => {
                // A reviver appearing mid-boss marks a spawn cycle.
                if self.boss.is_some() {
                    if let Some(timer) = &mut self.spawn_timer {
                        timer.reset();
                        timer.run();
                    }
                }
            }
            Archetype::Overseer => {
                self.final_phase = false;
                self.shield.reset();
                self.boss = Some(aid);
                self.spawn_timer = Some(SpawnTimer::started());
            }
            Archetype::OverseerMender => {
                self.final_phase = true;
                self.final_phase_tick = true;
                self.ticks_since_final_phase = 1;
                for (_, actor) in &mut self.actors {
                    if actor.archetype == Archetype::Overseer {
                        actor.ticks_until_next = -1;
                    }
                }
            }
            _ => {}
        }

        self.roster.insert(0, aid);
        Some(aid)
    }

    pub fn despawn(&mut self, aid: ActorId) {
        if self.boss == Some(aid) {
            self.boss = None;
            self.spawn_timer = None;
        }
        self.roster.retain(|x| *x != aid);
        self.actors.remove(aid);
    }

    pub fn animation_changed(&mut self, aid: ActorId, animation: i32) {
        let Some(actor) = self.actors.get_mut(aid) else { return; };
        actor.animation = animation;

        // The smallest kind plays its death animation ticks before it
        // actually despawns; stop tracking it immediately.
        if actor.archetype == Archetype::Swarm && animation == SWARM_DEATH {
            self.despawn(aid);
        }
    }

    // Wave counters arrive in game messages as "... Wave: <n><...". A
    // message that doesn't parse leaves the counter alone.
    pub fn chat_message(&mut self, message: &str) {
        if !message.contains("Wave:") { return; }
        let Some(start) = message.find(": ") else { return; };
        let rest = &message[start + 2..];
        let end = rest.find('<').unwrap_or(rest.len());
        if let Ok(wave) = rest[..end].trim().parse::<i32>() {
            self.wave = wave;
        }
    }

    //////////////////////////////////////////////////////////////////////////
    // The tick pipeline

    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        for &(aid, pos) in input.movements {
            if let Some(actor) = self.actors.get_mut(aid) {
                actor.zone = Zone::new(pos, actor.archetype.size());
            }
        }

        self.obstacles.clear();
        for (_, actor) in &self.actors {
            self.obstacles.extend(actor.zone.tiles());
        }
        self.obstacles.extend(input.blockers.iter().copied());

        let view = PlayerView {
            pos: input.player,
            last_pos: self.last_player.unwrap_or(input.player),
            stance: input.stance,
        };
        let ctx = CycleContext {
            arena: &self.arena,
            player: view,
            final_phase: self.final_phase,
            ticks_since_final_phase: self.ticks_since_final_phase,
        };
        for i in 0..self.roster.len() {
            let aid = self.roster[i];
            let Some(actor) = self.actors.get_mut(aid) else { continue; };
            cycle::advance(actor, &ctx);

            // The shield starting to move restarts the boss's cycle.
            if actor.archetype == Archetype::Overseer && self.shield.corner_pending() {
                actor.update_next_attack(Attack::Unknown, 12);
                self.shield.consume_corner();
            }
        }

        let upcoming = UpcomingAttacks::aggregate(
            self.roster.iter().filter_map(|x| self.actors.get(*x)),
            self.options.blob_detection_hint);
        let closest = upcoming.closest();
        let closest_changed = closest != self.last_closest;
        self.last_closest = closest;

        self.rebuild_grid(input);

        let stance = recommend::recommend(
            &mut self.actors, &self.roster, &self.arena, input.player,
            &self.grid, self.options.mode);
        let stance_changed = stance != self.last_stance;
        self.last_stance = stance;

        let attacks = recommend::attacks_this_tick(
            &mut self.actors, &self.roster, &self.arena, input.player);
        let mut distinct: Vec<Attack> = vec![];
        for &(attack, _) in &attacks {
            if !distinct.contains(&attack) { distinct.push(attack); }
        }
        let splash_alive = self.iter_roster().any(|x| x.archetype == Archetype::Splash);
        let flickable = distinct.len() == 1 && !splash_alive;

        self.recompute_central_swarm(input.player);
        self.update_spawn_timer(input.boss_health);

        if self.final_phase_tick {
            self.final_phase_tick = false;
        } else if self.final_phase {
            self.ticks_since_final_phase += 1;
        }

        self.log = DebugLog::default();
        debug::snapshot(&mut self.log, self.roster.iter()
            .filter_map(|x| self.actors.get(*x)));

        self.last_player = Some(input.player);

        TickReport {
            stance,
            stance_changed,
            closest_attack: closest,
            closest_changed,
            flickable,
            on_safe_tile: self.grid.is_safe(input.player),
            optimal_tile: self.grid.optimal_tile(input.player),
        }
    }

    // On the terminal wave, safety comes from the shield's live and
    // predicted positions; before it, from the per-actor scan.
    fn rebuild_grid(&mut self, input: &TickInput) {
        if self.wave == TERMINAL_WAVE {
            let mut grid = SafetyGrid::default();
            if let Some(pos) = input.shield_pos {
                self.shield.observe(pos);
                for tile in safe_zone(pos.0, pos.1, pos.2) {
                    grid.insert(tile, 0);
                }

                let boss_ticks = self.boss.and_then(|x| self.actors.get(x))
                    .map_or(0, |x| x.ticks_until_next);
                if let Some(x) = self.shield.predicted_x(boss_ticks, self.final_phase) {
                    for tile in safe_zone(x, pos.1, pos.2) {
                        grid.insert(tile, 2);
                    }
                }
            }
            self.grid = grid;
        } else {
            self.grid = SafetyGrid::build(
                input.player, self.options.check_radius, &self.arena,
                &self.obstacles, &mut self.actors, &self.roster);
        }
    }

    // The swarm with the most swarms packed around it; ties go to the
    // one nearest the player.
    fn recompute_central_swarm(&mut self, player: Tile) {
        let swarms: Vec<(ActorId, Tile)> = self.iter_roster()
            .filter(|x| x.archetype == Archetype::Swarm)
            .map(|x| (x.aid, x.zone.root))
            .collect();

        let mut best: Option<(usize, i32, ActorId)> = None;
        for &(aid, root) in &swarms {
            let packed = swarms.iter().filter(|x| root.chebyshev(x.1) <= 1).count();
            let distance = root.chebyshev(player);
            let better = match best {
                None => true,
                Some((n, d, _)) => packed > n || (packed == n && distance < d),
            };
            if better { best = Some((packed, distance, aid)); }
        }
        self.central_swarm = best.map(|x| x.2);
    }

    fn update_spawn_timer(&mut self, boss_health: Option<i32>) {
        let boss_alive = self.boss.is_some();
        let final_phase = self.final_phase;
        let Some(timer) = &mut self.spawn_timer else { return; };

        if boss_alive && !final_phase {
            if let Some(hp) = boss_health {
                if hp > 0 {
                    if timer.running() {
                        if hp >= SPAWN_RESUME_HP && hp < SPAWN_PAUSE_HP {
                            timer.pause();
                        }
                    } else if hp < SPAWN_RESUME_HP {
                        timer.run();
                    }
                }
            }
        }
        timer.tick();
    }

    //////////////////////////////////////////////////////////////////////////
    // Accessors

    pub fn wave(&self) -> i32 { self.wave }

    pub fn next_wave(&self) -> i32 {
        if self.wave == -1 || self.wave == TERMINAL_WAVE { -1 } else { self.wave + 1 }
    }

    pub fn set_wave(&mut self, wave: i32) { self.wave = wave; }

    pub fn final_phase(&self) -> bool { self.final_phase }

    pub fn actors(&self) -> &ActorMap { &self.actors }

    pub fn roster(&self) -> &[ActorId] { &self.roster }

    pub fn grid(&self) -> &SafetyGrid { &self.grid }

    pub fn obstacles(&self) -> &HashSet<Tile> { &self.obstacles }

    pub fn central_swarm(&self) -> Option<ActorId> { self.central_swarm }

    pub fn spawn_timer(&self) -> Option<&SpawnTimer> { self.spawn_timer.as_ref() }

    pub fn log(&self) -> &DebugLog { &self.log }

    fn iter_roster(&self) -> impl Iterator<Item = &crate::actor::Actor> + '_ {
        self.roster.iter().filter_map(|x| self.actors.get(*x))
    }
}

//////////////////////////////////////////////////////////////////////////////
