use crate::actor::Actor;
use crate::archetype::Attack;

//////////////////////////////////////////////////////////////////////////////

// DebugLog

pub struct DebugLine {
    pub depth: i32,
    pub text: String,
}

#[derive(Default)]
pub struct DebugLog {
    pub depth: usize,
    pub lines: Vec<DebugLine>,
}

impl DebugLog {
    pub fn append(&mut self, t: impl std::fmt::Display) {
        let depth = self.depth as i32;
        self.lines.push(DebugLine { depth, text: format!("{}", t) });
    }

    pub fn indent(&mut self, n: usize, f: impl Fn(&mut DebugLog) -> ()) {
        self.depth += n;
        f(self);
        self.depth -= n;
    }

    pub fn newline(&mut self) { self.append(""); }
}

//////////////////////////////////////////////////////////////////////////////

// Per-actor snapshot lines for display.

fn attack_name(attack: Attack) -> &'static str {
    match attack {
        Attack::Melee => "Melee",
        Attack::Ranged => "Ranged",
        Attack::Magic => "Magic",
        Attack::Unknown => "Unknown",
    }
}

pub fn snapshot<'a>(log: &mut DebugLog, actors: impl Iterator<Item = &'a Actor>) {
    for actor in actors {
        let name = actor.archetype.name();
        let attack = attack_name(actor.next_attack);
        log.append(format!("{}: {} in {} ticks", name, attack,
                           actor.ticks_until_next));
    }
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorMap;
    use crate::archetype::Archetype;
    use crate::base::Tile;

    #[test]
    fn test_snapshot_lines() {
        let mut map = ActorMap::default();
        let aid = map.add(Archetype::Sorcerer, Tile(0, 0, 0));
        map[aid].update_next_attack(Attack::Magic, 3);

        let mut log = DebugLog::default();
        snapshot(&mut log, map.iter().map(|x| x.1));
        assert_eq!(log.lines.len(), 1);
        assert_eq!(log.lines[0].text, "Sorcerer: Magic in 3 ticks");
    }

    #[test]
    fn test_indent_is_scoped() {
        let mut log = DebugLog::default();
        log.append("outer");
        log.indent(2, |log| log.append("inner"));
        log.append("outer again");
        assert_eq!(log.lines[1].depth, 2);
        assert_eq!(log.lines[2].depth, 0);
    }
}
