use std::fmt::Write;
use voxmine_core::{Axis, Coord3, Mark, Observation};

fn symbol(obs: &Observation, coords: Coord3) -> char {
    if coords.is_origin() {
        return ' ';
    }
    if obs.is_exposed_trigger(coords) {
        return '*';
    }
    if let Some(count) = obs.revealed_at(coords) {
        return char::from_digit(count.into(), 36).unwrap_or('#');
    }
    match obs.mark_at(coords) {
        Mark::Normal => '.',
        Mark::Flagged => 'F',
        Mark::Questioned => '?',
    }
}

/// Draws each z layer as a grid with y growing upwards.
pub fn render(obs: &Observation) -> String {
    let e = obs.extent as Axis;
    let mut out = String::new();

    for z in -e..=e {
        let _ = writeln!(out, "z = {z}");
        for y in (-e..=e).rev() {
            let _ = write!(out, "{y:>3} ");
            for x in -e..=e {
                out.push(symbol(obs, Coord3::new(x, y, z)));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("    ");
        for x in -e..=e {
            let _ = write!(out, "{x:<2}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "cleared {}/{} ({:?})", obs.cleared, obs.goal, obs.state);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmine_core::*;

    #[test]
    fn draws_revealed_counts_and_marks() {
        let rules = RulesConfig {
            cascade_chance: 0.0,
            ..Default::default()
        };
        let mut round = Round::new(rules, ScoreStore::new(MemoryStore::new()), 1).unwrap();
        round
            .start_with(Difficulty::Easy, FixedGridGenerator::new([Coord3::new(1, 0, 0)]))
            .unwrap();
        round.reveal_at(Coord3::new(1, 1, 0)).unwrap();
        round.toggle_mark(Coord3::new(-1, -1, 0)).unwrap();

        let text = render(&Observation::from_round(&round).unwrap());

        // middle layer, rows y = 1, 0, -1
        assert!(text.contains("z = 0\n  1 . . 1 \n  0 .   . \n -1 F . . \n"));
        assert!(text.ends_with("cleared 1/25 (Playing)\n"));
    }
}
