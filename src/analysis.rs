//! Side-by-side comparison of the two Pokémon in the arena.

use std::cmp::Ordering;

use crate::models::{Pokemon, StatKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Left,
    Right,
    Tie,
}

impl Leader {
    fn of<T: Ord>(left: T, right: T) -> Self {
        match left.cmp(&right) {
            Ordering::Greater => Leader::Left,
            Ordering::Less => Leader::Right,
            Ordering::Equal => Leader::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub kind: StatKind,
    pub left: u32,
    pub right: u32,
    pub leader: Leader,
}

impl StatRow {
    pub fn diff(&self) -> i64 {
        self.left as i64 - self.right as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleAnalysis {
    pub left_name: String,
    pub right_name: String,
    pub rows: Vec<StatRow>,
    pub left_total: u64,
    pub right_total: u64,
    /// Higher base-stat total.
    pub overall: Leader,
    /// Higher speed acts first.
    pub first_to_move: Leader,
}

impl BattleAnalysis {
    pub fn new(left: &Pokemon, right: &Pokemon) -> Self {
        let rows = StatKind::ALL
            .iter()
            .map(|&kind| {
                let l = left.stats.get(kind);
                let r = right.stats.get(kind);
                StatRow {
                    kind,
                    left: l,
                    right: r,
                    leader: Leader::of(l, r),
                }
            })
            .collect();
        let left_total = left.stats.total();
        let right_total = right.stats.total();

        Self {
            left_name: left.name.clone(),
            right_name: right.name.clone(),
            rows,
            left_total,
            right_total,
            overall: Leader::of(left_total, right_total),
            first_to_move: Leader::of(left.stats.speed, right.stats.speed),
        }
    }

    /// Number of stats each side wins, as (left, right).
    pub fn stat_wins(&self) -> (usize, usize) {
        self.rows.iter().fold((0, 0), |(l, r), row| match row.leader {
            Leader::Left => (l + 1, r),
            Leader::Right => (l, r + 1),
            Leader::Tie => (l, r),
        })
    }

    pub fn verdict(&self) -> String {
        match self.overall {
            Leader::Left => format!(
                "{} leads by {} base stat points",
                self.left_name,
                self.left_total - self.right_total
            ),
            Leader::Right => format!(
                "{} leads by {} base stat points",
                self.right_name,
                self.right_total - self.left_total
            ),
            Leader::Tie => format!("Dead even at {} base stat points", self.left_total),
        }
    }

    pub fn speed_note(&self) -> String {
        match self.first_to_move {
            Leader::Left => format!("{} moves first", self.left_name),
            Leader::Right => format!("{} moves first", self.right_name),
            Leader::Tie => "Speed tie".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stats;

    fn mon(name: &str, stats: [u32; 6]) -> Pokemon {
        Pokemon {
            id: None,
            name: name.to_string(),
            image: String::new(),
            types: vec![],
            stats: Stats::from_base_stats(&stats).unwrap(),
        }
    }

    #[test]
    fn test_compares_every_stat() {
        let bulbasaur = mon("Bulbasaur", [45, 49, 49, 65, 65, 45]);
        let charmander = mon("Charmander", [39, 52, 43, 60, 50, 65]);

        let analysis = BattleAnalysis::new(&bulbasaur, &charmander);

        assert_eq!(analysis.rows.len(), 6);
        assert_eq!(analysis.rows[0].kind, StatKind::Hp);
        assert_eq!(analysis.rows[0].leader, Leader::Left);
        assert_eq!(analysis.rows[1].leader, Leader::Right);
        assert_eq!(analysis.rows[1].diff(), -3);
        assert_eq!(analysis.left_total, 318);
        assert_eq!(analysis.right_total, 309);
        assert_eq!(analysis.overall, Leader::Left);
        assert_eq!(analysis.first_to_move, Leader::Right);
        assert_eq!(analysis.stat_wins(), (4, 2));
        assert_eq!(analysis.verdict(), "Bulbasaur leads by 9 base stat points");
        assert_eq!(analysis.speed_note(), "Charmander moves first");
    }

    #[test]
    fn test_identical_stats_tie() {
        let a = mon("Ditto", [48; 6]);
        let b = mon("Ditto", [48; 6]);

        let analysis = BattleAnalysis::new(&a, &b);

        assert_eq!(analysis.overall, Leader::Tie);
        assert_eq!(analysis.first_to_move, Leader::Tie);
        assert_eq!(analysis.stat_wins(), (0, 0));
        assert_eq!(analysis.verdict(), "Dead even at 288 base stat points");
        assert_eq!(analysis.speed_note(), "Speed tie");
    }

    #[test]
    fn test_huge_stats_total_without_overflow() {
        let a = mon("Glitch", [u32::MAX; 6]);
        let b = mon("Bulbasaur", [45, 49, 49, 65, 65, 45]);

        let analysis = BattleAnalysis::new(&a, &b);

        assert_eq!(analysis.left_total, 6 * u64::from(u32::MAX));
        assert_eq!(analysis.overall, Leader::Left);
        assert_eq!(
            analysis.verdict(),
            format!("Glitch leads by {} base stat points", 6 * u64::from(u32::MAX) - 318)
        );
        assert_eq!(analysis.speed_note(), "Glitch moves first");
    }
}
