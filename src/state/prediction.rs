//! Working prediction for a fixture, with derived per-team totals.

/// Largest value accepted for an individual half score.
pub const MAX_HALF_SCORE: i64 = 99;

/// Which half of the match a score edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfPeriod {
    /// First half (primer tiempo).
    First,
    /// Second half (segundo tiempo).
    Second,
}

/// Which team a score edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    /// Home team.
    A,
    /// Away team.
    B,
}

/// Scored prediction for one match.
///
/// Final scores are always the sum of that team's two half scores; they are
/// recomputed on every accepted edit and cannot be written directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPrediction {
    team_a: String,
    team_b: String,
    first_half_a: u8,
    first_half_b: u8,
    second_half_a: u8,
    second_half_b: u8,
    final_a: u8,
    final_b: u8,
}

impl MatchPrediction {
    /// All-zero prediction for the given pairing.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            first_half_a: 0,
            first_half_b: 0,
            second_half_a: 0,
            second_half_b: 0,
            final_a: 0,
            final_b: 0,
        }
    }

    /// Home team name.
    pub fn team_a(&self) -> &str {
        &self.team_a
    }

    /// Away team name.
    pub fn team_b(&self) -> &str {
        &self.team_b
    }

    /// First-half score for one side.
    pub fn first_half(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::A => self.first_half_a,
            TeamSide::B => self.first_half_b,
        }
    }

    /// Second-half score for one side.
    pub fn second_half(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::A => self.second_half_a,
            TeamSide::B => self.second_half_b,
        }
    }

    /// Derived full-time score for one side.
    pub fn final_score(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::A => self.final_a,
            TeamSide::B => self.final_b,
        }
    }

    /// Apply a half-score edit, keeping the totals in sync.
    ///
    /// Values outside `[0, 99]` are rejected and the field keeps its prior
    /// value; the return value reports whether the edit was applied.
    pub fn try_set_half(&mut self, period: HalfPeriod, side: TeamSide, value: i64) -> bool {
        if !(0..=MAX_HALF_SCORE).contains(&value) {
            return false;
        }
        let value = value as u8;

        match (period, side) {
            (HalfPeriod::First, TeamSide::A) => self.first_half_a = value,
            (HalfPeriod::First, TeamSide::B) => self.first_half_b = value,
            (HalfPeriod::Second, TeamSide::A) => self.second_half_a = value,
            (HalfPeriod::Second, TeamSide::B) => self.second_half_b = value,
        }

        self.final_a = self.first_half_a + self.second_half_a;
        self.final_b = self.first_half_b + self.second_half_b;
        true
    }

    /// Zero every score while keeping the pairing.
    pub fn reset_scores(&mut self) {
        self.first_half_a = 0;
        self.first_half_b = 0;
        self.second_half_a = 0;
        self.second_half_b = 0;
        self.final_a = 0;
        self.final_b = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> MatchPrediction {
        MatchPrediction::new("Atlético Tucumán", "San Martín")
    }

    #[test]
    fn totals_follow_every_accepted_edit() {
        let mut p = prediction();

        assert!(p.try_set_half(HalfPeriod::First, TeamSide::A, 1));
        assert!(p.try_set_half(HalfPeriod::Second, TeamSide::A, 1));
        assert!(p.try_set_half(HalfPeriod::Second, TeamSide::B, 1));

        assert_eq!(p.final_score(TeamSide::A), 2);
        assert_eq!(p.final_score(TeamSide::B), 1);

        assert!(p.try_set_half(HalfPeriod::First, TeamSide::A, 3));
        assert_eq!(p.final_score(TeamSide::A), 4);
    }

    #[test]
    fn out_of_range_edits_keep_the_prior_value() {
        let mut p = prediction();
        assert!(p.try_set_half(HalfPeriod::First, TeamSide::B, 2));

        assert!(!p.try_set_half(HalfPeriod::First, TeamSide::B, -1));
        assert!(!p.try_set_half(HalfPeriod::First, TeamSide::B, 100));

        assert_eq!(p.first_half(TeamSide::B), 2);
        assert_eq!(p.final_score(TeamSide::B), 2);
    }

    #[test]
    fn boundary_values_are_accepted() {
        let mut p = prediction();
        assert!(p.try_set_half(HalfPeriod::First, TeamSide::A, 0));
        assert!(p.try_set_half(HalfPeriod::First, TeamSide::A, 99));
        assert!(p.try_set_half(HalfPeriod::Second, TeamSide::A, 99));
        assert_eq!(p.final_score(TeamSide::A), 198);
    }

    #[test]
    fn reset_zeroes_scores_but_keeps_the_pairing() {
        let mut p = prediction();
        p.try_set_half(HalfPeriod::First, TeamSide::A, 5);
        p.reset_scores();

        assert_eq!(p.final_score(TeamSide::A), 0);
        assert_eq!(p.first_half(TeamSide::A), 0);
        assert_eq!(p.team_a(), "Atlético Tucumán");
    }
}
