use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "mood", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    /// Fixed enumeration order. Also the tie-break order for dominant mood.
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Neutral, Mood::Sad];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

/// Count of entries per mood.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodSummary {
    pub happy: u32,
    pub neutral: u32,
    pub sad: u32,
}

impl MoodSummary {
    pub fn from_moods<I: IntoIterator<Item = Mood>>(moods: I) -> Self {
        let mut summary = Self::default();
        for mood in moods {
            summary.record(mood);
        }
        summary
    }

    pub fn record(&mut self, mood: Mood) {
        match mood {
            Mood::Happy => self.happy += 1,
            Mood::Neutral => self.neutral += 1,
            Mood::Sad => self.sad += 1,
        }
    }

    pub fn count(&self, mood: Mood) -> u32 {
        match mood {
            Mood::Happy => self.happy,
            Mood::Neutral => self.neutral,
            Mood::Sad => self.sad,
        }
    }

    pub fn total(&self) -> u32 {
        self.happy + self.neutral + self.sad
    }

    /// Most frequent mood. Equal counts resolve by `Mood::ALL` order
    /// (happy, then neutral, then sad). `None` for an empty summary.
    pub fn dominant(&self) -> Option<Mood> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Mood::ALL[0];
        for mood in &Mood::ALL[1..] {
            if self.count(*mood) > self.count(best) {
                best = *mood;
            }
        }
        Some(best)
    }

    /// `round(count / total * 100)` per mood; all zero when there are no entries.
    pub fn percentages(&self) -> MoodPercentages {
        let total = self.total();
        let pct = |count: u32| -> u32 {
            if total == 0 {
                0
            } else {
                (count as f64 / total as f64 * 100.0).round() as u32
            }
        };
        MoodPercentages {
            happy: pct(self.happy),
            neutral: pct(self.neutral),
            sad: pct(self.sad),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodPercentages {
    pub happy: u32,
    pub neutral: u32,
    pub sad: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_prefers_highest_count() {
        let summary = MoodSummary::from_moods([Mood::Sad, Mood::Sad, Mood::Happy]);
        assert_eq!(summary.dominant(), Some(Mood::Sad));
    }

    #[test]
    fn dominant_ties_resolve_happy_then_neutral_then_sad() {
        let all_equal = MoodSummary { happy: 2, neutral: 2, sad: 2 };
        assert_eq!(all_equal.dominant(), Some(Mood::Happy));

        let neutral_sad = MoodSummary { happy: 0, neutral: 3, sad: 3 };
        assert_eq!(neutral_sad.dominant(), Some(Mood::Neutral));
    }

    #[test]
    fn empty_summary_has_no_dominant_mood_and_zero_percentages() {
        let summary = MoodSummary::default();
        assert_eq!(summary.dominant(), None);
        assert_eq!(summary.percentages(), MoodPercentages::default());
    }

    #[test]
    fn percentages_are_rounded_per_mood() {
        let summary = MoodSummary { happy: 2, neutral: 0, sad: 1 };
        assert_eq!(
            summary.percentages(),
            MoodPercentages { happy: 67, neutral: 0, sad: 33 }
        );
    }
}
