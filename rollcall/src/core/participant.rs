//! One participant's cumulative poll record.

/// A participant and their cumulative counters.
///
/// `polled` is incremented on every recorded outcome; the category counters
/// (`correct`, `attempted`, `excused`) each track one outcome kind. A
/// missing-only outcome bumps `polled` alone, so `polled` is not required to
/// equal the sum of the categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub polled: u32,
    pub correct: u32,
    pub attempted: u32,
    pub excused: u32,
}

impl Participant {
    /// Participant with all counters zeroed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polled: 0,
            correct: 0,
            attempted: 0,
            excused: 0,
        }
    }

    /// Canonical record line: `name,polled,correct,attempted,excused`.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.name, self.polled, self.correct, self.attempted, self.excused
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zeroes_all_counters() {
        let participant = Participant::new("ada");
        assert_eq!(participant.name, "ada");
        assert_eq!(participant.polled, 0);
        assert_eq!(participant.correct, 0);
        assert_eq!(participant.attempted, 0);
        assert_eq!(participant.excused, 0);
    }

    #[test]
    fn to_line_joins_fields_in_fixed_order() {
        let participant = Participant {
            name: "ada".to_string(),
            polled: 8,
            correct: 2,
            attempted: 4,
            excused: 1,
        };
        assert_eq!(participant.to_line(), "ada,8,2,4,1");
    }
}
