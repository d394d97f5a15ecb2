//! Interactive polling session over a line-oriented command stream.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::poller::{Outcome, PollError, Poller};

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Outcomes recorded over the whole session.
    pub total_polled: u32,
}

/// Drive `poller` with single-letter commands until the caller quits.
///
/// For each selected participant a prompt is written to `output` and commands
/// are read from `input`, case-insensitive: `a` attempted, `c` correct, `e`
/// excused, `m` missing (polled with no outcome category), `q` quit. Unknown
/// input re-prompts the same participant. End of input quits like `q`.
pub fn run_session<R: BufRead, W: Write>(
    poller: &mut Poller,
    mut input: R,
    mut output: W,
) -> Result<SessionOutcome> {
    loop {
        let name = match poller.next() {
            Ok(name) => name,
            Err(PollError::SessionHalted) => break,
            Err(err) => return Err(err.into()),
        };
        prompt_until_handled(poller, &name, &mut input, &mut output)?;
    }
    debug!(total_polled = poller.total_polled(), "session finished");
    Ok(SessionOutcome {
        total_polled: poller.total_polled(),
    })
}

fn prompt_until_handled<R: BufRead, W: Write>(
    poller: &mut Poller,
    name: &str,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output, "{name}: (A)ttempted (C)orrect (E)xcused (M)issing (Q)uit")
            .context("write prompt")?;
        output.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("read command")?;
        if read == 0 {
            debug!("input closed, halting session");
            poller.halt();
            return Ok(());
        }

        match line.trim().to_lowercase().as_str() {
            "a" => poller.record(Outcome::Attempted)?,
            "c" => poller.record(Outcome::Correct)?,
            "e" => poller.record(Outcome::Excused)?,
            "m" => poller.record(Outcome::Missing)?,
            "q" => poller.halt(),
            other => {
                writeln!(output, "unknown response {other:?}").context("write response")?;
                continue;
            }
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::roster_of;
    use std::io::Cursor;

    fn scripted(commands: &str, roster_size: usize) -> (Poller, SessionOutcome, String) {
        let mut poller = Poller::with_seed(roster_of(roster_size), 11).expect("poller");
        let mut output = Vec::new();
        let outcome =
            run_session(&mut poller, Cursor::new(commands.to_string()), &mut output).expect("session");
        (poller, outcome, String::from_utf8(output).expect("utf8"))
    }

    #[test]
    fn commands_map_to_outcome_counters() {
        let (poller, outcome, _) = scripted("a\nc\nq\n", 2);

        assert_eq!(outcome.total_polled, 2);
        let mut polled: Vec<(u32, u32, u32)> = poller
            .roster()
            .iter()
            .map(|p| (p.polled, p.attempted, p.correct))
            .collect();
        polled.sort_unstable();
        assert_eq!(polled, vec![(1, 0, 1), (1, 1, 0)]);
    }

    #[test]
    fn missing_records_polled_without_category() {
        let (poller, outcome, _) = scripted("m\nq\n", 1);

        assert_eq!(outcome.total_polled, 1);
        let p = &poller.roster()[0];
        assert_eq!(p.polled, 1);
        assert_eq!((p.correct, p.attempted, p.excused), (0, 0, 0));
    }

    #[test]
    fn quit_halts_without_recording() {
        let (poller, outcome, output) = scripted("q\n", 3);

        assert_eq!(outcome.total_polled, 0);
        assert!(poller.roster().iter().all(|p| p.polled == 0));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn unknown_input_reprompts_same_participant() {
        let (_, _, output) = scripted("x\ne\nq\n", 2);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("unknown response \"x\""), "output: {output}");
        // Same participant prompted again after the bad command.
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn uppercase_commands_are_accepted() {
        let (poller, outcome, _) = scripted("E\nQ\n", 2);

        assert_eq!(outcome.total_polled, 1);
        assert_eq!(poller.roster().iter().map(|p| p.excused).sum::<u32>(), 1);
    }

    #[test]
    fn end_of_input_halts_cleanly() {
        let (poller, outcome, output) = scripted("", 2);

        assert_eq!(outcome.total_polled, 0);
        assert!(poller.roster().iter().all(|p| p.polled == 0));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn end_to_end_round_trip_through_storage() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.csv");
        std::fs::write(&path, "ada,0,0,0,0\nalan,0,0,0,0\n").expect("write roster");

        let roster = crate::io::roster_store::load_roster(&path).expect("load");
        let mut poller = Poller::with_seed(roster, 3).expect("poller");
        let outcome =
            run_session(&mut poller, Cursor::new("a\na\nq\n"), &mut Vec::new()).expect("session");
        assert_eq!(outcome.total_polled, 2);

        crate::io::roster_store::save_roster(&path, poller.roster(), false).expect("save");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "ada,1,0,1,0\nalan,1,0,1,0\n"
        );
    }

    #[test]
    fn session_keeps_reshuffling_past_roster_exhaustion() {
        // Five commands against a two-participant roster: the engine must
        // reshuffle twice rather than run out.
        let (poller, outcome, _) = scripted("m\nm\nm\nm\nm\nq\n", 2);

        assert_eq!(outcome.total_polled, 5);
        let counts: Vec<u32> = poller.roster().iter().map(|p| p.polled).collect();
        assert_eq!(counts.iter().sum::<u32>(), 5);
        let max = counts.iter().max().expect("max");
        let min = counts.iter().min().expect("min");
        assert!(max - min <= 1, "unbalanced counts {counts:?}");
    }
}
