//! Reading the timing section back from deck text.

use lumpr_calendar::OutputSchedule;

use crate::error::DeckError;
use crate::writer::TIMING_INFORMATION;

/// Parses the `* timing information` section of a deck or template.
///
/// The output-day list may be wrapped over any number of lines; reading
/// stops once the announced number of days has been collected.
///
/// # Errors
///
/// Returns [`DeckError::MalformedDeck`] if the section is missing, a value
/// is not an integer, or fewer days are listed than announced.
pub fn read_output_days(deck: &str) -> Result<OutputSchedule, DeckError> {
    let malformed = |reason: String| DeckError::MalformedDeck { reason };

    let mut lines = deck
        .lines()
        .skip_while(|l| l.trim() != TIMING_INFORMATION)
        .skip(1)
        .take_while(|l| !l.trim_start().starts_with('*'))
        .filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| malformed("no timing information section".to_string()))?;
    let mut counts = header.split_whitespace().map(str::parse::<u32>);
    let (Some(Ok(num_days)), Some(Ok(n_out))) = (counts.next(), counts.next()) else {
        return Err(malformed(format!("bad timing header '{header}'")));
    };

    let mut days = Vec::with_capacity(n_out as usize);
    for line in lines {
        if days.len() == n_out as usize {
            break;
        }
        for token in line.split_whitespace() {
            let day = token
                .parse::<u32>()
                .map_err(|e| malformed(format!("output day '{token}': {e}")))?;
            days.push(day);
        }
    }
    if days.len() != n_out as usize {
        return Err(malformed(format!(
            "expected {n_out} output days, found {}",
            days.len()
        )));
    }
    Ok(OutputSchedule::new(num_days, days))
}
