use crate::models::Poll;

/// Derived view of a poll's vote counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResults {
    pub total_votes: u64,
    pub tallies: Vec<OptionTally>,
}

/// Per-option tally, in the poll's declared option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub option: String,
    pub count: u64,
    pub percentage: u8,
}

/// Aggregate a poll's counts into totals and rounded percentages.
///
/// Percentages are 0 across the board when no votes were cast. A declared
/// option missing from the votes map counts as 0.
pub fn calculate_results(poll: &Poll) -> PollResults {
    let total_votes: u64 = poll
        .options
        .iter()
        .map(|opt| poll.votes.get(opt).copied().unwrap_or(0))
        .sum();

    let tallies = poll
        .options
        .iter()
        .map(|opt| {
            let count = poll.votes.get(opt).copied().unwrap_or(0);
            let percentage = if total_votes == 0 {
                0
            } else {
                ((count as f64 / total_votes as f64) * 100.0).round() as u8
            };
            OptionTally {
                option: opt.clone(),
                count,
                percentage,
            }
        })
        .collect();

    PollResults {
        total_votes,
        tallies,
    }
}
