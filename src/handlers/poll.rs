use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use log::warn;

use crate::chart;
use crate::error::{Error, Result};
use crate::store::{PollStore, Storage};
use crate::theme::{Mode, Palette};
use crate::toast::{Toast, ToastQueue};
use crate::voting::calculate_results;

/// Validate the poll shape and create it. The store itself accepts anything;
/// rejecting empty questions, empty option lists and duplicate labels is this
/// caller's job.
pub fn handle_create<S: Storage>(
    store: &mut PollStore<S>,
    toasts: &mut ToastQueue,
    question: &str,
    options: &[String],
    expires_in: Option<i64>,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::InvalidPoll("question must not be empty".to_string()));
    }

    let options: Vec<String> = options.iter().map(|opt| opt.trim().to_string()).collect();
    if options.is_empty() {
        return Err(Error::InvalidPoll(
            "at least one option is required".to_string(),
        ));
    }
    if options.iter().any(String::is_empty) {
        return Err(Error::InvalidPoll(
            "option labels must not be empty".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for opt in &options {
        if !seen.insert(opt.as_str()) {
            return Err(Error::InvalidPoll(format!("duplicate option \"{opt}\"")));
        }
    }

    let poll_id = store.create_poll(question, &options, expires_in)?;
    println!("{poll_id}");
    toasts.push(Toast::success("Poll created."));
    Ok(())
}

pub fn handle_list<S: Storage>(store: &PollStore<S>, palette: &Palette) -> Result<()> {
    let polls = store.polls()?;
    if polls.is_empty() {
        println!("{}", palette.muted.apply_to("No polls yet."));
        return Ok(());
    }

    let now = Utc::now();
    for poll in polls {
        let results = calculate_results(&poll);
        let status = if poll.is_expired(now) { "closed" } else { "open" };
        let voted = if store.has_voted(&poll.id)? { " ●" } else { "" };
        println!(
            "{}  {}  {} votes  [{}]{}",
            palette.info.apply_to(&poll.id),
            palette.heading.apply_to(&poll.question),
            results.total_votes,
            status,
            palette.success.apply_to(voted),
        );
    }
    Ok(())
}

pub fn handle_show<S: Storage>(
    store: &PollStore<S>,
    mode: Mode,
    palette: &Palette,
    poll_id: &str,
    chart_path: Option<&Path>,
) -> Result<()> {
    let poll = store.get_poll(poll_id)?;
    let results = calculate_results(&poll);

    println!("{}", palette.heading.apply_to(&poll.question));
    for tally in &results.tallies {
        println!(
            "  {:<24} {:>5} votes  {:>3}%",
            tally.option, tally.count, tally.percentage
        );
    }
    println!(
        "{}",
        palette
            .muted
            .apply_to(format!("{} total votes", results.total_votes))
    );
    if poll.is_expired(Utc::now()) {
        println!("{}", palette.error.apply_to("closed"));
    }

    if let Some(path) = chart_path {
        let counts: Vec<u64> = results.tallies.iter().map(|t| t.count).collect();
        chart::render_donut_png(path, &counts, mode.card_background())?;
        println!(
            "{}",
            palette
                .muted
                .apply_to(format!("chart written to {}", path.display()))
        );
    }
    Ok(())
}

/// Record a vote. Double votes get a user-facing notice; a vote on an
/// unknown poll stays a plain error with no notice.
pub fn handle_vote<S: Storage>(
    store: &mut PollStore<S>,
    toasts: &mut ToastQueue,
    poll_id: &str,
    option: &str,
) -> Result<()> {
    match store.submit_vote(poll_id, option) {
        Ok(()) => {
            toasts.push(Toast::success(format!("Vote for \"{option}\" recorded.")));
            Ok(())
        }
        Err(err @ Error::AlreadyVoted(_)) => {
            warn!("rejected double vote on {poll_id}");
            toasts.push(Toast::error("You have already voted on this poll."));
            Err(err)
        }
        Err(err) => Err(err),
    }
}

pub fn handle_delete<S: Storage>(
    store: &mut PollStore<S>,
    toasts: &mut ToastQueue,
    poll_id: &str,
) -> Result<()> {
    store.delete_poll(poll_id)?;
    toasts.push(Toast::info(format!("Poll {poll_id} deleted.")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use crate::toast::ToastKind;

    fn store() -> PollStore<MemoryStorage> {
        PollStore::new(MemoryStorage::new())
    }

    fn labels(opts: &[&str]) -> Vec<String> {
        opts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn create_rejects_empty_question() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let err =
            handle_create(&mut store, &mut toasts, "  ", &labels(&["a"]), None).unwrap_err();
        assert!(matches!(err, Error::InvalidPoll(_)));
        assert!(store.polls().unwrap().is_empty());
    }

    #[test]
    fn create_rejects_duplicate_labels() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let err = handle_create(&mut store, &mut toasts, "Q", &labels(&["a", "a"]), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPoll(_)));
    }

    #[test]
    fn create_rejects_empty_option_list() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let err = handle_create(&mut store, &mut toasts, "Q", &[], None).unwrap_err();
        assert!(matches!(err, Error::InvalidPoll(_)));
    }

    #[test]
    fn create_trims_and_queues_a_success_toast() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        handle_create(
            &mut store,
            &mut toasts,
            " Lunch? ",
            &labels(&[" pizza ", "sushi"]),
            Some(3),
        )
        .unwrap();

        let polls = store.polls().unwrap();
        assert_eq!(polls[0].question, "Lunch?");
        assert_eq!(polls[0].options, vec!["pizza", "sushi"]);
        assert_eq!(toasts.messages(), vec![("Poll created.", ToastKind::Success)]);
    }

    #[test]
    fn double_vote_queues_the_notice_and_fails() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let id = store.create_poll("Q", &labels(&["a", "b"]), None).unwrap();

        handle_vote(&mut store, &mut toasts, &id, "a").unwrap();
        let err = handle_vote(&mut store, &mut toasts, &id, "b").unwrap_err();

        assert!(matches!(err, Error::AlreadyVoted(_)));
        let messages = toasts.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1],
            ("You have already voted on this poll.", ToastKind::Error)
        );
    }

    #[test]
    fn vote_on_unknown_poll_fails_without_a_notice() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let err = handle_vote(&mut store, &mut toasts, "poll_404", "a").unwrap_err();
        assert!(matches!(err, Error::PollNotFound(_)));
        assert!(toasts.is_empty());
    }

    #[test]
    fn delete_queues_an_info_toast() {
        let mut store = store();
        let mut toasts = ToastQueue::new();
        let id = store.create_poll("Q", &labels(&["a"]), None).unwrap();

        handle_delete(&mut store, &mut toasts, &id).unwrap();
        assert!(store.polls().unwrap().is_empty());
        assert_eq!(toasts.messages().len(), 1);
    }
}
