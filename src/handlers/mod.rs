mod poll;

use log::info;

use crate::commands::{Commands, ThemeAction};
use crate::error::Result;
use crate::store::{PollStore, Storage};
use crate::theme::ThemeManager;
use crate::toast::ToastQueue;

/// Dispatch a parsed command to the matching handler.
pub fn handle_command<S: Storage>(
    store: &mut PollStore<S>,
    theme: &mut ThemeManager<S>,
    toasts: &mut ToastQueue,
    command: Commands,
) -> Result<()> {
    let mode = theme.current()?;
    let palette = mode.palette();

    match command {
        Commands::Create {
            question,
            options,
            expires_in,
        } => poll::handle_create(store, toasts, &question, &options, expires_in),
        Commands::List => poll::handle_list(store, &palette),
        Commands::Show { poll_id, chart } => {
            poll::handle_show(store, mode, &palette, &poll_id, chart.as_deref())
        }
        Commands::Vote { poll_id, option } => poll::handle_vote(store, toasts, &poll_id, &option),
        Commands::Delete { poll_id } => poll::handle_delete(store, toasts, &poll_id),
        Commands::Theme { action } => handle_theme(theme, action),
    }
}

fn handle_theme<S: Storage>(theme: &mut ThemeManager<S>, action: ThemeAction) -> Result<()> {
    let mode = match action {
        ThemeAction::Show => theme.current()?,
        ThemeAction::Toggle => {
            info!("toggling theme");
            theme.toggle()?
        }
    };

    let palette = mode.palette();
    println!(
        "{} {}",
        palette.heading.apply_to(mode.indicator()),
        mode.as_str()
    );
    Ok(())
}
