use clap::Parser;
use log::error;

use pollbooth::commands::Cli;
use pollbooth::store::{FileStorage, PollStore, file};
use pollbooth::theme::ThemeManager;
use pollbooth::toast::ToastQueue;
use pollbooth::{Mode, handlers};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let data_dir = file::resolve_data_dir();

    let storage = match FileStorage::new(&data_dir) {
        Ok(storage) => storage,
        Err(err) => {
            error!("failed to open data dir {}: {err}", data_dir.display());
            std::process::exit(1);
        }
    };

    // The backend is one file per key, so the store and the theme manager can
    // hold their own handles to the same directory.
    let mut store = PollStore::new(storage.clone());
    let mut theme = ThemeManager::new(storage);
    let mut toasts = ToastQueue::new();

    let outcome = handlers::handle_command(&mut store, &mut theme, &mut toasts, cli.command);

    let mode = theme.current().unwrap_or(Mode::Light);
    toasts.flush(&mode.palette());

    if let Err(err) = outcome {
        error!("command failed: {err}");
        eprintln!("{}", mode.palette().error.apply_to(format!("error: {err}")));
        std::process::exit(1);
    }
}
