use anyhow::Context;
use clap::Parser;
use mouse_gestures::cli::{load_trace, Args, PrintListener};
use mouse_gestures::db::BindingTable;
use mouse_gestures::settings::load_settings;
use mouse_gestures::{logging, MouseGestures};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.settings)
        .with_context(|| format!("loading {}", args.settings.display()))?;
    logging::init(args.debug || settings.debug_logging, None);

    let events = load_trace(&args.trace)?;

    let mut session = MouseGestures::with_config(settings.movements(), settings.config());
    session.add_listener(Arc::new(PrintListener::new(BindingTable::from_bindings(
        settings.gesture_actions.iter().cloned(),
    ))));

    for (idx, event) in events.into_iter().enumerate() {
        if session.process_event(event).consumed {
            println!("consumed event #{idx}");
        }
    }
    Ok(())
}
