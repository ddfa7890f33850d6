use clap::Parser;
use pokerroom::app::{
    client::{
        model::{Model, ModelResult},
        types::{ClientArgs, ClientConfig},
    },
    utils,
};

use tuirealm::{PollStrategy, Update};

#[cfg(feature = "client_logs")]
const CLIENT_LOG_FILE: &str = "pokerroom-client.log";

/// The terminal belongs to the interface, so logs can only go to a file
#[cfg(feature = "client_logs")]
fn init_logs() -> std::io::Result<()> {
    let log_file = std::fs::File::create(CLIENT_LOG_FILE)?;
    let formatter = tracing_subscriber::fmt::format()
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::fmt()
        .event_format(formatter)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

fn main() -> ModelResult<()> {
    #[cfg(feature = "client_logs")]
    init_logs()?;

    let args = ClientArgs::parse();
    let config = utils::read_config::<ClientConfig>(&args.config, Some("POKERROOM_CLIENT"))?;

    // Setup model
    let mut model = Model::new(config, args)?;
    // Enter alternate screen
    let _ = model.terminal.enter_alternate_screen();
    let _ = model.terminal.enable_raw_mode();
    // Main loop
    // NOTE: loop until quit; quit is set in update if AppClose is received
    while !model.quit {
        // Tick
        match model.app.tick(PollStrategy::Once) {
            Err(error) => tracing::error!(?error, "Could not poll the events"),
            Ok(messages) if !messages.is_empty() => {
                // NOTE: redraw if at least one msg has been processed
                model.redraw = true;
                for msg in messages.into_iter() {
                    let mut msg = Some(msg);
                    while msg.is_some() {
                        msg = model.update(msg);
                    }
                }
            }
            _ => {}
        }
        // Redraw
        if model.redraw {
            if let Err(error) = model.view() {
                tracing::error!(?error, "Could not draw the interface");
            }
            model.redraw = false;
        }
    }
    // Terminate terminal
    let _ = model.terminal.leave_alternate_screen();
    let _ = model.terminal.disable_raw_mode();
    let _ = model.terminal.clear_screen();

    Ok(())
}
