//! Address autocomplete console host
//!
//! Drives the controller from stdin commands so the typing, fetching and
//! selection flow can be exercised without a GUI toolkit.

use address_autocomplete::{
    config,
    controller::{AutocompleteController, Key, UserInput},
    surface::{HeadlessField, HeadlessPopup, TextSurface},
    PhotonGeocoder,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Controller = AutocompleteController<HeadlessPopup, HeadlessField>;

/// A parsed stdin command
#[derive(Debug, PartialEq)]
enum Command {
    Type(String),
    Input(UserInput),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    let command = match word {
        "type" => Command::Type(rest.to_string()),
        "down" => Command::Input(UserInput::Key(Key::Down)),
        "up" => Command::Input(UserInput::Key(Key::Up)),
        "enter" => Command::Input(UserInput::Key(Key::Enter)),
        "esc" => Command::Input(UserInput::Key(Key::Escape)),
        "outside" => Command::Input(UserInput::OutsideClick),
        "click" => {
            let row: usize = rest.trim().parse().ok()?;
            Command::Input(UserInput::Click(row.checked_sub(1)?))
        }
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting address-autocomplete v{}", address_autocomplete::VERSION);

    // Load configuration
    let settings = config::load()?;
    let geocoder = Arc::new(PhotonGeocoder::from_settings(&settings)?);
    info!("Using geocoder endpoint {}", geocoder.endpoint());
    let mut controller: Controller = AutocompleteController::new(
        geocoder,
        HeadlessPopup::new(),
        HeadlessField::new(),
        &settings.autocomplete,
    );

    controller.set_on_address_selected(|address| match serde_json::to_string(address) {
        Ok(json) => println!("selected: {}", json),
        Err(e) => tracing::error!("Failed to serialize address: {}", e),
    });

    print_usage();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) => print_usage(),
                    Some(Command::Show) => render(&controller),
                    Some(Command::Type(text)) => type_text(&mut controller, &text),
                    Some(Command::Input(input)) => {
                        if controller.handle_input(input) {
                            render(&controller);
                        }
                    }
                    None => println!("unknown command: {}", line.trim()),
                }
            }
            event = controller.next_event() => {
                let was_visible = controller.popup().visible;
                controller.handle_event(event);
                if controller.popup().visible || was_visible {
                    render(&controller);
                }
            }
        }
    }

    Ok(())
}

/// Mirror typed text into the field, then let the controller react
fn type_text(controller: &mut Controller, text: &str) {
    let field = controller.field_mut();
    field.set_text(text);
    field.set_caret(text.chars().count());
    controller.on_text_changed(text);
}

/// Print the field and popup state
fn render(controller: &Controller) {
    println!("field: {}", controller.selected_address());
    let popup = controller.popup().render();
    if !popup.is_empty() {
        println!("{}", popup);
    }
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
address-autocomplete v{}

COMMANDS:
    type <text>    Replace the field text
    down | up      Move through suggestions
    enter          Commit the highlighted suggestion
    esc            Close the suggestions
    click <n>      Commit suggestion number n
    outside        Click outside the popup
    show           Print field and suggestions
    quit           Exit

ENVIRONMENT VARIABLES:
    ADDRESS_AUTOCOMPLETE_SETTINGS_PATH   Path to settings.yml
    ADDRESS_AUTOCOMPLETE_ENDPOINT        Geocoder endpoint
    ADDRESS_AUTOCOMPLETE_DEBOUNCE_MS     Debounce quiet period
    RUST_LOG                             Log filter (default: info)
"#,
        address_autocomplete::VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use address_autocomplete::config::AutocompleteSettings;
    use address_autocomplete::network::HttpClient;

    #[tokio::test]
    async fn test_typing_updates_field() {
        let geocoder = Arc::new(PhotonGeocoder::new(
            HttpClient::new().unwrap(),
            "http://127.0.0.1:1/api/",
            5,
        ));
        let mut controller: Controller = AutocompleteController::new(
            geocoder,
            HeadlessPopup::new(),
            HeadlessField::new(),
            &AutocompleteSettings::default(),
        );

        type_text(&mut controller, "Ruã");
        assert_eq!(controller.field().text, "Ruã");
        assert_eq!(controller.field().caret, 3);
        assert_eq!(controller.field().text, controller.selected_address());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("type Rua Augusta, 500"),
            Some(Command::Type("Rua Augusta, 500".to_string()))
        );
        assert_eq!(
            parse_command("down"),
            Some(Command::Input(UserInput::Key(Key::Down)))
        );
        assert_eq!(
            parse_command("click 2"),
            Some(Command::Input(UserInput::Click(1)))
        );
        assert_eq!(parse_command("click 0"), None);
        assert_eq!(parse_command("click x"), None);
        assert_eq!(parse_command("quit\r\n"), Some(Command::Quit));
        assert_eq!(parse_command("dance"), None);
    }
}
