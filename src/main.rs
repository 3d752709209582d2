use std::{cell::RefCell, io, rc::Rc};

use idle_cookie_clicker::clicker::{ClickerGame, Engine, HostRequest};
use idle_cookie_clicker::input::{ClickState, InputEvent};
use idle_cookie_clicker::logging;
use idle_cookie_clicker::time::SystemClock;
use idle_cookie_clicker::web::{self, LocalStorage};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tracing::{debug, warn, Level};

type Game = ClickerGame<LocalStorage, SystemClock>;

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init(Level::INFO);

    let storage = LocalStorage::open();
    let config = web::load_config(&storage);
    let engine = Engine::start(storage, SystemClock, config);
    let game = Rc::new(RefCell::new(ClickerGame::new(engine)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                let Some((col, row)) = web::pixel_to_cell(
                    mouse_event.x,
                    mouse_event.y,
                    cs.terminal_cols,
                    cs.terminal_rows,
                ) else {
                    return;
                };
                let action = cs.hit_test(col, row);
                debug!(col, row, ?action, targets = cs.targets.len(), "click");
                action
            };

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut gs = game.borrow_mut();
        gs.tick();

        let size = f.area();
        click_state
            .borrow_mut()
            .begin_frame(size.width, size.height);
        gs.render(f, size, &click_state);

        if let Some(request) = gs.take_request() {
            handle_request(&mut gs, request);
        }
    });

    Ok(())
}

/// Run the browser side of an export or import the game asked for.
fn handle_request(game: &mut Game, request: HostRequest) {
    match request {
        HostRequest::Download(save) => {
            if let Err(e) = web::offer_download(&save) {
                warn!(error = ?e, "save download failed");
            }
        }
        HostRequest::ImportPrompt => {
            if let Some(json) = web::prompt_import() {
                // The outcome is already in the game log.
                match game.import(&json) {
                    Ok(()) => debug!("import applied"),
                    Err(e) => debug!(error = %e, "import rejected"),
                }
            }
        }
    }
}
