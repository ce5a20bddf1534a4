mod calculator;
mod console;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use calculator::cost_table::ActionCostTable;
use calculator::format::NumberLocale;
use calculator::CalculatorApp;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent, Key};
use ratzilla::event::{MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Element id of an optional `<script type="application/json">` that replaces
/// the built-in cost table.
const COST_TABLE_ELEMENT_ID: &str = "cost-table";

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Page-supplied cost table JSON, if the host page embeds one.
fn page_cost_table() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(COST_TABLE_ELEMENT_ID)?;
    element.text_content().filter(|s| !s.trim().is_empty())
}

fn load_cost_table() -> io::Result<ActionCostTable> {
    if let Some(json) = page_cost_table() {
        match ActionCostTable::from_json(&json) {
            Ok(table) => {
                console::log(&format!("cost table: {} actions from page", table.len()));
                return Ok(table);
            }
            Err(e) => console::warn(&format!(
                "cost table: ignoring #{} ({}), using built-in table",
                COST_TABLE_ELEMENT_ID, e
            )),
        }
    }
    ActionCostTable::embedded().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn detect_locale() -> NumberLocale {
    web_sys::window()
        .and_then(|w| w.navigator().language())
        .map(|tag| NumberLocale::from_language_tag(&tag))
        .unwrap_or_default()
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let table = load_cost_table()?;
    let locale = detect_locale();
    console::log(&format!(
        "calculator: {} actions, decimal '{}'",
        table.len(),
        locale.decimal
    ));

    let app = Rc::new(RefCell::new(CalculatorApp::new(table, locale)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch handler: presses become clicks, moves become hovers.
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            let pressed = match mouse_event.event {
                MouseEventKind::Pressed if mouse_event.button == MouseButton::Left => true,
                MouseEventKind::Moved => false,
                _ => return,
            };

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let target = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if pressed {
                console::log(&format!("click: target={:?}", target));
            }
            let event = match (pressed, target) {
                (true, Some(id)) => InputEvent::Click(id),
                (true, None) => InputEvent::ClickEmpty,
                (false, Some(id)) => InputEvent::Hover(id),
                (false, None) => return,
            };
            app.borrow_mut().handle_input(&event);
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            if let Some(key) = Key::from_code(&key_event.code, key_event.shift) {
                app.borrow_mut().handle_input(&InputEvent::Key(key));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let app = app.borrow();
            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            app.render(f, size, &click_state);
        }
    });

    Ok(())
}
