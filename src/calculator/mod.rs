//! Troop cost calculator: the form, its action dropdown and the result panel.

pub mod actions;
pub mod cost_table;
pub mod dropdown;
pub mod format;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::input::{ClickState, InputEvent, Key};

use actions::*;
use cost_table::ActionCostTable;
use dropdown::{DropdownEffect, DropdownMsg};
use format::NumberLocale;
use logic::calculate;
use state::{FieldId, Focus, FormState, Outcome};

pub struct CalculatorApp {
    pub state: FormState,
}

impl CalculatorApp {
    pub fn new(table: ActionCostTable, locale: NumberLocale) -> Self {
        Self {
            state: FormState::new(table, locale),
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(*key),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Hover(id) => self.handle_hover(*id),
            InputEvent::ClickEmpty => self.close_menu_from_outside(),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    /// Validate and compute from the current inputs, replacing the previous outcome.
    pub fn submit(&mut self) {
        let input = self.state.input_state();
        self.state.outcome = match calculate(&input, &self.state.table) {
            Ok(result) => {
                console::log(&format!(
                    "calculate: {} x{} → gems={} hours={} cop={}",
                    result.action,
                    result.amount,
                    result.total_gems,
                    result.total_hours,
                    result
                        .cop
                        .as_ref()
                        .map(|c| c.total_base.to_string())
                        .unwrap_or_else(|| "unset".into()),
                ));
                Outcome::Computed(result)
            }
            Err(e) => {
                console::log(&format!("calculate: rejected ({e})"));
                Outcome::Invalid(e)
            }
        };
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if matches!(key, Key::Tab | Key::BackTab) {
            if self.state.dropdown.is_open() {
                let effect = self.state.dropdown.reduce(DropdownMsg::MenuKey(key));
                self.apply(effect);
            }
            self.state.focus = if key == Key::Tab {
                self.state.focus.next()
            } else {
                self.state.focus.prev()
            };
            return true;
        }

        match self.state.focus {
            Focus::Menu => {
                let effect = self.state.dropdown.reduce(DropdownMsg::MenuKey(key));
                self.apply(effect);
                true
            }
            Focus::Activator => {
                let effect = self.state.dropdown.reduce(DropdownMsg::ActivatorKey(key));
                if effect == DropdownEffect::None {
                    return false;
                }
                self.apply(effect);
                true
            }
            Focus::Field(id) => self.edit_field(id, key),
            Focus::Calculate => match key {
                Key::Enter | Key::Char(' ') => {
                    self.submit();
                    true
                }
                _ => false,
            },
        }
    }

    fn edit_field(&mut self, id: FieldId, key: Key) -> bool {
        if key == Key::Enter {
            self.submit();
            return true;
        }
        let field = self.state.field_mut(id);
        match key {
            Key::Char(c) if !c.is_control() => field.insert_char(c),
            Key::Backspace => field.backspace(),
            Key::Delete => field.delete(),
            Key::Left => field.move_left(),
            Key::Right => field.move_right(),
            Key::Home => field.move_home(),
            Key::End => field.move_end(),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let mut changed = false;
        if self.state.dropdown.is_open() && !is_dropdown_target(action_id) {
            changed = self.close_menu_from_outside();
        }

        match action_id {
            TOGGLE_MENU => {
                let effect = self.state.dropdown.reduce(DropdownMsg::ActivatorClick);
                self.apply(effect);
                true
            }
            MENU_FRAME => true,
            CALCULATE => {
                self.state.focus = Focus::Calculate;
                self.submit();
                true
            }
            id => {
                if let Some(i) = menu_item_index(id) {
                    let effect = self.state.dropdown.reduce(DropdownMsg::ItemClick(i));
                    self.apply(effect);
                    return true;
                }
                if let Some(field) = id
                    .checked_sub(FOCUS_FIELD_BASE)
                    .and_then(|i| FieldId::from_index(i as usize))
                {
                    self.state.focus = Focus::Field(field);
                    self.state.field_mut(field).move_end();
                    return true;
                }
                changed
            }
        }
    }

    fn handle_hover(&mut self, action_id: u16) -> bool {
        match menu_item_index(action_id) {
            Some(i) if self.state.dropdown.is_open() => {
                self.state.dropdown.reduce(DropdownMsg::Hover(i));
                true
            }
            _ => false,
        }
    }

    fn close_menu_from_outside(&mut self) -> bool {
        if !self.state.dropdown.is_open() {
            return false;
        }
        let effect = self.state.dropdown.reduce(DropdownMsg::OutsideClick);
        self.apply(effect);
        true
    }

    fn apply(&mut self, effect: DropdownEffect) {
        match effect {
            DropdownEffect::None => {
                if !self.state.dropdown.is_open() && self.state.focus == Focus::Menu {
                    self.state.focus = Focus::Activator;
                }
            }
            DropdownEffect::FocusMenu => self.state.focus = Focus::Menu,
            DropdownEffect::FocusActivator => self.state.focus = Focus::Activator,
            DropdownEffect::Selected(value) => {
                console::log(&format!("action selected: {value}"));
                self.state.focus = Focus::Activator;
            }
        }
    }
}
