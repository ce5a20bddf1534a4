//! Single-select popup list used for the action picker.
//!
//! Pure interaction state: the form feeds it [`DropdownMsg`]s and applies
//! the returned [`DropdownEffect`] (focus moves, selection changes). It knows
//! nothing about rendering beyond the size of the visible window.

use crate::input::Key;

/// Rows of the popup list shown at once.
pub const MENU_VISIBLE_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownMsg {
    /// Click/tap on the activator button.
    ActivatorClick,
    /// Key pressed while the activator has focus.
    ActivatorKey(Key),
    /// Key pressed while the open list has focus.
    MenuKey(Key),
    /// Pointer moved over item `i`.
    Hover(usize),
    /// Click/tap on item `i`.
    ItemClick(usize),
    /// Click/tap anywhere outside the activator and the list.
    OutsideClick,
}

/// What the form has to do after a message was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEffect {
    None,
    /// The list opened and should receive keyboard focus.
    FocusMenu,
    /// The list closed; focus goes back to the activator.
    FocusActivator,
    /// An item was chosen (list is closed, focus back on the activator).
    Selected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownState {
    items: Vec<String>,
    is_open: bool,
    active_index: usize,
    selected_value: String,
    /// First visible row of the list.
    scroll: usize,
}

impl DropdownState {
    /// `items` comes from the cost table, which is never empty. The first item
    /// starts selected.
    pub fn new(items: Vec<String>) -> Self {
        let selected_value = items.first().cloned().unwrap_or_default();
        Self {
            items,
            is_open: false,
            active_index: 0,
            selected_value,
            scroll: 0,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Whether item `i` is the highlighted one. True for exactly one index.
    pub fn is_active(&self, i: usize) -> bool {
        i == self.active_index
    }

    /// The chosen action; also the activator's label.
    pub fn selected_value(&self) -> &str {
        &self.selected_value
    }

    /// Item indices currently inside the list viewport.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.scroll + MENU_VISIBLE_ROWS).min(self.items.len());
        self.scroll..end
    }

    pub fn reduce(&mut self, msg: DropdownMsg) -> DropdownEffect {
        match msg {
            DropdownMsg::ActivatorClick => {
                if self.is_open {
                    self.is_open = false;
                    DropdownEffect::FocusActivator
                } else {
                    self.open()
                }
            }
            DropdownMsg::ActivatorKey(Key::Enter | Key::Char(' ') | Key::Down) => self.open(),
            DropdownMsg::ActivatorKey(_) => DropdownEffect::None,
            DropdownMsg::MenuKey(_) | DropdownMsg::Hover(_) | DropdownMsg::ItemClick(_)
                if !self.is_open =>
            {
                DropdownEffect::None
            }
            DropdownMsg::MenuKey(Key::Down) => {
                self.set_active(self.active_index + 1);
                DropdownEffect::None
            }
            DropdownMsg::MenuKey(Key::Up) => {
                self.set_active(self.active_index + self.items.len().saturating_sub(1));
                DropdownEffect::None
            }
            DropdownMsg::MenuKey(Key::Enter) => self.choose(self.active_index),
            DropdownMsg::MenuKey(Key::Escape | Key::Tab | Key::BackTab) => {
                self.is_open = false;
                DropdownEffect::FocusActivator
            }
            DropdownMsg::MenuKey(_) => DropdownEffect::None,
            DropdownMsg::Hover(i) => {
                if i < self.items.len() && i != self.active_index {
                    self.set_active(i);
                }
                DropdownEffect::None
            }
            DropdownMsg::ItemClick(i) if i < self.items.len() => self.choose(i),
            DropdownMsg::ItemClick(_) => DropdownEffect::None,
            DropdownMsg::OutsideClick => {
                self.is_open = false;
                DropdownEffect::None
            }
        }
    }

    fn open(&mut self) -> DropdownEffect {
        self.is_open = true;
        let idx = self
            .items
            .iter()
            .position(|v| *v == self.selected_value)
            .unwrap_or(0);
        self.set_active(idx);
        DropdownEffect::FocusMenu
    }

    fn choose(&mut self, index: usize) -> DropdownEffect {
        self.set_active(index);
        if let Some(value) = self.items.get(self.active_index) {
            self.selected_value = value.clone();
        }
        self.is_open = false;
        DropdownEffect::Selected(self.selected_value.clone())
    }

    /// Set the active index (wrapping) and scroll it into view.
    fn set_active(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.active_index = index % self.items.len();
        self.scroll_to_active();
    }

    /// Scroll as little as possible so the active row is visible.
    fn scroll_to_active(&mut self) {
        let rows = MENU_VISIBLE_ROWS.min(self.items.len());
        if self.active_index < self.scroll {
            self.scroll = self.active_index;
        } else if self.active_index >= self.scroll + rows {
            self.scroll = self.active_index + 1 - rows;
        }
    }
}
