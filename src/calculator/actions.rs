//! Semantic action IDs for calculator click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`
//! and `InputEvent::Hover`.

use super::cost_table::MAX_ACTIONS;

// ── Dropdown ────────────────────────────────────────────────────
pub const TOGGLE_MENU: u16 = 1;
/// The open popup's whole area, borders included. Clicking it does nothing.
pub const MENU_FRAME: u16 = 3;
/// Menu row (base + item index).
pub const MENU_ITEM_BASE: u16 = 100;
/// Upper bound (exclusive) for menu row IDs: one per possible action.
pub const MENU_ITEM_END: u16 = MENU_ITEM_BASE + MAX_ACTIONS as u16;

// ── Form ────────────────────────────────────────────────────────
pub const CALCULATE: u16 = 2;
/// Focus a numeric field (base + `FieldId::index`).
pub const FOCUS_FIELD_BASE: u16 = 10;

/// Menu row index for a click/hover ID, if it is one.
pub fn menu_item_index(action_id: u16) -> Option<usize> {
    if (MENU_ITEM_BASE..MENU_ITEM_END).contains(&action_id) {
        Some((action_id - MENU_ITEM_BASE) as usize)
    } else {
        None
    }
}

/// Whether the ID belongs to the dropdown (activator or a list row).
/// Clicks on anything else count as outside clicks.
pub fn is_dropdown_target(action_id: u16) -> bool {
    action_id == TOGGLE_MENU || action_id == MENU_FRAME || menu_item_index(action_id).is_some()
}
