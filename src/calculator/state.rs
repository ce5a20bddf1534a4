//! Form state: text fields, focus, dropdown and the last outcome.

use super::cost_table::ActionCostTable;
use super::dropdown::DropdownState;
use super::format::NumberLocale;
use super::logic::{sanitize_with_cursor, CalculationResult, InputState, ValidationError};

/// The four numeric inputs, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    ColE,
    ColC,
    ColD,
    Amount,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [FieldId::ColE, FieldId::ColC, FieldId::ColD, FieldId::Amount];

    pub fn index(self) -> usize {
        match self {
            FieldId::ColE => 0,
            FieldId::ColC => 1,
            FieldId::ColD => 2,
            FieldId::Amount => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::ColE => "Column E",
            FieldId::ColC => "Column C (gems)",
            FieldId::ColD => "Column D (hours)",
            FieldId::Amount => "Amount to train",
        }
    }
}

/// A digits-only text input with a caret.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextField {
    pub text: String,
    /// Char index, `0..=text.len()`.
    pub cursor: usize,
}

impl TextField {
    /// Insert at the caret. Anything that isn't a digit is stripped right
    /// away, leaving the caret where it was.
    pub fn insert_char(&mut self, ch: char) {
        let byte = self.byte_offset(self.cursor);
        self.text.insert(byte, ch);
        self.cursor += 1;
        self.sanitize();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let byte = self.byte_offset(self.cursor - 1);
        self.text.remove(byte);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let byte = self.byte_offset(self.cursor);
        self.text.remove(byte);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn sanitize(&mut self) {
        let (text, cursor) = sanitize_with_cursor(&self.text, self.cursor);
        self.text = text;
        self.cursor = cursor;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

/// Which control receives keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// The dropdown's activator button.
    Activator,
    /// The open dropdown list.
    Menu,
    Field(FieldId),
    Calculate,
}

impl Focus {
    /// Tab order: activator, the four fields, the Calculate button.
    const ORDER: [Focus; 6] = [
        Focus::Activator,
        Focus::Field(FieldId::ColE),
        Focus::Field(FieldId::ColC),
        Focus::Field(FieldId::ColD),
        Focus::Field(FieldId::Amount),
        Focus::Calculate,
    ];

    fn position(self) -> usize {
        match self {
            Focus::Menu => 0,
            other => Self::ORDER.iter().position(|f| *f == other).unwrap_or(0),
        }
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Result panel content. A result and a validation message never coexist.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Empty,
    Computed(CalculationResult),
    Invalid(ValidationError),
}

pub struct FormState {
    pub table: ActionCostTable,
    pub dropdown: DropdownState,
    pub fields: [TextField; 4],
    pub focus: Focus,
    pub outcome: Outcome,
    /// Separator style for the user's locale.
    pub locale: NumberLocale,
}

impl FormState {
    pub fn new(table: ActionCostTable, locale: NumberLocale) -> Self {
        let dropdown = DropdownState::new(table.action_names());
        Self {
            table,
            dropdown,
            fields: Default::default(),
            focus: Focus::Activator,
            outcome: Outcome::Empty,
            locale,
        }
    }

    pub fn field(&self, id: FieldId) -> &TextField {
        &self.fields[id.index()]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut TextField {
        &mut self.fields[id.index()]
    }

    /// Current inputs, coerced for calculation.
    pub fn input_state(&self) -> InputState {
        InputState::from_raw(
            self.dropdown.selected_value(),
            &self.field(FieldId::ColE).text,
            &self.field(FieldId::ColC).text,
            &self.field(FieldId::ColD).text,
            &self.field(FieldId::Amount).text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextField {
        let mut f = TextField::default();
        for ch in s.chars() {
            f.insert_char(ch);
        }
        f
    }

    #[test]
    fn typing_digits() {
        let f = typed("1250");
        assert_eq!(f.text, "1250");
        assert_eq!(f.cursor, 4);
    }

    #[test]
    fn typing_letters_is_filtered() {
        let f = typed("12a3");
        assert_eq!(f.text, "123");
        assert_eq!(f.cursor, 3);
    }

    #[test]
    fn rejected_char_keeps_caret_in_middle() {
        let mut f = typed("1234");
        f.move_left();
        f.move_left(); // 12|34
        f.insert_char('x');
        assert_eq!(f.text, "1234");
        assert_eq!(f.cursor, 2);
        f.insert_char('9');
        assert_eq!(f.text, "12934");
        assert_eq!(f.cursor, 3);
    }

    #[test]
    fn backspace_and_delete() {
        let mut f = typed("123");
        f.backspace();
        assert_eq!((f.text.as_str(), f.cursor), ("12", 2));
        f.move_home();
        f.backspace();
        assert_eq!((f.text.as_str(), f.cursor), ("12", 0));
        f.delete();
        assert_eq!((f.text.as_str(), f.cursor), ("2", 0));
        f.move_end();
        f.delete();
        assert_eq!((f.text.as_str(), f.cursor), ("2", 1));
    }

    #[test]
    fn caret_moves_are_clamped() {
        let mut f = typed("12");
        f.move_right();
        assert_eq!(f.cursor, 2);
        f.move_home();
        f.move_left();
        assert_eq!(f.cursor, 0);
    }

    #[test]
    fn focus_cycle() {
        let mut focus = Focus::Activator;
        let mut seen = vec![focus];
        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(seen, Focus::ORDER.to_vec());
        assert_eq!(Focus::Calculate.next(), Focus::Activator);
        assert_eq!(Focus::Activator.prev(), Focus::Calculate);
        assert_eq!(Focus::Menu.next(), Focus::Field(FieldId::ColE));
    }

    #[test]
    fn field_index_roundtrip() {
        for id in FieldId::ALL {
            assert_eq!(FieldId::from_index(id.index()), Some(id));
        }
        assert_eq!(FieldId::from_index(4), None);
    }

    #[test]
    fn input_state_reads_fields_and_selection() {
        let table = ActionCostTable::embedded().unwrap();
        let mut s = FormState::new(table, NumberLocale::ENGLISH);
        *s.field_mut(FieldId::ColE) = typed("4");
        *s.field_mut(FieldId::Amount) = typed("1x0");
        let input = s.input_state();
        assert_eq!(input.action, "Train SSS");
        assert_eq!(input.e, 4.0);
        assert_eq!(input.c, 0.0);
        assert_eq!(input.amount, 10.0);
    }
}
