//! Six-slot verification code buffer.
//!
//! Models the code screen's input row as one value: six single-digit slots
//! and a cursor. Input events carry the slot they landed on; the buffer
//! applies the advance/back rules and reports when the code is ready to
//! submit.
//!
//! Invariant: the cursor always points at exactly one slot in `0..=5`.

/// Number of digit slots in a verification code.
pub const CODE_LENGTH: usize = 6;

/// What feeding input into the buffer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Input was not digit-only, or the slot was out of range; nothing changed.
    Ignored,
    /// The slot was updated (and the cursor possibly moved).
    Accepted,
    /// The final slot was filled and every slot holds a digit: submit this
    /// code now.
    Submit(String),
}

/// The 6-slot code buffer with cursor-following input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    slots: [Option<char>; CODE_LENGTH],
    focused: usize,
}

impl CodeEntry {
    /// Creates an empty buffer with the cursor on slot 0.
    pub fn new() -> Self {
        Self {
            slots: [None; CODE_LENGTH],
            focused: 0,
        }
    }

    /// Feed the text typed into `slot`.
    ///
    /// Digit-only input sets the slot (a multi-character paste keeps its
    /// last character) and advances the cursor while `slot < 5`. Empty
    /// input clears the slot. Anything containing a non-digit is ignored.
    ///
    /// Returns [`TypeOutcome::Submit`] when this input filled slot 5 with
    /// every slot holding a digit.
    pub fn type_digit(&mut self, slot: usize, input: &str) -> TypeOutcome {
        if slot >= CODE_LENGTH {
            return TypeOutcome::Ignored;
        }
        if !input.chars().all(|c| c.is_ascii_digit()) {
            return TypeOutcome::Ignored;
        }

        self.focused = slot;
        self.slots[slot] = input.chars().last();

        if !input.is_empty() && slot < CODE_LENGTH - 1 {
            self.focused = slot + 1;
        }

        if slot == CODE_LENGTH - 1 && self.is_complete() {
            return TypeOutcome::Submit(self.code());
        }

        TypeOutcome::Accepted
    }

    /// Backspace pressed on `slot`.
    ///
    /// A filled slot is cleared and keeps the cursor; an empty slot moves
    /// the cursor back one, except on slot 0 where nothing happens.
    pub fn backspace(&mut self, slot: usize) {
        if slot >= CODE_LENGTH {
            return;
        }

        self.focused = slot;
        if self.slots[slot].is_some() {
            self.slots[slot] = None;
        } else if slot > 0 {
            self.focused = slot - 1;
        }
    }

    /// Clears every slot and returns the cursor to slot 0.
    pub fn reset(&mut self) {
        self.slots = [None; CODE_LENGTH];
        self.focused = 0;
    }

    /// The filled digits concatenated in slot order. Shorter than six
    /// characters while the buffer is incomplete.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The slot the cursor is on.
    pub fn focused_slot(&self) -> usize {
        self.focused
    }

    /// The slot contents, in order.
    pub fn slots(&self) -> &[Option<char>; CODE_LENGTH] {
        &self.slots
    }
}

impl Default for CodeEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_fills_slots_and_advances() {
        let mut entry = CodeEntry::new();

        assert_eq!(entry.type_digit(0, "1"), TypeOutcome::Accepted);
        assert_eq!(entry.focused_slot(), 1);
        assert_eq!(entry.type_digit(1, "2"), TypeOutcome::Accepted);
        assert_eq!(entry.focused_slot(), 2);
        assert_eq!(entry.code(), "12");
        assert!(!entry.is_complete());
    }

    #[test]
    fn non_digit_input_is_ignored() {
        let mut entry = CodeEntry::new();
        assert_eq!(entry.type_digit(0, "a"), TypeOutcome::Ignored);
        assert_eq!(entry.type_digit(0, "1a"), TypeOutcome::Ignored);
        assert_eq!(entry.type_digit(0, " "), TypeOutcome::Ignored);
        assert!(entry.is_empty());
        assert_eq!(entry.focused_slot(), 0);
    }

    #[test]
    fn paste_keeps_last_character() {
        let mut entry = CodeEntry::new();
        assert_eq!(entry.type_digit(2, "123"), TypeOutcome::Accepted);
        assert_eq!(entry.slots()[2], Some('3'));
        assert_eq!(entry.focused_slot(), 3);
    }

    #[test]
    fn empty_input_clears_slot_without_moving() {
        let mut entry = CodeEntry::new();
        entry.type_digit(0, "7");
        assert_eq!(entry.type_digit(0, ""), TypeOutcome::Accepted);
        assert_eq!(entry.slots()[0], None);
        assert_eq!(entry.focused_slot(), 0);
    }

    #[test]
    fn cursor_stays_on_last_slot() {
        let mut entry = CodeEntry::new();
        entry.type_digit(5, "9");
        assert_eq!(entry.focused_slot(), 5);
    }

    #[test]
    fn backspace_on_filled_slot_clears_and_keeps_cursor() {
        let mut entry = CodeEntry::new();
        entry.type_digit(3, "4");
        entry.backspace(3);
        assert_eq!(entry.slots()[3], None);
        assert_eq!(entry.focused_slot(), 3);
    }

    #[test]
    fn backspace_on_empty_slot_moves_back() {
        let mut entry = CodeEntry::new();
        entry.backspace(4);
        assert_eq!(entry.focused_slot(), 3);
    }

    #[test]
    fn backspace_on_slot_zero_is_noop() {
        let mut entry = CodeEntry::new();
        entry.backspace(0);
        assert_eq!(entry.focused_slot(), 0);
        assert!(entry.is_empty());
    }

    #[test]
    fn completing_final_slot_submits_in_slot_order() {
        let mut entry = CodeEntry::new();
        for (slot, digit) in ["6", "5", "4", "3", "2"].iter().enumerate() {
            assert_eq!(entry.type_digit(slot, digit), TypeOutcome::Accepted);
        }
        assert_eq!(
            entry.type_digit(5, "1"),
            TypeOutcome::Submit("654321".to_string())
        );
    }

    #[test]
    fn completing_elsewhere_does_not_submit() {
        let mut entry = CodeEntry::new();
        entry.type_digit(5, "6");
        for (slot, digit) in ["1", "2", "3", "4"].iter().enumerate() {
            entry.type_digit(slot, digit);
        }
        // slot 4 was the last to fill; only slot 5 triggers auto-submit
        assert_eq!(entry.type_digit(4, "5"), TypeOutcome::Accepted);
        assert!(entry.is_complete());
        assert_eq!(entry.code(), "123456");
    }

    #[test]
    fn retyping_final_slot_of_full_buffer_submits_again() {
        let mut entry = CodeEntry::new();
        for slot in 0..CODE_LENGTH {
            entry.type_digit(slot, "1");
        }
        assert_eq!(
            entry.type_digit(5, "9"),
            TypeOutcome::Submit("111119".to_string())
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut entry = CodeEntry::new();
        for slot in 0..CODE_LENGTH {
            entry.type_digit(slot, "8");
        }
        entry.reset();
        assert!(entry.is_empty());
        assert_eq!(entry.focused_slot(), 0);
        assert_eq!(entry.code(), "");
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut entry = CodeEntry::new();
        assert_eq!(entry.type_digit(6, "1"), TypeOutcome::Ignored);
        entry.backspace(9);
        assert!(entry.is_empty());
        assert_eq!(entry.focused_slot(), 0);
    }
}
