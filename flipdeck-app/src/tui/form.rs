#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Front,
    Back,
}

/// Draft of a new card while the add form is open.
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub front: String,
    pub back: String,
    pub focus: Field,
}

impl CardForm {
    fn focused(&mut self) -> &mut String {
        match self.focus {
            Field::Front => &mut self.front,
            Field::Back => &mut self.back,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.focused().push(c);
    }

    pub fn newline(&mut self) {
        self.focused().push('\n');
    }

    pub fn backspace(&mut self) {
        self.focused().pop();
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            Field::Front => Field::Back,
            Field::Back => Field::Front,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_go_to_focused_field() {
        let mut f = CardForm::default();
        f.insert('h');
        f.insert('i');
        f.newline();
        f.switch_field();
        f.insert('x');
        f.backspace();
        f.insert('y');
        assert_eq!(f.front, "hi\n");
        assert_eq!(f.back, "y");
        assert_eq!(f.focus, Field::Back);
        f.switch_field();
        assert_eq!(f.focus, Field::Front);
    }
}
