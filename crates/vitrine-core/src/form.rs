//! Lead-capture forms: required-field validation and a terminal
//! submitted state
//!
//! A [`Form`] owns an ordered list of text fields and a two-state machine:
//! `Editing → Submitted`. Submission is rejected without a state change
//! unless every required field is non-empty; a successful submit echoes the
//! recorded values to the log (secrets masked) and is terminal. No data
//! leaves the process.

use tracing::info;

/// One text field of a form
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub required: bool,
    /// Render masked and never echo the value
    pub secret: bool,
    /// Set when a submit was rejected because this field was empty
    pub missing: bool,
}

impl Field {
    /// A required text field
    pub fn required(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            required: true,
            secret: false,
            missing: false,
        }
    }

    /// A required masked field
    pub fn secret(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::required(label, placeholder)
        }
    }

    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Form display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    /// Terminal; the form never reverts
    Submitted,
}

/// A validated lead-capture form
#[derive(Debug, Clone)]
pub struct Form {
    /// Name used in the submit echo
    name: &'static str,
    fields: Vec<Field>,
    focus: usize,
    state: FormState,
}

impl Form {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self {
            name,
            fields,
            focus: 0,
            state: FormState::Editing,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == FormState::Submitted
    }

    /// Index of the focused field
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type a character into the focused field. Ignored once submitted.
    pub fn input(&mut self, c: char) {
        if self.state == FormState::Submitted {
            return;
        }
        if c.is_control() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
            field.missing = false;
        }
    }

    /// Delete the last character of the focused field. Ignored once
    /// submitted.
    pub fn backspace(&mut self) {
        if self.state == FormState::Submitted {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Attempt submission
    ///
    /// Rejected with no state change while any required field is blank;
    /// the blank fields are marked so the render can hint at them. On
    /// success transitions to the terminal submitted state exactly once
    /// and echoes the recorded values.
    pub fn submit(&mut self) -> bool {
        if self.state == FormState::Submitted {
            return false;
        }

        let mut complete = true;
        for field in &mut self.fields {
            if field.required && field.is_blank() {
                field.missing = true;
                complete = false;
            }
        }
        if !complete {
            return false;
        }

        self.state = FormState::Submitted;
        info!("{} data recorded: {}", self.name, self.echo_summary());
        true
    }

    /// Field values for the submit echo, secrets masked
    fn echo_summary(&self) -> String {
        self.fields
            .iter()
            .map(|f| {
                if f.secret {
                    format!("{}=\"•••\"", f.label)
                } else {
                    format!("{}={:?}", f.label, f.value)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priority_form() -> Form {
        Form::new(
            "priority access",
            vec![
                Field::required("Full Name", "Jane Doe"),
                Field::required("Email Address", "jane@example.com"),
            ],
        )
    }

    fn type_str(form: &mut Form, s: &str) {
        for c in s.chars() {
            form.input(c);
        }
    }

    #[test]
    fn test_submit_rejected_while_any_required_blank() {
        let mut form = priority_form();
        type_str(&mut form, "Jane Doe");
        assert!(!form.submit());
        assert_eq!(form.state(), FormState::Editing);
        // Only the blank field is marked
        assert!(!form.fields()[0].missing);
        assert!(form.fields()[1].missing);
    }

    #[test]
    fn test_whitespace_is_blank() {
        let mut form = priority_form();
        type_str(&mut form, "   ");
        form.focus_next();
        type_str(&mut form, "jane@example.com");
        assert!(!form.submit());
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn test_editing_clears_missing_mark() {
        let mut form = priority_form();
        assert!(!form.submit());
        assert!(form.fields()[0].missing);
        form.input('J');
        assert!(!form.fields()[0].missing);
    }

    #[test]
    fn test_complete_submit_is_terminal() {
        let mut form = priority_form();
        type_str(&mut form, "Jane Doe");
        form.focus_next();
        type_str(&mut form, "jane@example.com");

        assert!(form.submit());
        assert_eq!(form.state(), FormState::Submitted);

        // Resubmission is impossible, input is dead
        assert!(!form.submit());
        form.input('x');
        form.backspace();
        assert_eq!(form.fields()[1].value, "jane@example.com");
        assert_eq!(form.state(), FormState::Submitted);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = priority_form();
        assert_eq!(form.focus(), 0);
        form.focus_next();
        assert_eq!(form.focus(), 1);
        form.focus_next();
        assert_eq!(form.focus(), 0);
        form.focus_previous();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn test_secret_masked_in_echo() {
        let mut form = Form::new(
            "account",
            vec![
                Field::required("Email", "jane@example.com"),
                Field::secret("Password", ""),
            ],
        );
        type_str(&mut form, "jane@example.com");
        form.focus_next();
        type_str(&mut form, "hunter2");
        assert!(form.submit());
        let echo = form.echo_summary();
        assert!(echo.contains("jane@example.com"));
        assert!(!echo.contains("hunter2"));
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut form = priority_form();
        form.input('\u{8}');
        form.input('\n');
        assert!(form.fields()[0].value.is_empty());
    }
}
