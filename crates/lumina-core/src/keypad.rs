//! Calculator input state machine and scientific function dispatch.
//!
//! The [`Keypad`] owns the display state privately: a committed expression
//! (the frozen left-hand side ending in a pending operator, or empty) and the
//! active operand being typed. Completed calculations are reported upward as
//! [`Computed`] values; the caller decides what to do with them (the TUI
//! shell records them into the history store).
//!
//! Evaluation failures never escape: they become the error display state,
//! and the next key press clears it before being processed normally.

use crate::eval;

/// Display text shown after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Which button set the calculator exposes.
///
/// Purely presentational: the state machine itself is identical in both
/// modes, only the live scientific keys differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Basic => Mode::Scientific,
            Mode::Scientific => Mode::Basic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Basic => "Basic",
            Mode::Scientific => "Scientific",
        }
    }
}

/// Binary operators accepted between operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Subtract => '-',
            BinOp::Multiply => '*',
            BinOp::Divide => '/',
            BinOp::Remainder => '%',
        }
    }

    pub fn from_char(c: char) -> Option<BinOp> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Subtract),
            '*' => Some(BinOp::Multiply),
            '/' => Some(BinOp::Divide),
            '%' => Some(BinOp::Remainder),
            _ => None,
        }
    }
}

/// A key press routed to the calculator, from keyboard or on-screen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Op(BinOp),
    Equals,
    Backspace,
    Clear,
}

/// Unary scientific operations applied to the active operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SciOp {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Exp,
    Pow2,
}

impl SciOp {
    pub fn name(self) -> &'static str {
        match self {
            SciOp::Sin => "sin",
            SciOp::Cos => "cos",
            SciOp::Tan => "tan",
            SciOp::Sqrt => "sqrt",
            SciOp::Log => "log",
            SciOp::Exp => "exp",
            SciOp::Pow2 => "pow2",
        }
    }

    /// Trig inputs are radians; `Log` is base 10; `Pow2` is the square.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            SciOp::Sin => x.sin(),
            SciOp::Cos => x.cos(),
            SciOp::Tan => x.tan(),
            SciOp::Sqrt => x.sqrt(),
            SciOp::Log => x.log10(),
            SciOp::Exp => x.exp(),
            SciOp::Pow2 => x * x,
        }
    }
}

/// A completed calculation reported to the shell for history recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    pub expression: String,
    pub result: String,
}

/// The calculator's input state machine.
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Frozen left-hand side ending in a pending operator, or empty.
    expression: String,
    /// Operand currently being typed (or the last result / error marker).
    display: String,
    has_error: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            display: "0".to_string(),
            has_error: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Resets both fields and leaves the error state.
    pub fn clear(&mut self) {
        self.expression.clear();
        self.display = "0".to_string();
        self.has_error = false;
    }

    /// Processes one key press.
    ///
    /// Returns the completed calculation when the key was `Equals` and
    /// evaluation succeeded; `None` otherwise. A key pressed while errored
    /// first performs a full clear and is then processed in the same step.
    pub fn press(&mut self, key: Key) -> Option<Computed> {
        if self.has_error {
            self.clear();
        }

        match key {
            Key::Digit(d) => {
                let d = char::from(b'0' + (d % 10));
                if self.display == "0" {
                    self.display = d.to_string();
                } else {
                    self.display.push(d);
                }
                None
            }
            Key::Decimal => {
                if !self.display.contains('.') {
                    self.display.push('.');
                }
                None
            }
            Key::Op(op) => {
                // Freeze the operand onto the committed expression. There is
                // deliberately no guard against a second operator before any
                // digit: the reset operand is re-frozen as typed.
                self.expression
                    .push_str(&format!("{} {} ", self.display, op.symbol()));
                self.display = "0".to_string();
                None
            }
            Key::Equals => self.equals(),
            Key::Backspace => {
                self.display.pop();
                if self.display.is_empty() {
                    self.display = "0".to_string();
                }
                None
            }
            Key::Clear => {
                self.clear();
                None
            }
        }
    }

    fn equals(&mut self) -> Option<Computed> {
        let full_expression = format!("{}{}", self.expression, self.display);
        match eval::evaluate(&full_expression) {
            Ok(value) => {
                let result = eval::format_grouped(value);
                self.display = result.clone();
                self.expression.clear();
                Some(Computed {
                    expression: full_expression,
                    result,
                })
            }
            Err(_) => {
                self.display = ERROR_DISPLAY.to_string();
                self.has_error = true;
                None
            }
        }
    }

    /// Applies a unary scientific function to the active operand.
    ///
    /// Independent of the committed expression and the error state: a
    /// non-numeric operand parses to NaN, which flows through to the display
    /// unguarded. Always reports a history entry, matching the evaluator's
    /// asymmetric error handling on purpose.
    pub fn scientific(&mut self, op: SciOp) -> Computed {
        let operand: f64 = self.display.parse().unwrap_or(f64::NAN);
        let result = eval::format_fixed_trimmed(op.apply(operand));
        let expression = format!("{}({})", op.name(), self.display);
        self.display = result.clone();
        Computed { expression, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(keypad: &mut Keypad, digits: &str) {
        for c in digits.chars() {
            keypad.press(Key::Digit(c as u8 - b'0'));
        }
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(0));
        keypad.press(Key::Digit(7));
        assert_eq!(keypad.display(), "7");
    }

    #[test]
    fn decimal_point_is_idempotent_per_operand() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(1));
        keypad.press(Key::Decimal);
        keypad.press(Key::Decimal);
        keypad.press(Key::Digit(5));
        assert_eq!(keypad.display(), "1.5");
    }

    #[test]
    fn operator_freezes_operand_and_resets_display() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, "12");
        keypad.press(Key::Op(BinOp::Add));
        assert_eq!(keypad.expression(), "12 + ");
        assert_eq!(keypad.display(), "0");
    }

    #[test]
    fn consecutive_operators_refreeze_without_guard() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(5));
        keypad.press(Key::Op(BinOp::Add));
        keypad.press(Key::Op(BinOp::Multiply));
        assert_eq!(keypad.expression(), "5 + 0 * ");
    }

    #[test]
    fn equals_reports_calculation_and_chains() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(2));
        keypad.press(Key::Op(BinOp::Add));
        keypad.press(Key::Digit(3));
        keypad.press(Key::Op(BinOp::Multiply));
        keypad.press(Key::Digit(4));
        let computed = keypad.press(Key::Equals).expect("calculation");
        assert_eq!(computed.expression, "2 + 3 * 4");
        assert_eq!(computed.result, "14");
        assert_eq!(keypad.display(), "14");
        assert_eq!(keypad.expression(), "");
    }

    #[test]
    fn grouped_result_feeds_the_next_calculation() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, "1000");
        keypad.press(Key::Op(BinOp::Multiply));
        keypad.press(Key::Digit(2));
        let computed = keypad.press(Key::Equals).expect("calculation");
        assert_eq!(computed.result, "2,000");

        // Commas are stripped by sanitization when the result is reused.
        keypad.press(Key::Op(BinOp::Add));
        keypad.press(Key::Digit(1));
        let computed = keypad.press(Key::Equals).expect("calculation");
        assert_eq!(computed.result, "2,001");
    }

    #[test]
    fn division_by_zero_enters_error_state_without_reporting() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(5));
        keypad.press(Key::Op(BinOp::Divide));
        keypad.press(Key::Digit(0));
        assert!(keypad.press(Key::Equals).is_none());
        assert!(keypad.has_error());
        assert_eq!(keypad.display(), ERROR_DISPLAY);
    }

    #[test]
    fn key_after_error_clears_then_types() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(5));
        keypad.press(Key::Op(BinOp::Divide));
        keypad.press(Key::Digit(0));
        keypad.press(Key::Equals);
        assert!(keypad.has_error());

        keypad.press(Key::Digit(8));
        assert!(!keypad.has_error());
        assert_eq!(keypad.display(), "8");
        assert_eq!(keypad.expression(), "");
    }

    #[test]
    fn backspace_trims_operand_only() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, "12");
        keypad.press(Key::Op(BinOp::Add));
        type_digits(&mut keypad, "34");
        keypad.press(Key::Backspace);
        assert_eq!(keypad.display(), "3");
        keypad.press(Key::Backspace);
        assert_eq!(keypad.display(), "0");
        keypad.press(Key::Backspace);
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "12 + ");
    }

    #[test]
    fn sqrt_of_nine_is_three() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(9));
        let computed = keypad.scientific(SciOp::Sqrt);
        assert_eq!(computed.expression, "sqrt(9)");
        assert_eq!(computed.result, "3");
        assert_eq!(keypad.display(), "3");
    }

    #[test]
    fn pow2_strips_trailing_zeros() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(1));
        keypad.press(Key::Decimal);
        keypad.press(Key::Digit(5));
        let computed = keypad.scientific(SciOp::Pow2);
        assert_eq!(computed.result, "2.25");
    }

    #[test]
    fn sqrt_of_negative_displays_nan_literally() {
        let mut keypad = Keypad::new();
        // Error marker parses as NaN too; either way NaN flows through.
        keypad.press(Key::Digit(5));
        keypad.press(Key::Op(BinOp::Divide));
        keypad.press(Key::Digit(0));
        keypad.press(Key::Equals);
        let computed = keypad.scientific(SciOp::Sqrt);
        assert_eq!(computed.result, "NaN");
        assert_eq!(keypad.display(), "NaN");
        // Scientific dispatch leaves the error flag alone.
        assert!(keypad.has_error());
    }

    #[test]
    fn scientific_does_not_touch_committed_expression() {
        let mut keypad = Keypad::new();
        keypad.press(Key::Digit(2));
        keypad.press(Key::Op(BinOp::Add));
        keypad.press(Key::Digit(9));
        keypad.scientific(SciOp::Sqrt);
        assert_eq!(keypad.expression(), "2 + ");
        assert_eq!(keypad.display(), "3");
    }
}
