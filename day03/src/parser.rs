#[derive(Default, Debug, Clone, Copy, PartialEq)]
enum State {
    #[default]
    Initial,
    M,
    U,
    L,
    Bracket,
    Number1,
    Comma,
    Number2,
    D,
    O,
    DoBracket,
    N,
    Apostrophe,
    T,
    DontBracket,
}

/// Character-at-a-time scanner for `mul(a,b)`, optionally honouring `do()` and `don't()`.
pub struct Parser {
    state: State,
    lhs: String,
    rhs: String,
    toggles: bool,
    enabled: bool,
}

impl Parser {
    pub fn new(toggles: bool) -> Self {
        Self {
            state: State::Initial,
            lhs: String::new(),
            rhs: String::new(),
            toggles,
            enabled: true,
        }
    }

    /// Forgets any partial match and re-enables multiplication.
    pub fn reset(&mut self) {
        self.state = State::Initial;
        self.lhs.clear();
        self.rhs.clear();
        self.enabled = true;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Drops the partial match and retries `symbol` from the initial state.
    /// `enabled` survives this.
    fn restart(&mut self, symbol: char) {
        self.state = State::Initial;
        self.lhs.clear();
        self.rhs.clear();
        self.handle_initial(symbol);
    }

    fn handle_initial(&mut self, symbol: char) {
        if self.enabled && symbol == 'm' {
            self.state = State::M;
        } else if self.toggles && symbol == 'd' {
            self.state = State::D;
        }
    }

    fn expect(&mut self, symbol: char, wanted: char, next: State) {
        if symbol == wanted {
            self.state = next;
        } else {
            self.restart(symbol);
        }
    }

    // Both buffers hold at least one ASCII digit by the time this runs.
    fn product(&self) -> u64 {
        match (self.lhs.parse::<u64>(), self.rhs.parse::<u64>()) {
            (Ok(lhs), Ok(rhs)) => lhs.checked_mul(rhs).unwrap_or(0),
            _ => 0,
        }
    }

    /// Consumes one character. Returns the product when it closes a `mul(a,b)`, else 0.
    pub fn feed(&mut self, symbol: char) -> u64 {
        match self.state {
            State::Initial => self.handle_initial(symbol),
            State::M => self.expect(symbol, 'u', State::U),
            State::U => self.expect(symbol, 'l', State::L),
            State::L => self.expect(symbol, '(', State::Bracket),
            State::Bracket | State::Number1 if symbol.is_ascii_digit() => {
                self.state = State::Number1;
                self.lhs.push(symbol);
            }
            State::Number1 => self.expect(symbol, ',', State::Comma),
            State::Comma | State::Number2 if symbol.is_ascii_digit() => {
                self.state = State::Number2;
                self.rhs.push(symbol);
            }
            State::Number2 if symbol == ')' => {
                let result = self.product();
                self.restart(symbol);
                return result;
            }
            State::D => self.expect(symbol, 'o', State::O),
            State::O => match symbol {
                '(' => self.state = State::DoBracket,
                'n' => self.state = State::N,
                _ => self.restart(symbol),
            },
            State::N => self.expect(symbol, '\'', State::Apostrophe),
            State::Apostrophe => self.expect(symbol, 't', State::T),
            State::T => self.expect(symbol, '(', State::DontBracket),
            State::DoBracket => {
                if symbol == ')' {
                    self.enabled = true;
                }
                self.restart(symbol);
            }
            State::DontBracket => {
                if symbol == ')' {
                    self.enabled = false;
                }
                self.restart(symbol);
            }
            State::Bracket | State::Comma | State::Number2 => self.restart(symbol),
        }
        0
    }
}

/// Feeds every character of `input`, whitespace included, through a fresh parser.
pub fn scan(input: &str, toggles: bool) -> u64 {
    let mut parser = Parser::new(toggles);
    input.chars().map(|symbol| parser.feed(symbol)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_1: &str =
        "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
    const EXAMPLE_2: &str =
        "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";

    fn feed_all(parser: &mut Parser, input: &str) -> Vec<u64> {
        input
            .chars()
            .map(|symbol| parser.feed(symbol))
            .filter(|&result| result != 0)
            .collect()
    }

    #[test]
    fn challenge_1_example() {
        assert_eq!(scan(EXAMPLE_1, false), 161);
    }

    #[test]
    fn challenge_1_ignores_toggles() {
        assert_eq!(scan(EXAMPLE_2, false), 161);
    }

    #[test]
    fn challenge_2_example() {
        assert_eq!(scan(EXAMPLE_2, true), 48);
    }

    #[test]
    fn product_returned_on_closing_bracket() {
        let mut parser = Parser::new(false);
        let results: Vec<u64> = "mul(12,34)".chars().map(|c| parser.feed(c)).collect();
        assert_eq!(results, [0, 0, 0, 0, 0, 0, 0, 0, 0, 408]);
    }

    #[test]
    fn stray_m_is_reprocessed() {
        assert_eq!(scan("mmul(2,3)", false), 6);
        assert_eq!(scan("mulmul(2,3)", false), 6);
        assert_eq!(scan("mul(2,mul(4,5)", false), 20);
    }

    #[test]
    fn numbers_need_a_digit() {
        assert_eq!(scan("mul(,3)", false), 0);
        assert_eq!(scan("mul(3,)", false), 0);
        assert_eq!(scan("mul()", false), 0);
    }

    #[test]
    fn whitespace_breaks_a_match() {
        assert_eq!(scan("mul(1, 2)", false), 0);
        assert_eq!(scan("mul ( 1,2)", false), 0);
    }

    #[test]
    fn d_is_plain_text_without_toggles() {
        assert_eq!(scan("don't()mul(2,2)", false), 4);
    }

    #[test]
    fn dont_then_do() {
        let mut parser = Parser::new(true);
        assert_eq!(feed_all(&mut parser, "don't()mul(2,2)"), Vec::<u64>::new());
        assert!(!parser.enabled());
        assert_eq!(feed_all(&mut parser, "do()mul(3,3)"), [9]);
        assert!(parser.enabled());
    }

    #[test]
    fn broken_toggles_do_nothing() {
        assert_eq!(scan("don't(mul(2,2)", true), 4);
        assert_eq!(scan("don't()do(xmul(2,2)", true), 0);
        assert_eq!(scan("don'tmul(2,2)", true), 4);
    }

    #[test]
    fn toggle_bracket_reprocesses_symbol() {
        // The character after `do(` is retried from the initial state.
        assert_eq!(scan("do(mul(2,5)", true), 10);
    }

    #[test]
    fn enabled_flag_survives_restarts() {
        let mut parser = Parser::new(true);
        feed_all(&mut parser, "don't()");
        feed_all(&mut parser, "mu?dxo");
        assert!(!parser.enabled());
        assert_eq!(feed_all(&mut parser, "mul(1,1)"), Vec::<u64>::new());
    }

    #[test]
    fn reset_reenables() {
        let mut parser = Parser::new(true);
        feed_all(&mut parser, "don't()mul(4");
        parser.reset();
        assert!(parser.enabled());
        assert_eq!(feed_all(&mut parser, ",2)mul(4,2)"), [8]);
    }

    #[test]
    fn overflowing_operands_contribute_nothing() {
        assert_eq!(scan("mul(99999999999999999999,2)", false), 0);
        assert_eq!(scan("mul(4294967296,4294967296)mul(1,2)", false), 2);
    }
}
