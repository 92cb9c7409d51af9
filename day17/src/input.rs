use thiserror::Error;

use crate::cpu::Registers;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("missing line for register {0}")]
    MissingRegister(char),
    #[error("malformed register line {0:?}")]
    MalformedRegister(String),
    #[error("missing program line")]
    MissingProgram,
    #[error("invalid number {0:?} in program")]
    InvalidNumber(String),
}

fn get_register(line: Option<&str>, name: char) -> Result<u64, InputError> {
    let line = line.ok_or(InputError::MissingRegister(name))?;
    let prefix = format!("Register {name}:");
    line.strip_prefix(&prefix)
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| InputError::MalformedRegister(line.to_string()))
}

fn get_program(line: Option<&str>) -> Result<Vec<u64>, InputError> {
    let program = line
        .and_then(|line| line.strip_prefix("Program:"))
        .ok_or(InputError::MissingProgram)?;

    program
        .trim()
        .split(',')
        .map(|num| {
            num.trim()
                .parse()
                .map_err(|_| InputError::InvalidNumber(num.to_string()))
        })
        .collect()
}

/// Parses the debugger dump: three `Register X: n` lines followed by `Program: a,b,...`.
pub fn get_debug_info(input: &str) -> Result<(Registers, Vec<u64>), InputError> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

    let registers = Registers {
        a: get_register(lines.next(), 'A')?,
        b: get_register(lines.next(), 'B')?,
        c: get_register(lines.next(), 'C')?,
    };
    let program = get_program(lines.next())?;

    Ok((registers, program))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Register A: 729
Register B: 0
Register C: 0

Program: 0,1,5,4,3,0
";

    #[test]
    fn parses_example() {
        let (registers, program) = get_debug_info(EXAMPLE).unwrap();
        assert_eq!(registers, Registers::with_a(729));
        assert_eq!(program, [0, 1, 5, 4, 3, 0]);
    }

    #[test]
    fn tolerates_spacing() {
        let input = "Register A: 2024\r\nRegister B:7\r\nRegister C:  9\r\n\r\nProgram: 0, 3,5 ,4,3,0\r\n";
        let (registers, program) = get_debug_info(input).unwrap();
        assert_eq!(registers, Registers { a: 2024, b: 7, c: 9 });
        assert_eq!(program, [0, 3, 5, 4, 3, 0]);
    }

    #[test]
    fn missing_register() {
        assert_eq!(
            get_debug_info("Register A: 1\nRegister B: 2\n"),
            Err(InputError::MissingRegister('C'))
        );
    }

    #[test]
    fn register_out_of_order() {
        assert_eq!(
            get_debug_info("Register B: 1\nRegister A: 2\nRegister C: 0\n"),
            Err(InputError::MalformedRegister("Register B: 1".to_string()))
        );
    }

    #[test]
    fn negative_register() {
        assert_eq!(
            get_debug_info("Register A: -1\nRegister B: 0\nRegister C: 0\n"),
            Err(InputError::MalformedRegister("Register A: -1".to_string()))
        );
    }

    #[test]
    fn missing_program() {
        assert_eq!(
            get_debug_info("Register A: 1\nRegister B: 0\nRegister C: 0\n"),
            Err(InputError::MissingProgram)
        );
    }

    #[test]
    fn bad_program_number() {
        assert_eq!(
            get_debug_info("Register A: 1\nRegister B: 0\nRegister C: 0\nProgram: 0,x,3"),
            Err(InputError::InvalidNumber("x".to_string()))
        );
    }
}
