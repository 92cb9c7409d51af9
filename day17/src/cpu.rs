use crossterm::style::Stylize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CpuError {
    #[error("program length {0} is odd, expected opcode/operand pairs")]
    OddLength(usize),
    #[error("invalid opcode {opcode} at ip {ip}")]
    InvalidOpcode { opcode: u64, ip: usize },
    #[error("reserved combo operand {operand} at ip {ip}")]
    ReservedOperand { operand: u64, ip: usize },
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Op {
    Adv,
    Bxl,
    Bst,
    Jnz,
    Bxc,
    Out,
    Bdv,
    Cdv,
}

#[derive(Default, Clone, Copy)]
pub enum CpuMode {
    #[default]
    Normal,
    Trace,
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum State {
    #[default]
    Ready,
    Active,
    Halted,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u64,
    pub b: u64,
    pub c: u64,
}

impl Registers {
    pub fn with_a(a: u64) -> Self {
        Self { a, b: 0, c: 0 }
    }
}

struct Cmd {
    op: Op,
    combo: bool,
}

fn get_cmd(opcode: u64) -> Option<Cmd> {
    match opcode {
        0 => Some(Cmd {
            op: Op::Adv,
            combo: true,
        }),
        1 => Some(Cmd {
            op: Op::Bxl,
            combo: false,
        }),
        2 => Some(Cmd {
            op: Op::Bst,
            combo: true,
        }),
        3 => Some(Cmd {
            op: Op::Jnz,
            combo: false,
        }),
        4 => Some(Cmd {
            op: Op::Bxc,
            combo: false,
        }),
        5 => Some(Cmd {
            op: Op::Out,
            combo: true,
        }),
        6 => Some(Cmd {
            op: Op::Bdv,
            combo: true,
        }),
        7 => Some(Cmd {
            op: Op::Cdv,
            combo: true,
        }),
        _ => None,
    }
}

/// `a / 2^shift`, truncated. Shifting out every bit gives 0 instead of overflowing.
fn divide(a: u64, shift: u64) -> u64 {
    u32::try_from(shift)
        .ok()
        .and_then(|shift| a.checked_shr(shift))
        .unwrap_or(0)
}

pub fn format_output(output: &[u64]) -> String {
    output
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// The 3-bit computer. Owns its program; ip and output are per-run and cleared by [`Cpu::reset`].
pub struct Cpu {
    ip: usize,
    reg: Registers,
    program: Vec<u64>,
    output: Vec<u64>,
    pub mode: CpuMode,
    state: State,
}

impl Cpu {
    pub fn new(program: Vec<u64>) -> Result<Self, CpuError> {
        if program.len() % 2 != 0 {
            return Err(CpuError::OddLength(program.len()));
        }
        Ok(Self {
            ip: 0,
            reg: Registers::default(),
            program,
            output: Vec::new(),
            mode: CpuMode::Normal,
            state: State::Ready,
        })
    }

    pub fn program(&self) -> &[u64] {
        &self.program
    }

    pub fn output(&self) -> &[u64] {
        &self.output
    }

    pub fn registers(&self) -> Registers {
        self.reg
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn load_registers(&mut self, reg: Registers) {
        self.reg = reg;
    }

    pub fn reset(&mut self) {
        self.ip = 0;
        self.output.clear();
        self.state = State::Ready;
    }

    fn print_cmd(&self, cmd: &Cmd, operand: u64) {
        eprintln!(
            "{} : {}\t[{}]   A={} B={} C={}",
            format!("{:4}", self.ip).blue(),
            format!("{:?}", cmd.op).red(),
            operand,
            self.reg.a,
            self.reg.b,
            self.reg.c
        );
    }

    fn combo(&self, operand: u64) -> Result<u64, CpuError> {
        match operand {
            0..=3 => Ok(operand),
            4 => Ok(self.reg.a),
            5 => Ok(self.reg.b),
            6 => Ok(self.reg.c),
            _ => Err(CpuError::ReservedOperand {
                operand,
                ip: self.ip,
            }),
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd, operand: u64) -> Result<(), CpuError> {
        let value = if cmd.combo {
            self.combo(operand)?
        } else {
            operand
        };

        match cmd.op {
            Op::Adv => self.reg.a = divide(self.reg.a, value),
            Op::Bxl => self.reg.b ^= value,
            Op::Bst => self.reg.b = value & 0b111,
            Op::Jnz => {
                if self.reg.a != 0 {
                    self.ip = value as usize;
                    return Ok(());
                }
            }
            Op::Bxc => self.reg.b ^= self.reg.c,
            Op::Out => {
                if let CpuMode::Trace = self.mode {
                    eprintln!("{} {}", "OUTPUT >".red().bold(), value & 0b111);
                }
                self.output.push(value & 0b111);
            }
            Op::Bdv => self.reg.b = divide(self.reg.a, value),
            Op::Cdv => self.reg.c = divide(self.reg.a, value),
        }
        self.ip += 2;
        Ok(())
    }

    /// Executes the instruction at the pointer. Returns `false` once no opcode/operand pair is left.
    pub fn step(&mut self) -> Result<bool, CpuError> {
        if self.ip >= self.program.len().saturating_sub(1) {
            self.state = State::Halted;
            return Ok(false);
        }

        let opcode = self.program[self.ip];
        let operand = self.program[self.ip + 1];
        let cmd = get_cmd(opcode).ok_or(CpuError::InvalidOpcode {
            opcode,
            ip: self.ip,
        })?;
        if let CpuMode::Trace = self.mode {
            self.print_cmd(&cmd, operand);
        }

        self.state = State::Active;
        self.execute_cmd(cmd, operand)?;
        Ok(true)
    }

    pub fn run(&mut self) -> Result<(), CpuError> {
        while self.step()? {}
        Ok(())
    }

    pub fn execute(&mut self, reg: Registers) -> Result<&[u64], CpuError> {
        self.reset();
        self.load_registers(reg);
        self.run()?;
        Ok(&self.output)
    }

    pub fn is_self_referential(&mut self, reg: Registers) -> Result<bool, CpuError> {
        self.execute(reg)?;
        Ok(self.output == self.program)
    }
}
