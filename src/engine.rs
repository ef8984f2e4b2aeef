use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::error::EngineError;
use crate::loop_stack::{DEFAULT_LOOP_CAPACITY, LoopStack};
use crate::opcode::{COMMA, DOT, GREATER, LBRACKET, LESS, MINUS, PLUS, RBRACKET};
use crate::tape::Tape;

/// What `,` does to the current cell once input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EofBehavior {
    /// Leave the cell as it was.
    #[default]
    Unchanged,
    /// Store 0.
    Zero,
    /// Store -1 (255).
    MinusOne,
}

/// Configuration for a single run.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Maximum number of simultaneously open loops.
    pub loop_capacity: usize,
    /// What `,` does at end of input.
    pub eof: EofBehavior,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            loop_capacity: DEFAULT_LOOP_CAPACITY,
            eof: EofBehavior::Unchanged,
        }
    }
}

/// Interpreter state for one program run.
///
/// The program is executed front to back:
/// - `pc` indexes the next byte of `program` to fetch
/// - `data_pointer` is the virtual tape address of the current cell
/// - `loops` holds the pc just past each open `[`
/// - `skip_depth` counts open brackets while skipping a loop whose cell was 0
///
/// A counter rather than a flag for skipping, so that `]` of a nested loop
/// inside a skipped body does not end the skip early.
///
/// Reaching the end of the program ends the run, even with loops still open.
pub struct Engine<'p, R, W> {
    program: &'p [u8],
    pc: usize,
    data_pointer: isize,
    tape: Tape,
    loops: LoopStack,
    skip_depth: usize,
    eof: EofBehavior,
    input: R,
    output: W,
}

impl<'p, R: Read, W: Write> Engine<'p, R, W> {
    pub fn new(program: &'p [u8], input: R, output: W) -> Self {
        Self::with_config(program, input, output, EngineConfig::default())
    }

    pub fn with_config(program: &'p [u8], input: R, output: W, config: EngineConfig) -> Self {
        let mut tape = Tape::new();
        tape.resolve(0);
        Self {
            program,
            pc: 0,
            data_pointer: 0,
            tape,
            loops: LoopStack::new(config.loop_capacity),
            skip_depth: 0,
            eof: config.eof,
            input,
            output,
        }
    }

    /// Execute instructions until the end of the program.
    ///
    /// Returns the number of bytes fetched, skipped ones included.
    pub fn run(&mut self) -> Result<usize, EngineError> {
        let mut steps = 0;
        while self.step()? {
            steps += 1;
        }
        debug!(steps, "program finished");
        Ok(steps)
    }

    /// Fetch and dispatch one byte. Returns `false` if the program has ended.
    pub fn step(&mut self) -> Result<bool, EngineError> {
        let Some(&op) = self.program.get(self.pc) else {
            return Ok(false);
        };
        let at = self.pc;
        self.pc += 1;

        if self.skip_depth > 0 {
            match op {
                LBRACKET => self.skip_depth += 1,
                RBRACKET => self.skip_depth -= 1,
                _ => {}
            }
            return Ok(true);
        }

        let value = self.cell();
        trace!(
            pc = at,
            op = %(op as char),
            ptr = self.data_pointer,
            value,
            "executing instruction (cell {value:#04x})"
        );

        match op {
            LESS => {
                self.data_pointer -= 1;
                self.tape.resolve(self.data_pointer);
            }
            GREATER => {
                self.data_pointer += 1;
                self.tape.resolve(self.data_pointer);
            }
            MINUS => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_sub(1);
            }
            PLUS => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_add(1);
            }
            DOT => {
                self.output.write_all(&[value])?;
                self.output.flush()?;
            }
            COMMA => self.read_input()?,
            LBRACKET => {
                if value == 0 {
                    self.skip_depth = 1;
                } else {
                    self.loops.push(self.pc)?;
                }
            }
            RBRACKET => {
                if value != 0 {
                    match self.loops.top() {
                        Some(start) => self.pc = start,
                        None => debug!(pc = at, "unmatched ']' ignored"),
                    }
                } else {
                    self.loops.pop();
                }
            }
            _ => {} // no-op
        }
        Ok(true)
    }

    fn read_input(&mut self) -> Result<(), EngineError> {
        match read_byte(&mut self.input)? {
            Some(byte) => {
                debug!(byte, "input character {:?} ({byte:#04x})", byte as char);
                *self.cell_mut() = byte;
            }
            None => match self.eof {
                EofBehavior::Unchanged => debug!("reached end of input, not changing cell value"),
                EofBehavior::Zero => *self.cell_mut() = 0,
                EofBehavior::MinusOne => *self.cell_mut() = u8::MAX,
            },
        }
        Ok(())
    }

    #[inline(always)]
    fn cell_mut(&mut self) -> &mut u8 {
        self.tape.resolve(self.data_pointer)
    }

    /// Value of the cell under the data pointer.
    pub fn cell(&self) -> u8 {
        self.tape.get(self.data_pointer)
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn data_pointer(&self) -> isize {
        self.data_pointer
    }

    pub fn skip_depth(&self) -> usize {
        self.skip_depth
    }

    pub fn loop_depth(&self) -> usize {
        self.loops.depth()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Read a single byte, or `None` at end of input.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Run `program` to completion with the default configuration.
pub fn run<R: Read, W: Write>(program: &[u8], input: R, output: W) -> Result<usize, EngineError> {
    Engine::new(program, input, output).run()
}
