//! Virtual machine for executing Polish bytecode.

use polish_bytecode::{CELL_SIZE, DecodeError, Instruction, Opcode, Program, Width};

use super::arith::{self, BinaryOp};
use super::error::RuntimeError;
use super::format;
use super::heap::{DEFAULT_HEAP_LIMIT, Heap};
use super::scan;
use super::stack::{DEFAULT_STACK_SIZE, Stack};
use super::streams::{STDERR, STDIN, STDOUT, Streams};
use super::strings;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for program execution.
#[derive(Clone, Copy, Debug)]
pub struct ExecLimits {
    /// Maximum number of executed units (default: unlimited).
    pub(crate) exec_fuel: Option<u64>,
    /// Maximum live heap bytes (default: 16 MiB).
    pub(crate) heap_limit: usize,
}

impl Default for ExecLimits {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            heap_limit: DEFAULT_HEAP_LIMIT,
        }
    }
}

impl ExecLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Set the cap on live heap bytes.
    pub fn heap_limit(mut self, bytes: usize) -> Self {
        self.heap_limit = bytes;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u64> {
        self.exec_fuel
    }

    pub fn get_heap_limit(&self) -> usize {
        self.heap_limit
    }
}

/// What the dispatch loop does after a unit.
enum Flow {
    /// Advance past the unit.
    Next(usize),
    Jump(usize),
    Halt,
}

/// Virtual machine state for one program run.
pub struct VM<'p> {
    program: &'p Program,
    /// Program pointer, a byte offset into the program.
    pub(crate) ip: usize,
    pub(crate) stack: Stack,
    /// Value saved by `und`, pushed back after the next unit.
    pub(crate) pending_restore: Option<(u64, Width)>,
    pub(crate) heap: Heap,
    pub(crate) streams: Streams,

    // Fuel tracking
    pub(crate) exec_fuel: Option<u64>,
    pub(crate) limits: ExecLimits,
}

/// Builder for VM instances.
pub struct VMBuilder<'p> {
    program: &'p Program,
    stack_size: usize,
    limits: ExecLimits,
    streams: Option<Streams>,
}

impl<'p> VMBuilder<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            stack_size: DEFAULT_STACK_SIZE,
            limits: ExecLimits::default(),
            streams: None,
        }
    }

    /// Set the data stack capacity in bytes.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    pub fn limits(mut self, limits: ExecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Replace the process's standard streams.
    pub fn streams(mut self, streams: Streams) -> Self {
        self.streams = Some(streams);
        self
    }

    pub fn build(self) -> VM<'p> {
        VM {
            program: self.program,
            ip: 0,
            stack: Stack::new(self.stack_size),
            pending_restore: None,
            heap: Heap::with_limit(self.limits.get_heap_limit()),
            streams: self.streams.unwrap_or_default(),
            exec_fuel: self.limits.get_exec_fuel(),
            limits: self.limits,
        }
    }
}

impl<'p> VM<'p> {
    pub fn builder(program: &'p Program) -> VMBuilder<'p> {
        VMBuilder::new(program)
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn program_pointer(&self) -> usize {
        self.ip
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    /// Run until `end` or the first error.
    ///
    /// Uses `NoopTracer`, which gets optimized away at compile time.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        self.execute_with(&mut NoopTracer)
    }

    /// Run with a tracer for debugging.
    pub fn execute_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        let result = self.run(tracer);
        let flushed = self.streams.flush();
        result.and(flushed)
    }

    fn run<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        loop {
            self.consume_fuel()?;

            let offset = self.ip;
            let instr = self.fetch()?;
            tracer.trace_instruction(offset, &instr);

            // A restore armed before this unit fires after it.
            let armed = self.pending_restore.is_some();
            let flow = self.dispatch(instr)?;

            match flow {
                Flow::Next(size) => self.ip += size,
                Flow::Jump(target) => {
                    tracer.trace_jump(offset, target);
                    self.ip = target;
                }
                Flow::Halt => {
                    self.restore(tracer)?;
                    tracer.trace_stack(self.stack.as_bytes());
                    tracer.trace_halt(offset);
                    return Ok(());
                }
            }

            if armed {
                self.restore(tracer)?;
            }
            tracer.trace_stack(self.stack.as_bytes());
        }
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        match &mut self.exec_fuel {
            None => Ok(()),
            Some(0) => Err(RuntimeError::ExecFuelExhausted(
                self.limits.get_exec_fuel().unwrap_or(0),
            )),
            Some(fuel) => {
                *fuel -= 1;
                Ok(())
            }
        }
    }

    fn restore<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        if let Some((value, width)) = self.pending_restore.take() {
            tracer.trace_restore(value, width);
            self.stack.push_value(value, width)?;
        }
        Ok(())
    }

    fn fetch(&self) -> Result<Instruction, RuntimeError> {
        self.decode(self.ip)
    }

    fn decode(&self, offset: usize) -> Result<Instruction, RuntimeError> {
        match self.program.decode(offset) {
            Ok(Instruction::Unknown(byte)) => {
                Err(RuntimeError::InvalidInstruction { byte, offset })
            }
            Ok(instr) => Ok(instr),
            Err(DecodeError::OutOfBounds { offset, len }) => {
                Err(RuntimeError::ProgramLeftValidMemory { offset, len })
            }
            Err(DecodeError::UnexpectedContinuation { cell, offset }) => {
                Err(RuntimeError::UnexpectedContinuation { cell, offset })
            }
            Err(DecodeError::Number { source, offset }) => {
                Err(RuntimeError::MalformedNumber { source, offset })
            }
        }
    }

    fn dispatch(&mut self, instr: Instruction) -> Result<Flow, RuntimeError> {
        let op = match instr {
            Instruction::Literal(lit) => {
                self.stack.push_value(lit.value, lit.width)?;
                return Ok(Flow::Next(instr.size()));
            }
            Instruction::Op(op) => op,
            Instruction::Unknown(byte) => {
                return Err(RuntimeError::InvalidInstruction {
                    byte,
                    offset: self.ip,
                });
            }
        };

        let stack = &mut self.stack;
        match op {
            Opcode::Add(w) => arith::binary(stack, BinaryOp::Add, w)?,
            Opcode::Sub(w) => arith::binary(stack, BinaryOp::Sub, w)?,
            Opcode::Mul(w) => arith::binary(stack, BinaryOp::Mul, w)?,
            Opcode::Div(w) => arith::binary(stack, BinaryOp::Div, w)?,
            Opcode::Swp(w) => arith::swap(stack, w)?,
            Opcode::Drp(w) => arith::drop(stack, w)?,
            Opcode::Dup(w) => arith::dup(stack, w)?,
            Opcode::Inc(w) => arith::inc(stack, w)?,
            Opcode::Dec(w) => arith::dec(stack, w)?,
            Opcode::Cmp(w) => arith::cmp(stack, w)?,
            Opcode::Not => arith::not(stack)?,

            Opcode::Und(w) => {
                if self.pending_restore.is_some() {
                    return Err(RuntimeError::NestedUnder { offset: self.ip });
                }
                let value = stack.pop_value(w)?;
                self.pending_restore = Some((value, w));
            }
            Opcode::Jmp => return self.jump(),
            Opcode::Cond => return self.cond(),
            Opcode::Cpp => stack.push_value((self.ip + CELL_SIZE) as u64, Width::Long)?,
            Opcode::End => return Ok(Flow::Halt),

            Opcode::Opn => {
                let size = stack.pop_value(Width::Int)?;
                let handle = self.heap.alloc(size as usize)?;
                stack.push_value(handle, Width::Long)?;
            }
            Opcode::Cls => {
                let handle = stack.pop_value(Width::Long)?;
                self.heap.free(handle)?;
            }
            Opcode::Put(w) => {
                let value = stack.pop_value(w)?;
                let address = stack.pop_value(Width::Long)?;
                self.heap.write(address, &value.to_le_bytes()[..w.bytes()])?;
            }
            Opcode::Get(w) => {
                let address = stack.pop_value(Width::Long)?;
                let bytes = self.heap.read(address, w.bytes())?;
                stack.push(bytes)?;
            }

            Opcode::Opnf => {
                let mode = stack.pop_value(Width::Char)?;
                let path = stack.pop_string()?;
                let handle = self.streams.open(&path, mode as u8);
                stack.push_value(handle, Width::Long)?;
            }
            Opcode::Clsf => {
                let handle = stack.pop_value(Width::Long)?;
                self.streams.close(handle)?;
            }
            Opcode::In => stack.push_value(STDIN, Width::Long)?,
            Opcode::Out => stack.push_value(STDOUT, Width::Long)?,
            Opcode::Err => stack.push_value(STDERR, Width::Long)?,
            Opcode::Sputf => {
                let handle = stack.pop_value(Width::Long)?;
                let mut bytes = stack.pop_string()?;
                bytes.push(0);
                self.streams.write(handle, &bytes)?;
            }
            Opcode::Sgetf => {
                let handle = stack.pop_value(Width::Long)?;
                let limit = stack.free().saturating_sub(1);
                let line = self.streams.read_line(handle, limit)?;
                stack.push_string(&line)?;
            }

            Opcode::Sfmt => format::sfmt(stack)?,
            Opcode::Sscn => scan::sscn(stack)?,
            Opcode::Sdrp => strings::pop(stack)?,
            Opcode::Sdup => strings::dup(stack)?,
            Opcode::Sswp => strings::swap(stack)?,
            Opcode::Srev => strings::reverse(stack)?,
            Opcode::Slow => strings::lowercase(stack)?,
            Opcode::Scap => strings::uppercase(stack)?,
        }

        Ok(Flow::Next(CELL_SIZE))
    }

    /// `jmp`: pop an 8-byte address. Odd or beyond-the-end targets fail with
    /// the pointer left on the `jmp`.
    fn jump(&mut self) -> Result<Flow, RuntimeError> {
        let target = self.stack.pop_value(Width::Long)?;
        let len = self.program.len();
        if target > len as u64 || target % CELL_SIZE as u64 != 0 {
            return Err(RuntimeError::InvalidJump { target, len });
        }
        Ok(Flow::Jump(target as usize))
    }

    /// `?`: pop one byte; on zero, skip the whole next unit.
    fn cond(&mut self) -> Result<Flow, RuntimeError> {
        let flag = self.stack.pop_value(Width::Char)?;
        if flag != 0 {
            return Ok(Flow::Next(CELL_SIZE));
        }

        let len = self.program.len();
        let next = self.ip + CELL_SIZE;
        if next >= len {
            return Err(RuntimeError::InvalidJump {
                target: next as u64,
                len,
            });
        }
        let target = next + self.decode(next)?.size();
        if target >= len {
            return Err(RuntimeError::InvalidJump {
                target: target as u64,
                len,
            });
        }
        Ok(Flow::Jump(target))
    }
}
