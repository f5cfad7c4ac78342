//! Tracing infrastructure for debugging VM execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, so the calls and their arguments compile away. The VM
//! carries no tracing state of its own.

use polish_bytecode::{Colors, Instruction, Width, bytecode::format_instruction};

/// Tracer trait for VM execution instrumentation.
///
/// - `trace_instruction` - before executing the unit at `offset`
/// - `trace_stack` - after the unit (and any pending restore) has run
/// - `trace_restore` - when a value saved by `und` is pushed back
/// - `trace_jump` - when `jmp` or `?` moves the program pointer
/// - `trace_halt` - on `end`
pub trait Tracer {
    fn trace_instruction(&mut self, offset: usize, instr: &Instruction);

    fn trace_stack(&mut self, stack: &[u8]);

    fn trace_restore(&mut self, value: u64, width: Width);

    fn trace_jump(&mut self, from: usize, to: usize);

    fn trace_halt(&mut self, offset: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _offset: usize, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_stack(&mut self, _stack: &[u8]) {}

    #[inline(always)]
    fn trace_restore(&mut self, _value: u64, _width: Width) {}

    #[inline(always)]
    fn trace_jump(&mut self, _from: usize, _to: usize) {}

    #[inline(always)]
    fn trace_halt(&mut self, _offset: usize) {}
}

/// Tracer that collects execution trace lines.
pub struct PrintTracer {
    lines: Vec<String>,
    /// Show the stack after every step, not only on `end`.
    show_stack: bool,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(show_stack: bool, colors: Colors) -> Self {
        Self {
            lines: Vec::new(),
            show_stack,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn stack_line(&self, stack: &[u8]) -> String {
        let c = &self.colors;
        let bytes: Vec<String> = stack.iter().map(|b| format!("{b:02X}")).collect();
        format!("{:8}{}[{}]{}", "", c.dim, bytes.join(" "), c.reset)
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, offset: usize, instr: &Instruction) {
        let c = &self.colors;
        let color = match instr {
            Instruction::Literal(_) => c.green,
            _ => c.blue,
        };
        self.lines.push(format!(
            "  {}{offset:04}{}  {color}{}{}",
            c.dim,
            c.reset,
            format_instruction(instr),
            c.reset
        ));
    }

    fn trace_stack(&mut self, stack: &[u8]) {
        if self.show_stack {
            let line = self.stack_line(stack);
            self.lines.push(line);
        }
    }

    fn trace_restore(&mut self, value: u64, width: Width) {
        self.lines.push(format!(
            "{:8}restore {}{value}{} ({} bytes)",
            "",
            self.colors.green,
            self.colors.reset,
            width.bytes()
        ));
    }

    fn trace_jump(&mut self, from: usize, to: usize) {
        self.lines.push(format!("{:8}jump {from} -> {to}", ""));
    }

    fn trace_halt(&mut self, offset: usize) {
        self.lines.push(format!("{:8}halt at {offset}", ""));
    }
}
