//! Instruction opcodes.
//!
//! Named instructions occupy negative codes (stored as the low byte of an
//! instruction cell, two's complement). Width-polymorphic families come first,
//! four consecutive codes per family in c/r/·/l order: `cund` = -1, `rund` = -2,
//! `und` = -3, `lund` = -4, `cswp` = -5, and so on up to `ldiv` = -52. The two
//! ASCII operators `?` and `!` use their character code.

use super::width::Width;

/// Width-polymorphic instruction families, in code order.
const FAMILY_NAMES: [&str; 13] = [
    "und", "swp", "drp", "dup", "put", "get", "cmp", "inc", "dec", "add", "sub", "mul", "div",
];

/// Decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Und(Width),
    Swp(Width),
    Drp(Width),
    Dup(Width),
    Put(Width),
    Get(Width),
    Cmp(Width),
    Inc(Width),
    Dec(Width),
    Add(Width),
    Sub(Width),
    Mul(Width),
    Div(Width),
    Sswp,
    Srev,
    Sdrp,
    Clsf,
    Cls,
    Sdup,
    Opnf,
    Opn,
    Sputf,
    Out,
    Sfmt,
    Sgetf,
    In,
    Sscn,
    Scap,
    Err,
    Slow,
    Jmp,
    Cpp,
    End,
    /// `?`: run the next instruction only if the popped byte is non-zero.
    Cond,
    /// `!`: logical negation of one byte.
    Not,
}

/// Non-family instructions with their signed codes and mnemonics.
const SINGLES: [(Opcode, i8, &str); 22] = [
    (Opcode::Sswp, -53, "sswp"),
    (Opcode::Srev, -54, "srev"),
    (Opcode::Sdrp, -57, "sdrp"),
    (Opcode::Clsf, -58, "clsf"),
    (Opcode::Cls, -59, "cls"),
    (Opcode::Sdup, -61, "sdup"),
    (Opcode::Opnf, -62, "opnf"),
    (Opcode::Opn, -63, "opn"),
    (Opcode::Sputf, -66, "sputf"),
    (Opcode::Out, -67, "out"),
    (Opcode::Sfmt, -68, "sfmt"),
    (Opcode::Sgetf, -70, "sgetf"),
    (Opcode::In, -71, "in"),
    (Opcode::Sscn, -72, "sscn"),
    (Opcode::Scap, -74, "scap"),
    (Opcode::Err, -75, "err"),
    (Opcode::Slow, -76, "slow"),
    (Opcode::Jmp, -77, "jmp"),
    (Opcode::Cpp, -78, "cpp"),
    (Opcode::End, -79, "end"),
    (Opcode::Cond, b'?' as i8, "?"),
    (Opcode::Not, b'!' as i8, "!"),
];

impl Opcode {
    fn family(family: usize, width: Width) -> Self {
        match family {
            0 => Self::Und(width),
            1 => Self::Swp(width),
            2 => Self::Drp(width),
            3 => Self::Dup(width),
            4 => Self::Put(width),
            5 => Self::Get(width),
            6 => Self::Cmp(width),
            7 => Self::Inc(width),
            8 => Self::Dec(width),
            9 => Self::Add(width),
            10 => Self::Sub(width),
            11 => Self::Mul(width),
            12 => Self::Div(width),
            _ => unreachable!("family index out of range: {family}"),
        }
    }

    /// Family index and width for width-polymorphic instructions.
    fn family_of(self) -> Option<(usize, Width)> {
        Some(match self {
            Self::Und(w) => (0, w),
            Self::Swp(w) => (1, w),
            Self::Drp(w) => (2, w),
            Self::Dup(w) => (3, w),
            Self::Put(w) => (4, w),
            Self::Get(w) => (5, w),
            Self::Cmp(w) => (6, w),
            Self::Inc(w) => (7, w),
            Self::Dec(w) => (8, w),
            Self::Add(w) => (9, w),
            Self::Sub(w) => (10, w),
            Self::Mul(w) => (11, w),
            Self::Div(w) => (12, w),
            _ => return None,
        })
    }

    /// Operand width, for width-polymorphic instructions.
    pub fn width(self) -> Option<Width> {
        self.family_of().map(|(_, w)| w)
    }

    /// Signed instruction code.
    pub fn code(self) -> i8 {
        if let Some((family, width)) = self.family_of() {
            return -((family * 4 + width.index() + 1) as i8);
        }
        SINGLES
            .iter()
            .find(|(op, _, _)| *op == self)
            .map(|&(_, code, _)| code)
            .unwrap_or_else(|| unreachable!("every single opcode has a code"))
    }

    /// Low byte of the instruction cell.
    #[inline]
    pub fn to_byte(self) -> u8 {
        self.code() as u8
    }

    /// Decode the low byte of an instruction cell.
    pub fn from_byte(byte: u8) -> Option<Self> {
        let code = byte as i8;
        if (-52..=-1).contains(&code) {
            let n = (-(code as i16) - 1) as usize;
            return Some(Self::family(n / 4, Width::ALL[n % 4]));
        }
        SINGLES
            .iter()
            .find(|&&(_, c, _)| c == code)
            .map(|&(op, _, _)| op)
    }

    pub fn mnemonic(self) -> String {
        if let Some((family, width)) = self.family_of() {
            return format!("{}{}", width.prefix(), FAMILY_NAMES[family]);
        }
        SINGLES
            .iter()
            .find(|(op, _, _)| *op == self)
            .map(|&(_, _, name)| name.to_string())
            .unwrap_or_else(|| unreachable!("every single opcode has a mnemonic"))
    }

    /// Look up an instruction by its assembler mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::all().find(|op| op.mnemonic() == name)
    }

    /// All instructions: families (c/r/·/l each), then the singles.
    pub fn all() -> impl Iterator<Item = Opcode> {
        (0..FAMILY_NAMES.len())
            .flat_map(|f| Width::ALL.into_iter().map(move |w| Self::family(f, w)))
            .chain(SINGLES.iter().map(|&(op, _, _)| op))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mnemonic())
    }
}
