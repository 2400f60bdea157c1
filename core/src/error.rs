use std::fmt;

use thiserror::Error;

/// What was being accessed when an access went out of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// A memory cell outside of 0x000..0x1000
    Memory(usize),
    /// A CALL with all 16 stack slots in use
    StackPush,
    /// A RET with nothing on the stack
    StackPop,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Memory(address) => write!(f, "memory address {:#05X}", address),
            Access::StackPush => write!(f, "stack push (overflow)"),
            Access::StackPop => write!(f, "stack pop (underflow)"),
        }
    }
}

/// Everything that can bring the interpreter down.
///
/// None of these are recoverable: a well formed program never triggers them,
/// so the run ends and the error is handed back to whoever is driving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("out of bounds {access}")]
    OutOfBounds { access: Access },

    #[error("unsupported opcode {0:#06X}")]
    UnsupportedOpcode(u16),

    #[error("key {0:#X} is not on the keypad")]
    InvalidKey(u8),

    #[error("{len} bytes loaded at {offset:#05X} do not fit in memory")]
    ResourceTooLarge { offset: usize, len: usize },

    #[error("unable to read resource")]
    Io(#[from] std::io::Error),

    #[error("fault at pc {pc:#05X} while executing {opcode:#06X}")]
    Fault {
        pc: u16,
        opcode: u16,
        #[source]
        source: Box<Error>,
    },

    #[error("fault at pc {pc:#05X} while fetching the next opcode")]
    FetchFault {
        pc: u16,
        #[source]
        source: Box<Error>,
    },

    #[error("interpreter crashed at pc {pc:#05X} and can no longer run")]
    Crashed { pc: u16 },
}

impl Error {
    pub(crate) fn out_of_bounds(access: Access) -> Self {
        Error::OutOfBounds { access }
    }

    /// The underlying error, looking through any `Fault` context
    pub fn root(&self) -> &Error {
        match self {
            Error::Fault { source, .. } | Error::FetchFault { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
