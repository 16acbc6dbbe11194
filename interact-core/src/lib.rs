//! # Interact Core
//!
//! Typed argument encoding and transaction intent construction for
//! interacting with a single MultiversX smart contract.
//!
//! Nothing in this crate performs I/O beyond reading configuration files:
//! the codec and the intent builder are pure functions over their inputs.

pub mod error;
pub mod value;
pub mod codec;
pub mod metadata;
pub mod command;
pub mod config;
pub mod intent;
pub mod builder;
pub mod payload;

pub mod prelude {
    pub use crate::builder::{bind_argument, build_intent};
    pub use crate::codec::{encode, EncodedArgument};
    pub use crate::command::{ArgSpec, ArgType, CommandDef, CommandKind, CommandTable, Primitive};
    pub use crate::config::{Environment, ResolvedConfig};
    pub use crate::error::{AddressError, BuildError, ConfigError, EncodingError};
    pub use crate::intent::{TokenTransfer, TransactionIntent};
    pub use crate::metadata::{CodeMetadata, MetadataFlag};
    pub use crate::value::{Address, TypedValue, UintWidth};
}
