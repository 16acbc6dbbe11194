//! Rendering an intent as the transaction's data field.
//!
//! The data field is `@`-separated hex: the call's own arguments use their
//! codec encodings as-is, while the numbers the protocol adds around them
//! (payment amounts, nonces, counts) use the minimal form where zero is the
//! empty string.

use num_bigint::BigUint;

use crate::codec::EncodedArgument;
use crate::intent::{CallIntent, TransactionIntent};
use crate::value::Address;

/// VM type tag for WASM contracts, sent with every deployment.
pub const WASM_VM_TYPE: [u8; 2] = [0x05, 0x00];

pub const ESDT_TRANSFER: &str = "ESDTTransfer";
pub const MULTI_ESDT_NFT_TRANSFER: &str = "MultiESDTNFTTransfer";
pub const UPGRADE_CONTRACT: &str = "upgradeContract";

/// Who the transaction is actually sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// The all-zero deployment address.
    Deploy,
    Contract(Address),
    /// The sender's own account; the real destination is inside the data
    /// field (multi-token and NFT payments).
    Sender,
}

/// Receiver and data field for one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionData {
    pub receiver: Receiver,
    pub data: String,
}

impl TransactionData {
    /// Receiver address once the sender is known.
    pub fn receiver_address(&self, sender: &Address) -> Address {
        match self.receiver {
            Receiver::Deploy => Address::zero(),
            Receiver::Contract(address) => address,
            Receiver::Sender => *sender,
        }
    }
}

/// Render the data field for `intent`. For queries this is the
/// `function@args` form used by VM queries.
pub fn render(intent: &TransactionIntent) -> TransactionData {
    match intent {
        TransactionIntent::Deploy(d) => TransactionData {
            receiver: Receiver::Deploy,
            data: join(
                [hex::encode(d.code()), hex::encode(WASM_VM_TYPE), d.metadata().to_hex()],
                d.constructor_args(),
            ),
        },
        TransactionIntent::Upgrade(u) => TransactionData {
            receiver: Receiver::Contract(*u.target()),
            data: join(
                [UPGRADE_CONTRACT.to_string(), hex::encode(u.code()), u.metadata().to_hex()],
                u.args(),
            ),
        },
        TransactionIntent::Call(c) => render_call(c),
        TransactionIntent::Query(q) => TransactionData {
            receiver: Receiver::Contract(*q.target()),
            data: join([q.function().to_string()], q.args()),
        },
    }
}

fn render_call(call: &CallIntent) -> TransactionData {
    match call.token_transfers() {
        [] => TransactionData {
            receiver: Receiver::Contract(*call.target()),
            data: join([call.function().to_string()], call.args()),
        },
        [single] if single.nonce == 0 => TransactionData {
            receiver: Receiver::Contract(*call.target()),
            data: join(
                [
                    ESDT_TRANSFER.to_string(),
                    hex::encode(&single.token_identifier),
                    big_hex(&single.amount),
                    hex::encode(call.function()),
                ],
                call.args(),
            ),
        },
        transfers => {
            let mut head = vec![
                MULTI_ESDT_NFT_TRANSFER.to_string(),
                call.target().to_hex(),
                u64_hex(transfers.len() as u64),
            ];
            for t in transfers {
                head.push(hex::encode(&t.token_identifier));
                head.push(u64_hex(t.nonce));
                head.push(big_hex(&t.amount));
            }
            head.push(hex::encode(call.function()));
            TransactionData {
                receiver: Receiver::Sender,
                data: join(head, call.args()),
            }
        }
    }
}

fn join(head: impl IntoIterator<Item = String>, args: &[EncodedArgument]) -> String {
    head.into_iter()
        .chain(args.iter().map(EncodedArgument::to_hex))
        .collect::<Vec<_>>()
        .join("@")
}

fn u64_hex(v: u64) -> String {
    big_hex(&BigUint::from(v))
}

fn big_hex(v: &BigUint) -> String {
    if *v == BigUint::default() {
        String::new()
    } else {
        hex::encode(v.to_bytes_be())
    }
}
