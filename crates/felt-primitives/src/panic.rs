//! Panic channel
//!
//! The single failure signal shared by checked arithmetic, assertions and
//! caller-escalated index errors. A raised panic unwinds through every frame
//! of the core; only the outermost invocation boundary ([`catch`]) sees it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::Fault;
use crate::felt::{Felt, SHORT_STRING_MAX_LEN};

/// Diagnostic attached to a raised panic: an ordered sequence of felts,
/// normally short strings
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct PanicPayload(Vec<Felt>);

impl PanicPayload {
    /// Create from raw values
    pub fn new(values: Vec<Felt>) -> Self {
        PanicPayload(values)
    }

    /// Encode a message as consecutive short strings.
    ///
    /// A message of at most 31 bytes yields a single-element payload. Longer
    /// messages put the `len % 31` remainder in the first value, so every
    /// later value holds exactly 31 bytes.
    pub fn from_message(message: &str) -> Self {
        let bytes = message.as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() % SHORT_STRING_MAX_LEN);
        let head = (!head.is_empty()).then(|| Felt::from_short_bytes(head));
        PanicPayload(
            head.into_iter()
                .chain(tail.chunks(SHORT_STRING_MAX_LEN).map(Felt::from_short_bytes))
                .collect(),
        )
    }

    /// Payload values in order
    pub fn values(&self) -> &[Felt] {
        &self.0
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode all values back into text.
    ///
    /// Inverse of [`PanicPayload::from_message`]: the first value drops its
    /// zero padding and every later value contributes its low 31 bytes. A NUL
    /// byte leading the whole message is not recoverable.
    pub fn message(&self) -> String {
        let mut bytes = Vec::with_capacity(self.0.len() * SHORT_STRING_MAX_LEN);
        for (i, felt) in self.0.iter().enumerate() {
            let be = felt.to_bytes_be();
            if i == 0 {
                let start = be.iter().position(|&b| b != 0).unwrap_or(be.len());
                bytes.extend_from_slice(&be[start..]);
            } else {
                bytes.extend_from_slice(&be[be.len() - SHORT_STRING_MAX_LEN..]);
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Whether the encoding of `message` appears as a contiguous run of values
    pub fn contains_message(&self, message: &str) -> bool {
        let encoded = PanicPayload::from_message(message);
        if encoded.is_empty() {
            return true;
        }
        self.0.windows(encoded.len()).any(|run| run == encoded.values())
    }
}

impl From<Vec<Felt>> for PanicPayload {
    fn from(values: Vec<Felt>) -> Self {
        PanicPayload(values)
    }
}

impl From<Fault> for PanicPayload {
    fn from(fault: Fault) -> Self {
        PanicPayload::from_message(&fault.to_string())
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PanicPayload").field(&self.0).finish()
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Raise with the supplied payload
pub fn panic_with(payload: PanicPayload) -> ! {
    tracing::debug!(payload = %payload, len = payload.len(), "raising panic");
    panic::panic_any(payload)
}

/// Raise the payload of `fault`
pub fn raise(fault: Fault) -> ! {
    panic_with(fault.into())
}

/// No-op when `condition` holds, otherwise raises with `message`
pub fn assert(condition: bool, message: &str) {
    if !condition {
        raise(Fault::Assertion(message.to_string()));
    }
}

/// Result extension used by the operator impls
pub trait UnwrapOrRaise<T> {
    /// The success value, or a raised panic carrying the fault
    fn unwrap_or_raise(self) -> T;
}

impl<T> UnwrapOrRaise<T> for Result<T, Fault> {
    fn unwrap_or_raise(self) -> T {
        match self {
            Ok(value) => value,
            Err(fault) => raise(fault),
        }
    }
}

/// Run `f` at the outermost invocation boundary.
///
/// Returns the payload if `f` panicked. Plain string panics are re-encoded as
/// a payload; any other panic value is resumed.
pub fn catch<R>(f: impl FnOnce() -> R) -> Result<R, PanicPayload> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(into_payload)
}

fn into_payload(err: Box<dyn Any + Send>) -> PanicPayload {
    let err = match err.downcast::<PanicPayload>() {
        Ok(payload) => return *payload,
        Err(other) => other,
    };
    let err = match err.downcast::<String>() {
        Ok(message) => {
            tracing::trace!(%message, "converting string panic");
            return PanicPayload::from_message(&message);
        }
        Err(other) => other,
    };
    match err.downcast::<&'static str>() {
        Ok(message) => {
            tracing::trace!(%message, "converting str panic");
            PanicPayload::from_message(&message)
        }
        Err(other) => panic::resume_unwind(other),
    }
}
