use std::fmt;

use thiserror::Error;
use tonlib_core::cell::TonCellError;

use crate::content::ContentError;

#[derive(Error, Debug)]
pub enum JettonMessageError {
    #[error("TonCellError ({0})")]
    TonCellError(#[from] TonCellError),

    #[error("Invalid message ({0})")]
    InvalidMessage(InvalidMessage),

    #[error("Invalid message content ({0})")]
    ContentError(#[from] ContentError),
}

impl JettonMessageError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        JettonMessageError::InvalidMessage(InvalidMessage::new(message))
    }

    pub(crate) fn invalid_body(opcode: u32, query_id: u64, message: impl Into<String>) -> Self {
        let mut invalid = InvalidMessage::new(message);
        invalid.opcode = Some(opcode);
        invalid.query_id = Some(query_id);
        JettonMessageError::InvalidMessage(invalid)
    }
}

/// A cell that does not hold the expected message. `opcode` and `query_id`
/// are set once the header has been read.
#[derive(Clone, PartialEq, Eq)]
pub struct InvalidMessage {
    pub opcode: Option<u32>,
    pub query_id: Option<u64>,
    pub message: String,
}

impl InvalidMessage {
    pub fn new(message: impl Into<String>) -> Self {
        InvalidMessage {
            opcode: None,
            query_id: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for InvalidMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match (self.opcode, self.query_id) {
            (Some(opcode), Some(query_id)) => {
                write!(f, " [op: {:#010x}, query_id: {}]", opcode, query_id)
            }
            (Some(opcode), None) => write!(f, " [op: {:#010x}]", opcode),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for InvalidMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidMessage")
            .field("opcode", &self.opcode.map(|op| format!("{:#x}", op)))
            .field("query_id", &self.query_id)
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let plain = JettonMessageError::invalid("Message carries no StateInit");
        assert_eq!(
            plain.to_string(),
            "Invalid message (Message carries no StateInit)"
        );

        let with_header = JettonMessageError::invalid_body(21, 7, "Unknown mint opcode");
        assert_eq!(
            with_header.to_string(),
            "Invalid message (Unknown mint opcode [op: 0x00000015, query_id: 7])"
        );
    }
}
