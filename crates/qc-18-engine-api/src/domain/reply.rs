//! # Reply Builder
//!
//! Maps an internal verdict onto the external `ExecutePayload` reply.

use primitive_types::H256;
use serde::{Deserialize, Serialize};

use super::status::{ExecutionStatus, PayloadStatus};

/// Reply to an `ExecutePayload` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePayloadReply {
    /// One of `"VALID"`, `"INVALID"`, `"SYNCING"`.
    pub status: String,
    pub latest_valid_hash: H256,
}

impl ExecutePayloadReply {
    /// Parsed status. Replies built here always parse.
    pub fn payload_status(&self) -> Option<PayloadStatus> {
        self.status.parse().ok()
    }
}

/// Build the external reply for a status and head hash.
pub fn build_reply(status: PayloadStatus, head_hash: H256) -> ExecutePayloadReply {
    ExecutePayloadReply {
        status: status.as_str().to_string(),
        latest_valid_hash: head_hash,
    }
}

impl From<ExecutionStatus> for ExecutePayloadReply {
    fn from(verdict: ExecutionStatus) -> Self {
        build_reply(verdict.status, verdict.head_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reply_invalid_carries_last_valid_head() {
        let head = H256::from_low_u64_be(1);
        let reply = build_reply(PayloadStatus::Invalid, head);
        assert_eq!(reply.status, "INVALID");
        assert_eq!(reply.latest_valid_hash, head);
        assert_eq!(reply.payload_status(), Some(PayloadStatus::Invalid));
    }

    #[test]
    fn test_reply_from_verdict() {
        let verdict = ExecutionStatus::valid(H256::repeat_byte(0x8a));
        let reply = ExecutePayloadReply::from(verdict);
        assert_eq!(reply.status, "VALID");
        assert_eq!(reply.latest_valid_hash, verdict.head_hash);
    }

    #[test]
    fn test_reply_json_shape() {
        let reply = build_reply(PayloadStatus::Syncing, H256::zero());
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], "SYNCING");
        assert!(json.get("latestValidHash").is_some());
    }
}
