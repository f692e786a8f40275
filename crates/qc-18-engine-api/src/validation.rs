//! Payload validation
//!
//! Stateless gate run before any chain-state or concurrency work.

use crate::domain::{
    ChainConfig, EngineApiError, EngineApiResult, ExecutionPayload, ExecutionPayloadV1,
};

/// Validates incoming payloads against the chain configuration.
#[derive(Clone, Debug)]
pub struct PayloadValidator {
    chain: ChainConfig,
}

impl PayloadValidator {
    pub fn new(chain: ChainConfig) -> Self {
        Self { chain }
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain
    }

    /// Fails with `NotProofOfStake` when no terminal total difficulty is set.
    pub fn check_proof_of_stake(&self) -> EngineApiResult<()> {
        if !self.chain.is_proof_of_stake() {
            return Err(EngineApiError::NotProofOfStake);
        }
        Ok(())
    }

    /// Run both checks and return the typed payload.
    ///
    /// Shape is checked first: a payload with missing fields reports
    /// `InvalidPayload` under any chain configuration, and a well-formed
    /// payload on a non-PoS chain reports `NotProofOfStake`.
    pub fn validate(&self, request: ExecutionPayloadV1) -> EngineApiResult<ExecutionPayload> {
        let payload = ExecutionPayload::try_from(request)?;
        self.check_proof_of_stake()?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogsBloom, H160, H256, U256};
    use proptest::prelude::*;

    fn pos_validator() -> PayloadValidator {
        PayloadValidator::new(ChainConfig::proof_of_stake(1, U256::one()))
    }

    fn well_formed() -> ExecutionPayloadV1 {
        ExecutionPayloadV1 {
            parent_hash: Some(H256::from_low_u64_be(2)),
            block_hash: Some(H256::from_low_u64_be(3)),
            receipts_root: Some(H256::from_low_u64_be(4)),
            state_root: Some(H256::from_low_u64_be(4)),
            random: Some(H256::from_low_u64_be(0xb3)),
            logs_bloom: Some(LogsBloom::empty()),
            extra_data: Some(vec![0u8; 32]),
            base_fee_per_gas: Some(U256::from(0xb3u64)),
            block_number: 51,
            gas_limit: 52,
            gas_used: 4,
            timestamp: 4,
            coinbase: Some(H160::from_low_u64_be(1)),
            transactions: Vec::new(),
        }
    }

    fn strip_field(mut raw: ExecutionPayloadV1, field: u8) -> ExecutionPayloadV1 {
        match field {
            0 => raw.parent_hash = None,
            1 => raw.block_hash = None,
            2 => raw.receipts_root = None,
            3 => raw.state_root = None,
            4 => raw.random = None,
            5 => raw.logs_bloom = None,
            6 => raw.extra_data = None,
            7 => raw.base_fee_per_gas = None,
            _ => raw.coinbase = None,
        }
        raw
    }

    #[test]
    fn test_well_formed_payload_passes() {
        let payload = pos_validator().validate(well_formed()).unwrap();
        assert_eq!(payload.block_number, 51);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        // Only the non-digest fields are set.
        let raw = ExecutionPayloadV1 {
            base_fee_per_gas: Some(U256::from(0xb3u64)),
            block_number: 51,
            gas_limit: 52,
            gas_used: 4,
            timestamp: 4,
            coinbase: Some(H160::from_low_u64_be(1)),
            ..Default::default()
        };
        let err = pos_validator().validate(raw).unwrap_err();
        assert_eq!(err.to_string(), "invalid execution payload");
    }

    #[test]
    fn test_no_ttd_rejects_well_formed_payload() {
        let validator = PayloadValidator::new(ChainConfig::default());
        let err = validator.validate(well_formed()).unwrap_err();
        assert_eq!(err.to_string(), "not a proof-of-stake chain");
    }

    #[test]
    fn test_empty_transactions_allowed() {
        let mut raw = well_formed();
        raw.transactions.clear();
        assert!(pos_validator().validate(raw).is_ok());
    }

    proptest! {
        #[test]
        fn prop_any_missing_required_field_is_invalid(field in 0u8..9) {
            let raw = strip_field(well_formed(), field);
            let result = pos_validator().validate(raw);
            prop_assert!(matches!(result, Err(EngineApiError::InvalidPayload)));
        }

        #[test]
        fn prop_missing_field_reported_on_any_chain(field in 0u8..9, ttd in 0u64..3) {
            let chain = ChainConfig::proof_of_stake(1, U256::from(ttd));
            let raw = strip_field(well_formed(), field);
            let result = PayloadValidator::new(chain).validate(raw);
            prop_assert!(matches!(result, Err(EngineApiError::InvalidPayload)));
        }
    }
}
