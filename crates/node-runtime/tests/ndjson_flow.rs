//! # NDJSON Flow Tests
//!
//! Feed request lines through `serve` exactly as the binary does with
//! stdin/stdout, and check the response lines.

use std::collections::HashMap;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;

use node_runtime::{serve, EngineContainer, NodeConfig, ResponseLine};
use qc_18_engine_api::{ExecutionPayloadV1, HeadStore, LogsBloom, H160, H256, U256};

fn payload_line(parent: H256, number: u64) -> String {
    let payload = ExecutionPayloadV1 {
        parent_hash: Some(parent),
        block_hash: Some(H256::from_low_u64_be(0x1000 + number)),
        receipts_root: Some(H256::from_low_u64_be(3)),
        state_root: Some(H256::from_low_u64_be(4)),
        random: Some(H256::from_low_u64_be(0xb3)),
        logs_bloom: Some(LogsBloom::empty()),
        extra_data: Some(vec![0u8; 32]),
        base_fee_per_gas: Some(U256::from(0xb3u64)),
        block_number: number,
        gas_limit: 52,
        gas_used: 4,
        timestamp: 4,
        coinbase: Some(H160::from_low_u64_be(1)),
        transactions: vec![vec![0x01, 0x02]],
    };
    serde_json::to_string(&payload).unwrap()
}

async fn run(container: Arc<EngineContainer>, lines: &[String]) -> HashMap<u64, ResponseLine> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    let served = serve(container, input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<ResponseLine> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len() as u64, served);
    responses.into_iter().map(|r| (r.request, r)).collect()
}

#[tokio::test]
async fn test_every_line_gets_one_response() {
    let container = Arc::new(EngineContainer::new(NodeConfig::default()));
    let genesis = container.config.genesis.hash;

    let lines = vec![
        payload_line(genesis, 1),
        String::new(),
        "not json".to_string(),
        r#"{"blockNumber": 9}"#.to_string(),
    ];
    let responses = run(Arc::clone(&container), &lines).await;

    assert_eq!(responses.len(), 3);
    assert!(responses[&2].error.as_deref().unwrap().starts_with("malformed request"));
    assert_eq!(
        responses[&3].error.as_deref(),
        Some("invalid execution payload")
    );
    let first = responses[&1].reply.as_ref().unwrap();
    assert!(["VALID", "SYNCING"].contains(&first.status.as_str()));
}

#[tokio::test]
async fn test_sequential_sessions_extend_head() {
    let container = Arc::new(EngineContainer::new(NodeConfig::default()));
    let genesis = container.config.genesis.hash;

    let responses = run(Arc::clone(&container), &[payload_line(genesis, 1)]).await;
    let reply = responses[&1].reply.as_ref().unwrap();
    assert_eq!(reply.status, "VALID");
    assert_eq!(reply.latest_valid_hash, H256::from_low_u64_be(0x1001));

    let responses = run(
        Arc::clone(&container),
        &[payload_line(H256::from_low_u64_be(0x1001), 2)],
    )
    .await;
    assert_eq!(responses[&1].reply.as_ref().unwrap().status, "VALID");
    assert_eq!(container.head_store.read_head().unwrap().number, 2);
}

#[tokio::test]
async fn test_non_pos_chain_reports_error_line() {
    let config = NodeConfig {
        chain: qc_18_engine_api::ChainConfig::default(),
        ..NodeConfig::default()
    };
    let container = Arc::new(EngineContainer::new(config));
    let genesis = container.config.genesis.hash;

    let responses = run(container, &[payload_line(genesis, 1)]).await;
    assert_eq!(
        responses[&1].error.as_deref(),
        Some("not a proof-of-stake chain")
    );
}

#[tokio::test]
async fn test_shutdown_after_input_closes() {
    let container = Arc::new(EngineContainer::new(NodeConfig::default()));
    run(Arc::clone(&container), &[]).await;

    let container = Arc::try_unwrap(container).ok().unwrap();
    container.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_container_released_when_serve_returns() {
    let container = Arc::new(EngineContainer::new(NodeConfig::default()));
    let genesis = container.config.genesis.hash;

    let lines: Vec<String> = (1..=8).map(|n| payload_line(genesis, n)).collect();
    let responses = run(Arc::clone(&container), &lines).await;
    assert_eq!(responses.len(), 8);

    assert_eq!(Arc::strong_count(&container), 1);
    let container = Arc::try_unwrap(container).ok().unwrap();
    container.shutdown().await.unwrap();
}

/// Output sink that rejects every write.
struct ClosedOutput;

impl AsyncWrite for ClosedOutput {
    fn poll_write(
        self: Pin<&mut Self>,
        _: &mut Context<'_>,
        _: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn test_closed_output_fails_without_losing_container() {
    let container = Arc::new(EngineContainer::new(NodeConfig::default()));
    let genesis = container.config.genesis.hash;

    let input = (1..=4)
        .map(|n| payload_line(genesis, n))
        .collect::<Vec<_>>()
        .join("\n");
    let served = serve(Arc::clone(&container), input.as_bytes(), ClosedOutput).await;
    assert!(served.is_err());

    let container = Arc::try_unwrap(container).ok().unwrap();
    container.shutdown().await.unwrap();
}
