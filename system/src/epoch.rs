//! Epoch-boundary orchestration.
//!
//! At a qualifying block — an epoch boundary, or the one-time activation
//! block of a fork that introduces new system contracts — the orchestrator
//! drives the full pipeline: read candidates from the stake registry,
//! select the top K, package the result as a system message, and apply it
//! to the block under construction. The flow is strictly linear; any
//! failure exits to [`EpochStage::Failed`] and poisons the block.

use crate::applier::apply_transition;
use crate::error::SystemError;
use crate::message::MessageBuilder;
use ember_election::{select_top_k, CandidateReader, ElectedSet};
use ember_state::{AbiCodec, AbiValue, BlockExecutionContext, ChainStateReader, StateExecutor};
use ember_types::{BlockHash, SystemContracts, ValidatorAddress};
use serde::{Deserialize, Serialize};
use tracing::info;

const METHOD_UPDATE_VALIDATOR_SET: &str = "updateEligibleValidatorSet";
const METHOD_INITIALIZE: &str = "initialize";

/// Where the orchestrator is in its linear per-block flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochStage {
    Idle,
    ReadingCandidates,
    Selecting,
    Building,
    Applying,
    /// The elected set was published into this block. Terminal.
    Done,
    /// Some stage errored; the enclosing block must be discarded. Terminal.
    Failed,
}

/// Drives validator-set elections and fork-contract initialization at
/// qualifying blocks.
///
/// One orchestrator serves one block: it is created alongside the block's
/// [`BlockExecutionContext`] and discarded with it.
pub struct EpochOrchestrator<'a, C, A> {
    chain: &'a C,
    codec: &'a A,
    contracts: &'a SystemContracts,
    stage: EpochStage,
}

impl<'a, C, A> EpochOrchestrator<'a, C, A>
where
    C: ChainStateReader,
    A: AbiCodec,
{
    pub fn new(chain: &'a C, codec: &'a A, contracts: &'a SystemContracts) -> Self {
        Self {
            chain,
            codec,
            contracts,
            stage: EpochStage::Idle,
        }
    }

    pub fn stage(&self) -> EpochStage {
        self.stage
    }

    /// Run the full epoch transition for the block being built on `parent`.
    ///
    /// When `at_fork_activation` is true the newly introduced system
    /// contracts are initialized first; this must happen at exactly one
    /// block, because re-initializing an already-initialized contract
    /// reverts — deliberately unswallowed, see
    /// [`initialize_fork_contracts`](Self::initialize_fork_contracts).
    pub fn run_epoch_transition<X: StateExecutor>(
        &mut self,
        parent: BlockHash,
        coinbase: ValidatorAddress,
        at_fork_activation: bool,
        executor: &mut X,
        ctx: &mut BlockExecutionContext,
    ) -> Result<(), SystemError> {
        if at_fork_activation {
            self.initialize_fork_contracts(coinbase, executor, ctx)?;
        }
        self.update_eligible_validators(parent, coinbase, executor, ctx)
    }

    /// Issue the one-time `initialize()` call to each fork-activated system
    /// contract, in configuration order.
    ///
    /// Initialization is once-per-contract-lifetime: a repeat attempt
    /// reverts on-chain and that revert propagates, so callers must invoke
    /// this only at the designated activation block.
    pub fn initialize_fork_contracts<X: StateExecutor>(
        &mut self,
        coinbase: ValidatorAddress,
        executor: &mut X,
        ctx: &mut BlockExecutionContext,
    ) -> Result<(), SystemError> {
        let builder = MessageBuilder::new(self.codec);
        for contract in &self.contracts.fork_activated {
            info!(contract = %contract, "initializing fork-activated system contract");
            let msg = self.guard(builder.build(coinbase, *contract, METHOD_INITIALIZE, &[]))?;
            self.guard(apply_transition(executor, &msg, ctx))?;
        }
        Ok(())
    }

    /// Recompute the elected validator set from the stake registry as of
    /// `parent` and publish it into the current block.
    pub fn update_eligible_validators<X: StateExecutor>(
        &mut self,
        parent: BlockHash,
        coinbase: ValidatorAddress,
        executor: &mut X,
        ctx: &mut BlockExecutionContext,
    ) -> Result<(), SystemError> {
        self.stage = EpochStage::ReadingCandidates;
        let reader = CandidateReader::new(self.chain, self.codec, self.contracts);
        let candidates = self.guard(reader.fetch_candidates(parent).map_err(Into::into))?;
        let max_elected = self.guard(
            reader
                .fetch_max_elected_validators(parent)
                .map_err(Into::into),
        )?;

        self.stage = EpochStage::Selecting;
        let elected = select_top_k(candidates, usize::try_from(max_elected).unwrap_or(usize::MAX));

        self.stage = EpochStage::Building;
        let args = elected_set_args(&elected);
        let builder = MessageBuilder::new(self.codec);
        let msg = self.guard(builder.build(
            coinbase,
            self.contracts.stake_registry,
            METHOD_UPDATE_VALIDATOR_SET,
            &args,
        ))?;

        self.stage = EpochStage::Applying;
        self.guard(apply_transition(executor, &msg, ctx))?;

        self.stage = EpochStage::Done;
        info!(elected = elected.len(), cap = max_elected, "published elected validator set");
        Ok(())
    }

    fn guard<T>(&mut self, result: Result<T, SystemError>) -> Result<T, SystemError> {
        if result.is_err() {
            self.stage = EpochStage::Failed;
        }
        result
    }
}

/// Encode an elected set as the registry's three index-aligned arrays.
fn elected_set_args(elected: &ElectedSet) -> [AbiValue; 3] {
    [
        AbiValue::List(
            elected
                .addresses()
                .into_iter()
                .map(AbiValue::Address)
                .collect(),
        ),
        AbiValue::List(
            elected
                .scaled_powers()
                .into_iter()
                .map(AbiValue::Uint64)
                .collect(),
        ),
        AbiValue::List(elected.vote_keys().into_iter().map(AbiValue::Bytes).collect()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_state::{ExecutionOutcome, StateError, SystemMessage};
    use ember_types::POWER_SCALE;
    use primitive_types::U256;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct ScriptedCodec {
        decodes: RefCell<VecDeque<Vec<AbiValue>>>,
        encodes: RefCell<Vec<(String, Vec<AbiValue>)>>,
    }

    impl ScriptedCodec {
        fn new(results: Vec<Vec<AbiValue>>) -> Self {
            Self {
                decodes: RefCell::new(results.into()),
                encodes: RefCell::new(Vec::new()),
            }
        }
    }

    impl AbiCodec for ScriptedCodec {
        fn encode(&self, method: &str, args: &[AbiValue]) -> Result<Vec<u8>, StateError> {
            self.encodes
                .borrow_mut()
                .push((method.to_string(), args.to_vec()));
            // Distinct payload per method so synthetic transactions differ.
            Ok(method.as_bytes().to_vec())
        }

        fn decode(&self, method: &str, _data: &[u8]) -> Result<Vec<AbiValue>, StateError> {
            self.decodes
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| StateError::decode(method, "no scripted result"))
        }
    }

    struct NullChain;

    impl ChainStateReader for NullChain {
        fn call(
            &self,
            _to: ValidatorAddress,
            _data: &[u8],
            _at: BlockHash,
        ) -> Result<Vec<u8>, StateError> {
            Ok(Vec::new())
        }
    }

    struct ScriptedExecutor {
        outcomes: VecDeque<Result<ExecutionOutcome, StateError>>,
        executed: Vec<SystemMessage>,
    }

    impl ScriptedExecutor {
        fn new(outcomes: Vec<Result<ExecutionOutcome, StateError>>) -> Self {
            Self {
                outcomes: outcomes.into(),
                executed: Vec::new(),
            }
        }
    }

    impl StateExecutor for ScriptedExecutor {
        fn execute(
            &mut self,
            msg: &SystemMessage,
            _gas_limit: u64,
        ) -> Result<ExecutionOutcome, StateError> {
            self.executed.push(msg.clone());
            self.outcomes
                .pop_front()
                .unwrap_or_else(|| Err(StateError::query(msg.to.to_string(), "script exhausted")))
        }
    }

    fn addr(byte: u8) -> ValidatorAddress {
        let mut bytes = [0u8; 20];
        bytes[19] = byte;
        ValidatorAddress::new(bytes)
    }

    /// One registry page holding three candidates (300/200/100 units of
    /// scaled power) plus the declared total, followed by the cap read.
    fn registry_reads(cap: u64) -> Vec<Vec<AbiValue>> {
        let power = |n: u64| AbiValue::Uint(U256::from(n) * U256::from(POWER_SCALE));
        vec![
            vec![
                AbiValue::List(vec![
                    AbiValue::Address(addr(1)),
                    AbiValue::Address(addr(2)),
                    AbiValue::Address(addr(3)),
                ]),
                AbiValue::List(vec![power(300), power(200), power(100)]),
                AbiValue::List(vec![
                    AbiValue::Bytes(vec![0xa1]),
                    AbiValue::Bytes(vec![0xa2]),
                    AbiValue::Bytes(vec![0xa3]),
                ]),
                AbiValue::Uint(U256::from(3u64)),
            ],
            vec![AbiValue::Uint(U256::from(cap))],
        ]
    }

    fn contracts() -> SystemContracts {
        SystemContracts::new(addr(0xee))
    }

    #[test]
    fn epoch_transition_publishes_top_k() {
        let chain = NullChain;
        let codec = ScriptedCodec::new(registry_reads(2));
        let contracts = contracts();
        let mut orchestrator = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![Ok(ExecutionOutcome::succeeded(40_000))]);
        let mut ctx = BlockExecutionContext::for_mining();

        orchestrator
            .run_epoch_transition(BlockHash::ZERO, addr(9), false, &mut executor, &mut ctx)
            .unwrap();

        assert_eq!(orchestrator.stage(), EpochStage::Done);
        assert_eq!(ctx.transactions.len(), 1);
        assert_eq!(ctx.used_gas, 40_000);
        assert_eq!(ctx.transactions[0].from, addr(9));
        assert_eq!(ctx.transactions[0].to, contracts.stake_registry);

        // The published set is the top 2 by power, with aligned arrays.
        let (method, args) = codec.encodes.borrow().last().unwrap().clone();
        assert_eq!(method, "updateEligibleValidatorSet");
        assert_eq!(
            args[0],
            AbiValue::List(vec![AbiValue::Address(addr(1)), AbiValue::Address(addr(2))])
        );
        assert_eq!(
            args[1],
            AbiValue::List(vec![AbiValue::Uint64(300), AbiValue::Uint64(200)])
        );
        assert_eq!(
            args[2],
            AbiValue::List(vec![AbiValue::Bytes(vec![0xa1]), AbiValue::Bytes(vec![0xa2])])
        );
    }

    #[test]
    fn fork_activation_initializes_before_election() {
        let chain = NullChain;
        let codec = ScriptedCodec::new(registry_reads(2));
        let contracts = contracts();
        let mut orchestrator = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![
            Ok(ExecutionOutcome::succeeded(5_000)),
            Ok(ExecutionOutcome::succeeded(40_000)),
        ]);
        let mut ctx = BlockExecutionContext::for_mining();

        orchestrator
            .run_epoch_transition(BlockHash::ZERO, addr(9), true, &mut executor, &mut ctx)
            .unwrap();

        assert_eq!(ctx.transactions.len(), 2);
        assert_eq!(executor.executed[0].data, b"initialize".to_vec());
        assert_eq!(executor.executed[1].data, b"updateEligibleValidatorSet".to_vec());
        assert_eq!(ctx.used_gas, 45_000);
    }

    #[test]
    fn initialization_revert_fails_the_block() {
        let chain = NullChain;
        let codec = ScriptedCodec::new(registry_reads(2));
        let contracts = contracts();
        let mut orchestrator = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![Ok(ExecutionOutcome::reverted(
            0,
            "already initialized",
        ))]);
        let mut ctx = BlockExecutionContext::for_mining();

        let err = orchestrator
            .run_epoch_transition(BlockHash::ZERO, addr(9), true, &mut executor, &mut ctx)
            .unwrap_err();

        assert!(matches!(err, SystemError::ExecutionReverted { .. }));
        assert_eq!(orchestrator.stage(), EpochStage::Failed);
        assert!(ctx.transactions.is_empty());
        // The election flow never ran.
        assert_eq!(executor.executed.len(), 1);
    }

    #[test]
    fn registry_inconsistency_fails_the_block() {
        let chain = NullChain;
        // Page claims 5 candidates but delivers 3 and no more.
        let mut reads = registry_reads(2);
        reads[0][3] = AbiValue::Uint(U256::from(5u64));
        reads[1] = vec![
            AbiValue::List(vec![]),
            AbiValue::List(vec![]),
            AbiValue::List(vec![]),
            AbiValue::Uint(U256::from(5u64)),
        ];
        let codec = ScriptedCodec::new(reads);
        let contracts = contracts();
        let mut orchestrator = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![]);
        let mut ctx = BlockExecutionContext::for_mining();

        let err = orchestrator
            .update_eligible_validators(BlockHash::ZERO, addr(9), &mut executor, &mut ctx)
            .unwrap_err();

        assert!(matches!(
            err,
            SystemError::Election(ember_election::ElectionError::DataInconsistency { .. })
        ));
        assert_eq!(orchestrator.stage(), EpochStage::Failed);
        assert!(executor.executed.is_empty());
    }

    #[test]
    fn verification_path_matches_proposer_transactions() {
        let chain = NullChain;
        let contracts = contracts();

        // Proposer builds the block.
        let codec = ScriptedCodec::new(registry_reads(2));
        let mut proposer = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![Ok(ExecutionOutcome::succeeded(40_000))]);
        let mut mined = BlockExecutionContext::for_mining();
        proposer
            .run_epoch_transition(BlockHash::ZERO, addr(9), false, &mut executor, &mut mined)
            .unwrap();

        // Verifier replays it against the received transactions.
        let codec = ScriptedCodec::new(registry_reads(2));
        let mut verifier = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![Ok(ExecutionOutcome::succeeded(40_000))]);
        let mut ctx = BlockExecutionContext::for_verification(mined.transactions.clone());

        verifier
            .run_epoch_transition(BlockHash::ZERO, addr(9), false, &mut executor, &mut ctx)
            .unwrap();
        assert_eq!(verifier.stage(), EpochStage::Done);
        assert_eq!(ctx.transactions, mined.transactions);
    }

    #[test]
    fn empty_candidate_set_still_publishes() {
        let chain = NullChain;
        let codec = ScriptedCodec::new(vec![
            vec![
                AbiValue::List(vec![]),
                AbiValue::List(vec![]),
                AbiValue::List(vec![]),
                AbiValue::Uint(U256::zero()),
            ],
            vec![AbiValue::Uint(U256::from(21u64))],
        ]);
        let contracts = contracts();
        let mut orchestrator = EpochOrchestrator::new(&chain, &codec, &contracts);
        let mut executor = ScriptedExecutor::new(vec![Ok(ExecutionOutcome::succeeded(10_000))]);
        let mut ctx = BlockExecutionContext::for_mining();

        orchestrator
            .update_eligible_validators(BlockHash::ZERO, addr(9), &mut executor, &mut ctx)
            .unwrap();

        let (_, args) = codec.encodes.borrow().last().unwrap().clone();
        assert_eq!(args[0], AbiValue::List(vec![]));
        assert_eq!(orchestrator.stage(), EpochStage::Done);
    }
}
