use {
    crate::transfer,
    serde::{Deserialize, Serialize},
    std::{collections::BTreeSet, str::FromStr},
    wasm_hooks::{ContractVm, HookCtx, HookError, HookResult},
    wasm_hooks_storage::Map,
    wasm_hooks_types::{
        Addr, Coins, IbcLifecycleComplete, Json, MsgExecuteContract, Shared, StdResult, Storage,
        SudoMsg,
    },
};

pub const EXECUTE_GAS_COST: u64 = 10_000;
pub const SUDO_GAS_COST: u64 = 10_000;

/// State of every counter contract. A contract exists if it has an entry.
pub const COUNTERS: Map<Addr, u64> = Map::new("counter");

/// Execute messages of the counter contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CounterExecuteMsg {
    /// Add one to the counter.
    Increase {},
    /// Add one to the counter, then error.
    Fail { reason: String },
    /// Consume the given amount of gas, then add one to the counter.
    Burn { gas: u64 },
}

/// A call made into the mock VM, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmCall {
    Execute {
        sender: String,
        contract: String,
        msg: Json,
        funds: Coins,
    },
    Sudo {
        contract: Addr,
        msg: Json,
    },
}

#[derive(Default, Debug)]
struct VmState {
    calls: Vec<VmCall>,
    failing_sudo: BTreeSet<Addr>,
}

/// A VM where every contract is a counter.
///
/// On a lifecycle callback, a counter adds the packet's sequence for a
/// successful ack or a timeout, and one for a failed ack.
#[derive(Default, Clone)]
pub struct MockVm {
    state: Shared<VmState>,
}

impl MockVm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instantiate_counter(storage: &mut dyn Storage, contract: Addr) -> StdResult<()> {
        COUNTERS.save(storage, contract, &0)
    }

    pub fn query_counter(storage: &dyn Storage, contract: Addr) -> StdResult<Option<u64>> {
        COUNTERS.may_load(storage, contract)
    }

    /// Make the contract's sudo entry point error after updating its counter.
    pub fn fail_sudo(&self, contract: Addr) {
        self.state.write_access().failing_sudo.insert(contract);
    }

    pub fn calls(&self) -> Vec<VmCall> {
        self.state.read_access().calls.clone()
    }

    fn load_counter(storage: &dyn Storage, contract: Addr) -> HookResult<u64> {
        COUNTERS
            .may_load(storage, contract)?
            .ok_or_else(|| HookError::contract(contract, "contract not found"))
    }
}

impl ContractVm for MockVm {
    fn execute(&self, ctx: &mut HookCtx, msg: &MsgExecuteContract) -> HookResult<()> {
        self.state.write_access().calls.push(VmCall::Execute {
            sender: msg.sender.clone(),
            contract: msg.contract.clone(),
            msg: msg.msg.clone(),
            funds: msg.funds.clone(),
        });

        let sender = Addr::from_str(&msg.sender)?;
        let contract = Addr::from_str(&msg.contract)?;

        ctx.gas_tracker.deduct(EXECUTE_GAS_COST, "execute")?;

        let count = Self::load_counter(ctx.storage.as_ref(), contract)?;

        transfer(ctx.storage.as_mut(), sender, contract, &msg.funds)?;

        let execute_msg = serde_json::from_value::<CounterExecuteMsg>(msg.msg.clone())
            .map_err(|err| HookError::contract(contract, err))?;

        COUNTERS.save(ctx.storage.as_mut(), contract, &(count + 1))?;

        match execute_msg {
            CounterExecuteMsg::Increase {} => Ok(()),
            CounterExecuteMsg::Fail { reason } => Err(HookError::contract(contract, reason)),
            CounterExecuteMsg::Burn { gas } => {
                ctx.gas_tracker.deduct(gas, "burn")?;
                Ok(())
            },
        }
    }

    fn sudo(&self, ctx: &mut HookCtx, contract: Addr, msg: &Json) -> HookResult<()> {
        let fail = {
            let mut state = self.state.write_access();
            state.calls.push(VmCall::Sudo {
                contract,
                msg: msg.clone(),
            });
            state.failing_sudo.contains(&contract)
        };

        ctx.gas_tracker.deduct(SUDO_GAS_COST, "sudo")?;

        let count = Self::load_counter(ctx.storage.as_ref(), contract)?;

        let SudoMsg::IbcLifecycleComplete(complete) = serde_json::from_value::<SudoMsg>(msg.clone())
            .map_err(|err| HookError::contract(contract, err))?;

        let count = match complete {
            IbcLifecycleComplete::IbcAck {
                sequence,
                success: true,
                ..
            } => count + sequence,
            IbcLifecycleComplete::IbcAck { success: false, .. } => count + 1,
            IbcLifecycleComplete::IbcTimeout { sequence, .. } => count + sequence,
        };

        COUNTERS.save(ctx.storage.as_mut(), contract, &count)?;

        if fail {
            return Err(HookError::contract(contract, "sudo failed on purpose"));
        }

        Ok(())
    }
}
