use {
    crate::{MockChannel, MockMigration, MockTransferApp, MockVm, query_balance},
    std::fmt::Debug,
    wasm_hooks::{GasTracker, HookCtx, HookResult, WasmHooks},
    wasm_hooks_types::{
        Addr, Event, MockStorage, Shared, StdResult,
        ibc::{Acknowledgement, Height, Packet},
    },
};

pub type TestHooks = WasmHooks<MockTransferApp, MockChannel, MockVm, MockMigration>;

/// The result of an action, along with the events it emitted and the gas it
/// consumed.
#[derive(Debug)]
pub struct TestOutcome<T> {
    pub result: T,
    pub events: Vec<Event>,
    pub gas_used: u64,
}

impl<T, E> TestOutcome<Result<T, E>>
where
    E: Debug,
{
    pub fn should_succeed(self) -> T {
        match self.result {
            Ok(value) => value,
            Err(err) => panic!("expecting success, got error: {err:?}"),
        }
    }

    pub fn should_fail(self) -> E
    where
        T: Debug,
    {
        match self.result {
            Ok(value) => panic!("expecting error, got success: {value:?}"),
            Err(err) => err,
        }
    }
}

/// A mock chain running the hooks middleware over an in-memory store.
///
/// Each action runs the way the channel layer would run it: in a branch of
/// the chain state, committed only if the action succeeds. A received packet
/// succeeds if its acknowledgement does.
pub struct TestSuite {
    pub storage: Shared<MockStorage>,
    pub hooks: TestHooks,
    pub relayer: Addr,
    /// Gas limit of each action.
    pub gas_limit: u64,
}

impl TestSuite {
    /// Create a new test suite.
    ///
    /// It's not recommended to call this directly. Use [`TestBuilder`](crate::TestBuilder)
    /// instead.
    pub fn new(storage: Shared<MockStorage>, hooks: TestHooks, relayer: Addr, gas_limit: u64) -> Self {
        Self {
            storage,
            hooks,
            relayer,
            gas_limit,
        }
    }

    /// Run an action in a branch of the chain state.
    pub fn run<F, T, C>(&mut self, action: F, should_commit: C) -> TestOutcome<T>
    where
        F: FnOnce(&TestHooks, &mut HookCtx) -> T,
        C: FnOnce(&T) -> bool,
    {
        let mut root = HookCtx::new(
            Box::new(self.storage.clone()),
            GasTracker::new_limited(self.gas_limit),
        );
        let mut branch = root.branch(None);

        let result = action(&self.hooks, &mut branch.ctx);
        let events = branch.ctx.events.clone();
        let gas_used = branch.ctx.gas_tracker.used();

        let closed = if should_commit(&result) {
            branch.commit(&mut root)
        } else {
            branch.discard(&mut root)
        };

        closed.unwrap_or_else(|err| panic!("failed to close branch: {err}"));

        TestOutcome {
            result,
            events,
            gas_used,
        }
    }

    pub fn send_packet(
        &mut self,
        port: &str,
        channel: &str,
        data: &[u8],
    ) -> TestOutcome<HookResult<u64>> {
        self.run(
            |hooks, ctx| {
                hooks.on_send_packet(ctx, port, channel, Height::default(), 0, data)
            },
            Result::is_ok,
        )
    }

    pub fn recv_packet(&mut self, packet: &Packet) -> TestOutcome<Acknowledgement> {
        let relayer = self.relayer;

        self.run(
            |hooks, ctx| hooks.on_recv_packet(ctx, packet, relayer),
            Acknowledgement::is_success,
        )
    }

    pub fn ack_packet(&mut self, packet: &Packet, ack: &[u8]) -> TestOutcome<HookResult<()>> {
        let relayer = self.relayer;

        self.run(
            |hooks, ctx| hooks.on_acknowledgement_packet(ctx, packet, ack, relayer),
            Result::is_ok,
        )
    }

    pub fn timeout_packet(&mut self, packet: &Packet) -> TestOutcome<HookResult<()>> {
        let relayer = self.relayer;

        self.run(
            |hooks, ctx| hooks.on_timeout_packet(ctx, packet, relayer),
            Result::is_ok,
        )
    }

    pub fn update_acl(
        &mut self,
        sender: Addr,
        contract: Addr,
        allowed: bool,
    ) -> TestOutcome<HookResult<()>> {
        self.run(
            |hooks, ctx| hooks.update_acl(ctx, sender, contract, allowed),
            Result::is_ok,
        )
    }

    pub fn close_channel(&mut self, port: &str, channel: &str) -> usize {
        self.hooks.ics4().close(port, channel);

        self.run(
            |hooks, ctx| hooks.on_channel_closed(ctx, port, channel),
            |_| true,
        )
        .result
    }

    pub fn query_balance(&self, owner: Addr, denom: &str) -> StdResult<u128> {
        query_balance(&self.storage, owner, denom)
    }

    pub fn query_counter(&self, contract: Addr) -> StdResult<Option<u64>> {
        MockVm::query_counter(&self.storage, contract)
    }
}
