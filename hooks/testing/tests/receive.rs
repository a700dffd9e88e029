use {
    serde_json::json,
    test_case::test_case,
    wasm_hooks::{GasTracker, HookCtx},
    wasm_hooks_testing::{
        DESTINATION_CHANNEL, REMOTE_SENDER, TestBuilder, VmCall, ics20_data, ics20_packet,
        ics721_data, ics721_packet, query_nft_owner,
    },
    wasm_hooks_types::{
        Addr, Coins, Event, Json, JsonDeExt,
        ibc::{Acknowledgement, FungibleTokenPacketData, derive_intermediate_sender, local_denom},
    },
};

const COUNTER: Addr = Addr::mock(1);
const DENIED: Addr = Addr::mock(2);

fn execute_memo(contract: Addr, msg: Json) -> String {
    json!({
        "wasm": {
            "message": {
                "contract": contract.to_string(),
                "msg": msg,
            },
        },
    })
    .to_string()
}

fn intermediate_sender() -> Addr {
    derive_intermediate_sender(DESTINATION_CHANNEL, REMOTE_SENDER)
}

fn assert_hook_error(ack: &Acknowledgement, expected: &str) {
    match ack {
        Acknowledgement::Error(err) => {
            assert!(
                err.starts_with("ibc wasm hook error: "),
                "unexpected error format: {err}"
            );
            assert!(err.contains(expected), "`{err}` doesn't contain `{expected}`");
        },
        Acknowledgement::Result(_) => panic!("expecting error ack, got success"),
    }
}

#[test]
fn executing_contract_with_received_funds() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);
    let packet = ics20_packet(1, &data);
    let denom = local_denom(&packet, "uatom");

    let outcome = suite.recv_packet(&packet);

    assert_eq!(outcome.result, Acknowledgement::success());
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(1));

    // The funds passed through the intermediate account to the contract.
    assert_eq!(suite.query_balance(COUNTER, &denom).unwrap(), 100);
    assert_eq!(suite.query_balance(intermediate_sender(), &denom).unwrap(), 0);

    // The transfer app credited the intermediate account, not the contract.
    let received = suite.hooks.app().received();
    assert_eq!(received.len(), 1);
    let credited = received[0]
        .data
        .deserialize_json::<FungibleTokenPacketData>()
        .unwrap();
    assert_eq!(credited.receiver, intermediate_sender().to_string());
    assert_eq!(credited.memo, memo);

    let funds = Coins::one(denom, 100).unwrap();
    assert_eq!(suite.hooks.vm().calls(), vec![VmCall::Execute {
        sender: intermediate_sender().to_string(),
        contract: COUNTER.to_string(),
        msg: json!({ "increase": {} }),
        funds: funds.clone(),
    }]);
    assert_eq!(outcome.events, vec![Event::Execute {
        contract: COUNTER,
        sender: intermediate_sender(),
        funds,
    }]);
}

#[test]
fn sender_in_memo_is_ignored() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = json!({
        "wasm": {
            "message": {
                "sender": Addr::mock(99).to_string(),
                "contract": COUNTER.to_string(),
                "msg": { "increase": {} },
            },
        },
    })
    .to_string();
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);

    suite.recv_packet(&ics20_packet(1, &data));

    let Some(VmCall::Execute { sender, .. }) = suite.hooks.vm().calls().pop() else {
        panic!("expecting an execute call");
    };
    assert_eq!(sender, intermediate_sender().to_string());
}

#[test_case(""; "empty memo")]
#[test_case("just a note"; "not json")]
#[test_case(r#"{"forward":{"receiver":"osmo1xyz"}}"#; "no wasm key")]
#[test_case(r#"{"wasm":{"async_callback":"0x0000000000000000000000000000000000000001"}}"#; "no message")]
#[test_case(r#"{"wasm":null}"#; "null hook data")]
fn packets_without_message_pass_through(memo: &str) {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let receiver = Addr::mock(7);
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &receiver.to_string(), memo);
    let packet = ics20_packet(1, &data);

    let outcome = suite.recv_packet(&packet);

    assert_eq!(outcome.result, Acknowledgement::success());
    assert!(outcome.events.is_empty());
    assert_eq!(suite.hooks.app().received(), vec![packet.clone()]);
    assert_eq!(
        suite.query_balance(receiver, &local_denom(&packet, "uatom")).unwrap(),
        100
    );
    assert!(suite.hooks.vm().calls().is_empty());
}

#[test]
fn malformed_hook_data() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = json!({ "wasm": { "message": { "contract": COUNTER.to_string() } } }).to_string();
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_hook_error(&outcome.result, "invalid hook data");
    assert!(suite.hooks.app().received().is_empty());
    assert!(matches!(outcome.events.as_slice(), [Event::AckError { .. }]));
}

#[test]
fn receiver_must_be_the_contract() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &Addr::mock(7).to_string(), &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_hook_error(&outcome.result, "receiver is not properly set");
    assert!(suite.hooks.app().received().is_empty());
    assert!(suite.hooks.vm().calls().is_empty());
}

#[test]
fn contract_must_be_allowed() {
    let mut suite = TestBuilder::new().add_counter(DENIED, false).build();

    let memo = execute_memo(DENIED, json!({ "increase": {} }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &DENIED.to_string(), &memo);
    let packet = ics20_packet(1, &data);
    let denom = local_denom(&packet, "uatom");

    let outcome = suite.recv_packet(&packet);

    assert_hook_error(
        &outcome.result,
        &format!("contract `{DENIED}` is not allowed to be used in ibchooks"),
    );
    assert_eq!(suite.query_balance(DENIED, &denom).unwrap(), 0);
    assert_eq!(suite.query_balance(intermediate_sender(), &denom).unwrap(), 0);
    assert_eq!(suite.query_counter(DENIED).unwrap(), Some(0));
    assert!(suite.hooks.vm().calls().is_empty());
    assert!(suite.hooks.app().received().is_empty());
    assert_eq!(outcome.events, vec![Event::AckError {
        error: format!(
            "ibc wasm hook error: contract `{DENIED}` is not allowed to be used in ibchooks"
        ),
    }]);
}

#[test]
fn unparsable_contract_address() {
    let mut suite = TestBuilder::new().build();

    let memo = json!({
        "wasm": { "message": { "contract": "osmo1contract", "msg": {} } },
    })
    .to_string();
    let data = ics20_data("uatom", "100", REMOTE_SENDER, "osmo1contract", &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_hook_error(&outcome.result, "invalid address `osmo1contract`");
    assert!(suite.hooks.app().received().is_empty());
}

#[test]
fn amount_beyond_u128_is_rejected_before_crediting() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    // u128::MAX + 1
    let amount = "340282366920938463463374607431768211456";
    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data("uatom", amount, REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_hook_error(&outcome.result, &format!("invalid amount: {amount}"));
    assert!(suite.hooks.app().received().is_empty());
    assert!(suite.hooks.vm().calls().is_empty());
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(0));
}

#[test]
fn transfer_failure_ack_is_returned_as_is() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();
    suite.hooks.app().set_fail_recv(true);

    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_eq!(
        outcome.result,
        Acknowledgement::error("mock transfer app refused the packet")
    );
    assert!(outcome.events.is_empty());
    assert!(suite.hooks.vm().calls().is_empty());
}

#[test]
fn contract_failure() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = execute_memo(COUNTER, json!({ "fail": { "reason": "nope" } }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);
    let packet = ics20_packet(1, &data);
    let denom = local_denom(&packet, "uatom");

    let outcome = suite.recv_packet(&packet);

    assert_hook_error(&outcome.result, "nope");
    assert_eq!(suite.hooks.vm().calls().len(), 1);
    // The channel layer reverts the whole receive on an error ack.
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(0));
    assert_eq!(suite.query_balance(intermediate_sender(), &denom).unwrap(), 0);
}

#[test]
fn contract_failure_keeps_transfer_credit() {
    let suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = execute_memo(COUNTER, json!({ "fail": { "reason": "nope" } }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);
    let packet = ics20_packet(1, &data);
    let denom = local_denom(&packet, "uatom");

    // Call the middleware directly, without the channel layer's revert.
    let mut ctx = HookCtx::new(
        Box::new(suite.storage.clone()),
        GasTracker::new_limited(1_000_000),
    );
    let ack = suite.hooks.on_recv_packet(&mut ctx, &packet, Addr::mock(255));

    assert_hook_error(&ack, "nope");
    // The contract's writes are discarded; the credit from the transfer app
    // isn't.
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(0));
    assert_eq!(suite.query_balance(COUNTER, &denom).unwrap(), 0);
    assert_eq!(suite.query_balance(intermediate_sender(), &denom).unwrap(), 100);
    // The contract still paid for its gas.
    assert!(ctx.gas_tracker.used() > 0);
}

#[test]
fn contract_running_out_of_gas() {
    let mut suite = TestBuilder::new()
        .add_counter(COUNTER, true)
        .set_gas_limit(100_000)
        .build();

    let memo = execute_memo(COUNTER, json!({ "burn": { "gas": 1_000_000 } }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_hook_error(&outcome.result, "out of gas");
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(0));
}

#[test]
fn migrated_denom_is_forwarded_in_l2_form() {
    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data("uatom", "100", REMOTE_SENDER, &COUNTER.to_string(), &memo);
    let packet = ics20_packet(1, &data);
    let ibc_denom = local_denom(&packet, "uatom");

    let mut suite = TestBuilder::new()
        .add_counter(COUNTER, true)
        .add_migration(ibc_denom.clone(), "l2/atom")
        .build();

    let outcome = suite.recv_packet(&packet);

    assert_eq!(outcome.result, Acknowledgement::success());
    assert_eq!(suite.query_balance(COUNTER, "l2/atom").unwrap(), 100);
    assert_eq!(suite.query_balance(COUNTER, &ibc_denom).unwrap(), 0);
}

#[test]
fn returning_native_token() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    // A token that left this chain through `transfer/channel-1` comes back
    // with the counterparty's prefix, which is stripped.
    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics20_data(
        "transfer/channel-0/uinit",
        "100",
        REMOTE_SENDER,
        &COUNTER.to_string(),
        &memo,
    );

    let outcome = suite.recv_packet(&ics20_packet(1, &data));

    assert_eq!(outcome.result, Acknowledgement::success());
    assert_eq!(suite.query_balance(COUNTER, "uinit").unwrap(), 100);
}

#[test]
fn executing_contract_on_nft_receive() {
    let mut suite = TestBuilder::new().add_counter(COUNTER, true).build();

    let memo = execute_memo(COUNTER, json!({ "increase": {} }));
    let data = ics721_data("punks", &["7"], REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics721_packet(1, &data));

    assert_eq!(outcome.result, Acknowledgement::success());
    assert_eq!(suite.query_counter(COUNTER).unwrap(), Some(1));
    assert_eq!(
        query_nft_owner(&suite.storage, "punks", "7").unwrap(),
        Some(intermediate_sender())
    );

    let Some(VmCall::Execute { funds, .. }) = suite.hooks.vm().calls().pop() else {
        panic!("expecting an execute call");
    };
    assert!(funds.is_empty());
}

#[test]
fn nft_receive_forwards_the_message_funds() {
    let intermediate = intermediate_sender();
    let mut suite = TestBuilder::new()
        .add_counter(COUNTER, true)
        .add_balance(intermediate, "uinit", 50)
        .build();

    let memo = json!({
        "wasm": {
            "message": {
                "contract": COUNTER.to_string(),
                "msg": { "increase": {} },
                "funds": [{ "denom": "uinit", "amount": "20" }],
            },
        },
    })
    .to_string();
    let data = ics721_data("punks", &["7"], REMOTE_SENDER, &COUNTER.to_string(), &memo);

    let outcome = suite.recv_packet(&ics721_packet(1, &data));

    assert_eq!(outcome.result, Acknowledgement::success());
    assert_eq!(suite.query_balance(COUNTER, "uinit").unwrap(), 20);
    assert_eq!(suite.query_balance(intermediate, "uinit").unwrap(), 30);
}
