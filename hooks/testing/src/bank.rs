use {
    wasm_hooks::{HookError, HookResult},
    wasm_hooks_storage::Map,
    wasm_hooks_types::{Addr, Coins, StdResult, Storage},
};

/// Balances of the mock bank, keyed by `(owner, denom)`. Zero balances are
/// not stored.
pub const BALANCES: Map<(Addr, &str), u128> = Map::new("bank/balance");

pub fn query_balance(storage: &dyn Storage, owner: Addr, denom: &str) -> StdResult<u128> {
    BALANCES
        .may_load(storage, (owner, denom))
        .map(|balance| balance.unwrap_or(0))
}

pub fn mint(storage: &mut dyn Storage, to: Addr, denom: &str, amount: u128) -> HookResult<()> {
    let balance = query_balance(storage, to, denom)?;
    let Some(balance) = balance.checked_add(amount) else {
        return Err(HookError::transfer(format!(
            "balance of {to} in `{denom}` overflows"
        )));
    };

    BALANCES.save(storage, (to, denom), &balance)?;

    Ok(())
}

pub fn burn(storage: &mut dyn Storage, from: Addr, denom: &str, amount: u128) -> HookResult<()> {
    let balance = query_balance(storage, from, denom)?;
    let Some(remaining) = balance.checked_sub(amount) else {
        return Err(HookError::transfer(format!(
            "insufficient balance: {from} has {balance} {denom}, needs {amount}"
        )));
    };

    if remaining == 0 {
        BALANCES.remove(storage, (from, denom));
    } else {
        BALANCES.save(storage, (from, denom), &remaining)?;
    }

    Ok(())
}

pub fn transfer(storage: &mut dyn Storage, from: Addr, to: Addr, coins: &Coins) -> HookResult<()> {
    for coin in coins {
        burn(storage, from, coin.denom, *coin.amount)?;
        mint(storage, to, coin.denom, *coin.amount)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, wasm_hooks_types::MockStorage};

    #[test]
    fn transferring() {
        let mut storage = MockStorage::new();
        mint(&mut storage, Addr::mock(1), "uatom", 100).unwrap();

        let coins = Coins::one("uatom", 100).unwrap();
        transfer(&mut storage, Addr::mock(1), Addr::mock(2), &coins).unwrap();

        assert_eq!(query_balance(&storage, Addr::mock(1), "uatom").unwrap(), 0);
        assert_eq!(query_balance(&storage, Addr::mock(2), "uatom").unwrap(), 100);
        assert!(BALANCES.may_load(&storage, (Addr::mock(1), "uatom")).unwrap().is_none());

        assert!(matches!(
            transfer(&mut storage, Addr::mock(1), Addr::mock(2), &coins),
            Err(HookError::Transfer { .. })
        ));
    }
}
