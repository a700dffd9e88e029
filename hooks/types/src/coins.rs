use {
    crate::{StdError, StdResult},
    serde::{Deserialize, Serialize, de, ser, ser::SerializeSeq},
    serde_with::{DisplayFromStr, serde_as},
    std::{
        collections::{BTreeMap, btree_map},
        fmt,
    },
};

/// A denom and an amount. Amounts are serialized as strings, so that values
/// beyond 2^53 survive JSON parsers that only know doubles.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Coin {
    pub denom: String,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u128,
}

impl Coin {
    pub fn new<D>(denom: D, amount: u128) -> StdResult<Self>
    where
        D: Into<String>,
    {
        let denom = denom.into();

        if denom.is_empty() {
            return Err(StdError::invalid_denom(denom, "denom can't be empty"));
        }

        if amount == 0 {
            return Err(StdError::invalid_coins(format!(
                "amount of `{denom}` is zero"
            )));
        }

        Ok(Self { denom, amount })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.denom, self.amount)
    }
}

impl fmt::Debug for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coin({}:{})", self.denom, self.amount)
    }
}

/// A record in the `Coins` map, borrowed.
#[serde_as]
#[derive(Serialize)]
pub struct CoinRef<'a> {
    pub denom: &'a String,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: &'a u128,
}

/// A set of coins with unique denoms and non-zero amounts, sorted by denom.
///
/// Serialized as a list of [`Coin`]s. Deserialization rejects duplicate
/// denoms, empty denoms, and zero amounts.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Coins(BTreeMap<String, u128>);

impl Coins {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a set containing a single coin.
    pub fn one<D>(denom: D, amount: u128) -> StdResult<Self>
    where
        D: Into<String>,
    {
        let coin = Coin::new(denom, amount)?;
        Ok(Self(BTreeMap::from([(coin.denom, coin.amount)])))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the amount of the given denom, zero if it doesn't exist.
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    /// Increase the amount of a denom. A new record is created if the denom
    /// doesn't exist.
    pub fn insert(&mut self, coin: Coin) -> StdResult<()> {
        let Coin { denom, amount } = Coin::new(coin.denom, coin.amount)?;

        match self.0.entry(denom) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(amount);
            },
            btree_map::Entry::Occupied(mut entry) => {
                let sum = entry.get().checked_add(amount).ok_or_else(|| {
                    StdError::invalid_coins(format!("amount of `{}` overflows", entry.key()))
                })?;
                *entry.get_mut() = sum;
            },
        }

        Ok(())
    }

    /// Decrease the amount of a denom. A record reduced to zero is removed.
    pub fn deduct(&mut self, coin: &Coin) -> StdResult<()> {
        let Some(amount) = self.0.get_mut(&coin.denom) else {
            return Err(StdError::invalid_coins(format!(
                "insufficient `{}`: have 0, need {}",
                coin.denom, coin.amount
            )));
        };

        let have = *amount;
        *amount = have.checked_sub(coin.amount).ok_or_else(|| {
            StdError::invalid_coins(format!(
                "insufficient `{}`: have {have}, need {}",
                coin.denom, coin.amount
            ))
        })?;

        if *amount == 0 {
            self.0.remove(&coin.denom);
        }

        Ok(())
    }

    pub fn iter(&self) -> CoinsIter<'_> {
        CoinsIter(self.0.iter())
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = StdError;

    fn try_from(coins: Vec<Coin>) -> StdResult<Self> {
        let mut map = BTreeMap::new();
        for coin in coins {
            let Coin { denom, amount } = Coin::new(coin.denom, coin.amount)?;
            if map.contains_key(&denom) {
                return Err(StdError::invalid_coins(format!("duplicate denom `{denom}`")));
            }
            map.insert(denom, amount);
        }
        Ok(Self(map))
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Self(BTreeMap::from([(coin.denom, coin.amount)]))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type IntoIter = CoinsIter<'a>;
    type Item = CoinRef<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Coins {
    type IntoIter = CoinsIntoIter;
    type Item = Coin;

    fn into_iter(self) -> Self::IntoIter {
        CoinsIntoIter(self.0.into_iter())
    }
}

pub struct CoinsIter<'a>(btree_map::Iter<'a, String, u128>);

impl<'a> Iterator for CoinsIter<'a> {
    type Item = CoinRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(denom, amount)| CoinRef { denom, amount })
    }
}

pub struct CoinsIntoIter(btree_map::IntoIter<String, u128>);

impl Iterator for CoinsIntoIter {
    type Item = Coin;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(denom, amount)| Coin { denom, amount })
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .iter()
            .map(|coin| format!("{}:{}", coin.denom, coin.amount))
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&s)
    }
}

impl fmt::Debug for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coins([{self}])")
    }
}

impl ser::Serialize for Coins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for coin in self {
            seq.serialize_element(&coin)?;
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for Coins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let coins = Vec::<Coin>::deserialize(deserializer)?;
        Coins::try_from(coins).map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------
