/*!
 * Ethernity Decode
 *
 * Decodificação tolerante de respostas de explorers. Campos malformados viram
 * `None` em vez de invalidar o registro inteiro, e registros que não podem ser
 * decodificados são descartados e contabilizados em `RecordList::rejected`.
 */

use crate::types::TransactionHash;
use crate::utils::{decimal_to_u256, hex_to_address, hex_to_h256};
use chrono::{DateTime, Utc};
use ethereum_types::{Address, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lista de registros decodificados de uma página do explorer
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<T> {
    items: Vec<T>,
    rejected: usize,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: 0,
        }
    }
}

impl<T> RecordList<T> {
    /// Cria lista a partir de registros já decodificados
    pub fn new(items: Vec<T>) -> Self {
        Self { items, rejected: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantidade de itens descartados por não serem decodificáveis
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl<T: DeserializeOwned> RecordList<T> {
    /// Decodifica uma página `{ "items": [...] }` ou um array JSON.
    ///
    /// Qualquer outro formato (incluindo respostas de erro) resulta em lista
    /// vazia.
    pub fn from_value(value: Value) -> Self {
        let raw = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let mut list = Self::default();
        for item in raw {
            match serde_json::from_value::<T>(item) {
                Ok(record) => list.items.push(record),
                Err(_) => list.rejected += 1,
            }
        }
        list
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a RecordList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RecordList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
}

/// Converte string decimal ou inteiro JSON em U256
pub fn value_to_u256(value: &Value) -> Option<U256> {
    match value {
        Value::String(s) => decimal_to_u256(s.trim()),
        Value::Number(n) => n.as_u64().map(U256::from),
        _ => None,
    }
}

/// Converte string decimal ou inteiro JSON em u64
pub fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.as_ref().and_then(value_to_u256))
}

pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.as_ref().and_then(value_to_u64))
}

pub fn decimals<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?
        .as_ref()
        .and_then(value_to_u64)
        .and_then(|d| u8::try_from(d).ok()))
}

pub fn address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => hex_to_address(s.trim()),
        _ => None,
    })
}

pub fn tx_hash<'de, D>(deserializer: D) -> Result<Option<TransactionHash>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => hex_to_h256(s.trim()),
        _ => None,
    })
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Decodifica um objeto aninhado; formatos inesperados viram `None`
pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(raw(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}
