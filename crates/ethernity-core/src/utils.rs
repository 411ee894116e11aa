/*!
 * Ethernity Utils
 *
 * Conversões de endereço, hash e unidade usadas na leitura de dados de explorer
 */

use ethereum_types::{Address, H256, U256};
use std::str::FromStr;

/// Casas decimais da moeda nativa (wei -> ether)
pub const NATIVE_DECIMALS: u8 = 18;

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
    if hex_str.len() != 40 {
        return None;
    }
    Address::from_str(hex_str).ok()
}

/// Converte uma string hexadecimal para H256
pub fn hex_to_h256(hex: &str) -> Option<H256> {
    let hex_str = hex.strip_prefix("0x").unwrap_or(hex);
    if hex_str.len() != 64 {
        return None;
    }
    H256::from_str(hex_str).ok()
}

/// Converte uma string decimal para U256
pub fn decimal_to_u256(decimal: &str) -> Option<U256> {
    if decimal.is_empty() {
        return None;
    }
    U256::from_dec_str(decimal).ok()
}

/// Formata um Address para exibição (hex minúsculo, forma canônica)
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Abrevia um endereço no formato `0x1234...abcd`
pub fn short_address(address: &Address) -> String {
    let full = format_address(address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Converte U256 em f64 sem exigir que o valor caiba em u128
pub fn u256_to_f64_lossy(value: &U256) -> f64 {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    let mut result = 0f64;
    for &b in &bytes {
        result = result * 256f64 + b as f64;
    }
    result
}

/// Converte um valor na menor unidade para a unidade principal.
///
/// A divisão por `10^decimals` é feita em inteiros (parte inteira e resto) e
/// só depois convertida em ponto flutuante.
pub fn to_unit(amount: &U256, decimals: u8) -> f64 {
    if decimals == 0 {
        return u256_to_f64_lossy(amount);
    }
    // 10^77 ainda cabe em U256; acima disso qualquer valor vira fração ínfima
    if decimals > 77 {
        return 0.0;
    }
    let divisor = U256::exp10(decimals as usize);
    let integer_part = *amount / divisor;
    let fractional_part = *amount % divisor;
    let value = u256_to_f64_lossy(&integer_part)
        + u256_to_f64_lossy(&fractional_part) / u256_to_f64_lossy(&divisor);
    if value.is_finite() { value } else { 0.0 }
}

/// Converte wei para ether
pub fn wei_to_ether(wei: &U256) -> f64 {
    to_unit(wei, NATIVE_DECIMALS)
}
