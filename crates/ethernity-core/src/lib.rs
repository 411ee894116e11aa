/*!
 * Ethernity Core
 *
 * Registros de explorer com decodificação tolerante, conversões de unidade,
 * erros comuns e o trait de provedor de dados usados pelos demais crates
 */

pub mod decode;
pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

// Re-exportações públicas
pub use decode::RecordList;
pub use error::Error;
pub use types::*;
