use thiserror::Error;

/// Erros compartilhados pelos crates de coleta e reputação
#[derive(Error, Debug)]
pub enum Error {
    /// Falha de transporte ou resposta HTTP fora da faixa 2xx
    #[error("Falha na consulta ao explorer: {0}")]
    RpcError(String),

    /// JSON malformado ou fora do formato esperado
    #[error("Resposta não decodificável: {0}")]
    DecodeError(String),

    /// Endereço ou parâmetro de entrada inválido
    #[error("Entrada inválida: {0}")]
    ValidationError(String),

    #[error("Tempo esgotado: {0}")]
    TimeoutError(String),

    /// Recurso inexistente no explorer
    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Falhas que podem desaparecer em uma nova tentativa
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::RpcError(_) | Error::TimeoutError(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DecodeError(err.to_string())
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_decode_errors() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::DecodeError(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn transport_failures_are_transient() {
        assert!(Error::TimeoutError("5s".into()).is_transient());
        assert!(Error::RpcError("503".into()).is_transient());
        assert!(!Error::ValidationError("0x12".into()).is_transient());
        assert_eq!(Error::NotFound("0xab".into()).to_string(), "Não encontrado: 0xab");
    }
}
