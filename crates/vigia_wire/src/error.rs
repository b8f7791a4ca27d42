//! Erros do protocolo de wire.
//!
//! Todas as falhas são locais e recuperáveis pelo chamador; a camada de
//! transporte decide a política (derrubar conexão, logar, ignorar). Cada
//! variante carrega o valor ofensivo e a restrição esperada.

/// Erros de validação/codificação do protocolo.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Identificador de host fora do padrão `[a-z0-9]{7}`.
    #[error("Identificador de host inválido: {0:?} (esperado [a-z0-9]{{7}})")]
    InvalidHostId(String),

    /// Byte de tipo de mensagem fora do conjunto fechado {'S','R','A'}.
    #[error("Tipo de mensagem desconhecido: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// Frame menor que o header, ou payload declarado maior que o presente.
    #[error("Pacote incompleto: {actual} bytes (esperado {expected})")]
    IncompletePacket { actual: usize, expected: usize },

    /// Alias de 3 caracteres recebido no wire que não consta na tabela.
    #[error("Alias desconhecido: {0:?}")]
    UnknownAlias(String),

    /// Nome canônico de campo que não consta na tabela.
    #[error("Nome de campo desconhecido: {0:?}")]
    UnknownFieldName(String),

    /// Representação codificada que o codec não consegue parsear
    /// (timestamp malformado, JSON inválido, UTF-8 inválido).
    #[error("Formato inválido: {0}")]
    Format(String),

    /// Valor do wire cujo tipo não corresponde ao tipo declarado do campo.
    #[error("Tipo incompatível no campo {field:?}: esperado {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// Payload presente onde o tipo de mensagem exige payload vazio (ACK).
    #[error("Payload inesperado em ACK: {0} bytes (esperado vazio)")]
    PayloadMismatch(usize),
}
