//! Dispatcher: bytes crus de um frame viram mensagem tipada.
//!
//! Ponto único onde o wire encontra os tipos da aplicação: desmonta o
//! header, faz match exaustivo no tipo de mensagem e roteia o payload para
//! o decoder correspondente. Toda falha de validação das camadas abaixo
//! propaga inalterada.

use crate::error::WireError;
use crate::messages::{Ack, FieldRequest, HostStatus};
use crate::packet::{self, MsgType, PacketHeader};

/// Mensagem tipada, etiquetada pelo tipo do header.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Status(HostStatus),
    Request(FieldRequest),
    Ack,
}

impl Message {
    /// Tipo de wire correspondente à variante.
    pub fn msg_type(&self) -> MsgType {
        match self {
            Message::Status(_) => MsgType::Status,
            Message::Request(_) => MsgType::Request,
            Message::Ack => MsgType::Ack,
        }
    }

    /// Serializa o payload da mensagem (sem header).
    pub fn serialize_payload(&self) -> Result<Vec<u8>, WireError> {
        match self {
            Message::Status(status) => status.serialize(),
            Message::Request(request) => request.serialize(),
            Message::Ack => Ok(Ack.serialize()),
        }
    }
}

/// Frame recebido já decodificado: header + mensagem tipada.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPacket {
    pub header: PacketHeader,
    pub message: Message,
}

/// Decodifica um frame completo em mensagem tipada.
///
/// Função pura e sem estado: chamá-la duas vezes sobre o mesmo buffer
/// produz resultados iguais.
pub fn parse_packet(frame: &[u8]) -> Result<ParsedPacket, WireError> {
    let (header, payload) = packet::unpack(frame)?;
    let message = match header.msg_type {
        MsgType::Status => Message::Status(HostStatus::deserialize(payload)?),
        MsgType::Request => Message::Request(FieldRequest::deserialize(payload)?),
        MsgType::Ack => {
            Ack::deserialize(payload)?;
            Message::Ack
        }
    };
    Ok(ParsedPacket { header, message })
}

/// Conveniência do lado do envio: serializa o payload e monta o frame.
pub fn encode_packet(host_id: &str, message: &Message) -> Result<Vec<u8>, WireError> {
    let payload = message.serialize_payload()?;
    packet::pack(host_id, message.msg_type(), &payload)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
