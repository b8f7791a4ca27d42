//! Framing binário de pacotes.
//!
//! Formato do frame (inteiros em big-endian / network order):
//!
//! ```text
//! ┌─────────┬─────────┬────────────────┬────────────┬─────────────┐
//! │ Ver.(1) │ Tipo(1) │ Tam.payload(4) │ Host id(7) │ Payload (N) │
//! └─────────┴─────────┴────────────────┴────────────┴─────────────┘
//! ```
//!
//! - Versão do protocolo (1 byte)
//! - Tipo de mensagem: `'S'` status, `'R'` request, `'A'` ack
//! - Tamanho do payload em bytes (u32 big-endian)
//! - Identificador do host: exatamente 7 caracteres `[a-z0-9]`

use crate::error::WireError;

/// Versão atual do protocolo.
pub const PROTOCOL_VERSION: u8 = 1;

/// Largura fixa do identificador de host.
pub const HOST_ID_LEN: usize = 7;

/// Tamanho do header: versão + tipo + tamanho do payload + host id.
pub const HEADER_SIZE: usize = 1 + 1 + 4 + HOST_ID_LEN;

// ──────────────────────────────────────────────
// Tipo de mensagem
// ──────────────────────────────────────────────

/// Conjunto fechado de tipos de mensagem.
///
/// O dispatcher faz match exaustivo sobre este enum; um tipo novo sem
/// tratamento é erro de compilação, não um default em runtime.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    /// Snapshot de métricas de um host
    Status = b'S',
    /// Pedido de campos específicos
    Request = b'R',
    /// Confirmação sem conteúdo
    Ack = b'A',
}

impl MsgType {
    /// Byte do wire para o tipo.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Interpreta o byte do wire; fora do conjunto fechado é falha.
    pub fn from_byte(byte: u8) -> Result<Self, WireError> {
        match byte {
            b'S' => Ok(MsgType::Status),
            b'R' => Ok(MsgType::Request),
            b'A' => Ok(MsgType::Ack),
            other => Err(WireError::UnknownMessageType(other)),
        }
    }
}

// ──────────────────────────────────────────────
// Header
// ──────────────────────────────────────────────

/// Header fixo de um frame, já decodificado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    pub version: u8,
    pub msg_type: MsgType,
    pub payload_len: u32,
    pub host_id: String,
}

/// Valida o identificador de host contra o padrão `[a-z0-9]{7}`.
pub fn validate_host_id(host_id: &str) -> Result<(), WireError> {
    let valid = host_id.len() == HOST_ID_LEN
        && host_id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(WireError::InvalidHostId(host_id.to_string()))
    }
}

// ──────────────────────────────────────────────
// Pack / Unpack
// ──────────────────────────────────────────────

/// Monta um frame: header fixo seguido dos bytes crus do payload.
pub fn pack(host_id: &str, msg_type: MsgType, payload: &[u8]) -> Result<Vec<u8>, WireError> {
    validate_host_id(host_id)?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.push(PROTOCOL_VERSION);
    frame.push(msg_type.as_byte());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(host_id.as_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Desmonta um frame em header + fatia de payload.
///
/// Falha com [`WireError::IncompletePacket`] se o frame for menor que o
/// header ou se o tamanho declarado exceder os bytes presentes; bytes além
/// do tamanho declarado são ignorados.
pub fn unpack(frame: &[u8]) -> Result<(PacketHeader, &[u8]), WireError> {
    if frame.len() < HEADER_SIZE {
        return Err(WireError::IncompletePacket {
            actual: frame.len(),
            expected: HEADER_SIZE,
        });
    }

    let version = frame[0];
    let msg_type = MsgType::from_byte(frame[1])?;
    let payload_len = u32::from_be_bytes([frame[2], frame[3], frame[4], frame[5]]);

    let host_id = std::str::from_utf8(&frame[6..HEADER_SIZE])
        .map_err(|_| {
            WireError::InvalidHostId(String::from_utf8_lossy(&frame[6..HEADER_SIZE]).into_owned())
        })?
        .to_string();
    validate_host_id(&host_id)?;

    let end = HEADER_SIZE + payload_len as usize;
    if frame.len() < end {
        return Err(WireError::IncompletePacket {
            actual: frame.len(),
            expected: end,
        });
    }

    let header = PacketHeader {
        version,
        msg_type,
        payload_len,
        host_id,
    };
    Ok((header, &frame[HEADER_SIZE..end]))
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size_is_fixed() {
        assert_eq!(HEADER_SIZE, 13);
    }

    #[test]
    fn frame_roundtrip() {
        let payload = br#"{"RUG":8.5}"#;
        let frame = pack("ab12345", MsgType::Status, payload).unwrap();
        assert_eq!(frame.len(), HEADER_SIZE + payload.len());

        let (header, body) = unpack(&frame).unwrap();
        assert_eq!(header.version, PROTOCOL_VERSION);
        assert_eq!(header.msg_type, MsgType::Status);
        assert_eq!(header.payload_len as usize, payload.len());
        assert_eq!(header.host_id, "ab12345");
        assert_eq!(body, payload);
    }

    #[test]
    fn header_layout_on_wire() {
        let frame = pack("host001", MsgType::Request, b"RUG").unwrap();
        assert_eq!(frame[0], 1);
        assert_eq!(frame[1], b'R');
        assert_eq!(&frame[2..6], &[0, 0, 0, 3]);
        assert_eq!(&frame[6..13], b"host001");
        assert_eq!(&frame[13..], b"RUG");
    }

    #[test]
    fn empty_payload_frame() {
        let frame = pack("node042", MsgType::Ack, b"").unwrap();
        let (header, body) = unpack(&frame).unwrap();
        assert_eq!(header.payload_len, 0);
        assert!(body.is_empty());
    }

    #[test]
    fn pack_rejects_uppercase_host_id() {
        assert!(matches!(
            pack("AB12345", MsgType::Status, b""),
            Err(WireError::InvalidHostId(id)) if id == "AB12345"
        ));
    }

    #[test]
    fn pack_rejects_wrong_length_host_id() {
        assert!(matches!(
            pack("ab123", MsgType::Status, b""),
            Err(WireError::InvalidHostId(id)) if id == "ab123"
        ));
        assert!(matches!(
            pack("ab123456", MsgType::Status, b""),
            Err(WireError::InvalidHostId(_))
        ));
    }

    #[test]
    fn unpack_rejects_short_frame() {
        assert!(matches!(
            unpack(&[1, b'S', 0]),
            Err(WireError::IncompletePacket { actual: 3, expected: HEADER_SIZE })
        ));
    }

    #[test]
    fn unpack_rejects_truncated_payload() {
        let mut frame = pack("ab12345", MsgType::Status, b"{}").unwrap();
        frame.truncate(HEADER_SIZE + 1);
        assert!(matches!(
            unpack(&frame),
            Err(WireError::IncompletePacket { actual, expected })
                if actual == HEADER_SIZE + 1 && expected == HEADER_SIZE + 2
        ));
    }

    #[test]
    fn unpack_ignores_trailing_bytes() {
        let mut frame = pack("ab12345", MsgType::Request, b"RUG").unwrap();
        frame.extend_from_slice(b"lixo");
        let (header, body) = unpack(&frame).unwrap();
        assert_eq!(header.payload_len, 3);
        assert_eq!(body, b"RUG");
    }

    #[test]
    fn unpack_rejects_unknown_type_byte() {
        let mut frame = pack("ab12345", MsgType::Ack, b"").unwrap();
        frame[1] = b'X';
        assert!(matches!(
            unpack(&frame),
            Err(WireError::UnknownMessageType(b'X'))
        ));
    }

    #[test]
    fn unpack_validates_host_id() {
        let mut frame = pack("ab12345", MsgType::Ack, b"").unwrap();
        frame[6] = b'!';
        assert!(matches!(unpack(&frame), Err(WireError::InvalidHostId(_))));
    }

    #[test]
    fn msg_type_byte_roundtrip() {
        for t in [MsgType::Status, MsgType::Request, MsgType::Ack] {
            assert_eq!(MsgType::from_byte(t.as_byte()).unwrap(), t);
        }
        assert!(matches!(
            MsgType::from_byte(b'Q'),
            Err(WireError::UnknownMessageType(b'Q'))
        ));
    }
}
