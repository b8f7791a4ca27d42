//! # Vigia Wire
//!
//! Crate compartilhada que define o protocolo de wire do sistema Vigia:
//! framing binário com header fixo, codecs de payload com chaves-alias e
//! configuração TOML. Agentes enviam snapshots periódicos de métricas
//! (RAM, CPU, disco) ao coletor; o coletor pode pedir campos específicos.
//!
//! A camada é pura, síncrona e sem estado: toda operação é função de
//! bytes/objetos para bytes/objetos ou falha, sem I/O nem locking. O
//! transporte (fora desta crate) entrega buffers já delimitados.
//!
//! ## Módulos
//! - [`fields`] – Tabela de aliases e descritores de campo
//! - [`codec`] – Conversão tipada de escalares (timestamp, floats…)
//! - [`messages`] – Payloads: [`HostStatus`], [`FieldRequest`], [`Ack`]
//! - [`packet`] – Header binário fixo, pack/unpack de frames
//! - [`dispatch`] – Roteamento de frames para mensagens tipadas
//! - [`config`] – Configuração unificada via TOML
//! - [`error`] – [`WireError`] com todas as falhas de validação

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod messages;
pub mod packet;

// Re-exports convenientes
pub use config::AppConfig;
pub use dispatch::{Message, ParsedPacket, encode_packet, parse_packet};
pub use error::WireError;
pub use messages::{Ack, FieldRequest, HostStatus};
pub use packet::{HEADER_SIZE, MsgType, PROTOCOL_VERSION, PacketHeader, pack, unpack};
