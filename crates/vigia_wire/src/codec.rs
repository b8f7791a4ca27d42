//! Codec de campo: conversão tipada entre valores em memória e escalares
//! representáveis no wire.
//!
//! Regras aplicadas uniformemente por todos os tipos de payload:
//! - Timestamp vira string fixa de 12 dígitos `YYYYMMDDHHmm` (sem segundos,
//!   sem timezone; granularidade de minuto é decisão de precisão para a
//!   cadência de telemetria).
//! - Float é arredondado para 3 casas decimais no encode; o decode aceita o
//!   valor como está.
//! - Campo opcional ausente é omitido por completo, nunca codificado como
//!   marcador nulo.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::WireError;
use crate::fields::{FieldKind, FieldSpec};

/// Formato de timestamp no wire: ano, mês, dia, hora, minuto.
pub const DATETIME_FORMAT: &str = "%Y%m%d%H%M";

/// Largura fixa da string de timestamp.
const DATETIME_WIDTH: usize = 12;

// ──────────────────────────────────────────────
// Escalares
// ──────────────────────────────────────────────

/// Escalar tipado de um campo, trafegado entre os structs de payload e a
/// representação JSON do wire.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Float(f64),
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    /// Converte para o valor JSON do wire, aplicando as regras do codec.
    pub fn to_json(&self) -> Result<Value, WireError> {
        match self {
            FieldValue::Text(s) => Ok(Value::String(s.clone())),
            FieldValue::Integer(n) => Ok(Value::from(*n)),
            FieldValue::Float(v) => {
                let rounded = round3(*v);
                serde_json::Number::from_f64(rounded)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        WireError::Format(format!("float não representável: {rounded}"))
                    })
            }
            FieldValue::Timestamp(ts) => Ok(Value::String(encode_timestamp(ts))),
        }
    }

    /// Reconstrói o escalar a partir do valor JSON, conforme o tipo declarado
    /// no descritor do campo.
    pub fn from_json(spec: &FieldSpec, value: &Value) -> Result<Self, WireError> {
        match spec.kind {
            FieldKind::Text => value
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or(WireError::TypeMismatch {
                    field: spec.name,
                    expected: "texto",
                }),
            FieldKind::Integer => value
                .as_u64()
                .map(FieldValue::Integer)
                .ok_or(WireError::TypeMismatch {
                    field: spec.name,
                    expected: "inteiro",
                }),
            FieldKind::Float => value
                .as_f64()
                .map(FieldValue::Float)
                .ok_or(WireError::TypeMismatch {
                    field: spec.name,
                    expected: "float",
                }),
            FieldKind::Timestamp => {
                let raw = value.as_str().ok_or(WireError::TypeMismatch {
                    field: spec.name,
                    expected: "timestamp YYYYMMDDHHmm",
                })?;
                decode_timestamp(raw).map(FieldValue::Timestamp)
            }
        }
    }
}

// ──────────────────────────────────────────────
// Regras de conversão
// ──────────────────────────────────────────────

/// Formata um timestamp como os 12 dígitos fixos do wire.
pub fn encode_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Parseia a string de 12 dígitos do wire; largura e dígitos são estritos.
pub fn decode_timestamp(raw: &str) -> Result<NaiveDateTime, WireError> {
    if raw.len() != DATETIME_WIDTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WireError::Format(format!(
            "timestamp malformado: {raw:?} (esperado {DATETIME_WIDTH} dígitos {DATETIME_FORMAT})"
        )));
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|e| WireError::Format(format!("timestamp malformado: {raw:?} ({e})")))
}

/// Arredonda para 3 casas decimais (limita o tamanho no wire).
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
