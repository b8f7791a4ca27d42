//! Tipos de payload: Status, Request e Ack.
//!
//! Cada tipo tem seu próprio contrato de serialize/deserialize, construído
//! sobre a tabela de descritores ([`crate::fields::FIELDS`]) e o codec de
//! campo — nenhuma introspecção de tipos em runtime.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::FieldValue;
use crate::error::WireError;
use crate::fields::{self, FIELDS};

// ──────────────────────────────────────────────
// Status
// ──────────────────────────────────────────────

/// Snapshot de métricas de um host.
///
/// Todos os campos são independentemente opcionais; um status sem nenhum
/// campo é válido ("nada a reportar"). Imutável após construção.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostStatus {
    /// Momento da coleta (granularidade de minuto no wire)
    pub timestamp: Option<NaiveDateTime>,
    /// Nome do host
    pub host_name: Option<String>,
    /// RAM total (GiB)
    pub ram_total: Option<f64>,
    /// RAM em uso (GiB)
    pub ram_usage: Option<f64>,
    /// Número de cores de CPU
    pub cpu_total: Option<u64>,
    /// Uso de CPU (0–100%)
    pub cpu_usage: Option<f64>,
    /// Temperatura da CPU (°C)
    pub cpu_temperature: Option<f64>,
    /// Disco total (GiB)
    pub disk_total: Option<f64>,
    /// Disco em uso (GiB)
    pub disk_usage: Option<f64>,
}

impl HostStatus {
    /// Escalar do campo de nome canônico dado, se presente.
    fn get(&self, name: &str) -> Option<FieldValue> {
        match name {
            "timestamp" => self.timestamp.map(FieldValue::Timestamp),
            "host_name" => self.host_name.clone().map(FieldValue::Text),
            "ram_total" => self.ram_total.map(FieldValue::Float),
            "ram_usage" => self.ram_usage.map(FieldValue::Float),
            "cpu_total" => self.cpu_total.map(FieldValue::Integer),
            "cpu_usage" => self.cpu_usage.map(FieldValue::Float),
            "cpu_temperature" => self.cpu_temperature.map(FieldValue::Float),
            "disk_total" => self.disk_total.map(FieldValue::Float),
            "disk_usage" => self.disk_usage.map(FieldValue::Float),
            _ => None,
        }
    }

    /// Atribui um escalar já validado pelo codec ao campo de nome dado.
    fn set(&mut self, name: &str, value: FieldValue) -> Result<(), WireError> {
        match (name, value) {
            ("timestamp", FieldValue::Timestamp(ts)) => self.timestamp = Some(ts),
            ("host_name", FieldValue::Text(s)) => self.host_name = Some(s),
            ("ram_total", FieldValue::Float(v)) => self.ram_total = Some(v),
            ("ram_usage", FieldValue::Float(v)) => self.ram_usage = Some(v),
            ("cpu_total", FieldValue::Integer(n)) => self.cpu_total = Some(n),
            ("cpu_usage", FieldValue::Float(v)) => self.cpu_usage = Some(v),
            ("cpu_temperature", FieldValue::Float(v)) => self.cpu_temperature = Some(v),
            ("disk_total", FieldValue::Float(v)) => self.disk_total = Some(v),
            ("disk_usage", FieldValue::Float(v)) => self.disk_usage = Some(v),
            (name, _) => return Err(WireError::UnknownFieldName(name.to_string())),
        }
        Ok(())
    }

    /// Serializa como objeto JSON compacto com chaves-alias.
    ///
    /// Somente campos presentes entram no objeto, na ordem da tabela de
    /// descritores (ordem estável nesta implementação; peers não devem
    /// depender dela).
    pub fn serialize(&self) -> Result<Vec<u8>, WireError> {
        let mut map = serde_json::Map::new();
        for spec in FIELDS {
            if let Some(value) = self.get(spec.name) {
                map.insert(spec.alias.to_string(), value.to_json()?);
            }
        }
        serde_json::to_vec(&Value::Object(map))
            .map_err(|e| WireError::Format(format!("falha ao codificar status: {e}")))
    }

    /// Reconstrói um status a partir do objeto JSON do wire.
    ///
    /// Chave fora da tabela de aliases é falha dura ([`WireError::UnknownAlias`]),
    /// nunca campo descartado: wire desconhecido indica descompasso de
    /// protocolo entre peers.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, WireError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| WireError::Format(format!("status não é UTF-8: {e}")))?;
        let value: Value = serde_json::from_str(text)
            .map_err(|e| WireError::Format(format!("status não é JSON válido: {e}")))?;
        let map = value
            .as_object()
            .ok_or_else(|| WireError::Format("status deve ser um objeto JSON".to_string()))?;

        let mut status = HostStatus::default();
        for (alias, raw) in map {
            let spec = fields::spec_of_alias(alias)?;
            let field_value = FieldValue::from_json(spec, raw)?;
            status.set(spec.name, field_value)?;
        }
        Ok(status)
    }
}

// ──────────────────────────────────────────────
// Request
// ──────────────────────────────────────────────

/// Pedido para que o peer reporte campos específicos no próximo status.
///
/// Sequência ordenada de nomes canônicos; duplicatas são permitidas e a
/// ordem de transmissão é preservada.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRequest {
    fields: Vec<String>,
}

impl FieldRequest {
    /// Constrói validando cada nome contra a tabela de campos.
    pub fn new<I, S>(names: I) -> Result<Self, WireError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Vec::new();
        for name in names {
            let name = name.into();
            fields::spec_of_name(&name)?;
            fields.push(name);
        }
        Ok(FieldRequest { fields })
    }

    /// Nomes canônicos pedidos, na ordem de transmissão.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Codifica como aliases separados por um único espaço, ex.: `RUG CUG`.
    pub fn serialize(&self) -> Result<Vec<u8>, WireError> {
        let mut aliases = Vec::with_capacity(self.fields.len());
        for name in &self.fields {
            aliases.push(fields::alias_of(name)?);
        }
        Ok(aliases.join(" ").into_bytes())
    }

    /// Decodifica a lista de aliases; token fora da tabela é falha dura.
    ///
    /// Payload vazio decodifica como pedido vazio.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, WireError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| WireError::Format(format!("request não é UTF-8: {e}")))?;
        if text.is_empty() {
            return Ok(FieldRequest::default());
        }
        let mut fields = Vec::new();
        for alias in text.split(' ') {
            fields.push(fields::field_of(alias)?.to_string());
        }
        Ok(FieldRequest { fields })
    }
}

// ──────────────────────────────────────────────
// Ack
// ──────────────────────────────────────────────

/// Confirmação sem conteúdo; seu único significado é a presença.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ack;

impl Ack {
    /// Sempre a sequência vazia.
    pub fn serialize(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Aceita somente payload vazio; bytes extras indicam corrupção e falham
    /// com [`WireError::PayloadMismatch`] em vez de serem ignorados.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.is_empty() {
            Ok(Ack)
        } else {
            Err(WireError::PayloadMismatch(bytes.len()))
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn status_serializes_set_fields_only() {
        let status = HostStatus {
            ram_total: Some(16.029413),
            ram_usage: Some(8.5),
            cpu_total: Some(8),
            ..Default::default()
        };
        let bytes = status.serialize().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"RTT":16.029,"RUG":8.5,"CTT":8}"#
        );
    }

    #[test]
    fn status_roundtrip_full() {
        let status = HostStatus {
            timestamp: Some(ts(2025, 6, 1, 23, 59)),
            host_name: Some("srv0001".to_string()),
            ram_total: Some(16.0),
            ram_usage: Some(8.123),
            cpu_total: Some(8),
            cpu_usage: Some(45.3),
            cpu_temperature: Some(65.2),
            disk_total: Some(512.0),
            disk_usage: Some(230.777),
        };
        let decoded = HostStatus::deserialize(&status.serialize().unwrap()).unwrap();
        assert_eq!(decoded, status);
    }

    #[test]
    fn status_roundtrip_applies_rounding() {
        let status = HostStatus {
            cpu_usage: Some(45.34567),
            ..Default::default()
        };
        let decoded = HostStatus::deserialize(&status.serialize().unwrap()).unwrap();
        assert_eq!(decoded.cpu_usage, Some(45.346));
    }

    #[test]
    fn empty_status_is_valid() {
        let status = HostStatus::default();
        let bytes = status.serialize().unwrap();
        assert_eq!(bytes, b"{}");
        assert_eq!(HostStatus::deserialize(&bytes).unwrap(), status);
    }

    #[test]
    fn status_rejects_unknown_alias() {
        let err = HostStatus::deserialize(br#"{"ZZZ":1}"#).unwrap_err();
        assert!(matches!(err, WireError::UnknownAlias(alias) if alias == "ZZZ"));
    }

    #[test]
    fn status_rejects_wrong_value_type() {
        assert!(matches!(
            HostStatus::deserialize(br#"{"HNM":42}"#),
            Err(WireError::TypeMismatch { field: "host_name", .. })
        ));
    }

    #[test]
    fn status_rejects_malformed_json() {
        assert!(matches!(
            HostStatus::deserialize(b"{nada"),
            Err(WireError::Format(_))
        ));
        assert!(matches!(
            HostStatus::deserialize(b"[1,2]"),
            Err(WireError::Format(_))
        ));
    }

    #[test]
    fn status_rejects_malformed_timestamp() {
        assert!(matches!(
            HostStatus::deserialize(br#"{"TMS":"ontem"}"#),
            Err(WireError::Format(_))
        ));
    }

    #[test]
    fn request_serializes_aliases_in_order() {
        let request = FieldRequest::new(["ram_usage", "cpu_usage"]).unwrap();
        assert_eq!(request.serialize().unwrap(), b"RUG CUG");
    }

    #[test]
    fn request_roundtrip_preserves_order_and_duplicates() {
        let request =
            FieldRequest::new(["cpu_usage", "ram_usage", "cpu_usage"]).unwrap();
        let decoded = FieldRequest::deserialize(&request.serialize().unwrap()).unwrap();
        assert_eq!(decoded, request);
        assert_eq!(decoded.fields(), ["cpu_usage", "ram_usage", "cpu_usage"]);
    }

    #[test]
    fn request_rejects_unknown_name_at_construction() {
        assert!(matches!(
            FieldRequest::new(["gpu_usage"]),
            Err(WireError::UnknownFieldName(name)) if name == "gpu_usage"
        ));
    }

    #[test]
    fn request_rejects_unknown_alias_on_decode() {
        assert!(matches!(
            FieldRequest::deserialize(b"RUG XYZ"),
            Err(WireError::UnknownAlias(alias)) if alias == "XYZ"
        ));
    }

    #[test]
    fn empty_request_roundtrip() {
        let request = FieldRequest::default();
        let bytes = request.serialize().unwrap();
        assert!(bytes.is_empty());
        assert_eq!(FieldRequest::deserialize(&bytes).unwrap(), request);
    }

    #[test]
    fn ack_is_empty_on_wire() {
        assert!(Ack.serialize().is_empty());
        assert_eq!(Ack::deserialize(b"").unwrap(), Ack);
    }

    #[test]
    fn ack_rejects_nonempty_payload() {
        assert!(matches!(
            Ack::deserialize(b"ok"),
            Err(WireError::PayloadMismatch(2))
        ));
    }
}
