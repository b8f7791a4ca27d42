//! Tabela de aliases e descritores de campo.
//!
//! Cada campo reportável aparece exatamente uma vez em [`FIELDS`], com nome
//! canônico, alias de 3 caracteres e tipo semântico. Os codecs de payload
//! iteram sobre essa tabela em vez de inspecionar tipos em runtime.
//!
//! A tabela é `const`, imutável e compartilhada por todo o processo; alias ou
//! nome ausente é falha dura de decode, nunca campo descartado em silêncio.

use crate::error::WireError;

// ──────────────────────────────────────────────
// Tipos semânticos
// ──────────────────────────────────────────────

/// Tipo semântico de um campo no wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Texto UTF-8 livre.
    Text,
    /// Inteiro sem sinal (contagens).
    Integer,
    /// Ponto flutuante, arredondado para 3 casas no encode.
    Float,
    /// Data/hora `YYYYMMDDHHmm`, granularidade de minuto.
    Timestamp,
}

/// Descritor de um campo: nome canônico, alias de wire e tipo.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: FieldKind,
}

// ──────────────────────────────────────────────
// Tabela de campos
// ──────────────────────────────────────────────

/// Todos os campos reportáveis, na ordem de serialização do Status.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "timestamp", alias: "TMS", kind: FieldKind::Timestamp },
    FieldSpec { name: "host_name", alias: "HNM", kind: FieldKind::Text },
    FieldSpec { name: "ram_total", alias: "RTT", kind: FieldKind::Float },
    FieldSpec { name: "ram_usage", alias: "RUG", kind: FieldKind::Float },
    FieldSpec { name: "cpu_total", alias: "CTT", kind: FieldKind::Integer },
    FieldSpec { name: "cpu_usage", alias: "CUG", kind: FieldKind::Float },
    FieldSpec { name: "cpu_temperature", alias: "CTP", kind: FieldKind::Float },
    FieldSpec { name: "disk_total", alias: "DTT", kind: FieldKind::Float },
    FieldSpec { name: "disk_usage", alias: "DUG", kind: FieldKind::Float },
];

// ──────────────────────────────────────────────
// Lookups
// ──────────────────────────────────────────────

/// Busca o descritor pelo nome canônico.
pub fn spec_of_name(name: &str) -> Result<&'static FieldSpec, WireError> {
    FIELDS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| WireError::UnknownFieldName(name.to_string()))
}

/// Busca o descritor pelo alias de wire.
pub fn spec_of_alias(alias: &str) -> Result<&'static FieldSpec, WireError> {
    FIELDS
        .iter()
        .find(|spec| spec.alias == alias)
        .ok_or_else(|| WireError::UnknownAlias(alias.to_string()))
}

/// Alias de wire para um nome canônico.
pub fn alias_of(name: &str) -> Result<&'static str, WireError> {
    spec_of_name(name).map(|spec| spec.alias)
}

/// Nome canônico para um alias de wire.
pub fn field_of(alias: &str) -> Result<&'static str, WireError> {
    spec_of_alias(alias).map(|spec| spec.name)
}
