//! Configuração unificada via TOML.
//!
//! Um único `config.toml` cobre agente e coletor; seções ausentes caem nos
//! valores padrão.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::packet::validate_host_id;

/// Configuração do agente (lado que coleta e envia status).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Identificador do host no wire ([a-z0-9]{7})
    pub host_id: String,
    /// Endereço do coletor
    pub collector_ip: String,
    /// Porta TCP do coletor
    pub port: u16,
    /// Intervalo entre reports em segundos
    pub interval_secs: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host_id: "agent01".into(),
            collector_ip: "127.0.0.1".into(),
            port: 8888,
            interval_secs: 5.0,
        }
    }
}

/// Configuração do coletor (lado que recebe status e pede campos).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// IP para bind
    pub bind_ip: String,
    /// Porta TCP para escutar
    pub port: u16,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bind_ip: "0.0.0.0".into(),
            port: 8888,
        }
    }
}

/// Configuração raiz do aplicativo (unifica agente e coletor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub collector: CollectorConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = validate_host_id(&self.agent.host_id) {
            errors.push(e.to_string());
        }
        if self.agent.port == 0 {
            errors.push("Porta do coletor não pode ser 0".into());
        }
        if self.agent.interval_secs < 0.5 || self.agent.interval_secs > 300.0 {
            errors.push(format!(
                "Intervalo de report inválido: {} (0.5–300.0)",
                self.agent.interval_secs
            ));
        }
        if self.collector.port == 0 {
            errors.push("Porta de escuta não pode ser 0".into());
        }

        errors
    }
}
