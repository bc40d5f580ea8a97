use serde::{Deserialize, Serialize};

/// The two revenue categories a business can split its invoicing across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    Servico,
    Infoproduto,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Servico => "servico",
            Self::Infoproduto => "infoproduto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "servico" => Some(Self::Servico),
            "infoproduto" => Some(Self::Infoproduto),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Servico => "Serviço",
            Self::Infoproduto => "Infoproduto",
        }
    }
}

/// Simples Nacional annex (statutory bracket table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Annex {
    /// Commerce; also used for infoproduct revenue.
    AnexoI,
    /// Services.
    AnexoIII,
}

impl Annex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnexoI => "I",
            Self::AnexoIII => "III",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "I" => Some(Self::AnexoI),
            "III" => Some(Self::AnexoIII),
            _ => None,
        }
    }

    pub fn for_category(category: ActivityCategory) -> Self {
        match category {
            ActivityCategory::Servico => Self::AnexoIII,
            ActivityCategory::Infoproduto => Self::AnexoI,
        }
    }
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Annex {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "Anexo {}", self.as_str())
    }
}
