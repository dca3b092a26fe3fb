//! Prompt templates and fallback texts for the advice service.

use crate::domain::foundation::Amount;
use crate::domain::progression::WealthSummary;

/// Reasoning budget for the discovery message.
pub const DISCOVERY_THINKING_BUDGET: u32 = 4000;

/// Reasoning budget for the opportunity advice.
pub const OPPORTUNITY_THINKING_BUDGET: u32 = 2000;

/// Pair of fixed texts used when the provider cannot help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Returned when the provider answers with empty text.
    pub empty: &'static str,
    /// Returned when the provider call fails.
    pub error: &'static str,
}

pub const DISCOVERY_FALLBACK: Fallback = Fallback {
    empty: "A clareza é o fundamento da riqueza. Você acaba de transformar a névoa da incerteza em um mapa estratégico para o seu futuro.",
    error: "Excelente começo! Mapear seus recursos é o ato de coragem que separa os sonhadores dos realizadores de patrimônio.",
};

pub const OPPORTUNITY_FALLBACK: Fallback = Fallback {
    empty: "Priorize 6 meses de reserva em Selic; excedente em FIIs e Ações de Valor para fluxo de caixa constante.",
    error: "Sugerimos manter 70% em ativos de liquidez diária e 30% em ativos geradores de renda passiva.",
};

pub const CHALLENGE_FALLBACK: Fallback = Fallback {
    empty: "Decisão estratégica. Alocar recursos extras com foco em ativos produtivos acelera o efeito dos juros compostos.",
    error: "Excelente decisão! Disciplina na alocação de aportes extraordinários é o que constrói grandes fortunas no longo prazo.",
};

pub fn discovery_prompt(summary: &WealthSummary) -> String {
    format!(
        "Você é um coach financeiro de elite do app \"PatrimônioPro\".\n\
         Sua missão é dar um feedback de alto nível sobre a primeira \"foto financeira\" do usuário.\n\
         \n\
         Dados:\n\
         - Patrimônio Total: R$ {total}\n\
         - Liquidez: R$ {liquid}\n\
         - Investido: R$ {invested}\n\
         \n\
         Diretrizes:\n\
         1. Seja conciso (máximo 3 frases).\n\
         2. Tom profissional, inspirador e visionário.\n\
         3. Fale sobre a clareza como o primeiro degrau para a liberdade.\n\
         4. Idioma: Português do Brasil.",
        total = summary.total.to_pt_br(),
        liquid = summary.liquid.to_pt_br(),
        invested = summary.invested.to_pt_br(),
    )
}

pub fn opportunity_prompt(summary: &WealthSummary) -> String {
    format!(
        "Analise como Inteligência Artificial Sênior. Forneça uma recomendação técnica rápida de alocação.\n\
         \n\
         Cenário:\n\
         - Patrimônio: R$ {total}\n\
         - Liquidez: R$ {liquid}\n\
         - Investido: R$ {invested}\n\
         \n\
         Recomende uma alocação otimizada em 150 caracteres. Seja direto e técnico.",
        total = summary.total.to_pt_br(),
        liquid = summary.liquid.to_pt_br(),
        invested = summary.invested.to_pt_br(),
    )
}

pub fn challenge_prompt(choice_label: &str, amount: Amount) -> String {
    format!(
        "Usuário investiu R$ {amount} em: \"{choice}\".\n\
         Explique o impacto técnico dessa decisão em 2 frases curtas e motivadoras.",
        amount = amount.to_pt_br(),
        choice = choice_label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progression::{AccessibleMoney, Investments};

    fn amount(v: f64) -> Amount {
        Amount::try_new(v).unwrap()
    }

    fn summary() -> WealthSummary {
        let accessible = AccessibleMoney {
            bank1: amount(1500.0),
            ..Default::default()
        };
        let investments = Investments {
            stocks: amount(10000.5),
            ..Default::default()
        };
        WealthSummary::new(&accessible, &investments)
    }

    #[test]
    fn discovery_prompt_formats_totals_pt_br() {
        let prompt = discovery_prompt(&summary());
        assert!(prompt.contains("- Patrimônio Total: R$ 11.500,5"));
        assert!(prompt.contains("- Liquidez: R$ 1.500"));
        assert!(prompt.contains("- Investido: R$ 10.000,5"));
        assert!(prompt.contains("máximo 3 frases"));
    }

    #[test]
    fn opportunity_prompt_asks_for_150_chars() {
        let prompt = opportunity_prompt(&summary());
        assert!(prompt.contains("- Patrimônio: R$ 11.500,5"));
        assert!(prompt.contains("150 caracteres"));
    }

    #[test]
    fn challenge_prompt_names_choice_and_amount() {
        let prompt = challenge_prompt("Tesouro SELIC", Amount::from_whole(2000));
        assert!(prompt.starts_with("Usuário investiu R$ 2.000 em: \"Tesouro SELIC\"."));
    }

    #[test]
    fn fallbacks_are_distinct() {
        for fallback in [DISCOVERY_FALLBACK, OPPORTUNITY_FALLBACK, CHALLENGE_FALLBACK] {
            assert_ne!(fallback.empty, fallback.error);
            assert!(!fallback.empty.is_empty());
        }
    }
}
