use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pricing::TAX_RATE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub tax_rate: Decimal,
    pub prompt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tax_rate: TAX_RATE,
            prompt: "> ".into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let tax_rate = match std::env::var("TAX_RATE") {
            Ok(raw) => parse_tax_rate(&raw)?,
            Err(_) => defaults.tax_rate,
        };
        let prompt = std::env::var("MENU_PROMPT").unwrap_or(defaults.prompt);
        Ok(Self { tax_rate, prompt })
    }
}

fn parse_tax_rate(raw: &str) -> anyhow::Result<Decimal> {
    let rate = Decimal::from_str(raw.trim())
        .with_context(|| format!("TAX_RATE is not a decimal: {raw:?}"))?;
    anyhow::ensure!(rate >= Decimal::ZERO, "TAX_RATE must not be negative, got {rate}");
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_uses_thirteen_percent() {
        assert_eq!(AppConfig::default().tax_rate, dec!(0.13));
    }

    #[test]
    fn parses_tax_rate() {
        assert_eq!(parse_tax_rate(" 0.05 ").expect("valid rate"), dec!(0.05));
    }

    #[test]
    fn rejects_bad_tax_rate() {
        let err = parse_tax_rate("thirteen").unwrap_err();
        assert!(err.to_string().contains("TAX_RATE"));
        assert!(parse_tax_rate("-0.1").is_err());
    }
}
